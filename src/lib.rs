//! # canary-mirror
//!
//! A terminal browser for Xenia Canary release builds.
//!
//! ## Architecture
//!
//! The release list flows through a small pipeline:
//!
//! ```text
//! Fetcher → ReleaseStore → filter::apply → Pager → TUI
//! ```
//!
//! - [`fetcher`]: single HTTP GET of the JSON release feed
//! - [`store`]: the loaded release list and persisted preferences
//! - [`pipeline`]: search, date-range filtering, sorting and batching
//! - [`tui`]: terminal user interface built with ratatui
//!
//! ## Quick Start
//!
//! ```bash
//! # Browse releases
//! canary-mirror
//!
//! # Print the newest Vulkan-related builds from 2024
//! canary-mirror list --search vulkan --from 2024-01-01 --to 2024-12-31
//!
//! # Flip between dark and light
//! canary-mirror theme toggle
//! ```

/// Application context, theme preference and error handling.
///
/// The [`AppContext`](app::AppContext) struct wires together the fetcher,
/// the preference store and the loaded configuration.
pub mod app;

/// Command-line interface using clap.
///
/// - `tui` - Launch the TUI (default)
/// - `list` - Print filtered releases
/// - `theme [show|toggle]` - Inspect or flip the saved theme
pub mod cli;

/// Configuration management.
///
/// Loads from `~/.config/canary-mirror/config.toml`, supporting:
/// - Feed URL and commit link template
/// - Per-theme colors (named or hex)
/// - Custom keybindings
pub mod config;

/// Release feed domain model: [`Release`](domain::Release),
/// [`Changelog`](domain::Changelog), [`Asset`](domain::Asset).
pub mod domain;

/// Feed fetching.
///
/// - [`Fetcher`](fetcher::Fetcher): async trait for loading the release feed
/// - [`HttpFetcher`](fetcher::http_fetcher::HttpFetcher): reqwest-based implementation
pub mod fetcher;

/// Filter, sort and pagination over the loaded releases.
pub mod pipeline;

/// Release list state and SQLite-backed preferences.
pub mod store;

/// Terminal user interface.
///
/// Filter bar on top, release list and details side by side, status bar
/// at the bottom. Scrolling to the end of the list reveals the next batch.
pub mod tui;
