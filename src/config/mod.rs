//! Configuration management for canary-mirror.
//!
//! Configuration is read from `~/.config/canary-mirror/config.toml` at startup.
//! If the file doesn't exist, a default configuration with comments is created.

pub mod colors;
pub mod keybindings;

pub use colors::{ColorConfig, Palette};
pub use keybindings::KeybindingConfig;

use serde::Deserialize;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::domain::release::DEFAULT_COMMIT_URL_TEMPLATE;
use crate::fetcher::http_fetcher::DEFAULT_TIMEOUT_SECS;
use crate::pipeline::SortOrder;

pub const DEFAULT_FEED_URL: &str =
    "https://raw.githubusercontent.com/xenia-manager/xenia-mirror/refs/heads/main/data/canary_releases.json";

/// Main configuration struct.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub feed: FeedConfig,
    pub browse: BrowseConfig,
    pub colors: ColorConfig,
    pub keybindings: KeybindingConfig,
}

/// Where the release feed comes from.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    pub url: String,
    pub timeout_secs: u64,
    /// `{tag}` is replaced with the release tag.
    pub commit_url_template: String,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_FEED_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            commit_url_template: DEFAULT_COMMIT_URL_TEMPLATE.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BrowseConfig {
    /// Pause before revealing the next batch, in milliseconds
    pub load_delay_ms: u64,
    pub default_sort: SortOrder,
}

impl Default for BrowseConfig {
    fn default() -> Self {
        Self {
            load_delay_ms: 300,
            default_sort: SortOrder::Newest,
        }
    }
}

impl Config {
    /// Load configuration from the default path.
    ///
    /// If the config file doesn't exist, creates a default one with comments.
    /// If the config file exists but is invalid, returns an error.
    /// Missing fields in the config file will use default values.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::default_config_path()?;
        Self::load_from(&config_path)
    }

    pub fn load_from(config_path: &Path) -> Result<Self, ConfigError> {
        if !config_path.exists() {
            Self::create_default_config(config_path)?;
            return Ok(Self::default());
        }

        let content = fs::read_to_string(config_path).map_err(|e| ConfigError::Io {
            path: config_path.to_path_buf(),
            source: e,
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: config_path.to_path_buf(),
            source: e,
        })?;

        for (action, binding, error) in config.keybindings.invalid_bindings() {
            tracing::warn!("Ignoring keybinding {:?} for {}: {}", binding, action, error);
        }

        Ok(config)
    }

    /// Get the default config file path: `~/.config/canary-mirror/config.toml`
    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("canary-mirror").join("config.toml"))
    }

    fn create_default_config(path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let mut file = fs::File::create(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        file.write_all(Self::default_config_content().as_bytes())
            .map_err(|e| ConfigError::Io {
                path: path.to_path_buf(),
                source: e,
            })?;

        tracing::info!("Wrote default configuration to {}", path.display());
        Ok(())
    }

    fn default_config_content() -> String {
        r##"# canary-mirror configuration
#
# Colors can be specified as:
# - Named colors: Black, Red, Green, Yellow, Blue, Magenta, Cyan, Gray,
#   DarkGray, LightRed, LightGreen, LightYellow, LightBlue, LightMagenta,
#   LightCyan, White, Reset
# - Hex colors: "#RRGGBB" or "#RGB"
#
# Keybindings can be specified as:
# - Single characters: "a", "A", "/"
# - Special keys: Enter, Tab, BackTab, Backspace, Delete, Home, End,
#   PageUp, PageDown, Up, Down, Left, Right, Esc, Space, F1-F12
# - With modifiers: "Ctrl+c", "Shift+Tab", "Alt+Enter"

[feed]
url = "https://raw.githubusercontent.com/xenia-manager/xenia-mirror/refs/heads/main/data/canary_releases.json"
timeout_secs = 15
commit_url_template = "https://github.com/xenia-canary/xenia-canary/commit/{tag}"

[browse]
# Pause before the next batch of releases appears (0 disables it)
load_delay_ms = 300
# "newest" or "oldest"
default_sort = "newest"

# Only the colors you want to change need to be listed.
[colors.dark]
active_border = "Green"
inactive_border = "DarkGray"
selection_bg = "Green"
selection_fg = "Black"

[colors.light]
active_border = "#107C10"
selection_bg = "#107C10"
selection_fg = "White"

[keybindings]
quit = ["q", "Ctrl+c"]
move_up = ["k", "Up"]
move_down = ["j", "Down"]
next_page = ["PageDown", "Ctrl+d"]
prev_page = ["PageUp", "Ctrl+u"]
next_pane = ["Tab"]
prev_pane = ["BackTab", "Shift+Tab"]

focus_search = ["/"]
focus_from_date = ["f"]
focus_to_date = ["t"]
clear_filters = ["x"]
toggle_sort = ["s"]
toggle_theme = ["T"]

open_release = ["o", "Enter"]
open_commit = ["c"]
download_windows = ["w"]
download_linux = ["l"]
"##
        .to_string()
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read/write config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}
