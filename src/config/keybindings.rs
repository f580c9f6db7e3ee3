//! Keybinding configuration for the TUI.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use serde::Deserialize;

use crate::tui::event::Action;

/// Configuration for all keybindings.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct KeybindingConfig {
    pub quit: Vec<String>,
    pub move_up: Vec<String>,
    pub move_down: Vec<String>,
    pub next_page: Vec<String>,
    pub prev_page: Vec<String>,
    pub next_pane: Vec<String>,
    pub prev_pane: Vec<String>,
    pub focus_search: Vec<String>,
    pub focus_from_date: Vec<String>,
    pub focus_to_date: Vec<String>,
    pub clear_filters: Vec<String>,
    pub toggle_sort: Vec<String>,
    pub toggle_theme: Vec<String>,
    pub open_release: Vec<String>,
    pub open_commit: Vec<String>,
    pub download_windows: Vec<String>,
    pub download_linux: Vec<String>,
}

fn keys(list: &[&str]) -> Vec<String> {
    list.iter().map(|k| k.to_string()).collect()
}

impl Default for KeybindingConfig {
    fn default() -> Self {
        Self {
            quit: keys(&["q", "Ctrl+c"]),
            move_up: keys(&["k", "Up"]),
            move_down: keys(&["j", "Down"]),
            next_page: keys(&["PageDown", "Ctrl+d"]),
            prev_page: keys(&["PageUp", "Ctrl+u"]),
            next_pane: keys(&["Tab"]),
            prev_pane: keys(&["BackTab", "Shift+Tab"]),
            focus_search: keys(&["/"]),
            focus_from_date: keys(&["f"]),
            focus_to_date: keys(&["t"]),
            clear_filters: keys(&["x"]),
            toggle_sort: keys(&["s"]),
            toggle_theme: keys(&["T"]),
            open_release: keys(&["o", "Enter"]),
            open_commit: keys(&["c"]),
            download_windows: keys(&["w"]),
            download_linux: keys(&["l"]),
        }
    }
}

impl KeybindingConfig {
    /// Get the action for a key event.
    pub fn get_action(&self, key: &KeyEvent) -> Action {
        let table: [(&[String], Action); 17] = [
            (&self.quit, Action::Quit),
            (&self.move_up, Action::MoveUp),
            (&self.move_down, Action::MoveDown),
            (&self.next_page, Action::NextPage),
            (&self.prev_page, Action::PrevPage),
            (&self.next_pane, Action::NextPane),
            (&self.prev_pane, Action::PrevPane),
            (&self.focus_search, Action::FocusSearch),
            (&self.focus_from_date, Action::FocusFromDate),
            (&self.focus_to_date, Action::FocusToDate),
            (&self.clear_filters, Action::ClearFilters),
            (&self.toggle_sort, Action::ToggleSort),
            (&self.toggle_theme, Action::ToggleTheme),
            (&self.open_release, Action::OpenRelease),
            (&self.open_commit, Action::OpenCommit),
            (&self.download_windows, Action::DownloadWindows),
            (&self.download_linux, Action::DownloadLinux),
        ];

        table
            .into_iter()
            .find(|(bindings, _)| self.matches_key(key, bindings))
            .map(|(_, action)| action)
            .unwrap_or(Action::None)
    }

    fn matches_key(&self, key: &KeyEvent, bindings: &[String]) -> bool {
        bindings.iter().any(|binding| {
            if let Ok(parsed) = parse_key_string(binding) {
                parsed.matches(key)
            } else {
                false
            }
        })
    }

    /// Report bindings that don't parse, as `(action, binding, error)`.
    pub fn invalid_bindings(&self) -> Vec<(&'static str, String, String)> {
        let all: [(&'static str, &[String]); 17] = [
            ("quit", &self.quit),
            ("move_up", &self.move_up),
            ("move_down", &self.move_down),
            ("next_page", &self.next_page),
            ("prev_page", &self.prev_page),
            ("next_pane", &self.next_pane),
            ("prev_pane", &self.prev_pane),
            ("focus_search", &self.focus_search),
            ("focus_from_date", &self.focus_from_date),
            ("focus_to_date", &self.focus_to_date),
            ("clear_filters", &self.clear_filters),
            ("toggle_sort", &self.toggle_sort),
            ("toggle_theme", &self.toggle_theme),
            ("open_release", &self.open_release),
            ("open_commit", &self.open_commit),
            ("download_windows", &self.download_windows),
            ("download_linux", &self.download_linux),
        ];

        all.into_iter()
            .flat_map(|(name, bindings)| {
                bindings.iter().filter_map(move |b| {
                    parse_key_string(b)
                        .err()
                        .map(|e| (name, b.clone(), e))
                })
            })
            .collect()
    }
}

/// A parsed key binding with code and modifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyBinding {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyBinding {
    /// Check if this binding matches a key event.
    pub fn matches(&self, key: &KeyEvent) -> bool {
        self.code == key.code
            && (self.modifiers == key.modifiers
                || self.modifiers == (key.modifiers & !KeyModifiers::SHIFT))
    }
}

/// Parse a key string into a KeyBinding.
///
/// Supported formats:
/// - Single characters: "a", "A", "1", "/"
/// - Special keys: "Enter", "Tab", "BackTab", "Backspace", "Delete", "Home", "End",
///   "PageUp", "PageDown", "Up", "Down", "Left", "Right", "Esc", "Space", "F1"-"F12"
/// - With modifiers: "Ctrl+c", "Shift+Tab", "Alt+Enter", "Ctrl+Shift+a"
pub fn parse_key_string(s: &str) -> Result<KeyBinding, String> {
    let s = s.trim();
    // "+" on its own is the plus key, not a separator
    let parts: Vec<&str> = if s == "+" { vec![s] } else { s.split('+').collect() };

    let mut modifiers = KeyModifiers::NONE;
    let (key_part, modifier_parts) = parts
        .split_last()
        .ok_or_else(|| "Empty key binding".to_string())?;

    for part in modifier_parts {
        match part.to_lowercase().as_str() {
            "ctrl" | "control" => modifiers |= KeyModifiers::CONTROL,
            "shift" => modifiers |= KeyModifiers::SHIFT,
            "alt" => modifiers |= KeyModifiers::ALT,
            _ => return Err(format!("Unknown modifier: {}", part)),
        }
    }

    let code = parse_key_code(key_part)?;

    Ok(KeyBinding { code, modifiers })
}

fn parse_key_code(s: &str) -> Result<KeyCode, String> {
    let mut chars = s.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Ok(KeyCode::Char(c));
    }

    let lower = s.to_lowercase();
    if let Some(n) = lower.strip_prefix('f').and_then(|n| n.parse::<u8>().ok()) {
        if (1..=12).contains(&n) {
            return Ok(KeyCode::F(n));
        }
    }

    match lower.as_str() {
        "enter" | "return" => Ok(KeyCode::Enter),
        "tab" => Ok(KeyCode::Tab),
        "backtab" => Ok(KeyCode::BackTab),
        "backspace" | "bs" => Ok(KeyCode::Backspace),
        "delete" | "del" => Ok(KeyCode::Delete),
        "home" => Ok(KeyCode::Home),
        "end" => Ok(KeyCode::End),
        "pageup" | "pgup" => Ok(KeyCode::PageUp),
        "pagedown" | "pgdn" => Ok(KeyCode::PageDown),
        "up" => Ok(KeyCode::Up),
        "down" => Ok(KeyCode::Down),
        "left" => Ok(KeyCode::Left),
        "right" => Ok(KeyCode::Right),
        "esc" | "escape" => Ok(KeyCode::Esc),
        "space" => Ok(KeyCode::Char(' ')),
        _ => Err(format!("Unknown key: {}", s)),
    }
}
