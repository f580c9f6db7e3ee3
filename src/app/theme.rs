use std::fmt;
use std::sync::Arc;

use crate::app::Result;
use crate::store::PreferenceStore;

pub const THEME_KEY: &str = "theme";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "dark" => Some(Theme::Dark),
            "light" => Some(Theme::Light),
            _ => None,
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Owner of the theme flag. Reads the persisted value once on `load` and
/// writes it back on every `toggle`; nothing else mutates it.
pub struct ThemeContext {
    theme: Theme,
    prefs: Arc<dyn PreferenceStore + Send + Sync>,
}

impl ThemeContext {
    pub fn load(prefs: Arc<dyn PreferenceStore + Send + Sync>) -> Result<Self> {
        let theme = match prefs.get(THEME_KEY)? {
            None => Theme::default(),
            Some(raw) => Theme::parse(&raw).unwrap_or_else(|| {
                tracing::warn!("Unknown persisted theme {:?}, using {}", raw, Theme::default());
                Theme::default()
            }),
        };

        tracing::debug!("Loaded theme preference: {}", theme);
        Ok(Self { theme, prefs })
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    /// Flip the theme and persist it. The in-memory flag only changes when the
    /// write succeeds.
    pub fn toggle(&mut self) -> Result<Theme> {
        let next = self.theme.toggled();
        self.prefs.set(THEME_KEY, next.as_str())?;
        self.theme = next;
        Ok(next)
    }
}
