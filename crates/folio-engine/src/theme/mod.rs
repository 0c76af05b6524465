//! Light/dark theme flag, its persistence, and the toggle controller.

mod store;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::core::error::FolioError;

pub use store::{KeyValueStore, MemoryStore, UnavailableStore};

/// Storage key the flag lives under.
pub const THEME_KEY: &str = "theme";

/// The page theme. Absent or unreadable storage means `Dark`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeFlag {
    #[default]
    Dark,
    Light,
}

impl ThemeFlag {
    pub fn as_str(self) -> &'static str {
        match self {
            ThemeFlag::Dark => "dark",
            ThemeFlag::Light => "light",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            ThemeFlag::Dark => ThemeFlag::Light,
            ThemeFlag::Light => ThemeFlag::Dark,
        }
    }

    /// Icon class for the toggle button. It shows the theme a click switches to:
    /// a sun while dark, a moon while light.
    pub fn icon_class(self) -> &'static str {
        match self {
            ThemeFlag::Dark => "fas fa-sun",
            ThemeFlag::Light => "fas fa-moon",
        }
    }
}

impl fmt::Display for ThemeFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemeFlag {
    type Err = FolioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "dark" => Ok(ThemeFlag::Dark),
            "light" => Ok(ThemeFlag::Light),
            other => Err(FolioError::UnknownTheme(other.to_string())),
        }
    }
}

/// Read the persisted flag. Any failure (storage error, unknown value) falls back to the default.
pub fn load_theme<S: KeyValueStore>(store: &S) -> ThemeFlag {
    match store.get(THEME_KEY) {
        Ok(Some(raw)) => raw.parse().unwrap_or_else(|err| {
            log::warn!("ignoring stored theme: {err}");
            ThemeFlag::default()
        }),
        Ok(None) => ThemeFlag::default(),
        Err(err) => {
            log::warn!("theme read failed: {err}");
            ThemeFlag::default()
        }
    }
}

/// Owns the current theme and writes every change through to the store.
pub struct ThemeController<S: KeyValueStore> {
    store: S,
    current: ThemeFlag,
}

impl<S: KeyValueStore> ThemeController<S> {
    /// Load the persisted theme from `store`.
    pub fn new(store: S) -> Self {
        let current = load_theme(&store);
        Self { store, current }
    }

    pub fn theme(&self) -> ThemeFlag {
        self.current
    }

    pub fn icon_class(&self) -> &'static str {
        self.current.icon_class()
    }

    /// Flip the theme and persist it. A failed write is logged and otherwise
    /// ignored; the in-memory flag still flips so the page stays responsive.
    pub fn toggle_theme(&mut self) -> ThemeFlag {
        self.current = self.current.toggled();
        if let Err(err) = self.store.set(THEME_KEY, self.current.as_str()) {
            log::warn!("theme write failed: {err}");
        }
        log::debug!("theme -> {}", self.current);
        self.current
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
