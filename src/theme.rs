//! Dark/light preference persisted across runs.

use anyhow::{Context, Result};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "light" => Some(Theme::Light),
            "dark" => Some(Theme::Dark),
            _ => None,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Theme::Light => write!(f, "light"),
            Theme::Dark => write!(f, "dark"),
        }
    }
}

/// File-backed theme preference
pub struct ThemeStore {
    path: PathBuf,
    current: Theme,
}

impl ThemeStore {
    /// Default location under the user config directory
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("cribinfo").join("theme"))
    }

    /// Load the stored preference. Missing or unrecognised values mean light.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let current = fs::read_to_string(&path)
            .ok()
            .and_then(|raw| Theme::parse(&raw))
            .unwrap_or_default();
        Self { path, current }
    }

    pub fn theme(&self) -> Theme {
        self.current
    }

    pub fn is_dark(&self) -> bool {
        self.current == Theme::Dark
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Flip the preference and write it out.
    pub fn toggle(&mut self) -> Result<Theme> {
        let next = self.current.toggled();
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        fs::write(&self.path, next.to_string())
            .with_context(|| format!("Failed to write {}", self.path.display()))?;
        self.current = next;
        Ok(next)
    }
}
