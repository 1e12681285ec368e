//! Configuration to acknowledge reader preferences as well as set defaults.
//!
//! Specifically, we try to find a sectionspy.toml, and if present we load settings from there.
//! This controls how visibility is observed (thresholds and root margin), how the active section
//! falls back when nothing is measured, and which files are picked up from directories.

use crate::observer::RootMargin;
use crate::selector::Fallback;
use crate::{Error, Result};
use facet::Facet;
use std::fs;
use std::path::Path;

/// Name of the configuration file looked up in the working directory.
pub const CONFIG_FILE: &str = "sectionspy.toml";

#[derive(Facet, Clone, Debug, PartialEq)]
/// Reader preferences loaded from sectionspy.toml or falling back to defaults.
pub struct Config {
    #[facet(default = vec![0.5])]
    /// Visible fractions at which a section's visibility is re-reported.
    pub thresholds: Vec<f64>,
    #[facet(default = 0.0)]
    /// Root margin above the viewport, as a fraction of its height.
    pub root_margin_top: f64,
    #[facet(default = -0.4)]
    /// Root margin below the viewport, as a fraction of its height (negative shrinks).
    pub root_margin_bottom: f64,
    #[facet(default = false)]
    /// Keep the previously active section when no visible section has been measured.
    pub prefer_previous_active: bool,
    #[facet(default = vec!["md".to_string()])]
    /// File suffixes to match when scanning directories.
    pub file_extensions: Vec<String>,
    #[facet(default = 32)]
    /// Width of the navigation sidebar in columns.
    pub sidebar_width: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            thresholds: vec![0.5],
            root_margin_top: 0.0,
            root_margin_bottom: -0.4,
            prefer_previous_active: false,
            file_extensions: vec!["md".to_string()],
            sidebar_width: 32,
        }
    }
}

impl Config {
    #[must_use]
    /// Load configuration from sectionspy.toml if present.
    ///
    /// A missing file gives the defaults; an unreadable or invalid one is logged and ignored.
    pub fn load() -> Self {
        Self::load_from(Path::new(CONFIG_FILE))
    }

    #[must_use]
    /// Load configuration from `path`, falling back to defaults.
    pub fn load_from(path: &Path) -> Self {
        let Ok(contents) = fs::read_to_string(path) else {
            return Self::default();
        };
        match Self::from_toml(&contents) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "ignoring configuration");
                Self::default()
            }
        }
    }

    /// Parse configuration from TOML text; absent keys take their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the text is not valid TOML for this structure.
    pub fn from_toml(contents: &str) -> Result<Self> {
        facet_toml::from_str::<Self>(contents).map_err(|e| Error::Config(e.to_string()))
    }

    #[must_use]
    /// Root margin for the viewport observer.
    pub fn root_margin(&self) -> RootMargin {
        RootMargin {
            top: self.root_margin_top,
            bottom: self.root_margin_bottom,
        }
    }

    #[must_use]
    /// Fallback policy for the active-section selector.
    pub fn fallback(&self) -> Fallback {
        if self.prefer_previous_active {
            Fallback::PreviousActive
        } else {
            Fallback::DocumentOrder
        }
    }
}

#[cfg(test)]
#[path = "tests/config.rs"]
mod tests;
