//! Console configuration.
//!
//! Values come from a TOML file (by default `<config_dir>/petdesk/config.toml`)
//! and are then overridden by command-line flags. Every key is optional:
//!
//! ```toml
//! base_url = "http://localhost:8080/api/v1"
//! resource = "pet"
//! page_size = 10
//! case_sensitive = true
//! notification_life_ms = 3000
//! export_dir = "~/Downloads"
//! theme = "vela-blue"
//! # theme_file = "/path/to/theme.toml"
//! trace_level = "debug"
//! offline = false
//! ```

use crate::domain::error::{PetdeskError, Result};
use crate::infrastructure::paths;
use crate::ui::table::PAGE_SIZE_OPTIONS;
use crate::ui::theme::{Theme, DEFAULT_THEME};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Resolved console configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Base path of the remote service, without the resource segment.
    pub base_url: String,

    /// Resource segment appended to `base_url` (`{base}/pet`).
    pub resource: String,

    /// Initial rows per page; one of 5, 10 or 25.
    pub page_size: usize,

    /// Whether filters compare text case-sensitively.
    pub case_sensitive: bool,

    /// How long notifications stay visible.
    pub notification_life_ms: u64,

    /// Directory receiving export files. A leading `~` is expanded.
    pub export_dir: PathBuf,

    /// Built-in theme name. Ignored when `theme_file` is set.
    pub theme: String,

    /// Custom TOML theme file. See [`crate::ui::theme`] for the format.
    pub theme_file: Option<PathBuf>,

    /// Log level directive (`trace`, `debug`, `info`, `warn`, `error`).
    /// `RUST_LOG` takes precedence.
    pub trace_level: Option<String>,

    /// Use the in-process collection instead of the remote service.
    pub offline: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8080/api/v1".to_string(),
            resource: "pet".to_string(),
            page_size: 10,
            case_sensitive: true,
            notification_life_ms: 3000,
            export_dir: PathBuf::from("."),
            theme: DEFAULT_THEME.to_string(),
            theme_file: None,
            trace_level: None,
            offline: false,
        }
    }
}

impl Config {
    /// Loads the configuration file.
    ///
    /// With an explicit `path` the file must exist. Without one, the default
    /// location is tried and a missing file yields the defaults. Values are
    /// validated by the caller once overrides are applied.
    ///
    /// # Errors
    ///
    /// Returns [`PetdeskError::Config`] if a file cannot be read or parsed.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => Self::from_file(path)?,
            None => match paths::config_path() {
                Some(default) if default.exists() => Self::from_file(&default)?,
                _ => {
                    tracing::debug!("no configuration file, using defaults");
                    Self::default()
                }
            },
        };
        Ok(config)
    }

    /// Parses a configuration file without validating it.
    ///
    /// # Errors
    ///
    /// Returns [`PetdeskError::Config`] if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            PetdeskError::Config(format!("failed to read config file {}: {e}", path.display()))
        })?;
        let config = toml::from_str(&contents).map_err(|e| {
            PetdeskError::Config(format!("invalid TOML in {}: {e}", path.display()))
        })?;
        tracing::debug!(path = %path.display(), "configuration loaded");
        Ok(config)
    }

    /// Checks values that the type system cannot.
    ///
    /// # Errors
    ///
    /// Returns [`PetdeskError::Config`] naming the first offending key.
    pub fn validate(&self) -> Result<()> {
        if !PAGE_SIZE_OPTIONS.contains(&self.page_size) {
            return Err(PetdeskError::Config(format!(
                "page_size must be one of {PAGE_SIZE_OPTIONS:?}, got {}",
                self.page_size
            )));
        }
        if !self.offline
            && !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://"))
        {
            return Err(PetdeskError::Config(format!(
                "base_url must be an http(s) URL, got {:?}",
                self.base_url
            )));
        }
        if self.resource.trim().is_empty() {
            return Err(PetdeskError::Config("resource must not be empty".to_string()));
        }
        if self.notification_life_ms == 0 {
            return Err(PetdeskError::Config(
                "notification_life_ms must be positive".to_string(),
            ));
        }
        Ok(())
    }

    #[must_use]
    pub const fn notification_life(&self) -> Duration {
        Duration::from_millis(self.notification_life_ms)
    }

    /// Export directory with `~` expanded.
    #[must_use]
    pub fn export_dir(&self) -> PathBuf {
        paths::expand_tilde(&self.export_dir)
    }

    /// Resolves the configured theme; a theme file wins over the name.
    ///
    /// # Errors
    ///
    /// Returns [`PetdeskError::Config`] for an unknown name or a bad file.
    pub fn theme(&self) -> Result<Theme> {
        let file = self.theme_file.as_ref().map(paths::expand_tilde);
        Theme::resolve(&self.theme, file.as_deref())
    }
}
