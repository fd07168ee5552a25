//! Platform path resolution.
//!
//! Locations follow the platform conventions reported by `dirs`, with a
//! current-directory fallback when a base directory cannot be determined.

use std::path::{Path, PathBuf};

const APP_DIR: &str = "petdesk";

/// Directory holding the log file.
///
/// Usually `~/.local/share/petdesk` on Linux.
#[must_use]
pub fn data_dir() -> PathBuf {
    dirs::data_local_dir().map_or_else(|| PathBuf::from("."), |dir| dir.join(APP_DIR))
}

/// Default configuration file, usually `~/.config/petdesk/config.toml`.
#[must_use]
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR).join("config.toml"))
}

/// Log file inside [`data_dir`].
#[must_use]
pub fn log_path() -> PathBuf {
    data_dir().join("petdesk.log")
}

/// Expands a leading `~` to the home directory.
///
/// Paths without a tilde, and every path when no home directory is known,
/// are returned unchanged.
///
/// # Examples
///
/// ```
/// use petdesk::infrastructure::expand_tilde;
/// use std::path::PathBuf;
///
/// assert_eq!(expand_tilde("/srv/exports"), PathBuf::from("/srv/exports"));
/// ```
#[must_use]
pub fn expand_tilde(path: impl AsRef<Path>) -> PathBuf {
    let path = path.as_ref();
    let Ok(rest) = path.strip_prefix("~") else {
        return path.to_path_buf();
    };
    dirs::home_dir().map_or_else(|| path.to_path_buf(), |home| home.join(rest))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_file_lives_in_data_dir() {
        assert_eq!(log_path().parent(), Some(data_dir().as_path()));
        assert!(log_path().ends_with("petdesk.log"));
    }

    #[test]
    fn config_file_name() {
        if let Some(path) = config_path() {
            assert!(path.ends_with("petdesk/config.toml"));
        }
    }

    #[test]
    fn tilde_expansion() {
        assert_eq!(expand_tilde("exports"), PathBuf::from("exports"));
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_tilde("~/exports"), home.join("exports"));
            assert_eq!(expand_tilde("~"), home);
        }
    }
}
