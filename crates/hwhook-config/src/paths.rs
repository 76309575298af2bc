//! Platform-specific paths for the hook configuration.
//!
//! # Search Order
//!
//! 1. An explicit path given by the caller (no fallback when it is missing)
//! 2. The `HWHOOK_CONFIG` environment variable
//! 3. User config: `~/.config/hwhook/hook.toml` (via `dirs::config_dir`)
//! 4. System config: `/etc/hwhook/hook.toml`

use std::path::{Path, PathBuf};

/// Application name used for directory paths.
const APP_NAME: &str = "hwhook";

/// File name of the hook configuration.
pub const CONFIG_FILE_NAME: &str = "hook.toml";

/// Environment variable naming an explicit configuration file.
pub const CONFIG_ENV_VAR: &str = "HWHOOK_CONFIG";

/// Returns the user-specific configuration directory.
///
/// Returns a fallback path if the config directory cannot be determined.
pub fn user_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Returns the user-specific configuration file path.
pub fn user_config_file() -> PathBuf {
    user_config_dir().join(CONFIG_FILE_NAME)
}

/// Returns the system-wide configuration file path.
pub fn system_config_file() -> PathBuf {
    PathBuf::from("/etc").join(APP_NAME).join(CONFIG_FILE_NAME)
}

/// Candidate configuration files in search order.
pub fn search_paths(explicit: Option<&Path>) -> Vec<PathBuf> {
    let mut paths = Vec::with_capacity(4);
    if let Some(path) = explicit {
        paths.push(path.to_path_buf());
    }
    if let Some(path) = std::env::var_os(CONFIG_ENV_VAR) {
        paths.push(PathBuf::from(path));
    }
    paths.push(user_config_file());
    paths.push(system_config_file());
    paths
}

/// Find the first existing configuration file.
///
/// An explicit path is authoritative: when it does not name a file the
/// search stops there instead of falling back to the other locations.
pub fn find_config(explicit: Option<&Path>) -> Result<PathBuf, crate::ConfigError> {
    let searched = match explicit {
        Some(path) => vec![path.to_path_buf()],
        None => search_paths(None),
    };
    searched
        .iter()
        .find(|path| path.is_file())
        .cloned()
        .ok_or(crate::ConfigError::NotFound { searched })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_user_config_dir() {
        let dir = user_config_dir();
        assert!(dir.to_string_lossy().contains("hwhook"));
    }

    #[test]
    fn test_user_config_file_name() {
        assert!(user_config_file().ends_with("hwhook/hook.toml"));
    }

    #[test]
    fn test_system_config_file() {
        assert_eq!(system_config_file(), PathBuf::from("/etc/hwhook/hook.toml"));
    }

    #[test]
    fn test_explicit_path_searched_first() {
        let paths = search_paths(Some(Path::new("/tmp/custom.toml")));
        assert_eq!(paths[0], PathBuf::from("/tmp/custom.toml"));
        assert_eq!(paths.last(), Some(&system_config_file()));
    }

    #[test]
    fn test_find_config_by_explicit_path() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("hook.toml");
        fs::write(&path, "").unwrap();

        assert_eq!(find_config(Some(&path)).unwrap(), path);
    }

    #[test]
    fn test_find_config_missing_explicit_lists_it() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("absent.toml");

        let Err(crate::ConfigError::NotFound { searched }) = find_config(Some(&path)) else {
            panic!("missing explicit path must not fall back to other locations");
        };
        assert_eq!(searched, vec![path]);
    }
}
