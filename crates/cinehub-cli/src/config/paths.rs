//! Config file location.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Application directory name under the config root.
const APP_DIR: &str = "cinehub";

/// Config file name.
const CONFIG_FILE: &str = "config.toml";

/// Resolves the config file path.
///
/// Lookup order:
/// 1. `--dir` → `{dir}/config.toml`
/// 2. `$XDG_CONFIG_HOME/cinehub/config.toml`
/// 3. `~/.config/cinehub/config.toml`
///
/// # Errors
///
/// Returns an error if neither `XDG_CONFIG_HOME` nor `HOME` is set (when `dir` is `None`).
pub fn resolve_config_path(dir: Option<&PathBuf>) -> Result<PathBuf> {
    if let Some(d) = dir {
        return Ok(d.join(CONFIG_FILE));
    }
    let xdg = std::env::var_os("XDG_CONFIG_HOME").filter(|v| !v.is_empty());
    let home = std::env::var_os("HOME");
    config_path_from(xdg.as_deref().map(Path::new), home.as_deref().map(Path::new))
}

/// Picks the config root from the XDG directory or the home directory.
fn config_path_from(xdg_config_home: Option<&Path>, home: Option<&Path>) -> Result<PathBuf> {
    let root = match xdg_config_home {
        Some(xdg) => xdg.to_path_buf(),
        None => home
            .context("neither XDG_CONFIG_HOME nor HOME is set")?
            .join(".config"),
    };
    Ok(root.join(APP_DIR).join(CONFIG_FILE))
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn test_resolve_with_dir() {
        // Arrange
        let dir = PathBuf::from("/tmp/cinehub-home");

        // Act
        let path = resolve_config_path(Some(&dir)).unwrap();

        // Assert
        assert_eq!(path, PathBuf::from("/tmp/cinehub-home/config.toml"));
    }

    #[test]
    fn test_xdg_wins_over_home() {
        // Act
        let path = config_path_from(Some(Path::new("/xdg")), Some(Path::new("/home/u"))).unwrap();

        // Assert
        assert_eq!(path, PathBuf::from("/xdg/cinehub/config.toml"));
    }

    #[test]
    fn test_home_fallback() {
        // Act
        let path = config_path_from(None, Some(Path::new("/home/u"))).unwrap();

        // Assert
        assert_eq!(path, PathBuf::from("/home/u/.config/cinehub/config.toml"));
    }

    #[test]
    fn test_no_root_is_error() {
        assert!(config_path_from(None, None).is_err());
    }
}
