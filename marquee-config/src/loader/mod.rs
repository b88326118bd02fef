//! Reading stored settings documents from disk.

pub mod error;

use std::fs;
use std::path::Path;

use error::SettingsLoadError;

/// Document formats accepted for stored settings snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsFormat {
    /// `*.toml` and extensionless files.
    Toml,
    /// `*.json` files.
    Json,
}

impl SettingsFormat {
    /// Picks the format from the file extension, defaulting to TOML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => {
                SettingsFormat::Json
            }
            _ => SettingsFormat::Toml,
        }
    }
}

pub(crate) fn read_settings_file(
    path: &Path,
) -> Result<String, SettingsLoadError> {
    if !path.exists() {
        return Err(SettingsLoadError::MissingFile {
            path: path.to_path_buf(),
        });
    }

    fs::read_to_string(path).map_err(|source| SettingsLoadError::Io {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_follows_extension() {
        assert_eq!(
            SettingsFormat::from_path(Path::new("/etc/marquee/settings.json")),
            SettingsFormat::Json
        );
        assert_eq!(
            SettingsFormat::from_path(Path::new("settings.JSON")),
            SettingsFormat::Json
        );
        assert_eq!(
            SettingsFormat::from_path(Path::new("settings.toml")),
            SettingsFormat::Toml
        );
        assert_eq!(
            SettingsFormat::from_path(Path::new("settings")),
            SettingsFormat::Toml
        );
    }

    #[test]
    fn missing_file_is_reported_with_path() {
        let err = read_settings_file(Path::new("/nonexistent/marquee.toml"))
            .unwrap_err();
        assert!(matches!(err, SettingsLoadError::MissingFile { .. }));
        assert!(err.to_string().contains("/nonexistent/marquee.toml"));
    }
}
