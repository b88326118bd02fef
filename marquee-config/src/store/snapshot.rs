//! Snapshot of stored settings, built in memory or loaded from disk.

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::loader::{SettingsFormat, error::SettingsLoadError, read_settings_file};
use crate::models::sources::EnvConfig;
use crate::models::{ConfigValue, ServiceConfig, ServiceKey};

use super::SettingsStore;

/// Point-in-time copy of the persisted integration settings.
///
/// Built in memory or parsed from the same document shape the settings page
/// saves: one table per service, e.g.
///
/// ```toml
/// [jellyfin]
/// url = "http://jellyfin.local:8096"
/// api_key = "..."
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SettingsSnapshot {
    services: BTreeMap<ServiceKey, ServiceConfig>,
}

/// On-disk layout. Tables for other parts of the application are ignored.
#[derive(Debug, Default, Deserialize)]
struct SnapshotFile {
    plex: Option<ServiceConfig>,
    jellyfin: Option<ServiceConfig>,
    overseerr: Option<ServiceConfig>,
    trakt: Option<ServiceConfig>,
    clients: Option<ServiceConfig>,
}

impl From<SnapshotFile> for SettingsSnapshot {
    fn from(file: SnapshotFile) -> Self {
        let services = [
            (ServiceKey::Plex, file.plex),
            (ServiceKey::Jellyfin, file.jellyfin),
            (ServiceKey::Overseerr, file.overseerr),
            (ServiceKey::Trakt, file.trakt),
            (ServiceKey::Clients, file.clients),
        ]
        .into_iter()
        .filter_map(|(service, config)| config.map(|config| (service, config)))
        .collect();

        Self { services }
    }
}

impl SettingsSnapshot {
    /// Empty snapshot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`SettingsSnapshot::set`].
    pub fn with(
        mut self,
        service: ServiceKey,
        field: impl Into<String>,
        value: impl Into<ConfigValue>,
    ) -> Self {
        self.set(service, field, value);
        self
    }

    /// Store `value` as `field` of `service`.
    pub fn set(
        &mut self,
        service: ServiceKey,
        field: impl Into<String>,
        value: impl Into<ConfigValue>,
    ) {
        self.services
            .entry(service)
            .or_default()
            .insert(field, value);
    }

    /// Replace everything stored for `service`.
    pub fn replace(&mut self, service: ServiceKey, config: ServiceConfig) {
        self.services.insert(service, config);
    }

    /// Everything stored for `service`.
    pub fn service(&self, service: ServiceKey) -> Option<&ServiceConfig> {
        self.services.get(&service)
    }

    /// Parse a TOML settings document.
    pub fn from_toml_str(raw: &str) -> Result<Self, toml::de::Error> {
        toml::from_str::<SnapshotFile>(raw).map(Self::from)
    }

    /// Parse a JSON settings document.
    pub fn from_json_str(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str::<SnapshotFile>(raw).map(Self::from)
    }

    /// Load a snapshot from disk; `.json` files are parsed as JSON and
    /// anything else as TOML.
    pub fn from_path(path: &Path) -> Result<Self, SettingsLoadError> {
        let contents = read_settings_file(path)?;
        let snapshot = match SettingsFormat::from_path(path) {
            SettingsFormat::Toml => Self::from_toml_str(&contents).map_err(
                |source| SettingsLoadError::ParseToml {
                    path: path.to_path_buf(),
                    source,
                },
            )?,
            SettingsFormat::Json => Self::from_json_str(&contents).map_err(
                |source| SettingsLoadError::ParseJson {
                    path: path.to_path_buf(),
                    source,
                },
            )?,
        };

        debug!(
            path = %path.display(),
            services = snapshot.services.len(),
            "loaded stored settings snapshot"
        );

        Ok(snapshot)
    }

    /// Snapshot named by `MARQUEE_SETTINGS_PATH`, or an empty one when the
    /// variable is unset.
    pub fn from_env(env: &EnvConfig) -> Result<Self, SettingsLoadError> {
        match env.settings_path.as_deref() {
            Some(path) => Self::from_path(path),
            None => Ok(Self::default()),
        }
    }
}

impl SettingsStore for SettingsSnapshot {
    fn get(&self, service: ServiceKey, field: &str) -> Option<ConfigValue> {
        self.services
            .get(&service)
            .and_then(|config| config.get(field))
            .cloned()
    }
}
