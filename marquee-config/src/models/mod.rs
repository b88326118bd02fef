//! Settings payload model shared by validation and stored-settings access.

pub mod sources;
pub mod trailer;

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The integrations whose settings can be submitted for validation.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ServiceKey {
    /// Plex media server.
    Plex,
    /// Jellyfin media server.
    Jellyfin,
    /// Overseerr request manager.
    Overseerr,
    /// Trakt watch-history sync.
    Trakt,
    /// Living-room client devices.
    Clients,
}

impl ServiceKey {
    /// Wire key for [`ServiceKey::Plex`].
    pub const PLEX: &'static str = "plex";
    /// Wire key for [`ServiceKey::Jellyfin`].
    pub const JELLYFIN: &'static str = "jellyfin";
    /// Wire key for [`ServiceKey::Overseerr`].
    pub const OVERSEERR: &'static str = "overseerr";
    /// Wire key for [`ServiceKey::Trakt`].
    pub const TRAKT: &'static str = "trakt";
    /// Wire key for [`ServiceKey::Clients`].
    pub const CLIENTS: &'static str = "clients";

    /// Every service, in registry order.
    pub const ALL: [ServiceKey; 5] = [
        ServiceKey::Plex,
        ServiceKey::Jellyfin,
        ServiceKey::Overseerr,
        ServiceKey::Trakt,
        ServiceKey::Clients,
    ];

    /// Key used in payloads and stored settings.
    pub fn as_str(self) -> &'static str {
        match self {
            ServiceKey::Plex => Self::PLEX,
            ServiceKey::Jellyfin => Self::JELLYFIN,
            ServiceKey::Overseerr => Self::OVERSEERR,
            ServiceKey::Trakt => Self::TRAKT,
            ServiceKey::Clients => Self::CLIENTS,
        }
    }

    /// Human-facing name used in rejection messages.
    pub fn display_name(self) -> &'static str {
        match self {
            ServiceKey::Plex => "Plex",
            ServiceKey::Jellyfin => "Jellyfin",
            ServiceKey::Overseerr => "Overseerr",
            ServiceKey::Trakt => "Trakt",
            ServiceKey::Clients => "Clients",
        }
    }
}

impl fmt::Display for ServiceKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ServiceKey {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            Self::PLEX => Ok(ServiceKey::Plex),
            Self::JELLYFIN => Ok(ServiceKey::Jellyfin),
            Self::OVERSEERR => Ok(ServiceKey::Overseerr),
            Self::TRAKT => Ok(ServiceKey::Trakt),
            Self::CLIENTS => Ok(ServiceKey::Clients),
            _ => Err("unknown service"),
        }
    }
}

impl TryFrom<&str> for ServiceKey {
    type Error = &'static str;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        ServiceKey::from_str(value)
    }
}

/// Devices nested under the `clients` service, in the order they are checked.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum ClientDevice {
    /// LG webOS television.
    LgTv,
    /// Apple TV set-top box.
    AppleTv,
}

impl ClientDevice {
    /// Block key for [`ClientDevice::LgTv`].
    pub const LG_TV: &'static str = "lg_tv";
    /// Block key for [`ClientDevice::AppleTv`].
    pub const APPLE_TV: &'static str = "apple_tv";

    /// Every device, in check order.
    pub const ALL: [ClientDevice; 2] = [ClientDevice::LgTv, ClientDevice::AppleTv];

    /// Key of the device's block under `clients`.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientDevice::LgTv => Self::LG_TV,
            ClientDevice::AppleTv => Self::APPLE_TV,
        }
    }
}

impl fmt::Display for ClientDevice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClientDevice {
    type Err = &'static str;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            Self::LG_TV => Ok(ClientDevice::LgTv),
            Self::APPLE_TV => Ok(ClientDevice::AppleTv),
            _ => Err("unknown client device"),
        }
    }
}

/// A single submitted settings value.
///
/// Payloads arrive as loosely typed JSON (or TOML for stored snapshots), so
/// the value keeps whatever shape the caller sent and the rules only ever ask
/// whether it is truthy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConfigValue {
    /// Explicit `null`, treated like an omitted field.
    Null,
    /// Checkbox-style flag.
    Bool(bool),
    /// Any numeric value; integers are widened.
    Number(f64),
    /// Free text such as URLs and tokens.
    Text(String),
    /// Ordered values, e.g. selected library names.
    List(Vec<ConfigValue>),
    /// Nested block, e.g. a device under `clients`.
    Map(ServiceConfig),
}

impl ConfigValue {
    /// `null`, `false`, `0`, `""`, `[]` and `{}` are falsy; everything else
    /// is truthy.
    pub fn is_truthy(&self) -> bool {
        match self {
            ConfigValue::Null => false,
            ConfigValue::Bool(value) => *value,
            ConfigValue::Number(value) => *value != 0.0,
            ConfigValue::Text(value) => !value.is_empty(),
            ConfigValue::List(values) => !values.is_empty(),
            ConfigValue::Map(map) => !map.is_empty(),
        }
    }

    /// Whether the value is an explicit `null`.
    pub fn is_null(&self) -> bool {
        matches!(self, ConfigValue::Null)
    }

    /// Text content, if the value is text.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ConfigValue::Text(value) => Some(value),
            _ => None,
        }
    }

    /// Nested block, if the value is one.
    pub fn as_map(&self) -> Option<&ServiceConfig> {
        match self {
            ConfigValue::Map(map) => Some(map),
            _ => None,
        }
    }
}

impl From<bool> for ConfigValue {
    fn from(value: bool) -> Self {
        ConfigValue::Bool(value)
    }
}

impl From<f64> for ConfigValue {
    fn from(value: f64) -> Self {
        ConfigValue::Number(value)
    }
}

impl From<i64> for ConfigValue {
    fn from(value: i64) -> Self {
        ConfigValue::Number(value as f64)
    }
}

impl From<&str> for ConfigValue {
    fn from(value: &str) -> Self {
        ConfigValue::Text(value.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(value: String) -> Self {
        ConfigValue::Text(value)
    }
}

impl From<Vec<ConfigValue>> for ConfigValue {
    fn from(values: Vec<ConfigValue>) -> Self {
        ConfigValue::List(values)
    }
}

impl From<ServiceConfig> for ConfigValue {
    fn from(value: ServiceConfig) -> Self {
        ConfigValue::Map(value)
    }
}

impl<T: Into<ConfigValue>> From<Option<T>> for ConfigValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(ConfigValue::Null, Into::into)
    }
}

/// Settings payload for one service, possibly partial.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServiceConfig {
    fields: BTreeMap<String, ConfigValue>,
}

impl ServiceConfig {
    /// Empty payload.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, handy for assembling payloads in handlers and tests.
    pub fn with(
        mut self,
        field: impl Into<String>,
        value: impl Into<ConfigValue>,
    ) -> Self {
        self.insert(field, value);
        self
    }

    /// Set `field`, returning the value it replaced.
    pub fn insert(
        &mut self,
        field: impl Into<String>,
        value: impl Into<ConfigValue>,
    ) -> Option<ConfigValue> {
        self.fields.insert(field.into(), value.into())
    }

    /// Value submitted for `field`, `null` included.
    pub fn get(&self, field: &str) -> Option<&ConfigValue> {
        self.fields.get(field)
    }

    /// Whether the payload mentions `field` at all.
    pub fn contains_key(&self, field: &str) -> bool {
        self.fields.contains_key(field)
    }

    /// Whether `field` is present and truthy.
    pub fn is_truthy(&self, field: &str) -> bool {
        self.get(field).is_some_and(ConfigValue::is_truthy)
    }

    /// Whether the payload switches the service on. Absent means "not touched".
    pub fn enabled(&self) -> bool {
        self.is_truthy("enabled")
    }

    /// Nested settings block, e.g. a device under `clients`.
    pub fn nested(&self, field: &str) -> Option<&ServiceConfig> {
        self.get(field).and_then(ConfigValue::as_map)
    }

    /// Whether no field was submitted.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Number of submitted fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Fields in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &ConfigValue)> {
        self.fields.iter().map(|(key, value)| (key.as_str(), value))
    }
}

impl<K, V> FromIterator<(K, V)> for ServiceConfig
where
    K: Into<String>,
    V: Into<ConfigValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        }
    }
}

impl TryFrom<serde_json::Value> for ServiceConfig {
    type Error = serde_json::Error;

    /// Accepts a JSON object as submitted by a settings form.
    fn try_from(value: serde_json::Value) -> Result<Self, Self::Error> {
        serde_json::from_value(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn service_key_round_trips_through_str() {
        for key in ServiceKey::ALL {
            assert_eq!(key.as_str().parse::<ServiceKey>(), Ok(key));
        }
        assert!("sonarr".parse::<ServiceKey>().is_err());
        assert!("Plex".parse::<ServiceKey>().is_err());
    }

    #[test]
    fn truthiness_follows_loose_form_semantics() {
        assert!(!ConfigValue::Null.is_truthy());
        assert!(!ConfigValue::Bool(false).is_truthy());
        assert!(!ConfigValue::Number(0.0).is_truthy());
        assert!(!ConfigValue::from("").is_truthy());
        assert!(!ConfigValue::Map(ServiceConfig::new()).is_truthy());
        assert!(!ConfigValue::List(Vec::new()).is_truthy());
        assert!(ConfigValue::List(vec![ConfigValue::Null]).is_truthy());

        assert!(ConfigValue::Bool(true).is_truthy());
        assert!(ConfigValue::Number(-1.0).is_truthy());
        assert!(ConfigValue::from(" ").is_truthy());
        // Strings are never parsed; "false" is a non-empty value.
        assert!(ConfigValue::from("false").is_truthy());
        assert!(
            ConfigValue::Map(ServiceConfig::new().with("enabled", false))
                .is_truthy()
        );
    }

    #[test]
    fn json_payload_keeps_value_shapes() {
        let payload = json!({
            "enabled": true,
            "url": "http://plex.local:32400",
            "port": 0,
            "token": null,
            "lg_tv": { "enabled": false, "ip": "10.0.0.2" }
        });

        let config = ServiceConfig::try_from(payload).unwrap();

        assert!(config.enabled());
        assert_eq!(
            config.get("url").and_then(ConfigValue::as_str),
            Some("http://plex.local:32400")
        );
        assert_eq!(config.get("port"), Some(&ConfigValue::Number(0.0)));
        assert!(config.get("token").is_some_and(ConfigValue::is_null));
        let device = config.nested("lg_tv").unwrap();
        assert!(!device.enabled());
        assert!(device.is_truthy("ip"));
    }

    #[test]
    fn list_fields_are_accepted_and_do_not_affect_other_fields() {
        let config = ServiceConfig::try_from(json!({
            "enabled": false,
            "url": "http://plex.local:32400",
            "token": "t",
            "movie_libraries": ["Movies", "4K"],
            "show_libraries": []
        }))
        .unwrap();

        assert_eq!(
            config.get("movie_libraries"),
            Some(&ConfigValue::List(vec![
                ConfigValue::from("Movies"),
                ConfigValue::from("4K"),
            ]))
        );
        assert!(config.is_truthy("movie_libraries"));
        assert!(!config.is_truthy("show_libraries"));
        assert!(config.is_truthy("url"));
    }

    #[test]
    fn non_object_payload_is_rejected() {
        assert!(ServiceConfig::try_from(json!(["enabled"])).is_err());
        assert!(ServiceConfig::try_from(json!("plex")).is_err());
    }

    #[test]
    fn missing_enabled_is_not_enabled() {
        let config = ServiceConfig::new().with("url", "http://x");
        assert!(!config.enabled());
        assert!(!config.contains_key("enabled"));
    }
}
