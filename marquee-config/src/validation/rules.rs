//! Declarative required-field rules for each integration.
//!
//! Every rule has the same shape: when the block's `enabled` flag is truthy,
//! a fixed, ordered list of fields must be truthy too. A payload that does not
//! switch the service on (flag false, absent, or omitted from a partial update)
//! is accepted without looking at anything else.

use tracing::debug;

use crate::models::{ClientDevice, ServiceConfig, ServiceKey};
use crate::store::SettingsStore;

use super::error::ValidationError;

/// How a rejection is worded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageStyle {
    /// `Missing required <Service> fields: a, b`, listing only the missing ones.
    Itemized,
    /// One fixed sentence regardless of which fields are missing.
    Combined(&'static str),
}

/// Where an omitted field may be recovered from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoredFallback {
    /// Only the submitted payload counts.
    Disabled,
    /// Fields missing from the payload are looked up in the settings store,
    /// so toggling `enabled` alone does not require resubmitting credentials.
    PerField,
}

/// Fields one enabled block must carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequiredFields {
    /// Required field names, in the order they are reported.
    pub fields: &'static [&'static str],
    /// Wording of the rejection.
    pub message: MessageStyle,
    /// Whether stored settings may fill omitted fields.
    pub fallback: StoredFallback,
}

/// Requirements for one device block under `clients`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceRule {
    /// Device the block belongs to.
    pub device: ClientDevice,
    /// Name used in itemized messages.
    pub label: &'static str,
    /// Fields the enabled device needs.
    pub requirements: RequiredFields,
}

/// Rule registered for one service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServiceRule {
    /// The service's own top-level `enabled` flag gates the check.
    Service(RequiredFields),
    /// Composite block; each nested device is gated by its own flag and
    /// checked in order, stopping at the first failure.
    Devices(&'static [DeviceRule]),
}

/// Plex: `url` and `token`, itemized.
pub const PLEX: ServiceRule = ServiceRule::Service(RequiredFields {
    fields: &["url", "token"],
    message: MessageStyle::Itemized,
    fallback: StoredFallback::Disabled,
});

/// Jellyfin: `url`, `api_key` and `user_id`, itemized, recoverable from
/// stored settings.
pub const JELLYFIN: ServiceRule = ServiceRule::Service(RequiredFields {
    fields: &["url", "api_key", "user_id"],
    message: MessageStyle::Itemized,
    fallback: StoredFallback::PerField,
});

/// Overseerr: `url` and `api_key` as a pair.
pub const OVERSEERR: ServiceRule = ServiceRule::Service(RequiredFields {
    fields: &["url", "api_key"],
    message: MessageStyle::Combined(
        "Overseerr URL and API key are required when enabled",
    ),
    fallback: StoredFallback::Disabled,
});

/// Trakt: all four OAuth credentials or nothing.
pub const TRAKT: ServiceRule = ServiceRule::Service(RequiredFields {
    fields: &["client_id", "client_secret", "access_token", "refresh_token"],
    message: MessageStyle::Combined(
        "Trakt client ID, client secret, access token and refresh token are all required when enabled",
    ),
    fallback: StoredFallback::Disabled,
});

/// Client devices: LG TV needs `ip` and `mac`, Apple TV needs `id`.
pub const CLIENTS: ServiceRule = ServiceRule::Devices(&[
    DeviceRule {
        device: ClientDevice::LgTv,
        label: "LG TV",
        requirements: RequiredFields {
            fields: &["ip", "mac"],
            message: MessageStyle::Combined(
                "LG TV IP address and MAC address are required when enabled",
            ),
            fallback: StoredFallback::Disabled,
        },
    },
    DeviceRule {
        device: ClientDevice::AppleTv,
        label: "Apple TV",
        requirements: RequiredFields {
            fields: &["id"],
            message: MessageStyle::Combined(
                "Apple TV device ID is required when enabled",
            ),
            fallback: StoredFallback::Disabled,
        },
    },
]);

/// The rule each known service is registered with.
pub fn default_rule(service: ServiceKey) -> ServiceRule {
    match service {
        ServiceKey::Plex => PLEX,
        ServiceKey::Jellyfin => JELLYFIN,
        ServiceKey::Overseerr => OVERSEERR,
        ServiceKey::Trakt => TRAKT,
        ServiceKey::Clients => CLIENTS,
    }
}

impl RequiredFields {
    /// Falsy required fields, in declared order.
    pub fn missing(
        &self,
        service: ServiceKey,
        data: &ServiceConfig,
        store: &dyn SettingsStore,
    ) -> Vec<&'static str> {
        self.fields
            .iter()
            .copied()
            .filter(|field| !self.is_satisfied(service, data, field, store))
            .collect()
    }

    fn is_satisfied(
        &self,
        service: ServiceKey,
        data: &ServiceConfig,
        field: &str,
        store: &dyn SettingsStore,
    ) -> bool {
        match data.get(field) {
            Some(value) if !value.is_null() => value.is_truthy(),
            _ => match self.fallback {
                StoredFallback::Disabled => false,
                StoredFallback::PerField => {
                    let stored = store
                        .get(service, field)
                        .is_some_and(|value| value.is_truthy());
                    debug!(
                        service = %service,
                        field,
                        stored,
                        "field omitted from update, consulted stored settings"
                    );
                    stored
                }
            },
        }
    }

    fn message(&self, subject: &str, missing: &[&'static str]) -> String {
        match self.message {
            MessageStyle::Itemized => format!(
                "Missing required {subject} fields: {}",
                missing.join(", ")
            ),
            MessageStyle::Combined(message) => message.to_string(),
        }
    }
}

impl ServiceRule {
    /// Run the rule against a (possibly partial) payload.
    pub fn check(
        &self,
        service: ServiceKey,
        data: &ServiceConfig,
        store: &dyn SettingsStore,
    ) -> Result<(), ValidationError> {
        match self {
            ServiceRule::Service(requirements) => {
                if !data.enabled() {
                    debug!(service = %service, "service not being enabled, skipping required fields");
                    return Ok(());
                }

                let missing = requirements.missing(service, data, store);
                if missing.is_empty() {
                    return Ok(());
                }

                Err(ValidationError::MissingFields {
                    service,
                    device: None,
                    message: requirements
                        .message(service.display_name(), &missing),
                    fields: missing,
                })
            }
            ServiceRule::Devices(devices) => {
                for rule in devices.iter() {
                    let Some(block) = data.nested(rule.device.as_str()) else {
                        continue;
                    };
                    if !block.enabled() {
                        continue;
                    }

                    let missing =
                        rule.requirements.missing(service, block, store);
                    if !missing.is_empty() {
                        return Err(ValidationError::MissingFields {
                            service,
                            device: Some(rule.device),
                            message: rule
                                .requirements
                                .message(rule.label, &missing),
                            fields: missing,
                        });
                    }
                }

                Ok(())
            }
        }
    }

    /// Every field name this rule may require, devices flattened in order.
    pub fn required_fields(&self) -> Vec<&'static str> {
        match self {
            ServiceRule::Service(requirements) => requirements.fields.to_vec(),
            ServiceRule::Devices(devices) => devices
                .iter()
                .flat_map(|rule| rule.requirements.fields.iter().copied())
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{NoStoredSettings, SettingsSnapshot};

    #[test]
    fn itemized_message_lists_missing_fields_in_declared_order() {
        let data = ServiceConfig::new()
            .with("enabled", true)
            .with("user_id", "")
            .with("url", "");

        let err = JELLYFIN
            .check(ServiceKey::Jellyfin, &data, &NoStoredSettings)
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "Missing required Jellyfin fields: url, api_key, user_id"
        );
        assert_eq!(err.missing_fields(), ["url", "api_key", "user_id"]);
    }

    #[test]
    fn explicit_empty_value_is_not_replaced_by_stored_one() {
        let store = SettingsSnapshot::new()
            .with(ServiceKey::Jellyfin, "url", "http://jf.local")
            .with(ServiceKey::Jellyfin, "api_key", "key")
            .with(ServiceKey::Jellyfin, "user_id", "user");
        let data = ServiceConfig::new()
            .with("enabled", true)
            .with("api_key", "");

        let err = JELLYFIN
            .check(ServiceKey::Jellyfin, &data, &store)
            .unwrap_err();

        assert_eq!(err.missing_fields(), ["api_key"]);
    }

    #[test]
    fn null_value_falls_back_like_an_omitted_one() {
        let store = SettingsSnapshot::new()
            .with(ServiceKey::Jellyfin, "user_id", "user");
        let data = ServiceConfig::new()
            .with("enabled", true)
            .with("url", "http://jf.local")
            .with("api_key", "key")
            .with("user_id", Option::<String>::None);

        assert!(JELLYFIN.check(ServiceKey::Jellyfin, &data, &store).is_ok());
    }

    #[test]
    fn services_without_fallback_ignore_the_store() {
        let store = SettingsSnapshot::new()
            .with(ServiceKey::Plex, "url", "http://plex.local")
            .with(ServiceKey::Plex, "token", "tok");
        let data = ServiceConfig::new().with("enabled", true);

        let err = PLEX.check(ServiceKey::Plex, &data, &store).unwrap_err();

        assert_eq!(err.to_string(), "Missing required Plex fields: url, token");
    }

    #[test]
    fn device_that_is_not_a_block_counts_as_disabled() {
        let data = ServiceConfig::new()
            .with("lg_tv", "on")
            .with("apple_tv", true);

        assert!(
            CLIENTS
                .check(ServiceKey::Clients, &data, &NoStoredSettings)
                .is_ok()
        );
    }

    #[test]
    fn default_rules_cover_every_service() {
        for service in ServiceKey::ALL {
            assert!(!default_rule(service).required_fields().is_empty());
        }
        assert_eq!(CLIENTS.required_fields(), ["ip", "mac", "id"]);
    }
}
