//! Validation gate run on integration settings before they are saved.

pub mod error;
pub mod rules;

use std::collections::HashMap;

use once_cell::sync::Lazy;
use tracing::warn;

use crate::models::{ServiceConfig, ServiceKey};
use crate::store::SettingsStore;

pub use error::ValidationError;
pub use rules::{DeviceRule, MessageStyle, RequiredFields, ServiceRule, StoredFallback};

static GLOBAL_REGISTRY: Lazy<ValidatorRegistry> =
    Lazy::new(ValidatorRegistry::new);

/// Service key to rule table. Immutable once built, so one instance can be
/// shared by every request handler.
#[derive(Debug, Clone)]
pub struct ValidatorRegistry {
    rules: HashMap<ServiceKey, ServiceRule>,
}

impl Default for ValidatorRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ValidatorRegistry {
    /// Registry holding the built-in rule for every [`ServiceKey`].
    pub fn new() -> Self {
        let rules = ServiceKey::ALL
            .into_iter()
            .map(|service| (service, rules::default_rule(service)))
            .collect();

        Self { rules }
    }

    /// Process-wide registry, built on first use.
    pub fn global() -> &'static ValidatorRegistry {
        &GLOBAL_REGISTRY
    }

    /// Whether `key` names a registered service.
    pub fn has_service(&self, key: &str) -> bool {
        key.parse::<ServiceKey>()
            .is_ok_and(|service| self.rules.contains_key(&service))
    }

    /// Rule registered for `service`.
    pub fn rule(&self, service: ServiceKey) -> Option<&ServiceRule> {
        self.rules.get(&service)
    }

    /// Registered services in key order.
    pub fn services(&self) -> impl Iterator<Item = ServiceKey> + '_ {
        ServiceKey::ALL
            .into_iter()
            .filter(|service| self.rules.contains_key(service))
    }

    /// Validate a submitted payload for the service named by `service_key`.
    ///
    /// `Ok(())` means the payload may be persisted. Payloads that do not switch
    /// the service on always pass. `store` is only read, and only by rules that
    /// recover omitted fields from previously saved settings.
    pub fn validate(
        &self,
        service_key: &str,
        data: &ServiceConfig,
        store: &dyn SettingsStore,
    ) -> Result<(), ValidationError> {
        let service = service_key.parse::<ServiceKey>().map_err(|_| {
            warn!(service = service_key, "validation requested for unknown service");
            ValidationError::UnknownService(service_key.to_string())
        })?;

        self.validate_service(service, data, store)
    }

    /// [`ValidatorRegistry::validate`] for an already parsed key.
    pub fn validate_service(
        &self,
        service: ServiceKey,
        data: &ServiceConfig,
        store: &dyn SettingsStore,
    ) -> Result<(), ValidationError> {
        let rule = self
            .rules
            .get(&service)
            .ok_or_else(|| ValidationError::UnknownService(service.to_string()))?;

        rule.check(service, data, store).inspect_err(|err| {
            warn!(
                service = %service,
                fields = ?err.missing_fields(),
                "rejected settings update: {err}"
            );
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::NoStoredSettings;

    #[test]
    fn registry_knows_exactly_the_five_services() {
        let registry = ValidatorRegistry::new();

        for key in ["plex", "jellyfin", "overseerr", "trakt", "clients"] {
            assert!(registry.has_service(key), "{key} should be registered");
        }
        assert!(!registry.has_service("sonarr"));
        assert!(!registry.has_service(""));
        assert_eq!(registry.services().collect::<Vec<_>>(), ServiceKey::ALL);
    }

    #[test]
    fn unknown_service_is_rejected() {
        let err = ValidatorRegistry::global()
            .validate(
                "radarr",
                &ServiceConfig::new().with("enabled", true),
                &NoStoredSettings,
            )
            .unwrap_err();

        assert_eq!(err, ValidationError::UnknownService("radarr".into()));
        assert_eq!(err.to_string(), "unknown service: radarr");
        assert!(err.missing_fields().is_empty());
    }

    #[test]
    fn global_registry_is_shared() {
        assert!(std::ptr::eq(
            ValidatorRegistry::global(),
            ValidatorRegistry::global()
        ));
    }
}
