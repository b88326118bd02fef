//! Read-only access to previously persisted service settings.
//!
//! Validation consults a store only to fill in fields a partial update left
//! out. Writing settings back is the embedding application's job.

pub mod snapshot;

use std::sync::Arc;

use crate::models::{ConfigValue, ServiceKey};

pub use snapshot::SettingsSnapshot;

/// Read-only lookup of a previously saved field.
pub trait SettingsStore: Send + Sync {
    /// Stored value for `field` of `service`, if one was ever saved.
    fn get(&self, service: ServiceKey, field: &str) -> Option<ConfigValue>;
}

/// A store with nothing saved yet, e.g. on first-run setup.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoStoredSettings;

impl SettingsStore for NoStoredSettings {
    fn get(&self, _service: ServiceKey, _field: &str) -> Option<ConfigValue> {
        None
    }
}

impl<S: SettingsStore + ?Sized> SettingsStore for &S {
    fn get(&self, service: ServiceKey, field: &str) -> Option<ConfigValue> {
        (**self).get(service, field)
    }
}

impl<S: SettingsStore + ?Sized> SettingsStore for Box<S> {
    fn get(&self, service: ServiceKey, field: &str) -> Option<ConfigValue> {
        (**self).get(service, field)
    }
}

impl<S: SettingsStore + ?Sized> SettingsStore for Arc<S> {
    fn get(&self, service: ServiceKey, field: &str) -> Option<ConfigValue> {
        (**self).get(service, field)
    }
}
