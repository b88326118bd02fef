//! Rejections produced by the settings validation gate.

use thiserror::Error;

use crate::models::{ClientDevice, ServiceKey};

/// Why a settings update must not be saved.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// The service is being enabled without the settings it needs.
    #[error("{message}")]
    MissingFields {
        /// Service whose payload was rejected.
        service: ServiceKey,
        /// Set when the failing block is a device under `clients`.
        device: Option<ClientDevice>,
        /// Falsy required fields, in declared order.
        fields: Vec<&'static str>,
        /// User-facing rejection text.
        message: String,
    },

    /// No rule is registered under the requested key.
    #[error("unknown service: {0}")]
    UnknownService(String),
}

impl ValidationError {
    /// Rejected service, when the key was known.
    pub fn service(&self) -> Option<ServiceKey> {
        match self {
            ValidationError::MissingFields { service, .. } => Some(*service),
            ValidationError::UnknownService(_) => None,
        }
    }

    /// Missing field names, empty for unknown services.
    pub fn missing_fields(&self) -> &[&'static str] {
        match self {
            ValidationError::MissingFields { fields, .. } => fields,
            ValidationError::UnknownService(_) => &[],
        }
    }
}
