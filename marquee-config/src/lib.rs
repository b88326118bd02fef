//! Settings validation for Marquee's media integrations.
//!
//! This crate holds the rules that gate a settings save: which fields each
//! integration (Plex, Jellyfin, Overseerr, Trakt and the client devices)
//! needs once it is switched on, the read-only view of previously stored
//! settings those rules may consult, and the environment-driven settings for
//! trailer lookups. Request handlers look a service up in the
//! [`ValidatorRegistry`] and persist only when it accepts the payload.

pub mod loader;
pub mod models;
pub mod store;
pub mod util;
pub mod validation;

pub use loader::{SettingsFormat, error::SettingsLoadError};
pub use models::sources::EnvConfig;
pub use models::trailer::TrailerSettings;
pub use models::{ClientDevice, ConfigValue, ServiceConfig, ServiceKey};
pub use store::{NoStoredSettings, SettingsSnapshot, SettingsStore};
pub use validation::{ServiceRule, ValidationError, ValidatorRegistry};
