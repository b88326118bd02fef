//! # Marquee Core
//!
//! Outbound lookups that enrich the Marquee UI. Currently a single provider:
//!
//! - [`providers::trailer`]: best-effort trailer search for a movie title and
//!   year, returning an embeddable player URL or a displayable reason.
//!
//! Lookups here are soft: failures degrade to strings the UI can show inline
//! rather than errors that abort a request.
//!
//! ```no_run
//! use marquee_config::TrailerSettings;
//! use marquee_core::providers::TrailerResolver;
//!
//! async fn trailer_for_heat() -> Result<String, Box<dyn std::error::Error>> {
//!     let resolver = TrailerResolver::new(TrailerSettings::from_env()?)?;
//!     Ok(resolver.resolve("Heat", 1995).await)
//! }
//! ```

pub mod error;
pub mod providers;

pub use error::{ProviderError, Result};
pub use providers::{TrailerRef, TrailerResolver};
