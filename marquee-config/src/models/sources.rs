//! Environment-sourced configuration.

use std::path::PathBuf;

use crate::util::non_blank_var;

/// Overrides the trailer search results page.
pub const TRAILER_SEARCH_URL_VAR: &str = "MARQUEE_TRAILER_SEARCH_URL";
/// Overrides the embed base URL.
pub const TRAILER_EMBED_BASE_URL_VAR: &str = "MARQUEE_TRAILER_EMBED_BASE_URL";
/// Overrides the trailer request user agent.
pub const TRAILER_USER_AGENT_VAR: &str = "MARQUEE_TRAILER_USER_AGENT";
/// Path of the stored settings snapshot.
pub const SETTINGS_PATH_VAR: &str = "MARQUEE_SETTINGS_PATH";

/// Environment-derived configuration values. Blank variables count as unset.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EnvConfig {
    /// `MARQUEE_TRAILER_SEARCH_URL`.
    pub trailer_search_url: Option<String>,
    /// `MARQUEE_TRAILER_EMBED_BASE_URL`.
    pub trailer_embed_base_url: Option<String>,
    /// `MARQUEE_TRAILER_USER_AGENT`.
    pub trailer_user_agent: Option<String>,
    /// `MARQUEE_SETTINGS_PATH`.
    pub settings_path: Option<PathBuf>,
}

impl EnvConfig {
    /// Read the current process environment.
    pub fn gather() -> Self {
        Self {
            trailer_search_url: non_blank_var(TRAILER_SEARCH_URL_VAR),
            trailer_embed_base_url: non_blank_var(TRAILER_EMBED_BASE_URL_VAR),
            trailer_user_agent: non_blank_var(TRAILER_USER_AGENT_VAR),
            settings_path: non_blank_var(SETTINGS_PATH_VAR).map(PathBuf::from),
        }
    }
}
