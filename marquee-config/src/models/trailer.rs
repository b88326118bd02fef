//! Trailer lookup configuration.

use url::Url;

use crate::loader::error::SettingsLoadError;

use super::sources::{
    EnvConfig, TRAILER_EMBED_BASE_URL_VAR, TRAILER_SEARCH_URL_VAR,
};

/// Public search results page.
pub const DEFAULT_TRAILER_SEARCH_URL: &str = "https://www.youtube.com/results";
/// Public embeddable player.
pub const DEFAULT_TRAILER_EMBED_BASE_URL: &str = "https://www.youtube.com/embed/";

/// Where trailer lookups search and how the resulting player URL is built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrailerSettings {
    /// Search results page; the query goes into `search_query`.
    pub search_url: Url,
    /// Base the video id is appended to.
    pub embed_base_url: Url,
    /// `User-Agent` sent with search requests.
    pub user_agent: String,
}

impl Default for TrailerSettings {
    fn default() -> Self {
        Self {
            search_url: Url::parse(DEFAULT_TRAILER_SEARCH_URL)
                .expect("default trailer search URL is valid"),
            embed_base_url: Url::parse(DEFAULT_TRAILER_EMBED_BASE_URL)
                .expect("default trailer embed URL is valid"),
            user_agent: default_user_agent(),
        }
    }
}

impl TrailerSettings {
    /// Defaults overlaid with `MARQUEE_TRAILER_*` environment variables.
    pub fn from_env() -> Result<Self, SettingsLoadError> {
        Self::default().with_env(&EnvConfig::gather())
    }

    /// Apply non-blank overrides from `env`.
    pub fn with_env(mut self, env: &EnvConfig) -> Result<Self, SettingsLoadError> {
        if let Some(raw) = env.trailer_search_url.as_deref() {
            self.search_url = parse_url(TRAILER_SEARCH_URL_VAR, raw)?;
        }
        if let Some(raw) = env.trailer_embed_base_url.as_deref() {
            self.embed_base_url =
                parse_url(TRAILER_EMBED_BASE_URL_VAR, &with_trailing_slash(raw))?;
        }
        if let Some(agent) = env.trailer_user_agent.clone() {
            self.user_agent = agent;
        }
        Ok(self)
    }

    /// Point lookups at a different search page.
    pub fn with_search_url(mut self, url: Url) -> Self {
        self.search_url = url;
        self
    }

    /// Player URL for a video id. The id is appended as the last path segment.
    pub fn embed_url(&self, video_id: &str) -> String {
        format!("{}{}", self.embed_base_url, video_id)
    }
}

fn default_user_agent() -> String {
    format!("marquee/{}", env!("CARGO_PKG_VERSION"))
}

fn parse_url(key: &'static str, raw: &str) -> Result<Url, SettingsLoadError> {
    Url::parse(raw).map_err(|source| SettingsLoadError::InvalidUrl {
        key,
        value: raw.to_string(),
        source,
    })
}

/// `Url` keeps a bare base without the slash, which would glue the id onto
/// the last segment.
fn with_trailing_slash(raw: &str) -> String {
    if raw.ends_with('/') {
        raw.to_string()
    } else {
        format!("{raw}/")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_public_search_and_embed() {
        let settings = TrailerSettings::default();

        assert_eq!(settings.search_url.as_str(), DEFAULT_TRAILER_SEARCH_URL);
        assert_eq!(
            settings.embed_url("dQw4w9WgXcQ"),
            "https://www.youtube.com/embed/dQw4w9WgXcQ"
        );
        assert!(settings.user_agent.starts_with("marquee/"));
    }

    #[test]
    fn env_overrides_apply_on_top_of_defaults() {
        let env = EnvConfig {
            trailer_search_url: Some("http://127.0.0.1:9000/results".into()),
            trailer_embed_base_url: Some("https://player.example/embed".into()),
            trailer_user_agent: Some("test-agent".into()),
            settings_path: None,
        };

        let settings = TrailerSettings::default().with_env(&env).unwrap();

        assert_eq!(settings.search_url.as_str(), "http://127.0.0.1:9000/results");
        assert_eq!(
            settings.embed_url("abc"),
            "https://player.example/embed/abc"
        );
        assert_eq!(settings.user_agent, "test-agent");
    }

    #[test]
    fn invalid_override_names_the_variable() {
        let env = EnvConfig {
            trailer_search_url: Some("not a url".into()),
            ..EnvConfig::default()
        };

        let err = TrailerSettings::default().with_env(&env).unwrap_err();

        assert!(err.to_string().contains(TRAILER_SEARCH_URL_VAR));
        assert!(err.to_string().contains("not a url"));
    }
}
