//! Soft trailer lookup: search a public video site, embed the first hit.

use std::fmt::{self, Display};

use marquee_config::TrailerSettings;
use tracing::{debug, warn};

use crate::error::ProviderError;

/// Text preceding the video id in a search results page.
const WATCH_MARKER: &str = "watch?v=";

/// What [`TrailerResolver::resolve`] returns when the page has no hit.
pub const TRAILER_NOT_FOUND: &str = "Trailer not found";

/// A located trailer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrailerRef {
    /// Id scraped from the results page.
    pub video_id: String,
    /// Player URL built from the configured embed base.
    pub embed_url: String,
}

/// Best-effort trailer lookup against a public video search page.
///
/// One GET per call, no retries, no caching and no timeout of its own.
/// Wrap the future in `tokio::time::timeout` if the caller needs a bound.
pub struct TrailerResolver {
    http: reqwest::Client,
    settings: TrailerSettings,
}

impl fmt::Debug for TrailerResolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrailerResolver")
            .field("search_url", &self.settings.search_url.as_str())
            .finish()
    }
}

impl TrailerResolver {
    /// Resolver with its own client sending the configured `User-Agent`.
    pub fn new(settings: TrailerSettings) -> Result<Self, ProviderError> {
        let http = reqwest::Client::builder()
            .user_agent(settings.user_agent.clone())
            .build()?;

        Ok(Self { http, settings })
    }

    /// Share an existing client, e.g. the application's pooled one.
    pub fn with_client(http: reqwest::Client, settings: TrailerSettings) -> Self {
        Self { http, settings }
    }

    /// Settings the resolver was built with.
    pub fn settings(&self) -> &TrailerSettings {
        &self.settings
    }

    /// Embed URL for the first search hit, or a human-readable reason why
    /// there is none. Never fails; callers show the string or an
    /// "unavailable" hint.
    pub async fn resolve(&self, title: &str, year: impl Display) -> String {
        match self.lookup(title, year).await {
            Ok(Some(trailer)) => trailer.embed_url,
            Ok(None) => TRAILER_NOT_FOUND.to_string(),
            Err(err) => format!("Error fetching trailer: {err}"),
        }
    }

    /// Typed lookup: `Ok(None)` when the page has no hit, `Err` on transport
    /// failures and non-success statuses.
    pub async fn lookup(
        &self,
        title: &str,
        year: impl Display,
    ) -> Result<Option<TrailerRef>, ProviderError> {
        let mut url = self.settings.search_url.clone();
        let terms = search_query(title, year);
        let query = match url.query() {
            Some(existing) if !existing.is_empty() => {
                format!("{existing}&search_query={terms}")
            }
            _ => format!("search_query={terms}"),
        };
        url.set_query(Some(&query));

        debug!(url = %url, "searching for trailer");

        let response = self.http.get(url).send().await.inspect_err(|err| {
            warn!(title, "trailer search request failed: {err}");
        })?;

        let status = response.status();
        if !status.is_success() {
            warn!(title, status = status.as_u16(), "trailer search rejected");
            return Err(ProviderError::Status(status));
        }

        let body = response.text().await?;

        Ok(extract_video_id(&body).map(|video_id| TrailerRef {
            embed_url: self.settings.embed_url(video_id),
            video_id: video_id.to_string(),
        }))
    }
}

/// `<title words>+<year>+trailer`, each term percent-encoded so titles with
/// `&` or `#` stay inside the one parameter.
pub fn search_query(title: &str, year: impl Display) -> String {
    let year = year.to_string();

    title
        .split_whitespace()
        .chain(std::iter::once(year.as_str()))
        .chain(std::iter::once("trailer"))
        .filter(|term| !term.is_empty())
        .map(|term| urlencoding::encode(term).into_owned())
        .collect::<Vec<_>>()
        .join("+")
}

/// Scrape the first video id out of a results page: the text after the
/// first `watch?v=` up to the next `"`. Relies on page markup; a layout change
/// that drops the marker reads as "not found".
pub fn extract_video_id(body: &str) -> Option<&str> {
    let start = body.find(WATCH_MARKER)? + WATCH_MARKER.len();
    let rest = &body[start..];
    let id = rest.split('"').next().unwrap_or(rest);

    (!id.is_empty()).then_some(id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_joins_title_year_and_trailer() {
        assert_eq!(
            search_query("The Matrix", 1999),
            "The+Matrix+1999+trailer"
        );
        assert_eq!(search_query("Heat", "1995"), "Heat+1995+trailer");
    }

    #[test]
    fn query_encodes_reserved_characters() {
        assert_eq!(
            search_query("Fast & Furious", 2009),
            "Fast+%26+Furious+2009+trailer"
        );
        assert_eq!(search_query("  Up  ", 2009), "Up+2009+trailer");
    }

    #[test]
    fn extracts_first_id_up_to_quote() {
        let body = r#"<a href="/watch?v=ABC123">one</a><a href="/watch?v=ZZZ">"#;
        assert_eq!(extract_video_id(body), Some("ABC123"));
    }

    #[test]
    fn id_runs_to_end_without_closing_quote() {
        assert_eq!(extract_video_id("...watch?v=XYZ"), Some("XYZ"));
    }

    #[test]
    fn missing_marker_or_empty_id_is_none() {
        assert_eq!(extract_video_id("<html>no results</html>"), None);
        assert_eq!(extract_video_id(r#"href="/watch?v=""#), None);
        assert_eq!(extract_video_id(""), None);
    }
}
