//! Shared HTTP client for every scraper.
//!
//! Built once at startup and cheaply cloned (`reqwest::Client` is an `Arc`
//! internally). Only raw bodies leave this module; parsing happens in the
//! cogs so that parsed documents never live across an `.await`. The fetcher
//! also carries the site roots requests are sent to.

use std::time::Duration;

use reqwest::{Client, Response, StatusCode, header::HeaderMap};
use tracing::{debug, error};

use crate::config::{HttpConfig, SitesConfig};
use crate::error::RabotError;

#[derive(Debug, Clone)]
pub struct Fetcher {
    client: Client,
    sites: SitesConfig,
}

impl Fetcher {
    pub fn new(config: &HttpConfig, sites: &SitesConfig) -> Result<Self, RabotError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(config.user_agent.clone())
            .build()
            .map_err(|e| RabotError::Http(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { client, sites: sites.clone() })
    }

    pub fn sites(&self) -> &SitesConfig {
        &self.sites
    }

    /// GET `url` and return the body as text.
    pub async fn get_text(&self, url: &str) -> Result<String, RabotError> {
        self.get_text_with_headers(url, HeaderMap::new()).await
    }

    /// GET `url` with extra request headers and return the body as text.
    pub async fn get_text_with_headers(
        &self,
        url: &str,
        headers: HeaderMap,
    ) -> Result<String, RabotError> {
        let response = self.send(url, headers).await?;
        response
            .text()
            .await
            .map_err(|e| RabotError::Http(format!("failed to read body of {url}: {e}")))
    }

    /// GET `url` with extra request headers and return the raw body.
    pub async fn get_bytes_with_headers(
        &self,
        url: &str,
        headers: HeaderMap,
    ) -> Result<Vec<u8>, RabotError> {
        let response = self.send(url, headers).await?;
        let bytes = response
            .bytes()
            .await
            .map_err(|e| RabotError::Http(format!("failed to read body of {url}: {e}")))?;
        Ok(bytes.to_vec())
    }

    async fn send(&self, url: &str, headers: HeaderMap) -> Result<Response, RabotError> {
        debug!(%url, "GET");
        let response = self.client.get(url).headers(headers).send().await.map_err(|e| {
            error!(%url, error = %e, "HTTP request failed (transport)");
            RabotError::Http(e.to_string())
        })?;
        check_status(url, response)
    }
}

/// Return the response if successful; 404 maps to [`RabotError::NotFound`].
fn check_status(url: &str, response: Response) -> Result<Response, RabotError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    debug!(%url, %status, "HTTP request returned error status");
    Err(status_error(url, status))
}

pub(crate) fn status_error(url: &str, status: StatusCode) -> RabotError {
    if status == StatusCode::NOT_FOUND {
        RabotError::NotFound(url.to_string())
    } else {
        RabotError::Http(format!("HTTP {status} for {url}"))
    }
}

/// Returns `true` when `err` came from a `403 Forbidden` response.
pub(crate) fn is_forbidden(err: &RabotError) -> bool {
    matches!(err, RabotError::Http(msg) if msg.starts_with("HTTP 403"))
}

/// Join `segment` onto `base` as a single percent-encoded path segment.
///
/// `base` must be an absolute URL; a malformed base is a parse error.
pub fn url_with_segment(base: &str, segment: &str) -> Result<String, RabotError> {
    let mut url = reqwest::Url::parse(base)
        .map_err(|e| RabotError::Parse(format!("invalid base url {base}: {e}")))?;
    url.path_segments_mut()
        .map_err(|_| RabotError::Parse(format!("url {base} cannot be a base")))?
        .pop_if_empty()
        .push(segment);
    Ok(url.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[test]
    fn builds_from_default_config() {
        let config = Config::default();
        let fetcher = Fetcher::new(&config.http, &config.sites).unwrap();
        assert_eq!(fetcher.sites().wordref_url, "https://www.wordreference.com");
    }

    #[test]
    fn not_found_status_maps_to_not_found() {
        let e = status_error("https://example.org/x", StatusCode::NOT_FOUND);
        assert!(e.is_not_found());
    }

    #[test]
    fn forbidden_is_detected() {
        let e = status_error("https://example.org/x", StatusCode::FORBIDDEN);
        assert!(is_forbidden(&e));
        let e = status_error("https://example.org/x", StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!is_forbidden(&e));
    }

    #[test]
    fn segment_is_percent_encoded() {
        let url = url_with_segment("https://forvo.com/word/", "καλημέρα").unwrap();
        assert!(url.starts_with("https://forvo.com/word/%CE%BA"));
        assert!(!url.contains("//%"));

        let url = url_with_segment("https://el.wiktionary.org/wiki", "a b").unwrap();
        assert_eq!(url, "https://el.wiktionary.org/wiki/a%20b");

        let url = url_with_segment("https://forvo.com/word/", "a+b").unwrap();
        assert_eq!(url, "https://forvo.com/word/a+b");
    }

    #[test]
    fn bad_base_is_parse_error() {
        assert!(matches!(url_with_segment("not a url", "x"), Err(RabotError::Parse(_))));
    }
}
