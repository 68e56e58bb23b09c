//! Transport capability for registry requests.
//!
//! The lookup pipeline only needs "GET this URL with this query string and
//! give me the body". [`XmlFetcher`] is that seam; [`HttpXmlFetcher`] is the
//! reqwest-backed default with bounded connect and request timeouts.

use std::time::Duration;

use reqwest::blocking::Client;
use tracing::{debug, info};
use url::Url;

use crate::user_agent;

use super::LookupConfig;
use super::LookupError;

/// Performs one GET request and returns the response body.
///
/// Implementations make a single attempt per call and never retry. A blank
/// body may be returned as-is: callers reject it as
/// [`LookupError::EmptyResponse`].
pub trait XmlFetcher: Send + Sync {
    /// Fetches `base_url` with `query` as its query string.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::Transport`] when the request cannot be sent or
    /// the body cannot be read.
    fn fetch(&self, base_url: &str, query: &str) -> Result<String, LookupError>;
}

/// Joins a base URL and a pre-built query string for log and error text.
///
/// Not used to address requests; see [`request_url`].
#[must_use]
pub fn compose_url(base_url: &str, query: &str) -> String {
    if query.is_empty() {
        return base_url.to_string();
    }
    let separator = if base_url.contains('?') { '&' } else { '?' };
    format!("{base_url}{separator}{query}")
}

/// Builds the request URL with `query` set as its query component.
///
/// The query grammar is kept intact; characters that cannot appear raw in a
/// query (space, `#`, quotes, angle brackets) are percent-encoded so none of
/// the query is lost to a fragment. An existing query on `base_url` is kept
/// and `query` is appended after `&`.
///
/// # Errors
///
/// Returns [`LookupError::Transport`] when `base_url` is not a valid URL.
pub fn request_url(base_url: &str, query: &str) -> Result<Url, LookupError> {
    let mut url = Url::parse(base_url)
        .map_err(|e| LookupError::transport(base_url, &format!("invalid lookup URL: {e}")))?;
    let combined = match url.query() {
        Some(existing) if !existing.is_empty() && !query.is_empty() => {
            format!("{existing}&{query}")
        }
        Some(existing) if query.is_empty() => existing.to_string(),
        _ => query.to_string(),
    };
    if combined.is_empty() {
        url.set_query(None);
    } else {
        url.set_query(Some(&combined));
    }
    Ok(url)
}

/// Blocking reqwest transport.
#[derive(Debug, Clone)]
pub struct HttpXmlFetcher {
    client: Client,
}

impl HttpXmlFetcher {
    /// Builds a fetcher using the timeouts from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::ClientBuild`] when client construction fails.
    pub fn new(config: &LookupConfig) -> Result<Self, LookupError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
            .timeout(Duration::from_secs(config.read_timeout_secs))
            .user_agent(user_agent::default_lookup_user_agent())
            .gzip(true)
            .build()
            .map_err(|e| LookupError::client_build(&e.to_string()))?;

        Ok(Self { client })
    }
}

impl XmlFetcher for HttpXmlFetcher {
    #[tracing::instrument(skip(self, query))]
    fn fetch(&self, base_url: &str, query: &str) -> Result<String, LookupError> {
        let url = compose_url(base_url, query);
        info!(url = %url, "About to look up");

        let target = request_url(base_url, query)?;
        let response = self
            .client
            .get(target)
            .header(reqwest::header::ACCEPT, "application/xml, text/xml;q=0.9, */*;q=0.1")
            .send()
            .map_err(|e| transport_error(&url, &e))?;

        debug!(status = response.status().as_u16(), "Lookup service responded");

        // Dropping the response on any path below releases the connection.
        let body = response.text().map_err(|e| transport_error(&url, &e))?;
        debug!(bytes = body.len(), "Read lookup response body");
        Ok(body)
    }
}

fn transport_error(url: &str, error: &reqwest::Error) -> LookupError {
    if error.is_timeout() {
        LookupError::timeout(url, &format!("request timed out: {error}"))
    } else if error.is_connect() {
        LookupError::transport(url, &format!("connection failed: {error}"))
    } else {
        LookupError::transport(url, &error.to_string())
    }
}
