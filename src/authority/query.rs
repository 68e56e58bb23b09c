//! Remote query construction and response parsing.

use tracing::{debug, warn};
use url::form_urlencoded;

use crate::xml::XmlDocument;

use super::LookupError;
use super::http_client::{XmlFetcher, compose_url};

/// Builds the forward search query string.
///
/// The registry expects the literal grammar
/// `q=family-name:<family>+AND+given-names:<given>`; values are substituted
/// verbatim and absent names become empty strings.
#[must_use]
pub fn build_search_query(given_names: Option<&str>, family_name: Option<&str>) -> String {
    format!(
        "q=family-name:{}+AND+given-names:{}",
        family_name.unwrap_or_default(),
        given_names.unwrap_or_default()
    )
}

/// Builds the form-encoded reverse lookup query string (`id=<key>`).
#[must_use]
pub fn build_reverse_query(authority_key: &str) -> String {
    form_urlencoded::Serializer::new(String::new())
        .append_pair("id", authority_key)
        .finish()
}

/// Issues registry queries through an [`XmlFetcher`] and parses the bodies.
#[derive(Debug, Clone)]
pub struct RemoteQueryClient<F> {
    fetcher: F,
}

impl<F: XmlFetcher> RemoteQueryClient<F> {
    /// Wraps a transport.
    #[must_use]
    pub fn new(fetcher: F) -> Self {
        Self { fetcher }
    }

    /// The underlying transport.
    #[must_use]
    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Searches `base_url` for a person by name.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError`] on transport failure, an empty body, or a body
    /// that is not well-formed XML. No retry is attempted.
    pub fn query(
        &self,
        base_url: &str,
        given_names: Option<&str>,
        family_name: Option<&str>,
    ) -> Result<XmlDocument, LookupError> {
        let query = build_search_query(given_names, family_name);
        self.request(base_url, &query)
    }

    /// Looks up a single record by authority key.
    ///
    /// # Errors
    ///
    /// Same failure semantics as [`RemoteQueryClient::query`].
    pub fn reverse_query(
        &self,
        base_url: &str,
        authority_key: &str,
    ) -> Result<XmlDocument, LookupError> {
        let query = build_reverse_query(authority_key);
        self.request(base_url, &query)
    }

    fn request(&self, base_url: &str, query: &str) -> Result<XmlDocument, LookupError> {
        let body = self.fetcher.fetch(base_url, query)?;
        // Fetchers hand back blank bodies unchecked.
        if body.trim().is_empty() {
            return Err(LookupError::empty_response(&compose_url(base_url, query)));
        }

        debug!("About to create document from response");
        XmlDocument::parse(&body).map_err(|e| {
            let url = compose_url(base_url, query);
            warn!(url = %url, error = %e, "Lookup response is not well-formed XML");
            LookupError::malformed_response(&url, &e.to_string())
        })
    }
}
