//! Name lookup orchestration over the remote registry.

use tracing::{debug, error, info, warn};

use crate::name::PersonName;

use super::classify::{classify_best, classify_window};
use super::extract::{extract_candidates, extract_label};
use super::http_client::{HttpXmlFetcher, XmlFetcher};
use super::paginate::paginate;
use super::query::RemoteQueryClient;
use super::{Candidate, ChoiceAuthority, LookupConfig, LookupError, ResultSet};

/// Authority source backed by the registry's public search API.
///
/// Each call is independent: there is no cache and no shared mutable state,
/// so one service may be used from several threads at once.
#[derive(Debug, Clone)]
pub struct AuthorityLookupService<F = HttpXmlFetcher> {
    client: RemoteQueryClient<F>,
    config: LookupConfig,
}

impl AuthorityLookupService<HttpXmlFetcher> {
    /// Creates a service using the reqwest transport.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError::ClientBuild`] if the HTTP client cannot be built.
    pub fn new(config: LookupConfig) -> Result<Self, LookupError> {
        let fetcher = HttpXmlFetcher::new(&config)?;
        Ok(Self::with_fetcher(config, fetcher))
    }
}

impl<F: XmlFetcher> AuthorityLookupService<F> {
    /// Creates a service over a caller-supplied transport.
    #[must_use]
    pub fn with_fetcher(config: LookupConfig, fetcher: F) -> Self {
        Self {
            client: RemoteQueryClient::new(fetcher),
            config,
        }
    }

    /// Queries the search endpoint and returns every candidate, unpaginated.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError`] on transport or parse failure.
    pub fn do_query(
        &self,
        given_names: Option<&str>,
        family_name: Option<&str>,
    ) -> Result<Vec<Candidate>, LookupError> {
        let document = self
            .client
            .query(&self.config.search_url, given_names, family_name)?;
        extract_candidates(Some(&document))
    }

    /// Queries `reverse_url` for the display name of `authority_key`.
    ///
    /// # Errors
    ///
    /// Returns [`LookupError`] on transport or parse failure.
    pub fn do_reverse_query(
        &self,
        reverse_url: &str,
        authority_key: &str,
    ) -> Result<Option<String>, LookupError> {
        let document = self.client.reverse_query(reverse_url, authority_key)?;
        extract_label(Some(&document))
    }

    fn find_candidates(&self, text: &str) -> Result<Vec<Candidate>, LookupError> {
        let name = PersonName::parse(text);
        if name.is_empty() {
            return Err(LookupError::unparseable_input(text));
        }
        self.do_query(name.given_names(), name.family_name())
    }
}

impl<F: XmlFetcher> ChoiceAuthority for AuthorityLookupService<F> {
    #[tracing::instrument(skip(self, _context_id, _locale))]
    fn lookup_matches(
        &self,
        field: &str,
        text: &str,
        _context_id: i32,
        start: usize,
        limit: usize,
        _locale: Option<&str>,
    ) -> ResultSet {
        let all = match self.find_candidates(text) {
            Ok(candidates) => candidates,
            Err(e @ LookupError::UnparseableInput { .. }) => {
                debug!(error = %e, "Skipping remote lookup");
                return ResultSet::error();
            }
            Err(e) => {
                error!(field, text, error = %e, "Cannot look up matches");
                return ResultSet::error();
            }
        };

        let total = all.len();
        let window = if start > 0 || limit > 0 {
            paginate(&all, start, limit)
        } else {
            all
        };

        let class = classify_window(start, window.len(), total);
        info!(
            total,
            returned = window.len(),
            confidence = %class.confidence,
            "Lookup complete"
        );

        if window.is_empty() {
            return ResultSet::not_found();
        }
        ResultSet::new(
            window,
            start,
            total,
            class.confidence,
            class.has_more,
            class.default_selected,
        )
    }

    #[tracing::instrument(skip(self, context_id, locale))]
    fn lookup_best_match(
        &self,
        field: &str,
        text: &str,
        context_id: i32,
        locale: Option<&str>,
    ) -> ResultSet {
        let all = self.lookup_matches(field, text, context_id, 0, 0, locale);
        if all.is_error() {
            return ResultSet::error();
        }

        let total = all.total_available();
        let class = classify_best(total);
        let best: Vec<Candidate> = all.candidates().iter().take(1).cloned().collect();
        ResultSet::new(
            best,
            0,
            total,
            class.confidence,
            class.has_more,
            class.default_selected,
        )
    }

    #[tracing::instrument(skip(self, _locale))]
    fn resolve_label(&self, field: &str, authority_key: &str, _locale: Option<&str>) -> String {
        let Some(reverse_url) = self
            .config
            .reverse_url
            .as_deref()
            .filter(|_| self.config.reverse_lookup_enabled())
        else {
            return authority_key.to_string();
        };

        match self.do_reverse_query(reverse_url, authority_key) {
            Ok(Some(label)) if !label.trim().is_empty() => label,
            Ok(_) => {
                debug!("Reverse lookup returned no display name; using key");
                authority_key.to_string()
            }
            Err(e) => {
                warn!(field, key = authority_key, error = %e, "Could not get label for key");
                authority_key.to_string()
            }
        }
    }
}
