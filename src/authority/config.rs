//! Runtime settings for the lookup service.

/// Public ORCID biography search endpoint.
pub const DEFAULT_SEARCH_URL: &str = "http://pub.orcid.org/search/orcid-bio/";

/// Connection timeout applied to every registry request.
pub const DEFAULT_CONNECT_TIMEOUT_SECS: u64 = 10;

/// Overall request timeout (connect + read).
pub const DEFAULT_READ_TIMEOUT_SECS: u64 = 30;

/// Settings consumed by [`AuthorityLookupService`](super::AuthorityLookupService).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupConfig {
    /// Base URL for forward (name) searches.
    pub search_url: String,
    /// Base URL for reverse (key to label) lookups.
    ///
    /// `None` disables the remote call: labels resolve to the key itself.
    pub reverse_url: Option<String>,
    /// Connection timeout in seconds.
    pub connect_timeout_secs: u64,
    /// Overall request timeout in seconds.
    pub read_timeout_secs: u64,
}

impl LookupConfig {
    /// Default settings pointed at a different search endpoint.
    #[must_use]
    pub fn with_search_url(search_url: impl Into<String>) -> Self {
        Self {
            search_url: search_url.into(),
            ..Self::default()
        }
    }

    /// Enables reverse label lookups against `reverse_url`.
    #[must_use]
    pub fn reverse_lookup(mut self, reverse_url: impl Into<String>) -> Self {
        self.reverse_url = Some(reverse_url.into());
        self
    }

    /// Returns true when labels are resolved remotely.
    #[must_use]
    pub fn reverse_lookup_enabled(&self) -> bool {
        self.reverse_url
            .as_deref()
            .is_some_and(|url| !url.trim().is_empty())
    }
}

impl Default for LookupConfig {
    fn default() -> Self {
        Self {
            search_url: DEFAULT_SEARCH_URL.to_string(),
            reverse_url: None,
            connect_timeout_secs: DEFAULT_CONNECT_TIMEOUT_SECS,
            read_timeout_secs: DEFAULT_READ_TIMEOUT_SECS,
        }
    }
}
