//! Author authority lookup against the ORCID public search registry.
//!
//! Turns a `"Lastname, Firstname(s)"` value into a ranked, paginated list of
//! candidate identities.
//!
//! # Architecture
//!
//! Data flows one way:
//!
//! 1. [`PersonName::parse`](crate::name::PersonName::parse) splits the text
//! 2. [`RemoteQueryClient`] builds the query, fetches and parses the XML
//! 3. [`extract_candidates`] turns `author` elements into [`Candidate`]s
//! 4. [`paginate`] applies the start/limit window
//! 5. [`classify_window`] assigns the [`Confidence`] tier
//!
//! [`AuthorityLookupService`] wires these together behind the
//! [`ChoiceAuthority`] trait the hosting application calls.
//!
//! # Example
//!
//! ```no_run
//! use orcid_lookup::authority::{AuthorityLookupService, ChoiceAuthority, LookupConfig};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let service = AuthorityLookupService::new(LookupConfig::default())?;
//! let result = service.lookup_matches("dc.contributor.author", "Schweer, Andrea", -1, 0, 10, None);
//! for candidate in result.candidates() {
//!     println!("{} {}", candidate.authority_key, candidate.label);
//! }
//! # Ok(())
//! # }
//! ```

mod classify;
mod config;
mod error;
mod extract;
mod http_client;
mod paginate;
mod query;
mod result;
mod service;

pub use classify::{Classification, classify_best, classify_window};
pub use config::{
    DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_READ_TIMEOUT_SECS, DEFAULT_SEARCH_URL, LookupConfig,
};
pub use error::LookupError;
pub use extract::{candidate_from_author, extract_candidates, extract_label};
pub use http_client::{HttpXmlFetcher, XmlFetcher, compose_url, request_url};
pub use paginate::paginate;
pub use query::{RemoteQueryClient, build_reverse_query, build_search_query};
pub use result::{Candidate, Confidence, ResultSet};
pub use service::AuthorityLookupService;

/// Matching and label capabilities a hosting application expects from an
/// authority source.
///
/// `field`, `context_id` and `locale` are part of the host's calling
/// convention; implementations may ignore them. None of these methods fail:
/// problems are reported through [`ResultSet::is_error`] or, for labels, by
/// returning the key unchanged.
pub trait ChoiceAuthority: Send + Sync {
    /// All candidates matching `text`, windowed by `start` and `limit`
    /// (`limit == 0` means no limit).
    fn lookup_matches(
        &self,
        field: &str,
        text: &str,
        context_id: i32,
        start: usize,
        limit: usize,
        locale: Option<&str>,
    ) -> ResultSet;

    /// The single best candidate for `text`, for non-interactive ingest.
    fn lookup_best_match(
        &self,
        field: &str,
        text: &str,
        context_id: i32,
        locale: Option<&str>,
    ) -> ResultSet;

    /// Display label for `authority_key`; the key itself when unknown.
    fn resolve_label(&self, field: &str, authority_key: &str, locale: Option<&str>) -> String;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_choice_authority_is_object_safe() {
        fn assert_object_safe(_: &dyn ChoiceAuthority) {}
        let service = AuthorityLookupService::with_fetcher(
            LookupConfig::default(),
            query::tests::StubFetcher::body("<authors/>"),
        );
        assert_object_safe(&service);
    }
}
