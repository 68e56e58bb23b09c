//! Shared User-Agent string for registry requests.

/// Default User-Agent for registry lookups.
#[must_use]
pub(crate) fn default_lookup_user_agent() -> String {
    let version = env!("CARGO_PKG_VERSION");
    format!("orcid-lookup/{version} (authority-lookup)")
}
