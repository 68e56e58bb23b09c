//! Error types for authority lookups.
//!
//! Messages follow the What/Why/Fix shape used across the project.

use thiserror::Error;

/// Errors that can occur while querying the registry or reading its response.
#[derive(Debug, Clone, Error)]
pub enum LookupError {
    /// Name text yielded no usable given/family tokens
    #[error("cannot parse name '{text}'\n  Suggestion: Use the form 'Lastname, Firstname(s)'")]
    UnparseableInput {
        /// The raw name text
        text: String,
    },

    /// Connection refused, timed out, or the body could not be read
    #[error("cannot use lookup service at '{url}': {reason}\n  Suggestion: {suggestion}")]
    Transport {
        /// Request URL including query string
        url: String,
        /// Why the request failed
        reason: String,
        /// How to fix the issue
        suggestion: String,
    },

    /// The service answered with no body
    #[error(
        "no response from lookup service at '{url}'\n  Suggestion: Check that the search URL points at the registry API"
    )]
    EmptyResponse {
        /// Request URL including query string
        url: String,
    },

    /// The body was not well-formed XML
    #[error("problem reading lookup response from '{url}': {reason}\n  Suggestion: {suggestion}")]
    MalformedResponse {
        /// Request URL including query string
        url: String,
        /// Parser message
        reason: String,
        /// How to fix the issue
        suggestion: String,
    },

    /// No document was available to read candidates from
    #[error("cannot read lookup service response: no document")]
    MissingDocument,

    /// The HTTP client could not be constructed
    #[error("cannot build HTTP client: {reason}")]
    ClientBuild {
        /// Builder error message
        reason: String,
    },
}

impl LookupError {
    /// Creates an `UnparseableInput` error.
    #[must_use]
    pub fn unparseable_input(text: &str) -> Self {
        Self::UnparseableInput {
            text: text.to_string(),
        }
    }

    /// Creates a `Transport` error.
    #[must_use]
    pub fn transport(url: &str, reason: &str) -> Self {
        Self::Transport {
            url: url.to_string(),
            reason: reason.to_string(),
            suggestion: "Check your network connection and the configured search URL".to_string(),
        }
    }

    /// Creates a `Transport` error for an elapsed timeout.
    #[must_use]
    pub fn timeout(url: &str, reason: &str) -> Self {
        Self::Transport {
            url: url.to_string(),
            reason: reason.to_string(),
            suggestion: "The registry did not answer in time; try again later or raise the timeout"
                .to_string(),
        }
    }

    /// Creates an `EmptyResponse` error.
    #[must_use]
    pub fn empty_response(url: &str) -> Self {
        Self::EmptyResponse {
            url: url.to_string(),
        }
    }

    /// Creates a `MalformedResponse` error.
    #[must_use]
    pub fn malformed_response(url: &str, reason: &str) -> Self {
        Self::MalformedResponse {
            url: url.to_string(),
            reason: reason.to_string(),
            suggestion: "The service may be returning an error page; check the search URL"
                .to_string(),
        }
    }

    /// Creates a `ClientBuild` error.
    #[must_use]
    pub fn client_build(reason: &str) -> Self {
        Self::ClientBuild {
            reason: reason.to_string(),
        }
    }
}
