//! ORCID Lookup Library
//!
//! Author name disambiguation for metadata entry: a person name is searched
//! in the ORCID public registry and the matches come back as a ranked,
//! paginated candidate list with a confidence tier.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`name`] - `"Lastname, Firstname(s)"` parsing
//! - [`xml`] - Element tree for registry responses
//! - [`authority`] - Query, extraction, pagination and confidence pipeline

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod authority;
pub mod name;
mod user_agent;
pub mod xml;

// Re-export commonly used types
pub use authority::{
    AuthorityLookupService, Candidate, ChoiceAuthority, Confidence, LookupConfig, LookupError,
    ResultSet,
};
pub use name::PersonName;
pub use xml::{XmlDocument, XmlElement};
