//! Candidate extraction from parsed registry responses.

use crate::xml::{XmlDocument, XmlElement};

use super::{Candidate, LookupError};

/// Extracts one candidate per usable `author` element, in document order.
///
/// Authors lacking an `id` or `name` child are skipped silently.
///
/// # Errors
///
/// Returns [`LookupError::MissingDocument`] when `document` is `None`.
pub fn extract_candidates(document: Option<&XmlDocument>) -> Result<Vec<Candidate>, LookupError> {
    let document = document.ok_or(LookupError::MissingDocument)?;
    Ok(document
        .elements_by_name("author")
        .into_iter()
        .filter_map(candidate_from_author)
        .collect())
}

/// Builds a candidate from the direct children of one `author` element.
///
/// Recognised children are `id`, `name`, `role` and `phone`; anything else is
/// ignored and a repeated child overrides the earlier one. The label is the
/// name, then `" (" role ")"` and `" phone: " phone` when present.
#[must_use]
pub fn candidate_from_author(author: &XmlElement) -> Option<Candidate> {
    let mut id = None;
    let mut name = None;
    let mut role = None;
    let mut phone = None;

    for child in author.child_elements() {
        let slot = match child.name() {
            "id" => &mut id,
            "name" => &mut name,
            "role" => &mut role,
            "phone" => &mut phone,
            _ => continue,
        };
        *slot = Some(child.text_content());
    }

    let (id, name) = (id?, name?);

    let mut label = name.clone();
    if let Some(role) = role {
        label.push_str(" (");
        label.push_str(&role);
        label.push(')');
    }
    if let Some(phone) = phone {
        label.push_str(" phone: ");
        label.push_str(&phone);
    }

    Some(Candidate {
        authority_key: id,
        display_value: name,
        label,
    })
}

/// Returns the text of the first `displayname` element, if any.
///
/// # Errors
///
/// Returns [`LookupError::MissingDocument`] when `document` is `None`.
pub fn extract_label(document: Option<&XmlDocument>) -> Result<Option<String>, LookupError> {
    let document = document.ok_or(LookupError::MissingDocument)?;
    Ok(document
        .elements_by_name("displayname")
        .first()
        .map(|element| element.text_content()))
}
