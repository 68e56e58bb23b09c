//! Person name parsing for `"Lastname, Firstname(s)"` formatted values.

/// A person name split into family and given name tokens.
///
/// Both fields are absent when the input was blank or carried no comma
/// separator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PersonName {
    given_names: Option<String>,
    family_name: Option<String>,
}

impl PersonName {
    /// Parses a `"Family, Given1 Given2"` value.
    ///
    /// The string is split on the first comma. Each side is trimmed and an
    /// empty side is treated as absent. Input without a comma is considered
    /// unparseable and yields an empty name. Never fails.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let Some((family, given)) = text.trim().split_once(',') else {
            return Self::default();
        };

        Self {
            given_names: non_empty(given),
            family_name: non_empty(family),
        }
    }

    /// Given names, if any.
    #[must_use]
    pub fn given_names(&self) -> Option<&str> {
        self.given_names.as_deref()
    }

    /// Family name, if any.
    #[must_use]
    pub fn family_name(&self) -> Option<&str> {
        self.family_name.as_deref()
    }

    /// Returns true when neither token is present.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.given_names.is_none() && self.family_name.is_none()
    }
}

fn non_empty(token: &str) -> Option<String> {
    let token = token.trim();
    if token.is_empty() {
        None
    } else {
        Some(token.to_string())
    }
}
