//! Candidate records and lookup outcomes.

use serde::Serialize;

/// One identity record returned by the registry for a name query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Candidate {
    /// Registry-issued unique identifier.
    pub authority_key: String,
    /// Canonical name as stored by the registry.
    pub display_value: String,
    /// Name decorated with role and phone where available.
    pub label: String,
}

/// How certain a lookup outcome is, derived purely from result cardinality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Confidence {
    /// No candidate in the requested window.
    NotFound,
    /// Exactly one candidate.
    Uncertain,
    /// More than one candidate.
    Ambiguous,
    /// The lookup failed before candidates could be produced.
    Error,
}

impl Confidence {
    /// Stable tier label for display output.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::NotFound => "NOT_FOUND",
            Self::Uncertain => "UNCERTAIN",
            Self::Ambiguous => "AMBIGUOUS",
            Self::Error => "ERROR",
        }
    }
}

impl std::fmt::Display for Confidence {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one lookup call. Built once and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultSet {
    candidates: Vec<Candidate>,
    window_start: usize,
    total_available: usize,
    confidence: Confidence,
    has_more: bool,
    default_selected: Option<usize>,
    is_error: bool,
}

impl ResultSet {
    /// A successful result.
    #[must_use]
    pub fn new(
        candidates: Vec<Candidate>,
        window_start: usize,
        total_available: usize,
        confidence: Confidence,
        has_more: bool,
        default_selected: Option<usize>,
    ) -> Self {
        Self {
            candidates,
            window_start,
            total_available,
            confidence,
            has_more,
            default_selected,
            is_error: false,
        }
    }

    /// An empty `NOT_FOUND` result.
    #[must_use]
    pub fn not_found() -> Self {
        Self::new(Vec::new(), 0, 0, Confidence::NotFound, false, Some(0))
    }

    /// An empty error result.
    #[must_use]
    pub fn error() -> Self {
        Self {
            candidates: Vec::new(),
            window_start: 0,
            total_available: 0,
            confidence: Confidence::Error,
            has_more: false,
            default_selected: None,
            is_error: true,
        }
    }

    #[must_use]
    pub fn candidates(&self) -> &[Candidate] {
        &self.candidates
    }

    #[must_use]
    pub fn window_start(&self) -> usize {
        self.window_start
    }

    /// Candidate count before pagination.
    #[must_use]
    pub fn total_available(&self) -> usize {
        self.total_available
    }

    #[must_use]
    pub fn confidence(&self) -> Confidence {
        self.confidence
    }

    #[must_use]
    pub fn has_more(&self) -> bool {
        self.has_more
    }

    #[must_use]
    pub fn default_selected(&self) -> Option<usize> {
        self.default_selected
    }

    #[must_use]
    pub fn is_error(&self) -> bool {
        self.is_error
    }
}
