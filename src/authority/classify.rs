//! Confidence tiers from result cardinality.

use super::Confidence;

/// Tier, default selection and continuation flag for one window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub confidence: Confidence,
    pub default_selected: Option<usize>,
    pub has_more: bool,
}

/// Classifies a window of `window_len` candidates taken at `start` out of
/// `total` available.
#[must_use]
pub fn classify_window(start: usize, window_len: usize, total: usize) -> Classification {
    match window_len {
        0 => Classification {
            confidence: Confidence::NotFound,
            default_selected: Some(0),
            has_more: false,
        },
        1 => Classification {
            confidence: Confidence::Uncertain,
            default_selected: None,
            has_more: start + 1 < total,
        },
        n => Classification {
            confidence: Confidence::Ambiguous,
            default_selected: Some(0),
            has_more: start + n < total,
        },
    }
}

/// Classifies the single best match out of `total` candidates.
#[must_use]
pub fn classify_best(total: usize) -> Classification {
    match total {
        0 => Classification {
            confidence: Confidence::NotFound,
            default_selected: Some(0),
            has_more: false,
        },
        1 => Classification {
            confidence: Confidence::Uncertain,
            default_selected: Some(0),
            has_more: false,
        },
        _ => Classification {
            confidence: Confidence::Ambiguous,
            default_selected: Some(0),
            has_more: true,
        },
    }
}
