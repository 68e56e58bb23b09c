//! Start/limit windowing over candidate lists.

/// Returns the window of `items` beginning at `start`, at most `limit` long.
///
/// A `limit` of 0 means no limit. A `start` at or past the end yields an
/// empty window. The source slice is never modified.
#[must_use]
pub fn paginate<T: Clone>(items: &[T], start: usize, limit: usize) -> Vec<T> {
    let Some(tail) = items.get(start..) else {
        return Vec::new();
    };
    let end = if limit > 0 { limit.min(tail.len()) } else { tail.len() };
    tail[..end].to_vec()
}
