//! Search predicate applied to fetched bodies.

/// True iff `search_text` occurs as a contiguous, case-sensitive substring of `body`.
///
/// An empty `search_text` matches every body, including an empty one.
pub fn contains_text(body: &str, search_text: &str) -> bool {
    body.contains(search_text)
}
