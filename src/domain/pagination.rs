//! Fixed-size pagination over an already ordered result list.

/// Page size for every paginated question listing.
pub const QUESTIONS_PER_PAGE: usize = 10;

/// Page used when the `page` query parameter is absent or not a number.
pub const DEFAULT_PAGE: i64 = 1;

/// Parses the raw `page` query value, falling back to [`DEFAULT_PAGE`].
pub fn parse_page(raw: Option<&str>) -> i64 {
    raw.and_then(|v| v.trim().parse::<i64>().ok())
        .unwrap_or(DEFAULT_PAGE)
}

/// Returns the 1-based `page` of `items`.
///
/// Bounds are `[(page - 1) * 10, (page - 1) * 10 + 10)` clamped to the list,
/// so any page past the end is empty. Pages below 1 are empty too.
pub fn paginate<T: Clone>(items: &[T], page: i64) -> Vec<T> {
    if page < 1 {
        return Vec::new();
    }
    let start = usize::try_from(page - 1)
        .ok()
        .and_then(|p| p.checked_mul(QUESTIONS_PER_PAGE));
    match start {
        Some(start) if start < items.len() => {
            let end = (start + QUESTIONS_PER_PAGE).min(items.len());
            items[start..end].to_vec()
        }
        _ => Vec::new(),
    }
}
