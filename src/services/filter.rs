//! Pure filtering over the media collection. Each setting narrows the
//! collection independently; the composed filter is the intersection of the
//! three, always recomputed from the full collection rather than from a
//! previously filtered subset.

use crate::models::{Category, MediaItem, MediaKind};

/// Current filter settings. The default matches everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LibraryFilter {
    /// Matched case-insensitively against item hashtags as a substring.
    pub search: String,
    pub category: Option<Category>,
    pub kind: Option<MediaKind>,
}

impl LibraryFilter {
    /// True when applying the filter returns the collection unchanged.
    pub fn is_neutral(&self) -> bool {
        self.search.trim().is_empty() && self.category.is_none() && self.kind.is_none()
    }
}

/// Applies all three stages in sequence. Order within the result follows the
/// input, and applying the same filter twice returns the same subset.
pub fn apply(items: &[MediaItem], filter: &LibraryFilter) -> Vec<MediaItem> {
    let searched = by_search(items, &filter.search);
    let categorised = by_category(&searched, filter.category);
    by_kind(&categorised, filter.kind)
}

/// Keeps items with at least one hashtag containing the query. Leading and
/// trailing whitespace is ignored and an effectively empty query keeps everything.
pub fn by_search(items: &[MediaItem], query: &str) -> Vec<MediaItem> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return items.to_vec();
    }
    items
        .iter()
        .filter(|item| {
            item.hashtags
                .iter()
                .any(|tag| tag.to_lowercase().contains(&query))
        })
        .cloned()
        .collect()
}

pub fn by_category(items: &[MediaItem], category: Option<Category>) -> Vec<MediaItem> {
    match category {
        Some(category) => items
            .iter()
            .filter(|item| item.category == category)
            .cloned()
            .collect(),
        None => items.to_vec(),
    }
}

pub fn by_kind(items: &[MediaItem], kind: Option<MediaKind>) -> Vec<MediaItem> {
    match kind {
        Some(kind) => items
            .iter()
            .filter(|item| item.kind == kind)
            .cloned()
            .collect(),
        None => items.to_vec(),
    }
}
