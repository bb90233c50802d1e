// Comparator builder: SortSpec -> three-way comparator over catalog items
use std::cmp::Ordering;

use crate::catalog::{compare_ids, CatalogItem};
use crate::filtering::types::{SortDirection, SortKey, SortSpec};

/// Build a comparator for `spec`
///
/// Callers must sort with a stable algorithm (`slice::sort_by`): items that
/// compare equal, including every item within one featured score tier, keep
/// their input order.
pub fn build_comparator(spec: &SortSpec) -> impl Fn(&CatalogItem, &CatalogItem) -> Ordering {
    let spec = *spec;
    move |a: &CatalogItem, b: &CatalogItem| match spec {
        SortSpec::Featured => b.featured_score().cmp(&a.featured_score()),
        SortSpec::By { key, direction } => {
            let ordering = compare_by_key(a, b, key);
            match direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            }
        }
    }
}

/// Ascending comparison on a single key
fn compare_by_key(a: &CatalogItem, b: &CatalogItem, key: SortKey) -> Ordering {
    match key {
        SortKey::Price => a.effective_price().total_cmp(&b.effective_price()),
        SortKey::Rating => a
            .rating
            .unwrap_or(0.0)
            .total_cmp(&b.rating.unwrap_or(0.0)),
        SortKey::Popularity => a.popularity.unwrap_or(0).cmp(&b.popularity.unwrap_or(0)),
        // Same-instant ties fall back to id so "newest" is deterministic
        SortKey::Date => a
            .created_at
            .cmp(&b.created_at)
            .then_with(|| compare_ids(&a.id, &b.id)),
        SortKey::Name => a.name.to_lowercase().cmp(&b.name.to_lowercase()),
    }
}

/// Sort a borrowed view of `items` without touching the source slice
pub fn sorted_view<'a>(items: &[&'a CatalogItem], spec: &SortSpec) -> Vec<&'a CatalogItem> {
    let comparator = build_comparator(spec);
    let mut view = items.to_vec();
    view.sort_by(|a, b| comparator(*a, *b));
    view
}
