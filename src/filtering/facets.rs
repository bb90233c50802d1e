// Facet summaries shown next to the filter controls
use std::collections::{BTreeMap, BTreeSet};

use crate::catalog::{CatalogItem, Status};
use crate::filtering::types::ALL_CATEGORIES;

/// Distinct categories, sorted, led by the "All" sentinel
pub fn distinct_categories(items: &[CatalogItem]) -> Vec<String> {
    let categories: BTreeSet<&str> = items.iter().map(|i| i.category.as_str()).collect();

    std::iter::once(ALL_CATEGORIES.to_string())
        .chain(categories.into_iter().map(str::to_string))
        .collect()
}

/// Distinct values of one facet across all items, sorted
pub fn facet_values(items: &[CatalogItem], facet: &str) -> Vec<String> {
    items
        .iter()
        .filter_map(|i| i.facet(facet))
        .flatten()
        .cloned()
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Item count per status, for the dashboard stat cards
pub fn status_counts(items: &[CatalogItem]) -> BTreeMap<Status, usize> {
    let mut counts = BTreeMap::new();
    for item in items {
        *counts.entry(item.status.clone()).or_insert(0) += 1;
    }
    counts
}

/// Lowest and highest effective price, `None` for an empty slice
pub fn price_bounds(items: &[CatalogItem]) -> Option<(f64, f64)> {
    items.iter().map(CatalogItem::effective_price).fold(None, |acc, p| {
        Some(match acc {
            None => (p, p),
            Some((lo, hi)) => (lo.min(p), hi.max(p)),
        })
    })
}
