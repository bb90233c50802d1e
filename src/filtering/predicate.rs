// Predicate builder: one named clause per filter, AND-combined
//
// Every clause passes when its criterion is unset, so an empty
// FilterCriteria keeps the whole catalog.
use std::collections::BTreeSet;

use crate::catalog::{CatalogItem, Status, FACET_COLOR, FACET_SIZE};
use crate::filtering::types::{DateRange, FilterCriteria, ALL_CATEGORIES};

/// Category clause: unset or "All" passes, otherwise exact match
pub fn category_matches(item: &CatalogItem, category: Option<&str>) -> bool {
    match category {
        None => true,
        Some(c) if c.eq_ignore_ascii_case(ALL_CATEGORIES) => true,
        Some(c) => item.category == c,
    }
}

/// Facet clause: empty selection passes, otherwise any selected value must be present
pub fn facet_matches(item: &CatalogItem, facet: &str, selected: &BTreeSet<String>) -> bool {
    if selected.is_empty() {
        return true;
    }
    item.facet(facet)
        .is_some_and(|values| !values.is_disjoint(selected))
}

/// Price clause on the discount-aware effective price, bounds inclusive
pub fn price_in_range(item: &CatalogItem, price_min: f64, price_max: f64) -> bool {
    let price = item.effective_price();
    price_min <= price && price <= price_max
}

/// Status clause: unset or "all" passes, otherwise parsed equality
pub fn status_matches(item: &CatalogItem, status: Option<&str>) -> bool {
    match status {
        None => true,
        Some(s) if s.trim().eq_ignore_ascii_case("all") => true,
        Some(s) => item.status == Status::parse(s),
    }
}

/// Date clause: unset passes, otherwise `created_at` within the inclusive range
pub fn date_in_range(item: &CatalogItem, range: Option<&DateRange>) -> bool {
    range.map_or(true, |r| r.contains(&item.created_at))
}

/// Free-text clause: trimmed, case-insensitive substring of the search text
pub fn text_matches(item: &CatalogItem, search_text: &str) -> bool {
    let needle = search_text.trim();
    if needle.is_empty() {
        return true;
    }
    item.searchable_text
        .to_lowercase()
        .contains(&needle.to_lowercase())
}

/// Build the combined predicate for `criteria`
///
/// The returned closure borrows `criteria` and holds no mutable state, so it
/// can be applied to any number of items.
pub fn build_predicate(criteria: &FilterCriteria) -> impl Fn(&CatalogItem) -> bool + '_ {
    move |item: &CatalogItem| {
        category_matches(item, criteria.category.as_deref())
            && facet_matches(item, FACET_SIZE, &criteria.sizes)
            && facet_matches(item, FACET_COLOR, &criteria.colors)
            && price_in_range(item, criteria.price_min, criteria.price_max)
            && status_matches(item, criteria.status.as_deref())
            && date_in_range(item, criteria.date_range.as_ref())
            && text_matches(item, &criteria.search_text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn shirt() -> CatalogItem {
        let at = Utc.with_ymd_and_hms(2025, 10, 3, 12, 0, 0).unwrap();
        CatalogItem::new("3", "Casual Button-Up Shirt", "Shirts", 49.99, at)
            .with_discount(34.99)
            .with_status("pending")
            .with_searchable_text("Casual Button-Up Shirt Versatile shirt for any occasion Shirts")
            .with_attribute(FACET_SIZE, ["S", "M", "L"])
            .with_attribute(FACET_COLOR, ["White", "Blue"])
    }

    fn set(values: &[&str]) -> BTreeSet<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_category_clause() {
        let item = shirt();
        assert!(category_matches(&item, None));
        assert!(category_matches(&item, Some("All")));
        assert!(category_matches(&item, Some("all")));
        assert!(category_matches(&item, Some("Shirts")));
        assert!(!category_matches(&item, Some("shirts")));
        assert!(!category_matches(&item, Some("Jeans")));
    }

    #[test]
    fn test_facet_clause_or_semantics() {
        let item = shirt();
        assert!(facet_matches(&item, FACET_SIZE, &BTreeSet::new()));
        assert!(facet_matches(&item, FACET_SIZE, &set(&["XL", "M"])));
        assert!(!facet_matches(&item, FACET_SIZE, &set(&["XL"])));
        assert!(!facet_matches(&item, "material", &set(&["Cotton"])));
    }

    #[test]
    fn test_price_clause_uses_discount() {
        let item = shirt();
        assert!(price_in_range(&item, 30.0, 40.0));
        assert!(!price_in_range(&item, 40.0, 60.0));
        assert!(price_in_range(&item, 34.99, 34.99));
    }

    #[test]
    fn test_status_clause() {
        let item = shirt();
        assert!(status_matches(&item, None));
        assert!(status_matches(&item, Some("all")));
        assert!(status_matches(&item, Some("Pending")));
        assert!(!status_matches(&item, Some("completed")));
    }

    #[test]
    fn test_date_clause() {
        let item = shirt();
        let inside = DateRange::new(
            Utc.with_ymd_and_hms(2025, 10, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2025, 10, 3, 12, 0, 0).unwrap(),
        );
        let before = DateRange::new(
            Utc.with_ymd_and_hms(2025, 9, 1, 0, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2025, 9, 30, 0, 0, 0).unwrap(),
        );
        assert!(date_in_range(&item, None));
        assert!(date_in_range(&item, Some(&inside)));
        assert!(!date_in_range(&item, Some(&before)));
    }

    #[test]
    fn test_text_clause() {
        let item = shirt();
        assert!(text_matches(&item, ""));
        assert!(text_matches(&item, "   "));
        assert!(text_matches(&item, "  VERSATILE "));
        assert!(!text_matches(&item, "leather"));
    }

    #[test]
    fn test_combined_predicate_is_conjunction() {
        let item = shirt();
        let pass = FilterCriteria::new()
            .with_category("Shirts")
            .with_sizes(["M"])
            .with_price_range(0.0, 50.0)
            .with_search_text("button");
        assert!(build_predicate(&pass)(&item));

        let fail = pass.clone().with_colors(["Black"]);
        assert!(!build_predicate(&fail)(&item));
    }

    #[test]
    fn test_empty_criteria_keeps_everything() {
        let criteria = FilterCriteria::default();
        let predicate = build_predicate(&criteria);
        assert!(predicate(&shirt()));
        assert!(predicate(&shirt()));
    }
}
