// End-to-end tests: snapshot file on disk -> catalog -> pipeline -> export
use std::io::Write;

use chrono::{TimeZone, Utc};
use storefront_catalog::catalog::{Catalog, Status};
use storefront_catalog::error::CatalogError;
use storefront_catalog::export;
use storefront_catalog::filtering::{
    distinct_categories, run_pipeline, status_counts, DateRangePreset, FilterCriteria, SortSpec,
};

const ADMIN_SNAPSHOT: &str = r#"{
    "orders": [
        {"id": "CUST001", "customer": "Yassmin Ahmed", "date": "01-10-2025",
         "status": "completed", "amount": "$99.99", "category": "Women Item",
         "products": [{"name": "Dress", "size": "M", "color": "Red"}]},
        {"id": "CUST002", "customer": "Omar Hassan", "date": "02-10-2025",
         "status": "pending", "amount": "$149.99", "category": "Men Item",
         "products": [{"name": "Jacket", "size": "L", "color": "Black"}]},
        {"id": "CUST003", "customer": "Ramy Kamal", "date": "03-10-2025",
         "status": "process", "amount": "$299.99", "category": "Women Item",
         "products": [{"name": "Blouse", "size": "S", "color": "White"},
                      {"name": "Skirt", "size": "M", "color": "Black"}]},
        {"id": "CUST004", "customer": "Nour Adel", "date": "05-10-2025",
         "status": "canceled", "amount": "$59.99", "category": "Kids Item"},
        {"id": "CUST005", "customer": "Mona Saeed", "date": "07-10-2025",
         "status": "completed", "amount": "$1,199.00", "category": "Men Item"}
    ],
    "wishlist": [
        {"id": 101, "name": "Silk Scarf", "price": 24.5, "category": "Accessories",
         "addedDate": "2025-10-06", "inStock": false}
    ]
}"#;

fn write_snapshot(content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

fn load_admin() -> Catalog {
    let file = write_snapshot(ADMIN_SNAPSHOT);
    Catalog::load(file.path()).unwrap()
}

#[test]
fn test_load_mixed_snapshot() {
    let catalog = load_admin();
    assert_eq!(catalog.len(), 6);

    let cancelled = catalog.items().iter().find(|i| i.id == "CUST004").unwrap();
    assert_eq!(cancelled.status, Status::Cancelled);

    let big = catalog.items().iter().find(|i| i.id == "CUST005").unwrap();
    assert_eq!(big.price, 1199.0);

    let scarf = catalog.items().iter().find(|i| i.id == "101").unwrap();
    assert_eq!(scarf.status, Status::Unknown);
}

#[test]
fn test_status_filter_with_dashboard_spelling() {
    let catalog = load_admin();

    let criteria = FilterCriteria::new().with_status("processing");
    let page = run_pipeline(catalog.items(), &criteria, &SortSpec::Featured, 1, 10).unwrap();
    assert_eq!(page.total_items, 1);
    assert_eq!(page.items[0].id, "CUST003");

    let criteria = FilterCriteria::new().with_status("all");
    let page = run_pipeline(catalog.items(), &criteria, &SortSpec::Featured, 1, 10).unwrap();
    assert_eq!(page.total_items, 6);
}

#[test]
fn test_week_window_with_search() {
    let catalog = load_admin();
    let now = Utc.with_ymd_and_hms(2025, 10, 8, 12, 0, 0).unwrap();
    let week = DateRangePreset::Week.resolve(now).unwrap();

    let criteria = FilterCriteria::new().with_date_range(week);
    let page = run_pipeline(catalog.items(), &criteria, &SortSpec::parse("newest"), 1, 10)
        .unwrap();
    let ids: Vec<&str> = page.items.iter().map(|i| i.id.as_str()).collect();
    // 01-10 midnight falls before 2025-10-01T12:00
    assert_eq!(ids, vec!["CUST005", "101", "CUST004", "CUST003", "CUST002"]);

    let criteria = criteria.with_search_text("women");
    let page = run_pipeline(catalog.items(), &criteria, &SortSpec::parse("newest"), 1, 10)
        .unwrap();
    assert_eq!(page.total_items, 1);
    assert_eq!(page.items[0].name, "Ramy Kamal");
}

#[test]
fn test_search_by_order_id() {
    let catalog = load_admin();
    let criteria = FilterCriteria::new().with_search_text("cust002");
    let page = run_pipeline(catalog.items(), &criteria, &SortSpec::Featured, 1, 10).unwrap();
    assert_eq!(page.total_items, 1);
    assert_eq!(page.items[0].name, "Omar Hassan");
}

#[test]
fn test_facet_summaries() {
    let catalog = load_admin();

    let categories = distinct_categories(catalog.items());
    assert_eq!(categories[0], "All");
    assert!(categories.contains(&"Men Item".to_string()));

    let counts = status_counts(catalog.items());
    assert_eq!(counts.get(&Status::Completed), Some(&2));
    assert_eq!(counts.get(&Status::Unknown), Some(&1));
}

#[test]
fn test_export_filtered_orders() {
    let catalog = load_admin();
    let criteria = FilterCriteria::new().with_status("completed");
    let page = run_pipeline(catalog.items(), &criteria, &SortSpec::parse("price-high"), 1, 10)
        .unwrap();

    let csv = export::to_csv(&page.items);
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 3);
    assert!(lines[1].starts_with("CUST005,Mona Saeed,Men Item,completed,1199.00"));
    assert!(lines[2].starts_with("CUST001,Yassmin Ahmed"));
}

#[test]
fn test_page_json_shape() {
    let catalog = load_admin();
    let page = run_pipeline(catalog.items(), &FilterCriteria::new(), &SortSpec::Featured, 9, 4)
        .unwrap();

    let json = export::to_json(&page).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["page_number"], 2);
    assert_eq!(value["total_pages"], 2);
    assert_eq!(value["has_next"], false);
    assert_eq!(value["items"].as_array().unwrap().len(), 2);
}

#[test]
fn test_bad_amount_rejects_snapshot() {
    let file = write_snapshot(
        r#"{"orders": [{"id": "CUST009", "customer": "X", "date": "01-10-2025",
                        "amount": "ninety", "category": "Men Item"}]}"#,
    );
    let err = Catalog::load(file.path()).unwrap_err();
    assert!(matches!(err, CatalogError::InvalidRecord { .. }));
}

#[test]
fn test_missing_snapshot_file() {
    let dir = tempfile::tempdir().unwrap();
    let err = Catalog::load(&dir.path().join("missing.json")).unwrap_err();
    assert!(matches!(err, CatalogError::Io { .. }));
}
