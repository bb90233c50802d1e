//! CSV and JSON rendering of catalog listings
use serde::Serialize;

use crate::catalog::CatalogItem;
use crate::error::{CatalogError, Result};

const CSV_HEADER: &str = "id,name,category,status,price,effective_price,created_at";

/// Render items as CSV, one row per item in the given order
pub fn to_csv(items: &[CatalogItem]) -> String {
    let mut out = String::with_capacity(64 * (items.len() + 1));
    out.push_str(CSV_HEADER);
    out.push('\n');

    for item in items {
        let row = [
            csv_field(&item.id),
            csv_field(&item.name),
            csv_field(&item.category),
            csv_field(item.status.as_str()),
            format!("{:.2}", item.price),
            format!("{:.2}", item.effective_price()),
            item.created_at.to_rfc3339(),
        ];
        out.push_str(&row.join(","));
        out.push('\n');
    }

    out
}

/// Quote a field when it contains a delimiter, quote or line break
fn csv_field(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Pretty-printed JSON of any serializable listing (a page, a slice of items)
pub fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).map_err(|e| CatalogError::Json {
        source: e,
        context: "Failed to serialize listing".to_string(),
    })
}
