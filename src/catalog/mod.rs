//! Catalog model and the data-fetching boundary
//!
//! Raw product, order and wishlist records are validated here once, so the
//! filter pipeline can assume well-formed [`CatalogItem`]s:
//! - required fields present, amounts parsed and non-negative
//! - timestamps normalized to UTC
//! - status always set (`Unknown` when missing)
//! - ids unique within the snapshot

mod item;
mod records;
mod status;

pub use item::{compare_ids, CatalogItem, FACET_COLOR, FACET_SIZE};
pub use records::{
    parse_amount, parse_calendar_date, parse_date, OrderLine, OrderRecord, ProductRecord,
    RawAmount, RawDate, RecordId, WishlistRecord,
};
pub use status::Status;

use crate::error::{CatalogError, Result};
use serde::Deserialize;
use std::collections::HashSet;
use std::path::Path;

/// Snapshot file layout: named sections, or a bare product array
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SnapshotFile {
    Sections(SnapshotSections),
    Products(Vec<ProductRecord>),
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct SnapshotSections {
    products: Vec<ProductRecord>,
    orders: Vec<OrderRecord>,
    wishlist: Vec<WishlistRecord>,
}

/// Read-only snapshot of validated catalog items
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    items: Vec<CatalogItem>,
}

impl Catalog {
    /// Build a catalog, validating every item and id uniqueness
    pub fn from_items(items: Vec<CatalogItem>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(items.len());
        for item in &items {
            item.validate()?;
            if !seen.insert(item.id.as_str()) {
                return Err(CatalogError::invalid_record(&item.id, "duplicate id"));
            }
        }
        Ok(Self { items })
    }

    /// Parse a JSON snapshot
    pub fn from_json_str(json: &str) -> Result<Self> {
        let file: SnapshotFile = serde_json::from_str(json).map_err(|e| CatalogError::Json {
            source: e,
            context: "Failed to parse catalog snapshot".to_string(),
        })?;

        let sections = match file {
            SnapshotFile::Sections(sections) => sections,
            SnapshotFile::Products(products) => SnapshotSections {
                products,
                ..Default::default()
            },
        };

        let mut items = Vec::with_capacity(
            sections.products.len() + sections.orders.len() + sections.wishlist.len(),
        );
        for record in sections.products {
            items.push(CatalogItem::try_from(record)?);
        }
        for record in sections.orders {
            items.push(CatalogItem::try_from(record)?);
        }
        for record in sections.wishlist {
            items.push(CatalogItem::try_from(record)?);
        }

        tracing::debug!("Parsed catalog snapshot with {} items", items.len());
        Self::from_items(items)
    }

    /// Load a JSON snapshot from disk
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| CatalogError::Io {
            source: e,
            context: format!("Failed to read catalog file: {:?}", path),
        })?;
        Self::from_json_str(&content)
    }

    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
