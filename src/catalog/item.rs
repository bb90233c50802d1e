// Catalog item: the common shape of products, orders and wishlist entries
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};

use crate::catalog::Status;
use crate::error::{CatalogError, Result};

/// Facet name used for size attributes
pub const FACET_SIZE: &str = "size";
/// Facet name used for color attributes
pub const FACET_COLOR: &str = "color";

/// A product, order or wishlist entry as seen by the filter pipeline
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    /// Opaque identifier, unique within a catalog snapshot
    pub id: String,

    /// Display name (product name or order customer)
    pub name: String,

    /// Category label
    pub category: String,

    /// Base price for products, total amount for orders
    pub price: f64,

    /// Discounted price, only meaningful when positive
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount_price: Option<f64>,

    /// Lifecycle status, `Unknown` when the source had none
    #[serde(default)]
    pub status: Status,

    /// Creation (product) or placement (order) time
    pub created_at: DateTime<Utc>,

    /// Haystack for case-insensitive free-text search
    pub searchable_text: String,

    /// Facet name -> values (size, color, ...)
    #[serde(default)]
    pub attributes: BTreeMap<String, BTreeSet<String>>,

    /// Average rating
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,

    /// Review count or sales volume
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub popularity: Option<u64>,

    /// Flagged as a new arrival
    #[serde(default)]
    pub is_new: bool,
}

impl CatalogItem {
    /// Create an item with the required fields; search text defaults to name + category
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        category: impl Into<String>,
        price: f64,
        created_at: DateTime<Utc>,
    ) -> Self {
        let name = name.into();
        let category = category.into();
        let searchable_text = format!("{} {}", name, category);

        Self {
            id: id.into(),
            name,
            category,
            price,
            discount_price: None,
            status: Status::Unknown,
            created_at,
            searchable_text,
            attributes: BTreeMap::new(),
            rating: None,
            popularity: None,
            is_new: false,
        }
    }

    pub fn with_discount(mut self, discount_price: f64) -> Self {
        self.discount_price = Some(discount_price);
        self
    }

    pub fn with_status(mut self, status: impl Into<Status>) -> Self {
        self.status = status.into();
        self
    }

    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = Some(rating);
        self
    }

    pub fn with_popularity(mut self, popularity: u64) -> Self {
        self.popularity = Some(popularity);
        self
    }

    pub fn with_new_flag(mut self, is_new: bool) -> Self {
        self.is_new = is_new;
        self
    }

    pub fn with_searchable_text(mut self, text: impl Into<String>) -> Self {
        self.searchable_text = text.into();
        self
    }

    /// Add values to a facet, merging with any existing ones
    pub fn with_attribute<I, S>(mut self, facet: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.attributes
            .entry(facet.into())
            .or_default()
            .extend(values.into_iter().map(Into::into));
        self
    }

    /// Values of a facet, if the item carries it
    pub fn facet(&self, facet: &str) -> Option<&BTreeSet<String>> {
        self.attributes.get(facet)
    }

    /// True when a positive discounted price is present
    pub fn has_discount(&self) -> bool {
        matches!(self.discount_price, Some(p) if p > 0.0)
    }

    /// Discounted price when present, base price otherwise
    pub fn effective_price(&self) -> f64 {
        match self.discount_price {
            Some(p) if p > 0.0 => p,
            _ => self.price,
        }
    }

    /// Priority used by the featured ordering: discount = 2, new = 1
    pub fn featured_score(&self) -> u8 {
        (if self.has_discount() { 2 } else { 0 }) + u8::from(self.is_new)
    }

    /// Check field-level invariants
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(CatalogError::invalid_record("<empty>", "id cannot be empty"));
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(CatalogError::invalid_record(
                &self.id,
                format!("price must be a non-negative number, got {}", self.price),
            ));
        }
        if let Some(discount) = self.discount_price {
            if !discount.is_finite() || discount < 0.0 {
                return Err(CatalogError::invalid_record(
                    &self.id,
                    format!("discount price must be non-negative, got {}", discount),
                ));
            }
        }
        if let Some(rating) = self.rating {
            if !rating.is_finite() {
                return Err(CatalogError::invalid_record(
                    &self.id,
                    "rating must be a finite number",
                ));
            }
        }
        Ok(())
    }
}

/// Compare ids numerically when both are integers, lexicographically otherwise
pub fn compare_ids(a: &str, b: &str) -> Ordering {
    match (a.parse::<u64>(), b.parse::<u64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y),
        _ => a.cmp(b),
    }
}
