// Raw records as served by the storefront backend or mock data, and their
// validated conversion into catalog items
use chrono::{DateTime, NaiveDate, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

use crate::catalog::item::{CatalogItem, FACET_COLOR, FACET_SIZE};
use crate::error::{CatalogError, Result};

/// Identifier that may arrive as a number (products) or a string (orders)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Number(u64),
    Text(String),
}

impl RecordId {
    pub fn into_string(self) -> String {
        match self {
            RecordId::Number(n) => n.to_string(),
            RecordId::Text(s) => s,
        }
    }
}

/// Timestamp as an epoch-seconds number or a date string
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawDate {
    Epoch(i64),
    Text(String),
}

/// Money as a plain number or a display string such as `"$1,099.99"`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawAmount {
    Number(f64),
    Text(String),
}

/// Product listing record
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    pub id: RecordId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: RawAmount,
    #[serde(default)]
    pub discount_price: Option<RawAmount>,
    pub category: String,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub review_count: Option<u64>,
    #[serde(default)]
    pub sizes: Vec<String>,
    #[serde(default)]
    pub colors: Vec<String>,
    #[serde(default)]
    pub is_new: bool,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub created_at: Option<RawDate>,
}

/// Line item inside an order
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLine {
    pub name: String,
    #[serde(default)]
    pub size: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
}

/// Admin/employee order record
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRecord {
    pub id: RecordId,
    pub customer: String,
    pub date: RawDate,
    #[serde(default)]
    pub status: Option<String>,
    pub amount: RawAmount,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub products: Vec<OrderLine>,
}

/// Customer wishlist entry
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WishlistRecord {
    pub id: RecordId,
    pub name: String,
    pub price: RawAmount,
    #[serde(default)]
    pub discount_price: Option<RawAmount>,
    pub category: String,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub added_date: Option<RawDate>,
    #[serde(default = "default_in_stock")]
    pub in_stock: bool,
}

fn default_in_stock() -> bool {
    true
}

impl TryFrom<ProductRecord> for CatalogItem {
    type Error = CatalogError;

    fn try_from(record: ProductRecord) -> Result<Self> {
        let id = record.id.into_string();
        let price = parse_amount(&id, &record.price)?;
        let created_at = optional_date(&id, record.created_at.as_ref())?;
        let searchable = format!(
            "{} {} {}",
            record.name, record.description, record.category
        );

        let mut item = CatalogItem::new(&id, record.name, record.category, price, created_at)
            .with_searchable_text(searchable)
            .with_status(record.status.as_deref().unwrap_or_default())
            .with_new_flag(record.is_new)
            .with_attribute(FACET_SIZE, record.sizes)
            .with_attribute(FACET_COLOR, record.colors);

        if let Some(raw) = &record.discount_price {
            item = item.with_discount(parse_amount(&id, raw)?);
        }
        if let Some(rating) = record.rating {
            item = item.with_rating(rating);
        }
        if let Some(count) = record.review_count {
            item = item.with_popularity(count);
        }

        item.validate()?;
        Ok(item)
    }
}

impl TryFrom<OrderRecord> for CatalogItem {
    type Error = CatalogError;

    fn try_from(record: OrderRecord) -> Result<Self> {
        let id = record.id.into_string();
        let amount = parse_amount(&id, &record.amount)?;
        let created_at = parse_date(&id, &record.date)?;
        let searchable = format!("{} {} {}", id, record.customer, record.category);

        let sizes: Vec<String> = record.products.iter().filter_map(|l| l.size.clone()).collect();
        let colors: Vec<String> = record.products.iter().filter_map(|l| l.color.clone()).collect();

        let item = CatalogItem::new(&id, record.customer, record.category, amount, created_at)
            .with_searchable_text(searchable)
            .with_status(record.status.as_deref().unwrap_or_default())
            .with_popularity(record.products.len() as u64)
            .with_attribute(FACET_SIZE, sizes)
            .with_attribute(FACET_COLOR, colors);

        item.validate()?;
        Ok(item)
    }
}

impl TryFrom<WishlistRecord> for CatalogItem {
    type Error = CatalogError;

    fn try_from(record: WishlistRecord) -> Result<Self> {
        let id = record.id.into_string();
        let price = parse_amount(&id, &record.price)?;
        let created_at = optional_date(&id, record.added_date.as_ref())?;
        let stock = if record.in_stock {
            "in-stock"
        } else {
            "out-of-stock"
        };

        let mut item = CatalogItem::new(&id, record.name, record.category, price, created_at)
            .with_attribute("stock", [stock]);

        if let Some(raw) = &record.discount_price {
            item = item.with_discount(parse_amount(&id, raw)?);
        }
        if let Some(rating) = record.rating {
            item = item.with_rating(rating);
        }

        item.validate()?;
        Ok(item)
    }
}

fn amount_regex() -> &'static Regex {
    static AMOUNT: OnceLock<Regex> = OnceLock::new();
    AMOUNT.get_or_init(|| {
        Regex::new(r"^\s*\$?\s*(\d+(?:\.\d+)?)\s*$").expect("amount pattern is valid")
    })
}

/// Parse a raw amount into a non-negative number
pub fn parse_amount(id: &str, raw: &RawAmount) -> Result<f64> {
    let value = match raw {
        RawAmount::Number(n) => *n,
        RawAmount::Text(text) => {
            let cleaned = text.replace(',', "");
            let captures = amount_regex().captures(&cleaned).ok_or_else(|| {
                CatalogError::invalid_record(id, format!("unparseable amount '{}'", text))
            })?;
            captures[1].parse::<f64>().map_err(|e| {
                CatalogError::invalid_record(id, format!("unparseable amount '{}': {}", text, e))
            })?
        }
    };

    if !value.is_finite() || value < 0.0 {
        return Err(CatalogError::invalid_record(
            id,
            format!("amount must be non-negative, got {}", value),
        ));
    }
    Ok(value)
}

/// Parse a timestamp: epoch seconds, RFC 3339, `YYYY-MM-DD` or `DD-MM-YYYY`
pub fn parse_date(id: &str, raw: &RawDate) -> Result<DateTime<Utc>> {
    match raw {
        RawDate::Epoch(secs) => DateTime::from_timestamp(*secs, 0)
            .ok_or_else(|| CatalogError::invalid_record(id, format!("epoch {} out of range", secs))),
        RawDate::Text(text) => {
            let text = text.trim();
            if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
                return Ok(dt.with_timezone(&Utc));
            }
            parse_calendar_date(text)
                .and_then(|date| date.and_hms_opt(0, 0, 0))
                .map(|midnight| midnight.and_utc())
                .ok_or_else(|| {
                    CatalogError::invalid_record(id, format!("unrecognized date '{}'", text))
                })
        }
    }
}

/// Parse a date without a time of day: `YYYY-MM-DD` or `DD-MM-YYYY`
pub fn parse_calendar_date(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    ["%Y-%m-%d", "%d-%m-%Y"]
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
}

fn optional_date(id: &str, raw: Option<&RawDate>) -> Result<DateTime<Utc>> {
    match raw {
        Some(raw) => parse_date(id, raw),
        None => {
            tracing::debug!("Record {} has no timestamp, using epoch", id);
            Ok(DateTime::<Utc>::default())
        }
    }
}
