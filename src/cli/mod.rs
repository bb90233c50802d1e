//! CLI command definitions and parsing
use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::catalog::{parse_calendar_date, parse_date, RawDate};
use crate::error::Result;
use crate::filtering::{DateRange, DateRangePreset, FilterCriteria};

#[derive(Parser, Debug)]
#[command(
    name = "catalog",
    version,
    author = "neur0map",
    about = "Filter, sort and paginate storefront catalogs",
    long_about = "Loads a product/order/wishlist snapshot exported from the storefront backend \
                  and runs it through the same filter, sort and pagination pipeline the shop, \
                  wishlist and admin order pages use."
)]
pub struct Cli {
    /// Global config file path (defaults to ~/.config/storefront-catalog/config.toml)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Configuration profile to apply (e.g., "admin", "wishlist")
    #[arg(short, long, global = true)]
    pub profile: Option<String>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Filter options shared by listing commands
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Category to keep ("All" for every category)
    #[arg(long)]
    pub category: Option<String>,

    /// Size facet values, repeatable (any match keeps the item)
    #[arg(long = "size", value_name = "SIZE")]
    pub sizes: Vec<String>,

    /// Color facet values, repeatable (any match keeps the item)
    #[arg(long = "color", value_name = "COLOR")]
    pub colors: Vec<String>,

    /// Lowest effective price
    #[arg(long)]
    pub min_price: Option<f64>,

    /// Highest effective price
    #[arg(long)]
    pub max_price: Option<f64>,

    /// Status to keep ("all" for every status)
    #[arg(long)]
    pub status: Option<String>,

    /// Relative date window
    #[arg(long, value_parser = ["all", "today", "week", "month"])]
    pub range: Option<String>,

    /// Earliest creation date (RFC 3339, YYYY-MM-DD or DD-MM-YYYY)
    #[arg(long)]
    pub from: Option<String>,

    /// Latest creation date, inclusive
    #[arg(long)]
    pub to: Option<String>,

    /// Free-text search over name, description and customer
    #[arg(short, long)]
    pub search: Option<String>,
}

impl FilterArgs {
    /// Build filter criteria; options left out do not narrow the result
    ///
    /// An explicit `--from`/`--to` wins over `--range`. A date-only `--to`
    /// covers that whole day.
    pub fn to_criteria(&self, now: DateTime<Utc>) -> Result<FilterCriteria> {
        let unbounded = FilterCriteria::default();
        let mut criteria = FilterCriteria::new()
            .with_sizes(self.sizes.iter().cloned())
            .with_colors(self.colors.iter().cloned())
            .with_price_range(
                self.min_price.unwrap_or(unbounded.price_min),
                self.max_price.unwrap_or(unbounded.price_max),
            )
            .with_search_text(self.search.clone().unwrap_or_default());

        if let Some(category) = &self.category {
            criteria = criteria.with_category(category.clone());
        }
        if let Some(status) = &self.status {
            criteria = criteria.with_status(status.clone());
        }

        let preset = self
            .range
            .as_deref()
            .map(DateRangePreset::parse)
            .and_then(|p| p.resolve(now));

        let explicit = match (&self.from, &self.to) {
            (None, None) => None,
            (from, to) => {
                let from = match from {
                    Some(text) => parse_date("--from", &RawDate::Text(text.clone()))?,
                    None => DateTime::<Utc>::default(),
                };
                let to = match to {
                    Some(text) => parse_upper_bound(text)?,
                    None => now,
                };
                Some(DateRange::new(from, to))
            }
        };

        if let Some(range) = explicit.or(preset) {
            criteria = criteria.with_date_range(range);
        }

        Ok(criteria)
    }
}

/// Parse `--to`; a plain calendar date means the last second of that day
fn parse_upper_bound(text: &str) -> Result<DateTime<Utc>> {
    match parse_calendar_date(text).and_then(|date| date.and_hms_opt(23, 59, 59)) {
        Some(end_of_day) => Ok(end_of_day.and_utc()),
        None => parse_date("--to", &RawDate::Text(text.to_string())),
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print one page of a filtered, sorted catalog
    Query {
        /// Catalog snapshot (JSON)
        #[arg(long, value_name = "FILE")]
        catalog: PathBuf,

        #[command(flatten)]
        filters: FilterArgs,

        /// Sort option: featured, price-low, price-high, rating, popular, newest, name
        #[arg(long)]
        sort: Option<String>,

        /// Page number (1-indexed)
        #[arg(long, default_value = "1")]
        page: usize,

        /// Items per page (defaults to config)
        #[arg(long)]
        page_size: Option<usize>,

        /// Show results in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Show available filter values and status counts
    Facets {
        /// Catalog snapshot (JSON)
        #[arg(long, value_name = "FILE")]
        catalog: PathBuf,
    },

    /// Export every matching item (not just one page)
    Export {
        /// Catalog snapshot (JSON)
        #[arg(long, value_name = "FILE")]
        catalog: PathBuf,

        #[command(flatten)]
        filters: FilterArgs,

        /// Sort option applied before export
        #[arg(long)]
        sort: Option<String>,

        /// Export format (defaults to config)
        #[arg(short, long, value_parser = ["csv", "json"])]
        format: Option<String>,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Validate configuration file
    Validate {
        /// Path to config file (defaults to standard location)
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Initialize default configuration
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

impl Cli {
    /// Parse CLI arguments from command line
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_query_args() {
        let cli = Cli::try_parse_from([
            "catalog",
            "query",
            "--catalog",
            "shop.json",
            "--size",
            "M",
            "--size",
            "L",
            "--max-price",
            "90",
            "--sort",
            "price-low",
            "--page",
            "2",
        ])
        .unwrap();

        match cli.command {
            Commands::Query {
                filters, sort, page, ..
            } => {
                assert_eq!(filters.sizes, vec!["M", "L"]);
                assert_eq!(filters.max_price, Some(90.0));
                assert_eq!(sort.as_deref(), Some("price-low"));
                assert_eq!(page, 2);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_criteria_without_price_options_is_unbounded() {
        use crate::filtering::run_pipeline;
        use crate::{CatalogItem, SortSpec};
        use chrono::TimeZone;

        let at = Utc.with_ymd_and_hms(2025, 10, 1, 0, 0, 0).unwrap();
        let orders = vec![
            CatalogItem::new("CUST001", "Yassmin Ahmed", "Women Item", 99.99, at),
            CatalogItem::new("CUST003", "Ramy Kamal", "Women Item", 299.99, at),
        ];

        let criteria = FilterArgs::default().to_criteria(Utc::now()).unwrap();
        let page = run_pipeline(&orders, &criteria, &SortSpec::Featured, 1, 10).unwrap();

        assert_eq!(page.total_items, 2);
        assert_eq!(criteria.active_filter_count(0.0, 200.0), 0);
    }

    #[test]
    fn test_criteria_explicit_price_bounds() {
        let args = FilterArgs {
            category: Some("Jeans".to_string()),
            colors: vec!["Blue".to_string()],
            max_price: Some(90.0),
            ..Default::default()
        };
        let criteria = args.to_criteria(Utc::now()).unwrap();

        assert_eq!(criteria.price_min, 0.0);
        assert_eq!(criteria.price_max, 90.0);
        assert_eq!(criteria.category.as_deref(), Some("Jeans"));
        assert!(criteria.colors.contains("Blue"));
        assert!(criteria.date_range.is_none());
    }

    #[test]
    fn test_criteria_date_only_to_is_inclusive() {
        use chrono::TimeZone;

        let args = FilterArgs {
            from: Some("01-10-2025".to_string()),
            to: Some("2025-10-05".to_string()),
            range: Some("week".to_string()),
            ..Default::default()
        };
        let criteria = args.to_criteria(Utc::now()).unwrap();
        let range = criteria.date_range.unwrap();

        assert_eq!(range.from, Utc.with_ymd_and_hms(2025, 10, 1, 0, 0, 0).unwrap());
        assert_eq!(range.to, Utc.with_ymd_and_hms(2025, 10, 5, 23, 59, 59).unwrap());
    }

    #[test]
    fn test_criteria_timestamp_to_is_exact() {
        use chrono::TimeZone;

        let expected = Utc.with_ymd_and_hms(2025, 10, 5, 10, 0, 0).unwrap();
        for to in ["2025-10-05T10:00:00Z", "2025-10-05 10:00:00Z", "2025-10-05t10:00:00Z"] {
            let args = FilterArgs {
                to: Some(to.to_string()),
                ..Default::default()
            };
            let range = args.to_criteria(Utc::now()).unwrap().date_range.unwrap();
            assert_eq!(range.to, expected, "--to {}", to);
        }
    }

    #[test]
    fn test_criteria_bad_date() {
        let args = FilterArgs {
            from: Some("last tuesday".to_string()),
            ..Default::default()
        };
        assert!(args.to_criteria(Utc::now()).is_err());
    }
}
