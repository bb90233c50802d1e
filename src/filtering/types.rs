// Shared value types for the catalog pipeline
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Sentinel category meaning "no category filter"
pub const ALL_CATEGORIES: &str = "All";

/// Inclusive creation-time window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

impl DateRange {
    pub fn new(from: DateTime<Utc>, to: DateTime<Utc>) -> Self {
        Self { from, to }
    }

    /// True when `at` lies within `[from, to]`
    pub fn contains(&self, at: &DateTime<Utc>) -> bool {
        self.from <= *at && *at <= self.to
    }
}

/// Relative windows offered by the order dashboards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DateRangePreset {
    #[default]
    All,
    Today,
    Week,
    Month,
}

impl DateRangePreset {
    /// Parse a dropdown value; anything unrecognized means no window
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "today" => DateRangePreset::Today,
            "week" => DateRangePreset::Week,
            "month" => DateRangePreset::Month,
            _ => DateRangePreset::All,
        }
    }

    /// Resolve to a concrete window ending at `now`
    pub fn resolve(self, now: DateTime<Utc>) -> Option<DateRange> {
        let from = match self {
            DateRangePreset::All => return None,
            DateRangePreset::Today => now
                .date_naive()
                .and_hms_opt(0, 0, 0)
                .map(|midnight| midnight.and_utc())
                .unwrap_or(now),
            DateRangePreset::Week => now - Duration::days(7),
            DateRangePreset::Month => now - Duration::days(30),
        };
        Some(DateRange::new(from, now))
    }
}

/// User-selected filters for one pipeline run
///
/// Built fresh from UI state on each interaction. The `with_*` methods
/// consume and return a new value; nothing is patched in place.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCriteria {
    pub category: Option<String>,
    pub sizes: BTreeSet<String>,
    pub colors: BTreeSet<String>,
    pub price_min: f64,
    pub price_max: f64,
    pub status: Option<String>,
    pub date_range: Option<DateRange>,
    pub search_text: String,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            category: None,
            sizes: BTreeSet::new(),
            colors: BTreeSet::new(),
            price_min: 0.0,
            price_max: f64::INFINITY,
            status: None,
            date_range: None,
            search_text: String::new(),
        }
    }
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_category(self, category: impl Into<String>) -> Self {
        Self {
            category: Some(category.into()),
            ..self
        }
    }

    pub fn with_sizes<I, S>(self, sizes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            sizes: sizes.into_iter().map(Into::into).collect(),
            ..self
        }
    }

    pub fn with_colors<I, S>(self, colors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            colors: colors.into_iter().map(Into::into).collect(),
            ..self
        }
    }

    pub fn with_price_range(self, price_min: f64, price_max: f64) -> Self {
        Self {
            price_min,
            price_max,
            ..self
        }
    }

    pub fn with_status(self, status: impl Into<String>) -> Self {
        Self {
            status: Some(status.into()),
            ..self
        }
    }

    pub fn with_date_range(self, date_range: DateRange) -> Self {
        Self {
            date_range: Some(date_range),
            ..self
        }
    }

    pub fn with_search_text(self, search_text: impl Into<String>) -> Self {
        Self {
            search_text: search_text.into(),
            ..self
        }
    }

    /// Number of filters narrowing the result, for the "(N active filters)" badge
    ///
    /// `price_floor`/`price_ceiling` are the slider bounds; the price range
    /// counts once when it is narrower than them.
    pub fn active_filter_count(&self, price_floor: f64, price_ceiling: f64) -> usize {
        let category = match &self.category {
            Some(c) if !c.eq_ignore_ascii_case(ALL_CATEGORIES) => 1,
            _ => 0,
        };
        let price = usize::from(self.price_min > price_floor || self.price_max < price_ceiling);
        let status = match &self.status {
            Some(s) if !s.eq_ignore_ascii_case("all") => 1,
            _ => 0,
        };

        category
            + self.sizes.len()
            + self.colors.len()
            + price
            + status
            + usize::from(self.date_range.is_some())
            + usize::from(!self.search_text.trim().is_empty())
    }
}

/// Field an ordering is keyed on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    Price,
    Rating,
    Date,
    Popularity,
    Name,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

/// Requested ordering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SortSpec {
    /// Discounted and new items first, otherwise input order
    #[default]
    Featured,
    /// Plain key sort
    By {
        key: SortKey,
        direction: SortDirection,
    },
}

impl SortSpec {
    pub fn by(key: SortKey, direction: SortDirection) -> Self {
        SortSpec::By { key, direction }
    }

    /// Parse a sort dropdown value; unknown values fall back to `Featured`
    pub fn parse(option: &str) -> Self {
        use SortDirection::*;
        use SortKey::*;

        match option.trim().to_lowercase().as_str() {
            "price-low" => Self::by(Price, Asc),
            "price-high" => Self::by(Price, Desc),
            "rating" => Self::by(Rating, Desc),
            "popular" => Self::by(Popularity, Desc),
            "newest" | "recent" => Self::by(Date, Desc),
            "oldest" => Self::by(Date, Asc),
            "name" => Self::by(Name, Asc),
            _ => SortSpec::Featured,
        }
    }

    /// Dropdown value for this ordering, when it has one
    pub fn option_name(&self) -> Option<&'static str> {
        use SortDirection::*;
        use SortKey::*;

        match self {
            SortSpec::Featured => Some("featured"),
            SortSpec::By { key, direction } => match (key, direction) {
                (Price, Asc) => Some("price-low"),
                (Price, Desc) => Some("price-high"),
                (Rating, Desc) => Some("rating"),
                (Popularity, Desc) => Some("popular"),
                (Date, Desc) => Some("newest"),
                (Date, Asc) => Some("oldest"),
                (Name, Asc) => Some("name"),
                _ => None,
            },
        }
    }
}

/// One page of a filtered, sorted sequence
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-indexed, already clamped into range
    pub page_number: usize,
    pub page_size: usize,
    pub total_items: usize,
    /// At least 1, even for an empty result
    pub total_pages: usize,
    pub has_next: bool,
    pub has_previous: bool,
}

/// Statistics from one pipeline run
#[derive(Debug, Clone, Default)]
pub struct PipelineStats {
    /// Items in the source catalog
    pub input_items: usize,
    /// Items surviving the predicate
    pub filtered_items: usize,
    /// Items on the returned page
    pub page_items: usize,
    /// Total processing time in microseconds
    pub processing_time_us: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_sort_option_parsing() {
        assert_eq!(
            SortSpec::parse("price-low"),
            SortSpec::by(SortKey::Price, SortDirection::Asc)
        );
        assert_eq!(
            SortSpec::parse("recent"),
            SortSpec::by(SortKey::Date, SortDirection::Desc)
        );
        assert_eq!(SortSpec::parse("featured"), SortSpec::Featured);
        assert_eq!(SortSpec::parse("bogus"), SortSpec::Featured);
    }

    #[test]
    fn test_option_name_roundtrips_known_options() {
        for option in ["featured", "price-low", "price-high", "rating", "popular", "newest", "name"] {
            assert_eq!(SortSpec::parse(option).option_name(), Some(option));
        }
        assert_eq!(
            SortSpec::by(SortKey::Name, SortDirection::Desc).option_name(),
            None
        );
    }

    #[test]
    fn test_criteria_builders_replace() {
        let base = FilterCriteria::new().with_sizes(["M"]);
        let next = base.clone().with_sizes(["L", "XL"]);
        assert_eq!(base.sizes.len(), 1);
        assert_eq!(next.sizes.len(), 2);
        assert!(!next.sizes.contains("M"));
    }

    #[test]
    fn test_active_filter_count() {
        let criteria = FilterCriteria::new();
        assert_eq!(criteria.active_filter_count(0.0, 200.0), 0);

        let criteria = FilterCriteria::new()
            .with_category("All")
            .with_price_range(0.0, 200.0);
        assert_eq!(criteria.active_filter_count(0.0, 200.0), 0);

        let criteria = FilterCriteria::new()
            .with_category("Jeans")
            .with_sizes(["30", "32"])
            .with_colors(["Blue"])
            .with_price_range(20.0, 200.0)
            .with_search_text("  slim ");
        assert_eq!(criteria.active_filter_count(0.0, 200.0), 6);
    }

    #[test]
    fn test_date_range_inclusive() {
        let from = Utc.with_ymd_and_hms(2025, 10, 1, 0, 0, 0).unwrap();
        let to = Utc.with_ymd_and_hms(2025, 10, 5, 0, 0, 0).unwrap();
        let range = DateRange::new(from, to);
        assert!(range.contains(&from));
        assert!(range.contains(&to));
        assert!(!range.contains(&(to + Duration::seconds(1))));
    }

    #[test]
    fn test_date_preset_resolution() {
        let now = Utc.with_ymd_and_hms(2025, 10, 8, 15, 30, 0).unwrap();
        assert_eq!(DateRangePreset::All.resolve(now), None);

        let today = DateRangePreset::Today.resolve(now).unwrap();
        assert_eq!(today.from, Utc.with_ymd_and_hms(2025, 10, 8, 0, 0, 0).unwrap());
        assert_eq!(today.to, now);

        let week = DateRangePreset::parse("Week").resolve(now).unwrap();
        assert_eq!(week.from, Utc.with_ymd_and_hms(2025, 10, 1, 15, 30, 0).unwrap());
        assert_eq!(DateRangePreset::parse("anything"), DateRangePreset::All);
    }
}
