// Catalog pipeline: filter -> sort -> paginate
//
// Filter: predicate built from FilterCriteria, clauses AND-combined
// Sort:   stable comparator built from SortSpec, applied to a borrowed view
// Page:   1-indexed slice with clamped page number

mod comparator;
mod facets;
mod paginator;
mod predicate;
mod types;

pub use comparator::{build_comparator, sorted_view};
pub use facets::{distinct_categories, facet_values, price_bounds, status_counts};
pub use paginator::{paginate, total_pages};
pub use predicate::{
    build_predicate, category_matches, date_in_range, facet_matches, price_in_range,
    status_matches, text_matches,
};
pub use types::{
    DateRange, DateRangePreset, FilterCriteria, Page, PipelineStats, SortDirection, SortKey,
    SortSpec, ALL_CATEGORIES,
};

use crate::catalog::CatalogItem;
use crate::config::PaginationConfig;
use crate::error::{CatalogError, Result};
use std::time::Instant;

/// Run the full pipeline once
///
/// Pure: identical inputs give identical pages and `catalog` is never
/// mutated. Every call recomputes from scratch. A `page_number` past the
/// end clamps to the last page; resetting to page 1 after a filter change
/// is the caller's job.
pub fn run_pipeline(
    catalog: &[CatalogItem],
    criteria: &FilterCriteria,
    sort: &SortSpec,
    page_number: usize,
    page_size: usize,
) -> Result<Page<CatalogItem>> {
    let predicate = build_predicate(criteria);
    let filtered: Vec<&CatalogItem> = catalog.iter().filter(|item| predicate(*item)).collect();
    let sorted = sorted_view(&filtered, sort);
    let page = paginate(&sorted, page_number, page_size)?;

    Ok(Page {
        items: page.items.into_iter().cloned().collect(),
        page_number: page.page_number,
        page_size: page.page_size,
        total_items: page.total_items,
        total_pages: page.total_pages,
        has_next: page.has_next,
        has_previous: page.has_previous,
    })
}

/// Pipeline bound to pagination settings from configuration
pub struct CatalogPipeline {
    pagination: PaginationConfig,
}

impl CatalogPipeline {
    /// Create new pipeline
    ///
    /// # Arguments
    /// * `pagination` - Default and maximum page sizes
    pub fn new(pagination: PaginationConfig) -> Self {
        Self { pagination }
    }

    /// Run the pipeline and report statistics
    ///
    /// # Arguments
    /// * `catalog` - Source items, read-only
    /// * `criteria` - Active filters
    /// * `sort` - Requested ordering
    /// * `page_number` - 1-indexed page, clamped into range
    /// * `page_size` - Page size, `None` for the configured default
    ///
    /// # Returns
    /// Tuple of (page, statistics)
    pub fn run(
        &self,
        catalog: &[CatalogItem],
        criteria: &FilterCriteria,
        sort: &SortSpec,
        page_number: usize,
        page_size: Option<usize>,
    ) -> Result<(Page<CatalogItem>, PipelineStats)> {
        let start = Instant::now();

        let page_size = page_size.unwrap_or(self.pagination.default_page_size);
        if page_size > self.pagination.max_page_size {
            return Err(CatalogError::invalid_argument(
                "page_size",
                format!(
                    "page size {} exceeds maximum of {}",
                    page_size, self.pagination.max_page_size
                ),
            ));
        }

        let page = run_pipeline(catalog, criteria, sort, page_number, page_size)?;

        let stats = PipelineStats {
            input_items: catalog.len(),
            filtered_items: page.total_items,
            page_items: page.items.len(),
            processing_time_us: start.elapsed().as_micros() as u64,
        };

        tracing::debug!(
            input = stats.input_items,
            filtered = stats.filtered_items,
            page = page.page_number,
            total_pages = page.total_pages,
            elapsed_us = stats.processing_time_us,
            "Catalog pipeline run"
        );

        Ok((page, stats))
    }
}
