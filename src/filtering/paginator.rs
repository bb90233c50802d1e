// Paginator: 1-indexed fixed-size pages with clamped navigation
use crate::error::{CatalogError, Result};
use crate::filtering::types::Page;

/// Number of pages needed for `total_items`, never less than 1
pub fn total_pages(total_items: usize, page_size: usize) -> usize {
    total_items.div_ceil(page_size).max(1)
}

/// Cut page `page_number` of size `page_size` out of `items`
///
/// Out-of-range page numbers clamp to the first or last page instead of
/// failing, matching disabled navigation buttons. A zero page size is a
/// caller bug and fails with `InvalidArgument`.
///
/// # Returns
/// A page owning clones of the selected items
pub fn paginate<T: Clone>(items: &[T], page_number: usize, page_size: usize) -> Result<Page<T>> {
    if page_size == 0 {
        return Err(CatalogError::invalid_argument(
            "page_size",
            "page size must be greater than 0",
        ));
    }

    let total_items = items.len();
    let total_pages = total_pages(total_items, page_size);
    let page_number = page_number.clamp(1, total_pages);

    let start = (page_number - 1) * page_size;
    let end = (start + page_size).min(total_items);
    let page_items = items[start..end].to_vec();

    Ok(Page {
        items: page_items,
        page_number,
        page_size,
        total_items,
        total_pages,
        has_next: page_number < total_pages,
        has_previous: page_number > 1,
    })
}
