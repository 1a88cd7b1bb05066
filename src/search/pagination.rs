//! Paging arithmetic for a single stage.
//!
//! Termination depends only on the counts, never on seeing an empty page, so
//! a total that is an exact multiple of the page size does not cost an extra
//! call.

/// Whether another page remains after `pages_fetched` pages.
pub fn has_more_pages(page_size: u32, total_results: u32, pages_fetched: u32) -> bool {
    u64::from(pages_fetched) * u64::from(page_size) < u64::from(total_results)
}

/// `startFrom` offset of the zero-based page `page_index`.
pub fn offset_for(page_index: u32, page_size: u32) -> u32 {
    page_index.saturating_mul(page_size)
}
