//! View derivation: filtering and pagination.
//!
//! Pure functions over the store's records. Nothing here is cached; the
//! orchestrator recomputes the view on every render.

use roster_common::Record;

pub use roster_config::DEFAULT_PAGE_SIZE;

/// Records whose id, name, email or role contains `term`, ignoring case.
///
/// An empty term matches everything. Order follows the input.
pub fn filter<'a>(records: &'a [Record], term: &str) -> Vec<&'a Record> {
    if term.is_empty() {
        return records.iter().collect();
    }
    let needle = term.to_lowercase();
    records
        .iter()
        .filter(|r| {
            r.searchable_values()
                .iter()
                .any(|v| v.to_lowercase().contains(&needle))
        })
        .collect()
}

/// The slice of `filtered` shown on 1-based `page`.
///
/// Page 0 and pages past the end yield an empty slice.
pub fn paginate<'r, 'a>(
    filtered: &'r [&'a Record],
    page: usize,
    page_size: usize,
) -> &'r [&'a Record] {
    if page == 0 || page_size == 0 {
        return &[];
    }
    let start = (page - 1).saturating_mul(page_size);
    if start >= filtered.len() {
        return &[];
    }
    let end = start.saturating_add(page_size).min(filtered.len());
    &filtered[start..end]
}

/// Number of pages for `filtered_len` rows; never less than 1.
pub fn page_count(filtered_len: usize, page_size: usize) -> usize {
    if page_size == 0 {
        return 1;
    }
    filtered_len.div_ceil(page_size).max(1)
}

/// Clamp a page number into `1..=page_count`.
pub fn clamp_page(page: usize, page_count: usize) -> usize {
    page.clamp(1, page_count.max(1))
}
