//! Fixed-size pages over the visible records. Pages are 1-based.

/// Rows per table page.
pub const PAGE_SIZE: usize = 10;

/// Number of pages needed for `len` items. Zero items means zero pages.
pub fn page_count(len: usize, page_size: usize) -> usize {
  len.div_ceil(page_size.max(1))
}

/// One page of a longer sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
  pub items:       Vec<T>,
  /// The 1-based page number that was requested.
  pub number:      usize,
  pub total_pages: usize,
  pub total_items: usize,
}

impl<T> Page<T> {
  pub fn has_prev(&self) -> bool { self.number > 1 }

  pub fn has_next(&self) -> bool { self.number < self.total_pages }
}

/// Slice out page `page` of `items`. A page number past the end yields an
/// empty page; page `0` is treated as page `1`.
pub fn paginate<T: Clone>(items: &[T], page: usize, page_size: usize) -> Page<T> {
  let page_size = page_size.max(1);
  let number = page.max(1);
  let start = (number - 1).saturating_mul(page_size);
  Page {
    items: items.iter().skip(start).take(page_size).cloned().collect(),
    number,
    total_pages: page_count(items.len(), page_size),
    total_items: items.len(),
  }
}
