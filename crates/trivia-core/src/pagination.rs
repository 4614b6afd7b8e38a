//! Fixed-size, 1-indexed pagination over an already-materialised result set.
//!
//! Slicing happens in memory after the full query result has been fetched.
//! The store never sees an offset or limit.

use std::num::IntErrorKind;

/// Number of questions on one page.
pub const QUESTIONS_PER_PAGE: usize = 10;

/// Return page `page` of `items`, clamped to the bounds of the slice.
///
/// Page numbers start at 1. Page 0, a page past the end, and an empty input
/// all yield an empty slice; callers treat that as "not found".
pub fn paginate<T>(items: &[T], page: u32) -> &[T] {
  paginate_with(items, page, QUESTIONS_PER_PAGE)
}

/// [`paginate`] with an explicit page size.
pub fn paginate_with<T>(items: &[T], page: u32, per_page: usize) -> &[T] {
  let Some(index) = (page as usize).checked_sub(1) else {
    return &[];
  };
  let start = index.saturating_mul(per_page).min(items.len());
  let end = start.saturating_add(per_page).min(items.len());
  &items[start..end]
}

/// Parse a raw `page` query value. Missing or non-numeric input falls back to
/// the first page; a number too large for `u32` saturates so it still lands
/// past the end.
pub fn parse_page(raw: Option<&str>) -> u32 {
  let Some(raw) = raw else { return 1 };
  match raw.trim().parse::<u32>() {
    Ok(page) => page,
    Err(e) if *e.kind() == IntErrorKind::PosOverflow => u32::MAX,
    Err(_) => 1,
  }
}
