//! Page/limit defaults, bounds, and the page-window arithmetic.

use std::ops::Range;

pub const DEFAULT_PAGE: u32 = 1;
pub const DEFAULT_LIMIT: u32 = 100;
pub const MIN_LIMIT: u32 = 1;
pub const MAX_LIMIT: u32 = 1000;

pub fn min_limit_message() -> String {
    format!("Limit must be at least {MIN_LIMIT}")
}

pub fn max_limit_message() -> String {
    format!("Limit cannot exceed {MAX_LIMIT}")
}

/// Index range of `page` (1-based) within `total` rows.
///
/// Pages past the end yield an empty range rather than an error. `page` and
/// `limit` are expected to be validated (both >= 1).
pub fn page_window(total: usize, page: u32, limit: u32) -> Range<usize> {
    let start = (page.saturating_sub(1) as usize).saturating_mul(limit as usize);
    if start >= total {
        return total..total;
    }
    let end = start.saturating_add(limit as usize).min(total);
    start..end
}
