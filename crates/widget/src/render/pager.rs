//! Pagination arithmetic.

use std::ops::RangeInclusive;

/// Page-number buttons shown at most.
pub const WINDOW_SIZE: u32 = 7;

/// Page numbers to show around `page`.
///
/// The window is centered on the current page, clamped to `1..=pages`, and
/// re-anchored at the edges so it always holds `min(size, pages)` pages.
/// A page outside `1..=pages` is treated as the nearest valid page.
pub fn page_window(page: u32, pages: u32, size: u32) -> RangeInclusive<u32> {
    if pages == 0 || size == 0 {
        return 1..=0;
    }
    let page = page.clamp(1, pages);
    let half = size / 2;

    let mut start = page.saturating_sub(half).max(1);
    let mut end = page.saturating_add(half).min(pages);
    if end - start < size - 1 {
        start = end.saturating_sub(size - 1).max(1);
        end = start.saturating_add(size - 1).min(pages);
    }
    start..=end
}

/// First and last 1-indexed positions shown on a page.
///
/// `(0, 0)` when nothing matched or the page lies past the last result.
pub fn count_range(total: u64, per_page: u32, page: u32) -> (u64, u64) {
    if total == 0 || per_page == 0 || page == 0 {
        return (0, 0);
    }
    let per_page = u64::from(per_page);
    let start = per_page * u64::from(page - 1) + 1;
    let end = total.min(per_page * u64::from(page));
    if start > end { (0, 0) } else { (start, end) }
}

/// The count line, e.g. `Showing 13–24 of 25`.
pub fn count_line(total: u64, per_page: u32, page: u32) -> String {
    let (start, end) = count_range(total, per_page, page);
    format!("Showing {start}\u{2013}{end} of {total}")
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn window_is_centered() {
        assert_eq!(page_window(10, 20, 7), 7..=13);
    }

    #[test]
    fn window_reanchors_at_edges() {
        assert_eq!(page_window(1, 20, 7), 1..=7);
        assert_eq!(page_window(2, 20, 7), 1..=7);
        assert_eq!(page_window(20, 20, 7), 14..=20);
        assert_eq!(page_window(18, 20, 7), 14..=20);
    }

    #[test]
    fn window_shrinks_to_page_count() {
        assert_eq!(page_window(2, 3, 7), 1..=3);
        assert_eq!(page_window(1, 1, 7), 1..=1);
        assert!(page_window(1, 0, 7).is_empty());
    }

    #[test]
    fn window_size_and_membership_hold_everywhere() {
        for pages in 1..=30u32 {
            for page in 1..=pages {
                let window = page_window(page, pages, WINDOW_SIZE);
                let len = window.end() - window.start() + 1;
                assert_eq!(len, WINDOW_SIZE.min(pages), "page {page} of {pages}");
                assert!(window.contains(&page), "page {page} of {pages}");
                assert!(*window.start() >= 1 && *window.end() <= pages);
            }
        }
    }

    #[test]
    fn count_range_scenarios() {
        assert_eq!(count_range(25, 12, 2), (13, 24));
        assert_eq!(count_range(25, 12, 3), (25, 25));
        assert_eq!(count_range(0, 12, 1), (0, 0));
        assert_eq!(count_range(5, 12, 4), (0, 0));
    }

    #[test]
    fn count_range_is_ordered_for_valid_pages() {
        for total in 1..=40u64 {
            for per_page in 1..=13u32 {
                let pages = total.div_ceil(u64::from(per_page)) as u32;
                for page in 1..=pages {
                    let (start, end) = count_range(total, per_page, page);
                    assert_eq!(start, u64::from(per_page) * u64::from(page - 1) + 1);
                    assert_eq!(end, total.min(u64::from(per_page) * u64::from(page)));
                    assert!(end >= start);
                }
            }
        }
    }

    #[test]
    fn count_line_uses_en_dash() {
        assert_eq!(count_line(25, 12, 2), "Showing 13\u{2013}24 of 25");
        assert_eq!(count_line(0, 12, 1), "Showing 0\u{2013}0 of 0");
    }
}
