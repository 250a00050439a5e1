//! Page window construction for paginated listings.
//!
//! Decides which page links a listing renders for a given current page and
//! total item count, and how each link is flagged.

use std::num::NonZeroU64;

use serde::{Deserialize, Serialize};

use crate::errors::PaginationError;

pub const DEFAULT_PAGE_SIZE: u64 = 20;
pub const DEFAULT_PAGE_PADDING: u32 = 4;
pub const DEFAULT_PAGE_PARAM: &str = "_page";

/// Pagination settings shared by every request of a listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationConfig {
    /// Items per page
    pub page_size: NonZeroU64,
    /// Pages shown on each side of the current page
    pub page_padding: u32,
    /// Query parameter carrying the page number
    pub page_param: String,
    /// Pin the first page even when it is outside the window
    pub show_first: bool,
    /// Pin the last page even when it is outside the window
    pub show_last: bool,
}

impl PaginationConfig {
    /// Build a validated config; a zero page size or empty parameter name is rejected.
    pub fn new(
        page_size: u64,
        page_padding: u32,
        page_param: impl Into<String>,
        show_first: bool,
        show_last: bool,
    ) -> Result<Self, PaginationError> {
        let page_size = NonZeroU64::new(page_size).ok_or(PaginationError::InvalidPageSize)?;
        let page_param = page_param.into();
        if page_param.trim().is_empty() {
            return Err(PaginationError::EmptyPageParam);
        }
        Ok(Self { page_size, page_padding, page_param, show_first, show_last })
    }
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            page_size: NonZeroU64::new(DEFAULT_PAGE_SIZE).unwrap_or(NonZeroU64::MIN),
            page_padding: DEFAULT_PAGE_PADDING,
            page_param: DEFAULT_PAGE_PARAM.to_string(),
            show_first: true,
            show_last: true,
        }
    }
}

/// One rendered page number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageLink {
    pub page: i64,
    pub current: bool,
    pub first: bool,
    pub last: bool,
}

impl PageLink {
    fn plain(page: i64) -> Self {
        Self { page, current: false, first: false, last: false }
    }

    fn current(page: i64) -> Self {
        Self { current: true, ..Self::plain(page) }
    }

    fn first(page: i64) -> Self {
        Self { first: true, ..Self::plain(page) }
    }

    fn last(page: i64) -> Self {
        Self { last: true, ..Self::plain(page) }
    }

    /// A window member carrying no flag
    pub fn is_plain(&self) -> bool {
        !(self.current || self.first || self.last)
    }
}

/// Pagination result handed to a renderer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    /// Current page as requested, not clamped
    pub page: i64,
    /// Total item count
    pub total: u64,
    /// Request URI without the page parameter
    pub uri: String,
    pub page_links: Vec<PageLink>,
}

/// Number of pages needed to hold `total_items`.
pub fn total_pages(total_items: u64, page_size: NonZeroU64) -> i64 {
    i64::try_from(total_items.div_ceil(page_size.get())).unwrap_or(i64::MAX)
}

/// Sliding range of pages always shown around the current page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Window {
    pub min: i64,
    pub max: i64,
}

impl Window {
    /// Left padding that would fall before page 1 is moved to the right side.
    pub fn around(current: i64, padding: u32) -> Self {
        let padding = i64::from(padding);
        let mut min = current.saturating_sub(padding);
        let mut extra_max = 0;
        if min < 1 {
            extra_max = 1i64.saturating_sub(min);
            min = 1;
        }
        let max = current.saturating_add(padding).saturating_add(extra_max);
        Self { min, max }
    }

    pub fn contains(&self, page: i64) -> bool {
        (self.min..=self.max).contains(&page)
    }
}

/// Compute the ordered page links for `current` out of `total_items`.
///
/// Pages in the window are plain links. The first or last page is pinned
/// with its flag when configured, unless it sits exactly one page past the
/// window edge, in which case it joins the window as a plain link.
pub fn build_page_links(current: i64, total_items: u64, config: &PaginationConfig) -> Vec<PageLink> {
    let total_pages = total_pages(total_items, config.page_size);
    if total_pages < 1 {
        return Vec::new();
    }

    let window = Window::around(current, config.page_padding);
    let padding = i64::from(config.page_padding);
    let bridges_first = current.saturating_sub(padding).saturating_sub(1) == 1;
    let bridges_last = current.saturating_add(padding).saturating_add(1) == total_pages;

    let classify = |p: i64| -> Option<PageLink> {
        if p == current {
            Some(PageLink::current(p))
        } else if window.contains(p)
            || (p == 1 && bridges_first)
            || (p == total_pages && bridges_last)
        {
            Some(PageLink::plain(p))
        } else if p == 1 && config.show_first {
            Some(PageLink::first(p))
        } else if p == total_pages && config.show_last {
            Some(PageLink::last(p))
        } else {
            None
        }
    };

    // Only page 1, the window interior and the last page can produce a link.
    let inner = window.min.max(2)..=window.max.min(total_pages - 1);
    std::iter::once(1)
        .chain(inner)
        .chain((total_pages > 1).then_some(total_pages))
        .filter_map(classify)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn conf() -> PaginationConfig {
        PaginationConfig::new(20, 3, "_page", true, true).expect("valid config")
    }

    fn pages(links: &[PageLink]) -> Vec<i64> {
        links.iter().map(|l| l.page).collect()
    }

    #[test]
    fn new_rejects_zero_page_size() {
        let err = PaginationConfig::new(0, 3, "_page", true, true).unwrap_err();
        assert!(matches!(err, PaginationError::InvalidPageSize));
    }

    #[test]
    fn new_rejects_blank_page_param() {
        let err = PaginationConfig::new(20, 3, "  ", true, true).unwrap_err();
        assert!(matches!(err, PaginationError::EmptyPageParam));
    }

    #[test]
    fn default_values_are_sane() {
        let d = PaginationConfig::default();
        assert_eq!(d.page_size.get(), 20);
        assert_eq!(d.page_padding, 4);
        assert_eq!(d.page_param, "_page");
        assert!(d.show_first && d.show_last);
    }

    #[test]
    fn total_pages_rounds_up_partial_pages() {
        let size = NonZeroU64::new(20).unwrap();
        assert_eq!(total_pages(0, size), 0);
        assert_eq!(total_pages(1, size), 1);
        assert_eq!(total_pages(200, size), 10);
        assert_eq!(total_pages(201, size), 11);
        assert_eq!(total_pages(u64::MAX, NonZeroU64::MIN), i64::MAX);
    }

    #[test]
    fn window_moves_unused_left_padding_right() {
        assert_eq!(Window::around(1, 3), Window { min: 1, max: 7 });
        assert_eq!(Window::around(3, 3), Window { min: 1, max: 7 });
        assert_eq!(Window::around(4, 3), Window { min: 1, max: 7 });
        assert_eq!(Window::around(6, 3), Window { min: 3, max: 9 });
    }

    #[test]
    fn window_saturates_on_extreme_pages() {
        let w = Window::around(i64::MIN, u32::MAX);
        assert_eq!(w.min, 1);
        let w = Window::around(i64::MAX, u32::MAX);
        assert_eq!(w.max, i64::MAX);
    }

    #[test]
    fn length_with_first_bridge_and_pinned_last() {
        let c = conf();
        let links = build_page_links(5, 220, &c);
        assert_eq!(links.len(), c.page_padding as usize * 2 + 3);
        assert_eq!(pages(&links), vec![1, 2, 3, 4, 5, 6, 7, 8, 11]);
        assert!(links[0].is_plain(), "page 1 joins the window: {:?}", links[0]);
        assert!(links[8].last);
    }

    #[test]
    fn length_near_start_pins_only_last() {
        let c = conf();
        let links = build_page_links(3, 200, &c);
        assert_eq!(links.len(), c.page_padding as usize * 2 + 2);
        assert_eq!(pages(&links), vec![1, 2, 3, 4, 5, 6, 7, 10]);
        assert!(links[7].last);
    }

    #[test]
    fn middle_page_pins_first_and_last() {
        let links = build_page_links(6, 220, &conf());
        assert_eq!(pages(&links), vec![1, 3, 4, 5, 6, 7, 8, 9, 11]);
        assert!(links[0].first && !links[0].current);
        assert!(links[4].current);
        assert!(links[8].last && !links[8].current);
        assert!(links[1..8].iter().filter(|l| !l.current).all(PageLink::is_plain));
    }

    #[test]
    fn first_page_is_current_not_first() {
        let links = build_page_links(1, 200, &conf());
        assert_eq!(pages(&links), vec![1, 2, 3, 4, 5, 6, 7, 10]);
        assert_eq!(links[0], PageLink::current(1));
        assert!(links[7].last);
    }

    #[test]
    fn last_page_joins_window_when_one_page_away() {
        let links = build_page_links(6, 200, &conf());
        assert_eq!(pages(&links), vec![1, 3, 4, 5, 6, 7, 8, 9, 10]);
        assert_eq!(links[8], PageLink::plain(10));
    }

    #[test]
    fn last_page_is_current_not_last() {
        let links = build_page_links(10, 200, &conf());
        assert_eq!(pages(&links), vec![1, 7, 8, 9, 10]);
        assert!(links[0].first);
        assert_eq!(links[4], PageLink::current(10));
    }

    #[test]
    fn partial_trailing_page_gets_a_link() {
        let links = build_page_links(11, 201, &conf());
        assert_eq!(pages(&links), vec![1, 8, 9, 10, 11]);
        assert!(links[4].current);
    }

    #[test]
    fn pins_are_omitted_when_disabled() {
        let c = PaginationConfig::new(20, 3, "_page", false, false).unwrap();
        let links = build_page_links(6, 220, &c);
        assert_eq!(pages(&links), vec![3, 4, 5, 6, 7, 8, 9]);
    }

    #[test]
    fn out_of_range_current_has_no_current_link() {
        let c = conf();
        let links = build_page_links(50, 200, &c);
        assert_eq!(links, vec![PageLink::first(1), PageLink::last(10)]);

        let links = build_page_links(0, 200, &c);
        assert_eq!(pages(&links), vec![1, 2, 3, 4, 5, 6, 7, 10]);
        assert!(links.iter().all(|l| !l.current));

        let links = build_page_links(-7, 200, &c);
        assert!(links.iter().all(|l| !l.current));
    }

    #[test]
    fn empty_listing_has_no_links() {
        assert!(build_page_links(1, 0, &conf()).is_empty());
    }

    #[test]
    fn single_page_listing() {
        assert_eq!(build_page_links(1, 5, &conf()), vec![PageLink::current(1)]);
        assert_eq!(build_page_links(2, 5, &conf()), vec![PageLink::plain(1)]);
    }

    #[test]
    fn zero_padding_shows_only_current_and_pins() {
        let c = PaginationConfig::new(10, 0, "_page", true, true).unwrap();
        let links = build_page_links(5, 100, &c);
        assert_eq!(pages(&links), vec![1, 5, 10]);
        assert!(links[0].first && links[1].current && links[2].last);
    }

    #[test]
    fn links_are_ascending_unique_and_in_range() {
        let c = conf();
        for total in [0u64, 1, 19, 20, 21, 60, 200, 220, 999] {
            let total_pages = total_pages(total, c.page_size);
            for current in -3..=total_pages + 3 {
                let links = build_page_links(current, total, &c);
                assert!(links.windows(2).all(|w| w[0].page < w[1].page), "{current}/{total}: {links:?}");
                assert!(links.iter().all(|l| (1..=total_pages).contains(&l.page)));

                let currents = links.iter().filter(|l| l.current).count();
                let expected = usize::from((1..=total_pages).contains(&current));
                assert_eq!(currents, expected, "{current}/{total}");

                for l in &links {
                    if l.first {
                        assert!(l.page == 1 && !l.current && !l.last);
                    }
                    if l.last {
                        assert!(l.page == total_pages && !l.current && !l.first);
                    }
                }
            }
        }
    }

    #[test]
    fn window_far_from_edges_has_twice_padding_plain_links() {
        let total = 1000;
        for padding in 0..5u32 {
            let c = PaginationConfig::new(10, padding, "_page", true, true).unwrap();
            let total_pages = total_pages(total, c.page_size);
            let pad = i64::from(padding);
            for current in 1..=total_pages {
                if pad < current - 2 && current + pad + 1 < total_pages {
                    let plain = build_page_links(current, total, &c)
                        .iter()
                        .filter(|l| l.is_plain())
                        .count();
                    assert_eq!(plain, 2 * padding as usize, "current {current}, padding {padding}");
                }
            }
        }
    }

    #[test]
    fn page_serializes_with_snake_case_fields() {
        let page = Page {
            page: 1,
            total: 30,
            uri: "/home?".into(),
            page_links: build_page_links(1, 30, &conf()),
        };
        let v = serde_json::to_value(&page).unwrap();
        assert_eq!(v["uri"], "/home?");
        assert_eq!(v["page_links"][0]["current"], true);
        assert_eq!(v["page_links"][1]["page"], 2);
    }

    #[test]
    fn repeated_calls_are_identical() {
        let c = conf();
        assert_eq!(build_page_links(6, 220, &c), build_page_links(6, 220, &c));
    }
}
