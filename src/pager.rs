//! Client-side pagination over an already-filtered list.
//!
//! `PageState` never points outside `[1, total_pages]`: out-of-range page
//! requests are rejected as no-ops, and shrinking the item count clamps the
//! current page.

use std::ops::{Range, RangeInclusive};

pub const DEFAULT_PAGE_SIZE: usize = 6;
pub const DEFAULT_PAGE_WINDOW: usize = 5;

/// `max(1, ceil(count / page_size))`. A zero page size counts as one.
pub fn total_pages(count: usize, page_size: usize) -> usize {
    count.div_ceil(page_size.max(1)).max(1)
}

/// Page numbers to show as buttons.
///
/// With more than `width` pages, a `width`-sized window centred on `current`
/// and clamped to `[1, total]`.
pub fn page_window(current: usize, total: usize, width: usize) -> RangeInclusive<usize> {
    let total = total.max(1);
    let width = width.max(1);
    if total <= width {
        return 1..=total;
    }
    let current = current.clamp(1, total);
    let start = current
        .saturating_sub(width / 2)
        .max(1)
        .min(total - width + 1);
    start..=start + width - 1
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PageState {
    current: usize,
    page_size: usize,
    total_items: usize,
}

impl PageState {
    pub fn new(page_size: usize) -> Self {
        Self {
            current: 1,
            page_size: page_size.max(1),
            total_items: 0,
        }
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn total_pages(&self) -> usize {
        total_pages(self.total_items, self.page_size)
    }

    /// Record a new item count and clamp the current page into range.
    pub fn set_total_items(&mut self, total_items: usize) {
        self.total_items = total_items;
        self.current = self.current.clamp(1, self.total_pages());
    }

    pub fn reset(&mut self) {
        self.current = 1;
    }

    /// Move to `page` if it exists. Returns false (and changes nothing) otherwise.
    pub fn go_to(&mut self, page: usize) -> bool {
        if (1..=self.total_pages()).contains(&page) {
            self.current = page;
            true
        } else {
            false
        }
    }

    pub fn next(&mut self) -> bool {
        self.go_to(self.current + 1)
    }

    pub fn prev(&mut self) -> bool {
        self.current > 1 && self.go_to(self.current - 1)
    }

    pub fn first(&mut self) -> bool {
        self.go_to(1)
    }

    pub fn last(&mut self) -> bool {
        self.go_to(self.total_pages())
    }

    /// "Previous" control is enabled.
    pub fn has_prev(&self) -> bool {
        self.current > 1
    }

    /// "Next" control is enabled.
    pub fn has_next(&self) -> bool {
        self.current < self.total_pages()
    }

    /// Index range of the current page within the filtered list.
    pub fn bounds(&self) -> Range<usize> {
        let start = ((self.current - 1) * self.page_size).min(self.total_items);
        let end = (start + self.page_size).min(self.total_items);
        start..end
    }

    /// The current page's items. Tolerates `items` being shorter than
    /// `total_items`.
    pub fn slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let Range { start, end } = self.bounds();
        let end = end.min(items.len());
        &items[start.min(end)..end]
    }

    pub fn window(&self, width: usize) -> RangeInclusive<usize> {
        page_window(self.current, self.total_pages(), width)
    }

    /// "Showing 7 to 11 of 11 users", or `None` when there is nothing to show.
    pub fn summary(&self) -> Option<String> {
        if self.total_items == 0 {
            return None;
        }
        let Range { start, end } = self.bounds();
        Some(format!(
            "Showing {} to {} of {} users",
            start + 1,
            end,
            self.total_items
        ))
    }
}

impl Default for PageState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_pages_never_drops_below_one() {
        assert_eq!(total_pages(0, 6), 1);
        assert_eq!(total_pages(1, 6), 1);
        assert_eq!(total_pages(6, 6), 1);
        assert_eq!(total_pages(7, 6), 2);
        assert_eq!(total_pages(11, 6), 2);
        assert_eq!(total_pages(13, 6), 3);
        assert_eq!(total_pages(5, 0), 5);
    }

    #[test]
    fn eleven_items_split_six_and_five() {
        let items: Vec<u32> = (1..=11).collect();
        let mut pages = PageState::new(6);
        pages.set_total_items(items.len());
        assert_eq!(pages.total_pages(), 2);
        assert_eq!(pages.slice(&items), &[1, 2, 3, 4, 5, 6]);
        assert!(pages.next());
        assert_eq!(pages.slice(&items), &[7, 8, 9, 10, 11]);
        assert_eq!(pages.summary().as_deref(), Some("Showing 7 to 11 of 11 users"));
    }

    #[test]
    fn pages_cover_the_list_without_gaps_or_overlap() {
        for n in 0..40usize {
            for p in 1..9usize {
                let items: Vec<usize> = (0..n).collect();
                let mut pages = PageState::new(p);
                pages.set_total_items(n);
                let mut seen = Vec::new();
                for page in 1..=pages.total_pages() {
                    assert!(pages.go_to(page));
                    let slice = pages.slice(&items);
                    let expected = p.min(n.saturating_sub((page - 1) * p));
                    assert_eq!(slice.len(), expected);
                    seen.extend_from_slice(slice);
                }
                assert_eq!(seen, items);
            }
        }
    }

    #[test]
    fn out_of_range_requests_are_noops() {
        let mut pages = PageState::new(6);
        pages.set_total_items(11);
        assert!(!pages.go_to(0));
        assert!(!pages.go_to(3));
        assert_eq!(pages.current(), 1);
        assert!(!pages.prev());
        assert!(pages.last());
        assert!(!pages.next());
        assert_eq!(pages.current(), 2);
    }

    #[test]
    fn boundary_controls_disable_exactly_at_the_ends() {
        let mut pages = PageState::new(2);
        pages.set_total_items(6);
        assert!(!pages.has_prev());
        assert!(pages.has_next());
        pages.go_to(2);
        assert!(pages.has_prev() && pages.has_next());
        pages.go_to(3);
        assert!(pages.has_prev());
        assert!(!pages.has_next());
    }

    #[test]
    fn empty_list_is_one_empty_page() {
        let mut pages = PageState::new(6);
        pages.set_total_items(0);
        assert_eq!(pages.total_pages(), 1);
        assert_eq!(pages.current(), 1);
        assert!(pages.slice::<u8>(&[]).is_empty());
        assert!(!pages.has_prev() && !pages.has_next());
        assert_eq!(pages.summary(), None);
    }

    #[test]
    fn shrinking_clamps_current_page() {
        let mut pages = PageState::new(6);
        pages.set_total_items(30);
        pages.go_to(5);
        pages.set_total_items(8);
        assert_eq!(pages.current(), 2);
    }

    #[test]
    fn window_slides_and_clamps() {
        assert_eq!(page_window(1, 3, 5), 1..=3);
        assert_eq!(page_window(1, 10, 5), 1..=5);
        assert_eq!(page_window(3, 10, 5), 1..=5);
        assert_eq!(page_window(4, 10, 5), 2..=6);
        assert_eq!(page_window(7, 10, 5), 5..=9);
        assert_eq!(page_window(9, 10, 5), 6..=10);
        assert_eq!(page_window(10, 10, 5), 6..=10);
        assert_eq!(page_window(0, 0, 5), 1..=1);
    }
}
