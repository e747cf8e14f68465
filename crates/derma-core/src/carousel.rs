// ── Paged carousel controller ──
//
// Shows a contiguous window of `items_per_page` entries from an ordered list
// and moves that window one step at a time with wrap-around. A transition
// lock drops navigation requests that arrive while the previous slide
// animation is still running.

use std::ops::Range;
use std::time::Duration;

use tokio::time::Instant;

/// Viewports narrower than this show one item per page.
pub const MOBILE_BREAKPOINT_PX: u32 = 768;

/// How long navigation stays locked after a step.
pub const TRANSITION_COOLDOWN: Duration = Duration::from_millis(500);

// ── Layout ───────────────────────────────────────────────────────────

/// Items per page on wide viewports. Narrow viewports always show one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageLayout {
    wide: usize,
}

impl PageLayout {
    /// One item at every width.
    pub const SINGLE: Self = Self { wide: 1 };
    /// Two side by side on wide viewports.
    pub const PAIRED: Self = Self { wide: 2 };
    /// Three side by side on wide viewports (cards grid).
    pub const TRIPLE: Self = Self { wide: 3 };

    /// Items per page for a viewport `width` in pixels.
    pub fn items_per_page(self, width: u32) -> usize {
        if width < MOBILE_BREAKPOINT_PX {
            1
        } else {
            self.wide
        }
    }
}

// ── Transition lock ──────────────────────────────────────────────────

/// A flag that stays set for a fixed cooldown after being acquired.
///
/// Expiry is evaluated lazily against the clock, so no timer task is needed.
#[derive(Debug, Clone)]
pub struct TransitionLock {
    cooldown: Duration,
    locked_until: Option<Instant>,
}

impl Default for TransitionLock {
    fn default() -> Self {
        Self::new(TRANSITION_COOLDOWN)
    }
}

impl TransitionLock {
    pub fn new(cooldown: Duration) -> Self {
        Self {
            cooldown,
            locked_until: None,
        }
    }

    /// Whether a transition is still in flight.
    pub fn is_locked(&self) -> bool {
        self.locked_until.is_some_and(|until| Instant::now() < until)
    }

    /// Take the lock if it is free. Returns `false` if already held.
    pub fn try_acquire(&mut self) -> bool {
        if self.is_locked() {
            return false;
        }
        self.locked_until = Some(Instant::now() + self.cooldown);
        true
    }
}

// ── Controller ───────────────────────────────────────────────────────

/// Where the window sits in the list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Position {
    AtStart,
    Middle,
    AtEnd,
}

/// Paging state for one carousel.
///
/// Invariant: `current_index <= max_index()`.
#[derive(Debug, Clone)]
pub struct PagedCarousel {
    layout: PageLayout,
    items_per_page: usize,
    item_count: usize,
    current_index: usize,
    lock: TransitionLock,
}

impl PagedCarousel {
    /// Create a carousel over `item_count` items at the given viewport width.
    pub fn new(layout: PageLayout, item_count: usize, viewport_width: u32) -> Self {
        Self {
            layout,
            items_per_page: layout.items_per_page(viewport_width),
            item_count,
            current_index: 0,
            lock: TransitionLock::default(),
        }
    }

    /// Re-derive items per page and rewind to the first page.
    pub fn initialize(&mut self, item_count: usize, viewport_width: u32) {
        self.item_count = item_count;
        self.items_per_page = self.layout.items_per_page(viewport_width);
        self.current_index = 0;
    }

    /// React to a resize. Rewinds to the first page if the breakpoint was
    /// crossed; returns whether items-per-page changed.
    pub fn on_viewport_change(&mut self, viewport_width: u32) -> bool {
        let per_page = self.layout.items_per_page(viewport_width);
        if per_page == self.items_per_page {
            return false;
        }
        self.items_per_page = per_page;
        self.current_index = 0;
        true
    }

    /// The underlying list was replaced (refetch, category switch).
    pub fn replace_items(&mut self, item_count: usize) {
        self.item_count = item_count;
        self.current_index = 0;
    }

    /// Advance one step, wrapping from the last window to the first.
    ///
    /// Returns `false` when the request was dropped (lock held or nothing to
    /// page through).
    pub fn next(&mut self) -> bool {
        let max = self.max_index();
        if max == 0 || !self.lock.try_acquire() {
            return false;
        }
        self.current_index = if self.current_index >= max {
            0
        } else {
            self.current_index + 1
        };
        true
    }

    /// Step back one, wrapping from the first window to the last.
    pub fn prev(&mut self) -> bool {
        let max = self.max_index();
        if max == 0 || !self.lock.try_acquire() {
            return false;
        }
        self.current_index = if self.current_index == 0 {
            max
        } else {
            self.current_index - 1
        };
        true
    }

    /// Index range of the visible window, clamped to the list.
    pub fn visible_range(&self) -> Range<usize> {
        let start = self.current_index.min(self.item_count);
        let end = (start + self.items_per_page).min(self.item_count);
        start..end
    }

    /// The visible window of `items`. Never panics, even if `items` is
    /// shorter than the count this carousel was told about.
    pub fn visible_slice<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        let range = self.visible_range();
        let start = range.start.min(items.len());
        let end = range.end.min(items.len());
        items.get(start..end).unwrap_or_default()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn items_per_page(&self) -> usize {
        self.items_per_page
    }

    pub fn item_count(&self) -> usize {
        self.item_count
    }

    /// Last valid start index: `max(0, item_count - items_per_page)`.
    pub fn max_index(&self) -> usize {
        self.item_count.saturating_sub(self.items_per_page)
    }

    /// Number of distinct window positions (for page dots).
    pub fn page_count(&self) -> usize {
        if self.item_count == 0 {
            0
        } else {
            self.max_index() + 1
        }
    }

    /// Whether prev/next controls should be shown at all.
    pub fn needs_controls(&self) -> bool {
        self.item_count > self.items_per_page
    }

    pub fn is_locked(&self) -> bool {
        self.lock.is_locked()
    }

    pub fn position(&self) -> Position {
        if self.current_index == 0 {
            Position::AtStart
        } else if self.current_index >= self.max_index() {
            Position::AtEnd
        } else {
            Position::Middle
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const DESKTOP: u32 = 1280;
    const PHONE: u32 = 390;

    /// Step past the cooldown so the next navigation is accepted.
    async fn settle() {
        tokio::time::advance(TRANSITION_COOLDOWN).await;
    }

    #[test]
    fn breakpoint_picks_items_per_page() {
        assert_eq!(PageLayout::TRIPLE.items_per_page(767), 1);
        assert_eq!(PageLayout::TRIPLE.items_per_page(768), 3);
        assert_eq!(PageLayout::PAIRED.items_per_page(1024), 2);
        assert_eq!(PageLayout::SINGLE.items_per_page(1920), 1);
    }

    #[test]
    fn visible_slice_length_is_min_of_count_and_page() {
        for count in 0..8 {
            for (layout, per_page) in [
                (PageLayout::SINGLE, 1),
                (PageLayout::PAIRED, 2),
                (PageLayout::TRIPLE, 3),
            ] {
                let items: Vec<usize> = (0..count).collect();
                let c = PagedCarousel::new(layout, count, DESKTOP);
                assert_eq!(c.visible_slice(&items).len(), count.min(per_page));
            }
        }
    }

    #[test]
    fn empty_carousel_is_inert() {
        let mut c = PagedCarousel::new(PageLayout::TRIPLE, 0, DESKTOP);
        assert_eq!(c.max_index(), 0);
        assert!(!c.next());
        assert!(!c.prev());
        assert!(c.visible_slice::<u8>(&[]).is_empty());
        assert!(!c.needs_controls());
        assert_eq!(c.page_count(), 0);
    }

    #[test]
    fn short_list_shows_everything_without_controls() {
        let items = ["a", "b"];
        let mut c = PagedCarousel::new(PageLayout::TRIPLE, items.len(), DESKTOP);
        assert_eq!(c.visible_slice(&items), &items);
        assert!(!c.needs_controls());
        assert!(!c.next());
        assert_eq!(c.current_index(), 0);
    }

    #[test]
    fn slice_tolerates_stale_item_list() {
        let c = PagedCarousel::new(PageLayout::TRIPLE, 7, DESKTOP);
        let shorter = [1, 2];
        assert_eq!(c.visible_slice(&shorter), &shorter);
    }

    #[tokio::test(start_paused = true)]
    async fn seven_items_three_per_page_scenario() {
        let items: Vec<u32> = (0..7).collect();
        let mut c = PagedCarousel::new(PageLayout::TRIPLE, items.len(), DESKTOP);
        assert_eq!(c.max_index(), 4);

        assert!(c.next());
        assert_eq!(c.current_index(), 1);
        assert_eq!(c.visible_slice(&items), &[1, 2, 3]);

        let mut seen = vec![c.current_index()];
        for _ in 0..4 {
            settle().await;
            assert!(c.next());
            seen.push(c.current_index());
        }
        assert_eq!(seen, vec![1, 2, 3, 4, 0]);
    }

    #[tokio::test(start_paused = true)]
    async fn full_cycle_returns_to_start() {
        for count in 1..10 {
            for layout in [PageLayout::SINGLE, PageLayout::PAIRED, PageLayout::TRIPLE] {
                let mut c = PagedCarousel::new(layout, count, DESKTOP);
                if !c.needs_controls() {
                    continue;
                }
                for _ in 0..c.page_count() {
                    assert!(c.next());
                    settle().await;
                }
                assert_eq!(c.current_index(), 0, "count={count} layout={layout:?}");
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn prev_from_start_wraps_to_end() {
        for count in 4..9 {
            let mut c = PagedCarousel::new(PageLayout::TRIPLE, count, DESKTOP);
            assert!(c.prev());
            assert_eq!(c.current_index(), c.max_index());
            assert_eq!(c.position(), Position::AtEnd);
            settle().await;
        }
    }

    #[tokio::test(start_paused = true)]
    async fn double_next_inside_cooldown_advances_once() {
        let mut c = PagedCarousel::new(PageLayout::TRIPLE, 7, DESKTOP);
        assert!(c.next());
        assert!(c.is_locked());

        tokio::time::advance(Duration::from_millis(200)).await;
        assert!(!c.next());
        assert!(!c.prev());
        assert_eq!(c.current_index(), 1);

        tokio::time::advance(Duration::from_millis(300)).await;
        assert!(!c.is_locked());
        assert!(c.next());
        assert_eq!(c.current_index(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn crossing_breakpoint_rewinds() {
        let mut c = PagedCarousel::new(PageLayout::TRIPLE, 7, DESKTOP);
        c.next();
        settle().await;
        c.next();
        assert_eq!(c.current_index(), 2);

        assert!(c.on_viewport_change(PHONE));
        assert_eq!(c.current_index(), 0);
        assert_eq!(c.items_per_page(), 1);
        assert_eq!(c.max_index(), 6);

        settle().await;
        c.next();
        assert!(!c.on_viewport_change(500));
        assert_eq!(c.current_index(), 1);

        assert!(c.on_viewport_change(DESKTOP));
        assert_eq!(c.current_index(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn replacing_items_rewinds() {
        let mut c = PagedCarousel::new(PageLayout::TRIPLE, 7, DESKTOP);
        c.next();
        c.replace_items(4);
        assert_eq!(c.current_index(), 0);
        assert_eq!(c.max_index(), 1);
    }

    #[test]
    fn initialize_resets_everything() {
        let mut c = PagedCarousel::new(PageLayout::PAIRED, 0, PHONE);
        c.initialize(5, DESKTOP);
        assert_eq!(c.items_per_page(), 2);
        assert_eq!(c.item_count(), 5);
        assert_eq!(c.current_index(), 0);
        assert_eq!(c.visible_range(), 0..2);
    }
}
