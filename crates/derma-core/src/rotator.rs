// ── Timed single-item rotation ──
//
// Drives the hero banner and the testimonial spotlight: one item visible at
// a time, advancing on a fixed interval. Front ends call `tick()` from their
// render loop; manual navigation restarts the interval.

use std::time::Duration;

use tokio::time::Instant;

/// Default time each item stays on screen.
pub const ROTATION_INTERVAL: Duration = Duration::from_secs(5);

#[derive(Debug, Clone)]
pub struct AutoRotator {
    len: usize,
    current: usize,
    interval: Duration,
    last_advance: Instant,
}

impl AutoRotator {
    pub fn new(len: usize) -> Self {
        Self::with_interval(len, ROTATION_INTERVAL)
    }

    pub fn with_interval(len: usize, interval: Duration) -> Self {
        Self {
            len,
            current: 0,
            interval,
            last_advance: Instant::now(),
        }
    }

    /// Advance for every interval elapsed since the last step.
    /// Returns whether any step was taken, even one that wrapped back to
    /// the same item.
    pub fn tick(&mut self) -> bool {
        self.tick_at(Instant::now())
    }

    pub fn tick_at(&mut self, now: Instant) -> bool {
        if self.len < 2 || self.interval.is_zero() {
            self.last_advance = now;
            return false;
        }
        let mut stepped = false;
        while now.saturating_duration_since(self.last_advance) >= self.interval {
            self.current = (self.current + 1) % self.len;
            self.last_advance += self.interval;
            stepped = true;
        }
        stepped
    }

    /// The list changed length. Keeps the position when still in range,
    /// else clamps to the last item.
    pub fn set_len(&mut self, len: usize) {
        self.len = len;
        self.current = self.current.min(len.saturating_sub(1));
    }

    pub fn current(&self) -> usize {
        self.current
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Jump to `index` (clamped to the list) and restart the interval.
    pub fn select(&mut self, index: usize) {
        if self.len == 0 {
            return;
        }
        self.current = index.min(self.len - 1);
        self.last_advance = Instant::now();
    }

    pub fn next(&mut self) {
        if self.len > 0 {
            self.select((self.current + 1) % self.len);
        }
    }

    pub fn prev(&mut self) {
        if self.len > 0 {
            self.select((self.current + self.len - 1) % self.len);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn advances_once_per_interval() {
        let mut r = AutoRotator::new(3);
        tokio::time::advance(Duration::from_secs(4)).await;
        assert!(!r.tick());
        assert_eq!(r.current(), 0);

        tokio::time::advance(Duration::from_secs(1)).await;
        assert!(r.tick());
        assert_eq!(r.current(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn catches_up_after_a_stall_and_wraps() {
        let mut r = AutoRotator::new(3);
        tokio::time::advance(Duration::from_secs(16)).await;
        assert!(r.tick());
        assert_eq!(r.current(), 0);
        tokio::time::advance(Duration::from_secs(4)).await;
        assert!(r.tick());
        assert_eq!(r.current(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn manual_navigation_restarts_interval() {
        let mut r = AutoRotator::new(4);
        tokio::time::advance(Duration::from_secs(4)).await;
        r.next();
        assert_eq!(r.current(), 1);
        tokio::time::advance(Duration::from_secs(4)).await;
        assert!(!r.tick());
        r.prev();
        r.prev();
        assert_eq!(r.current(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn single_item_never_moves() {
        let mut r = AutoRotator::new(1);
        tokio::time::advance(Duration::from_secs(60)).await;
        assert!(!r.tick());
        assert_eq!(r.current(), 0);
    }

    #[test]
    fn shrinking_keeps_index_in_range() {
        let mut r = AutoRotator::new(5);
        r.select(4);
        r.set_len(3);
        assert_eq!(r.current(), 2);
        r.select(1);
        r.set_len(4);
        assert_eq!(r.current(), 1);
        r.set_len(0);
        assert_eq!(r.current(), 0);
        r.next();
        assert!(r.is_empty());
    }
}
