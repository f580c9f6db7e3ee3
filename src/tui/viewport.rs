//! Infinite-scroll trigger.
//!
//! The layout records where the list ended up after rendering; the watcher
//! turns that into a single `Action::LoadMore` per newly revealed tail, so
//! the pager never has to know about terminal geometry.

use crate::tui::event::Action;

/// Whether the first row of the last item lies inside a viewport of
/// `viewport_height` rows whose top shows item `offset`.
pub fn last_item_visible(item_heights: &[usize], offset: usize, viewport_height: usize) -> bool {
    let Some(last) = item_heights.len().checked_sub(1) else {
        return false;
    };
    if offset > last || viewport_height == 0 {
        return false;
    }

    let rows_above_last: usize = item_heights[offset..last].iter().sum();
    rows_above_last < viewport_height
}

#[derive(Debug, Default)]
pub struct ProximityWatcher {
    fired_at_len: Option<usize>,
}

impl ProximityWatcher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the latest geometry. Fires once when the tail becomes visible and
    /// again only after the list length changes while it stays visible.
    pub fn observe(&mut self, tail_visible: bool, displayed_len: usize) -> Option<Action> {
        if !tail_visible || displayed_len == 0 {
            self.fired_at_len = None;
            return None;
        }
        if self.fired_at_len == Some(displayed_len) {
            return None;
        }
        self.fired_at_len = Some(displayed_len);
        Some(Action::LoadMore)
    }

    /// Forget what was seen; the next visible tail fires again.
    pub fn reset(&mut self) {
        self.fired_at_len = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_item_visible_short_list() {
        assert!(last_item_visible(&[2, 2, 2], 0, 10));
        assert!(!last_item_visible(&[], 0, 10));
    }

    #[test]
    fn test_last_item_hidden_below_viewport() {
        let heights = vec![2; 20];
        assert!(!last_item_visible(&heights, 0, 10));
        assert!(!last_item_visible(&heights, 10, 10));
        assert!(last_item_visible(&heights, 15, 10));
    }

    #[test]
    fn test_last_item_partially_visible_counts() {
        // rows above the last item: 4 * 2 = 8, viewport 9 shows its first row
        assert!(last_item_visible(&[2, 2, 2, 2, 2], 0, 9));
        assert!(!last_item_visible(&[2, 2, 2, 2, 2], 0, 8));
    }

    #[test]
    fn test_zero_height_viewport() {
        assert!(!last_item_visible(&[1], 0, 0));
    }

    #[test]
    fn test_watcher_fires_once_per_length() {
        let mut watcher = ProximityWatcher::new();
        assert_eq!(watcher.observe(true, 20), Some(Action::LoadMore));
        assert_eq!(watcher.observe(true, 20), None);
        assert_eq!(watcher.observe(true, 40), Some(Action::LoadMore));
        assert_eq!(watcher.observe(true, 40), None);
    }

    #[test]
    fn test_watcher_rearms_after_scrolling_away() {
        let mut watcher = ProximityWatcher::new();
        assert!(watcher.observe(true, 20).is_some());
        assert!(watcher.observe(false, 20).is_none());
        assert!(watcher.observe(true, 20).is_some());
    }

    #[test]
    fn test_watcher_reset() {
        let mut watcher = ProximityWatcher::new();
        assert!(watcher.observe(true, 20).is_some());
        watcher.reset();
        assert!(watcher.observe(true, 20).is_some());
    }

    #[test]
    fn test_watcher_ignores_empty_list() {
        let mut watcher = ProximityWatcher::new();
        assert!(watcher.observe(true, 0).is_none());
    }
}
