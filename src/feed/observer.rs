/// Single-target visibility observer for the tail of the book list.
///
/// Watches at most one book id at a time. [`observe`](Self::observe) with a
/// different id detaches the old target before attaching the new one, and a
/// freshly attached target starts out "not intersecting", so the first frame
/// in which it is visible reports an entry edge.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct TailObserver {
    target: Option<u64>,
    intersecting: bool,
}

impl TailObserver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Currently observed book id.
    pub fn target(&self) -> Option<u64> {
        self.target
    }

    /// Point the observer at `target`.
    ///
    /// Returns `true` if the target changed. Re-observing the same id is a
    /// no-op and keeps the current intersection state.
    pub fn observe(&mut self, target: Option<u64>) -> bool {
        if self.target == target {
            return false;
        }
        self.disconnect();
        self.target = target;
        if let Some(id) = target {
            tracing::trace!(book_id = id, "Observing tail element");
        }
        true
    }

    /// Stop observing anything.
    pub fn disconnect(&mut self) {
        self.target = None;
        self.intersecting = false;
    }

    /// Feed the visibility of the observed element for the frame just drawn.
    ///
    /// Returns `true` only on the transition from hidden to visible. Always
    /// `false` while nothing is observed.
    pub fn update(&mut self, visible: bool) -> bool {
        if self.target.is_none() {
            return false;
        }
        let entered = visible && !self.intersecting;
        self.intersecting = visible;
        entered
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_target_never_fires() {
        let mut observer = TailObserver::new();
        assert!(!observer.update(true));
        assert!(!observer.update(true));
    }

    #[test]
    fn test_fires_once_on_entry() {
        let mut observer = TailObserver::new();
        observer.observe(Some(1));
        assert!(!observer.update(false));
        assert!(observer.update(true));
        assert!(!observer.update(true));
    }

    #[test]
    fn test_fires_again_after_leaving() {
        let mut observer = TailObserver::new();
        observer.observe(Some(1));
        assert!(observer.update(true));
        assert!(!observer.update(false));
        assert!(observer.update(true));
    }

    #[test]
    fn test_retarget_resets_intersection() {
        let mut observer = TailObserver::new();
        observer.observe(Some(1));
        assert!(observer.update(true));

        assert!(observer.observe(Some(2)));
        assert_eq!(observer.target(), Some(2));
        // New target already on screen: reported as an entry.
        assert!(observer.update(true));
    }

    #[test]
    fn test_same_target_keeps_state() {
        let mut observer = TailObserver::new();
        observer.observe(Some(1));
        assert!(observer.update(true));
        assert!(!observer.observe(Some(1)));
        assert!(!observer.update(true));
    }

    #[test]
    fn test_disconnect_clears_target() {
        let mut observer = TailObserver::new();
        observer.observe(Some(5));
        observer.disconnect();
        assert_eq!(observer.target(), None);
        assert!(!observer.update(true));
    }
}
