//! Unsaved change tracking for an edit session.

/// Counts edits applied since the last successful save.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct DirtyTracker {
    pending_edits: usize,
}

impl DirtyTracker {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub(crate) fn is_dirty(&self) -> bool {
        self.pending_edits > 0
    }

    pub(crate) fn pending_edits(&self) -> usize {
        self.pending_edits
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.pending_edits += 1;
    }

    pub(crate) fn save_complete(&mut self) {
        self.pending_edits = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_tracker_is_clean() {
        let tracker = DirtyTracker::new();
        assert!(!tracker.is_dirty());
        assert_eq!(tracker.pending_edits(), 0);
    }

    #[test]
    fn edits_accumulate_until_saved() {
        let mut tracker = DirtyTracker::new();
        tracker.mark_dirty();
        tracker.mark_dirty();
        assert_eq!(tracker.pending_edits(), 2);

        tracker.save_complete();
        assert!(!tracker.is_dirty());
    }
}
