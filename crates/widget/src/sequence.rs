//! Request sequencing.
//!
//! Every load takes a number from a monotonically increasing sequence. A
//! completion is rendered only while it belongs to the newest load issued and
//! is newer than everything rendered so far, so a slow earlier response can
//! never overwrite a later one.

/// Tracks issued and rendered load numbers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SequenceGuard {
    issued: u64,
    applied: u64,
}

impl SequenceGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the next sequence number for a new load.
    pub fn issue(&mut self) -> u64 {
        self.issued += 1;
        self.issued
    }

    /// Whether a completion may be rendered; records it when so.
    pub fn accept(&mut self, seq: u64) -> bool {
        if seq != self.issued || seq <= self.applied {
            return false;
        }
        self.applied = seq;
        true
    }

    /// Newest number issued.
    pub fn latest(&self) -> u64 {
        self.issued
    }

    /// Newest number rendered.
    pub fn applied(&self) -> u64 {
        self.applied
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn in_order_completion_is_accepted() {
        let mut guard = SequenceGuard::new();
        let first = guard.issue();
        assert!(guard.accept(first));
        let second = guard.issue();
        assert!(guard.accept(second));
        assert_eq!(guard.applied(), 2);
    }

    #[test]
    fn superseded_completion_is_dropped() {
        let mut guard = SequenceGuard::new();
        let slow = guard.issue();
        let fast = guard.issue();

        assert!(guard.accept(fast));
        assert!(!guard.accept(slow));
        assert_eq!(guard.applied(), fast);
    }

    #[test]
    fn older_completion_is_dropped_even_if_nothing_rendered() {
        let mut guard = SequenceGuard::new();
        let first = guard.issue();
        let second = guard.issue();
        assert!(!guard.accept(first));
        assert!(guard.accept(second));
    }

    #[test]
    fn completions_apply_once() {
        let mut guard = SequenceGuard::new();
        let seq = guard.issue();
        assert!(guard.accept(seq));
        assert!(!guard.accept(seq));
    }
}
