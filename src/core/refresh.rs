//! Presentation-owned summary state with last-issued-wins refresh semantics.

use std::sync::{
    atomic::{AtomicU64, Ordering},
    RwLock,
};

/// Handle for one refresh request; compare-able by issue order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RefreshTicket(u64);

impl RefreshTicket {
    pub fn generation(&self) -> u64 {
        self.0
    }
}

#[derive(Debug)]
struct Applied<T> {
    generation: u64,
    value: T,
}

/// Holds the summary a view renders.
///
/// Every refresh takes a ticket before computing. Only the result carrying the
/// most recently issued ticket is applied; results of superseded refreshes are
/// dropped even when they finish last.
#[derive(Debug)]
pub struct SummaryState<T> {
    issued: AtomicU64,
    applied: RwLock<Option<Applied<T>>>,
}

impl<T> Default for SummaryState<T> {
    fn default() -> Self {
        Self {
            issued: AtomicU64::new(0),
            applied: RwLock::new(None),
        }
    }
}

impl<T: Clone> SummaryState<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin_refresh(&self) -> RefreshTicket {
        RefreshTicket(self.issued.fetch_add(1, Ordering::SeqCst) + 1)
    }

    pub fn is_current(&self, ticket: RefreshTicket) -> bool {
        self.issued.load(Ordering::SeqCst) == ticket.0
    }

    /// Applies `value` if `ticket` is still the latest issued; returns whether it was applied.
    pub fn publish(&self, ticket: RefreshTicket, value: T) -> bool {
        let Ok(mut applied) = self.applied.write() else {
            return false;
        };
        if !self.is_current(ticket) {
            tracing::warn!(
                generation = ticket.0,
                latest = self.issued.load(Ordering::SeqCst),
                "discarding stale refresh result"
            );
            return false;
        }
        *applied = Some(Applied {
            generation: ticket.0,
            value,
        });
        true
    }

    /// Last applied summary, if any refresh has completed.
    pub fn current(&self) -> Option<T> {
        self.applied
            .read()
            .ok()
            .and_then(|applied| applied.as_ref().map(|entry| entry.value.clone()))
    }

    /// True while the latest issued refresh has not been applied yet.
    pub fn is_loading(&self) -> bool {
        let latest = self.issued.load(Ordering::SeqCst);
        let applied = self
            .applied
            .read()
            .ok()
            .and_then(|applied| applied.as_ref().map(|entry| entry.generation))
            .unwrap_or(0);
        applied < latest
    }

    /// Takes a ticket, runs `compute` and publishes its output.
    pub fn refresh_with<E>(&self, compute: impl FnOnce() -> Result<T, E>) -> Result<bool, E> {
        let ticket = self.begin_refresh();
        let value = compute()?;
        Ok(self.publish(ticket, value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latest_issued_refresh_wins_over_slower_stale_one() {
        let state = SummaryState::new();
        let slow = state.begin_refresh();
        let fresh = state.begin_refresh();

        assert!(state.publish(fresh, "fresh"));
        assert!(!state.publish(slow, "stale"));
        assert_eq!(state.current(), Some("fresh"));
        assert!(!state.is_loading());
    }

    #[test]
    fn stale_result_is_dropped_even_before_fresh_arrives() {
        let state = SummaryState::new();
        let first = state.begin_refresh();
        assert!(state.publish(first, 1));
        let stale = state.begin_refresh();
        let latest = state.begin_refresh();
        assert!(!state.publish(stale, 2));
        assert_eq!(state.current(), Some(1));
        assert!(state.is_loading());
        assert!(state.publish(latest, 3));
        assert_eq!(state.current(), Some(3));
    }

    #[test]
    fn refresh_with_propagates_errors() {
        let state: SummaryState<u32> = SummaryState::new();
        let result: Result<bool, &str> = state.refresh_with(|| Err("store offline"));
        assert_eq!(result, Err("store offline"));
        assert!(state.is_loading());
        assert_eq!(state.refresh_with::<&str>(|| Ok(7)), Ok(true));
        assert_eq!(state.current(), Some(7));
    }

    #[test]
    fn new_state_is_empty() {
        let state: SummaryState<u32> = SummaryState::new();
        assert_eq!(state.current(), None);
        assert!(!state.is_loading());
    }
}
