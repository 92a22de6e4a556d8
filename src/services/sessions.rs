//! Pending entry store
//!
//! Holds at most one unconfirmed income per user. Entries are transient: they
//! vanish on restart and, when a TTL is set, once they are older than it.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::models::{IncomeDraft, UserId};

#[derive(Debug, Clone)]
struct PendingSlot {
    draft: IncomeDraft,
    staged_at: Instant,
}

/// Per-user store of drafts awaiting confirmation
#[derive(Debug, Default)]
pub struct PendingStore {
    slots: HashMap<UserId, PendingSlot>,
    ttl: Option<Duration>,
}

impl PendingStore {
    /// Create a store; `None` keeps entries until they are taken
    pub fn new(ttl: Option<Duration>) -> Self {
        Self {
            slots: HashMap::new(),
            ttl,
        }
    }

    /// Stage a draft for `user`, returning the live draft it replaced
    pub fn stage(&mut self, user: UserId, draft: IncomeDraft) -> Option<IncomeDraft> {
        let now = Instant::now();
        let previous = self.slots.insert(
            user,
            PendingSlot {
                draft,
                staged_at: now,
            },
        );
        previous
            .filter(|slot| !self.is_expired(slot, now))
            .map(|slot| slot.draft)
    }

    /// Remove and return the live draft for `user`
    pub fn take(&mut self, user: UserId) -> Option<IncomeDraft> {
        let slot = self.slots.remove(&user)?;
        if self.is_expired(&slot, Instant::now()) {
            tracing::debug!(%user, "pending entry expired before it was used");
            return None;
        }
        Some(slot.draft)
    }

    /// Look at the live draft for `user` without removing it
    pub fn peek(&self, user: UserId) -> Option<&IncomeDraft> {
        let slot = self.slots.get(&user)?;
        if self.is_expired(slot, Instant::now()) {
            None
        } else {
            Some(&slot.draft)
        }
    }

    /// Drop every expired entry, returning how many were removed
    pub fn evict_expired(&mut self) -> usize {
        let Some(ttl) = self.ttl else {
            return 0;
        };
        let now = Instant::now();
        let before = self.slots.len();
        self.slots
            .retain(|_, slot| now.duration_since(slot.staged_at) < ttl);
        before - self.slots.len()
    }

    /// Number of stored entries, including ones not yet evicted
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether the store holds nothing
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    fn is_expired(&self, slot: &PendingSlot, now: Instant) -> bool {
        self.ttl
            .is_some_and(|ttl| now.duration_since(slot.staged_at) >= ttl)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Allocation;

    fn draft(source: &str, amount: f64) -> IncomeDraft {
        IncomeDraft::new(source, amount, &Allocation::default())
    }

    #[test]
    fn test_stage_and_take() {
        let mut store = PendingStore::new(None);
        let user = UserId::new(1);

        assert!(store.stage(user, draft("Salary", 100.0)).is_none());
        assert_eq!(store.peek(user).unwrap().source, "Salary");

        let taken = store.take(user).unwrap();
        assert_eq!(taken.total_amount, 100.0);
        assert!(store.take(user).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_second_stage_supersedes_first() {
        let mut store = PendingStore::new(None);
        let user = UserId::new(1);

        store.stage(user, draft("First", 100.0));
        let replaced = store.stage(user, draft("Second", 200.0)).unwrap();

        assert_eq!(replaced.source, "First");
        assert_eq!(store.len(), 1);
        assert_eq!(store.take(user).unwrap().source, "Second");
    }

    #[test]
    fn test_users_are_isolated() {
        let mut store = PendingStore::new(None);
        store.stage(UserId::new(1), draft("Alpha", 1.0));
        store.stage(UserId::new(2), draft("Beta", 2.0));

        assert_eq!(store.take(UserId::new(2)).unwrap().source, "Beta");
        assert_eq!(store.peek(UserId::new(1)).unwrap().source, "Alpha");
    }

    #[test]
    fn test_expired_entries_read_as_absent() {
        let mut store = PendingStore::new(Some(Duration::ZERO));
        let user = UserId::new(1);

        store.stage(user, draft("Salary", 100.0));

        assert!(store.peek(user).is_none());
        assert!(store.take(user).is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn test_evict_expired() {
        let mut store = PendingStore::new(Some(Duration::ZERO));
        store.stage(UserId::new(1), draft("A", 1.0));
        store.stage(UserId::new(2), draft("B", 2.0));

        assert_eq!(store.evict_expired(), 2);
        assert!(store.is_empty());
    }

    #[test]
    fn test_no_ttl_never_evicts() {
        let mut store = PendingStore::new(None);
        store.stage(UserId::new(1), draft("A", 1.0));

        assert_eq!(store.evict_expired(), 0);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_long_ttl_keeps_entries() {
        let mut store = PendingStore::new(Some(Duration::from_secs(3600)));
        store.stage(UserId::new(1), draft("A", 1.0));

        assert_eq!(store.evict_expired(), 0);
        assert!(store.peek(UserId::new(1)).is_some());
    }
}
