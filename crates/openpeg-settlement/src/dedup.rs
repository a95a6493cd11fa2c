//! Settlement dedup store — backs the exactly-once guarantee.
//!
//! Maps `OperationId → settled`. The per-id state machine is
//! `Unseen → Settled` with no other states: forward operations take the
//! transition once and error on re-entry, reverse operations self-loop on
//! `Settled` as a no-op. Records are append-only; [`DedupStore::rollback`]
//! exists solely so a failed settlement can undo its own write before the
//! enclosing transaction returns.

use std::collections::BTreeSet;

use openpeg_types::{OpenpegError, OperationId, Result};

/// Persistent-shaped map from operation id to a settled marker.
#[derive(Debug, Default)]
pub struct DedupStore {
    settled: BTreeSet<OperationId>,
}

impl DedupStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Forward-direction write: insert-or-fail.
    ///
    /// # Errors
    /// Returns [`OpenpegError::DuplicateOperation`] if the id is already
    /// settled.
    pub fn insert_new(&mut self, id: OperationId) -> Result<()> {
        if !self.settled.insert(id) {
            return Err(OpenpegError::DuplicateOperation(id));
        }
        Ok(())
    }

    /// Reverse-direction write: insert-or-noop. Returns `true` if this call
    /// transitioned the id from unseen to settled, `false` if it was
    /// already settled.
    pub fn set_settled(&mut self, id: OperationId) -> bool {
        self.settled.insert(id)
    }

    /// Whether the id has been settled. Exposed for external inspection.
    #[must_use]
    pub fn exists(&self, id: &OperationId) -> bool {
        self.settled.contains(id)
    }

    /// Undo a write made earlier in the *same* failed settlement. Not part
    /// of the external surface; the store is otherwise append-only.
    pub fn rollback(&mut self, id: &OperationId) {
        self.settled.remove(id);
    }

    /// Number of settled operations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.settled.len()
    }

    /// Whether nothing has been settled yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.settled.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use openpeg_types::AccountAddress;

    fn fwd(seq: u64) -> OperationId {
        OperationId::forward(&AccountAddress::new("peg1sender").unwrap(), seq)
    }

    fn rev(seq: u64) -> OperationId {
        OperationId::reverse(&AccountAddress::new("peg1sender").unwrap(), seq)
    }

    #[test]
    fn forward_insert_or_fail() {
        let mut store = DedupStore::new();
        store.insert_new(fwd(1)).unwrap();
        assert!(store.exists(&fwd(1)));

        let err = store.insert_new(fwd(1)).unwrap_err();
        assert!(matches!(err, OpenpegError::DuplicateOperation(id) if id == fwd(1)));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn reverse_insert_or_noop() {
        let mut store = DedupStore::new();
        assert!(store.set_settled(rev(1)));
        assert!(!store.set_settled(rev(1)), "second settle must be a no-op");
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn namespaces_do_not_alias() {
        let mut store = DedupStore::new();
        store.insert_new(fwd(1)).unwrap();
        // Reverse id with the same (sender, sequence) is a distinct key.
        assert!(!store.exists(&rev(1)));
        assert!(store.set_settled(rev(1)));
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn rollback_undoes_write() {
        let mut store = DedupStore::new();
        store.insert_new(fwd(1)).unwrap();
        store.rollback(&fwd(1));
        assert!(!store.exists(&fwd(1)));
        // After rollback the id settles again.
        store.insert_new(fwd(1)).unwrap();
    }

    #[test]
    fn empty_store() {
        let store = DedupStore::new();
        assert!(store.is_empty());
        assert_eq!(store.len(), 0);
        assert!(!store.exists(&fwd(1)));
    }
}
