//! Pending/rollback ledger for optimistic actions.
//!
//! Under [`SyncPolicy::Optimistic`](crate::app::SyncPolicy::Optimistic) a data
//! action changes local state before the remote call resolves. Each such change
//! is recorded here with what is needed to undo it; the entry is settled when
//! the call resolves, and rolled back if the call failed.

use crate::domain::{Country, CountryPatch};
use std::collections::BTreeMap;

/// Prefix of temporary ids given to optimistically added rows.
pub const PENDING_ID_PREFIX: &str = "pending-";

/// Identifier of one in-flight optimistic operation.
pub type OpId = u64;

/// Undo information for one optimistic change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingOp {
    /// A row was appended under a temporary id.
    Add { temp_id: String },

    /// A row was removed from `index`.
    Remove { index: usize, country: Country },

    /// The row with `id` was patched with `applied`; `previous` holds the
    /// values those fields had before.
    Update {
        id: String,
        applied: CountryPatch,
        previous: CountryPatch,
    },
}

/// In-flight optimistic operations keyed by [`OpId`].
#[derive(Debug, Clone, Default)]
pub struct PendingLedger {
    next_id: OpId,
    ops: BTreeMap<OpId, PendingOp>,
}

impl PendingLedger {
    /// Records `op` and returns the id to settle it with.
    pub fn record(&mut self, op: PendingOp) -> OpId {
        let id = self.next_id;
        self.next_id += 1;
        self.ops.insert(id, op);
        id
    }

    /// Removes and returns the entry for `id`, if still pending.
    pub fn settle(&mut self, id: OpId) -> Option<PendingOp> {
        self.ops.remove(&id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ops.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Returns `true` if a row with `id` is an unconfirmed optimistic add.
    #[must_use]
    pub fn is_unconfirmed_add(&self, id: &str) -> bool {
        self.ops
            .values()
            .any(|op| matches!(op, PendingOp::Add { temp_id } if temp_id == id))
    }
}

/// Generates a fresh temporary id for an optimistic add.
#[must_use]
pub fn temp_id() -> String {
    format!("{PENDING_ID_PREFIX}{}", uuid::Uuid::new_v4())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn settle_returns_each_entry_once() {
        let mut ledger = PendingLedger::default();
        let a = ledger.record(PendingOp::Add { temp_id: temp_id() });
        let b = ledger.record(PendingOp::Remove {
            index: 0,
            country: Country::new("1", "Indonesia", "Jakarta", "Asia", "🇮🇩"),
        });

        assert_ne!(a, b);
        assert_eq!(ledger.len(), 2);
        assert!(matches!(ledger.settle(a), Some(PendingOp::Add { .. })));
        assert!(ledger.settle(a).is_none());
        assert_eq!(ledger.len(), 1);

        assert!(matches!(ledger.settle(b), Some(PendingOp::Remove { index: 0, .. })));
        assert!(ledger.is_empty());
    }

    #[test]
    fn temp_ids_are_recognizable_and_tracked() {
        let mut ledger = PendingLedger::default();
        assert!(ledger.is_empty());
        let id = temp_id();
        assert!(id.starts_with(PENDING_ID_PREFIX));

        ledger.record(PendingOp::Add { temp_id: id.clone() });
        assert!(ledger.is_unconfirmed_add(&id));
        assert!(!ledger.is_unconfirmed_add("1"));
    }
}
