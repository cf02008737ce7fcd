//! Store trait: the abstract interface for ledger persistence.
//!
//! This trait allows the ledger to be storage-agnostic. Implementations
//! include SQLite (primary) and in-memory (for tests and embedding).

use std::sync::Arc;

use genevault_core::{DataReference, PermissionKey, Principal};

use crate::error::Result;

/// Result of recording the administrative owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitResult {
    /// The admin was recorded; the store was fresh.
    Initialized,
    /// An admin was already recorded (idempotent if it is the same principal).
    AlreadyInitialized {
        /// The admin already on record.
        existing: Principal,
    },
}

/// The LedgerStore trait: synchronous interface for the two ledger maps.
///
/// # Design Notes
///
/// - **One write per call**: every mutating method is a single atomic write.
///   The ledger checks authorization first and then issues at most one write,
///   so a failed call never leaves partial state behind.
/// - **Absent means false**: `is_granted` returns `false` for entries that were
///   never written; callers cannot tell "never granted" from "revoked".
/// - **No deletion**: references are overwritten, permission entries flipped.
pub trait LedgerStore: Send + Sync {
    // ─────────────────────────────────────────────────────────────────────────
    // Ledger Metadata
    // ─────────────────────────────────────────────────────────────────────────

    /// The administrative owner recorded at creation, if any.
    fn admin(&self) -> Result<Option<Principal>>;

    /// Record the administrative owner if none is recorded yet.
    ///
    /// Never replaces an existing admin.
    fn init_admin(&self, admin: &Principal) -> Result<InitResult>;

    // ─────────────────────────────────────────────────────────────────────────
    // Access Records
    // ─────────────────────────────────────────────────────────────────────────

    /// Get the current reference of an owner.
    fn get_reference(&self, owner: &Principal) -> Result<Option<DataReference>>;

    /// Overwrite the reference of an owner, creating the record on first use.
    fn put_reference(&self, owner: &Principal, reference: &DataReference) -> Result<()>;

    /// All owners that have a record, in ascending byte order.
    fn owners(&self) -> Result<Vec<Principal>>;

    // ─────────────────────────────────────────────────────────────────────────
    // Permission Set
    // ─────────────────────────────────────────────────────────────────────────

    /// Whether the entry is currently `true`.
    fn is_granted(&self, key: &PermissionKey) -> Result<bool>;

    /// Create or flip an entry.
    fn set_permission(&self, key: &PermissionKey, granted: bool) -> Result<()>;

    /// Readers whose entry for `owner` is currently `true`, in ascending byte order.
    fn granted_readers(&self, owner: &Principal) -> Result<Vec<Principal>>;
}

/// Shared stores: lets a host keep a handle on the store it gave the ledger.
impl<S: LedgerStore + ?Sized> LedgerStore for Arc<S> {
    fn admin(&self) -> Result<Option<Principal>> {
        (**self).admin()
    }

    fn init_admin(&self, admin: &Principal) -> Result<InitResult> {
        (**self).init_admin(admin)
    }

    fn get_reference(&self, owner: &Principal) -> Result<Option<DataReference>> {
        (**self).get_reference(owner)
    }

    fn put_reference(&self, owner: &Principal, reference: &DataReference) -> Result<()> {
        (**self).put_reference(owner, reference)
    }

    fn owners(&self) -> Result<Vec<Principal>> {
        (**self).owners()
    }

    fn is_granted(&self, key: &PermissionKey) -> Result<bool> {
        (**self).is_granted(key)
    }

    fn set_permission(&self, key: &PermissionKey, granted: bool) -> Result<()> {
        (**self).set_permission(key, granted)
    }

    fn granted_readers(&self, owner: &Principal) -> Result<Vec<Principal>> {
        (**self).granted_readers(owner)
    }
}
