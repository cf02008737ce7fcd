//! Error types for the ledger.

use genevault_core::{CoreError, Principal};
use genevault_perms::PermsError;
use genevault_store::StoreError;
use thiserror::Error;

/// Errors that can occur during ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Caller lacks the required privilege.
    #[error("permission error: {0}")]
    Permission(#[from] PermsError),

    /// Storage error.
    #[error("storage error: {0}")]
    Store(#[from] StoreError),

    /// Signature or encoding error on a signed invocation.
    #[error("core error: {0}")]
    Core(#[from] CoreError),

    /// The store already belongs to a ledger with a different admin.
    #[error("store is owned by admin {existing}, not {requested}")]
    AdminMismatch {
        existing: Principal,
        requested: Principal,
    },

    /// The store has no admin recorded, so there is no ledger to open.
    #[error("store has no ledger admin recorded")]
    NotInitialized,
}

impl LedgerError {
    /// Whether this is the `Unauthorized` domain error.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, LedgerError::Permission(PermsError::Unauthorized(_)))
    }
}

/// Result type for ledger operations.
pub type Result<T> = std::result::Result<T, LedgerError>;
