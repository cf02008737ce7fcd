//! # GeneVault Store
//!
//! Storage abstraction for the GeneVault ledger. Provides a trait-based
//! interface for the two ledger maps with SQLite and in-memory
//! implementations.
//!
//! ## Overview
//!
//! The ledger keeps two maps, AccessRecord (owner -> reference) and
//! PermissionSet ((owner, reader) -> bool), plus the administrative owner
//! fixed at creation. [`LedgerStore`] hides where they live.
//!
//! ## Key Types
//!
//! - [`LedgerStore`] - The synchronous trait for all storage operations
//! - [`SqliteStore`] - SQLite-based persistent storage
//! - [`MemoryStore`] - In-memory storage for tests and embedding
//! - [`InitResult`] - Result of recording the administrative owner
//!
//! ## Usage
//!
//! ```rust,no_run
//! use genevault_store::{LedgerStore, SqliteStore};
//! use genevault_core::{DataReference, Principal};
//!
//! let store = SqliteStore::open("ledger.db").unwrap();
//! let owner = Principal::from_bytes([1u8; 32]);
//! store.put_reference(&owner, &DataReference::from("hash123")).unwrap();
//! ```

pub mod error;
pub mod memory;
pub mod migration;
pub mod sqlite;
pub mod traits;

pub use error::{Result, StoreError};
pub use memory::MemoryStore;
pub use sqlite::SqliteStore;
pub use traits::{InitResult, LedgerStore};

/// Get current time in milliseconds.
pub(crate) fn now_millis() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}
