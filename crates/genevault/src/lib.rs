//! # GeneVault
//!
//! A minimal ownership-and-permission ledger: each principal stores one
//! opaque data reference (a content hash of an encrypted payload kept
//! elsewhere) and controls who may read it.
//!
//! ## Overview
//!
//! - **AccessRecord**: owner -> latest [`DataReference`], overwritten on upload
//! - **PermissionSet**: (owner, reader) -> granted flag, flipped by grant/revoke
//! - **Gated reads**: owners always read their own reference; anyone else needs
//!   a granted entry
//! - **Events**: every successful mutation is pushed to an [`EventSink`]
//!
//! The host supplies authenticated callers and runs one call at a time. Hosts
//! that receive signed calls can hand them to [`AccessLedger::execute`].
//!
//! ## Usage
//!
//! ```rust
//! use genevault::{AccessLedger, GrantPolicy, LedgerConfig, MemorySink, Principal};
//! use genevault::store::MemoryStore;
//! use std::sync::Arc;
//!
//! let admin = Principal::from_bytes([0xaa; 32]);
//! let u1 = Principal::from_bytes([1; 32]);
//! let u2 = Principal::from_bytes([2; 32]);
//!
//! let events = Arc::new(MemorySink::new());
//! let mut ledger = AccessLedger::create(admin, MemoryStore::new(), LedgerConfig::default())
//!     .unwrap()
//!     .with_sink(events.clone());
//!
//! ledger.set_reference(&u1, "hash123").unwrap();
//! assert!(ledger.get_reference(&u2, &u1).unwrap_err().is_unauthorized());
//!
//! ledger.grant_access_for(&admin, &u1, &u2).unwrap();
//! assert_eq!(ledger.get_reference(&u2, &u1).unwrap().as_str(), "hash123");
//! assert_eq!(events.len(), 2);
//! # let _ = GrantPolicy::OwnerControlled;
//! ```
//!
//! ## Re-exports
//!
//! This crate re-exports the component crates for convenience:
//!
//! - `genevault::core` - Principals, references, events, invocations
//! - `genevault::store` - Storage abstraction and SQLite
//! - `genevault::perms` - Grant policies and read gating

pub mod config;
pub mod error;
pub mod events;
pub mod ledger;

// Re-export component crates
pub use genevault_core as core;
pub use genevault_perms as perms;
pub use genevault_store as store;

// Re-export main types for convenience
pub use config::LedgerConfig;
pub use error::{LedgerError, Result};
pub use events::{BroadcastSink, EventSink, MemorySink, NullSink, TracingSink};
pub use ledger::{AccessLedger, Outcome};

// Re-export commonly used component types
pub use genevault_core::{
    DataReference, Invocation, Keypair, LedgerEvent, Operation, PermissionKey, Principal,
    SignedInvocation,
};
pub use genevault_perms::{GrantPolicy, PermsError};
