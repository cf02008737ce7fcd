//! # GeneVault Core
//!
//! Pure primitives for the GeneVault access ledger: principals, data
//! references, permission keys, events, and signed invocations.
//!
//! This crate contains no I/O and no storage. It is pure computation over
//! identities and opaque references.
//!
//! ## Key Types
//!
//! - [`Principal`] - An unforgeable identity (Ed25519 public key)
//! - [`DataReference`] - Opaque pointer to externally stored data
//! - [`PermissionKey`] - One `(owner, reader)` entry of a PermissionSet
//! - [`LedgerEvent`] - Notification emitted after a state change
//! - [`SignedInvocation`] - A ledger call signed by its caller
//!
//! ## Canonicalization
//!
//! Invocations are signed over deterministic CBOR. See [`canonical`] module.

pub mod canonical;
pub mod crypto;
pub mod error;
pub mod event;
pub mod invocation;
pub mod types;

pub use canonical::{canonical_invocation_bytes, signed_message, SIGN_DOMAIN};
pub use crypto::{Ed25519Signature, Keypair, Principal};
pub use error::{CoreError, Result};
pub use event::LedgerEvent;
pub use invocation::{Invocation, SignedInvocation};
pub use types::{DataReference, Operation, PermissionKey};
