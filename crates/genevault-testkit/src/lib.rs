//! # GeneVault Testkit
//!
//! Testing utilities for GeneVault.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: Signed invocations with known canonical bytes and
//!   signatures, for cross-platform verification
//! - **Generators**: Proptest strategies for principals, references, and call
//!   sequences
//! - **Fixtures**: A ledger with a fixed cast of seeded principals
//!
//! ## Golden Vectors
//!
//! ```rust
//! use genevault_testkit::vectors::verify_all_vectors;
//!
//! for (name, ok) in verify_all_vectors() {
//!     assert!(ok, "{name}");
//! }
//! ```
//!
//! ## Property Testing
//!
//! ```rust
//! use proptest::prelude::*;
//! use genevault_testkit::fixtures::LedgerFixture;
//! use genevault_testkit::generators::call_sequence;
//!
//! let fx = LedgerFixture::new();
//! let parties = vec![fx.admin_principal(), fx.user(0), fx.user(1)];
//!
//! proptest!(|(calls in call_sequence(parties.clone(), 32))| {
//!     let mut fx = LedgerFixture::new();
//!     for call in &calls {
//!         let _ = fx.ledger.apply(&call.caller, &call.invocation);
//!     }
//!     prop_assert!(fx.sink.len() <= calls.len());
//! });
//! ```
//!
//! ## Test Fixtures
//!
//! ```rust
//! use genevault_testkit::fixtures::LedgerFixture;
//!
//! let mut fx = LedgerFixture::new();
//! let (u1, u2) = (fx.user(0), fx.user(1));
//! fx.ledger.set_reference(&u1, "hash123").unwrap();
//! assert!(fx.ledger.get_reference(&u2, &u1).unwrap_err().is_unauthorized());
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{multi_party_keypairs, LedgerFixture};
pub use generators::{call_sequence, Call};
pub use vectors::{all_vectors, verify_all_vectors, GoldenVector};
