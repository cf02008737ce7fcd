//! # GeneVault Permissions
//!
//! Who may flip which PermissionSet entry, and who may read which reference.
//!
//! ## Overview
//!
//! The permission model is binary: an `(owner, reader)` entry is either
//! granted or not, with no expiry, scope, or history. Owners can always read
//! their own reference.
//!
//! ## Grant Policies
//!
//! - [`GrantPolicy::AdminControlled`]: a single administrative owner, fixed at
//!   ledger creation, is the only principal allowed to grant or revoke, and
//!   the entry it flips is keyed with the caller as reader.
//! - [`GrantPolicy::OwnerControlled`]: each owner manages its own allow-list.
//!
//! Under both policies the admin may moderate any entry explicitly through
//! [`Authority::moderated_target`].
//!
//! ## Usage
//!
//! ```rust
//! use genevault_core::{Operation, PermissionKey, Principal};
//! use genevault_perms::{Authority, GrantPolicy, ReadCheck};
//!
//! let admin = Principal::from_bytes([0xaa; 32]);
//! let owner = Principal::from_bytes([1; 32]);
//! let reader = Principal::from_bytes([2; 32]);
//!
//! let authority = Authority::new(admin, GrantPolicy::OwnerControlled);
//! let key = authority.grant_target(Operation::GrantAccess, &owner, &reader).unwrap();
//! assert_eq!(key, PermissionKey::new(owner, reader));
//!
//! assert_eq!(ReadCheck::for_call(&owner, &owner), ReadCheck::SelfAccess);
//! ```

pub mod error;
pub mod gate;
pub mod grant;

pub use error::{PermsError, Result};
pub use gate::{authorize_read, ReadCheck};
pub use grant::{Authority, GrantPolicy};
