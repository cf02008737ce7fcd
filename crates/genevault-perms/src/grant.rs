//! Grant policies.
//!
//! A grant or revoke flips exactly one PermissionSet entry. Which entry, and
//! who may flip it, depends on the [`GrantPolicy`] the ledger was created with.

use serde::{Deserialize, Serialize};

use genevault_core::{Operation, PermissionKey, Principal};

use crate::error::{PermsError, Result};

/// Who may call `grant_access` / `revoke_access`, and which entry they flip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrantPolicy {
    /// Only the administrative owner may grant or revoke.
    ///
    /// The entry flipped is keyed with the *reader argument* as owner and the
    /// caller as reader: `grant_access(admin, u)` lets the admin read `u`.
    /// This is the literal behaviour of the deployed contract.
    #[default]
    AdminControlled,

    /// Every principal manages its own allow-list.
    ///
    /// `grant_access(owner, reader)` lets `reader` read `owner`.
    OwnerControlled,
}

/// The ledger's grant authority: its fixed admin and active policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Authority {
    admin: Principal,
    policy: GrantPolicy,
}

impl Authority {
    pub fn new(admin: Principal, policy: GrantPolicy) -> Self {
        Self { admin, policy }
    }

    /// The administrative owner fixed at ledger creation.
    pub fn admin(&self) -> &Principal {
        &self.admin
    }

    pub fn policy(&self) -> GrantPolicy {
        self.policy
    }

    pub fn is_admin(&self, principal: &Principal) -> bool {
        &self.admin == principal
    }

    /// Resolve the entry a `grant_access` / `revoke_access` call flips.
    ///
    /// Fails with `Unauthorized(op)` when the policy forbids the caller.
    pub fn grant_target(
        &self,
        op: Operation,
        caller: &Principal,
        reader: &Principal,
    ) -> Result<PermissionKey> {
        debug_assert!(op.is_permission_change());
        match self.policy {
            GrantPolicy::AdminControlled => {
                if !self.is_admin(caller) {
                    return Err(PermsError::Unauthorized(op));
                }
                Ok(PermissionKey::new(*reader, *caller))
            }
            GrantPolicy::OwnerControlled => Ok(PermissionKey::new(*caller, *reader)),
        }
    }

    /// Resolve the entry an admin-moderated `grant_access_for` /
    /// `revoke_access_for` call flips.
    ///
    /// Only the admin may moderate, whatever the policy.
    pub fn moderated_target(
        &self,
        op: Operation,
        caller: &Principal,
        owner: &Principal,
        reader: &Principal,
    ) -> Result<PermissionKey> {
        debug_assert!(op.is_permission_change());
        if !self.is_admin(caller) {
            return Err(PermsError::Unauthorized(op));
        }
        Ok(PermissionKey::new(*owner, *reader))
    }
}
