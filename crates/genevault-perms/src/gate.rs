//! Read gating.
//!
//! A read of `owner`'s reference by `caller` succeeds if the caller is the
//! owner or the `(owner, caller)` entry is granted. The self case never
//! consults the PermissionSet, so no entry can take an owner's access away.

use genevault_core::{Operation, PermissionKey, Principal};

use crate::error::{PermsError, Result};

/// What a read needs before it may proceed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReadCheck {
    /// The caller owns the reference.
    SelfAccess,
    /// The given entry must be granted.
    NeedsGrant(PermissionKey),
}

impl ReadCheck {
    pub fn for_call(caller: &Principal, owner: &Principal) -> Self {
        let key = PermissionKey::new(*owner, *caller);
        if key.is_self() {
            ReadCheck::SelfAccess
        } else {
            ReadCheck::NeedsGrant(key)
        }
    }

    /// Decide the read, given a lookup of the entry (only called when needed).
    pub fn decide<E>(
        self,
        lookup: impl FnOnce(&PermissionKey) -> std::result::Result<bool, E>,
    ) -> std::result::Result<bool, E> {
        match self {
            ReadCheck::SelfAccess => Ok(true),
            ReadCheck::NeedsGrant(key) => lookup(&key),
        }
    }
}

/// Turn a read decision into the operation's result.
pub fn authorize_read(allowed: bool) -> Result<()> {
    if allowed {
        Ok(())
    } else {
        Err(PermsError::Unauthorized(Operation::GetReference))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::convert::Infallible;

    fn principal(b: u8) -> Principal {
        Principal::from_bytes([b; 32])
    }

    #[test]
    fn test_self_read_skips_lookup() {
        let check = ReadCheck::for_call(&principal(1), &principal(1));
        assert_eq!(check, ReadCheck::SelfAccess);

        let allowed = check
            .decide(|_| -> std::result::Result<bool, Infallible> {
                panic!("self reads must not consult the permission set")
            })
            .unwrap();
        assert!(allowed);
    }

    #[test]
    fn test_other_read_uses_owner_reader_key() {
        let check = ReadCheck::for_call(&principal(2), &principal(1));
        assert_eq!(
            check,
            ReadCheck::NeedsGrant(PermissionKey::new(principal(1), principal(2)))
        );

        let denied = check.decide(|_| Ok::<_, Infallible>(false)).unwrap();
        assert_eq!(
            authorize_read(denied),
            Err(PermsError::Unauthorized(Operation::GetReference))
        );
    }

    #[test]
    fn test_lookup_error_propagates() {
        let check = ReadCheck::for_call(&principal(2), &principal(1));
        let result = check.decide(|_| Err::<bool, &str>("disk on fire"));
        assert_eq!(result, Err("disk on fire"));
    }
}
