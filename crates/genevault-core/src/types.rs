//! Strong type definitions for the ledger.
//!
//! All identifiers are newtypes to prevent misuse at compile time.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::crypto::Principal;

/// An opaque pointer to data held by an external storage system.
///
/// Usually a content hash. The ledger never interprets or validates it; the
/// empty reference stands for "nothing stored".
#[derive(Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DataReference(String);

impl DataReference {
    /// The empty reference, returned for owners that never uploaded.
    pub const EMPTY: Self = Self(String::new());

    /// Wrap an identifier as-is.
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    /// Derive a content address (hex Blake3 digest) for a payload.
    ///
    /// Callers usually hash the encrypted payload before uploading it elsewhere.
    pub fn from_content(content: &[u8]) -> Self {
        Self(blake3::hash(content).to_hex().to_string())
    }

    /// Get the identifier.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this is the empty reference.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for DataReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DataReference({:?})", self.0)
    }
}

impl fmt::Display for DataReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DataReference {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl From<String> for DataReference {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl AsRef<str> for DataReference {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Key of a single PermissionSet entry: may `reader` read `owner`'s reference?
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PermissionKey {
    /// Whose reference the entry guards.
    pub owner: Principal,
    /// Who is allowed (or not) to read it.
    pub reader: Principal,
}

impl PermissionKey {
    pub fn new(owner: Principal, reader: Principal) -> Self {
        Self { owner, reader }
    }

    /// True when the reader is the owner, which needs no entry at all.
    pub fn is_self(&self) -> bool {
        self.owner == self.reader
    }
}

/// The ledger operations, used for signing tags and error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Operation {
    SetReference = 0x01,
    GrantAccess = 0x02,
    RevokeAccess = 0x03,
    GrantAccessFor = 0x04,
    RevokeAccessFor = 0x05,
    GetReference = 0x06,
}

impl Operation {
    /// Convert to u8 for encoding.
    pub fn to_u8(self) -> u8 {
        self as u8
    }

    /// Try to parse from u8.
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0x01 => Some(Self::SetReference),
            0x02 => Some(Self::GrantAccess),
            0x03 => Some(Self::RevokeAccess),
            0x04 => Some(Self::GrantAccessFor),
            0x05 => Some(Self::RevokeAccessFor),
            0x06 => Some(Self::GetReference),
            _ => None,
        }
    }

    /// Stable snake_case name, used in logs.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::SetReference => "set_reference",
            Self::GrantAccess => "grant_access",
            Self::RevokeAccess => "revoke_access",
            Self::GrantAccessFor => "grant_access_for",
            Self::RevokeAccessFor => "revoke_access_for",
            Self::GetReference => "get_reference",
        }
    }

    /// Whether the operation writes to the PermissionSet.
    pub fn is_permission_change(self) -> bool {
        !matches!(self, Self::SetReference | Self::GetReference)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
