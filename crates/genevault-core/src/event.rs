//! Ledger events.
//!
//! Every successful mutation produces exactly one event. Hosts forward them
//! to indexers and UIs; the ledger itself never reads them back.

use serde::{Deserialize, Serialize};

use crate::crypto::Principal;
use crate::error::{CoreError, Result};
use crate::types::{DataReference, PermissionKey};

/// An observable notification emitted after a state change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LedgerEvent {
    /// An owner replaced its data reference.
    ReferenceUpdated {
        owner: Principal,
        reference: DataReference,
    },

    /// A PermissionSet entry was set to `true`.
    AccessGranted {
        /// The principal that invoked the grant.
        caller: Principal,
        owner: Principal,
        reader: Principal,
    },

    /// A PermissionSet entry was set to `false`.
    AccessRevoked {
        caller: Principal,
        owner: Principal,
        reader: Principal,
    },
}

impl LedgerEvent {
    pub fn access_granted(caller: Principal, key: PermissionKey) -> Self {
        Self::AccessGranted {
            caller,
            owner: key.owner,
            reader: key.reader,
        }
    }

    pub fn access_revoked(caller: Principal, key: PermissionKey) -> Self {
        Self::AccessRevoked {
            caller,
            owner: key.owner,
            reader: key.reader,
        }
    }

    /// Short name of the event kind.
    pub fn name(&self) -> &'static str {
        match self {
            Self::ReferenceUpdated { .. } => "reference_updated",
            Self::AccessGranted { .. } => "access_granted",
            Self::AccessRevoked { .. } => "access_revoked",
        }
    }

    /// The owner whose state changed.
    pub fn owner(&self) -> &Principal {
        match self {
            Self::ReferenceUpdated { owner, .. }
            | Self::AccessGranted { owner, .. }
            | Self::AccessRevoked { owner, .. } => owner,
        }
    }

    /// Serialize to CBOR bytes.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        ciborium::into_writer(self, &mut buf)
            .map_err(|e| CoreError::EncodingError(e.to_string()))?;
        Ok(buf)
    }

    /// Deserialize from CBOR bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        ciborium::from_reader(bytes).map_err(|e| CoreError::DecodingError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn principal(b: u8) -> Principal {
        Principal::from_bytes([b; 32])
    }

    #[test]
    fn test_event_cbor_decode() {
        let event = LedgerEvent::ReferenceUpdated {
            owner: principal(1),
            reference: DataReference::from("hash123"),
        };
        let bytes = event.to_bytes().unwrap();
        assert_eq!(LedgerEvent::from_bytes(&bytes).unwrap(), event);
    }

    #[test]
    fn test_event_json_is_tagged() {
        let event = LedgerEvent::access_granted(principal(1), PermissionKey::new(principal(2), principal(3)));
        let json: serde_json::Value = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "access_granted");
        assert_eq!(event.name(), "access_granted");
        assert_eq!(event.owner(), &principal(2));
    }

    #[test]
    fn test_garbage_does_not_decode() {
        assert!(matches!(
            LedgerEvent::from_bytes(&[0xff, 0x00, 0x13]),
            Err(CoreError::DecodingError(_))
        ));
    }
}
