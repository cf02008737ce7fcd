//! Signed ledger invocations.
//!
//! Hosts that cannot vouch for caller identity themselves accept
//! [`SignedInvocation`]s: the caller signs the canonical encoding of the call
//! and the ledger derives the verified caller from the signature.

use serde::{Deserialize, Serialize};

use crate::canonical::signed_message;
use crate::crypto::{Ed25519Signature, Keypair, Principal};
use crate::error::{CoreError, Result};
use crate::types::{DataReference, Operation};

/// One ledger call, without the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Invocation {
    SetReference { reference: DataReference },
    GrantAccess { reader: Principal },
    RevokeAccess { reader: Principal },
    GrantAccessFor { owner: Principal, reader: Principal },
    RevokeAccessFor { owner: Principal, reader: Principal },
    GetReference { owner: Principal },
}

impl Invocation {
    pub fn operation(&self) -> Operation {
        match self {
            Self::SetReference { .. } => Operation::SetReference,
            Self::GrantAccess { .. } => Operation::GrantAccess,
            Self::RevokeAccess { .. } => Operation::RevokeAccess,
            Self::GrantAccessFor { .. } => Operation::GrantAccessFor,
            Self::RevokeAccessFor { .. } => Operation::RevokeAccessFor,
            Self::GetReference { .. } => Operation::GetReference,
        }
    }

    /// Explicit owner argument, if the call has one.
    pub fn owner(&self) -> Option<&Principal> {
        match self {
            Self::GrantAccessFor { owner, .. }
            | Self::RevokeAccessFor { owner, .. }
            | Self::GetReference { owner } => Some(owner),
            _ => None,
        }
    }

    /// Reader argument, if the call has one.
    pub fn reader(&self) -> Option<&Principal> {
        match self {
            Self::GrantAccess { reader }
            | Self::RevokeAccess { reader }
            | Self::GrantAccessFor { reader, .. }
            | Self::RevokeAccessFor { reader, .. } => Some(reader),
            _ => None,
        }
    }

    /// Reference argument, if the call has one.
    pub fn reference(&self) -> Option<&DataReference> {
        match self {
            Self::SetReference { reference } => Some(reference),
            _ => None,
        }
    }

    /// Sign this invocation as the keypair's principal.
    pub fn sign(self, keypair: &Keypair) -> SignedInvocation {
        let caller = keypair.principal();
        let signature = keypair.sign(&signed_message(&caller, &self));
        SignedInvocation {
            caller,
            invocation: self,
            signature,
        }
    }
}

/// An invocation together with the claimed caller and its signature.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignedInvocation {
    /// The claimed caller. Only trusted after [`SignedInvocation::verify`].
    pub caller: Principal,
    pub invocation: Invocation,
    pub signature: Ed25519Signature,
}

impl SignedInvocation {
    /// Check the signature and return the authenticated caller.
    pub fn verify(&self) -> Result<Principal> {
        let msg = signed_message(&self.caller, &self.invocation);
        self.caller.verify(&msg, &self.signature)?;
        Ok(self.caller)
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
