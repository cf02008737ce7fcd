//! Proptest generators for property-based testing.

use proptest::prelude::*;

use genevault_core::{DataReference, Invocation, Keypair, Principal};

/// Generate a random keypair.
pub fn keypair() -> impl Strategy<Value = Keypair> {
    any::<[u8; 32]>().prop_map(|seed| Keypair::from_seed(&seed))
}

/// Generate a random principal.
///
/// Principals are opaque to the ledger, so raw bytes are enough; no valid
/// curve point is needed.
pub fn principal() -> impl Strategy<Value = Principal> {
    any::<[u8; 32]>().prop_map(Principal::from_bytes)
}

/// Generate a data reference: mostly hex digests, sometimes free text or empty.
pub fn reference() -> impl Strategy<Value = DataReference> {
    prop_oneof![
        4 => any::<[u8; 32]>().prop_map(|b| DataReference::new(hex::encode(b))),
        2 => "[a-zA-Z0-9:/._-]{1,64}".prop_map(DataReference::new),
        1 => Just(DataReference::EMPTY),
    ]
}

/// One unsigned ledger call, run with `AccessLedger::apply`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub caller: Principal,
    pub invocation: Invocation,
}

/// Generate a call whose principals are all drawn from `parties`.
pub fn call(parties: Vec<Principal>) -> impl Strategy<Value = Call> {
    assert!(!parties.is_empty(), "call() needs at least one party");
    let n = parties.len();

    (0..n, 0..n, 0..n, reference(), 0u8..6).prop_map(move |(c, o, r, reference, op)| {
        let (caller, owner, reader) = (parties[c], parties[o], parties[r]);
        let invocation = match op {
            0 => Invocation::SetReference { reference },
            1 => Invocation::GrantAccess { reader },
            2 => Invocation::RevokeAccess { reader },
            3 => Invocation::GrantAccessFor { owner, reader },
            4 => Invocation::RevokeAccessFor { owner, reader },
            _ => Invocation::GetReference { owner },
        };
        Call { caller, invocation }
    })
}

/// Generate up to `max_len` calls among `parties`.
pub fn call_sequence(
    parties: Vec<Principal>,
    max_len: usize,
) -> impl Strategy<Value = Vec<Call>> {
    prop::collection::vec(call(parties), 0..=max_len)
}
