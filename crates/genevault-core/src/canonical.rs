//! Canonical CBOR encoding of invocations.
//!
//! Signatures cover these bytes, so the encoding must be identical on every
//! platform. The subset used here follows RFC 8949 Core Deterministic Encoding:
//! - Maps with small unsigned integer keys, written in ascending key order
//! - Integers and lengths use the smallest valid encoding
//! - Definite lengths only
//! - Absent optional fields are omitted, never written as null

use crate::crypto::Principal;
use crate::invocation::Invocation;

/// Domain separator prepended to the canonical bytes before signing.
pub const SIGN_DOMAIN: &[u8] = b"genevault/invocation/v1\0";

/// Invocation field keys (integer keys for compact encoding).
///
/// Keys 0-23 encode as single bytes in CBOR.
mod keys {
    pub const OPERATION: u64 = 0;
    pub const CALLER: u64 = 1;
    pub const OWNER: u64 = 2;
    pub const READER: u64 = 3;
    pub const REFERENCE: u64 = 4;
}

/// Encode `(caller, invocation)` to canonical CBOR bytes.
pub fn canonical_invocation_bytes(caller: &Principal, invocation: &Invocation) -> Vec<u8> {
    let owner = invocation.owner();
    let reader = invocation.reader();
    let reference = invocation.reference();

    let len = 2 + owner.is_some() as u64 + reader.is_some() as u64 + reference.is_some() as u64;

    let mut buf = Vec::with_capacity(128);
    encode_head(&mut buf, 5, len);

    encode_head(&mut buf, 0, keys::OPERATION);
    encode_head(&mut buf, 0, invocation.operation().to_u8() as u64);

    encode_head(&mut buf, 0, keys::CALLER);
    encode_bytes(&mut buf, caller.as_bytes());

    if let Some(owner) = owner {
        encode_head(&mut buf, 0, keys::OWNER);
        encode_bytes(&mut buf, owner.as_bytes());
    }
    if let Some(reader) = reader {
        encode_head(&mut buf, 0, keys::READER);
        encode_bytes(&mut buf, reader.as_bytes());
    }
    if let Some(reference) = reference {
        encode_head(&mut buf, 0, keys::REFERENCE);
        encode_text(&mut buf, reference.as_str());
    }

    buf
}

/// Construct the message a caller signs: `SIGN_DOMAIN || canonical bytes`.
pub fn signed_message(caller: &Principal, invocation: &Invocation) -> Vec<u8> {
    let mut msg = SIGN_DOMAIN.to_vec();
    msg.extend_from_slice(&canonical_invocation_bytes(caller, invocation));
    msg
}

/// Write a CBOR initial byte plus argument for the given major type.
fn encode_head(buf: &mut Vec<u8>, major: u8, n: u64) {
    let mt = major << 5;
    if n < 24 {
        buf.push(mt | (n as u8));
    } else if n <= 0xff {
        buf.push(mt | 24);
        buf.push(n as u8);
    } else if n <= 0xffff {
        buf.push(mt | 25);
        buf.extend_from_slice(&(n as u16).to_be_bytes());
    } else if n <= 0xffff_ffff {
        buf.push(mt | 26);
        buf.extend_from_slice(&(n as u32).to_be_bytes());
    } else {
        buf.push(mt | 27);
        buf.extend_from_slice(&n.to_be_bytes());
    }
}

/// Encode a byte string (major type 2).
fn encode_bytes(buf: &mut Vec<u8>, bytes: &[u8]) {
    encode_head(buf, 2, bytes.len() as u64);
    buf.extend_from_slice(bytes);
}

/// Encode a text string (major type 3).
fn encode_text(buf: &mut Vec<u8>, s: &str) {
    encode_head(buf, 3, s.len() as u64);
    buf.extend_from_slice(s.as_bytes());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DataReference;
    use ciborium::value::Value;
    use proptest::prelude::*;

    fn principal(b: u8) -> Principal {
        Principal::from_bytes([b; 32])
    }

    #[test]
    fn test_encoding_is_valid_cbor() {
        let inv = Invocation::SetReference {
            reference: DataReference::from("hash123"),
        };
        let bytes = canonical_invocation_bytes(&principal(1), &inv);
        let value: Value = ciborium::from_reader(&bytes[..]).unwrap();

        let Value::Map(entries) = value else {
            panic!("expected map");
        };
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].0, Value::Integer(0.into()));
        assert_eq!(entries[0].1, Value::Integer(1.into()));
        assert_eq!(entries[1].1, Value::Bytes(vec![1u8; 32]));
        assert_eq!(entries[2].1, Value::Text("hash123".into()));
    }

    #[test]
    fn test_encoding_is_deterministic() {
        let inv = Invocation::GrantAccessFor {
            owner: principal(2),
            reader: principal(3),
        };
        assert_eq!(
            canonical_invocation_bytes(&principal(1), &inv),
            canonical_invocation_bytes(&principal(1), &inv)
        );
    }

    #[test]
    fn test_caller_changes_bytes() {
        let inv = Invocation::GetReference { owner: principal(2) };
        assert_ne!(
            canonical_invocation_bytes(&principal(1), &inv),
            canonical_invocation_bytes(&principal(9), &inv)
        );
    }

    #[test]
    fn test_long_reference_uses_wide_length() {
        let long = "a".repeat(300);
        let inv = Invocation::SetReference {
            reference: DataReference::new(long.clone()),
        };
        let bytes = canonical_invocation_bytes(&principal(1), &inv);
        let value: Value = ciborium::from_reader(&bytes[..]).unwrap();
        let Value::Map(entries) = value else {
            panic!("expected map");
        };
        assert_eq!(entries[2].1, Value::Text(long));
    }

    #[test]
    fn test_signed_message_has_domain_prefix() {
        let inv = Invocation::RevokeAccess { reader: principal(4) };
        let msg = signed_message(&principal(1), &inv);
        assert!(msg.starts_with(SIGN_DOMAIN));
    }

    fn invocation() -> impl Strategy<Value = Invocation> {
        let p = || any::<[u8; 32]>().prop_map(Principal::from_bytes);
        prop_oneof![
            ".{0,300}".prop_map(|r| Invocation::SetReference {
                reference: DataReference::new(r)
            }),
            p().prop_map(|reader| Invocation::GrantAccess { reader }),
            p().prop_map(|reader| Invocation::RevokeAccess { reader }),
            (p(), p()).prop_map(|(owner, reader)| Invocation::GrantAccessFor { owner, reader }),
            (p(), p()).prop_map(|(owner, reader)| Invocation::RevokeAccessFor { owner, reader }),
            p().prop_map(|owner| Invocation::GetReference { owner }),
        ]
    }

    fn field(entries: &[(Value, Value)], key: u64) -> Option<&Value> {
        entries
            .iter()
            .find(|(k, _)| *k == Value::Integer(key.into()))
            .map(|(_, v)| v)
    }

    fn as_principal(value: Option<&Value>) -> Option<Principal> {
        match value {
            Some(Value::Bytes(b)) => Principal::try_from(&b[..]).ok(),
            _ => None,
        }
    }

    proptest! {
        #[test]
        fn test_canonical_bytes_decode_to_same_call(
            caller in any::<[u8; 32]>().prop_map(Principal::from_bytes),
            inv in invocation(),
        ) {
            let bytes = canonical_invocation_bytes(&caller, &inv);
            let value: Value = ciborium::from_reader(&bytes[..]).unwrap();

            // ciborium writes shortest-form heads, so re-encoding must be byte-identical
            let mut reencoded = Vec::new();
            ciborium::into_writer(&value, &mut reencoded).unwrap();
            prop_assert_eq!(&reencoded, &bytes);

            let Value::Map(entries) = value else {
                return Err(TestCaseError::fail("expected map"));
            };
            let keys: Vec<_> = entries.iter().map(|(k, _)| k.clone()).collect();
            let mut sorted = keys.clone();
            sorted.sort_by_key(|k| k.as_integer().map(i128::from));
            sorted.dedup();
            prop_assert_eq!(keys, sorted);

            prop_assert_eq!(
                field(&entries, 0),
                Some(&Value::Integer(inv.operation().to_u8().into()))
            );
            prop_assert_eq!(as_principal(field(&entries, 1)), Some(caller));
            prop_assert_eq!(as_principal(field(&entries, 2)), inv.owner().copied());
            prop_assert_eq!(as_principal(field(&entries, 3)), inv.reader().copied());
            prop_assert_eq!(
                field(&entries, 4).and_then(Value::as_text),
                inv.reference().map(DataReference::as_str)
            );
        }
    }
}
