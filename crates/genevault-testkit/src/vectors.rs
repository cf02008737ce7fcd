//! Golden vectors for signed invocations.
//!
//! Each vector fixes a signer seed and a call, and records the canonical
//! bytes and Ed25519 signature any conforming implementation must produce.
//! Ed25519 signing is deterministic, so the signature is fixed too.

use genevault_core::{
    canonical_invocation_bytes, DataReference, Invocation, Keypair, Principal, SignedInvocation,
};

/// A golden test vector.
#[derive(Debug, Clone)]
pub struct GoldenVector {
    /// Human-readable name for the vector.
    pub name: &'static str,
    /// Seed of the signing keypair.
    pub seed: [u8; 32],
    /// The call being signed.
    pub invocation: Invocation,
    /// Expected caller principal (hex).
    pub expected_caller: &'static str,
    /// Expected canonical bytes (hex), without the domain separator.
    pub expected_canonical: &'static str,
    /// Expected signature over `SIGN_DOMAIN || canonical` (hex).
    pub expected_signature: &'static str,
}

fn seeded(b: u8) -> Principal {
    Keypair::from_seed(&[b; 32]).principal()
}

/// Get all golden test vectors.
pub fn all_vectors() -> Vec<GoldenVector> {
    vec![
        GoldenVector {
            name: "owner uploads hash123",
            seed: [0x01; 32],
            invocation: Invocation::SetReference {
                reference: DataReference::from("hash123"),
            },
            expected_caller: "8a88e3dd7409f195fd52db2d3cba5d72ca6709bf1d94121bf3748801b40f6f5c",
            expected_canonical: "a300010158208a88e3dd7409f195fd52db2d3cba5d72ca6709bf1d94121bf3748801b40f6f5c046768617368313233",
            expected_signature: "12d066da6cbc96c805808c0ec204391c8fdf3c8ddb04692c375330a4a2a208783c484bfcd4c98f2b4308231a98b6aecfe472c9809a59565ab94f0d9442ff9d0a",
        },
        GoldenVector {
            name: "admin grants on user 1",
            seed: [0xa0; 32],
            invocation: Invocation::GrantAccess { reader: seeded(0x01) },
            expected_caller: "b533d8ad9fcfbdde0b481c1b334ddc3c53412fd614564e7e5afd020368d382c3",
            expected_canonical: "a30002015820b533d8ad9fcfbdde0b481c1b334ddc3c53412fd614564e7e5afd020368d382c30358208a88e3dd7409f195fd52db2d3cba5d72ca6709bf1d94121bf3748801b40f6f5c",
            expected_signature: "6fe358614103f8df8a4199f14f77971de4aa2d49bba8b3598b64077dae1aba38c08bf2da4e44cc3beb95763110cee3b60311ab94537330697d107918df919001",
        },
        GoldenVector {
            name: "admin lets user 2 read user 1",
            seed: [0xa0; 32],
            invocation: Invocation::GrantAccessFor {
                owner: seeded(0x01),
                reader: seeded(0x02),
            },
            expected_caller: "b533d8ad9fcfbdde0b481c1b334ddc3c53412fd614564e7e5afd020368d382c3",
            expected_canonical: "a40004015820b533d8ad9fcfbdde0b481c1b334ddc3c53412fd614564e7e5afd020368d382c30258208a88e3dd7409f195fd52db2d3cba5d72ca6709bf1d94121bf3748801b40f6f5c0358208139770ea87d175f56a35466c34c7ecccb8d8a91b4ee37a25df60f5b8fc9b394",
            expected_signature: "027034a5253653f9e20da2f8548e4d48bc4e852116770715910fb41dd4082bd57dadadd1d177dd5c4197fd4c88cc998136657bc7d84185f681bcb63dad0afb00",
        },
        GoldenVector {
            name: "user 2 reads user 1",
            seed: [0x02; 32],
            invocation: Invocation::GetReference { owner: seeded(0x01) },
            expected_caller: "8139770ea87d175f56a35466c34c7ecccb8d8a91b4ee37a25df60f5b8fc9b394",
            expected_canonical: "a300060158208139770ea87d175f56a35466c34c7ecccb8d8a91b4ee37a25df60f5b8fc9b3940258208a88e3dd7409f195fd52db2d3cba5d72ca6709bf1d94121bf3748801b40f6f5c",
            expected_signature: "041dca4856aa0ac27327789a686d7f2fcebb719e9f6d3f590115f1488c110dd0c7a2ea60e7e41dfc9cf915c5fae880e08499d04aba5070b885f3d375ae3db207",
        },
        GoldenVector {
            name: "empty reference",
            seed: [0x00; 32],
            invocation: Invocation::SetReference {
                reference: DataReference::EMPTY,
            },
            expected_caller: "3b6a27bcceb6a42d62a3a8d02a6f0d73653215771de243a63ac048a18b59da29",
            expected_canonical: "a300010158203b6a27bcceb6a42d62a3a8d02a6f0d73653215771de243a63ac048a18b59da290460",
            expected_signature: "1f12680478212501edf44afa7813856a3fc93877ea6b3e0b02a4ca5e0ce940e97be9626d5cfe936e30f36a8685662d41932ab0696f2b1fe21bc2674355351900",
        },
    ]
}

/// Sign a vector's invocation with its seeded keypair.
pub fn sign_vector(vector: &GoldenVector) -> SignedInvocation {
    vector.invocation.clone().sign(&Keypair::from_seed(&vector.seed))
}

/// Check one vector's caller, canonical bytes, and signature.
pub fn verify_vector(vector: &GoldenVector) -> bool {
    let signed = sign_vector(vector);
    signed.caller.to_hex() == vector.expected_caller
        && hex::encode(canonical_invocation_bytes(&signed.caller, &signed.invocation))
            == vector.expected_canonical
        && signed.signature.to_hex() == vector.expected_signature
        && signed.verify().is_ok()
}

/// Verify every golden vector, reporting `(name, matches)`.
pub fn verify_all_vectors() -> Vec<(String, bool)> {
    all_vectors()
        .iter()
        .map(|v| (v.name.to_string(), verify_vector(v)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_vectors_match() {
        for vector in all_vectors() {
            let signed = sign_vector(&vector);
            assert_eq!(signed.caller.to_hex(), vector.expected_caller, "{}", vector.name);
            assert_eq!(
                hex::encode(canonical_invocation_bytes(&signed.caller, &signed.invocation)),
                vector.expected_canonical,
                "{}",
                vector.name
            );
            assert_eq!(
                signed.signature.to_hex(),
                vector.expected_signature,
                "{}",
                vector.name
            );
        }
    }

    #[test]
    fn test_vector_signature_does_not_transfer() {
        let vectors = all_vectors();
        let mut signed = sign_vector(&vectors[2]);
        signed.invocation = Invocation::GrantAccessFor {
            owner: seeded(0x01),
            reader: seeded(0x03),
        };

        assert!(signed.verify().is_err());
    }
}
