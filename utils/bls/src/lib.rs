mod bytes;
mod keypair;
mod public_key;
mod secret_key;
mod signature;

pub use bytes::{PublicKeyBytes, SignatureBytes};
pub use keypair::Keypair;
pub use public_key::PublicKey;
pub use secret_key::SecretKey;
pub use signature::{aggregate, Signature};

pub const BLS_PUBLIC_KEY_BYTE_SIZE: usize = 48;
pub const BLS_SECRET_KEY_BYTE_SIZE: usize = 32;
pub const BLS_SIG_BYTE_SIZE: usize = 96;

/// Ciphersuite domain separation tag for beacon-chain signatures
/// (proof-of-possession scheme).
pub const DST: &[u8] = b"BLS_SIG_BLS12381G2_XMD:SHA-256_SSWU_RO_POP_";

/// A pubkey parsed and subgroup-checked once, then reused for every
/// verification involving its validator. Handed out by value.
pub type CachedPubkey = PublicKey;

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Error {
    InvalidPublicKey,
    InvalidSecretKey,
    InvalidSignature,
    InvalidByteLength { got: usize, expected: usize },
}

/// Parses and validates a raw pubkey into its cached form.
pub fn cached_pubkey(raw: &PublicKeyBytes) -> Result<CachedPubkey, Error> {
    PublicKey::from_bytes(raw.as_bytes())
}

/// Verifies an aggregate signature over one message against the aggregate of
/// `pubkeys`. Returns `false` for malformed signature bytes.
pub fn fast_aggregate_verify(
    pubkeys: &[CachedPubkey],
    message: &[u8],
    signature: &SignatureBytes,
) -> bool {
    if pubkeys.is_empty() {
        return false;
    }

    let signature = match blst::min_pk::Signature::from_bytes(signature.as_bytes()) {
        Ok(signature) => signature,
        Err(_) => return false,
    };

    let points: Vec<&blst::min_pk::PublicKey> =
        pubkeys.iter().map(PublicKey::as_point).collect();

    signature.fast_aggregate_verify(true, message, DST, &points) == blst::BLST_ERROR::BLST_SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keypair(seed: u8) -> Keypair {
        Keypair::from_ikm(&[seed; 32]).expect("Test")
    }

    #[test]
    fn single_key_fast_aggregate_verify() {
        let keypair = keypair(1);
        let message = [7; 32];

        let signature = keypair.sk.sign(&message);
        let signature_bytes = SignatureBytes::from(&signature);

        assert!(fast_aggregate_verify(
            &[keypair.pk.clone()],
            &message,
            &signature_bytes
        ));
        assert!(!fast_aggregate_verify(
            &[keypair.pk],
            &[8; 32],
            &signature_bytes
        ));
    }

    #[test]
    fn aggregated_signature_verifies_against_all_signers() {
        let pair_1 = keypair(1);
        let pair_2 = keypair(2);
        let message = [3; 32];

        let aggregate_signature =
            aggregate(&[pair_1.sk.sign(&message), pair_2.sk.sign(&message)]).expect("Test");
        let signature_bytes = SignatureBytes::from(&aggregate_signature);

        assert!(fast_aggregate_verify(
            &[pair_1.pk.clone(), pair_2.pk.clone()],
            &message,
            &signature_bytes
        ));

        // Dropping a signer invalidates the aggregate.
        assert!(!fast_aggregate_verify(
            &[pair_1.pk],
            &message,
            &signature_bytes
        ));
    }

    #[test]
    fn corrupted_signature_fails() {
        let keypair = keypair(4);
        let message = [1; 32];

        let mut bytes = [0; BLS_SIG_BYTE_SIZE];
        bytes.copy_from_slice(keypair.sk.sign(&message).as_bytes().as_slice());
        bytes[20] ^= 1;

        let corrupted = SignatureBytes::from_bytes(&bytes).expect("Test");
        assert!(!fast_aggregate_verify(&[keypair.pk], &message, &corrupted));
    }

    #[test]
    fn no_pubkeys_means_no_valid_signature() {
        let keypair = keypair(5);
        let message = [1; 32];
        let signature_bytes = SignatureBytes::from(&keypair.sk.sign(&message));

        assert!(!fast_aggregate_verify(&[], &message, &signature_bytes));
    }
}
