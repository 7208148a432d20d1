use bls::{CachedPubkey, SignatureBytes};
use ring::digest::{digest, SHA256};
use tree_hash::TreeHash;
use types::primitives::H256;

pub fn hash(input: &[u8]) -> Vec<u8> {
    digest(&SHA256, input).as_ref().to_vec()
}

pub fn hash_tree_root<T: TreeHash>(object: &T) -> H256 {
    H256::from_slice(&object.tree_hash_root())
}

/// Verifies one aggregate signature over `message` against every pubkey at
/// once. The cached pubkeys must come from the registry in index order.
pub fn fast_aggregate_verify(
    pubkeys: &[CachedPubkey],
    message: H256,
    signature: &SignatureBytes,
) -> bool {
    bls::fast_aggregate_verify(pubkeys, message.as_bytes(), signature)
}
