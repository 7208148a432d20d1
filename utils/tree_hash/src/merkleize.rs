use crate::BYTES_PER_CHUNK;
use ring::digest::{digest, SHA256};

pub(crate) fn hash(input: &[u8]) -> Vec<u8> {
    digest(&SHA256, input).as_ref().to_vec()
}

fn hash_concat(left: &[u8], right: &[u8]) -> Vec<u8> {
    let mut preimage = Vec::with_capacity(left.len() + right.len());
    preimage.extend_from_slice(left);
    preimage.extend_from_slice(right);
    hash(&preimage)
}

/// Roots of all-zero subtrees, indexed by height. `zero_hashes(0)[0]` is the
/// zero chunk itself.
fn zero_hashes(depth: usize) -> Vec<Vec<u8>> {
    let mut hashes = Vec::with_capacity(depth + 1);
    hashes.push(vec![0; BYTES_PER_CHUNK]);
    for height in 1..=depth {
        let child = &hashes[height - 1];
        hashes.push(hash_concat(child, child));
    }
    hashes
}

/// Merkle root of `bytes` split into 32-byte chunks, with the chunk count
/// padded to the next power of two.
pub fn merkle_root(bytes: &[u8]) -> Vec<u8> {
    merkleize_padded(bytes, 0)
}

/// Merkle root of `bytes` split into 32-byte chunks, padded with zero chunks
/// to `max(chunk_count, min_chunks)` rounded up to a power of two.
///
/// Padding is virtual: absent right subtrees are substituted with precomputed
/// zero-subtree roots, so a list limit of 2^40 chunks costs nothing beyond
/// the chunks actually present.
pub fn merkleize_padded(bytes: &[u8], min_chunks: usize) -> Vec<u8> {
    let chunk_count = (bytes.len() + BYTES_PER_CHUNK - 1) / BYTES_PER_CHUNK;
    let leaf_count = std::cmp::max(1, std::cmp::max(chunk_count, min_chunks)).next_power_of_two();
    let depth = leaf_count.trailing_zeros() as usize;

    let mut nodes: Vec<Vec<u8>> = bytes
        .chunks(BYTES_PER_CHUNK)
        .map(|unpadded| {
            let mut chunk = vec![0; BYTES_PER_CHUNK];
            chunk[..unpadded.len()].copy_from_slice(unpadded);
            chunk
        })
        .collect();

    let zeroes = zero_hashes(depth);

    if nodes.is_empty() {
        return zeroes[depth].clone();
    }

    for height in 0..depth {
        if nodes.len() % 2 == 1 {
            nodes.push(zeroes[height].clone());
        }
        nodes = nodes
            .chunks(2)
            .map(|pair| hash_concat(&pair[0], &pair[1]))
            .collect();
    }

    nodes.remove(0)
}

/// `hash(root || little_endian(length) || zero padding)`, the final step of
/// list hashing.
pub fn mix_in_length(root: &[u8], length: usize) -> Vec<u8> {
    let mut length_chunk = vec![0; BYTES_PER_CHUNK];
    length_chunk[..8].copy_from_slice(&(length as u64).to_le_bytes());
    hash_concat(root, &length_chunk)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(byte: u8) -> Vec<u8> {
        let mut chunk = vec![0; BYTES_PER_CHUNK];
        chunk[0] = byte;
        chunk
    }

    #[test]
    fn single_chunk_is_its_own_root() {
        assert_eq!(merkle_root(&[1, 2, 3]), {
            let mut expected = vec![0; BYTES_PER_CHUNK];
            expected[..3].copy_from_slice(&[1, 2, 3]);
            expected
        });
    }

    #[test]
    fn empty_bytes_root_is_zero_chunk() {
        assert_eq!(merkle_root(&[]), vec![0; BYTES_PER_CHUNK]);
    }

    #[test]
    fn two_chunks_are_hashed_pairwise() {
        let bytes: Vec<u8> = chunk(1).into_iter().chain(chunk(2)).collect();
        assert_eq!(merkle_root(&bytes), hash_concat(&chunk(1), &chunk(2)));
    }

    #[test]
    fn three_chunks_pad_to_four() {
        let bytes: Vec<u8> = chunk(1)
            .into_iter()
            .chain(chunk(2))
            .chain(chunk(3))
            .collect();

        let expected = hash_concat(
            &hash_concat(&chunk(1), &chunk(2)),
            &hash_concat(&chunk(3), &chunk(0)),
        );
        assert_eq!(merkle_root(&bytes), expected);
    }

    #[test]
    fn min_chunks_pads_with_zero_subtrees() {
        let expected = hash_concat(
            &hash_concat(&chunk(1), &chunk(0)),
            &hash_concat(&chunk(0), &chunk(0)),
        );
        assert_eq!(merkleize_padded(&chunk(1), 4), expected);
    }

    #[test]
    fn virtual_padding_matches_materialized_padding() {
        let bytes: Vec<u8> = chunk(7).into_iter().chain(chunk(9)).collect();

        let mut materialized = bytes.clone();
        materialized.resize(8 * BYTES_PER_CHUNK, 0);
        assert_eq!(merkleize_padded(&bytes, 8), merkle_root(&materialized));
    }

    #[test]
    fn mix_in_length_appends_little_endian_chunk() {
        let root = chunk(1);
        let mut length_chunk = vec![0; BYTES_PER_CHUNK];
        length_chunk[0] = 3;
        assert_eq!(mix_in_length(&root, 3), hash_concat(&root, &length_chunk));
    }

    #[test]
    fn sha256_known_answer() {
        let expected = "5e2bf57d3f40c4b6df69daf1936cb766f832374b4fc0259a7cbff06e2f70f269";
        assert_eq!(hex::encode(hash(b"lorem ipsum")), expected);
    }
}
