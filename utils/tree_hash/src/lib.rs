mod impls;
mod merkleize;

pub use merkleize::{merkle_root, merkleize_padded, mix_in_length};

pub const BYTES_PER_CHUNK: usize = 32;
pub const HASHSIZE: usize = 32;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TreeHashType {
    Basic,
    Vector,
    List,
    Container,
}

pub trait TreeHash {
    fn tree_hash_type() -> TreeHashType;

    fn tree_hash_packed_encoding(&self) -> Vec<u8>;

    fn tree_hash_packing_factor() -> usize;

    fn tree_hash_root(&self) -> Vec<u8>;
}

impl<T: TreeHash> TreeHash for &T {
    fn tree_hash_type() -> TreeHashType {
        T::tree_hash_type()
    }

    fn tree_hash_packed_encoding(&self) -> Vec<u8> {
        T::tree_hash_packed_encoding(*self)
    }

    fn tree_hash_packing_factor() -> usize {
        T::tree_hash_packing_factor()
    }

    fn tree_hash_root(&self) -> Vec<u8> {
        T::tree_hash_root(*self)
    }
}
