use crate::{merkle_root, TreeHash, TreeHashType, BYTES_PER_CHUNK};
use ethereum_types::{H256, U128, U256};

macro_rules! impl_for_uintn {
    ( $(($type_ident: ty, $size_in_bits: expr)),* ) => { $(
        impl TreeHash for $type_ident {
            fn tree_hash_type() -> TreeHashType {
                TreeHashType::Basic
            }

            fn tree_hash_packed_encoding(&self) -> Vec<u8> {
                self.to_le_bytes().to_vec()
            }

            fn tree_hash_packing_factor() -> usize {
                BYTES_PER_CHUNK / ($size_in_bits / 8)
            }

            fn tree_hash_root(&self) -> Vec<u8> {
                merkle_root(&self.to_le_bytes())
            }
        }
    )* };
}

impl_for_uintn!(
    (u8, 8),
    (u16, 16),
    (u32, 32),
    (u64, 64),
    (usize, std::mem::size_of::<usize>() * 8)
);

impl TreeHash for bool {
    fn tree_hash_type() -> TreeHashType {
        TreeHashType::Basic
    }

    fn tree_hash_packed_encoding(&self) -> Vec<u8> {
        (*self as u8).tree_hash_packed_encoding()
    }

    fn tree_hash_packing_factor() -> usize {
        <u8 as TreeHash>::tree_hash_packing_factor()
    }

    fn tree_hash_root(&self) -> Vec<u8> {
        merkle_root(&[*self as u8])
    }
}

macro_rules! impl_for_u8_array {
    ($size: expr) => {
        impl TreeHash for [u8; $size] {
            fn tree_hash_type() -> TreeHashType {
                TreeHashType::Vector
            }

            fn tree_hash_packed_encoding(&self) -> Vec<u8> {
                self.to_vec()
            }

            fn tree_hash_packing_factor() -> usize {
                BYTES_PER_CHUNK / $size
            }

            fn tree_hash_root(&self) -> Vec<u8> {
                merkle_root(&self[..])
            }
        }
    };
}

impl_for_u8_array!(4);
impl_for_u8_array!(32);

impl TreeHash for H256 {
    fn tree_hash_type() -> TreeHashType {
        TreeHashType::Vector
    }

    fn tree_hash_packed_encoding(&self) -> Vec<u8> {
        self.as_bytes().to_vec()
    }

    fn tree_hash_packing_factor() -> usize {
        1
    }

    fn tree_hash_root(&self) -> Vec<u8> {
        self.as_bytes().to_vec()
    }
}

impl TreeHash for U256 {
    fn tree_hash_type() -> TreeHashType {
        TreeHashType::Basic
    }

    fn tree_hash_packed_encoding(&self) -> Vec<u8> {
        let mut bytes = vec![0; 32];
        self.to_little_endian(&mut bytes);
        bytes
    }

    fn tree_hash_packing_factor() -> usize {
        1
    }

    fn tree_hash_root(&self) -> Vec<u8> {
        self.tree_hash_packed_encoding()
    }
}

impl TreeHash for U128 {
    fn tree_hash_type() -> TreeHashType {
        TreeHashType::Basic
    }

    fn tree_hash_packed_encoding(&self) -> Vec<u8> {
        let mut bytes = vec![0; 16];
        self.to_little_endian(&mut bytes);
        bytes
    }

    fn tree_hash_packing_factor() -> usize {
        2
    }

    fn tree_hash_root(&self) -> Vec<u8> {
        merkle_root(&self.tree_hash_packed_encoding())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uint_roots_are_padded_chunks() {
        let root = 5_u64.tree_hash_root();
        let mut expected = vec![0; BYTES_PER_CHUNK];
        expected[0] = 5;
        assert_eq!(root, expected);

        let root = u16::max_value().tree_hash_root();
        let mut expected = vec![0; BYTES_PER_CHUNK];
        expected[0] = 0xff;
        expected[1] = 0xff;
        assert_eq!(root, expected);
    }

    #[test]
    fn bool_root() {
        let mut expected = vec![0; BYTES_PER_CHUNK];
        assert_eq!(false.tree_hash_root(), expected);
        expected[0] = 1;
        assert_eq!(true.tree_hash_root(), expected);
    }

    #[test]
    fn h256_root_is_identity() {
        let value = H256::from([3; 32]);
        assert_eq!(value.tree_hash_root(), value.as_bytes().to_vec());
    }

    #[test]
    fn packing_factors() {
        assert_eq!(<u8 as TreeHash>::tree_hash_packing_factor(), 32);
        assert_eq!(<u64 as TreeHash>::tree_hash_packing_factor(), 4);
        assert_eq!(<H256 as TreeHash>::tree_hash_packing_factor(), 1);
    }
}
