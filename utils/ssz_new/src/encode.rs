#![allow(clippy::use_self)]

use crate::utils::*;
use crate::*;
use ethereum_types::{H256, U128, U256};

macro_rules! encode_for_uintn {
    ( $(($type_ident: ty, $size_in_bits: expr)),* ) => { $(
        impl SszEncode for $type_ident {
            fn as_ssz_bytes(&self) -> Vec<u8> {
                self.to_le_bytes().to_vec()
            }

            fn is_ssz_fixed_len() -> bool {
                true
            }
        }
    )* };
}

encode_for_uintn!(
    (u8, 8),
    (u16, 16),
    (u32, 32),
    (u64, 64),
    (usize, std::mem::size_of::<usize>() * 8)
);

macro_rules! encode_for_u8_array {
    ($size: expr) => {
        impl SszEncode for [u8; $size] {
            fn as_ssz_bytes(&self) -> Vec<u8> {
                self.to_vec()
            }

            fn is_ssz_fixed_len() -> bool {
                true
            }
        }
    };
}

encode_for_u8_array!(4);
encode_for_u8_array!(32);
encode_for_u8_array!(48);
encode_for_u8_array!(96);

impl SszEncode for bool {
    fn as_ssz_bytes(&self) -> Vec<u8> {
        let byte = if *self { 0b0000_0001 } else { 0b0000_0000 };
        vec![byte]
    }

    fn is_ssz_fixed_len() -> bool {
        true
    }
}

impl<T: SszEncode> SszEncode for Vec<T> {
    fn as_ssz_bytes(&self) -> Vec<u8> {
        let mut fixed_parts = Vec::with_capacity(self.len());
        for element in self {
            fixed_parts.push(if T::is_ssz_fixed_len() {
                Some(element.as_ssz_bytes())
            } else {
                None
            });
        }

        let mut variable_parts = Vec::with_capacity(self.len());
        for element in self {
            variable_parts.push(if T::is_ssz_fixed_len() {
                vec![]
            } else {
                element.as_ssz_bytes()
            });
        }

        encode_items_from_parts(&fixed_parts, &variable_parts)
    }

    fn is_ssz_fixed_len() -> bool {
        false
    }
}

impl SszEncode for H256 {
    fn as_ssz_bytes(&self) -> Vec<u8> {
        self.as_bytes().to_vec()
    }

    fn is_ssz_fixed_len() -> bool {
        true
    }
}

impl SszEncode for U256 {
    fn as_ssz_bytes(&self) -> Vec<u8> {
        let mut result = vec![0; 32];
        self.to_little_endian(&mut result);
        result
    }

    fn is_ssz_fixed_len() -> bool {
        true
    }
}

impl SszEncode for U128 {
    fn as_ssz_bytes(&self) -> Vec<u8> {
        let mut result = vec![0; 16];
        self.to_little_endian(&mut result);
        result
    }

    fn is_ssz_fixed_len() -> bool {
        true
    }
}
