#![allow(clippy::use_self)]

use crate::*;
use ethereum_types::{H256, U128, U256};

macro_rules! decode_for_uintn {
    ( $(($type_ident: ty, $size_in_bits: expr)),* ) => { $(
        impl SszDecode for $type_ident {
            fn from_ssz_bytes(bytes: &[u8]) -> Result<Self, SszDecodeError> {
                if bytes.len() == <Self as SszDecode>::ssz_fixed_len() {
                    let mut arr = [0; $size_in_bits / 8];
                    arr.clone_from_slice(bytes);
                    Ok(<$type_ident>::from_le_bytes(arr))
                } else {
                    Err(SszDecodeError::InvalidByteLength {
                        len: bytes.len(),
                        expected: <Self as SszDecode>::ssz_fixed_len(),
                    })
                }
            }

            fn is_ssz_fixed_len() -> bool {
                true
            }

            fn ssz_fixed_len() -> usize {
                $size_in_bits / 8
            }
        }
    )* };
}

decode_for_uintn!(
    (u8, 8),
    (u16, 16),
    (u32, 32),
    (u64, 64),
    (usize, std::mem::size_of::<usize>() * 8)
);

macro_rules! decode_for_u8_array {
    ($size: expr) => {
        impl SszDecode for [u8; $size] {
            fn from_ssz_bytes(bytes: &[u8]) -> Result<Self, SszDecodeError> {
                if bytes.len() == <Self as SszDecode>::ssz_fixed_len() {
                    let mut array: [u8; $size] = [0; $size];
                    array.copy_from_slice(bytes);

                    Ok(array)
                } else {
                    Err(SszDecodeError::InvalidByteLength {
                        len: bytes.len(),
                        expected: <Self as SszDecode>::ssz_fixed_len(),
                    })
                }
            }

            fn is_ssz_fixed_len() -> bool {
                true
            }

            fn ssz_fixed_len() -> usize {
                $size
            }
        }
    };
}

decode_for_u8_array!(4);
decode_for_u8_array!(32);
decode_for_u8_array!(48);
decode_for_u8_array!(96);

impl SszDecode for bool {
    fn from_ssz_bytes(bytes: &[u8]) -> Result<Self, SszDecodeError> {
        if bytes.len() == <Self as SszDecode>::ssz_fixed_len() {
            match bytes[0] {
                0 => Ok(false),
                1 => Ok(true),
                _ => Err(SszDecodeError::BytesInvalid(format!(
                    "Cannot deserialize bool from {}",
                    bytes[0]
                ))),
            }
        } else {
            Err(SszDecodeError::InvalidByteLength {
                len: bytes.len(),
                expected: <Self as SszDecode>::ssz_fixed_len(),
            })
        }
    }

    fn is_ssz_fixed_len() -> bool {
        true
    }

    fn ssz_fixed_len() -> usize {
        1
    }
}

impl<T: SszDecode> SszDecode for Vec<T> {
    fn from_ssz_bytes(bytes: &[u8]) -> Result<Self, SszDecodeError> {
        let bytes_len = bytes.len();
        let fixed_len = <T as SszDecode>::ssz_fixed_len();

        if bytes.is_empty() {
            Ok(vec![])
        } else if !T::is_ssz_fixed_len() {
            decode_variable_sized_items(bytes)
        } else if bytes_len % fixed_len == 0 {
            let mut result = Vec::with_capacity(bytes.len() / fixed_len);
            for chunk in bytes.chunks(fixed_len) {
                result.push(T::from_ssz_bytes(chunk)?);
            }

            Ok(result)
        } else {
            Err(SszDecodeError::InvalidByteLength {
                len: bytes_len,
                expected: bytes.len() / fixed_len + 1,
            })
        }
    }

    fn is_ssz_fixed_len() -> bool {
        false
    }
}

impl SszDecode for H256 {
    fn from_ssz_bytes(bytes: &[u8]) -> Result<Self, SszDecodeError> {
        let len = bytes.len();
        let expected = <Self as SszDecode>::ssz_fixed_len();

        if len == expected {
            Ok(H256::from_slice(bytes))
        } else {
            Err(SszDecodeError::InvalidByteLength { len, expected })
        }
    }

    fn is_ssz_fixed_len() -> bool {
        true
    }

    fn ssz_fixed_len() -> usize {
        32
    }
}

impl SszDecode for U256 {
    fn from_ssz_bytes(bytes: &[u8]) -> Result<Self, SszDecodeError> {
        let len = bytes.len();
        let expected = <Self as SszDecode>::ssz_fixed_len();

        if len == expected {
            Ok(U256::from_little_endian(bytes))
        } else {
            Err(SszDecodeError::InvalidByteLength { len, expected })
        }
    }

    fn is_ssz_fixed_len() -> bool {
        true
    }

    fn ssz_fixed_len() -> usize {
        32
    }
}

impl SszDecode for U128 {
    fn from_ssz_bytes(bytes: &[u8]) -> Result<Self, SszDecodeError> {
        let len = bytes.len();
        let expected = <Self as SszDecode>::ssz_fixed_len();

        if len == expected {
            Ok(U128::from_little_endian(bytes))
        } else {
            Err(SszDecodeError::InvalidByteLength { len, expected })
        }
    }

    fn is_ssz_fixed_len() -> bool {
        true
    }

    fn ssz_fixed_len() -> usize {
        16
    }
}
