use core::fmt;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use ssz_new::{SszDecode, SszDecodeError, SszEncode};
use tree_hash::{TreeHash, TreeHashType};

use crate::{Error, PublicKey, Signature, BLS_PUBLIC_KEY_BYTE_SIZE, BLS_SIG_BYTE_SIZE};

macro_rules! bytes_struct {
    ($name: ident, $size: expr, $parsed: ty, $doc: expr) => {
        #[doc = $doc]
        #[derive(Clone, Copy, PartialEq, Eq, Hash)]
        pub struct $name([u8; $size]);

        impl $name {
            pub fn empty() -> Self {
                Self([0; $size])
            }

            pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
                if bytes.len() == $size {
                    let mut array = [0; $size];
                    array.copy_from_slice(bytes);
                    Ok(Self(array))
                } else {
                    Err(Error::InvalidByteLength {
                        got: bytes.len(),
                        expected: $size,
                    })
                }
            }

            pub fn as_bytes(&self) -> &[u8] {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::empty()
            }
        }

        impl From<[u8; $size]> for $name {
            fn from(bytes: [u8; $size]) -> Self {
                Self(bytes)
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(f, "{}(0x{})", stringify!($name), hex::encode(&self.0[..]))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                write!(f, "0x{}", hex::encode(&self.0[..]))
            }
        }

        impl SszEncode for $name {
            fn as_ssz_bytes(&self) -> Vec<u8> {
                self.0.to_vec()
            }

            fn is_ssz_fixed_len() -> bool {
                true
            }
        }

        impl SszDecode for $name {
            fn from_ssz_bytes(bytes: &[u8]) -> Result<Self, SszDecodeError> {
                <[u8; $size]>::from_ssz_bytes(bytes).map(Self)
            }

            fn is_ssz_fixed_len() -> bool {
                true
            }

            fn ssz_fixed_len() -> usize {
                $size
            }
        }

        impl TreeHash for $name {
            fn tree_hash_type() -> TreeHashType {
                TreeHashType::Vector
            }

            fn tree_hash_packed_encoding(&self) -> Vec<u8> {
                unreachable!("Vector should never be packed")
            }

            fn tree_hash_packing_factor() -> usize {
                unreachable!("Vector should never be packed")
            }

            fn tree_hash_root(&self) -> Vec<u8> {
                tree_hash::merkle_root(&self.0[..])
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(&format!("0x{}", hex::encode(&self.0[..])))
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let encoded = String::deserialize(deserializer)?;
                let bytes =
                    hex::decode(encoded.trim_start_matches("0x")).map_err(D::Error::custom)?;
                Self::from_bytes(&bytes).map_err(|e| D::Error::custom(format!("{:?}", e)))
            }
        }
    };
}

bytes_struct!(
    PublicKeyBytes,
    BLS_PUBLIC_KEY_BYTE_SIZE,
    PublicKey,
    "Compressed pubkey as stored in the validator registry; parse with \
     `cached_pubkey` before verifying."
);

bytes_struct!(
    SignatureBytes,
    BLS_SIG_BYTE_SIZE,
    Signature,
    "Compressed signature as carried on the wire."
);

impl From<&PublicKey> for PublicKeyBytes {
    fn from(public_key: &PublicKey) -> Self {
        Self(public_key.to_bytes())
    }
}

impl From<&Signature> for SignatureBytes {
    fn from(signature: &Signature) -> Self {
        Self(signature.as_bytes())
    }
}
