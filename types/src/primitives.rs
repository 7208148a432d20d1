use core::ops::Index;

use derive_more::Display;
use serde::{Deserialize, Serialize};
use ssz_new::{SszDecode, SszDecodeError, SszEncode};
use tree_hash::{TreeHash, TreeHashType};

pub use bls::{CachedPubkey, PublicKey, PublicKeyBytes, SecretKey, Signature, SignatureBytes};
pub use ethereum_types::H256;

pub type AggregateSignatureBytes = SignatureBytes;
pub type CommitteeIndex = u64;
pub type Epoch = u64;
pub type Gwei = u64;
pub type Slot = u64;
pub type ValidatorIndex = u64;

type VersionAsArray = [u8; 4];

/// Fork version; the first ingredient of a signing domain.
#[derive(
    Clone, Copy, PartialEq, Eq, Default, Debug, Hash, Display, Deserialize, Serialize,
)]
#[display(fmt = "{:?}", _0)]
pub struct Version(VersionAsArray);

impl Version {
    pub const fn new(bytes: VersionAsArray) -> Self {
        Self(bytes)
    }

    pub fn as_array(&self) -> &VersionAsArray {
        &self.0
    }
}

impl From<VersionAsArray> for Version {
    fn from(array: VersionAsArray) -> Self {
        Self(array)
    }
}

impl From<Version> for VersionAsArray {
    fn from(version: Version) -> Self {
        version.0
    }
}

impl Index<usize> for Version {
    type Output = u8;

    fn index(&self, index: usize) -> &Self::Output {
        self.0.index(index)
    }
}

impl SszDecode for Version {
    fn is_ssz_fixed_len() -> bool {
        <VersionAsArray as SszDecode>::is_ssz_fixed_len()
    }

    fn ssz_fixed_len() -> usize {
        <VersionAsArray as SszDecode>::ssz_fixed_len()
    }

    fn from_ssz_bytes(bytes: &[u8]) -> Result<Self, SszDecodeError> {
        VersionAsArray::from_ssz_bytes(bytes).map(Self::from)
    }
}

impl SszEncode for Version {
    fn is_ssz_fixed_len() -> bool {
        <VersionAsArray as SszEncode>::is_ssz_fixed_len()
    }

    fn as_ssz_bytes(&self) -> Vec<u8> {
        self.as_array().as_ssz_bytes()
    }
}

impl TreeHash for Version {
    fn tree_hash_type() -> TreeHashType {
        VersionAsArray::tree_hash_type()
    }

    fn tree_hash_packed_encoding(&self) -> Vec<u8> {
        self.as_array().tree_hash_packed_encoding()
    }

    fn tree_hash_packing_factor() -> usize {
        VersionAsArray::tree_hash_packing_factor()
    }

    fn tree_hash_root(&self) -> Vec<u8> {
        self.as_array().tree_hash_root()
    }
}

type DomainTypeAsArray = [u8; 4];

/// Four-byte signature kind tag, the other ingredient of a signing domain.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug, Hash, Deserialize, Serialize)]
pub struct DomainType(DomainTypeAsArray);

impl DomainType {
    pub const fn new(bytes: DomainTypeAsArray) -> Self {
        Self(bytes)
    }

    pub fn as_array(&self) -> &DomainTypeAsArray {
        &self.0
    }
}

impl From<DomainTypeAsArray> for DomainType {
    fn from(array: DomainTypeAsArray) -> Self {
        Self(array)
    }
}

/// 32-byte signing domain: `domain_type || fork_data_root[..28]`.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug, Deserialize, Serialize)]
pub struct Domain(H256);

impl Domain {
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl From<H256> for Domain {
    fn from(hash: H256) -> Self {
        Self(hash)
    }
}

impl From<Domain> for H256 {
    fn from(domain: Domain) -> Self {
        domain.0
    }
}

impl SszDecode for Domain {
    fn is_ssz_fixed_len() -> bool {
        <H256 as SszDecode>::is_ssz_fixed_len()
    }

    fn ssz_fixed_len() -> usize {
        <H256 as SszDecode>::ssz_fixed_len()
    }

    fn from_ssz_bytes(bytes: &[u8]) -> Result<Self, SszDecodeError> {
        H256::from_ssz_bytes(bytes).map(Self)
    }
}

impl SszEncode for Domain {
    fn is_ssz_fixed_len() -> bool {
        <H256 as SszEncode>::is_ssz_fixed_len()
    }

    fn as_ssz_bytes(&self) -> Vec<u8> {
        self.0.as_ssz_bytes()
    }
}

impl TreeHash for Domain {
    fn tree_hash_type() -> TreeHashType {
        H256::tree_hash_type()
    }

    fn tree_hash_packed_encoding(&self) -> Vec<u8> {
        self.0.tree_hash_packed_encoding()
    }

    fn tree_hash_packing_factor() -> usize {
        H256::tree_hash_packing_factor()
    }

    fn tree_hash_root(&self) -> Vec<u8> {
        self.0.tree_hash_root()
    }
}
