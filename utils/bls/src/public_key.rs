use core::fmt;

use crate::{Error, SecretKey, BLS_PUBLIC_KEY_BYTE_SIZE};

/// A deserialized, subgroup-checked G1 point.
#[derive(Clone)]
pub struct PublicKey(blst::min_pk::PublicKey);

impl PublicKey {
    /// Parses compressed bytes and performs the (expensive) group membership
    /// check. Do this once per validator and cache the result.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        blst::min_pk::PublicKey::key_validate(bytes)
            .map(Self)
            .map_err(|_| Error::InvalidPublicKey)
    }

    pub fn from_secret_key(secret_key: &SecretKey) -> Self {
        Self(secret_key.as_raw().sk_to_pk())
    }

    pub fn to_bytes(&self) -> [u8; BLS_PUBLIC_KEY_BYTE_SIZE] {
        self.0.to_bytes()
    }

    pub(crate) fn as_point(&self) -> &blst::min_pk::PublicKey {
        &self.0
    }
}

impl PartialEq for PublicKey {
    fn eq(&self, other: &Self) -> bool {
        self.to_bytes()[..] == other.to_bytes()[..]
    }
}

impl Eq for PublicKey {}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "PublicKey(0x{})", hex::encode(&self.to_bytes()[..]))
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "0x{}", hex::encode(&self.to_bytes()[..]))
    }
}
