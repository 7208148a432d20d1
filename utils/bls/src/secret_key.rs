use core::fmt;

use rand::RngCore;

use crate::{Error, Signature, BLS_SECRET_KEY_BYTE_SIZE, DST};

#[derive(Clone)]
pub struct SecretKey(blst::min_pk::SecretKey);

impl SecretKey {
    /// Derives a key from input key material (at least 32 bytes).
    pub fn from_ikm(ikm: &[u8]) -> Result<Self, Error> {
        blst::min_pk::SecretKey::key_gen(ikm, &[])
            .map(Self)
            .map_err(|_| Error::InvalidSecretKey)
    }

    pub fn random() -> Self {
        let mut ikm = [0; BLS_SECRET_KEY_BYTE_SIZE];
        rand::thread_rng().fill_bytes(&mut ikm);
        Self::from_ikm(&ikm).expect("32 bytes of key material always derive a key")
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        blst::min_pk::SecretKey::from_bytes(bytes)
            .map(Self)
            .map_err(|_| Error::InvalidSecretKey)
    }

    pub fn to_bytes(&self) -> [u8; BLS_SECRET_KEY_BYTE_SIZE] {
        self.0.to_bytes()
    }

    pub fn sign(&self, message: &[u8]) -> Signature {
        Signature::from_raw(self.0.sign(message, DST, &[]))
    }

    pub(crate) fn as_raw(&self) -> &blst::min_pk::SecretKey {
        &self.0
    }
}

impl fmt::Debug for SecretKey {
    // Key material must never reach logs.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "SecretKey(...)")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_generation_is_deterministic_per_ikm() {
        let first = SecretKey::from_ikm(&[9; 32]).expect("Test");
        let second = SecretKey::from_ikm(&[9; 32]).expect("Test");
        assert_eq!(first.to_bytes(), second.to_bytes());
    }

    #[test]
    fn short_ikm_is_rejected() {
        assert!(SecretKey::from_ikm(&[0; 16]).is_err());
    }
}
