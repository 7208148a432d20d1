use core::fmt;

use crate::{Error, PublicKey, SecretKey};

#[derive(Clone)]
pub struct Keypair {
    pub sk: SecretKey,
    pub pk: PublicKey,
}

impl Keypair {
    pub fn random() -> Self {
        let sk = SecretKey::random();
        let pk = PublicKey::from_secret_key(&sk);
        Self { sk, pk }
    }

    /// Deterministic keypair from fixed key material; test fixtures mostly.
    pub fn from_ikm(ikm: &[u8]) -> Result<Self, Error> {
        let sk = SecretKey::from_ikm(ikm)?;
        let pk = PublicKey::from_secret_key(&sk);
        Ok(Self { sk, pk })
    }
}

impl fmt::Debug for Keypair {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Keypair({})", self.pk)
    }
}

impl fmt::Display for Keypair {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.pk)
    }
}
