use core::fmt;

use crate::{Error, BLS_SIG_BYTE_SIZE};

/// A deserialized G2 point.
#[derive(Clone)]
pub struct Signature(blst::min_pk::Signature);

impl Signature {
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, Error> {
        blst::min_pk::Signature::from_bytes(bytes)
            .map(Self)
            .map_err(|_| Error::InvalidSignature)
    }

    pub fn as_bytes(&self) -> [u8; BLS_SIG_BYTE_SIZE] {
        self.0.to_bytes()
    }

    pub(crate) fn from_raw(signature: blst::min_pk::Signature) -> Self {
        Self(signature)
    }

    pub(crate) fn as_raw(&self) -> &blst::min_pk::Signature {
        &self.0
    }
}

impl PartialEq for Signature {
    fn eq(&self, other: &Self) -> bool {
        self.as_bytes()[..] == other.as_bytes()[..]
    }
}

impl Eq for Signature {}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Signature(0x{})", hex::encode(&self.as_bytes()[..]))
    }
}

/// Aggregates individual signatures over the same message into one.
pub fn aggregate(signatures: &[Signature]) -> Result<Signature, Error> {
    let raw: Vec<&blst::min_pk::Signature> = signatures.iter().map(Signature::as_raw).collect();

    blst::min_pk::AggregateSignature::aggregate(&raw, true)
        .map(|aggregated| Signature::from_raw(aggregated.to_signature()))
        .map_err(|_| Error::InvalidSignature)
}
