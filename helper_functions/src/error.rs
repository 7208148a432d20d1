use thiserror::Error;
use types::primitives::ValidatorIndex;

#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum Error {
    #[error("slot is outside the stored block-root history")]
    SlotOutOfRange,
    #[error("validator index is out of registry range")]
    IndexOutOfRange,
    #[error("attesting indices are not sorted and unique")]
    IndicesNotSorted,
    #[error("attesting indices exceed the committee limit")]
    IndicesExceedMaxValidators,
    #[error("attestation carries no attesting indices")]
    EmptyIndices,
    #[error("aggregate signature does not verify against the attesting pubkeys")]
    SignatureInvalid,
    #[error("no cached pubkey for validator {0}; refresh the cache and retry")]
    PubkeyMissing(ValidatorIndex),
    #[error("validation aborted by the caller")]
    Aborted,
}

impl From<types::BeaconStateError> for Error {
    fn from(error: types::BeaconStateError) -> Self {
        match error {
            types::BeaconStateError::SlotOutOfRange => Self::SlotOutOfRange,
            types::BeaconStateError::IndexOutOfRange => Self::IndexOutOfRange,
        }
    }
}
