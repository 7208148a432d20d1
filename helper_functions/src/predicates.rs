use itertools::Itertools;
use typenum::Unsigned;
use types::{
    beacon_state::BeaconState,
    config::Config,
    consts::DOMAIN_BEACON_ATTESTER,
    helper_functions_types::{AbortSignal, EpochsContext, ValidatorSet},
    primitives::Epoch,
    types::{AttestationData, IndexedAttestation, Validator},
};

use crate::beacon_state_accessors as accessors;
use crate::crypto;
use crate::error::Error;
use crate::misc::compute_signing_root;

pub fn is_active_validator(validator: &Validator, epoch: Epoch) -> bool {
    validator.activation_epoch <= epoch && epoch < validator.exit_epoch
}

pub fn is_slashable_validator(validator: &Validator, epoch: Epoch) -> bool {
    !validator.slashed
        && validator.activation_epoch <= epoch
        && epoch < validator.withdrawable_epoch
}

/// Casper FFG slashing conditions: a double vote or a surround vote.
pub fn is_slashable_attestation_data(data_1: &AttestationData, data_2: &AttestationData) -> bool {
    // Double vote
    (data_1 != data_2 && data_1.target.epoch == data_2.target.epoch) ||
    // Surround vote
    (data_1.source.epoch < data_2.source.epoch && data_2.target.epoch < data_1.target.epoch)
}

/// The signature-free half of indexed-attestation validation. Returns the
/// indices as a set ready for intersection downstream.
pub fn validate_indexed_attestation_indices_set<C: Config>(
    state: &BeaconState<C>,
    attestation: &IndexedAttestation<C>,
) -> Result<ValidatorSet, Error> {
    let indices = &attestation.attesting_indices;

    if indices.len() > C::MaxValidatorsPerCommittee::to_usize() {
        return Err(Error::IndicesExceedMaxValidators);
    }

    if indices.is_empty() {
        return Err(Error::EmptyIndices);
    }

    if !indices.iter().tuple_windows().all(|(a, b)| a < b) {
        return Err(Error::IndicesNotSorted);
    }

    // Sorted, so the last index bounds the rest.
    if let Some(last) = indices.last() {
        if !state.is_valid_index(*last) {
            return Err(Error::IndexOutOfRange);
        }
    }

    ValidatorSet::from_sorted(indices.to_vec()).ok_or(Error::IndicesNotSorted)
}

/// Full indexed-attestation validation: the structural pass above, then the
/// aggregate signature against the cached pubkeys.
pub fn validate_indexed_attestation<C: Config>(
    state: &BeaconState<C>,
    context: &EpochsContext,
    attestation: &IndexedAttestation<C>,
    abort: &AbortSignal,
) -> Result<(), Error> {
    let indices = validate_indexed_attestation_indices_set(state, attestation)?;

    let mut pubkeys = Vec::with_capacity(indices.len());
    for index in indices.iter() {
        match context.pubkey_cache.pubkey(*index) {
            Some(pubkey) => pubkeys.push(pubkey.clone()),
            None => return Err(Error::PubkeyMissing(*index)),
        }
    }

    let domain = accessors::get_domain(
        state,
        DOMAIN_BEACON_ATTESTER,
        Some(attestation.data.target.epoch),
    );
    let signing_root = compute_signing_root(&attestation.data, domain);

    if abort.aborted() {
        return Err(Error::Aborted);
    }

    if !crypto::fast_aggregate_verify(&pubkeys, signing_root, &attestation.signature) {
        return Err(Error::SignatureInvalid);
    }

    Ok(())
}
