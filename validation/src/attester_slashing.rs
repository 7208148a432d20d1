use helper_functions::beacon_state_accessors::get_current_epoch;
use helper_functions::predicates::{
    is_slashable_attestation_data, is_slashable_validator, validate_indexed_attestation,
    validate_indexed_attestation_indices_set,
};
use log::debug;
use thiserror::Error;
use types::{
    beacon_state::BeaconState,
    config::Config,
    helper_functions_types::{AbortSignal, EpochsContext, ValidatorSet},
    types::AttesterSlashing,
};

#[derive(Error, Debug, PartialEq, Eq, Clone)]
pub enum Error {
    #[error("attestation data pair breaks no slashing condition")]
    NotSlashable,
    #[error("every slashable index was covered by a prior slashing")]
    AllIndicesSeen,
    #[error("no slashable validators remain at the current epoch")]
    NoneSlashable,
    #[error(transparent)]
    Validation(#[from] helper_functions::Error),
}

/// Gossip admission result. `Ignore` marks messages that are useless right
/// now but not provably invalid; `Reject` marks provably invalid ones.
#[derive(Clone, PartialEq, Eq, Debug)]
pub enum GossipVerdict {
    Accept,
    Ignore(Error),
    Reject(Error),
}

/// Transient conditions downgrade to `Ignore`; everything else on this path
/// proves the message invalid.
fn verdict_for(error: Error) -> GossipVerdict {
    use helper_functions::Error as Validation;

    match &error {
        Error::Validation(Validation::PubkeyMissing(_))
        | Error::Validation(Validation::SlotOutOfRange)
        | Error::Validation(Validation::Aborted) => GossipVerdict::Ignore(error),
        _ => GossipVerdict::Reject(error),
    }
}

/// Admission check for a gossiped attester slashing.
///
/// `all_seen` is the caller's oracle: `true` when every index passed to it is
/// already covered by a previously accepted slashing. Marking indices as seen
/// is the caller's job, and only for accepted messages.
pub fn validate_attester_slashing<C: Config>(
    state: &BeaconState<C>,
    context: &EpochsContext,
    attester_slashing: &AttesterSlashing<C>,
    all_seen: impl FnOnce(&ValidatorSet) -> bool,
    abort: &AbortSignal,
) -> GossipVerdict {
    let attestation_1 = &attester_slashing.attestation_1;
    let attestation_2 = &attester_slashing.attestation_2;

    // Cheap structural checks come first; no signature work yet.
    if !is_slashable_attestation_data(&attestation_1.data, &attestation_2.data) {
        return GossipVerdict::Reject(Error::NotSlashable);
    }

    let indices_1 = match validate_indexed_attestation_indices_set(state, attestation_1) {
        Ok(indices) => indices,
        Err(error) => return verdict_for(error.into()),
    };
    let indices_2 = match validate_indexed_attestation_indices_set(state, attestation_2) {
        Ok(indices) => indices,
        Err(error) => return verdict_for(error.into()),
    };

    if abort.aborted() {
        return GossipVerdict::Ignore(Error::Validation(helper_functions::Error::Aborted));
    }

    let mut slashable = indices_1.intersection(&indices_2);

    if all_seen(&slashable) {
        return GossipVerdict::Ignore(Error::AllIndicesSeen);
    }

    // Retain only validators that are actually slashable right now.
    let current_epoch = get_current_epoch(state);
    let lookup = slashable.try_retain(|index| {
        state
            .validator(index)
            .map(|validator| is_slashable_validator(validator, current_epoch))
    });
    if let Err(error) = lookup {
        // The registry moved under us; worth another look later.
        return GossipVerdict::Ignore(Error::Validation(error.into()));
    }
    if slashable.is_empty() {
        return GossipVerdict::Reject(Error::NoneSlashable);
    }

    // Signature checks last.
    if let Err(error) = validate_indexed_attestation(state, context, attestation_1, abort) {
        return verdict_for(error.into());
    }
    if let Err(error) = validate_indexed_attestation(state, context, attestation_2, abort) {
        return verdict_for(error.into());
    }

    debug!("attester slashing accepted, {} slashable", slashable.len());
    GossipVerdict::Accept
}

#[cfg(test)]
mod tests {
    use super::*;
    use bls::{aggregate, Keypair, PublicKeyBytes, SignatureBytes};
    use helper_functions::beacon_state_accessors::get_domain;
    use helper_functions::misc::compute_signing_root;
    use ssz_new::VariableList;
    use types::config::MinimalConfig;
    use types::consts::{DOMAIN_BEACON_ATTESTER, FAR_FUTURE_EPOCH};
    use types::primitives::H256;
    use types::types::{AttestationData, Checkpoint, IndexedAttestation};

    fn keypair(seed: u8) -> Keypair {
        Keypair::from_ikm(&[seed; 32]).expect("Test")
    }

    fn test_state(validator_count: u8) -> BeaconState<MinimalConfig> {
        let validators: Vec<_> = (0..validator_count)
            .map(|i| types::types::Validator {
                pubkey: PublicKeyBytes::from(&keypair(i + 1).pk),
                activation_epoch: 0,
                exit_epoch: FAR_FUTURE_EPOCH,
                withdrawable_epoch: FAR_FUTURE_EPOCH,
                effective_balance: 32_000_000_000,
                ..types::types::Validator::default()
            })
            .collect();

        BeaconState {
            slot: 8,
            validators: VariableList::from(validators),
            ..BeaconState::default()
        }
    }

    fn loaded_context(state: &BeaconState<MinimalConfig>) -> EpochsContext {
        let mut context = EpochsContext::new();
        context.load_pubkeys(state).expect("Test");
        context
    }

    fn attestation_data(beacon_block_root: u8, source: u64, target: u64) -> AttestationData {
        AttestationData {
            slot: 0,
            index: 0,
            beacon_block_root: H256::from([beacon_block_root; 32]),
            source: Checkpoint {
                epoch: source,
                root: H256::zero(),
            },
            target: Checkpoint {
                epoch: target,
                root: H256::zero(),
            },
        }
    }

    fn signed_attestation(
        state: &BeaconState<MinimalConfig>,
        indices: Vec<u64>,
        data: AttestationData,
    ) -> IndexedAttestation<MinimalConfig> {
        let domain = get_domain(state, DOMAIN_BEACON_ATTESTER, Some(data.target.epoch));
        let signing_root = compute_signing_root(&data, domain);

        let signatures: Vec<_> = indices
            .iter()
            .map(|index| keypair(*index as u8 + 1).sk.sign(signing_root.as_bytes()))
            .collect();
        let signature = SignatureBytes::from(&aggregate(&signatures).expect("Test"));

        IndexedAttestation {
            attesting_indices: VariableList::from(indices),
            data,
            signature,
        }
    }

    /// Overlapping double vote over indices {4, 9}, both signatures valid.
    fn double_vote_slashing(
        state: &BeaconState<MinimalConfig>,
    ) -> AttesterSlashing<MinimalConfig> {
        AttesterSlashing {
            attestation_1: signed_attestation(state, vec![4, 9], attestation_data(1, 0, 1)),
            attestation_2: signed_attestation(state, vec![2, 4, 9, 11], attestation_data(2, 0, 1)),
        }
    }

    fn never_seen(_: &ValidatorSet) -> bool {
        false
    }

    #[test]
    fn double_vote_is_accepted() {
        let state = test_state(12);
        let context = loaded_context(&state);
        let slashing = double_vote_slashing(&state);

        assert_eq!(
            validate_attester_slashing(&state, &context, &slashing, never_seen, &AbortSignal::new()),
            GossipVerdict::Accept
        );
    }

    #[test]
    fn intersection_reaches_the_seen_oracle() {
        let state = test_state(12);
        let context = loaded_context(&state);
        let slashing = double_vote_slashing(&state);

        let verdict = validate_attester_slashing(
            &state,
            &context,
            &slashing,
            |slashable| {
                assert_eq!(slashable.as_slice(), &[4, 9]);
                false
            },
            &AbortSignal::new(),
        );
        assert_eq!(verdict, GossipVerdict::Accept);
    }

    #[test]
    fn corrupted_signature_is_rejected() {
        let state = test_state(12);
        let context = loaded_context(&state);
        let mut slashing = double_vote_slashing(&state);

        let mut bytes = [0; 96];
        bytes.copy_from_slice(slashing.attestation_2.signature.as_bytes());
        bytes[17] ^= 1;
        slashing.attestation_2.signature = SignatureBytes::from_bytes(&bytes).expect("Test");

        assert_eq!(
            validate_attester_slashing(&state, &context, &slashing, never_seen, &AbortSignal::new()),
            GossipVerdict::Reject(Error::Validation(
                helper_functions::Error::SignatureInvalid
            ))
        );
    }

    #[test]
    fn non_slashable_data_is_rejected_before_anything_else() {
        let state = test_state(12);
        let context = loaded_context(&state);

        // Disjoint source/target spans: neither a double nor a surround vote.
        let slashing = AttesterSlashing {
            attestation_1: signed_attestation(&state, vec![4, 9], attestation_data(0, 2, 6)),
            attestation_2: signed_attestation(&state, vec![4, 9], attestation_data(0, 3, 8)),
        };

        assert_eq!(
            validate_attester_slashing(&state, &context, &slashing, never_seen, &AbortSignal::new()),
            GossipVerdict::Reject(Error::NotSlashable)
        );
    }

    #[test]
    fn surround_vote_is_slashable() {
        let state = test_state(12);
        let context = loaded_context(&state);

        let slashing = AttesterSlashing {
            attestation_1: signed_attestation(&state, vec![4, 9], attestation_data(0, 2, 8)),
            attestation_2: signed_attestation(&state, vec![4, 9], attestation_data(0, 3, 6)),
        };

        assert_eq!(
            validate_attester_slashing(&state, &context, &slashing, never_seen, &AbortSignal::new()),
            GossipVerdict::Accept
        );
    }

    #[test]
    fn unsorted_indices_are_rejected() {
        let state = test_state(12);
        let context = loaded_context(&state);
        let mut slashing = double_vote_slashing(&state);
        slashing.attestation_1.attesting_indices = VariableList::from(vec![3, 2, 5]);

        assert_eq!(
            validate_attester_slashing(&state, &context, &slashing, never_seen, &AbortSignal::new()),
            GossipVerdict::Reject(Error::Validation(
                helper_functions::Error::IndicesNotSorted
            ))
        );
    }

    #[test]
    fn fully_seen_intersection_is_ignored() {
        let state = test_state(12);
        let context = loaded_context(&state);
        let slashing = double_vote_slashing(&state);

        assert_eq!(
            validate_attester_slashing(&state, &context, &slashing, |_| true, &AbortSignal::new()),
            GossipVerdict::Ignore(Error::AllIndicesSeen)
        );
    }

    #[test]
    fn no_slashable_validators_left_is_rejected() {
        let mut state = test_state(12);
        let context = loaded_context(&state);
        let slashing = double_vote_slashing(&state);

        // Both intersecting validators were already slashed.
        state.validators[4].slashed = true;
        state.validators[9].slashed = true;

        assert_eq!(
            validate_attester_slashing(&state, &context, &slashing, never_seen, &AbortSignal::new()),
            GossipVerdict::Reject(Error::NoneSlashable)
        );
    }

    #[test]
    fn missing_pubkeys_are_ignored_not_rejected() {
        let state = test_state(12);
        let slashing = double_vote_slashing(&state);

        // A cache that has not caught up with the registry.
        let context = EpochsContext::new();

        assert_eq!(
            validate_attester_slashing(&state, &context, &slashing, never_seen, &AbortSignal::new()),
            GossipVerdict::Ignore(Error::Validation(helper_functions::Error::PubkeyMissing(
                4
            )))
        );
    }

    #[test]
    fn aborted_validation_is_ignored() {
        let state = test_state(12);
        let context = loaded_context(&state);
        let slashing = double_vote_slashing(&state);

        let abort = AbortSignal::new();
        abort.abort();

        assert_eq!(
            validate_attester_slashing(&state, &context, &slashing, never_seen, &abort),
            GossipVerdict::Ignore(Error::Validation(helper_functions::Error::Aborted))
        );
    }
}
