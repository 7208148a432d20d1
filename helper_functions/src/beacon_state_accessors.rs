use std::convert::TryFrom;

use typenum::Unsigned;
use types::{beacon_state::BeaconState, config::Config, primitives::*};

use crate::error::Error;
use crate::misc::{compute_domain, compute_epoch_at_slot, compute_start_slot_at_epoch};
use crate::predicates::is_active_validator;

pub fn get_current_epoch<C: Config>(state: &BeaconState<C>) -> Epoch {
    compute_epoch_at_slot::<C>(state.slot)
}

pub fn get_previous_epoch<C: Config>(state: &BeaconState<C>) -> Epoch {
    let current_epoch = get_current_epoch(state);
    let genesis_epoch = C::genesis_epoch();

    if current_epoch > genesis_epoch {
        current_epoch - 1
    } else {
        genesis_epoch
    }
}

pub fn get_block_root<C: Config>(state: &BeaconState<C>, epoch: Epoch) -> Result<H256, Error> {
    get_block_root_at_slot(state, compute_start_slot_at_epoch::<C>(epoch))
}

pub fn get_block_root_at_slot<C: Config>(
    state: &BeaconState<C>,
    slot: Slot,
) -> Result<H256, Error> {
    if !(slot < state.slot && state.slot <= slot + C::SlotsPerHistoricalRoot::to_u64()) {
        return Err(Error::SlotOutOfRange);
    }

    match usize::try_from(slot % C::SlotsPerHistoricalRoot::to_u64()) {
        Err(_) => Err(Error::IndexOutOfRange),
        Ok(index) => Ok(state.block_roots[index]),
    }
}

pub fn get_active_validator_indices<C: Config>(
    state: &BeaconState<C>,
    epoch: Epoch,
) -> Vec<ValidatorIndex> {
    let mut active_validator_indices = Vec::new();
    for (i, validator) in state.validators.iter().enumerate() {
        if is_active_validator(validator, epoch) {
            active_validator_indices.push(i as u64);
        }
    }
    active_validator_indices
}

pub fn get_total_balance<C: Config>(
    state: &BeaconState<C>,
    indices: &[ValidatorIndex],
) -> Result<Gwei, Error> {
    let mut sum = 0;
    for index in indices {
        match usize::try_from(*index) {
            Err(_) => return Err(Error::IndexOutOfRange),
            Ok(index) => match state.validators.get(index) {
                None => return Err(Error::IndexOutOfRange),
                Some(validator) => sum += validator.effective_balance,
            },
        }
    }
    Ok(sum)
}

pub fn get_total_active_balance<C: Config>(state: &BeaconState<C>) -> Result<Gwei, Error> {
    get_total_balance(
        state,
        &get_active_validator_indices(state, get_current_epoch(state)),
    )
}

/// Domain for messages bound to `message_epoch`; the fork in force at that
/// epoch picks the version.
pub fn get_domain<C: Config>(
    state: &BeaconState<C>,
    domain_type: DomainType,
    message_epoch: Option<Epoch>,
) -> Domain {
    let epoch = message_epoch.unwrap_or_else(|| get_current_epoch(state));
    let fork_version = if epoch < state.fork.epoch {
        state.fork.previous_version
    } else {
        state.fork.current_version
    };
    compute_domain(domain_type, Some(fork_version), state.genesis_validators_root)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ssz_new::{FixedVector, VariableList};
    use types::config::MinimalConfig;
    use types::consts::DOMAIN_BEACON_ATTESTER;
    use types::types::{Fork, Validator};

    #[test]
    fn test_get_current_epoch() {
        let state: BeaconState<MinimalConfig> = BeaconState {
            slot: 9,
            ..BeaconState::default()
        };
        assert_eq!(get_current_epoch(&state), 1);
    }

    #[test]
    fn test_get_previous_epoch() {
        let state: BeaconState<MinimalConfig> = BeaconState {
            slot: 17,
            ..BeaconState::default()
        };
        assert_eq!(get_previous_epoch(&state), 1);
    }

    #[test]
    fn test_get_previous_epoch_genesis() {
        let state: BeaconState<MinimalConfig> = BeaconState {
            slot: 0,
            ..BeaconState::default()
        };
        assert_eq!(get_previous_epoch(&state), MinimalConfig::genesis_epoch());
    }

    #[test]
    fn test_get_block_root() {
        let mut block_roots_vec = Vec::new();

        for x in 0..64 {
            block_roots_vec.push(H256::from([x; 32]));
        }

        let state: BeaconState<MinimalConfig> = BeaconState {
            slot: 32,
            block_roots: FixedVector::from(block_roots_vec),
            ..BeaconState::default()
        };

        assert_eq!(get_block_root(&state, 3), Ok(H256::from([24; 32])));
    }

    #[test]
    fn test_get_block_root_at_slot() {
        let state: BeaconState<MinimalConfig> = BeaconState {
            slot: 2,
            block_roots: FixedVector::from(vec![H256::from([0; 32]), H256::from([1; 32])]),
            ..BeaconState::default()
        };
        assert_eq!(get_block_root_at_slot(&state, 1), Ok(H256::from([1; 32])));
    }

    #[test]
    fn test_get_block_root_at_slot_slot_equals_beacon_state_slot() {
        let state: BeaconState<MinimalConfig> = BeaconState {
            slot: 0,
            ..BeaconState::default()
        };
        assert_eq!(
            get_block_root_at_slot(&state, 0).err(),
            Some(Error::SlotOutOfRange),
        );
    }

    #[test]
    fn test_get_active_validator_indices() {
        let v1 = Validator {
            activation_epoch: 1,
            exit_epoch: 2,
            ..Validator::default()
        };
        let v2 = Validator {
            activation_epoch: 0,
            exit_epoch: 1,
            ..Validator::default()
        };
        let state: BeaconState<MinimalConfig> = BeaconState {
            validators: VariableList::from(vec![v1, v2]),
            ..BeaconState::default()
        };
        assert_eq!(get_active_validator_indices(&state, 0), vec![1]);
    }

    #[test]
    fn test_get_total_balance() {
        let v1 = Validator {
            effective_balance: 11,
            activation_epoch: 0,
            exit_epoch: 2,
            ..Validator::default()
        };
        let v2 = Validator {
            effective_balance: 7,
            activation_epoch: 0,
            exit_epoch: 1,
            ..Validator::default()
        };
        let v3 = Validator {
            effective_balance: 5,
            activation_epoch: 0,
            exit_epoch: 1,
            ..Validator::default()
        };
        let state: BeaconState<MinimalConfig> = BeaconState {
            validators: VariableList::from(vec![v1, v2, v3]),
            ..BeaconState::default()
        };

        assert_eq!(get_total_balance(&state, &[0, 2]), Ok(16));
        assert_eq!(
            get_total_balance(&state, &[3]),
            Err(Error::IndexOutOfRange)
        );
    }

    #[test]
    fn test_get_total_active_balance() {
        let v1 = Validator {
            effective_balance: 10,
            activation_epoch: 0,
            exit_epoch: 2,
            ..Validator::default()
        };
        let v2 = Validator {
            effective_balance: 2,
            activation_epoch: 0,
            exit_epoch: 1,
            ..Validator::default()
        };
        let state: BeaconState<MinimalConfig> = BeaconState {
            slot: 8,
            validators: VariableList::from(vec![v1, v2]),
            ..BeaconState::default()
        };

        // Only the first validator is still active in epoch 1.
        assert_eq!(get_total_active_balance(&state), Ok(10));
    }

    #[test]
    fn test_get_domain_uses_the_fork_in_force() {
        let state: BeaconState<MinimalConfig> = BeaconState {
            fork: Fork {
                previous_version: Version::new([0, 0, 0, 1]),
                current_version: Version::new([0, 0, 0, 2]),
                epoch: 5,
            },
            genesis_validators_root: H256::from([4; 32]),
            ..BeaconState::default()
        };

        let before_fork = get_domain(&state, DOMAIN_BEACON_ATTESTER, Some(4));
        let after_fork = get_domain(&state, DOMAIN_BEACON_ATTESTER, Some(5));

        assert_ne!(before_fork, after_fork);
        assert_eq!(
            before_fork,
            compute_domain(
                DOMAIN_BEACON_ATTESTER,
                Some(Version::new([0, 0, 0, 1])),
                H256::from([4; 32])
            )
        );
    }
}
