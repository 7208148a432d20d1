use helper_functions::beacon_state_accessors::{
    get_active_validator_indices, get_block_root, get_current_epoch, get_previous_epoch,
    get_total_balance,
};
use helper_functions::error::Error;
use log::debug;
use types::{
    beacon_state::BeaconState,
    config::Config,
    consts::GENESIS_EPOCH,
    primitives::{Epoch, Gwei, ValidatorIndex},
    types::Checkpoint,
};

/// Attester stake reaching each vote component of one epoch.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct EpochStakeSummary {
    pub source_stake: Gwei,
    pub target_stake: Gwei,
    pub head_stake: Gwei,
}

/// Everything epoch processing reads more than once, computed up front.
/// Attester stake buckets come from the caller's attestation accounting.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct EpochProcess {
    pub prev_epoch: Epoch,
    pub curr_epoch: Epoch,
    pub prev_epoch_stake: EpochStakeSummary,
    pub curr_epoch_stake: EpochStakeSummary,
    pub total_active_stake: Gwei,
    pub prev_epoch_indices: Vec<ValidatorIndex>,
    pub curr_epoch_indices: Vec<ValidatorIndex>,
}

impl EpochProcess {
    pub fn new<C: Config>(
        state: &BeaconState<C>,
        prev_epoch_stake: EpochStakeSummary,
        curr_epoch_stake: EpochStakeSummary,
    ) -> Result<Self, Error> {
        let prev_epoch = get_previous_epoch(state);
        let curr_epoch = get_current_epoch(state);

        let prev_epoch_indices = get_active_validator_indices(state, prev_epoch);
        let curr_epoch_indices = get_active_validator_indices(state, curr_epoch);
        let total_active_stake = get_total_balance(state, &curr_epoch_indices)?;

        Ok(Self {
            prev_epoch,
            curr_epoch,
            prev_epoch_stake,
            curr_epoch_stake,
            total_active_stake,
            prev_epoch_indices,
            curr_epoch_indices,
        })
    }
}

/// The Casper FFG checkpoint state machine, run once per epoch transition.
///
/// Reads happen before the first write, so an error leaves the state exactly
/// as it was.
pub fn process_justification_and_finalization<C: Config>(
    state: &mut BeaconState<C>,
    process: &EpochProcess,
) -> Result<(), Error> {
    let previous_epoch = process.prev_epoch;
    let current_epoch = process.curr_epoch;

    if current_epoch <= GENESIS_EPOCH + 1 {
        return Ok(());
    }

    let old_previous_justified = state.previous_justified_checkpoint;
    let old_current_justified = state.current_justified_checkpoint;

    let mut bits = state.justification_bits;
    bits.next_epoch();

    let total_stake = process.total_active_stake;

    // > Justification
    let mut new_justified_checkpoint = None;
    if process.prev_epoch_stake.target_stake * 3 >= total_stake * 2 {
        new_justified_checkpoint = Some(Checkpoint {
            epoch: previous_epoch,
            root: get_block_root(state, previous_epoch)?,
        });
        bits.set_justified(1);
    }
    if process.curr_epoch_stake.target_stake * 3 >= total_stake * 2 {
        new_justified_checkpoint = Some(Checkpoint {
            epoch: current_epoch,
            root: get_block_root(state, current_epoch)?,
        });
        bits.set_justified(0);
    }

    // > Finalization. All four rules are evaluated; a later match wins.
    let mut to_finalize = None;
    // The 2nd/3rd/4th most recent epochs are all justified, the 2nd using the 4th as source
    if bits.is_justified(&[1, 2, 3]) && old_previous_justified.epoch + 3 == current_epoch {
        to_finalize = Some(old_previous_justified);
    }
    // The 2nd/3rd most recent epochs are both justified, the 2nd using the 3rd as source
    if bits.is_justified(&[1, 2]) && old_previous_justified.epoch + 2 == current_epoch {
        to_finalize = Some(old_previous_justified);
    }
    // The 1st/2nd/3rd most recent epochs are all justified, the 1st using the 3rd as source
    if bits.is_justified(&[0, 1, 2]) && old_current_justified.epoch + 2 == current_epoch {
        to_finalize = Some(old_current_justified);
    }
    // The 1st/2nd most recent epochs are both justified, the 1st using the 2nd as source
    if bits.is_justified(&[0, 1]) && old_current_justified.epoch + 1 == current_epoch {
        to_finalize = Some(old_current_justified);
    }

    // Rotate (a copy of) current into previous, then apply the new view.
    state.previous_justified_checkpoint = old_current_justified;
    if let Some(checkpoint) = new_justified_checkpoint {
        debug!("epoch {} justified", checkpoint.epoch);
        state.current_justified_checkpoint = checkpoint;
    }
    if let Some(checkpoint) = to_finalize {
        debug!("epoch {} finalized", checkpoint.epoch);
        state.finalized_checkpoint = checkpoint;
    }
    state.justification_bits = bits;

    Ok(())
}
