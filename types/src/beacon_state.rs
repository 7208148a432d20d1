use std::convert::TryFrom;

use serde::{Deserialize, Serialize};
use ssz_new::{FixedVector, VariableList};
use ssz_new_derive::{SszDecode, SszEncode};
use thiserror::Error;
use tree_hash_derive::TreeHash;
use typenum::Unsigned;

use crate::{config::*, primitives::*, types::*};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum Error {
    #[error("slot is outside the stored block-root history")]
    SlotOutOfRange,
    #[error("index is out of range")]
    IndexOutOfRange,
}

#[derive(
    Clone, PartialEq, Debug, Default, Deserialize, Serialize, SszEncode, SszDecode, TreeHash,
)]
pub struct BeaconState<C: Config> {
    // Versioning
    pub genesis_time: u64,
    pub genesis_validators_root: H256,
    pub slot: Slot,
    pub fork: Fork,

    // History
    pub latest_block_header: BeaconBlockHeader,
    pub block_roots: FixedVector<H256, C::SlotsPerHistoricalRoot>,
    pub state_roots: FixedVector<H256, C::SlotsPerHistoricalRoot>,
    pub historical_roots: VariableList<H256, C::HistoricalRootsLimit>,

    // Eth1 data
    pub eth1_data: Eth1Data,
    pub eth1_data_votes: VariableList<Eth1Data, C::SlotsPerEth1VotingPeriod>,
    pub eth1_deposit_index: u64,

    // Registry
    pub validators: VariableList<Validator, C::ValidatorRegistryLimit>,
    pub balances: VariableList<Gwei, C::ValidatorRegistryLimit>,

    // Randomness
    pub randao_mixes: FixedVector<H256, C::EpochsPerHistoricalVector>,

    // Slashings
    pub slashings: FixedVector<Gwei, C::EpochsPerSlashingsVector>,

    // Attestations
    pub previous_epoch_attestations:
        VariableList<PendingAttestation<C>, C::MaxAttestationsPerEpoch>,
    pub current_epoch_attestations: VariableList<PendingAttestation<C>, C::MaxAttestationsPerEpoch>,

    // Finality
    pub justification_bits: JustificationBits,
    pub previous_justified_checkpoint: Checkpoint,
    pub current_justified_checkpoint: Checkpoint,
    pub finalized_checkpoint: Checkpoint,
}

impl<C: Config> BeaconState<C> {
    pub fn is_valid_index(&self, index: ValidatorIndex) -> bool {
        match usize::try_from(index) {
            Err(_) => false,
            Ok(index) => index < self.validators.len(),
        }
    }

    pub fn validator(&self, index: ValidatorIndex) -> Result<&Validator, Error> {
        usize::try_from(index)
            .ok()
            .and_then(|index| self.validators.get(index))
            .ok_or(Error::IndexOutOfRange)
    }

    pub fn get_block_root_at_slot(&self, slot: Slot) -> Result<H256, Error> {
        if !(slot < self.slot && self.slot <= slot + C::SlotsPerHistoricalRoot::to_u64()) {
            return Err(Error::SlotOutOfRange);
        }

        match usize::try_from(slot % C::SlotsPerHistoricalRoot::to_u64()) {
            Err(_) => Err(Error::IndexOutOfRange),
            Ok(index) => Ok(self.block_roots[index]),
        }
    }
}
