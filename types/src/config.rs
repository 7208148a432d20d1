use core::fmt::Debug;

use serde::{Deserialize, Serialize};
use typenum::{
    U1024, U1099511627776, U128, U16, U16777216, U2, U2048, U32, U4096, U64, U65536, U8, U8192,
};

use crate::consts;
use crate::primitives::Epoch;

/// Compile-time chain preset: list capacities as type-level integers plus the
/// handful of scalar constants the core needs.
pub trait Config
where
    Self: Clone + PartialEq + Debug + Default + Send + Sync + 'static,
{
    type SlotsPerEpoch: Unsigned;
    type SlotsPerHistoricalRoot: Unsigned;
    type SlotsPerEth1VotingPeriod: Unsigned;
    type EpochsPerHistoricalVector: Unsigned;
    type EpochsPerSlashingsVector: Unsigned;
    type HistoricalRootsLimit: Unsigned;
    type ValidatorRegistryLimit: Unsigned;
    type MaxValidatorsPerCommittee: Unsigned;
    type MaxAttestationsPerEpoch: Unsigned;
    type MaxProposerSlashings: Unsigned;
    type MaxAttesterSlashings: Unsigned;
    type MaxAttestations: Unsigned;
    type MaxDeposits: Unsigned;
    type MaxVoluntaryExits: Unsigned;

    fn genesis_epoch() -> Epoch {
        consts::GENESIS_EPOCH
    }

    fn far_future_epoch() -> Epoch {
        consts::FAR_FUTURE_EPOCH
    }
}

/// Shorthand for the bounds every capacity parameter must satisfy so that
/// derived impls on generic containers resolve.
pub trait Unsigned:
    typenum::Unsigned + Clone + Copy + PartialEq + Eq + Debug + Send + Sync + 'static
{
}

impl<N> Unsigned for N where
    N: typenum::Unsigned + Clone + Copy + PartialEq + Eq + Debug + Send + Sync + 'static
{
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Deserialize, Serialize)]
pub struct MainnetConfig;

impl Config for MainnetConfig {
    type SlotsPerEpoch = U32;
    type SlotsPerHistoricalRoot = U8192;
    type SlotsPerEth1VotingPeriod = U1024;
    type EpochsPerHistoricalVector = U65536;
    type EpochsPerSlashingsVector = U8192;
    type HistoricalRootsLimit = U16777216;
    type ValidatorRegistryLimit = U1099511627776;
    type MaxValidatorsPerCommittee = U2048;
    type MaxAttestationsPerEpoch = U4096;
    type MaxProposerSlashings = U16;
    type MaxAttesterSlashings = U2;
    type MaxAttestations = U128;
    type MaxDeposits = U16;
    type MaxVoluntaryExits = U16;
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Deserialize, Serialize)]
pub struct MinimalConfig;

impl Config for MinimalConfig {
    type SlotsPerEpoch = U8;
    type SlotsPerHistoricalRoot = U64;
    type SlotsPerEth1VotingPeriod = U32;
    type EpochsPerHistoricalVector = U64;
    type EpochsPerSlashingsVector = U64;
    type HistoricalRootsLimit = U16777216;
    type ValidatorRegistryLimit = U1099511627776;
    type MaxValidatorsPerCommittee = U2048;
    type MaxAttestationsPerEpoch = U1024;
    type MaxProposerSlashings = U16;
    type MaxAttesterSlashings = U2;
    type MaxAttestations = U128;
    type MaxDeposits = U16;
    type MaxVoluntaryExits = U16;
}
