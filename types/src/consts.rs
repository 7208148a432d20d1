pub use crate::primitives::{Epoch, Slot};

use crate::primitives::DomainType;

pub const GENESIS_EPOCH: Epoch = 0;
pub const GENESIS_SLOT: Slot = 0;
pub const FAR_FUTURE_EPOCH: Epoch = u64::max_value();
pub const JUSTIFICATION_BITS_LENGTH: usize = 4;
pub const DEPOSIT_CONTRACT_TREE_DEPTH: u64 = 32;

pub const DOMAIN_BEACON_PROPOSER: DomainType = DomainType::new([0, 0, 0, 0]);
pub const DOMAIN_BEACON_ATTESTER: DomainType = DomainType::new([1, 0, 0, 0]);
pub const DOMAIN_RANDAO: DomainType = DomainType::new([2, 0, 0, 0]);
pub const DOMAIN_DEPOSIT: DomainType = DomainType::new([3, 0, 0, 0]);
pub const DOMAIN_VOLUNTARY_EXIT: DomainType = DomainType::new([4, 0, 0, 0]);

pub type DepositContractTreeDepth = typenum::U32;
pub type JustificationBitsLength = typenum::U4;
