mod process_epoch;

pub use process_epoch::{
    process_justification_and_finalization, EpochProcess, EpochStakeSummary,
};
