mod attester_slashing;

pub use attester_slashing::{validate_attester_slashing, Error, GossipVerdict};
