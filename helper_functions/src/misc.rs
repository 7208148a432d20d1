use tree_hash::TreeHash;
use typenum::Unsigned;

use types::config::Config;
use types::primitives::*;
use types::types::{ForkData, SigningData};

use crate::crypto::hash_tree_root;

pub fn compute_epoch_at_slot<C: Config>(slot: Slot) -> Epoch {
    slot / C::SlotsPerEpoch::to_u64()
}

pub fn compute_start_slot_at_epoch<C: Config>(epoch: Epoch) -> Slot {
    epoch * C::SlotsPerEpoch::to_u64()
}

pub fn compute_fork_data_root(current_version: Version, genesis_validators_root: H256) -> H256 {
    hash_tree_root(&ForkData {
        current_version,
        genesis_validators_root,
    })
}

/// 32-byte domain: the domain type followed by the first 28 bytes of the
/// fork data root. A missing fork version means the genesis fork.
pub fn compute_domain(
    domain_type: DomainType,
    fork_version: Option<Version>,
    genesis_validators_root: H256,
) -> Domain {
    let fork_data_root = compute_fork_data_root(
        fork_version.unwrap_or_default(),
        genesis_validators_root,
    );

    let mut domain = [0; 32];
    domain[..4].copy_from_slice(domain_type.as_array());
    domain[4..].copy_from_slice(&fork_data_root.as_bytes()[..28]);

    Domain::from(H256::from(domain))
}

pub fn compute_signing_root<T: TreeHash>(object: &T, domain: Domain) -> H256 {
    hash_tree_root(&SigningData {
        object_root: hash_tree_root(object),
        domain,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::config::MinimalConfig;
    use types::consts::DOMAIN_BEACON_ATTESTER;

    #[test]
    fn test_epoch_at_slot() {
        assert_eq!(compute_epoch_at_slot::<MinimalConfig>(17), 2);
        assert_eq!(compute_epoch_at_slot::<MinimalConfig>(7), 0);
    }

    #[test]
    fn test_compute_start_slot_at_epoch() {
        assert_eq!(
            compute_start_slot_at_epoch::<MinimalConfig>(10),
            <MinimalConfig as Config>::SlotsPerEpoch::to_u64() * 10
        );
    }

    #[test]
    fn domain_layout() {
        let genesis_validators_root = H256::from([3; 32]);
        let domain = compute_domain(
            DOMAIN_BEACON_ATTESTER,
            Some(Version::new([0, 0, 0, 1])),
            genesis_validators_root,
        );

        let fork_data_root =
            compute_fork_data_root(Version::new([0, 0, 0, 1]), genesis_validators_root);

        assert_eq!(&domain.as_bytes()[..4], &[1, 0, 0, 0]);
        assert_eq!(&domain.as_bytes()[4..], &fork_data_root.as_bytes()[..28]);
    }

    #[test]
    fn default_fork_version_is_all_zero() {
        let root = H256::from([9; 32]);
        assert_eq!(
            compute_domain(DOMAIN_BEACON_ATTESTER, None, root),
            compute_domain(DOMAIN_BEACON_ATTESTER, Some(Version::default()), root),
        );
    }

    #[test]
    fn fork_version_changes_the_domain() {
        let root = H256::zero();
        assert_ne!(
            compute_domain(DOMAIN_BEACON_ATTESTER, Some(Version::new([1, 0, 0, 0])), root),
            compute_domain(DOMAIN_BEACON_ATTESTER, Some(Version::new([2, 0, 0, 0])), root),
        );
    }

    #[test]
    fn signing_root_commits_to_the_domain() {
        let object = 42_u64;
        let domain_1 = compute_domain(DOMAIN_BEACON_ATTESTER, None, H256::zero());
        let domain_2 = compute_domain(DOMAIN_BEACON_ATTESTER, None, H256::from([1; 32]));

        assert_ne!(
            compute_signing_root(&object, domain_1),
            compute_signing_root(&object, domain_2)
        );
        assert_ne!(
            compute_signing_root(&object, domain_1),
            hash_tree_root(&object)
        );
    }
}
