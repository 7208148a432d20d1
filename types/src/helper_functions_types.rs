use std::convert::TryFrom;
use std::slice::Iter;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use bls::{cached_pubkey, CachedPubkey};

use crate::beacon_state::BeaconState;
use crate::config::Config;
use crate::primitives::ValidatorIndex;
use crate::types::Validator;

/// A strictly ascending, duplicate-free list of validator indices.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct ValidatorSet(Vec<ValidatorIndex>);

impl ValidatorSet {
    /// Wraps indices that are already sorted and unique; `None` otherwise.
    pub fn from_sorted(indices: Vec<ValidatorIndex>) -> Option<Self> {
        if indices.windows(2).all(|pair| pair[0] < pair[1]) {
            Some(Self(indices))
        } else {
            None
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> Iter<ValidatorIndex> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[ValidatorIndex] {
        &self.0
    }

    pub fn contains(&self, index: ValidatorIndex) -> bool {
        self.0.binary_search(&index).is_ok()
    }

    /// Linear zig-zag merge over two sorted sets.
    pub fn intersection(&self, other: &Self) -> Self {
        let mut result = Vec::with_capacity(self.len().min(other.len()));

        let mut left = self.0.iter().peekable();
        let mut right = other.0.iter().peekable();
        while let (Some(&&a), Some(&&b)) = (left.peek(), right.peek()) {
            if a < b {
                left.next();
            } else if b < a {
                right.next();
            } else {
                result.push(a);
                left.next();
                right.next();
            }
        }

        Self(result)
    }

    /// Keeps only indices the predicate accepts, stopping at its first error.
    pub fn try_retain<E>(
        &mut self,
        mut predicate: impl FnMut(ValidatorIndex) -> Result<bool, E>,
    ) -> Result<(), E> {
        let mut retained = Vec::with_capacity(self.0.len());
        for &index in &self.0 {
            if predicate(index)? {
                retained.push(index);
            }
        }
        self.0 = retained;
        Ok(())
    }
}

/// Parsed pubkeys by validator index. Append-only: a populated slot is never
/// mutated, the vector only grows as the registry does.
#[derive(Clone, Default)]
pub struct PubkeyCache {
    pubkeys: Vec<CachedPubkey>,
}

impl PubkeyCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.pubkeys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pubkeys.is_empty()
    }

    pub fn pubkey(&self, index: ValidatorIndex) -> Option<&CachedPubkey> {
        self.pubkeys.get(usize::try_from(index).ok()?)
    }

    /// Parses and appends pubkeys for registry entries past the cached tail.
    pub fn extend_from_registry<'a>(
        &mut self,
        validators: impl IntoIterator<Item = &'a Validator>,
    ) -> Result<(), bls::Error> {
        for validator in validators.into_iter().skip(self.pubkeys.len()) {
            self.pubkeys.push(cached_pubkey(&validator.pubkey)?);
        }
        Ok(())
    }
}

/// Per-epoch shared context; holds everything validation reuses across
/// attestations for the same state.
#[derive(Clone, Default)]
pub struct EpochsContext {
    pub pubkey_cache: PubkeyCache,
}

impl EpochsContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load_pubkeys<C: Config>(&mut self, state: &BeaconState<C>) -> Result<(), bls::Error> {
        self.pubkey_cache.extend_from_registry(state.validators.iter())
    }
}

/// Cooperative cancellation for validation entry points; checked before each
/// expensive step.
#[derive(Clone, Debug, Default)]
pub struct AbortSignal(Arc<AtomicBool>);

impl AbortSignal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn abort(&self) {
        self.0.store(true, Ordering::Relaxed);
    }

    pub fn aborted(&self) -> bool {
        self.0.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(indices: &[ValidatorIndex]) -> ValidatorSet {
        ValidatorSet::from_sorted(indices.to_vec()).expect("Test")
    }

    #[test]
    fn from_sorted_rejects_unsorted_and_duplicates() {
        assert!(ValidatorSet::from_sorted(vec![3, 2, 5]).is_none());
        assert!(ValidatorSet::from_sorted(vec![2, 2]).is_none());
        assert!(ValidatorSet::from_sorted(vec![]).is_some());
        assert!(ValidatorSet::from_sorted(vec![2, 4, 9]).is_some());
    }

    #[test]
    fn intersection_is_the_sorted_common_subset() {
        assert_eq!(
            set(&[2, 4, 9, 11]).intersection(&set(&[4, 9])),
            set(&[4, 9])
        );
        assert_eq!(set(&[1, 3]).intersection(&set(&[2, 4])), set(&[]));
        assert_eq!(
            set(&[1, 2, 3]).intersection(&set(&[1, 2, 3])),
            set(&[1, 2, 3])
        );
    }

    #[test]
    fn try_retain_filters_and_propagates_errors() {
        let mut validators = set(&[1, 2, 3, 4]);
        validators
            .try_retain(|index| Ok::<_, ()>(index % 2 == 0))
            .expect("Test");
        assert_eq!(validators, set(&[2, 4]));

        let mut validators = set(&[1, 2]);
        assert!(validators.try_retain(|_| Err::<bool, _>("nope")).is_err());
    }

    #[test]
    fn abort_signal_is_sticky_and_shared() {
        let signal = AbortSignal::new();
        let observer = signal.clone();

        assert!(!observer.aborted());
        signal.abort();
        assert!(observer.aborted());
    }
}
