use core::marker::PhantomData;
use core::ops::{Deref, DerefMut};
use core::slice::Iter;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tree_hash::{TreeHash, TreeHashType};
use typenum::Unsigned;

use super::Error;
use crate::{SszDecode, SszDecodeError, SszEncode, BYTES_PER_LENGTH_OFFSET};

/// SSZ `list<T, N>`: up to `N` elements.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct VariableList<T, N> {
    vec: Vec<T>,
    _phantom: PhantomData<N>,
}

impl<T, N: Unsigned> VariableList<T, N> {
    pub fn new(vec: Vec<T>) -> Result<Self, Error> {
        if vec.len() <= N::to_usize() {
            Ok(Self {
                vec,
                _phantom: PhantomData,
            })
        } else {
            Err(Error::OutOfBounds {
                i: vec.len(),
                len: N::to_usize(),
            })
        }
    }

    pub fn empty() -> Self {
        Self {
            vec: vec![],
            _phantom: PhantomData,
        }
    }

    pub fn push(&mut self, value: T) -> Result<(), Error> {
        if self.vec.len() < N::to_usize() {
            self.vec.push(value);
            Ok(())
        } else {
            Err(Error::OutOfBounds {
                i: self.vec.len() + 1,
                len: N::to_usize(),
            })
        }
    }

    pub fn max_len() -> usize {
        N::to_usize()
    }

    pub fn len(&self) -> usize {
        self.vec.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vec.is_empty()
    }

    pub fn iter(&self) -> Iter<T> {
        self.vec.iter()
    }
}

impl<T: Clone, N: Unsigned> VariableList<T, N> {
    pub fn to_vec(&self) -> Vec<T> {
        self.vec.clone()
    }
}

impl<T, N: Unsigned> From<Vec<T>> for VariableList<T, N> {
    fn from(mut vec: Vec<T>) -> Self {
        vec.truncate(N::to_usize());

        Self {
            vec,
            _phantom: PhantomData,
        }
    }
}

impl<T, N: Unsigned> Default for VariableList<T, N> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T, N: Unsigned> Deref for VariableList<T, N> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.vec[..]
    }
}

impl<T, N: Unsigned> DerefMut for VariableList<T, N> {
    fn deref_mut(&mut self) -> &mut [T] {
        &mut self.vec[..]
    }
}

impl<T: SszEncode + Clone, N: Unsigned> SszEncode for VariableList<T, N> {
    fn as_ssz_bytes(&self) -> Vec<u8> {
        self.to_vec().as_ssz_bytes()
    }

    fn is_ssz_fixed_len() -> bool {
        false
    }
}

impl<T: SszDecode, N: Unsigned> SszDecode for VariableList<T, N> {
    fn from_ssz_bytes(bytes: &[u8]) -> Result<Self, SszDecodeError> {
        let items = <Vec<T>>::from_ssz_bytes(bytes)?;

        Self::new(items).map_err(|e| {
            SszDecodeError::BytesInvalid(format!("Failed while creating VariableList: {:?}", e))
        })
    }

    fn is_ssz_fixed_len() -> bool {
        false
    }

    fn ssz_fixed_len() -> usize {
        BYTES_PER_LENGTH_OFFSET
    }
}

impl<T: TreeHash, N: Unsigned> TreeHash for VariableList<T, N> {
    fn tree_hash_type() -> TreeHashType {
        TreeHashType::List
    }

    fn tree_hash_packed_encoding(&self) -> Vec<u8> {
        unreachable!("List should never be packed")
    }

    fn tree_hash_packing_factor() -> usize {
        unreachable!("List should never be packed")
    }

    fn tree_hash_root(&self) -> Vec<u8> {
        // The contents root spans the declared capacity, the mixed-in length
        // is the actual element count.
        let root = match T::tree_hash_type() {
            TreeHashType::Basic => {
                let factor = T::tree_hash_packing_factor();
                let chunk_count = (N::to_usize() + factor - 1) / factor;

                let mut packed = Vec::with_capacity(self.len());
                for element in self.iter() {
                    packed.extend_from_slice(&element.tree_hash_packed_encoding());
                }
                tree_hash::merkleize_padded(&packed, chunk_count)
            }
            _ => {
                let mut leaves = Vec::with_capacity(self.len() * tree_hash::BYTES_PER_CHUNK);
                for element in self.iter() {
                    leaves.extend_from_slice(&element.tree_hash_root());
                }
                tree_hash::merkleize_padded(&leaves, N::to_usize())
            }
        };

        tree_hash::mix_in_length(&root, self.len())
    }
}

impl<T: Serialize, N> Serialize for VariableList<T, N> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.vec.serialize(serializer)
    }
}

impl<'de, T: Deserialize<'de>, N: Unsigned> Deserialize<'de> for VariableList<T, N> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let vec = Vec::<T>::deserialize(deserializer)?;
        Self::new(vec).map_err(|e| D::Error::custom(format!("{:?}", e)))
    }
}
