use core::marker::PhantomData;
use core::ops::{Deref, DerefMut};
use core::slice::Iter;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tree_hash::{TreeHash, TreeHashType};
use typenum::Unsigned;

use super::Error;
use crate::{
    decode_variable_sized_items, encode_offset, SszDecode, SszDecodeError, SszEncode,
    BYTES_PER_LENGTH_OFFSET,
};

/// SSZ `vector<T, N>`: exactly `N` elements.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct FixedVector<T, N> {
    vec: Vec<T>,
    _phantom: PhantomData<N>,
}

impl<T, N: Unsigned> FixedVector<T, N> {
    pub fn new(vec: Vec<T>) -> Result<Self, Error> {
        if vec.len() == N::to_usize() {
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

    pub fn capacity() -> usize {
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

impl<T: Clone, N: Unsigned> FixedVector<T, N> {
    pub fn to_vec(&self) -> Vec<T> {
        self.vec.clone()
    }
}

impl<T: Default + Clone, N: Unsigned> From<Vec<T>> for FixedVector<T, N> {
    fn from(mut vec: Vec<T>) -> Self {
        vec.resize(N::to_usize(), T::default());

        Self {
            vec,
            _phantom: PhantomData,
        }
    }
}

impl<T: Default + Clone, N: Unsigned> Default for FixedVector<T, N> {
    fn default() -> Self {
        Self::from(vec![])
    }
}

impl<T, N: Unsigned> Deref for FixedVector<T, N> {
    type Target = [T];

    fn deref(&self) -> &[T] {
        &self.vec[..]
    }
}

impl<T, N: Unsigned> DerefMut for FixedVector<T, N> {
    fn deref_mut(&mut self) -> &mut [T] {
        &mut self.vec[..]
    }
}

impl<T: SszEncode, N: Unsigned> SszEncode for FixedVector<T, N> {
    fn as_ssz_bytes(&self) -> Vec<u8> {
        let mut result = vec![];

        if T::is_ssz_fixed_len() {
            for element in self.iter() {
                result.append(&mut element.as_ssz_bytes());
            }
        } else {
            let mut variable_parts = Vec::with_capacity(self.len());
            for element in self.iter() {
                variable_parts.push(element.as_ssz_bytes())
            }

            let fixed_length = self.len() * BYTES_PER_LENGTH_OFFSET;
            let variable_lengths: Vec<usize> =
                variable_parts.iter().map(std::vec::Vec::len).collect();

            let mut variable_offsets = Vec::with_capacity(self.len());
            for i in 0..self.len() {
                let variable_length_sum: usize = variable_lengths[..i].iter().sum();
                let offset = fixed_length + variable_length_sum;
                variable_offsets.push(encode_offset(offset));
            }

            for offset in variable_offsets {
                result.extend(offset);
            }

            for part in variable_parts {
                result.extend(part);
            }
        }

        result
    }

    fn is_ssz_fixed_len() -> bool {
        <T as SszEncode>::is_ssz_fixed_len()
    }
}

impl<T: SszDecode, N: Unsigned> SszDecode for FixedVector<T, N> {
    fn from_ssz_bytes(bytes: &[u8]) -> Result<Self, SszDecodeError> {
        let items_count = N::to_usize();

        if <T as SszDecode>::is_ssz_fixed_len() {
            if bytes.len() == items_count * T::ssz_fixed_len() {
                let mut result = Vec::with_capacity(items_count);
                for chunk in bytes.chunks(T::ssz_fixed_len()) {
                    result.push(T::from_ssz_bytes(chunk)?);
                }

                Ok(Self {
                    vec: result,
                    _phantom: PhantomData,
                })
            } else {
                Err(SszDecodeError::InvalidByteLength {
                    len: bytes.len(),
                    expected: items_count * T::ssz_fixed_len(),
                })
            }
        } else {
            let items = decode_variable_sized_items(bytes)?;

            if items_count == items.len() {
                Ok(Self {
                    vec: items,
                    _phantom: PhantomData,
                })
            } else {
                Err(SszDecodeError::BytesInvalid(format!(
                    "Cannot parse FixedVector[{}] from bytes",
                    items_count
                )))
            }
        }
    }

    fn is_ssz_fixed_len() -> bool {
        <T as SszDecode>::is_ssz_fixed_len()
    }

    fn ssz_fixed_len() -> usize {
        if <Self as SszDecode>::is_ssz_fixed_len() {
            N::to_usize() * T::ssz_fixed_len()
        } else {
            BYTES_PER_LENGTH_OFFSET
        }
    }
}

impl<T: TreeHash, N: Unsigned> TreeHash for FixedVector<T, N> {
    fn tree_hash_type() -> TreeHashType {
        TreeHashType::Vector
    }

    fn tree_hash_packed_encoding(&self) -> Vec<u8> {
        unreachable!("Vector should never be packed")
    }

    fn tree_hash_packing_factor() -> usize {
        unreachable!("Vector should never be packed")
    }

    fn tree_hash_root(&self) -> Vec<u8> {
        match T::tree_hash_type() {
            TreeHashType::Basic => {
                let mut packed = Vec::with_capacity(self.len());
                for element in self.iter() {
                    packed.extend_from_slice(&element.tree_hash_packed_encoding());
                }
                tree_hash::merkle_root(&packed)
            }
            _ => {
                let mut leaves = Vec::with_capacity(self.len() * tree_hash::BYTES_PER_CHUNK);
                for element in self.iter() {
                    leaves.extend_from_slice(&element.tree_hash_root());
                }
                tree_hash::merkle_root(&leaves)
            }
        }
    }
}

impl<T: Serialize, N> Serialize for FixedVector<T, N> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.vec.serialize(serializer)
    }
}

impl<'de, T: Deserialize<'de> + Default + Clone, N: Unsigned> Deserialize<'de>
    for FixedVector<T, N>
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<T>::deserialize(deserializer).map(Self::from)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    mod construction {
        use super::*;
        use typenum::{U3, U5};

        #[test]
        fn from_pads_and_truncates() {
            let vec: FixedVector<u16, U5> = FixedVector::from(vec![1, 2, 3]);
            assert_eq!(vec.to_vec(), vec![1, 2, 3, 0, 0]);

            let vec: FixedVector<u16, U3> = FixedVector::from(vec![1, 2, 3, 4]);
            assert_eq!(vec.to_vec(), vec![1, 2, 3]);
        }

        #[test]
        fn new_requires_exact_length() {
            assert!(FixedVector::<u16, U3>::new(vec![1, 2, 3]).is_ok());
            assert!(FixedVector::<u16, U3>::new(vec![1, 2]).is_err());
        }
    }

    mod serialize {
        use super::*;

        #[test]
        fn fixed() {
            let vec: FixedVector<u16, typenum::U3> = FixedVector::from(vec![1, 2, 3]);
            assert_eq!(vec.as_ssz_bytes(), vec![1, 0, 2, 0, 3, 0]);
            let vec: FixedVector<u16, typenum::U5> = FixedVector::from(vec![1, 2, 3]);
            assert_eq!(vec.as_ssz_bytes(), vec![1, 0, 2, 0, 3, 0, 0, 0, 0, 0]);
        }

        #[test]
        fn variable() {
            let vec: FixedVector<Vec<u8>, typenum::U3> =
                FixedVector::from(vec![vec![1, 2], vec![], vec![3]]);
            assert_eq!(
                vec.as_ssz_bytes(),
                vec![12, 0, 0, 0, 14, 0, 0, 0, 14, 0, 0, 0, 1, 2, 3]
            );
        }
    }

    mod deserialize {
        use super::*;
        use typenum::{U3, U6};

        #[test]
        fn fixed() {
            let vec = <FixedVector<u16, U3> as SszDecode>::from_ssz_bytes(&[5, 0, 2, 0, 3, 0])
                .expect("Test");
            assert_eq!(vec.to_vec(), vec![5, 2, 3]);
            let vec = <FixedVector<u8, U6> as SszDecode>::from_ssz_bytes(&[5, 0, 2, 0, 3, 0])
                .expect("Test");
            assert_eq!(vec.to_vec(), vec![5, 0, 2, 0, 3, 0]);
        }

        #[test]
        fn variable() {
            let vec = <FixedVector<Vec<u8>, U3> as SszDecode>::from_ssz_bytes(&[
                12, 0, 0, 0, 14, 0, 0, 0, 14, 0, 0, 0, 1, 2, 3,
            ])
            .expect("Test");

            assert_eq!(vec.to_vec(), vec![vec![1, 2], vec![], vec![3]]);
        }

        mod errors {
            use super::*;

            #[test]
            fn wrong_size() {
                let result = <FixedVector<u8, U6> as SszDecode>::from_ssz_bytes(&[1, 2, 3, 4]);
                assert!(result.is_err());

                let result = <FixedVector<u8, U6> as SszDecode>::from_ssz_bytes(&[1; 7]);
                assert!(result.is_err());

                let result = <FixedVector<Vec<u8>, U6> as SszDecode>::from_ssz_bytes(&[
                    12, 0, 0, 0, 14, 0, 0, 0, 14, 0, 0, 0, 1, 2, 3,
                ]);
                assert!(result.is_err());
            }
        }
    }

    mod tree_hash_tests {
        use super::*;
        use typenum::{U2, U8};

        #[test]
        fn basic_elements_pack_into_chunks() {
            let vec: FixedVector<u64, U2> = FixedVector::from(vec![1, 2]);

            let mut packed = vec![0; 16];
            packed[0] = 1;
            packed[8] = 2;
            assert_eq!(vec.tree_hash_root(), tree_hash::merkle_root(&packed));
        }

        #[test]
        fn composite_elements_use_their_roots() {
            use ethereum_types::H256;

            let vec: FixedVector<H256, U8> = FixedVector::from(vec![H256::from([1; 32])]);
            let mut leaves = vec![];
            for element in vec.iter() {
                leaves.extend_from_slice(element.as_bytes());
            }
            assert_eq!(vec.tree_hash_root(), tree_hash::merkle_root(&leaves));
        }
    }
}
