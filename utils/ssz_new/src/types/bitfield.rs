use core::marker::PhantomData;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use tree_hash::{TreeHash, TreeHashType};
use typenum::Unsigned;

use super::Error;
use crate::{SszDecode, SszDecodeError, SszEncode};

pub mod length {
    use core::marker::PhantomData;

    #[derive(Clone, PartialEq, Eq, Debug)]
    pub struct Variable<N> {
        _phantom: PhantomData<N>,
    }

    #[derive(Clone, PartialEq, Eq, Debug)]
    pub struct Fixed<N> {
        _phantom: PhantomData<N>,
    }
}

/// SSZ `bitlist<N>`: a variable-length sequence of bits with a declared
/// maximum, serialized with a sentinel bit marking the end.
pub type BitList<N> = Bitfield<length::Variable<N>>;

/// SSZ `bitvector<N>`: exactly `N` bits.
pub type BitVector<N> = Bitfield<length::Fixed<N>>;

pub trait BitfieldBehaviour: Clone {}

impl<N: Unsigned + Clone> BitfieldBehaviour for length::Variable<N> {}
impl<N: Unsigned + Clone> BitfieldBehaviour for length::Fixed<N> {}

/// Bit `i` lives in byte `i / 8` at position `i % 8`; bits past `len` in the
/// last byte are always zero.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Bitfield<T> {
    bytes: Vec<u8>,
    len: usize,
    _phantom: PhantomData<T>,
}

impl<N: Unsigned + Clone> Bitfield<length::Variable<N>> {
    pub fn with_capacity(num_bits: usize) -> Result<Self, Error> {
        if num_bits <= N::to_usize() {
            Ok(Self {
                bytes: vec![0; bytes_for_bit_len(num_bits)],
                len: num_bits,
                _phantom: PhantomData,
            })
        } else {
            Err(Error::OutOfBounds {
                i: num_bits,
                len: N::to_usize(),
            })
        }
    }

    pub fn max_len() -> usize {
        N::to_usize()
    }

    /// Serialized form: the data bits followed by a single sentinel bit.
    pub fn into_bytes(self) -> Vec<u8> {
        let len = self.len;
        let mut bytes = self.bytes;

        bytes.resize(bytes_for_bit_len(len + 1), 0);
        bytes[len / 8] |= 1 << (len % 8);
        bytes
    }

    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, Error> {
        let last_byte = *bytes.last().ok_or(Error::MissingLengthInformation)?;
        if last_byte == 0 {
            return Err(Error::MissingLengthInformation);
        }

        let total_bits = (bytes.len() - 1) * 8 + 8 - last_byte.leading_zeros() as usize;
        let len = total_bits - 1;

        if len > N::to_usize() {
            return Err(Error::OutOfBounds {
                i: len,
                len: N::to_usize(),
            });
        }

        let mut data = bytes;
        data[len / 8] &= !(1 << (len % 8));
        data.truncate(bytes_for_bit_len(len));

        Ok(Self {
            bytes: data,
            len,
            _phantom: PhantomData,
        })
    }
}

impl<N: Unsigned + Clone> Bitfield<length::Fixed<N>> {
    pub fn new() -> Self {
        Self {
            bytes: vec![0; bytes_for_bit_len(N::to_usize())],
            len: N::to_usize(),
            _phantom: PhantomData,
        }
    }

    pub fn capacity() -> usize {
        N::to_usize()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, Error> {
        let num_bits = N::to_usize();

        if bytes.len() != bytes_for_bit_len(num_bits) {
            return Err(Error::InvalidByteCount {
                given: bytes.len(),
                expected: bytes_for_bit_len(num_bits),
            });
        }

        for i in num_bits..bytes.len() * 8 {
            if bytes[i / 8] & (1 << (i % 8)) != 0 {
                return Err(Error::ExcessBits);
            }
        }

        Ok(Self {
            bytes,
            len: num_bits,
            _phantom: PhantomData,
        })
    }
}

impl<N: Unsigned + Clone> Default for Bitfield<length::Fixed<N>> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: BitfieldBehaviour> Bitfield<T> {
    pub fn set(&mut self, i: usize, value: bool) -> Result<(), Error> {
        if i >= self.len {
            return Err(Error::OutOfBounds { i, len: self.len });
        }

        if value {
            self.bytes[i / 8] |= 1 << (i % 8);
        } else {
            self.bytes[i / 8] &= !(1 << (i % 8));
        }
        Ok(())
    }

    pub fn get(&self, i: usize) -> Result<bool, Error> {
        if i >= self.len {
            return Err(Error::OutOfBounds { i, len: self.len });
        }

        Ok(self.bytes[i / 8] & (1 << (i % 8)) != 0)
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn num_set_bits(&self) -> usize {
        self.bytes
            .iter()
            .map(|byte| byte.count_ones() as usize)
            .sum()
    }

    /// The data bytes without any sentinel.
    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    pub fn iter(&self) -> impl Iterator<Item = bool> + '_ {
        (0..self.len).map(move |i| self.bytes[i / 8] & (1 << (i % 8)) != 0)
    }
}

fn bytes_for_bit_len(bit_len: usize) -> usize {
    std::cmp::max(1, (bit_len + 7) / 8)
}

impl<N: Unsigned + Clone> SszEncode for Bitfield<length::Variable<N>> {
    fn as_ssz_bytes(&self) -> Vec<u8> {
        self.clone().into_bytes()
    }

    fn is_ssz_fixed_len() -> bool {
        false
    }
}

impl<N: Unsigned + Clone> SszDecode for Bitfield<length::Variable<N>> {
    fn from_ssz_bytes(bytes: &[u8]) -> Result<Self, SszDecodeError> {
        Self::from_bytes(bytes.to_vec()).map_err(|e| {
            SszDecodeError::BytesInvalid(format!("Failed while creating BitList: {:?}", e))
        })
    }

    fn is_ssz_fixed_len() -> bool {
        false
    }
}

impl<N: Unsigned + Clone> SszEncode for Bitfield<length::Fixed<N>> {
    fn as_ssz_bytes(&self) -> Vec<u8> {
        self.clone().into_bytes()
    }

    fn is_ssz_fixed_len() -> bool {
        true
    }
}

impl<N: Unsigned + Clone> SszDecode for Bitfield<length::Fixed<N>> {
    fn from_ssz_bytes(bytes: &[u8]) -> Result<Self, SszDecodeError> {
        Self::from_bytes(bytes.to_vec()).map_err(|e| {
            SszDecodeError::BytesInvalid(format!("Failed while creating BitVector: {:?}", e))
        })
    }

    fn is_ssz_fixed_len() -> bool {
        true
    }

    fn ssz_fixed_len() -> usize {
        bytes_for_bit_len(N::to_usize())
    }
}

impl<N: Unsigned + Clone> TreeHash for Bitfield<length::Variable<N>> {
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
        // Chunk count comes from the declared maximum, the mixed-in length
        // from the actual bit count; the sentinel is never hashed.
        let chunk_count = chunks_for_bit_len(N::to_usize());
        tree_hash::mix_in_length(
            &tree_hash::merkleize_padded(self.as_slice(), chunk_count),
            self.len(),
        )
    }
}

impl<N: Unsigned + Clone> TreeHash for Bitfield<length::Fixed<N>> {
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
        tree_hash::merkleize_padded(self.as_slice(), chunks_for_bit_len(N::to_usize()))
    }
}

fn chunks_for_bit_len(bit_len: usize) -> usize {
    (bytes_for_bit_len(bit_len) + tree_hash::BYTES_PER_CHUNK - 1) / tree_hash::BYTES_PER_CHUNK
}

impl<T: BitfieldBehaviour> Serialize for Bitfield<T>
where
    Bitfield<T>: SszEncode,
{
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&format!("0x{}", hex::encode(self.as_ssz_bytes())))
    }
}

impl<'de, T: BitfieldBehaviour> Deserialize<'de> for Bitfield<T>
where
    Bitfield<T>: SszDecode,
{
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        let stripped = encoded.trim_start_matches("0x");
        let bytes = hex::decode(stripped).map_err(D::Error::custom)?;
        Self::from_ssz_bytes(&bytes).map_err(|e| D::Error::custom(format!("{:?}", e)))
    }
}
