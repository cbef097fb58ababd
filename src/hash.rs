use std::fmt::{Display, Formatter};
use std::hash::{Hash as StdHash, Hasher};

use digest::Digest;
use proptest::prelude::*;
use proptest::strategy::BoxedStrategy;

use crate::prelude::{FromHex, Result, ToBytes, ToHex};

/// A finalized digest, owned as raw bytes.
///
/// The length is whatever the producing algorithm emits (20 bytes for SHA-1),
/// so the same node and certificate types work with any [`Digest`] backend.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Hash(Vec<u8>);

impl Display for Hash {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", hex::encode(&self.0))
    }
}

impl std::fmt::Debug for Hash {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", hex::encode(&self.0))
    }
}

impl Arbitrary for Hash {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_args: Self::Parameters) -> Self::Strategy {
        any::<[u8; 20]>().prop_map(|bytes| Hash::from_slice(&bytes)).boxed()
    }
}

impl StdHash for Hash {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state);
    }
}

impl Hash {
    pub fn from_slice(slice: &[u8]) -> Self {
        Hash(slice.to_vec())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Digests `left || right` with a fresh hasher. The argument order is
    /// part of the tree's semantics and must never be swapped.
    pub fn combine<D: Digest>(left: &Hash, right: &Hash) -> Self {
        let mut hasher = D::new();
        hasher.update(&left.0);
        hasher.update(&right.0);
        Hash::from_slice(&hasher.finalize())
    }
}

impl AsRef<[u8]> for Hash {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<Vec<u8>> for Hash {
    fn from(bytes: Vec<u8>) -> Self {
        Hash(bytes)
    }
}

impl ToBytes for Hash {
    type Output = Vec<u8>;

    fn to_bytes(&self) -> Self::Output {
        self.0.clone()
    }
}

impl ToHex for Hash {
    fn to_hex(&self) -> String {
        hex::encode(&self.0)
    }
}

impl FromHex for Hash {
    fn from_hex(hex: &str) -> Result<Self> {
        Ok(Hash(hex::decode(hex)?))
    }
}
