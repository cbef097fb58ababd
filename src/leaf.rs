use std::fmt::{Display, Formatter};

use digest::Digest;
use proptest::collection::vec;
use proptest::prelude::*;
use proptest::strategy::BoxedStrategy;

use crate::prelude::{Error, Hash, Result};

/// One row of input data: an ordered sequence of byte blocks, one block per
/// serialized field. Blocks are fixed at construction and never mutated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Leaf {
    blocks: Vec<Vec<u8>>,
}

impl Leaf {
    pub fn new(blocks: Vec<Vec<u8>>) -> Self {
        Self { blocks }
    }

    /// A synthetic leaf holding a single empty block, used to pad a row set
    /// out to a power-of-two leaf count.
    pub fn padding() -> Self {
        Self {
            blocks: vec![Vec::new()],
        }
    }

    pub fn blocks(&self) -> &[Vec<u8>] {
        &self.blocks
    }

    /// Digests every block, in order, as one continuous stream:
    /// `D(block_0 || block_1 || ... || block_n)`.
    ///
    /// Uses a fresh hasher per call; a leaf with no blocks is rejected
    /// before the hasher is touched.
    pub fn digest<D: Digest>(&self) -> Result<Hash> {
        if self.blocks.is_empty() {
            return Err(Error::EmptyLeaf);
        }

        let mut hasher = D::new();
        for block in &self.blocks {
            hasher.update(block);
        }

        Ok(Hash::from_slice(&hasher.finalize()))
    }
}

impl Display for Leaf {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "[")?;
        for (idx, block) in self.blocks.iter().enumerate() {
            if idx > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", hex::encode(block))?;
        }
        write!(f, "]")
    }
}

impl Arbitrary for Leaf {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_args: Self::Parameters) -> Self::Strategy {
        vec(vec(any::<u8>(), 0..32), 1..5).prop_map(Leaf::new).boxed()
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use sha1::{Digest, Sha1};
    use test_strategy::proptest;

    use crate::prelude::*;

    #[proptest(fork = false)]
    fn test_digest_is_deterministic(leaf: Leaf) {
        prop_assert_eq!(leaf.digest::<Sha1>()?, leaf.digest::<Sha1>()?);
    }

    #[proptest(fork = false)]
    fn test_digest_equals_concatenated_stream(leaf: Leaf) {
        let concatenated: Vec<u8> = leaf.blocks().concat();
        let expected = Hash::from_slice(&Sha1::digest(&concatenated));

        prop_assert_eq!(leaf.digest::<Sha1>()?, expected);
    }

    #[proptest(fork = false)]
    fn test_block_boundaries_do_not_affect_digest(data: Vec<u8>) {
        // One block per byte digests the same as a single block, since the
        // blocks are fed as one continuous stream.
        let split = Leaf::new(data.iter().map(|byte| vec![*byte]).collect());
        let whole = Leaf::new(vec![data]);

        if split.blocks().is_empty() {
            prop_assert_eq!(split.digest::<Sha1>(), Err(Error::EmptyLeaf));
        } else {
            prop_assert_eq!(split.digest::<Sha1>()?, whole.digest::<Sha1>()?);
        }
    }

    #[test]
    fn test_empty_leaf_is_rejected() {
        assert_eq!(Leaf::new(vec![]).digest::<Sha1>(), Err(Error::EmptyLeaf));
    }

    #[test]
    fn test_padding_leaf_digests_the_empty_stream() {
        let padding = Leaf::padding();

        assert_eq!(padding.blocks(), &[Vec::<u8>::new()]);
        assert_eq!(
            padding.digest::<Sha1>().unwrap(),
            Hash::from_slice(&Sha1::digest(b""))
        );
    }
}
