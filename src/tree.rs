use std::fmt::{Display, Formatter};

use digest::Digest;

use crate::prelude::{Hash, Leaf, Result};

/// The child configuration of a [`MerkleTree`] node.
///
/// Exactly one variant applies to any node: a first-level node holds a pair
/// of leaves, an upper node holds a pair of subtrees, and a node rebuilt
/// from a previously recorded root holds nothing but its digest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Children {
    LeafPair { left: Leaf, right: Leaf },
    TreePair { left: Box<MerkleTree>, right: Box<MerkleTree> },
    DigestOnly,
}

/// A binary Merkle tree node.
///
/// The digest is computed once at construction as `D(left || right)` over
/// the children's digests and never changes afterwards; children are owned
/// exclusively by their parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MerkleTree {
    digest: Hash,
    children: Children,
}

impl MerkleTree {
    /// Combines two leaves into a first-level node whose digest is
    /// `D(digest(left) || digest(right))`.
    pub fn combine_leaves<D: Digest>(left: Leaf, right: Leaf) -> Result<Self> {
        let digest = Hash::combine::<D>(&left.digest::<D>()?, &right.digest::<D>()?);

        Ok(Self {
            digest,
            children: Children::LeafPair { left, right },
        })
    }

    /// Combines two subtrees into a parent node whose digest is
    /// `D(left.digest() || right.digest())`.
    pub fn combine_trees<D: Digest>(left: MerkleTree, right: MerkleTree) -> Self {
        let digest = Hash::combine::<D>(left.digest(), right.digest());

        Self {
            digest,
            children: Children::TreePair {
                left: Box::new(left),
                right: Box::new(right),
            },
        }
    }

    /// A childless node carrying a known digest, e.g. a previously certified
    /// root kept around to compare against a freshly rebuilt tree.
    pub fn from_digest(digest: Hash) -> Self {
        Self {
            digest,
            children: Children::DigestOnly,
        }
    }

    pub fn digest(&self) -> &Hash {
        &self.digest
    }

    pub fn children(&self) -> &Children {
        &self.children
    }

    pub fn left_leaf(&self) -> Option<&Leaf> {
        match &self.children {
            Children::LeafPair { left, .. } => Some(left),
            _ => None,
        }
    }

    pub fn right_leaf(&self) -> Option<&Leaf> {
        match &self.children {
            Children::LeafPair { right, .. } => Some(right),
            _ => None,
        }
    }

    pub fn left_tree(&self) -> Option<&MerkleTree> {
        match &self.children {
            Children::TreePair { left, .. } => Some(left),
            _ => None,
        }
    }

    pub fn right_tree(&self) -> Option<&MerkleTree> {
        match &self.children {
            Children::TreePair { right, .. } => Some(right),
            _ => None,
        }
    }

    fn fmt_indented(&self, f: &mut Formatter<'_>, indent: usize) -> std::fmt::Result {
        writeln!(f, "{:indent$}Node digest: {}", "", self.digest)?;

        match &self.children {
            Children::LeafPair { left, right } => {
                let indent = indent + 1;
                writeln!(f, "{:indent$}Left leaf : {}", "", left)?;
                writeln!(f, "{:indent$}Right leaf: {}", "", right)
            }
            Children::TreePair { left, right } => {
                left.fmt_indented(f, indent + 1)?;
                right.fmt_indented(f, indent + 1)
            }
            Children::DigestOnly => {
                let indent = indent + 1;
                writeln!(f, "{:indent$}(digest only)", "")
            }
        }
    }
}

/// Indented dump of the whole tree, one node per line, digests in hex.
impl Display for MerkleTree {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        self.fmt_indented(f, 0)
    }
}
