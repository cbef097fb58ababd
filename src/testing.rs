use proptest::{
    collection::vec,
    prelude::*,
    sample::SizeRange,
};

use crate::prelude::*;

/// Generates a collection of row leaves.
pub fn leaves(size: impl Into<SizeRange>) -> impl Strategy<Value = Vec<Leaf>> {
    vec(any::<Leaf>(), size)
}

/// Generates `2^k` row leaves for an exponent drawn from `exponents`.
pub fn power_of_two_leaves(
    exponents: impl Strategy<Value = u32>,
) -> impl Strategy<Value = Vec<Leaf>> {
    exponents.prop_flat_map(|exponent| vec(any::<Leaf>(), 1usize << exponent))
}
