//! Binary Merkle trees over tabular data rows, and the signable "tree
//! certificate" payload that binds an identifier, a timestamp and a set of
//! tree roots.
//!
//! The tree side hashes each row's serialized fields into a [`Leaf`], pads
//! the leaf set to a power-of-two length, and combines nodes pairwise up to
//! a single root. The certificate side concatenates `(id, timestamp, roots)`
//! into the exact byte payload an external signer signs and a verifier
//! re-derives.
//!
//! All hashing is generic over [`digest::Digest`]; concrete algorithms are
//! cargo features (`sha1` by default).
//!
//! [`Leaf`]: crate::leaf::Leaf

mod error;

pub mod builder;
pub mod certificate;
pub mod hash;
pub mod leaf;
pub mod prelude;
pub mod testing;
pub mod tree;

// Enabled hash backends, re-exported so callers can name an algorithm
// without depending on it directly.
#[cfg(feature = "blake3")]
pub use blake3;
#[cfg(feature = "sha1")]
pub use sha1;
#[cfg(feature = "sha2")]
pub use sha2;

#[doc(hidden)]
/// This is a hidden module to make the macros defined on this crate available for the users.
pub mod __dependencies {
    pub use paste;
    pub use proptest;
    pub use test_strategy;
}

#[macro_export]
macro_rules! test_to_hex {
    ($type:ty) => {
        $crate::__dependencies::paste::paste! {
            mod [<test_to_hex_$type:snake>] {
                use $crate::__dependencies::{
                    proptest::prelude::*,
                    test_strategy,
                };

                use $crate::prelude::*;
                use super::$type;

                #[test_strategy::proptest(fork = false)]
                fn test_roundtrip(a: $type) {
                    prop_assert_eq!(a.clone(), <$type>::from_hex(&a.to_hex())?);
                }

                #[test_strategy::proptest(fork = false)]
                fn test_output_consistency(a: $type) {
                    prop_assert_eq!(a.to_hex(), <$type>::from_hex(&a.to_hex())?.to_hex());
                }

                #[test_strategy::proptest(fork = false)]
                fn test_is_different_on_different_objects(a: $type, b: $type) {
                    prop_assert_eq!(a == b, a.to_hex() == b.to_hex());
                }
            }
        }
    };
}
