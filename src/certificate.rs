use std::fmt::{Debug, Display, Formatter};
use std::hash::{Hash as StdHash, Hasher};

use proptest::prelude::*;
use proptest::strategy::BoxedStrategy;

use crate::prelude::Hash;

/// A certified snapshot of a row set: an identifier, the moment it was
/// certified, and an externally produced signature over the encoded payload.
///
/// Two certificates are the same entity iff their timestamps are equal; id
/// and signature do not participate in equality or hashing. This identity
/// rule is deliberate and locked in by tests.
#[derive(Clone)]
pub struct TreeCertificate {
    id: i32,
    timestamp: i64,
    signature: Vec<u8>,
}

impl TreeCertificate {
    pub fn new(id: i32, timestamp: i64, signature: Vec<u8>) -> Self {
        Self {
            id,
            timestamp,
            signature,
        }
    }

    pub fn id(&self) -> i32 {
        self.id
    }

    pub fn timestamp(&self) -> i64 {
        self.timestamp
    }

    pub fn signature(&self) -> &[u8] {
        &self.signature
    }

    /// Encodes the exact byte sequence a signer signs and a verifier
    /// re-derives: 4 bytes of `id` (big-endian bit pattern), 8 bytes of
    /// `timestamp` (big-endian), then every root's raw digest bytes
    /// back-to-back in caller order. Pure concatenation, no hashing.
    pub fn encode_payload(id: i32, timestamp: i64, roots: &[Hash]) -> Vec<u8> {
        let roots_len: usize = roots.iter().map(Hash::len).sum();
        let mut payload = Vec::with_capacity(4 + 8 + roots_len);

        payload.extend_from_slice(&id.to_be_bytes());
        payload.extend_from_slice(&timestamp.to_be_bytes());
        for root in roots {
            payload.extend_from_slice(root.as_ref());
        }

        payload
    }

    /// The payload this certificate's signature was produced over, given
    /// the roots it certifies.
    pub fn payload(&self, roots: &[Hash]) -> Vec<u8> {
        Self::encode_payload(self.id, self.timestamp, roots)
    }
}

impl PartialEq for TreeCertificate {
    fn eq(&self, other: &Self) -> bool {
        self.timestamp == other.timestamp
    }
}

impl Eq for TreeCertificate {}

impl StdHash for TreeCertificate {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Equality is timestamp-only, so hashing must be too.
        self.timestamp.hash(state);
    }
}

impl Debug for TreeCertificate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TreeCertificate")
            .field("id", &self.id)
            .field("timestamp", &self.timestamp)
            .field("signature", &hex::encode(&self.signature))
            .finish()
    }
}

impl Display for TreeCertificate {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}, {}, {}]",
            self.id,
            self.timestamp,
            hex::encode(&self.signature)
        )
    }
}

impl Arbitrary for TreeCertificate {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_args: Self::Parameters) -> Self::Strategy {
        (any::<i32>(), any::<i64>(), any::<Vec<u8>>())
            .prop_map(|(id, timestamp, signature)| TreeCertificate::new(id, timestamp, signature))
            .boxed()
    }
}
