use blake2::digest::consts::U16;
use blake2::{Blake2b, Digest};

use crate::tree::MerkleHash;

type Blake2b128 = Blake2b<U16>;

/// A Blake2b hasher with a 128 bit output, producing 16 byte digests.
///
/// Useful where the shorter digest form is the configured element size.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Blake2bHasher;

impl Blake2bHasher {
    /// Create a new instance of the hasher
    pub fn new() -> Self {
        Blake2bHasher
    }
}

impl MerkleHash for Blake2bHasher {
    type Output = [u8; 16];

    const DIGEST_SIZE: usize = 16;

    fn hash(&self, data: &[u8]) -> Self::Output {
        let mut hasher = Blake2b128::new();
        hasher.update(data);
        hasher.finalize().into()
    }

    fn digest_from_bytes(&self, bytes: &[u8]) -> Option<Self::Output> {
        bytes.try_into().ok()
    }
}
