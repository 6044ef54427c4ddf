use sha2::{Digest, Sha256};

use crate::tree::MerkleHash;

/// A plain sha256 hasher producing 32 byte digests.
///
/// This is the crate's default digest configuration. No domain separation is
/// applied: leaves arrive pre-hashed, and combining hashes the bare
/// concatenation of two digests.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Sha2Hasher;

impl Sha2Hasher {
    /// Create a new instance of the hasher
    pub fn new() -> Self {
        Sha2Hasher
    }
}

impl MerkleHash for Sha2Hasher {
    type Output = [u8; 32];

    const DIGEST_SIZE: usize = 32;

    fn hash(&self, data: &[u8]) -> Self::Output {
        let mut hasher = Sha256::new();
        hasher.update(data);
        hasher.finalize().into()
    }

    fn digest_from_bytes(&self, bytes: &[u8]) -> Option<Self::Output> {
        bytes.try_into().ok()
    }
}
