use crate::maybestd::{string::String, vec::Vec};
use crate::tree::{combine, MerkleHash};

/// A membership proof for a single leaf digest.
///
/// Holds the sibling digests needed, from the leaf's pair upward to just
/// below the root, to recompute the root. A proof is an independent value:
/// verifying it needs only the proof itself, the claimed root, and the leaf
/// — never the tree it came from.
#[derive(Debug, PartialEq, Clone)]
#[cfg_attr(
    feature = "borsh",
    derive(borsh::BorshSerialize, borsh::BorshDeserialize)
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Proof<M: MerkleHash> {
    /// The siblings to be used to rebuild the path to the root.
    pub siblings: Vec<M::Output>,
}

impl<M: MerkleHash> Default for Proof<M> {
    fn default() -> Self {
        Self {
            siblings: Default::default(),
        }
    }
}

impl<M> Proof<M>
where
    M: MerkleHash + Default,
{
    /// Verifies this proof against a tree built in unordered mode, using a
    /// default hasher.
    pub fn verify(&self, root: &M::Output, element: &M::Output) -> bool {
        self.verify_with_hasher(root, element, M::default())
    }

    /// Verifies this proof against a tree built in order-preserving mode,
    /// using a default hasher. `position` is the 1-based position the leaf
    /// claims in the leaf layer.
    pub fn verify_ordered(&self, root: &M::Output, element: &M::Output, position: usize) -> bool {
        self.verify_ordered_with_hasher(root, element, position, M::default())
    }
}

impl<M> Proof<M>
where
    M: MerkleHash,
{
    /// Verifies this proof against a tree built in unordered mode.
    ///
    /// Folds the siblings over `element` with the sorting combine rule and
    /// compares the result to `root`. A malformed or non-matching proof
    /// yields `false`; verification never fails or panics, whatever the
    /// input, so it is safe to run on untrusted proofs.
    pub fn verify_with_hasher(&self, root: &M::Output, element: &M::Output, hasher: M) -> bool {
        let mut current = element.clone();
        for sibling in &self.siblings {
            current = combine(&hasher, &current, sibling, false);
        }
        current == *root
    }

    /// Verifies this proof against a tree built in order-preserving mode.
    ///
    /// The side `element` takes in each combine mirrors construction: the
    /// running 1-based index picks it by parity and moves to its parent
    /// (`index.div_ceil(2)`) after every step, matching the generator's
    /// layer walk. An index that is odd yet larger than `2^remaining` cannot
    /// sit in the subtree the remaining siblings cover — its digest was
    /// carried upward unpaired — so it is promoted before the side is
    /// chosen.
    pub fn verify_ordered_with_hasher(
        &self,
        root: &M::Output,
        element: &M::Output,
        position: usize,
        hasher: M,
    ) -> bool {
        if position == 0 {
            return false;
        }
        let mut current = element.clone();
        let mut index = position;
        for (used, sibling) in self.siblings.iter().enumerate() {
            let remaining = self.siblings.len() - used;
            let subtree = 1usize.checked_shl(remaining as u32).unwrap_or(usize::MAX);
            while index % 2 == 1 && index > subtree {
                index = index.div_ceil(2);
            }
            current = if index % 2 == 0 {
                combine(&hasher, sibling, &current, true)
            } else {
                combine(&hasher, &current, sibling, true)
            };
            index = index.div_ceil(2);
        }
        current == *root
    }

    /// Returns the sibling digests, bottom-up.
    pub fn siblings(&self) -> &[M::Output] {
        &self.siblings
    }

    /// Renders the proof as `0x` followed by the concatenated lowercase hex
    /// of its digests, for transport in text-based protocols. Formatting
    /// only — verification consumes the byte form.
    pub fn to_hex(&self) -> String {
        let mut out = String::from("0x");
        for sibling in &self.siblings {
            out.push_str(&hex::encode(sibling.as_ref()));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{MerkleTree, Sha2Hasher};

    fn sample_proof(n: u64) -> (Proof<Sha2Hasher>, [u8; 32], [u8; 32]) {
        let hasher = Sha2Hasher::new();
        let leaves: Vec<[u8; 32]> = (0..n).map(|x| hasher.hash(&x.to_be_bytes())).collect();
        let tree = MerkleTree::<Sha2Hasher>::new(&leaves, false).unwrap();
        let leaf = tree.leaves()[0];
        let proof = tree.build_proof(&leaf).unwrap();
        (proof, tree.root(), leaf)
    }

    #[test]
    fn default_proof_is_empty() {
        let proof = Proof::<Sha2Hasher>::default();
        assert!(proof.siblings().is_empty());
    }

    #[test]
    fn hex_form_concatenates_digests() {
        let (proof, _, _) = sample_proof(4);
        let rendered = proof.to_hex();
        assert!(rendered.starts_with("0x"));
        assert_eq!(rendered.len(), 2 + proof.siblings().len() * 64);

        let mut expected = String::from("0x");
        for sibling in proof.siblings() {
            expected.push_str(&hex::encode(sibling));
        }
        assert_eq!(rendered, expected);

        assert_eq!(Proof::<Sha2Hasher>::default().to_hex(), "0x");
    }

    #[test]
    fn serde_json_round_trip() {
        let (proof, root, leaf) = sample_proof(5);
        let encoded = serde_json::to_string(&proof).unwrap();
        let decoded: Proof<Sha2Hasher> = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, proof);
        assert!(decoded.verify(&root, &leaf));
    }

    #[test]
    fn postcard_round_trip() {
        let (proof, root, leaf) = sample_proof(6);
        let encoded = postcard::to_allocvec(&proof).unwrap();
        let decoded: Proof<Sha2Hasher> = postcard::from_bytes(&encoded).unwrap();
        assert_eq!(decoded, proof);
        assert!(decoded.verify(&root, &leaf));
    }

    #[test]
    fn borsh_round_trip() {
        let (proof, root, leaf) = sample_proof(7);
        let encoded = borsh::to_vec(&proof).unwrap();
        let decoded: Proof<Sha2Hasher> = borsh::from_slice(&encoded).unwrap();
        assert_eq!(decoded, proof);
        assert!(decoded.verify(&root, &leaf));
    }
}
