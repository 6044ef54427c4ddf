use crate::error::TreeError;
use crate::maybestd::{fmt::Debug, vec::Vec};
use crate::proof::Proof;

/// A trait for hashing byte strings into the fixed-size digests a tree is
/// built over.
///
/// Implementations must be deterministic. `Output`'s `Ord` is required to
/// agree with the lexicographic order of its `AsRef<[u8]>` byte form: the
/// unordered construction mode sorts leaves and combine pairs by it, and two
/// trees only agree on a root if they agree on that ordering. The `[u8; N]`
/// outputs used by the provided hashers order that way by construction.
pub trait MerkleHash {
    /// The output of this hasher.
    #[cfg(all(not(feature = "serde"), not(feature = "borsh")))]
    type Output: Debug + PartialEq + Eq + Clone + Ord + AsRef<[u8]>;

    /// The output of this hasher.
    #[cfg(all(feature = "serde", not(feature = "borsh")))]
    type Output: Debug
        + PartialEq
        + Eq
        + Clone
        + Ord
        + AsRef<[u8]>
        + serde::Serialize
        + serde::de::DeserializeOwned;

    /// The output of this hasher.
    #[cfg(all(not(feature = "serde"), feature = "borsh"))]
    type Output: Debug
        + PartialEq
        + Eq
        + Clone
        + Ord
        + AsRef<[u8]>
        + borsh::BorshSerialize
        + borsh::BorshDeserialize;

    /// The output of this hasher.
    #[cfg(all(feature = "serde", feature = "borsh"))]
    type Output: Debug
        + PartialEq
        + Eq
        + Clone
        + Ord
        + AsRef<[u8]>
        + serde::Serialize
        + serde::de::DeserializeOwned
        + borsh::BorshSerialize
        + borsh::BorshDeserialize;

    /// The byte length of a digest produced by this hasher.
    const DIGEST_SIZE: usize;

    /// Hashes an arbitrary byte string into a digest.
    fn hash(&self, data: &[u8]) -> Self::Output;

    /// Rebuilds a digest from its byte form.
    ///
    /// Returns `None` unless `bytes` is exactly
    /// [`DIGEST_SIZE`](Self::DIGEST_SIZE) bytes long.
    fn digest_from_bytes(&self, bytes: &[u8]) -> Option<Self::Output>;
}

/// Combines two digests into one by hashing their concatenation.
///
/// In order-preserving mode the concatenation is `first` then `second`,
/// exactly as given. Otherwise the lexicographically larger digest goes
/// first, whichever argument it arrived as, so the result is identical for
/// `(a, b)` and `(b, a)`.
pub fn combine<M: MerkleHash>(
    hasher: &M,
    first: &M::Output,
    second: &M::Output,
    preserve_order: bool,
) -> M::Output {
    let (first, second) = if !preserve_order && second > first {
        (second, first)
    } else {
        (first, second)
    };
    let mut preimage = Vec::with_capacity(2 * M::DIGEST_SIZE);
    preimage.extend_from_slice(first.as_ref());
    preimage.extend_from_slice(second.as_ref());
    hasher.hash(&preimage)
}

/// Computes the merkle root of `elements` without keeping the tree around.
pub fn merkle_root<M, I>(elements: I, preserve_order: bool) -> Result<M::Output, TreeError>
where
    M: MerkleHash + Default,
    I: IntoIterator,
    I::Item: AsRef<[u8]>,
{
    Ok(MerkleTree::<M>::new(elements, preserve_order)?.root())
}

/// A binary hash tree assembled layer by layer over a set of leaf digests.
///
/// Layer 0 holds the normalized leaves. Each further layer combines the
/// previous one in fixed windows of two, carrying a trailing unpaired digest
/// upward unchanged, until a single digest — the root — remains. The tree is
/// built eagerly on construction and never mutated afterwards, so a built
/// tree can be queried from many threads without locking.
///
/// The `preserve_order` flag fixes both normalization and the combine rule
/// for the lifetime of the tree; see the crate docs for the two modes.
#[derive(Debug)]
pub struct MerkleTree<M: MerkleHash> {
    layers: Vec<Vec<M::Output>>,
    preserve_order: bool,
    hasher: M,
}

impl<M> MerkleTree<M>
where
    M: MerkleHash + Default,
{
    /// Builds a tree over `elements` with a default hasher.
    pub fn new<I>(elements: I, preserve_order: bool) -> Result<Self, TreeError>
    where
        I: IntoIterator,
        I::Item: AsRef<[u8]>,
    {
        Self::with_hasher(Default::default(), elements, preserve_order)
    }
}

impl<M> MerkleTree<M>
where
    M: MerkleHash,
{
    /// Builds a tree over `elements` with the given hasher.
    ///
    /// Candidates are raw digest bytes: empty ones are skipped, and any
    /// other length besides [`MerkleHash::DIGEST_SIZE`] fails construction
    /// with [`TreeError::InvalidElementSize`]. At least one digest must
    /// remain or construction fails with [`TreeError::EmptyInput`].
    pub fn with_hasher<I>(hasher: M, elements: I, preserve_order: bool) -> Result<Self, TreeError>
    where
        I: IntoIterator,
        I::Item: AsRef<[u8]>,
    {
        let leaves = normalize_leaves(&hasher, elements, preserve_order)?;
        let mut layers = Vec::new();
        let mut current = leaves;
        while current.len() > 1 {
            let next = next_layer(&hasher, &current, preserve_order);
            layers.push(current);
            current = next;
        }
        layers.push(current);
        Ok(Self {
            layers,
            preserve_order,
            hasher,
        })
    }

    /// Returns the root digest committing to the whole leaf set.
    ///
    /// A single-leaf tree roots at that leaf itself.
    pub fn root(&self) -> M::Output {
        self.layers[self.layers.len() - 1][0].clone()
    }

    /// Returns the leaf layer after normalization.
    pub fn leaves(&self) -> &[M::Output] {
        &self.layers[0]
    }

    /// Returns the number of leaves in the tree.
    pub fn leaf_count(&self) -> usize {
        self.layers[0].len()
    }

    /// Returns the number of layers, leaf layer and root layer included.
    pub fn height(&self) -> usize {
        self.layers.len()
    }

    /// Whether the tree was built in order-preserving mode.
    pub fn preserves_order(&self) -> bool {
        self.preserve_order
    }

    /// Builds a membership proof for `element`.
    ///
    /// The proof holds the sibling digests from the leaf's pair upward to
    /// just below the root; a single-leaf tree yields an empty proof. Fails
    /// with [`TreeError::ElementNotFound`] if `element` is not in the leaf
    /// layer. When the tree holds duplicates (ordered mode), the first
    /// occurrence is proven.
    pub fn build_proof(&self, element: &M::Output) -> Result<Proof<M>, TreeError> {
        let index = self.layers[0]
            .iter()
            .position(|leaf| leaf == element)
            .ok_or(TreeError::ElementNotFound)?;
        Ok(self.proof_from_index(index))
    }

    /// Builds a membership proof for `element` at the 1-based `position`.
    ///
    /// Fails with [`TreeError::IndexMismatch`] unless the leaf layer holds
    /// exactly `element` at `position`.
    pub fn build_proof_ordered(
        &self,
        element: &M::Output,
        position: usize,
    ) -> Result<Proof<M>, TreeError> {
        if position == 0 || position > self.leaf_count() {
            return Err(TreeError::IndexMismatch);
        }
        if &self.layers[0][position - 1] != element {
            return Err(TreeError::IndexMismatch);
        }
        Ok(self.proof_from_index(position - 1))
    }

    fn proof_from_index(&self, mut index: usize) -> Proof<M> {
        let mut siblings = Vec::new();
        // The root layer contributes no sibling.
        for layer in &self.layers[..self.layers.len() - 1] {
            let paired = if index % 2 == 0 { index + 1 } else { index - 1 };
            if let Some(sibling) = layer.get(paired) {
                siblings.push(sibling.clone());
            }
            index /= 2;
        }
        Proof { siblings }
    }
}

fn normalize_leaves<M, I>(
    hasher: &M,
    elements: I,
    preserve_order: bool,
) -> Result<Vec<M::Output>, TreeError>
where
    M: MerkleHash,
    I: IntoIterator,
    I::Item: AsRef<[u8]>,
{
    let mut leaves = Vec::new();
    for candidate in elements {
        let bytes = candidate.as_ref();
        if bytes.is_empty() {
            continue; // ignore empty elements
        }
        let digest = hasher
            .digest_from_bytes(bytes)
            .ok_or(TreeError::InvalidElementSize { size: bytes.len() })?;
        leaves.push(digest);
    }
    if leaves.is_empty() {
        return Err(TreeError::EmptyInput);
    }
    if !preserve_order {
        leaves.sort_unstable();
        leaves.dedup();
    }
    Ok(leaves)
}

fn next_layer<M: MerkleHash>(
    hasher: &M,
    layer: &[M::Output],
    preserve_order: bool,
) -> Vec<M::Output> {
    layer
        .chunks(2)
        .map(|pair| match pair {
            [left, right] => combine(hasher, left, right, preserve_order),
            // An unpaired trailing digest is carried forward, not re-hashed.
            lone => lone[0].clone(),
        })
        .collect()
}
