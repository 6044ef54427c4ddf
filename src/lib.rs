//! A layered binary merkle tree over fixed-size digests.
//!
//! The tree is built eagerly, one layer at a time: layer 0 holds the leaf
//! digests, and every further layer combines the previous one in pairs until
//! a single digest — the root — remains. The root is a succinct, tamper
//! evident commitment to the leaf set, and membership of any leaf can be
//! shown with a compact [`Proof`] of sibling digests.
//!
//! Construction runs in one of two modes, fixed per tree:
//!
//! * **unordered** — leaves are sorted and deduplicated, and every pair is
//!   combined larger-digest-first, so the root does not depend on the order
//!   the leaves were supplied in;
//! * **ordered** — leaves keep their caller-supplied order (duplicates
//!   included) and pairs combine left-to-right, making proofs
//!   position-sensitive.
//!
//! The hash primitive is pluggable through [`MerkleHash`]; [`Sha2Hasher`]
//! (32 byte digests) and [`Blake2bHasher`] (16 byte digests) are provided.
//!
//! ```
//! use lmt_rs::tree::MerkleHash;
//! use lmt_rs::{MerkleTree, Sha2Hasher};
//!
//! let hasher = Sha2Hasher::new();
//! let leaves: Vec<[u8; 32]> = (0u8..4).map(|x| hasher.hash(&[x])).collect();
//! let tree = MerkleTree::<Sha2Hasher>::new(&leaves, false)?;
//! let proof = tree.build_proof(&leaves[0])?;
//! assert!(proof.verify(&tree.root(), &leaves[0]));
//! # Ok::<(), lmt_rs::TreeError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

/// Re-exports from `std` or `core`/`alloc`, so the rest of the crate imports
/// from one place whether or not the `std` feature is enabled.
pub mod maybestd {
    #[cfg(not(feature = "std"))]
    pub use alloc::{string, vec};
    #[cfg(not(feature = "std"))]
    pub use core::fmt;
    #[cfg(feature = "std")]
    pub use std::{fmt, string, vec};
}

/// Defines errors that might arise while building a tree or requesting
/// proofs from it.
pub mod error;
/// Defines membership proofs and their verification.
pub mod proof;
/// Defines the merkle tree itself.
pub mod tree;

/// A Blake2b hasher producing 16 byte digests.
pub mod blake2_hasher;
/// A sha256 hasher producing 32 byte digests.
pub mod sha2_hasher;

pub use blake2_hasher::Blake2bHasher;
pub use error::TreeError;
pub use proof::Proof;
pub use sha2_hasher::Sha2Hasher;
pub use tree::{combine, merkle_root, MerkleHash, MerkleTree};
