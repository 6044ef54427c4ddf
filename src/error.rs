/// An error that occurred while building a merkle tree or requesting a proof
/// from it.
///
/// These computations are pure, so the same inputs always fail the same way;
/// none of the variants is retryable. Proof *verification* never produces an
/// error — a malformed or non-matching proof simply verifies as `false`.
#[derive(Debug, PartialEq, Clone, Copy)]
pub enum TreeError {
    /// No leaves remained after validation. Empty candidate buffers are
    /// skipped rather than rejected, so an input of nothing but empty
    /// buffers also fails with this.
    EmptyInput,
    /// A non-empty candidate leaf's byte length does not match the hasher's
    /// digest size.
    InvalidElementSize {
        /// Byte length of the offending candidate.
        size: usize,
    },
    /// The queried digest is not present in the leaf layer of the tree.
    ElementNotFound,
    /// The supplied 1-based position does not hold the supplied digest.
    IndexMismatch,
}
