//! Error taxonomy for the sort, the transport, and the generators.
//!
//! Every error here is fatal to the whole cohort: a rank that bails out
//! drops its channel endpoints, and its peers observe the disconnection as
//! [`Error::Disconnected`] at their next suspension point.

use thiserror::Error;

/// Unified error type for the library.
#[derive(Debug, Error)]
pub enum Error {
    /// Reading the input file (or any other I/O) failed.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// The input held a token that does not parse as a 32-bit integer.
    #[error("invalid token {token:?} in input")]
    InvalidToken { token: String },

    /// The input file is empty or starts with something other than a count.
    #[error("input does not start with a positive element count")]
    MissingCount,

    /// The input promised `expected` values but ended after `found`.
    #[error("input ended early: expected {expected} values, found {found}")]
    ShortInput { expected: usize, found: usize },

    /// The element count does not divide evenly across the ranks.
    #[error("element count {n} is not divisible by {ranks} ranks")]
    UnevenSplit { n: usize, ranks: usize },

    /// The rank count cannot be halved down to singleton groups.
    #[error("rank count {0} is not a power of two")]
    RanksNotPowerOfTwo(usize),

    /// A generator was asked for more unique values than its range holds.
    #[error("cannot draw {n} unique values from a range of {span} values")]
    RangeTooSmall { n: usize, span: u64 },

    /// A peer went away mid-protocol.
    #[error("rank {peer} disconnected")]
    Disconnected { peer: usize },

    /// A message arrived carrying the wrong protocol tag.
    #[error("expected tag {expected:?} from rank {peer}, got {got:?}")]
    TagMismatch {
        peer: usize,
        expected: crate::comm::Tag,
        got: crate::comm::Tag,
    },

    /// A payload's length disagrees with the count announced for it.
    #[error("rank {peer} announced {announced} elements but sent {got}")]
    LengthMismatch {
        peer: usize,
        announced: usize,
        got: usize,
    },

    /// The gathered per-rank counts do not add back up to N.
    #[error("gathered counts sum to {got}, expected {expected}")]
    CountMismatch { expected: usize, got: usize },
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
