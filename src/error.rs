use thiserror::Error;

/// Errors raised by the reconstruction core.
///
/// Every variant is surfaced to the caller unchanged; a non-empty suspect set
/// is a normal result and never an error.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// A decimal string did not match `-?[0-9]+`.
    #[error("malformed decimal number {0:?}")]
    MalformedNumber(String),

    /// A share base outside `2..=36`.
    #[error("base {0} is outside the supported range 2..=36")]
    InvalidBase(u32),

    /// A digit outside the `0-9a-z` alphabet, a digit not below the base, or
    /// an empty digit string (reported at position 0).
    #[error("invalid digit at position {position} of {digits:?} for base {base}")]
    InvalidDigit {
        digits: String,
        position: usize,
        base: u32,
    },

    /// Interpolation input repeats an x coordinate.
    #[error("interpolation points repeat x = {0}")]
    DegeneratePoints(u64),

    /// Solver input repeats a share identifier.
    #[error("share {0} appears more than once")]
    DuplicateShare(u64),

    /// The threshold is not within `1..=shares`.
    #[error("threshold {threshold} is outside 1..={shares}")]
    InvalidThreshold { threshold: usize, shares: usize },
}
