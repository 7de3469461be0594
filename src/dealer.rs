use num_bigint::RandBigInt;
use num_traits::Zero;
use rand::Rng;
use std::collections::BTreeSet;
use tracing::debug;

use crate::bigint::BigInt;
use crate::constants::{MAX_BASE, MIN_BASE};
use crate::decode::{check_base, encode};
use crate::error::Error;
use crate::input::TestCase;
use crate::share::Share;

/// Errors raised while dealing shares.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum DealError {
    #[error("secret must be non-negative, got {0}")]
    NegativeSecret(BigInt),

    #[error("coefficient bound must be positive")]
    EmptyCoefficientRange,

    #[error("faulty share {0} is not one of the dealt shares")]
    UnknownFaultyShare(u64),

    #[error(transparent)]
    Share(#[from] Error),
}

/// Represents a polynomial over the integers.
///
/// Coefficients are stored lowest degree first, so `coefficients[0]` is the
/// value at `x = 0`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Polynomial {
    pub coefficients: Vec<BigInt>,
}

impl Polynomial {
    /// Constructs a polynomial of a given degree with random coefficients
    /// drawn from `[0, bound)`, where the constant term is the provided
    /// secret.
    ///
    /// # Arguments
    ///
    /// * `degree` - The degree of the polynomial.
    /// * `secret` - The secret (constant term) of the polynomial.
    /// * `bound` - Exclusive upper bound for the random coefficients.
    pub fn new(degree: usize, secret: BigInt, bound: &BigInt) -> Self {
        let mut rng = rand::thread_rng();
        let low = num_bigint::BigInt::zero();
        let mut coefficients = Vec::with_capacity(degree + 1);
        coefficients.push(secret);

        for _ in 0..degree {
            coefficients.push(BigInt::from(rng.gen_bigint_range(&low, bound.as_inner())));
        }

        Polynomial { coefficients }
    }

    /// Evaluates the polynomial at a given point.
    pub fn evaluate(&self, x: u64) -> BigInt {
        let x = BigInt::from(x);
        let mut result = BigInt::zero();
        let mut term = BigInt::from(1);

        for coeff in &self.coefficients {
            result = result + coeff * &term;
            term = term * &x;
        }

        result
    }
}

/// Parameters for [`deal`].
///
/// # Fields
///
/// * `threshold` - Shares needed to reconstruct; the polynomial has degree
///   `threshold - 1`.
/// * `shares` - Number of shares, dealt at `x = 1..=shares`.
/// * `base` - Encoding base for every share, or `None` for a random base per
///   share.
/// * `faulty` - Identifiers whose value is corrupted by a non-zero offset.
/// * `bound` - Exclusive upper bound for random coefficients and offsets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DealOptions {
    pub threshold: usize,
    pub shares: usize,
    pub base: Option<u32>,
    pub faulty: BTreeSet<u64>,
    pub bound: BigInt,
}

/// Splits `secret` into encoded shares of a random integer polynomial.
///
/// The output is a fixture generator for reconstruction tests, not a
/// cryptographic dealer: coefficients are small integers and no modulus is
/// involved.
///
/// # Examples
///
/// ```rust
/// use shard_recover::bigint::BigInt;
/// use shard_recover::dealer::{deal, DealOptions};
///
/// let options = DealOptions {
///     threshold: 3,
///     shares: 5,
///     base: Some(16),
///     faulty: Default::default(),
///     bound: BigInt::from(100),
/// };
/// let case = deal(&BigInt::from(42), &options).unwrap();
/// assert_eq!(case.shares.len(), 5);
/// ```
pub fn deal(secret: &BigInt, options: &DealOptions) -> Result<TestCase, DealError> {
    if secret.is_negative() {
        return Err(DealError::NegativeSecret(secret.clone()));
    }
    if options.threshold < 1 || options.threshold > options.shares {
        return Err(Error::InvalidThreshold {
            threshold: options.threshold,
            shares: options.shares,
        }
        .into());
    }
    if options.bound.is_zero() || options.bound.is_negative() {
        return Err(DealError::EmptyCoefficientRange);
    }
    if let Some(base) = options.base {
        check_base(base)?;
    }
    if let Some(&x) = options
        .faulty
        .iter()
        .find(|&&x| x < 1 || x > options.shares as u64)
    {
        return Err(DealError::UnknownFaultyShare(x));
    }

    let poly = Polynomial::new(options.threshold - 1, secret.clone(), &options.bound);
    let mut rng = rand::thread_rng();
    let one = num_bigint::BigInt::from(1);
    let mut shares = Vec::with_capacity(options.shares);

    for x in 1..=options.shares as u64 {
        let mut y = poly.evaluate(x);
        if options.faulty.contains(&x) {
            let offset = rng.gen_bigint_range(&one, &(options.bound.as_inner() + &one));
            y = y + BigInt::from(offset);
            debug!("Corrupted share {}", x);
        }

        let base = options
            .base
            .unwrap_or_else(|| rng.gen_range(MIN_BASE..=MAX_BASE));
        shares.push(Share::new(x, base, encode(&y, base)?)?);
    }

    debug!(
        "Dealt {} shares with threshold {}",
        shares.len(),
        options.threshold
    );
    Ok(TestCase::new(options.threshold, shares))
}
