//! # Shamir Secret Recovery with Faulty Share Detection
//!
//! This library reconstructs a secret from Shamir-style shares whose values are written in
//! arbitrary bases, and reports which shares look inconsistent with the reconstruction.
//!
//! ## Shamir's Secret Sharing (SSS)
//!
//! A dealer picks a polynomial of degree `k-1` whose constant term is the secret:
//!
//! ```ignore
//! f(x) = a0 + a1*x + a2*x^2 + ... + a(k-1)*x^(k-1)
//! ```
//!
//! Each share is a point `(x, f(x))`. Any `k` points determine the polynomial, and evaluating the
//! interpolating polynomial at `x = 0` yields the secret.
//!
//! ### Integer Arithmetic
//!
//! Shares here live over the integers, not a finite field. Share values are decoded into
//! arbitrary-precision integers, and by default each subset of `k` points is reduced with the
//! division-free form
//!
//! ```ignore
//! S = Σᵢ yᵢ · Πⱼ≠ᵢ (−xⱼ)
//! ```
//!
//! which drops the Lagrange denominators `Πⱼ≠ᵢ (xᵢ − xⱼ)`. The result is a deterministic
//! fingerprint of the subset rather than `f(0)`. The full rational form is available as an
//! explicit alternative ([`interpolate::ExactInterpolator`]).
//!
//! ### Consensus
//!
//! With `n` shares and threshold `k`, every one of the `C(n, k)` subsets is interpolated and the
//! candidates are tallied. The most frequent candidate wins, with ties going to the candidate that
//! reached the maximum first. Then each share is checked by interpolating the first `k` other
//! shares: if that trial disagrees with the winner, the share is reported as a suspect.
//!
//! ## Usage in the Code
//!
//! ### Example: Recovering a Secret
//!
//! ```rust
//! use shard_recover::input::TestCase;
//! use shard_recover::solver::solve;
//!
//! let case = TestCase::from_json(r#"{
//!     "keys": { "n": 3, "k": 3 },
//!     "1": { "base": "10", "value": "4" },
//!     "2": { "base": "2", "value": "111" },
//!     "3": { "base": "16", "value": "a" }
//! }"#).unwrap();
//!
//! let result = solve(&case.points().unwrap(), case.threshold).unwrap();
//! assert_eq!(result.secret.to_string(), "65");
//! assert!(result.suspects.is_empty());
//! ```
//!
//! ### Example: Exact Interpolation
//!
//! ```rust
//! use shard_recover::bigint::BigInt;
//! use shard_recover::interpolate::ExactInterpolator;
//! use shard_recover::share::Point;
//! use shard_recover::solver::ConsensusSolver;
//!
//! // 3x + 1, with the last share corrupted
//! let points: Vec<Point> = [(1, 4), (2, 7), (3, 10), (4, 99)]
//!     .iter()
//!     .map(|&(x, y)| Point::new(x, BigInt::from(y)))
//!     .collect();
//!
//! let result = ConsensusSolver::new(ExactInterpolator).solve(&points, 2).unwrap();
//! assert_eq!(result.secret.to_string(), "1");
//! ```
//!
//! ## Modules
//!
//! - `bigint`: Arbitrary-precision signed integers.
//! - `decode`: Base-N digit decoding and encoding.
//! - `share`: Encoded shares and decoded points.
//! - `interpolate`: Interpolation at zero, reference and exact.
//! - `combinations`: Lexicographic k-subset enumeration.
//! - `solver`: Plurality voting and suspect detection.
//! - `input`: Test case parsing.
//! - `report`: Result rendering.
//! - `config`: Layered configuration for the binary.
//! - `dealer`: Fixture generation.

/// The `bigint` module provides the arbitrary-precision signed integer that share values,
/// interpolation intermediates and candidates are computed in.
pub mod bigint;

/// The `combinations` module enumerates k-sized subsets in lexicographic order of indices. The
/// consensus tie-break depends on this order.
pub mod combinations;

/// The `config` module loads the binary's settings from defaults, `conf.toml` and the
/// environment.
pub mod config;

/// The `constants` module defines various constants used in the library.
pub mod constants;

/// The `dealer` module splits a secret into encoded shares of a random integer polynomial, for
/// producing reconstruction fixtures.
pub mod dealer;

/// The `decode` module converts digit strings in bases 2 through 36 into integers and back.
pub mod decode;

/// The `error` module defines the errors raised by the reconstruction core.
pub mod error;

/// The `input` module parses test case files into a threshold and a list of shares.
pub mod input;

/// The `interpolate` module evaluates the polynomial through a set of points at `x = 0`.
pub mod interpolate;

/// The `report` module renders a reconstruction as text or JSON.
pub mod report;

/// The `share` module defines encoded shares and the points they decode to.
pub mod share;

/// The `solver` module is the heart of the library. It votes over every k-subset of the shares to
/// pick the secret, then flags shares whose exclusion disagrees with the winner.
pub mod solver;

pub use decode::decode_share;
pub use error::Error;
pub use solver::solve;
