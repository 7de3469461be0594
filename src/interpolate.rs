use core::fmt;
use num_rational::BigRational;
use num_traits::{One, Zero};
use std::borrow::Borrow;
use std::collections::HashSet;
use std::hash::Hash;

use crate::bigint::BigInt;
use crate::error::Error;
use crate::share::Point;

/// A value produced by interpolating one subset of points.
///
/// Candidates are opaque keys for the consensus tally: they are compared and
/// hashed by value and rendered for reports.
pub trait Candidate: Clone + Eq + Hash + fmt::Debug + fmt::Display {
    fn to_hex_string(&self) -> String;
}

impl Candidate for BigInt {
    fn to_hex_string(&self) -> String {
        BigInt::to_hex_string(self)
    }
}

impl Candidate for BigRational {
    fn to_hex_string(&self) -> String {
        let numer = BigInt::from(self.numer().clone()).to_hex_string();
        if self.denom().is_one() {
            numer
        } else {
            let denom = BigInt::from(self.denom().clone()).to_hex_string();
            format!("{numer}/{denom}")
        }
    }
}

/// Evaluates the polynomial through a set of points at `x = 0`.
///
/// Implementations must give the same candidate for any ordering of the same
/// points and must reject repeated `x` with [`Error::DegeneratePoints`].
pub trait Interpolator {
    type Candidate: Candidate;

    fn secret_at_zero<P: Borrow<Point>>(&self, points: &[P]) -> Result<Self::Candidate, Error>;
}

/// Division-free Lagrange form: `S = Σᵢ yᵢ · Πⱼ≠ᵢ (−xⱼ)`.
///
/// The per-term denominators `Πⱼ≠ᵢ (xᵢ − xⱼ)` are left out, so the result is a
/// reproducible fingerprint of the point set rather than `P(0)` itself. This
/// is the default mode and the one reports are compared against.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReferenceInterpolator;

impl Interpolator for ReferenceInterpolator {
    type Candidate = BigInt;

    fn secret_at_zero<P: Borrow<Point>>(&self, points: &[P]) -> Result<BigInt, Error> {
        ensure_distinct(points)?;

        let mut secret = BigInt::zero();
        for (i, point) in points.iter().enumerate() {
            let point: &Point = point.borrow();
            let weight: BigInt = points
                .iter()
                .enumerate()
                .filter(|&(j, _)| j != i)
                .map(|(_, other)| {
                    let other: &Point = other.borrow();
                    -BigInt::from(other.x())
                })
                .product();
            secret = secret + point.y() * &weight;
        }

        Ok(secret)
    }
}

/// Full Lagrange interpolation at zero over the rationals:
/// `P(0) = Σᵢ yᵢ · Πⱼ≠ᵢ (−xⱼ) / (xᵢ − xⱼ)`.
///
/// Consistent shares of an integer polynomial all yield the same integral
/// candidate; a subset containing an inconsistent share usually yields a
/// different, possibly fractional one.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExactInterpolator;

impl Interpolator for ExactInterpolator {
    type Candidate = BigRational;

    fn secret_at_zero<P: Borrow<Point>>(&self, points: &[P]) -> Result<BigRational, Error> {
        ensure_distinct(points)?;

        let mut secret = BigRational::zero();
        for (i, point) in points.iter().enumerate() {
            let point: &Point = point.borrow();
            let xi = num_bigint::BigInt::from(point.x());
            let mut numer = point.y().as_inner().clone();
            let mut denom = num_bigint::BigInt::one();

            for (j, other) in points.iter().enumerate() {
                if i == j {
                    continue;
                }
                let other: &Point = other.borrow();
                let xj = num_bigint::BigInt::from(other.x());
                numer *= -&xj;
                denom *= &xi - &xj;
            }

            secret += BigRational::new(numer, denom);
        }

        Ok(secret)
    }
}

/// Reference-mode interpolation; see [`ReferenceInterpolator`].
pub fn secret_at_zero<P: Borrow<Point>>(points: &[P]) -> Result<BigInt, Error> {
    ReferenceInterpolator.secret_at_zero(points)
}

fn ensure_distinct<P: Borrow<Point>>(points: &[P]) -> Result<(), Error> {
    let mut seen = HashSet::with_capacity(points.len());
    for point in points {
        let point: &Point = point.borrow();
        if !seen.insert(point.x()) {
            return Err(Error::DegeneratePoints(point.x()));
        }
    }
    Ok(())
}
