use std::collections::{BTreeSet, HashMap, HashSet};

use tracing::trace;

use crate::bigint::BigInt;
use crate::combinations::combinations;
use crate::error::Error;
use crate::interpolate::{Interpolator, ReferenceInterpolator};
use crate::share::Point;

/// Outcome of one reconstruction.
///
/// # Fields
///
/// * `secret` - The plurality winner among all subset candidates.
/// * `suspects` - Identifiers of shares whose exclusion trial disagreed with
///   the winner.
/// * `support` - How many subsets produced the winner.
/// * `subsets` - How many subsets were interpolated.
/// * `distinct_candidates` - How many different candidates were seen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconstruction<C> {
    pub secret: C,
    pub suspects: BTreeSet<u64>,
    pub support: usize,
    pub subsets: usize,
    pub distinct_candidates: usize,
}

/// Votes over every `k`-subset of the shares and flags dissenting shares.
///
/// The solver is a pure function of its inputs: it holds no state between
/// calls and the same `(points, k)` always produce the same result.
#[derive(Debug, Clone, Default)]
pub struct ConsensusSolver<I> {
    interpolator: I,
}

impl<I: Interpolator> ConsensusSolver<I> {
    pub fn new(interpolator: I) -> Self {
        ConsensusSolver { interpolator }
    }

    /// Reconstructs the secret from `points` with threshold `k`.
    ///
    /// Plurality phase: every `k`-subset is interpolated in the order of
    /// [`combinations`], and the winner only changes when a candidate's tally
    /// strictly exceeds the current maximum, so the first candidate to reach
    /// the maximum keeps it.
    ///
    /// Suspect phase: for each share, in input order, the first `k` other
    /// shares form a trial subset. The share is flagged when the trial
    /// disagrees with the winner. Shares with fewer than `k` others are not
    /// evaluated.
    ///
    /// # Errors
    ///
    /// * [`Error::InvalidThreshold`] if `points` is empty or `k` is outside
    ///   `1..=points.len()`.
    /// * [`Error::DuplicateShare`] if two points share an `x`.
    pub fn solve(&self, points: &[Point], k: usize) -> Result<Reconstruction<I::Candidate>, Error> {
        validate(points, k)?;

        let mut tally: HashMap<I::Candidate, usize> = HashMap::new();
        let mut best: Option<(I::Candidate, usize)> = None;
        let mut subsets = 0;

        for subset in combinations(points, k) {
            let candidate = self.interpolator.secret_at_zero(&subset)?;
            subsets += 1;

            let count = tally.entry(candidate.clone()).or_insert(0);
            *count += 1;
            let count = *count;
            trace!(%candidate, count, "tallied subset candidate");

            if best.as_ref().map_or(true, |(_, max)| count > *max) {
                best = Some((candidate, count));
            }
        }

        let (secret, support) = best.ok_or(Error::InvalidThreshold {
            threshold: k,
            shares: points.len(),
        })?;
        let suspects = self.suspects(points, k, &secret)?;

        Ok(Reconstruction {
            secret,
            suspects,
            support,
            subsets,
            distinct_candidates: tally.len(),
        })
    }

    fn suspects(
        &self,
        points: &[Point],
        k: usize,
        secret: &I::Candidate,
    ) -> Result<BTreeSet<u64>, Error> {
        let mut suspects = BTreeSet::new();

        for point in points {
            let trial: Vec<&Point> = points
                .iter()
                .filter(|other| other.x() != point.x())
                .take(k)
                .collect();
            if trial.len() < k {
                continue;
            }

            let candidate = self.interpolator.secret_at_zero(&trial)?;
            if candidate != *secret {
                trace!(x = point.x(), %candidate, "exclusion trial disagrees");
                suspects.insert(point.x());
            }
        }

        Ok(suspects)
    }
}

/// Reconstructs with the reference interpolator.
///
/// # Examples
///
/// ```rust
/// use shard_recover::bigint::BigInt;
/// use shard_recover::share::Point;
/// use shard_recover::solver::solve;
///
/// let points = vec![
///     Point::new(1, BigInt::from(4)),
///     Point::new(2, BigInt::from(7)),
///     Point::new(3, BigInt::from(10)),
/// ];
/// let result = solve(&points, 3).unwrap();
/// assert_eq!(result.secret, BigInt::from(65));
/// assert!(result.suspects.is_empty());
/// ```
pub fn solve(points: &[Point], k: usize) -> Result<Reconstruction<BigInt>, Error> {
    ConsensusSolver::new(ReferenceInterpolator).solve(points, k)
}

fn validate(points: &[Point], k: usize) -> Result<(), Error> {
    if points.is_empty() || k < 1 || k > points.len() {
        return Err(Error::InvalidThreshold {
            threshold: k,
            shares: points.len(),
        });
    }

    let mut seen = HashSet::with_capacity(points.len());
    for point in points {
        if !seen.insert(point.x()) {
            return Err(Error::DuplicateShare(point.x()));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use num_rational::BigRational;

    use super::*;
    use crate::interpolate::ExactInterpolator;
    use crate::share::{to_points, Share};

    fn points(raw: &[(u64, i64)]) -> Vec<Point> {
        raw.iter()
            .map(|&(x, y)| Point::new(x, BigInt::from(y)))
            .collect()
    }

    fn exact() -> ConsensusSolver<ExactInterpolator> {
        ConsensusSolver::new(ExactInterpolator)
    }

    fn integer(value: i64) -> BigRational {
        BigRational::from_integer(value.into())
    }

    fn set(xs: &[u64]) -> BTreeSet<u64> {
        xs.iter().copied().collect()
    }

    #[test]
    fn test_single_line_reference_values() {
        // The division-free form gives -15, -22 and -41 for the three pairs,
        // so the first pair wins and the exclusion trials for x = 1, 2 differ.
        let result = solve(&points(&[(1, 4), (2, 7), (3, 10)]), 2).unwrap();
        assert_eq!(result.secret, BigInt::from(-15));
        assert_eq!(result.suspects, set(&[1, 2]));
        assert_eq!(result.support, 1);
        assert_eq!(result.subsets, 3);
        assert_eq!(result.distinct_candidates, 3);
    }

    #[test]
    fn test_single_line_exact_values() {
        let result = exact().solve(&points(&[(1, 4), (2, 7), (3, 10)]), 2).unwrap();
        assert_eq!(result.secret, integer(1));
        assert!(result.suspects.is_empty());
        assert_eq!(result.support, 3);
        assert_eq!(result.distinct_candidates, 1);
    }

    #[test]
    fn test_one_faulty_share_reference_values() {
        let result = solve(&points(&[(1, 4), (2, 7), (3, 10), (4, 99)]), 2).unwrap();
        assert_eq!(result.secret, BigInt::from(-15));
        assert_eq!(result.suspects, set(&[1, 2]));
        assert_eq!(result.subsets, 6);
    }

    #[test]
    fn test_one_faulty_share_exact_values() {
        // Excluding x = 4 leaves a clean trial, so it agrees with the winner.
        let result = exact()
            .solve(&points(&[(1, 4), (2, 7), (3, 10), (4, 99)]), 2)
            .unwrap();
        assert_eq!(result.secret, integer(1));
        assert_eq!(result.support, 3);
        assert!(result.suspects.is_empty());
    }

    #[test]
    fn test_suspects_report_exclusion_disagreement() {
        // With the faulty share first, only its own exclusion trial is clean.
        let result = exact()
            .solve(&points(&[(1, 99), (2, 7), (3, 10), (4, 13)]), 2)
            .unwrap();
        assert_eq!(result.secret, integer(1));
        assert_eq!(result.suspects, set(&[2, 3, 4]));
    }

    #[test]
    fn test_mixed_bases_match_decimal_input() {
        let shares = vec![
            Share::new(1, 10, "4").unwrap(),
            Share::new(2, 2, "111").unwrap(),
            Share::new(3, 16, "a").unwrap(),
        ];
        let decoded = to_points(&shares).unwrap();
        assert_eq!(decoded, points(&[(1, 4), (2, 7), (3, 10)]));
        assert_eq!(
            solve(&decoded, 2).unwrap(),
            solve(&points(&[(1, 4), (2, 7), (3, 10)]), 2).unwrap()
        );
    }

    #[test]
    fn test_threshold_equals_share_count() {
        let result = solve(&points(&[(1, 4), (2, 7), (3, 10)]), 3).unwrap();
        assert_eq!(result.secret, BigInt::from(65));
        assert_eq!(result.subsets, 1);
        assert!(result.suspects.is_empty());
    }

    #[test]
    fn test_threshold_of_one() {
        let result = solve(&points(&[(1, 4), (2, 7), (3, 10)]), 1).unwrap();
        assert_eq!(result.secret, BigInt::from(4));
        assert_eq!(result.suspects, set(&[1]));
    }

    #[test]
    fn test_tie_break_first_to_reach_maximum() {
        // Every candidate is seen once; the first subset keeps the lead.
        let result = solve(&points(&[(1, 4), (2, 7), (3, 10)]), 2).unwrap();
        assert_eq!(result.secret, BigInt::from(-15));

        // 5 reaches a tally of 2 before 7 does.
        let result = solve(&points(&[(1, 5), (2, 7), (3, 5), (4, 7)]), 1).unwrap();
        assert_eq!(result.secret, BigInt::from(5));
        assert_eq!(result.support, 2);

        // 7 reaches a tally of 2 first, although 5 was produced first.
        let result = solve(&points(&[(1, 5), (2, 7), (3, 7), (4, 5)]), 1).unwrap();
        assert_eq!(result.secret, BigInt::from(7));
        assert_eq!(result.support, 2);
    }

    #[test]
    fn test_solver_is_deterministic() {
        let pts = points(&[(1, 12), (2, 9), (4, 40), (5, 3), (7, 77)]);
        for k in 1..=pts.len() {
            assert_eq!(solve(&pts, k).unwrap(), solve(&pts, k).unwrap());
            assert_eq!(exact().solve(&pts, k).unwrap(), exact().solve(&pts, k).unwrap());
        }
    }

    #[test]
    fn test_removing_a_suspect_does_not_grow_suspects() {
        // Holds when the plurality winner survives the removal; removals that
        // change the winner are skipped.
        let pts = points(&[(1, 99), (2, 7), (3, 10), (4, 13), (5, 16)]);
        let full = exact().solve(&pts, 2).unwrap();
        assert_eq!(full.suspects, set(&[2, 3, 4, 5]));

        let mut checked = 0;
        for &suspect in &full.suspects {
            let remaining: Vec<Point> = pts.iter().filter(|p| p.x() != suspect).cloned().collect();
            let reduced = exact().solve(&remaining, 2).unwrap();
            if reduced.secret != full.secret {
                continue;
            }
            assert!(reduced.suspects.len() <= full.suspects.len());
            assert!(reduced.suspects.is_subset(&full.suspects));
            checked += 1;
        }
        assert_eq!(checked, 4);
    }

    #[test]
    fn test_removing_a_suspect_reference_mode() {
        let pts = points(&[(1, 2), (2, 2), (4, 0), (6, 3), (7, 0)]);
        let full = solve(&pts, 2).unwrap();
        assert_eq!(full.secret, BigInt::from(-8));
        assert_eq!(full.suspects, set(&[4, 6, 7]));

        let mut checked = Vec::new();
        for &suspect in &full.suspects {
            let remaining: Vec<Point> = pts.iter().filter(|p| p.x() != suspect).cloned().collect();
            let reduced = solve(&remaining, 2).unwrap();
            if reduced.secret != full.secret {
                continue;
            }
            assert!(reduced.suspects.is_subset(&full.suspects));
            assert!(!reduced.suspects.contains(&suspect));
            checked.push(suspect);
        }
        // dropping x = 4 moves the winner to -14
        assert_eq!(checked, vec![6, 7]);
    }

    #[test]
    fn test_invalid_threshold() {
        let pts = points(&[(1, 4), (2, 7)]);
        assert_eq!(
            solve(&pts, 0),
            Err(Error::InvalidThreshold { threshold: 0, shares: 2 })
        );
        assert_eq!(
            solve(&pts, 3),
            Err(Error::InvalidThreshold { threshold: 3, shares: 2 })
        );
        assert_eq!(
            solve(&[], 1),
            Err(Error::InvalidThreshold { threshold: 1, shares: 0 })
        );
    }

    #[test]
    fn test_duplicate_share() {
        let pts = points(&[(1, 4), (2, 7), (1, 4)]);
        assert_eq!(solve(&pts, 2), Err(Error::DuplicateShare(1)));
        assert_eq!(exact().solve(&pts, 2), Err(Error::DuplicateShare(1)));
    }
}
