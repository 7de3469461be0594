/// Lazy iterator over every `k`-sized subset of a slice.
///
/// Subsets preserve the slice order and are emitted in lexicographic order of
/// their indices: for `[a, b, c, d]` and `k = 2` the sequence is `ab, ac, ad,
/// bc, bd, cd`. The consensus tie-break depends on this order.
#[derive(Debug, Clone)]
pub struct Combinations<'a, T> {
    pool: &'a [T],
    indices: Vec<usize>,
    exhausted: bool,
}

/// Enumerates the `k`-subsets of `pool`.
///
/// `k = 0` yields a single empty subset; `k > pool.len()` yields nothing.
///
/// # Examples
///
/// ```rust
/// use shard_recover::combinations::combinations;
///
/// let subsets: Vec<Vec<&char>> = combinations(&['a', 'b', 'c'], 2).collect();
/// assert_eq!(subsets, vec![vec![&'a', &'b'], vec![&'a', &'c'], vec![&'b', &'c']]);
/// ```
pub fn combinations<T>(pool: &[T], k: usize) -> Combinations<'_, T> {
    Combinations {
        pool,
        indices: (0..k).collect(),
        exhausted: k > pool.len(),
    }
}

impl<'a, T> Combinations<'a, T> {
    /// Moves `indices` to the next subset, or marks the iterator exhausted.
    fn advance(&mut self) {
        let k = self.indices.len();
        let m = self.pool.len();

        // rightmost index that has not reached its final position
        let Some(i) = (0..k).rev().find(|&i| self.indices[i] != i + m - k) else {
            self.exhausted = true;
            return;
        };

        self.indices[i] += 1;
        for j in i + 1..k {
            self.indices[j] = self.indices[j - 1] + 1;
        }
    }
}

impl<'a, T> Iterator for Combinations<'a, T> {
    type Item = Vec<&'a T>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.exhausted {
            return None;
        }

        let pool = self.pool;
        let subset = self.indices.iter().map(|&i| &pool[i]).collect();
        self.advance();
        Some(subset)
    }
}

/// Number of `k`-subsets of `m` items, saturating at `u128::MAX`.
pub fn binomial(m: usize, k: usize) -> u128 {
    if k > m {
        return 0;
    }
    let k = k.min(m - k);
    let mut result: u128 = 1;
    for i in 0..k {
        // exact at every step: result * (m - i) is divisible by (i + 1)
        result = match result.checked_mul((m - i) as u128) {
            Some(product) => product / (i as u128 + 1),
            None => return u128::MAX,
        };
    }
    result
}
