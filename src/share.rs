use crate::bigint::BigInt;
use crate::decode::{check_digits, decode};
use crate::error::Error;

/// One encoded share: an identifier `x` and a value written as `digits` in
/// `base`.
///
/// A `Share` is validated when it is built, so every digit is known to be below
/// its base and decoding it cannot fail on content.
///
/// # Examples
///
/// ```rust
/// use shard_recover::share::Share;
///
/// let share = Share::new(2, 2, "111").unwrap();
/// assert_eq!(share.to_point().unwrap().y().to_string(), "7");
/// assert!(Share::new(1, 2, "12").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Share {
    x: u64,
    base: u32,
    digits: String,
}

impl Share {
    pub fn new(x: u64, base: u32, digits: impl Into<String>) -> Result<Self, Error> {
        let digits = digits.into();
        check_digits(&digits, base)?;
        Ok(Share { x, base, digits })
    }

    pub fn x(&self) -> u64 {
        self.x
    }

    pub fn base(&self) -> u32 {
        self.base
    }

    pub fn digits(&self) -> &str {
        &self.digits
    }

    /// Decodes the share value into a [`Point`].
    pub fn to_point(&self) -> Result<Point, Error> {
        Ok(Point::new(self.x, decode(&self.digits, self.base)?))
    }
}

/// A share after decoding: `(x, y)` with a non-negative `y` when built from a
/// [`Share`].
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Point {
    x: u64,
    y: BigInt,
}

impl Point {
    pub fn new(x: u64, y: BigInt) -> Self {
        Point { x, y }
    }

    pub fn x(&self) -> u64 {
        self.x
    }

    pub fn y(&self) -> &BigInt {
        &self.y
    }
}

/// Decodes a list of shares, preserving their order.
pub fn to_points(shares: &[Share]) -> Result<Vec<Point>, Error> {
    shares.iter().map(Share::to_point).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_share_validation() {
        assert!(Share::new(1, 10, "4").is_ok());
        assert_eq!(Share::new(1, 1, "0"), Err(Error::InvalidBase(1)));
        assert!(matches!(
            Share::new(1, 2, "12"),
            Err(Error::InvalidDigit { base: 2, position: 1, .. })
        ));
        assert!(matches!(Share::new(1, 10, ""), Err(Error::InvalidDigit { .. })));
    }

    #[test]
    fn test_points_keep_share_order() {
        let shares = vec![
            Share::new(3, 16, "a").unwrap(),
            Share::new(1, 10, "4").unwrap(),
            Share::new(2, 2, "111").unwrap(),
        ];
        let points = to_points(&shares).unwrap();
        let decoded: Vec<(u64, String)> = points
            .iter()
            .map(|p| (p.x(), p.y().to_string()))
            .collect();
        assert_eq!(
            decoded,
            vec![(3, "10".into()), (1, "4".into()), (2, "7".into())]
        );
    }
}
