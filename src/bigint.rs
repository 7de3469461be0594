use core::fmt;
use num_bigint::Sign;
use num_traits::{One, Zero};
use serde::{
    de::{self, Visitor},
    Deserialize, Deserializer, Serialize, Serializer,
};
use std::iter::{Product, Sum};
use std::ops::{Add, Mul, Neg, Sub};
use std::str::FromStr;

use crate::error::Error;

/// Arbitrary-precision signed integer used for share values and candidates.
///
/// The value is always held in canonical form: no redundant leading zeros,
/// a single sign, and an unsigned zero. Equality and hashing are by value, so
/// two `BigInt`s built along different arithmetic paths compare equal whenever
/// they denote the same integer.
///
/// # Examples
///
/// ```rust
/// use shard_recover::bigint::BigInt;
///
/// let a = BigInt::from_decimal_str("123456789012345678901234567890").unwrap();
/// let b = BigInt::from(-10);
/// assert_eq!((&a * &b).to_decimal_string(), "-1234567890123456789012345678900");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct BigInt(num_bigint::BigInt);

impl BigInt {
    /// Parses a decimal string of the form `-?[0-9]+`.
    ///
    /// Leading zeros are accepted and dropped; `"-0"` parses to zero. Anything
    /// else (a `+` sign, whitespace, separators, an empty string) fails with
    /// [`Error::MalformedNumber`].
    pub fn from_decimal_str(s: &str) -> Result<Self, Error> {
        let digits = s.strip_prefix('-').unwrap_or(s);
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::MalformedNumber(s.to_string()));
        }

        num_bigint::BigInt::parse_bytes(s.as_bytes(), 10)
            .map(BigInt)
            .ok_or_else(|| Error::MalformedNumber(s.to_string()))
    }

    /// Renders the canonical decimal form: no leading zeros, a leading `-`
    /// iff negative, `"0"` for zero.
    pub fn to_decimal_string(&self) -> String {
        self.0.to_str_radix(10)
    }

    /// Renders the magnitude as big-endian hex bytes with a `0x` prefix and a
    /// leading `-` for negative values.
    pub fn to_hex_string(&self) -> String {
        let (sign, magnitude) = self.0.to_bytes_be();
        let digits = hex::encode(magnitude);
        match sign {
            Sign::Minus => format!("-0x{digits}"),
            _ => format!("0x{digits}"),
        }
    }

    /// Renders the value in `radix` using lowercase digits.
    ///
    /// Callers validate the radix; see [`crate::decode::encode`].
    pub(crate) fn to_str_radix(&self, radix: u32) -> String {
        self.0.to_str_radix(radix)
    }

    pub fn is_negative(&self) -> bool {
        self.0.sign() == Sign::Minus
    }

    pub(crate) fn as_inner(&self) -> &num_bigint::BigInt {
        &self.0
    }
}

impl From<num_bigint::BigInt> for BigInt {
    fn from(value: num_bigint::BigInt) -> Self {
        BigInt(value)
    }
}

impl From<BigInt> for num_bigint::BigInt {
    fn from(value: BigInt) -> Self {
        value.0
    }
}

macro_rules! impl_from_machine_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for BigInt {
                fn from(value: $t) -> Self {
                    BigInt(num_bigint::BigInt::from(value))
                }
            }
        )*
    };
}

impl_from_machine_int!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

macro_rules! forward_binop {
    ($imp:ident, $method:ident, $op:tt) => {
        impl $imp<BigInt> for BigInt {
            type Output = BigInt;

            fn $method(self, rhs: BigInt) -> BigInt {
                BigInt(self.0 $op rhs.0)
            }
        }

        impl<'a> $imp<&'a BigInt> for BigInt {
            type Output = BigInt;

            fn $method(self, rhs: &'a BigInt) -> BigInt {
                BigInt(self.0 $op &rhs.0)
            }
        }

        impl<'a> $imp<BigInt> for &'a BigInt {
            type Output = BigInt;

            fn $method(self, rhs: BigInt) -> BigInt {
                BigInt(&self.0 $op rhs.0)
            }
        }

        impl<'a, 'b> $imp<&'b BigInt> for &'a BigInt {
            type Output = BigInt;

            fn $method(self, rhs: &'b BigInt) -> BigInt {
                BigInt(&self.0 $op &rhs.0)
            }
        }
    };
}

forward_binop!(Add, add, +);
forward_binop!(Sub, sub, -);
forward_binop!(Mul, mul, *);

impl Neg for BigInt {
    type Output = BigInt;

    fn neg(self) -> BigInt {
        BigInt(-self.0)
    }
}

impl<'a> Neg for &'a BigInt {
    type Output = BigInt;

    fn neg(self) -> BigInt {
        BigInt(-&self.0)
    }
}

impl Zero for BigInt {
    fn zero() -> Self {
        BigInt(num_bigint::BigInt::zero())
    }

    fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl One for BigInt {
    fn one() -> Self {
        BigInt(num_bigint::BigInt::one())
    }
}

impl Sum for BigInt {
    fn sum<I: Iterator<Item = BigInt>>(iter: I) -> Self {
        iter.fold(BigInt::zero(), |acc, value| acc + value)
    }
}

impl<'a> Sum<&'a BigInt> for BigInt {
    fn sum<I: Iterator<Item = &'a BigInt>>(iter: I) -> Self {
        iter.fold(BigInt::zero(), |acc, value| acc + value)
    }
}

impl Product for BigInt {
    fn product<I: Iterator<Item = BigInt>>(iter: I) -> Self {
        iter.fold(BigInt::one(), |acc, value| acc * value)
    }
}

impl FromStr for BigInt {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        BigInt::from_decimal_str(s)
    }
}

impl fmt::Display for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_decimal_string())
    }
}

/// Serializes as the canonical decimal string so values of any width survive
/// JSON without precision loss.
impl Serialize for BigInt {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_decimal_string())
    }
}

/// Deserializes from a decimal string, or from a plain JSON integer.
impl<'de> Deserialize<'de> for BigInt {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct BigIntVisitor;

        impl<'de> Visitor<'de> for BigIntVisitor {
            type Value = BigInt;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a decimal integer or a string of decimal digits")
            }

            fn visit_str<E>(self, value: &str) -> Result<BigInt, E>
            where
                E: de::Error,
            {
                BigInt::from_decimal_str(value).map_err(E::custom)
            }

            fn visit_i64<E>(self, value: i64) -> Result<BigInt, E>
            where
                E: de::Error,
            {
                Ok(BigInt::from(value))
            }

            fn visit_u64<E>(self, value: u64) -> Result<BigInt, E>
            where
                E: de::Error,
            {
                Ok(BigInt::from(value))
            }
        }

        deserializer.deserialize_any(BigIntVisitor)
    }
}
