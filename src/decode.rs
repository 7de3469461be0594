use num_traits::Zero;

use crate::bigint::BigInt;
use crate::constants::{MAX_BASE, MIN_BASE};
use crate::error::Error;

/// Maps a digit character to its value: `0-9` to 0-9, `a-z` and `A-Z` to
/// 10-35. Returns `None` for anything else.
pub fn digit_value(c: char) -> Option<u32> {
    c.to_digit(MAX_BASE)
}

/// Fails with [`Error::InvalidBase`] unless `base` is within `2..=36`.
pub fn check_base(base: u32) -> Result<(), Error> {
    if (MIN_BASE..=MAX_BASE).contains(&base) {
        Ok(())
    } else {
        Err(Error::InvalidBase(base))
    }
}

/// Checks every character of `digits` against `base` without decoding.
pub(crate) fn check_digits(digits: &str, base: u32) -> Result<(), Error> {
    check_base(base)?;
    if digits.is_empty() {
        return Err(invalid_digit(digits, 0, base));
    }
    for (position, c) in digits.chars().enumerate() {
        match digit_value(c) {
            Some(value) if value < base => {}
            _ => return Err(invalid_digit(digits, position, base)),
        }
    }
    Ok(())
}

/// Decodes a base-`base` digit string into a non-negative [`BigInt`].
///
/// Evaluation is Horner's rule from the most significant digit:
/// `acc = acc * base + digit`.
///
/// # Errors
///
/// * [`Error::InvalidBase`] if `base` is outside `2..=36`.
/// * [`Error::InvalidDigit`] if `digits` is empty, or a character is outside
///   `0-9a-zA-Z`, or a digit value is not below `base`.
///
/// # Examples
///
/// ```rust
/// use shard_recover::decode::decode;
///
/// assert_eq!(decode("111", 2).unwrap().to_string(), "7");
/// assert_eq!(decode("fF", 16).unwrap().to_string(), "255");
/// assert!(decode("12", 2).is_err());
/// ```
pub fn decode(digits: &str, base: u32) -> Result<BigInt, Error> {
    check_base(base)?;
    if digits.is_empty() {
        return Err(invalid_digit(digits, 0, base));
    }

    let radix = BigInt::from(base);
    let mut acc = BigInt::zero();
    for (position, c) in digits.chars().enumerate() {
        let value = match digit_value(c) {
            Some(value) if value < base => value,
            _ => return Err(invalid_digit(digits, position, base)),
        };
        acc = acc * &radix + BigInt::from(value);
    }

    Ok(acc)
}

/// Decodes a share value; argument order follows the share record
/// (`base` first, then `value`).
pub fn decode_share(base: u32, digits: &str) -> Result<BigInt, Error> {
    decode(digits, base)
}

/// Renders `value` in `base` with lowercase digits, the inverse of [`decode`]
/// for non-negative values. Negative values carry a leading `-`, which
/// [`decode`] rejects.
pub fn encode(value: &BigInt, base: u32) -> Result<String, Error> {
    check_base(base)?;
    Ok(value.to_str_radix(base))
}

fn invalid_digit(digits: &str, position: usize, base: u32) -> Error {
    Error::InvalidDigit {
        digits: digits.to_string(),
        position,
        base,
    }
}
