//! Fixed-length digit strings.
//!
//! A [`DigitString`] is an immutable sequence of digits in a radix
//! between 2 and 36, stored as its numeric value alongside the radix
//! and the digit count. The count is part of the identity: `"007"` and
//! `"7"` are different digit strings with the same value. Arithmetic
//! never mutates; every operation returns a new value.

use crate::alphabet;
use crate::error::Error;
use crate::result::Result;

use num_bigint::BigUint;
use num_traits::Zero;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DigitString {
    radix: u32,
    len: usize,
    value: BigUint,
}

impl DigitString {
    /// Decode `text` into a digit string.
    ///
    /// Letters are accepted in either case. If `opt_len` is supplied,
    /// the result is left-zero-padded to that many digits; it is an
    /// error for the text to be longer. Without it, the result is
    /// exactly as long as the text.
    pub fn from_text(text: &str, radix: u32, opt_len: Option<usize>) -> Result<Self> {
        alphabet::validate_radix(radix)?;

        let mut digits = Vec::<u8>::with_capacity(text.len());
        for c in text.chars() {
            digits.push(alphabet::ltr(c, radix)?);
        }

        let len = match opt_len {
            None => digits.len(),
            Some(l) => {
                if l < digits.len() {
                    return Err(Error::InvalidBlocksize {
                        blocksize: l,
                        len: digits.len(),
                    });
                }
                l
            }
        };

        // every digit has been checked against the radix already
        let value = if digits.is_empty() {
            BigUint::zero()
        } else {
            BigUint::from_radix_be(&digits, radix).unwrap()
        };

        Ok(DigitString { radix, len, value })
    }

    /// Build a digit string from a nonnegative integer and an explicit
    /// digit count.
    pub fn from_uint<V: Into<BigUint>>(value: V, radix: u32, len: usize) -> Result<Self> {
        alphabet::validate_radix(radix)?;

        let value = value.into();
        if value >= pow(radix, len) {
            return Err(Error::ValueOutOfRange);
        }

        Ok(DigitString { radix, len, value })
    }

    pub fn radix(&self) -> u32 {
        self.radix
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn value(&self) -> &BigUint {
        &self.value
    }

    /// The digit values, most significant first, zero-padded to the
    /// full length.
    pub(crate) fn digits(&self) -> Vec<u8> {
        // the bignum library doesn't provide left padding, but it does
        // support little endian output which allows us to do
        // right-padding and then reverse the digits
        let mut d = self.value.to_radix_le(self.radix);
        d.resize(self.len, 0);
        d.reverse();
        d
    }

    /// Canonical text: lowercase, left-zero-padded to the full length.
    pub fn to_text(&self) -> String {
        self.digits().into_iter().map(alphabet::pos).collect()
    }

    /// Big-endian bytes of the numeric value.
    ///
    /// Without `opt_len` the width is `ceil(ceil(len*log2(radix))/8)`,
    /// enough for any value of this length and radix. An explicit
    /// width left-zero-pads to exactly that many bytes and fails if
    /// the value needs more.
    pub fn to_bytes(&self, opt_len: Option<usize>) -> Result<Vec<u8>> {
        let need = if self.value.is_zero() {
            0
        } else {
            (self.value.bits() as usize + 7) / 8
        };

        let want = match opt_len {
            None => bytes_per(self.radix, self.len),
            Some(n) => {
                if n < need {
                    return Err(Error::InvalidByteLength { need, have: n });
                }
                n
            }
        };

        // same right-pad-and-reverse trick as digits(); a zero value
        // serializes to [0], which the resize truncates when the
        // requested width is 0
        let mut v = self.value.to_bytes_le();
        v.resize(want, 0);
        v.reverse();
        Ok(v)
    }

    /// `(self + other) mod radix**m`, as an `m`-digit string.
    pub fn add_mod(&self, other: &DigitString, m: usize) -> Result<DigitString> {
        self.check_radix(other)?;

        let mu = pow(self.radix, m);
        let value = (&self.value + &other.value) % &mu;

        Ok(DigitString {
            radix: self.radix,
            len: m,
            value,
        })
    }

    /// `(self - other) mod radix**m`, as an `m`-digit string.
    pub fn sub_mod(&self, other: &DigitString, m: usize) -> Result<DigitString> {
        self.check_radix(other)?;

        // stay in unsigned territory: reduce both sides, then lift the
        // left one above the right before subtracting
        let mu = pow(self.radix, m);
        let value = ((&self.value % &mu) + &mu - (&other.value % &mu)) % &mu;

        Ok(DigitString {
            radix: self.radix,
            len: m,
            value,
        })
    }

    /// Join two digit strings; `lhs` supplies the high-order digits.
    pub fn concat(lhs: &DigitString, rhs: &DigitString) -> Result<DigitString> {
        lhs.check_radix(rhs)?;

        let value = &lhs.value * pow(lhs.radix, rhs.len) + &rhs.value;

        Ok(DigitString {
            radix: lhs.radix,
            len: lhs.len + rhs.len,
            value,
        })
    }

    /// Split after `k` digits, so that [`concat`] of the two parts
    /// rebuilds `self`.
    ///
    /// [`concat`]: DigitString::concat
    pub fn split(&self, k: usize) -> Result<(DigitString, DigitString)> {
        if k > self.len {
            return Err(Error::InvalidArgument("split point past end of digit string"));
        }

        let mu = pow(self.radix, self.len - k);
        let left = &self.value / &mu;
        let right = &self.value % &mu;

        Ok((
            DigitString {
                radix: self.radix,
                len: k,
                value: left,
            },
            DigitString {
                radix: self.radix,
                len: self.len - k,
                value: right,
            },
        ))
    }

    fn check_radix(&self, other: &DigitString) -> Result<()> {
        if self.radix != other.radix {
            return Err(Error::RadixMismatch {
                lhs: self.radix,
                rhs: other.radix,
            });
        }
        Ok(())
    }
}

impl std::fmt::Display for DigitString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_text())
    }
}

/// `radix**n` as a bignum.
pub(crate) fn pow(radix: u32, n: usize) -> BigUint {
    BigUint::from(radix).pow(n as u32)
}

/// `ceil(n * log2(radix))`: the bit width of the largest `n`-digit
/// value. Exact integer arithmetic; a floating-point rendition is off
/// by one for some radix/length pairs.
pub(crate) fn bits_per(radix: u32, n: usize) -> usize {
    if n == 0 {
        return 0;
    }
    (pow(radix, n) - 1u32).bits() as usize
}

/// Bytes needed to hold any `n`-digit value in the radix.
pub(crate) fn bytes_per(radix: u32, n: usize) -> usize {
    (bits_per(radix, n) + 7) / 8
}

#[cfg(test)]
mod tests {
    use super::{bits_per, bytes_per, DigitString};
    use crate::error::Error;
    use crate::result::Result;

    #[test]
    fn text_round_trip_lowercases() -> Result<()> {
        let d = DigitString::from_text("C4XpWu", 36, None)?;
        assert!(d.to_text() == "c4xpwu");
        assert!(d.len() == 6);
        Ok(())
    }

    #[test]
    fn blocksize_pads_on_the_left() -> Result<()> {
        let d = DigitString::from_text("7", 10, Some(3))?;
        assert!(d.to_text() == "007");
        assert!(d == DigitString::from_uint(7u32, 10, 3)?);
        Ok(())
    }

    #[test]
    fn blocksize_shorter_than_text() {
        let res = DigitString::from_text("1234", 10, Some(3));
        assert!(res == Err(Error::InvalidBlocksize { blocksize: 3, len: 4 }));
    }

    #[test]
    fn digit_outside_radix() {
        let res = DigitString::from_text("19a", 10, None);
        assert!(res == Err(Error::InvalidDigit('a')));
    }

    #[test]
    fn uint_out_of_range() {
        let res = DigitString::from_uint(1000u32, 10, 3);
        assert!(res == Err(Error::ValueOutOfRange));
    }

    #[test]
    fn length_is_part_of_identity() -> Result<()> {
        let narrow = DigitString::from_text("7", 10, None)?;
        let wide = DigitString::from_text("07", 10, None)?;
        assert!(narrow != wide);
        assert!(narrow.value() == wide.value());
        Ok(())
    }

    #[test]
    fn split_then_concat_is_identity() -> Result<()> {
        let d = DigitString::from_text("123456", 10, None)?;
        let (l, r) = d.split(2)?;
        assert!(l.to_text() == "12");
        assert!(r.to_text() == "3456");
        assert!(DigitString::concat(&l, &r)? == d);
        Ok(())
    }

    #[test]
    fn split_keeps_leading_zeros() -> Result<()> {
        let d = DigitString::from_text("000102", 10, None)?;
        let (l, r) = d.split(3)?;
        assert!(l.to_text() == "000");
        assert!(r.to_text() == "102");
        Ok(())
    }

    #[test]
    fn split_past_end() -> Result<()> {
        let d = DigitString::from_text("12", 10, None)?;
        assert!(d.split(3).is_err());
        Ok(())
    }

    #[test]
    fn add_and_sub_are_inverses() -> Result<()> {
        let a = DigitString::from_text("95", 10, None)?;
        let b = DigitString::from_text("17", 10, None)?;

        let sum = a.add_mod(&b, 2)?;
        assert!(sum.to_text() == "12");

        let back = sum.sub_mod(&b, 2)?;
        assert!(back == a);
        Ok(())
    }

    #[test]
    fn mixed_radix_arithmetic() -> Result<()> {
        let a = DigitString::from_text("95", 10, None)?;
        let b = DigitString::from_text("17", 16, None)?;
        assert!(a.add_mod(&b, 2) == Err(Error::RadixMismatch { lhs: 10, rhs: 16 }));
        assert!(DigitString::concat(&a, &b).is_err());
        Ok(())
    }

    #[test]
    fn bytes_are_big_endian_and_padded() -> Result<()> {
        let d = DigitString::from_text("0258", 10, None)?;
        assert!(d.to_bytes(None)? == vec![0x01, 0x02]);
        assert!(d.to_bytes(Some(4))? == vec![0, 0, 0x01, 0x02]);
        assert!(d.to_bytes(Some(1)) == Err(Error::InvalidByteLength { need: 2, have: 1 }));
        Ok(())
    }

    #[test]
    fn empty_digit_string() -> Result<()> {
        let d = DigitString::from_text("", 10, None)?;
        assert!(d.is_empty());
        assert!(d.to_text() == "");
        assert!(d.to_bytes(None)? == Vec::<u8>::new());
        Ok(())
    }

    #[test]
    fn exact_bit_widths() {
        // ceil(10 * log2(10)) = 34, a case where f64 math is tempting
        // and wrong to round down
        assert!(bits_per(10, 10) == 34);
        assert!(bits_per(2, 8) == 8);
        assert!(bytes_per(10, 5) == 3);
        assert!(bytes_per(36, 8) == 6);
        assert!(bytes_per(10, 0) == 0);
    }
}
