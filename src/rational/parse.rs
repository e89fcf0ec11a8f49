use std::fmt;
use std::str::FromStr;

use super::BigRational;
use crate::base::{self, Base};
use crate::error::{NumError, ParseErrorKind, Result};
use crate::int::BigInt;

fn pow10(exp: u64) -> BigInt {
    BigInt::from_u64(10).pow(exp)
}

/// Parses `[sign]digits[.digits][(e|E)[sign]digits]` as an exact fraction.
fn parse_decimal(text: &str) -> Result<BigRational> {
    let (negative, body) = base::split_sign(text);

    let (mantissa, exponent) = match body.find(&['e', 'E'][..]) {
        Some(pos) => (&body[..pos], Some(&body[pos + 1..])),
        None => (body, None),
    };

    let exp10 = match exponent {
        None => 0,
        Some(exp) => base::parse_exponent(exp, text)?,
    };

    let (int_part, frac_part) = match mantissa.split_once('.') {
        Some((_, frac)) if frac.contains('.') => {
            return Err(NumError::parse(text, ParseErrorKind::InvalidFormat));
        }
        Some((int, frac)) => (int, frac),
        None => (mantissa, ""),
    };
    if int_part.is_empty() && frac_part.is_empty() {
        return Err(NumError::parse(text, ParseErrorKind::Empty));
    }

    let digits = format!("{int_part}{frac_part}");
    let mag = base::parse_digits(&digits, Base::DEC, text)?;
    let scale = exp10
        .checked_sub(frac_part.len() as i64)
        .ok_or_else(|| NumError::parse(text, ParseErrorKind::InvalidExponent))?;

    let num = BigInt::from_limbs(negative, mag);
    if scale >= 0 {
        Ok(BigRational::from_int(&(num * pow10(scale as u64))))
    } else {
        BigRational::from_frac(num, pow10(scale.unsigned_abs()))
    }
}

impl BigRational {
    /// Parses a fraction `"a/b"` or a decimal number with an optional
    /// fraction and exponent, such as `"-0.1"`, `".25"` or `"8129567.7690E14"`.
    pub fn parse(text: &str) -> Result<BigRational> {
        match text.split_once('/') {
            Some(_) => Self::parse_radix(text, 10),
            None => parse_decimal(text),
        }
    }

    /// Parses `"a/b"` or `"a"` with both parts written in `base`.
    pub fn parse_radix(text: &str, base: u32) -> Result<BigRational> {
        Base::for_parse(base, text)?;

        match text.split_once('/') {
            Some((num, den)) => {
                if den.contains('/') {
                    return Err(NumError::parse(text, ParseErrorKind::InvalidFormat));
                }
                let num = BigInt::parse(num, base)?;
                let den = BigInt::parse(den, base)?;
                BigRational::from_frac(num, den)
            }
            None => Ok(BigRational::from_int(&BigInt::parse(text, base)?)),
        }
    }

    /// Parses into `self`. On failure `self` is left unchanged.
    pub fn set_str(&mut self, text: &str) -> Result<&mut Self> {
        let q = Self::parse(text)?;
        Ok(self.assign(q))
    }

    /// `"a"` for integers, `"a/b"` otherwise.
    pub fn rat_string(&self) -> String {
        if self.is_int() {
            self.num.to_string()
        } else {
            self.to_string()
        }
    }

    /// Compact form in `radix`: `"a"` for integers, `"a/b"` otherwise.
    pub fn to_str_radix(&self, radix: u32) -> Result<String> {
        let num = self.num.to_str_radix(radix)?;
        if self.is_int() {
            return Ok(num);
        }
        Ok(format!("{}/{}", num, self.den.to_str_radix(radix)?))
    }
}

impl FromStr for BigRational {
    type Err = NumError;

    fn from_str(s: &str) -> Result<Self> {
        BigRational::parse(s)
    }
}

/// Always `"a/b"`, even when the denominator is 1.
impl fmt::Display for BigRational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.num, self.den)
    }
}
