//! Text conversion for [`BigFloat`].

use std::fmt;
use std::str::FromStr;

use super::{quotient_bits, BigFloat};
use crate::base::{self, Base};
use crate::error::{NumError, ParseErrorKind, Result};
use crate::int::BigInt;
use crate::limbs::Limbs;

/// Enough digits in `radix` to show every bit of a `prec`-bit mantissa.
fn default_digits(prec: usize, radix: u32) -> usize {
    2 + (prec as f64 / (radix as f64).log2()).ceil() as usize
}

fn power(radix: u32, exp: u64) -> Limbs {
    BigInt::from_u64(radix as u64).pow(exp).into_parts().1
}

/// The exponent marker written on output. Above base 10 `e` is a digit.
fn exponent_marker(radix: u32) -> char {
    if radix <= 10 {
        'e'
    } else {
        '@'
    }
}

fn parse_with_prec(text: &str, radix: u32, prec: usize) -> Result<BigFloat> {
    let base = Base::for_parse(radix, text)?;
    let (negative, body) = base::split_sign(text);

    let is_marker = |c: char| c == '@' || (radix <= 10 && (c == 'e' || c == 'E'));
    let (mantissa, exp) = match body.find(is_marker) {
        Some(pos) => (&body[..pos], base::parse_exponent(&body[pos + 1..], text)?),
        None => (body, 0),
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

    let mag = base::parse_digits(&format!("{int_part}{frac_part}"), base, text)?;
    let scale = exp
        .checked_sub(frac_part.len() as i64)
        .ok_or_else(|| NumError::parse(text, ParseErrorKind::InvalidExponent))?;

    let scaled = power(radix, scale.unsigned_abs());
    if scale >= 0 {
        Ok(BigFloat::from_parts(negative, mag.mul(&scaled), 0, prec))
    } else {
        let num = BigInt::from_limbs(negative, mag);
        let den = BigInt::from_limbs(false, scaled);
        let (negative, mant, exp) = quotient_bits(&num, &den, prec);
        Ok(BigFloat::from_parts(negative, mant, exp, prec))
    }
}

impl BigFloat {
    /// Parses `[sign]digits[.digits][marker[sign]exponent]` in `base` at the
    /// default precision. The marker is `@` in any base, or `e`/`E` up to
    /// base 10; the exponent is decimal and scales by a power of `base`.
    pub fn parse(text: &str, base: u32) -> Result<BigFloat> {
        parse_with_prec(text, base, super::resolve_prec(0))
    }

    /// Parses into `self` at its current precision. On failure `self` is
    /// left unchanged.
    pub fn set_str(&mut self, text: &str, base: u32) -> Result<&mut Self> {
        *self = parse_with_prec(text, base, self.prec)?;
        Ok(self)
    }

    /// The first `n` significant digits of `|self|` in `base` and the
    /// position of the radix point counted from the first digit. Digits are
    /// rounded to nearest, or away from zero when `away` is set.
    fn significant_digits(&self, base: Base, n: usize, away: bool) -> (Vec<u8>, i64) {
        let radix = base.radix();
        let (num, den) = if self.exp >= 0 {
            (self.mant.shl(self.exp as usize), Limbs::from_u64(1))
        } else {
            (
                self.mant.clone(),
                Limbs::from_u64(1).shl(self.exp.unsigned_abs() as usize),
            )
        };

        let lower = power(radix, n as u64 - 1);
        let upper = lower.mul_digit(radix as u64);
        let mut point = ((self.top() - 1) as f64 / (radix as f64).log2()).floor() as i64 + 1;
        loop {
            let shift = n as i64 - point;
            let scale = power(radix, shift.unsigned_abs());
            let (num, den) = if shift >= 0 {
                (num.mul(&scale), den.clone())
            } else {
                (num.clone(), den.mul(&scale))
            };
            let rounded = if away {
                let (q, r) = num.div_rem(&den);
                if r.is_zero() {
                    q
                } else {
                    q.add_digit(1)
                }
            } else {
                num.shl(1).add(&den).div_rem(&den.shl(1)).0
            };

            if rounded >= upper {
                point += 1;
            } else if rounded < lower {
                point -= 1;
            } else {
                let mut digits = base.limbs_to_digits(&rounded);
                while digits.len() > 1 && digits.last() == Some(&0) {
                    digits.pop();
                }
                return (digits, point);
            }
        }
    }

    fn format_digits(&self, base: Base, n: usize) -> String {
        if self.is_zero() {
            return "0".to_owned();
        }

        // With the default digit count the text must parse back to `self`.
        // Parsing truncates, so those digits round up in magnitude.
        let radix = base.radix();
        let (n, away) = if n == 0 {
            (default_digits(self.prec, radix), true)
        } else {
            (n, false)
        };
        let (digits, point) = self.significant_digits(base, n, away);
        let text: String = digits.iter().map(|&d| base.digit_to_char(d, false)).collect();
        let sign = if self.is_negative() { "-" } else { "" };
        let len = text.len() as i64;

        if point == len {
            format!("{sign}{text}")
        } else if 0 < point && point < len {
            let (int, frac) = text.split_at(point as usize);
            format!("{sign}{int}.{frac}")
        } else {
            format!("{sign}{text}{}{}", exponent_marker(radix), point - len)
        }
    }

    /// `n` significant digits in `base`, rounded to nearest. `0` picks enough
    /// digits for the text to parse back to the same value at this
    /// precision. Trailing zeros are dropped.
    pub fn to_string_radix(&self, base: u32, n: usize) -> Result<String> {
        Ok(self.format_digits(Base::for_format(base)?, n))
    }
}

impl FromStr for BigFloat {
    type Err = NumError;

    fn from_str(s: &str) -> Result<Self> {
        BigFloat::parse(s, 10)
    }
}

impl fmt::Display for BigFloat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.format_digits(Base::DEC, 0))
    }
}
