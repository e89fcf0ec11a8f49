use std::fmt;
use std::str::FromStr;

use super::BigInt;
use crate::base::{self, Base, NumberToStringOptions};
use crate::error::{NumError, ParseErrorKind, Result};

/// Resolves base 0 from the literal's prefix. Returns the base, the digits
/// after the prefix and whether an `0x`/`0b` prefix was consumed.
fn sniff_base(digits: &str) -> (u32, &str, bool) {
    if let Some(rest) = digits.strip_prefix("0x").or_else(|| digits.strip_prefix("0X")) {
        (16, rest, true)
    } else if let Some(rest) = digits.strip_prefix("0b").or_else(|| digits.strip_prefix("0B")) {
        (2, rest, true)
    } else if digits.len() > 1 && digits.starts_with('0') {
        (8, &digits[1..], false)
    } else {
        (10, digits, false)
    }
}

impl BigInt {
    /// Parses `text` in `base`.
    ///
    /// Base 0 picks the base from the prefix: `0x`/`0X` for 16, `0b`/`0B`
    /// for 2, a leading `0` for 8, and 10 otherwise. An optional `+` or `-`
    /// comes first. Letters are accepted in either case.
    pub fn parse(text: &str, base: u32) -> Result<BigInt> {
        let (negative, body) = base::split_sign(text);
        if body.is_empty() {
            return Err(NumError::parse(text, ParseErrorKind::Empty));
        }

        let (radix, digits) = if base == 0 {
            let (radix, digits, has_prefix) = sniff_base(body);
            if has_prefix && digits.is_empty() {
                return Err(NumError::parse(text, ParseErrorKind::MissingDigits));
            }
            (radix, digits)
        } else {
            (base, body)
        };

        let base = Base::for_parse(radix, text)?;
        let mag = base::parse_digits(digits, base, text)?;
        Ok(BigInt::from_limbs(negative, mag))
    }

    /// Parses into `self`. On failure `self` keeps a valid but unspecified value.
    pub fn set_str(&mut self, text: &str, base: u32) -> Result<&mut Self> {
        let value = BigInt::parse(text, base)?;
        Ok(self.assign(value))
    }

    /// Digits in `radix` with a leading `-` for negative values and no prefix.
    pub fn to_str_radix(&self, radix: u32) -> Result<String> {
        let options = NumberToStringOptions {
            base: Base::for_format(radix)?,
            ..Default::default()
        };
        Ok(self.to_string_with_options(&options))
    }

    pub fn to_string_with_options(&self, options: &NumberToStringOptions<'_>) -> String {
        options.render(self.is_negative(), &self.mag)
    }

    fn fmt_radix(&self, f: &mut fmt::Formatter<'_>, base: Base, uppercase: bool, prefix: &str) -> fmt::Result {
        let options = NumberToStringOptions {
            base,
            uppercase,
            ..Default::default()
        };
        let digits = options.render(false, &self.mag);
        f.pad_integral(!self.is_negative(), prefix, &digits)
    }
}

impl FromStr for BigInt {
    type Err = NumError;

    fn from_str(s: &str) -> Result<Self> {
        BigInt::parse(s, 0)
    }
}

impl fmt::Display for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_radix(f, Base::DEC, false, "")
    }
}

impl fmt::Binary for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_radix(f, Base::BIN, false, "0b")
    }
}

impl fmt::Octal for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_radix(f, Base::OCT, false, "0o")
    }
}

impl fmt::LowerHex for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_radix(f, Base::HEX, false, "0x")
    }
}

impl fmt::UpperHex for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.fmt_radix(f, Base::HEX, true, "0x")
    }
}
