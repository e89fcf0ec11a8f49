//! Radix tables and magnitude <-> digit conversion shared by all number types.

use std::borrow::Cow;

use crate::error::{NumError, ParseErrorKind, Result};
use crate::limbs::{self, Digit, Digit2X, Limbs, BASE};

pub const MIN_RADIX: u32 = 2;
pub const MAX_RADIX: u32 = 36;

const DIGIT_SPACE: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
const DIGIT_SPACE_UPPER: &[u8; 36] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ";

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Base {
    radix: u32,
    /// Digits that fit in one limb: the largest `k` with `radix^k < 2^64`.
    chunk_digits: u32,
    /// `radix^chunk_digits`.
    chunk_base: Digit,
}

impl Base {
    pub const BIN: Base = Base::new_unchecked(2);
    pub const OCT: Base = Base::new_unchecked(8);
    pub const DEC: Base = Base::new_unchecked(10);
    pub const HEX: Base = Base::new_unchecked(16);

    const fn new_unchecked(radix: u32) -> Base {
        let mut chunk_digits = 0;
        let mut chunk_base: Digit2X = 1;
        while chunk_base * (radix as Digit2X) < BASE {
            chunk_base *= radix as Digit2X;
            chunk_digits += 1;
        }
        Base {
            radix,
            chunk_digits,
            chunk_base: chunk_base as Digit,
        }
    }

    /// Returns the base for `radix`, which must lie in `[2, 36]`.
    pub fn of(radix: u32) -> Option<Base> {
        match radix {
            2 => Some(Base::BIN),
            8 => Some(Base::OCT),
            10 => Some(Base::DEC),
            16 => Some(Base::HEX),
            MIN_RADIX..=MAX_RADIX => Some(Base::new_unchecked(radix)),
            _ => None,
        }
    }

    /// Like [`Base::of`], reporting a parse error for `input` on a bad radix.
    pub(crate) fn for_parse(radix: u32, input: &str) -> Result<Base> {
        Base::of(radix).ok_or_else(|| NumError::parse(input, ParseErrorKind::InvalidRadix(radix)))
    }

    pub(crate) fn for_format(radix: u32) -> Result<Base> {
        Base::of(radix).ok_or_else(|| NumError::invalid(format!("radix {radix} not in [2, 36]")))
    }

    pub fn radix(&self) -> u32 {
        self.radix
    }

    /// Case-insensitive digit value of `c`, if it is a digit in this base.
    pub fn char_to_digit(&self, c: char) -> Option<u8> {
        let value = c.to_digit(36)?;
        (value < self.radix).then_some(value as u8)
    }

    pub fn digit_to_char(&self, digit: u8, uppercase: bool) -> char {
        let space = if uppercase { DIGIT_SPACE_UPPER } else { DIGIT_SPACE };
        space[digit as usize] as char
    }

    /// Converts digit values, most significant first, into a magnitude.
    pub fn digits_to_limbs(&self, digits: &[u8]) -> Limbs {
        let mut words: Vec<Digit> = Vec::with_capacity(digits.len() / self.chunk_digits as usize + 1);

        let head = digits.len() % self.chunk_digits as usize;
        let (first, rest) = digits.split_at(head);
        if !first.is_empty() {
            let (chunk, scale) = self.fold_chunk(first);
            limbs::mul_digit_add_in_place(&mut words, scale, chunk);
        }
        for group in rest.chunks(self.chunk_digits as usize) {
            let (chunk, scale) = self.fold_chunk(group);
            limbs::mul_digit_add_in_place(&mut words, scale, chunk);
        }

        Limbs::from_vec(words)
    }

    fn fold_chunk(&self, digits: &[u8]) -> (Digit, Digit) {
        let mut value: Digit = 0;
        let mut scale: Digit = 1;
        for &d in digits {
            value = value * self.radix as Digit + d as Digit;
            scale *= self.radix as Digit;
        }
        (value, scale)
    }

    /// Digit values of `mag`, most significant first. Zero yields `[0]`.
    pub fn limbs_to_digits(&self, mag: &Limbs) -> Vec<u8> {
        if mag.is_zero() {
            return vec![0];
        }

        let mut digits = Vec::with_capacity(mag.bit_len() / 2 + 1);
        let mut temp = mag.words().to_vec();

        while !temp.is_empty() {
            let (q, mut rem) = limbs::div_rem_digit(&temp, self.chunk_base);
            temp = q;
            // Every chunk but the most significant one is zero padded.
            let count = if temp.is_empty() {
                0
            } else {
                self.chunk_digits
            };
            let mut produced = 0;
            while rem > 0 || produced < count {
                digits.push((rem % self.radix as Digit) as u8);
                rem /= self.radix as Digit;
                produced += 1;
            }
        }

        digits.reverse();
        digits
    }
}

pub struct NumberToStringOptions<'a> {
    pub base: Base,
    pub uppercase: bool,
    pub group_sep: Option<Cow<'a, str>>,
    pub group_size: usize,
    pub force_sign: bool,
    pub plus_sign: Cow<'a, str>,
    pub minus_sign: Cow<'a, str>,
}

impl Default for NumberToStringOptions<'_> {
    fn default() -> Self {
        Self {
            base: Base::DEC,
            uppercase: false,
            group_sep: None,
            group_size: 3,
            force_sign: false,
            plus_sign: Cow::Borrowed("+"),
            minus_sign: Cow::Borrowed("-"),
        }
    }
}

impl NumberToStringOptions<'_> {
    /// Renders a signed magnitude with these options.
    pub fn render(&self, negative: bool, mag: &Limbs) -> String {
        let digits = self.base.limbs_to_digits(mag);

        let mut res = String::with_capacity(digits.len() + 2);
        if negative && !mag.is_zero() {
            res.push_str(&self.minus_sign);
        } else if self.force_sign {
            res.push_str(&self.plus_sign);
        }

        let total = digits.len();
        for (i, &digit) in digits.iter().enumerate() {
            if i > 0 && self.group_size > 0 && (total - i) % self.group_size == 0 {
                if let Some(sep) = &self.group_sep {
                    res.push_str(sep);
                }
            }
            res.push(self.base.digit_to_char(digit, self.uppercase));
        }

        res
    }
}

/// Splits an optional leading sign off `text`.
pub(crate) fn split_sign(text: &str) -> (bool, &str) {
    if let Some(rest) = text.strip_prefix('-') {
        (true, rest)
    } else if let Some(rest) = text.strip_prefix('+') {
        (false, rest)
    } else {
        (false, text)
    }
}

/// Largest exponent magnitude accepted after an exponent marker.
pub const MAX_EXPONENT: i64 = 1 << 20;

/// Parses the signed decimal exponent that follows an exponent marker.
pub(crate) fn parse_exponent(exp: &str, input: &str) -> Result<i64> {
    let invalid = || NumError::parse(input, ParseErrorKind::InvalidExponent);
    let digits = exp.strip_prefix(&['+', '-'][..]).unwrap_or(exp);
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid());
    }
    match exp.parse::<i64>() {
        Ok(value) if value.unsigned_abs() <= MAX_EXPONENT as u64 => Ok(value),
        _ => Err(invalid()),
    }
}

/// Parses an unsigned digit string (no sign, no prefix) in `base`.
/// `input` is the full original text, used for error reporting.
pub(crate) fn parse_digits(digits: &str, base: Base, input: &str) -> Result<Limbs> {
    if digits.is_empty() {
        return Err(NumError::parse(input, ParseErrorKind::Empty));
    }

    let mut values = Vec::with_capacity(digits.len());
    for c in digits.chars() {
        match base.char_to_digit(c) {
            Some(d) => values.push(d),
            None => {
                return Err(NumError::parse(
                    input,
                    ParseErrorKind::InvalidDigit(c, base.radix()),
                ))
            }
        }
    }

    Ok(base.digits_to_limbs(&values))
}
