//! Unsigned magnitudes stored as little-endian sequences of machine words.
//!
//! A [`Limbs`] never carries most-significant zero words, so zero is the empty
//! sequence and the bit length can be read off the top word.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Deref, Index};

mod arith;
mod div;

pub(crate) use arith::*;
pub(crate) use div::*;

pub const DIGIT_BIT: usize = 64;
pub const DIGIT_MASK: u64 = u64::MAX;
pub const DIGIT_BIT_SHIFT_COUNT: u32 = 6;

pub type Digit = u64;
pub type Digit2X = u128;

pub(crate) const BASE: Digit2X = Digit::MAX as Digit2X + 1;

pub(crate) const fn loword(x: Digit2X) -> Digit {
    (x & DIGIT_MASK as Digit2X) as Digit
}

pub(crate) const fn hiword(x: Digit2X) -> Digit {
    (x >> DIGIT_BIT) as Digit
}

pub(crate) const fn joinwords(loword: Digit, hiword: Digit) -> Digit2X {
    ((hiword as Digit2X) << DIGIT_BIT) | (loword as Digit2X)
}

/// Removes most-significant zero words.
pub(crate) fn trim(words: &mut Vec<Digit>) {
    while let Some(&0) = words.last() {
        words.pop();
    }
}

/// Normalized slice view: drops most-significant zero words.
pub(crate) fn trimmed(mut words: &[Digit]) -> &[Digit] {
    while let [rest @ .., 0] = words {
        words = rest;
    }
    words
}

#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct Limbs {
    words: Vec<Digit>,
}

impl Limbs {
    pub const fn new() -> Self {
        Limbs { words: Vec::new() }
    }

    /// Takes ownership of `words` and normalizes them.
    pub fn from_vec(mut words: Vec<Digit>) -> Self {
        trim(&mut words);
        Limbs { words }
    }

    pub fn from_slice(words: &[Digit]) -> Self {
        Limbs {
            words: trimmed(words).to_vec(),
        }
    }

    pub fn from_u64(value: u64) -> Self {
        Self::from_vec(vec![value])
    }

    pub fn from_u128(value: u128) -> Self {
        Self::from_vec(vec![loword(value), hiword(value)])
    }

    pub fn words(&self) -> &[Digit] {
        &self.words
    }

    pub fn into_vec(self) -> Vec<Digit> {
        self.words
    }

    /// Mutable access to the raw words. The caller is responsible for calling
    /// [`Limbs::normalize`] afterwards.
    pub(crate) fn words_mut(&mut self) -> &mut Vec<Digit> {
        &mut self.words
    }

    pub fn normalize(&mut self) {
        trim(&mut self.words);
    }

    pub fn is_zero(&self) -> bool {
        self.words.is_empty()
    }

    pub fn is_one(&self) -> bool {
        self.words == [1]
    }

    pub fn is_odd(&self) -> bool {
        self.words.first().is_some_and(|w| w & 1 != 0)
    }

    /// Releases the buffer, leaving zero behind.
    pub fn clear(&mut self) {
        self.words = Vec::new();
    }

    /// Number of significant bits; zero has bit length 0.
    pub fn bit_len(&self) -> usize {
        match self.words.last() {
            None => 0,
            Some(top) => self.words.len() * DIGIT_BIT - top.leading_zeros() as usize,
        }
    }

    /// Index of the lowest set bit, `None` for zero.
    pub fn trailing_zeros(&self) -> Option<usize> {
        let (index, word) = self.words.iter().enumerate().find(|(_, w)| **w != 0)?;
        Some(index * DIGIT_BIT + word.trailing_zeros() as usize)
    }

    pub fn bit(&self, n: usize) -> bool {
        let nword = n / DIGIT_BIT;
        let nbit = n % DIGIT_BIT;
        self.words.get(nword).is_some_and(|w| w & (1 << nbit) != 0)
    }

    pub fn count_ones(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    pub fn to_u64(&self) -> Option<u64> {
        match self.words.as_slice() {
            [] => Some(0),
            [w] => Some(*w),
            _ => None,
        }
    }

    pub fn to_u128(&self) -> Option<u128> {
        match self.words.as_slice() {
            [] => Some(0),
            [w] => Some(*w as u128),
            [lo, hi] => Some(joinwords(*lo, *hi)),
            _ => None,
        }
    }

    /// The low 64 bits of the magnitude.
    pub fn low_u64(&self) -> u64 {
        self.words.first().copied().unwrap_or(0)
    }

    /// Interprets `bytes` as a big-endian unsigned integer.
    pub fn from_bytes_be(bytes: &[u8]) -> Self {
        let chunk_size = std::mem::size_of::<Digit>();
        let mut words = Vec::with_capacity(bytes.len().div_ceil(chunk_size));

        for chunk in bytes.rchunks(chunk_size) {
            let mut temp_chunk = [0u8; 8];
            let offset = chunk_size - chunk.len();
            temp_chunk[offset..].copy_from_slice(chunk);
            words.push(Digit::from_be_bytes(temp_chunk));
        }

        Self::from_vec(words)
    }

    /// Minimal big-endian encoding. Zero encodes as an empty vector.
    pub fn to_bytes_be(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.words.len() * 8);
        for &word in self.words.iter().rev() {
            bytes.extend_from_slice(&word.to_be_bytes());
        }
        let first_non_zero = bytes.iter().position(|&b| b != 0).unwrap_or(bytes.len());
        bytes.drain(..first_non_zero);
        bytes
    }

    /// The magnitude as an `f64`, rounding through each word.
    pub fn to_f64(&self) -> f64 {
        let mut result = 0.0;
        for &word in self.words.iter().rev() {
            result = result * BASE as f64 + word as f64;
        }
        result
    }

    pub fn add(&self, rhs: &Limbs) -> Limbs {
        Limbs::from_vec(add(&self.words, &rhs.words))
    }

    /// `self - rhs`; requires `self >= rhs`.
    pub fn sub(&self, rhs: &Limbs) -> Limbs {
        Limbs::from_vec(sub(&self.words, &rhs.words))
    }

    pub fn mul(&self, rhs: &Limbs) -> Limbs {
        Limbs::from_vec(mul(&self.words, &rhs.words))
    }

    pub fn add_digit(&self, digit: Digit) -> Limbs {
        Limbs::from_vec(add(&self.words, &[digit]))
    }

    pub fn mul_digit(&self, digit: Digit) -> Limbs {
        let mut words = self.words.clone();
        mul_digit_add_in_place(&mut words, digit, 0);
        Limbs::from_vec(words)
    }

    /// Quotient and remainder; panics if `rhs` is zero.
    pub fn div_rem(&self, rhs: &Limbs) -> (Limbs, Limbs) {
        let (q, r) = div_rem(&self.words, &rhs.words);
        (Limbs::from_vec(q), Limbs::from_vec(r))
    }

    /// Quotient and remainder by a single word; panics if `digit` is zero.
    pub fn div_rem_digit(&self, digit: Digit) -> (Limbs, Digit) {
        let (q, r) = div_rem_digit(&self.words, digit);
        (Limbs::from_vec(q), r)
    }

    pub fn shl(&self, bits: usize) -> Limbs {
        Limbs::from_vec(shl(&self.words, bits))
    }

    pub fn shr(&self, bits: usize) -> Limbs {
        Limbs::from_vec(shr(&self.words, bits))
    }

    /// Floor square root.
    pub fn sqrt(&self) -> Limbs {
        Limbs::from_vec(isqrt(&self.words))
    }

    /// Keeps only the lowest `bits` bits.
    pub fn low_bits(&self, bits: usize) -> Limbs {
        let nwords = bits.div_ceil(DIGIT_BIT);
        if nwords >= self.words.len() {
            return self.clone();
        }
        let mut words = self.words[..nwords].to_vec();
        let rem = bits % DIGIT_BIT;
        if rem != 0 {
            if let Some(top) = words.last_mut() {
                *top &= (1 << rem) - 1;
            }
        }
        Limbs::from_vec(words)
    }
}

impl From<Vec<Digit>> for Limbs {
    fn from(words: Vec<Digit>) -> Self {
        Limbs::from_vec(words)
    }
}

impl Deref for Limbs {
    type Target = [Digit];

    fn deref(&self) -> &Self::Target {
        &self.words
    }
}

impl Index<usize> for Limbs {
    type Output = Digit;

    fn index(&self, index: usize) -> &Self::Output {
        &self.words[index]
    }
}

impl PartialOrd for Limbs {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Limbs {
    fn cmp(&self, other: &Self) -> Ordering {
        compare_digits(&self.words, &other.words)
    }
}

impl fmt::Debug for Limbs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Limbs(")?;
        for (i, w) in self.words.iter().rev().enumerate() {
            if i > 0 {
                write!(f, "_")?;
            }
            write!(f, "{:016x}", w)?;
        }
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_has_no_words() {
        let zero = Limbs::from_vec(vec![0, 0, 0]);
        assert!(zero.is_zero());
        assert_eq!(zero.len(), 0);
        assert_eq!(zero.bit_len(), 0);
        assert_eq!(zero.trailing_zeros(), None);
        assert_eq!(zero.to_bytes_be(), Vec::<u8>::new());
    }

    #[test]
    fn bit_len_spans_words() {
        assert_eq!(Limbs::from_u64(1).bit_len(), 1);
        assert_eq!(Limbs::from_u64(u64::MAX).bit_len(), 64);
        assert_eq!(Limbs::from_vec(vec![0, 1]).bit_len(), 65);
        assert_eq!(Limbs::from_vec(vec![0, 0, 1 << 63]).bit_len(), 192);
        assert_eq!(Limbs::from_vec(vec![0, 8]).trailing_zeros(), Some(67));
    }

    #[test]
    fn bytes_roundtrip() {
        assert!(Limbs::from_bytes_be(&[]).is_zero());
        assert!(Limbs::from_bytes_be(&[0, 0, 0]).is_zero());

        let bytes = [0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0a];
        let limbs = Limbs::from_bytes_be(&bytes);
        assert_eq!(limbs.words(), &[0x030405060708090a, 0x0102]);
        assert_eq!(limbs.to_bytes_be(), bytes.to_vec());

        let padded = Limbs::from_bytes_be(&[0, 0, 0xff]);
        assert_eq!(padded.to_bytes_be(), vec![0xff]);
    }

    #[test]
    fn low_bits_masks_top_word() {
        let x = Limbs::from_vec(vec![u64::MAX, u64::MAX]);
        assert_eq!(x.low_bits(4).words(), &[0xf]);
        assert_eq!(x.low_bits(68).words(), &[u64::MAX, 0xf]);
        assert_eq!(x.low_bits(200), x);
        assert!(x.low_bits(0).is_zero());
    }
}
