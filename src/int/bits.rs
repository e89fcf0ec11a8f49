//! Shifts and bitwise logic over the infinite two's-complement view of an
//! integer.

use super::arith::{minus, plus};
use super::BigInt;
use crate::error::{NumError, Result};
use crate::limbs::{self, Digit, Limbs, DIGIT_BIT};

pub(crate) fn shift_left(a: &BigInt, bits: usize) -> BigInt {
    BigInt::from_sign_mag(a.sign, a.mag.shl(bits))
}

/// Arithmetic right shift; negative values round toward negative infinity.
pub(crate) fn shift_right(a: &BigInt, bits: usize) -> BigInt {
    let mag = a.mag.shr(bits);
    if a.is_negative() && limbs::any_low_bits(a.mag.words(), bits) {
        BigInt::from_limbs(true, mag.add_digit(1))
    } else {
        BigInt::from_sign_mag(a.sign, mag)
    }
}

fn is_most_significant_bit_set(words: &[Digit]) -> bool {
    words
        .last()
        .is_some_and(|&word| word & (1 << (DIGIT_BIT - 1)) != 0)
}

/// Two's-complement words of `a`, sign-extended to `size` words.
fn to_2sc(a: &BigInt, size: usize) -> Vec<Digit> {
    let mut words = a.mag.words().to_vec();
    words.resize(size, 0);
    if a.is_negative() {
        let mut carry = true;
        for word in words.iter_mut() {
            if carry {
                (*word, carry) = (!*word).overflowing_add(1);
            } else {
                *word = !*word;
            }
        }
    }
    words
}

fn from_2sc(mut words: Vec<Digit>) -> BigInt {
    if !is_most_significant_bit_set(&words) {
        return BigInt::from_limbs(false, Limbs::from_vec(words));
    }

    let mut carry = true;
    for word in words.iter_mut() {
        if carry {
            (*word, carry) = (!*word).overflowing_add(1);
        } else {
            *word = !*word;
        }
    }
    BigInt::from_limbs(true, Limbs::from_vec(words))
}

/// Words needed so both operands keep a sign bit of their own.
fn twos_complement_size(left: &BigInt, right: &BigInt) -> usize {
    left.mag.len().max(right.mag.len()) + 1
}

fn bitwise(a: &BigInt, b: &BigInt, op: impl Fn(Digit, Digit) -> Digit) -> BigInt {
    let size = twos_complement_size(a, b);
    let lhs = to_2sc(a, size);
    let rhs = to_2sc(b, size);
    from_2sc(lhs.iter().zip(&rhs).map(|(&x, &y)| op(x, y)).collect())
}

pub(crate) fn and(a: &BigInt, b: &BigInt) -> BigInt {
    bitwise(a, b, |x, y| x & y)
}

pub(crate) fn or(a: &BigInt, b: &BigInt) -> BigInt {
    bitwise(a, b, |x, y| x | y)
}

pub(crate) fn xor(a: &BigInt, b: &BigInt) -> BigInt {
    bitwise(a, b, |x, y| x ^ y)
}

/// `!a == -(a + 1)`.
pub(crate) fn not(a: &BigInt) -> BigInt {
    minus(&a.neg_ref(), &BigInt::one())
}

impl BigInt {
    pub fn set_shl(&mut self, a: &BigInt, bits: usize) -> &mut Self {
        self.assign(shift_left(a, bits))
    }

    /// Arithmetic right shift, rounding negative values toward negative infinity.
    pub fn set_shr(&mut self, a: &BigInt, bits: usize) -> &mut Self {
        self.assign(shift_right(a, bits))
    }

    pub fn set_and(&mut self, a: &BigInt, b: &BigInt) -> &mut Self {
        self.assign(and(a, b))
    }

    pub fn set_or(&mut self, a: &BigInt, b: &BigInt) -> &mut Self {
        self.assign(or(a, b))
    }

    pub fn set_xor(&mut self, a: &BigInt, b: &BigInt) -> &mut Self {
        self.assign(xor(a, b))
    }

    pub fn set_not(&mut self, a: &BigInt) -> &mut Self {
        self.assign(not(a))
    }

    /// Bit `i` of the two's-complement representation, as 0 or 1.
    pub fn bit(&self, i: usize) -> u32 {
        if !self.is_negative() {
            return self.mag.bit(i) as u32;
        }

        // In -m, bits below the lowest set bit of m stay clear, that bit stays
        // set, and every bit above it is inverted.
        let Some(low) = self.mag.trailing_zeros() else {
            return 0;
        };
        match i.cmp(&low) {
            std::cmp::Ordering::Less => 0,
            std::cmp::Ordering::Equal => 1,
            std::cmp::Ordering::Greater => !self.mag.bit(i) as u32,
        }
    }

    /// Like [`BigInt::bit`] for an index coming from signed arithmetic.
    pub fn bit_signed(&self, i: i64) -> Result<u32> {
        let i = usize::try_from(i)
            .map_err(|_| NumError::invalid(format!("negative bit index {i}")))?;
        Ok(self.bit(i))
    }

    /// Sets `self` to `a` with bit `i` forced to `b`, which must be 0 or 1.
    pub fn set_bit(&mut self, a: &BigInt, i: usize, b: u32) -> Result<&mut Self> {
        if b > 1 {
            return Err(NumError::invalid(format!("bit value {b} is not 0 or 1")));
        }

        let value = if a.bit(i) == b {
            a.clone()
        } else {
            let step = BigInt::from_limbs(false, Limbs::from_u64(1).shl(i));
            if b == 1 {
                plus(a, &step)
            } else {
                minus(a, &step)
            }
        };
        Ok(self.assign(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn int(s: &str) -> BigInt {
        s.parse().unwrap()
    }

    #[test]
    fn right_shift_rounds_down() {
        let cases = [
            ("-1", 1, "-1"),
            ("-100", 2, "-25"),
            ("-100", 3, "-13"),
            ("-100", 100, "-1"),
            ("100", 3, "12"),
            ("18446744073709551616", 64, "1"),
            ("340282366920938463463374607431768211456", 64, "18446744073709551616"),
            ("0", 5, "0"),
        ];

        let mut z = BigInt::zero();
        for (a, bits, want) in cases {
            z.set_shr(&int(a), bits);
            assert_eq!(z, int(want), "{a} >> {bits}");
        }
    }

    #[test]
    fn left_shift() {
        let cases = [
            ("-87", 1, "-174"),
            ("1", 64, "18446744073709551616"),
            ("1", 128, "340282366920938463463374607431768211456"),
            ("0", 10, "0"),
        ];

        let mut z = BigInt::zero();
        for (a, bits, want) in cases {
            z.set_shl(&int(a), bits);
            assert_eq!(z, int(want), "{a} << {bits}");
        }
    }

    #[test]
    fn twos_complement_logic() {
        let (a, b) = (BigInt::from_i64(-12), BigInt::from_i64(10));
        assert_eq!(&a & &b, BigInt::from_i64(-12 & 10));
        assert_eq!(&a | &b, BigInt::from_i64(-12 | 10));
        assert_eq!(&a ^ &b, BigInt::from_i64(-12 ^ 10));
        assert_eq!(!&a, BigInt::from_i64(11));
        assert_eq!(!BigInt::zero(), BigInt::from_i64(-1));

        let big = int("-340282366920938463463374607431768211457");
        let mask = BigInt::from_u64(u64::MAX);
        assert_eq!(&big & &mask, BigInt::from_u64(u64::MAX));
        assert_eq!(&big | &mask, big);
        assert_eq!(&big ^ &big, BigInt::zero());
    }

    #[test]
    fn bits_of_negative_values() {
        let x = BigInt::from_i64(-6);
        let expected = (0..70).map(|i| ((-6i128 >> i) & 1) as u32);
        for (i, want) in expected.enumerate() {
            assert_eq!(x.bit(i), want, "bit {i}");
        }
        assert!(x.bit_signed(-1).is_err());
        assert_eq!(x.bit_signed(1).unwrap(), 1);
    }

    #[test]
    fn set_bit_on_both_signs() {
        let mut z = BigInt::zero();
        z.set_bit(&BigInt::zero(), 70, 1).unwrap();
        assert_eq!(z, BigInt::from_u128(1 << 70));

        z.set_bit(&BigInt::from_i64(-1), 3, 0).unwrap();
        assert_eq!(z, -9);

        z.set_bit(&BigInt::from_i64(-9), 3, 1).unwrap();
        assert_eq!(z, -1);

        z.set_bit(&BigInt::from_i64(-1), 200, 1).unwrap();
        assert_eq!(z, -1);

        assert!(z.set_bit(&BigInt::one(), 0, 2).is_err());
    }
}
