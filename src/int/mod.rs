//! Arbitrary-size signed integers in sign-magnitude form.

use std::cmp::Ordering;
use std::fmt;

use num_bigint::{BigInt as NumBigInt, Sign as NumSign};
use num_traits::{FromPrimitive, ToPrimitive};

use crate::error::{NumError, Result};
use crate::ieee;
use crate::limbs::Limbs;
use crate::sign::{signed_cmp, Sign};

pub(crate) mod arith;
mod bits;
mod nt;
mod parse;

/// A signed integer of unbounded size.
///
/// Zero has exactly one representation: `Sign::Zero` with no limbs. Every
/// `set_*` method writes its result into `self` and may be handed operands
/// that are unrelated to the destination; the in-place forms are the
/// `*Assign` operator traits.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct BigInt {
    pub(crate) sign: Sign,
    pub(crate) mag: Limbs,
}

impl BigInt {
    pub const fn zero() -> Self {
        BigInt {
            sign: Sign::Zero,
            mag: Limbs::new(),
        }
    }

    pub fn one() -> Self {
        Self::from_u64(1)
    }

    /// Builds an integer from a magnitude and a sign flag. A zero magnitude
    /// always yields zero, whatever `negative` says.
    pub fn from_limbs(negative: bool, mag: Limbs) -> Self {
        BigInt {
            sign: Sign::of(negative, mag.is_zero()),
            mag,
        }
    }

    pub(crate) fn from_sign_mag(sign: Sign, mag: Limbs) -> Self {
        Self::from_limbs(sign.is_negative(), mag)
    }

    pub fn from_u64(value: u64) -> Self {
        Self::from_limbs(false, Limbs::from_u64(value))
    }

    pub fn from_i64(value: i64) -> Self {
        Self::from_limbs(value < 0, Limbs::from_u64(value.unsigned_abs()))
    }

    pub fn from_u128(value: u128) -> Self {
        Self::from_limbs(false, Limbs::from_u128(value))
    }

    pub fn from_i128(value: i128) -> Self {
        Self::from_limbs(value < 0, Limbs::from_u128(value.unsigned_abs()))
    }

    /// Truncates `value` toward zero. NaN and infinities are rejected.
    pub fn from_f64(value: f64) -> Result<Self> {
        if !value.is_finite() {
            return Err(NumError::invalid(format!("cannot convert {value} to an integer")));
        }

        let (mant, exp, sign) = ieee::decode_double(value.trunc());
        let mag = Limbs::from_u64(mant as u64);
        let mag = if exp >= 0 {
            mag.shl(exp as usize)
        } else {
            mag.shr(exp.unsigned_abs() as usize)
        };
        Ok(Self::from_limbs(sign < 0, mag))
    }

    /// Interprets `bytes` as a big-endian unsigned magnitude.
    pub fn from_bytes_be(bytes: &[u8]) -> Self {
        Self::from_limbs(false, Limbs::from_bytes_be(bytes))
    }

    /// Replaces the value with the non-negative integer encoded in `bytes`.
    pub fn set_bytes(&mut self, bytes: &[u8]) -> &mut Self {
        *self = Self::from_bytes_be(bytes);
        self
    }

    /// Minimal big-endian bytes of the absolute value; zero gives an empty vector.
    pub fn to_bytes_be(&self) -> Vec<u8> {
        self.mag.to_bytes_be()
    }

    pub fn sign(&self) -> Sign {
        self.sign
    }

    /// `-1`, `0` or `+1`.
    pub fn signum(&self) -> i32 {
        self.sign.signum()
    }

    pub fn is_zero(&self) -> bool {
        self.sign.is_zero()
    }

    pub fn is_one(&self) -> bool {
        self.sign.is_positive() && self.mag.is_one()
    }

    pub fn is_negative(&self) -> bool {
        self.sign.is_negative()
    }

    pub fn is_positive(&self) -> bool {
        self.sign.is_positive()
    }

    pub fn is_odd(&self) -> bool {
        self.mag.is_odd()
    }

    pub fn is_even(&self) -> bool {
        !self.mag.is_odd()
    }

    /// The absolute value's limbs, least significant first.
    pub fn magnitude(&self) -> &Limbs {
        &self.mag
    }

    pub fn into_parts(self) -> (Sign, Limbs) {
        (self.sign, self.mag)
    }

    /// Number of bits in the absolute value; zero has bit length 0.
    pub fn bit_len(&self) -> usize {
        self.mag.bit_len()
    }

    /// Like [`BigInt::bit_len`], but zero reports a length of 1.
    pub fn bit_len_min1(&self) -> usize {
        self.mag.bit_len().max(1)
    }

    /// Index of the lowest set bit of the absolute value.
    pub fn trailing_zeros(&self) -> Option<usize> {
        self.mag.trailing_zeros()
    }

    /// Compares absolute values.
    pub fn cmp_abs(&self, other: &BigInt) -> Ordering {
        self.mag.cmp(&other.mag)
    }

    pub fn set(&mut self, a: &BigInt) -> &mut Self {
        self.clone_from(a);
        self
    }

    pub fn set_i64(&mut self, value: i64) -> &mut Self {
        *self = Self::from_i64(value);
        self
    }

    pub fn set_u64(&mut self, value: u64) -> &mut Self {
        *self = Self::from_u64(value);
        self
    }

    pub fn swap(&mut self, other: &mut BigInt) {
        std::mem::swap(self, other);
    }

    /// Resets to zero and releases the limb buffer.
    pub fn clear(&mut self) {
        self.sign = Sign::Zero;
        self.mag.clear();
    }

    /// The low 64 bits of the absolute value, carrying the sign.
    /// Values outside the `i64` range wrap.
    pub fn to_i64(&self) -> i64 {
        let low = self.mag.low_u64() as i64;
        if self.is_negative() {
            low.wrapping_neg()
        } else {
            low
        }
    }

    pub fn try_to_i64(&self) -> Option<i64> {
        let value = self.mag.to_u64()?;
        if self.is_negative() {
            if value == i64::MIN.unsigned_abs() {
                Some(i64::MIN)
            } else {
                i64::try_from(value).ok().map(|v| -v)
            }
        } else {
            i64::try_from(value).ok()
        }
    }

    /// The low 64 bits of the absolute value.
    pub fn to_u64(&self) -> u64 {
        self.mag.low_u64()
    }

    pub fn try_to_u64(&self) -> Option<u64> {
        if self.is_negative() {
            return None;
        }
        self.mag.to_u64()
    }

    pub fn try_to_i128(&self) -> Option<i128> {
        let value = self.mag.to_u128()?;
        if self.is_negative() {
            if value == i128::MIN.unsigned_abs() {
                Some(i128::MIN)
            } else {
                i128::try_from(value).ok().map(|v| -v)
            }
        } else {
            i128::try_from(value).ok()
        }
    }

    pub fn try_to_u128(&self) -> Option<u128> {
        if self.is_negative() {
            return None;
        }
        self.mag.to_u128()
    }

    /// Truncating conversion; out-of-range values become infinite.
    pub fn to_f64(&self) -> f64 {
        ieee::compose_truncated(self.is_negative(), &self.mag, 0)
    }

    pub(crate) fn assign(&mut self, value: BigInt) -> &mut Self {
        *self = value;
        self
    }

    pub(crate) fn abs_ref(&self) -> BigInt {
        Self::from_limbs(false, self.mag.clone())
    }

    pub(crate) fn neg_ref(&self) -> BigInt {
        BigInt {
            sign: self.sign.flip(),
            mag: self.mag.clone(),
        }
    }
}

impl PartialOrd for BigInt {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for BigInt {
    fn cmp(&self, other: &Self) -> Ordering {
        signed_cmp(self.sign, other.sign, || self.mag.cmp(&other.mag))
    }
}

impl PartialEq<i64> for BigInt {
    fn eq(&self, other: &i64) -> bool {
        self.try_to_i64() == Some(*other)
    }
}

impl PartialOrd<i64> for BigInt {
    fn partial_cmp(&self, other: &i64) -> Option<Ordering> {
        Some(self.cmp(&BigInt::from_i64(*other)))
    }
}

macro_rules! impl_from_primitive {
    ($($t:ty => $ctor:ident),*) => {
        $(
            impl From<$t> for BigInt {
                fn from(value: $t) -> Self {
                    BigInt::$ctor(value.into())
                }
            }
        )*
    };
}

impl_from_primitive!(
    i8 => from_i64, i16 => from_i64, i32 => from_i64, i64 => from_i64,
    u8 => from_u64, u16 => from_u64, u32 => from_u64, u64 => from_u64,
    i128 => from_i128, u128 => from_u128
);

impl From<usize> for BigInt {
    fn from(value: usize) -> Self {
        BigInt::from_u64(value as u64)
    }
}

impl From<&NumBigInt> for BigInt {
    fn from(value: &NumBigInt) -> Self {
        let (sign, bytes) = value.to_bytes_be();
        BigInt::from_limbs(sign == NumSign::Minus, Limbs::from_bytes_be(&bytes))
    }
}

impl From<NumBigInt> for BigInt {
    fn from(value: NumBigInt) -> Self {
        BigInt::from(&value)
    }
}

impl From<&BigInt> for NumBigInt {
    fn from(value: &BigInt) -> Self {
        let sign = match value.sign {
            Sign::Negative => NumSign::Minus,
            Sign::Zero => NumSign::NoSign,
            Sign::Positive => NumSign::Plus,
        };
        NumBigInt::from_bytes_be(sign, &value.mag.to_bytes_be())
    }
}

impl From<BigInt> for NumBigInt {
    fn from(value: BigInt) -> Self {
        NumBigInt::from(&value)
    }
}

impl ToPrimitive for BigInt {
    fn to_i64(&self) -> Option<i64> {
        self.try_to_i64()
    }

    fn to_u64(&self) -> Option<u64> {
        self.try_to_u64()
    }

    fn to_i128(&self) -> Option<i128> {
        self.try_to_i128()
    }

    fn to_u128(&self) -> Option<u128> {
        self.try_to_u128()
    }

    fn to_f64(&self) -> Option<f64> {
        Some(BigInt::to_f64(self))
    }
}

impl FromPrimitive for BigInt {
    fn from_i64(n: i64) -> Option<Self> {
        Some(BigInt::from_i64(n))
    }

    fn from_u64(n: u64) -> Option<Self> {
        Some(BigInt::from_u64(n))
    }

    fn from_i128(n: i128) -> Option<Self> {
        Some(BigInt::from_i128(n))
    }

    fn from_u128(n: u128) -> Option<Self> {
        Some(BigInt::from_u128(n))
    }

    fn from_f64(n: f64) -> Option<Self> {
        BigInt::from_f64(n).ok()
    }
}

impl fmt::Debug for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bigint_cmp() {
        let b1 = BigInt::from_u64(12345678901234567890);
        let b2 = BigInt::from_u64(12345678901234567890);
        assert_eq!(b1.cmp(&b2), Ordering::Equal);

        let b3 = BigInt::from_u64(12345678901234567891);
        assert_eq!(b1.cmp(&b3), Ordering::Less);
        assert_eq!(b3.cmp(&b1), Ordering::Greater);

        let zero = BigInt::zero();
        assert_eq!(zero.cmp(&b1), Ordering::Less);
        assert_eq!(b1.cmp(&zero), Ordering::Greater);
        assert_eq!(zero.cmp(&zero), Ordering::Equal);

        let m1 = BigInt::from_i64(-5);
        let m2 = BigInt::from_i64(-7);
        assert!(m2 < m1 && m1 < zero);
        assert_eq!(m2.cmp_abs(&m1), Ordering::Greater);
    }

    #[test]
    fn zero_is_unique() {
        let z = BigInt::from_limbs(true, Limbs::new());
        assert_eq!(z, BigInt::zero());
        assert_eq!(z.sign(), Sign::Zero);
        assert_eq!(BigInt::from_i64(0), BigInt::default());
    }

    #[test]
    fn bit_length_conventions() {
        assert_eq!(BigInt::zero().bit_len(), 0);
        assert_eq!(BigInt::zero().bit_len_min1(), 1);
        assert_eq!(BigInt::from_i64(-8).bit_len(), 4);
        assert_eq!(BigInt::from_u128(1 << 64).bit_len_min1(), 65);
    }

    #[test]
    fn machine_conversions() {
        assert_eq!(BigInt::from_i64(i64::MIN).try_to_i64(), Some(i64::MIN));
        assert_eq!(BigInt::from_u64(1 << 63).try_to_i64(), None);
        assert_eq!(BigInt::from_i64(-1).try_to_u64(), None);
        assert_eq!(BigInt::from_i128(i128::MIN).try_to_i128(), Some(i128::MIN));

        let big = BigInt::from_u128((7 << 64) | 5);
        assert_eq!(big.to_u64(), 5);
        assert_eq!(BigInt::from_i128(-((7 << 64) | 5)).to_i64(), -5);
        assert_eq!(big.try_to_u64(), None);
    }

    #[test]
    fn float_conversions() {
        assert_eq!(BigInt::from_f64(-3.9).unwrap(), -3);
        assert_eq!(BigInt::from_f64(0.5).unwrap(), BigInt::zero());
        assert_eq!(BigInt::from_f64(2f64.powi(70)).unwrap(), BigInt::from_u128(1 << 70));
        assert!(BigInt::from_f64(f64::NAN).is_err());
        assert!(BigInt::from_f64(f64::NEG_INFINITY).is_err());

        assert_eq!(BigInt::from_i64(-12345).to_f64(), -12345.0);
        assert_eq!(BigInt::from_u128(1 << 100).to_f64(), 2f64.powi(100));
    }

    #[test]
    fn bytes_and_num_bigint() {
        let x = BigInt::from_bytes_be(&[0x01, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x02]);
        assert_eq!(x, BigInt::from_u128((1 << 64) | 2));
        assert_eq!(x.to_bytes_be(), vec![1, 0, 0, 0, 0, 0, 0, 0, 2]);
        assert!(BigInt::zero().to_bytes_be().is_empty());

        let mut y = BigInt::from_i64(-9);
        y.set_bytes(&[0xff]);
        assert_eq!(y, 255);

        let n = NumBigInt::from(-123456789012345678901234567890i128);
        let ours = BigInt::from(&n);
        assert_eq!(ours, BigInt::from_i128(-123456789012345678901234567890));
        assert_eq!(NumBigInt::from(&ours), n);
        assert_eq!(NumBigInt::from(BigInt::zero()), NumBigInt::from(0));
    }

    #[test]
    fn set_swap_clear() {
        let mut a = BigInt::from_i64(3);
        let mut b = BigInt::from_i64(-4);
        a.swap(&mut b);
        assert_eq!((a.clone(), b.clone()), (BigInt::from_i64(-4), BigInt::from_i64(3)));

        a.set(&b);
        assert_eq!(a, 3);
        a.clear();
        assert!(a.is_zero());
        assert!(a.magnitude().is_empty());
    }
}
