use std::cmp::Ordering;
use std::ops::{
    Add, AddAssign, BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Div,
    DivAssign, Mul, MulAssign, Neg, Not, Rem, RemAssign, Shl, ShlAssign, Shr, ShrAssign, Sub,
    SubAssign,
};

use num_traits::{One, Zero};

use super::BigInt;
use crate::error::{NumError, Result};
use crate::limbs::Limbs;
use crate::sign::Sign;

/// Adds two signed magnitudes.
pub(crate) fn add_signed(lsign: Sign, lhs: &Limbs, rsign: Sign, rhs: &Limbs) -> BigInt {
    match (lsign, rsign) {
        (Sign::Zero, _) => BigInt::from_sign_mag(rsign, rhs.clone()),
        (_, Sign::Zero) => BigInt::from_sign_mag(lsign, lhs.clone()),
        (a, b) if a == b => BigInt::from_sign_mag(a, lhs.add(rhs)),
        _ => match lhs.cmp(rhs) {
            Ordering::Equal => BigInt::zero(),
            Ordering::Greater => BigInt::from_sign_mag(lsign, lhs.sub(rhs)),
            Ordering::Less => BigInt::from_sign_mag(rsign, rhs.sub(lhs)),
        },
    }
}

pub(crate) fn plus(a: &BigInt, b: &BigInt) -> BigInt {
    add_signed(a.sign, &a.mag, b.sign, &b.mag)
}

pub(crate) fn minus(a: &BigInt, b: &BigInt) -> BigInt {
    add_signed(a.sign, &a.mag, b.sign.flip(), &b.mag)
}

pub(crate) fn times(a: &BigInt, b: &BigInt) -> BigInt {
    BigInt::from_sign_mag(a.sign * b.sign, a.mag.mul(&b.mag))
}

/// Truncating division: the quotient rounds toward zero and the remainder
/// takes the sign of the dividend.
pub(crate) fn quo_rem(a: &BigInt, b: &BigInt) -> Result<(BigInt, BigInt)> {
    if b.is_zero() {
        return Err(NumError::DivisionByZero);
    }
    let (q, r) = a.mag.div_rem(&b.mag);
    Ok((
        BigInt::from_sign_mag(a.sign * b.sign, q),
        BigInt::from_sign_mag(a.sign, r),
    ))
}

/// Euclidean division: `0 <= r < |b|` and `a = q*b + r`.
pub(crate) fn div_mod(a: &BigInt, b: &BigInt) -> Result<(BigInt, BigInt)> {
    let (mut q, mut r) = quo_rem(a, b)?;
    if r.is_negative() {
        if b.is_positive() {
            q = minus(&q, &BigInt::one());
            r = plus(&r, b);
        } else {
            q = plus(&q, &BigInt::one());
            r = minus(&r, b);
        }
    }
    Ok((q, r))
}

/// `a mod m` for a positive modulus magnitude, in `[0, m)`.
pub(crate) fn mod_positive(a: &BigInt, m: &Limbs) -> Limbs {
    let (_, r) = a.mag.div_rem(m);
    if a.is_negative() && !r.is_zero() {
        m.sub(&r)
    } else {
        r
    }
}

fn mul_range_unsigned(lo: u64, hi: u64) -> Limbs {
    debug_assert!(lo <= hi);
    match hi - lo {
        0 => Limbs::from_u64(lo),
        1 => Limbs::from_u128(lo as u128 * hi as u128),
        span => {
            let mid = lo + span / 2;
            mul_range_unsigned(lo, mid).mul(&mul_range_unsigned(mid + 1, hi))
        }
    }
}

impl BigInt {
    pub fn set_add(&mut self, a: &BigInt, b: &BigInt) -> &mut Self {
        self.assign(plus(a, b))
    }

    pub fn set_sub(&mut self, a: &BigInt, b: &BigInt) -> &mut Self {
        self.assign(minus(a, b))
    }

    pub fn set_mul(&mut self, a: &BigInt, b: &BigInt) -> &mut Self {
        self.assign(times(a, b))
    }

    pub fn set_neg(&mut self, a: &BigInt) -> &mut Self {
        self.assign(a.neg_ref())
    }

    pub fn set_abs(&mut self, a: &BigInt) -> &mut Self {
        self.assign(a.abs_ref())
    }

    pub fn abs(&self) -> BigInt {
        self.abs_ref()
    }

    /// Sets `self` to `a / b` truncated toward zero.
    pub fn set_quo(&mut self, a: &BigInt, b: &BigInt) -> Result<&mut Self> {
        let (q, _) = quo_rem(a, b)?;
        Ok(self.assign(q))
    }

    /// Sets `self` to the remainder of truncated division; its sign follows `a`.
    pub fn set_rem(&mut self, a: &BigInt, b: &BigInt) -> Result<&mut Self> {
        let (_, r) = quo_rem(a, b)?;
        Ok(self.assign(r))
    }

    /// Truncated quotient and remainder.
    pub fn quo_rem(a: &BigInt, b: &BigInt) -> Result<(BigInt, BigInt)> {
        quo_rem(a, b)
    }

    /// Sets `self` to the Euclidean quotient of `a` by `b`.
    pub fn set_div(&mut self, a: &BigInt, b: &BigInt) -> Result<&mut Self> {
        let (q, _) = div_mod(a, b)?;
        Ok(self.assign(q))
    }

    /// Sets `self` to the Euclidean remainder, always in `[0, |b|)`.
    pub fn set_mod(&mut self, a: &BigInt, b: &BigInt) -> Result<&mut Self> {
        let (_, r) = div_mod(a, b)?;
        Ok(self.assign(r))
    }

    /// Euclidean quotient and remainder.
    pub fn div_mod(a: &BigInt, b: &BigInt) -> Result<(BigInt, BigInt)> {
        div_mod(a, b)
    }

    /// Sets `self` to the product of all integers in `[lo, hi]`.
    ///
    /// An empty range (`lo > hi`) gives 1 and a range spanning zero gives 0.
    pub fn set_mul_range(&mut self, lo: i64, hi: i64) -> &mut Self {
        let value = if lo > hi {
            BigInt::one()
        } else if lo <= 0 && hi >= 0 {
            BigInt::zero()
        } else if lo > 0 {
            BigInt::from_limbs(false, mul_range_unsigned(lo as u64, hi as u64))
        } else {
            // hi - lo is even exactly when the range holds an odd count of terms.
            let negative = (hi - lo) % 2 == 0;
            let mag = mul_range_unsigned(hi.unsigned_abs(), lo.unsigned_abs());
            BigInt::from_limbs(negative, mag)
        };
        self.assign(value)
    }
}

fn quo_or_panic(a: &BigInt, b: &BigInt) -> BigInt {
    match quo_rem(a, b) {
        Ok((q, _)) => q,
        Err(err) => panic!("{err}"),
    }
}

fn rem_or_panic(a: &BigInt, b: &BigInt) -> BigInt {
    match quo_rem(a, b) {
        Ok((_, r)) => r,
        Err(err) => panic!("{err}"),
    }
}

macro_rules! forward_binop {
    ($imp:ident, $method:ident, $assign_imp:ident, $assign_method:ident, $func:path) => {
        impl $imp<&BigInt> for &BigInt {
            type Output = BigInt;

            fn $method(self, rhs: &BigInt) -> BigInt {
                $func(self, rhs)
            }
        }

        impl $imp<BigInt> for &BigInt {
            type Output = BigInt;

            fn $method(self, rhs: BigInt) -> BigInt {
                $func(self, &rhs)
            }
        }

        impl $imp<&BigInt> for BigInt {
            type Output = BigInt;

            fn $method(self, rhs: &BigInt) -> BigInt {
                $func(&self, rhs)
            }
        }

        impl $imp<BigInt> for BigInt {
            type Output = BigInt;

            fn $method(self, rhs: BigInt) -> BigInt {
                $func(&self, &rhs)
            }
        }

        impl $assign_imp<&BigInt> for BigInt {
            fn $assign_method(&mut self, rhs: &BigInt) {
                *self = $func(self, rhs);
            }
        }

        impl $assign_imp<BigInt> for BigInt {
            fn $assign_method(&mut self, rhs: BigInt) {
                *self = $func(self, &rhs);
            }
        }
    };
}

forward_binop!(Add, add, AddAssign, add_assign, plus);
forward_binop!(Sub, sub, SubAssign, sub_assign, minus);
forward_binop!(Mul, mul, MulAssign, mul_assign, times);
forward_binop!(Div, div, DivAssign, div_assign, quo_or_panic);
forward_binop!(Rem, rem, RemAssign, rem_assign, rem_or_panic);
forward_binop!(BitAnd, bitand, BitAndAssign, bitand_assign, super::bits::and);
forward_binop!(BitOr, bitor, BitOrAssign, bitor_assign, super::bits::or);
forward_binop!(BitXor, bitxor, BitXorAssign, bitxor_assign, super::bits::xor);

impl Neg for BigInt {
    type Output = BigInt;

    fn neg(mut self) -> BigInt {
        self.sign = self.sign.flip();
        self
    }
}

impl Neg for &BigInt {
    type Output = BigInt;

    fn neg(self) -> BigInt {
        self.neg_ref()
    }
}

impl Not for BigInt {
    type Output = BigInt;

    fn not(self) -> BigInt {
        super::bits::not(&self)
    }
}

impl Not for &BigInt {
    type Output = BigInt;

    fn not(self) -> BigInt {
        super::bits::not(self)
    }
}

impl Shl<usize> for &BigInt {
    type Output = BigInt;

    fn shl(self, bits: usize) -> BigInt {
        super::bits::shift_left(self, bits)
    }
}

impl Shl<usize> for BigInt {
    type Output = BigInt;

    fn shl(self, bits: usize) -> BigInt {
        super::bits::shift_left(&self, bits)
    }
}

impl Shr<usize> for &BigInt {
    type Output = BigInt;

    fn shr(self, bits: usize) -> BigInt {
        super::bits::shift_right(self, bits)
    }
}

impl Shr<usize> for BigInt {
    type Output = BigInt;

    fn shr(self, bits: usize) -> BigInt {
        super::bits::shift_right(&self, bits)
    }
}

impl ShlAssign<usize> for BigInt {
    fn shl_assign(&mut self, bits: usize) {
        *self = super::bits::shift_left(self, bits);
    }
}

impl ShrAssign<usize> for BigInt {
    fn shr_assign(&mut self, bits: usize) {
        *self = super::bits::shift_right(self, bits);
    }
}

impl Zero for BigInt {
    fn zero() -> Self {
        BigInt::zero()
    }

    fn is_zero(&self) -> bool {
        BigInt::is_zero(self)
    }
}

impl One for BigInt {
    fn one() -> Self {
        BigInt::one()
    }
}

impl std::iter::Sum for BigInt {
    fn sum<I: Iterator<Item = BigInt>>(iter: I) -> Self {
        iter.fold(BigInt::zero(), |acc, x| plus(&acc, &x))
    }
}

impl std::iter::Product for BigInt {
    fn product<I: Iterator<Item = BigInt>>(iter: I) -> Self {
        iter.fold(BigInt::one(), |acc, x| times(&acc, &x))
    }
}
