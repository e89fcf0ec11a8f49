use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use super::BigFloat;
use crate::error::{NumError, Result};
use crate::int::arith::add_signed;
use crate::limbs::Limbs;
use crate::sign::Sign;

/// Sum of `x` and `(-1)^y_negative * |y|` as `(negative, mant, exp)`.
///
/// Exact, except that an operand lying entirely below the `prec`-bit window
/// of the other is replaced by a single bit just under that window. The
/// truncated result is the same either way.
fn sum(x: &BigFloat, y_negative: bool, y: &BigFloat, prec: usize) -> (bool, Limbs, i64) {
    if y.is_zero() {
        return (x.is_negative(), x.mant.clone(), x.exp);
    }
    if x.is_zero() {
        return (y_negative, y.mant.clone(), y.exp);
    }

    let ((hi, hi_neg), (lo, lo_neg)) = if x.top() >= y.top() {
        ((x, x.is_negative()), (y, y_negative))
    } else {
        ((y, y_negative), (x, x.is_negative()))
    };

    let floor = hi.exp.min(hi.top() - prec as i64) - 2;
    let sticky = Limbs::from_u64(1);
    let (lo_mant, lo_exp) = if lo.top() < floor {
        (&sticky, floor - 1)
    } else {
        (&lo.mant, lo.exp)
    };

    let base = hi.exp.min(lo_exp);
    let a = hi.mant.shl((hi.exp - base) as usize);
    let b = lo_mant.shl((lo_exp - base) as usize);
    let total = add_signed(Sign::of(hi_neg, false), &a, Sign::of(lo_neg, false), &b);
    let negative = total.is_negative();
    (negative, total.into_parts().1, base)
}

/// `|x| / |y|` truncated to at least `prec` bits. `y` must be non-zero.
fn quotient(x: &Limbs, x_exp: i64, y: &Limbs, y_exp: i64, prec: usize) -> (Limbs, i64) {
    let k = (prec as i64 + y.bit_len() as i64 - x.bit_len() as i64 + 1).max(0);
    let (q, _) = x.shl(k as usize).div_rem(y);
    (q, x_exp - y_exp - k)
}

/// Floor square root of `mant * 2^exp` with at least `prec` bits.
fn root_bits(mant: &Limbs, exp: i64, prec: usize) -> (Limbs, i64) {
    if mant.is_zero() {
        return (Limbs::new(), 0);
    }
    // Even exponent and twice the target bits in the radicand.
    let mut shift = (2 * prec as i64 + 2 - mant.bit_len() as i64).max(0);
    if (exp - shift).rem_euclid(2) != 0 {
        shift += 1;
    }
    (mant.shl(shift as usize).sqrt(), (exp - shift) / 2)
}

fn product(a: &BigFloat, b: &BigFloat, prec: usize) -> BigFloat {
    BigFloat::from_parts(
        a.is_negative() != b.is_negative(),
        a.mant.mul(&b.mant),
        a.exp + b.exp,
        prec,
    )
}

impl BigFloat {
    pub fn set_add(&mut self, x: &BigFloat, y: &BigFloat) -> &mut Self {
        let (negative, mant, exp) = sum(x, y.is_negative(), y, self.prec);
        self.put(negative, mant, exp)
    }

    pub fn set_sub(&mut self, x: &BigFloat, y: &BigFloat) -> &mut Self {
        let (negative, mant, exp) = sum(x, !y.is_negative(), y, self.prec);
        self.put(negative, mant, exp)
    }

    pub fn set_mul(&mut self, x: &BigFloat, y: &BigFloat) -> &mut Self {
        *self = product(x, y, self.prec);
        self
    }

    pub fn set_quo(&mut self, x: &BigFloat, y: &BigFloat) -> Result<&mut Self> {
        if y.is_zero() {
            return Err(NumError::DivisionByZero);
        }
        let (mant, exp) = quotient(&x.mant, x.exp, &y.mant, y.exp, self.prec);
        Ok(self.put(x.is_negative() != y.is_negative(), mant, exp))
    }

    pub fn set_add_u64(&mut self, x: &BigFloat, y: u64) -> &mut Self {
        self.set_add(x, &BigFloat::exact_u64(y))
    }

    pub fn set_sub_u64(&mut self, x: &BigFloat, y: u64) -> &mut Self {
        self.set_sub(x, &BigFloat::exact_u64(y))
    }

    pub fn set_mul_u64(&mut self, x: &BigFloat, y: u64) -> &mut Self {
        self.set_mul(x, &BigFloat::exact_u64(y))
    }

    pub fn set_quo_u64(&mut self, x: &BigFloat, y: u64) -> Result<&mut Self> {
        self.set_quo(x, &BigFloat::exact_u64(y))
    }

    /// `x / y` with a machine-integer dividend.
    pub fn set_u64_quo(&mut self, x: u64, y: &BigFloat) -> Result<&mut Self> {
        self.set_quo(&BigFloat::exact_u64(x), y)
    }

    /// Square root truncated toward zero. Negative inputs are rejected.
    pub fn set_sqrt(&mut self, x: &BigFloat) -> Result<&mut Self> {
        if x.is_negative() {
            return Err(NumError::invalid("square root of a negative number"));
        }
        let (root, exp) = root_bits(&x.mant, x.exp, self.prec);
        Ok(self.put(false, root, exp))
    }

    pub fn set_sqrt_u64(&mut self, x: u64) -> &mut Self {
        let (root, exp) = root_bits(&Limbs::from_u64(x), 0, self.prec);
        self.put(false, root, exp)
    }

    /// `x^n` by repeated squaring. Intermediate products keep guard bits
    /// beyond the destination precision; exact powers stay exact.
    pub fn set_pow_u64(&mut self, x: &BigFloat, n: u64) -> &mut Self {
        let work = self.prec + 64 + (u64::BITS - n.leading_zeros()) as usize;
        let mut acc = BigFloat::from_parts(false, Limbs::from_u64(1), 0, work);
        let mut base = BigFloat::from_parts(false, x.mant.clone(), x.exp, work);

        let mut e = n;
        while e > 0 {
            if e & 1 == 1 {
                acc = product(&acc, &base, work);
            }
            e >>= 1;
            if e > 0 {
                base = product(&base, &base, work);
            }
        }
        self.put(x.is_negative() && n & 1 == 1, acc.mant, acc.exp)
    }

    pub fn set_neg(&mut self, x: &BigFloat) -> &mut Self {
        self.put(!x.is_negative(), x.mant.clone(), x.exp)
    }

    pub fn set_abs(&mut self, x: &BigFloat) -> &mut Self {
        self.put(false, x.mant.clone(), x.exp)
    }

    /// `x * 2^s`.
    pub fn set_mul_2exp(&mut self, x: &BigFloat, s: usize) -> &mut Self {
        self.put(x.is_negative(), x.mant.clone(), x.exp + s as i64)
    }

    /// `x / 2^s`.
    pub fn set_div_2exp(&mut self, x: &BigFloat, s: usize) -> &mut Self {
        self.put(x.is_negative(), x.mant.clone(), x.exp - s as i64)
    }

    fn set_integral(&mut self, x: &BigFloat, away: bool) -> &mut Self {
        let (_, mag) = x.trunc_int().into_parts();
        let mag = if away && !x.is_integer() {
            mag.add_digit(1)
        } else {
            mag
        };
        self.put(x.is_negative(), mag, 0)
    }

    /// Smallest integer not below `x`.
    pub fn set_ceil(&mut self, x: &BigFloat) -> &mut Self {
        self.set_integral(x, !x.is_negative())
    }

    /// Largest integer not above `x`.
    pub fn set_floor(&mut self, x: &BigFloat) -> &mut Self {
        self.set_integral(x, x.is_negative())
    }

    /// Integer part of `x`, rounded toward zero.
    pub fn set_trunc(&mut self, x: &BigFloat) -> &mut Self {
        self.set_integral(x, false)
    }

    /// `|x - y| / x`, so the result carries the sign of `x`.
    pub fn set_rel_diff(&mut self, x: &BigFloat, y: &BigFloat) -> Result<&mut Self> {
        if x.is_zero() {
            return Err(NumError::DivisionByZero);
        }
        let work = self.prec + 64;
        let (_, mant, exp) = sum(x, !y.is_negative(), y, work);
        let diff = BigFloat::from_parts(false, mant, exp, work);
        let (mant, exp) = quotient(&diff.mant, diff.exp, &x.mant, x.exp, self.prec);
        Ok(self.put(x.is_negative(), mant, exp))
    }
}

/// Operator results start at the default precision; the assigning forms keep
/// the precision of the left-hand side.
macro_rules! forward_float_binop {
    ($imp:ident, $method:ident, $assign_imp:ident, $assign_method:ident, $func:path) => {
        impl $imp<&BigFloat> for &BigFloat {
            type Output = BigFloat;

            fn $method(self, rhs: &BigFloat) -> BigFloat {
                let mut out = BigFloat::new();
                $func(&mut out, self, rhs);
                out
            }
        }

        impl $imp<&BigFloat> for BigFloat {
            type Output = BigFloat;

            fn $method(self, rhs: &BigFloat) -> BigFloat {
                (&self).$method(rhs)
            }
        }

        impl $imp<BigFloat> for BigFloat {
            type Output = BigFloat;

            fn $method(self, rhs: BigFloat) -> BigFloat {
                (&self).$method(&rhs)
            }
        }

        impl $assign_imp<&BigFloat> for BigFloat {
            fn $assign_method(&mut self, rhs: &BigFloat) {
                let mut out = BigFloat::with_prec(self.prec);
                $func(&mut out, self, rhs);
                *self = out;
            }
        }
    };
}

fn add_into(out: &mut BigFloat, x: &BigFloat, y: &BigFloat) {
    out.set_add(x, y);
}

fn sub_into(out: &mut BigFloat, x: &BigFloat, y: &BigFloat) {
    out.set_sub(x, y);
}

fn mul_into(out: &mut BigFloat, x: &BigFloat, y: &BigFloat) {
    out.set_mul(x, y);
}

fn quo_into(out: &mut BigFloat, x: &BigFloat, y: &BigFloat) {
    if let Err(err) = out.set_quo(x, y) {
        panic!("{err}");
    }
}

forward_float_binop!(Add, add, AddAssign, add_assign, add_into);
forward_float_binop!(Sub, sub, SubAssign, sub_assign, sub_into);
forward_float_binop!(Mul, mul, MulAssign, mul_assign, mul_into);
forward_float_binop!(Div, div, DivAssign, div_assign, quo_into);

impl Neg for BigFloat {
    type Output = BigFloat;

    fn neg(mut self) -> BigFloat {
        self.sign = self.sign.flip();
        self
    }
}

impl Neg for &BigFloat {
    type Output = BigFloat;

    fn neg(self) -> BigFloat {
        -self.clone()
    }
}
