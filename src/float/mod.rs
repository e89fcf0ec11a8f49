//! Binary floating-point numbers with a per-value mantissa precision.
//!
//! A [`BigFloat`] holds `sign * mant * 2^exp` with an odd mantissa of at most
//! `prec` bits. Every operation computes the exact result (or enough of it)
//! and truncates toward zero to the precision of the destination.

use std::cmp::Ordering;
use std::fmt;

use crate::config;
use crate::error::{NumError, Result};
use crate::ieee;
use crate::int::BigInt;
use crate::limbs::Limbs;
use crate::rational::BigRational;
use crate::sign::{signed_cmp, Sign};

mod arith;
mod convert;

/// `0` selects the process-wide default.
pub(crate) fn resolve_prec(prec: usize) -> usize {
    if prec == 0 {
        config::default_prec()
    } else {
        prec
    }
}

/// `sign * mant * 2^exp`. Zero has no mantissa limbs and a zero exponent.
#[derive(Clone)]
pub struct BigFloat {
    sign: Sign,
    mant: Limbs,
    exp: i64,
    prec: usize,
}

impl BigFloat {
    /// Zero at the default precision.
    pub fn new() -> Self {
        Self::with_prec(0)
    }

    /// Zero holding `prec` mantissa bits; `0` means the default precision.
    pub fn with_prec(prec: usize) -> Self {
        BigFloat {
            sign: Sign::Zero,
            mant: Limbs::new(),
            exp: 0,
            prec: resolve_prec(prec),
        }
    }

    /// Builds `(-1)^negative * mant * 2^exp` truncated to `prec` bits.
    pub(crate) fn from_parts(negative: bool, mant: Limbs, exp: i64, prec: usize) -> Self {
        if mant.is_zero() {
            return Self::with_prec(prec);
        }

        let bits = mant.bit_len();
        let (mant, exp) = if bits > prec {
            let shift = bits - prec;
            (mant.shr(shift), exp + shift as i64)
        } else {
            (mant, exp)
        };

        let tz = mant.trailing_zeros().unwrap_or(0);
        BigFloat {
            sign: Sign::of(negative, false),
            mant: mant.shr(tz),
            exp: exp + tz as i64,
            prec,
        }
    }

    /// Replaces the value, truncating to the current precision.
    pub(crate) fn put(&mut self, negative: bool, mant: Limbs, exp: i64) -> &mut Self {
        *self = Self::from_parts(negative, mant, exp, self.prec);
        self
    }

    pub fn from_i64(value: i64) -> Self {
        let mut f = Self::new();
        f.set_i64(value);
        f
    }

    pub fn from_u64(value: u64) -> Self {
        let mut f = Self::new();
        f.set_u64(value);
        f
    }

    /// `value` at the default precision. NaN and infinities are rejected.
    pub fn from_f64(value: f64) -> Result<Self> {
        let mut f = Self::new();
        f.set_f64(value)?;
        Ok(f)
    }

    pub fn from_int(value: &BigInt) -> Self {
        let mut f = Self::new();
        f.set_int(value);
        f
    }

    /// Exact copy of a machine integer, independent of the default precision.
    pub(crate) fn exact_u64(value: u64) -> Self {
        Self::from_parts(false, Limbs::from_u64(value), 0, 64)
    }

    pub fn set(&mut self, x: &BigFloat) -> &mut Self {
        self.put(x.is_negative(), x.mant.clone(), x.exp)
    }

    pub fn set_i64(&mut self, value: i64) -> &mut Self {
        self.put(value < 0, Limbs::from_u64(value.unsigned_abs()), 0)
    }

    pub fn set_u64(&mut self, value: u64) -> &mut Self {
        self.put(false, Limbs::from_u64(value), 0)
    }

    pub fn set_f64(&mut self, value: f64) -> Result<&mut Self> {
        if !value.is_finite() {
            return Err(NumError::invalid(format!("cannot convert {value} to a float")));
        }
        let (mant, exp, sign) = ieee::decode_double(value);
        Ok(self.put(sign < 0, Limbs::from_u64(mant as u64), exp as i64))
    }

    pub fn set_int(&mut self, value: &BigInt) -> &mut Self {
        self.put(value.is_negative(), value.magnitude().clone(), 0)
    }

    /// Sets `self` to `q` truncated toward zero.
    pub fn set_rat(&mut self, q: &BigRational) -> &mut Self {
        let (negative, mant, exp) = quotient_bits(q.numer(), q.denom(), self.prec);
        self.put(negative, mant, exp)
    }

    pub fn swap(&mut self, other: &mut BigFloat) {
        std::mem::swap(self, other);
    }

    /// Resets the value to zero, keeping the precision.
    pub fn clear(&mut self) {
        self.sign = Sign::Zero;
        self.mant.clear();
        self.exp = 0;
    }

    pub fn prec(&self) -> usize {
        self.prec
    }

    /// Changes the precision, truncating the mantissa if it shrinks.
    /// `0` selects the default precision.
    pub fn set_prec(&mut self, prec: usize) {
        self.prec = resolve_prec(prec);
        let mant = std::mem::take(&mut self.mant);
        self.put(self.is_negative(), mant, self.exp);
    }

    /// Changes the precision without touching the mantissa. The next write
    /// to `self` truncates to the new precision.
    pub fn set_prec_raw(&mut self, prec: usize) {
        self.prec = resolve_prec(prec);
    }

    pub fn sign(&self) -> Sign {
        self.sign
    }

    pub fn signum(&self) -> i32 {
        self.sign.signum()
    }

    pub fn is_zero(&self) -> bool {
        self.sign.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.sign.is_negative()
    }

    /// The odd mantissa of the absolute value.
    pub fn mantissa(&self) -> &Limbs {
        &self.mant
    }

    /// The binary exponent applied to [`BigFloat::mantissa`].
    pub fn exponent(&self) -> i64 {
        self.exp
    }

    /// Position just above the highest set bit: `|x|` lies in
    /// `[2^(top-1), 2^top)`.
    fn top(&self) -> i64 {
        self.exp + self.mant.bit_len() as i64
    }

    pub fn is_integer(&self) -> bool {
        self.is_zero() || self.exp >= 0
    }

    /// Truncating conversion; out-of-range values become infinite.
    pub fn to_f64(&self) -> f64 {
        ieee::compose_truncated(self.is_negative(), &self.mant, self.exp)
    }

    /// Truncates toward zero, saturating at the `i64` bounds.
    pub fn to_i64(&self) -> i64 {
        let int = self.trunc_int();
        int.try_to_i64().unwrap_or(if int.is_negative() {
            i64::MIN
        } else {
            i64::MAX
        })
    }

    /// Splits into `d * 2^exp` with `0.5 <= |d| < 1`; zero gives `(0.0, 0)`.
    pub fn to_f64_exp(&self) -> (f64, i64) {
        if self.is_zero() {
            return (0.0, 0);
        }
        let bits = self.mant.bit_len() as i64;
        (
            ieee::compose_truncated(self.is_negative(), &self.mant, -bits),
            self.top(),
        )
    }

    /// The integer part, rounded toward zero.
    pub(crate) fn trunc_int(&self) -> BigInt {
        if self.exp >= 0 {
            BigInt::from_limbs(self.is_negative(), self.mant.shl(self.exp as usize))
        } else {
            BigInt::from_limbs(
                self.is_negative(),
                self.mant.shr(self.exp.unsigned_abs() as usize),
            )
        }
    }

    fn cmp_abs(&self, other: &BigFloat) -> Ordering {
        match (self.is_zero(), other.is_zero()) {
            (true, true) => return Ordering::Equal,
            (true, false) => return Ordering::Less,
            (false, true) => return Ordering::Greater,
            _ => {}
        }

        self.top().cmp(&other.top()).then_with(|| {
            let base = self.exp.min(other.exp);
            let lhs = self.mant.shl((self.exp - base) as usize);
            let rhs = other.mant.shl((other.exp - base) as usize);
            lhs.cmp(&rhs)
        })
    }

    pub fn cmp_u64(&self, value: u64) -> Ordering {
        self.cmp(&Self::exact_u64(value))
    }

    pub fn cmp_i64(&self, value: i64) -> Ordering {
        let other = Self::from_parts(value < 0, Limbs::from_u64(value.unsigned_abs()), 0, 64);
        self.cmp(&other)
    }

    /// Compares with a double; `None` for NaN.
    pub fn cmp_f64(&self, value: f64) -> Option<Ordering> {
        if value.is_nan() {
            return None;
        }
        if value.is_infinite() {
            return Some(if value > 0.0 {
                Ordering::Less
            } else {
                Ordering::Greater
            });
        }
        let (mant, exp, sign) = ieee::decode_double(value);
        let other = Self::from_parts(sign < 0, Limbs::from_u64(mant as u64), exp as i64, 64);
        Some(self.cmp(&other))
    }

    /// Whether `x` and `y` agree in sign, magnitude class and their first
    /// `n` mantissa bits.
    pub fn eq_bits(x: &BigFloat, y: &BigFloat, n: usize) -> bool {
        if x.sign != y.sign {
            return false;
        }
        if x.is_zero() {
            return true;
        }
        if x.top() != y.top() {
            return false;
        }

        let (bx, by) = (x.mant.bit_len(), y.mant.bit_len());
        let width = bx.max(by).max(n);
        let lead = |mant: &Limbs, bits: usize| mant.shl(width - bits).shr(width - n);
        lead(&x.mant, bx) == lead(&y.mant, by)
    }
}

/// `num / den` truncated to at least `prec` significant bits, as
/// `(negative, mant, exp)`. `den` must be positive.
pub(crate) fn quotient_bits(num: &BigInt, den: &BigInt, prec: usize) -> (bool, Limbs, i64) {
    if num.is_zero() {
        return (false, Limbs::new(), 0);
    }

    let (n, d) = (num.magnitude(), den.magnitude());
    let k = prec as i64 + d.bit_len() as i64 - n.bit_len() as i64 + 1;
    let q = if k >= 0 {
        n.shl(k as usize).div_rem(d).0
    } else {
        n.div_rem(&d.shl(k.unsigned_abs() as usize)).0
    };
    (num.is_negative(), q, -k)
}

impl Default for BigFloat {
    fn default() -> Self {
        Self::new()
    }
}

/// Values compare equal regardless of their precisions.
impl PartialEq for BigFloat {
    fn eq(&self, other: &Self) -> bool {
        self.sign == other.sign && self.exp == other.exp && self.mant == other.mant
    }
}

impl Eq for BigFloat {}

impl PartialOrd for BigFloat {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for BigFloat {
    fn cmp(&self, other: &Self) -> Ordering {
        signed_cmp(self.sign, other.sign, || self.cmp_abs(other))
    }
}

impl PartialEq<f64> for BigFloat {
    fn eq(&self, other: &f64) -> bool {
        self.cmp_f64(*other) == Some(Ordering::Equal)
    }
}

impl PartialOrd<f64> for BigFloat {
    fn partial_cmp(&self, other: &f64) -> Option<Ordering> {
        self.cmp_f64(*other)
    }
}

impl fmt::Debug for BigFloat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (prec {})", self, self.prec)
    }
}
