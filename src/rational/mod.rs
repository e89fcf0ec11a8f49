//! Exact rationals kept in lowest terms with a positive denominator.

use std::cmp::Ordering;
use std::fmt;
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use crate::error::{NumError, Result};
use crate::float::BigFloat;
use crate::ieee;
use crate::int::BigInt;
use crate::limbs::Limbs;
use crate::sign::{signed_cmp, Sign};

mod parse;
mod view;

pub use view::{DenomMut, NumerMut};

/// A fraction `num / den` with `den > 0` and `gcd(|num|, den) == 1`.
///
/// The sign lives on the numerator, so equal values have equal
/// representations and the derived `PartialEq`/`Hash` compare values.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct BigRational {
    num: BigInt,
    den: BigInt,
}

impl Default for BigRational {
    fn default() -> Self {
        Self::new()
    }
}

impl BigRational {
    /// Zero, as `0/1`.
    pub fn new() -> Self {
        BigRational {
            num: BigInt::zero(),
            den: BigInt::one(),
        }
    }

    /// `num / den` in lowest terms; a zero denominator is rejected.
    pub fn from_frac(num: BigInt, den: BigInt) -> Result<Self> {
        if den.is_zero() {
            return Err(NumError::DivisionByZero);
        }
        let mut q = BigRational { num, den };
        q.normalize();
        Ok(q)
    }

    pub fn from_frac64(num: i64, den: i64) -> Result<Self> {
        Self::from_frac(BigInt::from_i64(num), BigInt::from_i64(den))
    }

    pub fn from_u64_frac(num: u64, den: u64) -> Result<Self> {
        Self::from_frac(BigInt::from_u64(num), BigInt::from_u64(den))
    }

    pub fn from_int(value: &BigInt) -> Self {
        BigRational {
            num: value.clone(),
            den: BigInt::one(),
        }
    }

    pub fn from_i64(value: i64) -> Self {
        Self::from_int(&BigInt::from_i64(value))
    }

    /// The exact value of a finite double.
    pub fn from_f64(value: f64) -> Result<Self> {
        if !value.is_finite() {
            return Err(NumError::invalid(format!("cannot convert {value} to a rational")));
        }
        let (mant, exp, sign) = ieee::decode_double(value);
        Ok(Self::from_mant_exp(
            sign < 0,
            Limbs::from_u64(mant as u64),
            exp as i64,
        ))
    }

    /// The exact value held by `x`.
    pub fn from_float(x: &BigFloat) -> Self {
        Self::from_mant_exp(x.is_negative(), x.mantissa().clone(), x.exponent())
    }

    /// `(-1)^negative * mant * 2^exp`.
    pub(crate) fn from_mant_exp(negative: bool, mant: Limbs, exp: i64) -> Self {
        let mut q = if exp >= 0 {
            BigRational {
                num: BigInt::from_limbs(negative, mant.shl(exp as usize)),
                den: BigInt::one(),
            }
        } else {
            BigRational {
                num: BigInt::from_limbs(negative, mant),
                den: BigInt::from_limbs(false, Limbs::from_u64(1).shl(exp.unsigned_abs() as usize)),
            }
        };
        q.normalize();
        q
    }

    /// Restores the lowest-terms, positive-denominator invariant.
    pub(crate) fn normalize(&mut self) {
        debug_assert!(!self.den.is_zero());

        if self.den.is_negative() {
            self.num = -std::mem::take(&mut self.num);
            self.den = -std::mem::take(&mut self.den);
        }
        if self.num.is_zero() {
            self.den = BigInt::one();
            return;
        }

        let g = self.num.gcd(&self.den);
        if !g.is_one() {
            let (num, _) = self.num.magnitude().div_rem(g.magnitude());
            let (den, _) = self.den.magnitude().div_rem(g.magnitude());
            self.num = BigInt::from_limbs(self.num.is_negative(), num);
            self.den = BigInt::from_limbs(false, den);
        }
    }

    fn assign(&mut self, value: BigRational) -> &mut Self {
        *self = value;
        self
    }

    /// The numerator, carrying the sign of the value.
    pub fn numer(&self) -> &BigInt {
        &self.num
    }

    /// The denominator, always positive.
    pub fn denom(&self) -> &BigInt {
        &self.den
    }

    pub fn into_parts(self) -> (BigInt, BigInt) {
        (self.num, self.den)
    }

    pub fn set(&mut self, x: &BigRational) -> &mut Self {
        self.clone_from(x);
        self
    }

    pub fn set_int(&mut self, x: &BigInt) -> &mut Self {
        self.assign(Self::from_int(x))
    }

    pub fn set_i64(&mut self, x: i64) -> &mut Self {
        self.assign(Self::from_i64(x))
    }

    pub fn set_frac(&mut self, a: &BigInt, b: &BigInt) -> Result<&mut Self> {
        let q = Self::from_frac(a.clone(), b.clone())?;
        Ok(self.assign(q))
    }

    pub fn set_frac64(&mut self, a: i64, b: i64) -> Result<&mut Self> {
        let q = Self::from_frac64(a, b)?;
        Ok(self.assign(q))
    }

    pub fn set_f64(&mut self, x: f64) -> Result<&mut Self> {
        let q = Self::from_f64(x)?;
        Ok(self.assign(q))
    }

    pub fn set_float(&mut self, x: &BigFloat) -> &mut Self {
        self.assign(Self::from_float(x))
    }

    pub fn swap(&mut self, other: &mut BigRational) {
        std::mem::swap(self, other);
    }

    /// Resets to zero.
    pub fn clear(&mut self) {
        self.num.clear();
        self.den = BigInt::one();
    }

    pub fn sign(&self) -> Sign {
        self.num.sign()
    }

    pub fn signum(&self) -> i32 {
        self.num.signum()
    }

    pub fn is_zero(&self) -> bool {
        self.num.is_zero()
    }

    pub fn is_negative(&self) -> bool {
        self.num.is_negative()
    }

    /// Whether the denominator is 1.
    pub fn is_int(&self) -> bool {
        self.den.is_one()
    }

    pub fn set_add(&mut self, x: &BigRational, y: &BigRational) -> &mut Self {
        self.assign(add(x, y))
    }

    pub fn set_sub(&mut self, x: &BigRational, y: &BigRational) -> &mut Self {
        self.assign(sub(x, y))
    }

    pub fn set_mul(&mut self, x: &BigRational, y: &BigRational) -> &mut Self {
        self.assign(mul(x, y))
    }

    /// Sets `self` to `x / y`; a zero `y` is rejected.
    pub fn set_quo(&mut self, x: &BigRational, y: &BigRational) -> Result<&mut Self> {
        let q = quo(x, y)?;
        Ok(self.assign(q))
    }

    pub fn set_neg(&mut self, x: &BigRational) -> &mut Self {
        self.assign(BigRational {
            num: -&x.num,
            den: x.den.clone(),
        })
    }

    pub fn set_abs(&mut self, x: &BigRational) -> &mut Self {
        self.assign(BigRational {
            num: x.num.abs(),
            den: x.den.clone(),
        })
    }

    /// Sets `self` to `1 / x`; zero has no inverse.
    pub fn set_inv(&mut self, x: &BigRational) -> Result<&mut Self> {
        let q = Self::from_frac(x.den.clone(), x.num.clone())?;
        Ok(self.assign(q))
    }

    /// Sets `self` to `x * 2^s`.
    pub fn set_mul_2exp(&mut self, x: &BigRational, s: usize) -> &mut Self {
        let mut q = BigRational {
            num: x.num.clone() << s,
            den: x.den.clone(),
        };
        q.normalize();
        self.assign(q)
    }

    /// Sets `self` to `x / 2^s`.
    pub fn set_div_2exp(&mut self, x: &BigRational, s: usize) -> &mut Self {
        let mut q = BigRational {
            num: x.num.clone(),
            den: x.den.clone() << s,
        };
        q.normalize();
        self.assign(q)
    }

    /// Nearest-ish double: the quotient of the converted parts, rescaled first
    /// when either part overflows.
    pub fn to_f64(&self) -> f64 {
        let mut nume = self.num.to_f64();
        let mut deno = self.den.to_f64();

        if nume.is_infinite() || deno.is_infinite() {
            let nume_bitsize = self.num.bit_len() as isize;
            let deno_bitsize = self.den.bit_len() as isize;

            if nume.is_infinite() && deno.is_infinite() {
                let shift = (nume_bitsize.max(deno_bitsize) - 96).max(1) as usize;
                nume = (&self.num >> shift).to_f64();
                deno = (&self.den >> shift).to_f64();
            } else if deno.is_infinite() {
                let shift = (deno_bitsize - 96).max(1);
                nume = libm::ldexp(nume, -(shift as i32));
                deno = (&self.den >> shift as usize).to_f64();
            } else {
                let shift = (nume_bitsize - 96).max(1);
                nume = (&self.num >> shift as usize).to_f64();
                deno = libm::ldexp(deno, -(shift as i32));
            }
        }

        nume / deno
    }
}

fn add(x: &BigRational, y: &BigRational) -> BigRational {
    let mut q = BigRational {
        num: &x.num * &y.den + &y.num * &x.den,
        den: &x.den * &y.den,
    };
    q.normalize();
    q
}

fn sub(x: &BigRational, y: &BigRational) -> BigRational {
    let mut q = BigRational {
        num: &x.num * &y.den - &y.num * &x.den,
        den: &x.den * &y.den,
    };
    q.normalize();
    q
}

fn mul(x: &BigRational, y: &BigRational) -> BigRational {
    let mut q = BigRational {
        num: &x.num * &y.num,
        den: &x.den * &y.den,
    };
    q.normalize();
    q
}

fn quo(x: &BigRational, y: &BigRational) -> Result<BigRational> {
    if y.is_zero() {
        return Err(NumError::DivisionByZero);
    }
    BigRational::from_frac(&x.num * &y.den, &x.den * &y.num)
}

fn quo_or_panic(x: &BigRational, y: &BigRational) -> BigRational {
    match quo(x, y) {
        Ok(q) => q,
        Err(err) => panic!("{err}"),
    }
}

impl BigRational {
    /// Compares with `x / y` without building a rational; `y == 0` is
    /// `DivisionByZero`.
    pub fn cmp_frac_u64(&self, x: u64, y: u64) -> Result<Ordering> {
        self.cmp_frac(false, x, y)
    }

    /// Compares with `x / y`, the sign carried by `x`.
    pub fn cmp_frac_i64(&self, x: i64, y: u64) -> Result<Ordering> {
        self.cmp_frac(x < 0, x.unsigned_abs(), y)
    }

    fn cmp_frac(&self, negative: bool, x: u64, y: u64) -> Result<Ordering> {
        if y == 0 {
            return Err(NumError::DivisionByZero);
        }
        let other = Sign::of(negative, x == 0);
        Ok(signed_cmp(self.sign(), other, || {
            let lhs = self.num.magnitude().mul_digit(y);
            lhs.cmp(&self.den.magnitude().mul_digit(x))
        }))
    }
}

impl PartialOrd for BigRational {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for BigRational {
    fn cmp(&self, other: &Self) -> Ordering {
        if self.sign() != other.sign() {
            return self.sign().cmp(&other.sign());
        }
        (&self.num * &other.den).cmp(&(&other.num * &self.den))
    }
}

macro_rules! forward_rat_binop {
    ($imp:ident, $method:ident, $assign_imp:ident, $assign_method:ident, $func:path) => {
        impl $imp<&BigRational> for &BigRational {
            type Output = BigRational;

            fn $method(self, rhs: &BigRational) -> BigRational {
                $func(self, rhs)
            }
        }

        impl $imp<BigRational> for BigRational {
            type Output = BigRational;

            fn $method(self, rhs: BigRational) -> BigRational {
                $func(&self, &rhs)
            }
        }

        impl $imp<&BigRational> for BigRational {
            type Output = BigRational;

            fn $method(self, rhs: &BigRational) -> BigRational {
                $func(&self, rhs)
            }
        }

        impl $assign_imp<&BigRational> for BigRational {
            fn $assign_method(&mut self, rhs: &BigRational) {
                *self = $func(self, rhs);
            }
        }

        impl $assign_imp<BigRational> for BigRational {
            fn $assign_method(&mut self, rhs: BigRational) {
                *self = $func(self, &rhs);
            }
        }
    };
}

forward_rat_binop!(Add, add, AddAssign, add_assign, add);
forward_rat_binop!(Sub, sub, SubAssign, sub_assign, sub);
forward_rat_binop!(Mul, mul, MulAssign, mul_assign, mul);
forward_rat_binop!(Div, div, DivAssign, div_assign, quo_or_panic);

impl Neg for BigRational {
    type Output = BigRational;

    fn neg(self) -> BigRational {
        BigRational {
            num: -self.num,
            den: self.den,
        }
    }
}

impl Neg for &BigRational {
    type Output = BigRational;

    fn neg(self) -> BigRational {
        -self.clone()
    }
}

impl From<BigInt> for BigRational {
    fn from(value: BigInt) -> Self {
        BigRational {
            num: value,
            den: BigInt::one(),
        }
    }
}

impl From<i64> for BigRational {
    fn from(value: i64) -> Self {
        BigRational::from_i64(value)
    }
}

impl fmt::Debug for BigRational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.num, self.den)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rat(s: &str) -> BigRational {
        s.parse().unwrap()
    }

    #[test]
    fn zero_rational() {
        let x = BigRational::new();
        let y = BigRational::from_frac64(0, 42).unwrap();
        assert_eq!(x.cmp(&y), Ordering::Equal);
        assert_eq!(x.to_string(), "0/1");
        assert_eq!(x.rat_string(), "0");

        let mut z = BigRational::new();
        assert_eq!(z.set_add(&x, &y).rat_string(), "0");
        assert_eq!(z.set_sub(&x, &y).rat_string(), "0");
        assert_eq!(z.set_mul(&x, &y).rat_string(), "0");
        assert_eq!(z.set_quo(&x, &y).unwrap_err(), NumError::DivisionByZero);
    }

    #[test]
    fn frac64_normalizes() {
        let cases = [
            (1, 2, "1/2"),
            (1, -2, "-1/2"),
            (-1, 2, "-1/2"),
            (-1, -2, "1/2"),
            (2, 4, "1/2"),
        ];
        for (a, b, want) in cases {
            let q = BigRational::from_frac64(a, b).unwrap();
            assert_eq!(q.to_string(), want, "{a}/{b}");
            assert!(q.denom().is_positive());
        }
        assert_eq!(BigRational::from_frac64(1, -2).unwrap().denom(), &BigInt::from_i64(2));
        assert_eq!(
            BigRational::from_frac64(3, 0).unwrap_err(),
            NumError::DivisionByZero
        );
        assert_eq!(BigRational::from_u64_frac(6, 4).unwrap().to_string(), "3/2");
        assert_eq!(BigRational::from_i64(-1).to_string(), "-1/1");
    }

    #[test]
    fn comparisons() {
        let cases = [
            ("0", "0/1", 0),
            ("1/1", "1", 0),
            ("-1", "-2/2", 0),
            ("1", "0", 1),
            ("0/1", "1/1", -1),
            ("-5/1434770811533343057144", "-5/1434770811533343057145", -1),
            ("49832350382626108453/8964749413", "49832350382626108454/8964749413", -1),
            ("-37414950961700930/7204075375675961", "37414950961700930/7204075375675961", -1),
            ("37414950961700930/7204075375675961", "74829901923401860/14408150751351922", 0),
        ];
        for (a, b, want) in cases {
            let got = crate::sign::ordering_to_int(rat(a).cmp(&rat(b)));
            assert_eq!(got, want, "cmp({a}, {b})");
        }
    }

    #[test]
    fn machine_fractions() {
        let q = rat("-3/4");
        assert_eq!(q.cmp_frac_i64(-3, 4).unwrap(), Ordering::Equal);
        assert_eq!(q.cmp_frac_i64(-6, 8).unwrap(), Ordering::Equal);
        assert_eq!(q.cmp_frac_i64(-2, 3).unwrap(), Ordering::Less);
        assert_eq!(q.cmp_frac_i64(-4, 5).unwrap(), Ordering::Greater);
        assert_eq!(q.cmp_frac_u64(0, 7).unwrap(), Ordering::Less);

        let big = rat("18446744073709551617/2");
        assert_eq!(big.cmp_frac_u64(u64::MAX, 1).unwrap(), Ordering::Less);
        assert_eq!(big.cmp_frac_u64(u64::MAX, 2).unwrap(), Ordering::Greater);
        assert_eq!(BigRational::new().cmp_frac_i64(0, 5).unwrap(), Ordering::Equal);
        assert_eq!(q.cmp_frac_u64(1, 0).unwrap_err(), NumError::DivisionByZero);
    }

    #[test]
    fn binary_operations() {
        let cases = [
            ("0", "0", "0", "0"),
            ("0", "1", "1", "0"),
            ("-1", "0", "-1", "0"),
            ("-1", "1", "0", "-1"),
            ("1", "1", "2", "1"),
            ("1/2", "1/2", "1", "1/4"),
            ("1/4", "1/3", "7/12", "1/12"),
            ("2/5", "-14/3", "-64/15", "-28/15"),
            (
                "4707/49292519774798173060",
                "-3367/70976135186689855734",
                "84058377121001851123459/1749296273614329067191168098769082663020",
                "-1760941/388732505247628681598037355282018369560",
            ),
            (
                "-61204110018146728334/3",
                "-31052192278051565633/2",
                "-215564796870448153567/6",
                "950260896245257153059642991192710872711/3",
            ),
            (
                "-854857841473707320655/4237645934602118692642972629634714039",
                "-18/31750379913563777419",
                "-27/133467566250814981",
                "15387441146526731771790/134546868362786310073779084329032722548987800600710485341",
            ),
            (
                "1786597389946320496771/2066653520653241",
                "6269770/1992362624741777",
                "3559549865190272133656109052308126637/4117523232840525481453983149257",
                "8967230/3296219033",
            ),
        ];

        for (x, y, sum, prod) in cases {
            let (x, y, sum, prod) = (rat(x), rat(y), rat(sum), rat(prod));
            let mut z = BigRational::new();

            assert_eq!(z.set_add(&x, &y), &sum);
            assert_eq!(z.set_add(&y, &x), &sum);
            assert_eq!(z.set_sub(&sum, &x), &y);
            assert_eq!(z.set_sub(&sum, &y), &x);
            assert_eq!(z.set_mul(&x, &y), &prod);
            assert_eq!(z.set_mul(&y, &x), &prod);
            if !x.is_zero() {
                assert_eq!(z.set_quo(&prod, &x).unwrap(), &y);
            }
            if !y.is_zero() {
                assert_eq!(z.set_quo(&prod, &y).unwrap(), &x);
            }

            assert_eq!(&x + &y, sum);
            assert_eq!(&x * &y, prod);
        }
    }

    #[test]
    fn unary_and_power_of_two() {
        let x = rat("-3/4");
        let mut z = BigRational::new();
        assert_eq!(z.set_neg(&x).to_string(), "3/4");
        assert_eq!(z.set_abs(&x).to_string(), "3/4");
        assert_eq!(z.set_inv(&x).unwrap().to_string(), "-4/3");
        assert!(z.set_inv(&BigRational::new()).is_err());
        assert_eq!(z.set_mul_2exp(&x, 3).to_string(), "-6/1");
        assert_eq!(z.set_div_2exp(&x, 1).to_string(), "-3/8");
        assert!(rat("6/3").is_int());
        assert!(!x.is_int());
        assert_eq!(x.sign(), Sign::Negative);
        assert_eq!(-&x, rat("3/4"));
    }

    #[test]
    fn float_bridges() {
        assert_eq!(BigRational::from_f64(0.75).unwrap(), rat("3/4"));
        assert_eq!(BigRational::from_f64(-2.5).unwrap(), rat("-5/2"));
        assert_eq!(BigRational::from_f64(1e20).unwrap(), rat("100000000000000000000"));
        assert!(BigRational::from_f64(f64::INFINITY).is_err());

        assert_eq!(rat("1/3").to_f64(), 1.0 / 3.0);
        assert_eq!(rat("-7/2").to_f64(), -3.5);

        // Both parts overflow a double.
        let huge = BigInt::one() << 2000;
        let q = BigRational::from_frac(&huge + &BigInt::one(), huge << 1).unwrap();
        assert_eq!(q.to_f64(), 0.5);

        // Only the numerator overflows.
        let num = (BigInt::one() << 1100) + BigInt::one();
        let den = (BigInt::from_i64(3) << 100) + BigInt::one();
        let got = BigRational::from_frac(num, den).unwrap().to_f64();
        let want = 2f64.powi(1000) / 3.0;
        assert!((got / want - 1.0).abs() < 1e-12);
    }

    #[test]
    fn swap_and_clear() {
        let mut a = rat("1/2");
        let mut b = rat("-5");
        a.swap(&mut b);
        assert_eq!(a, rat("-5"));
        a.clear();
        assert!(a.is_zero() && a.denom().is_one());
        a.set(&b);
        assert_eq!(a, rat("1/2"));
    }
}
