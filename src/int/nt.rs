//! Exponentiation, greatest common divisors, modular inverses and primality.

use rand::Rng;

use super::arith::{minus, mod_positive, times};
use super::BigInt;
use crate::error::{NumError, Result};
use crate::limbs::{self, Digit, Limbs, DIGIT_BIT};

const SMALL_PRIMES: [Digit; 15] = [2, 3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47];

fn pow(x: &BigInt, exp: u64) -> BigInt {
    let (mut expo, mut radix) = (exp, x.mag.clone());
    let mut res = Limbs::from_u64(1);

    while expo != 0 {
        if expo & 1 != 0 {
            res = res.mul(&radix);
        }
        expo /= 2;
        if expo != 0 {
            radix = radix.mul(&radix);
        }
    }

    BigInt::from_limbs(x.is_negative() && exp & 1 != 0, res)
}

/// `base^exp mod m` for a non-zero modulus, left-to-right binary method.
fn mod_pow(base: &Limbs, exp: &Limbs, m: &Limbs) -> Limbs {
    if m.is_one() {
        return Limbs::new();
    }

    let base = base.div_rem(m).1;
    let mut result = Limbs::from_u64(1);
    for i in (0..exp.bit_len()).rev() {
        result = result.mul(&result).div_rem(m).1;
        if exp.bit(i) {
            result = result.mul(&base).div_rem(m).1;
        }
    }
    result
}

/// Extended Euclid on non-negative operands: `(d, x, y)` with `d = a*x + b*y`.
fn ext_gcd(a: &BigInt, b: &BigInt) -> (BigInt, BigInt, BigInt) {
    let (mut old_r, mut r) = (a.abs_ref(), b.abs_ref());
    let (mut old_s, mut s) = (BigInt::one(), BigInt::zero());
    let (mut old_t, mut t) = (BigInt::zero(), BigInt::one());

    while !r.is_zero() {
        let (q, rem) = old_r.mag.div_rem(&r.mag);
        let q = BigInt::from_limbs(false, q);

        old_r = std::mem::replace(&mut r, BigInt::from_limbs(false, rem));
        let next_s = minus(&old_s, &times(&q, &s));
        old_s = std::mem::replace(&mut s, next_s);
        let next_t = minus(&old_t, &times(&q, &t));
        old_t = std::mem::replace(&mut t, next_t);
    }

    (old_r, old_s, old_t)
}

/// Inverse of `g` modulo `m`, both given as magnitudes with `g < m`.
fn inverse_mod(g: &Limbs, m: &Limbs) -> Result<Limbs> {
    let (d, x, _) = ext_gcd(
        &BigInt::from_limbs(false, g.clone()),
        &BigInt::from_limbs(false, m.clone()),
    );
    if !d.is_one() {
        return Err(NumError::NoInverse);
    }
    Ok(mod_positive(&x, m))
}

/// Uniformly random value in `[0, bound)`; `bound` must be non-zero.
fn random_below<R: Rng + ?Sized>(rng: &mut R, bound: &Limbs) -> Limbs {
    let bits = bound.bit_len();
    loop {
        let mut words = vec![0 as Digit; bits.div_ceil(DIGIT_BIT)];
        rng.fill(&mut words[..]);
        let candidate = Limbs::from_vec(words).low_bits(bits);
        if candidate < *bound {
            return candidate;
        }
    }
}

struct MillerRabin<'a> {
    n: &'a Limbs,
    n_minus_1: Limbs,
    odd_part: Limbs,
    twos: usize,
}

impl<'a> MillerRabin<'a> {
    fn new(n: &'a Limbs) -> Self {
        let n_minus_1 = n.sub(&Limbs::from_u64(1));
        let twos = n_minus_1.trailing_zeros().unwrap_or(0);
        let odd_part = n_minus_1.shr(twos);
        MillerRabin {
            n,
            n_minus_1,
            odd_part,
            twos,
        }
    }

    /// Whether `a` proves `n` composite.
    fn is_witness(&self, a: &Limbs) -> bool {
        let mut y = mod_pow(a, &self.odd_part, self.n);
        if y.is_one() || y == self.n_minus_1 {
            return false;
        }

        for _ in 1..self.twos {
            y = y.mul(&y).div_rem(self.n).1;
            if y == self.n_minus_1 {
                return false;
            }
            if y.is_one() {
                return true;
            }
        }
        true
    }
}

impl BigInt {
    /// Sets `self` to `x^y`, or `x^y mod |m|` when a non-zero modulus is given.
    ///
    /// Without a modulus a negative exponent yields 1 and the exponent must
    /// fit in a `u64`. With a modulus the result lies in `[0, |m|)` and a
    /// negative exponent raises the inverse of `x`.
    pub fn set_exp(&mut self, x: &BigInt, y: &BigInt, m: Option<&BigInt>) -> Result<&mut Self> {
        let value = match m.filter(|m| !m.is_zero()) {
            None if y.is_negative() => BigInt::one(),
            None => {
                let exp = y
                    .try_to_u64()
                    .ok_or_else(|| NumError::invalid(format!("exponent {y} is too large")))?;
                pow(x, exp)
            }
            Some(m) => {
                let mut base = mod_positive(x, &m.mag);
                if y.is_negative() {
                    base = inverse_mod(&base, &m.mag)?;
                }
                BigInt::from_limbs(false, mod_pow(&base, &y.mag, &m.mag))
            }
        };
        Ok(self.assign(value))
    }

    /// Raises `self` to a machine-sized power.
    pub fn pow(&self, exp: u64) -> BigInt {
        pow(self, exp)
    }

    /// Sets `self` to `gcd(a, b)` and, when requested, the Bézout
    /// coefficients with `gcd = a*x + b*y`.
    ///
    /// Only defined for positive operands; otherwise `self`, `x` and `y` are
    /// all set to zero.
    pub fn set_gcd(
        &mut self,
        x: Option<&mut BigInt>,
        y: Option<&mut BigInt>,
        a: &BigInt,
        b: &BigInt,
    ) -> &mut Self {
        let (d, s, t) = if a.is_positive() && b.is_positive() {
            ext_gcd(a, b)
        } else {
            (BigInt::zero(), BigInt::zero(), BigInt::zero())
        };

        if let Some(x) = x {
            *x = s;
        }
        if let Some(y) = y {
            *y = t;
        }
        self.assign(d)
    }

    /// Non-negative greatest common divisor; `gcd(0, 0) == 0`.
    pub fn gcd(&self, other: &BigInt) -> BigInt {
        let mut a = self.mag.clone();
        let mut b = other.mag.clone();
        while !b.is_zero() {
            let r = a.div_rem(&b).1;
            a = std::mem::replace(&mut b, r);
        }
        BigInt::from_limbs(false, a)
    }

    /// Sets `self` to the inverse of `g` modulo `p`, in `[0, |p|)`.
    pub fn set_mod_inverse(&mut self, g: &BigInt, p: &BigInt) -> Result<&mut Self> {
        if p.is_zero() {
            return Err(NumError::DivisionByZero);
        }
        let g = mod_positive(g, &p.mag);
        let inverse = inverse_mod(&g, &p.mag)?;
        Ok(self.assign(BigInt::from_limbs(false, inverse)))
    }

    /// Floor square root; negative input is rejected.
    pub fn set_sqrt(&mut self, a: &BigInt) -> Result<&mut Self> {
        if a.is_negative() {
            return Err(NumError::invalid("square root of a negative integer"));
        }
        Ok(self.assign(BigInt::from_limbs(false, a.mag.sqrt())))
    }

    /// Miller-Rabin test with `reps` random bases after trial division and a
    /// base-2 round. `false` is always right; a composite passes with
    /// probability at most `4^-reps`. Values below 2 are not prime.
    pub fn probably_prime(&self, reps: u32) -> bool {
        self.probably_prime_with(reps, &mut rand::rng())
    }

    /// [`BigInt::probably_prime`] drawing bases from `rng`.
    pub fn probably_prime_with<R: Rng + ?Sized>(&self, reps: u32, rng: &mut R) -> bool {
        if !self.is_positive() {
            return false;
        }

        let n = &self.mag;
        if let Some(small) = n.to_u64() {
            if small < 2 {
                return false;
            }
            if SMALL_PRIMES.contains(&small) {
                return true;
            }
        }
        if SMALL_PRIMES
            .iter()
            .any(|&p| limbs::rem_digit(n.words(), p) == 0)
        {
            return false;
        }

        let test = MillerRabin::new(n);
        if test.is_witness(&Limbs::from_u64(2)) {
            return false;
        }

        // Bases are drawn from [2, n-2].
        let span = n.sub(&Limbs::from_u64(3));
        for round in 0..reps {
            let a = random_below(rng, &span).add_digit(2);
            if test.is_witness(&a) {
                log::trace!("composite witness {:?} found in round {}", a, round);
                return false;
            }
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;

    fn int(s: &str) -> BigInt {
        s.parse().unwrap()
    }

    #[test]
    fn exp_without_modulus() {
        let cases: [(i64, i64, i64); 5] = [(5, -7, 1), (-5, -7, 1), (5, 0, 1), (-5, 1, -5), (-2, 3, -8)];
        let mut z = BigInt::zero();
        for (x, y, want) in cases {
            z.set_exp(&BigInt::from_i64(x), &BigInt::from_i64(y), None).unwrap();
            assert_eq!(z, want, "{x}^{y}");
        }

        z.set_exp(&BigInt::from_u64(0x8000000000000000), &BigInt::from_i64(2), None)
            .unwrap();
        assert_eq!(z, int("0x40000000000000000000000000000000"));

        let huge = BigInt::from_u128(1 << 64);
        assert!(z.set_exp(&BigInt::from_i64(2), &huge, None).is_err());

        z.set_exp(&BigInt::from_i64(7), &BigInt::from_i64(3), Some(&BigInt::zero()))
            .unwrap();
        assert_eq!(z, 343);
    }

    #[test]
    fn exp_with_modulus() {
        let cases: &[(&str, &str, &str, &str)] = &[
            ("-2", "3", "2", "0"),
            ("1", "65537", "2", "1"),
            ("0x8000000000000000", "2", "6719", "4944"),
            ("0x8000000000000000", "3", "6719", "5447"),
            ("0x8000000000000000", "1000", "6719", "1603"),
            ("0x8000000000000000", "1000000", "6719", "3199"),
            ("5", "0", "1", "0"),
            ("-5", "3", "7", "1"),
            (
                "2938462938472983472983659726349017249287491026512746239764525612965293865296239471239874193284792387498274256129746192347",
                "298472983472983471903246121093472394872319615612417471234712061",
                "29834729834729834729347290846729561262544958723956495615629569234729836259263598127342374289365912465901365498236492183464",
                "23537740700184054162508175125554701713153216681790245129157191391322321508055833908509185839069455749219131480588829346291",
            ),
        ];

        let mut z = BigInt::zero();
        for &(x, y, m, want) in cases {
            z.set_exp(&int(x), &int(y), Some(&int(m))).unwrap();
            assert_eq!(z, int(want), "{x}^{y} mod {m}");
        }
    }

    #[test]
    fn exp_negative_with_modulus_uses_inverse() {
        let mut z = BigInt::zero();
        z.set_exp(&BigInt::from_i64(3), &BigInt::from_i64(-1), Some(&BigInt::from_i64(7)))
            .unwrap();
        assert_eq!(z, 5);

        z.set_exp(&BigInt::from_i64(3), &BigInt::from_i64(-2), Some(&BigInt::from_i64(-7)))
            .unwrap();
        assert_eq!(z, 4);

        let err = z
            .set_exp(&BigInt::from_i64(2), &BigInt::from_i64(-1), Some(&BigInt::from_i64(4)))
            .unwrap_err();
        assert_eq!(err, NumError::NoInverse);
    }

    #[test]
    fn extended_gcd() {
        let cases: &[(&str, &str, &str, &str, &str)] = &[
            ("0", "0", "0", "0", "0"),
            ("0", "0", "0", "0", "7"),
            ("0", "0", "0", "11", "0"),
            ("0", "0", "0", "-77", "35"),
            ("0", "0", "0", "64515", "-24310"),
            ("0", "0", "0", "-64515", "-24310"),
            ("1", "-9", "47", "120", "23"),
            ("7", "1", "-2", "77", "35"),
            ("935", "-3", "8", "64515", "24310"),
            (
                "935000000000000000",
                "-3",
                "8",
                "64515000000000000000",
                "24310000000000000000",
            ),
            (
                "1",
                "-221",
                "22059940471369027483332068679400581064239780177629666810348940098015901108344",
                "98920366548084643601728869055592650835572950932266967461790948584315647051443",
                "991",
            ),
        ];

        for &(d, x, y, a, b) in cases {
            let (a, b) = (int(a), int(b));
            let (mut gx, mut gy) = (BigInt::from_i64(99), BigInt::from_i64(99));
            let mut gd = BigInt::zero();
            gd.set_gcd(Some(&mut gx), Some(&mut gy), &a, &b);
            assert_eq!(gd, int(d), "gcd({a}, {b})");
            assert_eq!(gx, int(x), "x for ({a}, {b})");
            assert_eq!(gy, int(y), "y for ({a}, {b})");

            let mut only_d = BigInt::zero();
            only_d.set_gcd(None, None, &a, &b);
            assert_eq!(only_d, gd);
        }
    }

    #[test]
    fn plain_gcd() {
        assert_eq!(BigInt::from_i64(-12).gcd(&BigInt::from_i64(18)), 6);
        assert_eq!(BigInt::zero().gcd(&BigInt::from_i64(-5)), 5);
        assert!(BigInt::zero().gcd(&BigInt::zero()).is_zero());
    }

    #[test]
    fn mod_inverse() {
        let cases = [
            ("1", "7"),
            ("1", "13"),
            ("239487239847", "2410312426921032588552076022197566074856950548502459942654116941958108831682612228890093858261341614673227141477904012196503648957050582631942730706805009223062734745341073406696246014589361659774041027169249453200378729434170325843778659198143763193776859869524088940195577346119843545301547043747207749969763750084308926339295559968882457872412993810129130294592999947926365264059284647209730384947211681434464714438488520940127459844288859336526896320919633919"),
            ("-10", "13"),
        ];

        for (g, p) in cases {
            let (g, p) = (int(g), int(p));
            let mut inv = BigInt::zero();
            inv.set_mod_inverse(&g, &p).unwrap();
            assert!(!inv.is_negative() && inv < p);

            let mut check = BigInt::zero();
            check.set_mul(&g, &inv);
            check.set_mod(&check.clone(), &p).unwrap();
            assert_eq!(check, 1, "{g}^-1 mod {p}");
        }

        let mut z = BigInt::zero();
        assert_eq!(
            z.set_mod_inverse(&BigInt::from_i64(6), &BigInt::from_i64(9)).unwrap_err(),
            NumError::NoInverse
        );
        assert_eq!(
            z.set_mod_inverse(&BigInt::from_i64(6), &BigInt::zero()).unwrap_err(),
            NumError::DivisionByZero
        );
    }

    #[test]
    fn square_roots() {
        let mut z = BigInt::zero();
        z.set_sqrt(&int("340282366920938463463374607431768211456")).unwrap();
        assert_eq!(z, BigInt::from_u128(1 << 64));
        z.set_sqrt(&BigInt::from_i64(99)).unwrap();
        assert_eq!(z, 9);
        assert!(z.set_sqrt(&BigInt::from_i64(-4)).is_err());
    }

    const PRIMES: &[&str] = &[
        "2",
        "3",
        "5",
        "7",
        "11",
        "13756265695458089029",
        "13496181268022124907",
        "10953742525620032441",
        "17908251027575790097",
        "18699199384836356663",
        "98920366548084643601728869055592650835572950932266967461790948584315647051443",
        "94560208308847015747498523884063394671606671904944666360068158221458669711639",
    ];

    const COMPOSITES: &[&str] = &[
        "0",
        "1",
        "-7",
        "21284175091214687912771199898307297748211672914763848041968395774954376176754",
        "6084766654921918907427900243509372380954290099172559290432744450051395395951",
        "84594350493221918389213352992032324280367711247940675652888030554255915464401",
        "82793403787388584738507275144194252681",
    ];

    #[test]
    fn probable_primes() {
        let _ = env_logger::builder().is_test(true).try_init();
        let mut rng = StdRng::seed_from_u64(0x5eed);

        for p in PRIMES {
            assert!(int(p).probably_prime_with(20, &mut rng), "{p} should be prime");
        }
        for c in COMPOSITES {
            assert!(!int(c).probably_prime_with(20, &mut rng), "{c} should be composite");
        }
        assert!(BigInt::from_u64(1_000_000_007).probably_prime(10));
    }
}
