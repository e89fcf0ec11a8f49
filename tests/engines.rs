use std::cmp::Ordering;

use capy_bignum::{BigFloat, BigInt, BigRational, NumError, Sign};

fn float(text: &str, prec: usize) -> BigFloat {
    let mut f = BigFloat::with_prec(prec);
    f.set_str(text, 10).unwrap();
    f
}

#[test]
fn factorial_through_every_engine() {
    let mut fact = BigInt::zero();
    fact.set_mul_range(1, 30);
    assert_eq!(fact.to_string(), "265252859812191058636308480000000");

    let q = BigRational::from_int(&fact);
    assert!(q.is_int());

    // 30! has 108 significant bits but 26 trailing zeros, so 82 bits hold it.
    let mut f = BigFloat::with_prec(82);
    f.set_rat(&q);
    assert_eq!(BigRational::from_float(&f), q);
    assert_eq!(f.to_string(), "26525285981219105863630848e7");

    let mut short = BigFloat::with_prec(20);
    short.set_int(&fact);
    assert_eq!(short.cmp(&f), Ordering::Less);
}

#[test]
fn rational_to_float_truncates() {
    let third = BigRational::from_frac64(-1, 3).unwrap();
    let mut f = BigFloat::with_prec(200);
    f.set_rat(&third);

    let back = BigRational::from_float(&f);
    assert!(back > third);
    assert_eq!(back.denom().bit_len(), 201);

    let mut three = BigFloat::with_prec(200);
    three.set_i64(-3);
    let mut product = BigFloat::with_prec(200);
    product.set_mul(&f, &three);
    assert_eq!(product.cmp_u64(1), Ordering::Less);
}

#[test]
fn doubles_agree_across_engines() {
    for value in [0.0, 1.0, -2.5, 1e-300, 6.02214076e23, f64::MAX, -f64::MIN_POSITIVE] {
        let q = BigRational::from_f64(value).unwrap();
        let f = BigFloat::from_f64(value).unwrap();
        assert_eq!(q.to_f64(), value, "{value}");
        assert_eq!(f.to_f64(), value, "{value}");
        assert_eq!(f.cmp_f64(value), Some(Ordering::Equal));
        assert_eq!(BigRational::from_float(&f), q);
    }
    assert!(BigRational::from_f64(f64::INFINITY).is_err());
}

#[test]
fn decimal_text_in_all_engines() {
    let q = BigRational::parse("2169378.417e-3").unwrap();
    assert_eq!(q.rat_string(), "2169378417/1000000");

    let f = float("2169378.417e-3", 128);
    assert_eq!(f.to_string_radix(10, 10).unwrap(), "2169.378417");

    let i: BigInt = "-0x1f".parse().unwrap();
    assert_eq!(i, -31i64);
    assert_eq!(float("-31", 64).to_i64(), i.to_i64());
}

#[test]
fn errors_are_reported_not_panicked() {
    let zero = BigInt::zero();
    assert_eq!(
        BigInt::quo_rem(&BigInt::one(), &zero).unwrap_err(),
        NumError::DivisionByZero
    );
    assert_eq!(
        BigRational::from_frac(BigInt::one(), zero).unwrap_err(),
        NumError::DivisionByZero
    );
    assert_eq!(
        BigFloat::with_prec(64)
            .set_quo(&float("1", 64), &BigFloat::with_prec(64))
            .unwrap_err(),
        NumError::DivisionByZero
    );

    let mut inv = BigInt::zero();
    assert_eq!(
        inv.set_mod_inverse(&BigInt::from_i64(4), &BigInt::from_i64(8))
            .unwrap_err(),
        NumError::NoInverse
    );
}

#[test]
fn signs_line_up() {
    assert_eq!(BigInt::from_i64(-5).sign(), Sign::Negative);
    assert_eq!(BigRational::from_frac64(1, -2).unwrap().sign(), Sign::Negative);
    assert_eq!(float("-0", 64).sign(), Sign::Zero);
    assert_eq!(float("0.5", 64).signum(), 1);
}
