//! Bridging between `f64` and sign/mantissa/exponent triples.

use crate::limbs::Limbs;

pub(crate) const IEXPT_2N52: i64 = 0x10000000000000;
pub(crate) const F64_MANT_BITS: usize = 53;

/// Splits a finite double into `(mantissa, exponent, sign)` with
/// `n = sign * mantissa * 2^exponent`. Zero decodes to a zero mantissa.
pub(crate) const fn decode_double(n: f64) -> (i64, i32, i32) {
    let bits = n.to_bits();
    let mant_bits = bits as i64 & (IEXPT_2N52 - 1);
    let sign_bits = (bits >> 63) as i32;
    let exp_bits = ((bits >> 52) & 0x7ff) as i32;
    let sign = if sign_bits != 0 { -1 } else { 1 };

    if n == 0.0 {
        return (0, 0, sign);
    }
    debug_assert!(exp_bits != 0x7ff);

    let exp = if exp_bits != 0 {
        exp_bits - 1023
    } else {
        -1022
    } - 52;
    let mant = if exp_bits != 0 {
        mant_bits | IEXPT_2N52
    } else {
        mant_bits
    };
    (mant, exp, sign)
}

/// `(-1)^negative * mant * 2^exp` as a double, truncating mantissa bits that
/// do not fit. Overflows to infinity.
pub(crate) fn compose_truncated(negative: bool, mant: &Limbs, exp: i64) -> f64 {
    let bits = mant.bit_len();
    if bits == 0 {
        return 0.0;
    }

    let (top, exp) = if bits > F64_MANT_BITS {
        let shift = bits - F64_MANT_BITS;
        (mant.shr(shift).low_u64(), exp.saturating_add(shift as i64))
    } else {
        (mant.low_u64(), exp)
    };

    let exp = exp.clamp(-4096, 4096) as i32;
    let value = libm::ldexp(top as f64, exp);
    if negative {
        -value
    } else {
        value
    }
}
