use std::cmp::Ordering;

use super::{
    arith::{add, compare_digits, shl, shr},
    hiword, joinwords, loword, trim, trimmed, Digit, Digit2X, BASE, DIGIT_BIT,
};

/// Divides by a single word. Panics on a zero divisor.
pub(crate) fn div_rem_digit(words: &[Digit], divisor: Digit) -> (Vec<Digit>, Digit) {
    assert!(divisor != 0, "division by zero");

    let mut quotient = vec![0 as Digit; words.len()];
    let mut remainder: Digit2X = 0;

    for i in (0..words.len()).rev() {
        let dividend_part = joinwords(words[i], loword(remainder));
        quotient[i] = (dividend_part / divisor as Digit2X) as Digit;
        remainder = dividend_part % divisor as Digit2X;
    }

    trim(&mut quotient);
    (quotient, remainder as Digit)
}

/// Remainder by a single word.
pub(crate) fn rem_digit(words: &[Digit], divisor: Digit) -> Digit {
    let mut remainder: Digit2X = 0;
    for &word in words.iter().rev() {
        remainder = joinwords(word, loword(remainder)) % divisor as Digit2X;
    }
    remainder as Digit
}

/// Long division of normalized magnitudes (Knuth, TAOCP vol. 2, 4.3.1,
/// Algorithm D). Returns `(quotient, remainder)`. Panics on a zero divisor.
pub(crate) fn div_rem(u: &[Digit], v: &[Digit]) -> (Vec<Digit>, Vec<Digit>) {
    let (u, v) = (trimmed(u), trimmed(v));
    assert!(!v.is_empty(), "division by zero");

    if compare_digits(u, v) == Ordering::Less {
        return (Vec::new(), u.to_vec());
    }

    if v.len() == 1 {
        let (q, r) = div_rem_digit(u, v[0]);
        let mut r = vec![r];
        trim(&mut r);
        return (q, r);
    }

    // D1: scale so the top divisor word has its high bit set.
    let s = v[v.len() - 1].leading_zeros() as usize;
    let vn = shl(v, s);
    let mut un = shl(u, s);
    un.resize(u.len() + 1, 0);
    debug_assert_eq!(vn.len(), v.len());

    let n = vn.len();
    let m = un.len() - n;
    let mut q = vec![0 as Digit; m];
    let vtop = vn[n - 1] as Digit2X;
    let vnext = vn[n - 2] as Digit2X;

    for j in (0..m).rev() {
        // D3: estimate the quotient word from the top two remainder words.
        let num = joinwords(un[j + n - 1], un[j + n]);
        let mut qhat = num / vtop;
        let mut rhat = num % vtop;

        while qhat >= BASE || qhat * vnext > joinwords(un[j + n - 2], loword(rhat)) {
            qhat -= 1;
            rhat += vtop;
            if rhat >= BASE {
                break;
            }
        }

        // D4: multiply and subtract.
        let mut carry: Digit2X = 0;
        let mut borrow = false;
        for i in 0..n {
            let p = qhat * vn[i] as Digit2X + carry;
            carry = hiword(p) as Digit2X;
            let (t, b1) = un[i + j].overflowing_sub(loword(p));
            let (t, b2) = t.overflowing_sub(borrow as Digit);
            un[i + j] = t;
            borrow = b1 || b2;
        }
        let (t, b1) = un[j + n].overflowing_sub(loword(carry));
        let (t, b2) = t.overflowing_sub(borrow as Digit);
        un[j + n] = t;

        // D6: the estimate was one too large, add the divisor back.
        if b1 || b2 {
            qhat -= 1;
            let mut c: Digit2X = 0;
            for i in 0..n {
                let sum = un[i + j] as Digit2X + vn[i] as Digit2X + c;
                un[i + j] = loword(sum);
                c = hiword(sum) as Digit2X;
            }
            un[j + n] = un[j + n].wrapping_add(loword(c));
        }

        q[j] = qhat as Digit;
    }

    trim(&mut q);
    un.truncate(n);
    let r = shr(&un, s);
    (q, r)
}

/// Floor square root by Newton iteration.
pub(crate) fn isqrt(words: &[Digit]) -> Vec<Digit> {
    let words = trimmed(words);
    if words.is_empty() {
        return Vec::new();
    }

    let bits = (words.len() - 1) * DIGIT_BIT + (DIGIT_BIT - words[words.len() - 1].leading_zeros() as usize);
    // 2^ceil(bits/2) is never below the root.
    let mut x = shl(&[1], bits.div_ceil(2));
    loop {
        let (q, _) = div_rem(words, &x);
        let y = shr(&add(&x, &q), 1);
        if compare_digits(&y, &x) != Ordering::Less {
            return x;
        }
        x = y;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::limbs::mul;

    fn check(u: &[Digit], v: &[Digit]) {
        let (q, r) = div_rem(u, v);
        assert_eq!(compare_digits(&r, trimmed(v)), Ordering::Less);
        let mut back = mul(&q, v);
        back = add(&back, &r);
        trim(&mut back);
        assert_eq!(back, trimmed(u).to_vec());
    }

    #[test]
    fn single_word_division() {
        let (q, r) = div_rem_digit(&[5, 1], 2);
        assert_eq!(q, vec![(1 << 63) + 2]);
        assert_eq!(r, 1);
        assert_eq!(rem_digit(&[5, 1], 2), 1);
    }

    #[test]
    fn knuth_division_identities() {
        check(&[1, 2, 3, 4], &[5, 6]);
        check(&[u64::MAX, u64::MAX, u64::MAX], &[u64::MAX, 1]);
        check(&[0, 0, 1], &[1, 1]);
        check(&[7], &[1, 1]);
        check(&[3, 0, 1 << 63], &[u64::MAX, 1 << 63]);
    }

    #[test]
    fn knuth_step_d6_addback() {
        // Exercises the rare add-back path of Algorithm D.
        let u = [0, 0, 1 + (1 << 63), u64::MAX ^ (1 << 63)];
        let v = [5, 2 + (1 << 63), 1 << 63];
        let (q, _) = div_rem(&u, &v);
        assert_eq!(q, vec![18446744073709551613]);
        check(&u, &v);
    }

    #[test]
    fn integer_square_roots() {
        assert_eq!(isqrt(&[0]), Vec::<Digit>::new());
        assert_eq!(isqrt(&[1]), vec![1]);
        assert_eq!(isqrt(&[15]), vec![3]);
        assert_eq!(isqrt(&[16]), vec![4]);
        assert_eq!(isqrt(&[0, 1]), vec![1 << 32]);
        assert_eq!(isqrt(&[u64::MAX]), vec![u32::MAX as u64]);
    }
}
