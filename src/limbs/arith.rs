use std::cmp::Ordering;

use super::{hiword, loword, trim, trimmed, Digit, Digit2X, DIGIT_BIT};
use crate::config;

/// Compares two normalized magnitudes.
pub(crate) fn compare_digits(lhs: &[Digit], rhs: &[Digit]) -> Ordering {
    if lhs.len() != rhs.len() {
        return lhs.len().cmp(&rhs.len());
    }

    for i in (0..lhs.len()).rev() {
        if lhs[i] != rhs[i] {
            return lhs[i].cmp(&rhs[i]);
        }
    }

    Ordering::Equal
}

pub(crate) fn add(lhs: &[Digit], rhs: &[Digit]) -> Vec<Digit> {
    let (b1, b2) = if lhs.len() < rhs.len() {
        (rhs, lhs)
    } else {
        (lhs, rhs)
    };

    let mut result = Vec::with_capacity(b1.len() + 1);
    let mut sum: Digit2X = 0;
    for i in 0..b2.len() {
        sum += b1[i] as Digit2X;
        sum += b2[i] as Digit2X;
        result.push(loword(sum));
        sum = hiword(sum) as _;
    }

    for &word in &b1[b2.len()..] {
        sum += word as Digit2X;
        result.push(loword(sum));
        sum = hiword(sum) as _;
    }

    if sum > 0 {
        result.push(loword(sum));
    }

    result
}

/// `lhs - rhs`; `lhs` must not be smaller than `rhs`.
pub(crate) fn sub(lhs: &[Digit], rhs: &[Digit]) -> Vec<Digit> {
    let mut result = lhs.to_vec();
    sub_in_place(&mut result, rhs);
    result
}

/// `acc -= rhs`; `acc` must not be smaller than `rhs`.
pub(crate) fn sub_in_place(acc: &mut Vec<Digit>, rhs: &[Digit]) {
    let rhs = trimmed(rhs);
    debug_assert!(compare_digits(trimmed(acc), rhs) != Ordering::Less);

    let mut borrow = false;
    for i in 0..acc.len() {
        if i >= rhs.len() && !borrow {
            break;
        }
        let r = rhs.get(i).copied().unwrap_or(0);
        let (d, b1) = acc[i].overflowing_sub(r);
        let (d, b2) = d.overflowing_sub(borrow as Digit);
        acc[i] = d;
        borrow = b1 || b2;
    }
    debug_assert!(!borrow);
    trim(acc);
}

/// `acc += rhs * BASE^offset`, growing `acc` as needed.
pub(crate) fn add_at(acc: &mut Vec<Digit>, rhs: &[Digit], offset: usize) {
    if acc.len() < offset + rhs.len() {
        acc.resize(offset + rhs.len(), 0);
    }

    let mut carry: Digit2X = 0;
    let mut i = 0;
    while i < rhs.len() || carry > 0 {
        if offset + i == acc.len() {
            acc.push(0);
        }
        let sum = acc[offset + i] as Digit2X + rhs.get(i).copied().unwrap_or(0) as Digit2X + carry;
        acc[offset + i] = loword(sum);
        carry = hiword(sum) as Digit2X;
        i += 1;
    }
}

/// `acc = acc * digit + addend`.
pub(crate) fn mul_digit_add_in_place(acc: &mut Vec<Digit>, digit: Digit, addend: Digit) {
    let mut carry = addend as Digit2X;
    for word in acc.iter_mut() {
        let prod = *word as Digit2X * digit as Digit2X + carry;
        *word = loword(prod);
        carry = hiword(prod) as Digit2X;
    }
    if carry > 0 {
        acc.push(loword(carry));
    }
    trim(acc);
}

pub(crate) fn mul(lhs: &[Digit], rhs: &[Digit]) -> Vec<Digit> {
    let (lhs, rhs) = (trimmed(lhs), trimmed(rhs));
    if lhs.is_empty() || rhs.is_empty() {
        return Vec::new();
    }

    let threshold = config::karatsuba_threshold().max(config::MIN_KARATSUBA_THRESHOLD);
    if lhs.len().min(rhs.len()) >= threshold {
        log::trace!(
            "karatsuba multiply: {}x{} limbs (threshold {})",
            lhs.len(),
            rhs.len(),
            threshold
        );
        mul_karatsuba(lhs, rhs, threshold)
    } else {
        mul_simple(lhs, rhs)
    }
}

pub(crate) fn mul_simple(a: &[Digit], b: &[Digit]) -> Vec<Digit> {
    if a.is_empty() || b.is_empty() {
        return Vec::new();
    }

    let (b1, b2) = if a.len() < b.len() { (b, a) } else { (a, b) };

    let mut res = vec![0 as Digit; b1.len() + b2.len()];
    for i in 0..b2.len() {
        let mut sum: Digit2X = 0;

        for j in 0..b1.len() {
            let mult = b1[j] as Digit2X * b2[i] as Digit2X;
            sum += res[i + j] as Digit2X + mult;
            res[i + j] = loword(sum);
            sum = hiword(sum) as Digit2X;
        }

        res[i + b1.len()] = loword(sum);
    }

    trim(&mut res);
    res
}

/// Karatsuba multiplication, O(n^1.585).
///
/// Splits `a = a1 * B^half + a0` and `b = b1 * B^half + b0` and recombines
/// `z2 * B^(2*half) + z1 * B^half + z0` from three half-size products.
pub(crate) fn mul_karatsuba(a: &[Digit], b: &[Digit], threshold: usize) -> Vec<Digit> {
    let (a, b) = (trimmed(a), trimmed(b));
    if a.len().min(b.len()) < threshold {
        return mul_simple(a, b);
    }

    let half = a.len().max(b.len()).div_ceil(2);
    let (a0, a1) = split_at(a, half);
    let (b0, b1) = split_at(b, half);

    let z0 = mul_karatsuba(a0, b0, threshold);
    let z2 = mul_karatsuba(a1, b1, threshold);

    let a_sum = add(a0, a1);
    let b_sum = add(b0, b1);
    let mut z1 = mul_karatsuba(&a_sum, &b_sum, threshold);
    sub_in_place(&mut z1, &z0);
    sub_in_place(&mut z1, &z2);

    let mut result = z0;
    add_at(&mut result, &z1, half);
    add_at(&mut result, &z2, 2 * half);
    trim(&mut result);
    result
}

fn split_at(words: &[Digit], n: usize) -> (&[Digit], &[Digit]) {
    let n = n.min(words.len());
    let (low, high) = words.split_at(n);
    (trimmed(low), high)
}

/// `words << shift`.
pub(crate) fn shl(words: &[Digit], shift: usize) -> Vec<Digit> {
    let words = trimmed(words);
    if words.is_empty() {
        return Vec::new();
    }

    let swords = shift / DIGIT_BIT;
    let sbits = shift % DIGIT_BIT;

    let mut res = vec![0; swords];
    res.reserve(words.len() + 1);

    if sbits == 0 {
        res.extend_from_slice(words);
        return res;
    }

    let mut carry: Digit = 0;
    for &word in words {
        res.push((word << sbits) | carry);
        carry = word >> (DIGIT_BIT - sbits);
    }

    if carry > 0 {
        res.push(carry);
    }

    res
}

/// `words >> shift`, discarding shifted-out bits.
pub(crate) fn shr(words: &[Digit], shift: usize) -> Vec<Digit> {
    let words = trimmed(words);
    let swords = shift / DIGIT_BIT;
    let sbits = shift % DIGIT_BIT;

    if swords >= words.len() {
        return Vec::new();
    }

    let src = &words[swords..];
    if sbits == 0 {
        return src.to_vec();
    }

    let mut res = Vec::with_capacity(src.len());
    for i in 0..src.len() {
        let high = src.get(i + 1).map_or(0, |w| w << (DIGIT_BIT - sbits));
        res.push((src[i] >> sbits) | high);
    }

    trim(&mut res);
    res
}

/// Whether any of the lowest `bits` bits of `words` is set.
pub(crate) fn any_low_bits(words: &[Digit], bits: usize) -> bool {
    let swords = bits / DIGIT_BIT;
    let sbits = bits % DIGIT_BIT;

    if words.iter().take(swords).any(|&w| w != 0) {
        return true;
    }

    sbits > 0 && words.get(swords).is_some_and(|w| w & ((1 << sbits) - 1) != 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_carries_into_new_word() {
        assert_eq!(add(&[u64::MAX], &[1]), vec![0, 1]);
        assert_eq!(add(&[u64::MAX, u64::MAX], &[1]), vec![0, 0, 1]);
        assert_eq!(add(&[], &[5]), vec![5]);
    }

    #[test]
    fn sub_borrows_across_words() {
        assert_eq!(sub(&[0, 1], &[1]), vec![u64::MAX]);
        assert_eq!(sub(&[0, 0, 1], &[1]), vec![u64::MAX, u64::MAX]);
        assert!(sub(&[7, 3], &[7, 3]).is_empty());
    }

    #[test]
    fn karatsuba_matches_schoolbook() {
        let mut state = 0x9e3779b97f4a7c15u64;
        let mut next = || {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            state
        };

        for (la, lb) in [(4, 4), (9, 4), (17, 16), (40, 33), (64, 5)] {
            let a: Vec<Digit> = (0..la).map(|_| next()).collect();
            let b: Vec<Digit> = (0..lb).map(|_| next()).collect();
            assert_eq!(mul_karatsuba(&a, &b, 4), mul_simple(&a, &b), "{la}x{lb}");
        }

        let max = vec![u64::MAX; 12];
        assert_eq!(mul_karatsuba(&max, &max, 4), mul_simple(&max, &max));
    }

    #[test]
    fn shifts() {
        assert_eq!(shl(&[1], 64), vec![0, 1]);
        assert_eq!(shl(&[1 << 63], 1), vec![0, 1]);
        assert_eq!(shr(&[0, 1], 1), vec![1 << 63]);
        assert_eq!(shr(&[0, 1], 65), Vec::<Digit>::new());
        assert_eq!(shr(&[5], 200), Vec::<Digit>::new());
        assert!(any_low_bits(&[0, 2], 66));
        assert!(!any_low_bits(&[0, 4], 66));
    }

    #[test]
    fn mul_digit_add() {
        let mut acc = vec![u64::MAX];
        mul_digit_add_in_place(&mut acc, 2, 3);
        assert_eq!(acc, vec![1, 2]);
    }
}
