use std::cmp::Ordering;
use std::ops::{Mul, Neg};

#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug, Hash, Default)]
pub enum Sign {
    Negative,
    #[default]
    Zero,
    Positive,
}

impl Sign {
    pub fn flip(&self) -> Sign {
        match self {
            Sign::Negative => Sign::Positive,
            Sign::Zero => Sign::Zero,
            Sign::Positive => Sign::Negative,
        }
    }

    pub fn is_zero(&self) -> bool {
        matches!(self, Sign::Zero)
    }

    pub fn is_positive(&self) -> bool {
        matches!(self, Sign::Positive)
    }

    pub fn is_negative(&self) -> bool {
        matches!(self, Sign::Negative)
    }

    /// `-1`, `0` or `+1`.
    pub fn signum(&self) -> i32 {
        match self {
            Sign::Negative => -1,
            Sign::Zero => 0,
            Sign::Positive => 1,
        }
    }

    /// Sign of a non-empty magnitude, or `Zero` when `zero` is set.
    pub(crate) fn of(negative: bool, zero: bool) -> Sign {
        if zero {
            Sign::Zero
        } else if negative {
            Sign::Negative
        } else {
            Sign::Positive
        }
    }
}

impl Neg for Sign {
    type Output = Sign;

    fn neg(self) -> Sign {
        self.flip()
    }
}

impl Mul for Sign {
    type Output = Sign;

    fn mul(self, rhs: Sign) -> Sign {
        match (self, rhs) {
            (Sign::Zero, _) | (_, Sign::Zero) => Sign::Zero,
            (a, b) if a == b => Sign::Positive,
            _ => Sign::Negative,
        }
    }
}

/// Maps an ordering to the `-1/0/+1` convention.
pub fn ordering_to_int(ord: Ordering) -> i32 {
    match ord {
        Ordering::Less => -1,
        Ordering::Equal => 0,
        Ordering::Greater => 1,
    }
}

/// Orders two signed magnitudes given the ordering of their absolute values.
pub(crate) fn signed_cmp(lhs: Sign, rhs: Sign, abs: impl FnOnce() -> Ordering) -> Ordering {
    if lhs != rhs {
        return lhs.cmp(&rhs);
    }
    match lhs {
        Sign::Zero => Ordering::Equal,
        Sign::Positive => abs(),
        Sign::Negative => abs().reverse(),
    }
}
