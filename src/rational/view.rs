//! Mutable views into a rational's numerator and denominator.
//!
//! A view borrows the rational exclusively, so the owner cannot be read
//! through a stale view. The rational is brought back to lowest terms when
//! the view is dropped.

use std::ops::{Deref, DerefMut};

use super::BigRational;
use crate::error::{NumError, Result};
use crate::int::BigInt;

pub struct NumerMut<'a> {
    owner: &'a mut BigRational,
}

impl Deref for NumerMut<'_> {
    type Target = BigInt;

    fn deref(&self) -> &BigInt {
        &self.owner.num
    }
}

impl DerefMut for NumerMut<'_> {
    fn deref_mut(&mut self) -> &mut BigInt {
        &mut self.owner.num
    }
}

impl Drop for NumerMut<'_> {
    fn drop(&mut self) {
        self.owner.normalize();
    }
}

/// Writable denominator. Writing zero is undone when the view goes away:
/// [`DenomMut::finish`] reports it, a plain drop logs a warning.
pub struct DenomMut<'a> {
    owner: &'a mut BigRational,
    previous: BigInt,
}

impl DenomMut<'_> {
    /// Ends the edit, failing if the denominator was left at zero. The
    /// previous denominator is restored in that case.
    pub fn finish(mut self) -> Result<()> {
        if self.owner.den.is_zero() {
            self.owner.den = std::mem::take(&mut self.previous);
            return Err(NumError::DivisionByZero);
        }
        Ok(())
    }
}

impl Deref for DenomMut<'_> {
    type Target = BigInt;

    fn deref(&self) -> &BigInt {
        &self.owner.den
    }
}

impl DerefMut for DenomMut<'_> {
    fn deref_mut(&mut self) -> &mut BigInt {
        &mut self.owner.den
    }
}

impl Drop for DenomMut<'_> {
    fn drop(&mut self) {
        if self.owner.den.is_zero() {
            log::warn!(
                "zero denominator written through a view; keeping {}",
                self.previous
            );
            self.owner.den = std::mem::take(&mut self.previous);
        }
        self.owner.normalize();
    }
}

impl BigRational {
    /// Writable numerator; the value is renormalized when the view drops.
    pub fn numer_mut(&mut self) -> NumerMut<'_> {
        NumerMut { owner: self }
    }

    /// Writable denominator; the value is renormalized when the view drops.
    pub fn denom_mut(&mut self) -> DenomMut<'_> {
        let previous = self.den.clone();
        DenomMut {
            owner: self,
            previous,
        }
    }
}
