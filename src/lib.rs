#![allow(clippy::new_without_default, clippy::should_implement_trait)]

//! Multiple-precision integers, exact rationals and binary floats with a
//! configurable mantissa precision.
//!
//! All three types share one limb layer ([`limbs`]) and one error type
//! ([`NumError`]). Mutating operations follow the accumulator style:
//! `z.set_add(&x, &y)` overwrites `z` and returns it for chaining.

pub mod base;
pub mod config;
pub mod error;
pub mod float;
mod ieee;
pub mod int;
pub mod limbs;
pub mod rational;
pub mod sign;

pub use base::{Base, NumberToStringOptions};
pub use error::{NumError, ParseErrorKind, Result};
pub use float::BigFloat;
pub use int::BigInt;
pub use limbs::Limbs;
pub use rational::{BigRational, DenomMut, NumerMut};
pub use sign::Sign;
