//! Numeric invariants checked once at construction.
//!
//! Physical parameters in both engines carry simple invariants: a fiber
//! length is never negative, a lifetime is strictly positive, a loss
//! coefficient is at least a real number. Wrapping a value in
//! [`Constrained<T, C>`] checks the invariant once, after which the value can
//! be trusted everywhere it flows.
//!
//! # Provided Constraints
//!
//! - [`Finite`]: Not NaN and not infinite
//! - [`NonNegative`]: Finite and zero or greater
//! - [`StrictlyPositive`]: Finite and greater than zero
//!
//! Custom invariants are added by implementing [`Constraint<T>`] for a
//! zero-sized marker type.

use std::marker::PhantomData;

use num_traits::Float;
use thiserror::Error;

/// A trait for enforcing numeric invariants at construction time.
pub trait Constraint<T> {
    /// Checks that the given value satisfies this constraint.
    ///
    /// # Errors
    ///
    /// Returns a [`ConstraintError`] if the value does not satisfy the constraint.
    fn check(value: &T) -> Result<(), ConstraintError>;
}

/// An error returned when a [`Constraint`] is violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ConstraintError {
    #[error("value must not be negative")]
    Negative,
    #[error("value must not be zero")]
    Zero,
    #[error("value is not a number")]
    NotANumber,
    #[error("value is infinite")]
    Infinite,
}

/// A wrapper enforcing a numeric constraint at construction time.
///
/// # Example
///
/// ```
/// use lightwave_core::constraint::{Constrained, StrictlyPositive};
///
/// let tau = Constrained::<f64, StrictlyPositive>::new(300e-6).unwrap();
/// assert_eq!(tau.into_inner(), 300e-6);
///
/// assert!(Constrained::<f64, StrictlyPositive>::new(0.0).is_err());
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd)]
pub struct Constrained<T, C: Constraint<T>> {
    value: T,
    _marker: PhantomData<C>,
}

impl<T, C: Constraint<T>> Constrained<T, C> {
    /// Constructs a new constrained value.
    ///
    /// # Errors
    ///
    /// Returns an error if the value does not satisfy the constraint.
    pub fn new(value: T) -> Result<Self, ConstraintError> {
        C::check(&value)?;
        Ok(Self {
            value,
            _marker: PhantomData,
        })
    }

    /// Consumes the wrapper and returns the inner value.
    pub fn into_inner(self) -> T {
        self.value
    }
}

impl<T: Copy, C: Constraint<T>> Constrained<T, C> {
    /// Returns a copy of the inner value.
    #[must_use]
    pub fn get(&self) -> T {
        self.value
    }
}

impl<T, C: Constraint<T>> AsRef<T> for Constrained<T, C> {
    fn as_ref(&self) -> &T {
        &self.value
    }
}

/// Marker for values that are neither NaN nor infinite.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Finite;

/// Marker for finite values greater than or equal to zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct NonNegative;

/// Marker for finite values strictly greater than zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct StrictlyPositive;

impl<T: Float> Constraint<T> for Finite {
    fn check(value: &T) -> Result<(), ConstraintError> {
        if value.is_nan() {
            Err(ConstraintError::NotANumber)
        } else if value.is_infinite() {
            Err(ConstraintError::Infinite)
        } else {
            Ok(())
        }
    }
}

impl<T: Float> Constraint<T> for NonNegative {
    fn check(value: &T) -> Result<(), ConstraintError> {
        Finite::check(value)?;
        if *value < T::zero() {
            Err(ConstraintError::Negative)
        } else {
            Ok(())
        }
    }
}

impl<T: Float> Constraint<T> for StrictlyPositive {
    fn check(value: &T) -> Result<(), ConstraintError> {
        NonNegative::check(value)?;
        if value.is_zero() {
            Err(ConstraintError::Zero)
        } else {
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finite_rejects_nan_and_infinity() {
        assert!(Constrained::<f64, Finite>::new(-3.5).is_ok());
        assert_eq!(
            Constrained::<f64, Finite>::new(f64::NAN),
            Err(ConstraintError::NotANumber)
        );
        assert_eq!(
            Constrained::<f64, Finite>::new(f64::NEG_INFINITY),
            Err(ConstraintError::Infinite)
        );
    }

    #[test]
    fn non_negative_accepts_zero() {
        let zero = Constrained::<f64, NonNegative>::new(0.0).unwrap();
        assert_eq!(zero.get(), 0.0);
        assert_eq!(
            Constrained::<f64, NonNegative>::new(-1e-12),
            Err(ConstraintError::Negative)
        );
    }

    #[test]
    fn strictly_positive_rejects_zero() {
        assert_eq!(
            Constrained::<f64, StrictlyPositive>::new(0.0),
            Err(ConstraintError::Zero)
        );
        assert_eq!(
            Constrained::<f64, StrictlyPositive>::new(-2.0),
            Err(ConstraintError::Negative)
        );
        assert_eq!(
            Constrained::<f32, StrictlyPositive>::new(f32::INFINITY),
            Err(ConstraintError::Infinite)
        );

        let x = Constrained::<f64, StrictlyPositive>::new(1.6).unwrap();
        assert_eq!(*x.as_ref(), 1.6);
        assert_eq!(x.into_inner(), 1.6);
    }
}
