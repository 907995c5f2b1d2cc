/// A trait for states that can be stepped using their derivative.
///
/// Implementing this trait lets a fixed-step integrator advance a state via
/// `state + derivative * delta`, where the derivative is taken with respect to
/// `Delta`. For the amplifier model `Delta` is time; for other uses it may be
/// any independent variable (position along a fiber, for instance).
pub trait StepIntegrable<Delta> {
    /// The derivative of the state with respect to `Delta`.
    type Derivative;

    /// Returns the state after stepping with a derivative and step size.
    #[must_use]
    fn step(&self, derivative: Self::Derivative, delta: Delta) -> Self;
}

/// Type alias for the derivative of a [`StepIntegrable`] type.
pub type DerivativeOf<T, Delta> = <T as StepIntegrable<Delta>>::Derivative;

/// Plain scalars integrate against a scalar independent variable.
impl StepIntegrable<f64> for f64 {
    type Derivative = f64;

    fn step(&self, derivative: f64, delta: f64) -> Self {
        self + derivative * delta
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    #[derive(Debug, PartialEq)]
    struct Energy(f64);
    struct Power(f64);

    impl StepIntegrable<f64> for Energy {
        type Derivative = Power;

        fn step(&self, derivative: Power, delta: f64) -> Self {
            Energy(self.0 + derivative.0 * delta)
        }
    }

    #[test]
    fn step_scalar() {
        let next = 1.5_f64.step(-2.0, 0.25);
        assert_relative_eq!(next, 1.0);
    }

    #[test]
    fn step_newtype_state() {
        let next = Energy(1e-9).step(Power(1e-6), 1e-3);
        assert_relative_eq!(next.0, 2e-9);
    }
}
