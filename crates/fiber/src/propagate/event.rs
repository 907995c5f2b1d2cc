use crate::Field;

/// Event emitted by the propagator after each longitudinal step.
///
/// Step 0 carries the input field at `z = 0`. Steps `1..=nz` carry the field
/// at `z = step * dz`, with the nonlinear phase brought level with `z`.
#[derive(Debug, Clone)]
pub struct Event {
    /// The step number (0 for the input).
    pub step: usize,

    /// Distance travelled along the fiber.
    pub z: f64,

    /// Time-domain field at `z`.
    pub field: Field,
}
