/// Configuration for [`integrate`](super::integrate).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Config {
    /// Use `|x[i+1] - x[i]|` as the step, so a decreasing axis still marches
    /// the state forward.
    pub abs_step: bool,
}
