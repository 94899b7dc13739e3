pub mod drag;
pub mod dynamics;
pub mod mass_transfer;
pub mod shape;

/// Tolerances and iteration caps of the two nested drop solvers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverSettings {
    /// Bracket searched for the shape ratio.
    pub shape_bracket: (f64, f64),
    pub shape_xtol: f64,
    pub shape_rtol: f64,
    pub shape_max_iterations: usize,
    /// Starting fall speed of the drag fixed point, m/s.
    pub velocity_initial_guess: f64,
    pub velocity_rtol: f64,
    pub velocity_max_iterations: usize,
}

impl Default for SolverSettings {
    fn default() -> Self {
        SolverSettings {
            shape_bracket: (1e-9, 1.0 - 1e-9),
            shape_xtol: 2e-12,
            shape_rtol: 4.0 * f64::EPSILON,
            shape_max_iterations: 100,
            velocity_initial_guess: 1e-3,
            velocity_rtol: 1e-8,
            velocity_max_iterations: 500,
        }
    }
}
