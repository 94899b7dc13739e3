//! Equilibrium shape of a falling drop.
//!
//! A drop larger than a few tens of microns flattens into an oblate spheroid.
//! Its minor/major axis ratio follows from balancing surface tension against
//! hydrostatic pressure, and the extra surface area feeds a drag correction.

use crate::constants::PhysicalConstants;
use crate::drop_system::SolverSettings;
use crate::errors::SimulationError;
use crate::utils::solvers::brent_root_find;

/// Shape quantities derived from an equivalent radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapeSolution {
    /// Minor/major axis ratio, in (0, 1].
    pub shape_ratio: f64,
    /// Surface area relative to the sphere of equal volume, ≥ 1.
    pub surface_area_factor: f64,
    /// Multiplier applied to the sphere drag coefficient, ≥ 1.
    pub shape_drag_factor: f64,
}

impl ShapeSolution {
    pub fn solve(
        equivalent_radius: f64,
        constants: &PhysicalConstants,
        settings: &SolverSettings,
    ) -> Result<Self, SimulationError> {
        let shape_ratio = calculate_shape_ratio(equivalent_radius, constants, settings)?;
        let surface_area_factor = calculate_surface_area_factor(shape_ratio)?;
        let shape_drag_factor = calculate_shape_drag_factor(surface_area_factor);

        Ok(ShapeSolution {
            shape_ratio,
            surface_area_factor,
            shape_drag_factor,
        })
    }
}

/// Capillary length `sqrt(σ / (g·Δρ))`, in meters.
pub fn capillary_length(constants: &PhysicalConstants) -> f64 {
    (constants.surface_tension
        / (constants.gravity * (constants.water_density - constants.drag_air_density)))
        .sqrt()
}

/// Equivalent radius of a drop with axis ratio `x`, minus `equivalent_radius`.
fn shape_residual(x: f64, equivalent_radius: f64, capillary_length: f64) -> f64 {
    capillary_length * x.powf(-1.0 / 6.0) * (x.powi(-2) - 2.0 * x.powf(-1.0 / 3.0) + 1.0).sqrt()
        - equivalent_radius
}

/// Solves for the axis ratio of a drop of equivalent radius `equivalent_radius` (m).
///
/// Radii too small or too large for the solver bracket have no root there and
/// come back as [`SimulationError::DomainError`].
pub fn calculate_shape_ratio(
    equivalent_radius: f64,
    constants: &PhysicalConstants,
    settings: &SolverSettings,
) -> Result<f64, SimulationError> {
    let capillary_length = capillary_length(constants);
    let (lower, upper) = settings.shape_bracket;

    let root = brent_root_find(
        |x| shape_residual(x, equivalent_radius, capillary_length),
        lower,
        upper,
        settings.shape_xtol,
        settings.shape_rtol,
        settings.shape_max_iterations,
    )
    .map_err(|e| match e {
        SimulationError::DomainError(reason) => SimulationError::DomainError(format!(
            "No drop shape for equivalent radius {} m: {}",
            equivalent_radius, reason
        )),
        other => other,
    })?;

    Ok(root.value)
}

/// Surface-area factor of an oblate spheroid with axis ratio `shape_ratio`.
pub fn calculate_surface_area_factor(shape_ratio: f64) -> Result<f64, SimulationError> {
    if shape_ratio.is_nan() || shape_ratio <= 0.0 || shape_ratio > 1.0 {
        return Err(SimulationError::DomainError(format!(
            "Shape ratio must be in (0, 1], got {}",
            shape_ratio
        )));
    }
    if shape_ratio == 1.0 {
        return Ok(1.0);
    }

    let epsilon = (1.0 - shape_ratio.powi(2)).sqrt();
    // ln((1 + ε) / (1 - ε)) = 2·atanh(ε)
    let fsa = 0.5 * shape_ratio.powf(-2.0 / 3.0)
        + shape_ratio.powf(4.0 / 3.0) * 2.0 * epsilon.atanh() / (4.0 * epsilon);

    // round-off next to the sphere limit can land a hair under 1
    Ok(fsa.max(1.0))
}

/// Drag correction `1 + 1.5·sqrt(fSA − 1) + 6.7·(fSA − 1)`.
pub fn calculate_shape_drag_factor(surface_area_factor: f64) -> f64 {
    let excess = (surface_area_factor - 1.0).max(0.0);
    1.0 + 1.5 * excess.sqrt() + 6.7 * excess
}
