use crate::constants::PhysicalConstants;
use crate::drop_system::shape::ShapeSolution;
use crate::drop_system::SolverSettings;
use crate::errors::SimulationError;
use crate::utils::solvers::fixed_point;

/// Reynolds number of the drag correlation for a drop falling at `velocity`.
pub fn drag_reynolds_number(
    velocity: f64,
    equivalent_radius: f64,
    constants: &PhysicalConstants,
) -> f64 {
    velocity * 2.0 * equivalent_radius * constants.drag_air_density / constants.drag_air_viscosity
}

/// Sphere drag correlation scaled by the shape drag factor.
///
/// `Cd = [(24/Re)(1 + 0.15·Re^0.687) + 0.42 / (1 + 4.25e4·Re^-1.16)]·C_shape`
pub fn calculate_drag_coefficient(
    shape_drag_factor: f64,
    velocity: f64,
    equivalent_radius: f64,
    constants: &PhysicalConstants,
) -> Result<f64, SimulationError> {
    let reynolds = drag_reynolds_number(velocity, equivalent_radius, constants);
    if reynolds == 0.0 || !reynolds.is_finite() {
        return Err(SimulationError::Singularity(format!(
            "Drag coefficient undefined at Reynolds number {} (v = {} m/s, r = {} m)",
            reynolds, velocity, equivalent_radius
        )));
    }

    let stokes = (24.0 / reynolds) * (1.0 + 0.15 * reynolds.powf(0.687));
    let newton = 0.42 / (1.0 + 4.25e4 * reynolds.powf(-1.16));

    Ok((stokes + newton) * shape_drag_factor)
}

/// Fall speed at which drag with coefficient `drag_coefficient` balances
/// buoyancy-corrected gravity.
pub fn velocity_from_drag(
    drag_coefficient: f64,
    shape_ratio: f64,
    equivalent_radius: f64,
    constants: &PhysicalConstants,
) -> f64 {
    let density_ratio = (constants.water_density - constants.drag_air_density)
        / constants.drag_air_density;

    (8.0 / 3.0 * density_ratio * (constants.gravity / drag_coefficient)
        * shape_ratio.powf(2.0 / 3.0)
        * equivalent_radius)
        .sqrt()
}

/// Terminal velocity as the fixed point of `v ↦ velocity_from_drag(Cd(|v|))`.
pub fn find_terminal_velocity(
    equivalent_radius: f64,
    shape: &ShapeSolution,
    constants: &PhysicalConstants,
    settings: &SolverSettings,
) -> Result<f64, SimulationError> {
    let update = |velocity: f64| -> Result<f64, SimulationError> {
        let drag_coefficient = calculate_drag_coefficient(
            shape.shape_drag_factor,
            velocity.abs(),
            equivalent_radius,
            constants,
        )?;
        Ok(velocity_from_drag(
            drag_coefficient,
            shape.shape_ratio,
            equivalent_radius,
            constants,
        ))
    };

    let solution = fixed_point(
        update,
        settings.velocity_initial_guess,
        settings.velocity_rtol,
        settings.velocity_max_iterations,
    )
    .map_err(|e| match e {
        SimulationError::NonConvergence(reason) => SimulationError::NonConvergence(format!(
            "Terminal velocity for r = {} m: {}",
            equivalent_radius, reason
        )),
        other => other,
    })?;

    if solution.iterations * 2 >= settings.velocity_max_iterations {
        log::warn!(
            "Terminal velocity for r = {:e} m needed {} of {} iterations",
            equivalent_radius,
            solution.iterations,
            settings.velocity_max_iterations
        );
    }

    Ok(solution.value.abs())
}
