//! Diffusive evaporation of a falling drop.

use crate::constants::PhysicalConstants;
use crate::environment_system::atmosphere::saturation_vapor_pressure;
use crate::errors::SimulationError;

/// Ventilation correction to diffusive mass transfer.
///
/// Piecewise in the Reynolds number; the pieces are independent fits and do
/// not join continuously. A negative or NaN Reynolds number is a
/// [`SimulationError::DomainError`].
pub fn ventilation_factor(reynolds: f64, schmidt: f64) -> Result<f64, SimulationError> {
    if reynolds.is_nan() || reynolds < 0.0 {
        return Err(SimulationError::DomainError(format!(
            "Ventilation factor needs a non-negative Reynolds number, got {}",
            reynolds
        )));
    }

    let factor = if reynolds < 1e-6 {
        1.0
    } else if reynolds < 2000.0 {
        1.0 + 0.108 * reynolds.sqrt() * schmidt.cbrt()
    } else {
        0.78 * reynolds.powf(0.308)
    };

    Ok(factor)
}

/// Air state around the drop that drives evaporation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceConditions {
    /// K
    pub air_temperature: f64,
    /// Fraction in (0, 1].
    pub relative_humidity: f64,
    /// Pa
    pub pressure: f64,
    /// K
    pub lcl_temperature: f64,
}

impl SurfaceConditions {
    /// Drop surface temperature, halfway between the air and the LCL.
    pub fn drop_temperature(&self) -> f64 {
        self.air_temperature - 0.5 * (self.air_temperature - self.lcl_temperature)
    }
}

/// Evaporation-rate formulation.
///
/// Both return `dr/dt` in m/s with the sign convention of the integrator:
/// a positive rate shrinks the drop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EvaporationModel {
    /// Vapor density difference between ambient air and drop surface. Unclamped.
    #[default]
    Exact,
    /// Saturation-ratio form; conditions that would grow the drop give zero.
    Clamped,
}

impl EvaporationModel {
    pub fn rate(
        &self,
        equivalent_radius: f64,
        conditions: &SurfaceConditions,
        ventilation: f64,
        constants: &PhysicalConstants,
    ) -> f64 {
        let t_air = conditions.air_temperature;
        let t_drop = conditions.drop_temperature();
        let p_sat_air = saturation_vapor_pressure(t_air);
        let p_sat_drop = saturation_vapor_pressure(t_drop);

        match self {
            EvaporationModel::Exact => {
                let delta = conditions.relative_humidity * (p_sat_air / t_air) - p_sat_drop / t_drop;
                let transfer = ventilation * constants.vapor_diffusivity * constants.vapor_molar_mass
                    / (equivalent_radius * constants.water_density * constants.gas_constant);
                transfer * delta
            }
            EvaporationModel::Clamped => {
                let delta = conditions.relative_humidity - p_sat_drop / p_sat_air;
                if delta <= 0.0 {
                    return 0.0;
                }
                let vapor_density =
                    constants.vapor_molar_mass * p_sat_air / (constants.gas_constant * t_air);
                ventilation * constants.vapor_diffusivity
                    / (constants.water_density * equivalent_radius)
                    * vapor_density
                    * delta
            }
        }
    }
}
