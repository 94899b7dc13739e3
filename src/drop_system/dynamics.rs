use crate::constants::{PhysicalConstants, POWER_LAW_COEFFICIENT};
use crate::drop_system::drag::find_terminal_velocity;
use crate::drop_system::shape::ShapeSolution;
use crate::drop_system::SolverSettings;
use crate::errors::SimulationError;

/// How terminal fall speed is obtained from the equivalent radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TerminalVelocityModel {
    /// `v = a·sqrt(r)`, a in m^0.5/s.
    PowerLaw { coefficient: f64 },
    /// Deformed-drop drag balance solved numerically.
    Physical,
}

impl Default for TerminalVelocityModel {
    fn default() -> Self {
        TerminalVelocityModel::PowerLaw {
            coefficient: POWER_LAW_COEFFICIENT,
        }
    }
}

impl TerminalVelocityModel {
    pub fn terminal_velocity(
        &self,
        equivalent_radius: f64,
        constants: &PhysicalConstants,
        settings: &SolverSettings,
    ) -> Result<f64, SimulationError> {
        if equivalent_radius.is_nan() || equivalent_radius <= 0.0 {
            return Err(SimulationError::DomainError(format!(
                "Equivalent radius must be positive, got {}",
                equivalent_radius
            )));
        }

        match self {
            TerminalVelocityModel::PowerLaw { coefficient } => {
                Ok(coefficient * equivalent_radius.sqrt())
            }
            TerminalVelocityModel::Physical => {
                let shape = ShapeSolution::solve(equivalent_radius, constants, settings)?;
                find_terminal_velocity(equivalent_radius, &shape, constants, settings)
            }
        }
    }
}

/// Fall-speed model of a drop, bound to its constants and solver budget.
#[derive(Debug, Clone, Copy)]
pub struct DropDynamics {
    pub model: TerminalVelocityModel,
    pub constants: PhysicalConstants,
    pub settings: SolverSettings,
}

impl DropDynamics {
    pub fn new(
        model: TerminalVelocityModel,
        constants: PhysicalConstants,
        settings: SolverSettings,
    ) -> Self {
        DropDynamics {
            model,
            constants,
            settings,
        }
    }

    pub fn terminal_velocity(&self, equivalent_radius: f64) -> Result<f64, SimulationError> {
        self.model
            .terminal_velocity(equivalent_radius, &self.constants, &self.settings)
    }

    /// Reynolds number of the drop in air of density `air_density`.
    pub fn reynolds_number(&self, air_density: f64, velocity: f64, equivalent_radius: f64) -> f64 {
        air_density * velocity * 2.0 * equivalent_radius / self.constants.air_viscosity
    }
}
