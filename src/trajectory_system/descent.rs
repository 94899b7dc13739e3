use crate::constants::{
    PhysicalConstants, ALTITUDE_STEP, EVAPORATION_RADIUS_FLOOR, GROUND_ALTITUDE,
};
use crate::drop_system::dynamics::{DropDynamics, TerminalVelocityModel};
use crate::drop_system::mass_transfer::{ventilation_factor, EvaporationModel, SurfaceConditions};
use crate::drop_system::SolverSettings;
use crate::environment_system::atmosphere::Atmosphere;
use crate::environment_system::planet::PlanetParameters;
use crate::errors::{ensure_finite, SimulationError, StepQuantity};

use super::trajectory::{Trajectory, TrajectoryPoint};

/// Knobs of a descent run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DescentConfig {
    /// Altitude lost per step, m.
    pub altitude_step: f64,
    /// The drop counts as evaporated at or below this radius, m.
    pub evaporation_radius: f64,
    /// The drop counts as landed at or below this altitude, m.
    pub ground_altitude: f64,
    pub terminal_velocity: TerminalVelocityModel,
    pub evaporation: EvaporationModel,
    pub solver: SolverSettings,
    /// Hard cap on integration steps.
    pub max_steps: usize,
}

impl Default for DescentConfig {
    fn default() -> Self {
        DescentConfig {
            altitude_step: ALTITUDE_STEP,
            evaporation_radius: EVAPORATION_RADIUS_FLOOR,
            ground_altitude: GROUND_ALTITUDE,
            terminal_velocity: TerminalVelocityModel::default(),
            evaporation: EvaporationModel::default(),
            solver: SolverSettings::default(),
            max_steps: 10_000_000,
        }
    }
}

impl DescentConfig {
    pub fn with_altitude_step(mut self, altitude_step: f64) -> Self {
        self.altitude_step = altitude_step;
        self
    }

    pub fn with_terminal_velocity(mut self, model: TerminalVelocityModel) -> Self {
        self.terminal_velocity = model;
        self
    }

    pub fn with_evaporation(mut self, model: EvaporationModel) -> Self {
        self.evaporation = model;
        self
    }

    pub fn with_thresholds(mut self, evaporation_radius: f64, ground_altitude: f64) -> Self {
        self.evaporation_radius = evaporation_radius;
        self.ground_altitude = ground_altitude;
        self
    }

    pub fn validate(&self) -> Result<(), SimulationError> {
        if !self.altitude_step.is_finite() || self.altitude_step <= 0.0 {
            return Err(SimulationError::ConfigurationError(format!(
                "Altitude step must be finite and positive, got {}",
                self.altitude_step
            )));
        }
        if !self.evaporation_radius.is_finite() || !self.ground_altitude.is_finite() {
            return Err(SimulationError::ConfigurationError(format!(
                "Thresholds must be finite (radius floor {}, ground {})",
                self.evaporation_radius, self.ground_altitude
            )));
        }
        if let TerminalVelocityModel::PowerLaw { coefficient } = self.terminal_velocity {
            if !coefficient.is_finite() || coefficient <= 0.0 {
                return Err(SimulationError::ConfigurationError(format!(
                    "Power-law coefficient must be finite and positive, got {}",
                    coefficient
                )));
            }
        }
        if self.max_steps == 0 {
            return Err(SimulationError::ConfigurationError(
                "Step cap must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

/// Radius and altitude of the drop between two steps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DropState {
    pub radius: f64,
    pub altitude: f64,
}

impl DropState {
    pub fn new(radius: f64, altitude: f64) -> Self {
        DropState { radius, altitude }
    }
}

#[derive(PartialEq, Eq, Debug, Clone, Copy)]
pub enum DescentState {
    Running,
    Evaporated,
    Grounded,
}

pub struct DescentSimulator {
    atmosphere: Atmosphere,
    dynamics: DropDynamics,
    constants: PhysicalConstants,
    config: DescentConfig,
}

impl DescentSimulator {
    pub fn new(planet: PlanetParameters, config: DescentConfig) -> Result<Self, SimulationError> {
        planet.validate()?;
        config.validate()?;

        let constants = PhysicalConstants::default();
        Ok(DescentSimulator {
            atmosphere: Atmosphere::new(planet, constants),
            dynamics: DropDynamics::new(config.terminal_velocity, constants, config.solver),
            constants,
            config,
        })
    }

    pub fn with_constants(self, constants: PhysicalConstants) -> Self {
        DescentSimulator {
            atmosphere: Atmosphere::new(self.atmosphere.planet, constants),
            dynamics: DropDynamics::new(self.config.terminal_velocity, constants, self.config.solver),
            constants,
            config: self.config,
        }
    }

    pub fn planet(&self) -> &PlanetParameters {
        &self.atmosphere.planet
    }

    pub fn config(&self) -> &DescentConfig {
        &self.config
    }

    /// Where a drop in `state` stands. Evaporation is checked before landing.
    pub fn classify(&self, state: &DropState) -> DescentState {
        if state.radius <= self.config.evaporation_radius {
            DescentState::Evaporated
        } else if state.altitude <= self.config.ground_altitude {
            DescentState::Grounded
        } else {
            DescentState::Running
        }
    }

    /// Advances the drop by one altitude step.
    ///
    /// Failures carry `step` and the quantity that could not be evaluated.
    pub fn step(&self, step: usize, state: &DropState) -> Result<DropState, SimulationError> {
        let planet = &self.atmosphere.planet;
        let radius = state.radius;
        let conditions = self.atmosphere.conditions_at(state.altitude);

        let temperature = ensure_finite(conditions.temperature, "air temperature")
            .map_err(|e| e.at_step(step, StepQuantity::Temperature))?;
        let pressure = ensure_finite(conditions.pressure, "air pressure")
            .map_err(|e| e.at_step(step, StepQuantity::Pressure))?;

        let velocity = self
            .dynamics
            .terminal_velocity(radius)
            .and_then(|v| ensure_finite(v, "terminal velocity"))
            .map_err(|e| e.at_step(step, StepQuantity::TerminalVelocity))?;
        if velocity <= 0.0 {
            return Err(SimulationError::Singularity(format!(
                "terminal velocity {} m/s at r = {} m leaves dr/dz undefined",
                velocity, radius
            ))
            .at_step(step, StepQuantity::TerminalVelocity));
        }

        let reynolds = ensure_finite(
            self.dynamics
                .reynolds_number(planet.air_density, velocity, radius),
            "Reynolds number",
        )
        .map_err(|e| e.at_step(step, StepQuantity::ReynoldsNumber))?;
        let schmidt = self.constants.schmidt_number(planet.air_density);

        let ventilation = ventilation_factor(reynolds, schmidt)
            .map_err(|e| e.at_step(step, StepQuantity::VentilationFactor))?;

        let surface = SurfaceConditions {
            air_temperature: temperature,
            relative_humidity: planet.relative_humidity,
            pressure,
            lcl_temperature: planet.lcl_temperature,
        };
        let drdt = ensure_finite(
            self.config
                .evaporation
                .rate(radius, &surface, ventilation, &self.constants),
            "evaporation rate",
        )
        .map_err(|e| e.at_step(step, StepQuantity::EvaporationRate))?;

        let drdz = drdt / velocity;
        let next_radius = ensure_finite(radius - drdz * self.config.altitude_step, "drop radius")
            .map_err(|e| e.at_step(step, StepQuantity::Radius))?;
        let next_altitude = state.altitude - self.config.altitude_step;

        log::trace!(
            "step {}: z = {:.3} m, T = {:.2} K, p = {:.1} Pa, v = {:.4} m/s, Re = {:.3}, f_V = {:.3}, dr/dz = {:e}",
            step,
            state.altitude,
            temperature,
            pressure,
            velocity,
            reynolds,
            ventilation,
            drdz
        );

        Ok(DropState::new(next_radius, next_altitude))
    }

    /// Integrates from `(initial_radius, initial_altitude)` until the drop
    /// evaporates or lands.
    ///
    /// Each recorded point is the state after its step; the last one may lie
    /// below either threshold.
    pub fn run(
        &self,
        initial_radius: f64,
        initial_altitude: f64,
    ) -> Result<Trajectory, SimulationError> {
        if !initial_radius.is_finite() || !initial_altitude.is_finite() {
            return Err(SimulationError::ConfigurationError(format!(
                "Initial state must be finite (r0 = {}, z0 = {})",
                initial_radius, initial_altitude
            )));
        }

        let mut state = DropState::new(initial_radius, initial_altitude);
        let mut phase = self.classify(&state);
        let mut points: Vec<TrajectoryPoint> = Vec::new();

        log::debug!(
            "{}: descent from r0 = {:e} m, z0 = {} m ({:?}, {:?}, dz = {} m)",
            self.atmosphere.planet.name,
            initial_radius,
            initial_altitude,
            self.config.terminal_velocity,
            self.config.evaporation,
            self.config.altitude_step
        );

        while phase == DescentState::Running {
            if points.len() >= self.config.max_steps {
                return Err(SimulationError::NonConvergence(format!(
                    "Descent did not terminate within {} steps (r = {} m, z = {} m)",
                    self.config.max_steps, state.radius, state.altitude
                )));
            }

            state = self.step(points.len(), &state)?;
            points.push(TrajectoryPoint::from(state));
            phase = self.classify(&state);
        }

        log::debug!(
            "{}: {:?} after {} steps at z = {} m, r = {:e} m",
            self.atmosphere.planet.name,
            phase,
            points.len(),
            state.altitude,
            state.radius
        );

        Ok(Trajectory::new(points, phase))
    }
}

/// Simulates one drop released at `initial_altitude` with `initial_radius`.
pub fn simulate_raindrop_descent(
    initial_radius: f64,
    initial_altitude: f64,
    planet: &PlanetParameters,
    config: &DescentConfig,
) -> Result<Trajectory, SimulationError> {
    DescentSimulator::new(planet.clone(), *config)?.run(initial_radius, initial_altitude)
}
