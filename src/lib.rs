pub mod constants;
pub mod drop_system;
pub mod environment_system;
pub mod errors;
pub mod telemetry_system;
pub mod trajectory_system;
pub mod utils;

pub use constants::PhysicalConstants;
pub use errors::{SimulationError, StepQuantity};

pub use environment_system::atmosphere::{
    pressure_at_altitude, saturation_vapor_pressure, temperature_at_altitude, Atmosphere,
    AtmosphericConditions,
};
pub use environment_system::planet::{PlanetFactory, PlanetParameters, PlanetRecord};

// Re-export the drop models and their strategy switches
pub use drop_system::dynamics::{DropDynamics, TerminalVelocityModel};
pub use drop_system::mass_transfer::{ventilation_factor, EvaporationModel, SurfaceConditions};
pub use drop_system::shape::ShapeSolution;
pub use drop_system::SolverSettings;

// Re-export the integrator
pub use trajectory_system::descent::{
    simulate_raindrop_descent, DescentConfig, DescentSimulator, DescentState, DropState,
};
pub use trajectory_system::trajectory::{Trajectory, TrajectoryPoint};

pub use telemetry_system::report::DescentReport;
