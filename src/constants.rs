use crate::environment_system::planet::PlanetParameters;

// Physical Constants
pub const GAS_CONSTANT: f64 = 8.314; // J/(mol·K)
pub const WATER_VAPOR_MOLAR_MASS: f64 = 18e-3; // kg/mol
pub const WATER_DENSITY: f64 = 1000.0; // kg/m³
pub const AIR_VISCOSITY: f64 = 1.8e-5; // kg/(m·s)
pub const VAPOR_DIFFUSIVITY: f64 = 2.5e-5; // m²/s
pub const WATER_AIR_SURFACE_TENSION: f64 = 0.073; // N/m
pub const GRAVITY: f64 = 9.81; // m/s²

// Drag reference air
pub const DRAG_AIR_DENSITY: f64 = 1.205; // kg/m³
pub const DRAG_AIR_VISCOSITY: f64 = 1.81e-5; // kg/(m·s)

// Magnus-Tetens coefficients over liquid water
pub const MAGNUS_BASE_PRESSURE: f64 = 610.94; // Pa
pub const MAGNUS_A: f64 = 17.625;
pub const MAGNUS_B: f64 = 243.04; // °C
pub const CELSIUS_OFFSET: f64 = 273.15; // K

// Terminal velocity power law v = a·sqrt(r)
pub const POWER_LAW_COEFFICIENT: f64 = 130.0; // m^0.5/s

// Simulation Parameters
pub const ALTITUDE_STEP: f64 = 0.1; // m
pub const EVAPORATION_RADIUS_FLOOR: f64 = 1e-6; // m
pub const GROUND_ALTITUDE: f64 = 0.0; // m

/// Immutable bundle of the constants every model reads.
///
/// Built once and handed to the models by value; nothing in the crate mutates
/// it after construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicalConstants {
    /// Universal gas constant, J/(mol·K).
    pub gas_constant: f64,
    /// Molar mass of water vapor, kg/mol.
    pub vapor_molar_mass: f64,
    /// Liquid water density, kg/m³.
    pub water_density: f64,
    /// Dynamic viscosity of air used for Reynolds/Schmidt numbers, kg/(m·s).
    pub air_viscosity: f64,
    /// Diffusion coefficient of water vapor in air, m²/s.
    pub vapor_diffusivity: f64,
    /// Water/air surface tension, N/m.
    pub surface_tension: f64,
    /// Gravitational acceleration seen by the drop shape and drag balance, m/s².
    pub gravity: f64,
    /// Air density of the drag correlation, kg/m³.
    pub drag_air_density: f64,
    /// Air viscosity of the drag correlation, kg/(m·s).
    pub drag_air_viscosity: f64,
}

impl Default for PhysicalConstants {
    fn default() -> Self {
        PhysicalConstants {
            gas_constant: GAS_CONSTANT,
            vapor_molar_mass: WATER_VAPOR_MOLAR_MASS,
            water_density: WATER_DENSITY,
            air_viscosity: AIR_VISCOSITY,
            vapor_diffusivity: VAPOR_DIFFUSIVITY,
            surface_tension: WATER_AIR_SURFACE_TENSION,
            gravity: GRAVITY,
            drag_air_density: DRAG_AIR_DENSITY,
            drag_air_viscosity: DRAG_AIR_VISCOSITY,
        }
    }
}

impl PhysicalConstants {
    /// Copy of these constants with the generic gravity replaced by the planet's.
    pub fn with_planet_gravity(self, planet: &PlanetParameters) -> Self {
        PhysicalConstants {
            gravity: planet.surface_gravity,
            ..self
        }
    }

    /// Schmidt number of vapor in air of the given density.
    pub fn schmidt_number(&self, air_density: f64) -> f64 {
        self.air_viscosity / (air_density * self.vapor_diffusivity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment_system::planet::PlanetFactory;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_constants() {
        let constants = PhysicalConstants::default();
        assert_eq!(constants.gas_constant, 8.314);
        assert_eq!(constants.vapor_molar_mass, 0.018);
        assert_eq!(constants.gravity, 9.81);
        assert_eq!(constants.drag_air_density, 1.205);
    }

    #[test]
    fn test_planet_gravity_override_leaves_other_fields() {
        let mars = PlanetFactory::mars();
        let constants = PhysicalConstants::default().with_planet_gravity(&mars);

        assert_eq!(constants.gravity, 3.71);
        assert_eq!(constants.water_density, WATER_DENSITY);
        assert_eq!(constants.surface_tension, WATER_AIR_SURFACE_TENSION);
    }

    #[test]
    fn test_schmidt_number_earth() {
        let constants = PhysicalConstants::default();
        let sc = constants.schmidt_number(1.225);
        assert_relative_eq!(sc, 1.8e-5 / (1.225 * 2.5e-5), epsilon = 1e-12);
    }
}
