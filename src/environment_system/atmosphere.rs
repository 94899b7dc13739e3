use crate::constants::{
    PhysicalConstants, CELSIUS_OFFSET, MAGNUS_A, MAGNUS_B, MAGNUS_BASE_PRESSURE,
};
use crate::environment_system::planet::PlanetParameters;

/// Air temperature (K) at altitude `z` (m) under a constant lapse rate (K/m).
///
/// Unbounded: far enough up this goes negative.
pub fn temperature_at_altitude(z: f64, surface_temperature: f64, lapse_rate: f64) -> f64 {
    surface_temperature - lapse_rate * z
}

/// Isothermal barometric pressure (Pa) at altitude `z` (m).
///
/// The scale height is built from the molar mass of water vapor.
pub fn pressure_at_altitude(
    z: f64,
    surface_pressure: f64,
    surface_temperature: f64,
    gravity: f64,
    constants: &PhysicalConstants,
) -> f64 {
    let scale_height = scale_height(surface_temperature, gravity, constants);
    surface_pressure * (-z / scale_height).exp()
}

/// `H = R·T0 / (M_v·g)`, in meters.
pub fn scale_height(surface_temperature: f64, gravity: f64, constants: &PhysicalConstants) -> f64 {
    constants.gas_constant * surface_temperature / (constants.vapor_molar_mass * gravity)
}

/// Magnus-Tetens saturation vapor pressure over liquid water (Pa) at
/// temperature `temperature` (K). Meaningful roughly between -40 °C and 50 °C.
pub fn saturation_vapor_pressure(temperature: f64) -> f64 {
    let celsius = kelvin_to_celsius(temperature);
    MAGNUS_BASE_PRESSURE * (MAGNUS_A * celsius / (celsius + MAGNUS_B)).exp()
}

pub fn kelvin_to_celsius(temperature: f64) -> f64 {
    temperature - CELSIUS_OFFSET
}

/// Local air state at one altitude.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AtmosphericConditions {
    pub altitude: f64,
    pub temperature: f64,
    pub pressure: f64,
}

/// Atmosphere profile of a planet.
#[derive(Debug, Clone)]
pub struct Atmosphere {
    pub planet: PlanetParameters,
    constants: PhysicalConstants,
}

impl Atmosphere {
    pub fn new(planet: PlanetParameters, constants: PhysicalConstants) -> Self {
        Atmosphere { planet, constants }
    }

    pub fn temperature(&self, altitude: f64) -> f64 {
        temperature_at_altitude(
            altitude,
            self.planet.surface_temperature,
            self.planet.lapse_rate,
        )
    }

    pub fn pressure(&self, altitude: f64) -> f64 {
        pressure_at_altitude(
            altitude,
            self.planet.surface_pressure,
            self.planet.surface_temperature,
            self.planet.surface_gravity,
            &self.constants,
        )
    }

    pub fn conditions_at(&self, altitude: f64) -> AtmosphericConditions {
        AtmosphericConditions {
            altitude,
            temperature: self.temperature(altitude),
            pressure: self.pressure(altitude),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::environment_system::planet::PlanetFactory;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    #[test]
    fn test_temperature_lapse() {
        assert_abs_diff_eq!(temperature_at_altitude(0.0, 300.0, 9.8e-3), 300.0);
        assert_abs_diff_eq!(
            temperature_at_altitude(500.0, 300.0, 9.8e-3),
            295.1,
            epsilon = 1e-9
        );
        // no clamping far above the surface
        assert!(temperature_at_altitude(40_000.0, 300.0, 9.8e-3) < 0.0);
    }

    #[test]
    fn test_pressure_at_surface_is_surface_pressure() {
        let constants = PhysicalConstants::default();
        assert_eq!(
            pressure_at_altitude(0.0, 101_325.0, 300.0, 9.82, &constants),
            101_325.0
        );
    }

    #[test]
    fn test_pressure_decreases_with_height() {
        let constants = PhysicalConstants::default();
        let p1 = pressure_at_altitude(0.0, 101_325.0, 300.0, 9.82, &constants);
        let p2 = pressure_at_altitude(5_000.0, 101_325.0, 300.0, 9.82, &constants);
        assert!(p2 < p1);
    }

    #[test]
    fn test_pressure_strictly_monotonic_sweep() {
        let constants = PhysicalConstants::default();
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..500 {
            let z1: f64 = rng.gen_range(0.0..20_000.0);
            let z2 = z1 + rng.gen_range(1.0..5_000.0);
            let t0 = rng.gen_range(80.0..400.0);
            let g = rng.gen_range(1.0..25.0);
            let p0 = rng.gen_range(1e3..1e6);

            let low = pressure_at_altitude(z1, p0, t0, g, &constants);
            let high = pressure_at_altitude(z2, p0, t0, g, &constants);
            assert!(
                high < low,
                "p({}) = {} is not below p({}) = {}",
                z2,
                high,
                z1,
                low
            );
        }
    }

    #[test]
    fn test_scale_height_earth() {
        let constants = PhysicalConstants::default();
        let h = scale_height(300.0, 9.82, &constants);
        assert_relative_eq!(h, 8.314 * 300.0 / (0.018 * 9.82), epsilon = 1e-9);
    }

    #[test]
    fn test_saturation_pressure_reasonable() {
        let p_sat = saturation_vapor_pressure(300.0);
        assert!(p_sat > 3000.0 && p_sat < 5000.0);
    }

    #[test]
    fn test_saturation_pressure_at_freezing() {
        assert_relative_eq!(saturation_vapor_pressure(273.15), 610.94, epsilon = 1e-9);
    }

    #[test]
    fn test_saturation_pressure_increases_with_temperature() {
        let mut rng = StdRng::seed_from_u64(11);
        let mut temperatures: Vec<f64> = (0..200).map(|_| rng.gen_range(250.0..320.0)).collect();
        temperatures.sort_by(|a, b| a.total_cmp(b));
        temperatures.dedup();

        for pair in temperatures.windows(2) {
            assert!(saturation_vapor_pressure(pair[1]) > saturation_vapor_pressure(pair[0]));
        }
    }

    #[test]
    fn test_atmosphere_conditions_match_free_functions() {
        let earth = PlanetFactory::earth();
        let constants = PhysicalConstants::default();
        let atmosphere = Atmosphere::new(earth.clone(), constants);

        let conditions = atmosphere.conditions_at(600.0);
        assert_eq!(conditions.altitude, 600.0);
        assert_eq!(
            conditions.temperature,
            temperature_at_altitude(600.0, earth.surface_temperature, earth.lapse_rate)
        );
        assert_eq!(
            conditions.pressure,
            pressure_at_altitude(
                600.0,
                earth.surface_pressure,
                earth.surface_temperature,
                earth.surface_gravity,
                &constants
            )
        );
    }
}
