use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::SimulationError;
use crate::utils::units::{Dimension, Quantity};

/// Surface and atmosphere parameters of one planet, in SI magnitudes.
#[derive(Clone, Debug, PartialEq)]
pub struct PlanetParameters {
    pub name: String,
    /// Surface temperature, K.
    pub surface_temperature: f64,
    /// Relative humidity as a fraction in (0, 1].
    pub relative_humidity: f64,
    /// Surface pressure, Pa.
    pub surface_pressure: f64,
    /// Surface gravity, m/s².
    pub surface_gravity: f64,
    /// Dry adiabatic lapse rate, K/m.
    pub lapse_rate: f64,
    /// Reference air density, kg/m³.
    pub air_density: f64,
    /// Temperature at the lifting condensation level, K.
    pub lcl_temperature: f64,
}

impl PlanetParameters {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: String,
        surface_temperature: f64,
        relative_humidity: f64,
        surface_pressure: f64,
        surface_gravity: f64,
        lapse_rate: f64,
        air_density: f64,
        lcl_temperature: f64,
    ) -> Self {
        PlanetParameters {
            name,
            surface_temperature,
            relative_humidity,
            surface_pressure,
            surface_gravity,
            lapse_rate,
            air_density,
            lcl_temperature,
        }
    }

    /// Checks every magnitude is finite and strictly positive, with the
    /// relative humidity in (0, 1].
    pub fn validate(&self) -> Result<(), SimulationError> {
        let positive = [
            ("T0", self.surface_temperature),
            ("p0", self.surface_pressure),
            ("g", self.surface_gravity),
            ("Gamma_d", self.lapse_rate),
            ("rho_air", self.air_density),
            ("T_LCL", self.lcl_temperature),
        ];
        for (field, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(SimulationError::ConfigurationError(format!(
                    "Planet '{}': {} must be finite and positive, got {}",
                    self.name, field, value
                )));
            }
        }

        let rh = self.relative_humidity;
        if !rh.is_finite() || rh <= 0.0 || rh > 1.0 {
            return Err(SimulationError::ConfigurationError(format!(
                "Planet '{}': RH must lie in (0, 1], got {}",
                self.name, rh
            )));
        }

        Ok(())
    }

    /// Parses and validates a JSON planet record.
    pub fn from_json(json: &str) -> Result<Self, SimulationError> {
        let record: PlanetRecord = serde_json::from_str(json).map_err(|e| {
            SimulationError::ConfigurationError(format!("Invalid planet record: {}", e))
        })?;
        record.into_parameters()
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, SimulationError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|e| {
            SimulationError::ConfigurationError(format!(
                "Cannot read planet file {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_json(&json)
    }

    pub fn to_record(&self) -> PlanetRecord {
        PlanetRecord {
            name: Some(self.name.clone()),
            t0: Quantity::new(self.surface_temperature, "K"),
            rh: self.relative_humidity,
            p0: Quantity::new(self.surface_pressure, "Pa"),
            g: Quantity::new(self.surface_gravity, "m/s^2"),
            gamma_d: Quantity::new(self.lapse_rate, "K/m"),
            rho_air: Quantity::new(self.air_density, "kg/m^3"),
            t_lcl: Quantity::new(self.lcl_temperature, "K"),
        }
    }
}

/// On-disk planet table entry. Every field except `name` is required.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlanetRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "T0")]
    pub t0: Quantity,
    #[serde(rename = "RH")]
    pub rh: f64,
    pub p0: Quantity,
    pub g: Quantity,
    #[serde(rename = "Gamma_d")]
    pub gamma_d: Quantity,
    pub rho_air: Quantity,
    #[serde(rename = "T_LCL")]
    pub t_lcl: Quantity,
}

impl PlanetRecord {
    pub fn into_parameters(self) -> Result<PlanetParameters, SimulationError> {
        let planet = PlanetParameters {
            name: self.name.unwrap_or_else(|| "unnamed".to_string()),
            surface_temperature: self.t0.to_si(Dimension::Temperature)?,
            relative_humidity: self.rh,
            surface_pressure: self.p0.to_si(Dimension::Pressure)?,
            surface_gravity: self.g.to_si(Dimension::Acceleration)?,
            lapse_rate: self.gamma_d.to_si(Dimension::LapseRate)?,
            air_density: self.rho_air.to_si(Dimension::Density)?,
            lcl_temperature: self.t_lcl.to_si(Dimension::Temperature)?,
        };
        planet.validate()?;
        Ok(planet)
    }
}

pub struct PlanetFactory;

impl PlanetFactory {
    pub fn earth() -> PlanetParameters {
        PlanetParameters::new("Earth".to_string(), 300.0, 0.75, 101_325.0, 9.82, 9.8e-3, 1.225, 275.0)
    }

    pub fn mars() -> PlanetParameters {
        PlanetParameters::new(
            "Mars".to_string(),
            290.0,
            0.75,
            2e5,
            3.71,
            9.8e-3,
            0.02,
            273.0 + 14.5,
        )
    }

    pub fn titan() -> PlanetParameters {
        PlanetParameters::new(
            "Titan".to_string(),
            90.0,
            0.75,
            1.5e5,
            1.35,
            9.8e-3,
            5.4,
            273.0 + 18.0,
        )
    }

    pub fn jupiter() -> PlanetParameters {
        PlanetParameters::new(
            "Jupiter".to_string(),
            274.0,
            1.0,
            4.85e5,
            24.84,
            9.8e-3,
            0.2,
            273.0 + 39.8,
        )
    }

    pub fn saturn() -> PlanetParameters {
        PlanetParameters::new(
            "Saturn".to_string(),
            284.0,
            1.0,
            1.04e6,
            10.47,
            9.8e-3,
            0.18,
            273.0 + 99.2,
        )
    }

    pub fn k2_18b() -> PlanetParameters {
        PlanetParameters::new(
            "K2-18b".to_string(),
            275.0,
            1.0,
            1e4,
            12.44,
            9.8e-3,
            0.09,
            273.0 + 56.6,
        )
    }

    pub fn all() -> Vec<PlanetParameters> {
        vec![
            Self::earth(),
            Self::mars(),
            Self::titan(),
            Self::jupiter(),
            Self::saturn(),
            Self::k2_18b(),
        ]
    }

    /// Case-insensitive lookup of a preset by name.
    pub fn by_name(name: &str) -> Option<PlanetParameters> {
        Self::all()
            .into_iter()
            .find(|planet| planet.name.eq_ignore_ascii_case(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_earth_parameters() {
        let earth = PlanetFactory::earth();
        assert_eq!(earth.surface_temperature, 300.0);
        assert!(earth.relative_humidity > 0.0 && earth.relative_humidity <= 1.0);
        assert_eq!(earth.surface_gravity, 9.82);
    }

    #[test]
    fn test_mars_gravity_and_pressure() {
        let mars = PlanetFactory::mars();
        assert_eq!(mars.surface_gravity, 3.71);
        assert_eq!(mars.surface_pressure, 2e5);
    }

    #[test]
    fn test_all_presets_validate() {
        let planets = PlanetFactory::all();
        assert_eq!(planets.len(), 6);
        for planet in &planets {
            planet
                .validate()
                .unwrap_or_else(|e| panic!("{} failed validation: {}", planet.name, e));
        }
    }

    #[test]
    fn test_lookup_by_name() {
        assert_eq!(PlanetFactory::by_name("titan").unwrap().surface_gravity, 1.35);
        assert_eq!(PlanetFactory::by_name("K2-18B").unwrap().surface_pressure, 1e4);
        assert!(PlanetFactory::by_name("Pluto").is_none());
    }

    #[test]
    fn test_validate_rejects_bad_humidity() {
        let mut earth = PlanetFactory::earth();
        earth.relative_humidity = 1.2;
        assert!(matches!(
            earth.validate(),
            Err(SimulationError::ConfigurationError(_))
        ));

        earth.relative_humidity = 0.0;
        assert!(earth.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_non_positive_field() {
        let mut jupiter = PlanetFactory::jupiter();
        jupiter.surface_gravity = 0.0;
        let message = jupiter.validate().unwrap_err().to_string();
        assert!(message.contains("g must be finite and positive"));

        let mut saturn = PlanetFactory::saturn();
        saturn.air_density = f64::NAN;
        assert!(saturn.validate().is_err());
    }

    #[test]
    fn test_json_record_with_units() {
        let json = r#"{
            "name": "Earth",
            "T0": {"value": 26.85, "unit": "degC"},
            "RH": 0.75,
            "p0": {"value": 1013.25, "unit": "hPa"},
            "g": 9.82,
            "Gamma_d": {"value": 9.8, "unit": "K/km"},
            "rho_air": {"value": 1.225, "unit": "kg/m^3"},
            "T_LCL": {"value": 275, "unit": "K"}
        }"#;

        let planet = PlanetParameters::from_json(json).unwrap();
        let earth = PlanetFactory::earth();
        assert_eq!(planet.name, "Earth");
        assert_relative_eq!(planet.surface_temperature, earth.surface_temperature, epsilon = 1e-9);
        assert_relative_eq!(planet.surface_pressure, earth.surface_pressure, epsilon = 1e-9);
        assert_relative_eq!(planet.lapse_rate, earth.lapse_rate, epsilon = 1e-15);
        assert_eq!(planet.lcl_temperature, 275.0);
    }

    #[test]
    fn test_json_record_missing_field() {
        let json = r#"{"T0": 300, "RH": 0.75, "p0": 101325, "g": 9.82, "Gamma_d": 0.0098, "rho_air": 1.225}"#;
        let error = PlanetParameters::from_json(json).unwrap_err();
        assert!(matches!(error, SimulationError::ConfigurationError(_)));
        assert!(error.to_string().contains("T_LCL"));
    }

    #[test]
    fn test_json_record_wrong_dimension() {
        let json = r#"{"T0": {"value": 300, "unit": "Pa"}, "RH": 0.75, "p0": 101325, "g": 9.82,
                       "Gamma_d": 0.0098, "rho_air": 1.225, "T_LCL": 275}"#;
        assert!(matches!(
            PlanetParameters::from_json(json),
            Err(SimulationError::ConfigurationError(_))
        ));
    }

    #[test]
    fn test_record_round_trip_through_json() {
        let titan = PlanetFactory::titan();
        let json = serde_json::to_string(&titan.to_record()).unwrap();
        assert_eq!(PlanetParameters::from_json(&json).unwrap(), titan);
    }
}
