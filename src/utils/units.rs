use std::fmt;

use serde::{Deserialize, Serialize};

use crate::errors::SimulationError;

/// Physical dimension a configuration value must carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dimension {
    Temperature,
    Pressure,
    Acceleration,
    LapseRate,
    Density,
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Dimension::Temperature => "temperature",
            Dimension::Pressure => "pressure",
            Dimension::Acceleration => "acceleration",
            Dimension::LapseRate => "temperature lapse rate",
            Dimension::Density => "density",
        };
        f.write_str(name)
    }
}

/// Unit symbol, its dimension, and the affine map `si = value·scale + offset`.
const UNITS: &[(&str, Dimension, f64, f64)] = &[
    ("K", Dimension::Temperature, 1.0, 0.0),
    ("degC", Dimension::Temperature, 1.0, 273.15),
    ("°C", Dimension::Temperature, 1.0, 273.15),
    ("Pa", Dimension::Pressure, 1.0, 0.0),
    ("hPa", Dimension::Pressure, 100.0, 0.0),
    ("kPa", Dimension::Pressure, 1e3, 0.0),
    ("bar", Dimension::Pressure, 1e5, 0.0),
    ("atm", Dimension::Pressure, 101_325.0, 0.0),
    ("m/s^2", Dimension::Acceleration, 1.0, 0.0),
    ("cm/s^2", Dimension::Acceleration, 0.01, 0.0),
    ("K/m", Dimension::LapseRate, 1.0, 0.0),
    ("K/km", Dimension::LapseRate, 1e-3, 0.0),
    ("kg/m^3", Dimension::Density, 1.0, 0.0),
    ("g/cm^3", Dimension::Density, 1e3, 0.0),
];

/// SI unit symbol of each dimension.
pub fn si_unit(dimension: Dimension) -> &'static str {
    match dimension {
        Dimension::Temperature => "K",
        Dimension::Pressure => "Pa",
        Dimension::Acceleration => "m/s^2",
        Dimension::LapseRate => "K/m",
        Dimension::Density => "kg/m^3",
    }
}

/// A configuration value: either a bare SI magnitude or a magnitude tagged
/// with its unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Quantity {
    Si(f64),
    Tagged { value: f64, unit: String },
}

impl Quantity {
    pub fn new(value: f64, unit: &str) -> Self {
        Quantity::Tagged {
            value,
            unit: unit.to_string(),
        }
    }

    /// Converts to the SI magnitude of `expected`, rejecting units of any
    /// other dimension.
    pub fn to_si(&self, expected: Dimension) -> Result<f64, SimulationError> {
        let (value, unit) = match self {
            Quantity::Si(value) => return Ok(*value),
            Quantity::Tagged { value, unit } => (*value, unit.trim()),
        };

        let (_, dimension, scale, offset) = UNITS
            .iter()
            .find(|(symbol, ..)| *symbol == unit)
            .ok_or_else(|| {
                SimulationError::ConfigurationError(format!("Unknown unit '{}'", unit))
            })?;

        if *dimension != expected {
            return Err(SimulationError::ConfigurationError(format!(
                "Unit '{}' measures {}, expected {} (e.g. '{}')",
                unit,
                dimension,
                expected,
                si_unit(expected)
            )));
        }

        Ok(value * scale + offset)
    }
}
