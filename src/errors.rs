use std::fmt;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimulationError {
    #[error("Domain error: {0}")]
    DomainError(String),

    #[error("Numerical non-convergence: {0}")]
    NonConvergence(String),

    #[error("Singularity: {0}")]
    Singularity(String),

    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    #[error("Step {step} failed while evaluating {quantity}: {source}")]
    StepFailed {
        step: usize,
        quantity: StepQuantity,
        #[source]
        source: Box<SimulationError>,
    },
}

impl SimulationError {
    pub fn at_step(self, step: usize, quantity: StepQuantity) -> Self {
        SimulationError::StepFailed {
            step,
            quantity,
            source: Box::new(self),
        }
    }

    /// The error underneath any step context.
    pub fn root_cause(&self) -> &SimulationError {
        match self {
            SimulationError::StepFailed { source, .. } => source.root_cause(),
            other => other,
        }
    }
}

/// Quantity under evaluation when a descent step fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepQuantity {
    Temperature,
    Pressure,
    TerminalVelocity,
    ReynoldsNumber,
    VentilationFactor,
    EvaporationRate,
    Radius,
}

impl fmt::Display for StepQuantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StepQuantity::Temperature => "air temperature",
            StepQuantity::Pressure => "air pressure",
            StepQuantity::TerminalVelocity => "terminal velocity",
            StepQuantity::ReynoldsNumber => "Reynolds number",
            StepQuantity::VentilationFactor => "ventilation factor",
            StepQuantity::EvaporationRate => "evaporation rate",
            StepQuantity::Radius => "drop radius",
        };
        f.write_str(name)
    }
}

/// Rejects NaN and infinities produced mid-computation.
pub(crate) fn ensure_finite(value: f64, what: &str) -> Result<f64, SimulationError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(SimulationError::Singularity(format!(
            "{} is not finite ({})",
            what, value
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_failure_names_step_and_quantity() {
        let error = SimulationError::Singularity("terminal velocity is zero".to_string())
            .at_step(42, StepQuantity::TerminalVelocity);

        let message = error.to_string();
        assert!(message.contains("Step 42"));
        assert!(message.contains("terminal velocity"));
        assert!(matches!(
            error.root_cause(),
            SimulationError::Singularity(_)
        ));
    }

    #[test]
    fn test_ensure_finite() {
        assert_eq!(ensure_finite(1.5, "x").unwrap(), 1.5);
        assert!(matches!(
            ensure_finite(f64::NAN, "x"),
            Err(SimulationError::Singularity(_))
        ));
        assert!(matches!(
            ensure_finite(f64::INFINITY, "x"),
            Err(SimulationError::Singularity(_))
        ));
    }
}
