use std::fmt;

use crate::trajectory_system::descent::DescentState;
use crate::trajectory_system::trajectory::Trajectory;

/// Summary of one descent for side-by-side comparison.
#[derive(Debug, Clone, PartialEq)]
pub struct DescentReport {
    pub planet: String,
    pub initial_radius: f64,
    pub initial_altitude: f64,
    pub steps: usize,
    pub outcome: DescentState,
    pub final_altitude: f64,
    pub final_radius: f64,
    /// Share of the initial drop mass lost, in [0, 1].
    pub mass_fraction_evaporated: f64,
}

impl DescentReport {
    pub fn from_trajectory(
        planet: &str,
        initial_radius: f64,
        initial_altitude: f64,
        trajectory: &Trajectory,
    ) -> Self {
        let (final_altitude, final_radius) = trajectory
            .last()
            .map_or((initial_altitude, initial_radius), |p| (p.altitude, p.radius));

        let mass_fraction_evaporated = if initial_radius > 0.0 {
            let remaining = (final_radius.max(0.0) / initial_radius).powi(3);
            (1.0 - remaining).clamp(0.0, 1.0)
        } else {
            1.0
        };

        DescentReport {
            planet: planet.to_string(),
            initial_radius,
            initial_altitude,
            steps: trajectory.len(),
            outcome: trajectory.state,
            final_altitude,
            final_radius,
            mass_fraction_evaporated,
        }
    }

    pub fn survived(&self) -> bool {
        self.outcome == DescentState::Grounded
    }

    fn format_altitude(altitude: f64) -> String {
        if altitude.abs() >= 1000.0 {
            format!("{:.2} km", altitude / 1000.0)
        } else {
            format!("{:.2} m", altitude)
        }
    }

    fn format_radius(radius: f64) -> String {
        if radius.abs() >= 1e-3 {
            format!("{:.3} mm", radius * 1e3)
        } else {
            format!("{:.2} µm", radius * 1e6)
        }
    }
}

impl fmt::Display for DescentReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let outcome = match self.outcome {
            DescentState::Grounded => "reached ground",
            DescentState::Evaporated => "evaporated",
            DescentState::Running => "running",
        };
        write!(
            f,
            "{:<8} r0 = {:>10} from {:>9} | {:<14} after {:>5} steps at {:>9} | r = {:>10} | mass lost {:>5.1}%",
            self.planet,
            Self::format_radius(self.initial_radius),
            Self::format_altitude(self.initial_altitude),
            outcome,
            self.steps,
            Self::format_altitude(self.final_altitude),
            Self::format_radius(self.final_radius),
            self.mass_fraction_evaporated * 100.0
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::trajectory_system::trajectory::TrajectoryPoint;
    use approx::assert_relative_eq;

    fn trajectory(points: &[(f64, f64)], state: DescentState) -> Trajectory {
        Trajectory::new(
            points
                .iter()
                .map(|&(altitude, radius)| TrajectoryPoint { altitude, radius })
                .collect(),
            state,
        )
    }

    #[test]
    fn test_survivor_report() {
        let t = trajectory(&[(0.1, 4.5e-4), (0.0, 4e-4)], DescentState::Grounded);
        let report = DescentReport::from_trajectory("Earth", 5e-4, 0.2, &t);

        assert!(report.survived());
        assert_eq!(report.steps, 2);
        assert_eq!(report.final_radius, 4e-4);
        assert_relative_eq!(report.mass_fraction_evaporated, 1.0 - 0.8_f64.powi(3), epsilon = 1e-12);
    }

    #[test]
    fn test_overshoot_counts_as_fully_evaporated() {
        let t = trajectory(&[(599.9, -6e-5)], DescentState::Evaporated);
        let report = DescentReport::from_trajectory("Earth", 1e-5, 600.0, &t);

        assert!(!report.survived());
        assert_eq!(report.mass_fraction_evaporated, 1.0);
        assert_eq!(report.final_radius, -6e-5);
    }

    #[test]
    fn test_grown_drop_reports_no_loss() {
        let t = trajectory(&[(0.0, 6e-4)], DescentState::Grounded);
        let report = DescentReport::from_trajectory("Mars", 5e-4, 0.1, &t);
        assert_eq!(report.mass_fraction_evaporated, 0.0);
    }

    #[test]
    fn test_empty_trajectory_report() {
        let t = trajectory(&[], DescentState::Grounded);
        let report = DescentReport::from_trajectory("Titan", 1e-3, 0.0, &t);
        assert_eq!(report.steps, 0);
        assert_eq!(report.final_radius, 1e-3);
        assert_eq!(report.mass_fraction_evaporated, 0.0);
    }

    #[test]
    fn test_display() {
        let t = trajectory(&[(0.0, 4e-4)], DescentState::Grounded);
        let line = DescentReport::from_trajectory("Earth", 1.5e-3, 1500.0, &t).to_string();
        assert!(line.contains("Earth"));
        assert!(line.contains("1.500 mm"));
        assert!(line.contains("1.50 km"));
        assert!(line.contains("400.00 µm"));
        assert!(line.contains("reached ground"));
    }
}
