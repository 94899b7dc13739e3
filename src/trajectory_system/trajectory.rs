use super::descent::{DescentState, DropState};

/// One recorded drop state, in meters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrajectoryPoint {
    pub altitude: f64,
    pub radius: f64,
}

impl From<DropState> for TrajectoryPoint {
    fn from(state: DropState) -> Self {
        TrajectoryPoint {
            altitude: state.altitude,
            radius: state.radius,
        }
    }
}

/// Ordered post-step states of one descent and how it ended.
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    pub points: Vec<TrajectoryPoint>,
    pub state: DescentState,
}

impl Trajectory {
    pub fn new(points: Vec<TrajectoryPoint>, state: DescentState) -> Self {
        Trajectory { points, state }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<&TrajectoryPoint> {
        self.points.first()
    }

    pub fn last(&self) -> Option<&TrajectoryPoint> {
        self.points.last()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, TrajectoryPoint> {
        self.points.iter()
    }

    /// `(altitude, radius)` pairs.
    pub fn to_pairs(&self) -> Vec<(f64, f64)> {
        self.points.iter().map(|p| (p.altitude, p.radius)).collect()
    }

    pub fn reached_ground(&self) -> bool {
        self.state == DescentState::Grounded
    }

    pub fn min_radius(&self) -> Option<f64> {
        self.points.iter().map(|p| p.radius).reduce(f64::min)
    }
}

impl<'a> IntoIterator for &'a Trajectory {
    type Item = &'a TrajectoryPoint;
    type IntoIter = std::slice::Iter<'a, TrajectoryPoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}
