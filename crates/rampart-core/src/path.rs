//! Path model: the fixed route enemies walk from spawn to base.
//!
//! The path is arc-length parametrised so that normalized progress maps to
//! a constant walking speed across segments of different lengths.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::errors::PathError;
use crate::types::Position;

/// Ordered waypoints plus cached cumulative segment lengths.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PathModel {
    waypoints: Vec<Position>,
    /// `cumulative[i]` is the distance from the start to `waypoints[i]`.
    cumulative: Vec<f64>,
}

impl PathModel {
    pub fn new(waypoints: Vec<Position>) -> Result<Self, PathError> {
        if waypoints.len() < 2 {
            return Err(PathError::TooFewWaypoints {
                count: waypoints.len(),
            });
        }

        let mut cumulative = Vec::with_capacity(waypoints.len());
        let mut total = 0.0;
        cumulative.push(0.0);
        for pair in waypoints.windows(2) {
            total += pair[0].distance_to(&pair[1]);
            cumulative.push(total);
        }

        if total <= f64::EPSILON {
            return Err(PathError::ZeroLength);
        }

        Ok(Self {
            waypoints,
            cumulative,
        })
    }

    /// Spawn point.
    pub fn start(&self) -> Position {
        self.waypoints[0]
    }

    /// Base (final waypoint).
    pub fn end(&self) -> Position {
        self.waypoints[self.waypoints.len() - 1]
    }

    /// Total path length in pixels.
    pub fn length(&self) -> f64 {
        self.cumulative[self.cumulative.len() - 1]
    }

    /// Consecutive waypoint pairs.
    pub fn segments(&self) -> impl Iterator<Item = (Position, Position)> + '_ {
        self.waypoints.windows(2).map(|pair| (pair[0], pair[1]))
    }

    /// Shortest distance from `point` to any segment of the path.
    pub fn distance_to(&self, point: &Position) -> f64 {
        self.segments()
            .map(|(a, b)| distance_to_segment(point, &a, &b))
            .fold(f64::INFINITY, f64::min)
    }

    /// Position at normalized `progress` along the path. Clamped to [0, 1].
    pub fn point_at(&self, progress: f64) -> Position {
        let progress = progress.clamp(0.0, 1.0);
        let target = progress * self.length();

        // First waypoint whose cumulative distance reaches the target.
        let idx = self
            .cumulative
            .partition_point(|&d| d < target)
            .clamp(1, self.waypoints.len() - 1);

        let a = DVec2::from(self.waypoints[idx - 1]);
        let b = DVec2::from(self.waypoints[idx]);
        let seg_len = self.cumulative[idx] - self.cumulative[idx - 1];
        if seg_len <= f64::EPSILON {
            return b.into();
        }
        let t = (target - self.cumulative[idx - 1]) / seg_len;
        a.lerp(b, t).into()
    }
}

/// Distance from `point` to the segment `a`–`b` (clamped projection, not the
/// infinite line).
pub fn distance_to_segment(point: &Position, a: &Position, b: &Position) -> f64 {
    let p = DVec2::from(*point);
    let a = DVec2::from(*a);
    let b = DVec2::from(*b);
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq <= f64::EPSILON {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}
