//! Constant-speed travel around a closed loop of waypoints.
//!
//! A [`TrajectoryFollower`] heads for `waypoints[current_index]`, never
//! overshoots it, and once there moves on to the next waypoint in insertion
//! order, wrapping back to the first after the last. With no waypoints it
//! does nothing.
//!
//! ```
//! use trailcam::{TrajectoryFollower, Vec3};
//!
//! let mut follower = TrajectoryFollower::new(2.0);
//! follower.add_waypoint(Vec3::new(10.0, 0.0, 0.0));
//! for _ in 0..5 {
//!     follower.update(1.0);
//! }
//! assert_eq!(follower.position(), Vec3::new(10.0, 0.0, 0.0));
//! ```

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::config::TrajectoryOptions;

/// Default distance at which a waypoint counts as reached.
pub const ARRIVAL_EPSILON: f32 = 0.01;

/// When a reached waypoint hands over to the next one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArrivalPolicy {
    /// Arrival is detected on the tick after the follower lands on the
    /// waypoint, so it rests there for exactly one update.
    #[default]
    Dwell,
    /// The index advances in the same tick that brings the follower within
    /// the arrival distance.
    SinglePass,
}

#[derive(Clone, Debug, PartialEq)]
pub struct TrajectoryFollower {
    position: Vec3,
    waypoints: Vec<Vec3>,
    current_index: usize,
    /// World units per second.
    pub speed: f32,
    pub arrival_epsilon: f32,
    pub arrival: ArrivalPolicy,
}

impl Default for TrajectoryFollower {
    fn default() -> Self {
        Self::new(2.0)
    }
}

impl TrajectoryFollower {
    /// An inert follower at the origin with no waypoints.
    pub fn new(speed: f32) -> Self {
        Self {
            position: Vec3::ZERO,
            waypoints: Vec::new(),
            current_index: 0,
            speed,
            arrival_epsilon: ARRIVAL_EPSILON,
            arrival: ArrivalPolicy::Dwell,
        }
    }

    pub fn from_options(options: &TrajectoryOptions) -> Self {
        Self::new(options.speed)
            .epsilon(options.arrival_epsilon)
            .policy(options.arrival)
    }

    /// Start from `position` instead of the origin.
    pub fn at(mut self, position: impl Into<Vec3>) -> Self {
        self.position = position.into();
        self
    }

    /// Distance at which a waypoint counts as reached.
    pub fn epsilon(mut self, epsilon: f32) -> Self {
        self.arrival_epsilon = epsilon;
        self
    }

    /// How arrival hands over to the next waypoint.
    pub fn policy(mut self, arrival: ArrivalPolicy) -> Self {
        self.arrival = arrival;
        self
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Teleport the follower. The targeted waypoint is unchanged.
    pub fn set_position(&mut self, position: impl Into<Vec3>) {
        self.position = position.into();
    }

    /// The loop in visiting order.
    pub fn waypoints(&self) -> &[Vec3] {
        &self.waypoints
    }

    /// Index of the waypoint currently being approached.
    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// The waypoint currently being approached, if any.
    pub fn target(&self) -> Option<Vec3> {
        self.waypoints.get(self.current_index).copied()
    }

    /// True when there is nothing to follow.
    pub fn is_inert(&self) -> bool {
        self.waypoints.is_empty()
    }

    /// Append a waypoint to the end of the loop.
    ///
    /// The current target is unaffected; the new point is visited once the
    /// loop reaches it in insertion order.
    pub fn add_waypoint(&mut self, point: impl Into<Vec3>) {
        self.waypoints.push(point.into());
    }

    /// Advance by `dt` seconds of travel.
    ///
    /// A zero (or negative) `dt` is a no-op, including for arrival detection.
    pub fn update(&mut self, dt: f32) {
        if dt <= 0.0 {
            return;
        }
        let Some(target) = self.target() else {
            return;
        };

        match self.arrival {
            ArrivalPolicy::Dwell => {
                if self.position.distance(target) < self.arrival_epsilon {
                    self.advance();
                } else {
                    self.step_toward(target, dt);
                }
            }
            ArrivalPolicy::SinglePass => {
                if self.position.distance(target) >= self.arrival_epsilon {
                    self.step_toward(target, dt);
                }
                if self.position.distance(target) < self.arrival_epsilon {
                    self.advance();
                }
            }
        }
    }

    /// Move `speed * dt` toward `target`, clamping onto it rather than passing it.
    fn step_toward(&mut self, target: Vec3, dt: f32) {
        let delta = target - self.position;
        let distance = delta.length();
        let travel = self.speed * dt;
        if travel >= distance {
            self.position = target;
        } else {
            self.position += delta.normalize_or_zero() * travel;
        }
    }

    fn advance(&mut self) {
        let reached = self.current_index;
        self.current_index = (self.current_index + 1) % self.waypoints.len();
        log::debug!(
            "waypoint {reached} reached at {:?}, heading to {}",
            self.position,
            self.current_index
        );
    }
}
