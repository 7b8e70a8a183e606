//! Per-robot kinematic state with constant-velocity forward prediction.
//!
//! A [`RobotState`] is created by the observation pipeline with a full
//! snapshot and then kept current in one of three ways: a direct overwrite
//! with newer data ([`RobotState::update`]), a merge from a newer snapshot of
//! the same robot ([`RobotState::update_from`]), or an in-place advance to the
//! model's predicted state at a later instant ([`RobotState::predict_to`]).
//! Callers that only want a forecast use the `estimate_*` queries, which never
//! touch the stored state.

use crate::geom::{Angle, AngularVelocity, Timestamp};
use core::time::Duration;
use glam::DVec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::trace;

/// A unique robot identifier, stable for the lifetime of the tracked robot.
pub type RobotId = u32;

/// Contract violation while feeding a [`RobotState`].
///
/// Both variants indicate a caller bug or corrupted upstream data, not a
/// transient condition; there is nothing to retry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StateError {
    /// An update or prediction carried a timestamp earlier than the state's
    /// last update. Timestamps must be applied in non-decreasing order.
    #[error("timestamp {attempted:?} is earlier than the last update {current:?}")]
    StaleUpdate {
        /// The state's current last-update timestamp.
        current: Timestamp,
        /// The regressing timestamp that was rejected.
        attempted: Timestamp,
    },

    /// A snapshot merge was attempted between two different robots.
    #[error("cannot merge state of robot {found} into robot {expected}")]
    IdMismatch {
        /// Id of the robot being updated.
        expected: RobotId,
        /// Id carried by the offered snapshot.
        found: RobotId,
    },
}

/// The kinematic state of a single robot at a known instant.
///
/// Positions are metres in the world frame, velocities metres/second,
/// orientations radians (counterclockwise from the world x-axis).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RobotState {
    id: RobotId,
    position: DVec2,
    velocity: DVec2,
    orientation: Angle,
    angular_velocity: AngularVelocity,
    last_update: Timestamp,
}

impl RobotState {
    /// Creates a robot state from a full observation.
    pub const fn new(
        id: RobotId,
        position: DVec2,
        velocity: DVec2,
        orientation: Angle,
        angular_velocity: AngularVelocity,
        timestamp: Timestamp,
    ) -> Self {
        Self {
            id,
            position,
            velocity,
            orientation,
            angular_velocity,
            last_update: timestamp,
        }
    }

    /// The robot's id.
    pub const fn id(&self) -> RobotId {
        self.id
    }

    /// Current position in metres, world frame.
    pub const fn position(&self) -> DVec2 {
        self.position
    }

    /// Current velocity in metres/second, world frame.
    pub const fn velocity(&self) -> DVec2 {
        self.velocity
    }

    /// Current orientation.
    pub const fn orientation(&self) -> Angle {
        self.orientation
    }

    /// Current angular velocity.
    pub const fn angular_velocity(&self) -> AngularVelocity {
        self.angular_velocity
    }

    /// The instant at which this state was last updated or predicted.
    pub const fn last_update_timestamp(&self) -> Timestamp {
        self.last_update
    }

    /// Overwrites the state with a newer observation.
    ///
    /// # Errors
    /// [`StateError::StaleUpdate`] if `timestamp` is earlier than the current
    /// last-update timestamp; the state is left untouched.
    pub fn update(
        &mut self,
        position: DVec2,
        velocity: DVec2,
        orientation: Angle,
        angular_velocity: AngularVelocity,
        timestamp: Timestamp,
    ) -> Result<(), StateError> {
        self.check_monotonic(timestamp)?;
        self.position = position;
        self.velocity = velocity;
        self.orientation = orientation;
        self.angular_velocity = angular_velocity;
        self.last_update = timestamp;
        Ok(())
    }

    /// Copies every field except the id from a newer snapshot of the same
    /// robot.
    ///
    /// # Errors
    /// [`StateError::IdMismatch`] if the snapshot belongs to a different
    /// robot, [`StateError::StaleUpdate`] if its timestamp regresses.
    pub fn update_from(&mut self, other: &RobotState) -> Result<(), StateError> {
        if other.id != self.id {
            return Err(StateError::IdMismatch {
                expected: self.id,
                found: other.id,
            });
        }
        self.update(
            other.position,
            other.velocity,
            other.orientation,
            other.angular_velocity,
            other.last_update,
        )
    }

    /// Advances the stored state to its predicted state at `timestamp` under
    /// the constant-velocity model.
    ///
    /// Position and orientation move to their extrapolated values; velocity
    /// and angular velocity are unchanged. This mutates the state; use the
    /// `estimate_*` queries for a read-only forecast.
    ///
    /// # Errors
    /// [`StateError::StaleUpdate`] if `timestamp` is earlier than the current
    /// last-update timestamp.
    pub fn predict_to(&mut self, timestamp: Timestamp) -> Result<(), StateError> {
        self.check_monotonic(timestamp)?;
        let ahead = timestamp.duration_since(self.last_update);
        self.position = self.estimate_position_at(ahead);
        self.orientation = self.estimate_orientation_at(ahead);
        self.last_update = timestamp;
        trace!(robot_id = self.id, ?timestamp, "advanced robot state to predicted state");
        Ok(())
    }

    /// Estimated position `ahead` of the last update, without mutating the
    /// state.
    pub fn estimate_position_at(&self, ahead: Duration) -> DVec2 {
        self.position + self.velocity * ahead.as_secs_f64()
    }

    /// Estimated velocity `ahead` of the last update. Constant under the
    /// model, returned unchanged.
    pub fn estimate_velocity_at(&self, _ahead: Duration) -> DVec2 {
        self.velocity
    }

    /// Estimated orientation `ahead` of the last update, without mutating the
    /// state.
    pub fn estimate_orientation_at(&self, ahead: Duration) -> Angle {
        self.orientation + self.angular_velocity * ahead.as_secs_f64()
    }

    /// Estimated angular velocity `ahead` of the last update. Constant under
    /// the model, returned unchanged.
    pub fn estimate_angular_velocity_at(&self, _ahead: Duration) -> AngularVelocity {
        self.angular_velocity
    }

    fn check_monotonic(&self, timestamp: Timestamp) -> Result<(), StateError> {
        if timestamp < self.last_update {
            return Err(StateError::StaleUpdate {
                current: self.last_update,
                attempted: timestamp,
            });
        }
        Ok(())
    }
}

/// Two states are equal when id, position, velocity, orientation and angular
/// velocity all match; the last-update timestamp is not part of equality.
impl PartialEq for RobotState {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.position == other.position
            && self.velocity == other.velocity
            && self.orientation == other.orientation
            && self.angular_velocity == other.angular_velocity
    }
}
