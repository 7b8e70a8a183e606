//! Bang-bang velocity controller.
//!
//! Re-run once per control tick per robot: reads the robot's current
//! [`RobotState`] and a goal (destination point, desired final speed, desired
//! final orientation) and produces a bounded [`VelocityCommand`]. Maximum
//! available acceleration is applied toward the goal until a square-root
//! deceleration profile takes over near the target, so the robot settles
//! without overshoot. No state is retained between calls.

use crate::geom::{Angle, AngularVelocity};
use crate::state::RobotState;
use glam::DVec2;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Physical limits and tuning for the controller.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ControllerConfig {
    /// Maximum speed the robot may be commanded to, in m/s.
    pub max_linear_speed: f64,
    /// Maximum linear acceleration, in m/s². Bounds the velocity change
    /// available within one tick.
    pub max_linear_accel: f64,
    /// Maximum angular speed the robot may be commanded to, in rad/s.
    pub max_angular_speed: f64,
    /// Maximum angular acceleration, in rad/s². Bounds the turn-rate change
    /// available within one tick.
    pub max_angular_accel: f64,
    /// Gain of the square-root deceleration profile over remaining distance.
    pub linear_gain: f64,
    /// Gain of the square-root deceleration profile over remaining angle.
    pub angular_gain: f64,
    /// Distance dead-band, in metres. Inside it the profile commands zero.
    pub distance_tolerance: f64,
    /// Angular dead-band. Inside it the profile commands zero.
    pub angle_tolerance: Angle,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            max_linear_speed: 2.0,
            max_linear_accel: 3.0,
            max_angular_speed: 4.0 * std::f64::consts::PI,
            max_angular_accel: 4.0 * std::f64::consts::PI,
            linear_gain: 2.0,
            angular_gain: 3.0,
            distance_tolerance: 0.01,
            angle_tolerance: Angle::from_degrees(0.2),
        }
    }
}

/// One tick's worth of velocity command for a single robot.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct VelocityCommand {
    /// Linear velocity in m/s, expressed in the robot's body frame (drive
    /// hardware consumes body coordinates).
    pub linear: DVec2,
    /// Angular velocity in rad/s, counterclockwise positive.
    pub angular: AngularVelocity,
}

/// Stateless bang-bang controller.
///
/// All history the computation needs is read from the supplied
/// [`RobotState`], so one controller value can serve any number of robots,
/// concurrently.
#[derive(Clone, Debug, Default)]
pub struct MotionController {
    config: ControllerConfig,
}

impl MotionController {
    /// Creates a controller with the given limits and tuning.
    pub const fn new(config: ControllerConfig) -> Self {
        Self { config }
    }

    /// The controller's configuration.
    pub const fn config(&self) -> &ControllerConfig {
        &self.config
    }

    /// Computes the bounded velocity command for one tick of duration `dt`
    /// seconds.
    ///
    /// A non-positive `dt` is treated as a degenerate tick: the robot's
    /// current world-frame velocity and angular velocity are returned
    /// unchanged rather than destabilizing the loop over one bad duration.
    /// The condition is logged, since a healthy tick source never produces it.
    pub fn velocity_command(
        &self,
        robot: &RobotState,
        destination: DVec2,
        desired_final_speed: f64,
        desired_final_orientation: Angle,
        dt: f64,
    ) -> VelocityCommand {
        if dt <= 0.0 {
            warn!(
                robot_id = robot.id(),
                dt, "non-positive tick duration, passing current velocity through"
            );
            return VelocityCommand {
                linear: robot.velocity(),
                angular: robot.angular_velocity(),
            };
        }

        VelocityCommand {
            linear: self.linear_velocity(
                robot.position(),
                robot.velocity(),
                robot.orientation(),
                destination,
                desired_final_speed,
                dt,
            ),
            angular: self.angular_velocity(
                robot.angular_velocity(),
                robot.orientation(),
                desired_final_orientation,
                dt,
            ),
        }
    }

    /// Computes the new angular velocity for one tick.
    ///
    /// The target turn-rate magnitude follows a square-root profile over the
    /// remaining (wrapped) angle error, so the rate collapses to zero as the
    /// error shrinks; the change applied this tick is capped at
    /// `max_angular_accel * dt` in the direction of the error.
    pub fn angular_velocity(
        &self,
        current_angular_velocity: AngularVelocity,
        current_orientation: Angle,
        desired_orientation: Angle,
        dt: f64,
    ) -> AngularVelocity {
        let angle_error = (desired_orientation - current_orientation).wrapped();

        let target_magnitude = (angle_error.abs() - self.config.angle_tolerance)
            .radians()
            .max(0.0)
            .sqrt()
            * self.config.angular_gain;
        let target_magnitude = target_magnitude.min(self.config.max_angular_speed);

        let max_additional = self.config.max_angular_accel * dt;
        let new_rate =
            current_angular_velocity.radians() + max_additional.copysign(angle_error.radians());

        AngularVelocity::from_radians(new_rate.clamp(-target_magnitude, target_magnitude))
    }

    /// Computes the new linear velocity for one tick, in the robot's body
    /// frame.
    ///
    /// The tick's acceleration budget (`max_linear_accel * dt`) is spent
    /// first on cancelling the velocity component perpendicular to the line
    /// toward the destination, pulling the trajectory onto that line, and
    /// whatever remains is applied along it. The result is renormalized to a
    /// square-root deceleration profile over the remaining distance (plus the
    /// desired final speed), clamped to `max_linear_speed`, and rotated by
    /// the negated orientation into body coordinates.
    pub fn linear_velocity(
        &self,
        current_position: DVec2,
        current_velocity: DVec2,
        current_orientation: Angle,
        destination: DVec2,
        desired_final_speed: f64,
        dt: f64,
    ) -> DVec2 {
        let budget = self.config.max_linear_accel * dt;

        let to_dest = destination - current_position;
        let toward = to_dest.normalize_or_zero();

        let velocity_toward_dest = toward * current_velocity.dot(toward);
        let velocity_perpendicular = current_velocity - velocity_toward_dest;

        let remaining_budget = (budget - velocity_perpendicular.length()).max(0.0);
        let additional_velocity = toward * remaining_budget - velocity_perpendicular;

        let target_speed = (to_dest.length() - self.config.distance_tolerance)
            .max(0.0)
            .sqrt()
            * self.config.linear_gain
            + desired_final_speed;
        let target_speed = target_speed.clamp(0.0, self.config.max_linear_speed);

        let new_velocity =
            (current_velocity + additional_velocity).normalize_or_zero() * target_speed;

        // Drive commands are issued in body coordinates.
        DVec2::from_angle(-current_orientation.radians()).rotate(new_velocity)
    }
}
