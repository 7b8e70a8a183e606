//! The primitive command family and its generic wire encoding.
//!
//! A primitive is one atomic robot instruction (move, kick, pivot, ...) with
//! a fixed, named parameter layout, independent of transport. The strategy
//! layer constructs primitives from typed arguments; the transport layer
//! moves them as [`PrimitiveRecord`] values, a flat
//! `{name, robot_id, parameters, extra_bits}` shape it can serialize however
//! it likes. Each variant's parameter order is a fixed contract, kept in
//! exactly one place: the variant's `parameters()` / `from_record()` pair.
//!
//! Decoding validates fail-fast: a record whose `name` does not match the
//! variant's tag is a [`DecodeError::NameMismatch`]; a record with fewer
//! parameters than the variant's arity is a [`DecodeError::ParameterCount`].
//! Surplus trailing parameters are ignored.

use crate::controller::VelocityCommand;
use crate::geom::{Angle, AngularVelocity};
use crate::state::RobotId;
use crate::visitor::PrimitiveVisitor;
use glam::DVec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The generic, transport-owned wire shape of a primitive.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PrimitiveRecord {
    /// Variant tag; must match the decoding variant's fixed name.
    pub name: String,
    /// The robot this instruction targets.
    pub robot_id: RobotId,
    /// Numeric parameters in the variant's fixed order.
    pub parameters: Vec<f64>,
    /// Boolean flags in the variant's fixed order; empty when unused.
    pub extra_bits: Vec<bool>,
}

/// Failure while decoding a [`PrimitiveRecord`].
///
/// Always a caller bug or upstream corruption; decoding is never retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// The record is tagged for a different variant.
    #[error("record named `{found}` cannot decode as `{expected}`")]
    NameMismatch {
        /// Tag of the variant that attempted the decode.
        expected: &'static str,
        /// Tag carried by the record.
        found: String,
    },

    /// The record carries fewer parameters than the variant's fixed arity.
    #[error("`{name}` takes {expected} parameters, record carries {found}")]
    ParameterCount {
        /// Tag of the variant that attempted the decode.
        name: &'static str,
        /// The variant's parameter arity.
        expected: usize,
        /// Number of parameters in the record.
        found: usize,
    },

    /// The record's tag matches no known primitive variant.
    #[error("unknown primitive `{0}`")]
    UnknownName(String),
}

fn validate<'a>(
    record: &'a PrimitiveRecord,
    name: &'static str,
    arity: usize,
) -> Result<&'a [f64], DecodeError> {
    if record.name != name {
        return Err(DecodeError::NameMismatch {
            expected: name,
            found: record.name.clone(),
        });
    }
    if record.parameters.len() < arity {
        return Err(DecodeError::ParameterCount {
            name,
            expected: arity,
            found: record.parameters.len(),
        });
    }
    Ok(&record.parameters)
}

/// Drives the four wheels (and the dribbler) directly, bypassing the
/// on-robot velocity control. Wheel powers are signed duty-cycle levels.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DirectWheels {
    pub robot_id: RobotId,
    pub wheel0_power: i32,
    pub wheel1_power: i32,
    pub wheel2_power: i32,
    pub wheel3_power: i32,
    pub dribbler_rpm: f64,
}

impl DirectWheels {
    pub const NAME: &'static str = "direct_wheels";
    const PARAMETER_COUNT: usize = 5;

    /// Wire layout: `[wheel0, wheel1, wheel2, wheel3, dribbler_rpm]`.
    pub fn parameters(&self) -> Vec<f64> {
        vec![
            f64::from(self.wheel0_power),
            f64::from(self.wheel1_power),
            f64::from(self.wheel2_power),
            f64::from(self.wheel3_power),
            self.dribbler_rpm,
        ]
    }

    /// Decodes from a generic record tagged [`Self::NAME`].
    pub fn from_record(record: &PrimitiveRecord) -> Result<Self, DecodeError> {
        let p = validate(record, Self::NAME, Self::PARAMETER_COUNT)?;
        Ok(Self {
            robot_id: record.robot_id,
            wheel0_power: p[0] as i32,
            wheel1_power: p[1] as i32,
            wheel2_power: p[2] as i32,
            wheel3_power: p[3] as i32,
            dribbler_rpm: p[4],
        })
    }
}

/// Commands a velocity directly in the robot's body frame.
///
/// This is the variant the [`crate::MotionController`] output is shipped as.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DirectVelocity {
    pub robot_id: RobotId,
    /// Linear velocity in m/s, body frame.
    pub velocity: DVec2,
    /// Angular velocity in rad/s, counterclockwise positive.
    pub angular_velocity: AngularVelocity,
    pub dribbler_rpm: f64,
}

impl DirectVelocity {
    pub const NAME: &'static str = "direct_velocity";
    const PARAMETER_COUNT: usize = 4;

    /// Wraps one tick's controller output for the transport layer.
    pub fn from_command(robot_id: RobotId, command: &VelocityCommand, dribbler_rpm: f64) -> Self {
        Self {
            robot_id,
            velocity: command.linear,
            angular_velocity: command.angular,
            dribbler_rpm,
        }
    }

    /// Wire layout: `[x_velocity, y_velocity, angular_velocity, dribbler_rpm]`.
    pub fn parameters(&self) -> Vec<f64> {
        vec![
            self.velocity.x,
            self.velocity.y,
            self.angular_velocity.radians(),
            self.dribbler_rpm,
        ]
    }

    /// Decodes from a generic record tagged [`Self::NAME`].
    pub fn from_record(record: &PrimitiveRecord) -> Result<Self, DecodeError> {
        let p = validate(record, Self::NAME, Self::PARAMETER_COUNT)?;
        Ok(Self {
            robot_id: record.robot_id,
            velocity: DVec2::new(p[0], p[1]),
            angular_velocity: AngularVelocity::from_radians(p[2]),
            dribbler_rpm: p[3],
        })
    }
}

/// Pivots the robot around a point, holding a constant distance to it and
/// facing it throughout, taking the shortest rotational path.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Pivot {
    pub robot_id: RobotId,
    /// The point to pivot around, world frame.
    pub pivot_point: DVec2,
    /// Global angle from the pivot point to the robot's final position.
    pub final_angle: Angle,
    /// The robot's facing direction while pivoting.
    pub robot_orientation: Angle,
}

impl Pivot {
    pub const NAME: &'static str = "pivot";
    const PARAMETER_COUNT: usize = 4;

    /// Wire layout: `[pivot_point.x, pivot_point.y, final_angle, robot_orientation]`.
    pub fn parameters(&self) -> Vec<f64> {
        vec![
            self.pivot_point.x,
            self.pivot_point.y,
            self.final_angle.radians(),
            self.robot_orientation.radians(),
        ]
    }

    /// Decodes from a generic record tagged [`Self::NAME`].
    pub fn from_record(record: &PrimitiveRecord) -> Result<Self, DecodeError> {
        let p = validate(record, Self::NAME, Self::PARAMETER_COUNT)?;
        Ok(Self {
            robot_id: record.robot_id,
            pivot_point: DVec2::new(p[0], p[1]),
            final_angle: Angle::from_radians(p[2]),
            robot_orientation: Angle::from_radians(p[3]),
        })
    }
}

/// Moves to a destination point, arriving with the given orientation and
/// speed.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Move {
    pub robot_id: RobotId,
    /// Destination in metres, world frame.
    pub destination: DVec2,
    /// Orientation to arrive with.
    pub final_orientation: Angle,
    /// Speed to still carry on arrival, in m/s.
    pub final_speed: f64,
}

impl Move {
    pub const NAME: &'static str = "move";
    const PARAMETER_COUNT: usize = 4;

    /// Wire layout: `[destination.x, destination.y, final_orientation, final_speed]`.
    pub fn parameters(&self) -> Vec<f64> {
        vec![
            self.destination.x,
            self.destination.y,
            self.final_orientation.radians(),
            self.final_speed,
        ]
    }

    /// Decodes from a generic record tagged [`Self::NAME`].
    pub fn from_record(record: &PrimitiveRecord) -> Result<Self, DecodeError> {
        let p = validate(record, Self::NAME, Self::PARAMETER_COUNT)?;
        Ok(Self {
            robot_id: record.robot_id,
            destination: DVec2::new(p[0], p[1]),
            final_orientation: Angle::from_radians(p[2]),
            final_speed: p[3],
        })
    }
}

/// Moves to a destination point while spinning at a constant angular
/// velocity.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct MoveSpin {
    pub robot_id: RobotId,
    /// Destination in metres, world frame.
    pub destination: DVec2,
    /// Spin rate to hold for the whole motion, rad/s.
    pub angular_velocity: AngularVelocity,
}

impl MoveSpin {
    pub const NAME: &'static str = "move_spin";
    const PARAMETER_COUNT: usize = 3;

    /// Wire layout: `[destination.x, destination.y, angular_velocity]`.
    pub fn parameters(&self) -> Vec<f64> {
        vec![
            self.destination.x,
            self.destination.y,
            self.angular_velocity.radians(),
        ]
    }

    /// Decodes from a generic record tagged [`Self::NAME`].
    pub fn from_record(record: &PrimitiveRecord) -> Result<Self, DecodeError> {
        let p = validate(record, Self::NAME, Self::PARAMETER_COUNT)?;
        Ok(Self {
            robot_id: record.robot_id,
            destination: DVec2::new(p[0], p[1]),
            angular_velocity: AngularVelocity::from_radians(p[2]),
        })
    }
}

/// Kicks the ball flat along the ground from `origin` toward `direction` at
/// the given speed.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Kick {
    pub robot_id: RobotId,
    /// Where the ball is expected to be kicked from, world frame.
    pub origin: DVec2,
    /// Direction to kick in.
    pub direction: Angle,
    /// Ball speed off the kicker, m/s.
    pub speed: f64,
}

impl Kick {
    pub const NAME: &'static str = "kick";
    const PARAMETER_COUNT: usize = 4;

    /// Wire layout: `[origin.x, origin.y, direction, speed]`.
    pub fn parameters(&self) -> Vec<f64> {
        vec![
            self.origin.x,
            self.origin.y,
            self.direction.radians(),
            self.speed,
        ]
    }

    /// Decodes from a generic record tagged [`Self::NAME`].
    pub fn from_record(record: &PrimitiveRecord) -> Result<Self, DecodeError> {
        let p = validate(record, Self::NAME, Self::PARAMETER_COUNT)?;
        Ok(Self {
            robot_id: record.robot_id,
            origin: DVec2::new(p[0], p[1]),
            direction: Angle::from_radians(p[2]),
            speed: p[3],
        })
    }
}

/// Chips the ball over obstacles from `origin` toward `direction`, landing
/// at the given distance.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Chip {
    pub robot_id: RobotId,
    /// Where the ball is expected to be chipped from, world frame.
    pub origin: DVec2,
    /// Direction to chip in.
    pub direction: Angle,
    /// First-bounce distance, metres.
    pub distance: f64,
}

impl Chip {
    pub const NAME: &'static str = "chip";
    const PARAMETER_COUNT: usize = 4;

    /// Wire layout: `[origin.x, origin.y, direction, distance]`.
    pub fn parameters(&self) -> Vec<f64> {
        vec![
            self.origin.x,
            self.origin.y,
            self.direction.radians(),
            self.distance,
        ]
    }

    /// Decodes from a generic record tagged [`Self::NAME`].
    pub fn from_record(record: &PrimitiveRecord) -> Result<Self, DecodeError> {
        let p = validate(record, Self::NAME, Self::PARAMETER_COUNT)?;
        Ok(Self {
            robot_id: record.robot_id,
            origin: DVec2::new(p[0], p[1]),
            direction: Angle::from_radians(p[2]),
            distance: p[3],
        })
    }
}

/// Intercepts a moving ball, matching its speed and holding it with the
/// dribbler.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Catch {
    pub robot_id: RobotId,
    /// Speed to approach the ball with, m/s.
    pub velocity: f64,
    pub dribbler_rpm: f64,
    /// How far in front of the robot the ball is caught, metres.
    pub margin: f64,
}

impl Catch {
    pub const NAME: &'static str = "catch";
    const PARAMETER_COUNT: usize = 3;

    /// Wire layout: `[velocity, dribbler_rpm, margin]`.
    pub fn parameters(&self) -> Vec<f64> {
        vec![self.velocity, self.dribbler_rpm, self.margin]
    }

    /// Decodes from a generic record tagged [`Self::NAME`].
    pub fn from_record(record: &PrimitiveRecord) -> Result<Self, DecodeError> {
        let p = validate(record, Self::NAME, Self::PARAMETER_COUNT)?;
        Ok(Self {
            robot_id: record.robot_id,
            velocity: p[0],
            dribbler_rpm: p[1],
            margin: p[2],
        })
    }
}

/// The closed set of primitive commands.
///
/// Every consumer must handle every variant; adding one is a breaking change
/// that the compiler surfaces at each `match` and each
/// [`PrimitiveVisitor`] implementation.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Primitive {
    DirectWheels(DirectWheels),
    DirectVelocity(DirectVelocity),
    Pivot(Pivot),
    Move(Move),
    MoveSpin(MoveSpin),
    Kick(Kick),
    Chip(Chip),
    Catch(Catch),
}

impl Primitive {
    /// The variant's fixed wire tag.
    pub const fn name(&self) -> &'static str {
        match self {
            Self::DirectWheels(_) => DirectWheels::NAME,
            Self::DirectVelocity(_) => DirectVelocity::NAME,
            Self::Pivot(_) => Pivot::NAME,
            Self::Move(_) => Move::NAME,
            Self::MoveSpin(_) => MoveSpin::NAME,
            Self::Kick(_) => Kick::NAME,
            Self::Chip(_) => Chip::NAME,
            Self::Catch(_) => Catch::NAME,
        }
    }

    /// The robot this instruction targets.
    pub const fn robot_id(&self) -> RobotId {
        match self {
            Self::DirectWheels(p) => p.robot_id,
            Self::DirectVelocity(p) => p.robot_id,
            Self::Pivot(p) => p.robot_id,
            Self::Move(p) => p.robot_id,
            Self::MoveSpin(p) => p.robot_id,
            Self::Kick(p) => p.robot_id,
            Self::Chip(p) => p.robot_id,
            Self::Catch(p) => p.robot_id,
        }
    }

    /// Numeric parameters in the variant's fixed order.
    pub fn parameters(&self) -> Vec<f64> {
        match self {
            Self::DirectWheels(p) => p.parameters(),
            Self::DirectVelocity(p) => p.parameters(),
            Self::Pivot(p) => p.parameters(),
            Self::Move(p) => p.parameters(),
            Self::MoveSpin(p) => p.parameters(),
            Self::Kick(p) => p.parameters(),
            Self::Chip(p) => p.parameters(),
            Self::Catch(p) => p.parameters(),
        }
    }

    /// Boolean flags in the variant's fixed order. No current variant
    /// carries any; the accessor is part of the uniform encoding contract.
    pub fn extra_bits(&self) -> Vec<bool> {
        Vec::new()
    }

    /// Encodes to the generic wire record.
    pub fn to_record(&self) -> PrimitiveRecord {
        PrimitiveRecord {
            name: self.name().to_owned(),
            robot_id: self.robot_id(),
            parameters: self.parameters(),
            extra_bits: self.extra_bits(),
        }
    }

    /// Decodes a generic record by its tag.
    ///
    /// # Errors
    /// [`DecodeError::UnknownName`] for an unrecognized tag;
    /// [`DecodeError::ParameterCount`] when the tagged variant needs more
    /// parameters than the record carries.
    pub fn from_record(record: &PrimitiveRecord) -> Result<Self, DecodeError> {
        match record.name.as_str() {
            DirectWheels::NAME => DirectWheels::from_record(record).map(Self::DirectWheels),
            DirectVelocity::NAME => DirectVelocity::from_record(record).map(Self::DirectVelocity),
            Pivot::NAME => Pivot::from_record(record).map(Self::Pivot),
            Move::NAME => Move::from_record(record).map(Self::Move),
            MoveSpin::NAME => MoveSpin::from_record(record).map(Self::MoveSpin),
            Kick::NAME => Kick::from_record(record).map(Self::Kick),
            Chip::NAME => Chip::from_record(record).map(Self::Chip),
            Catch::NAME => Catch::from_record(record).map(Self::Catch),
            _ => Err(DecodeError::UnknownName(record.name.clone())),
        }
    }

    /// Double dispatch: invokes the visitor method matching this variant.
    ///
    /// The sole mechanism by which external code performs variant-specific
    /// operations; consumers never inspect the variant themselves.
    pub fn accept<V: PrimitiveVisitor + ?Sized>(&self, visitor: &mut V) {
        match self {
            Self::DirectWheels(p) => visitor.visit_direct_wheels(p),
            Self::DirectVelocity(p) => visitor.visit_direct_velocity(p),
            Self::Pivot(p) => visitor.visit_pivot(p),
            Self::Move(p) => visitor.visit_move(p),
            Self::MoveSpin(p) => visitor.visit_move_spin(p),
            Self::Kick(p) => visitor.visit_kick(p),
            Self::Chip(p) => visitor.visit_chip(p),
            Self::Catch(p) => visitor.visit_catch(p),
        }
    }
}

impl From<DirectWheels> for Primitive {
    fn from(p: DirectWheels) -> Self {
        Self::DirectWheels(p)
    }
}

impl From<DirectVelocity> for Primitive {
    fn from(p: DirectVelocity) -> Self {
        Self::DirectVelocity(p)
    }
}

impl From<Pivot> for Primitive {
    fn from(p: Pivot) -> Self {
        Self::Pivot(p)
    }
}

impl From<Move> for Primitive {
    fn from(p: Move) -> Self {
        Self::Move(p)
    }
}

impl From<MoveSpin> for Primitive {
    fn from(p: MoveSpin) -> Self {
        Self::MoveSpin(p)
    }
}

impl From<Kick> for Primitive {
    fn from(p: Kick) -> Self {
        Self::Kick(p)
    }
}

impl From<Chip> for Primitive {
    fn from(p: Chip) -> Self {
        Self::Chip(p)
    }
}

impl From<Catch> for Primitive {
    fn from(p: Catch) -> Self {
        Self::Catch(p)
    }
}
