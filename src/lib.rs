//! # motionkit
//!
//! Transport-agnostic motion control and command encoding for autonomous
//! multi-robot soccer platforms.
//!
//! It decouples *deciding where a robot should go* (strategy, upstream) from
//! *making it go there* (firmware, radio link or simulator, downstream). Each
//! control tick, a [`MotionController`] turns a robot's tracked
//! [`RobotState`] plus a destination and orientation goal into a bounded,
//! physically-realizable [`VelocityCommand`]; commands and other robot
//! actions travel as [`Primitive`] values with a uniform wire encoding that
//! any transport can carry.

pub mod controller;
pub mod geom;
pub mod primitive;
pub mod state;
pub mod visitor;

pub use controller::*;
pub use geom::*;
pub use primitive::*;
pub use state::*;
pub use visitor::*;
