//! Angular and temporal value types shared by the state model and controller.
//!
//! Positions and velocities are plain [`glam::DVec2`] values (metres and
//! metres/second in the world frame); this module adds the two things glam
//! does not provide: a radian [`Angle`] with canonical wrapping, and a
//! monotonic [`Timestamp`].

use core::ops::{Add, Mul, Neg, Sub};
use core::time::Duration;
use serde::{Deserialize, Serialize};
use std::f64::consts::{PI, TAU};

/// An angle in radians.
///
/// The stored value is unbounded so that repeated accumulation (for example
/// constant-angular-velocity prediction) stays linear; call [`Angle::wrapped`]
/// when a canonical `(-π, π]` representative is needed.
#[derive(Clone, Copy, Debug, Default, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Angle(f64);

/// A rate of rotation in radians per second.
///
/// Shares the representation of [`Angle`]; the interpretation (rad vs rad/s)
/// is carried by the field it sits in.
pub type AngularVelocity = Angle;

impl Angle {
    /// The zero angle.
    pub const ZERO: Self = Self(0.0);

    /// Creates an angle from a value in radians.
    pub const fn from_radians(radians: f64) -> Self {
        Self(radians)
    }

    /// Creates an angle from a value in degrees.
    pub fn from_degrees(degrees: f64) -> Self {
        Self(degrees.to_radians())
    }

    /// The angle in radians.
    pub const fn radians(self) -> f64 {
        self.0
    }

    /// The angle in degrees.
    pub fn degrees(self) -> f64 {
        self.0.to_degrees()
    }

    /// The equivalent angle in the canonical `(-π, π]` range.
    pub fn wrapped(self) -> Self {
        let r = self.0.rem_euclid(TAU);
        Self(if r > PI { r - TAU } else { r })
    }

    /// The magnitude of the angle.
    pub fn abs(self) -> Self {
        Self(self.0.abs())
    }

    /// Sine of the angle.
    pub fn sin(self) -> f64 {
        self.0.sin()
    }

    /// Cosine of the angle.
    pub fn cos(self) -> f64 {
        self.0.cos()
    }
}

impl Add for Angle {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self(self.0 + rhs.0)
    }
}

impl Sub for Angle {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self(self.0 - rhs.0)
    }
}

impl Neg for Angle {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl Mul<f64> for Angle {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        Self(self.0 * rhs)
    }
}

/// A monotonic instant, measured as the duration since an arbitrary epoch
/// chosen by the observation pipeline.
///
/// Unlike [`std::time::Instant`] a `Timestamp` can be constructed at a fixed
/// point, which keeps prediction tests deterministic, and it serializes.
/// Ordering is total; [`crate::RobotState`] enforces that the timestamps it
/// is fed never decrease.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Timestamp(Duration);

impl Timestamp {
    /// The epoch itself.
    pub const ZERO: Self = Self(Duration::ZERO);

    /// Creates a timestamp at the given offset from the epoch.
    pub const fn new(since_epoch: Duration) -> Self {
        Self(since_epoch)
    }

    /// Creates a timestamp `seconds` after the epoch.
    pub fn from_secs_f64(seconds: f64) -> Self {
        Self(Duration::from_secs_f64(seconds))
    }

    /// The offset from the epoch.
    pub const fn since_epoch(self) -> Duration {
        self.0
    }

    /// Time elapsed from `earlier` to `self`, saturating to zero when
    /// `earlier` is the later of the two.
    pub fn duration_since(self, earlier: Self) -> Duration {
        self.0.saturating_sub(earlier.0)
    }
}

impl Add<Duration> for Timestamp {
    type Output = Self;

    fn add(self, rhs: Duration) -> Self {
        Self(self.0 + rhs)
    }
}
