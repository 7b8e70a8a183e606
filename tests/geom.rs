use approx::assert_relative_eq;
use core::time::Duration;
use motionkit::{Angle, Timestamp};
use std::f64::consts::PI;

#[test]
fn wrapped_maps_into_the_canonical_range() {
    assert_relative_eq!(
        Angle::from_radians(3.0 * PI / 2.0).wrapped().radians(),
        -PI / 2.0,
        epsilon = 1e-12
    );
    assert_relative_eq!(
        Angle::from_radians(2.0 * PI).wrapped().radians(),
        0.0,
        epsilon = 1e-12
    );
    assert_relative_eq!(Angle::from_radians(-PI).wrapped().radians(), PI, epsilon = 1e-12);
    assert_relative_eq!(Angle::from_radians(PI).wrapped().radians(), PI, epsilon = 1e-12);
    assert_relative_eq!(
        Angle::from_radians(-0.1).wrapped().radians(),
        -0.1,
        epsilon = 1e-12
    );
    assert_relative_eq!(
        Angle::from_radians(0.25).wrapped().radians(),
        0.25,
        epsilon = 1e-12
    );
}

#[test]
fn wrapped_is_idempotent() {
    for raw in [-7.5, -PI, -0.3, 0.0, 1.0, PI, 9.42] {
        let once = Angle::from_radians(raw).wrapped();
        assert_relative_eq!(once.wrapped().radians(), once.radians(), epsilon = 1e-12);
    }
}

#[test]
fn degrees_and_radians_convert_both_ways() {
    assert_relative_eq!(Angle::from_degrees(180.0).radians(), PI, epsilon = 1e-12);
    assert_relative_eq!(Angle::from_radians(PI / 2.0).degrees(), 90.0, epsilon = 1e-12);
}

#[test]
fn angle_arithmetic() {
    let a = Angle::from_radians(1.0);
    let b = Angle::from_radians(0.25);

    assert_relative_eq!((a + b).radians(), 1.25);
    assert_relative_eq!((a - b).radians(), 0.75);
    assert_relative_eq!((-a).radians(), -1.0);
    assert_relative_eq!((b * 3.0).radians(), 0.75);
    assert_relative_eq!(Angle::from_radians(-0.5).abs().radians(), 0.5);
}

#[test]
fn timestamps_order_and_subtract() {
    let earlier = Timestamp::new(Duration::from_secs(10));
    let later = earlier + Duration::from_millis(1500);

    assert!(later > earlier);
    assert_eq!(later.duration_since(earlier), Duration::from_millis(1500));
    // Saturates instead of underflowing when the operands are swapped.
    assert_eq!(earlier.duration_since(later), Duration::ZERO);
}
