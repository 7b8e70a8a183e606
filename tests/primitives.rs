use glam::DVec2;
use motionkit::{
    Angle, AngularVelocity, Catch, Chip, ControllerConfig, DecodeError, DirectVelocity,
    DirectWheels, Kick, MotionController, Move, MoveSpin, Pivot, Primitive, PrimitiveRecord,
    PrimitiveVisitor, RobotState, Timestamp,
};

fn pivot_fixture() -> Pivot {
    Pivot {
        robot_id: 6,
        pivot_point: DVec2::new(-1.0, 2.0),
        final_angle: Angle::from_radians(1.5),
        robot_orientation: Angle::ZERO,
    }
}

fn every_primitive() -> Vec<Primitive> {
    vec![
        DirectWheels {
            robot_id: 0,
            wheel0_power: 120,
            wheel1_power: -120,
            wheel2_power: 85,
            wheel3_power: -85,
            dribbler_rpm: 10_000.0,
        }
        .into(),
        DirectVelocity {
            robot_id: 1,
            velocity: DVec2::new(1.25, -0.5),
            angular_velocity: AngularVelocity::from_radians(2.0),
            dribbler_rpm: 0.0,
        }
        .into(),
        pivot_fixture().into(),
        Move {
            robot_id: 2,
            destination: DVec2::new(3.0, -0.25),
            final_orientation: Angle::from_radians(0.75),
            final_speed: 0.5,
        }
        .into(),
        MoveSpin {
            robot_id: 3,
            destination: DVec2::new(-2.0, 0.5),
            angular_velocity: AngularVelocity::from_radians(6.0),
        }
        .into(),
        Kick {
            robot_id: 4,
            origin: DVec2::new(0.5, 0.5),
            direction: Angle::from_radians(-0.25),
            speed: 5.0,
        }
        .into(),
        Chip {
            robot_id: 5,
            origin: DVec2::new(0.5, -0.5),
            direction: Angle::from_radians(0.25),
            distance: 2.5,
        }
        .into(),
        Catch {
            robot_id: 6,
            velocity: 1.5,
            dribbler_rpm: 8_000.0,
            margin: 0.1,
        }
        .into(),
    ]
}

#[test]
fn pivot_parameter_array_is_fixed_order() {
    let pivot = pivot_fixture();

    assert_eq!(pivot.parameters(), vec![-1.0, 2.0, 1.5, 0.0]);
    assert_eq!(Primitive::from(pivot).extra_bits(), Vec::<bool>::new());
}

#[test]
fn direct_wheels_parameter_array_is_fixed_order() {
    let wheels = DirectWheels {
        robot_id: 2,
        wheel0_power: 100,
        wheel1_power: -50,
        wheel2_power: 25,
        wheel3_power: 0,
        dribbler_rpm: 12_500.0,
    };

    assert_eq!(
        wheels.parameters(),
        vec![100.0, -50.0, 25.0, 0.0, 12_500.0]
    );
}

#[test]
fn encoded_record_carries_tag_and_robot_id() {
    let record = Primitive::from(pivot_fixture()).to_record();

    assert_eq!(record.name, "pivot");
    assert_eq!(record.robot_id, 6);
    assert_eq!(record.parameters, vec![-1.0, 2.0, 1.5, 0.0]);
    assert!(record.extra_bits.is_empty());
}

#[test]
fn every_variant_round_trips_through_the_wire_record() {
    for primitive in every_primitive() {
        let decoded = Primitive::from_record(&primitive.to_record()).unwrap();
        assert_eq!(decoded, primitive);
    }
}

#[test]
fn decoding_under_a_wrong_tag_is_a_name_mismatch() {
    let record = Primitive::from(pivot_fixture()).to_record();

    let err = Kick::from_record(&record).unwrap_err();

    assert_eq!(
        err,
        DecodeError::NameMismatch {
            expected: "kick",
            found: "pivot".to_owned(),
        }
    );
}

#[test]
fn decoding_with_too_few_parameters_is_rejected() {
    let record = PrimitiveRecord {
        name: "pivot".to_owned(),
        robot_id: 6,
        parameters: vec![-1.0, 2.0, 1.5],
        extra_bits: Vec::new(),
    };

    let err = Pivot::from_record(&record).unwrap_err();

    assert_eq!(
        err,
        DecodeError::ParameterCount {
            name: "pivot",
            expected: 4,
            found: 3,
        }
    );
}

#[test]
fn surplus_trailing_parameters_are_ignored() {
    let mut record = Primitive::from(pivot_fixture()).to_record();
    record.parameters.push(99.0);

    let decoded = Pivot::from_record(&record).unwrap();

    assert_eq!(decoded, pivot_fixture());
}

#[test]
fn unknown_tag_is_rejected_at_dispatch() {
    let record = PrimitiveRecord {
        name: "teleport".to_owned(),
        robot_id: 0,
        parameters: Vec::new(),
        extra_bits: Vec::new(),
    };

    let err = Primitive::from_record(&record).unwrap_err();

    assert_eq!(err, DecodeError::UnknownName("teleport".to_owned()));
}

/// A transport-layer stand-in: records which handler each primitive
/// dispatched to.
#[derive(Default)]
struct TagCollector {
    visited: Vec<&'static str>,
}

impl PrimitiveVisitor for TagCollector {
    fn visit_direct_wheels(&mut self, _primitive: &DirectWheels) {
        self.visited.push(DirectWheels::NAME);
    }

    fn visit_direct_velocity(&mut self, _primitive: &DirectVelocity) {
        self.visited.push(DirectVelocity::NAME);
    }

    fn visit_pivot(&mut self, _primitive: &Pivot) {
        self.visited.push(Pivot::NAME);
    }

    fn visit_move(&mut self, _primitive: &Move) {
        self.visited.push(Move::NAME);
    }

    fn visit_move_spin(&mut self, _primitive: &MoveSpin) {
        self.visited.push(MoveSpin::NAME);
    }

    fn visit_kick(&mut self, _primitive: &Kick) {
        self.visited.push(Kick::NAME);
    }

    fn visit_chip(&mut self, _primitive: &Chip) {
        self.visited.push(Chip::NAME);
    }

    fn visit_catch(&mut self, _primitive: &Catch) {
        self.visited.push(Catch::NAME);
    }
}

#[test]
fn accept_dispatches_to_the_matching_visitor_method() {
    let mut collector = TagCollector::default();

    for primitive in every_primitive() {
        primitive.accept(&mut collector);
    }

    assert_eq!(
        collector.visited,
        vec![
            "direct_wheels",
            "direct_velocity",
            "pivot",
            "move",
            "move_spin",
            "kick",
            "chip",
            "catch",
        ]
    );
}

#[test]
fn controller_output_wraps_as_a_direct_velocity_primitive() {
    let controller = MotionController::new(ControllerConfig::default());
    let robot = RobotState::new(
        7,
        DVec2::ZERO,
        DVec2::ZERO,
        Angle::ZERO,
        AngularVelocity::ZERO,
        Timestamp::ZERO,
    );

    let command = controller.velocity_command(&robot, DVec2::new(1.0, 0.0), 0.0, Angle::ZERO, 0.016);
    let primitive = DirectVelocity::from_command(robot.id(), &command, 5_000.0);

    assert_eq!(primitive.robot_id, 7);
    assert_eq!(primitive.velocity, command.linear);
    assert_eq!(primitive.angular_velocity, command.angular);
    assert_eq!(primitive.dribbler_rpm, 5_000.0);

    // And it ships like any other primitive.
    let record = Primitive::from(primitive).to_record();
    assert_eq!(record.name, "direct_velocity");
    assert_eq!(record.parameters.len(), 4);
}
