use super::*;

fn close(a: Vector3, b: Vector3) -> bool {
    (a - b).length() < 1e-9
}

#[test]
fn single_axis_euler_rotates_as_expected() {
    let r = Rotation::from_euler_degrees(Vector3::new(0.0, 0.0, 90.0));
    assert!(close(r.apply(Vector3::X), Vector3::Y));

    let r = Rotation::from_euler_degrees(Vector3::new(90.0, 0.0, 0.0));
    assert!(close(r.apply(Vector3::Y), Vector3::Z));
}

#[test]
fn euler_round_trip_degrees() {
    let angles = Vector3::new(10.0, -20.0, 30.0);
    let r = Rotation::from_euler_degrees(angles);
    assert!(close(r.euler_degrees(), angles));
}

#[test]
fn axis_angle_and_then_compose() {
    let quarter = Rotation::from_axis_angle_degrees(Vector3::Z, 90.0).unwrap();
    let half = quarter.then(&quarter);
    assert!(close(half.apply(Vector3::X), Vector3::NEG_X));
    assert!((half.angle_degrees() - 180.0).abs() < 1e-9);
    assert!(close(half.then(&half.inverse()).apply(Vector3::X), Vector3::X));
    assert!(Rotation::from_axis_angle(Vector3::ZERO, 1.0).is_err());
}

#[test]
fn between_maps_source_to_target() {
    let r = Rotation::between(Vector3::X, Vector3::new(0.0, 2.0, 0.0)).unwrap();
    assert!(close(r.apply(Vector3::X), Vector3::Y));
    assert!(Rotation::between(Vector3::ZERO, Vector3::X).is_err());
}

#[test]
fn apply_around_center() {
    let r = Rotation::from_axis_angle_degrees(Vector3::Z, 180.0).unwrap();
    let p = r.apply_around(Vector3::new(2.0, 1.0, 0.0), Vector3::new(1.0, 1.0, 0.0));
    assert!(close(p, Vector3::new(0.0, 1.0, 0.0)));
}

#[test]
fn wire_shape_is_xyzw_and_normalized_on_read() {
    let v = serde_json::to_value(Rotation::identity()).unwrap();
    assert_eq!(v, serde_json::json!([0.0, 0.0, 0.0, 1.0]));

    let r: Rotation = serde_json::from_str("[0.0, 0.0, 0.0, 2.0]").unwrap();
    assert_eq!(r, Rotation::identity());
    assert!(serde_json::from_str::<Rotation>("[0.0, 0.0, 0.0, 0.0]").is_err());
}
