use super::*;

#[test]
fn hex_parses_with_and_without_alpha() {
    let c = Color4::from_hex("#ff000080").unwrap();
    assert_eq!(c.r, 1.0);
    assert_eq!(c.g, 0.0);
    assert!((c.a - 128.0 / 255.0).abs() < 1e-12);

    let c = Color4::from_hex("00FF00").unwrap();
    assert_eq!(c, Color4::GREEN);

    assert!(Color4::from_hex("#12345").is_err());
    assert!(Color4::from_hex("#zz0000").is_err());
    assert!(Color3::from_hex("#ff000080").is_err());
}

#[test]
fn colors_serialize_as_arrays() {
    assert_eq!(
        serde_json::to_value(Color4::RED).unwrap(),
        serde_json::json!([1.0, 0.0, 0.0, 1.0])
    );
    assert_eq!(
        serde_json::to_value(Color3::WHITE).unwrap(),
        serde_json::json!([1.0, 1.0, 1.0])
    );
}

#[test]
fn color4_accepts_rgb_arrays_and_hex() {
    let c: Color4 = serde_json::from_str("[0.5, 0.25, 1.0]").unwrap();
    assert_eq!(c, Color4::new(0.5, 0.25, 1.0, 1.0));
    let c: Color4 = serde_json::from_str("\"#0000ff\"").unwrap();
    assert_eq!(c, Color4::BLUE);
    assert!(serde_json::from_str::<Color4>("[1.0]").is_err());
}

#[test]
fn color3_accepts_opaque_rgba_arrays() {
    let c: Color3 = serde_json::from_str("[1.0, 0.5, 0.0, 1.0]").unwrap();
    assert_eq!(c, Color3::new(1.0, 0.5, 0.0));
    assert!(serde_json::from_str::<Color3>("[1.0, 0.5, 0.0, 0.5]").is_err());
    assert!(serde_json::from_str::<Color3>("[1.0, 0.5]").is_err());
}

#[test]
fn alpha_helpers_round_trip() {
    let c = Color3::from_rgb8(255, 0, 255).with_alpha(0.5);
    assert_eq!(c.a, 0.5);
    assert_eq!(c.without_alpha(), Color3::new(1.0, 0.0, 1.0));
    assert_eq!(Color4::from(Color3::BLACK), Color4::BLACK);
}
