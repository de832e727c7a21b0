use super::*;
use crate::mock::{Answer, serve};

fn model() -> Value {
    json!({
        "id": 1,
        "type": "geometry",
        "bounds": {"min": [-1.0, -1.0, -1.0], "max": [1.0, 1.0, 1.0]}
    })
}

#[test]
fn plane_from_normal_and_point() {
    let plane = Plane::from_normal(Vector3::new(0.0, 2.0, 0.0), Vector3::new(0.0, 3.0, 0.0)).unwrap();
    assert_eq!(plane.coefficients, [0.0, 1.0, 0.0, -3.0]);
    assert_eq!(plane.normal(), Vector3::Y);
    assert!(Plane::from_normal(Vector3::ZERO, Vector3::ZERO).is_err());
}

#[tokio::test]
async fn add_geometry_sends_geometry_color_pairs() {
    let (instance, log) = serve(|_| Answer::Result(model())).await;
    let spheres = [
        (
            Sphere {
                center: Vector3::ZERO,
                radius: 1.0,
            },
            Color4::RED,
        ),
        (
            Sphere {
                center: Vector3::X,
                radius: 0.5,
            },
            Color4::BLUE,
        ),
    ];
    let model = add_geometry(&instance, &spheres).await.unwrap();
    assert_eq!(model.model_type, "geometry");
    assert_eq!(log.last().method, "add-spheres");
    assert_eq!(
        log.last_params()[1],
        json!({"geometry": {"center": [1.0, 0.0, 0.0], "radius": 0.5}, "color": [0.0, 0.0, 1.0, 1.0]})
    );
}

#[tokio::test]
async fn empty_geometry_list_is_rejected_locally() {
    let (instance, log) = serve(|_| Answer::Result(model())).await;
    let none: [(Capsule, Color4); 0] = [];
    assert!(matches!(
        add_geometry(&instance, &none).await,
        Err(BraynsError::Validation(_))
    ));
    assert!(log.requests().is_empty());
}

#[tokio::test]
async fn clipping_geometries() {
    let (instance, log) = serve(|request| match request.method.as_str() {
        "clear-clipping-geometries" => Answer::Result(Value::Null),
        _ => Answer::Result(model()),
    })
    .await;
    let plane = Plane {
        coefficients: [1.0, 0.0, 0.0, 0.0],
    };
    add_clipping_geometry(&instance, &[plane]).await.unwrap();
    assert_eq!(log.last().method, "add-clipping-planes");
    assert_eq!(
        log.last_params(),
        json!([{"geometry": {"coefficients": [1.0, 0.0, 0.0, 0.0]}}])
    );
    clear_clipping_geometries(&instance).await.unwrap();
    assert_eq!(log.last().method, "clear-clipping-geometries");
}

#[tokio::test]
async fn boxes_and_bounded_planes_use_their_methods() {
    let (instance, log) = serve(|_| Answer::Result(model())).await;
    let cube = BoxGeometry::from(Bounds::unit());
    add_geometry(&instance, &[(cube, Color4::WHITE)]).await.unwrap();
    assert_eq!(log.last().method, "add-boxes");
    let plane = BoundedPlane {
        coefficients: [0.0, 0.0, 1.0, 0.0],
        bounds: Bounds::unit(),
    };
    add_geometry(&instance, &[(plane, Color4::WHITE)]).await.unwrap();
    assert_eq!(log.last().method, "add-bounded-planes");
}
