use super::*;
use crate::mock::{Answer, serve};

#[test]
fn default_material_is_an_empty_object() {
    assert_eq!(serde_json::to_value(DefaultMaterial {}).unwrap(), json!({}));
}

#[test]
fn partial_replies_fill_defaults() {
    let material: PrincipledMaterial = serde_json::from_value(json!({"metallic": 1.0})).unwrap();
    assert_eq!(material.metallic, 1.0);
    assert_eq!(material.coat_ior, 1.5);
    assert_eq!(material.edge_color, Color3::WHITE);
}

#[tokio::test]
async fn material_name_for_model() {
    let (instance, log) = serve(|_| Answer::Result(json!("glass"))).await;
    assert_eq!(get_material_name(&instance, 4).await.unwrap(), "glass");
    assert_eq!(log.last().method, "get-material-type");
    assert_eq!(log.last_params(), json!({"id": 4}));
}

#[tokio::test]
async fn get_material_uses_type_method() {
    let (instance, log) = serve(|_| Answer::Result(json!({"index_of_refraction": 1.33}))).await;
    let glass: GlassMaterial = get_material(&instance, 4).await.unwrap();
    assert_eq!(glass.index_of_refraction, 1.33);
    assert_eq!(log.last().method, "get-material-glass");
}

#[tokio::test]
async fn set_material_wraps_material_with_model_id() {
    let (instance, log) = serve(|_| Answer::Result(Value::Null)).await;
    let emissive = EmissiveMaterial {
        color: Color3::RED,
        intensity: 5.0,
    };
    set_material(&instance, 2, &emissive).await.unwrap();
    assert_eq!(log.last().method, "set-material-emissive");
    assert_eq!(
        log.last_params(),
        json!({"model_id": 2, "material": {"color": [1.0, 0.0, 0.0], "intensity": 5.0}})
    );

    set_material(&instance, 2, &CarPaintMaterial::default()).await.unwrap();
    assert_eq!(log.last().method, "set-material-carpaint");
}
