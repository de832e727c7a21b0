use super::*;
use crate::foundation::core::Vector3;
use crate::mock::{Answer, serve};

fn model_json(id: u32) -> Value {
    json!({
        "id": id,
        "type": "mesh",
        "bounds": {"min": [0.0, 0.0, 0.0], "max": [1.0, 2.0, 3.0]},
        "info": {"path": "cube.obj"},
        "is_visible": true,
        "transform": {
            "translation": [0.0, 0.0, 0.0],
            "rotation": [0.0, 0.0, 0.0, 1.0],
            "scale": [1.0, 1.0, 1.0]
        }
    })
}

#[test]
fn model_parses_service_shape() {
    let model: Model = serde_json::from_value(model_json(4)).unwrap();
    assert_eq!(model.id, 4);
    assert_eq!(model.model_type, "mesh");
    assert!(model.visible);
    assert_eq!(model.bounds.depth(), 3.0);
    assert_eq!(model.transform, Transform::identity());
}

#[test]
fn missing_optional_fields_use_defaults() {
    let model: Model = serde_json::from_value(json!({
        "id": 1,
        "type": "light",
        "bounds": {"min": [0.0, 0.0, 0.0], "max": [0.0, 0.0, 0.0]}
    }))
    .unwrap();
    assert!(model.visible);
    assert_eq!(model.info, Value::Null);
}

#[tokio::test]
async fn get_model_sends_id() {
    let (instance, log) = serve(|_| Answer::Result(model_json(7))).await;
    let model = get_model(&instance, 7).await.unwrap();
    assert_eq!(model.id, 7);
    assert_eq!(log.last().method, "get-model");
    assert_eq!(log.last_params(), json!({"id": 7}));
}

#[tokio::test]
async fn update_model_only_sends_changed_fields() {
    let (instance, log) = serve(|_| Answer::Result(model_json(2))).await;
    update_model(&instance, 2, Some(false), None).await.unwrap();
    assert_eq!(
        log.last_params(),
        json!({"model_id": 2, "model": {"is_visible": false}})
    );

    let transform = Transform::from_translation(Vector3::new(1.0, 0.0, 0.0));
    update_model(&instance, 2, None, Some(&transform)).await.unwrap();
    let params = log.last_params();
    assert_eq!(params["model"]["transform"]["translation"], json!([1.0, 0.0, 0.0]));
    assert!(params["model"].get("is_visible").is_none());
}

#[tokio::test]
async fn instantiate_returns_one_model_per_transform() {
    let (instance, log) = serve(|_| Answer::Result(json!([model_json(5), model_json(6)]))).await;
    let transforms = [Transform::identity(), Transform::identity()];
    let models = instantiate_model(&instance, 1, &transforms).await.unwrap();
    assert_eq!(models.iter().map(|m| m.id).collect::<Vec<_>>(), [5, 6]);
    let request = log.last();
    assert_eq!(request.method, "instantiate-model");
    assert_eq!(request.params.unwrap()["transforms"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn remove_and_clear_use_their_methods() {
    let (instance, log) = serve(|_| Answer::Result(Value::Null)).await;
    remove_models(&instance, &[1, 2]).await.unwrap();
    clear_models(&instance).await.unwrap();
    assert_eq!(log.methods(), ["remove-model", "clear-models"]);
    assert_eq!(log.requests()[0].params, Some(json!({"ids": [1, 2]})));
}

#[tokio::test]
async fn unknown_model_is_a_json_rpc_error() {
    let (instance, _log) = serve(|_| Answer::Error(1, "no model with ID 9".to_owned())).await;
    let err = get_model(&instance, 9).await.unwrap_err();
    assert_eq!(err.as_json_rpc().map(|e| e.code), Some(1));
}
