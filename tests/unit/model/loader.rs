use super::*;
use crate::mock::{Answer, serve};

fn models() -> Value {
    json!([{
        "id": 0,
        "type": "mesh",
        "bounds": {"min": [0.0, 0.0, 0.0], "max": [1.0, 1.0, 1.0]}
    }])
}

#[test]
fn raw_volume_properties_and_size() {
    let loader = RawVolumeLoader {
        dimensions: [4, 4, 2],
        data_type: VolumeDataType::UnsignedShort,
        ..RawVolumeLoader::default()
    };
    assert_eq!(loader.data_size(), 64);
    assert_eq!(
        loader.properties(),
        json!({"dimensions": [4, 4, 2], "spacing": [1.0, 1.0, 1.0], "data_type": "unsigned_short"})
    );
}

#[tokio::test]
async fn load_sends_path_and_loader() {
    let (instance, log) = serve(|_| Answer::Result(models())).await;
    let loaded = load(&instance, "/data/cube.obj", &MeshLoader).await.unwrap();
    assert_eq!(loaded.len(), 1);
    let request = log.last();
    assert_eq!(request.method, "add-model");
    assert_eq!(
        request.params,
        Some(json!({"path": "/data/cube.obj", "loader_name": "mesh", "loader_properties": {}}))
    );
}

#[tokio::test]
async fn upload_attaches_binary() {
    let (instance, log) = serve(|_| Answer::Result(models())).await;
    let loader = GenericLoader {
        name: "mesh".to_owned(),
        properties: json!({"flip": true}),
    };
    upload(&instance, ".obj", b"v 0 0 0\n".to_vec(), &loader)
        .await
        .unwrap();
    let request = log.last();
    assert_eq!(request.method, "upload-model");
    assert_eq!(request.binary, b"v 0 0 0\n");
    assert_eq!(request.params.unwrap()["type"], json!("obj"));
}

#[tokio::test]
async fn empty_upload_is_rejected() {
    let (instance, _log) = serve(|_| Answer::Result(models())).await;
    let err = upload(&instance, "obj", Vec::new(), &MeshLoader).await.unwrap_err();
    assert!(matches!(err, BraynsError::Validation(_)));
}

#[tokio::test]
async fn loaders_are_listed() {
    let (instance, _log) = serve(|_| {
        Answer::Result(json!([{"name": "mesh", "extensions": ["obj"], "input_parameters_schema": {}}]))
    })
    .await;
    let loaders = get_loaders(&instance).await.unwrap();
    assert_eq!(loaders[0].name, "mesh");
    assert_eq!(loaders[0].extensions, ["obj"]);
}
