use super::*;
use crate::camera::projection::PerspectiveProjection;
use crate::mock::{Answer, serve};

#[tokio::test]
async fn download_returns_reply_binary() {
    let (instance, log) = serve(|_| Answer::Binary(Value::Null, b"\x89PNG".to_vec())).await;
    let snapshot = Snapshot {
        resolution: Some(Resolution::new(64, 32).unwrap()),
        frame: Some(3),
        ..Snapshot::default()
    };
    let data = snapshot.download(&instance, ImageFormat::Png).await.unwrap();
    assert_eq!(data, b"\x89PNG");
    assert_eq!(log.last().method, "snapshot");
    assert_eq!(
        log.last_params(),
        json!({"image_settings": {"format": "png", "size": [64, 32]}, "simulation_frame": 3})
    );
}

#[tokio::test]
async fn overrides_are_sent_when_set() {
    let (instance, log) = serve(|_| Answer::Binary(Value::Null, vec![1])).await;
    let snapshot = Snapshot {
        view: Some(View::default()),
        camera: Some(NamedParams::camera(&PerspectiveProjection::default()).unwrap()),
        jpeg_quality: 50,
        ..Snapshot::default()
    };
    snapshot.download(&instance, ImageFormat::Jpeg).await.unwrap();
    let params = log.last_params();
    assert_eq!(params["image_settings"]["quality"], json!(50));
    assert_eq!(params["camera"]["name"], json!("perspective"));
    assert_eq!(params["camera_view"]["up"], json!([0.0, 1.0, 0.0]));
    assert!(params.get("renderer").is_none());
}

#[tokio::test]
async fn missing_image_is_protocol_error() {
    let (instance, _log) = serve(|_| Answer::Result(Value::Null)).await;
    let err = Snapshot::default()
        .download(&instance, ImageFormat::Png)
        .await
        .unwrap_err();
    assert!(matches!(err, BraynsError::Protocol(_)), "{err}");
}

#[tokio::test]
async fn save_writes_local_file_in_extension_format() {
    let (instance, log) = serve(|_| Answer::Binary(Value::Null, b"jpeg-bytes".to_vec())).await;
    let path = std::env::temp_dir().join(format!("brayns-snapshot-{}.jpeg", std::process::id()));
    Snapshot::default().save(&instance, &path).await.unwrap();
    assert_eq!(std::fs::read(&path).unwrap(), b"jpeg-bytes");
    std::fs::remove_file(&path).unwrap();
    assert_eq!(log.last_params()["image_settings"]["format"], json!("jpg"));
}

#[tokio::test]
async fn save_remotely_sends_path() {
    let (instance, log) = serve(|_| Answer::Result(Value::Null)).await;
    Snapshot::default()
        .save_remotely(&instance, "/remote/out.png")
        .await
        .unwrap();
    assert_eq!(log.last_params()["file_path"], json!("/remote/out.png"));
}

#[tokio::test]
async fn unknown_extension_is_rejected_before_sending() {
    let (instance, log) = serve(|_| Answer::Result(Value::Null)).await;
    assert!(Snapshot::default().save(&instance, "out.bmp").await.is_err());
    assert!(log.requests().is_empty());
}
