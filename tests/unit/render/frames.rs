use super::*;
use crate::mock::{Answer, serve};

#[test]
fn key_frames_share_view() {
    let frames = KeyFrame::from_indices([0, 5, 10], None);
    assert_eq!(frames.iter().map(|f| f.index).collect::<Vec<_>>(), [0, 5, 10]);
    assert_eq!(
        serde_json::to_value(frames[1]).unwrap(),
        json!({"frame_index": 5})
    );
    let with_view = KeyFrame::from_indices([1], Some(View::default()));
    assert!(serde_json::to_value(with_view[0]).unwrap()["camera_view"].is_object());
}

#[tokio::test]
async fn export_sends_frames_and_settings() {
    let (instance, log) = serve(|_| Answer::Result(Value::Null)).await;
    let exporter = FrameExporter {
        resolution: Some(Resolution::new(100, 50).unwrap()),
        ..FrameExporter::new(KeyFrame::from_indices(0..2, None))
    };
    exporter.export_frames(&instance, "/remote/frames").await.unwrap();
    assert_eq!(log.last().method, "export-frames");
    assert_eq!(
        log.last_params(),
        json!({
            "path": "/remote/frames",
            "key_frames": [{"frame_index": 0}, {"frame_index": 1}],
            "image_settings": {"format": "png", "size": [100, 50]},
            "sequential_naming": true
        })
    );
}

#[tokio::test]
async fn no_frames_is_rejected() {
    let (instance, log) = serve(|_| Answer::Result(Value::Null)).await;
    let err = FrameExporter::default()
        .export_frames(&instance, "/remote")
        .await
        .unwrap_err();
    assert!(matches!(err, BraynsError::Validation(_)));
    assert!(log.requests().is_empty());
}
