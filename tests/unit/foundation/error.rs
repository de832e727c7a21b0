use super::*;

#[test]
fn display_prefixes_are_stable() {
    assert!(
        BraynsError::validation("x")
            .to_string()
            .contains("validation error:")
    );
    assert!(
        BraynsError::protocol("x")
            .to_string()
            .contains("protocol error:")
    );
    assert!(
        BraynsError::service_unavailable("x")
            .to_string()
            .contains("service unavailable:")
    );
    assert!(
        BraynsError::serde("x")
            .to_string()
            .contains("serialization error:")
    );
}

#[test]
fn json_rpc_errors_keep_code_and_message() {
    let err = BraynsError::from(JsonRpcError {
        id: None,
        code: -32601,
        message: "Method not found".to_string(),
        data: None,
    });
    assert!(err.to_string().contains("-32601"));
    assert!(err.to_string().contains("Method not found"));
    assert_eq!(err.as_json_rpc().map(|e| e.code), Some(-32601));
    assert!(BraynsError::ConnectionClosed.as_json_rpc().is_none());
}

#[test]
fn version_error_names_both_sides() {
    let err = BraynsError::Version {
        local: "3.2.0".to_string(),
        remote: "3.1.0".to_string(),
    };
    let text = err.to_string();
    assert!(text.contains("3.2.0") && text.contains("3.1.0"));
}

#[test]
fn other_preserves_source() {
    let base = std::io::Error::other("boom");
    let err = BraynsError::Other(anyhow::Error::new(base));
    assert!(err.to_string().contains("boom"));
}
