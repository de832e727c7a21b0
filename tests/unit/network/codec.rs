use super::*;

#[test]
fn request_without_binary_is_a_text_frame() {
    let req = JsonRpcRequest::new(1, "get-version");
    let Frame::Text(text) = encode_request(&req).unwrap() else {
        panic!("expected text frame");
    };
    let v: Value = serde_json::from_str(&text).unwrap();
    assert_eq!(v, json!({"jsonrpc": "2.0", "id": 1, "method": "get-version"}));
}

#[test]
fn notification_omits_id_and_keeps_params() {
    let req = JsonRpcRequest::notification("cancel").with_params(json!({"id": 3}));
    let Frame::Text(text) = encode_request(&req).unwrap() else {
        panic!("expected text frame");
    };
    let v: Value = serde_json::from_str(&text).unwrap();
    assert!(v.get("id").is_none());
    assert_eq!(v["params"], json!({"id": 3}));
}

#[test]
fn request_with_binary_is_length_prefixed() {
    let req = JsonRpcRequest::new("a", "upload-model").with_binary(vec![1u8, 2, 3]);
    let Frame::Binary(data) = encode_request(&req).unwrap() else {
        panic!("expected binary frame");
    };
    let len = u32::from_le_bytes([data[0], data[1], data[2], data[3]]) as usize;
    let v: Value = serde_json::from_slice(&data[4..4 + len]).unwrap();
    assert_eq!(v["id"], json!("a"));
    assert_eq!(&data[4 + len..], &[1, 2, 3]);

    let back = decode_request(&Frame::Binary(data)).unwrap();
    assert_eq!(back, req);
}

#[test]
fn reply_with_binary_keeps_trailer() {
    let msg = JsonRpcMessage::Reply(JsonRpcReply {
        id: JsonRpcId::Int(7),
        result: json!({"accumulation": 1}),
        binary: b"PNG".to_vec(),
    });
    let frame = encode_message(&msg).unwrap();
    assert!(matches!(frame, Frame::Binary(_)));
    assert_eq!(decode_message(&frame).unwrap(), msg);
}

#[test]
fn classifies_error_progress_and_reply() {
    let err = decode_message(&Frame::Text(
        r#"{"jsonrpc":"2.0","id":2,"error":{"code":-32601,"message":"nope","data":null}}"#.into(),
    ))
    .unwrap();
    let JsonRpcMessage::Error(e) = err else {
        panic!("expected error");
    };
    assert_eq!(e.id, Some(JsonRpcId::Int(2)));
    assert_eq!(e.code, JsonRpcError::METHOD_NOT_FOUND);
    assert_eq!(e.data, None);

    let progress = decode_message(&Frame::Text(
        r#"{"jsonrpc":"2.0","method":"progress","params":{"id":4,"operation":"load","amount":0.5}}"#
            .into(),
    ))
    .unwrap();
    assert_eq!(
        progress,
        JsonRpcMessage::Progress(JsonRpcProgress {
            id: JsonRpcId::Int(4),
            operation: "load".to_string(),
            amount: 0.5,
        })
    );

    let reply = decode_message(&Frame::Text(r#"{"jsonrpc":"2.0","id":"x"}"#.into())).unwrap();
    let JsonRpcMessage::Reply(r) = reply else {
        panic!("expected reply");
    };
    assert_eq!(r.id, JsonRpcId::Str("x".to_string()));
    assert_eq!(r.result, Value::Null);
}

#[test]
fn global_error_has_no_id() {
    let msg = decode_message(&Frame::Text(
        r#"{"jsonrpc":"2.0","id":null,"error":{"code":-32700,"message":"parse"}}"#.into(),
    ))
    .unwrap();
    let JsonRpcMessage::Error(e) = msg else {
        panic!("expected error");
    };
    assert_eq!(e.id, None);
    assert_eq!(e.code, JsonRpcError::PARSE_ERROR);
}

#[test]
fn rejects_malformed_frames() {
    assert!(decode_message(&Frame::Text("not json".into())).is_err());
    assert!(decode_message(&Frame::Text("[1, 2]".into())).is_err());
    assert!(decode_message(&Frame::Text(r#"{"result": 1}"#.into())).is_err());
    assert!(decode_message(&Frame::Text(r#"{"method": "other"}"#.into())).is_err());
    assert!(decode_message(&Frame::Text(r#"{"id": 1.5, "result": 1}"#.into())).is_err());
    assert!(decode_message(&Frame::Binary(vec![1, 0])).is_err());
    assert!(decode_message(&Frame::Binary(vec![10, 0, 0, 0, b'{', b'}'])).is_err());
}
