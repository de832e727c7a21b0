//! JSON-RPC framing.
//!
//! Messages without binary data travel as WebSocket text frames holding the JSON text. Messages
//! with binary data travel as binary frames laid out as:
//!
//! ```text
//! [u32 little-endian JSON byte length][JSON text][raw binary payload]
//! ```
//!
//! Both directions use the same layout, so the decoders here also back the in-process mock
//! service used by the tests.

use crate::foundation::error::{BraynsError, BraynsResult};
use crate::network::message::{
    JsonRpcError, JsonRpcId, JsonRpcMessage, JsonRpcProgress, JsonRpcReply, JsonRpcRequest,
};
use serde_json::{Map, Value, json};

const HEADER_LEN: usize = 4;
const PROGRESS_METHOD: &str = "progress";

/// A WebSocket data frame, independent of the WebSocket implementation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Frame {
    /// UTF-8 JSON text.
    Text(String),
    /// Length-prefixed JSON followed by a binary payload.
    Binary(Vec<u8>),
}

/// Serialize a request into a frame.
pub fn encode_request(request: &JsonRpcRequest) -> BraynsResult<Frame> {
    let mut obj = Map::new();
    obj.insert("jsonrpc".to_owned(), json!("2.0"));
    if let Some(id) = &request.id {
        obj.insert("id".to_owned(), id_to_value(id));
    }
    obj.insert("method".to_owned(), json!(request.method));
    if let Some(params) = &request.params {
        obj.insert("params".to_owned(), params.clone());
    }
    compose(Value::Object(obj), &request.binary)
}

/// Serialize a service message into a frame.
pub fn encode_message(message: &JsonRpcMessage) -> BraynsResult<Frame> {
    match message {
        JsonRpcMessage::Reply(reply) => compose(
            json!({
                "jsonrpc": "2.0",
                "id": id_to_value(&reply.id),
                "result": reply.result,
            }),
            &reply.binary,
        ),
        JsonRpcMessage::Error(error) => {
            let mut body = Map::new();
            body.insert("code".to_owned(), json!(error.code));
            body.insert("message".to_owned(), json!(error.message));
            if let Some(data) = &error.data {
                body.insert("data".to_owned(), data.clone());
            }
            compose(
                json!({
                    "jsonrpc": "2.0",
                    "id": error.id.as_ref().map(id_to_value).unwrap_or(Value::Null),
                    "error": body,
                }),
                &[],
            )
        }
        JsonRpcMessage::Progress(progress) => compose(
            json!({
                "jsonrpc": "2.0",
                "method": PROGRESS_METHOD,
                "params": progress,
            }),
            &[],
        ),
    }
}

/// Parse a frame received by a client.
pub fn decode_message(frame: &Frame) -> BraynsResult<JsonRpcMessage> {
    let (value, binary) = split(frame)?;
    classify(value, binary)
}

/// Parse a frame received by a service.
pub fn decode_request(frame: &Frame) -> BraynsResult<JsonRpcRequest> {
    let (value, binary) = split(frame)?;
    let Value::Object(mut obj) = value else {
        return Err(BraynsError::protocol("request must be a JSON object"));
    };
    let method = match obj.remove("method") {
        Some(Value::String(m)) => m,
        _ => return Err(BraynsError::protocol("request has no method")),
    };
    Ok(JsonRpcRequest {
        id: parse_id(obj.remove("id"))?,
        method,
        params: obj.remove("params"),
        binary,
    })
}

fn compose(value: Value, binary: &[u8]) -> BraynsResult<Frame> {
    let text = serde_json::to_string(&value)
        .map_err(|e| BraynsError::serde(format!("encode JSON-RPC message: {e}")))?;
    if binary.is_empty() {
        return Ok(Frame::Text(text));
    }
    let len = u32::try_from(text.len()).map_err(|_| {
        BraynsError::validation(format!("JSON text too large ({} bytes)", text.len()))
    })?;
    let mut data = Vec::with_capacity(HEADER_LEN + text.len() + binary.len());
    data.extend_from_slice(&len.to_le_bytes());
    data.extend_from_slice(text.as_bytes());
    data.extend_from_slice(binary);
    Ok(Frame::Binary(data))
}

fn split(frame: &Frame) -> BraynsResult<(Value, Vec<u8>)> {
    match frame {
        Frame::Text(text) => Ok((parse_json(text.as_bytes())?, Vec::new())),
        Frame::Binary(data) => {
            let Some((header, rest)) = data.split_first_chunk::<HEADER_LEN>() else {
                return Err(BraynsError::protocol(format!(
                    "binary frame too short for its header ({} bytes)",
                    data.len()
                )));
            };
            let len = u32::from_le_bytes(*header) as usize;
            if len > rest.len() {
                return Err(BraynsError::protocol(format!(
                    "binary frame declares {len} bytes of JSON but holds {}",
                    rest.len()
                )));
            }
            let (text, binary) = rest.split_at(len);
            Ok((parse_json(text)?, binary.to_vec()))
        }
    }
}

fn parse_json(bytes: &[u8]) -> BraynsResult<Value> {
    serde_json::from_slice(bytes).map_err(|e| BraynsError::protocol(format!("invalid JSON: {e}")))
}

fn classify(value: Value, binary: Vec<u8>) -> BraynsResult<JsonRpcMessage> {
    let Value::Object(mut obj) = value else {
        return Err(BraynsError::protocol("message must be a JSON object"));
    };

    if let Some(method) = obj.remove("method") {
        if method != PROGRESS_METHOD {
            return Err(BraynsError::protocol(format!(
                "unexpected notification {method}"
            )));
        }
        let params = obj.remove("params").unwrap_or(Value::Null);
        let progress: JsonRpcProgress = serde_json::from_value(params)
            .map_err(|e| BraynsError::protocol(format!("invalid progress params: {e}")))?;
        return Ok(JsonRpcMessage::Progress(progress));
    }

    if let Some(error) = obj.remove("error") {
        let id = parse_id(obj.remove("id"))?;
        return parse_error(id, error).map(JsonRpcMessage::Error);
    }

    let id = parse_id(obj.remove("id"))?
        .ok_or_else(|| BraynsError::protocol("reply without id"))?;
    Ok(JsonRpcMessage::Reply(JsonRpcReply {
        id,
        result: obj.remove("result").unwrap_or(Value::Null),
        binary,
    }))
}

fn parse_error(id: Option<JsonRpcId>, error: Value) -> BraynsResult<JsonRpcError> {
    let Value::Object(mut obj) = error else {
        return Err(BraynsError::protocol("error member must be an object"));
    };
    let code = obj
        .get("code")
        .and_then(Value::as_i64)
        .ok_or_else(|| BraynsError::protocol("error without integer code"))?;
    let message = match obj.remove("message") {
        Some(Value::String(m)) => m,
        _ => String::new(),
    };
    Ok(JsonRpcError {
        id,
        code,
        message,
        data: obj.remove("data").filter(|d| !d.is_null()),
    })
}

fn parse_id(id: Option<Value>) -> BraynsResult<Option<JsonRpcId>> {
    match id {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Number(n)) => n
            .as_i64()
            .map(|i| Some(JsonRpcId::Int(i)))
            .ok_or_else(|| BraynsError::protocol(format!("id {n} is not an integer"))),
        Some(Value::String(s)) => Ok(Some(JsonRpcId::Str(s))),
        Some(other) => Err(BraynsError::protocol(format!("invalid id {other}"))),
    }
}

fn id_to_value(id: &JsonRpcId) -> Value {
    match id {
        JsonRpcId::Int(i) => json!(i),
        JsonRpcId::Str(s) => json!(s),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/network/codec.rs"]
mod tests;
