//! Introspection of the methods exposed by the service.

use crate::foundation::error::BraynsResult;
use crate::network::instance::Instance;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Description of one service method.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Entrypoint {
    /// Method name.
    #[serde(rename = "title")]
    pub method: String,
    /// Human readable description.
    #[serde(default)]
    pub description: String,
    /// Plugin registering the method.
    #[serde(default)]
    pub plugin: String,
    /// Whether the method reports progress and can be cancelled.
    #[serde(rename = "async", default)]
    pub asynchronous: bool,
    /// JSON schema of the params, if any.
    #[serde(default)]
    pub params: Option<Value>,
    /// JSON schema of the result, if any.
    #[serde(rename = "returns", default)]
    pub result: Option<Value>,
}

/// Names of every method of the service.
pub async fn get_methods(instance: &Instance) -> BraynsResult<Vec<String>> {
    instance.request_as("registry", &Value::Null).await
}

/// Description of `method`.
pub async fn get_entrypoint(instance: &Instance, method: &str) -> BraynsResult<Entrypoint> {
    instance
        .request_as("schema", &json!({ "endpoint": method }))
        .await
}

/// Description of every method of the service.
pub async fn get_entrypoints(instance: &Instance) -> BraynsResult<Vec<Entrypoint>> {
    let mut entrypoints = Vec::new();
    for method in get_methods(instance).await? {
        entrypoints.push(get_entrypoint(instance, &method).await?);
    }
    Ok(entrypoints)
}

#[cfg(test)]
#[path = "../tests/unit/application/entrypoint.rs"]
mod tests;
