//! GraphQL request construction.

use serde::Serialize;
use serde_json::{Map, Value};

/// A GraphQL operation ready to send: document, operation name, variables.
#[derive(Debug, Clone, Serialize)]
pub struct GraphQlRequest {
    /// The operation document.
    pub query: String,
    /// The operation to execute within the document.
    #[serde(rename = "operationName", skip_serializing_if = "Option::is_none")]
    pub operation_name: Option<String>,
    /// Operation variables.
    pub variables: Map<String, Value>,
}

impl GraphQlRequest {
    /// Create a request for an operation document.
    pub fn new(document: impl Into<String>) -> Self {
        Self {
            query: document.into(),
            operation_name: None,
            variables: Map::new(),
        }
    }

    /// Set the operation name.
    pub fn operation(mut self, name: impl Into<String>) -> Self {
        self.operation_name = Some(name.into());
        self
    }

    /// Add a variable.
    pub fn variable(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.variables.insert(key.into(), value.into());
        self
    }
}
