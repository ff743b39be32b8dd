//! GraphQL response envelope handling.

use crate::FetchError;
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// A GraphQL error entry. Only the message is surfaced; it reaches the user
/// verbatim.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphQlError {
    pub message: String,
}

/// The standard GraphQL response envelope.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphQlResponse {
    #[serde(default)]
    pub data: Option<serde_json::Value>,
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

impl GraphQlResponse {
    /// Parse an envelope from a response body.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, FetchError> {
        serde_json::from_slice(bytes).map_err(|e| FetchError::ParseError(e.to_string()))
    }

    /// Check if the server reported GraphQL-level errors.
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    /// The first error message, if any.
    pub fn error_message(&self) -> Option<&str> {
        self.errors.first().map(|e| e.message.as_str())
    }

    /// Extract the named field from `data` as a typed value. GraphQL-level
    /// errors win over whatever partial data came alongside them.
    pub fn take<T: DeserializeOwned>(&self, field: &str) -> Result<T, FetchError> {
        if let Some(message) = self.error_message() {
            return Err(FetchError::GraphQl(message.to_string()));
        }
        let value = self
            .data
            .as_ref()
            .and_then(|data| data.get(field))
            .ok_or_else(|| FetchError::ParseError(format!("missing field `{field}` in response data")))?;
        serde_json::from_value(value.clone()).map_err(|e| FetchError::ParseError(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize, Debug, PartialEq)]
    #[serde(rename_all = "camelCase")]
    struct Status {
        status_code: String,
        status_message: String,
    }

    #[test]
    fn test_envelope_with_data() {
        let body = br#"{"data":{"deleteProduct":{"statusCode":"200","statusMessage":"Product Deleted"}}}"#;
        let response = GraphQlResponse::from_slice(body).unwrap();
        assert!(!response.has_errors());

        let status: Status = response.take("deleteProduct").unwrap();
        assert_eq!(status.status_code, "200");
    }

    #[test]
    fn test_envelope_with_errors() {
        let body = br#"{"data":null,"errors":[{"message":"Product not available"}]}"#;
        let response = GraphQlResponse::from_slice(body).unwrap();
        assert!(response.has_errors());
        assert_eq!(response.error_message(), Some("Product not available"));

        let result: Result<Status, _> = response.take("deleteProduct");
        assert!(matches!(result, Err(FetchError::GraphQl(_))));
    }

    #[test]
    fn test_envelope_missing_field() {
        let body = br#"{"data":{}}"#;
        let response = GraphQlResponse::from_slice(body).unwrap();
        let result: Result<Status, _> = response.take("deleteProduct");
        assert!(matches!(result, Err(FetchError::ParseError(_))));
    }

    #[test]
    fn test_envelope_malformed_body() {
        assert!(GraphQlResponse::from_slice(b"not json").is_err());
    }

    #[test]
    fn test_envelope_type_mismatch() {
        let body = br#"{"data":{"deleteProduct":42}}"#;
        let response = GraphQlResponse::from_slice(body).unwrap();
        let result: Result<Status, _> = response.take("deleteProduct");
        assert!(matches!(result, Err(FetchError::ParseError(_))));
    }
}
