use std::{fmt, time::Duration};

use thiserror::Error;

/// Main error type for the itinerary pipeline
#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Upstream(#[from] UpstreamError),

    #[error(transparent)]
    ResponseParse(#[from] ResponseParseError),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, PlannerError>;

impl PlannerError {
    /// Whether a caller could reasonably resubmit the same request.
    ///
    /// The pipeline itself never retries.
    pub fn is_retryable(&self) -> bool {
        match self {
            PlannerError::Upstream(err) => err.is_retryable(),
            PlannerError::ResponseParse(_) => true,
            PlannerError::Config(_) | PlannerError::Validation(_) => false,
        }
    }

    /// Get the error code for structured responses
    pub fn error_code(&self) -> &'static str {
        match self {
            PlannerError::Config(_) => "CONFIG_ERROR",
            PlannerError::Validation(_) => "VALIDATION_ERROR",
            PlannerError::Upstream(_) => "UPSTREAM_ERROR",
            PlannerError::ResponseParse(_) => "RESPONSE_PARSE_ERROR",
        }
    }

    /// Convert to a structured error payload
    pub fn to_error_payload(&self) -> serde_json::Value {
        serde_json::json!({
            "success": false,
            "error": self.to_string(),
            "code": self.error_code(),
            "retryable": self.is_retryable()
        })
    }
}

/// A single rejected input field, named by its wire (camelCase) name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Trip parameters were missing or malformed. Raised before any upstream call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Validation error: {}", join_fields(.fields))]
pub struct ValidationError {
    pub fields: Vec<FieldError>,
}

impl ValidationError {
    pub fn new(fields: Vec<FieldError>) -> Self {
        Self { fields }
    }

    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(vec![FieldError::new(field, message)])
    }

    /// Names of every offending field, in the order they were checked.
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|f| f.field.as_str()).collect()
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.fields.iter().any(|f| f.field == field)
    }
}

fn join_fields(fields: &[FieldError]) -> String {
    fields
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Failure talking to the chat completion provider.
#[derive(Error, Debug)]
pub enum UpstreamError {
    #[error("Upstream transport error: {0}")]
    Transport(String),

    #[error("Upstream request timed out after {}ms", .0.as_millis())]
    Timeout(Duration),

    #[error("Upstream HTTP {status} error: {message}")]
    Status { status: u16, message: String },

    #[error("Malformed upstream response envelope: {0}")]
    MalformedEnvelope(String),
}

impl UpstreamError {
    pub fn is_retryable(&self) -> bool {
        match self {
            UpstreamError::Transport(_) | UpstreamError::Timeout(_) => true,
            UpstreamError::Status { status, .. } => *status == 429 || *status >= 500,
            UpstreamError::MalformedEnvelope(_) => false,
        }
    }
}

/// The completion text was not valid JSON, or had a `cities` value of the wrong shape.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid JSON response from model: {message} (content: {content:?})")]
pub struct ResponseParseError {
    /// Completion text exactly as returned by the model
    pub content: String,
    pub message: String,
}

impl ResponseParseError {
    pub fn new(content: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_message_lists_every_field() {
        let err = ValidationError::new(vec![
            FieldError::new("startDate", "is required"),
            FieldError::new("interests", "must not be empty"),
        ]);

        let message = err.to_string();
        assert!(message.contains("startDate: is required"));
        assert!(message.contains("interests: must not be empty"));
        assert_eq!(err.field_names(), vec!["startDate", "interests"]);
    }

    #[test]
    fn test_error_codes() {
        let err: PlannerError = ValidationError::single("endDate", "is required").into();
        assert_eq!(err.error_code(), "VALIDATION_ERROR");
        assert!(!err.is_retryable());

        let err: PlannerError = UpstreamError::Status {
            status: 503,
            message: "overloaded".to_string(),
        }
        .into();
        assert_eq!(err.error_code(), "UPSTREAM_ERROR");
        assert!(err.is_retryable());

        let err: PlannerError = UpstreamError::Status {
            status: 401,
            message: "bad key".to_string(),
        }
        .into();
        assert!(!err.is_retryable());
    }

    #[test]
    fn test_timeout_message_keeps_sub_second_precision() {
        let err = UpstreamError::Timeout(Duration::from_millis(300));
        assert_eq!(err.to_string(), "Upstream request timed out after 300ms");
        assert!(err.is_retryable());
    }

    #[test]
    fn test_parse_error_keeps_content() {
        let err: PlannerError = ResponseParseError::new("not json", "expected value").into();
        let payload = err.to_error_payload();

        assert_eq!(payload["success"], false);
        assert_eq!(payload["code"], "RESPONSE_PARSE_ERROR");
        assert!(payload["error"].as_str().unwrap().contains("not json"));
    }
}
