//! Error types for the namewise library.
//!
//! Every fallible operation in the crate returns [`Result`], backed by the
//! structured [`NamewiseError`] enum. Inference failures, persistence failures
//! and per-file rename failures all flow through this one type so callers can
//! match on the kind and still print a readable message.

use std::io;

use thiserror::Error;

/// Main result type for namewise operations.
pub type Result<T> = std::result::Result<T, NamewiseError>;

/// Comprehensive error type for all namewise operations.
#[derive(Error, Debug)]
pub enum NamewiseError {
    /// Analysis was requested without files or without examples
    #[error("Insufficient input: {message}")]
    InsufficientInput {
        /// What was missing
        message: String,
    },

    /// The inference service rejected our credentials
    #[error("Authentication failed: {message}")]
    Authentication {
        /// Message reported by the service or transport
        message: String,
    },

    /// The inference service could not be reached or answered with an error
    #[error("Inference service unavailable: {message}")]
    ServiceUnavailable {
        /// Underlying transport or HTTP error message
        message: String,
        /// HTTP status code, when the service answered at all
        status: Option<u16>,
    },

    /// The service replied but no rename pairs could be recovered
    #[error("Unparseable inference response: {message}")]
    UnparseableResponse {
        /// Why parsing failed
        message: String,
        /// The untouched reply text, kept for inspection
        raw_response: String,
    },

    /// A single rename on disk failed
    #[error("File system error for '{name}': {message}")]
    FileSystem {
        /// Original file name of the failing entry
        name: String,
        /// Error description
        message: String,
    },

    /// An in-flight analysis was cancelled by the caller
    #[error("Analysis cancelled")]
    Cancelled,

    /// I/O related errors (session files, config files)
    #[error("I/O error: {message}")]
    Io {
        /// Human-readable error message
        message: String,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config {
        /// Error description
        message: String,
        /// Configuration field that caused the error
        field: Option<String>,
    },

    /// Serialization/deserialization errors
    #[error("Serialization error: {message}")]
    Serialization {
        /// Error description
        message: String,
        /// Data type being serialized
        data_type: Option<String>,
        /// Underlying serialization error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Validation errors for input data
    #[error("Validation error: {message}")]
    Validation {
        /// Error description
        message: String,
        /// Field or input that failed validation
        field: Option<String>,
    },

    /// Generic internal errors
    #[error("Internal error: {message}")]
    Internal {
        /// Error description
        message: String,
        /// Additional context
        context: Option<String>,
    },
}

impl NamewiseError {
    /// Create a new insufficient input error
    pub fn insufficient_input(message: impl Into<String>) -> Self {
        Self::InsufficientInput {
            message: message.into(),
        }
    }

    /// Create a new authentication error
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::Authentication {
            message: message.into(),
        }
    }

    /// Create a new service unavailable error
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable {
            message: message.into(),
            status: None,
        }
    }

    /// Create a service unavailable error carrying the HTTP status
    pub fn service_status(status: u16, message: impl Into<String>) -> Self {
        Self::ServiceUnavailable {
            message: message.into(),
            status: Some(status),
        }
    }

    /// Create a new unparseable response error, preserving the raw reply
    pub fn unparseable(message: impl Into<String>, raw_response: impl Into<String>) -> Self {
        Self::UnparseableResponse {
            message: message.into(),
            raw_response: raw_response.into(),
        }
    }

    /// Create a new per-entry file system error
    pub fn file_system(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::FileSystem {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Create a new I/O error with context
    pub fn io(message: impl Into<String>, source: io::Error) -> Self {
        Self::Io {
            message: message.into(),
            source,
        }
    }

    /// Create a new configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            field: None,
        }
    }

    /// Create a new configuration error with field context
    pub fn config_field(message: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            field: Some(field.into()),
        }
    }

    /// Create a new validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            field: None,
        }
    }

    /// Create a new validation error naming the offending field
    pub fn validation_field(message: impl Into<String>, field: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            field: Some(field.into()),
        }
    }

    /// Create a new internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
            context: None,
        }
    }

    /// Add context to an existing error
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        if let Self::Internal { context: ctx, .. } = &mut self {
            *ctx = Some(context.into());
        }
        self
    }

    /// Raw service reply attached to the error, if any
    pub fn raw_response(&self) -> Option<&str> {
        match self {
            Self::UnparseableResponse { raw_response, .. } => Some(raw_response),
            _ => None,
        }
    }

    /// Whether the failure happened before or at the inference service
    pub fn is_inference_error(&self) -> bool {
        matches!(
            self,
            Self::InsufficientInput { .. }
                | Self::Authentication { .. }
                | Self::ServiceUnavailable { .. }
                | Self::UnparseableResponse { .. }
                | Self::Cancelled
        )
    }
}

impl From<io::Error> for NamewiseError {
    fn from(err: io::Error) -> Self {
        Self::io("I/O operation failed", err)
    }
}

impl From<serde_json::Error> for NamewiseError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization {
            message: format!("JSON serialization failed: {err}"),
            data_type: Some("JSON".to_string()),
            source: Some(Box::new(err)),
        }
    }
}

impl From<serde_yaml::Error> for NamewiseError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Serialization {
            message: format!("YAML serialization failed: {err}"),
            data_type: Some("YAML".to_string()),
            source: Some(Box::new(err)),
        }
    }
}

/// Result extension trait for mapping foreign errors with a short description
pub trait NamewiseResultExt<T> {
    /// Map any displayable error into an internal error with context
    fn map_generic_err(self, context: &str) -> Result<T>;

    /// Map a JSON error into a serialization error naming the payload
    fn map_json_err(self, data_type: &str) -> Result<T>;
}

impl<T, E> NamewiseResultExt<T> for std::result::Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn map_generic_err(self, context: &str) -> Result<T> {
        self.map_err(|e| NamewiseError::internal(format!("{context}: {e}")))
    }

    fn map_json_err(self, data_type: &str) -> Result<T> {
        self.map_err(|e| NamewiseError::Serialization {
            message: format!("Failed to parse {data_type}: {e}"),
            data_type: Some(data_type.to_string()),
            source: Some(Box::new(e)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_creation() {
        let err = NamewiseError::config("Invalid configuration");
        assert!(matches!(err, NamewiseError::Config { .. }));

        let err = NamewiseError::insufficient_input("no files");
        assert!(matches!(err, NamewiseError::InsufficientInput { .. }));
    }

    #[test]
    fn test_unparseable_keeps_raw_response() {
        let err = NamewiseError::unparseable("no pairs found", "just some prose");
        assert_eq!(err.raw_response(), Some("just some prose"));
        assert!(err.is_inference_error());
        assert!(err.to_string().contains("no pairs found"));
    }

    #[test]
    fn test_service_status_display() {
        let err = NamewiseError::service_status(502, "bad gateway");
        if let NamewiseError::ServiceUnavailable { status, message } = &err {
            assert_eq!(*status, Some(502));
            assert_eq!(message, "bad gateway");
        } else {
            panic!("Expected ServiceUnavailable error");
        }
        assert!(err.to_string().contains("bad gateway"));
    }

    #[test]
    fn test_file_system_error_is_not_inference_error() {
        let err = NamewiseError::file_system("a.txt", "permission denied");
        assert!(!err.is_inference_error());
        assert_eq!(
            err.to_string(),
            "File system error for 'a.txt': permission denied"
        );
    }

    #[test]
    fn test_with_context_internal() {
        let err = NamewiseError::internal("Something went wrong").with_context("During save");
        if let NamewiseError::Internal { context, .. } = err {
            assert_eq!(context, Some("During save".to_string()));
        } else {
            panic!("Expected Internal error");
        }
    }

    #[test]
    fn test_with_context_non_contextual_error() {
        let err = NamewiseError::config("Bad config").with_context("Should not change");
        if let NamewiseError::Config { message, .. } = err {
            assert_eq!(message, "Bad config");
        } else {
            panic!("Expected Config error");
        }
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "File not found");
        let err: NamewiseError = io_err.into();
        assert!(matches!(err, NamewiseError::Io { .. }));
    }

    #[test]
    fn test_from_json_error() {
        let json_err = serde_json::from_str::<i32>("invalid json").unwrap_err();
        let err: NamewiseError = json_err.into();
        if let NamewiseError::Serialization { data_type, .. } = err {
            assert_eq!(data_type, Some("JSON".to_string()));
        } else {
            panic!("Expected Serialization error");
        }
    }

    #[test]
    fn test_map_json_err_names_payload() {
        let result: std::result::Result<i32, serde_json::Error> = serde_json::from_str("nope");
        let err = result.map_json_err("session file").unwrap_err();
        assert!(err.to_string().contains("session file"));
    }

    #[test]
    fn test_map_generic_err() {
        let result: std::result::Result<(), std::io::Error> = Err(std::io::Error::new(
            std::io::ErrorKind::Other,
            "boom",
        ));
        let err = result.map_generic_err("sending request").unwrap_err();
        if let NamewiseError::Internal { message, context } = err {
            assert_eq!(message, "sending request: boom");
            assert_eq!(context, None);
        } else {
            panic!("Expected Internal error");
        }
    }
}
