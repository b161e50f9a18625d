//! Error types and handling for the route audit engine.
//!
//! This module provides a single opaque [`Error`] with a stable error code per
//! category. Errors render either as a plain message (console) or as a
//! structured [`ErrorResponse`] (CI mode).
//!
//! # Design
//!
//! This module uses an opaque `Error` struct paired with an `ErrorKind` enum,
//! following the `std::io::Error` pattern. Internal error sources can change
//! without breaking consumers.
//!
//! # Example
//!
//! ```rust
//! use route_audit::{Error, ErrorKind};
//!
//! let error = Error::unsupported_format(".txt");
//!
//! match error.kind() {
//!     ErrorKind::UnsupportedFormat => println!("Cannot export: {}", error),
//!     ErrorKind::Extraction => println!("No route table: {}", error),
//!     _ => println!("Other error: {}", error),
//! }
//!
//! assert_eq!(error.error_code(), "UNSUPPORTED_FORMAT");
//! ```

use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// The kind of error that occurred.
///
/// This enum is marked `#[non_exhaustive]`, so new variants may be added
/// in future versions without breaking existing code. Always include a
/// wildcard arm when matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ErrorKind {
    /// The route table could not be produced (unreadable dump, unknown router shape).
    #[error("extraction error")]
    Extraction,

    /// An export target's extension is not one of the supported formats.
    #[error("unsupported format")]
    UnsupportedFormat,

    /// A single dry-run probe failed.
    #[error("probe error")]
    Probe,

    /// Configuration error (invalid TOML, invalid values).
    #[error("configuration error")]
    Configuration,

    /// I/O error (file operations).
    #[error("I/O error")]
    Io,

    /// A report could not be serialized or parsed.
    #[error("serialization error")]
    Serialization,

    /// Invalid input (bad URL, malformed route entry).
    #[error("invalid input")]
    InvalidInput,

    /// Internal/unexpected error.
    #[error("internal error")]
    Internal,
}

/// An error that can occur while extracting, analyzing, reporting or probing.
///
/// Use [`Error::kind()`] to determine the category of error for matching,
/// and the `Display` implementation to get a human-readable message.
///
/// ```rust
/// use route_audit::{Error, ErrorKind};
///
/// let err = Error::extraction("no router stack found");
/// assert_eq!(err.kind(), ErrorKind::Extraction);
/// assert!(err.hint().is_some());
/// ```
pub struct Error {
    kind: ErrorKind,
    source: Box<dyn std::error::Error + Send + Sync + 'static>,
}

impl Error {
    /// Creates a new error with the given kind and source.
    pub fn new<E>(kind: ErrorKind, error: E) -> Self
    where
        E: Into<Box<dyn std::error::Error + Send + Sync + 'static>>,
    {
        Self {
            kind,
            source: error.into(),
        }
    }

    /// Returns the kind of this error.
    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the error code string for this error.
    ///
    /// This is a stable identifier suitable for machine consumers (CI mode).
    pub fn error_code(&self) -> &'static str {
        match self.kind {
            ErrorKind::Extraction => "EXTRACTION_ERROR",
            ErrorKind::UnsupportedFormat => "UNSUPPORTED_FORMAT",
            ErrorKind::Probe => "PROBE_ERROR",
            ErrorKind::Configuration => "CONFIG_ERROR",
            ErrorKind::Io => "IO_ERROR",
            ErrorKind::Serialization => "SERIALIZATION_ERROR",
            ErrorKind::InvalidInput => "INVALID_INPUT",
            ErrorKind::Internal => "INTERNAL_ERROR",
        }
    }

    /// Returns a remediation hint for the user, if this kind of error has one.
    pub fn hint(&self) -> Option<&'static str> {
        match self.kind {
            ErrorKind::Extraction => Some(
                "Please check the file path and ensure it contains a router dump \
                 (`_router.stack`, `router.stack`) or a normalized route table.",
            ),
            ErrorKind::UnsupportedFormat => {
                Some("Use .json, .md, .openapi.json, .yaml or .yml as the output file extension.")
            }
            ErrorKind::Configuration => {
                Some("Check the [security], [dry_run], [report] and [logging] sections of the config file.")
            }
            _ => None,
        }
    }

    /// Converts the error into a structured error response.
    pub fn to_error_response(&self) -> ErrorResponse {
        let response = ErrorResponse::new(self.error_code(), self.to_string());
        match self.hint() {
            Some(hint) => response.with_details(hint),
            None => response,
        }
    }

    /// Consumes the error and returns the inner error source.
    pub fn into_inner(self) -> Box<dyn std::error::Error + Send + Sync + 'static> {
        self.source
    }
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl Error {
    /// Creates an extraction error.
    pub fn extraction(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::Extraction, msg.into())
    }

    /// Creates an unsupported format error naming the requested extension.
    pub fn unsupported_format(extension: impl AsRef<str>) -> Self {
        let extension = extension.as_ref();
        let shown = if extension.is_empty() {
            "(none)"
        } else {
            extension
        };
        Self::new(
            ErrorKind::UnsupportedFormat,
            format!(
                "Unsupported file format \"{shown}\". Use .json, .md, .openapi.json, .yaml or .yml"
            ),
        )
    }

    /// Creates a probe error.
    pub fn probe(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::Probe, msg.into())
    }

    /// Creates a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, msg.into())
    }

    /// Creates an I/O error from a message.
    pub fn io(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::Io, msg.into())
    }

    /// Creates a serialization error.
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::Serialization, msg.into())
    }

    /// Creates an invalid input error.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidInput, msg.into())
    }

    /// Creates an internal error.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, msg.into())
    }
}

// ============================================================================
// Trait implementations
// ============================================================================

impl fmt::Debug for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Error")
            .field("kind", &self.kind)
            .field("source", &self.source)
            .finish()
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.source)
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&*self.source)
    }
}

// ============================================================================
// From implementations
// ============================================================================

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::new(ErrorKind::Io, err)
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Self::new(ErrorKind::Configuration, err)
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Self::new(ErrorKind::Serialization, err)
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        Self::new(ErrorKind::Serialization, err)
    }
}

impl From<url::ParseError> for Error {
    fn from(err: url::ParseError) -> Self {
        Self::new(ErrorKind::InvalidInput, err)
    }
}

impl From<std::env::VarError> for Error {
    fn from(err: std::env::VarError) -> Self {
        Self::new(ErrorKind::Configuration, err)
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Self::new(ErrorKind::Probe, err)
    }
}

// ============================================================================
// ErrorResponse
// ============================================================================

/// Structured error output with error code and details.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Stable error code for machine consumers.
    pub error_code: String,
    /// Human-readable error message.
    pub message: String,
    /// Optional remediation hint.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ErrorResponse {
    /// Creates a new error response.
    pub fn new(error_code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error_code: error_code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Adds details to the error response.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as StdError;

    // ========================================================================
    // ErrorKind tests
    // ========================================================================

    #[test]
    fn test_error_kind_display() {
        assert_eq!(format!("{}", ErrorKind::Extraction), "extraction error");
        assert_eq!(
            format!("{}", ErrorKind::UnsupportedFormat),
            "unsupported format"
        );
        assert_eq!(format!("{}", ErrorKind::Probe), "probe error");
    }

    // ========================================================================
    // Error constructor tests
    // ========================================================================

    #[test]
    fn test_error_new() {
        let err = Error::new(ErrorKind::Internal, "test error");
        assert_eq!(err.kind(), ErrorKind::Internal);
        assert_eq!(format!("{}", err), "test error");
    }

    #[test]
    fn test_error_extraction() {
        let err = Error::extraction("no default export");
        assert_eq!(err.kind(), ErrorKind::Extraction);
        assert!(err.to_string().contains("no default export"));
    }

    #[test]
    fn test_unsupported_format_names_extension() {
        let err = Error::unsupported_format(".txt");
        assert_eq!(err.kind(), ErrorKind::UnsupportedFormat);
        assert!(err.to_string().contains("\".txt\""));
    }

    #[test]
    fn test_unsupported_format_without_extension() {
        let err = Error::unsupported_format("");
        assert!(err.to_string().contains("(none)"));
    }

    #[test]
    fn test_error_probe() {
        let err = Error::probe("connection refused");
        assert_eq!(err.kind(), ErrorKind::Probe);
        assert_eq!(err.to_string(), "connection refused");
    }

    #[test]
    fn test_error_config() {
        let err = Error::config("missing field");
        assert_eq!(err.kind(), ErrorKind::Configuration);
        assert!(err.to_string().contains("missing field"));
    }

    // ========================================================================
    // Error code and hint tests
    // ========================================================================

    #[test]
    fn test_error_codes() {
        assert_eq!(Error::extraction("x").error_code(), "EXTRACTION_ERROR");
        assert_eq!(Error::unsupported_format("x").error_code(), "UNSUPPORTED_FORMAT");
        assert_eq!(Error::probe("x").error_code(), "PROBE_ERROR");
        assert_eq!(Error::config("x").error_code(), "CONFIG_ERROR");
        assert_eq!(Error::io("x").error_code(), "IO_ERROR");
        assert_eq!(Error::serialization("x").error_code(), "SERIALIZATION_ERROR");
        assert_eq!(Error::invalid_input("x").error_code(), "INVALID_INPUT");
        assert_eq!(Error::internal("x").error_code(), "INTERNAL_ERROR");
    }

    #[test]
    fn test_hint_only_for_user_actionable_kinds() {
        assert!(Error::extraction("x").hint().is_some());
        assert!(Error::unsupported_format("x").hint().is_some());
        assert!(Error::config("x").hint().is_some());
        assert!(Error::probe("x").hint().is_none());
        assert!(Error::internal("x").hint().is_none());
    }

    // ========================================================================
    // From trait tests
    // ========================================================================

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file missing");
        let err: Error = io_err.into();
        assert_eq!(err.kind(), ErrorKind::Io);
    }

    #[test]
    fn test_from_toml_error() {
        let toml_err = "invalid".parse::<toml::Value>().unwrap_err();
        let err: Error = toml_err.into();
        assert_eq!(err.kind(), ErrorKind::Configuration);
    }

    #[test]
    fn test_from_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: Error = json_err.into();
        assert_eq!(err.kind(), ErrorKind::Serialization);
    }

    #[test]
    fn test_from_url_parse_error() {
        let url_err = url::Url::parse("not a url").unwrap_err();
        let err: Error = url_err.into();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    // ========================================================================
    // ErrorResponse tests
    // ========================================================================

    #[test]
    fn test_to_error_response_carries_hint() {
        let response = Error::extraction("module failed to load").to_error_response();
        assert_eq!(response.error_code, "EXTRACTION_ERROR");
        assert_eq!(response.message, "module failed to load");
        assert!(response.details.is_some());
    }

    #[test]
    fn test_to_error_response_without_hint() {
        let response = Error::internal("boom").to_error_response();
        assert!(response.details.is_none());
        let json = serde_json::to_string(&response).unwrap();
        assert!(!json.contains("details"));
    }

    // ========================================================================
    // Misc trait tests
    // ========================================================================

    #[test]
    fn test_error_debug() {
        let err = Error::internal("test");
        let debug_str = format!("{:?}", err);
        assert!(debug_str.contains("Error"));
        assert!(debug_str.contains("Internal"));
    }

    #[test]
    fn test_error_into_inner() {
        let err = Error::probe("test message");
        let inner = err.into_inner();
        assert_eq!(format!("{}", inner), "test message");
    }

    #[test]
    fn test_error_source_trait() {
        let err = Error::internal("test");
        assert!(StdError::source(&err).is_some());
    }
}
