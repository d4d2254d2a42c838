//! Error types for the RPC invocation pipeline.
//!
//! Every invocation resolves to either its typed result shape or exactly one
//! [`SdkError`]. The variants follow the stage of the pipeline that failed, so
//! a caller can tell a validation failure (nothing was sent) from a transport
//! failure (the request may or may not have reached the service) from a
//! decoded service error.
//!
//! Service errors are generic over a per-service [`ServiceErrorKind`], which
//! is resolved from the wire discriminator through an ordered registry. See
//! [`mapping`] for discriminator extraction and lookup.

pub mod mapping;
mod kind;

pub use kind::ServiceErrorKind;
pub(crate) use kind::service_error_kind;
pub use mapping::{extract_discriminator, normalize_code, resolve_kind};

use serde::de::DeserializeOwned;
use std::fmt;
use thiserror::Error;

/// Result alias for service operations.
pub type SdkResult<T, K> = Result<T, SdkError<K>>;

/// Top-level error returned by every service operation.
#[derive(Debug, Error)]
pub enum SdkError<K> {
    /// Client construction or configuration problem.
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    /// Credentials could not be resolved. Nothing was sent.
    #[error("Credentials error: {0}")]
    Credentials(#[from] CredentialsError),

    /// The request shape could not be marshalled. Nothing was sent.
    #[error("Marshall error: {0}")]
    Marshall(#[from] MarshallError),

    /// The wire request could not be signed. Nothing was sent.
    #[error("Signing error: {0}")]
    Signing(#[from] SigningError),

    /// The transport failed before a response was received.
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// The service answered with an error.
    #[error("Service error: {0}")]
    Service(ServiceError<K>),

    /// The response could not be decoded.
    #[error("Response error: {0}")]
    ResponseParse(#[from] ResponseParseError),
}

/// Coarse classification of an [`SdkError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    /// Configuration problem.
    Configuration,
    /// Credential resolution problem.
    Credentials,
    /// Client-side input validation problem.
    Validation,
    /// Request signing problem.
    Signing,
    /// Network or connection problem.
    Transport,
    /// Error reported by the service.
    Service,
    /// Undecodable response.
    Response,
}

impl<K: ServiceErrorKind> SdkError<K> {
    /// Returns the category of this error.
    pub fn category(&self) -> ErrorCategory {
        match self {
            SdkError::Configuration(_) => ErrorCategory::Configuration,
            SdkError::Credentials(_) => ErrorCategory::Credentials,
            SdkError::Marshall(_) => ErrorCategory::Validation,
            SdkError::Signing(_) => ErrorCategory::Signing,
            SdkError::Transport(_) => ErrorCategory::Transport,
            SdkError::Service(_) => ErrorCategory::Service,
            SdkError::ResponseParse(_) => ErrorCategory::Response,
        }
    }

    /// Returns true if the error is transient and a caller may retry.
    ///
    /// Whether a retry is *safe* additionally depends on
    /// [`outcome_unknown`](Self::outcome_unknown) and the idempotency of the
    /// operation.
    pub fn is_retryable(&self) -> bool {
        match self {
            SdkError::Transport(e) => e.is_retryable(),
            SdkError::Service(e) => e.is_retryable(),
            _ => false,
        }
    }

    /// Returns true if the request may have been applied by the service even
    /// though no response was decoded.
    pub fn outcome_unknown(&self) -> bool {
        match self {
            SdkError::Transport(e) => e.outcome_unknown(),
            _ => false,
        }
    }

    /// Returns the service error, if this is one.
    pub fn service_error(&self) -> Option<&ServiceError<K>> {
        match self {
            SdkError::Service(e) => Some(e),
            _ => None,
        }
    }

    /// Converts into the service error, if this is one.
    pub fn into_service_error(self) -> Option<ServiceError<K>> {
        match self {
            SdkError::Service(e) => Some(e),
            _ => None,
        }
    }

    /// Returns the typed service error kind, if this is a service error.
    pub fn kind(&self) -> Option<&K> {
        self.service_error().map(ServiceError::kind)
    }

    /// Returns the raw service error code, if this is a service error.
    pub fn error_code(&self) -> Option<&str> {
        self.service_error().map(ServiceError::code)
    }

    /// Returns the AWS request ID if available.
    pub fn request_id(&self) -> Option<&str> {
        self.service_error().and_then(ServiceError::request_id)
    }

    /// Returns the HTTP status code if a response was received.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            SdkError::Service(e) => Some(e.status()),
            SdkError::ResponseParse(e) => e.status(),
            _ => None,
        }
    }
}

/// A decoded service error.
///
/// Carries the typed kind resolved from the discriminator plus everything the
/// service sent back. Kind-specific members (for example
/// `lastValidByteReceived` on ECR's `InvalidLayerPartException`) are kept in
/// [`fields`](Self::fields) and can be read individually or decoded into a
/// typed detail struct with [`details`](Self::details).
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceError<K> {
    kind: K,
    code: String,
    message: Option<String>,
    status: u16,
    request_id: Option<String>,
    fields: serde_json::Map<String, serde_json::Value>,
}

impl<K: ServiceErrorKind> ServiceError<K> {
    /// Create a service error from a normalized code.
    pub fn new(kind: K, code: impl Into<String>, status: u16) -> Self {
        Self {
            kind,
            code: code.into(),
            message: None,
            status,
            request_id: None,
            fields: serde_json::Map::new(),
        }
    }

    /// Set the message.
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Set the request ID.
    pub fn with_request_id(mut self, request_id: impl Into<String>) -> Self {
        self.request_id = Some(request_id.into());
        self
    }

    /// Set the additional error members.
    pub fn with_fields(mut self, fields: serde_json::Map<String, serde_json::Value>) -> Self {
        self.fields = fields;
        self
    }

    /// The typed kind.
    pub fn kind(&self) -> &K {
        &self.kind
    }

    /// The normalized discriminator as received.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// The error message, if the service sent one.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// HTTP status of the error response.
    pub fn status(&self) -> u16 {
        self.status
    }

    /// AWS request ID.
    pub fn request_id(&self) -> Option<&str> {
        self.request_id.as_deref()
    }

    /// All members of the error body other than the discriminator and message.
    pub fn fields(&self) -> &serde_json::Map<String, serde_json::Value> {
        &self.fields
    }

    /// A single additional member by wire name.
    pub fn field(&self, name: &str) -> Option<&serde_json::Value> {
        self.fields.get(name)
    }

    /// Decode the additional members into a typed detail struct.
    pub fn details<T: DeserializeOwned>(&self) -> Result<T, ResponseParseError> {
        serde_json::from_value(serde_json::Value::Object(self.fields.clone())).map_err(|e| {
            ResponseParseError::ShapeMismatch {
                shape: std::any::type_name::<T>(),
                status: Some(self.status),
                message: e.to_string(),
            }
        })
    }

    /// True when the service error is transient.
    ///
    /// Throttling codes, 429 and 5xx statuses, and kinds the service declares
    /// retryable are all transient.
    pub fn is_retryable(&self) -> bool {
        self.status == 429
            || self.status >= 500
            || self.kind.is_retryable()
            || mapping::is_throttling_code(&self.code)
    }
}

impl<K> fmt::Display for ServiceError<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (status {})", self.code, self.status)?;
        if let Some(message) = &self.message {
            write!(f, ": {}", message)?;
        }
        if let Some(request_id) = &self.request_id {
            write!(f, " [request id: {}]", request_id)?;
        }
        Ok(())
    }
}

impl<K: fmt::Debug> std::error::Error for ServiceError<K> {}

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigurationError {
    /// Missing required region configuration.
    #[error("Missing region: region must be specified via config or environment")]
    MissingRegion,

    /// Invalid endpoint URL.
    #[error("Invalid endpoint URL '{url}': {details}")]
    InvalidEndpoint {
        /// The invalid URL.
        url: String,
        /// Details about the validation error.
        details: String,
    },

    /// Invalid configuration value.
    #[error("Invalid configuration: {field} - {message}")]
    InvalidConfiguration {
        /// The configuration field name.
        field: String,
        /// Error message.
        message: String,
    },
}

/// Credential-related errors.
#[derive(Debug, Error)]
pub enum CredentialsError {
    /// No credentials could be found.
    #[error("Credentials not found: no credentials could be loaded from any source")]
    NotFound,

    /// Credentials have expired.
    #[error("Credentials expired: session credentials expired at {expiration}")]
    Expired {
        /// When the credentials expired.
        expiration: String,
    },

    /// Credentials are invalid.
    #[error("Invalid credentials: {message}")]
    Invalid {
        /// Details about why credentials are invalid.
        message: String,
    },

    /// Profile configuration error.
    #[error("Profile error: {message}")]
    ProfileError {
        /// Details about the profile error.
        message: String,
    },

    /// Provider-specific failure.
    #[error("Credentials provider '{provider}' failed: {message}")]
    Provider {
        /// Provider name.
        provider: String,
        /// Error message.
        message: String,
    },
}

/// Request marshalling errors. All of them occur before any I/O.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MarshallError {
    /// A member the schema marks as required is absent.
    #[error("Missing required parameter '{parameter}' on {shape}")]
    MissingRequiredParameter {
        /// Name of the top-level request shape.
        shape: &'static str,
        /// Path to the missing member, e.g. `Tags[1].Key`.
        parameter: String,
    },

    /// The shape could not be serialized.
    #[error("Failed to serialize {shape}: {message}")]
    Serialization {
        /// Name of the request shape.
        shape: &'static str,
        /// Serializer message.
        message: String,
    },
}

impl MarshallError {
    /// Path of the missing parameter, if this is a validation failure.
    pub fn missing_parameter(&self) -> Option<&str> {
        match self {
            MarshallError::MissingRequiredParameter { parameter, .. } => Some(parameter),
            MarshallError::Serialization { .. } => None,
        }
    }
}

/// AWS Signature V4 signing errors.
#[derive(Debug, Error)]
pub enum SigningError {
    /// The request is missing something the signer needs.
    #[error("Cannot sign request: {message}")]
    InvalidRequest {
        /// Details about the problem.
        message: String,
    },

    /// Signature calculation failed.
    #[error("Signature calculation failed: {message}")]
    CalculationFailed {
        /// Details about the calculation error.
        message: String,
    },
}

/// Transport errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    /// Connection could not be established or was dropped.
    #[error("Connection failed: {message}")]
    Connection {
        /// Error message.
        message: String,
    },

    /// The deadline elapsed before a response arrived.
    #[error("Request timed out: {message}")]
    Timeout {
        /// Error message.
        message: String,
    },

    /// The caller cancelled the invocation.
    #[error("Request cancelled by caller")]
    Cancelled,

    /// TLS/SSL error.
    #[error("TLS error: {message}")]
    Tls {
        /// Error message.
        message: String,
    },

    /// The transport was shut down.
    #[error("Transport has been shut down")]
    Shutdown,

    /// The request could not be turned into a valid HTTP request.
    #[error("Invalid HTTP request: {message}")]
    InvalidRequest {
        /// Error message.
        message: String,
    },
}

impl TransportError {
    /// Returns true if the error is retryable.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            TransportError::Connection { .. } | TransportError::Timeout { .. }
        )
    }

    /// True if the request may have reached the service.
    pub fn outcome_unknown(&self) -> bool {
        !matches!(
            self,
            TransportError::Shutdown | TransportError::InvalidRequest { .. }
        )
    }
}

/// Response decoding errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResponseParseError {
    /// The body is not valid JSON.
    #[error("Malformed JSON response (status {status}): {message}")]
    MalformedJson {
        /// HTTP status.
        status: u16,
        /// Parser message.
        message: String,
    },

    /// The body is JSON but does not fit the expected shape.
    #[error("Response does not match {shape}: {message}")]
    ShapeMismatch {
        /// Expected shape name.
        shape: &'static str,
        /// HTTP status, when decoding a response.
        status: Option<u16>,
        /// Decoder message.
        message: String,
    },

    /// An error status arrived with a body that is not JSON.
    #[error("Error response (status {status}) has a non-JSON body")]
    NonJsonErrorBody {
        /// HTTP status.
        status: u16,
        /// Content type header, if present.
        content_type: Option<String>,
    },
}

impl ResponseParseError {
    /// HTTP status of the undecodable response.
    pub fn status(&self) -> Option<u16> {
        match self {
            ResponseParseError::MalformedJson { status, .. } => Some(*status),
            ResponseParseError::ShapeMismatch { status, .. } => *status,
            ResponseParseError::NonJsonErrorBody { status, .. } => Some(*status),
        }
    }
}
