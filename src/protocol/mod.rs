//! Wire protocol contracts and the AWS JSON 1.1 binding.
//!
//! A [`Marshaller`] turns a request shape into a [`WireRequest`] without side
//! effects; an [`Unmarshaller`] turns an [`HttpResponse`](crate::transport::HttpResponse)
//! into a result shape or a typed service error. Both are pure, so they can be
//! shared by concurrent calls without synchronization.

mod marshall;
mod unmarshall;

pub use marshall::JsonMarshaller;
pub use unmarshall::{JsonUnmarshaller, UnmarshallError};

use crate::error::MarshallError;
use crate::transport::HttpResponse;
use bytes::Bytes;
use http::Method;
use std::collections::BTreeMap;

/// Static description of a service binding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ServiceMetadata {
    /// Human readable service name used in logs and metrics.
    pub service_name: &'static str,
    /// Prefix of the `x-amz-target` header.
    pub target_prefix: &'static str,
    /// Name used in the signature scope.
    pub signing_name: &'static str,
    /// Host prefix of the regional endpoint.
    pub endpoint_prefix: &'static str,
    /// JSON protocol version, e.g. `1.1`.
    pub json_version: &'static str,
    /// Suffix of the service-specific endpoint variable
    /// (`AWS_ENDPOINT_URL_{env_name}`).
    pub env_name: &'static str,
}

impl ServiceMetadata {
    /// `content-type` header value for this protocol version.
    pub fn content_type(&self) -> String {
        format!("application/x-amz-json-{}", self.json_version)
    }

    /// `x-amz-target` header value for an operation.
    pub fn target(&self, operation: &str) -> String {
        format!("{}.{}", self.target_prefix, operation)
    }
}

/// Protocol-level request produced by a marshaller.
///
/// Carries no endpoint, credentials or signature; those are added by the
/// pipeline at dispatch.
#[derive(Debug, Clone, PartialEq)]
pub struct WireRequest {
    /// HTTP method.
    pub method: Method,
    /// Request path, starting with `/`.
    pub path: String,
    /// Query parameters in order.
    pub query: Vec<(String, String)>,
    /// Headers, lowercase names.
    pub headers: BTreeMap<String, String>,
    /// Serialized body.
    pub body: Bytes,
}

/// Converts a typed request shape into a [`WireRequest`].
pub trait Marshaller<I>: Send + Sync {
    /// Validate and encode `input`. Must not perform I/O.
    fn marshall(&self, input: &I) -> Result<WireRequest, MarshallError>;
}

/// Converts an HTTP response into a typed result or a typed error.
pub trait Unmarshaller<O, K>: Send + Sync {
    /// Decode `response`.
    fn unmarshall(&self, response: &HttpResponse) -> Result<O, UnmarshallError<K>>;
}
