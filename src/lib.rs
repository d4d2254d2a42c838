//! Typed AWS JSON RPC client pipeline
//!
//! A generic invocation pipeline for AWS services speaking the JSON 1.1
//! protocol, with facades for Amazon WorkMail and Amazon ECR.
//!
//! # Features
//!
//! - **Typed shapes**: request and result structs with static schema
//!   descriptors; required members are checked before anything is sent
//! - **Typed errors**: service errors resolve to per-service kinds through an
//!   ordered registry, with unknown codes preserved
//! - **AWS Signature V4**: signing behind a swappable [`RequestSigner`]
//! - **Deadlines and cancellation**: per call, without internal retries
//! - **Observability**: `tracing` events and pluggable metrics
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use aws_rpc::services::ecr::{BatchCheckLayerAvailabilityRequest, EcrClient};
//! use aws_rpc::Request;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = EcrClient::builder().from_env().build()?;
//!
//!     let input = BatchCheckLayerAvailabilityRequest {
//!         repository_name: Some("my-app".to_string()),
//!         layer_digests: Some(vec!["sha256:0123abcd".to_string()]),
//!         ..Default::default()
//!     };
//!     let output = client
//!         .batch_check_layer_availability(
//!             Request::new(input).with_timeout(Duration::from_secs(5)),
//!         )
//!         .await?;
//!
//!     for layer in output.layers.unwrap_or_default() {
//!         println!("{:?}: {:?}", layer.layer_digest, layer.layer_availability);
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![deny(unsafe_code)]

pub mod client;
pub mod config;
pub mod credentials;
pub mod error;
pub mod metrics;
pub mod mocks;
pub mod pipeline;
pub mod protocol;
pub mod resilience;
pub mod services;
pub mod shape;
pub mod signing;
pub mod transport;

// Re-export main types at crate root
pub use client::{ClientBuilder, ServiceClient};
pub use config::{ClientConfig, ClientConfigBuilder};
pub use credentials::{
    AwsCredentials, ChainCredentialsProvider, CredentialsProvider, EnvCredentialsProvider,
    ProfileCredentialsProvider, StaticCredentialsProvider,
};
pub use error::{
    ConfigurationError, CredentialsError, ErrorCategory, MarshallError, ResponseParseError,
    SdkError, SdkResult, ServiceError, ServiceErrorKind, SigningError, TransportError,
};
pub use metrics::{InMemoryMetrics, MetricsCollector, NoopMetrics, TracingMetrics};
pub use pipeline::{CallState, Invoker, Operation, Request, RequestOptions};
pub use protocol::{JsonMarshaller, JsonUnmarshaller, Marshaller, ServiceMetadata, Unmarshaller};
pub use resilience::{RetryConfig, RetryPolicy};
pub use services::ecr::EcrClient;
pub use services::workmail::WorkMailClient;
pub use shape::Shape;
pub use signing::{RequestSigner, SigV4Signer, SigningContext};
pub use transport::{HttpRequest, HttpResponse, HttpTransport, ReqwestTransport};
pub use tokio_util::sync::CancellationToken;
