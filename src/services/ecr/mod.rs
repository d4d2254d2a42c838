//! Amazon Elastic Container Registry.
//!
//! JSON 1.1 binding with camelCase member names, served from the `api.ecr`
//! endpoint and signed as `ecr`.

mod client;
mod errors;
mod operations;
mod types;

pub use client::EcrClient;
pub use errors::{EcrErrorKind, InvalidLayerPartDetails};
pub use operations::*;
pub use types::*;

use crate::protocol::ServiceMetadata;

/// ECR service binding.
pub static METADATA: ServiceMetadata = ServiceMetadata {
    service_name: "ECR",
    target_prefix: "AmazonEC2ContainerRegistry_V20150921",
    signing_name: "ecr",
    endpoint_prefix: "api.ecr",
    json_version: "1.1",
    env_name: "ECR",
};
