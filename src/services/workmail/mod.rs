//! Amazon WorkMail.
//!
//! JSON 1.1 binding with PascalCase member names, signed as `workmail`.

mod client;
mod errors;
mod operations;
mod types;

pub use client::WorkMailClient;
pub use errors::WorkMailErrorKind;
pub use operations::*;
pub use types::*;

use crate::protocol::ServiceMetadata;

/// WorkMail service binding.
pub static METADATA: ServiceMetadata = ServiceMetadata {
    service_name: "WorkMail",
    target_prefix: "WorkMailService",
    signing_name: "workmail",
    endpoint_prefix: "workmail",
    json_version: "1.1",
    env_name: "WORKMAIL",
};
