//! Service facades.
//!
//! Each service module holds its binding metadata, shapes, error kinds,
//! operation markers, and a client with one method per operation.

pub mod ecr;
pub mod workmail;
