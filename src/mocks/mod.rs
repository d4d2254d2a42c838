//! Test doubles for the pipeline's collaborators.
//!
//! Everything here is deterministic and in-process, so integration tests can
//! drive the full pipeline without a network or real credentials.

mod credentials;
mod metrics;
mod signer;
mod transport;

pub use credentials::MockCredentialsProvider;
pub use metrics::RecordingMetrics;
pub use signer::{MockSigner, SignCall};
pub use transport::{MockResponse, MockTransport};
