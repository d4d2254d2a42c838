//! Shared fixtures for integration tests.

#![allow(dead_code)]

use aws_rpc::client::{ClientBuilder, ServiceClient};
use aws_rpc::mocks::{MockCredentialsProvider, MockSigner, MockTransport, RecordingMetrics};
use aws_rpc::ClientConfig;
use std::sync::Arc;

/// Collaborators of a client under test.
pub struct Harness {
    pub transport: Arc<MockTransport>,
    pub signer: Arc<MockSigner>,
    pub provider: Arc<MockCredentialsProvider>,
    pub metrics: Arc<RecordingMetrics>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_transport(MockTransport::new())
    }

    pub fn with_transport(transport: MockTransport) -> Self {
        Self {
            transport: Arc::new(transport),
            signer: Arc::new(MockSigner::new()),
            provider: Arc::new(MockCredentialsProvider::new()),
            metrics: Arc::new(RecordingMetrics::new()),
        }
    }

    pub fn with_provider(mut self, provider: MockCredentialsProvider) -> Self {
        self.provider = Arc::new(provider);
        self
    }

    pub fn with_signer(mut self, signer: MockSigner) -> Self {
        self.signer = Arc::new(signer);
        self
    }

    /// Build a client in `us-west-2` wired to the mocks.
    pub fn client<C: ServiceClient>(&self) -> C {
        let config = ClientConfig::builder()
            .region("us-west-2")
            .build()
            .expect("valid config");
        ClientBuilder::<C>::new()
            .config(config)
            .credentials_provider(self.provider.clone())
            .metrics(self.metrics.clone())
            .transport(self.transport.clone())
            .signer(self.signer.clone())
            .build()
            .expect("client builds")
    }

    /// Decoded JSON body of the most recent request.
    pub fn last_body(&self) -> serde_json::Value {
        let request = self.transport.last_request().expect("a request was sent");
        serde_json::from_slice(&request.body).expect("request body is JSON")
    }
}
