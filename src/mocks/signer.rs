//! Recording signer.

use crate::credentials::AwsCredentials;
use crate::error::SigningError;
use crate::signing::{RequestSigner, SigningContext};
use crate::transport::HttpRequest;
use parking_lot::Mutex;

/// One recorded `sign` call.
#[derive(Debug, Clone)]
pub struct SignCall {
    /// Request as handed to the signer.
    pub request: HttpRequest,
    /// Credentials used.
    pub credentials: AwsCredentials,
    /// Signing scope.
    pub context: SigningContext,
}

/// Signer that records its inputs and adds a fake `authorization` header.
#[derive(Debug, Default)]
pub struct MockSigner {
    calls: Mutex<Vec<SignCall>>,
    error: Option<String>,
}

impl MockSigner {
    /// Signer that always succeeds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Signer that always fails with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            error: Some(message.into()),
        }
    }

    /// Recorded calls.
    pub fn calls(&self) -> Vec<SignCall> {
        self.calls.lock().clone()
    }

    /// Number of `sign` calls.
    pub fn sign_count(&self) -> usize {
        self.calls.lock().len()
    }

    /// Credentials seen by the most recent call.
    pub fn last_credentials(&self) -> Option<AwsCredentials> {
        self.calls.lock().last().map(|c| c.credentials.clone())
    }
}

impl RequestSigner for MockSigner {
    fn sign(
        &self,
        request: HttpRequest,
        credentials: &AwsCredentials,
        context: &SigningContext,
    ) -> Result<HttpRequest, SigningError> {
        self.calls.lock().push(SignCall {
            request: request.clone(),
            credentials: credentials.clone(),
            context: context.clone(),
        });

        if let Some(message) = &self.error {
            return Err(SigningError::CalculationFailed {
                message: message.clone(),
            });
        }

        Ok(request.with_header(
            "authorization",
            format!("MOCK Credential={}", credentials.access_key_id()),
        ))
    }
}
