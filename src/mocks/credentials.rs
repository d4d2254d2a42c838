//! Counting credentials provider.

use crate::credentials::{AwsCredentials, CredentialsProvider};
use crate::error::CredentialsError;
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Credentials provider that counts how often it is asked.
#[derive(Debug)]
pub struct MockCredentialsProvider {
    credentials: Option<AwsCredentials>,
    error: Option<String>,
    hang: bool,
    call_count: AtomicUsize,
}

impl MockCredentialsProvider {
    /// Provider returning fixed example credentials.
    pub fn new() -> Self {
        Self::with_credentials(AwsCredentials::new(
            "AKIDPROVIDEREXAMPLE",
            "provider/secret/EXAMPLEKEY",
        ))
    }

    /// Provider returning `credentials`.
    pub fn with_credentials(credentials: AwsCredentials) -> Self {
        Self {
            credentials: Some(credentials),
            error: None,
            hang: false,
            call_count: AtomicUsize::new(0),
        }
    }

    /// Provider whose `get_credentials` never completes.
    pub fn hanging() -> Self {
        Self {
            hang: true,
            ..Self::new()
        }
    }

    /// Provider that always fails with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            credentials: None,
            error: Some(message.into()),
            hang: false,
            call_count: AtomicUsize::new(0),
        }
    }

    /// Number of `get_credentials` calls.
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }
}

impl Default for MockCredentialsProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CredentialsProvider for MockCredentialsProvider {
    async fn get_credentials(&self) -> Result<AwsCredentials, CredentialsError> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        if self.hang {
            futures::future::pending::<()>().await;
        }
        match (&self.credentials, &self.error) {
            (_, Some(message)) => Err(CredentialsError::Provider {
                provider: "mock".to_string(),
                message: message.clone(),
            }),
            (Some(credentials), None) => Ok(credentials.clone()),
            (None, None) => Err(CredentialsError::NotFound),
        }
    }

    fn name(&self) -> &'static str {
        "mock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test]
    async fn test_hanging_provider_never_resolves() {
        let provider = MockCredentialsProvider::hanging();
        let outcome =
            tokio::time::timeout(Duration::from_millis(20), provider.get_credentials()).await;
        assert!(outcome.is_err());
        assert_eq!(provider.call_count(), 1);
    }
}
