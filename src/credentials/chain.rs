//! Chain credentials provider that tries multiple sources.

use super::{
    AwsCredentials, CredentialsProvider, EnvCredentialsProvider, ProfileCredentialsProvider,
};
use crate::error::CredentialsError;
use async_trait::async_trait;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{debug, trace};

const DEFAULT_REFRESH_BUFFER_SECONDS: i64 = 300;

/// Credentials provider that chains multiple providers.
///
/// Providers are tried in order until one succeeds. The default chain is
/// environment variables, then the shared credentials file.
///
/// Resolved credentials are cached and re-resolved once they are within the
/// refresh buffer of their expiration.
pub struct ChainCredentialsProvider {
    providers: Vec<Arc<dyn CredentialsProvider>>,
    cached: RwLock<Option<CachedCredentials>>,
    refresh_buffer_seconds: i64,
}

struct CachedCredentials {
    credentials: AwsCredentials,
    provider_name: &'static str,
}

impl ChainCredentialsProvider {
    /// Create a chain with the default providers.
    pub fn new() -> Self {
        Self::with_providers(vec![
            Arc::new(EnvCredentialsProvider::new()),
            Arc::new(ProfileCredentialsProvider::new()),
        ])
    }

    /// Create a chain with custom providers.
    pub fn with_providers(providers: Vec<Arc<dyn CredentialsProvider>>) -> Self {
        Self {
            providers,
            cached: RwLock::new(None),
            refresh_buffer_seconds: DEFAULT_REFRESH_BUFFER_SECONDS,
        }
    }

    /// Set the refresh buffer (seconds before expiration to refresh).
    pub fn with_refresh_buffer(mut self, seconds: i64) -> Self {
        self.refresh_buffer_seconds = seconds;
        self
    }

    /// Add a provider to the end of the chain.
    pub fn add_provider(mut self, provider: Arc<dyn CredentialsProvider>) -> Self {
        self.providers.push(provider);
        self
    }

    /// Drop cached credentials so the next call walks the chain again.
    pub fn invalidate(&self) {
        *self.cached.write() = None;
    }

    fn cached(&self) -> Option<AwsCredentials> {
        let cache = self.cached.read();
        let cached = cache.as_ref()?;
        let buffer = chrono::Duration::seconds(self.refresh_buffer_seconds);
        if cached.credentials.will_expire_within(buffer) {
            return None;
        }
        trace!(provider = cached.provider_name, "Using cached credentials");
        Some(cached.credentials.clone())
    }

    async fn try_providers(&self) -> Result<(AwsCredentials, &'static str), CredentialsError> {
        let mut last_error = None;

        for provider in &self.providers {
            let name = provider.name();
            trace!(provider = name, "Trying credentials provider");

            match provider.get_credentials().await {
                Ok(creds) => {
                    debug!(provider = name, "Credentials loaded");
                    return Ok((creds, name));
                }
                Err(e) => {
                    trace!(provider = name, error = %e, "Credentials provider failed");
                    last_error = Some(e);
                }
            }
        }

        Err(last_error.unwrap_or(CredentialsError::NotFound))
    }
}

impl Default for ChainCredentialsProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CredentialsProvider for ChainCredentialsProvider {
    async fn get_credentials(&self) -> Result<AwsCredentials, CredentialsError> {
        if let Some(credentials) = self.cached() {
            return Ok(credentials);
        }

        let (credentials, provider_name) = self.try_providers().await?;
        *self.cached.write() = Some(CachedCredentials {
            credentials: credentials.clone(),
            provider_name,
        });

        Ok(credentials)
    }

    fn name(&self) -> &'static str {
        "chain"
    }
}

impl std::fmt::Debug for ChainCredentialsProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChainCredentialsProvider")
            .field(
                "providers",
                &self.providers.iter().map(|p| p.name()).collect::<Vec<_>>(),
            )
            .field("refresh_buffer_seconds", &self.refresh_buffer_seconds)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::MockCredentialsProvider;
    use chrono::Utc;

    #[tokio::test]
    async fn test_chain_uses_first_successful_provider() {
        let failing = Arc::new(MockCredentialsProvider::failing("no env"));
        let working = Arc::new(MockCredentialsProvider::with_credentials(AwsCredentials::new(
            "AKID", "SECRET",
        )));
        let chain = ChainCredentialsProvider::with_providers(vec![failing.clone(), working.clone()]);

        let creds = chain.get_credentials().await.unwrap();
        assert_eq!(creds.access_key_id(), "AKID");
        assert_eq!(failing.call_count(), 1);
        assert_eq!(working.call_count(), 1);
    }

    #[tokio::test]
    async fn test_chain_caches_credentials() {
        let inner = Arc::new(MockCredentialsProvider::with_credentials(AwsCredentials::new(
            "AKID", "SECRET",
        )));
        let chain = ChainCredentialsProvider::with_providers(vec![inner.clone()]);

        chain.get_credentials().await.unwrap();
        chain.get_credentials().await.unwrap();
        assert_eq!(inner.call_count(), 1);

        chain.invalidate();
        chain.get_credentials().await.unwrap();
        assert_eq!(inner.call_count(), 2);
    }

    #[tokio::test]
    async fn test_chain_refreshes_expiring_credentials() {
        let expiring = AwsCredentials::new("AKID", "SECRET")
            .with_session_token("TOKEN")
            .with_expiration(Utc::now() + chrono::Duration::seconds(60));
        let inner = Arc::new(MockCredentialsProvider::with_credentials(expiring));
        let chain =
            ChainCredentialsProvider::with_providers(vec![inner.clone()]).with_refresh_buffer(120);

        chain.get_credentials().await.unwrap();
        chain.get_credentials().await.unwrap();
        assert_eq!(inner.call_count(), 2);
    }

    #[tokio::test]
    async fn test_chain_reports_last_error() {
        let chain = ChainCredentialsProvider::with_providers(vec![
            Arc::new(MockCredentialsProvider::failing("first")),
            Arc::new(MockCredentialsProvider::failing("second")),
        ]);
        let err = chain.get_credentials().await.unwrap_err();
        assert!(err.to_string().contains("second"));
    }

    #[tokio::test]
    async fn test_empty_chain_not_found() {
        let chain = ChainCredentialsProvider::with_providers(Vec::new());
        assert!(matches!(
            chain.get_credentials().await,
            Err(CredentialsError::NotFound)
        ));
    }
}
