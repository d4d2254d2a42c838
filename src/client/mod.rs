//! Client construction.
//!
//! Every service facade is built the same way: a [`ClientConfig`], a
//! transport, and a signer are bound into an [`Invoker`] for the service's
//! [`ServiceMetadata`]. Nothing about the client can be changed afterwards.

use crate::config::ClientConfig;
use crate::credentials::CredentialsProvider;
use crate::error::ConfigurationError;
use crate::metrics::MetricsCollector;
use crate::pipeline::Invoker;
use crate::protocol::ServiceMetadata;
use crate::signing::{RequestSigner, SigV4Signer};
use crate::transport::{HttpTransport, ReqwestTransport};
use std::marker::PhantomData;
use std::sync::Arc;

/// A service facade built on an [`Invoker`].
pub trait ServiceClient: Sized {
    /// Service binding.
    fn metadata() -> &'static ServiceMetadata;

    /// Wrap an invoker.
    fn from_invoker(invoker: Invoker) -> Self;

    /// The underlying invoker.
    fn invoker(&self) -> &Invoker;

    /// Release the transport. Idempotent; later calls fail with
    /// [`TransportError::Shutdown`](crate::error::TransportError::Shutdown).
    fn shutdown(&self) {
        self.invoker().shutdown();
    }

    /// Client configuration.
    fn config(&self) -> &ClientConfig {
        self.invoker().config()
    }
}

/// Builder for any [`ServiceClient`].
pub struct ClientBuilder<C> {
    config: Option<ClientConfig>,
    from_env: bool,
    credentials_provider: Option<Arc<dyn CredentialsProvider>>,
    metrics: Option<Arc<dyn MetricsCollector>>,
    transport: Option<Arc<dyn HttpTransport>>,
    signer: Option<Arc<dyn RequestSigner>>,
    _client: PhantomData<fn() -> C>,
}

impl<C: ServiceClient> ClientBuilder<C> {
    /// Create a new builder.
    pub fn new() -> Self {
        Self {
            config: None,
            from_env: false,
            credentials_provider: None,
            metrics: None,
            transport: None,
            signer: None,
            _client: PhantomData,
        }
    }

    /// Use the provided configuration.
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Load configuration from environment variables, including the
    /// service-specific `AWS_ENDPOINT_URL_{SERVICE}`. Ignored when an
    /// explicit configuration is set.
    pub fn from_env(mut self) -> Self {
        self.from_env = true;
        self
    }

    /// Replace the configured credentials provider.
    pub fn credentials_provider(mut self, provider: Arc<dyn CredentialsProvider>) -> Self {
        self.credentials_provider = Some(provider);
        self
    }

    /// Replace the configured metrics collector.
    pub fn metrics(mut self, metrics: Arc<dyn MetricsCollector>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Use a custom HTTP transport.
    pub fn transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Use a custom signer instead of SigV4.
    pub fn signer(mut self, signer: Arc<dyn RequestSigner>) -> Self {
        self.signer = Some(signer);
        self
    }

    /// Build the client.
    pub fn build(self) -> Result<C, ConfigurationError> {
        let mut config = if let Some(config) = self.config {
            config
        } else if self.from_env {
            ClientConfig::builder()
                .from_env_for_service(Some(C::metadata().env_name))?
                .build()?
        } else {
            ClientConfig::default()
        };

        if let Some(provider) = self.credentials_provider {
            config.credentials_provider = provider;
        }
        if let Some(metrics) = self.metrics {
            config.metrics = metrics;
        }

        let transport = match self.transport {
            Some(transport) => transport,
            None => Arc::new(
                ReqwestTransport::builder()
                    .connect_timeout(config.connect_timeout)
                    .read_timeout(config.read_timeout)
                    .pool_max_idle_per_host(config.max_connections)
                    .pool_idle_timeout(Some(config.idle_timeout))
                    .user_agent(config.user_agent.clone())
                    .build()
                    .map_err(|e| ConfigurationError::InvalidConfiguration {
                        field: "transport".to_string(),
                        message: e.to_string(),
                    })?,
            ),
        };

        let signer = self
            .signer
            .unwrap_or_else(|| Arc::new(SigV4Signer::new()));

        Invoker::new(config, C::metadata(), transport, signer).map(C::from_invoker)
    }
}

impl<C: ServiceClient> Default for ClientBuilder<C> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mocks::{MockCredentialsProvider, MockTransport};
    use crate::services::ecr::EcrClient;
    use crate::services::workmail::WorkMailClient;

    #[test]
    fn test_builder_with_config() {
        let config = ClientConfig::builder().region("eu-west-1").build().unwrap();
        let client = ClientBuilder::<WorkMailClient>::new()
            .config(config)
            .transport(Arc::new(MockTransport::new()))
            .build()
            .unwrap();

        assert_eq!(client.config().region, "eu-west-1");
        assert_eq!(
            client.invoker().endpoint().as_str(),
            "https://workmail.eu-west-1.amazonaws.com/"
        );
    }

    #[test]
    fn test_builder_overrides_provider() {
        let client = EcrClient::builder()
            .credentials_provider(Arc::new(MockCredentialsProvider::new()))
            .transport(Arc::new(MockTransport::new()))
            .build()
            .unwrap();
        assert_eq!(client.config().credentials_provider.name(), "mock");
        assert_eq!(
            client.invoker().endpoint().as_str(),
            "https://api.ecr.us-east-1.amazonaws.com/"
        );
    }

    #[test]
    fn test_builder_default_transport() {
        assert!(ClientBuilder::<EcrClient>::new().build().is_ok());
    }

    #[test]
    fn test_shutdown_reaches_transport() {
        let transport = Arc::new(MockTransport::new());
        let client = WorkMailClient::builder()
            .transport(transport.clone())
            .build()
            .unwrap();
        client.shutdown();
        client.shutdown();
        assert!(transport.is_shut_down());
    }
}
