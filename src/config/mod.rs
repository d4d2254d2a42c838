//! Client configuration.
//!
//! Region, endpoint, credentials and timeouts are fixed when a client is
//! built. A built client exposes no way to change them.

use crate::credentials::{ChainCredentialsProvider, CredentialsProvider};
use crate::error::ConfigurationError;
use crate::metrics::{MetricsCollector, NoopMetrics};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Default region when none is configured.
pub const DEFAULT_REGION: &str = "us-east-1";

/// Upper bound for [`ClientConfig::operation_timeout`].
pub const MAX_OPERATION_TIMEOUT: Duration = Duration::from_secs(24 * 60 * 60);

/// Default `User-Agent` value.
pub const DEFAULT_USER_AGENT: &str = concat!("aws-rpc-integration/", env!("CARGO_PKG_VERSION"));

/// Configuration shared by every call a client makes.
#[derive(Clone)]
pub struct ClientConfig {
    /// AWS region (e.g., "us-east-1").
    pub region: String,
    /// Credentials provider.
    pub credentials_provider: Arc<dyn CredentialsProvider>,
    /// Endpoint override. When unset the endpoint derives from the region.
    pub endpoint: Option<Url>,
    /// Connection timeout.
    pub connect_timeout: Duration,
    /// Read timeout for a single HTTP exchange.
    pub read_timeout: Duration,
    /// Deadline applied to calls that do not set their own.
    pub operation_timeout: Duration,
    /// Maximum idle connections per host.
    pub max_connections: usize,
    /// Idle connection timeout.
    pub idle_timeout: Duration,
    /// `User-Agent` header value.
    pub user_agent: String,
    /// Timing and outcome collector.
    pub metrics: Arc<dyn MetricsCollector>,
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("region", &self.region)
            .field("credentials_provider", &self.credentials_provider.name())
            .field("endpoint", &self.endpoint)
            .field("connect_timeout", &self.connect_timeout)
            .field("read_timeout", &self.read_timeout)
            .field("operation_timeout", &self.operation_timeout)
            .field("max_connections", &self.max_connections)
            .field("idle_timeout", &self.idle_timeout)
            .field("user_agent", &self.user_agent)
            .finish_non_exhaustive()
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            region: DEFAULT_REGION.to_string(),
            credentials_provider: Arc::new(ChainCredentialsProvider::default()),
            endpoint: None,
            connect_timeout: Duration::from_secs(5),
            read_timeout: Duration::from_secs(30),
            operation_timeout: Duration::from_secs(60),
            max_connections: 100,
            idle_timeout: Duration::from_secs(90),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            metrics: Arc::new(NoopMetrics),
        }
    }
}

impl ClientConfig {
    /// Create a new configuration builder.
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Resolve the endpoint for a service.
    ///
    /// The override wins; otherwise `https://{prefix}.{region}.amazonaws.com/`.
    pub fn resolve_endpoint(&self, endpoint_prefix: &str) -> Result<Url, ConfigurationError> {
        if let Some(endpoint) = &self.endpoint {
            return Ok(endpoint.clone());
        }
        let url = format!("https://{}.{}.amazonaws.com/", endpoint_prefix, self.region);
        Url::parse(&url).map_err(|e| ConfigurationError::InvalidEndpoint {
            url,
            details: e.to_string(),
        })
    }
}

/// Builder for [`ClientConfig`].
#[derive(Default)]
pub struct ClientConfigBuilder {
    region: Option<String>,
    credentials_provider: Option<Arc<dyn CredentialsProvider>>,
    endpoint: Option<Url>,
    connect_timeout: Option<Duration>,
    read_timeout: Option<Duration>,
    operation_timeout: Option<Duration>,
    max_connections: Option<usize>,
    idle_timeout: Option<Duration>,
    user_agent: Option<String>,
    metrics: Option<Arc<dyn MetricsCollector>>,
}

impl ClientConfigBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the AWS region.
    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Set the credentials provider.
    pub fn credentials_provider(mut self, provider: Arc<dyn CredentialsProvider>) -> Self {
        self.credentials_provider = Some(provider);
        self
    }

    /// Set an endpoint override from a string.
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Result<Self, ConfigurationError> {
        self.endpoint = Some(parse_endpoint(endpoint.into())?);
        Ok(self)
    }

    /// Set an endpoint override.
    pub fn endpoint_url(mut self, endpoint: Url) -> Self {
        self.endpoint = Some(endpoint);
        self
    }

    /// Set the connection timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Set the read timeout.
    pub fn read_timeout(mut self, timeout: Duration) -> Self {
        self.read_timeout = Some(timeout);
        self
    }

    /// Set the default per-call deadline. At most [`MAX_OPERATION_TIMEOUT`].
    pub fn operation_timeout(mut self, timeout: Duration) -> Self {
        self.operation_timeout = Some(timeout);
        self
    }

    /// Set the maximum idle connections per host.
    pub fn max_connections(mut self, connections: usize) -> Self {
        self.max_connections = Some(connections);
        self
    }

    /// Set the idle connection timeout.
    pub fn idle_timeout(mut self, timeout: Duration) -> Self {
        self.idle_timeout = Some(timeout);
        self
    }

    /// Set the `User-Agent` value.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Set the metrics collector.
    pub fn metrics(mut self, metrics: Arc<dyn MetricsCollector>) -> Self {
        self.metrics = Some(metrics);
        self
    }

    /// Load region and endpoint from the standard environment variables.
    ///
    /// Reads `AWS_REGION` (falling back to `AWS_DEFAULT_REGION`) and
    /// `AWS_ENDPOINT_URL`. Only fills values not already set on the builder,
    /// so an explicit region or endpoint wins over the environment.
    pub fn from_env(self) -> Result<Self, ConfigurationError> {
        self.from_env_for_service(None)
    }

    /// Like [`from_env`](Self::from_env), but a service-specific
    /// `AWS_ENDPOINT_URL_{SERVICE}` wins over `AWS_ENDPOINT_URL`.
    pub fn from_env_for_service(
        mut self,
        service_env_name: Option<&str>,
    ) -> Result<Self, ConfigurationError> {
        if self.region.is_none() {
            self.region = env_value("AWS_REGION").or_else(|| env_value("AWS_DEFAULT_REGION"));
        }

        if self.endpoint.is_none() {
            let service_endpoint = service_env_name
                .and_then(|name| env_value(&format!("AWS_ENDPOINT_URL_{}", name)));
            if let Some(endpoint) = service_endpoint.or_else(|| env_value("AWS_ENDPOINT_URL")) {
                self.endpoint = Some(parse_endpoint(endpoint)?);
            }
        }

        Ok(self)
    }

    /// Build the configuration.
    pub fn build(self) -> Result<ClientConfig, ConfigurationError> {
        let defaults = ClientConfig::default();
        let config = ClientConfig {
            region: self.region.unwrap_or(defaults.region),
            credentials_provider: self
                .credentials_provider
                .unwrap_or(defaults.credentials_provider),
            endpoint: self.endpoint,
            connect_timeout: self.connect_timeout.unwrap_or(defaults.connect_timeout),
            read_timeout: self.read_timeout.unwrap_or(defaults.read_timeout),
            operation_timeout: self.operation_timeout.unwrap_or(defaults.operation_timeout),
            max_connections: self.max_connections.unwrap_or(defaults.max_connections),
            idle_timeout: self.idle_timeout.unwrap_or(defaults.idle_timeout),
            user_agent: self.user_agent.unwrap_or(defaults.user_agent),
            metrics: self.metrics.unwrap_or(defaults.metrics),
        };

        validate(&config)?;
        Ok(config)
    }
}

fn env_value(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

fn parse_endpoint(endpoint: String) -> Result<Url, ConfigurationError> {
    let url = Url::parse(&endpoint).map_err(|e| ConfigurationError::InvalidEndpoint {
        url: endpoint.clone(),
        details: e.to_string(),
    })?;
    match url.scheme() {
        "http" | "https" if url.host_str().is_some() => Ok(url),
        _ => Err(ConfigurationError::InvalidEndpoint {
            url: endpoint,
            details: "endpoint must be an http(s) URL with a host".to_string(),
        }),
    }
}

fn validate(config: &ClientConfig) -> Result<(), ConfigurationError> {
    let region = config.region.trim();
    if region.is_empty() {
        return Err(ConfigurationError::MissingRegion);
    }
    if !region
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-')
    {
        return Err(ConfigurationError::InvalidConfiguration {
            field: "region".to_string(),
            message: format!("'{}' is not a valid region name", config.region),
        });
    }
    if config.operation_timeout.is_zero() {
        return Err(ConfigurationError::InvalidConfiguration {
            field: "operation_timeout".to_string(),
            message: "must be greater than zero".to_string(),
        });
    }
    if config.operation_timeout > MAX_OPERATION_TIMEOUT {
        return Err(ConfigurationError::InvalidConfiguration {
            field: "operation_timeout".to_string(),
            message: format!("must not exceed {:?}", MAX_OPERATION_TIMEOUT),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ClientConfig::builder().build().unwrap();
        assert_eq!(config.region, "us-east-1");
        assert!(config.endpoint.is_none());
        assert_eq!(config.operation_timeout, Duration::from_secs(60));
        assert!(config.user_agent.starts_with("aws-rpc-integration/"));
    }

    #[test]
    fn test_resolve_endpoint_from_region() {
        let config = ClientConfig::builder().region("eu-west-1").build().unwrap();
        assert_eq!(
            config.resolve_endpoint("workmail").unwrap().as_str(),
            "https://workmail.eu-west-1.amazonaws.com/"
        );
        assert_eq!(
            config.resolve_endpoint("api.ecr").unwrap().as_str(),
            "https://api.ecr.eu-west-1.amazonaws.com/"
        );
    }

    #[test]
    fn test_endpoint_override_wins() {
        let config = ClientConfig::builder()
            .endpoint("http://localhost:4566")
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(
            config.resolve_endpoint("workmail").unwrap().as_str(),
            "http://localhost:4566/"
        );
    }

    #[test]
    fn test_invalid_endpoint_rejected() {
        assert!(matches!(
            ClientConfig::builder().endpoint("not a url"),
            Err(ConfigurationError::InvalidEndpoint { .. })
        ));
        assert!(ClientConfig::builder().endpoint("ftp://example.com").is_err());
    }

    #[test]
    fn test_empty_region_rejected() {
        assert!(matches!(
            ClientConfig::builder().region("  ").build(),
            Err(ConfigurationError::MissingRegion)
        ));
        assert!(ClientConfig::builder().region("us east").build().is_err());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        assert!(ClientConfig::builder()
            .operation_timeout(Duration::ZERO)
            .build()
            .is_err());
    }

    #[test]
    fn test_oversized_timeout_rejected() {
        let err = ClientConfig::builder()
            .operation_timeout(Duration::from_secs(u64::MAX))
            .build()
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigurationError::InvalidConfiguration { ref field, .. } if field == "operation_timeout"
        ));
        assert!(ClientConfig::builder()
            .operation_timeout(MAX_OPERATION_TIMEOUT)
            .build()
            .is_ok());
    }

    #[test]
    fn test_explicit_values_win_over_env() {
        std::env::set_var("AWS_ENDPOINT_URL_CONFIGTEST", "http://from-env:9000");
        let config = ClientConfig::builder()
            .region("ap-south-1")
            .endpoint("http://explicit:4566")
            .unwrap()
            .from_env_for_service(Some("CONFIGTEST"))
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(config.region, "ap-south-1");
        assert_eq!(
            config.endpoint.as_ref().map(Url::as_str),
            Some("http://explicit:4566/")
        );

        let config = ClientConfig::builder()
            .from_env_for_service(Some("CONFIGTEST"))
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(
            config.endpoint.as_ref().map(Url::as_str),
            Some("http://from-env:9000/")
        );
        std::env::remove_var("AWS_ENDPOINT_URL_CONFIGTEST");
    }

    #[test]
    fn test_debug_omits_secrets() {
        let config = ClientConfig::default();
        let debug = format!("{:?}", config);
        assert!(debug.contains("us-east-1"));
        assert!(debug.contains("chain"));
    }
}
