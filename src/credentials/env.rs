//! Environment variable credentials provider.

use super::{AwsCredentials, CredentialsProvider};
use crate::error::CredentialsError;
use async_trait::async_trait;
use std::env;

/// Access key ID variable.
pub const AWS_ACCESS_KEY_ID: &str = "AWS_ACCESS_KEY_ID";
/// Secret access key variable.
pub const AWS_SECRET_ACCESS_KEY: &str = "AWS_SECRET_ACCESS_KEY";
/// Session token variable.
pub const AWS_SESSION_TOKEN: &str = "AWS_SESSION_TOKEN";

/// Credentials provider that reads from environment variables.
///
/// Reads `AWS_ACCESS_KEY_ID`, `AWS_SECRET_ACCESS_KEY` and the optional
/// `AWS_SESSION_TOKEN` unless custom variable names are given.
#[derive(Debug, Clone)]
pub struct EnvCredentialsProvider {
    access_key_var: String,
    secret_key_var: String,
    session_token_var: String,
}

impl EnvCredentialsProvider {
    /// Create a provider with the standard variable names.
    pub fn new() -> Self {
        Self::with_vars(AWS_ACCESS_KEY_ID, AWS_SECRET_ACCESS_KEY, AWS_SESSION_TOKEN)
    }

    /// Create a provider with custom variable names.
    pub fn with_vars(
        access_key_var: impl Into<String>,
        secret_key_var: impl Into<String>,
        session_token_var: impl Into<String>,
    ) -> Self {
        Self {
            access_key_var: access_key_var.into(),
            secret_key_var: secret_key_var.into(),
            session_token_var: session_token_var.into(),
        }
    }

    fn read_required(name: &str) -> Result<String, CredentialsError> {
        let value = env::var(name).map_err(|_| CredentialsError::NotFound)?;
        if value.is_empty() {
            return Err(CredentialsError::Invalid {
                message: format!("{} is empty", name),
            });
        }
        Ok(value)
    }
}

impl Default for EnvCredentialsProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CredentialsProvider for EnvCredentialsProvider {
    async fn get_credentials(&self) -> Result<AwsCredentials, CredentialsError> {
        let access_key_id = Self::read_required(&self.access_key_var)?;
        let secret_access_key = Self::read_required(&self.secret_key_var)?;

        let credentials = AwsCredentials::new(access_key_id, secret_access_key);
        match env::var(&self.session_token_var).ok().filter(|s| !s.is_empty()) {
            Some(token) => Ok(credentials.with_session_token(token)),
            None => Ok(credentials),
        }
    }

    fn name(&self) -> &'static str {
        "environment"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Each test uses its own variable names so tests can run in parallel.
    fn provider(prefix: &str) -> EnvCredentialsProvider {
        EnvCredentialsProvider::with_vars(
            format!("{}_AKID", prefix),
            format!("{}_SECRET", prefix),
            format!("{}_TOKEN", prefix),
        )
    }

    #[tokio::test]
    async fn test_env_provider_success() {
        env::set_var("RPC_ENV_OK_AKID", "AKID");
        env::set_var("RPC_ENV_OK_SECRET", "SECRET");

        let creds = provider("RPC_ENV_OK").get_credentials().await.unwrap();
        assert_eq!(creds.access_key_id(), "AKID");
        assert_eq!(creds.secret_access_key(), "SECRET");
        assert!(creds.session_token().is_none());
    }

    #[tokio::test]
    async fn test_env_provider_with_session_token() {
        env::set_var("RPC_ENV_TOK_AKID", "AKID");
        env::set_var("RPC_ENV_TOK_SECRET", "SECRET");
        env::set_var("RPC_ENV_TOK_TOKEN", "TOKEN");

        let creds = provider("RPC_ENV_TOK").get_credentials().await.unwrap();
        assert_eq!(creds.session_token(), Some("TOKEN"));
    }

    #[tokio::test]
    async fn test_env_provider_missing() {
        let result = provider("RPC_ENV_MISSING").get_credentials().await;
        assert!(matches!(result, Err(CredentialsError::NotFound)));
    }

    #[tokio::test]
    async fn test_env_provider_empty_value() {
        env::set_var("RPC_ENV_EMPTY_AKID", "");
        let result = provider("RPC_ENV_EMPTY").get_credentials().await;
        assert!(matches!(result, Err(CredentialsError::Invalid { .. })));
    }
}
