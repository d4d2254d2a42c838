//! Shared credentials file provider.

use super::{AwsCredentials, CredentialsProvider};
use crate::error::CredentialsError;
use async_trait::async_trait;
use std::collections::HashMap;
use std::env;
use std::path::PathBuf;

/// Default profile name.
pub const DEFAULT_PROFILE: &str = "default";

/// AWS profile name environment variable.
pub const AWS_PROFILE: &str = "AWS_PROFILE";

/// AWS credentials file environment variable.
pub const AWS_SHARED_CREDENTIALS_FILE: &str = "AWS_SHARED_CREDENTIALS_FILE";

type Profiles = HashMap<String, HashMap<String, String>>;

/// Credentials provider that reads the shared credentials file.
///
/// The file is `~/.aws/credentials` unless `AWS_SHARED_CREDENTIALS_FILE` or
/// an explicit path says otherwise. The profile is the constructor argument,
/// else `AWS_PROFILE`, else `default`.
#[derive(Debug, Clone)]
pub struct ProfileCredentialsProvider {
    profile_name: String,
    credentials_file: Option<PathBuf>,
}

impl ProfileCredentialsProvider {
    /// Create a provider using `AWS_PROFILE` or the default profile.
    pub fn new() -> Self {
        let profile = env::var(AWS_PROFILE).unwrap_or_else(|_| DEFAULT_PROFILE.to_string());
        Self::with_profile(profile)
    }

    /// Create a provider for a specific profile.
    pub fn with_profile(profile_name: impl Into<String>) -> Self {
        Self {
            profile_name: profile_name.into(),
            credentials_file: None,
        }
    }

    /// Read from a specific credentials file.
    pub fn with_credentials_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.credentials_file = Some(path.into());
        self
    }

    fn credentials_file_path(&self) -> Result<PathBuf, CredentialsError> {
        if let Some(path) = &self.credentials_file {
            return Ok(path.clone());
        }
        if let Ok(path) = env::var(AWS_SHARED_CREDENTIALS_FILE) {
            return Ok(PathBuf::from(path));
        }
        dirs::home_dir()
            .map(|home| home.join(".aws").join("credentials"))
            .ok_or_else(|| CredentialsError::ProfileError {
                message: "cannot determine home directory".to_string(),
            })
    }

    fn parse(content: &str) -> Profiles {
        let mut profiles = Profiles::new();
        let mut current: Option<String> = None;

        for line in content.lines().map(str::trim) {
            if line.is_empty() || line.starts_with('#') || line.starts_with(';') {
                continue;
            }

            if let Some(header) = line.strip_prefix('[').and_then(|l| l.strip_suffix(']')) {
                let name = header.trim();
                let name = name.strip_prefix("profile ").unwrap_or(name).trim();
                profiles.entry(name.to_string()).or_default();
                current = Some(name.to_string());
                continue;
            }

            if let (Some(profile), Some((key, value))) = (&current, line.split_once('=')) {
                profiles
                    .entry(profile.clone())
                    .or_default()
                    .insert(key.trim().to_string(), value.trim().to_string());
            }
        }

        profiles
    }

    fn profile_value<'a>(
        &self,
        profile: &'a HashMap<String, String>,
        key: &str,
    ) -> Result<&'a String, CredentialsError> {
        profile.get(key).ok_or_else(|| CredentialsError::ProfileError {
            message: format!("{} not found in profile '{}'", key, self.profile_name),
        })
    }
}

impl Default for ProfileCredentialsProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CredentialsProvider for ProfileCredentialsProvider {
    async fn get_credentials(&self) -> Result<AwsCredentials, CredentialsError> {
        let path = self.credentials_file_path()?;
        let content = tokio::fs::read_to_string(&path)
            .await
            .map_err(|e| CredentialsError::ProfileError {
                message: format!("failed to read credentials file at {:?}: {}", path, e),
            })?;

        let profiles = Self::parse(&content);
        let profile =
            profiles
                .get(&self.profile_name)
                .ok_or_else(|| CredentialsError::ProfileError {
                    message: format!("profile '{}' not found", self.profile_name),
                })?;

        let access_key_id = self.profile_value(profile, "aws_access_key_id")?;
        let secret_access_key = self.profile_value(profile, "aws_secret_access_key")?;

        let credentials = AwsCredentials::new(access_key_id, secret_access_key);
        Ok(match profile.get("aws_session_token") {
            Some(token) => credentials.with_session_token(token),
            None => credentials,
        })
    }

    fn name(&self) -> &'static str {
        "profile"
    }
}
