//! Request signing.
//!
//! The pipeline signs every request through the [`RequestSigner`] trait after
//! marshalling and before dispatch. Signing is a pure function of the request,
//! the credentials resolved for that call, and the [`SigningContext`]; it
//! performs no I/O. [`SigV4Signer`] implements AWS Signature Version 4.

mod canonical;
mod signer;

pub use signer::SigV4Signer;

use crate::credentials::AwsCredentials;
use crate::error::SigningError;
use crate::transport::HttpRequest;
use chrono::{DateTime, Utc};
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};

type HmacSha256 = Hmac<Sha256>;

/// AWS Signature V4 algorithm identifier.
pub const AWS_ALGORITHM: &str = "AWS4-HMAC-SHA256";

/// Scope of a signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SigningContext {
    /// Region the request is sent to.
    pub region: String,
    /// Signing name of the service, e.g. `workmail` or `ecr`.
    pub service: String,
    /// Signing time.
    pub time: DateTime<Utc>,
}

impl SigningContext {
    /// Create a context signed at the current time.
    pub fn new(region: impl Into<String>, service: impl Into<String>) -> Self {
        Self {
            region: region.into(),
            service: service.into(),
            time: Utc::now(),
        }
    }

    /// Override the signing time.
    pub fn at(mut self, time: DateTime<Utc>) -> Self {
        self.time = time;
        self
    }
}

/// Signs outgoing requests.
pub trait RequestSigner: Send + Sync {
    /// Return `request` with authentication headers added.
    fn sign(
        &self,
        request: HttpRequest,
        credentials: &AwsCredentials,
        context: &SigningContext,
    ) -> Result<HttpRequest, SigningError>;
}

/// Calculate SHA-256 hash of data as lowercase hex.
pub fn sha256_hex(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    hex::encode(hasher.finalize())
}

/// Calculate HMAC-SHA256.
pub fn hmac_sha256(key: &[u8], data: &[u8]) -> Result<Vec<u8>, SigningError> {
    let mut mac =
        HmacSha256::new_from_slice(key).map_err(|e| SigningError::CalculationFailed {
            message: e.to_string(),
        })?;
    mac.update(data);
    Ok(mac.finalize().into_bytes().to_vec())
}

/// Derive the signing key.
///
/// kDate = HMAC("AWS4" + SecretKey, Date)
/// kRegion = HMAC(kDate, Region)
/// kService = HMAC(kRegion, Service)
/// kSigning = HMAC(kService, "aws4_request")
pub fn derive_signing_key(
    secret_key: &str,
    date_stamp: &str,
    region: &str,
    service: &str,
) -> Result<Vec<u8>, SigningError> {
    let k_secret = format!("AWS4{}", secret_key);
    let k_date = hmac_sha256(k_secret.as_bytes(), date_stamp.as_bytes())?;
    let k_region = hmac_sha256(&k_date, region.as_bytes())?;
    let k_service = hmac_sha256(&k_region, service.as_bytes())?;
    hmac_sha256(&k_service, b"aws4_request")
}

/// Build the credential scope string: `{date}/{region}/{service}/aws4_request`.
pub fn credential_scope(date_stamp: &str, region: &str, service: &str) -> String {
    format!("{}/{}/{}/aws4_request", date_stamp, region, service)
}

/// Format a timestamp as `YYYYMMDD'T'HHMMSS'Z'`.
pub fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.format("%Y%m%dT%H%M%SZ").to_string()
}

/// Format a date stamp as `YYYYMMDD`.
pub fn format_date_stamp(dt: &DateTime<Utc>) -> String {
    dt.format("%Y%m%d").to_string()
}

/// Check if a header takes part in the signature.
pub fn should_sign_header(name: &str) -> bool {
    let name = name.to_ascii_lowercase();
    name == "host" || name == "content-type" || name == "content-md5" || name.starts_with("x-amz-")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_sha256_empty() {
        assert_eq!(
            sha256_hex(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_credential_scope() {
        assert_eq!(
            credential_scope("20150830", "us-east-1", "workmail"),
            "20150830/us-east-1/workmail/aws4_request"
        );
    }

    #[test]
    fn test_formatting() {
        let dt = Utc.with_ymd_and_hms(2015, 8, 30, 12, 36, 0).unwrap();
        assert_eq!(format_datetime(&dt), "20150830T123600Z");
        assert_eq!(format_date_stamp(&dt), "20150830");
    }

    #[test]
    fn test_signing_key_is_deterministic() {
        let a = derive_signing_key("secret", "20150830", "us-east-1", "ecr").unwrap();
        let b = derive_signing_key("secret", "20150830", "us-east-1", "ecr").unwrap();
        let c = derive_signing_key("secret", "20150830", "us-west-2", "ecr").unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.len(), 32);
    }

    #[test]
    fn test_should_sign_header() {
        assert!(should_sign_header("Host"));
        assert!(should_sign_header("x-amz-target"));
        assert!(should_sign_header("content-type"));
        assert!(!should_sign_header("user-agent"));
        assert!(!should_sign_header("authorization"));
    }
}
