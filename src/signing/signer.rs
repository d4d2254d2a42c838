//! AWS Signature V4 signer.

use super::canonical::{canonical_request, signed_header_names};
use super::{
    credential_scope, derive_signing_key, format_date_stamp, format_datetime, hmac_sha256,
    sha256_hex, RequestSigner, SigningContext, AWS_ALGORITHM,
};
use crate::credentials::AwsCredentials;
use crate::error::SigningError;
use crate::transport::HttpRequest;
use tracing::trace;

/// AWS Signature Version 4 signer.
///
/// Adds `host`, `x-amz-date`, `x-amz-security-token` (for temporary
/// credentials) and `authorization`. The `x-amz-content-sha256` header is
/// only added when enabled, since JSON protocol services do not need it.
#[derive(Debug, Clone, Default)]
pub struct SigV4Signer {
    content_sha256_header: bool,
}

impl SigV4Signer {
    /// Create a signer.
    pub fn new() -> Self {
        Self::default()
    }

    /// Also send the payload hash as `x-amz-content-sha256`.
    pub fn with_content_sha256_header(mut self, enabled: bool) -> Self {
        self.content_sha256_header = enabled;
        self
    }
}

impl RequestSigner for SigV4Signer {
    fn sign(
        &self,
        mut request: HttpRequest,
        credentials: &AwsCredentials,
        context: &SigningContext,
    ) -> Result<HttpRequest, SigningError> {
        if request.header("host").is_none() {
            let host = request
                .host_header()
                .ok_or_else(|| SigningError::InvalidRequest {
                    message: format!("URL '{}' has no host", request.url),
                })?;
            request.set_header("host", host);
        }

        let amz_date = format_datetime(&context.time);
        let date_stamp = format_date_stamp(&context.time);
        let payload_hash = sha256_hex(&request.body);

        request.set_header("x-amz-date", amz_date.as_str());
        if let Some(token) = credentials.session_token() {
            request.set_header("x-amz-security-token", token);
        }
        if self.content_sha256_header {
            request.set_header("x-amz-content-sha256", payload_hash.as_str());
        }

        let canonical = canonical_request(&request, &payload_hash);
        trace!(canonical_request = %canonical, "Built canonical request");

        let scope = credential_scope(&date_stamp, &context.region, &context.service);
        let string_to_sign = format!(
            "{}\n{}\n{}\n{}",
            AWS_ALGORITHM,
            amz_date,
            scope,
            sha256_hex(canonical.as_bytes())
        );

        let signing_key = derive_signing_key(
            credentials.secret_access_key(),
            &date_stamp,
            &context.region,
            &context.service,
        )?;
        let signature = hex::encode(hmac_sha256(&signing_key, string_to_sign.as_bytes())?);

        let authorization = format!(
            "{} Credential={}/{}, SignedHeaders={}, Signature={}",
            AWS_ALGORITHM,
            credentials.access_key_id(),
            scope,
            signed_header_names(&request).join(";"),
            signature
        );
        request.set_header("authorization", authorization);

        Ok(request)
    }
}
