//! Discriminator extraction and error-kind lookup for JSON protocol errors.
//!
//! AWS JSON services report errors as:
//!
//! ```json
//! {
//!   "__type": "com.amazonaws.ecr#InvalidLayerPartException",
//!   "message": "Layer part is not valid",
//!   "lastValidByteReceived": 1048576
//! }
//! ```
//!
//! The discriminator may also arrive in the `x-amzn-ErrorType` header as
//! `Code:http://internal.amazon.com/coral/...`. Both forms normalize to the
//! bare code.

use super::ServiceErrorKind;
use std::collections::BTreeMap;

/// Header carrying the error discriminator.
pub const ERROR_TYPE_HEADER: &str = "x-amzn-errortype";

/// Body members holding the discriminator, in priority order.
const DISCRIMINATOR_MEMBERS: &[&str] = &["__type", "code", "Code"];

/// Body members holding the human readable message, in priority order.
const MESSAGE_MEMBERS: &[&str] = &["message", "Message", "errorMessage"];

/// Code used when an error response carries no discriminator at all.
pub const UNKNOWN_ERROR_CODE: &str = "UnknownError";

const THROTTLING_CODES: &[&str] = &[
    "Throttling",
    "ThrottlingException",
    "ThrottledException",
    "RequestThrottledException",
    "TooManyRequestsException",
    "ProvisionedThroughputExceededException",
    "RequestLimitExceeded",
    "SlowDown",
];

/// Strip a `namespace#` prefix and a `:suffix` from a raw discriminator.
pub fn normalize_code(raw: &str) -> &str {
    let code = raw.split(':').next().unwrap_or(raw);
    let code = match code.rfind('#') {
        Some(idx) => &code[idx + 1..],
        None => code,
    };
    code.trim()
}

/// Extract the normalized discriminator from an error response.
///
/// The header wins over the body; within the body `__type` wins over `code`.
/// Returns `None` when no source yields a non-empty code.
pub fn extract_discriminator(
    headers: &BTreeMap<String, String>,
    body: Option<&serde_json::Map<String, serde_json::Value>>,
) -> Option<String> {
    let from_header = headers
        .iter()
        .find(|(name, _)| name.eq_ignore_ascii_case(ERROR_TYPE_HEADER))
        .map(|(_, value)| normalize_code(value))
        .filter(|code| !code.is_empty());

    if let Some(code) = from_header {
        return Some(code.to_string());
    }

    let body = body?;
    DISCRIMINATOR_MEMBERS
        .iter()
        .filter_map(|member| body.get(*member).and_then(|v| v.as_str()))
        .map(normalize_code)
        .find(|code| !code.is_empty())
        .map(str::to_string)
}

/// Extract the error message from an error body.
pub fn extract_message(body: &serde_json::Map<String, serde_json::Value>) -> Option<String> {
    MESSAGE_MEMBERS
        .iter()
        .find_map(|member| body.get(*member).and_then(|v| v.as_str()))
        .map(str::to_string)
}

/// Body members left after removing the discriminator and message members.
pub fn extra_fields(
    mut body: serde_json::Map<String, serde_json::Value>,
) -> serde_json::Map<String, serde_json::Value> {
    for member in DISCRIMINATOR_MEMBERS.iter().chain(MESSAGE_MEMBERS) {
        body.remove(*member);
    }
    body
}

/// Resolve a normalized code against the service registry.
///
/// Scans the registry in declaration order and returns the first exact match,
/// or the service's unknown kind carrying the code.
pub fn resolve_kind<K: ServiceErrorKind>(code: &str) -> K {
    K::registry()
        .iter()
        .find(|(candidate, _)| *candidate == code)
        .map(|(_, kind)| kind.clone())
        .unwrap_or_else(|| K::unknown(code.to_string()))
}

/// True for codes AWS uses to signal throttling.
pub fn is_throttling_code(code: &str) -> bool {
    THROTTLING_CODES.contains(&code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::ecr::EcrErrorKind;
    use crate::services::workmail::WorkMailErrorKind;
    use proptest::prelude::*;
    use serde_json::json;
    use test_case::test_case;

    fn object(value: serde_json::Value) -> serde_json::Map<String, serde_json::Value> {
        value.as_object().cloned().unwrap()
    }

    #[test_case("InvalidLayerPartException", "InvalidLayerPartException"; "bare")]
    #[test_case("com.amazonaws.ecr#InvalidLayerPartException", "InvalidLayerPartException"; "namespaced")]
    #[test_case("EntityNotFoundException:http://internal.amazon.com/coral/com.amazonaws.workmail/", "EntityNotFoundException"; "header suffix")]
    #[test_case("aws.workmail#EntityNotFoundException:http://x", "EntityNotFoundException"; "both")]
    fn test_normalize_code(raw: &str, expected: &str) {
        assert_eq!(normalize_code(raw), expected);
    }

    #[test]
    fn test_header_wins_over_body() {
        let mut headers = BTreeMap::new();
        headers.insert(
            "X-Amzn-ErrorType".to_string(),
            "EntityStateException:http://internal".to_string(),
        );
        let body = object(json!({"__type": "EntityNotFoundException"}));
        assert_eq!(
            extract_discriminator(&headers, Some(&body)).as_deref(),
            Some("EntityStateException")
        );
    }

    #[test]
    fn test_body_type_then_code() {
        let headers = BTreeMap::new();
        let body = object(json!({"code": "LimitExceededException"}));
        assert_eq!(
            extract_discriminator(&headers, Some(&body)).as_deref(),
            Some("LimitExceededException")
        );
        let body = object(json!({"__type": "a#B", "code": "C"}));
        assert_eq!(extract_discriminator(&headers, Some(&body)).as_deref(), Some("B"));
        assert_eq!(extract_discriminator(&headers, None), None);
    }

    #[test]
    fn test_extra_fields_strip_known_members() {
        let body = object(json!({
            "__type": "InvalidLayerPartException",
            "message": "bad part",
            "uploadId": "u-1",
            "lastValidByteReceived": 1048576
        }));
        assert_eq!(extract_message(&body).as_deref(), Some("bad part"));
        let fields = extra_fields(body);
        assert_eq!(fields.len(), 2);
        assert_eq!(fields["lastValidByteReceived"], json!(1048576));
    }

    #[test]
    fn test_resolve_known_and_unknown() {
        assert_eq!(
            resolve_kind::<EcrErrorKind>("InvalidLayerPartException"),
            EcrErrorKind::InvalidLayerPart
        );
        assert_eq!(
            resolve_kind::<WorkMailErrorKind>("EntityNotFoundException"),
            WorkMailErrorKind::EntityNotFound
        );
        assert_eq!(
            resolve_kind::<EcrErrorKind>("BrandNewException"),
            EcrErrorKind::Unknown("BrandNewException".to_string())
        );
    }

    #[test]
    fn test_registry_order_preserved() {
        let codes: Vec<&str> = WorkMailErrorKind::registry().iter().map(|(c, _)| *c).collect();
        assert_eq!(codes.first(), Some(&"DirectoryServiceAuthenticationFailedException"));
        assert_eq!(codes.last(), Some(&"UnsupportedOperationException"));
        assert_eq!(codes.len(), 19);
        assert_eq!(EcrErrorKind::registry().len(), 26);
    }

    proptest! {
        #[test]
        fn prop_normalize_strips_namespace_and_suffix(
            namespace in "[a-z][a-z0-9.]{0,20}",
            code in "[A-Z][A-Za-z]{0,30}",
            suffix in "[a-z:/.]{0,30}",
        ) {
            let raw = format!("{}#{}:{}", namespace, code, suffix);
            prop_assert_eq!(normalize_code(&raw), code.as_str());
        }

        #[test]
        fn prop_unmodeled_codes_are_preserved(code in "[A-Z][A-Za-z]{0,30}Fault") {
            prop_assert_eq!(
                resolve_kind::<EcrErrorKind>(&code),
                EcrErrorKind::Unknown(code.clone())
            );
        }
    }
}
