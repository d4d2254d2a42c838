//! Canonical request building for AWS Signature V4.

use super::should_sign_header;
use crate::transport::HttpRequest;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Characters left unencoded: the RFC 3986 unreserved set.
const UNRESERVED: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// URI-encode a single path segment or query component.
pub fn uri_encode(value: &str) -> String {
    utf8_percent_encode(value, UNRESERVED).to_string()
}

/// Canonical URI: each path segment encoded, `/` preserved.
pub fn canonical_uri(path: &str) -> String {
    if path.is_empty() || path == "/" {
        return "/".to_string();
    }
    let decoded: Vec<String> = path
        .split('/')
        .map(|segment| {
            percent_encoding::percent_decode_str(segment)
                .decode_utf8_lossy()
                .into_owned()
        })
        .collect();
    let encoded: Vec<String> = decoded.iter().map(|s| uri_encode(s)).collect();
    let joined = encoded.join("/");
    if joined.starts_with('/') {
        joined
    } else {
        format!("/{}", joined)
    }
}

/// Canonical query string: encoded pairs sorted by name, then value.
pub fn canonical_query_string(request: &HttpRequest) -> String {
    let mut params: Vec<(String, String)> = request
        .url
        .query_pairs()
        .map(|(k, v)| (uri_encode(&k), uri_encode(&v)))
        .collect();
    params.sort();
    params
        .iter()
        .map(|(k, v)| format!("{}={}", k, v))
        .collect::<Vec<_>>()
        .join("&")
}

/// Signed headers of the request, lowercase and sorted.
pub fn signed_header_names(request: &HttpRequest) -> Vec<&str> {
    request
        .headers
        .keys()
        .map(String::as_str)
        .filter(|name| should_sign_header(name))
        .collect()
}

/// Canonical headers block, one `name:value\n` line per signed header.
pub fn canonical_headers(request: &HttpRequest) -> String {
    request
        .headers
        .iter()
        .filter(|(name, _)| should_sign_header(name))
        .map(|(name, value)| {
            let value = value.split_whitespace().collect::<Vec<_>>().join(" ");
            format!("{}:{}\n", name, value)
        })
        .collect()
}

/// Assemble the canonical request.
pub fn canonical_request(request: &HttpRequest, payload_hash: &str) -> String {
    format!(
        "{}\n{}\n{}\n{}\n{}\n{}",
        request.method.as_str(),
        canonical_uri(request.url.path()),
        canonical_query_string(request),
        canonical_headers(request),
        signed_header_names(request).join(";"),
        payload_hash
    )
}
