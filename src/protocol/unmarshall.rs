use super::Unmarshaller;
use crate::error::mapping::{extra_fields, extract_discriminator, extract_message, UNKNOWN_ERROR_CODE};
use crate::error::{resolve_kind, ResponseParseError, SdkError, ServiceError, ServiceErrorKind};
use crate::shape::Shape;
use crate::transport::HttpResponse;
use serde_json::{Map, Value};
use std::marker::PhantomData;
use thiserror::Error;

/// Failure to turn a response into a result shape.
#[derive(Debug, Error)]
pub enum UnmarshallError<K> {
    /// The response is a well-formed service error.
    #[error("{0}")]
    Service(ServiceError<K>),

    /// The response could not be decoded.
    #[error(transparent)]
    Parse(#[from] ResponseParseError),
}

impl<K> From<UnmarshallError<K>> for SdkError<K> {
    fn from(error: UnmarshallError<K>) -> Self {
        match error {
            UnmarshallError::Service(e) => SdkError::Service(e),
            UnmarshallError::Parse(e) => SdkError::ResponseParse(e),
        }
    }
}

/// Generic AWS JSON unmarshaller.
///
/// A non-2xx status, or a 2xx body carrying `__type`, is decoded as a service
/// error. Otherwise the body is decoded into the result shape; an empty body
/// decodes as `{}`.
pub struct JsonUnmarshaller<O, K> {
    _marker: PhantomData<fn() -> (O, K)>,
}

impl<O, K> JsonUnmarshaller<O, K> {
    /// Create an unmarshaller.
    pub fn new() -> Self {
        Self {
            _marker: PhantomData,
        }
    }
}

impl<O, K> Default for JsonUnmarshaller<O, K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<O, K> std::fmt::Debug for JsonUnmarshaller<O, K> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JsonUnmarshaller")
            .field("output", &std::any::type_name::<O>())
            .finish()
    }
}

impl<O: Shape, K: ServiceErrorKind> Unmarshaller<O, K> for JsonUnmarshaller<O, K> {
    fn unmarshall(&self, response: &HttpResponse) -> Result<O, UnmarshallError<K>> {
        if !response.is_success() {
            return Err(decode_error(response));
        }

        let value = if is_blank(&response.body) {
            Value::Object(Map::new())
        } else {
            serde_json::from_slice::<Value>(&response.body).map_err(|e| {
                ResponseParseError::MalformedJson {
                    status: response.status,
                    message: e.to_string(),
                }
            })?
        };

        let map = match value {
            Value::Object(map) => map,
            other => {
                return Err(UnmarshallError::Parse(ResponseParseError::ShapeMismatch {
                    shape: O::SHAPE_NAME,
                    status: Some(response.status),
                    message: format!("expected a JSON object, got {}", json_type(&other)),
                }))
            }
        };

        if map.contains_key("__type") {
            return Err(service_error(response, map));
        }

        serde_json::from_value::<O>(Value::Object(map)).map_err(|e| {
            UnmarshallError::Parse(ResponseParseError::ShapeMismatch {
                shape: O::SHAPE_NAME,
                status: Some(response.status),
                message: e.to_string(),
            })
        })
    }
}

fn decode_error<K: ServiceErrorKind>(response: &HttpResponse) -> UnmarshallError<K> {
    if is_blank(&response.body) {
        return service_error(response, Map::new());
    }

    match serde_json::from_slice::<Value>(&response.body) {
        Ok(Value::Object(map)) => service_error(response, map),
        Ok(other) => UnmarshallError::Parse(ResponseParseError::ShapeMismatch {
            shape: "ErrorResponse",
            status: Some(response.status),
            message: format!("expected a JSON object, got {}", json_type(&other)),
        }),
        Err(_) => UnmarshallError::Parse(ResponseParseError::NonJsonErrorBody {
            status: response.status,
            content_type: response.header("content-type").map(str::to_string),
        }),
    }
}

fn service_error<K: ServiceErrorKind>(
    response: &HttpResponse,
    body: Map<String, Value>,
) -> UnmarshallError<K> {
    let code = extract_discriminator(&response.headers, Some(&body))
        .unwrap_or_else(|| UNKNOWN_ERROR_CODE.to_string());
    let message = extract_message(&body);

    let mut error = ServiceError::new(resolve_kind::<K>(&code), code, response.status)
        .with_fields(extra_fields(body));
    if let Some(message) = message {
        error = error.with_message(message);
    }
    if let Some(request_id) = response.request_id() {
        error = error.with_request_id(request_id);
    }
    UnmarshallError::Service(error)
}

fn is_blank(body: &[u8]) -> bool {
    body.iter().all(u8::is_ascii_whitespace)
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::ecr::{
        BatchCheckLayerAvailabilityResponse, EcrErrorKind, LayerAvailability,
    };
    use crate::services::workmail::{DeleteUserResponse, WorkMailErrorKind};

    fn decode(
        response: HttpResponse,
    ) -> Result<BatchCheckLayerAvailabilityResponse, UnmarshallError<EcrErrorKind>> {
        JsonUnmarshaller::<BatchCheckLayerAvailabilityResponse, EcrErrorKind>::new()
            .unmarshall(&response)
    }

    #[test]
    fn test_success_body() {
        let response = HttpResponse::new(
            200,
            r#"{"layers":[{"layerDigest":"sha256:abc","layerAvailability":"AVAILABLE","layerSize":10}],"failures":[]}"#,
        );
        let output = decode(response).unwrap();
        let layers = output.layers.unwrap();
        assert_eq!(layers[0].layer_availability, Some(LayerAvailability::Available));
        assert_eq!(output.failures, Some(Vec::new()));
    }

    #[test]
    fn test_empty_success_body_is_empty_object() {
        let response = HttpResponse::new(200, "");
        let output: DeleteUserResponse =
            Unmarshaller::<_, WorkMailErrorKind>::unmarshall(&JsonUnmarshaller::new(), &response)
                .unwrap();
        assert_eq!(output, DeleteUserResponse::default());
    }

    #[test]
    fn test_malformed_success_body() {
        let err = decode(HttpResponse::new(200, "{not json")).unwrap_err();
        assert!(matches!(
            err,
            UnmarshallError::Parse(ResponseParseError::MalformedJson { status: 200, .. })
        ));
    }

    #[test]
    fn test_type_mismatch_is_parse_error() {
        let err = decode(HttpResponse::new(200, r#"{"layers":"nope"}"#)).unwrap_err();
        assert!(matches!(
            err,
            UnmarshallError::Parse(ResponseParseError::ShapeMismatch { .. })
        ));
        let err = decode(HttpResponse::new(200, "[1,2]")).unwrap_err();
        assert!(matches!(
            err,
            UnmarshallError::Parse(ResponseParseError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_success_status_with_type_is_error() {
        let response = HttpResponse::new(
            200,
            r#"{"__type":"com.amazonaws.ecr#ServerException","message":"internal"}"#,
        );
        match decode(response).unwrap_err() {
            UnmarshallError::Service(e) => {
                assert_eq!(e.kind(), &EcrErrorKind::Server);
                assert_eq!(e.message(), Some("internal"));
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_empty_error_body_uses_header() {
        let response = HttpResponse::new(404, "")
            .with_header("x-amzn-ErrorType", "RepositoryNotFoundException:http://internal/")
            .with_header("x-amzn-RequestId", "req-9");
        match decode(response).unwrap_err() {
            UnmarshallError::Service(e) => {
                assert_eq!(e.kind(), &EcrErrorKind::RepositoryNotFound);
                assert_eq!(e.request_id(), Some("req-9"));
                assert_eq!(e.status(), 404);
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_error_without_discriminator() {
        match decode(HttpResponse::new(500, "{}")).unwrap_err() {
            UnmarshallError::Service(e) => {
                assert_eq!(e.code(), "UnknownError");
                assert_eq!(e.kind(), &EcrErrorKind::Unknown("UnknownError".to_string()));
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_non_json_error_body() {
        let response =
            HttpResponse::new(502, "<html>Bad Gateway</html>").with_header("Content-Type", "text/html");
        match decode(response).unwrap_err() {
            UnmarshallError::Parse(ResponseParseError::NonJsonErrorBody { status, content_type }) => {
                assert_eq!(status, 502);
                assert_eq!(content_type.as_deref(), Some("text/html"));
            }
            other => panic!("unexpected: {:?}", other),
        }
    }
}
