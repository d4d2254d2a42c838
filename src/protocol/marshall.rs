use super::{Marshaller, ServiceMetadata, WireRequest};
use crate::error::MarshallError;
use crate::shape::{validate_required, Shape};
use bytes::Bytes;
use http::Method;
use std::collections::BTreeMap;

/// Generic AWS JSON marshaller for one operation.
///
/// Serializes any [`Shape`] to a JSON object, checks required members against
/// the shape's descriptor, and frames it as `POST /` with the protocol
/// headers. Object keys are emitted in sorted order, so equal inputs produce
/// byte-identical requests.
#[derive(Debug, Clone, Copy)]
pub struct JsonMarshaller {
    metadata: &'static ServiceMetadata,
    operation: &'static str,
}

impl JsonMarshaller {
    /// Create a marshaller for `operation` of the given service.
    pub fn new(metadata: &'static ServiceMetadata, operation: &'static str) -> Self {
        Self {
            metadata,
            operation,
        }
    }

    /// Operation name.
    pub fn operation(&self) -> &'static str {
        self.operation
    }
}

impl<I: Shape> Marshaller<I> for JsonMarshaller {
    fn marshall(&self, input: &I) -> Result<WireRequest, MarshallError> {
        let value = serde_json::to_value(input).map_err(|e| MarshallError::Serialization {
            shape: I::SHAPE_NAME,
            message: e.to_string(),
        })?;

        validate_required(I::SHAPE_NAME, I::MEMBERS, &value)?;

        let body = serde_json::to_vec(&value).map_err(|e| MarshallError::Serialization {
            shape: I::SHAPE_NAME,
            message: e.to_string(),
        })?;

        let mut headers = BTreeMap::new();
        headers.insert("content-type".to_string(), self.metadata.content_type());
        headers.insert("x-amz-target".to_string(), self.metadata.target(self.operation));

        Ok(WireRequest {
            method: Method::POST,
            path: "/".to_string(),
            query: Vec::new(),
            headers,
            body: Bytes::from(body),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    static METADATA: ServiceMetadata = ServiceMetadata {
        service_name: "Test",
        target_prefix: "TestService_20240101",
        signing_name: "test",
        endpoint_prefix: "test",
        json_version: "1.1",
        env_name: "TEST",
    };

    crate::shape! {
        /// Nested test shape.
        pub struct Label {
            name: Option<String> => "Name", required String;
            note: Option<String> => "Note", optional String;
        }
    }

    crate::shape! {
        /// Test request.
        pub struct PutThingRequest {
            thing_id: Option<String> => "ThingId", required String;
            size: Option<i64> => "Size", optional Long;
            labels: Option<Vec<Label>> => "Labels", optional StructureList(Label);
            attributes: Option<BTreeMap<String, String>> => "Attributes", optional Map;
        }
    }

    fn marshaller() -> JsonMarshaller {
        JsonMarshaller::new(&METADATA, "PutThing")
    }

    #[test]
    fn test_frames_request() {
        let input = PutThingRequest {
            thing_id: Some("t-1".to_string()),
            size: Some(42),
            ..Default::default()
        };
        let wire = marshaller().marshall(&input).unwrap();

        assert_eq!(wire.method, Method::POST);
        assert_eq!(wire.path, "/");
        assert!(wire.query.is_empty());
        assert_eq!(wire.headers["content-type"], "application/x-amz-json-1.1");
        assert_eq!(wire.headers["x-amz-target"], "TestService_20240101.PutThing");
        assert_eq!(wire.body, Bytes::from_static(br#"{"Size":42,"ThingId":"t-1"}"#));
    }

    #[test]
    fn test_absent_and_empty_collections_differ() {
        let absent = PutThingRequest {
            thing_id: Some("t".to_string()),
            ..Default::default()
        };
        let empty = PutThingRequest {
            labels: Some(Vec::new()),
            attributes: Some(BTreeMap::new()),
            ..absent.clone()
        };
        let absent = marshaller().marshall(&absent).unwrap();
        let empty = marshaller().marshall(&empty).unwrap();
        assert_eq!(absent.body, Bytes::from_static(br#"{"ThingId":"t"}"#));
        assert_eq!(
            empty.body,
            Bytes::from_static(br#"{"Attributes":{},"Labels":[],"ThingId":"t"}"#)
        );
    }

    #[test]
    fn test_deterministic() {
        let mut attributes = BTreeMap::new();
        attributes.insert("z".to_string(), "1".to_string());
        attributes.insert("a".to_string(), "2".to_string());
        let input = PutThingRequest {
            thing_id: Some("t".to_string()),
            attributes: Some(attributes),
            labels: Some(vec![Label {
                name: Some("n".to_string()),
                note: None,
            }]),
            size: None,
        };
        let first = marshaller().marshall(&input).unwrap();
        let second = marshaller().marshall(&input.clone()).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_missing_nested_required() {
        let input = PutThingRequest {
            thing_id: Some("t".to_string()),
            labels: Some(vec![
                Label {
                    name: Some("ok".to_string()),
                    note: None,
                },
                Label {
                    name: None,
                    note: Some("missing name".to_string()),
                },
            ]),
            ..Default::default()
        };
        let err = marshaller().marshall(&input).unwrap_err();
        assert_eq!(
            err,
            MarshallError::MissingRequiredParameter {
                shape: "PutThingRequest",
                parameter: "Labels[1].Name".to_string(),
            }
        );
    }
}
