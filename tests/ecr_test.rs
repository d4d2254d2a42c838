//! ECR facade tests against the spy transport.

mod common;

use aws_rpc::mocks::MockResponse;
use aws_rpc::services::ecr::*;
use aws_rpc::{ErrorCategory, SdkError};
use bytes::Bytes;
use common::Harness;
use serde_json::{json, Value};

#[tokio::test]
async fn test_batch_check_layer_availability_end_to_end() {
    let harness = Harness::new();
    harness.transport.push_response(MockResponse::ok(
        json!({
            "layers": [{
                "layerDigest": "sha256:aaaa",
                "layerAvailability": "AVAILABLE",
                "layerSize": 2048,
                "mediaType": "application/vnd.docker.image.rootfs.diff.tar.gzip"
            }],
            "failures": [{
                "layerDigest": "sha256:bbbb",
                "failureCode": "MissingLayerDigest",
                "failureReason": "not found"
            }]
        })
        .to_string(),
    ));
    let client: EcrClient = harness.client();

    let output = client
        .batch_check_layer_availability(BatchCheckLayerAvailabilityRequest {
            repository_name: Some("demo".into()),
            layer_digests: Some(vec!["sha256:aaaa".into(), "sha256:bbbb".into()]),
            ..Default::default()
        })
        .await
        .unwrap();

    let request = harness.transport.last_request().unwrap();
    assert_eq!(request.url.as_str(), "https://api.ecr.us-west-2.amazonaws.com/");
    assert_eq!(
        request.header("x-amz-target"),
        Some("AmazonEC2ContainerRegistry_V20150921.BatchCheckLayerAvailability")
    );
    assert_eq!(
        harness.last_body(),
        json!({"repositoryName": "demo", "layerDigests": ["sha256:aaaa", "sha256:bbbb"]})
    );
    assert_eq!(harness.signer.calls()[0].context.service, "ecr");

    let layers = output.layers.unwrap();
    assert_eq!(layers.len(), 1);
    assert_eq!(layers[0].layer_digest.as_deref(), Some("sha256:aaaa"));
    assert_eq!(layers[0].layer_availability, Some(LayerAvailability::Available));
    assert_eq!(layers[0].layer_size, Some(2048));

    let failures = output.failures.unwrap();
    assert_eq!(failures[0].failure_code, Some(LayerFailureCode::MissingLayerDigest));
}

#[tokio::test]
async fn test_describe_repositories_round_trips() {
    let body = json!({
        "repositories": [
            {
                "repositoryArn": "arn:aws:ecr:us-west-2:111122223333:repository/my-app",
                "registryId": "111122223333",
                "repositoryName": "my-app",
                "repositoryUri": "111122223333.dkr.ecr.us-west-2.amazonaws.com/my-app",
                "createdAt": 1700000000.5,
                "imageTagMutability": "IMMUTABLE",
                "imageScanningConfiguration": {"scanOnPush": true}
            },
            {
                "repositoryName": "empty",
                "imageTagMutability": "SOMETHING_NEW"
            }
        ],
        "nextToken": "page-2"
    });
    let harness = Harness::new();
    harness.transport.push_response(MockResponse::ok(body.to_string()));
    let client: EcrClient = harness.client();

    let output = client
        .describe_repositories(DescribeRepositoriesRequest::default())
        .await
        .unwrap();

    let repositories = output.repositories.as_ref().unwrap();
    assert_eq!(
        repositories[0].image_tag_mutability,
        Some(ImageTagMutability::Immutable)
    );
    assert_eq!(
        repositories[1].image_tag_mutability,
        Some(ImageTagMutability::Unknown("SOMETHING_NEW".into()))
    );
    assert!(repositories[1].created_at.is_none());

    let reencoded: Value = serde_json::from_slice(&serde_json::to_vec(&output).unwrap()).unwrap();
    assert_eq!(reencoded, body);
    assert_eq!(harness.last_body(), json!({}));
}

#[tokio::test]
async fn test_absent_and_empty_lists_stay_distinct() {
    let harness = Harness::with_transport(aws_rpc::mocks::MockTransport::with_responses(vec![
        MockResponse::ok(r#"{"repositories":[]}"#),
        MockResponse::ok("{}"),
    ]));
    let client: EcrClient = harness.client();

    let empty = client
        .describe_repositories(DescribeRepositoriesRequest::default())
        .await
        .unwrap();
    let absent = client
        .describe_repositories(DescribeRepositoriesRequest::default())
        .await
        .unwrap();

    assert_eq!(empty.repositories, Some(Vec::new()));
    assert_eq!(absent.repositories, None);
    assert_eq!(serde_json::to_string(&empty).unwrap(), r#"{"repositories":[]}"#);
    assert_eq!(serde_json::to_string(&absent).unwrap(), "{}");
}

#[tokio::test]
async fn test_invalid_layer_part_details() {
    let harness = Harness::new();
    harness.transport.push_response(MockResponse::json(
        400,
        json!({
            "__type": "InvalidLayerPartException",
            "message": "The layer part is out of order",
            "registryId": "111122223333",
            "repositoryName": "my-app",
            "uploadId": "upload-1",
            "lastValidByteReceived": 1048576
        })
        .to_string(),
    ));
    let client: EcrClient = harness.client();

    let err = client
        .upload_layer_part(UploadLayerPartRequest {
            repository_name: Some("my-app".into()),
            upload_id: Some("upload-1".into()),
            part_first_byte: Some(2_000_000),
            part_last_byte: Some(2_999_999),
            layer_part_blob: Some(Bytes::from_static(b"layer bytes")),
            ..Default::default()
        })
        .await
        .unwrap_err();

    assert_eq!(err.category(), ErrorCategory::Service);
    assert_eq!(err.kind(), Some(&EcrErrorKind::InvalidLayerPart));

    let service = err.service_error().unwrap();
    assert_eq!(service.message(), Some("The layer part is out of order"));
    let details: InvalidLayerPartDetails = service.details().unwrap();
    assert_eq!(details.last_valid_byte_received, Some(1048576));
    assert_eq!(details.upload_id.as_deref(), Some("upload-1"));

    assert_eq!(
        harness.last_body()["layerPartBlob"],
        json!("bGF5ZXIgYnl0ZXM=")
    );
}

#[tokio::test]
async fn test_server_exception_is_retryable() {
    let harness = Harness::new();
    harness.transport.push_response(MockResponse::service_error(
        500,
        "ServerException",
        "internal",
    ));
    let client: EcrClient = harness.client();

    let err = client
        .get_authorization_token(GetAuthorizationTokenRequest::default())
        .await
        .unwrap_err();

    assert_eq!(err.kind(), Some(&EcrErrorKind::Server));
    assert!(err.is_retryable());
    assert_eq!(harness.transport.request_count(), 1);
}

#[tokio::test]
async fn test_get_authorization_token_decodes_timestamps() {
    let harness = Harness::new();
    harness.transport.push_response(MockResponse::ok(
        r#"{"authorizationData":[{"authorizationToken":"QVdTOnRva2Vu","expiresAt":1700043200,"proxyEndpoint":"https://111122223333.dkr.ecr.us-west-2.amazonaws.com"}]}"#,
    ));
    let client: EcrClient = harness.client();

    let output = client
        .get_authorization_token(GetAuthorizationTokenRequest::default())
        .await
        .unwrap();

    let data = &output.authorization_data.unwrap()[0];
    assert_eq!(data.authorization_token.as_deref(), Some("QVdTOnRva2Vu"));
    assert_eq!(data.expires_at.unwrap().timestamp(), 1700043200);
}

#[tokio::test]
async fn test_missing_layer_digests_is_marshall_error() {
    let harness = Harness::new();
    let client: EcrClient = harness.client();

    let err = client
        .complete_layer_upload(CompleteLayerUploadRequest {
            repository_name: Some("my-app".into()),
            upload_id: Some("upload-1".into()),
            ..Default::default()
        })
        .await
        .unwrap_err();

    assert!(matches!(err, SdkError::Marshall(_)));
    assert_eq!(err.category(), ErrorCategory::Validation);
    assert_eq!(harness.transport.request_count(), 0);
}
