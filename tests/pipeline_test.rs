//! Invocation pipeline behavior shared by every operation.

mod common;

use aws_rpc::error::{SdkError, TransportError};
use aws_rpc::metrics::{CallOutcome, MetricField};
use aws_rpc::mocks::{MockCredentialsProvider, MockResponse, MockSigner, MockTransport};
use aws_rpc::services::ecr::{
    DescribeRepositories, DescribeRepositoriesRequest, EcrClient, EcrErrorKind,
};
use aws_rpc::services::workmail::{ListOrganizationsRequest, WorkMailClient};
use aws_rpc::{CancellationToken, ErrorCategory, Request, RetryConfig, RetryPolicy, ServiceClient};
use common::Harness;
use std::time::Duration;

#[tokio::test]
async fn test_deadline_elapses_while_transport_hangs() {
    let harness = Harness::with_transport(MockTransport::hanging());
    let client: WorkMailClient = harness.client();

    let started = tokio::time::Instant::now();
    let err = client
        .list_organizations(
            Request::new(ListOrganizationsRequest::default())
                .with_timeout(Duration::from_millis(50)),
        )
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        SdkError::Transport(TransportError::Timeout { .. })
    ));
    assert!(started.elapsed() < Duration::from_secs(5));
    assert_eq!(harness.transport.request_count(), 1);
    assert!(harness.transport.deadlines()[0].is_some());
}

#[tokio::test]
async fn test_cancellation_aborts_dispatch() {
    let harness = Harness::with_transport(MockTransport::hanging());
    let client: WorkMailClient = harness.client();
    let token = CancellationToken::new();

    let canceller = token.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(20)).await;
        canceller.cancel();
    });

    let err = client
        .list_organizations(
            Request::new(ListOrganizationsRequest::default()).with_cancellation(token),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, SdkError::Transport(TransportError::Cancelled)));
    assert_eq!(err.category(), ErrorCategory::Transport);
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn test_cancelled_token_sends_nothing() {
    let harness = Harness::new();
    let client: WorkMailClient = harness.client();
    let token = CancellationToken::new();
    token.cancel();

    let err = client
        .list_organizations(
            Request::new(ListOrganizationsRequest::default()).with_cancellation(token),
        )
        .await
        .unwrap_err();

    assert!(matches!(err, SdkError::Transport(TransportError::Cancelled)));
    assert_eq!(harness.provider.call_count(), 0);
    assert_eq!(harness.transport.request_count(), 0);
}

#[tokio::test]
async fn test_unbounded_timeout_means_no_deadline() {
    let harness = Harness::with_transport(MockTransport::with_default(MockResponse::ok(
        r#"{"OrganizationSummaries":[]}"#,
    )));
    let client: WorkMailClient = harness.client();

    let output = tokio::spawn(async move {
        client
            .list_organizations(
                Request::new(ListOrganizationsRequest::default()).with_timeout(Duration::MAX),
            )
            .await
    })
    .await
    .expect("call does not panic")
    .unwrap();

    assert_eq!(output.organization_summaries, Some(Vec::new()));
    assert_eq!(harness.transport.deadlines(), vec![None]);
}

#[tokio::test]
async fn test_deadline_covers_credential_resolution() {
    let harness = Harness::new().with_provider(MockCredentialsProvider::hanging());
    let client: WorkMailClient = harness.client();

    let outcome = tokio::time::timeout(
        Duration::from_secs(2),
        client.list_organizations(
            Request::new(ListOrganizationsRequest::default())
                .with_timeout(Duration::from_millis(50)),
        ),
    )
    .await
    .expect("call returns before its deadline plus slack");

    assert!(matches!(
        outcome,
        Err(SdkError::Transport(TransportError::Timeout { .. }))
    ));
    assert_eq!(harness.provider.call_count(), 1);
    assert_eq!(harness.signer.sign_count(), 0);
    assert_eq!(harness.transport.request_count(), 0);
}

#[tokio::test]
async fn test_cancellation_covers_credential_resolution() {
    let harness = Harness::new().with_provider(MockCredentialsProvider::hanging());
    let client: WorkMailClient = harness.client();
    let token = CancellationToken::new();

    let canceller = token.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(20)).await;
        canceller.cancel();
    });

    let outcome = tokio::time::timeout(
        Duration::from_secs(2),
        client.list_organizations(
            Request::new(ListOrganizationsRequest::default()).with_cancellation(token),
        ),
    )
    .await
    .expect("cancellation ends the call");

    assert!(matches!(
        outcome,
        Err(SdkError::Transport(TransportError::Cancelled))
    ));
    assert_eq!(harness.transport.request_count(), 0);
}

#[tokio::test]
async fn test_signing_failure_sends_nothing() {
    let harness = Harness::new().with_signer(MockSigner::failing("no key"));
    let client: EcrClient = harness.client();

    let err = client
        .describe_repositories(DescribeRepositoriesRequest::default())
        .await
        .unwrap_err();

    assert!(matches!(err, SdkError::Signing(_)));
    assert_eq!(err.category(), ErrorCategory::Signing);
    assert_eq!(harness.transport.request_count(), 0);
}

#[tokio::test]
async fn test_credentials_failure_stops_before_marshalling() {
    let harness = Harness::new().with_provider(MockCredentialsProvider::failing("expired"));
    let client: EcrClient = harness.client();

    let err = client
        .describe_repositories(DescribeRepositoriesRequest::default())
        .await
        .unwrap_err();

    assert!(matches!(err, SdkError::Credentials(_)));
    assert_eq!(harness.signer.sign_count(), 0);
    assert_eq!(harness.transport.request_count(), 0);
}

#[tokio::test]
async fn test_transport_error_is_not_retried_by_pipeline() {
    let harness = Harness::new();
    harness.transport.push_error(TransportError::Connection {
        message: "connection reset".to_string(),
    });
    let client: EcrClient = harness.client();

    let err = client
        .describe_repositories(DescribeRepositoriesRequest::default())
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        SdkError::Transport(TransportError::Connection { .. })
    ));
    assert!(err.is_retryable());
    assert_eq!(harness.transport.request_count(), 1);
}

#[tokio::test]
async fn test_calls_after_shutdown_fail() {
    let harness = Harness::new();
    let client: EcrClient = harness.client();
    client.shutdown();

    let err = client
        .describe_repositories(DescribeRepositoriesRequest::default())
        .await
        .unwrap_err();

    assert!(matches!(err, SdkError::Transport(TransportError::Shutdown)));
    assert!(harness.transport.is_shut_down());
    assert_eq!(harness.transport.request_count(), 0);
}

#[tokio::test]
async fn test_metrics_for_successful_call() {
    let harness = Harness::new();
    harness
        .transport
        .push_response(MockResponse::ok(r#"{"repositories":[]}"#));
    let client: EcrClient = harness.client();

    client
        .describe_repositories(DescribeRepositoriesRequest::default())
        .await
        .unwrap();

    let fields = harness.metrics.fields("DescribeRepositories");
    for field in [
        MetricField::CredentialsRequestTime,
        MetricField::RequestMarshallTime,
        MetricField::RequestSigningTime,
        MetricField::HttpRequestTime,
        MetricField::ResponseProcessingTime,
        MetricField::ClientExecuteTime,
    ] {
        assert!(fields.contains(&field), "missing {:?}", field);
    }
    assert_eq!(
        harness.metrics.outcomes("DescribeRepositories"),
        vec![CallOutcome::Success]
    );
}

#[tokio::test]
async fn test_metrics_for_failed_calls() {
    let harness = Harness::new();
    harness.transport.push_response(MockResponse::service_error(
        400,
        "RepositoryNotFoundException",
        "missing",
    ));
    let client: EcrClient = harness.client();

    client
        .describe_repositories(DescribeRepositoriesRequest::default())
        .await
        .unwrap_err();
    client
        .create_repository(aws_rpc::services::ecr::CreateRepositoryRequest::default())
        .await
        .unwrap_err();

    assert_eq!(
        harness.metrics.outcomes("DescribeRepositories"),
        vec![CallOutcome::Failure {
            category: "Service".to_string(),
            code: Some("RepositoryNotFoundException".to_string()),
        }]
    );
    assert_eq!(
        harness.metrics.outcomes("CreateRepository"),
        vec![CallOutcome::Failure {
            category: "Validation".to_string(),
            code: None,
        }]
    );
    let fields = harness.metrics.fields("CreateRepository");
    assert!(fields.contains(&MetricField::ClientExecuteTime));
    assert!(!fields.contains(&MetricField::HttpRequestTime));
}

#[tokio::test]
async fn test_retry_policy_wraps_idempotent_call() {
    let harness = Harness::with_transport(MockTransport::with_responses(vec![
        MockResponse::service_error(500, "ServerException", "try again"),
        MockResponse::ok(r#"{"repositories":[]}"#),
    ]));
    let client: EcrClient = harness.client();
    let policy = RetryPolicy::new(
        RetryConfig::new(2)
            .with_initial_backoff(Duration::from_millis(1))
            .with_jitter(false),
    );

    let output = policy
        .execute_operation::<DescribeRepositories, _, _>(|| {
            client.describe_repositories(DescribeRepositoriesRequest::default())
        })
        .await
        .unwrap();

    assert_eq!(output.repositories, Some(Vec::new()));
    assert_eq!(harness.transport.request_count(), 2);
}

#[tokio::test]
async fn test_retry_policy_gives_up_on_terminal_error() {
    let harness = Harness::with_transport(MockTransport::with_default(
        MockResponse::service_error(404, "RepositoryNotFoundException", "gone"),
    ));
    let client: EcrClient = harness.client();
    let policy = RetryPolicy::new(RetryConfig::new(3).with_initial_backoff(Duration::from_millis(1)));

    let err = policy
        .execute_operation::<DescribeRepositories, _, _>(|| {
            client.describe_repositories(DescribeRepositoriesRequest::default())
        })
        .await
        .unwrap_err();

    assert_eq!(err.kind(), Some(&EcrErrorKind::RepositoryNotFound));
    assert_eq!(harness.transport.request_count(), 1);
}
