//! ECR client.

use super::operations::*;
use super::types::*;
use super::{EcrErrorKind, METADATA};
use crate::client::{ClientBuilder, ServiceClient};
use crate::error::SdkResult;
use crate::pipeline::{Invoker, Request};
use crate::protocol::ServiceMetadata;

/// Amazon Elastic Container Registry client.
#[derive(Debug, Clone)]
pub struct EcrClient {
    invoker: Invoker,
}

impl EcrClient {
    /// Create a builder.
    pub fn builder() -> ClientBuilder<Self> {
        ClientBuilder::new()
    }

    /// Checks the availability of one or more image layers.
    pub async fn batch_check_layer_availability(
        &self,
        request: impl Into<Request<BatchCheckLayerAvailabilityRequest>>,
    ) -> SdkResult<BatchCheckLayerAvailabilityResponse, EcrErrorKind> {
        self.invoker.invoke::<BatchCheckLayerAvailability>(request.into()).await
    }

    /// Starts a layer upload and returns its upload id.
    pub async fn initiate_layer_upload(
        &self,
        request: impl Into<Request<InitiateLayerUploadRequest>>,
    ) -> SdkResult<InitiateLayerUploadResponse, EcrErrorKind> {
        self.invoker.invoke::<InitiateLayerUpload>(request.into()).await
    }

    /// Uploads one part of a layer.
    pub async fn upload_layer_part(
        &self,
        request: impl Into<Request<UploadLayerPartRequest>>,
    ) -> SdkResult<UploadLayerPartResponse, EcrErrorKind> {
        self.invoker.invoke::<UploadLayerPart>(request.into()).await
    }

    /// Finishes a layer upload once all parts are sent.
    pub async fn complete_layer_upload(
        &self,
        request: impl Into<Request<CompleteLayerUploadRequest>>,
    ) -> SdkResult<CompleteLayerUploadResponse, EcrErrorKind> {
        self.invoker.invoke::<CompleteLayerUpload>(request.into()).await
    }

    /// Retrieves a registry authorization token.
    pub async fn get_authorization_token(
        &self,
        request: impl Into<Request<GetAuthorizationTokenRequest>>,
    ) -> SdkResult<GetAuthorizationTokenResponse, EcrErrorKind> {
        self.invoker.invoke::<GetAuthorizationToken>(request.into()).await
    }

    /// Creates a repository.
    pub async fn create_repository(
        &self,
        request: impl Into<Request<CreateRepositoryRequest>>,
    ) -> SdkResult<CreateRepositoryResponse, EcrErrorKind> {
        self.invoker.invoke::<CreateRepository>(request.into()).await
    }

    /// Describes repositories in a registry.
    pub async fn describe_repositories(
        &self,
        request: impl Into<Request<DescribeRepositoriesRequest>>,
    ) -> SdkResult<DescribeRepositoriesResponse, EcrErrorKind> {
        self.invoker.invoke::<DescribeRepositories>(request.into()).await
    }

    /// Returns the scan findings of an image.
    pub async fn describe_image_scan_findings(
        &self,
        request: impl Into<Request<DescribeImageScanFindingsRequest>>,
    ) -> SdkResult<DescribeImageScanFindingsResponse, EcrErrorKind> {
        self.invoker.invoke::<DescribeImageScanFindings>(request.into()).await
    }
}

impl ServiceClient for EcrClient {
    fn metadata() -> &'static ServiceMetadata {
        &METADATA
    }

    fn from_invoker(invoker: Invoker) -> Self {
        Self { invoker }
    }

    fn invoker(&self) -> &Invoker {
        &self.invoker
    }
}
