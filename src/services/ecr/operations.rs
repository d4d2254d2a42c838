//! ECR operation bindings.

use super::types::*;
use super::EcrErrorKind;
use crate::pipeline::operations;

operations! {
    error: EcrErrorKind;

    /// Checks the availability of image layers in a repository.
    BatchCheckLayerAvailability: BatchCheckLayerAvailabilityRequest => BatchCheckLayerAvailabilityResponse, idempotent = true;
    /// Starts a layer upload.
    InitiateLayerUpload: InitiateLayerUploadRequest => InitiateLayerUploadResponse, idempotent = false;
    /// Uploads one part of a layer.
    UploadLayerPart: UploadLayerPartRequest => UploadLayerPartResponse, idempotent = false;
    /// Finishes a layer upload.
    CompleteLayerUpload: CompleteLayerUploadRequest => CompleteLayerUploadResponse, idempotent = false;
    /// Retrieves a registry authorization token valid for 12 hours.
    GetAuthorizationToken: GetAuthorizationTokenRequest => GetAuthorizationTokenResponse, idempotent = true;
    /// Creates a repository.
    CreateRepository: CreateRepositoryRequest => CreateRepositoryResponse, idempotent = false;
    /// Describes repositories in a registry.
    DescribeRepositories: DescribeRepositoriesRequest => DescribeRepositoriesResponse, idempotent = true;
    /// Returns the scan findings of an image.
    DescribeImageScanFindings: DescribeImageScanFindingsRequest => DescribeImageScanFindingsResponse, idempotent = true;
}
