//! ECR request and result shapes.

#![allow(missing_docs)]

use crate::shape::encoding::{blob, epoch_seconds};
use crate::{open_enum, shape};
use bytes::Bytes;
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

open_enum! {
    /// Availability of a layer.
    pub enum LayerAvailability {
        /// The layer is available.
        Available = "AVAILABLE",
        /// The layer is not available.
        Unavailable = "UNAVAILABLE",
    }
}

open_enum! {
    /// Why a layer check failed.
    pub enum LayerFailureCode {
        /// The digest is malformed.
        InvalidLayerDigest = "InvalidLayerDigest",
        /// No digest was given.
        MissingLayerDigest = "MissingLayerDigest",
    }
}

open_enum! {
    /// Tag mutability of a repository.
    pub enum ImageTagMutability {
        /// Tags can be overwritten.
        Mutable = "MUTABLE",
        /// Tags cannot be overwritten.
        Immutable = "IMMUTABLE",
    }
}

open_enum! {
    /// State of an image scan.
    pub enum ScanStatus {
        /// The scan is running.
        InProgress = "IN_PROGRESS",
        /// The scan finished.
        Complete = "COMPLETE",
        /// The scan failed.
        Failed = "FAILED",
    }
}

open_enum! {
    /// Severity of a scan finding.
    pub enum FindingSeverity {
        /// Informational.
        Informational = "INFORMATIONAL",
        /// Low.
        Low = "LOW",
        /// Medium.
        Medium = "MEDIUM",
        /// High.
        High = "HIGH",
        /// Critical.
        Critical = "CRITICAL",
        /// No severity assigned.
        Undefined = "UNDEFINED",
    }
}

shape! {
    /// A key/value tag.
    pub struct Tag {
        key: Option<String> => "Key", optional String;
        value: Option<String> => "Value", optional String;
    }
}

shape! {
    /// An image layer.
    pub struct Layer {
        layer_digest: Option<String> => "layerDigest", optional String;
        layer_availability: Option<LayerAvailability> => "layerAvailability", optional Enum;
        layer_size: Option<i64> => "layerSize", optional Long;
        media_type: Option<String> => "mediaType", optional String;
    }
}

shape! {
    /// A layer that could not be checked.
    pub struct LayerFailure {
        layer_digest: Option<String> => "layerDigest", optional String;
        failure_code: Option<LayerFailureCode> => "failureCode", optional Enum;
        failure_reason: Option<String> => "failureReason", optional String;
    }
}

shape! {
    /// Docker registry credentials.
    pub struct AuthorizationData {
        /// Base64 of `user:password`.
        authorization_token: Option<String> => "authorizationToken", optional String;
        #[serde(with = "epoch_seconds")]
        expires_at: Option<DateTime<Utc>> => "expiresAt", optional Timestamp;
        proxy_endpoint: Option<String> => "proxyEndpoint", optional String;
    }
}

shape! {
    /// Scan-on-push setting.
    pub struct ImageScanningConfiguration {
        scan_on_push: Option<bool> => "scanOnPush", optional Boolean;
    }
}

shape! {
    /// A repository.
    pub struct Repository {
        repository_arn: Option<String> => "repositoryArn", optional String;
        registry_id: Option<String> => "registryId", optional String;
        repository_name: Option<String> => "repositoryName", optional String;
        repository_uri: Option<String> => "repositoryUri", optional String;
        #[serde(with = "epoch_seconds")]
        created_at: Option<DateTime<Utc>> => "createdAt", optional Timestamp;
        image_tag_mutability: Option<ImageTagMutability> => "imageTagMutability", optional Enum;
        image_scanning_configuration: Option<ImageScanningConfiguration> => "imageScanningConfiguration", optional Structure(ImageScanningConfiguration);
    }
}

shape! {
    /// Identifies an image by digest or tag.
    pub struct ImageIdentifier {
        image_digest: Option<String> => "imageDigest", optional String;
        image_tag: Option<String> => "imageTag", optional String;
    }
}

shape! {
    /// Scan status of an image.
    pub struct ImageScanStatus {
        status: Option<ScanStatus> => "status", optional Enum;
        description: Option<String> => "description", optional String;
    }
}

shape! {
    /// Attribute of a finding.
    pub struct Attribute {
        key: Option<String> => "key", required String;
        value: Option<String> => "value", optional String;
    }
}

shape! {
    /// A single vulnerability finding.
    pub struct ImageScanFinding {
        name: Option<String> => "name", optional String;
        description: Option<String> => "description", optional String;
        uri: Option<String> => "uri", optional String;
        severity: Option<FindingSeverity> => "severity", optional Enum;
        attributes: Option<Vec<Attribute>> => "attributes", optional StructureList(Attribute);
    }
}

shape! {
    /// Findings of an image scan.
    pub struct ImageScanFindings {
        #[serde(with = "epoch_seconds")]
        image_scan_completed_at: Option<DateTime<Utc>> => "imageScanCompletedAt", optional Timestamp;
        #[serde(with = "epoch_seconds")]
        vulnerability_source_updated_at: Option<DateTime<Utc>> => "vulnerabilitySourceUpdatedAt", optional Timestamp;
        findings: Option<Vec<ImageScanFinding>> => "findings", optional StructureList(ImageScanFinding);
        /// Number of findings per severity.
        finding_severity_counts: Option<BTreeMap<FindingSeverity, i32>> => "findingSeverityCounts", optional Map;
    }
}

// Layer uploads

shape! {
    /// Input of `BatchCheckLayerAvailability`.
    pub struct BatchCheckLayerAvailabilityRequest {
        registry_id: Option<String> => "registryId", optional String;
        repository_name: Option<String> => "repositoryName", required String;
        layer_digests: Option<Vec<String>> => "layerDigests", required List;
    }
}

shape! {
    /// Result of `BatchCheckLayerAvailability`.
    pub struct BatchCheckLayerAvailabilityResponse {
        layers: Option<Vec<Layer>> => "layers", optional StructureList(Layer);
        failures: Option<Vec<LayerFailure>> => "failures", optional StructureList(LayerFailure);
    }
}

shape! {
    /// Input of `InitiateLayerUpload`.
    pub struct InitiateLayerUploadRequest {
        registry_id: Option<String> => "registryId", optional String;
        repository_name: Option<String> => "repositoryName", required String;
    }
}

shape! {
    /// Result of `InitiateLayerUpload`.
    pub struct InitiateLayerUploadResponse {
        upload_id: Option<String> => "uploadId", optional String;
        /// Size in bytes the service expects for each part.
        part_size: Option<i64> => "partSize", optional Long;
    }
}

shape! {
    /// Input of `UploadLayerPart`.
    pub struct UploadLayerPartRequest {
        registry_id: Option<String> => "registryId", optional String;
        repository_name: Option<String> => "repositoryName", required String;
        upload_id: Option<String> => "uploadId", required String;
        part_first_byte: Option<i64> => "partFirstByte", required Long;
        part_last_byte: Option<i64> => "partLastByte", required Long;
        #[serde(with = "blob")]
        layer_part_blob: Option<Bytes> => "layerPartBlob", required Blob;
    }
}

shape! {
    /// Result of `UploadLayerPart`.
    pub struct UploadLayerPartResponse {
        registry_id: Option<String> => "registryId", optional String;
        repository_name: Option<String> => "repositoryName", optional String;
        upload_id: Option<String> => "uploadId", optional String;
        last_byte_received: Option<i64> => "lastByteReceived", optional Long;
    }
}

shape! {
    /// Input of `CompleteLayerUpload`.
    pub struct CompleteLayerUploadRequest {
        registry_id: Option<String> => "registryId", optional String;
        repository_name: Option<String> => "repositoryName", required String;
        upload_id: Option<String> => "uploadId", required String;
        layer_digests: Option<Vec<String>> => "layerDigests", required List;
    }
}

shape! {
    /// Result of `CompleteLayerUpload`.
    pub struct CompleteLayerUploadResponse {
        registry_id: Option<String> => "registryId", optional String;
        repository_name: Option<String> => "repositoryName", optional String;
        upload_id: Option<String> => "uploadId", optional String;
        layer_digest: Option<String> => "layerDigest", optional String;
    }
}

// Authorization

shape! {
    /// Input of `GetAuthorizationToken`.
    pub struct GetAuthorizationTokenRequest {
        registry_ids: Option<Vec<String>> => "registryIds", optional List;
    }
}

shape! {
    /// Result of `GetAuthorizationToken`.
    pub struct GetAuthorizationTokenResponse {
        authorization_data: Option<Vec<AuthorizationData>> => "authorizationData", optional StructureList(AuthorizationData);
    }
}

// Repositories

shape! {
    /// Input of `CreateRepository`.
    pub struct CreateRepositoryRequest {
        repository_name: Option<String> => "repositoryName", required String;
        tags: Option<Vec<Tag>> => "tags", optional StructureList(Tag);
        image_tag_mutability: Option<ImageTagMutability> => "imageTagMutability", optional Enum;
        image_scanning_configuration: Option<ImageScanningConfiguration> => "imageScanningConfiguration", optional Structure(ImageScanningConfiguration);
    }
}

shape! {
    /// Result of `CreateRepository`.
    pub struct CreateRepositoryResponse {
        repository: Option<Repository> => "repository", optional Structure(Repository);
    }
}

shape! {
    /// Input of `DescribeRepositories`.
    pub struct DescribeRepositoriesRequest {
        registry_id: Option<String> => "registryId", optional String;
        repository_names: Option<Vec<String>> => "repositoryNames", optional List;
        next_token: Option<String> => "nextToken", optional String;
        max_results: Option<i32> => "maxResults", optional Integer;
    }
}

shape! {
    /// Result of `DescribeRepositories`.
    pub struct DescribeRepositoriesResponse {
        repositories: Option<Vec<Repository>> => "repositories", optional StructureList(Repository);
        next_token: Option<String> => "nextToken", optional String;
    }
}

// Scanning

shape! {
    /// Input of `DescribeImageScanFindings`.
    pub struct DescribeImageScanFindingsRequest {
        registry_id: Option<String> => "registryId", optional String;
        repository_name: Option<String> => "repositoryName", required String;
        image_id: Option<ImageIdentifier> => "imageId", required Structure(ImageIdentifier);
        next_token: Option<String> => "nextToken", optional String;
        max_results: Option<i32> => "maxResults", optional Integer;
    }
}

shape! {
    /// Result of `DescribeImageScanFindings`.
    pub struct DescribeImageScanFindingsResponse {
        registry_id: Option<String> => "registryId", optional String;
        repository_name: Option<String> => "repositoryName", optional String;
        image_id: Option<ImageIdentifier> => "imageId", optional Structure(ImageIdentifier);
        image_scan_status: Option<ImageScanStatus> => "imageScanStatus", optional Structure(ImageScanStatus);
        image_scan_findings: Option<ImageScanFindings> => "imageScanFindings", optional Structure(ImageScanFindings);
        next_token: Option<String> => "nextToken", optional String;
    }
}
