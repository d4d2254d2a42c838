//! ECR error kinds.

use crate::error::service_error_kind;
use serde::{Deserialize, Serialize};

service_error_kind! {
    /// Modeled ECR errors, in registry order.
    pub enum EcrErrorKind {
        /// The upload contained no data.
        EmptyUpload = "EmptyUploadException",
        /// The image has already been pushed.
        ImageAlreadyExists = "ImageAlreadyExistsException",
        /// The image requested does not exist.
        ImageNotFound = "ImageNotFoundException",
        /// The tag already exists on an immutable repository.
        ImageTagAlreadyExists = "ImageTagAlreadyExistsException",
        /// The layer digest does not match the uploaded content.
        InvalidLayer = "InvalidLayerException",
        /// The layer part size is invalid, or the first byte does not follow
        /// the last byte of the previous part. See [`InvalidLayerPartDetails`].
        InvalidLayerPart = "InvalidLayerPartException",
        /// A parameter is invalid.
        InvalidParameter = "InvalidParameterException",
        /// A tag key or value is invalid.
        InvalidTagParameter = "InvalidTagParameterException",
        /// The layer already exists.
        LayerAlreadyExists = "LayerAlreadyExistsException",
        /// The layer is not accessible.
        LayerInaccessible = "LayerInaccessibleException",
        /// Layer parts must be at least 5 MiB.
        LayerPartTooSmall = "LayerPartTooSmallException",
        /// The layers could not be found.
        LayersNotFound = "LayersNotFoundException",
        /// The lifecycle policy could not be found.
        LifecyclePolicyNotFound = "LifecyclePolicyNotFoundException",
        /// A lifecycle policy preview is already running.
        LifecyclePolicyPreviewInProgress = "LifecyclePolicyPreviewInProgressException",
        /// No lifecycle policy preview exists.
        LifecyclePolicyPreviewNotFound = "LifecyclePolicyPreviewNotFoundException",
        /// A service limit was exceeded.
        LimitExceeded = "LimitExceededException",
        /// Referenced images could not be found.
        ReferencedImagesNotFound = "ReferencedImagesNotFoundException",
        /// The repository already exists.
        RepositoryAlreadyExists = "RepositoryAlreadyExistsException",
        /// The repository still contains images.
        RepositoryNotEmpty = "RepositoryNotEmptyException",
        /// The repository could not be found.
        RepositoryNotFound = "RepositoryNotFoundException",
        /// The repository has no policy.
        RepositoryPolicyNotFound = "RepositoryPolicyNotFoundException",
        /// No scan findings exist for the image.
        ScanNotFound = "ScanNotFoundException",
        /// Internal server error.
        Server = "ServerException",
        /// Too many tags on the resource.
        TooManyTags = "TooManyTagsException",
        /// The image type is not supported.
        UnsupportedImageType = "UnsupportedImageTypeException",
        /// The upload could not be found or is no longer valid.
        UploadNotFound = "UploadNotFoundException",
    }
    retryable: [Server]
}

/// Members carried by `InvalidLayerPartException`.
///
/// Decode with [`ServiceError::details`](crate::error::ServiceError::details).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvalidLayerPartDetails {
    /// Registry of the upload.
    #[serde(default)]
    pub registry_id: Option<String>,
    /// Repository of the upload.
    #[serde(default)]
    pub repository_name: Option<String>,
    /// Upload id.
    #[serde(default)]
    pub upload_id: Option<String>,
    /// Last byte the service accepted; resume after it.
    #[serde(default)]
    pub last_valid_byte_received: Option<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{resolve_kind, ServiceError, ServiceErrorKind};
    use serde_json::json;

    #[test]
    fn test_codes_round_trip_through_registry() {
        for (code, kind) in EcrErrorKind::registry() {
            assert_eq!(kind.code(), *code);
            assert_eq!(&resolve_kind::<EcrErrorKind>(code), kind);
        }
    }

    #[test]
    fn test_invalid_layer_part_details() {
        let fields = json!({
            "registryId": "123456789012",
            "repositoryName": "app",
            "uploadId": "u-1",
            "lastValidByteReceived": 1048576
        });
        let fields = match fields {
            serde_json::Value::Object(map) => map,
            _ => unreachable!(),
        };
        let error = ServiceError::new(EcrErrorKind::InvalidLayerPart, "InvalidLayerPartException", 400)
            .with_fields(fields);

        let details: InvalidLayerPartDetails = error.details().unwrap();
        assert_eq!(details.last_valid_byte_received, Some(1048576));
        assert_eq!(details.upload_id.as_deref(), Some("u-1"));
        assert!(EcrErrorKind::Server.is_retryable());
        assert!(!error.kind().is_retryable());
    }
}
