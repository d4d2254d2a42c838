//! WorkMail error kinds.

use crate::error::service_error_kind;

service_error_kind! {
    /// Modeled WorkMail errors, in registry order.
    pub enum WorkMailErrorKind {
        /// The directory service doesn't recognize the credentials supplied by WorkMail.
        DirectoryServiceAuthenticationFailed = "DirectoryServiceAuthenticationFailedException",
        /// The directory on which the operation acts is unavailable.
        DirectoryUnavailable = "DirectoryUnavailableException",
        /// The email address is already in use by another entity.
        EmailAddressInUse = "EmailAddressInUseException",
        /// The user, group, or resource is already registered.
        EntityAlreadyRegistered = "EntityAlreadyRegisteredException",
        /// The identifier does not match any user, group, or resource.
        EntityNotFound = "EntityNotFoundException",
        /// The entity is in a state that does not allow the operation.
        EntityState = "EntityStateException",
        /// The configuration for a resource is invalid.
        InvalidConfiguration = "InvalidConfigurationException",
        /// One or more input parameters are invalid.
        InvalidParameter = "InvalidParameterException",
        /// The password does not meet the password policy.
        InvalidPassword = "InvalidPasswordException",
        /// A limit of the organization was exceeded.
        LimitExceeded = "LimitExceededException",
        /// The mail domain is not part of the organization.
        MailDomainNotFound = "MailDomainNotFoundException",
        /// The mail domain is not yet verified.
        MailDomainState = "MailDomainStateException",
        /// The name is already used by another entity.
        NameAvailability = "NameAvailabilityException",
        /// The organization does not exist.
        OrganizationNotFound = "OrganizationNotFoundException",
        /// The organization is in a state that does not allow the operation.
        OrganizationState = "OrganizationStateException",
        /// The name is reserved.
        ReservedName = "ReservedNameException",
        /// The resource cannot be found.
        ResourceNotFound = "ResourceNotFoundException",
        /// The resource can have up to 50 user-applied tags.
        TooManyTags = "TooManyTagsException",
        /// The operation is not supported.
        UnsupportedOperation = "UnsupportedOperationException",
    }
    retryable: [DirectoryUnavailable]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{resolve_kind, ServiceErrorKind};

    #[test]
    fn test_codes_round_trip_through_registry() {
        for (code, kind) in WorkMailErrorKind::registry() {
            assert_eq!(kind.code(), *code);
            assert_eq!(&resolve_kind::<WorkMailErrorKind>(code), kind);
        }
    }

    #[test]
    fn test_retryable_kinds() {
        assert!(WorkMailErrorKind::DirectoryUnavailable.is_retryable());
        assert!(!WorkMailErrorKind::EntityNotFound.is_retryable());
        assert!(!WorkMailErrorKind::Unknown("X".into()).is_retryable());
    }
}
