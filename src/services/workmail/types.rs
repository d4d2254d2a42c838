//! WorkMail request and result shapes.

#![allow(missing_docs)]

use crate::shape::encoding::epoch_seconds;
use crate::{open_enum, shape};
use chrono::{DateTime, Utc};

open_enum! {
    /// State of a user, group, or resource.
    pub enum EntityState {
        /// Registered to WorkMail.
        Enabled = "ENABLED",
        /// Not registered to WorkMail.
        Disabled = "DISABLED",
        /// Deleted.
        Deleted = "DELETED",
    }
}

open_enum! {
    /// Role of a user.
    pub enum UserRole {
        /// Regular user.
        User = "USER",
        /// Resource account.
        Resource = "RESOURCE",
        /// System user.
        SystemUser = "SYSTEM_USER",
    }
}

open_enum! {
    /// Kind of a group member or permission grantee.
    pub enum MemberType {
        /// A group.
        Group = "GROUP",
        /// A user.
        User = "USER",
    }
}

open_enum! {
    /// Mailbox permission.
    pub enum PermissionType {
        /// Full mailbox access.
        FullAccess = "FULL_ACCESS",
        /// Send as the mailbox owner.
        SendAs = "SEND_AS",
        /// Send on behalf of the mailbox owner.
        SendOnBehalf = "SEND_ON_BEHALF",
    }
}

open_enum! {
    /// Effect of an access control rule.
    pub enum AccessControlRuleEffect {
        /// Access is allowed.
        Allow = "ALLOW",
        /// Access is denied.
        Deny = "DENY",
    }
}

shape! {
    /// A key/value tag.
    pub struct Tag {
        /// Tag key.
        key: Option<String> => "Key", required String;
        /// Tag value.
        value: Option<String> => "Value", required String;
    }
}

shape! {
    /// User summary.
    pub struct User {
        id: Option<String> => "Id", optional String;
        email: Option<String> => "Email", optional String;
        name: Option<String> => "Name", optional String;
        display_name: Option<String> => "DisplayName", optional String;
        state: Option<EntityState> => "State", optional Enum;
        user_role: Option<UserRole> => "UserRole", optional Enum;
        #[serde(with = "epoch_seconds")]
        enabled_date: Option<DateTime<Utc>> => "EnabledDate", optional Timestamp;
        #[serde(with = "epoch_seconds")]
        disabled_date: Option<DateTime<Utc>> => "DisabledDate", optional Timestamp;
    }
}

shape! {
    /// Group summary.
    pub struct Group {
        id: Option<String> => "Id", optional String;
        email: Option<String> => "Email", optional String;
        name: Option<String> => "Name", optional String;
        state: Option<EntityState> => "State", optional Enum;
        #[serde(with = "epoch_seconds")]
        enabled_date: Option<DateTime<Utc>> => "EnabledDate", optional Timestamp;
        #[serde(with = "epoch_seconds")]
        disabled_date: Option<DateTime<Utc>> => "DisabledDate", optional Timestamp;
    }
}

shape! {
    /// Member of a group.
    pub struct Member {
        id: Option<String> => "Id", optional String;
        name: Option<String> => "Name", optional String;
        r#type: Option<MemberType> => "Type", optional Enum;
        state: Option<EntityState> => "State", optional Enum;
        #[serde(with = "epoch_seconds")]
        enabled_date: Option<DateTime<Utc>> => "EnabledDate", optional Timestamp;
        #[serde(with = "epoch_seconds")]
        disabled_date: Option<DateTime<Utc>> => "DisabledDate", optional Timestamp;
    }
}

shape! {
    /// Organization summary.
    pub struct OrganizationSummary {
        organization_id: Option<String> => "OrganizationId", optional String;
        alias: Option<String> => "Alias", optional String;
        error_message: Option<String> => "ErrorMessage", optional String;
        state: Option<String> => "State", optional String;
    }
}

shape! {
    /// Mailbox permission granted to a user or group.
    pub struct Permission {
        grantee_id: Option<String> => "GranteeId", required String;
        grantee_type: Option<MemberType> => "GranteeType", required Enum;
        permission_values: Option<Vec<PermissionType>> => "PermissionValues", required List;
    }
}

// Users

shape! {
    /// Input of `CreateUser`.
    pub struct CreateUserRequest {
        organization_id: Option<String> => "OrganizationId", required String;
        name: Option<String> => "Name", required String;
        display_name: Option<String> => "DisplayName", required String;
        password: Option<String> => "Password", required String;
    }
}

shape! {
    /// Result of `CreateUser`.
    pub struct CreateUserResponse {
        user_id: Option<String> => "UserId", optional String;
    }
}

shape! {
    /// Input of `DeleteUser`.
    pub struct DeleteUserRequest {
        organization_id: Option<String> => "OrganizationId", required String;
        user_id: Option<String> => "UserId", required String;
    }
}

shape! {
    /// Result of `DeleteUser`.
    pub struct DeleteUserResponse {}
}

shape! {
    /// Input of `DescribeUser`.
    pub struct DescribeUserRequest {
        organization_id: Option<String> => "OrganizationId", required String;
        user_id: Option<String> => "UserId", required String;
    }
}

shape! {
    /// Result of `DescribeUser`.
    pub struct DescribeUserResponse {
        user_id: Option<String> => "UserId", optional String;
        name: Option<String> => "Name", optional String;
        email: Option<String> => "Email", optional String;
        display_name: Option<String> => "DisplayName", optional String;
        state: Option<EntityState> => "State", optional Enum;
        user_role: Option<UserRole> => "UserRole", optional Enum;
        #[serde(with = "epoch_seconds")]
        enabled_date: Option<DateTime<Utc>> => "EnabledDate", optional Timestamp;
        #[serde(with = "epoch_seconds")]
        disabled_date: Option<DateTime<Utc>> => "DisabledDate", optional Timestamp;
    }
}

shape! {
    /// Input of `ListUsers`.
    pub struct ListUsersRequest {
        organization_id: Option<String> => "OrganizationId", required String;
        next_token: Option<String> => "NextToken", optional String;
        max_results: Option<i32> => "MaxResults", optional Integer;
    }
}

shape! {
    /// Result of `ListUsers`.
    pub struct ListUsersResponse {
        users: Option<Vec<User>> => "Users", optional StructureList(User);
        next_token: Option<String> => "NextToken", optional String;
    }
}

shape! {
    /// Input of `RegisterToWorkMail`.
    pub struct RegisterToWorkMailRequest {
        organization_id: Option<String> => "OrganizationId", required String;
        entity_id: Option<String> => "EntityId", required String;
        email: Option<String> => "Email", required String;
    }
}

shape! {
    /// Result of `RegisterToWorkMail`.
    pub struct RegisterToWorkMailResponse {}
}

shape! {
    /// Input of `DeregisterFromWorkMail`.
    pub struct DeregisterFromWorkMailRequest {
        organization_id: Option<String> => "OrganizationId", required String;
        entity_id: Option<String> => "EntityId", required String;
    }
}

shape! {
    /// Result of `DeregisterFromWorkMail`.
    pub struct DeregisterFromWorkMailResponse {}
}

shape! {
    /// Input of `ResetPassword`.
    pub struct ResetPasswordRequest {
        organization_id: Option<String> => "OrganizationId", required String;
        user_id: Option<String> => "UserId", required String;
        password: Option<String> => "Password", required String;
    }
}

shape! {
    /// Result of `ResetPassword`.
    pub struct ResetPasswordResponse {}
}

shape! {
    /// Input of `UpdatePrimaryEmailAddress`.
    pub struct UpdatePrimaryEmailAddressRequest {
        organization_id: Option<String> => "OrganizationId", required String;
        entity_id: Option<String> => "EntityId", required String;
        email: Option<String> => "Email", required String;
    }
}

shape! {
    /// Result of `UpdatePrimaryEmailAddress`.
    pub struct UpdatePrimaryEmailAddressResponse {}
}

// Groups

shape! {
    /// Input of `CreateGroup`.
    pub struct CreateGroupRequest {
        organization_id: Option<String> => "OrganizationId", required String;
        name: Option<String> => "Name", required String;
    }
}

shape! {
    /// Result of `CreateGroup`.
    pub struct CreateGroupResponse {
        group_id: Option<String> => "GroupId", optional String;
    }
}

shape! {
    /// Input of `DeleteGroup`.
    pub struct DeleteGroupRequest {
        organization_id: Option<String> => "OrganizationId", required String;
        group_id: Option<String> => "GroupId", required String;
    }
}

shape! {
    /// Result of `DeleteGroup`.
    pub struct DeleteGroupResponse {}
}

shape! {
    /// Input of `DescribeGroup`.
    pub struct DescribeGroupRequest {
        organization_id: Option<String> => "OrganizationId", required String;
        group_id: Option<String> => "GroupId", required String;
    }
}

shape! {
    /// Result of `DescribeGroup`.
    pub struct DescribeGroupResponse {
        group_id: Option<String> => "GroupId", optional String;
        name: Option<String> => "Name", optional String;
        email: Option<String> => "Email", optional String;
        state: Option<EntityState> => "State", optional Enum;
        #[serde(with = "epoch_seconds")]
        enabled_date: Option<DateTime<Utc>> => "EnabledDate", optional Timestamp;
        #[serde(with = "epoch_seconds")]
        disabled_date: Option<DateTime<Utc>> => "DisabledDate", optional Timestamp;
    }
}

shape! {
    /// Input of `ListGroups`.
    pub struct ListGroupsRequest {
        organization_id: Option<String> => "OrganizationId", required String;
        next_token: Option<String> => "NextToken", optional String;
        max_results: Option<i32> => "MaxResults", optional Integer;
    }
}

shape! {
    /// Result of `ListGroups`.
    pub struct ListGroupsResponse {
        groups: Option<Vec<Group>> => "Groups", optional StructureList(Group);
        next_token: Option<String> => "NextToken", optional String;
    }
}

shape! {
    /// Input of `AssociateMemberToGroup`.
    pub struct AssociateMemberToGroupRequest {
        organization_id: Option<String> => "OrganizationId", required String;
        group_id: Option<String> => "GroupId", required String;
        member_id: Option<String> => "MemberId", required String;
    }
}

shape! {
    /// Result of `AssociateMemberToGroup`.
    pub struct AssociateMemberToGroupResponse {}
}

shape! {
    /// Input of `DisassociateMemberFromGroup`.
    pub struct DisassociateMemberFromGroupRequest {
        organization_id: Option<String> => "OrganizationId", required String;
        group_id: Option<String> => "GroupId", required String;
        member_id: Option<String> => "MemberId", required String;
    }
}

shape! {
    /// Result of `DisassociateMemberFromGroup`.
    pub struct DisassociateMemberFromGroupResponse {}
}

shape! {
    /// Input of `ListGroupMembers`.
    pub struct ListGroupMembersRequest {
        organization_id: Option<String> => "OrganizationId", required String;
        group_id: Option<String> => "GroupId", required String;
        next_token: Option<String> => "NextToken", optional String;
        max_results: Option<i32> => "MaxResults", optional Integer;
    }
}

shape! {
    /// Result of `ListGroupMembers`.
    pub struct ListGroupMembersResponse {
        members: Option<Vec<Member>> => "Members", optional StructureList(Member);
        next_token: Option<String> => "NextToken", optional String;
    }
}

// Aliases

shape! {
    /// Input of `CreateAlias`.
    pub struct CreateAliasRequest {
        organization_id: Option<String> => "OrganizationId", required String;
        entity_id: Option<String> => "EntityId", required String;
        alias: Option<String> => "Alias", required String;
    }
}

shape! {
    /// Result of `CreateAlias`.
    pub struct CreateAliasResponse {}
}

shape! {
    /// Input of `DeleteAlias`.
    pub struct DeleteAliasRequest {
        organization_id: Option<String> => "OrganizationId", required String;
        entity_id: Option<String> => "EntityId", required String;
        alias: Option<String> => "Alias", required String;
    }
}

shape! {
    /// Result of `DeleteAlias`.
    pub struct DeleteAliasResponse {}
}

shape! {
    /// Input of `ListAliases`.
    pub struct ListAliasesRequest {
        organization_id: Option<String> => "OrganizationId", required String;
        entity_id: Option<String> => "EntityId", required String;
        next_token: Option<String> => "NextToken", optional String;
        max_results: Option<i32> => "MaxResults", optional Integer;
    }
}

shape! {
    /// Result of `ListAliases`.
    pub struct ListAliasesResponse {
        aliases: Option<Vec<String>> => "Aliases", optional List;
        next_token: Option<String> => "NextToken", optional String;
    }
}

// Organizations

shape! {
    /// Input of `DescribeOrganization`.
    pub struct DescribeOrganizationRequest {
        organization_id: Option<String> => "OrganizationId", required String;
    }
}

shape! {
    /// Result of `DescribeOrganization`.
    pub struct DescribeOrganizationResponse {
        organization_id: Option<String> => "OrganizationId", optional String;
        alias: Option<String> => "Alias", optional String;
        state: Option<String> => "State", optional String;
        directory_id: Option<String> => "DirectoryId", optional String;
        directory_type: Option<String> => "DirectoryType", optional String;
        default_mail_domain: Option<String> => "DefaultMailDomain", optional String;
        #[serde(with = "epoch_seconds")]
        completed_date: Option<DateTime<Utc>> => "CompletedDate", optional Timestamp;
        error_message: Option<String> => "ErrorMessage", optional String;
        arn: Option<String> => "ARN", optional String;
    }
}

shape! {
    /// Input of `ListOrganizations`.
    pub struct ListOrganizationsRequest {
        next_token: Option<String> => "NextToken", optional String;
        max_results: Option<i32> => "MaxResults", optional Integer;
    }
}

shape! {
    /// Result of `ListOrganizations`.
    pub struct ListOrganizationsResponse {
        organization_summaries: Option<Vec<OrganizationSummary>> => "OrganizationSummaries", optional StructureList(OrganizationSummary);
        next_token: Option<String> => "NextToken", optional String;
    }
}

// Mailboxes

shape! {
    /// Input of `GetMailboxDetails`.
    pub struct GetMailboxDetailsRequest {
        organization_id: Option<String> => "OrganizationId", required String;
        user_id: Option<String> => "UserId", required String;
    }
}

shape! {
    /// Result of `GetMailboxDetails`.
    pub struct GetMailboxDetailsResponse {
        /// Quota in MB.
        mailbox_quota: Option<i32> => "MailboxQuota", optional Integer;
        /// Current size in MB.
        mailbox_size: Option<f64> => "MailboxSize", optional Double;
    }
}

shape! {
    /// Input of `UpdateMailboxQuota`.
    pub struct UpdateMailboxQuotaRequest {
        organization_id: Option<String> => "OrganizationId", required String;
        user_id: Option<String> => "UserId", required String;
        mailbox_quota: Option<i32> => "MailboxQuota", required Integer;
    }
}

shape! {
    /// Result of `UpdateMailboxQuota`.
    pub struct UpdateMailboxQuotaResponse {}
}

shape! {
    /// Input of `PutMailboxPermissions`.
    pub struct PutMailboxPermissionsRequest {
        organization_id: Option<String> => "OrganizationId", required String;
        entity_id: Option<String> => "EntityId", required String;
        grantee_id: Option<String> => "GranteeId", required String;
        permission_values: Option<Vec<PermissionType>> => "PermissionValues", required List;
    }
}

shape! {
    /// Result of `PutMailboxPermissions`.
    pub struct PutMailboxPermissionsResponse {}
}

shape! {
    /// Input of `ListMailboxPermissions`.
    pub struct ListMailboxPermissionsRequest {
        organization_id: Option<String> => "OrganizationId", required String;
        entity_id: Option<String> => "EntityId", required String;
        next_token: Option<String> => "NextToken", optional String;
        max_results: Option<i32> => "MaxResults", optional Integer;
    }
}

shape! {
    /// Result of `ListMailboxPermissions`.
    pub struct ListMailboxPermissionsResponse {
        permissions: Option<Vec<Permission>> => "Permissions", optional StructureList(Permission);
        next_token: Option<String> => "NextToken", optional String;
    }
}

// Access control

shape! {
    /// Input of `GetAccessControlEffect`.
    pub struct GetAccessControlEffectRequest {
        organization_id: Option<String> => "OrganizationId", required String;
        ip_address: Option<String> => "IpAddress", required String;
        action: Option<String> => "Action", required String;
        user_id: Option<String> => "UserId", required String;
    }
}

shape! {
    /// Result of `GetAccessControlEffect`.
    pub struct GetAccessControlEffectResponse {
        effect: Option<AccessControlRuleEffect> => "Effect", optional Enum;
        matched_rules: Option<Vec<String>> => "MatchedRules", optional List;
    }
}

// Tagging

shape! {
    /// Input of `TagResource`.
    pub struct TagResourceRequest {
        resource_arn: Option<String> => "ResourceARN", required String;
        tags: Option<Vec<Tag>> => "Tags", required StructureList(Tag);
    }
}

shape! {
    /// Result of `TagResource`.
    pub struct TagResourceResponse {}
}

shape! {
    /// Input of `UntagResource`.
    pub struct UntagResourceRequest {
        resource_arn: Option<String> => "ResourceARN", required String;
        tag_keys: Option<Vec<String>> => "TagKeys", required List;
    }
}

shape! {
    /// Result of `UntagResource`.
    pub struct UntagResourceResponse {}
}

shape! {
    /// Input of `ListTagsForResource`.
    pub struct ListTagsForResourceRequest {
        resource_arn: Option<String> => "ResourceARN", required String;
    }
}

shape! {
    /// Result of `ListTagsForResource`.
    pub struct ListTagsForResourceResponse {
        tags: Option<Vec<Tag>> => "Tags", optional StructureList(Tag);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MarshallError;
    use crate::shape::{validate_required, Shape};
    use chrono::TimeZone;

    #[test]
    fn test_describe_user_decodes_timestamps_and_enums() {
        let body = r#"{
            "UserId": "u-1",
            "State": "ENABLED",
            "UserRole": "SUPER_USER",
            "EnabledDate": 1700000000.5
        }"#;
        let output: DescribeUserResponse = serde_json::from_str(body).unwrap();
        assert_eq!(output.state, Some(EntityState::Enabled));
        assert_eq!(output.user_role, Some(UserRole::Unknown("SUPER_USER".to_string())));
        assert_eq!(
            output.enabled_date,
            Some(Utc.timestamp_millis_opt(1_700_000_000_500).unwrap())
        );
        assert_eq!(output.disabled_date, None);
    }

    #[test]
    fn test_unknown_enum_round_trips() {
        let member = Member {
            r#type: Some(MemberType::from("ROBOT")),
            ..Default::default()
        };
        let json = serde_json::to_string(&member).unwrap();
        assert_eq!(json, r#"{"Type":"ROBOT"}"#);
        let back: Member = serde_json::from_str(&json).unwrap();
        assert_eq!(back, member);
    }

    #[test]
    fn test_tag_resource_requires_nested_keys() {
        let request = TagResourceRequest {
            resource_arn: Some("arn:aws:workmail:us-east-1:1:organization/m-1".to_string()),
            tags: Some(vec![Tag {
                key: None,
                value: Some("v".to_string()),
            }]),
        };
        let value = serde_json::to_value(&request).unwrap();
        let err = validate_required(
            TagResourceRequest::SHAPE_NAME,
            TagResourceRequest::MEMBERS,
            &value,
        )
        .unwrap_err();
        assert_eq!(err.missing_parameter(), Some("Tags[0].Key"));
        assert!(matches!(err, MarshallError::MissingRequiredParameter { .. }));
    }
}
