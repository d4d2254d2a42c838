//! WorkMail operation bindings.

use super::types::*;
use super::WorkMailErrorKind;
use crate::pipeline::operations;

operations! {
    error: WorkMailErrorKind;

    /// Creates a user who can be used in WorkMail.
    CreateUser: CreateUserRequest => CreateUserResponse, idempotent = false;
    /// Deletes a user from WorkMail and all subsequent systems.
    DeleteUser: DeleteUserRequest => DeleteUserResponse, idempotent = false;
    /// Provides information about a user.
    DescribeUser: DescribeUserRequest => DescribeUserResponse, idempotent = true;
    /// Returns summaries of the organization's users.
    ListUsers: ListUsersRequest => ListUsersResponse, idempotent = true;
    /// Registers an existing user, group, or resource for WorkMail use.
    RegisterToWorkMail: RegisterToWorkMailRequest => RegisterToWorkMailResponse, idempotent = false;
    /// Marks a user, group, or resource as no longer used in WorkMail.
    DeregisterFromWorkMail: DeregisterFromWorkMailRequest => DeregisterFromWorkMailResponse, idempotent = false;
    /// Allows the administrator to reset the password for a user.
    ResetPassword: ResetPasswordRequest => ResetPasswordResponse, idempotent = false;
    /// Updates the primary email of a user, group, or resource.
    UpdatePrimaryEmailAddress: UpdatePrimaryEmailAddressRequest => UpdatePrimaryEmailAddressResponse, idempotent = false;
    /// Creates a group that can be used in WorkMail.
    CreateGroup: CreateGroupRequest => CreateGroupResponse, idempotent = false;
    /// Deletes a group from WorkMail.
    DeleteGroup: DeleteGroupRequest => DeleteGroupResponse, idempotent = false;
    /// Returns the data available for a group.
    DescribeGroup: DescribeGroupRequest => DescribeGroupResponse, idempotent = true;
    /// Returns summaries of the organization's groups.
    ListGroups: ListGroupsRequest => ListGroupsResponse, idempotent = true;
    /// Adds a member (user or group) to a group.
    AssociateMemberToGroup: AssociateMemberToGroupRequest => AssociateMemberToGroupResponse, idempotent = false;
    /// Removes a member from a group.
    DisassociateMemberFromGroup: DisassociateMemberFromGroupRequest => DisassociateMemberFromGroupResponse, idempotent = false;
    /// Returns an overview of the members of a group.
    ListGroupMembers: ListGroupMembersRequest => ListGroupMembersResponse, idempotent = true;
    /// Adds an alias to a member.
    CreateAlias: CreateAliasRequest => CreateAliasResponse, idempotent = false;
    /// Removes one or more aliases from a member.
    DeleteAlias: DeleteAliasRequest => DeleteAliasResponse, idempotent = false;
    /// Creates a paginated call to list the aliases of an entity.
    ListAliases: ListAliasesRequest => ListAliasesResponse, idempotent = true;
    /// Provides more information regarding a given organization.
    DescribeOrganization: DescribeOrganizationRequest => DescribeOrganizationResponse, idempotent = true;
    /// Returns the customer's organizations.
    ListOrganizations: ListOrganizationsRequest => ListOrganizationsResponse, idempotent = true;
    /// Requests a user's mailbox details.
    GetMailboxDetails: GetMailboxDetailsRequest => GetMailboxDetailsResponse, idempotent = true;
    /// Updates a user's current mailbox quota.
    UpdateMailboxQuota: UpdateMailboxQuotaRequest => UpdateMailboxQuotaResponse, idempotent = false;
    /// Sets permissions for a user, group, or resource.
    PutMailboxPermissions: PutMailboxPermissionsRequest => PutMailboxPermissionsResponse, idempotent = false;
    /// Lists the mailbox permissions associated with a mailbox.
    ListMailboxPermissions: ListMailboxPermissionsRequest => ListMailboxPermissionsResponse, idempotent = true;
    /// Gets the effects of the organization's access control rules.
    GetAccessControlEffect: GetAccessControlEffectRequest => GetAccessControlEffectResponse, idempotent = true;
    /// Applies tags to a WorkMail organization resource.
    TagResource: TagResourceRequest => TagResourceResponse, idempotent = false;
    /// Untags a WorkMail organization resource.
    UntagResource: UntagResourceRequest => UntagResourceResponse, idempotent = false;
    /// Lists the tags applied to a WorkMail organization resource.
    ListTagsForResource: ListTagsForResourceRequest => ListTagsForResourceResponse, idempotent = true;
}
