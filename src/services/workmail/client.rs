//! WorkMail client.

use super::operations::*;
use super::types::*;
use super::{WorkMailErrorKind, METADATA};
use crate::client::{ClientBuilder, ServiceClient};
use crate::error::SdkResult;
use crate::pipeline::{Invoker, Request};
use crate::protocol::ServiceMetadata;

/// Amazon WorkMail client.
///
/// One method per operation; each accepts the request shape directly or a
/// [`Request`] carrying per-call options.
///
/// ```rust,no_run
/// use aws_rpc::services::workmail::{DescribeUserRequest, WorkMailClient};
///
/// # async fn run() -> Result<(), Box<dyn std::error::Error>> {
/// let client = WorkMailClient::builder().from_env().build()?;
/// let user = client
///     .describe_user(DescribeUserRequest {
///         organization_id: Some("m-0123456789abcdef".to_string()),
///         user_id: Some("S-1-1-11-1111111111-2222222222-3333333333-3333".to_string()),
///     })
///     .await?;
/// println!("{:?}", user.email);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct WorkMailClient {
    invoker: Invoker,
}

impl WorkMailClient {
    /// Create a builder.
    pub fn builder() -> ClientBuilder<Self> {
        ClientBuilder::new()
    }

    /// Creates a user who can be used in WorkMail.
    pub async fn create_user(
        &self,
        request: impl Into<Request<CreateUserRequest>>,
    ) -> SdkResult<CreateUserResponse, WorkMailErrorKind> {
        self.invoker.invoke::<CreateUser>(request.into()).await
    }

    /// Deletes a user. The user must be deregistered first.
    pub async fn delete_user(
        &self,
        request: impl Into<Request<DeleteUserRequest>>,
    ) -> SdkResult<DeleteUserResponse, WorkMailErrorKind> {
        self.invoker.invoke::<DeleteUser>(request.into()).await
    }

    /// Provides information about a user.
    pub async fn describe_user(
        &self,
        request: impl Into<Request<DescribeUserRequest>>,
    ) -> SdkResult<DescribeUserResponse, WorkMailErrorKind> {
        self.invoker.invoke::<DescribeUser>(request.into()).await
    }

    /// Returns summaries of the organization's users.
    pub async fn list_users(
        &self,
        request: impl Into<Request<ListUsersRequest>>,
    ) -> SdkResult<ListUsersResponse, WorkMailErrorKind> {
        self.invoker.invoke::<ListUsers>(request.into()).await
    }

    /// Registers a user, group, or resource for WorkMail use.
    pub async fn register_to_work_mail(
        &self,
        request: impl Into<Request<RegisterToWorkMailRequest>>,
    ) -> SdkResult<RegisterToWorkMailResponse, WorkMailErrorKind> {
        self.invoker.invoke::<RegisterToWorkMail>(request.into()).await
    }

    /// Marks a user, group, or resource as no longer used in WorkMail.
    pub async fn deregister_from_work_mail(
        &self,
        request: impl Into<Request<DeregisterFromWorkMailRequest>>,
    ) -> SdkResult<DeregisterFromWorkMailResponse, WorkMailErrorKind> {
        self.invoker.invoke::<DeregisterFromWorkMail>(request.into()).await
    }

    /// Resets the password of a user.
    pub async fn reset_password(
        &self,
        request: impl Into<Request<ResetPasswordRequest>>,
    ) -> SdkResult<ResetPasswordResponse, WorkMailErrorKind> {
        self.invoker.invoke::<ResetPassword>(request.into()).await
    }

    /// Updates the primary email of a user, group, or resource.
    pub async fn update_primary_email_address(
        &self,
        request: impl Into<Request<UpdatePrimaryEmailAddressRequest>>,
    ) -> SdkResult<UpdatePrimaryEmailAddressResponse, WorkMailErrorKind> {
        self.invoker.invoke::<UpdatePrimaryEmailAddress>(request.into()).await
    }

    /// Creates a group.
    pub async fn create_group(
        &self,
        request: impl Into<Request<CreateGroupRequest>>,
    ) -> SdkResult<CreateGroupResponse, WorkMailErrorKind> {
        self.invoker.invoke::<CreateGroup>(request.into()).await
    }

    /// Deletes a group.
    pub async fn delete_group(
        &self,
        request: impl Into<Request<DeleteGroupRequest>>,
    ) -> SdkResult<DeleteGroupResponse, WorkMailErrorKind> {
        self.invoker.invoke::<DeleteGroup>(request.into()).await
    }

    /// Returns the data available for a group.
    pub async fn describe_group(
        &self,
        request: impl Into<Request<DescribeGroupRequest>>,
    ) -> SdkResult<DescribeGroupResponse, WorkMailErrorKind> {
        self.invoker.invoke::<DescribeGroup>(request.into()).await
    }

    /// Returns summaries of the organization's groups.
    pub async fn list_groups(
        &self,
        request: impl Into<Request<ListGroupsRequest>>,
    ) -> SdkResult<ListGroupsResponse, WorkMailErrorKind> {
        self.invoker.invoke::<ListGroups>(request.into()).await
    }

    /// Adds a member to a group.
    pub async fn associate_member_to_group(
        &self,
        request: impl Into<Request<AssociateMemberToGroupRequest>>,
    ) -> SdkResult<AssociateMemberToGroupResponse, WorkMailErrorKind> {
        self.invoker.invoke::<AssociateMemberToGroup>(request.into()).await
    }

    /// Removes a member from a group.
    pub async fn disassociate_member_from_group(
        &self,
        request: impl Into<Request<DisassociateMemberFromGroupRequest>>,
    ) -> SdkResult<DisassociateMemberFromGroupResponse, WorkMailErrorKind> {
        self.invoker.invoke::<DisassociateMemberFromGroup>(request.into()).await
    }

    /// Returns the members of a group.
    pub async fn list_group_members(
        &self,
        request: impl Into<Request<ListGroupMembersRequest>>,
    ) -> SdkResult<ListGroupMembersResponse, WorkMailErrorKind> {
        self.invoker.invoke::<ListGroupMembers>(request.into()).await
    }

    /// Adds an alias to a member.
    pub async fn create_alias(
        &self,
        request: impl Into<Request<CreateAliasRequest>>,
    ) -> SdkResult<CreateAliasResponse, WorkMailErrorKind> {
        self.invoker.invoke::<CreateAlias>(request.into()).await
    }

    /// Removes an alias from a member.
    pub async fn delete_alias(
        &self,
        request: impl Into<Request<DeleteAliasRequest>>,
    ) -> SdkResult<DeleteAliasResponse, WorkMailErrorKind> {
        self.invoker.invoke::<DeleteAlias>(request.into()).await
    }

    /// Lists the aliases of an entity.
    pub async fn list_aliases(
        &self,
        request: impl Into<Request<ListAliasesRequest>>,
    ) -> SdkResult<ListAliasesResponse, WorkMailErrorKind> {
        self.invoker.invoke::<ListAliases>(request.into()).await
    }

    /// Describes an organization.
    pub async fn describe_organization(
        &self,
        request: impl Into<Request<DescribeOrganizationRequest>>,
    ) -> SdkResult<DescribeOrganizationResponse, WorkMailErrorKind> {
        self.invoker.invoke::<DescribeOrganization>(request.into()).await
    }

    /// Returns the customer's organizations.
    pub async fn list_organizations(
        &self,
        request: impl Into<Request<ListOrganizationsRequest>>,
    ) -> SdkResult<ListOrganizationsResponse, WorkMailErrorKind> {
        self.invoker.invoke::<ListOrganizations>(request.into()).await
    }

    /// Returns the quota and size of a user's mailbox.
    pub async fn get_mailbox_details(
        &self,
        request: impl Into<Request<GetMailboxDetailsRequest>>,
    ) -> SdkResult<GetMailboxDetailsResponse, WorkMailErrorKind> {
        self.invoker.invoke::<GetMailboxDetails>(request.into()).await
    }

    /// Updates a user's mailbox quota.
    pub async fn update_mailbox_quota(
        &self,
        request: impl Into<Request<UpdateMailboxQuotaRequest>>,
    ) -> SdkResult<UpdateMailboxQuotaResponse, WorkMailErrorKind> {
        self.invoker.invoke::<UpdateMailboxQuota>(request.into()).await
    }

    /// Sets mailbox permissions for a grantee.
    pub async fn put_mailbox_permissions(
        &self,
        request: impl Into<Request<PutMailboxPermissionsRequest>>,
    ) -> SdkResult<PutMailboxPermissionsResponse, WorkMailErrorKind> {
        self.invoker.invoke::<PutMailboxPermissions>(request.into()).await
    }

    /// Lists the permissions on a mailbox.
    pub async fn list_mailbox_permissions(
        &self,
        request: impl Into<Request<ListMailboxPermissionsRequest>>,
    ) -> SdkResult<ListMailboxPermissionsResponse, WorkMailErrorKind> {
        self.invoker.invoke::<ListMailboxPermissions>(request.into()).await
    }

    /// Evaluates the organization's access control rules for a request.
    pub async fn get_access_control_effect(
        &self,
        request: impl Into<Request<GetAccessControlEffectRequest>>,
    ) -> SdkResult<GetAccessControlEffectResponse, WorkMailErrorKind> {
        self.invoker.invoke::<GetAccessControlEffect>(request.into()).await
    }

    /// Applies tags to an organization.
    pub async fn tag_resource(
        &self,
        request: impl Into<Request<TagResourceRequest>>,
    ) -> SdkResult<TagResourceResponse, WorkMailErrorKind> {
        self.invoker.invoke::<TagResource>(request.into()).await
    }

    /// Removes tags from an organization.
    pub async fn untag_resource(
        &self,
        request: impl Into<Request<UntagResourceRequest>>,
    ) -> SdkResult<UntagResourceResponse, WorkMailErrorKind> {
        self.invoker.invoke::<UntagResource>(request.into()).await
    }

    /// Lists the tags applied to an organization.
    pub async fn list_tags_for_resource(
        &self,
        request: impl Into<Request<ListTagsForResourceRequest>>,
    ) -> SdkResult<ListTagsForResourceResponse, WorkMailErrorKind> {
        self.invoker.invoke::<ListTagsForResource>(request.into()).await
    }
}

impl ServiceClient for WorkMailClient {
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
