//! Permission resolution for group members

use crate::application::errors::PermissionError;
use crate::domain::entities::{Member, Permissions, Role};
use crate::domain::traits::ChatClient;

/// Check whether a member holds any of the requested permission bits.
///
/// Member and role data are read from the session's local state first and
/// fetched from the platform on a miss. Any failed fetch is returned as an
/// error rather than folded into `Ok(false)`.
///
/// Pack several permissions with `|` to accept any one of them.
pub async fn member_has_permission(
    session: &dyn ChatClient,
    group_id: &str,
    user_id: &str,
    permission: Permissions,
) -> Result<bool, PermissionError> {
    let member = resolve_member(session, group_id, user_id).await?;

    for role_id in &member.roles {
        let role = resolve_role(session, group_id, role_id).await?;
        if role.permissions.intersects(permission) {
            tracing::debug!(
                "Member {} in {} granted {} via role {}",
                user_id, group_id, permission, role.name
            );
            return Ok(true);
        }
    }

    Ok(false)
}

async fn resolve_member(
    session: &dyn ChatClient,
    group_id: &str,
    user_id: &str,
) -> Result<Member, PermissionError> {
    if let Some(member) = session.cached_member(group_id, user_id) {
        return Ok(member);
    }
    session
        .fetch_member(group_id, user_id)
        .await
        .map_err(|e| PermissionError::MemberLookup {
            group: group_id.to_string(),
            user: user_id.to_string(),
            reason: e.to_string(),
        })
}

async fn resolve_role(
    session: &dyn ChatClient,
    group_id: &str,
    role_id: &str,
) -> Result<Role, PermissionError> {
    if let Some(role) = session.cached_role(group_id, role_id) {
        return Ok(role);
    }
    session
        .fetch_role(group_id, role_id)
        .await
        .map_err(|e| PermissionError::RoleLookup {
            group: group_id.to_string(),
            role: role_id.to_string(),
            reason: e.to_string(),
        })
}
