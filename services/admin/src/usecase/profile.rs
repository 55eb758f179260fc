use uuid::Uuid;

use essence_domain::id::UserId;
use essence_domain::user::UserRole;

use crate::domain::repository::{AdminActionRepository, GroupRepository, ProfileRepository};
use crate::domain::types::{DirectoryChange, ProfileChanges, non_blank, normalize_email};
use crate::error::AdminServiceError;
use crate::usecase::audit::record_action;

// ── UpdateProfile ────────────────────────────────────────────────────────────

pub struct UpdateProfileInput {
    pub actor_id: Uuid,
    pub user_id: Uuid,
    pub email: String,
    pub full_name: String,
    pub role: UserRole,
    pub group_id: Option<Uuid>,
}

/// Edits profile fields only. The identity record's email is not touched.
pub struct UpdateProfileUseCase<P, G, A>
where
    P: ProfileRepository,
    G: GroupRepository,
    A: AdminActionRepository,
{
    pub profiles: P,
    pub groups: G,
    pub actions: A,
}

impl<P, G, A> UpdateProfileUseCase<P, G, A>
where
    P: ProfileRepository,
    G: GroupRepository,
    A: AdminActionRepository,
{
    pub async fn execute(
        &self,
        input: UpdateProfileInput,
    ) -> Result<DirectoryChange, AdminServiceError> {
        let email = normalize_email(&input.email).ok_or(AdminServiceError::MissingData)?;
        let full_name = non_blank(&input.full_name).ok_or(AdminServiceError::MissingData)?;
        if let Some(group_id) = input.group_id {
            if self.groups.find_by_id(group_id).await?.is_none() {
                return Err(AdminServiceError::GroupNotFound);
            }
        }

        let changes = ProfileChanges {
            email,
            full_name: full_name.to_owned(),
            role: input.role,
            group_id: input.group_id,
        };
        if !self.profiles.update(input.user_id, &changes).await? {
            return Err(AdminServiceError::UserNotFound);
        }
        record_action(
            &self.actions,
            input.actor_id,
            "update_user",
            format!("Updated user {}", changes.email),
        )
        .await;
        Ok(DirectoryChange::UserUpdated(UserId(input.user_id)))
    }
}

// ── SetSuspended ─────────────────────────────────────────────────────────────

pub struct SetSuspendedUseCase<P: ProfileRepository, A: AdminActionRepository> {
    pub profiles: P,
    pub actions: A,
}

impl<P: ProfileRepository, A: AdminActionRepository> SetSuspendedUseCase<P, A> {
    pub async fn execute(
        &self,
        actor_id: Uuid,
        user_id: Uuid,
        suspended: bool,
    ) -> Result<DirectoryChange, AdminServiceError> {
        if !self.profiles.set_suspended(user_id, suspended).await? {
            return Err(AdminServiceError::UserNotFound);
        }
        let (action, verb) = if suspended {
            ("suspend_user", "Suspended")
        } else {
            ("restore_user", "Restored")
        };
        record_action(&self.actions, actor_id, action, format!("{verb} user {user_id}")).await;
        Ok(DirectoryChange::UserUpdated(UserId(user_id)))
    }
}
