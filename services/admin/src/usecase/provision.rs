//! Two-step user provisioning: identity record first, then profile record,
//! compensating the identity when the profile cannot be written.
//!
//! Each call is one fresh run. Steps are strictly sequential; nothing is retried.

use chrono::Utc;
use tracing::{debug, error, info, warn};
use uuid::Uuid;

use essence_domain::id::UserId;
use essence_domain::user::UserRole;

use crate::domain::repository::{
    AdminActionRepository, GroupRepository, IdentityPort, ProfileRepository,
};
use crate::domain::types::{
    DirectoryChange, MIN_PASSWORD_LEN, Profile, ProvisionState, non_blank, normalize_email,
};
use crate::error::AdminServiceError;
use crate::usecase::audit::record_action;

fn advance(state: &mut ProvisionState, next: ProvisionState) {
    debug_assert!(
        state.can_transition_to(next),
        "illegal provision transition {state:?} -> {next:?}"
    );
    debug!(from = ?state, to = ?next, "provision step");
    *state = next;
}

// ── ProvisionUser ────────────────────────────────────────────────────────────

pub struct ProvisionUserInput {
    pub actor_id: Uuid,
    pub email: String,
    pub full_name: String,
    pub password: String,
    pub role: UserRole,
    pub group_id: Option<Uuid>,
}

#[derive(Debug)]
pub struct Provisioned {
    pub profile: Profile,
    pub change: DirectoryChange,
}

pub struct ProvisionUserUseCase<I, P, G, A>
where
    I: IdentityPort,
    P: ProfileRepository,
    G: GroupRepository,
    A: AdminActionRepository,
{
    pub identity: I,
    pub profiles: P,
    pub groups: G,
    pub actions: A,
}

impl<I, P, G, A> ProvisionUserUseCase<I, P, G, A>
where
    I: IdentityPort,
    P: ProfileRepository,
    G: GroupRepository,
    A: AdminActionRepository,
{
    pub async fn execute(
        &self,
        input: ProvisionUserInput,
    ) -> Result<Provisioned, AdminServiceError> {
        let email = normalize_email(&input.email).ok_or(AdminServiceError::MissingData)?;
        let full_name = non_blank(&input.full_name)
            .ok_or(AdminServiceError::MissingData)?
            .to_owned();
        if input.password.is_empty() {
            return Err(AdminServiceError::MissingData);
        }
        if input.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(AdminServiceError::PasswordTooShort);
        }
        // Unknown groups are rejected before anything is created.
        if let Some(group_id) = input.group_id {
            if self.groups.find_by_id(group_id).await?.is_none() {
                return Err(AdminServiceError::GroupNotFound);
            }
        }

        let mut state = ProvisionState::Start;

        let id = self
            .identity
            .create_identity(&email, &input.password, true)
            .await
            .map_err(|e| match e {
                AdminServiceError::IdentityConflict | AdminServiceError::IdentityServiceError(_) => e,
                other => AdminServiceError::IdentityServiceError(anyhow::Error::new(other)),
            })?;
        advance(&mut state, ProvisionState::IdentityCreated);
        info!(user_id = %id, "identity created");

        let now = Utc::now();
        let profile = Profile {
            id,
            email: email.clone(),
            full_name,
            role: input.role,
            group_id: input.group_id,
            balance: 0,
            is_suspended: false,
            created_at: now,
            updated_at: now,
        };

        let profile_err = match self.profiles.create(&profile).await {
            Ok(()) => {
                advance(&mut state, ProvisionState::Committed);
                info!(user_id = %id, role = %profile.role, "user provisioned");
                record_action(
                    &self.actions,
                    input.actor_id,
                    "provision_user",
                    format!("Created user {email} as {}", profile.role),
                )
                .await;
                return Ok(Provisioned {
                    profile,
                    change: DirectoryChange::UserProvisioned(UserId(id)),
                });
            }
            Err(e) => e,
        };

        warn!(user_id = %id, error = %profile_err, "profile creation failed, rolling back identity");
        advance(&mut state, ProvisionState::RollbackAttempted);

        match self.identity.delete_identity(id).await {
            // Already gone counts as rolled back: no identity is left without a profile.
            Ok(()) | Err(AdminServiceError::UserNotFound) => {
                advance(&mut state, ProvisionState::RolledBack);
                info!(user_id = %id, "identity rolled back");
                Err(AdminServiceError::ProfileCreationFailed(Box::new(profile_err)))
            }
            Err(rollback_err) => {
                advance(&mut state, ProvisionState::RollbackFailed);
                advance(&mut state, ProvisionState::Inconsistent);
                error!(
                    identity_id = %id,
                    profile_error = %profile_err,
                    rollback_error = %rollback_err,
                    "CRITICAL: identity created without profile and rollback failed"
                );
                Err(AdminServiceError::InconsistentState { identity_id: id })
            }
        }
    }
}

// ── DeprovisionUser ──────────────────────────────────────────────────────────

pub struct DeprovisionUserInput {
    pub actor_id: Uuid,
    pub user_id: Uuid,
}

/// Deletes the identity first so a failure can never leave a loginable
/// identity behind a deleted profile.
pub struct DeprovisionUserUseCase<I, P, A>
where
    I: IdentityPort,
    P: ProfileRepository,
    A: AdminActionRepository,
{
    pub identity: I,
    pub profiles: P,
    pub actions: A,
}

impl<I, P, A> DeprovisionUserUseCase<I, P, A>
where
    I: IdentityPort,
    P: ProfileRepository,
    A: AdminActionRepository,
{
    pub async fn execute(
        &self,
        input: DeprovisionUserInput,
    ) -> Result<DirectoryChange, AdminServiceError> {
        let user_id = input.user_id;

        let identity_found = match self.identity.delete_identity(user_id).await {
            Ok(()) => {
                info!(user_id = %user_id, "identity deleted");
                true
            }
            Err(AdminServiceError::UserNotFound) => {
                info!(user_id = %user_id, "identity already absent, removing profile");
                false
            }
            Err(e) => {
                warn!(user_id = %user_id, error = %e, "identity deletion failed, profile untouched");
                return Err(AdminServiceError::IdentityDeletionFailed(Box::new(e)));
            }
        };

        match self.profiles.delete(user_id).await {
            Ok(false) if !identity_found => Err(AdminServiceError::UserNotFound),
            Ok(found) => {
                if !found {
                    info!(user_id = %user_id, "no profile row to delete");
                }
                record_action(
                    &self.actions,
                    input.actor_id,
                    "deprovision_user",
                    format!("Deleted user {user_id}"),
                )
                .await;
                Ok(DirectoryChange::UserRemoved(UserId(user_id)))
            }
            Err(e) => {
                warn!(user_id = %user_id, error = %e, "identity deleted but profile deletion failed");
                Err(AdminServiceError::OrphanedProfile { user_id })
            }
        }
    }
}
