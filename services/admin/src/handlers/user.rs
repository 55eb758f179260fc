use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use essence_auth_types::identity::IdentityHeaders;
use essence_domain::capability::Capability;
use essence_domain::id::UserId;

use crate::domain::types::DirectoryChange;
use crate::error::AdminServiceError;
use crate::handlers::{parse_group_id, parse_role};
use crate::state::AppState;
use crate::usecase::password::ResetPasswordUseCase;
use crate::usecase::profile::{SetSuspendedUseCase, UpdateProfileInput, UpdateProfileUseCase};
use crate::usecase::provision::{
    DeprovisionUserInput, DeprovisionUserUseCase, ProvisionUserInput, ProvisionUserUseCase,
};

// ── POST /admin/users ────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateUserRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub group_id: Option<String>,
}

#[derive(Serialize)]
pub struct CreatedResponse {
    pub id: String,
}

pub async fn create_user(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Json(body): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<CreatedResponse>), AdminServiceError> {
    identity.require(Capability::ManageUsers)?;
    let role = parse_role(&body.role)?;
    let group_id = parse_group_id(body.group_id.as_deref())?;

    let usecase = ProvisionUserUseCase {
        identity: state.identity_port(),
        profiles: state.profile_repo(),
        groups: state.group_repo(),
        actions: state.action_repo(),
    };
    let provisioned = usecase
        .execute(ProvisionUserInput {
            actor_id: identity.user_id,
            email: body.email,
            full_name: body.full_name,
            password: body.password,
            role,
            group_id,
        })
        .await?;
    state.directory.apply(provisioned.change).await;

    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            id: provisioned.profile.id.to_string(),
        }),
    ))
}

// ── PATCH /admin/users/{id} ──────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateUserRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub group_id: Option<String>,
}

pub async fn update_user(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Json(body): Json<UpdateUserRequest>,
) -> Result<StatusCode, AdminServiceError> {
    identity.require(Capability::ManageUsers)?;
    let role = parse_role(&body.role)?;
    let group_id = parse_group_id(body.group_id.as_deref())?;

    let usecase = UpdateProfileUseCase {
        profiles: state.profile_repo(),
        groups: state.group_repo(),
        actions: state.action_repo(),
    };
    let change = usecase
        .execute(UpdateProfileInput {
            actor_id: identity.user_id,
            user_id,
            email: body.email,
            full_name: body.full_name,
            role,
            group_id,
        })
        .await?;
    state.directory.apply(change).await;
    Ok(StatusCode::NO_CONTENT)
}

// ── DELETE /admin/users/{id} ─────────────────────────────────────────────────

pub async fn delete_user(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<StatusCode, AdminServiceError> {
    identity.require(Capability::ManageUsers)?;

    let usecase = DeprovisionUserUseCase {
        identity: state.identity_port(),
        profiles: state.profile_repo(),
        actions: state.action_repo(),
    };
    let result = usecase
        .execute(DeprovisionUserInput {
            actor_id: identity.user_id,
            user_id,
        })
        .await;

    match result {
        Ok(change) => {
            state.directory.apply(change).await;
            Ok(StatusCode::NO_CONTENT)
        }
        // The identity is gone, so the cached row is stale either way.
        Err(e @ AdminServiceError::OrphanedProfile { .. }) => {
            state
                .directory
                .apply(DirectoryChange::UserRemoved(UserId(user_id)))
                .await;
            Err(e)
        }
        Err(e) => Err(e),
    }
}

// ── POST|DELETE /admin/users/{id}/suspension ─────────────────────────────────

async fn set_suspended(
    identity: IdentityHeaders,
    state: AppState,
    user_id: Uuid,
    suspended: bool,
) -> Result<StatusCode, AdminServiceError> {
    identity.require(Capability::ManageUsers)?;
    let usecase = SetSuspendedUseCase {
        profiles: state.profile_repo(),
        actions: state.action_repo(),
    };
    let change = usecase
        .execute(identity.user_id, user_id, suspended)
        .await?;
    state.directory.apply(change).await;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn suspend_user(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<StatusCode, AdminServiceError> {
    set_suspended(identity, state, user_id, true).await
}

pub async fn restore_user(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<StatusCode, AdminServiceError> {
    set_suspended(identity, state, user_id, false).await
}

// ── PUT /admin/users/{id}/password ───────────────────────────────────────────

#[derive(Deserialize)]
pub struct ResetPasswordRequest {
    #[serde(default)]
    pub password: String,
}

pub async fn reset_password(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    Json(body): Json<ResetPasswordRequest>,
) -> Result<StatusCode, AdminServiceError> {
    identity.require(Capability::ManageUsers)?;
    let usecase = ResetPasswordUseCase {
        identity: state.identity_port(),
        profiles: state.profile_repo(),
        actions: state.action_repo(),
    };
    usecase
        .execute(identity.user_id, user_id, &body.password)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
