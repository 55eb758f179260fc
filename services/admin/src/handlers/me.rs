use axum::{Json, extract::State, http::StatusCode};
use serde::Deserialize;

use essence_auth_types::identity::IdentityHeaders;
use essence_domain::capability::Capability;

use crate::error::AdminServiceError;
use crate::handlers::directory::UserResponse;
use crate::state::AppState;
use crate::usecase::directory::ListDirectoryUseCase;
use crate::usecase::password::{ChangeOwnPasswordInput, ChangeOwnPasswordUseCase};

// ── GET /users/@me ───────────────────────────────────────────────────────────

/// Own profile, resolved through the directory so the group name comes along.
pub async fn get_me(
    identity: IdentityHeaders,
    State(state): State<AppState>,
) -> Result<Json<UserResponse>, AdminServiceError> {
    let usecase = ListDirectoryUseCase {
        profiles: state.profile_repo(),
        groups: state.group_repo(),
    };
    let directory = state.directory.get_or_load(|| usecase.execute()).await?;
    let me = directory
        .users
        .iter()
        .find(|u| u.profile.id == identity.user_id)
        .ok_or(AdminServiceError::UserNotFound)?;
    Ok(Json(UserResponse::from(me)))
}

// ── PUT /users/@me/password ──────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct ChangePasswordRequest {
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub confirmation: String,
}

pub async fn change_own_password(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Json(body): Json<ChangePasswordRequest>,
) -> Result<StatusCode, AdminServiceError> {
    identity.require(Capability::ChangeOwnPassword)?;
    let usecase = ChangeOwnPasswordUseCase {
        identity: state.identity_port(),
    };
    usecase
        .execute(
            identity.user_id,
            ChangeOwnPasswordInput {
                password: body.password,
                confirmation: body.confirmation,
            },
        )
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
