use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::Deserialize;
use uuid::Uuid;

use essence_auth_types::identity::IdentityHeaders;
use essence_domain::capability::Capability;

use crate::error::AdminServiceError;
use crate::handlers::user::CreatedResponse;
use crate::state::AppState;
use crate::usecase::group::{
    CreateGroupUseCase, DeleteGroupUseCase, GroupInput, UpdateGroupUseCase,
};

#[derive(Deserialize)]
pub struct GroupRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
}

impl GroupRequest {
    fn into_input(self, actor_id: Uuid) -> GroupInput {
        GroupInput {
            actor_id,
            name: self.name,
            description: self.description,
            kind: self.kind,
        }
    }
}

// ── POST /admin/groups ───────────────────────────────────────────────────────

pub async fn create_group(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Json(body): Json<GroupRequest>,
) -> Result<(StatusCode, Json<CreatedResponse>), AdminServiceError> {
    identity.require(Capability::ManageGroups)?;
    let usecase = CreateGroupUseCase {
        groups: state.group_repo(),
        actions: state.action_repo(),
    };
    let (group, change) = usecase.execute(body.into_input(identity.user_id)).await?;
    state.directory.apply(change).await;
    Ok((
        StatusCode::CREATED,
        Json(CreatedResponse {
            id: group.id.to_string(),
        }),
    ))
}

// ── PATCH /admin/groups/{id} ─────────────────────────────────────────────────

pub async fn update_group(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(group_id): Path<Uuid>,
    Json(body): Json<GroupRequest>,
) -> Result<StatusCode, AdminServiceError> {
    identity.require(Capability::ManageGroups)?;
    let usecase = UpdateGroupUseCase {
        groups: state.group_repo(),
        actions: state.action_repo(),
    };
    let change = usecase
        .execute(group_id, body.into_input(identity.user_id))
        .await?;
    state.directory.apply(change).await;
    Ok(StatusCode::NO_CONTENT)
}

// ── DELETE /admin/groups/{id} ────────────────────────────────────────────────

pub async fn delete_group(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(group_id): Path<Uuid>,
) -> Result<StatusCode, AdminServiceError> {
    identity.require(Capability::ManageGroups)?;
    let usecase = DeleteGroupUseCase {
        profiles: state.profile_repo(),
        groups: state.group_repo(),
        actions: state.action_repo(),
    };
    let change = usecase.execute(identity.user_id, group_id).await?;
    state.directory.apply(change).await;
    Ok(StatusCode::NO_CONTENT)
}
