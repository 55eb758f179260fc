use axum::{Json, extract::State};
use serde::Serialize;

use essence_auth_types::identity::IdentityHeaders;
use essence_domain::capability::Capability;
use essence_domain::user::UserRole;

use crate::domain::types::{AdminAction, GroupView, UserView};
use crate::error::AdminServiceError;
use crate::state::AppState;
use crate::usecase::audit::ListRecentActionsUseCase;
use crate::usecase::directory::ListDirectoryUseCase;

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub full_name: String,
    pub role: UserRole,
    pub group_id: Option<String>,
    pub group_name: Option<String>,
    pub balance: i64,
    pub status: &'static str,
    #[serde(serialize_with = "essence_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "essence_core::serde::to_rfc3339_ms")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<&UserView> for UserResponse {
    fn from(view: &UserView) -> Self {
        let p = &view.profile;
        Self {
            id: p.id.to_string(),
            email: p.email.clone(),
            full_name: p.full_name.clone(),
            role: p.role,
            group_id: p.group_id.map(|g| g.to_string()),
            group_name: view.group_name.clone(),
            balance: p.balance,
            status: view.status.as_str(),
            created_at: p.created_at,
            updated_at: p.updated_at,
        }
    }
}

#[derive(Serialize)]
pub struct GroupResponse {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub user_count: u64,
    #[serde(serialize_with = "essence_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<&GroupView> for GroupResponse {
    fn from(view: &GroupView) -> Self {
        let g = &view.group;
        Self {
            id: g.id.to_string(),
            name: g.name.clone(),
            description: g.description.clone(),
            kind: g.kind.clone(),
            user_count: view.user_count,
            created_at: g.created_at,
        }
    }
}

#[derive(Serialize)]
pub struct DirectoryResponse {
    pub users: Vec<UserResponse>,
    pub groups: Vec<GroupResponse>,
}

#[derive(Serialize)]
pub struct AdminActionResponse {
    pub id: String,
    pub actor_id: String,
    pub action: String,
    pub details: String,
    #[serde(serialize_with = "essence_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<AdminAction> for AdminActionResponse {
    fn from(a: AdminAction) -> Self {
        Self {
            id: a.id.to_string(),
            actor_id: a.actor_id.to_string(),
            action: a.action,
            details: a.details,
            created_at: a.created_at,
        }
    }
}

// ── GET /admin/directory ─────────────────────────────────────────────────────

pub async fn get_directory(
    identity: IdentityHeaders,
    State(state): State<AppState>,
) -> Result<Json<DirectoryResponse>, AdminServiceError> {
    identity.require(Capability::ManageUsers)?;
    let usecase = ListDirectoryUseCase {
        profiles: state.profile_repo(),
        groups: state.group_repo(),
    };
    let directory = state.directory.get_or_load(|| usecase.execute()).await?;
    Ok(Json(DirectoryResponse {
        users: directory.users.iter().map(UserResponse::from).collect(),
        groups: directory.groups.iter().map(GroupResponse::from).collect(),
    }))
}

// ── GET /admin/actions ───────────────────────────────────────────────────────

pub async fn get_recent_actions(
    identity: IdentityHeaders,
    State(state): State<AppState>,
) -> Result<Json<Vec<AdminActionResponse>>, AdminServiceError> {
    identity.require(Capability::ViewRecentAdminActions)?;
    let usecase = ListRecentActionsUseCase {
        actions: state.action_repo(),
    };
    let actions = usecase.execute().await?;
    Ok(Json(actions.into_iter().map(AdminActionResponse::from).collect()))
}
