use axum::{Json, extract::State};
use serde::Serialize;

use essence_auth_types::identity::IdentityHeaders;
use essence_domain::dashboard::DashboardWidget;
use essence_domain::user::UserRole;

use crate::error::AdminServiceError;
use crate::handlers::directory::{AdminActionResponse, UserResponse};
use crate::state::AppState;
use crate::usecase::dashboard::{ComposeDashboardUseCase, GlobalOverview, ManagedGroup};
use crate::usecase::directory::ListDirectoryUseCase;

#[derive(Serialize)]
pub struct RoleCount {
    pub role: UserRole,
    pub count: u64,
}

#[derive(Serialize)]
pub struct GlobalOverviewResponse {
    pub total_essence: i64,
    pub total_users: u64,
    pub users_by_role: Vec<RoleCount>,
    pub total_groups: u64,
}

impl From<GlobalOverview> for GlobalOverviewResponse {
    fn from(o: GlobalOverview) -> Self {
        Self {
            total_essence: o.total_essence,
            total_users: o.total_users,
            users_by_role: o
                .users_by_role
                .into_iter()
                .map(|(role, count)| RoleCount { role, count })
                .collect(),
            total_groups: o.total_groups,
        }
    }
}

#[derive(Serialize)]
pub struct ManagedGroupResponse {
    pub id: String,
    pub name: String,
    pub member_count: u64,
    pub active_count: u64,
    pub suspended_count: u64,
}

impl From<ManagedGroup> for ManagedGroupResponse {
    fn from(m: ManagedGroup) -> Self {
        Self {
            id: m.group.id.to_string(),
            name: m.group.name,
            member_count: m.member_count,
            active_count: m.active_count,
            suspended_count: m.suspended_count,
        }
    }
}

#[derive(Serialize)]
pub struct PersonalBalanceResponse {
    pub balance: i64,
    pub group_name: Option<String>,
}

/// Sections the caller's role cannot see are omitted entirely.
#[derive(Serialize)]
pub struct DashboardResponse {
    pub role: UserRole,
    pub widgets: Vec<DashboardWidget>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub global_overview: Option<GlobalOverviewResponse>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub managed_groups: Option<Vec<ManagedGroupResponse>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recent_actions: Option<Vec<AdminActionResponse>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suspended_users: Option<Vec<UserResponse>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub personal_balance: Option<PersonalBalanceResponse>,
}

// ── GET /dashboard ───────────────────────────────────────────────────────────

pub async fn get_dashboard(
    identity: IdentityHeaders,
    State(state): State<AppState>,
) -> Result<Json<DashboardResponse>, AdminServiceError> {
    let list = ListDirectoryUseCase {
        profiles: state.profile_repo(),
        groups: state.group_repo(),
    };
    let directory = state.directory.get_or_load(|| list.execute()).await?;

    let usecase = ComposeDashboardUseCase {
        actions: state.action_repo(),
    };
    let dashboard = usecase
        .execute(identity.user_id, identity.user_role, &directory)
        .await?;

    Ok(Json(DashboardResponse {
        role: identity.user_role,
        widgets: dashboard.widgets,
        global_overview: dashboard.global_overview.map(Into::into),
        managed_groups: dashboard
            .managed_groups
            .map(|groups| groups.into_iter().map(Into::into).collect()),
        recent_actions: dashboard
            .recent_actions
            .map(|actions| actions.into_iter().map(Into::into).collect()),
        suspended_users: dashboard
            .suspended_users
            .map(|users| users.iter().map(UserResponse::from).collect()),
        personal_balance: dashboard.personal_balance.map(|p| PersonalBalanceResponse {
            balance: p.balance,
            group_name: p.group_name,
        }),
    }))
}
