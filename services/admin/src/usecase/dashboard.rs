//! One dashboard for every role, assembled from the widgets the role may see.

use uuid::Uuid;

use essence_domain::dashboard::DashboardWidget;
use essence_domain::user::UserRole;

use crate::domain::repository::AdminActionRepository;
use crate::domain::types::{AdminAction, Directory, Group, UserStatus, UserView};
use crate::error::AdminServiceError;
use crate::usecase::audit::RECENT_ACTIONS_LIMIT;

#[derive(Debug, Clone, PartialEq)]
pub struct GlobalOverview {
    /// Sum of all balances.
    pub total_essence: i64,
    pub total_users: u64,
    pub users_by_role: Vec<(UserRole, u64)>,
    pub total_groups: u64,
}

#[derive(Debug, Clone)]
pub struct ManagedGroup {
    pub group: Group,
    pub member_count: u64,
    pub active_count: u64,
    pub suspended_count: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PersonalBalance {
    pub balance: i64,
    pub group_name: Option<String>,
}

#[derive(Debug, Default)]
pub struct Dashboard {
    pub widgets: Vec<DashboardWidget>,
    pub global_overview: Option<GlobalOverview>,
    pub managed_groups: Option<Vec<ManagedGroup>>,
    pub recent_actions: Option<Vec<AdminAction>>,
    pub suspended_users: Option<Vec<UserView>>,
    pub personal_balance: Option<PersonalBalance>,
}

// ── ComposeDashboard ─────────────────────────────────────────────────────────

pub struct ComposeDashboardUseCase<A: AdminActionRepository> {
    pub actions: A,
}

impl<A: AdminActionRepository> ComposeDashboardUseCase<A> {
    pub async fn execute(
        &self,
        caller_id: Uuid,
        role: UserRole,
        directory: &Directory,
    ) -> Result<Dashboard, AdminServiceError> {
        let widgets = DashboardWidget::for_role(role);
        let mut dashboard = Dashboard::default();

        for widget in &widgets {
            match widget {
                DashboardWidget::GlobalOverview => {
                    dashboard.global_overview = Some(global_overview(directory));
                }
                DashboardWidget::ManagedGroups => {
                    let caller = caller_view(directory, caller_id)?;
                    dashboard.managed_groups = Some(managed_groups(directory, caller));
                }
                DashboardWidget::RecentAdminActions => {
                    dashboard.recent_actions =
                        Some(self.actions.list_recent(RECENT_ACTIONS_LIMIT).await?);
                }
                DashboardWidget::SuspendedUsers => {
                    dashboard.suspended_users = Some(
                        directory
                            .users
                            .iter()
                            .filter(|u| u.status == UserStatus::Suspended)
                            .cloned()
                            .collect(),
                    );
                }
                DashboardWidget::PersonalBalance => {
                    let caller = caller_view(directory, caller_id)?;
                    dashboard.personal_balance = Some(PersonalBalance {
                        balance: caller.profile.balance,
                        group_name: caller.group_name.clone(),
                    });
                }
            }
        }

        dashboard.widgets = widgets;
        Ok(dashboard)
    }
}

fn caller_view(directory: &Directory, caller_id: Uuid) -> Result<&UserView, AdminServiceError> {
    directory
        .users
        .iter()
        .find(|u| u.profile.id == caller_id)
        .ok_or(AdminServiceError::UserNotFound)
}

fn global_overview(directory: &Directory) -> GlobalOverview {
    let users_by_role = UserRole::ALL
        .into_iter()
        .map(|role| {
            let count = directory
                .users
                .iter()
                .filter(|u| u.profile.role == role)
                .count() as u64;
            (role, count)
        })
        .collect();
    GlobalOverview {
        total_essence: directory
            .users
            .iter()
            .fold(0i64, |total, u| total.saturating_add(u.profile.balance)),
        total_users: directory.users.len() as u64,
        users_by_role,
        total_groups: directory.groups.len() as u64,
    }
}

/// An admin manages the group they belong to.
fn managed_groups(directory: &Directory, caller: &UserView) -> Vec<ManagedGroup> {
    let Some(group_id) = caller.profile.group_id else {
        return Vec::new();
    };
    directory
        .groups
        .iter()
        .filter(|g| g.group.id == group_id)
        .map(|g| {
            let members = directory
                .users
                .iter()
                .filter(|u| u.profile.group_id == Some(group_id));
            let (active, suspended) =
                members.fold((0, 0), |(a, s), u| match u.status {
                    UserStatus::Active => (a + 1, s),
                    UserStatus::Suspended => (a, s + 1),
                });
            ManagedGroup {
                group: g.group.clone(),
                member_count: g.user_count,
                active_count: active,
                suspended_count: suspended,
            }
        })
        .collect()
}
