//! Dashboard widgets shared by every role.
//!
//! There is one dashboard; which widgets appear depends only on the
//! capabilities of the caller's role.

use serde::{Deserialize, Serialize};

use crate::capability::Capability;
use crate::user::UserRole;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DashboardWidget {
    GlobalOverview,
    ManagedGroups,
    RecentAdminActions,
    SuspendedUsers,
    PersonalBalance,
}

impl DashboardWidget {
    /// Display order.
    pub const ALL: [DashboardWidget; 5] = [
        Self::GlobalOverview,
        Self::ManagedGroups,
        Self::RecentAdminActions,
        Self::SuspendedUsers,
        Self::PersonalBalance,
    ];

    pub fn required_capability(self) -> Capability {
        match self {
            Self::GlobalOverview => Capability::ViewGlobalOverview,
            Self::ManagedGroups => Capability::ViewManagedGroups,
            Self::RecentAdminActions => Capability::ViewRecentAdminActions,
            Self::SuspendedUsers => Capability::ViewSuspendedUsers,
            Self::PersonalBalance => Capability::ViewPersonalBalance,
        }
    }

    pub fn for_role(role: UserRole) -> Vec<DashboardWidget> {
        Self::ALL
            .into_iter()
            .filter(|w| role.can(w.required_capability()))
            .collect()
    }
}
