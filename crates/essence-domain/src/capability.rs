//! Role-gated features.
//!
//! Whether a role holds a capability is decided by [`crate::user::UserRole::can`].

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Capability {
    /// Provision, edit, suspend, reset and deprovision users.
    ManageUsers,
    /// Create, edit and delete groups.
    ManageGroups,
    ManageEssenceSettings,
    ViewAdministrativeReports,
    ViewReports,
    ViewSecurityLog,
    /// System-wide totals: ESSENCE in circulation, users per role, groups.
    ViewGlobalOverview,
    /// Groups the caller belongs to, with member status counts.
    ViewManagedGroups,
    ViewRecentAdminActions,
    ViewSuspendedUsers,
    ViewPersonalBalance,
    ChangeOwnPassword,
}
