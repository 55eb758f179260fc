use chrono::{DateTime, Utc};
use uuid::Uuid;

use essence_domain::id::{GroupId, UserId};
use essence_domain::user::UserRole;

/// Application-side user record. `id` equals the identity id.
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
    pub role: UserRole,
    pub group_id: Option<Uuid>,
    /// Whole ESSENCE units.
    pub balance: i64,
    pub is_suspended: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Group {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub kind: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// What the identity service reports about an identity.
#[derive(Debug, Clone, PartialEq)]
pub struct Identity {
    pub id: Uuid,
    pub email: Option<String>,
}

/// Entry in the recent-admin-actions log.
#[derive(Debug, Clone, PartialEq)]
pub struct AdminAction {
    pub id: Uuid,
    pub actor_id: Uuid,
    pub action: String,
    pub details: String,
    pub created_at: DateTime<Utc>,
}

impl AdminAction {
    pub fn new(actor_id: Uuid, action: &str, details: String) -> Self {
        Self {
            id: Uuid::now_v7(),
            actor_id,
            action: action.to_owned(),
            details,
            created_at: Utc::now(),
        }
    }
}

/// Field values written by profile edits. `updated_at` is set by the repository.
#[derive(Debug, Clone)]
pub struct ProfileChanges {
    pub email: String,
    pub full_name: String,
    pub role: UserRole,
    pub group_id: Option<Uuid>,
}

#[derive(Debug, Clone)]
pub struct GroupChanges {
    pub name: String,
    pub description: Option<String>,
    pub kind: Option<String>,
}

// ── Directory views ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserStatus {
    Active,
    Suspended,
}

impl UserStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "Active",
            Self::Suspended => "Suspended",
        }
    }
}

/// A profile joined with its group's name.
#[derive(Debug, Clone)]
pub struct UserView {
    pub profile: Profile,
    pub group_name: Option<String>,
    pub status: UserStatus,
}

#[derive(Debug, Clone)]
pub struct GroupView {
    pub group: Group,
    pub user_count: u64,
}

/// Snapshot of every user and group, as shown in the admin console.
#[derive(Debug, Clone, Default)]
pub struct Directory {
    pub users: Vec<UserView>,
    pub groups: Vec<GroupView>,
}

impl Directory {
    pub fn build(profiles: Vec<Profile>, groups: Vec<Group>) -> Self {
        let users = profiles
            .into_iter()
            .map(|profile| {
                let group_name = profile
                    .group_id
                    .and_then(|gid| groups.iter().find(|g| g.id == gid))
                    .map(|g| g.name.clone());
                let status = if profile.is_suspended {
                    UserStatus::Suspended
                } else {
                    UserStatus::Active
                };
                UserView {
                    profile,
                    group_name,
                    status,
                }
            })
            .collect::<Vec<_>>();
        let groups = groups
            .into_iter()
            .map(|group| {
                let user_count = users
                    .iter()
                    .filter(|u| u.profile.group_id == Some(group.id))
                    .count() as u64;
                GroupView { group, user_count }
            })
            .collect();
        Self { users, groups }
    }
}

// ── Workflow facts ───────────────────────────────────────────────────────────

/// A change to the directory made by a completed workflow.
///
/// Workflows return these; whoever holds a cached view applies them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirectoryChange {
    UserProvisioned(UserId),
    UserUpdated(UserId),
    UserRemoved(UserId),
    GroupCreated(GroupId),
    GroupUpdated(GroupId),
    GroupRemoved(GroupId),
}

/// Progress of a provisioning run.
///
/// ```text
/// Start ──► IdentityCreated ──► Committed
///                 │
///                 ├──► RollbackAttempted ──► RolledBack
///                 │            │
///                 │            ▼
///                 └──────► RollbackFailed ──► Inconsistent
/// ```
///
/// A run whose identity creation fails halts in `Start`: nothing was persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProvisionState {
    Start,
    IdentityCreated,
    Committed,
    RollbackAttempted,
    RolledBack,
    RollbackFailed,
    Inconsistent,
}

impl ProvisionState {
    pub fn can_transition_to(self, next: ProvisionState) -> bool {
        use ProvisionState::*;
        matches!(
            (self, next),
            (Start, IdentityCreated)
                | (IdentityCreated, Committed)
                | (IdentityCreated, RollbackAttempted)
                | (IdentityCreated, RollbackFailed)
                | (RollbackAttempted, RolledBack)
                | (RollbackAttempted, RollbackFailed)
                | (RollbackFailed, Inconsistent)
        )
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Committed | Self::RolledBack | Self::Inconsistent)
    }
}

// ── Validation ───────────────────────────────────────────────────────────────

pub const MIN_PASSWORD_LEN: usize = 6;

/// Trim and return `None` for blank input.
pub fn non_blank(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

pub fn normalize_email(email: &str) -> Option<String> {
    non_blank(email).map(str::to_lowercase)
}
