#![allow(async_fn_in_trait)]

use uuid::Uuid;

use crate::domain::types::{
    AdminAction, Group, GroupChanges, Identity, Profile, ProfileChanges,
};
use crate::error::AdminServiceError;

/// Port to the external identity service that owns credentials.
///
/// Identity ids are the join key for profiles.
pub trait IdentityPort: Send + Sync {
    /// Create a pre-confirmed identity when `auto_confirm` is set.
    ///
    /// Fails with `IdentityConflict` if the email is already registered and
    /// `IdentityServiceError` on any other failure.
    async fn create_identity(
        &self,
        email: &str,
        password: &str,
        auto_confirm: bool,
    ) -> Result<Uuid, AdminServiceError>;

    async fn delete_identity(&self, id: Uuid) -> Result<(), AdminServiceError>;

    async fn update_password(&self, id: Uuid, password: &str) -> Result<(), AdminServiceError>;

    async fn list_identities(&self) -> Result<Vec<Identity>, AdminServiceError>;
}

/// Repository for profile records.
pub trait ProfileRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Profile>, AdminServiceError>;

    async fn list(&self) -> Result<Vec<Profile>, AdminServiceError>;

    /// Insert a profile. A uniqueness violation surfaces as `ProfileConflict`.
    async fn create(&self, profile: &Profile) -> Result<(), AdminServiceError>;

    /// Returns `false` if no profile has this id.
    async fn update(&self, id: Uuid, changes: &ProfileChanges) -> Result<bool, AdminServiceError>;

    /// Returns `false` if no profile has this id.
    async fn set_suspended(&self, id: Uuid, suspended: bool) -> Result<bool, AdminServiceError>;

    /// Returns `false` if no profile has this id.
    async fn delete(&self, id: Uuid) -> Result<bool, AdminServiceError>;

    async fn count_by_group(&self, group_id: Uuid) -> Result<u64, AdminServiceError>;
}

/// Repository for group records.
pub trait GroupRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Group>, AdminServiceError>;

    async fn list(&self) -> Result<Vec<Group>, AdminServiceError>;

    async fn create(&self, group: &Group) -> Result<(), AdminServiceError>;

    /// Returns `false` if no group has this id.
    async fn update(&self, id: Uuid, changes: &GroupChanges) -> Result<bool, AdminServiceError>;

    /// Returns `false` if no group has this id.
    async fn delete(&self, id: Uuid) -> Result<bool, AdminServiceError>;
}

/// Append-only log of admin mutations.
pub trait AdminActionRepository: Send + Sync {
    async fn record(&self, action: &AdminAction) -> Result<(), AdminServiceError>;

    /// Newest first.
    async fn list_recent(&self, limit: u64) -> Result<Vec<AdminAction>, AdminServiceError>;
}
