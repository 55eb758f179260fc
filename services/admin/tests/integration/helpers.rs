use std::sync::{Arc, Mutex};

use anyhow::anyhow;
use chrono::Utc;
use uuid::Uuid;

use essence_admin::domain::repository::{
    AdminActionRepository, GroupRepository, IdentityPort, ProfileRepository,
};
use essence_admin::domain::types::{
    AdminAction, Group, GroupChanges, Identity, Profile, ProfileChanges,
};
use essence_admin::error::AdminServiceError;
use essence_domain::user::UserRole;

// ── MockIdentity ─────────────────────────────────────────────────────────────

/// In-memory identity service. Emails are unique, like the real one.
#[derive(Default)]
pub struct MockIdentity {
    pub identities: Arc<Mutex<Vec<Identity>>>,
    /// Every create call fails with a transport-style error.
    pub fail_create: bool,
    /// Every delete call fails with a transport-style error.
    pub fail_delete: bool,
    /// Every delete call answers 404, as if someone else removed the identity.
    pub missing_on_delete: bool,
}

impl MockIdentity {
    pub fn with(identities: Vec<Identity>) -> Self {
        Self {
            identities: Arc::new(Mutex::new(identities)),
            ..Default::default()
        }
    }

    /// Returns a shared handle to the identity list for post-execution inspection.
    pub fn identities_handle(&self) -> Arc<Mutex<Vec<Identity>>> {
        Arc::clone(&self.identities)
    }
}

impl IdentityPort for MockIdentity {
    async fn create_identity(
        &self,
        email: &str,
        _password: &str,
        _auto_confirm: bool,
    ) -> Result<Uuid, AdminServiceError> {
        if self.fail_create {
            return Err(AdminServiceError::IdentityServiceError(anyhow!(
                "identity service unreachable"
            )));
        }
        let mut identities = self.identities.lock().unwrap();
        if identities.iter().any(|i| i.email.as_deref() == Some(email)) {
            return Err(AdminServiceError::IdentityConflict);
        }
        let id = Uuid::now_v7();
        identities.push(Identity {
            id,
            email: Some(email.to_owned()),
        });
        Ok(id)
    }

    async fn delete_identity(&self, id: Uuid) -> Result<(), AdminServiceError> {
        if self.fail_delete {
            return Err(AdminServiceError::IdentityServiceError(anyhow!(
                "identity service unreachable"
            )));
        }
        if self.missing_on_delete {
            return Err(AdminServiceError::UserNotFound);
        }
        let mut identities = self.identities.lock().unwrap();
        let before = identities.len();
        identities.retain(|i| i.id != id);
        if identities.len() == before {
            return Err(AdminServiceError::UserNotFound);
        }
        Ok(())
    }

    async fn update_password(&self, id: Uuid, _password: &str) -> Result<(), AdminServiceError> {
        let identities = self.identities.lock().unwrap();
        if identities.iter().any(|i| i.id == id) {
            Ok(())
        } else {
            Err(AdminServiceError::UserNotFound)
        }
    }

    async fn list_identities(&self) -> Result<Vec<Identity>, AdminServiceError> {
        Ok(self.identities.lock().unwrap().clone())
    }
}

// ── MockProfileRepo ──────────────────────────────────────────────────────────

#[derive(Default)]
pub struct MockProfileRepo {
    pub profiles: Arc<Mutex<Vec<Profile>>>,
    pub fail_create: bool,
    pub fail_delete: bool,
    pub fail_count: bool,
}

impl MockProfileRepo {
    pub fn with(profiles: Vec<Profile>) -> Self {
        Self {
            profiles: Arc::new(Mutex::new(profiles)),
            ..Default::default()
        }
    }

    pub fn profiles_handle(&self) -> Arc<Mutex<Vec<Profile>>> {
        Arc::clone(&self.profiles)
    }
}

impl ProfileRepository for MockProfileRepo {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Profile>, AdminServiceError> {
        Ok(self.profiles.lock().unwrap().iter().find(|p| p.id == id).cloned())
    }

    async fn list(&self) -> Result<Vec<Profile>, AdminServiceError> {
        Ok(self.profiles.lock().unwrap().clone())
    }

    async fn create(&self, profile: &Profile) -> Result<(), AdminServiceError> {
        if self.fail_create {
            return Err(AdminServiceError::Internal(anyhow!("connection reset")));
        }
        let mut profiles = self.profiles.lock().unwrap();
        if profiles
            .iter()
            .any(|p| p.id == profile.id || p.email == profile.email)
        {
            return Err(AdminServiceError::ProfileConflict);
        }
        profiles.push(profile.clone());
        Ok(())
    }

    async fn update(&self, id: Uuid, changes: &ProfileChanges) -> Result<bool, AdminServiceError> {
        let mut profiles = self.profiles.lock().unwrap();
        if profiles
            .iter()
            .any(|p| p.id != id && p.email == changes.email)
        {
            return Err(AdminServiceError::ProfileConflict);
        }
        let Some(profile) = profiles.iter_mut().find(|p| p.id == id) else {
            return Ok(false);
        };
        profile.email = changes.email.clone();
        profile.full_name = changes.full_name.clone();
        profile.role = changes.role;
        profile.group_id = changes.group_id;
        profile.updated_at = Utc::now();
        Ok(true)
    }

    async fn set_suspended(&self, id: Uuid, suspended: bool) -> Result<bool, AdminServiceError> {
        let mut profiles = self.profiles.lock().unwrap();
        let Some(profile) = profiles.iter_mut().find(|p| p.id == id) else {
            return Ok(false);
        };
        profile.is_suspended = suspended;
        Ok(true)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AdminServiceError> {
        if self.fail_delete {
            return Err(AdminServiceError::Internal(anyhow!("connection reset")));
        }
        let mut profiles = self.profiles.lock().unwrap();
        let before = profiles.len();
        profiles.retain(|p| p.id != id);
        Ok(profiles.len() < before)
    }

    async fn count_by_group(&self, group_id: Uuid) -> Result<u64, AdminServiceError> {
        if self.fail_count {
            return Err(AdminServiceError::Internal(anyhow!("statement timeout")));
        }
        let profiles = self.profiles.lock().unwrap();
        Ok(profiles
            .iter()
            .filter(|p| p.group_id == Some(group_id))
            .count() as u64)
    }
}

// ── MockGroupRepo ────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct MockGroupRepo {
    pub groups: Arc<Mutex<Vec<Group>>>,
    pub fail_delete: bool,
}

impl MockGroupRepo {
    pub fn with(groups: Vec<Group>) -> Self {
        Self {
            groups: Arc::new(Mutex::new(groups)),
            ..Default::default()
        }
    }

    pub fn groups_handle(&self) -> Arc<Mutex<Vec<Group>>> {
        Arc::clone(&self.groups)
    }
}

impl GroupRepository for MockGroupRepo {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Group>, AdminServiceError> {
        Ok(self.groups.lock().unwrap().iter().find(|g| g.id == id).cloned())
    }

    async fn list(&self) -> Result<Vec<Group>, AdminServiceError> {
        Ok(self.groups.lock().unwrap().clone())
    }

    async fn create(&self, group: &Group) -> Result<(), AdminServiceError> {
        let mut groups = self.groups.lock().unwrap();
        if groups.iter().any(|g| g.name == group.name) {
            return Err(AdminServiceError::GroupConflict);
        }
        groups.push(group.clone());
        Ok(())
    }

    async fn update(&self, id: Uuid, changes: &GroupChanges) -> Result<bool, AdminServiceError> {
        let mut groups = self.groups.lock().unwrap();
        let Some(group) = groups.iter_mut().find(|g| g.id == id) else {
            return Ok(false);
        };
        group.name = changes.name.clone();
        group.description = changes.description.clone();
        group.kind = changes.kind.clone();
        Ok(true)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AdminServiceError> {
        if self.fail_delete {
            return Err(AdminServiceError::Internal(anyhow!(
                "violates foreign key constraint"
            )));
        }
        let mut groups = self.groups.lock().unwrap();
        let before = groups.len();
        groups.retain(|g| g.id != id);
        Ok(groups.len() < before)
    }
}

// ── MockActionRepo ───────────────────────────────────────────────────────────

#[derive(Default)]
pub struct MockActionRepo {
    pub actions: Arc<Mutex<Vec<AdminAction>>>,
}

impl MockActionRepo {
    pub fn actions_handle(&self) -> Arc<Mutex<Vec<AdminAction>>> {
        Arc::clone(&self.actions)
    }
}

impl AdminActionRepository for MockActionRepo {
    async fn record(&self, action: &AdminAction) -> Result<(), AdminServiceError> {
        self.actions.lock().unwrap().push(action.clone());
        Ok(())
    }

    async fn list_recent(&self, limit: u64) -> Result<Vec<AdminAction>, AdminServiceError> {
        let actions = self.actions.lock().unwrap();
        Ok(actions.iter().rev().take(limit as usize).cloned().collect())
    }
}

// ── Fixtures ─────────────────────────────────────────────────────────────────

pub fn test_group(name: &str) -> Group {
    let now = Utc::now();
    Group {
        id: Uuid::now_v7(),
        name: name.into(),
        description: None,
        kind: None,
        created_at: now,
        updated_at: now,
    }
}

pub fn test_profile(email: &str, role: UserRole, group_id: Option<Uuid>) -> Profile {
    let now = Utc::now();
    Profile {
        id: Uuid::now_v7(),
        email: email.into(),
        full_name: "Test Member".into(),
        role,
        group_id,
        balance: 0,
        is_suspended: false,
        created_at: now,
        updated_at: now,
    }
}

/// An identity/profile pair sharing one id, as provisioning leaves them.
pub fn provisioned_pair(email: &str, role: UserRole) -> (Identity, Profile) {
    let profile = test_profile(email, role, None);
    let identity = Identity {
        id: profile.id,
        email: Some(email.to_owned()),
    };
    (identity, profile)
}
