//! Operator audit for records left behind by failed workflows.

use std::collections::HashSet;

use uuid::Uuid;

use crate::domain::repository::{IdentityPort, ProfileRepository};
use crate::domain::types::{Identity, Profile};
use crate::error::AdminServiceError;

#[derive(Debug, Default)]
pub struct ReconcileReport {
    /// Left behind by `InconsistentState`.
    pub identities_without_profile: Vec<Identity>,
    /// Left behind by `OrphanedProfile`.
    pub profiles_without_identity: Vec<Profile>,
}

impl ReconcileReport {
    pub fn is_clean(&self) -> bool {
        self.identities_without_profile.is_empty() && self.profiles_without_identity.is_empty()
    }
}

pub struct ReconcileUseCase<I: IdentityPort, P: ProfileRepository> {
    pub identity: I,
    pub profiles: P,
}

impl<I: IdentityPort, P: ProfileRepository> ReconcileUseCase<I, P> {
    pub async fn execute(&self) -> Result<ReconcileReport, AdminServiceError> {
        let identities = self.identity.list_identities().await?;
        let profiles = self.profiles.list().await?;

        let identity_ids: HashSet<Uuid> = identities.iter().map(|i| i.id).collect();
        let profile_ids: HashSet<Uuid> = profiles.iter().map(|p| p.id).collect();

        Ok(ReconcileReport {
            identities_without_profile: identities
                .into_iter()
                .filter(|i| !profile_ids.contains(&i.id))
                .collect(),
            profiles_without_identity: profiles
                .into_iter()
                .filter(|p| !identity_ids.contains(&p.id))
                .collect(),
        })
    }
}
