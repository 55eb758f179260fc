use crate::domain::repository::{GroupRepository, ProfileRepository};
use crate::domain::types::Directory;
use crate::error::AdminServiceError;

// ── ListDirectory ────────────────────────────────────────────────────────────

pub struct ListDirectoryUseCase<P: ProfileRepository, G: GroupRepository> {
    pub profiles: P,
    pub groups: G,
}

impl<P: ProfileRepository, G: GroupRepository> ListDirectoryUseCase<P, G> {
    pub async fn execute(&self) -> Result<Directory, AdminServiceError> {
        let profiles = self.profiles.list().await?;
        let groups = self.groups.list().await?;
        Ok(Directory::build(profiles, groups))
    }
}
