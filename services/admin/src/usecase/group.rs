use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use essence_domain::id::GroupId;

use crate::domain::repository::{AdminActionRepository, GroupRepository, ProfileRepository};
use crate::domain::types::{DirectoryChange, Group, GroupChanges, non_blank};
use crate::error::AdminServiceError;
use crate::usecase::audit::record_action;

pub struct GroupInput {
    pub actor_id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub kind: Option<String>,
}

impl GroupInput {
    fn changes(&self) -> Result<GroupChanges, AdminServiceError> {
        let name = non_blank(&self.name).ok_or(AdminServiceError::MissingData)?;
        let optional = |v: &Option<String>| v.as_deref().and_then(non_blank).map(str::to_owned);
        Ok(GroupChanges {
            name: name.to_owned(),
            description: optional(&self.description),
            kind: optional(&self.kind),
        })
    }
}

// ── CreateGroup ──────────────────────────────────────────────────────────────

pub struct CreateGroupUseCase<G: GroupRepository, A: AdminActionRepository> {
    pub groups: G,
    pub actions: A,
}

impl<G: GroupRepository, A: AdminActionRepository> CreateGroupUseCase<G, A> {
    pub async fn execute(
        &self,
        input: GroupInput,
    ) -> Result<(Group, DirectoryChange), AdminServiceError> {
        let changes = input.changes()?;
        let now = Utc::now();
        let group = Group {
            id: Uuid::now_v7(),
            name: changes.name,
            description: changes.description,
            kind: changes.kind,
            created_at: now,
            updated_at: now,
        };
        self.groups.create(&group).await?;
        record_action(
            &self.actions,
            input.actor_id,
            "create_group",
            format!("Created group {}", group.name),
        )
        .await;
        let change = DirectoryChange::GroupCreated(GroupId(group.id));
        Ok((group, change))
    }
}

// ── UpdateGroup ──────────────────────────────────────────────────────────────

pub struct UpdateGroupUseCase<G: GroupRepository, A: AdminActionRepository> {
    pub groups: G,
    pub actions: A,
}

impl<G: GroupRepository, A: AdminActionRepository> UpdateGroupUseCase<G, A> {
    pub async fn execute(
        &self,
        group_id: Uuid,
        input: GroupInput,
    ) -> Result<DirectoryChange, AdminServiceError> {
        let changes = input.changes()?;
        if !self.groups.update(group_id, &changes).await? {
            return Err(AdminServiceError::GroupNotFound);
        }
        record_action(
            &self.actions,
            input.actor_id,
            "update_group",
            format!("Updated group {}", changes.name),
        )
        .await;
        Ok(DirectoryChange::GroupUpdated(GroupId(group_id)))
    }
}

// ── DeleteGroup ──────────────────────────────────────────────────────────────

/// Refuses to delete a group while any profile references it.
pub struct DeleteGroupUseCase<P, G, A>
where
    P: ProfileRepository,
    G: GroupRepository,
    A: AdminActionRepository,
{
    pub profiles: P,
    pub groups: G,
    pub actions: A,
}

impl<P, G, A> DeleteGroupUseCase<P, G, A>
where
    P: ProfileRepository,
    G: GroupRepository,
    A: AdminActionRepository,
{
    pub async fn execute(
        &self,
        actor_id: Uuid,
        group_id: Uuid,
    ) -> Result<DirectoryChange, AdminServiceError> {
        let members = self.profiles.count_by_group(group_id).await?;
        if members > 0 {
            return Err(AdminServiceError::GroupNotEmpty(members));
        }

        let found = self
            .groups
            .delete(group_id)
            .await
            .map_err(|e| AdminServiceError::GroupDeletionFailed(Box::new(e)))?;
        if found {
            record_action(
                &self.actions,
                actor_id,
                "delete_group",
                format!("Deleted group {group_id}"),
            )
            .await;
        } else {
            info!(group_id = %group_id, "group already absent");
        }
        Ok(DirectoryChange::GroupRemoved(GroupId(group_id)))
    }
}
