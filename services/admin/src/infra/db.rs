use anyhow::Context as _;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, SqlErr,
};
use uuid::Uuid;

use essence_admin_schema::{admin_actions, groups, profiles};
use essence_domain::user::UserRole;

use crate::domain::repository::{AdminActionRepository, GroupRepository, ProfileRepository};
use crate::domain::types::{AdminAction, Group, GroupChanges, Profile, ProfileChanges};
use crate::error::AdminServiceError;

/// SQLSTATE 23505.
fn is_unique_violation(e: &DbErr) -> bool {
    matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

/// `ActiveModel::update` reports a missing row as an error; callers want `false`.
fn updated(result: Result<(), DbErr>) -> Result<bool, DbErr> {
    match result {
        Ok(()) => Ok(true),
        Err(DbErr::RecordNotUpdated) => Ok(false),
        Err(e) => Err(e),
    }
}

// ── Profile repository ───────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbProfileRepository {
    pub db: DatabaseConnection,
}

impl ProfileRepository for DbProfileRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Profile>, AdminServiceError> {
        let model = profiles::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find profile by id")?;
        model.map(profile_from_model).transpose()
    }

    async fn list(&self) -> Result<Vec<Profile>, AdminServiceError> {
        profiles::Entity::find()
            .order_by_asc(profiles::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("list profiles")?
            .into_iter()
            .map(profile_from_model)
            .collect()
    }

    async fn create(&self, profile: &Profile) -> Result<(), AdminServiceError> {
        let result = profiles::ActiveModel {
            id: Set(profile.id),
            email: Set(profile.email.clone()),
            full_name: Set(profile.full_name.clone()),
            role: Set(profile.role.as_str().to_owned()),
            group_id: Set(profile.group_id),
            balance: Set(profile.balance),
            is_suspended: Set(profile.is_suspended),
            created_at: Set(profile.created_at),
            updated_at: Set(profile.updated_at),
        }
        .insert(&self.db)
        .await;
        match result {
            Ok(_) => Ok(()),
            Err(e) if is_unique_violation(&e) => Err(AdminServiceError::ProfileConflict),
            Err(e) => Err(anyhow::Error::new(e).context("create profile").into()),
        }
    }

    async fn update(&self, id: Uuid, changes: &ProfileChanges) -> Result<bool, AdminServiceError> {
        let result = profiles::ActiveModel {
            id: Set(id),
            email: Set(changes.email.clone()),
            full_name: Set(changes.full_name.clone()),
            role: Set(changes.role.as_str().to_owned()),
            group_id: Set(changes.group_id),
            updated_at: Set(Utc::now()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .map(|_| ());
        match updated(result) {
            Ok(found) => Ok(found),
            Err(e) if is_unique_violation(&e) => Err(AdminServiceError::ProfileConflict),
            Err(e) => Err(anyhow::Error::new(e).context("update profile").into()),
        }
    }

    async fn set_suspended(&self, id: Uuid, suspended: bool) -> Result<bool, AdminServiceError> {
        let result = profiles::ActiveModel {
            id: Set(id),
            is_suspended: Set(suspended),
            updated_at: Set(Utc::now()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .map(|_| ());
        Ok(updated(result).context("set profile suspension")?)
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AdminServiceError> {
        let result = profiles::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete profile")?;
        Ok(result.rows_affected > 0)
    }

    async fn count_by_group(&self, group_id: Uuid) -> Result<u64, AdminServiceError> {
        let count = profiles::Entity::find()
            .filter(profiles::Column::GroupId.eq(group_id))
            .count(&self.db)
            .await
            .context("count profiles by group")?;
        Ok(count)
    }
}

fn profile_from_model(model: profiles::Model) -> Result<Profile, AdminServiceError> {
    let role = model
        .role
        .parse::<UserRole>()
        .with_context(|| format!("profile {} has unknown role", model.id))?;
    Ok(Profile {
        id: model.id,
        email: model.email,
        full_name: model.full_name,
        role,
        group_id: model.group_id,
        balance: model.balance,
        is_suspended: model.is_suspended,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}

// ── Group repository ─────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbGroupRepository {
    pub db: DatabaseConnection,
}

impl GroupRepository for DbGroupRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Group>, AdminServiceError> {
        let model = groups::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find group by id")?;
        Ok(model.map(group_from_model))
    }

    async fn list(&self) -> Result<Vec<Group>, AdminServiceError> {
        let models = groups::Entity::find()
            .order_by_asc(groups::Column::Name)
            .all(&self.db)
            .await
            .context("list groups")?;
        Ok(models.into_iter().map(group_from_model).collect())
    }

    async fn create(&self, group: &Group) -> Result<(), AdminServiceError> {
        let result = groups::ActiveModel {
            id: Set(group.id),
            name: Set(group.name.clone()),
            description: Set(group.description.clone()),
            kind: Set(group.kind.clone()),
            created_at: Set(group.created_at),
            updated_at: Set(group.updated_at),
        }
        .insert(&self.db)
        .await;
        match result {
            Ok(_) => Ok(()),
            Err(e) if is_unique_violation(&e) => Err(AdminServiceError::GroupConflict),
            Err(e) => Err(anyhow::Error::new(e).context("create group").into()),
        }
    }

    async fn update(&self, id: Uuid, changes: &GroupChanges) -> Result<bool, AdminServiceError> {
        let result = groups::ActiveModel {
            id: Set(id),
            name: Set(changes.name.clone()),
            description: Set(changes.description.clone()),
            kind: Set(changes.kind.clone()),
            updated_at: Set(Utc::now()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .map(|_| ());
        match updated(result) {
            Ok(found) => Ok(found),
            Err(e) if is_unique_violation(&e) => Err(AdminServiceError::GroupConflict),
            Err(e) => Err(anyhow::Error::new(e).context("update group").into()),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<bool, AdminServiceError> {
        let result = groups::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .context("delete group")?;
        Ok(result.rows_affected > 0)
    }
}

fn group_from_model(model: groups::Model) -> Group {
    Group {
        id: model.id,
        name: model.name,
        description: model.description,
        kind: model.kind,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

// ── Admin action repository ──────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbAdminActionRepository {
    pub db: DatabaseConnection,
}

impl AdminActionRepository for DbAdminActionRepository {
    async fn record(&self, action: &AdminAction) -> Result<(), AdminServiceError> {
        admin_actions::ActiveModel {
            id: Set(action.id),
            actor_id: Set(action.actor_id),
            action: Set(action.action.clone()),
            details: Set(action.details.clone()),
            created_at: Set(action.created_at),
        }
        .insert(&self.db)
        .await
        .context("record admin action")?;
        Ok(())
    }

    async fn list_recent(&self, limit: u64) -> Result<Vec<AdminAction>, AdminServiceError> {
        let models = admin_actions::Entity::find()
            .order_by_desc(admin_actions::Column::CreatedAt)
            .limit(limit)
            .all(&self.db)
            .await
            .context("list recent admin actions")?;
        Ok(models
            .into_iter()
            .map(|m| AdminAction {
                id: m.id,
                actor_id: m.actor_id,
                action: m.action,
                details: m.details,
                created_at: m.created_at,
            })
            .collect())
    }
}
