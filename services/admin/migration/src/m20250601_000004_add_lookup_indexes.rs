use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .table(Profiles::Table)
                    .col(Profiles::GroupId)
                    .name("idx_profiles_group_id")
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(AdminActions::Table)
                    .col(AdminActions::CreatedAt)
                    .name("idx_admin_actions_created_at")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_admin_actions_created_at").to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_profiles_group_id").to_owned())
            .await
    }
}

#[derive(Iden)]
enum Profiles {
    Table,
    GroupId,
}

#[derive(Iden)]
enum AdminActions {
    Table,
    CreatedAt,
}
