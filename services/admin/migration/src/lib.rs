use sea_orm_migration::prelude::*;

mod m20250601_000001_create_groups;
mod m20250601_000002_create_profiles;
mod m20250601_000003_create_admin_actions;
mod m20250601_000004_add_lookup_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250601_000001_create_groups::Migration),
            Box::new(m20250601_000002_create_profiles::Migration),
            Box::new(m20250601_000003_create_admin_actions::Migration),
            Box::new(m20250601_000004_add_lookup_indexes::Migration),
        ]
    }
}
