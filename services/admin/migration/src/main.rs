use sea_orm_migration::prelude::*;

#[tokio::main]
async fn main() {
    cli::run_cli(essence_admin_migration::Migrator).await;
}
