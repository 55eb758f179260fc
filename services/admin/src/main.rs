use anyhow::Context as _;
use sea_orm::Database;
use tracing::info;

use essence_admin::config::AdminConfig;
use essence_admin::infra::cache::DirectoryCache;
use essence_admin::infra::identity::HttpIdentityClient;
use essence_admin::router::build_router;
use essence_admin::state::AppState;
use essence_core::tracing::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = AdminConfig::from_env()?;

    let db = Database::connect(&config.database_url)
        .await
        .context("failed to connect to database")?;

    let state = AppState {
        db,
        identity: HttpIdentityClient::new(
            config.identity_url.as_str(),
            config.identity_service_key,
        ),
        directory: DirectoryCache::new(),
    };

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.admin_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    info!("admin service listening on {addr}");
    axum::serve(listener, router).await.context("server error")?;
    Ok(())
}
