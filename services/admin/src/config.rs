use anyhow::{Context as _, bail};
use url::Url;

/// Admin service configuration loaded from environment variables.
#[derive(Debug)]
pub struct AdminConfig {
    /// PostgreSQL connection URL holding profiles, groups and admin actions.
    pub database_url: String,
    /// Root URL of the hosted identity service. Env var: `IDENTITY_URL`.
    pub identity_url: Url,
    /// Service-role key for the identity admin API. Env var: `IDENTITY_SERVICE_KEY`.
    pub identity_service_key: String,
    /// TCP port for the HTTP server (default 3114). Env var: `ADMIN_PORT`.
    pub admin_port: u16,
}

fn required(name: &str) -> anyhow::Result<String> {
    match std::env::var(name) {
        Ok(v) if !v.trim().is_empty() => Ok(v),
        _ => bail!("{name} must be set"),
    }
}

impl AdminConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let identity_url = required("IDENTITY_URL")?;
        let identity_url = Url::parse(&identity_url)
            .with_context(|| format!("IDENTITY_URL is not a valid URL: {identity_url}"))?;
        if !matches!(identity_url.scheme(), "http" | "https") {
            bail!("IDENTITY_URL must use http or https");
        }
        let admin_port = match std::env::var("ADMIN_PORT") {
            Ok(v) => v.parse().context("ADMIN_PORT must be a port number")?,
            Err(_) => 3114,
        };
        Ok(Self {
            database_url: required("DATABASE_URL")?,
            identity_url,
            identity_service_key: required("IDENTITY_SERVICE_KEY")?,
            admin_port,
        })
    }
}
