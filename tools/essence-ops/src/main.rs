//! Operator CLI for identity/profile pairs left out of step by a failed workflow.
//!
//! # Usage
//!
//! ```bash
//! # List identities without profiles and profiles without identities
//! cargo run -p essence-ops -- reconcile
//!
//! # Remove an identity left behind by a failed rollback
//! cargo run -p essence-ops -- purge-identity <uuid>
//!
//! # Remove a profile whose identity is already gone
//! cargo run -p essence-ops -- purge-profile <uuid>
//! ```
//!
//! Reads the admin service's environment (`.env` is honoured). `reconcile`
//! exits 1 when anything is out of step.

use anyhow::{Context as _, Result, bail};
use clap::{Parser, Subcommand};
use sea_orm::Database;
use tracing::info;
use uuid::Uuid;

use essence_admin::config::AdminConfig;
use essence_admin::domain::repository::{IdentityPort, ProfileRepository};
use essence_admin::infra::db::DbProfileRepository;
use essence_admin::infra::identity::HttpIdentityClient;
use essence_admin::usecase::reconcile::{ReconcileReport, ReconcileUseCase};
use essence_core::tracing::init_tracing;

#[derive(Parser)]
#[command(about = "Repair identity/profile pairs after a failed provisioning workflow")]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Report identities without profiles and profiles without identities
    Reconcile,
    /// Delete an identity that has no profile
    PurgeIdentity { id: Uuid },
    /// Delete a profile whose identity no longer exists
    PurgeProfile { id: Uuid },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    init_tracing();
    let args = Args::parse();

    let config = AdminConfig::from_env()?;
    let db = Database::connect(&config.database_url)
        .await
        .context("failed to connect to database")?;
    let identity = HttpIdentityClient::new(
        config.identity_url.as_str(),
        config.identity_service_key,
    );
    let profiles = DbProfileRepository { db };

    match args.command {
        Command::Reconcile => {
            let report = ReconcileUseCase { identity, profiles }.execute().await?;
            print_report(&report);
            if !report.is_clean() {
                std::process::exit(1);
            }
        }
        Command::PurgeIdentity { id } => {
            if profiles.find_by_id(id).await?.is_some() {
                bail!("identity {id} still has a profile; delete the user through the admin API");
            }
            identity.delete_identity(id).await?;
            info!(identity_id = %id, "orphaned identity purged");
            println!("purged identity {id}");
        }
        Command::PurgeProfile { id } => {
            let identities = identity.list_identities().await?;
            if identities.iter().any(|i| i.id == id) {
                bail!("profile {id} still has an identity; delete the user through the admin API");
            }
            if !profiles.delete(id).await? {
                bail!("no profile {id}");
            }
            info!(user_id = %id, "orphaned profile purged");
            println!("purged profile {id}");
        }
    }
    Ok(())
}

fn print_report(report: &ReconcileReport) {
    if report.is_clean() {
        println!("identities and profiles are in step");
        return;
    }
    for identity in &report.identities_without_profile {
        println!(
            "IDENTITY WITHOUT PROFILE  {}  {}",
            identity.id,
            identity.email.as_deref().unwrap_or("-")
        );
    }
    for profile in &report.profiles_without_identity {
        println!(
            "PROFILE WITHOUT IDENTITY  {}  {}",
            profile.id, profile.email
        );
    }
    println!();
    println!(
        "{} identity(ies) without profile, {} profile(s) without identity",
        report.identities_without_profile.len(),
        report.profiles_without_identity.len()
    );
}
