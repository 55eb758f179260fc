use sea_orm::DatabaseConnection;

use crate::infra::cache::DirectoryCache;
use crate::infra::db::{DbAdminActionRepository, DbGroupRepository, DbProfileRepository};
use crate::infra::identity::HttpIdentityClient;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub identity: HttpIdentityClient,
    pub directory: DirectoryCache,
}

impl AppState {
    pub fn profile_repo(&self) -> DbProfileRepository {
        DbProfileRepository {
            db: self.db.clone(),
        }
    }

    pub fn group_repo(&self) -> DbGroupRepository {
        DbGroupRepository {
            db: self.db.clone(),
        }
    }

    pub fn action_repo(&self) -> DbAdminActionRepository {
        DbAdminActionRepository {
            db: self.db.clone(),
        }
    }

    pub fn identity_port(&self) -> HttpIdentityClient {
        self.identity.clone()
    }
}
