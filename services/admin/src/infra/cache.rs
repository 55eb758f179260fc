//! In-process read-through cache of the directory snapshot.

use std::future::Future;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::types::{Directory, DirectoryChange};
use crate::error::AdminServiceError;

#[derive(Default)]
struct Slot {
    /// Bumped on every invalidation; a load that started under an older
    /// generation must not publish its result.
    generation: u64,
    snapshot: Option<Arc<Directory>>,
}

#[derive(Clone, Default)]
pub struct DirectoryCache {
    slot: Arc<RwLock<Slot>>,
}

impl DirectoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached snapshot, or run `load` and cache its result.
    /// Loader errors are returned and nothing is cached.
    pub async fn get_or_load<F, Fut>(&self, load: F) -> Result<Arc<Directory>, AdminServiceError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Directory, AdminServiceError>>,
    {
        let generation = {
            let slot = self.slot.read().await;
            if let Some(snapshot) = &slot.snapshot {
                return Ok(Arc::clone(snapshot));
            }
            slot.generation
        };

        let directory = Arc::new(load().await?);

        let mut slot = self.slot.write().await;
        if slot.generation == generation {
            slot.snapshot = Some(Arc::clone(&directory));
        }
        Ok(directory)
    }

    /// Invalidate after a workflow changed the directory.
    pub async fn apply(&self, change: DirectoryChange) {
        let mut slot = self.slot.write().await;
        slot.generation += 1;
        slot.snapshot = None;
        debug!(?change, "directory cache invalidated");
    }

    pub async fn is_warm(&self) -> bool {
        self.slot.read().await.snapshot.is_some()
    }
}
