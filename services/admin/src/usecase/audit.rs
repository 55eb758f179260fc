use uuid::Uuid;

use crate::domain::repository::AdminActionRepository;
use crate::domain::types::AdminAction;
use crate::error::AdminServiceError;

/// Entries shown in the recent-admin-actions feed.
pub const RECENT_ACTIONS_LIMIT: u64 = 20;

/// Append to the admin action log. A failed write is logged and swallowed:
/// the mutation it describes has already happened.
pub async fn record_action<A: AdminActionRepository>(
    actions: &A,
    actor_id: Uuid,
    action: &str,
    details: String,
) {
    let entry = AdminAction::new(actor_id, action, details);
    if let Err(e) = actions.record(&entry).await {
        tracing::warn!(error = %e, action, actor_id = %actor_id, "failed to record admin action");
    }
}

// ── ListRecentActions ────────────────────────────────────────────────────────

pub struct ListRecentActionsUseCase<A: AdminActionRepository> {
    pub actions: A,
}

impl<A: AdminActionRepository> ListRecentActionsUseCase<A> {
    pub async fn execute(&self) -> Result<Vec<AdminAction>, AdminServiceError> {
        self.actions.list_recent(RECENT_ACTIONS_LIMIT).await
    }
}
