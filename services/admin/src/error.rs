use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use uuid::Uuid;

use essence_core::error::{AppError, error_response};

/// Admin service error variants.
#[derive(Debug, thiserror::Error)]
pub enum AdminServiceError {
    #[error("missing data")]
    MissingData,
    #[error("password must be at least 6 characters")]
    PasswordTooShort,
    #[error("passwords do not match")]
    PasswordMismatch,
    #[error("user not found")]
    UserNotFound,
    #[error("group not found")]
    GroupNotFound,
    #[error("unauthorized")]
    Unauthorized,
    #[error("forbidden")]
    Forbidden,
    #[error("user already registered")]
    IdentityConflict,
    #[error("profile already exists")]
    ProfileConflict,
    #[error("group name already exists")]
    GroupConflict,
    #[error("identity service error")]
    IdentityServiceError(#[source] anyhow::Error),
    #[error("profile creation failed")]
    ProfileCreationFailed(#[source] Box<AdminServiceError>),
    #[error("inconsistent state: identity {identity_id} has no profile and could not be removed")]
    InconsistentState { identity_id: Uuid },
    #[error("identity deletion failed")]
    IdentityDeletionFailed(#[source] Box<AdminServiceError>),
    #[error("orphaned profile: identity removed but profile {user_id} remains")]
    OrphanedProfile { user_id: Uuid },
    #[error("cannot delete group with {0} member(s)")]
    GroupNotEmpty(u64),
    #[error("group deletion failed")]
    GroupDeletionFailed(#[source] Box<AdminServiceError>),
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl AdminServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::MissingData => "MISSING_DATA",
            Self::PasswordTooShort => "PASSWORD_TOO_SHORT",
            Self::PasswordMismatch => "PASSWORD_MISMATCH",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::GroupNotFound => "GROUP_NOT_FOUND",
            Self::Unauthorized => "UNAUTHORIZED",
            Self::Forbidden => "FORBIDDEN",
            Self::IdentityConflict => "IDENTITY_CONFLICT",
            Self::ProfileConflict => "PROFILE_CONFLICT",
            Self::GroupConflict => "GROUP_CONFLICT",
            Self::IdentityServiceError(_) => "IDENTITY_SERVICE_ERROR",
            Self::ProfileCreationFailed(_) => "PROFILE_CREATION_FAILED",
            Self::InconsistentState { .. } => "INCONSISTENT_STATE",
            Self::IdentityDeletionFailed(_) => "IDENTITY_DELETION_FAILED",
            Self::OrphanedProfile { .. } => "ORPHANED_PROFILE",
            Self::GroupNotEmpty(_) => "GROUP_NOT_EMPTY",
            Self::GroupDeletionFailed(_) => "GROUP_DELETION_FAILED",
            Self::Internal(_) => "INTERNAL",
        }
    }

    /// Errors that leave identity and profile out of step and need an operator.
    pub fn needs_manual_intervention(&self) -> bool {
        matches!(
            self,
            Self::InconsistentState { .. } | Self::OrphanedProfile { .. }
        )
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::MissingData
            | Self::PasswordTooShort
            | Self::PasswordMismatch
            | Self::GroupNotEmpty(_) => StatusCode::BAD_REQUEST,
            Self::UserNotFound | Self::GroupNotFound => StatusCode::NOT_FOUND,
            Self::Unauthorized => StatusCode::UNAUTHORIZED,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::IdentityConflict | Self::ProfileConflict | Self::GroupConflict => {
                StatusCode::CONFLICT
            }
            Self::IdentityServiceError(_) | Self::IdentityDeletionFailed(_) => {
                StatusCode::BAD_GATEWAY
            }
            Self::ProfileCreationFailed(_)
            | Self::InconsistentState { .. }
            | Self::OrphanedProfile { .. }
            | Self::GroupDeletionFailed(_)
            | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<AppError> for AdminServiceError {
    fn from(e: AppError) -> Self {
        match e {
            AppError::Unauthorized => Self::Unauthorized,
            AppError::Forbidden => Self::Forbidden,
        }
    }
}

impl IntoResponse for AdminServiceError {
    fn into_response(self) -> Response {
        let status = self.status();
        match &self {
            Self::OrphanedProfile { user_id } => {
                tracing::warn!(
                    user_id = %user_id,
                    kind = self.kind(),
                    "profile left without identity, manual cleanup required"
                );
            }
            _ if status.is_server_error() => {
                tracing::error!(error = %ErrorChain(&self), kind = self.kind(), "request failed");
            }
            _ => {}
        }
        error_response(status, self.kind(), self.to_string())
    }
}

/// Renders the full `source()` chain in one log field.
struct ErrorChain<'a>(&'a AdminServiceError);

impl std::fmt::Display for ErrorChain<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)?;
        let mut source = std::error::Error::source(self.0);
        while let Some(cause) = source {
            write!(f, ": {cause}")?;
            source = cause.source();
        }
        Ok(())
    }
}
