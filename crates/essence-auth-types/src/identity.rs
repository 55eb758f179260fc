//! Gateway-injected identity headers extractor.

use axum::extract::FromRequestParts;
use http::request::Parts;
use uuid::Uuid;

use essence_core::error::AppError;
use essence_domain::capability::Capability;
use essence_domain::user::UserRole;

pub const USER_ID_HEADER: &str = "x-essence-user-id";
pub const USER_ROLE_HEADER: &str = "x-essence-user-role";

/// Caller identity injected by the gateway via `x-essence-user-id` and `x-essence-user-role`.
///
/// Rejects with 401 if either header is absent, the id is not a UUID, or the
/// role is not a known `u8` wire value. Capability checks (403) happen after
/// extraction through [`IdentityHeaders::require`].
#[derive(Debug, Clone)]
pub struct IdentityHeaders {
    pub user_id: Uuid,
    pub user_role: UserRole,
}

impl IdentityHeaders {
    pub fn require(&self, capability: Capability) -> Result<(), AppError> {
        if self.user_role.can(capability) {
            Ok(())
        } else {
            Err(AppError::Forbidden)
        }
    }
}

impl<S> FromRequestParts<S> for IdentityHeaders
where
    S: Send + Sync,
{
    type Rejection = AppError;

    // axum-core 0.5 declares this as `fn -> impl Future + Send`; extract synchronously
    // and return a 'static async block so the future does not borrow `parts`.
    fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let user_id = parts
            .headers
            .get(USER_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse::<Uuid>().ok());

        let user_role = parts
            .headers
            .get(USER_ROLE_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse::<u8>().ok())
            .and_then(UserRole::from_u8);

        async move {
            let user_id = user_id.ok_or(AppError::Unauthorized)?;
            let user_role = user_role.ok_or(AppError::Unauthorized)?;
            Ok(Self { user_id, user_role })
        }
    }
}
