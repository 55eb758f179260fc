//! Mock caller identity for router tests.
//!
//! Services behind the gateway receive `x-essence-user-id` + `x-essence-user-role`
//! headers. `MockAuth` produces the same headers so tests need no gateway.

use axum::http::{HeaderName, HeaderValue};
use uuid::Uuid;

use essence_auth_types::identity::{USER_ID_HEADER, USER_ROLE_HEADER};
use essence_domain::user::UserRole;

pub struct MockAuth {
    pub user_id: Uuid,
    pub user_role: UserRole,
}

impl MockAuth {
    pub fn new(user_id: Uuid, user_role: UserRole) -> Self {
        Self { user_id, user_role }
    }

    pub fn super_admin() -> Self {
        Self::new(Uuid::now_v7(), UserRole::SuperAdmin)
    }

    pub fn admin() -> Self {
        Self::new(Uuid::now_v7(), UserRole::Admin)
    }

    pub fn user() -> Self {
        Self::new(Uuid::now_v7(), UserRole::User)
    }

    /// Header pairs as the gateway would inject them.
    pub fn headers(&self) -> [(HeaderName, HeaderValue); 2] {
        [
            (
                HeaderName::from_static(USER_ID_HEADER),
                HeaderValue::from_str(&self.user_id.to_string()).unwrap(),
            ),
            (
                HeaderName::from_static(USER_ROLE_HEADER),
                HeaderValue::from(u16::from(self.user_role.as_u8())),
            ),
        ]
    }
}
