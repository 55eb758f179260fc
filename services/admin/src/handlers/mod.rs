pub mod dashboard;
pub mod directory;
pub mod group;
pub mod health;
pub mod me;
pub mod user;

use essence_domain::user::UserRole;

use crate::error::AdminServiceError;

/// Roles arrive as display names ("Super Admin"); blank or unknown is missing data.
pub(crate) fn parse_role(role: &str) -> Result<UserRole, AdminServiceError> {
    role.trim().parse().map_err(|_| AdminServiceError::MissingData)
}

/// Blank group ids mean "no group".
pub(crate) fn parse_group_id(group_id: Option<&str>) -> Result<Option<uuid::Uuid>, AdminServiceError> {
    match group_id.map(str::trim) {
        None | Some("") => Ok(None),
        Some(raw) => raw
            .parse()
            .map(Some)
            .map_err(|_| AdminServiceError::GroupNotFound),
    }
}
