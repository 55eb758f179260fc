//! User domain types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::capability::Capability;

/// Permission tier of a profile.
///
/// Header wire format: `u8` (0 = User, 1 = Admin, 2 = Super Admin).
/// Storage and JSON use the display names (`"User"`, `"Admin"`, `"Super Admin"`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UserRole {
    #[serde(rename = "User")]
    User = 0,
    #[serde(rename = "Admin")]
    Admin = 1,
    #[serde(rename = "Super Admin")]
    SuperAdmin = 2,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role: {0}")]
pub struct UnknownRole(pub String);

impl UserRole {
    pub const ALL: [UserRole; 3] = [Self::User, Self::Admin, Self::SuperAdmin];

    /// Convert from `u8` wire value. Returns `None` for unknown values.
    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            0 => Some(Self::User),
            1 => Some(Self::Admin),
            2 => Some(Self::SuperAdmin),
            _ => None,
        }
    }

    /// Convert to `u8` wire value.
    pub fn as_u8(self) -> u8 {
        self as u8
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::User => "User",
            Self::Admin => "Admin",
            Self::SuperAdmin => "Super Admin",
        }
    }

    /// The single role-gating check. Every feature gate goes through here.
    pub fn can(self, capability: Capability) -> bool {
        use Capability::*;
        match self {
            Self::SuperAdmin => !matches!(capability, ViewManagedGroups | ViewPersonalBalance),
            Self::Admin => matches!(
                capability,
                ViewReports
                    | ViewSecurityLog
                    | ViewManagedGroups
                    | ViewRecentAdminActions
                    | ChangeOwnPassword
            ),
            Self::User => matches!(capability, ViewPersonalBalance | ChangeOwnPassword),
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "User" => Ok(Self::User),
            "Admin" => Ok(Self::Admin),
            "Super Admin" => Ok(Self::SuperAdmin),
            other => Err(UnknownRole(other.to_owned())),
        }
    }
}

impl PartialOrd for UserRole {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for UserRole {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.as_u8().cmp(&other.as_u8())
    }
}
