//! Role-based access checks.
//!
//! Decisions are stateless per-request; the only persisted state is the
//! `role` column on users, mutated exclusively through the admin role-update
//! operation.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// User role.
///
/// Stored as text in the users table; unknown or absent values are treated
/// as `User` when checking access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    User,
    ContentManager,
    Admin,
}

impl Role {
    /// Parse a role column value, defaulting unknown values to `User`.
    pub fn from_db(value: &str) -> Self {
        value.parse().unwrap_or(Role::User)
    }

    /// The text stored in the role column.
    pub fn as_str(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::ContentManager => "content_manager",
            Role::Admin => "admin",
        }
    }

    /// Content CRUD and unfiltered content reads: admins and content
    /// managers.
    pub fn can_manage_content(self) -> bool {
        matches!(self, Role::Admin | Role::ContentManager)
    }

    /// User listing and role mutation: admins only.
    pub fn can_manage_users(self) -> bool {
        self == Role::Admin
    }
}

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Role::User),
            "content_manager" => Ok(Role::ContentManager),
            "admin" => Ok(Role::Admin),
            _ => Err(UnknownRole),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for role strings outside the three known values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownRole;

impl fmt::Display for UnknownRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("role must be one of: user, content_manager, admin")
    }
}

impl std::error::Error for UnknownRole {}
