//! Publication roles and the capability ordering used by permission checks.
//!
//! A user's relationship to a publication is resolved to a single
//! [`PublicationRole`]; capability checks compare roles through the total
//! order `Writer < Editor < Admin < Owner` instead of scattering string
//! comparisons across call sites.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// A user's effective role within a publication, ordered by capability.
///
/// `Owner` is derived from `publications.owner_id` and never stored in the
/// membership table; the remaining variants mirror the
/// `publication_members.role` column values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PublicationRole {
    Writer,
    Editor,
    Admin,
    Owner,
}

impl PublicationRole {
    /// String representation matching the membership table's role values.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Writer => "writer",
            Self::Editor => "editor",
            Self::Admin => "admin",
            Self::Owner => "owner",
        }
    }

    /// Parse a role string from the membership table.
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s {
            "writer" => Ok(Self::Writer),
            "editor" => Ok(Self::Editor),
            "admin" => Ok(Self::Admin),
            "owner" => Ok(Self::Owner),
            other => Err(CoreError::Internal(format!(
                "Unknown publication role '{other}' in membership data"
            ))),
        }
    }

    /// Whether this role meets a minimum capability requirement.
    pub fn satisfies(&self, minimum: PublicationRole) -> bool {
        *self >= minimum
    }
}

impl std::fmt::Display for PublicationRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
