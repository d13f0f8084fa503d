//! Classroom data structures

use super::storage::StoreError;
use super::types::{ClassroomId, Timestamp, UserId};
use super::validate::{self, FieldUpdate, InvalidInput};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A classroom: a named group owned by exactly one educator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classroom {
    /// Unique identifier
    pub id: ClassroomId,

    /// Human-readable name
    pub name: String,

    /// Optional description
    pub description: Option<String>,

    /// Owning educator; only the owner may mutate the classroom
    pub educator_id: UserId,

    /// Visibility mode (private or public)
    pub visibility: ClassroomVisibility,

    /// Unique invite code, stable for the classroom's lifetime
    pub invite_code: String,

    /// When the classroom was created
    pub created_at: Timestamp,

    /// Last time classroom metadata was updated
    pub updated_at: Timestamp,
}

/// Classroom visibility modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClassroomVisibility {
    /// Invite-only, not listed anywhere
    Private,
    /// Discoverable by anyone
    Public,
}

impl ClassroomVisibility {
    /// Stable string tag, as stored and as carried on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            ClassroomVisibility::Private => "private",
            ClassroomVisibility::Public => "public",
        }
    }

    /// Parse a string tag; anything outside the closed set is rejected
    pub fn parse(value: &str) -> Result<Self, InvalidInput> {
        match value {
            "private" => Ok(ClassroomVisibility::Private),
            "public" => Ok(ClassroomVisibility::Public),
            other => Err(InvalidInput::new(
                "visibility",
                format!("unknown visibility '{}'", other),
            )),
        }
    }
}

impl fmt::Display for ClassroomVisibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Input for creating a classroom
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewClassroom {
    pub name: String,
    pub description: Option<String>,
    pub educator_id: UserId,
    pub visibility: ClassroomVisibility,
}

impl NewClassroom {
    /// Check the input contract before any store access
    pub fn validate(&self) -> Result<(), InvalidInput> {
        validate::validate_name("name", &self.name)?;
        Ok(())
    }
}

/// Partial update for a classroom; absent fields leave stored values unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClassroomUpdate {
    pub id: ClassroomId,
    pub name: Option<String>,
    pub description: FieldUpdate<String>,
    pub visibility: Option<ClassroomVisibility>,
}

impl ClassroomUpdate {
    /// Check the input contract before any store access
    pub fn validate(&self) -> Result<(), InvalidInput> {
        if let Some(name) = &self.name {
            validate::validate_name("name", name)?;
        }
        Ok(())
    }
}

/// A classroom augmented with computed roster statistics.
///
/// Recomputed on every query, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassroomWithStats {
    pub classroom: Classroom,
    /// Count of current memberships
    pub member_count: u64,
    /// Denormalized name of the owning educator
    pub educator_name: String,
}

/// Classroom operation errors
#[derive(Debug, thiserror::Error)]
pub enum ClassroomError {
    #[error("educator does not exist")]
    UnknownEducator,

    #[error("could not allocate a unique invite code")]
    InviteCodeAllocation,

    #[error(transparent)]
    InvalidInput(#[from] InvalidInput),

    #[error(transparent)]
    Store(#[from] StoreError),
}
