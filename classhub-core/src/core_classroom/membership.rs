//! Classroom membership records

use super::types::{ClassroomId, MembershipId, Timestamp, UserId};
use super::user::UserRole;
use serde::{Deserialize, Serialize};

/// Join record between a classroom and a student.
///
/// The (classroom_id, student_id) pair is unique: a student cannot hold two
/// simultaneous memberships in the same classroom. Created by join/invite,
/// destroyed by leave; never updated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassroomMembership {
    /// Unique identifier
    pub id: MembershipId,

    /// The classroom joined
    pub classroom_id: ClassroomId,

    /// The joining student
    pub student_id: UserId,

    /// When the membership was created
    pub joined_at: Timestamp,
}

/// Restricted projection of a [`super::User`] for classroom rosters.
///
/// Progress internals (mistake patterns, achievements) are never exposed
/// through roster listings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterMember {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: UserRole,
}
