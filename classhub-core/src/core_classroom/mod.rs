//! Classroom & roster management
//!
//! This module provides the core data structures and operations for users,
//! classrooms, and classroom memberships.
//!
//! ## Architecture
//!
//! - **User**: identity record with a fixed role (student, educator,
//!   adult learner, parent)
//! - **Classroom**: a named group owned by exactly one educator, joinable
//!   through a stable invite code
//! - **ClassroomMembership**: join record between a classroom and a student;
//!   the (classroom, student) pair is unique
//!
//! ## Key design principles
//!
//! 1. Validation happens before any store access and reports the first
//!    violated constraint
//! 2. Membership uniqueness is enforced by the store's UNIQUE constraint,
//!    not by application-level existence checks alone
//! 3. Not-found conditions surface as `None`, never as errors

pub mod classroom;
pub mod invite;
pub mod manager;
pub mod membership;
pub mod storage;
pub mod types;
pub mod user;
pub mod validate;

pub use classroom::{
    Classroom, ClassroomError, ClassroomUpdate, ClassroomVisibility, ClassroomWithStats,
    NewClassroom,
};
pub use manager::{ClassroomManager, MembershipError, MembershipManager, RosterManager, UserManager};
pub use membership::{ClassroomMembership, RosterMember};
pub use storage::{ClassroomSqlStore, StoreError};
pub use types::{ClassroomId, MembershipId, Timestamp, UserId};
pub use user::{NewUser, User, UserError, UserRole, UserUpdate};
pub use validate::{FieldUpdate, InvalidInput};
