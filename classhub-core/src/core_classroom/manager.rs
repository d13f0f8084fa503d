//! Manager traits for user, classroom, and membership operations
//!
//! The traits are the seams the RPC layer programs against; [`RosterManager`]
//! is the store-backed implementation. Not-found conditions and rejected
//! join/invite attempts surface as `None`, never as errors, so callers must
//! check for absence.

use super::classroom::{
    Classroom, ClassroomError, ClassroomUpdate, ClassroomWithStats, NewClassroom,
};
use super::invite;
use super::membership::{ClassroomMembership, RosterMember};
use super::storage::{ClassroomSqlStore, StoreError};
use super::types::{ClassroomId, UserId};
use super::user::{NewUser, User, UserError, UserUpdate};
use tracing::debug;

/// Manager for user CRUD operations
pub trait UserManager {
    /// Create a new user; fails with `EmailTaken` if the email exists
    fn create_user(&self, new: NewUser) -> Result<User, UserError>;

    /// Get a user by id
    fn get_user(&self, id: UserId) -> Result<Option<User>, UserError>;

    /// List all users
    fn list_users(&self) -> Result<Vec<User>, UserError>;

    /// Apply a partial update; `None` if the id does not resolve
    fn update_user(&self, update: UserUpdate) -> Result<Option<User>, UserError>;
}

/// Manager for classroom operations
pub trait ClassroomManager {
    /// Create a classroom with a freshly generated unique invite code
    fn create_classroom(&self, new: NewClassroom) -> Result<Classroom, ClassroomError>;

    /// Get a classroom by id
    fn get_classroom(&self, id: ClassroomId) -> Result<Option<Classroom>, ClassroomError>;

    /// List classrooms owned by an educator
    fn classrooms_by_educator(&self, educator_id: UserId)
        -> Result<Vec<Classroom>, ClassroomError>;

    /// List classrooms a student holds a membership in
    fn classrooms_by_student(&self, student_id: UserId) -> Result<Vec<Classroom>, ClassroomError>;

    /// Apply a partial update on behalf of `educator_id`.
    ///
    /// `None` if the classroom does not exist or the caller does not own it;
    /// a foreign classroom is indistinguishable from a missing one.
    fn update_classroom(
        &self,
        educator_id: UserId,
        update: ClassroomUpdate,
    ) -> Result<Option<Classroom>, ClassroomError>;

    /// Get a classroom with computed member count and educator name
    fn classroom_stats(&self, id: ClassroomId)
        -> Result<Option<ClassroomWithStats>, ClassroomError>;
}

/// Manager for classroom membership operations.
///
/// Per (classroom, student) pair the state machine is
/// NotMember -> Member -> NotMember, re-joinable after leaving.
pub trait MembershipManager {
    /// Join a classroom by invite code.
    ///
    /// `None` if the code does not resolve or the student is already a
    /// member; repeating an identical call is an idempotent no-op.
    fn join_classroom(
        &self,
        invite_code: &str,
        student_id: UserId,
    ) -> Result<Option<ClassroomMembership>, MembershipError>;

    /// Directly enroll a student on behalf of `educator_id`.
    ///
    /// `None` if the classroom does not exist, the caller does not own it,
    /// or the student is already a member.
    fn invite_student(
        &self,
        classroom_id: ClassroomId,
        student_id: UserId,
        educator_id: UserId,
    ) -> Result<Option<ClassroomMembership>, MembershipError>;

    /// Remove a student's membership; returns whether a row was removed.
    ///
    /// Leaving a classroom the student is not a member of is an idempotent
    /// success that returns `false`.
    fn leave_classroom(
        &self,
        classroom_id: ClassroomId,
        student_id: UserId,
    ) -> Result<bool, MembershipError>;

    /// List a classroom's roster as restricted member projections,
    /// ordered by join time
    fn classroom_members(
        &self,
        classroom_id: ClassroomId,
    ) -> Result<Vec<RosterMember>, MembershipError>;
}

/// Membership operation errors
#[derive(Debug, thiserror::Error)]
pub enum MembershipError {
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// How many generated invite codes to try before giving up; with a 36^8
/// namespace more than one attempt is already exceptional
const INVITE_CODE_ATTEMPTS: usize = 8;

/// Store-backed implementation of the manager traits.
///
/// Holds the explicitly constructed store handle; request handlers share one
/// instance through an `Arc`.
pub struct RosterManager {
    store: ClassroomSqlStore,
}

impl RosterManager {
    pub fn new(store: ClassroomSqlStore) -> Self {
        Self { store }
    }
}

impl UserManager for RosterManager {
    fn create_user(&self, new: NewUser) -> Result<User, UserError> {
        new.validate()?;

        match self.store.insert_user(&new) {
            Ok(user) => {
                debug!(user_id = user.id.0, role = %user.role, "user created");
                Ok(user)
            }
            Err(StoreError::UniqueViolation(_)) => Err(UserError::EmailTaken),
            Err(e) => Err(e.into()),
        }
    }

    fn get_user(&self, id: UserId) -> Result<Option<User>, UserError> {
        Ok(self.store.get_user(id)?)
    }

    fn list_users(&self) -> Result<Vec<User>, UserError> {
        Ok(self.store.list_users()?)
    }

    fn update_user(&self, update: UserUpdate) -> Result<Option<User>, UserError> {
        update.validate()?;

        match self.store.update_user(&update) {
            Err(StoreError::UniqueViolation(_)) => Err(UserError::EmailTaken),
            other => Ok(other?),
        }
    }
}

impl ClassroomManager for RosterManager {
    fn create_classroom(&self, new: NewClassroom) -> Result<Classroom, ClassroomError> {
        new.validate()?;

        for _ in 0..INVITE_CODE_ATTEMPTS {
            let code = invite::generate_invite_code();
            match self.store.insert_classroom(&new, &code) {
                Ok(classroom) => {
                    debug!(
                        classroom_id = classroom.id.0,
                        educator_id = classroom.educator_id.0,
                        "classroom created"
                    );
                    return Ok(classroom);
                }
                // Generated code already taken; draw a fresh one
                Err(StoreError::UniqueViolation(_)) => continue,
                Err(StoreError::ForeignKeyViolation(_)) => {
                    return Err(ClassroomError::UnknownEducator)
                }
                Err(e) => return Err(e.into()),
            }
        }

        Err(ClassroomError::InviteCodeAllocation)
    }

    fn get_classroom(&self, id: ClassroomId) -> Result<Option<Classroom>, ClassroomError> {
        Ok(self.store.get_classroom(id)?)
    }

    fn classrooms_by_educator(
        &self,
        educator_id: UserId,
    ) -> Result<Vec<Classroom>, ClassroomError> {
        Ok(self.store.classrooms_by_educator(educator_id)?)
    }

    fn classrooms_by_student(&self, student_id: UserId) -> Result<Vec<Classroom>, ClassroomError> {
        Ok(self.store.classrooms_by_student(student_id)?)
    }

    fn update_classroom(
        &self,
        educator_id: UserId,
        update: ClassroomUpdate,
    ) -> Result<Option<Classroom>, ClassroomError> {
        update.validate()?;

        let Some(existing) = self.store.get_classroom(update.id)? else {
            return Ok(None);
        };
        if existing.educator_id != educator_id {
            debug!(
                classroom_id = update.id.0,
                caller = educator_id.0,
                "classroom update rejected: caller is not the owner"
            );
            return Ok(None);
        }

        Ok(self.store.update_classroom(&update)?)
    }

    fn classroom_stats(
        &self,
        id: ClassroomId,
    ) -> Result<Option<ClassroomWithStats>, ClassroomError> {
        Ok(self.store.classroom_stats(id)?)
    }
}

impl MembershipManager for RosterManager {
    fn join_classroom(
        &self,
        invite_code: &str,
        student_id: UserId,
    ) -> Result<Option<ClassroomMembership>, MembershipError> {
        let Some(classroom) = self.store.get_classroom_by_invite_code(invite_code)? else {
            debug!(student_id = student_id.0, "join rejected: unknown invite code");
            return Ok(None);
        };

        if self.store.membership_exists(classroom.id, student_id)? {
            return Ok(None);
        }

        match self.store.insert_membership(classroom.id, student_id) {
            Ok(membership) => {
                debug!(
                    classroom_id = classroom.id.0,
                    student_id = student_id.0,
                    "student joined classroom"
                );
                Ok(Some(membership))
            }
            // Lost the race to a concurrent join; same outcome as the
            // existence check above
            Err(StoreError::UniqueViolation(_)) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn invite_student(
        &self,
        classroom_id: ClassroomId,
        student_id: UserId,
        educator_id: UserId,
    ) -> Result<Option<ClassroomMembership>, MembershipError> {
        let Some(classroom) = self.store.get_classroom(classroom_id)? else {
            return Ok(None);
        };
        if classroom.educator_id != educator_id {
            debug!(
                classroom_id = classroom_id.0,
                caller = educator_id.0,
                "invite rejected: caller is not the owner"
            );
            return Ok(None);
        }

        if self.store.membership_exists(classroom_id, student_id)? {
            return Ok(None);
        }

        match self.store.insert_membership(classroom_id, student_id) {
            Ok(membership) => {
                debug!(
                    classroom_id = classroom_id.0,
                    student_id = student_id.0,
                    "student invited to classroom"
                );
                Ok(Some(membership))
            }
            Err(StoreError::UniqueViolation(_)) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn leave_classroom(
        &self,
        classroom_id: ClassroomId,
        student_id: UserId,
    ) -> Result<bool, MembershipError> {
        let removed = self.store.delete_membership(classroom_id, student_id)?;
        if removed {
            debug!(
                classroom_id = classroom_id.0,
                student_id = student_id.0,
                "student left classroom"
            );
        }
        Ok(removed)
    }

    fn classroom_members(
        &self,
        classroom_id: ClassroomId,
    ) -> Result<Vec<RosterMember>, MembershipError> {
        Ok(self.store.classroom_members(classroom_id)?)
    }
}
