//! SQL-based storage for users, classrooms, and memberships

use super::super::classroom::{
    Classroom, ClassroomUpdate, ClassroomVisibility, ClassroomWithStats, NewClassroom,
};
use super::super::membership::{ClassroomMembership, RosterMember};
use super::super::types::{ClassroomId, MembershipId, Timestamp, UserId};
use super::super::user::{NewUser, User, UserRole, UserUpdate};
use super::StoreError;
use r2d2::Pool;
use r2d2_sqlite::SqliteConnectionManager;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;

/// SQL-based store, shared across request handlers through its inner pool
pub struct ClassroomSqlStore {
    pool: Pool<SqliteConnectionManager>,
}

impl ClassroomSqlStore {
    /// Create a store over the given connection pool, running pending
    /// migrations first
    pub fn new(pool: Pool<SqliteConnectionManager>) -> Result<Self, StoreError> {
        super::migrations::migrate(&pool)?;
        Ok(Self { pool })
    }

    /// Open (or create) a file-backed store at `path`
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let manager = SqliteConnectionManager::file(path).with_init(Self::init_connection);
        let pool = Pool::new(manager)?;
        Self::new(pool)
    }

    /// Create a new in-memory store.
    ///
    /// Each SQLite `:memory:` connection is its own database, so the pool is
    /// capped at a single connection.
    pub fn memory() -> Result<Self, StoreError> {
        let manager = SqliteConnectionManager::memory().with_init(Self::init_connection);
        let pool = Pool::builder().max_size(1).build(manager)?;
        Self::new(pool)
    }

    fn init_connection(conn: &mut Connection) -> Result<(), rusqlite::Error> {
        conn.execute_batch(
            "PRAGMA foreign_keys = ON;
             PRAGMA busy_timeout = 5000;",
        )
    }

    // ===== User operations =====

    /// Insert a new user; progress fields start at their defaults
    pub fn insert_user(&self, new: &NewUser) -> Result<User, StoreError> {
        let conn = self.pool.get()?;
        let now = Timestamp::now();

        conn.execute(
            "INSERT INTO users (email, name, role, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?)",
            params![
                &new.email,
                &new.name,
                new.role.as_str(),
                now.as_millis() as i64,
                now.as_millis() as i64,
            ],
        )
        .map_err(|e| classify("users.email", e))?;

        Ok(User {
            id: UserId(conn.last_insert_rowid()),
            email: new.email.clone(),
            name: new.name.clone(),
            role: new.role,
            created_at: now,
            updated_at: now,
            accuracy_percentage: None,
            common_mistakes: None,
            points: 0,
            streak_days: 0,
            achievements: None,
        })
    }

    /// Get a user by id
    pub fn get_user(&self, id: UserId) -> Result<Option<User>, StoreError> {
        let conn = self.pool.get()?;
        query_user(&conn, id)
    }

    /// List all users
    pub fn list_users(&self) -> Result<Vec<User>, StoreError> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(
            "SELECT id, email, name, role, created_at, updated_at,
                    accuracy_percentage, common_mistakes, points, streak_days, achievements
             FROM users ORDER BY id",
        )?;

        let users = stmt
            .query_map([], user_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(users)
    }

    /// Apply a partial update to a user, refreshing `updated_at`.
    ///
    /// Returns `None` if no user has the given id.
    pub fn update_user(&self, update: &UserUpdate) -> Result<Option<User>, StoreError> {
        let conn = self.pool.get()?;
        let tx = conn.unchecked_transaction()?;

        let Some(mut user) = query_user(&tx, update.id)? else {
            return Ok(None);
        };

        if let Some(email) = &update.email {
            user.email = email.clone();
        }
        if let Some(name) = &update.name {
            user.name = name.clone();
        }
        if let Some(role) = update.role {
            user.role = role;
        }
        user.accuracy_percentage = update
            .accuracy_percentage
            .clone()
            .apply(user.accuracy_percentage);
        user.common_mistakes = update.common_mistakes.clone().apply(user.common_mistakes);
        if let Some(points) = update.points {
            user.points = points;
        }
        if let Some(streak_days) = update.streak_days {
            user.streak_days = streak_days;
        }
        user.achievements = update.achievements.clone().apply(user.achievements);
        user.updated_at = Timestamp::now();

        tx.execute(
            "UPDATE users
             SET email = ?, name = ?, role = ?, accuracy_percentage = ?, common_mistakes = ?,
                 points = ?, streak_days = ?, achievements = ?, updated_at = ?
             WHERE id = ?",
            params![
                &user.email,
                &user.name,
                user.role.as_str(),
                user.accuracy_percentage,
                &user.common_mistakes,
                user.points as i64,
                user.streak_days as i64,
                &user.achievements,
                user.updated_at.as_millis() as i64,
                user.id.0,
            ],
        )
        .map_err(|e| classify("users.email", e))?;

        tx.commit()?;

        Ok(Some(user))
    }

    // ===== Classroom operations =====

    /// Insert a new classroom with the given invite code
    pub fn insert_classroom(
        &self,
        new: &NewClassroom,
        invite_code: &str,
    ) -> Result<Classroom, StoreError> {
        let conn = self.pool.get()?;
        let now = Timestamp::now();

        conn.execute(
            "INSERT INTO classrooms (name, description, educator_id, visibility, invite_code, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
            params![
                &new.name,
                &new.description,
                new.educator_id.0,
                new.visibility.as_str(),
                invite_code,
                now.as_millis() as i64,
                now.as_millis() as i64,
            ],
        )
        .map_err(|e| classify("classrooms.invite_code", e))?;

        Ok(Classroom {
            id: ClassroomId(conn.last_insert_rowid()),
            name: new.name.clone(),
            description: new.description.clone(),
            educator_id: new.educator_id,
            visibility: new.visibility,
            invite_code: invite_code.to_string(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Get a classroom by id
    pub fn get_classroom(&self, id: ClassroomId) -> Result<Option<Classroom>, StoreError> {
        let conn = self.pool.get()?;
        query_classroom(&conn, id)
    }

    /// Resolve an invite code to its classroom
    pub fn get_classroom_by_invite_code(
        &self,
        invite_code: &str,
    ) -> Result<Option<Classroom>, StoreError> {
        let conn = self.pool.get()?;

        let classroom = conn
            .query_row(
                "SELECT id, name, description, educator_id, visibility, invite_code, created_at, updated_at
                 FROM classrooms WHERE invite_code = ?",
                params![invite_code],
                classroom_from_row,
            )
            .optional()?;

        Ok(classroom)
    }

    /// List classrooms owned by an educator
    pub fn classrooms_by_educator(&self, educator_id: UserId) -> Result<Vec<Classroom>, StoreError> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(
            "SELECT id, name, description, educator_id, visibility, invite_code, created_at, updated_at
             FROM classrooms WHERE educator_id = ? ORDER BY id",
        )?;

        let classrooms = stmt
            .query_map(params![educator_id.0], classroom_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(classrooms)
    }

    /// List classrooms a student holds a membership in, oldest join first
    pub fn classrooms_by_student(&self, student_id: UserId) -> Result<Vec<Classroom>, StoreError> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(
            "SELECT c.id, c.name, c.description, c.educator_id, c.visibility, c.invite_code, c.created_at, c.updated_at
             FROM classroom_memberships m
             JOIN classrooms c ON c.id = m.classroom_id
             WHERE m.student_id = ?
             ORDER BY m.joined_at, m.id",
        )?;

        let classrooms = stmt
            .query_map(params![student_id.0], classroom_from_row)?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(classrooms)
    }

    /// Apply a partial update to a classroom, refreshing `updated_at`.
    ///
    /// Returns `None` if no classroom has the given id. Ownership is checked
    /// by the manager before this is called.
    pub fn update_classroom(
        &self,
        update: &ClassroomUpdate,
    ) -> Result<Option<Classroom>, StoreError> {
        let conn = self.pool.get()?;
        let tx = conn.unchecked_transaction()?;

        let Some(mut classroom) = query_classroom(&tx, update.id)? else {
            return Ok(None);
        };

        if let Some(name) = &update.name {
            classroom.name = name.clone();
        }
        classroom.description = update.description.clone().apply(classroom.description);
        if let Some(visibility) = update.visibility {
            classroom.visibility = visibility;
        }
        classroom.updated_at = Timestamp::now();

        tx.execute(
            "UPDATE classrooms SET name = ?, description = ?, visibility = ?, updated_at = ?
             WHERE id = ?",
            params![
                &classroom.name,
                &classroom.description,
                classroom.visibility.as_str(),
                classroom.updated_at.as_millis() as i64,
                classroom.id.0,
            ],
        )?;

        tx.commit()?;

        Ok(Some(classroom))
    }

    /// Get a classroom together with its computed roster statistics
    pub fn classroom_stats(
        &self,
        id: ClassroomId,
    ) -> Result<Option<ClassroomWithStats>, StoreError> {
        let conn = self.pool.get()?;

        let stats = conn
            .query_row(
                "SELECT c.id, c.name, c.description, c.educator_id, c.visibility, c.invite_code, c.created_at, c.updated_at,
                        (SELECT COUNT(*) FROM classroom_memberships m WHERE m.classroom_id = c.id),
                        u.name
                 FROM classrooms c
                 JOIN users u ON u.id = c.educator_id
                 WHERE c.id = ?",
                params![id.0],
                |row| {
                    Ok(ClassroomWithStats {
                        classroom: classroom_from_row(row)?,
                        member_count: row.get::<_, i64>(8)?.max(0) as u64,
                        educator_name: row.get(9)?,
                    })
                },
            )
            .optional()?;

        Ok(stats)
    }

    // ===== Membership operations =====

    /// Insert a membership for the (classroom, student) pair.
    ///
    /// A duplicate pair surfaces as `StoreError::UniqueViolation`; under
    /// concurrent joins exactly one insert wins.
    pub fn insert_membership(
        &self,
        classroom_id: ClassroomId,
        student_id: UserId,
    ) -> Result<ClassroomMembership, StoreError> {
        let conn = self.pool.get()?;
        let joined_at = Timestamp::now();

        conn.execute(
            "INSERT INTO classroom_memberships (classroom_id, student_id, joined_at)
             VALUES (?, ?, ?)",
            params![classroom_id.0, student_id.0, joined_at.as_millis() as i64],
        )
        .map_err(|e| classify("classroom_memberships(classroom_id, student_id)", e))?;

        Ok(ClassroomMembership {
            id: MembershipId(conn.last_insert_rowid()),
            classroom_id,
            student_id,
            joined_at,
        })
    }

    /// Check whether a membership exists for the pair
    pub fn membership_exists(
        &self,
        classroom_id: ClassroomId,
        student_id: UserId,
    ) -> Result<bool, StoreError> {
        let conn = self.pool.get()?;

        let found = conn
            .query_row(
                "SELECT 1 FROM classroom_memberships WHERE classroom_id = ? AND student_id = ?",
                params![classroom_id.0, student_id.0],
                |_| Ok(()),
            )
            .optional()?;

        Ok(found.is_some())
    }

    /// Delete the membership for the pair; returns whether a row was removed
    pub fn delete_membership(
        &self,
        classroom_id: ClassroomId,
        student_id: UserId,
    ) -> Result<bool, StoreError> {
        let conn = self.pool.get()?;

        let rows = conn.execute(
            "DELETE FROM classroom_memberships WHERE classroom_id = ? AND student_id = ?",
            params![classroom_id.0, student_id.0],
        )?;

        Ok(rows > 0)
    }

    /// List the roster of a classroom as restricted member projections,
    /// ordered by join time
    pub fn classroom_members(
        &self,
        classroom_id: ClassroomId,
    ) -> Result<Vec<RosterMember>, StoreError> {
        let conn = self.pool.get()?;

        let mut stmt = conn.prepare(
            "SELECT u.id, u.name, u.email, u.role
             FROM classroom_memberships m
             JOIN users u ON u.id = m.student_id
             WHERE m.classroom_id = ?
             ORDER BY m.joined_at, m.id",
        )?;

        let members = stmt
            .query_map(params![classroom_id.0], |row| {
                let role_str: String = row.get(3)?;
                let role = parse_role(3, &role_str)?;
                Ok(RosterMember {
                    id: UserId(row.get(0)?),
                    name: row.get(1)?,
                    email: row.get(2)?,
                    role,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;

        Ok(members)
    }
}

// ===== Row mapping =====

fn query_user(conn: &Connection, id: UserId) -> Result<Option<User>, StoreError> {
    let user = conn
        .query_row(
            "SELECT id, email, name, role, created_at, updated_at,
                    accuracy_percentage, common_mistakes, points, streak_days, achievements
             FROM users WHERE id = ?",
            params![id.0],
            user_from_row,
        )
        .optional()?;

    Ok(user)
}

fn query_classroom(conn: &Connection, id: ClassroomId) -> Result<Option<Classroom>, StoreError> {
    let classroom = conn
        .query_row(
            "SELECT id, name, description, educator_id, visibility, invite_code, created_at, updated_at
             FROM classrooms WHERE id = ?",
            params![id.0],
            classroom_from_row,
        )
        .optional()?;

    Ok(classroom)
}

fn user_from_row(row: &Row) -> rusqlite::Result<User> {
    let role_str: String = row.get(3)?;
    let role = parse_role(3, &role_str)?;

    Ok(User {
        id: UserId(row.get(0)?),
        email: row.get(1)?,
        name: row.get(2)?,
        role,
        created_at: Timestamp::from_millis(row.get::<_, i64>(4)?.max(0) as u64),
        updated_at: Timestamp::from_millis(row.get::<_, i64>(5)?.max(0) as u64),
        accuracy_percentage: row.get(6)?,
        common_mistakes: row.get(7)?,
        points: row.get::<_, i64>(8)?.max(0) as u32,
        streak_days: row.get::<_, i64>(9)?.max(0) as u32,
        achievements: row.get(10)?,
    })
}

fn classroom_from_row(row: &Row) -> rusqlite::Result<Classroom> {
    let visibility_str: String = row.get(4)?;
    let visibility = ClassroomVisibility::parse(&visibility_str).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(4, rusqlite::types::Type::Text, Box::new(e))
    })?;

    Ok(Classroom {
        id: ClassroomId(row.get(0)?),
        name: row.get(1)?,
        description: row.get(2)?,
        educator_id: UserId(row.get(3)?),
        visibility,
        invite_code: row.get(5)?,
        created_at: Timestamp::from_millis(row.get::<_, i64>(6)?.max(0) as u64),
        updated_at: Timestamp::from_millis(row.get::<_, i64>(7)?.max(0) as u64),
    })
}

fn parse_role(column: usize, value: &str) -> rusqlite::Result<UserRole> {
    UserRole::parse(value).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(column, rusqlite::types::Type::Text, Box::new(e))
    })
}

/// Classify constraint violations so callers can react to them; `context`
/// names the constraint most likely at fault
fn classify(context: &'static str, err: rusqlite::Error) -> StoreError {
    if let rusqlite::Error::SqliteFailure(e, _) = &err {
        match e.extended_code {
            rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE | rusqlite::ffi::SQLITE_CONSTRAINT_PRIMARYKEY => {
                return StoreError::UniqueViolation(context);
            }
            rusqlite::ffi::SQLITE_CONSTRAINT_FOREIGNKEY => {
                return StoreError::ForeignKeyViolation(context);
            }
            _ => {}
        }
    }
    StoreError::Sqlite(err)
}

#[cfg(test)]
mod tests {
    use super::super::super::user::UserUpdate;
    use super::super::super::validate::FieldUpdate;
    use super::*;

    fn store() -> ClassroomSqlStore {
        ClassroomSqlStore::memory().unwrap()
    }

    fn new_user(email: &str, role: UserRole) -> NewUser {
        NewUser {
            email: email.to_string(),
            name: email.split('@').next().unwrap().to_string(),
            role,
        }
    }

    fn new_classroom(educator_id: UserId) -> NewClassroom {
        NewClassroom {
            name: "Algebra".to_string(),
            description: Some("Intro algebra".to_string()),
            educator_id,
            visibility: ClassroomVisibility::Private,
        }
    }

    #[test]
    fn test_insert_and_get_user() {
        let store = store();
        let user = store
            .insert_user(&new_user("alice@example.com", UserRole::Student))
            .unwrap();

        assert_eq!(user.points, 0);
        assert_eq!(user.streak_days, 0);
        assert_eq!(user.accuracy_percentage, None);
        assert_eq!(user.created_at, user.updated_at);

        let retrieved = store.get_user(user.id).unwrap().unwrap();
        assert_eq!(retrieved, user);
    }

    #[test]
    fn test_get_missing_user_is_none() {
        let store = store();
        assert!(store.get_user(UserId(999)).unwrap().is_none());
    }

    #[test]
    fn test_duplicate_email_is_unique_violation() {
        let store = store();
        store
            .insert_user(&new_user("alice@example.com", UserRole::Student))
            .unwrap();

        let err = store
            .insert_user(&new_user("alice@example.com", UserRole::Educator))
            .unwrap_err();
        assert!(matches!(err, StoreError::UniqueViolation(_)));

        // The first user is unaffected
        assert_eq!(store.list_users().unwrap().len(), 1);
    }

    #[test]
    fn test_update_user_changes_only_provided_fields() {
        let store = store();
        let user = store
            .insert_user(&new_user("alice@example.com", UserRole::Student))
            .unwrap();

        let updated = store
            .update_user(&UserUpdate {
                id: user.id,
                name: Some("Alice Cooper".to_string()),
                ..Default::default()
            })
            .unwrap()
            .unwrap();

        assert_eq!(updated.name, "Alice Cooper");
        assert_eq!(updated.email, user.email);
        assert_eq!(updated.role, user.role);
        assert_eq!(updated.points, user.points);
        assert_eq!(updated.created_at, user.created_at);
        assert!(updated.updated_at >= user.updated_at);
    }

    #[test]
    fn test_update_user_clears_nullable_fields() {
        let store = store();
        let user = store
            .insert_user(&new_user("alice@example.com", UserRole::Student))
            .unwrap();

        let updated = store
            .update_user(&UserUpdate {
                id: user.id,
                accuracy_percentage: FieldUpdate::Set(87.5),
                achievements: FieldUpdate::Set("[\"first-quiz\"]".to_string()),
                ..Default::default()
            })
            .unwrap()
            .unwrap();
        assert_eq!(updated.accuracy_percentage, Some(87.5));

        let cleared = store
            .update_user(&UserUpdate {
                id: user.id,
                accuracy_percentage: FieldUpdate::Clear,
                ..Default::default()
            })
            .unwrap()
            .unwrap();
        assert_eq!(cleared.accuracy_percentage, None);
        // Untouched nullable field keeps its value
        assert_eq!(cleared.achievements, Some("[\"first-quiz\"]".to_string()));
    }

    #[test]
    fn test_update_missing_user_is_none() {
        let store = store();
        let result = store
            .update_user(&UserUpdate {
                id: UserId(42),
                name: Some("Nobody".to_string()),
                ..Default::default()
            })
            .unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_update_user_email_collision() {
        let store = store();
        store
            .insert_user(&new_user("alice@example.com", UserRole::Student))
            .unwrap();
        let bob = store
            .insert_user(&new_user("bob@example.com", UserRole::Student))
            .unwrap();

        let err = store
            .update_user(&UserUpdate {
                id: bob.id,
                email: Some("alice@example.com".to_string()),
                ..Default::default()
            })
            .unwrap_err();
        assert!(matches!(err, StoreError::UniqueViolation(_)));
    }

    #[test]
    fn test_insert_and_get_classroom() {
        let store = store();
        let educator = store
            .insert_user(&new_user("edu@example.com", UserRole::Educator))
            .unwrap();

        let classroom = store
            .insert_classroom(&new_classroom(educator.id), "ABC123XY")
            .unwrap();

        let retrieved = store.get_classroom(classroom.id).unwrap().unwrap();
        assert_eq!(retrieved, classroom);

        let by_code = store
            .get_classroom_by_invite_code("ABC123XY")
            .unwrap()
            .unwrap();
        assert_eq!(by_code.id, classroom.id);

        assert!(store
            .get_classroom_by_invite_code("NOPE0000")
            .unwrap()
            .is_none());
    }

    #[test]
    fn test_insert_classroom_unknown_educator() {
        let store = store();
        let err = store
            .insert_classroom(&new_classroom(UserId(123)), "ABC123XY")
            .unwrap_err();
        assert!(matches!(err, StoreError::ForeignKeyViolation(_)));
    }

    #[test]
    fn test_duplicate_invite_code_is_unique_violation() {
        let store = store();
        let educator = store
            .insert_user(&new_user("edu@example.com", UserRole::Educator))
            .unwrap();

        store
            .insert_classroom(&new_classroom(educator.id), "SAMECODE")
            .unwrap();
        let err = store
            .insert_classroom(&new_classroom(educator.id), "SAMECODE")
            .unwrap_err();
        assert!(matches!(err, StoreError::UniqueViolation(_)));
    }

    #[test]
    fn test_membership_insert_duplicate_and_delete() {
        let store = store();
        let educator = store
            .insert_user(&new_user("edu@example.com", UserRole::Educator))
            .unwrap();
        let student = store
            .insert_user(&new_user("stu@example.com", UserRole::Student))
            .unwrap();
        let classroom = store
            .insert_classroom(&new_classroom(educator.id), "ABC123XY")
            .unwrap();

        let membership = store.insert_membership(classroom.id, student.id).unwrap();
        assert_eq!(membership.classroom_id, classroom.id);
        assert_eq!(membership.student_id, student.id);
        assert!(store.membership_exists(classroom.id, student.id).unwrap());

        let err = store
            .insert_membership(classroom.id, student.id)
            .unwrap_err();
        assert!(matches!(err, StoreError::UniqueViolation(_)));

        assert!(store.delete_membership(classroom.id, student.id).unwrap());
        assert!(!store.membership_exists(classroom.id, student.id).unwrap());
        // Deleting again is a no-op
        assert!(!store.delete_membership(classroom.id, student.id).unwrap());
    }

    #[test]
    fn test_roster_is_ordered_by_join_time() {
        let store = store();
        let educator = store
            .insert_user(&new_user("edu@example.com", UserRole::Educator))
            .unwrap();
        let classroom = store
            .insert_classroom(&new_classroom(educator.id), "ABC123XY")
            .unwrap();

        let first = store
            .insert_user(&new_user("first@example.com", UserRole::Student))
            .unwrap();
        let second = store
            .insert_user(&new_user("second@example.com", UserRole::Student))
            .unwrap();

        store.insert_membership(classroom.id, first.id).unwrap();
        store.insert_membership(classroom.id, second.id).unwrap();

        let roster = store.classroom_members(classroom.id).unwrap();
        assert_eq!(roster.len(), 2);
        assert_eq!(roster[0].id, first.id);
        assert_eq!(roster[1].id, second.id);
        assert_eq!(roster[0].email, "first@example.com");
        assert_eq!(roster[0].role, UserRole::Student);
    }

    #[test]
    fn test_classrooms_by_educator_and_student() {
        let store = store();
        let educator = store
            .insert_user(&new_user("edu@example.com", UserRole::Educator))
            .unwrap();
        let other = store
            .insert_user(&new_user("other@example.com", UserRole::Educator))
            .unwrap();
        let student = store
            .insert_user(&new_user("stu@example.com", UserRole::Student))
            .unwrap();

        let owned = store
            .insert_classroom(&new_classroom(educator.id), "CODE0001")
            .unwrap();
        let foreign = store
            .insert_classroom(&new_classroom(other.id), "CODE0002")
            .unwrap();

        let by_educator = store.classrooms_by_educator(educator.id).unwrap();
        assert_eq!(by_educator.len(), 1);
        assert_eq!(by_educator[0].id, owned.id);

        store.insert_membership(foreign.id, student.id).unwrap();
        let by_student = store.classrooms_by_student(student.id).unwrap();
        assert_eq!(by_student.len(), 1);
        assert_eq!(by_student[0].id, foreign.id);
    }

    #[test]
    fn test_update_classroom_fields() {
        let store = store();
        let educator = store
            .insert_user(&new_user("edu@example.com", UserRole::Educator))
            .unwrap();
        let classroom = store
            .insert_classroom(&new_classroom(educator.id), "ABC123XY")
            .unwrap();

        let updated = store
            .update_classroom(&ClassroomUpdate {
                id: classroom.id,
                name: Some("Geometry".to_string()),
                description: FieldUpdate::Clear,
                visibility: Some(ClassroomVisibility::Public),
            })
            .unwrap()
            .unwrap();

        assert_eq!(updated.name, "Geometry");
        assert_eq!(updated.description, None);
        assert_eq!(updated.visibility, ClassroomVisibility::Public);
        // The invite code is stable across updates
        assert_eq!(updated.invite_code, classroom.invite_code);
    }

    #[test]
    fn test_classroom_stats() {
        let store = store();
        let educator = store
            .insert_user(&new_user("edu@example.com", UserRole::Educator))
            .unwrap();
        let classroom = store
            .insert_classroom(&new_classroom(educator.id), "ABC123XY")
            .unwrap();

        let stats = store.classroom_stats(classroom.id).unwrap().unwrap();
        assert_eq!(stats.member_count, 0);
        assert_eq!(stats.educator_name, educator.name);

        let student = store
            .insert_user(&new_user("stu@example.com", UserRole::Student))
            .unwrap();
        store.insert_membership(classroom.id, student.id).unwrap();

        let stats = store.classroom_stats(classroom.id).unwrap().unwrap();
        assert_eq!(stats.member_count, 1);

        assert!(store.classroom_stats(ClassroomId(999)).unwrap().is_none());
    }
}
