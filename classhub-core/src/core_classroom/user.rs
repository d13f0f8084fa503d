//! User identity records and roles

use super::storage::StoreError;
use super::types::{Timestamp, UserId};
use super::validate::{self, FieldUpdate, InvalidInput};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A user of the platform
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier
    pub id: UserId,

    /// Unique email address
    pub email: String,

    /// Display name
    pub name: String,

    /// Fixed role on the platform
    pub role: UserRole,

    /// When the user was created
    pub created_at: Timestamp,

    /// Last time the record was updated
    pub updated_at: Timestamp,

    /// Overall accuracy percentage (0-100), if any progress was recorded
    pub accuracy_percentage: Option<f64>,

    /// Opaque structured-text blob of recorded mistake patterns
    pub common_mistakes: Option<String>,

    /// Gamification points
    pub points: u32,

    /// Current learning streak in days
    pub streak_days: u32,

    /// Opaque structured-text blob of earned achievements
    pub achievements: Option<String>,
}

/// User roles
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    Student,
    Educator,
    AdultLearner,
    Parent,
}

impl UserRole {
    /// Stable string tag, as stored and as carried on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Student => "student",
            UserRole::Educator => "educator",
            UserRole::AdultLearner => "adult_learner",
            UserRole::Parent => "parent",
        }
    }

    /// Parse a string tag; anything outside the closed set is rejected
    pub fn parse(value: &str) -> Result<Self, InvalidInput> {
        match value {
            "student" => Ok(UserRole::Student),
            "educator" => Ok(UserRole::Educator),
            "adult_learner" => Ok(UserRole::AdultLearner),
            "parent" => Ok(UserRole::Parent),
            other => Err(InvalidInput::new(
                "role",
                format!("unknown role '{}'", other),
            )),
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Input for creating a user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewUser {
    pub email: String,
    pub name: String,
    pub role: UserRole,
}

impl NewUser {
    /// Check the input contract before any store access
    pub fn validate(&self) -> Result<(), InvalidInput> {
        validate::validate_email(&self.email)?;
        validate::validate_name("name", &self.name)?;
        Ok(())
    }
}

/// Partial update for a user; absent fields leave stored values unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserUpdate {
    pub id: UserId,
    pub email: Option<String>,
    pub name: Option<String>,
    pub role: Option<UserRole>,
    pub accuracy_percentage: FieldUpdate<f64>,
    pub common_mistakes: FieldUpdate<String>,
    pub points: Option<u32>,
    pub streak_days: Option<u32>,
    pub achievements: FieldUpdate<String>,
}

impl UserUpdate {
    /// Check the input contract before any store access
    pub fn validate(&self) -> Result<(), InvalidInput> {
        if let Some(email) = &self.email {
            validate::validate_email(email)?;
        }
        if let Some(name) = &self.name {
            validate::validate_name("name", name)?;
        }
        if let Some(value) = self.accuracy_percentage.as_set() {
            validate::validate_accuracy(*value)?;
        }
        Ok(())
    }
}

/// User operation errors
#[derive(Debug, thiserror::Error)]
pub enum UserError {
    #[error("email is already registered")]
    EmailTaken,

    #[error(transparent)]
    InvalidInput(#[from] InvalidInput),

    #[error(transparent)]
    Store(#[from] StoreError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_round_trip() {
        for role in [
            UserRole::Student,
            UserRole::Educator,
            UserRole::AdultLearner,
            UserRole::Parent,
        ] {
            assert_eq!(UserRole::parse(role.as_str()).unwrap(), role);
        }
    }

    #[test]
    fn test_unknown_role_is_rejected() {
        let err = UserRole::parse("principal").unwrap_err();
        assert_eq!(err.field, "role");
    }

    #[test]
    fn test_new_user_validation() {
        let input = NewUser {
            email: "alice@example.com".to_string(),
            name: "Alice".to_string(),
            role: UserRole::Educator,
        };
        assert!(input.validate().is_ok());

        let bad_email = NewUser {
            email: "not-an-email".to_string(),
            ..input.clone()
        };
        assert!(bad_email.validate().is_err());

        let bad_name = NewUser {
            name: "  ".to_string(),
            ..input
        };
        assert!(bad_name.validate().is_err());
    }

    #[test]
    fn test_update_validates_only_present_fields() {
        let update = UserUpdate {
            id: UserId(1),
            ..Default::default()
        };
        assert!(update.validate().is_ok());

        let update = UserUpdate {
            id: UserId(1),
            accuracy_percentage: FieldUpdate::Set(120.0),
            ..Default::default()
        };
        assert!(update.validate().is_err());

        let update = UserUpdate {
            id: UserId(1),
            accuracy_percentage: FieldUpdate::Clear,
            ..Default::default()
        };
        assert!(update.validate().is_ok());
    }
}
