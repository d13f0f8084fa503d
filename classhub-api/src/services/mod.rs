mod classroom_service;
mod health_service;
mod membership_service;
mod user_service;

pub use classroom_service::ClassroomServiceImpl;
pub use health_service::HealthServiceImpl;
pub use membership_service::MembershipServiceImpl;
pub use user_service::UserServiceImpl;

use classhub_core::core_classroom::{ClassroomVisibility, FieldUpdate, InvalidInput, UserRole};
use tonic::Status;

use crate::error::ApiError;
use crate::proto;

/// Run store-backed work off the async runtime threads
pub(crate) async fn run_blocking<T, E, F>(f: F) -> Result<T, Status>
where
    F: FnOnce() -> Result<T, E> + Send + 'static,
    T: Send + 'static,
    E: Into<ApiError> + Send + 'static,
{
    match tokio::task::spawn_blocking(f).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(e)) => {
            let err: ApiError = e.into();
            Err(err.into())
        }
        Err(e) => Err(Status::internal(format!("task join error: {}", e))),
    }
}

// ===== Enum conversions =====

pub(crate) fn role_to_proto(role: UserRole) -> proto::UserRole {
    match role {
        UserRole::Student => proto::UserRole::Student,
        UserRole::Educator => proto::UserRole::Educator,
        UserRole::AdultLearner => proto::UserRole::AdultLearner,
        UserRole::Parent => proto::UserRole::Parent,
    }
}

pub(crate) fn role_from_proto(value: i32) -> Result<UserRole, ApiError> {
    match proto::UserRole::try_from(value) {
        Ok(proto::UserRole::Student) => Ok(UserRole::Student),
        Ok(proto::UserRole::Educator) => Ok(UserRole::Educator),
        Ok(proto::UserRole::AdultLearner) => Ok(UserRole::AdultLearner),
        Ok(proto::UserRole::Parent) => Ok(UserRole::Parent),
        Ok(proto::UserRole::Unspecified) | Err(_) => Err(InvalidInput::new(
            "role",
            "must be one of student, educator, adult_learner, parent",
        )
        .into()),
    }
}

pub(crate) fn visibility_to_proto(visibility: ClassroomVisibility) -> proto::ClassroomVisibility {
    match visibility {
        ClassroomVisibility::Private => proto::ClassroomVisibility::Private,
        ClassroomVisibility::Public => proto::ClassroomVisibility::Public,
    }
}

pub(crate) fn visibility_from_proto(value: i32) -> Result<ClassroomVisibility, ApiError> {
    match proto::ClassroomVisibility::try_from(value) {
        Ok(proto::ClassroomVisibility::Private) => Ok(ClassroomVisibility::Private),
        Ok(proto::ClassroomVisibility::Public) => Ok(ClassroomVisibility::Public),
        Ok(proto::ClassroomVisibility::Unspecified) | Err(_) => {
            Err(InvalidInput::new("visibility", "must be one of private, public").into())
        }
    }
}

/// Build a tri-state patch field from an optional value and its clear flag
pub(crate) fn field_update<T>(clear: bool, value: Option<T>) -> FieldUpdate<T> {
    if clear {
        FieldUpdate::Clear
    } else {
        match value {
            Some(v) => FieldUpdate::Set(v),
            None => FieldUpdate::Keep,
        }
    }
}

/// Convert a wire count to a non-negative domain integer
pub(crate) fn non_negative(field: &'static str, value: i64) -> Result<u32, ApiError> {
    u32::try_from(value)
        .map_err(|_| InvalidInput::new(field, "must be a non-negative integer").into())
}
