use thiserror::Error;
use tonic::{Code, Status};

use classhub_core::core_classroom::{ClassroomError, InvalidInput, MembershipError, UserError};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInput),

    #[error("user error: {0}")]
    User(#[from] UserError),

    #[error("classroom error: {0}")]
    Classroom(#[from] ClassroomError),

    #[error("membership error: {0}")]
    Membership(#[from] MembershipError),
}

impl From<ApiError> for Status {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::InvalidInput(e) => Status::new(Code::InvalidArgument, e.to_string()),
            ApiError::User(UserError::EmailTaken) => {
                Status::new(Code::AlreadyExists, UserError::EmailTaken.to_string())
            }
            ApiError::User(UserError::InvalidInput(e)) => {
                Status::new(Code::InvalidArgument, e.to_string())
            }
            ApiError::User(UserError::Store(e)) => Status::new(Code::Internal, e.to_string()),
            ApiError::Classroom(ClassroomError::UnknownEducator) => Status::new(
                Code::FailedPrecondition,
                ClassroomError::UnknownEducator.to_string(),
            ),
            ApiError::Classroom(ClassroomError::InvalidInput(e)) => {
                Status::new(Code::InvalidArgument, e.to_string())
            }
            ApiError::Classroom(e) => Status::new(Code::Internal, e.to_string()),
            ApiError::Membership(MembershipError::Store(e)) => {
                Status::new(Code::Internal, e.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use classhub_core::core_classroom::StoreError;

    #[test]
    fn test_conflict_maps_to_already_exists() {
        let status = Status::from(ApiError::User(UserError::EmailTaken));
        assert_eq!(status.code(), Code::AlreadyExists);
    }

    #[test]
    fn test_invalid_input_maps_to_invalid_argument() {
        let status = Status::from(ApiError::InvalidInput(InvalidInput::new(
            "email",
            "must not be empty",
        )));
        assert_eq!(status.code(), Code::InvalidArgument);
        assert!(status.message().contains("email"));
    }

    #[test]
    fn test_store_failure_maps_to_internal() {
        let err = UserError::Store(StoreError::UniqueViolation("users.email"));
        let status = Status::from(ApiError::User(err));
        assert_eq!(status.code(), Code::Internal);

        let err = MembershipError::Store(StoreError::UniqueViolation(
            "classroom_memberships(classroom_id, student_id)",
        ));
        let status = Status::from(ApiError::Membership(err));
        assert_eq!(status.code(), Code::Internal);
    }

    #[test]
    fn test_unknown_educator_maps_to_failed_precondition() {
        let status = Status::from(ApiError::Classroom(ClassroomError::UnknownEducator));
        assert_eq!(status.code(), Code::FailedPrecondition);
    }
}
