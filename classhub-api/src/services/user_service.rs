use std::sync::Arc;
use tonic::{Request, Response, Status};

use classhub_core::core_classroom::{NewUser, RosterManager, User, UserId, UserManager, UserUpdate};

use crate::proto;
use crate::services::{field_update, non_negative, role_from_proto, role_to_proto, run_blocking};

pub struct UserServiceImpl {
    roster: Arc<RosterManager>,
}

impl UserServiceImpl {
    pub fn new(roster: Arc<RosterManager>) -> Self {
        Self { roster }
    }
}

fn user_to_proto(user: User) -> proto::User {
    proto::User {
        id: user.id.0,
        email: user.email,
        name: user.name,
        role: role_to_proto(user.role) as i32,
        created_at: user.created_at.as_millis() as i64,
        updated_at: user.updated_at.as_millis() as i64,
        accuracy_percentage: user.accuracy_percentage,
        common_mistakes: user.common_mistakes,
        points: user.points as i64,
        streak_days: user.streak_days as i64,
        achievements: user.achievements,
    }
}

#[tonic::async_trait]
impl proto::user_service_server::UserService for UserServiceImpl {
    async fn create_user(
        &self,
        request: Request<proto::CreateUserRequest>,
    ) -> Result<Response<proto::User>, Status> {
        let req = request.into_inner();

        let new = NewUser {
            email: req.email,
            name: req.name,
            role: role_from_proto(req.role)?,
        };

        let roster = self.roster.clone();
        let user = run_blocking(move || roster.create_user(new)).await?;

        Ok(Response::new(user_to_proto(user)))
    }

    async fn get_user(
        &self,
        request: Request<proto::GetUserRequest>,
    ) -> Result<Response<proto::GetUserResponse>, Status> {
        let req = request.into_inner();

        let roster = self.roster.clone();
        let user = run_blocking(move || roster.get_user(UserId(req.id))).await?;

        Ok(Response::new(proto::GetUserResponse {
            user: user.map(user_to_proto),
        }))
    }

    async fn get_users(
        &self,
        _request: Request<proto::GetUsersRequest>,
    ) -> Result<Response<proto::GetUsersResponse>, Status> {
        let roster = self.roster.clone();
        let users = run_blocking(move || roster.list_users()).await?;

        Ok(Response::new(proto::GetUsersResponse {
            users: users.into_iter().map(user_to_proto).collect(),
        }))
    }

    async fn update_user(
        &self,
        request: Request<proto::UpdateUserRequest>,
    ) -> Result<Response<proto::UpdateUserResponse>, Status> {
        let req = request.into_inner();

        let role = match req.role {
            Some(value) => Some(role_from_proto(value)?),
            None => None,
        };
        let points = match req.points {
            Some(value) => Some(non_negative("points", value)?),
            None => None,
        };
        let streak_days = match req.streak_days {
            Some(value) => Some(non_negative("streak_days", value)?),
            None => None,
        };

        let update = UserUpdate {
            id: UserId(req.id),
            email: req.email,
            name: req.name,
            role,
            accuracy_percentage: field_update(
                req.clear_accuracy_percentage,
                req.accuracy_percentage,
            ),
            common_mistakes: field_update(req.clear_common_mistakes, req.common_mistakes),
            points,
            streak_days,
            achievements: field_update(req.clear_achievements, req.achievements),
        };

        let roster = self.roster.clone();
        let user = run_blocking(move || roster.update_user(update)).await?;

        Ok(Response::new(proto::UpdateUserResponse {
            user: user.map(user_to_proto),
        }))
    }
}
