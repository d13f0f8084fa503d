use std::sync::Arc;
use tonic::{Request, Response, Status};

use classhub_core::core_classroom::{
    ClassroomId, ClassroomMembership, MembershipManager, RosterManager, UserId,
};

use crate::proto;
use crate::services::{role_to_proto, run_blocking};

pub struct MembershipServiceImpl {
    roster: Arc<RosterManager>,
}

impl MembershipServiceImpl {
    pub fn new(roster: Arc<RosterManager>) -> Self {
        Self { roster }
    }
}

fn membership_to_proto(membership: ClassroomMembership) -> proto::ClassroomMembership {
    proto::ClassroomMembership {
        id: membership.id.0,
        classroom_id: membership.classroom_id.0,
        student_id: membership.student_id.0,
        joined_at: membership.joined_at.as_millis() as i64,
    }
}

#[tonic::async_trait]
impl proto::membership_service_server::MembershipService for MembershipServiceImpl {
    async fn join_classroom(
        &self,
        request: Request<proto::JoinClassroomRequest>,
    ) -> Result<Response<proto::MembershipResponse>, Status> {
        let req = request.into_inner();

        let roster = self.roster.clone();
        let membership = run_blocking(move || {
            roster.join_classroom(&req.invite_code, UserId(req.student_id))
        })
        .await?;

        Ok(Response::new(proto::MembershipResponse {
            membership: membership.map(membership_to_proto),
        }))
    }

    async fn invite_student(
        &self,
        request: Request<proto::InviteStudentRequest>,
    ) -> Result<Response<proto::MembershipResponse>, Status> {
        let req = request.into_inner();

        let roster = self.roster.clone();
        let membership = run_blocking(move || {
            roster.invite_student(
                ClassroomId(req.classroom_id),
                UserId(req.student_id),
                UserId(req.educator_id),
            )
        })
        .await?;

        Ok(Response::new(proto::MembershipResponse {
            membership: membership.map(membership_to_proto),
        }))
    }

    async fn get_classroom_members(
        &self,
        request: Request<proto::GetClassroomMembersRequest>,
    ) -> Result<Response<proto::GetClassroomMembersResponse>, Status> {
        let req = request.into_inner();

        let roster = self.roster.clone();
        let members =
            run_blocking(move || roster.classroom_members(ClassroomId(req.classroom_id))).await?;

        Ok(Response::new(proto::GetClassroomMembersResponse {
            members: members
                .into_iter()
                .map(|member| proto::RosterMember {
                    id: member.id.0,
                    name: member.name,
                    email: member.email,
                    role: role_to_proto(member.role) as i32,
                })
                .collect(),
        }))
    }

    async fn leave_classroom(
        &self,
        request: Request<proto::LeaveClassroomRequest>,
    ) -> Result<Response<proto::LeaveClassroomResponse>, Status> {
        let req = request.into_inner();

        let roster = self.roster.clone();
        let removed = run_blocking(move || {
            roster.leave_classroom(ClassroomId(req.classroom_id), UserId(req.student_id))
        })
        .await?;

        Ok(Response::new(proto::LeaveClassroomResponse { removed }))
    }
}
