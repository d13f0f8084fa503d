use std::sync::Arc;
use tonic::{Request, Response, Status};

use classhub_core::core_classroom::{
    Classroom, ClassroomId, ClassroomManager, ClassroomUpdate, ClassroomWithStats, NewClassroom,
    RosterManager, UserId,
};

use crate::proto;
use crate::services::{
    field_update, run_blocking, visibility_from_proto, visibility_to_proto,
};

pub struct ClassroomServiceImpl {
    roster: Arc<RosterManager>,
}

impl ClassroomServiceImpl {
    pub fn new(roster: Arc<RosterManager>) -> Self {
        Self { roster }
    }
}

fn classroom_to_proto(classroom: Classroom) -> proto::Classroom {
    proto::Classroom {
        id: classroom.id.0,
        name: classroom.name,
        description: classroom.description,
        educator_id: classroom.educator_id.0,
        visibility: visibility_to_proto(classroom.visibility) as i32,
        invite_code: classroom.invite_code,
        created_at: classroom.created_at.as_millis() as i64,
        updated_at: classroom.updated_at.as_millis() as i64,
    }
}

fn stats_to_proto(stats: ClassroomWithStats) -> proto::ClassroomStats {
    proto::ClassroomStats {
        classroom: Some(classroom_to_proto(stats.classroom)),
        member_count: stats.member_count as i64,
        educator_name: stats.educator_name,
    }
}

#[tonic::async_trait]
impl proto::classroom_service_server::ClassroomService for ClassroomServiceImpl {
    async fn create_classroom(
        &self,
        request: Request<proto::CreateClassroomRequest>,
    ) -> Result<Response<proto::Classroom>, Status> {
        let req = request.into_inner();

        let new = NewClassroom {
            name: req.name,
            description: req.description,
            educator_id: UserId(req.educator_id),
            visibility: visibility_from_proto(req.visibility)?,
        };

        let roster = self.roster.clone();
        let classroom = run_blocking(move || roster.create_classroom(new)).await?;

        Ok(Response::new(classroom_to_proto(classroom)))
    }

    async fn get_classroom(
        &self,
        request: Request<proto::GetClassroomRequest>,
    ) -> Result<Response<proto::GetClassroomResponse>, Status> {
        let req = request.into_inner();

        let roster = self.roster.clone();
        let classroom = run_blocking(move || roster.get_classroom(ClassroomId(req.id))).await?;

        Ok(Response::new(proto::GetClassroomResponse {
            classroom: classroom.map(classroom_to_proto),
        }))
    }

    async fn get_classrooms_by_educator(
        &self,
        request: Request<proto::GetClassroomsByEducatorRequest>,
    ) -> Result<Response<proto::ClassroomList>, Status> {
        let req = request.into_inner();

        let roster = self.roster.clone();
        let classrooms =
            run_blocking(move || roster.classrooms_by_educator(UserId(req.educator_id))).await?;

        Ok(Response::new(proto::ClassroomList {
            classrooms: classrooms.into_iter().map(classroom_to_proto).collect(),
        }))
    }

    async fn get_classrooms_by_student(
        &self,
        request: Request<proto::GetClassroomsByStudentRequest>,
    ) -> Result<Response<proto::ClassroomList>, Status> {
        let req = request.into_inner();

        let roster = self.roster.clone();
        let classrooms =
            run_blocking(move || roster.classrooms_by_student(UserId(req.student_id))).await?;

        Ok(Response::new(proto::ClassroomList {
            classrooms: classrooms.into_iter().map(classroom_to_proto).collect(),
        }))
    }

    async fn update_classroom(
        &self,
        request: Request<proto::UpdateClassroomRequest>,
    ) -> Result<Response<proto::UpdateClassroomResponse>, Status> {
        let req = request.into_inner();

        let visibility = match req.visibility {
            Some(value) => Some(visibility_from_proto(value)?),
            None => None,
        };

        let update = ClassroomUpdate {
            id: ClassroomId(req.id),
            name: req.name,
            description: field_update(req.clear_description, req.description),
            visibility,
        };
        let educator_id = UserId(req.educator_id);

        let roster = self.roster.clone();
        let classroom =
            run_blocking(move || roster.update_classroom(educator_id, update)).await?;

        Ok(Response::new(proto::UpdateClassroomResponse {
            classroom: classroom.map(classroom_to_proto),
        }))
    }

    async fn get_classroom_stats(
        &self,
        request: Request<proto::GetClassroomStatsRequest>,
    ) -> Result<Response<proto::GetClassroomStatsResponse>, Status> {
        let req = request.into_inner();

        let roster = self.roster.clone();
        let stats = run_blocking(move || roster.classroom_stats(ClassroomId(req.id))).await?;

        Ok(Response::new(proto::GetClassroomStatsResponse {
            stats: stats.map(stats_to_proto),
        }))
    }
}
