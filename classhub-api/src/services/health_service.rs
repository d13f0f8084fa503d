use chrono::Utc;
use tonic::{Request, Response, Status};

use crate::proto;

/// Liveness probe
#[derive(Default)]
pub struct HealthServiceImpl;

impl HealthServiceImpl {
    pub fn new() -> Self {
        Self
    }
}

#[tonic::async_trait]
impl proto::health_service_server::HealthService for HealthServiceImpl {
    async fn check(
        &self,
        _request: Request<proto::HealthCheckRequest>,
    ) -> Result<Response<proto::HealthCheckResponse>, Status> {
        Ok(Response::new(proto::HealthCheckResponse {
            status: "ok".to_string(),
            timestamp: Utc::now().to_rfc3339(),
        }))
    }
}
