use std::sync::Arc;

use anyhow::Result;
use tonic::transport::Server;
use tracing::info;
use tracing_subscriber::EnvFilter;

use classhub_core::config::Config;
use classhub_core::core_classroom::{ClassroomSqlStore, RosterManager};

mod error;
mod proto;
mod services;

use services::{ClassroomServiceImpl, HealthServiceImpl, MembershipServiceImpl, UserServiceImpl};

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // RUST_LOG takes precedence over the configured level
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.level))?;
    tracing_subscriber::fmt().with_env_filter(filter).init();

    std::fs::create_dir_all(&config.store.data_dir)?;
    let store = ClassroomSqlStore::open(config.store.database_path())?;

    // Single explicitly constructed store handle, shared by every service
    let roster = Arc::new(RosterManager::new(store));

    let addr = config.server.bind_address;
    info!("classhub gRPC server starting on {}", addr);

    Server::builder()
        .add_service(proto::user_service_server::UserServiceServer::new(
            UserServiceImpl::new(roster.clone()),
        ))
        .add_service(proto::classroom_service_server::ClassroomServiceServer::new(
            ClassroomServiceImpl::new(roster.clone()),
        ))
        .add_service(
            proto::membership_service_server::MembershipServiceServer::new(
                MembershipServiceImpl::new(roster.clone()),
            ),
        )
        .add_service(proto::health_service_server::HealthServiceServer::new(
            HealthServiceImpl::new(),
        ))
        .serve(addr)
        .await?;

    Ok(())
}
