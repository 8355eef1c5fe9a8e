// Engine main entry point
use engine::config::EngineSettings;
use engine::data::SessionStore;
use engine::services::appraisal_service::MyAppraisalEngine;
use engine::services::AppraisalEngineServer;
use std::sync::Arc;
use tokio::sync::RwLock;
use tonic::transport::Server;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    info!("Starting appraisal engine...");

    let settings = EngineSettings::load_from_env()?;
    let addr = settings.address().parse()?;
    info!(%addr, session_ttl_secs = settings.session_ttl_secs, "Engine will listen on {}", addr);

    let session_store = Arc::new(RwLock::new(SessionStore::new(settings.session_ttl_secs)));
    let appraisal_service = MyAppraisalEngine::new(session_store, settings);

    Server::builder()
        .add_service(AppraisalEngineServer::new(appraisal_service))
        .serve(addr)
        .await?;

    Ok(())
}
