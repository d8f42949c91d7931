// Engine main entry point
use engine::config::settings::EngineSettings;
use engine::dashboard::DashboardController;
use engine::data::CsvPriceProvider;
use engine::services::dashboard_service::DashboardGrpcService;
use engine::services::DashboardServiceServer;
use std::net::SocketAddr;
use std::sync::Arc;
use tonic::transport::Server;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt::init();

    info!("Starting Dashboard Engine...");

    let settings = EngineSettings::load()?;
    let addr: SocketAddr = settings.listen_addr().parse()?;
    info!(
        data_dir = %settings.data.data_dir.display(),
        start_date = %settings.data.start_date,
        cache_enabled = settings.data.cache_enabled,
        "Engine will listen on {}",
        addr
    );

    let provider = Arc::new(CsvPriceProvider::new(settings.data.data_dir.clone()));
    let controller = Arc::new(DashboardController::from_settings(&settings, provider)?);
    let dashboard_service = DashboardGrpcService::new(controller);

    Server::builder()
        .add_service(DashboardServiceServer::new(dashboard_service))
        .serve(addr)
        .await?;

    Ok(())
}
