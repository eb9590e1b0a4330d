use crate::cli::ServeArgs;
use crate::infra::{permissive_cors, AppState};
use crate::routes::with_safety_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use lifeline::alerting::{
    ChannelSet, ContactDirectory, InMemoryContactDirectory, JsonFileContactDirectory,
    SafetyService,
};
use lifeline::config::AppConfig;
use lifeline::error::AppError;
use lifeline::telemetry;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

pub(crate) async fn run(mut args: ServeArgs) -> Result<(), AppError> {
    let mut config = AppConfig::load()?;

    if let Some(host) = args.host.take() {
        config.server.host = host;
    }
    if let Some(port) = args.port.take() {
        config.server.port = port;
    }
    if let Some(users_file) = args.users_file.take() {
        config.storage.users_file = Some(users_file);
    }

    telemetry::init(&config.telemetry)?;

    match config.storage.users_file.clone() {
        Some(path) => {
            info!(path = %path.display(), "using file-backed contact directory");
            serve(config, Arc::new(JsonFileContactDirectory::new(path))).await
        }
        None => serve(config, Arc::new(InMemoryContactDirectory::default())).await,
    }
}

async fn serve<D>(config: AppConfig, directory: Arc<D>) -> Result<(), AppError>
where
    D: ContactDirectory + 'static,
{
    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
        port: config.server.port,
    };

    let service = Arc::new(SafetyService::new(directory, ChannelSet::simulated()));

    let app = with_safety_routes(service)
        .layer(Extension(app_state))
        .layer(permissive_cors())
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "safety alerting backend ready");

    axum::serve(listener, app).await?;
    Ok(())
}
