use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemoryDirectory, InMemoryRequestRepository};
use crate::routes::with_request_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use interview_tracker::config::AppConfig;
use interview_tracker::error::AppError;
use interview_tracker::requests::InterviewRequestService;
use interview_tracker::telemetry;
use std::sync::atomic::Ordering;
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

    telemetry::init(&config.telemetry)?;

    let (prometheus_layer, prometheus_handle) = PrometheusMetricLayer::pair();
    let readiness_flag = Arc::new(std::sync::atomic::AtomicBool::new(false));
    let app_state = AppState {
        readiness: readiness_flag.clone(),
        metrics: Arc::new(prometheus_handle),
    };

    let request_service = Arc::new(InterviewRequestService::new(
        Arc::new(InMemoryRequestRepository::default()),
        Arc::new(InMemoryDirectory::default()),
        config.workflow.clone(),
    ));

    let app = with_request_routes(request_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "interview tracker ready");

    axum::serve(listener, app).await?;
    Ok(())
}
