use crate::cli::ServeArgs;
use crate::infra::{AppState, Stores};
use crate::routes::api_router;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use event_amplify::config::AppConfig;
use event_amplify::error::AppError;
use event_amplify::telemetry;
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

    let stores = Stores::seeded(&config.seed)?;

    let app = api_router(&stores)
        .layer(Extension(stores))
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "event amplify service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
