use crate::cli::ServeArgs;
use crate::infra::{AppState, InMemorySessionStore};
use crate::routes::with_interview_routes;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use helm_ai::advisor::{InterviewConfig, InterviewEngine, InterviewService};
use helm_ai::analytics::WebhookSink;
use helm_ai::catalog::Catalog;
use helm_ai::commentary::ChatCommentary;
use helm_ai::config::AppConfig;
use helm_ai::error::AppError;
use helm_ai::telemetry;
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

    let catalog = Arc::new(Catalog::from_dir(&config.catalog.data_dir)?);
    info!(
        questions = catalog.questions().len(),
        effects = catalog.effects().len(),
        classes = catalog.classes().len(),
        "catalog loaded"
    );

    let webhook_url = catalog.settings().webhook_url.clone();
    let engine = Arc::new(InterviewEngine::new(catalog, InterviewConfig::default()));
    let interview_service = Arc::new(InterviewService::new(
        engine,
        Arc::new(InMemorySessionStore::default()),
        Arc::new(WebhookSink::new(webhook_url)),
        Arc::new(ChatCommentary::from_config(&config.commentary)),
    ));

    let app = with_interview_routes(interview_service)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "interview advisory service ready");

    axum::serve(listener, app).await?;
    Ok(())
}
