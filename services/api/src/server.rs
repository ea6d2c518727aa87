use crate::cli::ServeArgs;
use crate::infra::{AppState, DirectiveContext};
use crate::routes::with_directive_routes;
use ad_applicability::config::AppConfig;
use ad_applicability::directives::FileDirectiveStore;
use ad_applicability::error::AppError;
use ad_applicability::telemetry;
use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
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

    let store = Arc::new(FileDirectiveStore::new(&config.library.directive_dir));
    let context = Arc::new(DirectiveContext::new(store));

    let app = with_directive_routes(context)
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(
        ?config.environment,
        %addr,
        library = %config.library.directive_dir.display(),
        "AD applicability evaluator ready"
    );

    axum::serve(listener, app).await?;
    Ok(())
}
