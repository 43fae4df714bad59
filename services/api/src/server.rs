use std::sync::atomic::Ordering;
use std::sync::Arc;

use axum::Extension;
use axum_prometheus::PrometheusMetricLayer;
use talentflow::config::AppConfig;
use talentflow::error::AppError;
use talentflow::marketplace::Marketplace;
use talentflow::telemetry;
use tracing::info;

use crate::cli::ServeArgs;
use crate::demo::seed_marketplace;
use crate::infra::{AppState, InMemoryStore};
use crate::routes::with_marketplace_routes;

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

    let marketplace = Marketplace::new(Arc::new(InMemoryStore::default()));
    if args.seed {
        seed_marketplace(&marketplace)?;
        info!("seeded sample employer and candidates");
    }

    let app = with_marketplace_routes(Arc::new(marketplace))
        .layer(Extension(app_state))
        .layer(prometheus_layer);

    let addr = config.server.socket_addr()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    readiness_flag.store(true, Ordering::Release);

    info!(?config.environment, %addr, "recruitment marketplace ready");

    axum::serve(listener, app).await?;
    Ok(())
}
