//! Dambo Underwriting API Server
//!
//! Collateral-loan underwriting engine for Korean real estate: currency
//! normalization, loan-figure reconciliation, region classification, the
//! tiered LTV matrix, program eligibility gates, and per-owner share
//! limits. Uses hexagonal (ports & adapters) architecture; every
//! evaluation is a pure function of its inputs, so the service holds no
//! state between requests.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{routing::get, routing::post, Json, Router};
use serde::Serialize;
use tower_governor::governor::GovernorConfigBuilder;
use tower_governor::key_extractor::PeerIpKeyExtractor;
use tower_governor::GovernorLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod adapters;
mod app;
mod config;
mod domain;
mod error;
mod handlers;
mod summary;

#[cfg(test)]
mod test_utils;

#[cfg(test)]
mod integration_tests;

use adapters::RemoteNormalizerImpl;
use app::{
    AmountService, EligibilityService, LtvEngine, PolicyTables, RegionClassifier, ShareService,
};
use config::Config;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub amounts: Arc<AmountService<RemoteNormalizerImpl>>,
    pub regions: Arc<RegionClassifier>,
    pub ltv_engine: Arc<LtvEngine>,
    pub eligibility: Arc<EligibilityService>,
    pub shares: Arc<ShareService>,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,dambo_api=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Dambo underwriting API...");

    // Load configuration and policy tables
    let config = Config::from_env();
    let tables = Arc::new(
        PolicyTables::load(config.policy_tables_path.as_deref())
            .expect("Failed to load policy tables"),
    );
    match &config.policy_tables_path {
        Some(path) => tracing::info!("Policy tables loaded from {}", path),
        None => tracing::info!("Policy tables: built-in defaults"),
    }

    // Remote amount normalization is optional; absence means every
    // normalization runs the local grammar
    let remote_normalizer = config
        .normalizer_url
        .clone()
        .map(|url| Arc::new(RemoteNormalizerImpl::new(url)));
    if config.remote_normalizer_enabled() {
        tracing::info!("Remote amount normalizer configured");
    }

    // Create application services
    let amounts = Arc::new(AmountService::new(remote_normalizer));
    let regions = Arc::new(RegionClassifier::new(tables.clone()));
    let ltv_engine = Arc::new(LtvEngine::new(tables.clone(), regions.clone()));
    let eligibility = Arc::new(EligibilityService::new(tables.clone(), regions.clone()));
    let shares = Arc::new(ShareService::new(regions.clone()));

    let state = AppState {
        amounts,
        regions,
        ltv_engine,
        eligibility,
        shares,
    };

    // Rate limiting: 5 req/sec sustained, burst of 10, keyed by peer IP
    let governor_config = Arc::new(
        GovernorConfigBuilder::default()
            .key_extractor(PeerIpKeyExtractor)
            .per_second(5)
            .burst_size(10)
            .finish()
            .expect("Failed to build governor config"),
    );

    // Text-normalization-heavy routes are rate limited
    let rate_limited_routes = Router::new()
        .route("/amounts/normalize", post(handlers::normalize))
        .route("/loans/reconcile", post(handlers::reconcile_line))
        .route("/memo", post(handlers::generate_memo))
        .layer(GovernorLayer {
            config: governor_config,
        });

    // Build router
    let app = Router::new()
        .route("/health", get(health))
        .route("/regions/classify", post(handlers::classify))
        .route("/ltv/compute", post(handlers::compute))
        .route("/ltv/from-required", post(handlers::from_required))
        .route("/eligibility/validate", post(handlers::validate))
        .route("/shares/limit", post(handlers::share_limit))
        .merge(rate_limited_routes)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .unwrap();
}
