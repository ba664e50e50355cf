use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use persistence::repositories::{AlertRepository, DeviceRepository, StatusCheckRepository};
use persistence::store::DocumentStore;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{AllowOrigin, Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::Config;
use crate::middleware::{metrics_handler, metrics_middleware, trace_id};
use crate::routes::{alerts, devices, health, root, status};

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn devices(&self) -> DeviceRepository {
        DeviceRepository::new(Arc::clone(&self.store))
    }

    pub fn alerts(&self) -> AlertRepository {
        AlertRepository::new(Arc::clone(&self.store))
    }

    pub fn status_checks(&self) -> StatusCheckRepository {
        StatusCheckRepository::new(Arc::clone(&self.store))
    }
}

fn cors_layer(config: &Config) -> CorsLayer {
    if config.security.cors_origins.is_empty() {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any)
    } else {
        let origins: Vec<_> = config
            .security
            .cors_origins
            .iter()
            .filter_map(|o| o.parse().ok())
            .collect();
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(Any)
            .allow_headers(Any)
    }
}

pub fn create_app(config: Config, store: Arc<dyn DocumentStore>) -> Router {
    let config = Arc::new(config);
    let cors = cors_layer(&config);

    let state = AppState {
        store,
        config: config.clone(),
    };

    let api_routes = Router::new()
        .route("/api/", get(root::root))
        .route(
            "/api/status",
            post(status::create_status_check).get(status::list_status_checks),
        )
        .route(
            "/api/devices",
            get(devices::list_devices).post(devices::upsert_device),
        )
        .route("/api/devices/bulk", post(devices::upsert_devices_bulk))
        .route(
            "/api/devices/:id",
            get(devices::get_device).patch(devices::patch_device),
        )
        .route(
            "/api/sectors/:sector/devices",
            get(devices::list_sector_devices),
        )
        .route(
            "/api/alerts",
            get(alerts::list_alerts).post(alerts::upsert_alert),
        )
        .route("/api/alerts/bulk", post(alerts::upsert_alerts_bulk));

    let public_routes = Router::new()
        .route("/api/health", get(health::health_check))
        .route("/api/health/ready", get(health::ready))
        .route("/api/health/live", get(health::live))
        .route("/metrics", get(metrics_handler));

    Router::new()
        .merge(public_routes)
        .merge(api_routes)
        // Global middleware (order matters: bottom layers run first)
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )))
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(trace_id))
        .layer(cors)
        .with_state(state)
}
