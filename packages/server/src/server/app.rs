//! Application setup and server configuration.

use std::sync::Arc;

use axum::http::header::CONTENT_TYPE;
use axum::http::Method;
use axum::routing::{delete, get, post};
use axum::Router;
use mollie::{MollieOptions, MollieService};
use sqlx::PgPool;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::domains::scheduling::AvailabilityPolicy;
use crate::kernel::{create_mailer, MollieAdapter, ServerDeps};
use crate::server::routes::{
    cancel_booking_handler, create_payment_handler, health_handler, list_bookings_handler,
    list_resources_handler, payment_complete_handler, payment_status_handler,
    payment_webhook_handler,
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub deps: Arc<ServerDeps>,
}

/// Wire real gateway and mailer services from config into ServerDeps
pub fn build_deps(pool: PgPool, config: &Config) -> Arc<ServerDeps> {
    let mollie = Arc::new(MollieService::new(MollieOptions {
        api_key: config.mollie_api_key.clone(),
        base_url: None,
    }));
    let mailer = create_mailer(config.resend_api_key.clone(), config.mail_from.clone());

    Arc::new(ServerDeps::new(
        pool,
        Arc::new(MollieAdapter::new(mollie)),
        mailer,
        AvailabilityPolicy {
            same_day_rooms: config.same_day_rooms,
        },
        config.mail_override_to.clone(),
        config.public_base_url.clone(),
    ))
}

/// Build the Axum application router
pub fn build_app(deps: Arc<ServerDeps>) -> Router {
    // CORS configuration - allow any origin for the mobile app during development
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([CONTENT_TYPE]);

    Router::new()
        .route("/payments", post(create_payment_handler))
        .route("/payments/status", get(payment_status_handler))
        .route("/payments/complete", get(payment_complete_handler))
        .route("/webhooks/payments", post(payment_webhook_handler))
        .route("/resources", get(list_resources_handler))
        .route("/bookings", get(list_bookings_handler))
        .route("/bookings/:payment_id", delete(cancel_booking_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(AppState { deps })
}
