//! HTTP front end for the client baggage service.
//!
//! # Design
//! `router` wires the four `/api/clients` endpoints to a `ClientService`
//! that the caller has already built around its store of choice, so tests
//! can hand in a seeded in-memory store and `main` a sled database.

pub mod config;
pub mod error;
pub mod routes;
pub mod storage;
pub mod telemetry;

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::http::{header, HeaderName, Method};
use axum::routing::get;
use axum::Router;
use baggage_core::ClientService;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

pub use config::Config;
pub use storage::SledClientStore;

/// Largest accepted request body: 50 MiB.
pub const DEFAULT_BODY_LIMIT: usize = 50 * 1024 * 1024;

#[derive(Clone)]
pub struct AppState {
    pub clients: Arc<ClientService>,
}

/// Router with the default body limit.
pub fn app(service: ClientService) -> Router {
    router(service, DEFAULT_BODY_LIMIT)
}

pub fn router(service: ClientService, body_limit: usize) -> Router {
    let state = AppState {
        clients: Arc::new(service),
    };
    Router::new()
        .route(
            "/api/clients",
            get(routes::list_clients)
                .post(routes::create_client)
                .put(routes::update_client),
        )
        .route("/api/clients/client", get(routes::get_client))
        .route("/health", get(routes::health))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Any origin may call the API.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            HeaderName::from_static("x-requested-with"),
        ])
}

pub async fn run(listener: TcpListener, app: Router) -> Result<(), std::io::Error> {
    axum::serve(listener, app).await
}
