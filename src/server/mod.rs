//! HTTP layer of the AAS + DPP service.
//!
//! # Endpoints
//!
//! - `GET /`: Service index
//! - `GET /health`: Health check
//! - `GET /aas/{id}`: Full AAS record
//! - `PUT /aas/{id}/submodel/{name}`: Replace a submodel (API key if configured)
//! - `GET /dpp/{id}`: Digital Product Passport projection
//! - `GET /view/dpp/{id}`, `GET /view/label/{id}`: HTML views
//! - `GET /qrcode?target=<url>`: PNG QR code
//! - `GET /static/style.css`: View stylesheet

pub mod auth;
pub mod error;
pub mod routes;
pub mod views;

use aas_dpp_core::DocumentStore;
use axum::{
    middleware,
    routing::{get, put},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub use error::{ApiError, ErrorBody};
pub use views::Views;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    pub public_base_url: Arc<str>,
    pub api_key: Option<Arc<str>>,
    pub views: Arc<Views>,
}

impl AppState {
    pub fn new(
        store: Arc<dyn DocumentStore>,
        public_base_url: &str,
        api_key: Option<&str>,
    ) -> Result<Self, handlebars::TemplateError> {
        Ok(Self {
            store,
            public_base_url: public_base_url.into(),
            api_key: api_key.map(Into::into),
            views: Arc::new(Views::new()?),
        })
    }
}

/// Builds the service router.
pub fn router(state: AppState) -> Router {
    // Public routes (no auth)
    let public_routes = Router::new()
        .route("/", get(routes::index))
        .route("/health", get(routes::health))
        .route("/aas/{id}", get(routes::get_aas))
        .route("/dpp/{id}", get(routes::get_dpp))
        .route("/view/dpp/{id}", get(routes::view_dpp))
        .route("/view/label/{id}", get(routes::view_label))
        .route("/qrcode", get(routes::qrcode))
        .route("/static/style.css", get(routes::style));

    // Write routes (API key when configured)
    let write_routes = Router::new()
        .route("/aas/{id}/submodel/{name}", put(routes::put_submodel))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::require_api_key,
        ));

    Router::new()
        .merge(public_routes)
        .merge(write_routes)
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
