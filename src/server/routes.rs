//! Request handlers.

use aas_dpp_core::{project, AasRecord, DocumentStore, DppRecord, StoreError, SubmodelAck};
use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::header,
    response::{Html, IntoResponse},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::ApiError;
use super::views::{qrcode_url, STYLE_CSS};
use super::AppState;
use crate::qr;

/// Service index response
#[derive(Serialize)]
pub struct IndexResponse {
    service: &'static str,
    endpoints: Vec<String>,
    public_base: String,
}

/// Lists the available endpoints for the managed asset
pub async fn index(State(state): State<AppState>) -> Json<IndexResponse> {
    let id = state.store.asset_id();
    Json(IndexResponse {
        service: "AAS + DPP Demo",
        endpoints: vec![
            format!("/aas/{}", id),
            format!("/aas/{}/submodel/nameplate [PUT]", id),
            format!("/aas/{}/submodel/technicalData [PUT]", id),
            format!("/dpp/{}", id),
            format!("/view/dpp/{}", id),
            format!("/view/label/{}", id),
            "/qrcode?target=<url>".to_string(),
        ],
        public_base: state.public_base_url.to_string(),
    })
}

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

/// Health check endpoint (no auth required)
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Runs a store call on the blocking pool; every call does file I/O.
async fn with_store<T, F>(state: &AppState, f: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce(&dyn DocumentStore) -> Result<T, StoreError> + Send + 'static,
{
    let store = state.store.clone();
    let result = tokio::task::spawn_blocking(move || f(store.as_ref())).await?;
    Ok(result?)
}

pub async fn get_aas(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<AasRecord>, ApiError> {
    let record = with_store(&state, move |store| store.get(&id)).await?;
    Ok(Json(record))
}

/// Replaces one submodel. Whole-submodel PUT, never a merge.
pub async fn put_submodel(
    State(state): State<AppState>,
    Path((id, name)): Path<(String, String)>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Result<Json<SubmodelAck>, ApiError> {
    let Json(payload) =
        payload.map_err(|rejection| StoreError::BadRequest(rejection.body_text()))?;

    let ack = with_store(&state, move |store| store.put_submodel(&id, &name, payload)).await?;
    Ok(Json(ack))
}

pub async fn get_dpp(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<DppRecord>, ApiError> {
    let record = with_store(&state, move |store| store.get(&id)).await?;
    Ok(Json(project(&record, &state.public_base_url)))
}

pub async fn view_dpp(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>, ApiError> {
    let record = with_store(&state, move |store| store.get(&id)).await?;
    let dpp = project(&record, &state.public_base_url);
    let qr = qrcode_url(&state.public_base_url, &record.id);

    Ok(Html(state.views.render_dpp(&dpp, &state.public_base_url, &qr)?))
}

pub async fn view_label(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Html<String>, ApiError> {
    let record = with_store(&state, move |store| store.get(&id)).await?;
    let qr = qrcode_url(&state.public_base_url, &record.id);

    Ok(Html(state.views.render_label(&record, &state.public_base_url, &qr)?))
}

#[derive(Deserialize)]
pub struct QrQuery {
    #[serde(default)]
    target: String,
}

/// PNG QR code encoding `target`
pub async fn qrcode(Query(query): Query<QrQuery>) -> Result<impl IntoResponse, ApiError> {
    let png = qr::render_png(&query.target)?;
    Ok(([(header::CONTENT_TYPE, "image/png")], png))
}

pub async fn style() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/css; charset=utf-8")], STYLE_CSS)
}
