//! Product handlers
//!
//! Thin HTTP mapping over the catalog service: reads carry an `X-Cache`
//! header, writes pass the extracted caller identity through to the
//! service-level access guard.

use axum::extract::{Path, State};
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use catalog_types::{Product, ProductDraft};

use crate::app::AppState;
use crate::error::CatalogError;
use crate::extractors::auth::bearer_identity;
use crate::services::CacheStatus;

fn with_cache_header(body: Json<impl serde::Serialize>, status: CacheStatus) -> Response {
    let mut response = body.into_response();
    response
        .headers_mut()
        .insert("x-cache", HeaderValue::from_static(status.as_str()));
    response
}

pub async fn list(State(state): State<AppState>) -> Result<Response, CatalogError> {
    let cancel = state.shutdown.child_token();
    let (products, status) = state.catalog.list(&cancel).await?;
    Ok(with_cache_header(Json(products), status))
}

pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Response, CatalogError> {
    let cancel = state.shutdown.child_token();
    let (product, status) = state.catalog.get(id, &cancel).await?;
    Ok(with_cache_header(Json(product), status))
}

pub async fn create(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(draft): Json<ProductDraft>,
) -> Result<(StatusCode, Json<Product>), CatalogError> {
    let caller = bearer_identity(&headers, &state.auth);
    let cancel = state.shutdown.child_token();

    let created = state
        .catalog
        .create(caller.as_ref(), draft, &cancel)
        .await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    headers: HeaderMap,
    Json(draft): Json<ProductDraft>,
) -> Result<Json<Product>, CatalogError> {
    let caller = bearer_identity(&headers, &state.auth);
    let cancel = state.shutdown.child_token();

    let updated = state
        .catalog
        .update(caller.as_ref(), id, draft, &cancel)
        .await?;
    Ok(Json(updated))
}

pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> Result<StatusCode, CatalogError> {
    let caller = bearer_identity(&headers, &state.auth);
    let cancel = state.shutdown.child_token();

    state.catalog.delete(caller.as_ref(), id, &cancel).await?;
    Ok(StatusCode::NO_CONTENT)
}
