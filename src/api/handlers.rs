//! API Handlers
//!
//! HTTP request handlers exposing the TTL cache operations.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    Json,
};
use serde_json::Value;

use crate::cache::TtlCache;
use crate::config::CacheConfig;
use crate::error::{CacheError, Result};
use crate::models::{
    ExpireResponse, GetResponse, HasResponse, HealthResponse, SetRequest, SetResponse,
    StatsResponse,
};

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Shared cache; operations synchronize internally
    pub cache: Arc<TtlCache>,
}

impl AppState {
    /// Creates a new AppState around the given cache.
    pub fn new(cache: TtlCache) -> Self {
        Self {
            cache: Arc::new(cache),
        }
    }

    /// Creates a new AppState with an in-memory cache built from configuration.
    pub fn from_config(config: &CacheConfig) -> Result<Self> {
        Ok(Self::new(TtlCache::new(config.clone())?))
    }
}

/// Handler for PUT /set
///
/// Stores a JSON value with the default TTL, an explicit TTL, or none.
pub async fn set_handler(
    State(state): State<AppState>,
    Json(req): Json<SetRequest>,
) -> Result<Json<SetResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(CacheError::InvalidRequest(error_msg));
    }

    match req.ttl {
        Some(ttl) => state.cache.set_with_ttl(&req.key, &req.value, ttl)?,
        None => state.cache.set(&req.key, &req.value)?,
    }

    Ok(Json(SetResponse::new(req.key)))
}

/// Handler for GET /get/:key
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<GetResponse>> {
    let value: Value = state.cache.get(&key)?;

    Ok(Json(GetResponse::new(key, value)))
}

/// Handler for GET /has/:key
pub async fn has_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Json<HasResponse> {
    let exists = state.cache.has(&key);

    Json(HasResponse::new(key, exists))
}

/// Handler for DELETE /expire/:key
///
/// Succeeds whether or not the key existed.
pub async fn expire_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Json<ExpireResponse> {
    state.cache.expire(&key);

    Json(ExpireResponse::new(key))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse::from(state.cache.stats()))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
