//! API Handlers
//!
//! HTTP request handlers for each cache server endpoint.

use anyhow::Context;
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    Json,
};
use tracing::info;

use crate::cache::{CacheManager, SetOutcome};
use crate::config::Config;
use crate::error::{CacheError, Result};
use crate::models::{
    CleanupParams, CleanupResponse, ClearResponse, DeleteResponse, GetResponse, HealthResponse,
    SetRequest, SetResponse, StatsResponse,
};
use crate::store::{FileStore, MemoryStore};

/// Application state shared across all handlers.
///
/// The cache manager is cheap to clone; all clones share one store.
#[derive(Clone)]
pub struct AppState {
    pub cache: CacheManager,
}

impl AppState {
    /// Creates a new AppState around an existing cache manager.
    pub fn new(cache: CacheManager) -> Self {
        Self { cache }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Opens the file store at `data_path` when one is configured, otherwise
    /// keeps items in memory.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let cache = match &config.data_path {
            Some(path) => {
                let store = FileStore::open(path)
                    .with_context(|| format!("failed to open cache store at {}", path.display()))?;
                CacheManager::new(store, config.max_size)
            }
            None => {
                info!("No CACHE_DATA_PATH set, items will not survive a restart");
                CacheManager::new(MemoryStore::new(), config.max_size)
            }
        };
        Ok(Self::new(cache))
    }
}

/// Handler for POST /cache
///
/// Creates or updates an item. Answers 201 for a new key, 200 for an update.
/// Malformed bodies are reported as validation errors.
pub async fn set_handler(
    State(state): State<AppState>,
    payload: std::result::Result<Json<SetRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<SetResponse>)> {
    let Json(req) = payload?;
    let outcome = state.cache.set(&req.key, req.value).await?;

    let created = outcome == SetOutcome::Created;
    let status = if created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(SetResponse::new(req.key, created))))
}

/// Handler for GET /cache/:key
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<GetResponse>> {
    match state.cache.get(&key).await? {
        Some(value) => Ok(Json(GetResponse::new(key, value))),
        None => Err(CacheError::NotFound(key)),
    }
}

/// Handler for DELETE /cache/:key
pub async fn delete_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<DeleteResponse>> {
    if state.cache.delete(&key).await? {
        Ok(Json(DeleteResponse::new(key)))
    } else {
        Err(CacheError::NotFound(key))
    }
}

/// Handler for DELETE /cache
pub async fn clear_handler(State(state): State<AppState>) -> Result<Json<ClearResponse>> {
    state.cache.clear().await?;
    Ok(Json(ClearResponse::new()))
}

/// Handler for GET /stats
pub async fn stats_handler(State(state): State<AppState>) -> Result<Json<StatsResponse>> {
    let stats = state.cache.stats().await?;
    Ok(Json(StatsResponse::from(stats)))
}

/// Handler for POST /cleanup
///
/// Removes items older than `maxAgeMinutes` (query parameter, default 60).
pub async fn cleanup_handler(
    State(state): State<AppState>,
    params: std::result::Result<Query<CleanupParams>, QueryRejection>,
) -> Result<Json<CleanupResponse>> {
    let Query(params) = params?;
    let max_age_minutes = params.max_age_minutes();
    let removed = state.cache.cleanup_old_entries(max_age_minutes).await?;
    Ok(Json(CleanupResponse::new(removed, max_age_minutes)))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
