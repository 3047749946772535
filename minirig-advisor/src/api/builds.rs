//! Build report and shared build endpoints

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use minirig_common::compatibility::{check_build, BuildReport};
use minirig_common::db::{self, NewBuild, SavedBuild, StoredBuild};
use minirig_common::{estimate_power, ComponentRecord, PowerEstimate};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::ComponentIdsRequest;
use crate::error::{ApiError, ApiResult};
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct BuildCheckResponse {
    pub report: BuildReport,
    pub estimate: PowerEstimate,
}

/// POST /api/builds/check
pub async fn check_build_report(
    State(state): State<AppState>,
    payload: Result<Json<ComponentIdsRequest>, JsonRejection>,
) -> ApiResult<Json<BuildCheckResponse>> {
    let Json(request) = payload?;
    let selection = state.catalog.selection_for(&request.components);
    let estimate = estimate_power(&selection);
    let report = check_build(&selection, &estimate);
    Ok(Json(BuildCheckResponse { report, estimate }))
}

#[derive(Debug, Deserialize)]
pub struct CreateBuildRequest {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub components: Vec<i64>,
}

/// POST /api/builds
pub async fn create_build(
    State(state): State<AppState>,
    payload: Result<Json<CreateBuildRequest>, JsonRejection>,
) -> ApiResult<Json<SavedBuild>> {
    let Json(request) = payload?;
    let saved = db::save_build(
        &state.db,
        &state.catalog,
        NewBuild {
            name: request.name,
            description: request.description,
            component_ids: request.components,
        },
    )
    .await?;
    info!("Shared build created: {}", saved.share_code);
    Ok(Json(saved))
}

/// Stored build with its components resolved against the catalog
#[derive(Debug, Serialize)]
pub struct BuildResponse {
    #[serde(flatten)]
    pub build: StoredBuild,
    pub components: Vec<ComponentRecord>,
}

/// GET /api/builds/:share_code
///
/// Ids no longer in the catalog are left out of `components` but kept in
/// `component_ids`.
pub async fn get_build(
    State(state): State<AppState>,
    Path(share_code): Path<String>,
) -> ApiResult<Json<BuildResponse>> {
    let build = db::load_build(&state.db, &share_code)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Build {} not found", share_code)))?;

    let components = build
        .component_ids
        .iter()
        .filter_map(|id| state.catalog.get(*id))
        .cloned()
        .collect();

    Ok(Json(BuildResponse { build, components }))
}
