//! Recommendation endpoints

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use minirig_common::recommend::{self, Recommendation, StarterPicks};
use serde::Deserialize;

use super::ComponentIdsRequest;
use crate::error::ApiResult;
use crate::AppState;

/// POST /api/recommendations
pub async fn recommendations(
    State(state): State<AppState>,
    payload: Result<Json<ComponentIdsRequest>, JsonRejection>,
) -> ApiResult<Json<Vec<Recommendation>>> {
    let Json(request) = payload?;
    let selection = state.catalog.selection_for(&request.components);
    Ok(Json(recommend::recommendations(&state.catalog, &selection)))
}

#[derive(Debug, Deserialize)]
pub struct BudgetRequest {
    pub budget: f64,
    #[serde(default)]
    pub use_case: String,
}

/// POST /api/recommend
///
/// Non-positive budgets are rejected with 400.
pub async fn recommend_for_budget(
    payload: Result<Json<BudgetRequest>, JsonRejection>,
) -> ApiResult<Json<StarterPicks>> {
    let Json(request) = payload?;
    Ok(Json(recommend::starter_picks(request.budget, &request.use_case)?))
}
