//! Power estimation endpoint

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use minirig_common::{estimate_power, PowerEstimate};

use super::ComponentIdsRequest;
use crate::error::ApiResult;
use crate::AppState;

/// POST /api/power
///
/// Unknown ids are skipped; the last id of a given type wins.
pub async fn estimate(
    State(state): State<AppState>,
    payload: Result<Json<ComponentIdsRequest>, JsonRejection>,
) -> ApiResult<Json<PowerEstimate>> {
    let Json(request) = payload?;
    let selection = state.catalog.selection_for(&request.components);
    Ok(Json(estimate_power(&selection)))
}
