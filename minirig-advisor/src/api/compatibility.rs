//! CPU/motherboard compatibility endpoints

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    Json,
};
use minirig_common::compatibility::{check_against_all_motherboards, MotherboardMatch};
use minirig_common::{check_compatibility, CompatibilityVerdict, ComponentRecord, ComponentType};
use serde::Deserialize;

use crate::error::{ApiError, ApiResult};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct PairCheckRequest {
    pub cpu_id: i64,
    pub motherboard_id: i64,
}

fn lookup(state: &AppState, id: i64, component_type: ComponentType) -> ApiResult<&ComponentRecord> {
    state
        .catalog
        .get(id)
        .filter(|c| c.component_type() == component_type)
        .ok_or_else(|| ApiError::NotFound(format!("No {} with id {}", component_type, id)))
}

/// GET /api/compatibility/:cpu_id
///
/// One entry per motherboard, catalog order. 404 when the id is not a CPU.
pub async fn check_cpu_against_motherboards(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<Vec<MotherboardMatch>>> {
    let Path(cpu_id) = path?;
    lookup(&state, cpu_id, ComponentType::Cpu)?;
    Ok(Json(check_against_all_motherboards(&state.catalog, cpu_id)))
}

/// POST /api/compatibility/check
pub async fn check_pair(
    State(state): State<AppState>,
    payload: Result<Json<PairCheckRequest>, JsonRejection>,
) -> ApiResult<Json<CompatibilityVerdict>> {
    let Json(request) = payload?;
    let cpu = lookup(&state, request.cpu_id, ComponentType::Cpu)?;
    let motherboard = lookup(&state, request.motherboard_id, ComponentType::Motherboard)?;
    Ok(Json(check_compatibility(cpu, motherboard)))
}
