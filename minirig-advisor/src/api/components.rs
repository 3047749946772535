//! Catalog browsing

use axum::{
    extract::{rejection::PathRejection, Path, Query, State},
    Json,
};
use minirig_common::{ComponentRecord, ComponentType};
use serde::Deserialize;

use crate::error::{ApiError, ApiResult};
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ComponentQuery {
    /// Restrict the listing to one component type
    #[serde(rename = "type")]
    pub component_type: Option<String>,
}

/// GET /api/components[?type=cpu]
///
/// Records in catalog order. An unknown type is a 400.
pub async fn list_components(
    State(state): State<AppState>,
    Query(query): Query<ComponentQuery>,
) -> ApiResult<Json<Vec<ComponentRecord>>> {
    let records = match query.component_type.as_deref() {
        None | Some("") => state.catalog.all().to_vec(),
        Some(raw) => {
            let component_type = ComponentType::parse(raw)
                .ok_or_else(|| ApiError::BadRequest(format!("Unknown component type: {}", raw)))?;
            state
                .catalog
                .list_by_type(component_type)
                .into_iter()
                .cloned()
                .collect()
        }
    };
    Ok(Json(records))
}

/// GET /api/components/:id
pub async fn get_component(
    State(state): State<AppState>,
    path: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<ComponentRecord>> {
    let Path(id) = path?;
    state
        .catalog
        .get(id)
        .cloned()
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(format!("Component {} not found", id)))
}
