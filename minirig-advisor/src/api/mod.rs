//! HTTP API handlers for minirig-advisor

pub mod buildinfo;
pub mod builds;
pub mod compatibility;
pub mod components;
pub mod health;
pub mod power;
pub mod recommend;

use serde::Deserialize;

pub use buildinfo::get_build_info;
pub use builds::{check_build_report, create_build, get_build};
pub use compatibility::{check_cpu_against_motherboards, check_pair};
pub use components::{get_component, list_components};
pub use health::health_routes;
pub use power::estimate;
pub use recommend::{recommend_for_budget, recommendations};

/// Request body naming a set of catalog components
#[derive(Debug, Deserialize)]
pub struct ComponentIdsRequest {
    pub components: Vec<i64>,
}
