//! # MiniRig Common Library
//!
//! Shared code for the MiniRig build advisor:
//! - Component data model and catalog loading
//! - Spec normalization and chip/socket inference
//! - CPU/motherboard compatibility engine
//! - Power estimation and PSU sizing
//! - Build-level checks and recommendations
//! - Shared build persistence
//! - Configuration loading

pub mod catalog;
pub mod compatibility;
pub mod config;
pub mod db;
pub mod error;
pub mod inference;
pub mod model;
pub mod normalize;
pub mod power;
pub mod recommend;

pub use catalog::Catalog;
pub use compatibility::{check_compatibility, CompatibilityVerdict};
pub use error::{Error, Result};
pub use model::{BuildSelection, ComponentRecord, ComponentSpecs, ComponentType};
pub use power::{estimate_power, PowerEstimate};
