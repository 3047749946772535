//! Component catalog
//!
//! The catalog is built once at startup, either from a JSON catalog file or
//! from the built-in seed data, and is read-only afterwards. Share it behind
//! an `Arc`; no locking is required.
//!
//! **Catalog file format:** a JSON object keyed by component type whose values
//! are arrays of rows:
//!
//! ```json
//! {
//!   "cpu": [{"name": "AMD Ryzen 7 7800X3D", "price": "$449.00", "tdp": 120}],
//!   "motherboard": [{"name": "ASUS ROG STRIX B650E-I", "socket": "AM5"}]
//! }
//! ```
//!
//! Ids are assigned sequentially across types in build sheet order (case,
//! motherboard, cpu, cooler, memory, storage, gpu, psu) and file order within
//! a type, unless a row carries an explicit integer `id`.

mod seed;

use crate::error::{Error, Result};
use crate::model::{BuildSelection, ComponentRecord, ComponentType};
use crate::normalize::{normalize, RawRow};
use serde_json::Value;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::Path;
use tracing::{debug, info, warn};

fn explicit_id(row: &RawRow) -> Option<i64> {
    row.get("id").and_then(Value::as_i64)
}

/// First id at or after `start` that no row claims explicitly
fn next_free_id(start: Option<i64>, reserved: &HashSet<i64>) -> Option<i64> {
    let mut candidate = start?;
    while reserved.contains(&candidate) {
        candidate = candidate.checked_add(1)?;
    }
    Some(candidate)
}

/// Read-only component catalog in stable order
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    components: Vec<ComponentRecord>,
    index: HashMap<i64, usize>,
}

impl Catalog {
    /// Build a catalog from raw rows.
    ///
    /// Rows are grouped by type (build sheet order) keeping their relative
    /// order. Explicit ids are reserved up front, so sequential ids never take
    /// one; a row repeating an explicit id that is already taken is skipped.
    pub fn from_rows<I>(rows: I) -> Self
    where
        I: IntoIterator<Item = (ComponentType, RawRow)>,
    {
        let mut grouped: BTreeMap<ComponentType, Vec<RawRow>> = BTreeMap::new();
        for (component_type, row) in rows {
            grouped.entry(component_type).or_default().push(row);
        }

        let reserved: HashSet<i64> = grouped.values().flatten().filter_map(explicit_id).collect();

        let mut catalog = Catalog::default();
        // None once i64::MAX has been used
        let mut next_id: Option<i64> = Some(1);

        for (component_type, rows) in grouped {
            for row in rows {
                let id = match explicit_id(&row) {
                    Some(explicit) => {
                        if catalog.index.contains_key(&explicit) {
                            warn!(id = explicit, component_type = %component_type, "Duplicate component id, row skipped");
                            continue;
                        }
                        if next_id.is_some_and(|next| explicit >= next) {
                            next_id = explicit.checked_add(1);
                        }
                        explicit
                    }
                    None => match next_free_id(next_id, &reserved) {
                        Some(id) => {
                            next_id = id.checked_add(1);
                            id
                        }
                        None => {
                            warn!(component_type = %component_type, "No component ids left, row skipped");
                            continue;
                        }
                    },
                };

                let record = normalize(&row, component_type, id);
                catalog.index.insert(id, catalog.components.len());
                catalog.components.push(record);
            }
        }

        catalog
    }

    /// Parse a catalog document (see module docs for the format)
    pub fn from_json_str(json: &str) -> Result<Self> {
        let document: Value = serde_json::from_str(json)?;
        let Value::Object(sections) = document else {
            return Err(Error::Catalog(
                "expected a JSON object keyed by component type".to_string(),
            ));
        };

        let mut rows = Vec::new();
        for (key, entries) in sections {
            let Some(component_type) = ComponentType::parse(&key) else {
                warn!(section = %key, "Unknown component type in catalog, section skipped");
                continue;
            };
            let Value::Array(entries) = entries else {
                warn!(section = %key, "Catalog section is not an array, skipped");
                continue;
            };
            for entry in entries {
                match entry {
                    Value::Object(row) => rows.push((component_type, row)),
                    other => debug!(section = %key, row = %other, "Non-object catalog row skipped"),
                }
            }
        }

        Ok(Self::from_rows(rows))
    }

    /// Load and parse a catalog file
    pub async fn load_from_file(path: &Path) -> Result<Self> {
        let contents = tokio::fs::read_to_string(path).await?;
        let catalog = Self::from_json_str(&contents)?;
        info!(
            path = %path.display(),
            components = catalog.len(),
            "Catalog loaded from file"
        );
        catalog.log_summary();
        Ok(catalog)
    }

    /// Built-in sample catalog
    pub fn seed() -> Self {
        let catalog = Self::from_rows(seed::seed_rows());
        info!(components = catalog.len(), "Using built-in seed catalog");
        catalog
    }

    fn log_summary(&self) {
        for component_type in ComponentType::ALL {
            debug!(
                component_type = %component_type,
                count = self.components.iter().filter(|c| c.component_type() == component_type).count(),
                "Catalog section"
            );
        }
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// All records in catalog order
    pub fn all(&self) -> &[ComponentRecord] {
        &self.components
    }

    pub fn get(&self, id: i64) -> Option<&ComponentRecord> {
        self.index.get(&id).map(|&i| &self.components[i])
    }

    /// Records of one type in catalog order
    pub fn list_by_type(&self, component_type: ComponentType) -> Vec<&ComponentRecord> {
        self.components
            .iter()
            .filter(|c| c.component_type() == component_type)
            .collect()
    }

    /// Records of one type, cheapest first (ties keep catalog order)
    pub fn list_by_type_sorted_by_price(&self, component_type: ComponentType) -> Vec<&ComponentRecord> {
        let mut records = self.list_by_type(component_type);
        records.sort_by(|a, b| a.price.total_cmp(&b.price));
        records
    }

    pub fn motherboards(&self) -> Vec<&ComponentRecord> {
        self.list_by_type(ComponentType::Motherboard)
    }

    /// Resolve a list of ids into a build.
    ///
    /// Unknown ids are skipped; when several ids share a type the last one wins.
    pub fn selection_for(&self, ids: &[i64]) -> BuildSelection {
        let mut selection = BuildSelection::new();
        for &id in ids {
            match self.get(id) {
                Some(record) => {
                    if let Some(replaced) = selection.insert(record.clone()) {
                        debug!(
                            replaced = replaced.id,
                            by = id,
                            component_type = %record.component_type(),
                            "Selection already had a component of this type"
                        );
                    }
                }
                None => warn!(id, "Unknown component id ignored"),
            }
        }
        selection
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_follow_type_order_not_file_order() {
        let catalog = Catalog::from_json_str(
            r#"{
                "psu": [{"name": "Corsair SF750 750W"}],
                "cpu": [{"name": "AMD Ryzen 5 5600X"}, {"name": "Intel Core i5-12600K"}],
                "case": [{"name": "NZXT H210"}]
            }"#,
        )
        .unwrap();

        let names: Vec<(i64, String)> = catalog.all().iter().map(|c| (c.id, c.name())).collect();
        assert_eq!(
            names,
            vec![
                (1, "NZXT H210".to_string()),
                (2, "AMD Ryzen 5 5600X".to_string()),
                (3, "Intel Core i5-12600K".to_string()),
                (4, "Corsair SF750 750W".to_string()),
            ]
        );
    }

    #[test]
    fn test_explicit_ids_and_duplicates() {
        let catalog = Catalog::from_json_str(
            r#"{
                "cpu": [{"id": 10, "name": "AMD Ryzen 5 5600X"}, {"name": "AMD Ryzen 7 7700X"}],
                "gpu": [{"id": 10, "name": "Duplicate"}, {"name": "ASUS RTX 5070"}]
            }"#,
        )
        .unwrap();

        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.get(10).unwrap().model, "Ryzen 5 5600X");
        assert_eq!(catalog.get(11).unwrap().model, "Ryzen 7 7700X");
        assert_eq!(catalog.get(12).unwrap().model, "RTX 5070");
    }

    #[test]
    fn test_explicit_id_wins_over_sequential_id() {
        let catalog = Catalog::from_json_str(
            r#"{
                "case": [{"name": "NZXT H1"}, {"name": "Cooler Master NR200"}],
                "cpu": [{"id": 1, "name": "AMD Ryzen 7 7800X3D"}]
            }"#,
        )
        .unwrap();

        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.get(1).unwrap().name(), "AMD Ryzen 7 7800X3D");
        assert_eq!(catalog.get(2).unwrap().name(), "NZXT H1");
        assert_eq!(catalog.get(3).unwrap().name(), "Cooler Master NR200");
    }

    #[test]
    fn test_max_explicit_id_exhausts_id_space() {
        let catalog = Catalog::from_json_str(
            r#"{
                "case": [{"name": "NZXT H1"}],
                "cpu": [{"id": 9223372036854775807, "name": "AMD Ryzen 7 7800X3D"}, {"name": "AMD Ryzen 5 5600X"}],
                "psu": [{"name": "Corsair SF750 750W"}]
            }"#,
        )
        .unwrap();

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get(1).unwrap().name(), "NZXT H1");
        assert_eq!(catalog.get(i64::MAX).unwrap().name(), "AMD Ryzen 7 7800X3D");
        assert!(catalog.all().iter().all(|c| c.id > 0));
    }

    #[test]
    fn test_rejects_non_object_document() {
        assert!(matches!(
            Catalog::from_json_str("[1, 2, 3]"),
            Err(Error::Catalog(_))
        ));
        assert!(matches!(Catalog::from_json_str("{not json"), Err(Error::CatalogJson(_))));
    }

    #[test]
    fn test_unknown_sections_and_rows_skipped() {
        let catalog = Catalog::from_json_str(
            r#"{"toaster": [{"name": "X"}], "cpu": "nope", "ram": [{"name": "Corsair Vengeance"}, 5]}"#,
        )
        .unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.all()[0].component_type(), ComponentType::Memory);
    }

    #[test]
    fn test_selection_last_of_type_wins() {
        let catalog = Catalog::seed();
        let cpus = catalog.list_by_type(ComponentType::Cpu);
        let ids = [cpus[0].id, 99_999, cpus[1].id];
        let selection = catalog.selection_for(&ids);
        assert_eq!(selection.len(), 1);
        assert_eq!(selection.get(ComponentType::Cpu).unwrap().id, cpus[1].id);
    }

    #[test]
    fn test_sorted_by_price() {
        let catalog = Catalog::seed();
        let gpus = catalog.list_by_type_sorted_by_price(ComponentType::Gpu);
        assert!(gpus.windows(2).all(|w| w[0].price <= w[1].price));
        assert_eq!(gpus.len(), catalog.list_by_type(ComponentType::Gpu).len());
    }

    #[test]
    fn test_seed_covers_every_type() {
        let catalog = Catalog::seed();
        for component_type in ComponentType::ALL {
            assert!(
                !catalog.list_by_type(component_type).is_empty(),
                "seed has no {}",
                component_type
            );
        }
        for gpu in catalog.list_by_type(ComponentType::Gpu) {
            assert!(!gpu.as_gpu().unwrap().chip.is_empty());
        }
        for mb in catalog.motherboards() {
            assert!(!mb.socket().is_empty(), "{} has no socket", mb.name());
        }
    }
}
