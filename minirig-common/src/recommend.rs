//! Build recommendations
//!
//! Suggestions for what to add next to a partial build, plus fixed starter
//! picks by budget tier.

use crate::catalog::Catalog;
use crate::compatibility::check_compatibility;
use crate::error::{Error, Result};
use crate::model::{BuildSelection, ComponentRecord, ComponentType};
use crate::normalize::parse_modules;
use serde::Serialize;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Recommendation {
    pub title: String,
    pub reason: String,
    /// Catalog component being suggested, absent for general hints
    #[serde(skip_serializing_if = "Option::is_none")]
    pub component_id: Option<i64>,
}

impl Recommendation {
    fn hint(title: &str, reason: &str) -> Self {
        Self {
            title: title.to_string(),
            reason: reason.to_string(),
            component_id: None,
        }
    }

    fn component(record: &ComponentRecord, reason: String) -> Self {
        Self {
            title: record.name(),
            reason,
            component_id: Some(record.id),
        }
    }
}

fn kit_fits(kit: &ComponentRecord, motherboard: &ComponentRecord) -> bool {
    let Some((count, size_gb)) = kit.as_memory().and_then(|m| parse_modules(&m.modules)) else {
        return false;
    };
    let Some(mb) = motherboard.as_motherboard() else {
        return false;
    };
    let capacity_ok = mb.memory_max == 0 || count.saturating_mul(size_gb) <= mb.memory_max;
    let slots_ok = mb.memory_slots == 0 || count <= mb.memory_slots;
    capacity_ok && slots_ok
}

/// Suggestions for the current selection. An empty selection gets none.
///
/// - CPU without motherboard: the first compatible motherboard in catalog order
/// - motherboard without memory: a lower-priced kit that fits the board
/// - any case: an SFX power supply hint
/// - no storage: an M.2 NVMe hint
pub fn recommendations(catalog: &Catalog, selection: &BuildSelection) -> Vec<Recommendation> {
    let mut out = Vec::new();
    if selection.is_empty() {
        return out;
    }

    if let (Some(cpu), false) = (
        selection.get(ComponentType::Cpu),
        selection.contains(ComponentType::Motherboard),
    ) {
        let board = catalog
            .motherboards()
            .into_iter()
            .find(|mb| check_compatibility(cpu, mb).compatible);
        if let Some(mb) = board {
            out.push(Recommendation::component(
                mb,
                format!(
                    "Compatible motherboard for your selected CPU, socket {}",
                    mb.socket()
                ),
            ));
        }
    }

    if let (Some(mb), false) = (
        selection.get(ComponentType::Motherboard),
        selection.contains(ComponentType::Memory),
    ) {
        let kits: Vec<&ComponentRecord> = catalog
            .list_by_type_sorted_by_price(ComponentType::Memory)
            .into_iter()
            .filter(|kit| kit_fits(kit, mb))
            .collect();
        // Lower third of the price range
        if let Some(kit) = kits.get(kits.len() / 3) {
            out.push(Recommendation::component(
                kit,
                "Good value memory option compatible with your motherboard".to_string(),
            ));
        }
    }

    if selection.contains(ComponentType::Case) {
        out.push(Recommendation::hint(
            "SFX Power Supply",
            "Consider an SFX power supply for better compatibility with ITX cases",
        ));
    }

    if !selection.contains(ComponentType::Storage) {
        out.push(Recommendation::hint(
            "M.2 NVMe SSD",
            "Save space and improve performance with M.2 storage",
        ));
    }

    debug!(count = out.len(), "Recommendations generated");
    out
}

/// Starter CPU/GPU pair for a budget
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StarterPicks {
    pub cpu: String,
    pub gpu: String,
    pub use_case: String,
}

/// Budget tiers: (exclusive upper bound, cpu, gpu). The last tier is open-ended.
pub const BUDGET_TIERS: &[(f64, &str, &str)] = &[
    (1000.0, "Intel Core i3-13100", "GTX 1660 Super"),
    (2000.0, "Ryzen 5 7600", "RTX 4060 Ti"),
    (f64::INFINITY, "Ryzen 9 7900X", "RTX 4080"),
];

/// Pick a starter CPU/GPU pair. `use_case` is echoed back.
pub fn starter_picks(budget: f64, use_case: &str) -> Result<StarterPicks> {
    if !budget.is_finite() || budget <= 0.0 {
        return Err(Error::InvalidBudget(budget));
    }

    let (_, cpu, gpu) = BUDGET_TIERS
        .iter()
        .find(|(limit, _, _)| budget < *limit)
        .copied()
        .unwrap_or(BUDGET_TIERS[BUDGET_TIERS.len() - 1]);

    Ok(StarterPicks {
        cpu: cpu.to_string(),
        gpu: gpu.to_string(),
        use_case: use_case.to_string(),
    })
}
