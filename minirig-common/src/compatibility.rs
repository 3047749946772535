//! Compatibility engine
//!
//! Pairwise CPU/motherboard check, the one-CPU-against-every-motherboard batch
//! check, and build-level checks over a whole [`BuildSelection`].
//!
//! All functions are pure. Records of the wrong type are not errors; their
//! socket simply reads as empty.

use crate::catalog::Catalog;
use crate::model::{BuildSelection, ComponentRecord, ComponentType};
use crate::normalize::{normalize_socket, parse_modules, wattage_from_name};
use crate::power::PowerEstimate;
use serde::Serialize;
use tracing::debug;

/// Outcome of a CPU/motherboard check
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CompatibilityVerdict {
    pub compatible: bool,
    /// Human-readable explanation, present when incompatible
    pub reason: Option<String>,
    pub normalized_cpu_socket: String,
    pub normalized_mb_socket: String,
}

/// One row of the batch check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MotherboardMatch {
    pub motherboard_id: i64,
    pub compatible: bool,
}

/// Brand-family gate: the CPU vendor must match the socket family.
///
/// Returns the mismatch reason, or `None` when the gate passes (including
/// brands that are neither AMD nor Intel).
fn brand_family_mismatch(cpu_brand: &str, mb_socket: &str) -> Option<String> {
    let brand = cpu_brand.to_uppercase();
    if brand.contains("AMD") && !mb_socket.starts_with("AM") {
        return Some(format!(
            "AMD CPUs require an AM-series socket, motherboard socket is '{}'",
            mb_socket
        ));
    }
    if brand.contains("INTEL") && !(mb_socket.starts_with("LGA") || mb_socket.starts_with("BGA")) {
        return Some(format!(
            "Intel CPUs require an LGA or BGA socket, motherboard socket is '{}'",
            mb_socket
        ));
    }
    None
}

/// Decide whether `cpu` fits `motherboard`.
///
/// The brand-family gate runs first and wins even when the sockets match
/// lexically. Otherwise the normalized sockets must be identical.
pub fn check_compatibility(cpu: &ComponentRecord, motherboard: &ComponentRecord) -> CompatibilityVerdict {
    let raw_cpu_socket = cpu.as_cpu().map(|c| c.socket.as_str()).unwrap_or_default();
    let raw_mb_socket = motherboard
        .as_motherboard()
        .map(|m| m.socket.as_str())
        .unwrap_or_default();
    let cpu_socket = normalize_socket(raw_cpu_socket);
    let mb_socket = normalize_socket(raw_mb_socket);

    let reason = match brand_family_mismatch(&cpu.brand, &mb_socket) {
        Some(mismatch) => Some(format!("Brand/socket family mismatch: {}", mismatch)),
        None if cpu_socket != mb_socket => Some(format!(
            "Socket mismatch: CPU socket '{}' does not match motherboard socket '{}'",
            raw_cpu_socket, raw_mb_socket
        )),
        None => None,
    };

    debug!(
        cpu = cpu.id,
        motherboard = motherboard.id,
        cpu_socket = %cpu_socket,
        mb_socket = %mb_socket,
        compatible = reason.is_none(),
        "Compatibility check"
    );

    CompatibilityVerdict {
        compatible: reason.is_none(),
        reason,
        normalized_cpu_socket: cpu_socket,
        normalized_mb_socket: mb_socket,
    }
}

/// Check one CPU against every motherboard, in catalog order.
///
/// Unknown ids and ids that are not CPUs yield an empty list.
pub fn check_against_all_motherboards(catalog: &Catalog, cpu_id: i64) -> Vec<MotherboardMatch> {
    let Some(cpu) = catalog
        .get(cpu_id)
        .filter(|c| c.component_type() == ComponentType::Cpu)
    else {
        debug!(cpu_id, "Batch check requested for a non-CPU id");
        return Vec::new();
    };

    catalog
        .motherboards()
        .into_iter()
        .map(|mb| MotherboardMatch {
            motherboard_id: mb.id,
            compatible: check_compatibility(cpu, mb).compatible,
        })
        .collect()
}

// ============================================================================
// Build-level checks
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Incompatible,
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildIssue {
    pub severity: Severity,
    /// Component types involved
    pub components: Vec<ComponentType>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildReport {
    /// False when any issue is [`Severity::Incompatible`]
    pub compatible: bool,
    pub issues: Vec<BuildIssue>,
}

impl BuildReport {
    fn from_issues(issues: Vec<BuildIssue>) -> Self {
        let compatible = issues.iter().all(|i| i.severity != Severity::Incompatible);
        Self { compatible, issues }
    }
}

fn issue(severity: Severity, components: &[ComponentType], message: String) -> BuildIssue {
    BuildIssue {
        severity,
        components: components.to_vec(),
        message,
    }
}

/// Check every pair of selected parts that can conflict.
///
/// Checks whose inputs are missing or unknown (zero) are skipped.
pub fn check_build(selection: &BuildSelection, estimate: &PowerEstimate) -> BuildReport {
    use ComponentType::*;
    let mut issues = Vec::new();

    let cpu = selection.get(Cpu);
    let motherboard = selection.get(Motherboard);

    if let (Some(cpu), Some(mb)) = (cpu, motherboard) {
        let verdict = check_compatibility(cpu, mb);
        if let Some(reason) = verdict.reason {
            issues.push(issue(Severity::Incompatible, &[Cpu, Motherboard], reason));
        }
    }

    let mb_specs = motherboard.and_then(|m| m.as_motherboard());
    let kit = selection
        .get(Memory)
        .and_then(|m| m.as_memory())
        .and_then(|m| parse_modules(&m.modules));

    if let (Some(mb), Some((count, size_gb))) = (mb_specs, kit) {
        let capacity = count.saturating_mul(size_gb);
        if mb.memory_max > 0 && size_gb > 0 && capacity > mb.memory_max {
            issues.push(issue(
                Severity::Incompatible,
                &[Memory, Motherboard],
                format!(
                    "Memory kit capacity ({}GB) exceeds the motherboard maximum ({}GB)",
                    capacity, mb.memory_max
                ),
            ));
        }
        if mb.memory_slots > 0 && count > mb.memory_slots {
            issues.push(issue(
                Severity::Incompatible,
                &[Memory, Motherboard],
                format!(
                    "Memory kit has {} modules but the motherboard only has {} slots",
                    count, mb.memory_slots
                ),
            ));
        }
    }

    let gpu_length = selection.get(Gpu).and_then(|g| g.as_gpu()).map(|g| g.length);
    let case_limit = selection
        .get(Case)
        .and_then(|c| c.as_case())
        .map(|c| c.max_gpu_length);
    if let (Some(length), Some(limit)) = (gpu_length, case_limit) {
        if length > 0 && limit > 0 && length > limit {
            issues.push(issue(
                Severity::Incompatible,
                &[Gpu, Case],
                format!(
                    "Graphics card length ({}mm) exceeds the case clearance ({}mm)",
                    length, limit
                ),
            ));
        }
    }

    if let Some(psu) = selection.get(Psu) {
        let wattage = psu
            .as_psu()
            .map(|p| p.wattage)
            .filter(|w| *w > 0)
            .or_else(|| wattage_from_name(&psu.name()))
            .unwrap_or(0);
        if wattage > 0 && wattage < estimate.total_watts {
            issues.push(issue(
                Severity::Incompatible,
                &[Psu],
                format!(
                    "Power supply wattage ({}W) may be insufficient for components (est. {}W)",
                    wattage, estimate.total_watts
                ),
            ));
        }
    }

    let cooler_rating = selection
        .get(Cooler)
        .and_then(|c| c.as_cooler())
        .map(|c| c.tdp_rating);
    let cpu_tdp = cpu.and_then(|c| c.as_cpu()).map(|c| c.tdp);
    if let (Some(rating), Some(tdp)) = (cooler_rating, cpu_tdp) {
        if rating > 0 && tdp > 0 && rating < tdp {
            issues.push(issue(
                Severity::Warning,
                &[Cooler, Cpu],
                format!(
                    "Cooler is rated for {}W but the CPU TDP is {}W; expect throttling under load",
                    rating, tdp
                ),
            ));
        }
    }

    BuildReport::from_issues(issues)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ComponentSpecs, CpuSpecs, MotherboardSpecs};

    fn cpu(brand: &str, socket: &str) -> ComponentRecord {
        ComponentRecord {
            id: 1,
            brand: brand.to_string(),
            model: "Test CPU".to_string(),
            price: 0.0,
            specs: ComponentSpecs::Cpu(CpuSpecs {
                socket: socket.to_string(),
                ..Default::default()
            }),
            dimensions: None,
        }
    }

    fn board(socket: &str) -> ComponentRecord {
        ComponentRecord {
            id: 2,
            brand: "ASUS".to_string(),
            model: "Test Board".to_string(),
            price: 0.0,
            specs: ComponentSpecs::Motherboard(MotherboardSpecs {
                socket: socket.to_string(),
                ..Default::default()
            }),
            dimensions: None,
        }
    }

    #[test]
    fn test_matching_sockets_compatible() {
        let verdict = check_compatibility(&cpu("AMD", "AM5"), &board("am 5"));
        assert!(verdict.compatible);
        assert!(verdict.reason.is_none());
        assert_eq!(verdict.normalized_cpu_socket, "AM5");
        assert_eq!(verdict.normalized_mb_socket, "AM5");
    }

    #[test]
    fn test_brand_gate_runs_before_socket_match() {
        // Sockets match lexically but AMD never ships on LGA
        let verdict = check_compatibility(&cpu("AMD", "LGA1700"), &board("LGA1700"));
        assert!(!verdict.compatible);
        assert!(verdict.reason.unwrap().contains("Brand/socket family mismatch"));
    }

    #[test]
    fn test_intel_gate() {
        let verdict = check_compatibility(&cpu("intel", "LGA1700"), &board("AM5"));
        assert!(!verdict.compatible);
        assert!(verdict.reason.unwrap().contains("family mismatch"));

        assert!(check_compatibility(&cpu("Intel", "BGA1744"), &board("BGA1744")).compatible);
    }

    #[test]
    fn test_socket_mismatch_quotes_raw_sockets() {
        let verdict = check_compatibility(&cpu("AMD", "AM4"), &board("AM5"));
        assert!(!verdict.compatible);
        let reason = verdict.reason.unwrap();
        assert!(reason.contains("'AM4'"));
        assert!(reason.contains("'AM5'"));
    }

    #[test]
    fn test_unknown_brand_needs_exact_match() {
        assert!(check_compatibility(&cpu("VIA", "X1"), &board("x 1")).compatible);
        assert!(!check_compatibility(&cpu("VIA", "X1"), &board("X2")).compatible);
    }

    #[test]
    fn test_wrong_record_type_reads_empty_socket() {
        let amd = cpu("AMD", "AM5");
        let verdict = check_compatibility(&amd, &amd);
        assert_eq!(verdict.normalized_cpu_socket, "AM5");
        assert_eq!(verdict.normalized_mb_socket, "");
        assert!(!verdict.compatible);

        let verdict = check_compatibility(&board("AM5"), &board("AM5"));
        assert_eq!(verdict.normalized_cpu_socket, "");
        assert_eq!(verdict.normalized_mb_socket, "AM5");
        assert!(!verdict.compatible);
    }
}
