//! Power estimator
//!
//! Sums per-component draw for a [`BuildSelection`] and sizes a PSU for it.
//! Every term is a non-negative integer wattage; the estimator never fails.

use crate::inference::{gpu_chip_spec, infer_gpu_chip};
use crate::model::{BuildSelection, ComponentRecord, ComponentType};
use crate::normalize::parse_modules;
use serde::Serialize;
use tracing::debug;

/// Motherboard and chipset baseline, always counted
pub const BASE_WATTS: u32 = 35;
pub const MEMORY_WATTS_PER_MODULE: u32 = 5;
/// Module count assumed when a memory kit layout cannot be read
pub const DEFAULT_MEMORY_MODULES: u32 = 2;
pub const SSD_WATTS: u32 = 5;
pub const HDD_WATTS: u32 = 10;
pub const FAN_COUNT: u32 = 3;
pub const FAN_WATTS: u32 = 3;
pub const RGB_WATTS: u32 = 10;
pub const USB_WATTS: u32 = 10;
pub const DEFAULT_CPU_TDP: u32 = 95;
pub const DEFAULT_GPU_TDP: u32 = 250;

/// Smallest PSU ever recommended
pub const MIN_PSU_WATTS: u32 = 450;
/// Smallest PSU recommended once the GPU term exceeds [`HIGH_END_GPU_WATTS`]
pub const HIGH_END_MIN_PSU_WATTS: u32 = 850;
pub const HIGH_END_GPU_WATTS: u32 = 350;

/// TDP by CPU family, matched case-insensitively against "brand model"
pub const CPU_TDP_ESTIMATES: &[(&str, u32)] = &[
    ("Intel Core Ultra 9", 65),
    ("Intel Core Ultra 7", 45),
    ("Intel Core Ultra 5", 28),
    ("Intel Core i9", 125),
    ("Intel Core i7", 95),
    ("Intel Core i5", 65),
    ("Intel Core i3", 55),
    ("AMD Ryzen 9", 170),
    ("AMD Ryzen 7", 105),
    ("AMD Ryzen 5", 65),
    ("AMD Ryzen 3", 45),
];

/// GPU draw by lowercase name fragment, for chips missing from the reference
/// table. More specific fragments first.
pub const GPU_TDP_PATTERNS: &[(&str, u32)] = &[
    ("5090", 575),
    ("5080", 360),
    ("5070 ti", 300),
    ("5070", 250),
    ("5060 ti", 200),
    ("5060", 170),
    ("4090", 450),
    ("4080", 320),
    ("4070 ti", 285),
    ("4070", 200),
    ("4060 ti", 160),
    ("4060", 115),
    ("3060 ti", 200),
    ("3060", 170),
    ("1660", 125),
    ("9700 xt", 320),
    ("9700", 290),
    ("9600 xt", 250),
    ("9600", 225),
    ("7900 xtx", 355),
    ("7900 xt", 315),
    ("7800 xt", 263),
    ("7600", 165),
    ("6700 xt", 230),
    ("b570", 150),
    ("a770", 225),
    ("a750", 225),
];

/// Per-term wattage, serialized in estimation order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct PowerBreakdown {
    pub base: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cpu: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gpu: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub memory: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub storage: Option<u32>,
    pub overhead: u32,
    pub overclock_margin: u32,
}

impl PowerBreakdown {
    /// Present terms as (category, watts), in estimation order
    pub fn entries(&self) -> Vec<(&'static str, u32)> {
        [
            ("base", Some(self.base)),
            ("cpu", self.cpu),
            ("gpu", self.gpu),
            ("memory", self.memory),
            ("storage", self.storage),
            ("overhead", Some(self.overhead)),
            ("overclock_margin", Some(self.overclock_margin)),
        ]
        .into_iter()
        .filter_map(|(name, watts)| watts.map(|w| (name, w)))
        .collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PowerEstimate {
    pub total_watts: u32,
    pub recommended_psu_watts: u32,
    pub breakdown: PowerBreakdown,
}

/// Round up to the next multiple of 50; exact multiples are unchanged
pub fn round_up_to_50(watts: u32) -> u32 {
    watts.div_ceil(50).saturating_mul(50)
}

fn cpu_watts(cpu: &ComponentRecord) -> u32 {
    let tdp = cpu
        .as_cpu()
        .map(|c| c.tdp)
        .filter(|tdp| *tdp > 0)
        .unwrap_or_else(|| {
            let name = cpu.name().to_lowercase();
            CPU_TDP_ESTIMATES
                .iter()
                .find(|(family, _)| name.contains(&family.to_lowercase()))
                .map(|(_, tdp)| *tdp)
                .unwrap_or(DEFAULT_CPU_TDP)
        });
    // 20% headroom for boost
    tdp.saturating_mul(6) / 5
}

fn gpu_watts(gpu: &ComponentRecord) -> u32 {
    let name = gpu.name();
    let explicit = gpu.as_gpu().map(|g| g.chip.as_str()).unwrap_or_default();
    let chip = infer_gpu_chip(&name, explicit, gpu.price);

    if let Some(spec) = gpu_chip_spec(&chip) {
        return spec.tdp_watts;
    }

    let haystack = format!("{} {}", chip, name).to_lowercase();
    GPU_TDP_PATTERNS
        .iter()
        .find(|(pattern, _)| haystack.contains(pattern))
        .map(|(_, watts)| *watts)
        .unwrap_or_else(|| {
            debug!(gpu = %name, chip = %chip, "No TDP data for GPU, using default");
            DEFAULT_GPU_TDP
        })
}

fn memory_watts(memory: &ComponentRecord) -> u32 {
    let modules = memory
        .as_memory()
        .and_then(|m| parse_modules(&m.modules))
        .map(|(count, _)| count)
        .unwrap_or(DEFAULT_MEMORY_MODULES);
    modules.saturating_mul(MEMORY_WATTS_PER_MODULE)
}

fn storage_watts(storage: &ComponentRecord) -> u32 {
    let is_solid_state = storage.as_storage().is_some_and(|s| {
        let kind = format!("{} {}", s.form_factor, s.interface).to_lowercase();
        ["ssd", "m.2", "nvme"].iter().any(|marker| kind.contains(marker))
    });
    if is_solid_state {
        SSD_WATTS
    } else {
        HDD_WATTS
    }
}

/// Estimate total draw and a recommended PSU size for a build.
///
/// An empty selection still counts the base, fan/RGB/USB overhead and the
/// overclocking margin (76 W, 450 W PSU).
pub fn estimate_power(selection: &BuildSelection) -> PowerEstimate {
    let mut breakdown = PowerBreakdown {
        base: BASE_WATTS,
        cpu: selection.get(ComponentType::Cpu).map(cpu_watts),
        gpu: selection.get(ComponentType::Gpu).map(gpu_watts),
        memory: selection.get(ComponentType::Memory).map(memory_watts),
        storage: selection.get(ComponentType::Storage).map(storage_watts),
        overhead: FAN_COUNT * FAN_WATTS + RGB_WATTS + USB_WATTS,
        overclock_margin: 0,
    };

    let subtotal = breakdown
        .entries()
        .iter()
        .fold(0u32, |acc, (_, watts)| acc.saturating_add(*watts));
    breakdown.overclock_margin = subtotal / 5;
    let total_watts = subtotal.saturating_add(breakdown.overclock_margin);

    let mut recommended_psu_watts = round_up_to_50(total_watts).max(MIN_PSU_WATTS);
    if breakdown.gpu.unwrap_or(0) > HIGH_END_GPU_WATTS {
        recommended_psu_watts = recommended_psu_watts.max(HIGH_END_MIN_PSU_WATTS);
    }

    debug!(
        components = selection.len(),
        total_watts,
        recommended_psu_watts,
        "Power estimate"
    );

    PowerEstimate {
        total_watts,
        recommended_psu_watts,
        breakdown,
    }
}
