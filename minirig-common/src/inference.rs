//! Chip and socket inference
//!
//! Catalog rows frequently omit the GPU chip or the CPU/motherboard socket,
//! but the information is usually embedded in the product name. Every rule
//! set here is an explicit ordered table evaluated first-match-wins.
//!
//! Explicit data always wins: each `infer_*` function returns the explicit
//! value unchanged when it is non-empty.
//!
//! The results are best-effort labels for display and power lookup only.
//! They are never a guarantee of the physical silicon.

use tracing::debug;

/// Uppercase with all whitespace removed, so "RTX 5070 Ti", "RTX5070TI" and
/// "rtx 5070ti" compare equal.
pub(crate) fn squash(s: &str) -> String {
    s.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_uppercase)
        .collect()
}

// ============================================================================
// GPU chips
// ============================================================================

/// Chip labels recognized inside product names.
///
/// No entry may be contained in a later entry (after [`squash`]), otherwise
/// the shorter label would shadow the more specific one. Covered by tests.
pub const KNOWN_GPU_CHIPS: &[&str] = &[
    // NVIDIA RTX 50
    "RTX 5090",
    "RTX 5080",
    "RTX 5070 Ti",
    "RTX 5070",
    "RTX 5060 Ti",
    "RTX 5060",
    // NVIDIA RTX 40
    "RTX 4090",
    "RTX 4080 SUPER",
    "RTX 4080",
    "RTX 4070 Ti SUPER",
    "RTX 4070 Ti",
    "RTX 4070 SUPER",
    "RTX 4070",
    "RTX 4060 Ti",
    "RTX 4060",
    // AMD RX 9000
    "RX 9700 XT",
    "RX 9700",
    "RX 9600 XT",
    "RX 9600",
    // AMD RX 7000
    "RX 7900 XTX",
    "RX 7900 XT",
    "RX 7900 GRE",
    "RX 7800 XT",
    "RX 7700 XT",
    "RX 7600 XT",
    "RX 7600",
    // Intel Arc
    "Arc B580",
    "Arc B570",
    "Arc A770",
    "Arc A750",
];

/// Board-partner model names that only ship with one chip.
///
/// A rule matches when every fragment occurs in the uppercased name.
/// Multi-fragment rules come before single-fragment ones.
pub const GPU_CODENAME_RULES: &[(&[&str], &str)] = &[
    (&["SUPRIM", "LIQUID"], "RTX 5090"),
    (&["VENTUS", "PLUS"], "RTX 5070"),
    (&["STEEL LEGEND", "XT"], "RX 9700 XT"),
    (&["ASTRAL"], "RTX 5090"),
    (&["VANGUARD"], "RTX 5080"),
    (&["TAICHI"], "RX 9700 XT"),
    (&["STEEL LEGEND"], "RX 9700"),
    (&["CHALLENGER"], "RX 9600"),
    (&["LIMITED EDITION"], "Arc B580"),
];

/// Price tiers used when nothing in the name is recognized: (exclusive lower bound, label)
pub const GPU_PRICE_TIERS: &[(f64, &str)] = &[
    (1500.0, "RTX 5080/5090"),
    (700.0, "RTX 5070/RX 9700"),
    (400.0, "RTX 5060/RX 9600"),
];

/// Label used when even the price gives no hint
pub const GENERIC_GPU_LABEL: &str = "GPU";

/// Infer the GPU chip label for a card.
///
/// 1. `explicit_chip` non-empty: returned unchanged
/// 2. known chip substring in `name` (case and spacing insensitive)
/// 3. vendor codename heuristics
/// 4. price tier, falling back to [`GENERIC_GPU_LABEL`]
pub fn infer_gpu_chip(name: &str, explicit_chip: &str, price: f64) -> String {
    let explicit = explicit_chip.trim();
    if !explicit.is_empty() {
        return explicit.to_string();
    }

    let squashed = squash(name);
    if let Some(chip) = KNOWN_GPU_CHIPS
        .iter()
        .find(|chip| squashed.contains(&squash(chip)))
    {
        return chip.to_string();
    }

    let upper = name.to_uppercase();
    if let Some((_, chip)) = GPU_CODENAME_RULES
        .iter()
        .find(|(fragments, _)| fragments.iter().all(|f| upper.contains(f)))
    {
        debug!(product = name, chip, "GPU chip inferred from vendor codename");
        return chip.to_string();
    }

    let label = GPU_PRICE_TIERS
        .iter()
        .find(|(floor, _)| price > *floor)
        .map(|(_, label)| *label)
        .unwrap_or(GENERIC_GPU_LABEL);
    debug!(product = name, price, label, "GPU chip inferred from price tier");
    label.to_string()
}

/// Reference card data per chip
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GpuChipSpec {
    pub chip: &'static str,
    pub tdp_watts: u32,
    pub length_mm: u32,
    pub width_mm: u32,
    pub height_mm: u32,
    pub power_connector: &'static str,
    /// Vendor-recommended PSU wattage
    pub recommended_psu: u32,
}

/// Reference data for current-generation chips, most specific first
pub const GPU_CHIP_SPECS: &[GpuChipSpec] = &[
    GpuChipSpec { chip: "RTX 5090", tdp_watts: 575, length_mm: 325, width_mm: 140, height_mm: 61, power_connector: "16-pin", recommended_psu: 1000 },
    GpuChipSpec { chip: "RTX 5080", tdp_watts: 360, length_mm: 310, width_mm: 140, height_mm: 61, power_connector: "16-pin", recommended_psu: 850 },
    GpuChipSpec { chip: "RTX 5070 Ti", tdp_watts: 300, length_mm: 285, width_mm: 112, height_mm: 51, power_connector: "16-pin", recommended_psu: 750 },
    GpuChipSpec { chip: "RTX 5070", tdp_watts: 250, length_mm: 244, width_mm: 112, height_mm: 40, power_connector: "16-pin", recommended_psu: 700 },
    GpuChipSpec { chip: "RTX 5060 Ti", tdp_watts: 200, length_mm: 232, width_mm: 112, height_mm: 40, power_connector: "8-pin", recommended_psu: 600 },
    GpuChipSpec { chip: "RTX 5060", tdp_watts: 170, length_mm: 212, width_mm: 112, height_mm: 40, power_connector: "8-pin", recommended_psu: 550 },
    GpuChipSpec { chip: "RX 9700 XT", tdp_watts: 320, length_mm: 300, width_mm: 130, height_mm: 50, power_connector: "2x 8-pin", recommended_psu: 800 },
    GpuChipSpec { chip: "RX 9700", tdp_watts: 290, length_mm: 290, width_mm: 125, height_mm: 50, power_connector: "2x 8-pin", recommended_psu: 750 },
    GpuChipSpec { chip: "RX 9600 XT", tdp_watts: 250, length_mm: 270, width_mm: 120, height_mm: 45, power_connector: "1x 8-pin", recommended_psu: 650 },
    GpuChipSpec { chip: "RX 9600", tdp_watts: 225, length_mm: 260, width_mm: 120, height_mm: 45, power_connector: "1x 8-pin", recommended_psu: 600 },
    GpuChipSpec { chip: "Arc B580", tdp_watts: 200, length_mm: 250, width_mm: 115, height_mm: 40, power_connector: "8-pin", recommended_psu: 600 },
];

/// Reference data for the first table chip contained in `label`
///
/// Tier labels such as "RTX 5080/5090" resolve to their first chip.
pub fn gpu_chip_spec(label: &str) -> Option<&'static GpuChipSpec> {
    let squashed = squash(label);
    if squashed.is_empty() {
        return None;
    }
    GPU_CHIP_SPECS
        .iter()
        .find(|spec| squashed.contains(&squash(spec.chip)))
}

// ============================================================================
// Sockets
// ============================================================================

/// CPU family rules: (family marker, model-number prefix, socket).
///
/// The model number is the first run of three or more digits after the
/// marker ("12600" in "Core i5-12600K", "7800" in "Ryzen 7 7800X3D").
/// An empty prefix matches any model number. Longer prefixes come first.
pub const CPU_SOCKET_RULES: &[(&str, &str, &str)] = &[
    ("CORE ULTRA", "", "LGA1851"),
    ("CORE I", "14", "LGA1700"),
    ("CORE I", "13", "LGA1700"),
    ("CORE I", "12", "LGA1700"),
    ("CORE I", "11", "LGA1200"),
    ("CORE I", "10", "LGA1200"),
    ("CORE I", "9", "LGA1151"),
    ("CORE I", "8", "LGA1151"),
    ("RYZEN", "9", "AM5"),
    ("RYZEN", "8", "AM5"),
    ("RYZEN", "7", "AM5"),
    ("RYZEN", "5", "AM4"),
    ("RYZEN", "4", "AM4"),
    ("RYZEN", "3", "AM4"),
    ("RYZEN", "2", "AM4"),
    ("RYZEN", "1", "AM4"),
];

/// Chipset codes embedded in motherboard names: (chipset, socket)
pub const CHIPSET_SOCKET_RULES: &[(&str, &str)] = &[
    // AMD AM5
    ("X870", "AM5"),
    ("B850", "AM5"),
    ("B840", "AM5"),
    ("X670", "AM5"),
    ("B650", "AM5"),
    ("A620", "AM5"),
    // AMD AM4
    ("X570", "AM4"),
    ("B550", "AM4"),
    ("A520", "AM4"),
    ("X470", "AM4"),
    ("B450", "AM4"),
    // Intel LGA1851
    ("Z890", "LGA1851"),
    ("B860", "LGA1851"),
    ("H810", "LGA1851"),
    // Intel LGA1700
    ("Z790", "LGA1700"),
    ("B760", "LGA1700"),
    ("H770", "LGA1700"),
    ("Z690", "LGA1700"),
    ("B660", "LGA1700"),
    ("H670", "LGA1700"),
    ("H610", "LGA1700"),
    // Intel LGA1200
    ("Z590", "LGA1200"),
    ("B560", "LGA1200"),
    ("H510", "LGA1200"),
];

/// First run of at least three ASCII digits in `s`
fn model_number(s: &str) -> Option<&str> {
    let bytes = s.as_bytes();
    let mut start = None;
    for (i, b) in bytes.iter().enumerate() {
        match (b.is_ascii_digit(), start) {
            (true, None) => start = Some(i),
            (false, Some(st)) => {
                if i - st >= 3 {
                    return Some(&s[st..i]);
                }
                start = None;
            }
            _ => {}
        }
    }
    start
        .filter(|st| bytes.len() - st >= 3)
        .map(|st| &s[st..])
}

/// Infer a CPU socket from its product name.
///
/// Returns `explicit_socket` unchanged when non-empty, otherwise the first
/// matching [`CPU_SOCKET_RULES`] socket, otherwise an empty string.
pub fn infer_cpu_socket(name: &str, explicit_socket: &str) -> String {
    let explicit = explicit_socket.trim();
    if !explicit.is_empty() {
        return explicit.to_string();
    }

    let upper = name.to_uppercase();
    for (marker, prefix, socket) in CPU_SOCKET_RULES {
        let Some(pos) = upper.find(marker) else {
            continue;
        };
        let tail = &upper[pos + marker.len()..];
        let matches = prefix.is_empty()
            || model_number(tail).is_some_and(|number| number.starts_with(prefix));
        if matches {
            debug!(product = name, socket, "CPU socket inferred from family");
            return socket.to_string();
        }
    }
    String::new()
}

/// Infer a motherboard socket from the chipset code in its name.
///
/// Returns `explicit_socket` unchanged when non-empty, otherwise the socket
/// of the first [`CHIPSET_SOCKET_RULES`] chipset found, otherwise empty.
pub fn infer_motherboard_socket(name: &str, explicit_socket: &str) -> String {
    let explicit = explicit_socket.trim();
    if !explicit.is_empty() {
        return explicit.to_string();
    }

    let upper = name.to_uppercase();
    CHIPSET_SOCKET_RULES
        .iter()
        .find(|(chipset, _)| upper.contains(chipset))
        .map(|(chipset, socket)| {
            debug!(product = name, chipset, socket, "Motherboard socket inferred from chipset");
            socket.to_string()
        })
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_chips_most_specific_first() {
        for (i, earlier) in KNOWN_GPU_CHIPS.iter().enumerate() {
            for later in &KNOWN_GPU_CHIPS[i + 1..] {
                assert!(
                    !squash(later).contains(&squash(earlier)),
                    "{:?} shadows later entry {:?}",
                    earlier,
                    later
                );
            }
        }
    }

    #[test]
    fn test_chip_spec_table_most_specific_first() {
        for (i, earlier) in GPU_CHIP_SPECS.iter().enumerate() {
            for later in &GPU_CHIP_SPECS[i + 1..] {
                assert!(!squash(later.chip).contains(&squash(earlier.chip)));
            }
        }
    }

    #[test]
    fn test_explicit_chip_wins() {
        assert_eq!(infer_gpu_chip("ASUS RTX 5090 ASTRAL", "RTX 4060", 3000.0), "RTX 4060");
        assert_eq!(infer_gpu_chip("whatever", "  Arc B580 ", 0.0), "Arc B580");
    }

    #[test]
    fn test_substring_match() {
        assert_eq!(infer_gpu_chip("ASUS ROG Astral RTX 5090 32GB", "", 0.0), "RTX 5090");
        assert_eq!(infer_gpu_chip("Sapphire Pulse rx 9700 xt", "", 0.0), "RX 9700 XT");
        assert_eq!(infer_gpu_chip("PowerColor Reaper RX 9700", "", 0.0), "RX 9700");
        assert_eq!(infer_gpu_chip("Gigabyte RTX5070Ti Eagle", "", 0.0), "RTX 5070 Ti");
        assert_eq!(infer_gpu_chip("Intel Arc B580 Limited Edition", "", 0.0), "Arc B580");
    }

    #[test]
    fn test_codename_match() {
        assert_eq!(infer_gpu_chip("MSI VENTUS PLUS", "", 0.0), "RTX 5070");
        assert_eq!(infer_gpu_chip("MSI Suprim Liquid SOC", "", 0.0), "RTX 5090");
        assert_eq!(infer_gpu_chip("ASRock Taichi OC", "", 0.0), "RX 9700 XT");
    }

    #[test]
    fn test_price_tiers() {
        assert_eq!(infer_gpu_chip("Mystery Card", "", 1999.0), "RTX 5080/5090");
        assert_eq!(infer_gpu_chip("Mystery Card", "", 1500.0), "RTX 5070/RX 9700");
        assert_eq!(infer_gpu_chip("Mystery Card", "", 701.0), "RTX 5070/RX 9700");
        assert_eq!(infer_gpu_chip("Mystery Card", "", 450.0), "RTX 5060/RX 9600");
        assert_eq!(infer_gpu_chip("Mystery Card", "", 400.0), "GPU");
        assert_eq!(infer_gpu_chip("", "", 0.0), "GPU");
    }

    #[test]
    fn test_gpu_chip_spec_lookup() {
        assert_eq!(gpu_chip_spec("RTX 5070 Ti").unwrap().tdp_watts, 300);
        assert_eq!(gpu_chip_spec("rtx 5070").unwrap().tdp_watts, 250);
        assert_eq!(gpu_chip_spec("RTX 5080/5090").unwrap().chip, "RTX 5080");
        assert!(gpu_chip_spec("GPU").is_none());
        assert!(gpu_chip_spec("").is_none());
    }

    #[test]
    fn test_cpu_socket_inference() {
        assert_eq!(infer_cpu_socket("AMD Ryzen 7 7800X3D", ""), "AM5");
        assert_eq!(infer_cpu_socket("AMD Ryzen 9 9950X", ""), "AM5");
        assert_eq!(infer_cpu_socket("AMD Ryzen 5 5600X", ""), "AM4");
        assert_eq!(infer_cpu_socket("Intel Core i5-12600K", ""), "LGA1700");
        assert_eq!(infer_cpu_socket("Intel Core i9-14900K", ""), "LGA1700");
        assert_eq!(infer_cpu_socket("Intel Core i5-10400", ""), "LGA1200");
        assert_eq!(infer_cpu_socket("Intel Core Ultra 7 265K", ""), "LGA1851");
        assert_eq!(infer_cpu_socket("Mystery Chip", ""), "");
        assert_eq!(infer_cpu_socket("AMD Ryzen 7 7800X3D", "AM4"), "AM4");
    }

    #[test]
    fn test_motherboard_socket_inference() {
        assert_eq!(infer_motherboard_socket("ASUS ROG STRIX B650E-I GAMING WIFI", ""), "AM5");
        assert_eq!(infer_motherboard_socket("MSI MPG B550I GAMING EDGE WIFI", ""), "AM4");
        assert_eq!(infer_motherboard_socket("Gigabyte Z790I AORUS ULTRA", ""), "LGA1700");
        assert_eq!(infer_motherboard_socket("ASRock Z890I Nova WiFi", ""), "LGA1851");
        assert_eq!(infer_motherboard_socket("Generic Board", ""), "");
        assert_eq!(infer_motherboard_socket("ASUS B650", "AM4"), "AM4");
    }

    #[test]
    fn test_model_number() {
        assert_eq!(model_number(" I5-12600K"), Some("12600"));
        assert_eq!(model_number(" 7 7800X3D"), Some("7800"));
        assert_eq!(model_number(" 5 5600"), Some("5600"));
        assert_eq!(model_number(" 7"), None);
    }
}
