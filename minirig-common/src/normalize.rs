//! Spec normalizer
//!
//! Turns raw catalog rows (string-keyed JSON objects whose values may be
//! strings, numbers, booleans or small arrays) into typed
//! [`ComponentRecord`]s.
//!
//! Every parser here fails soft: unparseable numbers become zero, missing
//! text becomes an empty string. Nothing in this module returns an error or
//! panics on bad input.

use crate::inference::{
    gpu_chip_spec, infer_cpu_socket, infer_gpu_chip, infer_motherboard_socket,
};
use crate::model::{
    CaseSpecs, ComponentRecord, ComponentSpecs, ComponentType, CoolerSpecs, CpuSpecs, Dimensions,
    GpuSpecs, MemorySpecs, MotherboardSpecs, PsuSpecs, StorageSpecs,
};
use serde_json::Value;

/// One row as supplied by the catalog source
pub type RawRow = serde_json::Map<String, Value>;

/// 80 PLUS ratings recognized in PSU names
const EFFICIENCY_RATINGS: &[&str] = &["titanium", "platinum", "gold", "silver", "bronze", "white"];

/// Largest plausible VRAM size, guards against reading "5070 G..." as 5070 GB
const MAX_VRAM_GB: u32 = 64;

// ============================================================================
// Field access
// ============================================================================

/// Text of the first present, non-null key in `keys`.
///
/// Numbers and booleans are rendered as text, arrays are joined with commas
/// (catalog exports store e.g. memory speed as `[5, 6000]`).
pub fn field_text(row: &RawRow, keys: &[&str]) -> String {
    keys.iter()
        .filter_map(|key| row.get(*key))
        .find_map(value_text)
        .unwrap_or_default()
}

fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Array(items) => Some(
            items
                .iter()
                .filter_map(value_text)
                .collect::<Vec<_>>()
                .join(","),
        ),
        Value::Object(_) => None,
    }
}

// ============================================================================
// Scalar parsers
// ============================================================================

/// Split "Brand Model Name" into ("Brand", "Model Name")
pub fn split_name(name: &str) -> (String, String) {
    let trimmed = name.trim();
    match trimmed.split_once(char::is_whitespace) {
        Some((brand, model)) => (brand.to_string(), model.trim().to_string()),
        None => (trimmed.to_string(), String::new()),
    }
}

/// Longest numeric prefix (`-?digits[.digits]`) of `s` after trimming
fn leading_number(s: &str) -> Option<f64> {
    let s = s.trim_start();
    let mut end = 0;
    let mut seen_digit = false;
    let mut seen_dot = false;
    for (i, c) in s.char_indices() {
        match c {
            '-' if i == 0 => {}
            '0'..='9' => seen_digit = true,
            '.' if !seen_dot => seen_dot = true,
            _ => break,
        }
        end = i + c.len_utf8();
    }
    if !seen_digit {
        return None;
    }
    s[..end].trim_end_matches('.').parse::<f64>().ok()
}

/// Parse a price such as "$1,299.99", "€ 89.90" or "129".
///
/// Leading currency symbols/codes and thousands separators are ignored.
/// Unparseable or negative input yields 0.
pub fn parse_price(raw: &str) -> f64 {
    let cleaned: String = raw
        .trim()
        .trim_start_matches(|c: char| !c.is_ascii_digit() && c != '-' && c != '.')
        .chars()
        .filter(|c| *c != ',' && !c.is_whitespace())
        .collect();
    match leading_number(&cleaned) {
        Some(price) if price.is_finite() && price > 0.0 => price,
        _ => 0.0,
    }
}

/// Parse a float with an optional unit suffix ("3.7 GHz", "45.2L")
///
/// Unparseable, negative or non-finite input yields 0.
pub fn parse_float(raw: &str) -> f64 {
    let cleaned = raw.replace(',', "");
    match leading_number(&cleaned) {
        Some(value) if value.is_finite() && value > 0.0 => value,
        _ => 0.0,
    }
}

/// Parse an integer with an optional unit suffix ("128 GB", "750W").
///
/// Fractions are truncated. Unparseable or negative input yields 0.
pub fn parse_int(raw: &str) -> u32 {
    let value = parse_float(raw);
    if value >= u32::MAX as f64 {
        u32::MAX
    } else {
        value as u32
    }
}

/// Parse a wattage field such as "750W", "750 watts" or "750"
pub fn parse_wattage(raw: &str) -> u32 {
    parse_int(raw)
}

/// Normalized socket token: whitespace removed, uppercased
pub fn normalize_socket(raw: &str) -> String {
    raw.chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_uppercase)
        .collect()
}

/// Digit runs in `s` with their byte ranges
fn digit_runs(s: &str) -> Vec<(usize, usize)> {
    let mut runs = Vec::new();
    let mut start = None;
    for (i, c) in s.char_indices() {
        match (c.is_ascii_digit(), start) {
            (true, None) => start = Some(i),
            (false, Some(st)) => {
                runs.push((st, i));
                start = None;
            }
            _ => {}
        }
    }
    if let Some(st) = start {
        runs.push((st, s.len()));
    }
    runs
}

/// Wattage written into a product name, e.g. "SF750 750W 80+ Platinum" -> 750.
///
/// Looks for a three or four digit number directly followed (spaces allowed)
/// by "W", "watt" or "watts".
pub fn wattage_from_name(name: &str) -> Option<u32> {
    digit_runs(name).into_iter().find_map(|(start, end)| {
        let digits = &name[start..end];
        if !(3..=4).contains(&digits.len()) {
            return None;
        }
        let next = name[end..].trim_start().chars().next()?;
        if next.eq_ignore_ascii_case(&'w') {
            digits.parse().ok()
        } else {
            None
        }
    })
}

/// First 80 PLUS rating mentioned in a product name, uppercased
pub fn efficiency_from_name(name: &str) -> Option<String> {
    let lower = name.to_lowercase();
    EFFICIENCY_RATINGS
        .iter()
        .filter_map(|rating| lower.find(rating).map(|pos| (pos, *rating)))
        .min_by_key(|(pos, _)| *pos)
        .map(|(_, rating)| rating.to_uppercase())
}

/// VRAM size written into a GPU name ("12GB", "16 G"), in GB
pub fn vram_from_name(name: &str) -> Option<u32> {
    digit_runs(name).into_iter().find_map(|(start, end)| {
        let next = name[end..].trim_start().chars().next()?;
        if !next.eq_ignore_ascii_case(&'g') {
            return None;
        }
        name[start..end]
            .parse::<u32>()
            .ok()
            .filter(|gb| (1..=MAX_VRAM_GB).contains(gb))
    })
}

/// Parse a memory kit layout into (module count, module size in GB).
///
/// Accepts "2x16GB", "2 x 16", "4X8" and the export form "2,16".
/// Returns `None` when the module count is missing or zero.
pub fn parse_modules(raw: &str) -> Option<(u32, u32)> {
    let lower = raw.trim().to_lowercase();
    let (count, size) = lower
        .split_once('x')
        .or_else(|| lower.split_once(','))
        .unwrap_or((lower.as_str(), ""));
    let count = leading_number(count)?;
    if !count.is_finite() || count < 1.0 {
        return None;
    }
    Some((count as u32, parse_int(size)))
}

// ============================================================================
// Row normalization
// ============================================================================

fn dimensions_from_row(row: &RawRow) -> Option<Dimensions> {
    let Some(Value::Object(dims)) = row.get("dimensions") else {
        return None;
    };
    Some(Dimensions {
        length: parse_float(&field_text(dims, &["length"])),
        width: parse_float(&field_text(dims, &["width"])),
        height: parse_float(&field_text(dims, &["height"])),
    })
}

/// Build a typed record from a raw catalog row.
///
/// Brand and model come from explicit `brand`/`model` keys when present,
/// otherwise from splitting the `name` field. Missing chip and socket fields
/// are inferred from the product name.
pub fn normalize(row: &RawRow, component_type: ComponentType, id: i64) -> ComponentRecord {
    let name = field_text(row, &["name"]);
    let (split_brand, split_model) = split_name(&name);

    let brand = Some(field_text(row, &["brand"]))
        .filter(|b| !b.is_empty())
        .unwrap_or(split_brand);
    let model = Some(field_text(row, &["model"]))
        .filter(|m| !m.is_empty())
        .unwrap_or(split_model);
    let full_name = if name.is_empty() {
        format!("{} {}", brand, model).trim().to_string()
    } else {
        name
    };

    let price = parse_price(&field_text(row, &["price"]));
    let text = |keys: &[&str]| field_text(row, keys);
    let int = |keys: &[&str]| parse_int(&field_text(row, keys));
    let float = |keys: &[&str]| parse_float(&field_text(row, keys));

    let mut dimensions = dimensions_from_row(row);

    let specs = match component_type {
        ComponentType::Cpu => ComponentSpecs::Cpu(CpuSpecs {
            socket: infer_cpu_socket(&full_name, &text(&["socket"])),
            core_count: int(&["core_count", "cores"]),
            base_clock: float(&["base_clock", "core_clock"]),
            boost_clock: float(&["boost_clock"]),
            tdp: int(&["tdp"]),
            integrated_graphics: text(&["integrated_graphics", "graphics"]),
            microarchitecture: text(&["microarchitecture"]),
        }),
        ComponentType::Motherboard => ComponentSpecs::Motherboard(MotherboardSpecs {
            socket: infer_motherboard_socket(&full_name, &text(&["socket"])),
            form_factor: text(&["form_factor"]),
            memory_slots: int(&["memory_slots"]),
            memory_max: int(&["memory_max", "max_memory"]),
            color: text(&["color"]),
        }),
        ComponentType::Gpu => {
            let chip = infer_gpu_chip(&full_name, &text(&["chip", "chipset"]), price);
            let memory = Some(int(&["memory"]))
                .filter(|gb| *gb > 0)
                .or_else(|| vram_from_name(&full_name))
                .unwrap_or(0);
            let mut length = int(&["length"]);

            if dimensions.is_none() {
                dimensions = gpu_chip_spec(&chip).map(|spec| Dimensions {
                    length: if length > 0 { length as f64 } else { spec.length_mm as f64 },
                    width: spec.width_mm as f64,
                    height: spec.height_mm as f64,
                });
            }
            if length == 0 {
                length = dimensions.map(|d| d.length as u32).unwrap_or(0);
            }

            ComponentSpecs::Gpu(GpuSpecs {
                chip,
                memory,
                base_clock: float(&["base_clock", "core_clock"]),
                boost_clock: float(&["boost_clock"]),
                length,
            })
        }
        ComponentType::Memory => ComponentSpecs::Memory(MemorySpecs {
            speed: text(&["speed"]),
            modules: text(&["modules"]),
            latency: float(&["latency", "first_word_latency"]),
            cas: int(&["cas", "cas_latency"]),
        }),
        ComponentType::Storage => ComponentSpecs::Storage(StorageSpecs {
            form_factor: text(&["form_factor"]),
            interface: text(&["interface", "type"]),
            capacity: int(&["capacity"]),
        }),
        ComponentType::Psu => ComponentSpecs::Psu(PsuSpecs {
            wattage: Some(parse_wattage(&text(&["wattage"])))
                .filter(|w| *w > 0)
                .or_else(|| wattage_from_name(&full_name))
                .unwrap_or(0),
            form_factor: text(&["form_factor"]),
            efficiency: Some(text(&["efficiency"]))
                .filter(|e| !e.is_empty())
                .or_else(|| efficiency_from_name(&full_name))
                .unwrap_or_default(),
            psu_type: text(&["type"]),
        }),
        ComponentType::Case => ComponentSpecs::Case(CaseSpecs {
            color: text(&["color"]),
            side_panel: text(&["side_panel"]),
            external_volume: float(&["external_volume"]),
            internal_35_bays: int(&["internal_35_bays"]),
            max_gpu_length: int(&["max_gpu_length"]),
        }),
        ComponentType::Cooler => ComponentSpecs::Cooler(CoolerSpecs {
            cooler_type: text(&["type"]),
            height: int(&["height"]),
            tdp_rating: int(&["tdp_rating"]),
        }),
    };

    ComponentRecord {
        id,
        brand,
        model,
        price,
        specs,
        dimensions,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(value: Value) -> RawRow {
        match value {
            Value::Object(map) => map,
            _ => panic!("test row must be an object"),
        }
    }

    #[test]
    fn test_split_name() {
        assert_eq!(
            split_name("Corsair SF750 Platinum"),
            ("Corsair".to_string(), "SF750 Platinum".to_string())
        );
        assert_eq!(split_name("  NZXT  "), ("NZXT".to_string(), String::new()));
        assert_eq!(split_name(""), (String::new(), String::new()));
    }

    #[test]
    fn test_parse_price() {
        assert_eq!(parse_price("$1,299.99"), 1299.99);
        assert_eq!(parse_price("129"), 129.0);
        assert_eq!(parse_price("€ 89.90"), 89.9);
        assert_eq!(parse_price("USD 45"), 45.0);
        assert_eq!(parse_price(""), 0.0);
        assert_eq!(parse_price("call for price"), 0.0);
        assert_eq!(parse_price("-10"), 0.0);
    }

    #[test]
    fn test_parse_numbers_fail_soft() {
        assert_eq!(parse_int("10"), 10);
        assert_eq!(parse_int("128 GB"), 128);
        assert_eq!(parse_int("3.9"), 3);
        assert_eq!(parse_int("n/a"), 0);
        assert_eq!(parse_int(""), 0);
        assert_eq!(parse_float("45.2 L"), 45.2);
        assert_eq!(parse_float("4.7GHz"), 4.7);
        assert_eq!(parse_float("-1"), 0.0);
        assert_eq!(parse_wattage("750W"), 750);
        assert_eq!(parse_wattage("1,000 W"), 1000);
    }

    #[test]
    fn test_normalize_socket() {
        assert_eq!(normalize_socket(" lga 1700 "), "LGA1700");
        assert_eq!(normalize_socket("am5"), "AM5");
        assert_eq!(normalize_socket(""), "");
    }

    #[test]
    fn test_wattage_from_name() {
        assert_eq!(wattage_from_name("Corsair SF750 750W 80+ Platinum"), Some(750));
        assert_eq!(wattage_from_name("Lian Li SP850 850 watts"), Some(850));
        assert_eq!(wattage_from_name("be quiet! 1000 W Dark Power"), Some(1000));
        assert_eq!(wattage_from_name("Cooler Master V SFX Gold"), None);
        assert_eq!(wattage_from_name("12345W"), None);
    }

    #[test]
    fn test_efficiency_from_name() {
        assert_eq!(
            efficiency_from_name("Corsair SF750 80+ Platinum"),
            Some("PLATINUM".to_string())
        );
        assert_eq!(efficiency_from_name("gold and silver"), Some("GOLD".to_string()));
        assert_eq!(efficiency_from_name("Generic 500"), None);
    }

    #[test]
    fn test_vram_from_name() {
        assert_eq!(vram_from_name("ASUS RTX 5070 12GB"), Some(12));
        assert_eq!(vram_from_name("Sapphire RX 9700 XT 16 G"), Some(16));
        assert_eq!(vram_from_name("MSI RTX 5070 GAMING TRIO"), None);
    }

    #[test]
    fn test_parse_modules() {
        assert_eq!(parse_modules("2x16GB"), Some((2, 16)));
        assert_eq!(parse_modules("4 X 8"), Some((4, 8)));
        assert_eq!(parse_modules("2,16"), Some((2, 16)));
        assert_eq!(parse_modules("1"), Some((1, 0)));
        assert_eq!(parse_modules("x16"), None);
        assert_eq!(parse_modules("0x16"), None);
        assert_eq!(parse_modules(""), None);
    }

    #[test]
    fn test_normalize_cpu_row() {
        let raw = row(json!({
            "name": "AMD Ryzen 7 7800X3D",
            "price": "$449.00",
            "core_count": 8,
            "core_clock": "4.2",
            "boost_clock": 5.0,
            "tdp": "120",
            "graphics": "Radeon",
        }));
        let record = normalize(&raw, ComponentType::Cpu, 3);
        assert_eq!(record.id, 3);
        assert_eq!(record.brand, "AMD");
        assert_eq!(record.model, "Ryzen 7 7800X3D");
        assert_eq!(record.price, 449.0);

        let cpu = record.as_cpu().unwrap();
        assert_eq!(cpu.socket, "AM5", "socket inferred from family");
        assert_eq!(cpu.core_count, 8);
        assert_eq!(cpu.base_clock, 4.2);
        assert_eq!(cpu.boost_clock, 5.0);
        assert_eq!(cpu.tdp, 120);
        assert_eq!(cpu.integrated_graphics, "Radeon");
        assert_eq!(cpu.microarchitecture, "");
    }

    #[test]
    fn test_normalize_tolerates_garbage() {
        let raw = row(json!({
            "price": "free!!",
            "tdp": "lots",
            "core_count": null,
            "socket": ["nested"],
        }));
        let record = normalize(&raw, ComponentType::Cpu, 1);
        assert_eq!(record.brand, "");
        assert_eq!(record.model, "");
        assert_eq!(record.price, 0.0);
        let cpu = record.as_cpu().unwrap();
        assert_eq!(cpu.tdp, 0);
        assert_eq!(cpu.core_count, 0);
    }

    #[test]
    fn test_explicit_brand_and_model_win() {
        let raw = row(json!({
            "name": "Cooler Master NR200",
            "brand": "Cooler Master",
            "model": "NR200",
            "price": 79.99,
            "dimensions": {"length": 376, "width": 185, "height": "274"},
            "max_gpu_length": 330,
        }));
        let record = normalize(&raw, ComponentType::Case, 1);
        assert_eq!(record.brand, "Cooler Master");
        assert_eq!(record.model, "NR200");
        assert_eq!(record.as_case().unwrap().max_gpu_length, 330);
        let dims = record.dimensions.unwrap();
        assert_eq!(dims.length, 376.0);
        assert_eq!(dims.height, 274.0);
    }

    #[test]
    fn test_normalize_gpu_infers_chip_and_dimensions() {
        let raw = row(json!({"name": "MSI GeForce RTX 5070 Ti 16GB VENTUS 3X", "price": 799.99}));
        let record = normalize(&raw, ComponentType::Gpu, 9);
        let gpu = record.as_gpu().unwrap();
        assert_eq!(gpu.chip, "RTX 5070 Ti");
        assert_eq!(gpu.memory, 16);
        assert_eq!(gpu.length, 285);
        assert_eq!(record.dimensions.unwrap().width, 112.0);
    }

    #[test]
    fn test_normalize_gpu_explicit_length_kept() {
        let raw = row(json!({"name": "Zotac RTX 5070 Solid SFF", "chipset": "GeForce RTX 5070", "length": "227 mm"}));
        let record = normalize(&raw, ComponentType::Gpu, 1);
        let gpu = record.as_gpu().unwrap();
        assert_eq!(gpu.chip, "GeForce RTX 5070");
        assert_eq!(gpu.length, 227);
        assert_eq!(record.dimensions.unwrap().length, 227.0);
    }

    #[test]
    fn test_normalize_psu_reads_name() {
        let raw = row(json!({"name": "Corsair SF750 750W 80+ Platinum SFX", "price": "169.99"}));
        let record = normalize(&raw, ComponentType::Psu, 1);
        let psu = record.as_psu().unwrap();
        assert_eq!(psu.wattage, 750);
        assert_eq!(psu.efficiency, "PLATINUM");
    }

    #[test]
    fn test_normalize_memory_and_storage_aliases() {
        let memory = normalize(
            &row(json!({"name": "G.Skill Flare X5 32GB", "speed": [5, 6000], "modules": "2x16", "first_word_latency": 10, "cas_latency": 30})),
            ComponentType::Memory,
            1,
        );
        let specs = memory.as_memory().unwrap();
        assert_eq!(specs.speed, "5,6000");
        assert_eq!(specs.modules, "2x16");
        assert_eq!(specs.latency, 10.0);
        assert_eq!(specs.cas, 30);

        let storage = normalize(
            &row(json!({"name": "Samsung 990 Pro 2TB", "type": "SSD", "form_factor": "M.2-2280", "capacity": 2000})),
            ComponentType::Storage,
            2,
        );
        let specs = storage.as_storage().unwrap();
        assert_eq!(specs.interface, "SSD");
        assert_eq!(specs.form_factor, "M.2-2280");
        assert_eq!(specs.capacity, 2000);
    }
}
