//! End-to-end engine behavior over catalogs built from raw rows

use minirig_common::catalog::Catalog;
use minirig_common::compatibility::{check_against_all_motherboards, check_build, Severity};
use minirig_common::{check_compatibility, estimate_power, BuildSelection, ComponentType};
use tempfile::TempDir;

const CATALOG_JSON: &str = r#"{
    "case": [
        {"name": "Cooler Master NR200", "price": 89.99, "max_gpu_length": 330},
        {"name": "Tiny Box T1", "price": 59.99, "max_gpu_length": 240}
    ],
    "motherboard": [
        {"name": "ASUS ROG STRIX B650E-I GAMING WIFI", "price": 289.99, "memory_slots": 2, "memory_max": 96},
        {"name": "MSI MPG B550I GAMING EDGE WIFI", "price": 199.99, "socket": "AM4", "memory_slots": 2, "memory_max": 64},
        {"name": "Gigabyte Z790I AORUS ULTRA", "price": 299.99, "memory_slots": 2, "memory_max": 96}
    ],
    "cpu": [
        {"name": "AMD Ryzen 7 7800X3D", "price": "$449.00", "tdp": 120},
        {"name": "Intel Core i5-14600K", "price": "$319.00", "socket": "LGA 1700", "tdp": 125}
    ],
    "cooler": [
        {"name": "Noctua NH-L9a-AM5", "price": 54.95, "tdp_rating": 65}
    ],
    "memory": [
        {"name": "Kingston FURY Beast 128GB", "price": 349.99, "modules": "4x32GB"}
    ],
    "gpu": [
        {"name": "ASUS ROG Astral GeForce RTX 5090 32GB", "price": "$2,799.99"}
    ],
    "psu": [
        {"name": "Corsair SF600 600W 80+ Gold SFX", "price": 129.99}
    ]
}"#;

fn catalog() -> Catalog {
    Catalog::from_json_str(CATALOG_JSON).expect("catalog should parse")
}

fn find(catalog: &Catalog, fragment: &str) -> i64 {
    catalog
        .all()
        .iter()
        .find(|c| c.name().contains(fragment))
        .map(|c| c.id)
        .unwrap_or_else(|| panic!("no component matching {}", fragment))
}

// =============================================================================
// Compatibility
// =============================================================================

#[test]
fn test_amd_cpu_matches_only_am5_board() {
    let catalog = catalog();
    let cpu_id = find(&catalog, "7800X3D");

    let matches = check_against_all_motherboards(&catalog, cpu_id);
    let motherboards = catalog.motherboards();
    assert_eq!(matches.len(), motherboards.len());
    for (m, mb) in matches.iter().zip(motherboards) {
        assert_eq!(m.motherboard_id, mb.id, "catalog order is kept");
    }

    let compatible: Vec<i64> = matches.iter().filter(|m| m.compatible).map(|m| m.motherboard_id).collect();
    assert_eq!(compatible, vec![find(&catalog, "B650E-I")]);
}

#[test]
fn test_intel_cpu_against_am5_board_cites_family_mismatch() {
    let catalog = catalog();
    let cpu = catalog.get(find(&catalog, "14600K")).unwrap();
    let am5 = catalog.get(find(&catalog, "B650E-I")).unwrap();
    let z790 = catalog.get(find(&catalog, "Z790I")).unwrap();

    let verdict = check_compatibility(cpu, am5);
    assert!(!verdict.compatible);
    assert!(verdict.reason.unwrap().contains("family mismatch"));

    // "LGA 1700" normalizes to the inferred "LGA1700"
    let verdict = check_compatibility(cpu, z790);
    assert!(verdict.compatible, "{:?}", verdict.reason);
    assert_eq!(verdict.normalized_cpu_socket, "LGA1700");
}

#[test]
fn test_batch_check_non_cpu_ids_are_empty() {
    let catalog = catalog();
    assert!(check_against_all_motherboards(&catalog, 9_999).is_empty());
    assert!(check_against_all_motherboards(&catalog, find(&catalog, "NR200")).is_empty());
}

#[test]
fn test_compatibility_is_idempotent() {
    let catalog = catalog();
    let cpu = catalog.get(find(&catalog, "7800X3D")).unwrap();
    for mb in catalog.motherboards() {
        assert_eq!(check_compatibility(cpu, mb), check_compatibility(cpu, mb));
    }
}

// =============================================================================
// Power
// =============================================================================

#[test]
fn test_power_estimate_is_idempotent() {
    let catalog = catalog();
    let ids: Vec<i64> = catalog.all().iter().map(|c| c.id).collect();
    let selection = catalog.selection_for(&ids);
    assert_eq!(estimate_power(&selection), estimate_power(&selection));
}

#[test]
fn test_recommended_psu_is_rounded_and_floored() {
    let catalog = catalog();
    let mut ids = Vec::new();
    for component_type in ComponentType::ALL {
        for record in catalog.list_by_type(component_type) {
            ids.push(record.id);
            let estimate = estimate_power(&catalog.selection_for(&ids));
            assert_eq!(estimate.recommended_psu_watts % 50, 0);
            assert!(estimate.recommended_psu_watts >= 450);
            assert!(estimate.recommended_psu_watts >= estimate.total_watts);
        }
    }
}

#[test]
fn test_flagship_gpu_needs_850() {
    let catalog = catalog();
    let selection = catalog.selection_for(&[find(&catalog, "RTX 5090")]);
    let estimate = estimate_power(&selection);
    assert_eq!(estimate.breakdown.gpu, Some(575));
    assert!(estimate.recommended_psu_watts >= 850);
}

#[test]
fn test_empty_selection_estimate() {
    let estimate = estimate_power(&BuildSelection::new());
    assert_eq!(estimate.total_watts, 76);
    assert_eq!(estimate.recommended_psu_watts, 450);
}

// =============================================================================
// Build checks
// =============================================================================

#[test]
fn test_build_report_collects_every_conflict() {
    let catalog = catalog();
    let ids = [
        find(&catalog, "Tiny Box"),
        find(&catalog, "B550I"),
        find(&catalog, "7800X3D"),
        find(&catalog, "NH-L9a"),
        find(&catalog, "FURY Beast"),
        find(&catalog, "RTX 5090"),
        find(&catalog, "SF600"),
    ];
    let selection = catalog.selection_for(&ids);
    let report = check_build(&selection, &estimate_power(&selection));

    assert!(!report.compatible);
    let messages: Vec<&str> = report.issues.iter().map(|i| i.message.as_str()).collect();
    assert!(messages.iter().any(|m| m.contains("Socket mismatch")), "{:?}", messages);
    assert!(messages.iter().any(|m| m.contains("capacity (128GB)")), "{:?}", messages);
    assert!(messages.iter().any(|m| m.contains("4 modules")), "{:?}", messages);
    assert!(messages.iter().any(|m| m.contains("case clearance (240mm)")), "{:?}", messages);
    assert!(messages.iter().any(|m| m.contains("Power supply wattage (600W)")), "{:?}", messages);

    let cooler = report
        .issues
        .iter()
        .find(|i| i.components.contains(&ComponentType::Cooler))
        .unwrap();
    assert_eq!(cooler.severity, Severity::Warning);
}

#[test]
fn test_cooler_warning_alone_keeps_build_compatible() {
    let catalog = catalog();
    let selection = catalog.selection_for(&[find(&catalog, "7800X3D"), find(&catalog, "NH-L9a")]);
    let report = check_build(&selection, &estimate_power(&selection));
    assert!(report.compatible);
    assert_eq!(report.issues.len(), 1);
}

// =============================================================================
// Catalog file loading
// =============================================================================

#[tokio::test]
async fn test_load_catalog_from_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("parts.json");
    std::fs::write(&path, CATALOG_JSON).unwrap();

    let loaded = Catalog::load_from_file(&path).await.unwrap();
    assert_eq!(loaded.len(), catalog().len());
    assert_eq!(loaded.all()[0].name(), "Cooler Master NR200");
    assert_eq!(loaded.all()[0].id, 1);
}

#[tokio::test]
async fn test_missing_catalog_file_is_io_error() {
    let temp_dir = TempDir::new().unwrap();
    let result = Catalog::load_from_file(&temp_dir.path().join("missing.json")).await;
    assert!(matches!(result, Err(minirig_common::Error::Io(_))));
}
