//! Built-in sample catalog, used when no catalog file is configured
//!
//! Rows go through the normal normalizer so they exercise the same aliases
//! and inference as file data (some deliberately omit sockets or chips).

use crate::model::ComponentType;
use crate::normalize::RawRow;
use serde_json::{json, Value};

fn rows(component_type: ComponentType, values: Vec<Value>) -> Vec<(ComponentType, RawRow)> {
    values
        .into_iter()
        .filter_map(|value| match value {
            Value::Object(row) => Some((component_type, row)),
            _ => None,
        })
        .collect()
}

pub(super) fn seed_rows() -> Vec<(ComponentType, RawRow)> {
    let mut all = Vec::new();

    all.extend(rows(
        ComponentType::Case,
        vec![
            json!({"name": "NZXT H210", "price": 79.99, "color": "Black", "side_panel": "Tempered Glass",
                   "external_volume": 28.3, "internal_35_bays": 1, "max_gpu_length": 325,
                   "dimensions": {"length": 372, "width": 210, "height": 349}}),
            json!({"name": "Cooler Master NR200", "price": 89.99, "color": "Black", "side_panel": "Mesh",
                   "external_volume": "18.25 L", "internal_35_bays": 1, "max_gpu_length": 330,
                   "dimensions": {"length": 376, "width": 185, "height": 292}}),
            json!({"name": "Fractal Design Terra", "price": "$179.99", "color": "Jade",
                   "external_volume": 10.4, "internal_35_bays": 0, "max_gpu_length": 322}),
        ],
    ));

    all.extend(rows(
        ComponentType::Motherboard,
        vec![
            json!({"name": "ASUS ROG STRIX B660-I GAMING WIFI", "price": 189.99, "socket": "LGA1700",
                   "form_factor": "Mini-ITX", "memory_slots": 2, "memory_max": 64, "color": "Black"}),
            json!({"name": "MSI MPG B550I GAMING EDGE WIFI", "price": 199.99, "socket": "AM4",
                   "form_factor": "Mini-ITX", "memory_slots": 2, "memory_max": 64}),
            json!({"name": "ASUS ROG STRIX B650E-I GAMING WIFI", "price": "$289.99",
                   "form_factor": "Mini-ITX", "memory_slots": 2, "max_memory": "96 GB"}),
            json!({"name": "Gigabyte Z790I AORUS ULTRA", "price": 299.99,
                   "form_factor": "Mini-ITX", "memory_slots": 2, "memory_max": 96}),
            json!({"name": "ASRock Z890I Nova WiFi", "price": 349.99,
                   "form_factor": "Mini-ITX", "memory_slots": 2, "memory_max": 128}),
        ],
    ));

    all.extend(rows(
        ComponentType::Cpu,
        vec![
            json!({"name": "Intel Core i5-12600K", "price": 279.99, "socket": "LGA1700", "cores": 10,
                   "base_clock": 3.7, "boost_clock": 4.9, "tdp": 125, "graphics": "Intel UHD 770"}),
            json!({"name": "AMD Ryzen 5 5600X", "price": 229.99, "socket": "AM4", "cores": 6,
                   "base_clock": 3.7, "boost_clock": 4.6, "tdp": 65, "microarchitecture": "Zen 3"}),
            json!({"name": "AMD Ryzen 7 7800X3D", "price": "$449.00", "cores": 8,
                   "core_clock": "4.2 GHz", "boost_clock": "5.0 GHz", "tdp": "120 W",
                   "graphics": "Radeon", "microarchitecture": "Zen 4"}),
            json!({"name": "Intel Core Ultra 7 265K", "price": 394.99, "core_count": 20,
                   "base_clock": 3.9, "boost_clock": 5.5, "microarchitecture": "Arrow Lake"}),
        ],
    ));

    all.extend(rows(
        ComponentType::Cooler,
        vec![
            json!({"name": "Noctua NH-L9i", "price": 44.95, "type": "Air", "height": 37, "tdp_rating": 95,
                   "dimensions": {"length": 95, "width": 95, "height": 37}}),
            json!({"name": "Noctua NH-L12S", "price": 59.95, "type": "Air", "height": 70, "tdp_rating": 120,
                   "dimensions": {"length": 128, "width": 128, "height": 70}}),
        ],
    ));

    all.extend(rows(
        ComponentType::Memory,
        vec![
            json!({"name": "Corsair Vengeance LPX 16GB (2x8GB) DDR4-3200", "price": 89.99,
                   "speed": "DDR4-3200", "modules": "2x8GB", "cas_latency": 16}),
            json!({"name": "G.Skill Ripjaws V 16GB (2x8GB) DDR4-3600", "price": 79.99,
                   "speed": [4, 3600], "modules": "2,8", "cas_latency": 18}),
            json!({"name": "G.Skill Flare X5 32GB (2x16GB) DDR5-6000", "price": 104.99,
                   "speed": [5, 6000], "modules": "2x16GB", "first_word_latency": 10, "cas_latency": 30}),
            json!({"name": "Corsair Vengeance 64GB (2x32GB) DDR5-6000", "price": 189.99,
                   "speed": "DDR5-6000", "modules": "2x32GB", "cas": 30}),
            json!({"name": "Kingston FURY Beast 128GB (4x32GB) DDR5-5600", "price": 349.99,
                   "speed": "DDR5-5600", "modules": "4x32GB", "cas": 40}),
        ],
    ));

    all.extend(rows(
        ComponentType::Storage,
        vec![
            json!({"name": "Samsung 970 EVO Plus 1TB", "price": 129.99, "type": "M.2 NVMe",
                   "form_factor": "M.2-2280", "capacity": "1000 GB"}),
            json!({"brand": "Western Digital", "model": "Black SN750 1TB", "price": 139.99,
                   "type": "M.2 NVMe", "form_factor": "M.2-2280", "capacity": 1000}),
            json!({"name": "Seagate BarraCuda 2TB", "price": 54.99, "type": "7200 RPM",
                   "form_factor": "3.5\"", "capacity": 2000}),
        ],
    ));

    all.extend(rows(
        ComponentType::Gpu,
        vec![
            json!({"name": "NVIDIA GeForce RTX 3060 Ti 8GB", "price": 399.99, "chipset": "GeForce RTX 3060 Ti",
                   "memory": 8, "dimensions": {"length": 242, "width": 112, "height": 38}}),
            json!({"name": "AMD Radeon RX 6700 XT 12GB", "price": 479.99, "chipset": "Radeon RX 6700 XT",
                   "memory": 12, "dimensions": {"length": 267, "width": 120, "height": 40}}),
            json!({"name": "Zotac GeForce RTX 5070 Solid SFF 12GB", "price": 549.99, "length": "227 mm",
                   "boost_clock": 2512}),
            json!({"name": "Sapphire PULSE Radeon RX 9700 XT 16GB", "price": 629.99}),
            json!({"name": "MSI VENTUS 2X PLUS OC", "price": 569.99, "memory": 12}),
            json!({"name": "ASUS ROG Astral GeForce RTX 5090 32GB", "price": "$2,799.99"}),
        ],
    ));

    all.extend(rows(
        ComponentType::Psu,
        vec![
            json!({"name": "Corsair SF600 600W 80+ Gold SFX", "price": 129.99, "wattage": 600,
                   "efficiency": "Gold", "form_factor": "SFX", "type": "SFX"}),
            json!({"name": "Corsair SF750 750W 80+ Platinum SFX", "price": 169.99, "form_factor": "SFX"}),
            json!({"name": "Lian Li SP850 850 watts 80+ Gold SFX", "price": 139.99, "form_factor": "SFX"}),
            json!({"name": "Corsair SF1000 1000W 80+ Platinum SFX", "price": 229.99, "wattage": "1000W",
                   "form_factor": "SFX"}),
        ],
    ));

    all
}
