//! Component data model
//!
//! Records are immutable once built by the normalizer. Specs are a tagged
//! variant keyed by component type; every field defaults to zero or empty so
//! callers never have to deal with missing values.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Component categories offered by the catalog
///
/// Ordering follows the build sheet order (case first, PSU last) and is used
/// for stable iteration everywhere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentType {
    Case,
    Motherboard,
    Cpu,
    Cooler,
    Memory,
    Storage,
    Gpu,
    Psu,
}

impl ComponentType {
    /// All component types in build sheet order
    pub const ALL: [ComponentType; 8] = [
        ComponentType::Case,
        ComponentType::Motherboard,
        ComponentType::Cpu,
        ComponentType::Cooler,
        ComponentType::Memory,
        ComponentType::Storage,
        ComponentType::Gpu,
        ComponentType::Psu,
    ];

    /// Lowercase identifier used in JSON and catalog files
    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentType::Case => "case",
            ComponentType::Motherboard => "motherboard",
            ComponentType::Cpu => "cpu",
            ComponentType::Cooler => "cooler",
            ComponentType::Memory => "memory",
            ComponentType::Storage => "storage",
            ComponentType::Gpu => "gpu",
            ComponentType::Psu => "psu",
        }
    }

    /// Parse a type identifier (case-insensitive, surrounding whitespace ignored)
    ///
    /// Accepts a few plural/alias spellings seen in catalog exports.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "case" | "cases" => Some(ComponentType::Case),
            "motherboard" | "motherboards" | "mobo" => Some(ComponentType::Motherboard),
            "cpu" | "cpus" | "processor" => Some(ComponentType::Cpu),
            "cooler" | "coolers" | "cpu_cooler" | "cpu-cooler" => Some(ComponentType::Cooler),
            "memory" | "ram" => Some(ComponentType::Memory),
            "storage" | "internal_hard_drive" | "internal-hard-drive" => {
                Some(ComponentType::Storage)
            }
            "gpu" | "gpus" | "video_card" | "video-card" => Some(ComponentType::Gpu),
            "psu" | "psus" | "power_supply" | "power-supply" => Some(ComponentType::Psu),
            _ => None,
        }
    }
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Physical dimensions in millimeters
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Dimensions {
    pub length: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CpuSpecs {
    pub socket: String,
    pub core_count: u32,
    /// GHz
    pub base_clock: f64,
    /// GHz
    pub boost_clock: f64,
    /// Watts, 0 when unknown
    pub tdp: u32,
    pub integrated_graphics: String,
    pub microarchitecture: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MotherboardSpecs {
    pub socket: String,
    pub form_factor: String,
    pub memory_slots: u32,
    /// GB
    pub memory_max: u32,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GpuSpecs {
    /// Explicit or inferred chip label, e.g. "RTX 5070"
    pub chip: String,
    /// VRAM in GB
    pub memory: u32,
    /// MHz
    pub base_clock: f64,
    /// MHz
    pub boost_clock: f64,
    /// Card length in mm
    pub length: u32,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MemorySpecs {
    pub speed: String,
    /// Kit layout such as "2x16GB"
    pub modules: String,
    /// First-word latency in ns
    pub latency: f64,
    pub cas: u32,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageSpecs {
    pub form_factor: String,
    pub interface: String,
    /// GB
    pub capacity: u32,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PsuSpecs {
    pub wattage: u32,
    pub form_factor: String,
    pub efficiency: String,
    #[serde(rename = "type")]
    pub psu_type: String,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CaseSpecs {
    pub color: String,
    pub side_panel: String,
    /// Liters
    pub external_volume: f64,
    pub internal_35_bays: u32,
    /// mm, 0 when unknown
    pub max_gpu_length: u32,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CoolerSpecs {
    #[serde(rename = "type")]
    pub cooler_type: String,
    /// mm
    pub height: u32,
    /// Watts the cooler is rated to dissipate, 0 when unknown
    pub tdp_rating: u32,
}

/// Type-specific specs, tagged by component type
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "specs", rename_all = "lowercase")]
pub enum ComponentSpecs {
    Case(CaseSpecs),
    Motherboard(MotherboardSpecs),
    Cpu(CpuSpecs),
    Cooler(CoolerSpecs),
    Memory(MemorySpecs),
    Storage(StorageSpecs),
    Gpu(GpuSpecs),
    Psu(PsuSpecs),
}

impl ComponentSpecs {
    pub fn component_type(&self) -> ComponentType {
        match self {
            ComponentSpecs::Case(_) => ComponentType::Case,
            ComponentSpecs::Motherboard(_) => ComponentType::Motherboard,
            ComponentSpecs::Cpu(_) => ComponentType::Cpu,
            ComponentSpecs::Cooler(_) => ComponentType::Cooler,
            ComponentSpecs::Memory(_) => ComponentType::Memory,
            ComponentSpecs::Storage(_) => ComponentType::Storage,
            ComponentSpecs::Gpu(_) => ComponentType::Gpu,
            ComponentSpecs::Psu(_) => ComponentType::Psu,
        }
    }
}

/// A single catalog entry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComponentRecord {
    pub id: i64,
    pub brand: String,
    pub model: String,
    /// Never negative
    pub price: f64,
    #[serde(flatten)]
    pub specs: ComponentSpecs,
    pub dimensions: Option<Dimensions>,
}

impl ComponentRecord {
    pub fn component_type(&self) -> ComponentType {
        self.specs.component_type()
    }

    /// Display name, "Brand Model"
    pub fn name(&self) -> String {
        format!("{} {}", self.brand, self.model).trim().to_string()
    }

    /// Raw socket string for CPUs and motherboards, empty for everything else
    pub fn socket(&self) -> &str {
        match &self.specs {
            ComponentSpecs::Cpu(cpu) => &cpu.socket,
            ComponentSpecs::Motherboard(mb) => &mb.socket,
            _ => "",
        }
    }

    pub fn as_cpu(&self) -> Option<&CpuSpecs> {
        match &self.specs {
            ComponentSpecs::Cpu(specs) => Some(specs),
            _ => None,
        }
    }

    pub fn as_motherboard(&self) -> Option<&MotherboardSpecs> {
        match &self.specs {
            ComponentSpecs::Motherboard(specs) => Some(specs),
            _ => None,
        }
    }

    pub fn as_gpu(&self) -> Option<&GpuSpecs> {
        match &self.specs {
            ComponentSpecs::Gpu(specs) => Some(specs),
            _ => None,
        }
    }

    pub fn as_memory(&self) -> Option<&MemorySpecs> {
        match &self.specs {
            ComponentSpecs::Memory(specs) => Some(specs),
            _ => None,
        }
    }

    pub fn as_storage(&self) -> Option<&StorageSpecs> {
        match &self.specs {
            ComponentSpecs::Storage(specs) => Some(specs),
            _ => None,
        }
    }

    pub fn as_psu(&self) -> Option<&PsuSpecs> {
        match &self.specs {
            ComponentSpecs::Psu(specs) => Some(specs),
            _ => None,
        }
    }

    pub fn as_case(&self) -> Option<&CaseSpecs> {
        match &self.specs {
            ComponentSpecs::Case(specs) => Some(specs),
            _ => None,
        }
    }

    pub fn as_cooler(&self) -> Option<&CoolerSpecs> {
        match &self.specs {
            ComponentSpecs::Cooler(specs) => Some(specs),
            _ => None,
        }
    }
}

/// A build under construction: at most one record per component type
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BuildSelection {
    components: BTreeMap<ComponentType, ComponentRecord>,
}

impl BuildSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a record, replacing (and returning) any record of the same type
    pub fn insert(&mut self, record: ComponentRecord) -> Option<ComponentRecord> {
        self.components.insert(record.component_type(), record)
    }

    /// Builder-style [`insert`](Self::insert)
    pub fn with(mut self, record: ComponentRecord) -> Self {
        self.insert(record);
        self
    }

    pub fn get(&self, component_type: ComponentType) -> Option<&ComponentRecord> {
        self.components.get(&component_type)
    }

    pub fn contains(&self, component_type: ComponentType) -> bool {
        self.components.contains_key(&component_type)
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }
}
