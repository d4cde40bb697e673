//! # Conductor Tables
//!
//! Reference data for building-wire conductors, one ordered table per material.
//!
//! ## Gauge Order
//!
//! Table order is the canonical gauge order, smallest conductor first:
//!
//! ```text
//! 14 → 12 → 10 → 8 → 6 → 4 → 3 → 2 → 1 → 1/0 → 2/0 → 3/0 → 4/0
//! ```
//!
//! Designations are opaque labels. They are never parsed as numbers, since
//! "1/0".."4/0" continue the sequence past "1" in the opposite numeric direction.
//! Along the table order ampacity strictly increases and resistance strictly
//! decreases; the build rejects data that breaks this.
//!
//! ## Example
//!
//! ```rust
//! use wire_core::conductors::{self, Material};
//!
//! let table = conductors::lookup(Material::Copper)?;
//! let entry = table.get("10").unwrap();
//! assert_eq!(entry.ampacity_amps, 35.0);
//!
//! // First copper size carrying at least 31.25 A
//! let (_, found) = table.first_satisfying(|e| e.ampacity_amps >= 31.25).unwrap();
//! assert_eq!(found.designation, "10");
//! # Ok::<(), wire_core::errors::SizingError>(())
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{SizingError, SizingResult};
use crate::generated::conductor_data;
use crate::units::{Inches, OhmsPerKft};

/// Conductor material
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum Material {
    /// Copper
    #[default]
    Copper,
    /// Aluminum (AA-8000 series building wire)
    Aluminum,
}

impl Material {
    /// All material variants for UI selection
    pub const ALL: [Material; 2] = [Material::Copper, Material::Aluminum];

    /// Get the code string for table lookup (e.g., "copper")
    pub fn code(&self) -> &'static str {
        match self {
            Material::Copper => "copper",
            Material::Aluminum => "aluminum",
        }
    }

    /// Parse from common string representations
    pub fn from_str_flexible(s: &str) -> SizingResult<Self> {
        match s.trim().to_lowercase().as_str() {
            "copper" | "cu" => Ok(Material::Copper),
            "aluminum" | "aluminium" | "al" => Ok(Material::Aluminum),
            _ => Err(SizingError::invalid_field(
                "material",
                s,
                "Expected 'copper' or 'aluminum'",
            )),
        }
    }

    /// Get display name
    pub fn display_name(&self) -> &'static str {
        match self {
            Material::Copper => "Copper",
            Material::Aluminum => "Aluminum",
        }
    }
}

impl std::fmt::Display for Material {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// One standardized conductor size for one material.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GaugeEntry {
    /// Size label (e.g., "12", "1/0")
    pub designation: &'static str,
    /// Bare conductor diameter (in)
    pub diameter_in: f64,
    /// Rated ampacity at the table reference temperature (A)
    pub ampacity_amps: f64,
    /// Resistance per 1000 ft of single conductor (ohms)
    pub resistance_ohms_per_kft: f64,
}

impl GaugeEntry {
    /// Resistance as a typed unit
    pub fn resistance(&self) -> OhmsPerKft {
        OhmsPerKft(self.resistance_ohms_per_kft)
    }

    /// Diameter as a typed unit
    pub fn diameter(&self) -> Inches {
        Inches(self.diameter_in)
    }

    /// Display label (e.g., "12 AWG", "1/0 AWG")
    pub fn display_name(&self) -> String {
        format!("{} AWG", self.designation)
    }
}

/// Ordered conductor table for one material.
///
/// Backed by static data, so copies are cheap and the table is never
/// mutated after the program starts.
#[derive(Debug, Clone, Copy)]
pub struct MaterialTable {
    material: Material,
    entries: &'static [GaugeEntry],
}

impl MaterialTable {
    /// Material this table describes
    pub fn material(&self) -> Material {
        self.material
    }

    /// All entries, smallest conductor first
    pub fn entries(&self) -> &'static [GaugeEntry] {
        self.entries
    }

    /// Number of tabulated sizes
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if the table holds no sizes
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Insulation temperature rating of the ampacity values (°C)
    pub fn reference_temp_c(&self) -> f64 {
        conductor_data::REFERENCE_TEMP_C
    }

    /// Find an entry by designation
    pub fn get(&self, designation: &str) -> Option<&'static GaugeEntry> {
        self.entries.iter().find(|e| e.designation == designation)
    }

    /// Position of a designation in gauge order (0 = smallest)
    pub fn position(&self, designation: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.designation == designation)
    }

    /// Largest tabulated conductor
    pub fn largest(&self) -> Option<&'static GaugeEntry> {
        self.entries.last()
    }

    /// First entry in gauge order satisfying `predicate`, with its position.
    pub fn first_satisfying<F>(&self, predicate: F) -> Option<(usize, &'static GaugeEntry)>
    where
        F: Fn(&GaugeEntry) -> bool,
    {
        self.entries
            .iter()
            .enumerate()
            .find(|(_, entry)| predicate(entry))
    }
}

/// Look up the conductor table for a material.
///
/// # Errors
///
/// * `SizingError::Configuration` - no reference data exists for the material
pub fn lookup(material: Material) -> SizingResult<MaterialTable> {
    let entries = conductor_data::lookup(material.code())
        .ok_or_else(|| SizingError::configuration(material.code()))?;
    Ok(MaterialTable { material, entries })
}
