//! # Conductor Sizing
//!
//! Selects the smallest conductor satisfying two independent constraints:
//!
//! - **Ampacity**: rated ampacity ≥ the derated requirement (see [`crate::derating`])
//! - **Voltage drop**: resistance ≤ the largest value that keeps the run within
//!   the voltage-drop budget (see [`crate::voltage_drop`])
//!
//! Each constraint is searched independently in gauge order. The recommendation
//! is the larger (later in table order) of the two findings. When one
//! constraint has no tabulated answer, the other finding is used and the
//! response records the unsatisfied constraint. When neither has an answer the
//! request is out of range.
//!
//! ## Example
//!
//! ```rust
//! use wire_core::conductors::Material;
//! use wire_core::derating::InstallationMethod;
//! use wire_core::sizing::{size_conductor, SizingRequest, GoverningConstraint};
//!
//! let request = SizingRequest {
//!     label: "Shop feeder".to_string(),
//!     load_current_amps: 20.0,
//!     system_voltage: 120.0,
//!     one_way_length_ft: 100.0,
//!     max_voltage_drop_percent: 3.0,
//!     material: Material::Copper,
//!     installation_method: InstallationMethod::Conduit,
//!     ambient_temp_f: 86.0,
//! };
//!
//! let response = size_conductor(&request)?;
//! assert_eq!(response.minimum_designation_by_ampacity.as_deref(), Some("10"));
//! assert_eq!(response.recommended_designation, "8");
//! assert_eq!(response.governing, GoverningConstraint::VoltageDrop);
//! # Ok::<(), wire_core::errors::SizingError>(())
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::conductors::{self, GaugeEntry, Material, MaterialTable};
use crate::derating::{DeratingBreakdown, InstallationMethod};
use crate::errors::{FieldViolation, SizingError, SizingResult};
use crate::voltage_drop;

/// One conductor sizing query.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "Well pump",
///   "load_current_amps": 20.0,
///   "system_voltage": 240.0,
///   "one_way_length_ft": 300.0,
///   "max_voltage_drop_percent": 3.0,
///   "material": "copper",
///   "installation_method": "buried",
///   "ambient_temp_f": 77.0
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SizingRequest {
    /// User label for this circuit (e.g., "Well pump")
    #[serde(default)]
    pub label: String,

    /// Nominal load current (A)
    pub load_current_amps: f64,

    /// System voltage (V)
    pub system_voltage: f64,

    /// Distance from source to load (ft)
    pub one_way_length_ft: f64,

    /// Voltage-drop budget as a percent of system voltage
    pub max_voltage_drop_percent: f64,

    /// Conductor material
    pub material: Material,

    /// Installation method
    pub installation_method: InstallationMethod,

    /// Ambient temperature (°F)
    pub ambient_temp_f: f64,
}

impl SizingRequest {
    /// Validate input parameters.
    ///
    /// Every violated field is reported, not only the first.
    pub fn validate(&self) -> SizingResult<()> {
        let mut violations = Vec::new();

        let mut require = |field: &str, value: f64, ok: bool, reason: &str| {
            if !ok {
                violations.push(FieldViolation {
                    field: field.to_string(),
                    value: value.to_string(),
                    reason: reason.to_string(),
                });
            }
        };

        let current = self.load_current_amps;
        require("load_current_amps", current, current.is_finite() && current > 0.0, "Load current must be positive");

        let voltage = self.system_voltage;
        require("system_voltage", voltage, voltage.is_finite() && voltage > 0.0, "System voltage must be positive");

        let length = self.one_way_length_ft;
        require("one_way_length_ft", length, length.is_finite() && length > 0.0, "Length must be positive");

        let pct = self.max_voltage_drop_percent;
        require(
            "max_voltage_drop_percent",
            pct,
            pct > 0.0 && pct < 100.0,
            "Voltage drop percent must be between 0 and 100 (exclusive)",
        );

        let ambient = self.ambient_temp_f;
        require("ambient_temp_f", ambient, ambient.is_finite(), "Ambient temperature must be a finite number");

        if violations.is_empty() {
            Ok(())
        } else {
            Err(SizingError::Validation { violations })
        }
    }

    /// Resolve the derated ampacity requirement for this request
    pub fn derating(&self) -> DeratingBreakdown {
        DeratingBreakdown::resolve(self.load_current_amps, self.ambient_temp_f, self.installation_method)
    }

    /// Largest resistance per 1000 ft within the voltage-drop budget
    pub fn max_resistance_ohms_per_kft(&self) -> f64 {
        voltage_drop::max_resistance_ohms_per_kft(
            self.max_voltage_drop_percent,
            self.system_voltage,
            self.load_current_amps,
            self.one_way_length_ft,
        )
    }
}

/// A sizing constraint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Constraint {
    /// Rated ampacity ≥ derated requirement
    Ampacity,
    /// Resistance ≤ voltage-drop ceiling
    VoltageDrop,
}

impl Constraint {
    /// Display name for UI
    pub fn display_name(&self) -> &'static str {
        match self {
            Constraint::Ampacity => "Ampacity",
            Constraint::VoltageDrop => "Voltage Drop",
        }
    }
}

impl std::fmt::Display for Constraint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Which constraint determined the recommended size
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum GoverningConstraint {
    /// Ampacity required the larger conductor
    Ampacity,
    /// Voltage drop required the larger conductor
    VoltageDrop,
    /// Both constraints found the same size
    Both,
}

/// Sizing results.
///
/// ## JSON Example
///
/// ```json
/// {
///   "material": "copper",
///   "recommended_designation": "8",
///   "minimum_designation_by_ampacity": "10",
///   "minimum_designation_by_voltage_drop": "8",
///   "rated_ampacity_amps": 50.0,
///   "resistance_ohms_per_kft": 0.628,
///   "actual_voltage_drop_percent": 2.0933,
///   "voltage_at_load": 117.488,
///   "diameter_in": 0.1285,
///   "adjusted_ampacity_amps": 31.25,
///   "max_resistance_ohms_per_kft": 0.9,
///   "governing": "voltage-drop",
///   "unsatisfied": null
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SizingResponse {
    /// Conductor material of the recommendation
    pub material: Material,

    /// Recommended size (larger of the two constraint minimums)
    pub recommended_designation: String,

    /// Smallest size meeting the ampacity requirement, if any
    pub minimum_designation_by_ampacity: Option<String>,

    /// Smallest size meeting the voltage-drop budget, if any
    pub minimum_designation_by_voltage_drop: Option<String>,

    /// Rated ampacity of the recommended size (A)
    pub rated_ampacity_amps: f64,

    /// Resistance of the recommended size (ohms/kft)
    pub resistance_ohms_per_kft: f64,

    /// Voltage drop with the recommended size (% of system voltage)
    pub actual_voltage_drop_percent: f64,

    /// Voltage at the load with the recommended size (V)
    pub voltage_at_load: f64,

    /// Conductor diameter of the recommended size (in)
    pub diameter_in: f64,

    /// Derated ampacity requirement (A)
    pub adjusted_ampacity_amps: f64,

    /// Voltage-drop resistance ceiling (ohms/kft)
    pub max_resistance_ohms_per_kft: f64,

    /// Individual derating factors
    pub derating: DeratingBreakdown,

    /// Constraint that set the recommendation
    pub governing: GoverningConstraint,

    /// Constraint no tabulated size satisfies, when the recommendation is best effort
    pub unsatisfied: Option<Constraint>,
}

impl SizingResponse {
    /// True when the recommended size satisfies both constraints
    pub fn meets_all_constraints(&self) -> bool {
        self.unsatisfied.is_none()
    }

    /// Get the governing constraint description
    pub fn governing_condition(&self) -> &'static str {
        match self.governing {
            GoverningConstraint::Ampacity => "Ampacity",
            GoverningConstraint::VoltageDrop => "Voltage Drop",
            GoverningConstraint::Both => "Ampacity & Voltage Drop",
        }
    }
}

/// Smallest entry whose rated ampacity meets `required_amps`.
pub fn minimum_by_ampacity(table: &MaterialTable, required_amps: f64) -> Option<(usize, &'static GaugeEntry)> {
    table.first_satisfying(|e| e.ampacity_amps >= required_amps)
}

/// Smallest entry whose resistance is at or below `max_ohms_per_kft`.
pub fn minimum_by_voltage_drop(table: &MaterialTable, max_ohms_per_kft: f64) -> Option<(usize, &'static GaugeEntry)> {
    table.first_satisfying(|e| e.resistance_ohms_per_kft <= max_ohms_per_kft)
}

/// Select a conductor from a specific table.
///
/// The request is assumed valid; use [`size_conductor`] for the checked entry point.
///
/// # Errors
///
/// * `SizingError::OutOfRange` - neither constraint is met by any table entry
pub fn select_from(request: &SizingRequest, table: &MaterialTable) -> SizingResult<SizingResponse> {
    let derating = request.derating();
    let adjusted_ampacity_amps = derating.adjusted_ampacity_amps;
    let max_resistance = request.max_resistance_ohms_per_kft();

    let by_ampacity = minimum_by_ampacity(table, adjusted_ampacity_amps);
    let by_drop = minimum_by_voltage_drop(table, max_resistance);

    debug!(
        material = table.material().code(),
        adjusted_ampacity_amps,
        max_resistance_ohms_per_kft = max_resistance,
        by_ampacity = by_ampacity.map(|(_, e)| e.designation),
        by_voltage_drop = by_drop.map(|(_, e)| e.designation),
        "constraint candidates"
    );

    let (winner, governing, unsatisfied) = match (by_ampacity, by_drop) {
        (Some(amp), Some(drop)) => {
            let governing = match amp.0.cmp(&drop.0) {
                std::cmp::Ordering::Greater => GoverningConstraint::Ampacity,
                std::cmp::Ordering::Less => GoverningConstraint::VoltageDrop,
                std::cmp::Ordering::Equal => GoverningConstraint::Both,
            };
            let winner = if amp.0 >= drop.0 { amp.1 } else { drop.1 };
            (winner, governing, None)
        }
        (Some(amp), None) => {
            warn!(
                label = request.label.as_str(),
                max_resistance_ohms_per_kft = max_resistance,
                "no tabulated size meets the voltage-drop budget; using ampacity size"
            );
            (amp.1, GoverningConstraint::Ampacity, Some(Constraint::VoltageDrop))
        }
        (None, Some(drop)) => {
            warn!(
                label = request.label.as_str(),
                adjusted_ampacity_amps,
                "no tabulated size carries the derated load; using voltage-drop size"
            );
            (drop.1, GoverningConstraint::VoltageDrop, Some(Constraint::Ampacity))
        }
        (None, None) => {
            warn!(
                label = request.label.as_str(),
                adjusted_ampacity_amps,
                max_resistance_ohms_per_kft = max_resistance,
                "request exceeds the conductor table"
            );
            return Err(SizingError::out_of_range(
                table.material().code(),
                adjusted_ampacity_amps,
                max_resistance,
            ));
        }
    };

    let actual_voltage_drop_percent = voltage_drop::voltage_drop_percent(
        request.load_current_amps,
        request.one_way_length_ft,
        winner.resistance(),
        request.system_voltage,
    );

    Ok(SizingResponse {
        material: table.material(),
        recommended_designation: winner.designation.to_string(),
        minimum_designation_by_ampacity: by_ampacity.map(|(_, e)| e.designation.to_string()),
        minimum_designation_by_voltage_drop: by_drop.map(|(_, e)| e.designation.to_string()),
        rated_ampacity_amps: winner.ampacity_amps,
        resistance_ohms_per_kft: winner.resistance_ohms_per_kft,
        actual_voltage_drop_percent,
        voltage_at_load: voltage_drop::voltage_at_load(request.system_voltage, actual_voltage_drop_percent),
        diameter_in: winner.diameter_in,
        adjusted_ampacity_amps,
        max_resistance_ohms_per_kft: max_resistance,
        derating,
        governing,
        unsatisfied,
    })
}

/// Select a conductor from the request's material table.
///
/// # Errors
///
/// * `SizingError::Configuration` - no table for the material
/// * `SizingError::OutOfRange` - neither constraint is met by any table entry
pub fn select(request: &SizingRequest) -> SizingResult<SizingResponse> {
    let table = conductors::lookup(request.material)?;
    select_from(request, &table)
}

/// Size a conductor for a request.
///
/// Validates the request before any table lookup, then selects.
///
/// # Returns
///
/// * `Ok(SizingResponse)` - Recommended size and derived metrics
/// * `Err(SizingError::Validation)` - One or more fields are invalid
/// * `Err(SizingError::OutOfRange)` - No tabulated size satisfies either constraint
pub fn size_conductor(request: &SizingRequest) -> SizingResult<SizingResponse> {
    request.validate()?;
    select(request)
}
