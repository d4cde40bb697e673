//! # Ampacity Derating
//!
//! Converts a nominal load current into the conductor ampacity the table
//! entry must provide.
//!
//! ## Overview
//!
//! ```text
//! I_req = (I_load × 1.25) / (F_t × F_i)
//! ```
//!
//! ## Factor Summary
//!
//! | Factor | Description              | Values                      |
//! |--------|--------------------------|-----------------------------|
//! | 1.25   | Continuous load          | fixed                       |
//! | F_t    | Ambient temperature      | 1.0 (≤ 86°F), 0.82 (> 86°F) |
//! | F_i    | Installation method      | 0.7 - 1.0                   |
//!
//! The temperature factor is a two-tier model with the boundary at 86°F (30°C),
//! the ambient on which the 75°C ampacity column is based.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::errors::{SizingError, SizingResult};
use crate::units::{Amps, Celsius, Fahrenheit};

// ============================================================================
// NEC Code Section References
// ============================================================================

/// NEC section references for the derating rules.
pub mod nec_ref {
    /// Continuous load, 125% of load current
    pub const CONTINUOUS_LOAD: &str = "NEC 210.19(A)(1)";
    /// Ambient temperature correction
    pub const AMBIENT_CORRECTION: &str = "NEC 310.15(B)(1)";
    /// Adjustment for more than three current-carrying conductors
    pub const BUNDLING_ADJUSTMENT: &str = "NEC 310.15(C)(1)";
    /// Ampacity table
    pub const AMPACITY_TABLE: &str = "NEC Table 310.16";
}

/// Continuous-load safety multiplier
pub const CONTINUOUS_LOAD_MULTIPLIER: f64 = 1.25;

/// Ambient above which the temperature factor applies (°F, strict)
pub const AMBIENT_DERATE_THRESHOLD_F: f64 = 86.0;

/// Temperature factor above the threshold
pub const ELEVATED_AMBIENT_FACTOR: f64 = 0.82;

/// How the conductors are installed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum InstallationMethod {
    /// Single conductor in free air: F_i = 1.0
    FreeAir,
    /// In raceway or conduit: F_i = 0.8
    #[default]
    Conduit,
    /// Bundled with other current-carrying conductors: F_i = 0.7
    Bundle,
    /// Direct burial: F_i = 0.9
    Buried,
}

impl InstallationMethod {
    /// All installation variants for UI selection
    pub const ALL: [InstallationMethod; 4] = [
        InstallationMethod::FreeAir,
        InstallationMethod::Conduit,
        InstallationMethod::Bundle,
        InstallationMethod::Buried,
    ];

    /// Get the F_i factor value
    pub fn factor(&self) -> f64 {
        match self {
            InstallationMethod::FreeAir => 1.0,
            InstallationMethod::Conduit => 0.8,
            InstallationMethod::Bundle => 0.7,
            InstallationMethod::Buried => 0.9,
        }
    }

    /// Code section behind the factor, if the method is a code adjustment
    pub fn nec_ref(&self) -> Option<&'static str> {
        match self {
            InstallationMethod::Bundle => Some(nec_ref::BUNDLING_ADJUSTMENT),
            InstallationMethod::FreeAir | InstallationMethod::Conduit | InstallationMethod::Buried => None,
        }
    }

    /// Get the code string (e.g., "free-air")
    pub fn code(&self) -> &'static str {
        match self {
            InstallationMethod::FreeAir => "free-air",
            InstallationMethod::Conduit => "conduit",
            InstallationMethod::Bundle => "bundle",
            InstallationMethod::Buried => "buried",
        }
    }

    /// Parse from common string representations
    pub fn from_str_flexible(s: &str) -> SizingResult<Self> {
        match s.trim().to_lowercase().replace([' ', '_'], "-").as_str() {
            "free-air" | "freeair" | "air" => Ok(InstallationMethod::FreeAir),
            "conduit" | "raceway" => Ok(InstallationMethod::Conduit),
            "bundle" | "bundled" => Ok(InstallationMethod::Bundle),
            "buried" | "direct-burial" | "underground" => Ok(InstallationMethod::Buried),
            _ => Err(SizingError::invalid_field(
                "installation_method",
                s,
                "Expected 'free-air', 'conduit', 'bundle' or 'buried'",
            )),
        }
    }

    /// Display name for UI
    pub fn display_name(&self) -> &'static str {
        match self {
            InstallationMethod::FreeAir => "Free Air (1.00)",
            InstallationMethod::Conduit => "Conduit (0.80)",
            InstallationMethod::Bundle => "Bundled (0.70)",
            InstallationMethod::Buried => "Direct Burial (0.90)",
        }
    }
}

impl std::fmt::Display for InstallationMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Get the F_t factor for an ambient temperature in °F.
///
/// Exactly 86°F is un-derated; the threshold is strict.
pub fn temperature_factor(ambient: Fahrenheit) -> f64 {
    if ambient.0 > AMBIENT_DERATE_THRESHOLD_F {
        ELEVATED_AMBIENT_FACTOR
    } else {
        1.0
    }
}

/// Individual factors and result of one derating resolution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeratingBreakdown {
    /// Continuous-load multiplier (1.25)
    pub safety_multiplier: f64,
    /// Ambient temperature factor F_t
    pub temperature_factor: f64,
    /// Installation method factor F_i
    pub installation_factor: f64,
    /// Ambient used, converted to °C for code references
    pub ambient_temp_c: f64,
    /// Required conductor ampacity (A)
    pub adjusted_ampacity_amps: f64,
}

impl DeratingBreakdown {
    /// Resolve the required ampacity and keep each factor.
    ///
    /// # Example
    ///
    /// ```rust
    /// use wire_core::derating::{DeratingBreakdown, InstallationMethod};
    ///
    /// let d = DeratingBreakdown::resolve(20.0, 86.0, InstallationMethod::Conduit);
    /// assert!((d.adjusted_ampacity_amps - 31.25).abs() < 1e-9);
    /// assert_eq!(d.temperature_factor, 1.0);
    /// ```
    pub fn resolve(load_current_amps: f64, ambient_temp_f: f64, method: InstallationMethod) -> Self {
        let ambient = Fahrenheit(ambient_temp_f);
        let base = Amps(load_current_amps) * CONTINUOUS_LOAD_MULTIPLIER;
        let temperature_factor = temperature_factor(ambient);
        let installation_factor = method.factor();
        let adjusted = base / (temperature_factor * installation_factor);

        debug!(
            load_current_amps,
            temperature_factor,
            installation_factor,
            adjusted_ampacity_amps = adjusted.0,
            "resolved derating"
        );

        DeratingBreakdown {
            safety_multiplier: CONTINUOUS_LOAD_MULTIPLIER,
            temperature_factor,
            installation_factor,
            ambient_temp_c: Celsius::from(ambient).0,
            adjusted_ampacity_amps: adjusted.0,
        }
    }

    /// Combined divisor F_t × F_i
    pub fn combined_factor(&self) -> f64 {
        self.temperature_factor * self.installation_factor
    }
}

/// Required conductor ampacity for a load current (A).
pub fn required_ampacity(load_current_amps: f64, ambient_temp_f: f64, method: InstallationMethod) -> f64 {
    DeratingBreakdown::resolve(load_current_amps, ambient_temp_f, method).adjusted_ampacity_amps
}
