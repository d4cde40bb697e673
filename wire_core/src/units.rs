//! # Unit Types
//!
//! Type-safe wrappers for the electrical and physical quantities used by the
//! sizing engine. These are plain `f64` newtypes so JSON stays clean (just numbers).
//!
//! ## US Customary Units (Primary)
//!
//! Conductor tables and field inputs are in US customary units:
//! - Length: feet (ft), thousands of feet (kft), inches (in)
//! - Temperature: degrees Fahrenheit, with Celsius for code references
//! - Resistance: ohms per 1000 ft of single conductor
//!
//! ## Example
//!
//! ```rust
//! use wire_core::units::{Amps, Fahrenheit, Celsius, Feet, OhmsPerKft};
//!
//! let ambient = Fahrenheit(86.0);
//! let c: Celsius = ambient.into();
//! assert!((c.0 - 30.0).abs() < 1e-9);
//!
//! // 0.628 ohms/kft over 200 ft is 0.1256 ohms
//! let r = OhmsPerKft(0.628).over(Feet(200.0));
//! assert!((r - 0.1256).abs() < 1e-9);
//!
//! let current = Amps(20.0) * 1.25;
//! assert_eq!(current.0, 25.0);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

// ============================================================================
// Electrical Units
// ============================================================================

/// Current in amperes
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amps(pub f64);

/// Resistance of a single conductor per 1000 ft
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OhmsPerKft(pub f64);

impl OhmsPerKft {
    /// Total resistance in ohms of `length` of this conductor
    pub fn over(self, length: Feet) -> f64 {
        self.0 * length.0 / 1000.0
    }
}

// ============================================================================
// Length Units
// ============================================================================

/// Length in feet
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Feet(pub f64);

/// Length in inches
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inches(pub f64);

impl Inches {
    /// Convert to millimeters
    pub fn to_mm(self) -> f64 {
        self.0 * 25.4
    }
}

// ============================================================================
// Temperature Units
// ============================================================================

/// Temperature in degrees Fahrenheit
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fahrenheit(pub f64);

/// Temperature in degrees Celsius
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Celsius(pub f64);

impl From<Fahrenheit> for Celsius {
    fn from(f: Fahrenheit) -> Self {
        Celsius((f.0 - 32.0) * 5.0 / 9.0)
    }
}

// ============================================================================
// Arithmetic Operations
// ============================================================================

macro_rules! impl_arithmetic {
    ($type:ty) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self {
                Self(self.0 * rhs)
            }
        }

        impl Div<f64> for $type {
            type Output = Self;
            fn div(self, rhs: f64) -> Self {
                Self(self.0 / rhs)
            }
        }
    };
}

impl_arithmetic!(Amps);
impl_arithmetic!(Feet);
