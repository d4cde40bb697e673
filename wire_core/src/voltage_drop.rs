//! # Voltage Drop
//!
//! Single-phase voltage-drop relations for a two-conductor run. Current flows
//! out and back, so the conductor length is twice the one-way distance:
//!
//! ```text
//! Vd    = 2 × I × L × R / 1000
//! Vd_%  = Vd / V × 100
//! R_max = (Vd_% / 100 × V) / (2 × I × L / 1000)
//! ```
//!
//! where `L` is one-way length (ft) and `R` is ohms per 1000 ft.
//!
//! The selector and report both go through these functions, so a drop
//! recomputed from a table entry always matches the reported value.

use crate::units::{Feet, OhmsPerKft};

/// Supply plus return conductor
pub const ROUND_TRIP_FACTOR: f64 = 2.0;

/// Conductor length carrying current for a one-way distance
pub fn circuit_length(one_way_length_ft: f64) -> Feet {
    Feet(ROUND_TRIP_FACTOR * one_way_length_ft)
}

/// Largest resistance per 1000 ft that keeps the drop within budget.
///
/// # Example
///
/// ```rust
/// use wire_core::voltage_drop::max_resistance_ohms_per_kft;
///
/// // 3% of 120 V over 100 ft at 20 A
/// let r = max_resistance_ohms_per_kft(3.0, 120.0, 20.0, 100.0);
/// assert!((r - 0.9).abs() < 1e-9);
/// ```
pub fn max_resistance_ohms_per_kft(
    max_voltage_drop_percent: f64,
    system_voltage: f64,
    load_current_amps: f64,
    one_way_length_ft: f64,
) -> f64 {
    let allowed_drop_volts = max_voltage_drop_percent / 100.0 * system_voltage;
    let amp_kft = load_current_amps * circuit_length(one_way_length_ft).0 / 1000.0;
    allowed_drop_volts / amp_kft
}

/// Voltage lost across the run (V)
pub fn voltage_drop_volts(load_current_amps: f64, one_way_length_ft: f64, resistance: OhmsPerKft) -> f64 {
    ROUND_TRIP_FACTOR * load_current_amps * one_way_length_ft * resistance.0 / 1000.0
}

/// Total resistance of both conductors of the run (ohms)
pub fn loop_resistance_ohms(one_way_length_ft: f64, resistance: OhmsPerKft) -> f64 {
    resistance.over(circuit_length(one_way_length_ft))
}

/// Voltage drop as a percent of system voltage
pub fn voltage_drop_percent(
    load_current_amps: f64,
    one_way_length_ft: f64,
    resistance: OhmsPerKft,
    system_voltage: f64,
) -> f64 {
    voltage_drop_volts(load_current_amps, one_way_length_ft, resistance) / system_voltage * 100.0
}

/// Voltage remaining at the load
pub fn voltage_at_load(system_voltage: f64, voltage_drop_percent: f64) -> f64 {
    system_voltage * (1.0 - voltage_drop_percent / 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circuit_length_is_round_trip() {
        assert_eq!(circuit_length(150.0).0, 300.0);
        // 0.628 ohms/kft × 200 ft
        assert!((loop_resistance_ohms(100.0, OhmsPerKft(0.628)) - 0.1256).abs() < 1e-12);
    }

    #[test]
    fn test_max_resistance() {
        // (0.03 × 120) / (2 × 20 × 100 / 1000) = 3.6 / 4.0
        let r = max_resistance_ohms_per_kft(3.0, 120.0, 20.0, 100.0);
        assert!((r - 0.9).abs() < 1e-9);
    }

    #[test]
    fn test_voltage_drop_8_awg_copper() {
        // 2 × 20 × 100 × 0.628 / 1000 = 2.512 V → 2.0933% of 120 V
        let volts = voltage_drop_volts(20.0, 100.0, OhmsPerKft(0.628));
        assert!((volts - 2.512).abs() < 1e-9);

        let pct = voltage_drop_percent(20.0, 100.0, OhmsPerKft(0.628), 120.0);
        assert!((pct - 2.093_333).abs() < 1e-6);

        let at_load = voltage_at_load(120.0, pct);
        assert!((at_load - 117.488).abs() < 1e-9);
    }

    #[test]
    fn test_drop_at_max_resistance_equals_budget() {
        let r = max_resistance_ohms_per_kft(5.0, 240.0, 30.0, 250.0);
        let pct = voltage_drop_percent(30.0, 250.0, OhmsPerKft(r), 240.0);
        assert!((pct - 5.0).abs() < 1e-9);
    }
}
