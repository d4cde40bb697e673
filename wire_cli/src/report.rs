//! Text rendering for sizing results.

use std::fmt::Write as _;

use wire_core::derating::nec_ref;
use wire_core::units::{Celsius, Fahrenheit, Inches, OhmsPerKft};
use wire_core::voltage_drop::loop_resistance_ohms;
use wire_core::{MaterialTable, SizingRequest, SizingResponse};

const RULE: &str = "═══════════════════════════════════════";

/// Voltage-drop tier for display
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropRating {
    /// ≤ 3%
    Good,
    /// ≤ 5%
    Caution,
    /// > 5%
    Warning,
}

impl DropRating {
    pub fn from_percent(drop_percent: f64) -> Self {
        if drop_percent <= 3.0 {
            DropRating::Good
        } else if drop_percent <= 5.0 {
            DropRating::Caution
        } else {
            DropRating::Warning
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            DropRating::Good => "[GOOD]",
            DropRating::Caution => "[CAUTION]",
            DropRating::Warning => "[WARNING]",
        }
    }
}

fn designation_or_none(designation: Option<&str>) -> String {
    match designation {
        Some(d) => format!("{d} AWG"),
        None => "none in table".to_string(),
    }
}

fn load_voltage(volts: f64) -> String {
    if volts <= 0.0 {
        "n/a (exceeds supply)".to_string()
    } else {
        format!("{volts:.1} V")
    }
}

/// Full report for one sizing run.
pub fn sizing_report(request: &SizingRequest, response: &SizingResponse) -> String {
    let mut out = String::new();
    let ambient_c = Celsius::from(Fahrenheit(request.ambient_temp_f)).0;
    let loop_ohms = loop_resistance_ohms(
        request.one_way_length_ft,
        OhmsPerKft(response.resistance_ohms_per_kft),
    );
    let d = &response.derating;
    let rating = DropRating::from_percent(response.actual_voltage_drop_percent);

    // writeln! into a String cannot fail
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out, "  CONDUCTOR SIZING RESULTS");
    let _ = writeln!(out, "{RULE}");
    let _ = writeln!(out);
    let _ = writeln!(out, "Input:");
    if !request.label.is_empty() {
        let _ = writeln!(out, "  Circuit:  {}", request.label);
    }
    let _ = writeln!(out, "  Load:     {:.1} A @ {:.0} V", request.load_current_amps, request.system_voltage);
    let _ = writeln!(out, "  Length:   {:.0} ft one-way", request.one_way_length_ft);
    let _ = writeln!(out, "  Budget:   {:.1}% voltage drop", request.max_voltage_drop_percent);
    let _ = writeln!(out, "  Material: {}", request.material);
    let _ = writeln!(out, "  Install:  {}", request.installation_method);
    let _ = writeln!(out, "  Ambient:  {:.0}°F ({:.0}°C)", request.ambient_temp_f, ambient_c);
    let _ = writeln!(out);
    let _ = writeln!(out, "Derating:");
    let _ = writeln!(out, "  Continuous load x{:.2}  ({})", d.safety_multiplier, nec_ref::CONTINUOUS_LOAD);
    let _ = writeln!(out, "  Ambient factor  {:.2}  ({})", d.temperature_factor, nec_ref::AMBIENT_CORRECTION);
    match request.installation_method.nec_ref() {
        Some(section) => {
            let _ = writeln!(out, "  Install factor  {:.2}  ({})", d.installation_factor, section);
        }
        None => {
            let _ = writeln!(out, "  Install factor  {:.2}", d.installation_factor);
        }
    }
    let _ = writeln!(out, "  Combined divisor {:.3}", d.combined_factor());
    let _ = writeln!(out, "  Required ampacity = {:.2} A", response.adjusted_ampacity_amps);
    let _ = writeln!(out);
    let _ = writeln!(out, "Constraints:");
    let _ = writeln!(
        out,
        "  Ampacity:     {}",
        designation_or_none(response.minimum_designation_by_ampacity.as_deref())
    );
    let _ = writeln!(
        out,
        "  Voltage drop: {} (R ≤ {:.4} ohms/kft)",
        designation_or_none(response.minimum_designation_by_voltage_drop.as_deref()),
        response.max_resistance_ohms_per_kft
    );
    let _ = writeln!(out);
    let _ = writeln!(out, "Recommended conductor:");
    let _ = writeln!(
        out,
        "  {} AWG {}  {:.0} A ({})",
        response.recommended_designation,
        response.material,
        response.rated_ampacity_amps,
        nec_ref::AMPACITY_TABLE
    );
    let _ = writeln!(
        out,
        "  Diameter:   {:.4}\" ({:.2} mm)",
        response.diameter_in,
        Inches(response.diameter_in).to_mm()
    );
    let _ = writeln!(out, "  Loop R:     {:.4} ohms", loop_ohms);
    let _ = writeln!(
        out,
        "  Drop:       {:.2}% {}",
        response.actual_voltage_drop_percent,
        rating.label()
    );
    let _ = writeln!(out, "  At load:    {}", load_voltage(response.voltage_at_load));
    let _ = writeln!(out);
    let _ = writeln!(out, "{RULE}");
    match response.unsatisfied {
        None => {
            let _ = writeln!(out, "  RESULT: {} AWG (governs: {})", response.recommended_designation, response.governing_condition());
        }
        Some(constraint) => {
            let _ = writeln!(
                out,
                "  RESULT: {} AWG - BEST EFFORT ({} not met by any tabulated size)",
                response.recommended_designation, constraint
            );
        }
    }
    let _ = writeln!(out, "{RULE}");
    out
}

/// Conductor table listing.
pub fn table_report(table: &MaterialTable) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} conductors - ampacity at {:.0}°C ({})",
        table.material(),
        table.reference_temp_c(),
        nec_ref::AMPACITY_TABLE
    );
    let _ = writeln!(
        out,
        "{:>6}  {:>10}  {:>9}  {:>8}  {:>12}",
        "AWG", "Dia (in)", "Dia (mm)", "Amps", "Ohms/kft"
    );
    for entry in table.entries() {
        let diameter = entry.diameter();
        let _ = writeln!(
            out,
            "{:>6}  {:>10.4}  {:>9.2}  {:>8.0}  {:>12.4}",
            entry.designation,
            diameter.0,
            diameter.to_mm(),
            entry.ampacity_amps,
            entry.resistance().0
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use wire_core::{conductors, size_conductor, InstallationMethod, Material};

    fn request() -> SizingRequest {
        SizingRequest {
            label: "Shop".to_string(),
            load_current_amps: 20.0,
            system_voltage: 120.0,
            one_way_length_ft: 100.0,
            max_voltage_drop_percent: 3.0,
            material: Material::Copper,
            installation_method: InstallationMethod::Conduit,
            ambient_temp_f: 86.0,
        }
    }

    #[test]
    fn test_drop_rating_tiers() {
        assert_eq!(DropRating::from_percent(2.1), DropRating::Good);
        assert_eq!(DropRating::from_percent(3.0), DropRating::Good);
        assert_eq!(DropRating::from_percent(4.99), DropRating::Caution);
        assert_eq!(DropRating::from_percent(5.0), DropRating::Caution);
        assert_eq!(DropRating::from_percent(5.01), DropRating::Warning);
    }

    #[test]
    fn test_sizing_report_contents() {
        let request = request();
        let response = size_conductor(&request).unwrap();
        let report = sizing_report(&request, &response);

        assert!(report.contains("Circuit:  Shop"));
        assert!(report.contains("Required ampacity = 31.25 A"));
        assert!(report.contains("Ampacity:     10 AWG"));
        assert!(report.contains("RESULT: 8 AWG (governs: Voltage Drop)"));
        assert!(report.contains("[GOOD]"));
    }

    #[test]
    fn test_best_effort_report() {
        let request = SizingRequest {
            load_current_amps: 50.0,
            system_voltage: 12.0,
            one_way_length_ft: 200.0,
            ..request()
        };
        let response = size_conductor(&request).unwrap();
        let report = sizing_report(&request, &response);
        assert!(report.contains("none in table"));
        assert!(report.contains("BEST EFFORT (Voltage Drop"));
        assert!(report.contains("[WARNING]"));
    }

    #[test]
    fn test_install_reference_only_for_bundled_runs() {
        let conduit = request();
        let report = sizing_report(&conduit, &size_conductor(&conduit).unwrap());
        assert!(report.contains("Install factor  0.80\n"));
        assert!(!report.contains(nec_ref::BUNDLING_ADJUSTMENT));

        let bundled = SizingRequest {
            installation_method: InstallationMethod::Bundle,
            ..request()
        };
        let report = sizing_report(&bundled, &size_conductor(&bundled).unwrap());
        assert!(report.contains("Install factor  0.70  (NEC 310.15(C)(1))"));
        assert!(report.contains("Combined divisor 0.700"));
    }

    #[test]
    fn test_drop_beyond_supply_has_no_load_voltage() {
        let request = SizingRequest {
            load_current_amps: 50.0,
            system_voltage: 12.0,
            one_way_length_ft: 2000.0,
            ..request()
        };
        let response = size_conductor(&request).unwrap();
        assert!(response.voltage_at_load < 0.0);

        let report = sizing_report(&request, &response);
        assert!(report.contains("At load:    n/a (exceeds supply)"));
        assert_eq!(load_voltage(117.488), "117.5 V");
        assert_eq!(load_voltage(0.0), "n/a (exceeds supply)");
    }

    #[test]
    fn test_table_report_lists_every_size() {
        let table = conductors::lookup(Material::Aluminum).unwrap();
        let report = table_report(&table);
        for entry in table.entries() {
            assert!(report.contains(entry.designation));
        }
        assert!(report.starts_with("Aluminum conductors"));
        // 4/0 is 0.46 in
        assert!(report.contains("11.68"));
    }
}
