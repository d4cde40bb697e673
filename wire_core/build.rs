//! Compiles `data/conductors.toml` into static Rust tables.
//!
//! The generated file is written to `$OUT_DIR/conductor_data.rs` and pulled in by
//! `src/generated.rs`. Tables that break the gauge-order invariant (ampacity strictly
//! increasing, resistance strictly decreasing) fail the build.

use std::collections::HashSet;
use std::env;
use std::fs;
use std::path::Path;

use serde::Deserialize;

const DATA_FILE: &str = "data/conductors.toml";

#[derive(Debug, Deserialize)]
struct ConductorFile {
    reference_temp_c: u32,
    copper: Vec<ConductorRow>,
    aluminum: Vec<ConductorRow>,
}

#[derive(Debug, Deserialize)]
struct ConductorRow {
    designation: String,
    diameter_in: f64,
    ampacity_amps: f64,
    resistance_ohms_per_kft: f64,
}

fn check_table(material: &str, rows: &[ConductorRow]) {
    if rows.is_empty() {
        panic!("{DATA_FILE}: [{material}] table is empty");
    }

    let mut seen = HashSet::new();
    for row in rows {
        if !seen.insert(row.designation.as_str()) {
            panic!("{DATA_FILE}: [{material}] duplicate designation {:?}", row.designation);
        }
        let values = [row.diameter_in, row.ampacity_amps, row.resistance_ohms_per_kft];
        if values.iter().any(|v| !v.is_finite() || *v <= 0.0) {
            panic!("{DATA_FILE}: [{material}] {:?} has a non-positive value", row.designation);
        }
    }

    for pair in rows.windows(2) {
        let (smaller, larger) = (&pair[0], &pair[1]);
        if larger.ampacity_amps <= smaller.ampacity_amps {
            panic!(
                "{DATA_FILE}: [{material}] ampacity must increase: {:?} ({} A) -> {:?} ({} A)",
                smaller.designation, smaller.ampacity_amps, larger.designation, larger.ampacity_amps
            );
        }
        if larger.resistance_ohms_per_kft >= smaller.resistance_ohms_per_kft {
            panic!(
                "{DATA_FILE}: [{material}] resistance must decrease: {:?} ({}) -> {:?} ({})",
                smaller.designation,
                smaller.resistance_ohms_per_kft,
                larger.designation,
                larger.resistance_ohms_per_kft
            );
        }
    }
}

fn emit_table(out: &mut String, name: &str, rows: &[ConductorRow]) {
    out.push_str(&format!("pub static {name}: &[GaugeEntry] = &[\n"));
    for row in rows {
        out.push_str(&format!(
            "    GaugeEntry {{ designation: {:?}, diameter_in: {:?}, ampacity_amps: {:?}, resistance_ohms_per_kft: {:?} }},\n",
            row.designation, row.diameter_in, row.ampacity_amps, row.resistance_ohms_per_kft
        ));
    }
    out.push_str("];\n\n");
}

fn main() {
    println!("cargo:rerun-if-changed={DATA_FILE}");
    println!("cargo:rerun-if-changed=build.rs");

    let manifest_dir = env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR not set");
    let data_path = Path::new(&manifest_dir).join(DATA_FILE);
    let raw = fs::read_to_string(&data_path)
        .unwrap_or_else(|e| panic!("failed to read {}: {e}", data_path.display()));
    let data: ConductorFile =
        toml::from_str(&raw).unwrap_or_else(|e| panic!("failed to parse {DATA_FILE}: {e}"));

    check_table("copper", &data.copper);
    check_table("aluminum", &data.aluminum);

    let mut out = String::new();
    out.push_str("// @generated by build.rs from data/conductors.toml. Do not edit.\n\n");
    out.push_str("use crate::conductors::GaugeEntry;\n\n");
    out.push_str(&format!(
        "/// Insulation temperature rating of the ampacity column (°C)\npub const REFERENCE_TEMP_C: f64 = {:?};\n\n",
        f64::from(data.reference_temp_c)
    ));
    emit_table(&mut out, "COPPER", &data.copper);
    emit_table(&mut out, "ALUMINUM", &data.aluminum);
    out.push_str(
        "/// Look up a material table by its code (`copper`, `aluminum`).\n\
         pub fn lookup(material_code: &str) -> Option<&'static [GaugeEntry]> {\n\
         \x20   match material_code {\n\
         \x20       \"copper\" => Some(COPPER),\n\
         \x20       \"aluminum\" => Some(ALUMINUM),\n\
         \x20       _ => None,\n\
         \x20   }\n\
         }\n",
    );

    let out_dir = env::var("OUT_DIR").expect("OUT_DIR not set");
    let out_path = Path::new(&out_dir).join("conductor_data.rs");
    fs::write(&out_path, out)
        .unwrap_or_else(|e| panic!("failed to write {}: {e}", out_path.display()));
}
