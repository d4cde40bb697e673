//! # Wire Sizing CLI
//!
//! Terminal front end for the conductor sizing engine.
//!
//! ```text
//! wire_cli size --current 20 --length 100 --voltage 120
//! wire_cli size --current 40 --length 250 --material aluminum --json
//! wire_cli table copper
//! wire_cli init panel-a.wsz
//! wire_cli schedule panel-a.wsz
//! ```

mod report;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing::Level;

use wire_core::{
    conductors, load_project, save_project, size_conductor, GlobalSettings, InstallationMethod,
    Material, Project, SizingError, SizingRequest,
};

#[derive(Parser, Debug)]
#[command(author, version, about, arg_required_else_help = true)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Log engine decisions to stderr
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Size a single circuit
    Size(SizeArgs),
    /// Size every circuit in a project file
    Schedule {
        /// Project file (.wsz)
        path: PathBuf,
        #[arg(long = "json", short = 'j', help = "Print output as JSON")]
        json: bool,
    },
    /// Write an example project file
    Init {
        /// Project file to create (.wsz)
        path: PathBuf,
    },
    /// Print the conductor table for a material
    Table {
        #[arg(value_parser = parse_material, default_value = "copper")]
        material: Material,
    },
}

#[derive(clap::Args, Debug)]
struct SizeArgs {
    /// Load current (A)
    #[arg(long, short = 'i')]
    current: f64,
    /// One-way length from source to load (ft)
    #[arg(long, short = 'l')]
    length: f64,
    /// System voltage (V)
    #[arg(long)]
    voltage: Option<f64>,
    /// Voltage-drop budget (%)
    #[arg(long)]
    max_drop: Option<f64>,
    /// copper | aluminum
    #[arg(long, value_parser = parse_material)]
    material: Option<Material>,
    /// free-air | conduit | bundle | buried
    #[arg(long, value_parser = parse_installation)]
    install: Option<InstallationMethod>,
    /// Ambient temperature (°F)
    #[arg(long, allow_negative_numbers = true)]
    ambient: Option<f64>,
    /// Circuit label
    #[arg(long, default_value = "")]
    label: String,
    /// Take defaults from this project file's settings
    #[arg(long)]
    project: Option<PathBuf>,
    #[arg(long = "json", short = 'j', help = "Print output as JSON")]
    json: bool,
}

fn parse_material(s: &str) -> Result<Material, String> {
    Material::from_str_flexible(s).map_err(|e| e.to_string())
}

fn parse_installation(s: &str) -> Result<InstallationMethod, String> {
    InstallationMethod::from_str_flexible(s).map_err(|e| e.to_string())
}

impl SizeArgs {
    fn to_request(&self, settings: &GlobalSettings) -> SizingRequest {
        SizingRequest {
            label: self.label.clone(),
            load_current_amps: self.current,
            system_voltage: self.voltage.unwrap_or(settings.system_voltage),
            one_way_length_ft: self.length,
            max_voltage_drop_percent: self.max_drop.unwrap_or(settings.max_voltage_drop_percent),
            material: self.material.unwrap_or(settings.material),
            installation_method: self.install.unwrap_or(settings.installation_method),
            ambient_temp_f: self.ambient.unwrap_or(settings.ambient_temp_f),
        }
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn print_error(e: &SizingError) {
    eprintln!("Error: {}", e);
    if let Ok(json) = serde_json::to_string_pretty(e) {
        eprintln!();
        eprintln!("Error JSON:");
        eprintln!("{}", json);
    }
}

fn run_size(args: &SizeArgs) -> Result<(), SizingError> {
    let settings = match &args.project {
        Some(path) => load_project(path)?.settings,
        None => GlobalSettings::default(),
    };
    let request = args.to_request(&settings);
    let response = size_conductor(&request)?;

    if args.json {
        let json = serde_json::to_string_pretty(&response).map_err(|e| SizingError::SerializationError {
            reason: e.to_string(),
        })?;
        println!("{}", json);
    } else {
        print!("{}", report::sizing_report(&request, &response));
    }
    Ok(())
}

fn run_schedule(path: &Path, json: bool) -> Result<(), SizingError> {
    let project = load_project(path)?;
    let results = project.size_all();

    if json {
        let json = serde_json::to_string_pretty(&results).map_err(|e| SizingError::SerializationError {
            reason: e.to_string(),
        })?;
        println!("{}", json);
        return Ok(());
    }

    println!("Job {} - {} ({})", project.meta.job_id, project.meta.client, project.meta.engineer);
    println!();
    println!("{:<20}  {:>8}  {:>8}  {:>8}  {}", "Circuit", "AWG", "Amps", "Drop %", "Notes");
    for circuit in &results {
        match &circuit.result {
            Ok(r) => {
                let note = match r.unsatisfied {
                    Some(c) => format!("best effort: {} not met", c),
                    None => format!("governs: {}", r.governing_condition()),
                };
                let rating = report::DropRating::from_percent(r.actual_voltage_drop_percent);
                println!(
                    "{:<20}  {:>8}  {:>8.0}  {:>8.2}  {} {}",
                    circuit.label,
                    r.recommended_designation,
                    r.rated_ampacity_amps,
                    r.actual_voltage_drop_percent,
                    rating.label(),
                    note
                );
            }
            Err(e) => println!("{:<20}  {:>8}  {:>8}  {:>8}  [{}] {}", circuit.label, "-", "-", "-", e.error_code(), e),
        }
    }
    Ok(())
}

fn run_init(path: &Path) -> Result<(), SizingError> {
    let mut project = Project::new("Engineer", "00-000", "Client");
    let branch = project.new_request("Kitchen branch", 16.0, 60.0);
    let feeder = SizingRequest {
        system_voltage: 240.0,
        ..project.new_request("Garage subpanel", 40.0, 150.0)
    };
    let pump = SizingRequest {
        system_voltage: 240.0,
        installation_method: InstallationMethod::Buried,
        ambient_temp_f: 70.0,
        ..project.new_request("Well pump", 12.0, 400.0)
    };
    project.add_circuit(branch);
    project.add_circuit(feeder);
    project.add_circuit(pump);

    save_project(&project, path)?;
    println!("Wrote {} ({} circuits)", path.display(), project.circuit_count());
    Ok(())
}

fn run_table(material: Material) -> Result<(), SizingError> {
    let table = conductors::lookup(material)?;
    print!("{}", report::table_report(&table));
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let outcome = match &cli.command {
        Command::Size(args) => run_size(args),
        Command::Schedule { path, json } => run_schedule(path, *json),
        Command::Init { path } => run_init(path),
        Command::Table { material } => run_table(*material),
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            print_error(&e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_size_args_fill_from_settings() {
        let cli = Cli::parse_from([
            "wire_cli", "size", "--current", "20", "--length", "100", "--install", "free air",
        ]);
        let Command::Size(args) = cli.command else {
            panic!("expected size subcommand");
        };
        let request = args.to_request(&GlobalSettings::default());
        assert_eq!(request.load_current_amps, 20.0);
        assert_eq!(request.system_voltage, 120.0);
        assert_eq!(request.material, Material::Copper);
        assert_eq!(request.installation_method, InstallationMethod::FreeAir);
    }

    #[test]
    fn test_negative_ambient_parses() {
        let cli = Cli::parse_from([
            "wire_cli", "size", "-i", "10", "-l", "50", "--ambient", "-10", "--material", "al",
        ]);
        let Command::Size(args) = cli.command else {
            panic!("expected size subcommand");
        };
        let request = args.to_request(&GlobalSettings::default());
        assert_eq!(request.ambient_temp_f, -10.0);
        assert_eq!(request.material, Material::Aluminum);
    }

    #[test]
    fn test_bad_material_is_rejected() {
        let result = Cli::try_parse_from(["wire_cli", "table", "silver"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_init_then_schedule() {
        let path = std::env::temp_dir().join("wire_cli_test_init.wsz");
        run_init(&path).unwrap();
        let project = load_project(&path).unwrap();
        assert_eq!(project.circuit_count(), 3);
        assert!(project.size_all().iter().all(|c| c.result.is_ok()));
        let _ = std::fs::remove_file(&path);
    }
}
