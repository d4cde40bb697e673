//! # wire_core - Conductor Sizing Engine
//!
//! `wire_core` recommends a building-wire size for a single-phase circuit by
//! checking both ampacity (with derating) and voltage drop against a
//! material-specific conductor table. All inputs and outputs are
//! JSON-serializable so any front end (CLI, HTTP handler, UI) can call it.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions that take input and return results
//! - **JSON-First**: All request/response types implement Serialize/Deserialize
//! - **Rich Errors**: Structured error types, not just strings
//! - **Static Data**: Conductor tables are compiled in and never mutated
//!
//! ## Quick Start
//!
//! ```rust
//! use wire_core::{size_conductor, InstallationMethod, Material, SizingRequest};
//!
//! let request = SizingRequest {
//!     label: "Garage subpanel".to_string(),
//!     load_current_amps: 40.0,
//!     system_voltage: 240.0,
//!     one_way_length_ft: 120.0,
//!     max_voltage_drop_percent: 3.0,
//!     material: Material::Copper,
//!     installation_method: InstallationMethod::Conduit,
//!     ambient_temp_f: 77.0,
//! };
//!
//! let response = size_conductor(&request)?;
//! println!("Use {} AWG ({:.2}% drop)", response.recommended_designation,
//!     response.actual_voltage_drop_percent);
//! # Ok::<(), wire_core::SizingError>(())
//! ```
//!
//! ## Modules
//!
//! - [`conductors`] - Conductor tables by material
//! - [`derating`] - Required ampacity from load current and conditions
//! - [`voltage_drop`] - Voltage-drop relations
//! - [`sizing`] - Dual-constraint conductor selection
//! - [`project`] - Circuit schedules
//! - [`file_io`] - Project files with atomic saves
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types

pub mod conductors;
pub mod derating;
pub mod errors;
pub mod file_io;
mod generated;
pub mod project;
pub mod sizing;
pub mod units;
pub mod voltage_drop;

// Re-export commonly used types at crate root for convenience
pub use conductors::{GaugeEntry, Material, MaterialTable};
pub use derating::{required_ampacity, DeratingBreakdown, InstallationMethod};
pub use errors::{FieldViolation, SizingError, SizingResult};
pub use file_io::{load_project, save_project};
pub use project::{GlobalSettings, Project, ProjectMetadata};
pub use sizing::{size_conductor, Constraint, GoverningConstraint, SizingRequest, SizingResponse};
