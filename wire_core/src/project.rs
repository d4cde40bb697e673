//! # Circuit Schedule
//!
//! The `Project` struct is a named collection of circuits to size together.
//! Projects serialize to `.wsz` files as human-readable JSON and hold only
//! circuit inputs; sizing results are always recomputed.
//!
//! ## Structure
//!
//! ```text
//! Project
//! ├── meta: ProjectMetadata (version, engineer, job info, timestamps)
//! ├── settings: GlobalSettings (defaults for new circuits)
//! └── circuits: HashMap<Uuid, SizingRequest>
//! ```
//!
//! ## Example
//!
//! ```rust
//! use wire_core::project::Project;
//!
//! let mut project = Project::new("Jane Engineer", "25-042", "ACME Corp");
//! let request = project.new_request("Shop feeder", 20.0, 100.0);
//! project.add_circuit(request);
//!
//! let results = project.size_all();
//! assert_eq!(results.len(), 1);
//! assert_eq!(results[0].result.as_ref().unwrap().recommended_designation, "8");
//! ```

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::conductors::Material;
use crate::derating::InstallationMethod;
use crate::errors::SizingResult;
use crate::sizing::{size_conductor, SizingRequest, SizingResponse};

/// Current schema version for .wsz files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Root project container.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    /// Project metadata (version, engineer, job info)
    pub meta: ProjectMetadata,

    /// Defaults for new circuits
    pub settings: GlobalSettings,

    /// All circuits, keyed by UUID
    pub circuits: HashMap<Uuid, SizingRequest>,
}

impl Project {
    /// Create a new empty project.
    ///
    /// # Example
    ///
    /// ```rust
    /// use wire_core::project::Project;
    ///
    /// let project = Project::new("John Doe", "25-001", "Client Corp");
    /// assert_eq!(project.meta.engineer, "John Doe");
    /// ```
    pub fn new(engineer: impl Into<String>, job_id: impl Into<String>, client: impl Into<String>) -> Self {
        Project {
            meta: ProjectMetadata::new(engineer.into(), job_id.into(), client.into()),
            settings: GlobalSettings::default(),
            circuits: HashMap::new(),
        }
    }

    /// Build a request for a new circuit using the project defaults.
    pub fn new_request(&self, label: impl Into<String>, load_current_amps: f64, one_way_length_ft: f64) -> SizingRequest {
        SizingRequest {
            label: label.into(),
            load_current_amps,
            system_voltage: self.settings.system_voltage,
            one_way_length_ft,
            max_voltage_drop_percent: self.settings.max_voltage_drop_percent,
            material: self.settings.material,
            installation_method: self.settings.installation_method,
            ambient_temp_f: self.settings.ambient_temp_f,
        }
    }

    /// Add a circuit under a fresh id.
    pub fn add_circuit(&mut self, request: SizingRequest) -> Uuid {
        let id = Uuid::new_v4();
        debug!(%id, label = request.label.as_str(), "added circuit");
        self.circuits.insert(id, request);
        self.touch();
        id
    }

    /// Remove a circuit, returning its request if it was present.
    pub fn remove_circuit(&mut self, id: &Uuid) -> Option<SizingRequest> {
        let removed = self.circuits.remove(id)?;
        self.touch();
        Some(removed)
    }

    /// Request stored under `id`
    pub fn get_circuit(&self, id: &Uuid) -> Option<&SizingRequest> {
        self.circuits.get(id)
    }

    /// Stamp the project as modified now.
    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }

    /// Number of circuits in the project
    pub fn circuit_count(&self) -> usize {
        self.circuits.len()
    }

    /// Circuits whose stored request fails validation, as `(id, label)`.
    pub fn invalid_circuits(&self) -> Vec<(Uuid, &str)> {
        self.circuits
            .iter()
            .filter(|(_, request)| request.validate().is_err())
            .map(|(id, request)| (*id, request.label.as_str()))
            .collect()
    }

    /// Size every circuit, ordered by label.
    ///
    /// A failing circuit is reported in its own entry and does not stop the rest.
    pub fn size_all(&self) -> Vec<CircuitResult> {
        let mut results: Vec<CircuitResult> = self
            .circuits
            .iter()
            .map(|(id, request)| CircuitResult {
                id: *id,
                label: request.label.clone(),
                result: size_conductor(request),
            })
            .collect();
        results.sort_by(|a, b| a.label.cmp(&b.label).then(a.id.cmp(&b.id)));

        debug!(
            job_id = self.meta.job_id.as_str(),
            circuits = results.len(),
            failed = results.iter().filter(|r| r.result.is_err()).count(),
            "sized project"
        );
        results
    }
}

impl Default for Project {
    fn default() -> Self {
        Project::new("", "", "")
    }
}

/// Outcome of sizing one circuit of a project.
#[derive(Debug, Clone, Serialize)]
pub struct CircuitResult {
    pub id: Uuid,
    pub label: String,
    pub result: SizingResult<SizingResponse>,
}

/// Project metadata stored in the file header.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectMetadata {
    /// Schema version (for migration compatibility)
    pub version: String,

    /// Name of the responsible engineer
    pub engineer: String,

    /// Job/project number
    pub job_id: String,

    /// Client name
    pub client: String,

    /// When the project was created
    pub created: DateTime<Utc>,

    /// When the project was last modified
    pub modified: DateTime<Utc>,
}

impl ProjectMetadata {
    fn new(engineer: String, job_id: String, client: String) -> Self {
        let now = Utc::now();
        ProjectMetadata {
            version: SCHEMA_VERSION.to_string(),
            engineer,
            job_id,
            client,
            created: now,
            modified: now,
        }
    }
}

/// Defaults applied to new circuits.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GlobalSettings {
    /// System voltage (V)
    pub system_voltage: f64,

    /// Voltage-drop budget (% of system voltage)
    pub max_voltage_drop_percent: f64,

    /// Conductor material
    pub material: Material,

    /// Installation method
    pub installation_method: InstallationMethod,

    /// Design ambient temperature (°F)
    pub ambient_temp_f: f64,
}

impl Default for GlobalSettings {
    fn default() -> Self {
        GlobalSettings {
            system_voltage: 120.0,
            max_voltage_drop_percent: 3.0,
            material: Material::Copper,
            installation_method: InstallationMethod::Conduit,
            ambient_temp_f: 86.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_creation() {
        let project = Project::new("John Doe", "25-001", "Acme Corp");
        assert_eq!(project.meta.engineer, "John Doe");
        assert_eq!(project.meta.job_id, "25-001");
        assert_eq!(project.meta.client, "Acme Corp");
        assert_eq!(project.meta.version, SCHEMA_VERSION);
        assert_eq!(project.circuit_count(), 0);
    }

    #[test]
    fn test_project_serialization() {
        let mut project = Project::new("Jane Engineer", "25-042", "Test Client");
        let request = project.new_request("Well pump", 12.0, 250.0);
        project.add_circuit(request);

        let json = serde_json::to_string_pretty(&project).unwrap();
        assert!(json.contains("Jane Engineer"));
        assert!(json.contains("Well pump"));
        assert!(json.contains("\"conduit\""));

        let roundtrip: Project = serde_json::from_str(&json).unwrap();
        assert_eq!(roundtrip.meta.engineer, "Jane Engineer");
        assert_eq!(roundtrip.circuit_count(), 1);
    }

    #[test]
    fn test_add_remove_circuit() {
        let mut project = Project::new("Engineer", "25-001", "Client");
        let request = project.new_request("C-1", 15.0, 50.0);

        let id = project.add_circuit(request);
        assert_eq!(project.circuit_count(), 1);
        assert_eq!(project.get_circuit(&id).unwrap().label, "C-1");

        let removed = project.remove_circuit(&id);
        assert!(removed.is_some());
        assert_eq!(project.circuit_count(), 0);
        assert!(project.remove_circuit(&id).is_none());
    }

    #[test]
    fn test_new_request_uses_settings() {
        let mut project = Project::default();
        project.settings.system_voltage = 240.0;
        project.settings.material = Material::Aluminum;

        let request = project.new_request("Heater", 30.0, 80.0);
        assert_eq!(request.system_voltage, 240.0);
        assert_eq!(request.material, Material::Aluminum);
        assert_eq!(request.max_voltage_drop_percent, 3.0);
    }

    #[test]
    fn test_size_all_keeps_going_after_failure() {
        let mut project = Project::default();
        let good = project.new_request("A good", 20.0, 100.0);
        let bad = project.new_request("B bad", 0.0, 100.0);
        let huge = project.new_request("C huge", 400.0, 500.0);
        project.add_circuit(huge);
        project.add_circuit(bad);
        project.add_circuit(good);

        let results = project.size_all();
        let labels: Vec<&str> = results.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, vec!["A good", "B bad", "C huge"]);

        assert!(results[0].result.is_ok());
        assert_eq!(results[1].result.as_ref().unwrap_err().error_code(), "VALIDATION_ERROR");
        assert_eq!(results[2].result.as_ref().unwrap_err().error_code(), "OUT_OF_RANGE");
    }

    #[test]
    fn test_invalid_circuits_lists_only_bad_requests() {
        let mut project = Project::default();
        let good = project.add_circuit(project.new_request("Lights", 15.0, 60.0));
        let bad = project.add_circuit(project.new_request("Typo", -5.0, 60.0));

        let invalid = project.invalid_circuits();
        assert_eq!(invalid, vec![(bad, "Typo")]);
        assert!(!invalid.iter().any(|(id, _)| *id == good));
    }

    #[test]
    fn test_removing_missing_circuit_keeps_timestamp() {
        let mut project = Project::default();
        let before = project.meta.modified;
        assert!(project.remove_circuit(&Uuid::new_v4()).is_none());
        assert_eq!(project.meta.modified, before);
    }

    #[test]
    fn test_settings_fill_missing_fields() {
        let settings: GlobalSettings = serde_json::from_str(r#"{"system_voltage": 277.0}"#).unwrap();
        assert_eq!(settings.system_voltage, 277.0);
        assert_eq!(settings.installation_method, InstallationMethod::Conduit);
    }
}
