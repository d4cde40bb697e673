//! # File I/O Module
//!
//! Handles project file operations with safety features:
//! - **Atomic saves**: Write to .tmp, verify, rename to prevent corruption
//! - **Version validation**: Ensure schema compatibility
//!
//! ## File Format
//!
//! Projects are saved as `.wsz` files containing JSON.
//!
//! ## Example
//!
//! ```rust,no_run
//! use wire_core::file_io::{save_project, load_project};
//! use wire_core::project::Project;
//! use std::path::Path;
//!
//! let project = Project::new("Engineer", "25-001", "Client");
//! let path = Path::new("panel-a.wsz");
//!
//! save_project(&project, path)?;
//! let loaded = load_project(path)?;
//! assert_eq!(loaded.meta.job_id, "25-001");
//! # Ok::<(), wire_core::errors::SizingError>(())
//! ```

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use tracing::{debug, warn};

use crate::errors::{SizingError, SizingResult};
use crate::project::{Project, SCHEMA_VERSION};

/// Map an I/O failure on `path` into a `FileError` for `operation`.
fn io_error<'a>(operation: &'static str, path: &'a Path) -> impl FnOnce(std::io::Error) -> SizingError + 'a {
    move |e| SizingError::file_error(operation, path.display().to_string(), e.to_string())
}

fn write_synced(path: &Path, contents: &[u8]) -> SizingResult<()> {
    let mut file = File::create(path).map_err(io_error("create temp file", path))?;
    file.write_all(contents).map_err(io_error("write temp file", path))?;
    file.sync_all().map_err(io_error("sync temp file", path))
}

/// Save a project with atomic write semantics.
///
/// The JSON is written and synced to a sibling `.wsz.tmp` file which is then
/// renamed over `path`. A failed save leaves any existing file untouched and
/// removes the temp file.
pub fn save_project(project: &Project, path: &Path) -> SizingResult<()> {
    let json = serde_json::to_string_pretty(project).map_err(|e| SizingError::SerializationError {
        reason: e.to_string(),
    })?;

    let tmp_path = path.with_extension("wsz.tmp");
    let written = write_synced(&tmp_path, json.as_bytes())
        .and_then(|()| fs::rename(&tmp_path, path).map_err(io_error("rename to final", path)));
    if written.is_err() {
        let _ = fs::remove_file(&tmp_path);
    }
    written?;

    debug!(path = %path.display(), circuits = project.circuit_count(), "saved project");
    Ok(())
}

/// Load a project from a file.
///
/// Circuits whose stored request no longer validates are kept, so they show
/// up as failures in a schedule, and are logged at `warn`.
///
/// # Errors
///
/// * `SizingError::VersionMismatch` - File version is incompatible
/// * `SizingError::SerializationError` - Invalid JSON
/// * `SizingError::FileError` - I/O error
pub fn load_project(path: &Path) -> SizingResult<Project> {
    let contents = fs::read_to_string(path).map_err(io_error("read", path))?;

    let project: Project =
        serde_json::from_str(&contents).map_err(|e| SizingError::SerializationError {
            reason: format!("Invalid JSON in {}: {}", path.display(), e),
        })?;

    validate_version(&project.meta.version)?;

    for (id, label) in project.invalid_circuits() {
        warn!(path = %path.display(), %id, label, "circuit request fails validation");
    }

    debug!(path = %path.display(), circuits = project.circuit_count(), "loaded project");
    Ok(project)
}

/// Validate that a file version is compatible with the current schema.
fn validate_version(file_version: &str) -> SizingResult<()> {
    let mismatch = || SizingError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: SCHEMA_VERSION.to_string(),
    };

    let file_parts: Vec<u32> = file_version
        .split('.')
        .filter_map(|p| p.parse().ok())
        .collect();
    let current_parts: Vec<u32> = SCHEMA_VERSION
        .split('.')
        .filter_map(|p| p.parse().ok())
        .collect();

    let (Some(file_major), Some(current_major)) = (file_parts.first(), current_parts.first()) else {
        return Err(mismatch());
    };

    // Major version must match
    if file_major != current_major {
        return Err(mismatch());
    }

    // For 0.x versions, a newer minor version is not readable
    if *current_major == 0 {
        if let (Some(file_minor), Some(current_minor)) = (file_parts.get(1), current_parts.get(1)) {
            if file_minor > current_minor {
                return Err(mismatch());
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env::temp_dir;
    use std::path::PathBuf;

    fn temp_project_path(name: &str) -> PathBuf {
        temp_dir().join(format!("wire_core_test_{}.wsz", name))
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let path = temp_project_path("roundtrip");

        let mut project = Project::new("Test Engineer", "TEST-001", "Test Client");
        let request = project.new_request("Feeder", 40.0, 150.0);
        let id = project.add_circuit(request.clone());
        save_project(&project, &path).unwrap();

        let loaded = load_project(&path).unwrap();
        assert_eq!(loaded.meta.engineer, "Test Engineer");
        assert_eq!(loaded.meta.job_id, "TEST-001");
        assert_eq!(loaded.get_circuit(&id), Some(&request));

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_atomic_save_creates_no_tmp_file() {
        let path = temp_project_path("atomic");
        let tmp_path = path.with_extension("wsz.tmp");

        let project = Project::new("Test", "TEST", "Client");
        save_project(&project, &path).unwrap();

        assert!(!tmp_path.exists());
        assert!(path.exists());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_project(&temp_project_path("does_not_exist")).unwrap_err();
        assert_eq!(err.error_code(), "FILE_ERROR");
    }

    #[test]
    fn test_load_invalid_json() {
        let path = temp_project_path("invalid_json");
        fs::write(&path, "{ not json").unwrap();

        let err = load_project(&path).unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_rejects_newer_schema() {
        let path = temp_project_path("newer_schema");
        let mut project = Project::new("Test", "TEST", "Client");
        project.meta.version = "0.9.0".to_string();
        save_project(&project, &path).unwrap();

        let err = load_project(&path).unwrap_err();
        assert_eq!(err.error_code(), "VERSION_MISMATCH");

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_load_keeps_invalid_circuits() {
        let path = temp_project_path("invalid_circuit");
        let mut project = Project::new("Test", "TEST", "Client");
        let request = project.new_request("Zero load", 0.0, 100.0);
        let id = project.add_circuit(request);
        save_project(&project, &path).unwrap();

        let loaded = load_project(&path).unwrap();
        assert_eq!(loaded.invalid_circuits(), vec![(id, "Zero load")]);
        let results = loaded.size_all();
        assert_eq!(results[0].result.as_ref().unwrap_err().error_code(), "VALIDATION_ERROR");

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_failed_save_leaves_no_tmp_file() {
        let dir = temp_dir().join("wire_core_test_missing_dir");
        let _ = fs::remove_dir_all(&dir);
        let path = dir.join("project.wsz");

        let err = save_project(&Project::default(), &path).unwrap_err();
        assert_eq!(err.error_code(), "FILE_ERROR");
        assert!(!path.with_extension("wsz.tmp").exists());
    }

    #[test]
    fn test_version_validation() {
        assert!(validate_version(SCHEMA_VERSION).is_ok());
        assert!(validate_version("0.1.5").is_ok());
        assert!(validate_version("0.0.3").is_ok());
        assert!(validate_version("1.0.0").is_err());
        assert!(validate_version("0.2.0").is_err());
        assert!(validate_version("garbage").is_err());
    }
}
