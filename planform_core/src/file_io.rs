//! # File I/O Module
//!
//! Loads aircraft documents and writes populated ones back:
//! - **Format by extension**: `.json` is JSON, anything else is YAML
//! - **Layout kept**: The populated document follows the key order and
//!   number spelling of the input; derived keys the input lacks are appended
//! - **Atomic saves**: Write to a sibling `.tmp`, fsync, rename
//! - **Distinct failures**: a missing file is [`SizingError::FileNotFound`],
//!   a malformed one is [`SizingError::SerializationError`]
//!
//! ## Example
//!
//! ```rust,no_run
//! use planform_core::file_io::{load_document, save_document};
//! use std::path::Path;
//!
//! let document = load_document(Path::new("Aircraft.yaml"))?;
//! let aircraft = document.spec().derive()?;
//! save_document(&document.populated(&aircraft)?, Path::new("Aircraft.yaml"))?;
//! # Ok::<(), planform_core::errors::SizingError>(())
//! ```

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_yaml::Value;
use tracing::{debug, info, warn};

use crate::aircraft::{Aircraft, AircraftSpec};
use crate::errors::{SizingError, SizingResult};

/// On-disk document encoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Yaml,
    Json,
}

impl DocumentFormat {
    /// Pick the format from the file extension, defaulting to YAML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()).map(str::to_ascii_lowercase) {
            Some(ext) if ext == "json" => DocumentFormat::Json,
            Some(ext) if ext == "yaml" || ext == "yml" => DocumentFormat::Yaml,
            other => {
                warn!(path = %path.display(), extension = ?other, "Unrecognized extension, assuming YAML");
                DocumentFormat::Yaml
            }
        }
    }

    /// Parse a document from text.
    pub fn parse<T: DeserializeOwned>(self, contents: &str) -> SizingResult<T> {
        match self {
            DocumentFormat::Yaml => {
                serde_yaml::from_str(contents).map_err(|e| SizingError::serialization(format!("Invalid YAML: {}", e)))
            }
            DocumentFormat::Json => {
                serde_json::from_str(contents).map_err(|e| SizingError::serialization(format!("Invalid JSON: {}", e)))
            }
        }
    }

    /// Render a document to text.
    pub fn render<T: Serialize>(self, value: &T) -> SizingResult<String> {
        match self {
            DocumentFormat::Yaml => serde_yaml::to_string(value).map_err(|e| SizingError::serialization(e.to_string())),
            DocumentFormat::Json => {
                serde_json::to_string_pretty(value).map_err(|e| SizingError::serialization(e.to_string()))
            }
        }
    }
}

/// A loaded aircraft document: the tree as written plus its typed view.
#[derive(Debug, Clone, PartialEq)]
pub struct AircraftDocument {
    source: Value,
    spec: AircraftSpec,
}

impl AircraftDocument {
    /// Build from an already parsed tree.
    pub fn from_value(source: Value) -> SizingResult<Self> {
        let spec = serde_yaml::from_value(source.clone())
            .map_err(|e| SizingError::serialization(format!("Invalid aircraft document: {}", e)))?;
        Ok(Self { source, spec })
    }

    pub fn spec(&self) -> &AircraftSpec {
        &self.spec
    }

    /// The populated document for `aircraft`, laid out like the input.
    ///
    /// Keys keep their input order at every level and derived keys the
    /// input lacks follow in schema order. Numbers whose value did not
    /// change keep their input spelling, so `MTOW_kg: 1000` stays an
    /// integer.
    pub fn populated(&self, aircraft: &Aircraft) -> SizingResult<Value> {
        let derived = serde_yaml::to_value(aircraft).map_err(|e| SizingError::serialization(e.to_string()))?;
        Ok(overlay(&self.source, &derived))
    }
}

/// Lay `derived` over `source`, keeping the layout of `source`.
fn overlay(source: &Value, derived: &Value) -> Value {
    match (source, derived) {
        (Value::Mapping(source), Value::Mapping(derived)) => {
            let mut merged = serde_yaml::Mapping::new();
            for (key, value) in source {
                let value = match derived.get(key) {
                    Some(next) => overlay(value, next),
                    None => value.clone(),
                };
                merged.insert(key.clone(), value);
            }
            for (key, value) in derived {
                if !source.contains_key(key) {
                    merged.insert(key.clone(), value.clone());
                }
            }
            Value::Mapping(merged)
        }
        (Value::Number(a), Value::Number(b)) if a.as_f64() == b.as_f64() => source.clone(),
        (_, derived) => derived.clone(),
    }
}

/// Load a primary aircraft document.
///
/// # Returns
///
/// * `Ok(AircraftDocument)` - Parsed document, not yet derived
/// * `Err(SizingError::FileNotFound)` - No file at `path`
/// * `Err(SizingError::SerializationError)` - Malformed YAML/JSON, or
///   entries of the wrong type
/// * `Err(SizingError::FileError)` - Any other I/O failure
pub fn load_document(path: &Path) -> SizingResult<AircraftDocument> {
    let contents = read_document(path)?;
    let document = DocumentFormat::from_path(path)
        .parse(&contents)
        .and_then(AircraftDocument::from_value)
        .map_err(|e| match e {
            SizingError::SerializationError { reason } => {
                SizingError::serialization(format!("{} in {}", reason, path.display()))
            }
            other => other,
        })?;

    debug!(path = %path.display(), "Aircraft document loaded");
    Ok(document)
}

/// Atomically write any serializable document to `path`.
///
/// The save process:
/// 1. Serialize in the format implied by the extension
/// 2. Write to a temporary file next to the target
/// 3. Sync to disk (fsync)
/// 4. Rename over the target
pub fn save_document<T: Serialize>(document: &T, path: &Path) -> SizingResult<()> {
    let contents = DocumentFormat::from_path(path).render(document)?;

    let tmp_path = tmp_path_for(path);

    let mut tmp_file = File::create(&tmp_path)
        .map_err(|e| SizingError::file_error("create temp file", tmp_path.display().to_string(), e.to_string()))?;

    tmp_file
        .write_all(contents.as_bytes())
        .map_err(|e| SizingError::file_error("write temp file", tmp_path.display().to_string(), e.to_string()))?;

    tmp_file
        .sync_all()
        .map_err(|e| SizingError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string()))?;

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        SizingError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    info!(path = %path.display(), bytes = contents.len(), "Document saved");
    Ok(())
}

fn read_document(path: &Path) -> SizingResult<String> {
    fs::read_to_string(path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => SizingError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => SizingError::file_error("read", path.display().to_string(), e.to_string()),
    })
}

/// `Aircraft.yaml` -> `Aircraft.yaml.tmp`
fn tmp_path_for(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const DOCUMENT: &str = r#"
aircraft_name: Glider
mass_properties:
  MTOW_kg: 1000.0
  wing_loading_kg_per_m2: 100.0
components:
  wing:
    aspect_ratio: 8.0
    taper_ratio: 0.5
    aileron: { start_eta: 0.6, end_eta: 0.95, aileron_chord_percentage: 0.25 }
  fuselage: { length_m: 7.0, width_m: 1.1 }
  horizontal_stabilizer:
    span_m: 3.0
    root_chord_m: 0.8
    taper_ratio: 0.6
    tail_arm_m: 4.5
    elevator: { chord_percentage: 0.35, span_percentage: 0.9 }
  vertical_stabilizer:
    span_m: 1.4
    root_chord_m: 1.0
    taper_ratio: 0.6
    tail_arm_m: 4.3
    rudder: { chord_percentage: 0.4, span_percentage: 0.9 }
"#;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(DocumentFormat::from_path(Path::new("a.json")), DocumentFormat::Json);
        assert_eq!(DocumentFormat::from_path(Path::new("a.JSON")), DocumentFormat::Json);
        assert_eq!(DocumentFormat::from_path(Path::new("a.yml")), DocumentFormat::Yaml);
        assert_eq!(DocumentFormat::from_path(Path::new("Aircraft")), DocumentFormat::Yaml);
    }

    #[test]
    fn test_tmp_path_generation() {
        assert_eq!(tmp_path_for(Path::new("/a/Aircraft.yaml")), Path::new("/a/Aircraft.yaml.tmp"));
    }

    fn load_derived(path: &Path) -> (AircraftDocument, Aircraft) {
        let document = load_document(path).unwrap();
        let aircraft = document.spec().derive().unwrap();
        (document, aircraft)
    }

    #[test]
    fn test_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = load_document(&dir.path().join("absent.yaml")).unwrap_err();
        assert_eq!(err.error_code(), "FILE_NOT_FOUND");
    }

    #[test]
    fn test_malformed_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.yaml");
        fs::write(&path, "components: [unterminated").unwrap();
        let err = load_document(&path).unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
    }

    #[test]
    fn test_wrong_entry_type() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("Aircraft.yaml");
        fs::write(&path, "mass_properties: { MTOW_kg: heavy }\n").unwrap();
        let err = load_document(&path).unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
        assert!(err.to_string().contains("Aircraft.yaml"));
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("Aircraft.yaml");
        fs::write(&input, DOCUMENT).unwrap();

        let (document, aircraft) = load_derived(&input);
        save_document(&document.populated(&aircraft).unwrap(), &input).unwrap();
        assert!(!tmp_path_for(&input).exists());

        // The populated document parses back and derives to the same values
        let (_, reloaded) = load_derived(&input);
        assert_eq!(reloaded, aircraft);
    }

    #[test]
    fn test_save_json() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("Aircraft.yaml");
        fs::write(&input, DOCUMENT).unwrap();
        let (document, aircraft) = load_derived(&input);

        let output = dir.path().join("Aircraft.json");
        save_document(&document.populated(&aircraft).unwrap(), &output).unwrap();
        let value: serde_json::Value = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
        assert_eq!(value["components"]["wing"]["area_m2"], serde_json::json!(10.0));
        assert_eq!(value["aircraft_name"], serde_json::json!("Glider"));
    }

    #[test]
    fn test_json_input_keeps_integers() {
        let dir = TempDir::new().unwrap();
        let yaml: Value = serde_yaml::from_str(DOCUMENT).unwrap();
        let mut json = serde_json::to_value(&yaml).unwrap();
        json["mass_properties"]["MTOW_kg"] = serde_json::json!(1000);
        let input = dir.path().join("Aircraft.json");
        fs::write(&input, serde_json::to_string(&json).unwrap()).unwrap();

        let (document, aircraft) = load_derived(&input);
        save_document(&document.populated(&aircraft).unwrap(), &input).unwrap();
        let text = fs::read_to_string(&input).unwrap();
        assert!(text.contains("\"MTOW_kg\": 1000,"));
    }

    #[test]
    fn test_overlay_keeps_source_layout() {
        let source: Value = serde_yaml::from_str("b: 1\na: { y: 2, x: 0.5 }\nnote: kept\n").unwrap();
        let derived: Value = serde_yaml::from_str("a: { x: 0.5, y: 2.0, z: 3.0 }\nb: 1.0\nc: 4.0\n").unwrap();

        let merged = overlay(&source, &derived);
        assert_eq!(
            serde_yaml::to_string(&merged).unwrap(),
            "b: 1\na:\n  y: 2\n  x: 0.5\n  z: 3.0\nnote: kept\nc: 4.0\n"
        );
    }

    #[test]
    fn test_overlay_takes_changed_values() {
        let source: Value = serde_yaml::from_str("area_m2: 123\n").unwrap();
        let derived: Value = serde_yaml::from_str("area_m2: 10.0\n").unwrap();
        assert_eq!(overlay(&source, &derived)["area_m2"], Value::from(10.0));
    }
}
