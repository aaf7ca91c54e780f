//! Load, derive, evaluate and persist a complete aircraft document.

use std::fs;

use approx::assert_relative_eq;
use pretty_assertions::assert_eq;
use serde_yaml::Value;
use tempfile::TempDir;

use planform_core::equations::{Equation, EquationTracker};
use planform_core::file_io::{load_document, save_document};
use planform_core::{derive_tracked, Aircraft, AircraftDocument, AircraftSpec, SizingError};

const DOCUMENT: &str = r#"
aircraft_name: Trainer 1000
project: demo
mass_properties:
  MTOW_kg: 1000.0
  wing_loading_kg_per_m2: 100.0
  xcg_percent_mac: 0.22
components:
  wing:
    aspect_ratio: 8.0
    taper_ratio: 0.5
    leading_edge_mac_x_m: 2.0
    aileron:
      start_eta: 0.6
      end_eta: 0.95
      aileron_chord_percentage: 0.25
    aerodynamics:
      cl_alpha_per_rad: 6.28
      c_l_0: 0.3
      c_m_0: -0.05
    area_m2: 123.0
  fuselage:
    length_m: 7.0
    width_m: 1.1
  horizontal_stabilizer:
    span_m: 3.0
    root_chord_m: 0.8
    taper_ratio: 0.6
    tail_arm_m: 4.5
    elevator:
      chord_percentage: 0.35
      span_percentage: 0.9
  vertical_stabilizer:
    span_m: 1.4
    root_chord_m: 1.0
    taper_ratio: 0.6
    tail_arm_m: 4.3
    rudder:
      chord_percentage: 0.4
      span_percentage: 0.9
"#;

fn write_document(dir: &TempDir, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join("Aircraft.yaml");
    fs::write(&path, contents).unwrap();
    path
}

// Same aircraft, keys shuffled against the schema and integers where possible
const SHUFFLED: &str = r#"
components:
  wing:
    notes: keep me
    taper_ratio: 0.5
    aspect_ratio: 8
    aileron:
      aileron_chord_percentage: 0.25
      end_eta: 0.95
      start_eta: 0.6
  vertical_stabilizer:
    rudder: { span_percentage: 0.9, chord_percentage: 0.4 }
    tail_arm_m: 4.3
    taper_ratio: 0.6
    root_chord_m: 1
    span_m: 1.4
  horizontal_stabilizer:
    elevator: { span_percentage: 0.9, chord_percentage: 0.35 }
    tail_arm_m: 4.5
    taper_ratio: 0.6
    root_chord_m: 0.8
    span_m: 3
  fuselage: { width_m: 1.1, length_m: 7 }
mass_properties:
  wing_loading_kg_per_m2: 100
  MTOW_kg: 1000
aircraft_name: Shuffled
"#;

fn load_derived(path: &std::path::Path) -> (AircraftDocument, Aircraft) {
    let document = load_document(path).unwrap();
    let aircraft = document.spec().derive().unwrap();
    (document, aircraft)
}

fn save_populated(document: &AircraftDocument, aircraft: &Aircraft, path: &std::path::Path) {
    save_document(&document.populated(aircraft).unwrap(), path).unwrap();
}

fn keys(value: &Value) -> Vec<String> {
    value
        .as_mapping()
        .map(|m| m.keys().filter_map(|k| k.as_str().map(String::from)).collect())
        .unwrap_or_default()
}

#[test]
fn test_reference_aircraft_end_to_end() {
    let dir = TempDir::new().unwrap();
    let path = write_document(&dir, DOCUMENT);

    let (_, aircraft) = load_derived(&path);
    let wing = aircraft.wing();

    // A stale derived value in the input is recomputed
    assert_relative_eq!(wing.area_m2, 10.0, max_relative = 1e-12);
    assert_relative_eq!(wing.span_m, 8.944, epsilon = 1e-3);
    assert_relative_eq!(wing.root_chord_m, 1.118, epsilon = 1e-3);
    assert_relative_eq!(wing.tip_chord_m, 0.559, epsilon = 1e-3);
    assert_relative_eq!(wing.mac_m, 0.8696, epsilon = 1e-3);

    let fuselage = &aircraft.components.fuselage;
    assert_relative_eq!(fuselage.fineness_ratio, 7.0 / 1.1, max_relative = 1e-12);

    let stability = aircraft.evaluate_stability().unwrap();
    assert!(stability.is_statically_stable());
    assert!(stability.cm_0.is_some());
}

#[test]
fn test_populated_document_key_order() {
    let dir = TempDir::new().unwrap();
    let path = write_document(&dir, DOCUMENT);
    let (document, aircraft) = load_derived(&path);

    let out = dir.path().join("populated.yaml");
    save_populated(&document, &aircraft, &out);
    let written: Value = serde_yaml::from_str(&fs::read_to_string(&out).unwrap()).unwrap();

    assert_eq!(
        keys(&written),
        vec!["aircraft_name", "project", "mass_properties", "components"]
    );
    assert_eq!(
        keys(&written["components"]["wing"]),
        vec![
            "aspect_ratio",
            "taper_ratio",
            "leading_edge_mac_x_m",
            "aileron",
            "aerodynamics",
            "area_m2",
            "span_m",
            "root_chord_m",
            "tip_chord_m",
            "CMA_m",
            "aerodynamic_center_local_x_mac",
        ]
    );
    assert_eq!(
        keys(&written["components"]["wing"]["aileron"]),
        vec![
            "start_eta",
            "end_eta",
            "aileron_chord_percentage",
            "start_pos",
            "end_pos",
            "chord",
            "span_m",
            "area_m2",
            "area_ratio_Sa_Sw",
        ]
    );
    assert_eq!(
        keys(&written["components"]["vertical_stabilizer"]["rudder"]),
        vec![
            "chord_percentage",
            "span_percentage",
            "span_m",
            "root_chord_m",
            "tip_chord_m",
            "CMA_m",
            "mean_chord_m",
        ]
    );

    // Primary values survive unchanged, stale derived ones are replaced
    assert_eq!(written["mass_properties"]["MTOW_kg"], Value::from(1000.0));
    assert_eq!(written["project"], Value::from("demo"));
    assert_eq!(written["components"]["wing"]["area_m2"], Value::from(10.0));
}

#[test]
fn test_populated_document_follows_input_layout() {
    let dir = TempDir::new().unwrap();
    let path = write_document(&dir, SHUFFLED);
    let (document, aircraft) = load_derived(&path);
    save_populated(&document, &aircraft, &path);

    let text = fs::read_to_string(&path).unwrap();
    let written: Value = serde_yaml::from_str(&text).unwrap();

    assert_eq!(keys(&written), vec!["components", "mass_properties", "aircraft_name"]);
    assert_eq!(
        keys(&written["components"]),
        vec!["wing", "vertical_stabilizer", "horizontal_stabilizer", "fuselage"]
    );
    assert_eq!(keys(&written["mass_properties"]), vec!["wing_loading_kg_per_m2", "MTOW_kg"]);
    assert_eq!(
        keys(&written["components"]["wing"]),
        vec![
            "notes",
            "taper_ratio",
            "aspect_ratio",
            "aileron",
            "area_m2",
            "span_m",
            "root_chord_m",
            "tip_chord_m",
            "CMA_m",
            "aerodynamic_center_local_x_mac",
        ]
    );
    assert_eq!(
        keys(&written["components"]["wing"]["aileron"]),
        vec![
            "aileron_chord_percentage",
            "end_eta",
            "start_eta",
            "start_pos",
            "end_pos",
            "chord",
            "span_m",
            "area_m2",
            "area_ratio_Sa_Sw",
        ]
    );
    assert_eq!(
        keys(&written["components"]["fuselage"]),
        vec!["width_m", "length_m", "fineness_ratio"]
    );

    // Integers stay integers
    assert!(text.contains("  wing_loading_kg_per_m2: 100\n  MTOW_kg: 1000\n"));
    assert_eq!(written["components"]["wing"]["aspect_ratio"], Value::from(8));
    assert_eq!(written["components"]["wing"]["notes"], Value::from("keep me"));

    // And the result still derives to the same aircraft
    let (_, again) = load_derived(&path);
    assert_eq!(again, aircraft);
}

#[test]
fn test_populated_document_derives_again_to_itself() {
    let dir = TempDir::new().unwrap();
    let path = write_document(&dir, DOCUMENT);
    let (document, first) = load_derived(&path);
    save_populated(&document, &first, &path);

    let (_, second) = load_derived(&path);
    assert_eq!(first, second);
}

#[test]
fn test_missing_aspect_ratio_end_to_end() {
    let dir = TempDir::new().unwrap();
    let path = write_document(&dir, &DOCUMENT.replace("    aspect_ratio: 8.0\n", ""));

    let document = load_document(&path).unwrap();
    let err = document.spec().derive().unwrap_err();
    assert_eq!(err, SizingError::missing_field("wing", "aspect_ratio"));
    assert_eq!(err.to_string(), "Missing required field: wing.aspect_ratio");
}

#[test]
fn test_equations_tracked_in_derivation_order() {
    let spec: AircraftSpec = serde_yaml::from_str(DOCUMENT).unwrap();
    let mut tracker = EquationTracker::new();
    let aircraft = derive_tracked(&spec, &mut tracker).unwrap();
    planform_core::calculations::stability::evaluate_tracked(&aircraft, &mut tracker).unwrap();

    let applied = tracker.unique_equations();
    let position = |eq: Equation| applied.iter().position(|e| *e == eq).unwrap();

    assert_eq!(applied[0], Equation::WingAreaFromLoading);
    assert!(position(Equation::TrapezoidalMac) < position(Equation::HorizontalTailVolume));
    assert!(position(Equation::HorizontalTailVolume) < position(Equation::VerticalTailVolume));
    assert!(position(Equation::VerticalTailVolume) < position(Equation::FiniteWingLiftSlope));
    assert!(applied.contains(&Equation::ZeroLiftPitchingMoment));
}
