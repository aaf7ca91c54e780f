//! # Aircraft Document
//!
//! The aircraft document is the single structure exchanged with the outside
//! world. It exists in two phases:
//!
//! ```text
//! AircraftSpec                      (primary parameters, as loaded)
//! ├── aircraft_name
//! ├── mass_properties: MassProperties
//! └── components: ComponentsSpec
//!     ├── wing: WingSpec (+ aileron, aerodynamics)
//!     ├── fuselage: FuselageSpec
//!     ├── horizontal_stabilizer: HorizontalStabilizerSpec (+ elevator)
//!     └── vertical_stabilizer: VerticalStabilizerSpec (+ rudder)
//!
//!        │ derive()
//!        ▼
//!
//! Aircraft                          (primary + derived, immutable)
//! ```
//!
//! Primary fields are `Option`s so that an absent entry is reported by the
//! engine as a `MissingField` naming the component and field, instead of a
//! parse error. Keys the schema does not know are kept in `extra` maps and
//! written back in place.
//!
//! ## Example
//!
//! ```rust
//! use planform_core::aircraft::AircraftSpec;
//!
//! let yaml = r#"
//! mass_properties:
//!   MTOW_kg: 1000.0
//!   wing_loading_kg_per_m2: 100.0
//! components:
//!   wing:
//!     taper_ratio: 0.5
//! "#;
//! let spec: AircraftSpec = serde_yaml::from_str(yaml).unwrap();
//!
//! let err = spec.derive().unwrap_err();
//! assert_eq!(err.to_string(), "Missing required field: wing.aspect_ratio");
//! ```

use serde::{Deserialize, Serialize};
use serde_yaml::Mapping;

use crate::calculations::fuselage::{Fuselage, FuselageSpec};
use crate::calculations::horizontal_stabilizer::{HorizontalStabilizer, HorizontalStabilizerSpec};
use crate::calculations::stability::{self, LongitudinalStability};
use crate::calculations::vertical_stabilizer::{VerticalStabilizer, VerticalStabilizerSpec};
use crate::calculations::wing::{Wing, WingSpec};
use crate::calculations;
use crate::errors::SizingResult;

/// Root of the primary-parameter document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AircraftSpec {
    /// Free-form aircraft name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aircraft_name: Option<String>,

    /// Take-off mass, wing loading and cg position
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mass_properties: Option<MassProperties>,

    /// Primary parameters per airframe component
    #[serde(skip_serializing_if = "Option::is_none")]
    pub components: Option<ComponentsSpec>,

    /// Unrecognized keys, preserved for write-back
    #[serde(flatten)]
    pub extra: Mapping,
}

impl AircraftSpec {
    /// Run the derivation engine on this document.
    ///
    /// Shorthand for [`calculations::derive`].
    pub fn derive(&self) -> SizingResult<Aircraft> {
        calculations::derive(self)
    }
}

/// Mass properties block. Shared by both document phases: nothing here is derived.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MassProperties {
    /// Maximum take-off mass (kg)
    #[serde(rename = "MTOW_kg", skip_serializing_if = "Option::is_none")]
    pub mtow_kg: Option<f64>,

    /// Wing loading (kg/m²)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wing_loading_kg_per_m2: Option<f64>,

    /// Center of gravity as a fraction of the wing MAC (0.30 = 30 %)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub xcg_percent_mac: Option<f64>,

    #[serde(flatten)]
    pub extra: Mapping,
}

/// `components` block of the primary document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComponentsSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wing: Option<WingSpec>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub fuselage: Option<FuselageSpec>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub horizontal_stabilizer: Option<HorizontalStabilizerSpec>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub vertical_stabilizer: Option<VerticalStabilizerSpec>,

    #[serde(flatten)]
    pub extra: Mapping,
}

/// Fully derived aircraft document.
///
/// Produced once by the derivation engine and never mutated afterwards.
/// Serializes to the populated document: primary fields followed by the
/// derived fields of each component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aircraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aircraft_name: Option<String>,

    pub mass_properties: MassProperties,

    pub components: Components,

    #[serde(flatten)]
    pub extra: Mapping,
}

impl Aircraft {
    /// Evaluate the wing contribution to longitudinal static stability.
    ///
    /// Shorthand for [`stability::evaluate`].
    pub fn evaluate_stability(&self) -> SizingResult<LongitudinalStability> {
        stability::evaluate(self)
    }

    /// Wing of the derived aircraft
    pub fn wing(&self) -> &Wing {
        &self.components.wing
    }

    /// Display name, falling back to "Unnamed aircraft"
    pub fn display_name(&self) -> &str {
        self.aircraft_name.as_deref().unwrap_or("Unnamed aircraft")
    }
}

/// Derived `components` block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Components {
    pub wing: Wing,
    pub fuselage: Fuselage,
    pub horizontal_stabilizer: HorizontalStabilizer,
    pub vertical_stabilizer: VerticalStabilizer,

    #[serde(flatten)]
    pub extra: Mapping,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spec_parses_schema_keys() {
        let yaml = r#"
aircraft_name: Trainer
mass_properties:
  MTOW_kg: 750
  wing_loading_kg_per_m2: 60.0
  xcg_percent_mac: 0.28
components:
  fuselage:
    length_m: 6.5
    width_m: 1.0
"#;
        let spec: AircraftSpec = serde_yaml::from_str(yaml).unwrap();
        let mass = spec.mass_properties.as_ref().unwrap();
        assert_eq!(mass.mtow_kg, Some(750.0));
        assert_eq!(mass.xcg_percent_mac, Some(0.28));
        let fuselage = spec.components.as_ref().unwrap().fuselage.as_ref().unwrap();
        assert_eq!(fuselage.width_m, Some(1.0));
        assert!(spec.components.as_ref().unwrap().wing.is_none());
    }

    #[test]
    fn test_unknown_keys_are_preserved() {
        let yaml = "aircraft_name: X\nrevision: 3\nmass_properties:\n  MTOW_kg: 10.0\n  payload_kg: 2.0\n";
        let spec: AircraftSpec = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(spec.extra.get("revision"), Some(&serde_yaml::Value::from(3)));

        let written = serde_yaml::to_string(&spec).unwrap();
        assert!(written.contains("revision: 3"));
        assert!(written.contains("payload_kg: 2.0"));
    }

    #[test]
    fn test_missing_sections_report_document_path() {
        let spec = AircraftSpec::default();
        let err = spec.derive().unwrap_err();
        assert_eq!(err.field_path().as_deref(), Some("aircraft.mass_properties"));
    }
}
