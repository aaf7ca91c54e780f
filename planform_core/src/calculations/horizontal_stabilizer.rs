//! # Horizontal Stabilizer and Elevator
//!
//! Derives the horizontal tail planform and its volume coefficient, then the
//! elevator dimensions.
//!
//! ## Assumptions
//!
//! - Tail area is `span × root_chord` (rectangular approximation); taper only
//!   enters the tip chord and the MAC
//! - Volume coefficient is referenced to the wing area and wing MAC
//! - Elevator chord is a fraction of the stabilizer MAC, elevator span a
//!   fraction of the stabilizer span

use serde::{Deserialize, Serialize};
use serde_yaml::Mapping;
use tracing::debug;

use super::wing::Wing;
use super::{carry_extra, checked, require, require_section};
use crate::equations::planform::{fraction_of, horizontal_tail_volume, rectangular_area, tip_chord, trapezoidal_mac};
use crate::equations::registry::{Equation, EquationTracker};
use crate::errors::SizingResult;

const COMPONENT: &str = "horizontal_stabilizer";
const ELEVATOR: &str = "horizontal_stabilizer.elevator";

/// Primary horizontal stabilizer parameters.
///
/// ## YAML Example
///
/// ```yaml
/// horizontal_stabilizer:
///   span_m: 3.0
///   root_chord_m: 0.8
///   taper_ratio: 0.6
///   tail_arm_m: 4.5
///   elevator:
///     chord_percentage: 0.35
///     span_percentage: 0.9
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HorizontalStabilizerSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub span_m: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub root_chord_m: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub taper_ratio: Option<f64>,

    /// Distance from the wing to the tail aerodynamic center (m)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tail_arm_m: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub elevator: Option<ElevatorSpec>,

    #[serde(flatten)]
    pub extra: Mapping,
}

/// Primary elevator parameters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ElevatorSpec {
    /// Fraction of the stabilizer MAC
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chord_percentage: Option<f64>,

    /// Fraction of the stabilizer span
    #[serde(skip_serializing_if = "Option::is_none")]
    pub span_percentage: Option<f64>,

    #[serde(flatten)]
    pub extra: Mapping,
}

/// Derived horizontal stabilizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HorizontalStabilizer {
    pub span_m: f64,
    pub root_chord_m: f64,
    pub taper_ratio: f64,
    pub tail_arm_m: f64,
    pub elevator: Elevator,

    #[serde(flatten)]
    pub extra: Mapping,

    pub area_m2: f64,
    pub tip_chord_m: f64,

    #[serde(rename = "CMA_m")]
    pub mac_m: f64,

    /// S_H·l_H / (S_w·MAC_w)
    pub volume_coefficient: f64,
}

/// Derived elevator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Elevator {
    pub chord_percentage: f64,
    pub span_percentage: f64,

    #[serde(flatten)]
    pub extra: Mapping,

    pub chord_m: f64,
    pub span_m: f64,
}

/// Derive the horizontal stabilizer and its elevator. Needs the derived wing.
pub fn calculate(
    spec: &HorizontalStabilizerSpec,
    wing: &Wing,
    tracker: &mut EquationTracker,
) -> SizingResult<HorizontalStabilizer> {
    let span_m = require(COMPONENT, "span_m", spec.span_m)?;
    let root_chord_m = require(COMPONENT, "root_chord_m", spec.root_chord_m)?;
    let taper_ratio = require(COMPONENT, "taper_ratio", spec.taper_ratio)?;
    let tail_arm_m = require(COMPONENT, "tail_arm_m", spec.tail_arm_m)?;

    let area_m2 = checked(COMPONENT, "area_m2", rectangular_area(span_m, root_chord_m), "area = span * root_chord")?;
    tracker.record_for_component(Equation::RectangularSurfaceArea, "Horizontal tail area", COMPONENT);

    let tip_chord_m = checked(
        COMPONENT,
        "tip_chord_m",
        tip_chord(root_chord_m, taper_ratio),
        "tip_chord = root_chord * taper_ratio",
    )?;
    tracker.record_for_component(Equation::TipChordFromTaper, "Horizontal tail tip chord", COMPONENT);

    let mac_m = checked(
        COMPONENT,
        "CMA_m",
        trapezoidal_mac(root_chord_m, taper_ratio),
        "MAC = 2/3 * root_chord * (1 + taper + taper^2) / (1 + taper)",
    )?;
    tracker.record_for_component(Equation::TrapezoidalMac, "Horizontal tail MAC", COMPONENT);

    let volume_coefficient = checked(
        COMPONENT,
        "volume_coefficient",
        horizontal_tail_volume(area_m2, tail_arm_m, wing.area_m2, wing.mac_m),
        "volume_coefficient = area * tail_arm / (wing_area * wing_MAC)",
    )?;
    tracker.record_for_component(Equation::HorizontalTailVolume, "Horizontal tail volume", COMPONENT);

    debug!(component = COMPONENT, area_m2, mac_m, volume_coefficient, "Horizontal stabilizer derived");

    let elevator_spec = require_section(COMPONENT, "elevator", spec.elevator.as_ref())?;
    let elevator = calculate_elevator(elevator_spec, span_m, mac_m, tracker)?;

    Ok(HorizontalStabilizer {
        span_m,
        root_chord_m,
        taper_ratio,
        tail_arm_m,
        elevator,
        extra: carry_extra(&spec.extra, &["area_m2", "tip_chord_m", "CMA_m", "volume_coefficient"]),
        area_m2,
        tip_chord_m,
        mac_m,
        volume_coefficient,
    })
}

/// Derive the elevator from the stabilizer span and MAC.
pub fn calculate_elevator(
    spec: &ElevatorSpec,
    stabilizer_span_m: f64,
    stabilizer_mac_m: f64,
    tracker: &mut EquationTracker,
) -> SizingResult<Elevator> {
    let chord_percentage = require(ELEVATOR, "chord_percentage", spec.chord_percentage)?;
    let span_percentage = require(ELEVATOR, "span_percentage", spec.span_percentage)?;

    let chord_m = checked(
        ELEVATOR,
        "chord_m",
        fraction_of(stabilizer_mac_m, chord_percentage),
        "chord = stabilizer_MAC * chord_percentage",
    )?;
    tracker.record_for_component(Equation::ChordFraction, "Elevator chord", ELEVATOR);

    let span_m = checked(
        ELEVATOR,
        "span_m",
        fraction_of(stabilizer_span_m, span_percentage),
        "span = stabilizer_span * span_percentage",
    )?;
    tracker.record_for_component(Equation::SpanFraction, "Elevator span", ELEVATOR);

    Ok(Elevator {
        chord_percentage,
        span_percentage,
        extra: carry_extra(&spec.extra, &["chord_m", "span_m"]),
        chord_m,
        span_m,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::reference_wing;
    use approx::assert_relative_eq;

    fn test_spec() -> HorizontalStabilizerSpec {
        HorizontalStabilizerSpec {
            span_m: Some(3.0),
            root_chord_m: Some(0.8),
            taper_ratio: Some(0.6),
            tail_arm_m: Some(4.5),
            elevator: Some(ElevatorSpec {
                chord_percentage: Some(0.35),
                span_percentage: Some(0.9),
                ..Default::default()
            }),
            extra: Mapping::new(),
        }
    }

    #[test]
    fn test_horizontal_stabilizer_geometry() {
        let wing = reference_wing(10.0, 8.944, 0.87);
        let stab = calculate(&test_spec(), &wing, &mut EquationTracker::new()).unwrap();

        assert_relative_eq!(stab.area_m2, 2.4, max_relative = 1e-12);
        assert_relative_eq!(stab.tip_chord_m, 0.48, max_relative = 1e-12);
        // (2/3)(0.8)(1 + 0.6 + 0.36)/(1.6)
        assert_relative_eq!(stab.mac_m, 2.0 / 3.0 * 0.8 * 1.96 / 1.6, max_relative = 1e-12);
        assert_relative_eq!(stab.volume_coefficient, 2.4 * 4.5 / (10.0 * 0.87), max_relative = 1e-12);
    }

    #[test]
    fn test_volume_coefficient_uses_wing_mac() {
        let short = calculate(&test_spec(), &reference_wing(10.0, 8.944, 0.87), &mut EquationTracker::new()).unwrap();
        let long = calculate(&test_spec(), &reference_wing(10.0, 8.944, 1.74), &mut EquationTracker::new()).unwrap();
        assert_relative_eq!(short.volume_coefficient, 2.0 * long.volume_coefficient, max_relative = 1e-12);
    }

    #[test]
    fn test_elevator() {
        let wing = reference_wing(10.0, 8.944, 0.87);
        let stab = calculate(&test_spec(), &wing, &mut EquationTracker::new()).unwrap();
        assert_relative_eq!(stab.elevator.chord_m, stab.mac_m * 0.35, max_relative = 1e-12);
        assert_relative_eq!(stab.elevator.span_m, 2.7, max_relative = 1e-12);
    }

    #[test]
    fn test_overflow_reported_at_area() {
        let spec = HorizontalStabilizerSpec {
            span_m: Some(1.0e200),
            root_chord_m: Some(1.0e200),
            ..test_spec()
        };
        let err = calculate(&spec, &reference_wing(10.0, 8.944, 0.87), &mut EquationTracker::new()).unwrap_err();
        assert_eq!(err.field_path().as_deref(), Some("horizontal_stabilizer.area_m2"));
    }

    #[test]
    fn test_overflow_reported_at_elevator_span() {
        let mut spec = HorizontalStabilizerSpec {
            span_m: Some(1.0e300),
            root_chord_m: Some(1.0e-300),
            ..test_spec()
        };
        if let Some(elevator) = spec.elevator.as_mut() {
            elevator.span_percentage = Some(1.0e10);
        }
        let err = calculate(&spec, &reference_wing(10.0, 8.944, 0.87), &mut EquationTracker::new()).unwrap_err();
        assert_eq!(err.field_path().as_deref(), Some("horizontal_stabilizer.elevator.span_m"));
    }

    #[test]
    fn test_missing_tail_arm() {
        let spec = HorizontalStabilizerSpec {
            tail_arm_m: None,
            ..test_spec()
        };
        let err = calculate(&spec, &reference_wing(10.0, 8.944, 0.87), &mut EquationTracker::new()).unwrap_err();
        assert_eq!(err.field_path().as_deref(), Some("horizontal_stabilizer.tail_arm_m"));
    }

    #[test]
    fn test_missing_elevator_field() {
        let mut spec = test_spec();
        if let Some(elevator) = spec.elevator.as_mut() {
            elevator.span_percentage = None;
        }
        let err = calculate(&spec, &reference_wing(10.0, 8.944, 0.87), &mut EquationTracker::new()).unwrap_err();
        assert_eq!(err.field_path().as_deref(), Some("horizontal_stabilizer.elevator.span_percentage"));
    }
}
