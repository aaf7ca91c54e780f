//! # Vertical Stabilizer and Rudder
//!
//! The fin is treated as a rectangle: its area is `span × root_chord` and its
//! MAC is the root chord. The volume coefficient is referenced to the wing
//! area and the wing **span**, so a change of wing MAC leaves it untouched.
//!
//! The rudder sits on that fin but is tapered with the fin taper ratio, so
//! its MAC comes from the trapezoid formula.

use serde::{Deserialize, Serialize};
use serde_yaml::Mapping;
use tracing::debug;

use super::wing::Wing;
use super::{carry_extra, checked, require, require_section};
use crate::equations::planform::{fraction_of, rectangular_area, tip_chord, trapezoidal_mac, vertical_tail_volume};
use crate::equations::registry::{Equation, EquationTracker};
use crate::errors::SizingResult;

const COMPONENT: &str = "vertical_stabilizer";
const RUDDER: &str = "vertical_stabilizer.rudder";

/// Primary vertical stabilizer parameters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerticalStabilizerSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub span_m: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub root_chord_m: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub taper_ratio: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub tail_arm_m: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub rudder: Option<RudderSpec>,

    #[serde(flatten)]
    pub extra: Mapping,
}

/// Primary rudder parameters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RudderSpec {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chord_percentage: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub span_percentage: Option<f64>,

    #[serde(flatten)]
    pub extra: Mapping,
}

/// Derived vertical stabilizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerticalStabilizer {
    pub span_m: f64,
    pub root_chord_m: f64,
    pub taper_ratio: f64,
    pub tail_arm_m: f64,
    pub rudder: Rudder,

    #[serde(flatten)]
    pub extra: Mapping,

    pub area_m2: f64,

    #[serde(rename = "CMA_m")]
    pub mac_m: f64,

    /// S_V·l_V / (S_w·b_w)
    pub volume_coefficient: f64,
}

/// Derived rudder.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rudder {
    pub chord_percentage: f64,
    pub span_percentage: f64,

    #[serde(flatten)]
    pub extra: Mapping,

    pub span_m: f64,
    pub root_chord_m: f64,
    pub tip_chord_m: f64,

    #[serde(rename = "CMA_m")]
    pub mac_m: f64,

    /// Fin root chord times the chord fraction
    pub mean_chord_m: f64,
}

/// Derive the vertical stabilizer and its rudder. Needs the derived wing.
pub fn calculate(
    spec: &VerticalStabilizerSpec,
    wing: &Wing,
    tracker: &mut EquationTracker,
) -> SizingResult<VerticalStabilizer> {
    let span_m = require(COMPONENT, "span_m", spec.span_m)?;
    let root_chord_m = require(COMPONENT, "root_chord_m", spec.root_chord_m)?;
    let taper_ratio = require(COMPONENT, "taper_ratio", spec.taper_ratio)?;
    let tail_arm_m = require(COMPONENT, "tail_arm_m", spec.tail_arm_m)?;

    let area_m2 = checked(COMPONENT, "area_m2", rectangular_area(span_m, root_chord_m), "area = span * root_chord")?;
    tracker.record_for_component(Equation::RectangularSurfaceArea, "Vertical tail area", COMPONENT);

    let mac_m = root_chord_m;
    tracker.record_for_component(Equation::RectangularMac, "Vertical tail MAC", COMPONENT);

    let volume_coefficient = checked(
        COMPONENT,
        "volume_coefficient",
        vertical_tail_volume(area_m2, tail_arm_m, wing.area_m2, wing.span_m),
        "volume_coefficient = area * tail_arm / (wing_area * wing_span)",
    )?;
    tracker.record_for_component(Equation::VerticalTailVolume, "Vertical tail volume", COMPONENT);

    debug!(component = COMPONENT, area_m2, mac_m, volume_coefficient, "Vertical stabilizer derived");

    let rudder_spec = require_section(COMPONENT, "rudder", spec.rudder.as_ref())?;
    let rudder = calculate_rudder(rudder_spec, span_m, root_chord_m, mac_m, taper_ratio, tracker)?;

    Ok(VerticalStabilizer {
        span_m,
        root_chord_m,
        taper_ratio,
        tail_arm_m,
        rudder,
        extra: carry_extra(&spec.extra, &["area_m2", "CMA_m", "volume_coefficient"]),
        area_m2,
        mac_m,
        volume_coefficient,
    })
}

/// Derive the rudder from the fin geometry.
pub fn calculate_rudder(
    spec: &RudderSpec,
    fin_span_m: f64,
    fin_root_chord_m: f64,
    fin_mac_m: f64,
    fin_taper_ratio: f64,
    tracker: &mut EquationTracker,
) -> SizingResult<Rudder> {
    let chord_percentage = require(RUDDER, "chord_percentage", spec.chord_percentage)?;
    let span_percentage = require(RUDDER, "span_percentage", spec.span_percentage)?;

    let span_m = checked(
        RUDDER,
        "span_m",
        fraction_of(fin_span_m, span_percentage),
        "span = fin_span * span_percentage",
    )?;
    tracker.record_for_component(Equation::SpanFraction, "Rudder span", RUDDER);

    let root_chord_m = checked(
        RUDDER,
        "root_chord_m",
        fraction_of(fin_mac_m, chord_percentage),
        "root_chord = fin_MAC * chord_percentage",
    )?;
    tracker.record_for_component(Equation::ChordFraction, "Rudder root chord", RUDDER);

    let tip_chord_m = checked(
        RUDDER,
        "tip_chord_m",
        tip_chord(root_chord_m, fin_taper_ratio),
        "tip_chord = root_chord * taper_ratio",
    )?;
    tracker.record_for_component(Equation::TipChordFromTaper, "Rudder tip chord", RUDDER);

    let mac_m = checked(
        RUDDER,
        "CMA_m",
        trapezoidal_mac(root_chord_m, fin_taper_ratio),
        "MAC = 2/3 * root_chord * (1 + taper + taper^2) / (1 + taper)",
    )?;
    tracker.record_for_component(Equation::TrapezoidalMac, "Rudder MAC", RUDDER);

    let mean_chord_m = checked(
        RUDDER,
        "mean_chord_m",
        fraction_of(fin_root_chord_m, chord_percentage),
        "mean_chord = fin_root_chord * chord_percentage",
    )?;

    debug!(component = RUDDER, span_m, root_chord_m, mac_m, "Rudder derived");

    Ok(Rudder {
        chord_percentage,
        span_percentage,
        extra: carry_extra(&spec.extra, &["span_m", "root_chord_m", "tip_chord_m", "CMA_m", "mean_chord_m"]),
        span_m,
        root_chord_m,
        tip_chord_m,
        mac_m,
        mean_chord_m,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculations::reference_wing;
    use crate::errors::SizingError;
    use approx::assert_relative_eq;

    fn test_spec() -> VerticalStabilizerSpec {
        VerticalStabilizerSpec {
            span_m: Some(1.4),
            root_chord_m: Some(1.0),
            taper_ratio: Some(0.6),
            tail_arm_m: Some(4.3),
            rudder: Some(RudderSpec {
                chord_percentage: Some(0.4),
                span_percentage: Some(0.9),
                ..Default::default()
            }),
            extra: Mapping::new(),
        }
    }

    #[test]
    fn test_fin_geometry() {
        let wing = reference_wing(10.0, 8.944, 0.87);
        let fin = calculate(&test_spec(), &wing, &mut EquationTracker::new()).unwrap();

        assert_relative_eq!(fin.area_m2, 1.4, max_relative = 1e-12);
        assert_eq!(fin.mac_m, fin.root_chord_m);
        assert_relative_eq!(fin.volume_coefficient, 1.4 * 4.3 / (10.0 * 8.944), max_relative = 1e-12);
    }

    #[test]
    fn test_volume_coefficient_independent_of_wing_mac() {
        let a = calculate(&test_spec(), &reference_wing(10.0, 8.944, 0.87), &mut EquationTracker::new()).unwrap();
        let b = calculate(&test_spec(), &reference_wing(10.0, 8.944, 1.30), &mut EquationTracker::new()).unwrap();
        assert_eq!(a.volume_coefficient, b.volume_coefficient);
    }

    #[test]
    fn test_rudder_uses_tapered_mac() {
        let fin = calculate(&test_spec(), &reference_wing(10.0, 8.944, 0.87), &mut EquationTracker::new()).unwrap();
        let rudder = &fin.rudder;

        assert_relative_eq!(rudder.span_m, 1.26, max_relative = 1e-12);
        assert_relative_eq!(rudder.root_chord_m, 0.4, max_relative = 1e-12);
        assert_relative_eq!(rudder.tip_chord_m, 0.24, max_relative = 1e-12);
        // (2/3)(0.4)(1 + 0.6 + 0.36)/(1.6)
        assert_relative_eq!(rudder.mac_m, 2.0 / 3.0 * 0.4 * 1.96 / 1.6, max_relative = 1e-12);
        assert_relative_eq!(rudder.mean_chord_m, 0.4, max_relative = 1e-12);
        assert!(rudder.mac_m < rudder.root_chord_m);
    }

    #[test]
    fn test_missing_rudder_section() {
        let spec = VerticalStabilizerSpec {
            rudder: None,
            ..test_spec()
        };
        let err = calculate(&spec, &reference_wing(10.0, 8.944, 0.87), &mut EquationTracker::new()).unwrap_err();
        assert_eq!(err, SizingError::missing_field("vertical_stabilizer", "rudder"));
    }

    #[test]
    fn test_rudder_overflow_reported_at_root_chord() {
        let mut spec = VerticalStabilizerSpec {
            root_chord_m: Some(10.0),
            ..test_spec()
        };
        if let Some(rudder) = spec.rudder.as_mut() {
            rudder.chord_percentage = Some(1.0e308);
        }
        let err = calculate(&spec, &reference_wing(10.0, 8.944, 0.87), &mut EquationTracker::new()).unwrap_err();
        assert_eq!(err.field_path().as_deref(), Some("vertical_stabilizer.rudder.root_chord_m"));
    }

    #[test]
    fn test_zero_wing_span_is_invalid() {
        let err = calculate(&test_spec(), &reference_wing(10.0, 0.0, 0.87), &mut EquationTracker::new()).unwrap_err();
        assert_eq!(err.field_path().as_deref(), Some("vertical_stabilizer.volume_coefficient"));
    }
}
