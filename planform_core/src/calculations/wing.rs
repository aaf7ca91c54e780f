//! # Wing and Aileron
//!
//! Sizes the wing from the mass properties and derives its planform, then
//! positions and sizes the aileron pair.
//!
//! ## Derivation Order
//!
//! ```text
//! MTOW, W/S ──► area ──► span ──► root chord ──► tip chord ──► MAC ──► x_ac
//!                 │        │                                    │
//!                 │        └──────────► aileron stations        │
//!                 └──► aileron area ratio ◄── aileron area ◄── aileron chord
//! ```
//!
//! ## Conventions
//!
//! - The root chord is the mean geometric chord `S/b`
//! - The aerodynamic center is fixed at the quarter chord (fraction 0.25)
//! - The aileron span is the dimensionless difference `end_eta − start_eta`,
//!   and the aileron area `2·Δη·c_a` consumes it as is
//!
//! ## Example
//!
//! ```rust
//! use planform_core::aircraft::MassProperties;
//! use planform_core::calculations::wing::{calculate, AileronSpec, WingSpec};
//! use planform_core::equations::EquationTracker;
//!
//! let mass = MassProperties {
//!     mtow_kg: Some(1000.0),
//!     wing_loading_kg_per_m2: Some(100.0),
//!     ..Default::default()
//! };
//! let spec = WingSpec {
//!     aspect_ratio: Some(8.0),
//!     taper_ratio: Some(1.0),
//!     aileron: Some(AileronSpec {
//!         start_eta: Some(0.6),
//!         end_eta: Some(0.95),
//!         aileron_chord_percentage: Some(0.25),
//!         ..Default::default()
//!     }),
//!     ..Default::default()
//! };
//!
//! let wing = calculate(&spec, &mass, &mut EquationTracker::new()).unwrap();
//! assert_eq!(wing.mac_m, wing.root_chord_m);
//! ```

use serde::{Deserialize, Serialize};
use serde_yaml::Mapping;
use tracing::debug;

use super::{carry_extra, checked, require, require_section};
use crate::aircraft::MassProperties;
use crate::equations::planform::{
    aileron_pair_area, area_from_wing_loading, area_ratio, chord_from_area, eta_extent, fraction_of,
    half_span_station, span_from_aspect_ratio, tip_chord, trapezoidal_mac,
};
use crate::equations::registry::{Equation, EquationTracker};
use crate::equations::stability::QUARTER_CHORD;
use crate::errors::SizingResult;

const COMPONENT: &str = "wing";
const AILERON: &str = "wing.aileron";

const WING_DERIVED_KEYS: &[&str] = &[
    "area_m2",
    "span_m",
    "root_chord_m",
    "tip_chord_m",
    "CMA_m",
    "aerodynamic_center_local_x_mac",
];

const AILERON_DERIVED_KEYS: &[&str] = &["start_pos", "end_pos", "chord", "span_m", "area_m2", "area_ratio_Sa_Sw"];

/// Primary wing parameters.
///
/// ## YAML Example
///
/// ```yaml
/// wing:
///   aspect_ratio: 8.0
///   taper_ratio: 0.5
///   leading_edge_mac_x_m: 2.0
///   aileron:
///     start_eta: 0.6
///     end_eta: 0.95
///     aileron_chord_percentage: 0.25
///   aerodynamics:
///     cl_alpha_per_rad: 6.28
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WingSpec {
    /// Aspect ratio b²/S
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aspect_ratio: Option<f64>,

    /// Taper ratio c_t/c_r, in (0, 1]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub taper_ratio: Option<f64>,

    /// x position of the MAC leading edge (m); only the stability evaluator reads it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub leading_edge_mac_x_m: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub aileron: Option<AileronSpec>,

    /// Section aerodynamics; only the stability evaluator reads it
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aerodynamics: Option<AirfoilData>,

    #[serde(flatten)]
    pub extra: Mapping,
}

/// Primary aileron parameters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AileronSpec {
    /// Inboard edge as a fraction of the half-span
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_eta: Option<f64>,

    /// Outboard edge as a fraction of the half-span
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_eta: Option<f64>,

    /// Aileron chord as a fraction of the wing MAC
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aileron_chord_percentage: Option<f64>,

    #[serde(flatten)]
    pub extra: Mapping,
}

/// Wing section aerodynamics. Carried through derivation untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AirfoilData {
    /// 2-D lift-curve slope (1/rad)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cl_alpha_per_rad: Option<f64>,

    /// Section lift coefficient at zero angle of attack
    #[serde(skip_serializing_if = "Option::is_none")]
    pub c_l_0: Option<f64>,

    /// Section pitching moment about the aerodynamic center
    #[serde(skip_serializing_if = "Option::is_none")]
    pub c_m_0: Option<f64>,

    #[serde(flatten)]
    pub extra: Mapping,
}

/// Derived wing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wing {
    pub aspect_ratio: f64,
    pub taper_ratio: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leading_edge_mac_x_m: Option<f64>,

    pub aileron: Aileron,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aerodynamics: Option<AirfoilData>,

    #[serde(flatten)]
    pub extra: Mapping,

    /// Reference area (m²)
    pub area_m2: f64,

    /// Span (m)
    pub span_m: f64,

    /// Root chord (m)
    pub root_chord_m: f64,

    /// Tip chord (m)
    pub tip_chord_m: f64,

    /// Mean aerodynamic chord (m)
    #[serde(rename = "CMA_m")]
    pub mac_m: f64,

    /// Aerodynamic center as a fraction of the MAC
    pub aerodynamic_center_local_x_mac: f64,
}

/// Derived aileron pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Aileron {
    pub start_eta: f64,
    pub end_eta: f64,
    pub aileron_chord_percentage: f64,

    #[serde(flatten)]
    pub extra: Mapping,

    /// Inboard edge distance from the root (m)
    pub start_pos: f64,

    /// Outboard edge distance from the root (m)
    pub end_pos: f64,

    /// Chord (m)
    pub chord: f64,

    /// Span extent as a half-span fraction difference (dimensionless)
    pub span_m: f64,

    /// Area of both ailerons
    pub area_m2: f64,

    /// Aileron pair area over wing area
    #[serde(rename = "area_ratio_Sa_Sw")]
    pub area_ratio: f64,
}

/// Derive the wing and its aileron.
pub fn calculate(spec: &WingSpec, mass: &MassProperties, tracker: &mut EquationTracker) -> SizingResult<Wing> {
    let mtow_kg = require("mass_properties", "MTOW_kg", mass.mtow_kg)?;
    let wing_loading = require("mass_properties", "wing_loading_kg_per_m2", mass.wing_loading_kg_per_m2)?;
    let aspect_ratio = require(COMPONENT, "aspect_ratio", spec.aspect_ratio)?;
    let taper_ratio = require(COMPONENT, "taper_ratio", spec.taper_ratio)?;

    let area_m2 = checked(
        COMPONENT,
        "area_m2",
        area_from_wing_loading(mtow_kg, wing_loading),
        "area = MTOW / wing_loading",
    )?;
    tracker.record_for_component(Equation::WingAreaFromLoading, "Wing reference area", COMPONENT);

    let span_m = checked(
        COMPONENT,
        "span_m",
        span_from_aspect_ratio(area_m2, aspect_ratio),
        "span = sqrt(area * aspect_ratio)",
    )?;
    tracker.record_for_component(Equation::SpanFromAspectRatio, "Wing span", COMPONENT);

    let root_chord_m = checked(
        COMPONENT,
        "root_chord_m",
        chord_from_area(area_m2, span_m),
        "root_chord = area / span",
    )?;
    tracker.record_for_component(Equation::RootChordFromArea, "Wing root chord", COMPONENT);

    let tip_chord_m = checked(
        COMPONENT,
        "tip_chord_m",
        tip_chord(root_chord_m, taper_ratio),
        "tip_chord = root_chord * taper_ratio",
    )?;
    tracker.record_for_component(Equation::TipChordFromTaper, "Wing tip chord", COMPONENT);

    let mac_m = checked(
        COMPONENT,
        "CMA_m",
        trapezoidal_mac(root_chord_m, taper_ratio),
        "MAC = 2/3 * root_chord * (1 + taper + taper^2) / (1 + taper)",
    )?;
    tracker.record_for_component(Equation::TrapezoidalMac, "Wing MAC", COMPONENT);

    tracker.record_for_component(Equation::QuarterChordAerodynamicCenter, "Wing aerodynamic center", COMPONENT);

    debug!(component = COMPONENT, area_m2, span_m, root_chord_m, tip_chord_m, mac_m, "Wing planform derived");

    let aileron_spec = require_section(COMPONENT, "aileron", spec.aileron.as_ref())?;
    let aileron = calculate_aileron(aileron_spec, area_m2, span_m, mac_m, tracker)?;

    Ok(Wing {
        aspect_ratio,
        taper_ratio,
        leading_edge_mac_x_m: spec.leading_edge_mac_x_m,
        aileron,
        aerodynamics: spec.aerodynamics.clone(),
        extra: carry_extra(&spec.extra, WING_DERIVED_KEYS),
        area_m2,
        span_m,
        root_chord_m,
        tip_chord_m,
        mac_m,
        aerodynamic_center_local_x_mac: QUARTER_CHORD,
    })
}

/// Derive the aileron pair from the already derived wing planform.
pub fn calculate_aileron(
    spec: &AileronSpec,
    wing_area_m2: f64,
    wing_span_m: f64,
    wing_mac_m: f64,
    tracker: &mut EquationTracker,
) -> SizingResult<Aileron> {
    let start_eta = require(AILERON, "start_eta", spec.start_eta)?;
    let end_eta = require(AILERON, "end_eta", spec.end_eta)?;
    let chord_percentage = require(AILERON, "aileron_chord_percentage", spec.aileron_chord_percentage)?;

    let start_pos = checked(
        AILERON,
        "start_pos",
        half_span_station(wing_span_m, start_eta),
        "start_pos = span / 2 * start_eta",
    )?;
    let end_pos = checked(
        AILERON,
        "end_pos",
        half_span_station(wing_span_m, end_eta),
        "end_pos = span / 2 * end_eta",
    )?;
    tracker.record_for_component(Equation::HalfSpanStation, "Aileron stations", AILERON);

    let chord = checked(
        AILERON,
        "chord",
        fraction_of(wing_mac_m, chord_percentage),
        "chord = wing_MAC * aileron_chord_percentage",
    )?;
    tracker.record_for_component(Equation::ChordFraction, "Aileron chord", AILERON);

    let span_m = checked(AILERON, "span_m", eta_extent(start_eta, end_eta), "span = end_eta - start_eta")?;
    tracker.record_for_component(Equation::AileronSpanExtent, "Aileron span extent", AILERON);

    let area_m2 = checked(
        AILERON,
        "area_m2",
        aileron_pair_area(span_m, chord),
        "area = 2 * (end_eta - start_eta) * chord",
    )?;
    tracker.record_for_component(Equation::AileronPairArea, "Aileron pair area", AILERON);

    let area_ratio = checked(
        AILERON,
        "area_ratio_Sa_Sw",
        area_ratio(area_m2, wing_area_m2),
        "area_ratio = aileron_area / wing_area",
    )?;
    tracker.record_for_component(Equation::ControlSurfaceAreaRatio, "Aileron area ratio", AILERON);

    debug!(component = AILERON, start_pos, end_pos, chord, area_m2, area_ratio, "Aileron derived");

    Ok(Aileron {
        start_eta,
        end_eta,
        aileron_chord_percentage: chord_percentage,
        extra: carry_extra(&spec.extra, AILERON_DERIVED_KEYS),
        start_pos,
        end_pos,
        chord,
        span_m,
        area_m2,
        area_ratio,
    })
}
