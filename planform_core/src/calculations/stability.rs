//! # Longitudinal Static Stability (Wing Contribution)
//!
//! Reads a derived [`Aircraft`] and computes the wing lift-curve slope, the
//! absolute cg and aerodynamic-center positions, and the pitching-moment
//! slope about the cg. The aircraft is only borrowed; nothing is written back.
//!
//! ## Required Inputs
//!
//! | Entry | Source |
//! |-------|--------|
//! | `wing.CMA_m`, `wing.aspect_ratio`, `wing.aerodynamic_center_local_x_mac` | derived wing |
//! | `wing.leading_edge_mac_x_m` | primary, optional in derivation |
//! | `wing.aerodynamics.cl_alpha_per_rad` | primary, optional in derivation |
//! | `mass_properties.xcg_percent_mac` | primary, optional in derivation |
//!
//! `C_m0` is produced only when both `c_l_0` and `c_m_0` are given.
//!
//! ## Example
//!
//! ```rust,ignore
//! let stability = aircraft.evaluate_stability()?;
//! if stability.is_statically_stable() {
//!     println!("C_m_alpha = {:.4} /rad", stability.cm_alpha_per_rad);
//! }
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use super::{checked, require, require_section};
use crate::aircraft::Aircraft;
use crate::equations::registry::{Equation, EquationTracker};
use crate::equations::stability::{
    finite_wing_lift_slope, mac_station, pitching_moment_slope, zero_lift_pitching_moment,
};
use crate::errors::SizingResult;

const COMPONENT: &str = "stability";

/// Wing longitudinal static stability figures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LongitudinalStability {
    /// Finite-wing lift-curve slope (1/rad)
    #[serde(rename = "C_L_alpha_wing_per_rad")]
    pub lift_slope_per_rad: f64,

    /// Absolute cg position (m)
    pub x_cg_m: f64,

    /// Absolute aerodynamic-center position (m)
    pub x_ac_m: f64,

    /// Pitching-moment slope about the cg (1/rad)
    #[serde(rename = "C_ma_w")]
    pub cm_alpha_per_rad: f64,

    /// Zero-lift pitching moment about the cg
    #[serde(rename = "C_m0_w", default, skip_serializing_if = "Option::is_none")]
    pub cm_0: Option<f64>,
}

impl LongitudinalStability {
    /// Negative pitching-moment slope
    pub fn is_statically_stable(&self) -> bool {
        self.cm_alpha_per_rad < 0.0
    }

    /// Static margin in fractions of the MAC, positive when stable.
    pub fn static_margin(&self, mac_m: f64) -> f64 {
        (self.x_ac_m - self.x_cg_m) / mac_m
    }
}

/// Evaluate the wing contribution to longitudinal static stability.
pub fn evaluate(aircraft: &Aircraft) -> SizingResult<LongitudinalStability> {
    evaluate_tracked(aircraft, &mut EquationTracker::new())
}

/// Same as [`evaluate`], recording every equation applied into `tracker`.
pub fn evaluate_tracked(aircraft: &Aircraft, tracker: &mut EquationTracker) -> SizingResult<LongitudinalStability> {
    let wing = aircraft.wing();
    let mac_m = require("wing", "CMA_m", Some(wing.mac_m))?;
    let aspect_ratio = require("wing", "aspect_ratio", Some(wing.aspect_ratio))?;
    let ac_fraction = require(
        "wing",
        "aerodynamic_center_local_x_mac",
        Some(wing.aerodynamic_center_local_x_mac),
    )?;
    let x_le = require("wing", "leading_edge_mac_x_m", wing.leading_edge_mac_x_m)?;
    let aerodynamics = require_section("wing", "aerodynamics", wing.aerodynamics.as_ref())?;
    let cl_alpha = require("wing.aerodynamics", "cl_alpha_per_rad", aerodynamics.cl_alpha_per_rad)?;
    let xcg_fraction = require(
        "mass_properties",
        "xcg_percent_mac",
        aircraft.mass_properties.xcg_percent_mac,
    )?;

    let lift_slope_per_rad = checked(
        COMPONENT,
        "C_L_alpha_wing_per_rad",
        finite_wing_lift_slope(cl_alpha, aspect_ratio),
        "C_L_alpha = a0 / (1 + a0 / (pi * AR))",
    )?;
    tracker.record_for_component(Equation::FiniteWingLiftSlope, "Wing lift-curve slope", COMPONENT);

    let x_cg_m = mac_station(x_le, xcg_fraction, mac_m);
    let x_ac_m = mac_station(x_le, ac_fraction, mac_m);
    tracker.record_for_component(Equation::MacStation, "cg and aerodynamic-center positions", COMPONENT);

    let cm_alpha_per_rad = checked(
        COMPONENT,
        "C_ma_w",
        pitching_moment_slope(lift_slope_per_rad, x_cg_m, x_ac_m, mac_m),
        "C_m_alpha = C_L_alpha * (x_cg - x_ac) / MAC",
    )?;
    tracker.record_for_component(Equation::PitchingMomentSlope, "Wing pitching-moment slope", COMPONENT);

    let cm_0 = match (aerodynamics.c_l_0, aerodynamics.c_m_0) {
        (Some(c_l_0), Some(c_m_0)) => {
            let value = checked(
                COMPONENT,
                "C_m0_w",
                zero_lift_pitching_moment(c_m_0, c_l_0, x_cg_m, x_ac_m, mac_m),
                "C_m0 = c_m_0 + c_l_0 * (x_cg - x_ac) / MAC",
            )?;
            tracker.record_for_component(Equation::ZeroLiftPitchingMoment, "Wing zero-lift moment", COMPONENT);
            Some(value)
        }
        _ => {
            debug!("Section c_l_0/c_m_0 not both given, skipping C_m0");
            None
        }
    };

    info!(
        aircraft = aircraft.display_name(),
        lift_slope_per_rad,
        x_cg_m,
        x_ac_m,
        cm_alpha_per_rad,
        "Longitudinal stability evaluated"
    );

    Ok(LongitudinalStability {
        lift_slope_per_rad,
        x_cg_m,
        x_ac_m,
        cm_alpha_per_rad,
        cm_0,
    })
}
