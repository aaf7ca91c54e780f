//! # Longitudinal Static Stability Formulas
//!
//! Wing contribution to longitudinal static stability.
//!
//! ## Sign Conventions
//!
//! - `x` positions grow aft from the aircraft datum
//! - `C_m_alpha < 0` is statically stable (cg ahead of the aerodynamic center)
//!
//! ## References
//!
//! - Anderson, Fundamentals of Aerodynamics, Finite Wings
//! - Nelson, Flight Stability and Automatic Control, Static Stability

use std::f64::consts::PI;

/// Quarter-chord aerodynamic-center fraction of the MAC.
pub const QUARTER_CHORD: f64 = 0.25;

/// Lift-curve slope of a finite wing from the 2-D section slope.
///
/// # Formula
/// C_Lα = a₀ / (1 + a₀/(π·AR))
///
/// # Example
/// ```rust
/// use planform_core::equations::stability::finite_wing_lift_slope;
///
/// let a = finite_wing_lift_slope(2.0 * std::f64::consts::PI, 8.0);
/// assert!((a - 2.0 * std::f64::consts::PI / 1.25).abs() < 1e-12);
/// ```
#[inline]
pub fn finite_wing_lift_slope(cl_alpha_2d: f64, aspect_ratio: f64) -> f64 {
    cl_alpha_2d / (1.0 + (cl_alpha_2d / (PI * aspect_ratio)))
}

/// Absolute x position of a station given as a fraction of the MAC.
///
/// # Formula
/// x = x_LE + f·c̄
#[inline]
pub fn mac_station(leading_edge_x_m: f64, fraction: f64, mac_m: f64) -> f64 {
    leading_edge_x_m + fraction * mac_m
}

/// Static margin arm: distance from aerodynamic center to cg in MACs.
///
/// # Formula
/// (x_cg − x_ac) / c̄
#[inline]
pub fn normalized_arm(x_cg_m: f64, x_ac_m: f64, mac_m: f64) -> f64 {
    (x_cg_m - x_ac_m) / mac_m
}

/// Wing pitching-moment slope.
///
/// # Formula
/// C_mα = C_Lα·(x_cg − x_ac)/c̄
#[inline]
pub fn pitching_moment_slope(lift_slope: f64, x_cg_m: f64, x_ac_m: f64, mac_m: f64) -> f64 {
    lift_slope * normalized_arm(x_cg_m, x_ac_m, mac_m)
}

/// Wing zero-lift pitching moment about the cg.
///
/// # Formula
/// C_m0 = c_m0 + c_l0·(x_cg − x_ac)/c̄
#[inline]
pub fn zero_lift_pitching_moment(c_m_0: f64, c_l_0: f64, x_cg_m: f64, x_ac_m: f64, mac_m: f64) -> f64 {
    c_m_0 + c_l_0 * normalized_arm(x_cg_m, x_ac_m, mac_m)
}
