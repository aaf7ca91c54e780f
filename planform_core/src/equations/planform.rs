//! # Planform Geometry Formulas
//!
//! Closed-form relations for trapezoidal lifting surfaces, control surfaces
//! and tail sizing. All lengths are in meters, areas in square meters, masses
//! in kilograms.
//!
//! ## Notation
//!
//! - `S` = Planform area
//! - `b` = Span
//! - `AR` = Aspect ratio (b²/S)
//! - `λ` = Taper ratio (c_t / c_r)
//! - `c_r`, `c_t` = Root and tip chord
//! - `c̄` = Mean aerodynamic chord (MAC)
//! - `η` = Spanwise station as a fraction of the half-span
//!
//! ## References
//!
//! - Raymer, Aircraft Design: A Conceptual Approach, Wing Geometry
//! - Raymer, Aircraft Design: A Conceptual Approach, Tail Volume Coefficient

// =============================================================================
// WING SIZING
// =============================================================================

/// Wing reference area from take-off mass and wing loading.
///
/// # Formula
/// S = W / (W/S)
///
/// # Example
/// ```rust
/// use planform_core::equations::planform::area_from_wing_loading;
///
/// let area = area_from_wing_loading(1000.0, 100.0);
/// assert!((area - 10.0).abs() < 1e-12);
/// ```
#[inline]
pub fn area_from_wing_loading(mtow_kg: f64, wing_loading_kg_per_m2: f64) -> f64 {
    mtow_kg / wing_loading_kg_per_m2
}

/// Span from area and aspect ratio.
///
/// # Formula
/// b = √(S·AR)
///
/// A negative product yields NaN; callers check the result.
#[inline]
pub fn span_from_aspect_ratio(area_m2: f64, aspect_ratio: f64) -> f64 {
    (area_m2 * aspect_ratio).sqrt()
}

/// Mean geometric chord, used as the wing root chord of this model.
///
/// # Formula
/// c = S / b
#[inline]
pub fn chord_from_area(area_m2: f64, span_m: f64) -> f64 {
    area_m2 / span_m
}

/// Tip chord of a linearly tapered surface.
///
/// # Formula
/// c_t = λ·c_r
#[inline]
pub fn tip_chord(root_chord_m: f64, taper_ratio: f64) -> f64 {
    root_chord_m * taper_ratio
}

/// Mean aerodynamic chord of a linearly tapered trapezoid.
///
/// ```text
///   c_r ┌──────────────┐
///       │               ╲
///       │                ╲  c_t
///       └─────────────────┘
///              b/2
/// ```
///
/// # Formula
/// c̄ = (2/3)·c_r·(1 + λ + λ²)/(1 + λ)
///
/// # Example
/// ```rust
/// use planform_core::equations::planform::trapezoidal_mac;
///
/// // Untapered: MAC equals the root chord
/// assert_eq!(trapezoidal_mac(1.2, 1.0), 1.2);
/// ```
#[inline]
pub fn trapezoidal_mac(root_chord_m: f64, taper_ratio: f64) -> f64 {
    let lambda = taper_ratio;
    // Single ratio so that λ = 1 returns the root chord bit for bit
    root_chord_m * ((2.0 * (1.0 + lambda + lambda * lambda)) / (3.0 * (1.0 + lambda)))
}

/// Area of a surface given span and root chord (rectangular planform convention).
///
/// # Formula
/// S = b·c_r
#[inline]
pub fn rectangular_area(span_m: f64, root_chord_m: f64) -> f64 {
    span_m * root_chord_m
}

/// Fuselage fineness ratio.
///
/// # Formula
/// f = l / d
#[inline]
pub fn fineness_ratio(length_m: f64, width_m: f64) -> f64 {
    length_m / width_m
}

// =============================================================================
// CONTROL SURFACES
// =============================================================================

/// Absolute spanwise station of a fractional half-span position.
///
/// # Formula
/// y = (b/2)·η
#[inline]
pub fn half_span_station(span_m: f64, eta: f64) -> f64 {
    (span_m / 2.0) * eta
}

/// Aileron "span" as the difference of its half-span fractions.
///
/// This is a dimensionless quantity (Δη), not a length; the aileron area
/// below consumes it directly.
///
/// # Formula
/// Δη = η_end − η_start
#[inline]
pub fn eta_extent(start_eta: f64, end_eta: f64) -> f64 {
    end_eta - start_eta
}

/// Dimension of a control surface as a fraction of its parent dimension.
///
/// # Formula
/// x = x_ref·p
#[inline]
pub fn fraction_of(reference: f64, fraction: f64) -> f64 {
    reference * fraction
}

/// Total aileron area for the symmetric pair.
///
/// # Formula
/// S_a = 2·Δη·c_a
#[inline]
pub fn aileron_pair_area(span_extent: f64, chord_m: f64) -> f64 {
    2.0 * (span_extent * chord_m)
}

/// Ratio of a control-surface area to its reference area.
///
/// # Formula
/// S_a / S_w
#[inline]
pub fn area_ratio(surface_area_m2: f64, reference_area_m2: f64) -> f64 {
    surface_area_m2 / reference_area_m2
}

// =============================================================================
// TAIL SIZING
// =============================================================================

/// Horizontal tail volume coefficient, referenced to the wing MAC.
///
/// # Formula
/// V_H = S_H·l_H / (S_w·c̄_w)
#[inline]
pub fn horizontal_tail_volume(tail_area_m2: f64, tail_arm_m: f64, wing_area_m2: f64, wing_mac_m: f64) -> f64 {
    (tail_area_m2 * tail_arm_m) / (wing_area_m2 * wing_mac_m)
}

/// Vertical tail volume coefficient, referenced to the wing span.
///
/// # Formula
/// V_V = S_V·l_V / (S_w·b_w)
#[inline]
pub fn vertical_tail_volume(tail_area_m2: f64, tail_arm_m: f64, wing_area_m2: f64, wing_span_m: f64) -> f64 {
    (tail_area_m2 * tail_arm_m) / (wing_area_m2 * wing_span_m)
}
