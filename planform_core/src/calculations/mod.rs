//! # Derivation Engine
//!
//! Turns a primary-parameter [`AircraftSpec`] into a fully derived
//! [`Aircraft`]. Each component follows the pattern:
//!
//! - `*Spec` - Primary parameters as found in the document (optional fields)
//! - `*` (e.g. [`wing::Wing`]) - Primary plus derived fields (all present)
//! - `calculate(spec, ..., tracker) -> SizingResult<*>` - Pure derivation
//!
//! ## Derivation Order
//!
//! 1. Wing, then its aileron
//! 2. Fuselage
//! 3. Horizontal stabilizer (needs wing area and MAC), then its elevator
//! 4. Vertical stabilizer (needs wing area and span), then its rudder
//!
//! The longitudinal stability evaluator in [`stability`] runs strictly after.
//!
//! ## Available Calculations
//!
//! - [`wing`] - Wing planform and aileron
//! - [`fuselage`] - Fuselage fineness ratio
//! - [`horizontal_stabilizer`] - Horizontal tail and elevator
//! - [`vertical_stabilizer`] - Vertical tail and rudder
//! - [`stability`] - Wing longitudinal static stability

pub mod fuselage;
pub mod horizontal_stabilizer;
pub mod stability;
pub mod vertical_stabilizer;
pub mod wing;

use serde_yaml::Mapping;
use tracing::{debug, info};

use crate::aircraft::{Aircraft, AircraftSpec, Components};
use crate::equations::registry::EquationTracker;
use crate::errors::{SizingError, SizingResult};

// Re-export commonly used types
pub use fuselage::{Fuselage, FuselageSpec};
pub use horizontal_stabilizer::{Elevator, ElevatorSpec, HorizontalStabilizer, HorizontalStabilizerSpec};
pub use stability::LongitudinalStability;
pub use vertical_stabilizer::{Rudder, RudderSpec, VerticalStabilizer, VerticalStabilizerSpec};
pub use wing::{Aileron, AileronSpec, AirfoilData, Wing, WingSpec};

/// Derive every geometric quantity of the aircraft.
///
/// Fails fast with [`SizingError::MissingField`] on the first absent primary
/// field, and with [`SizingError::InvalidValue`] on the first formula that
/// produces a non-finite result.
///
/// # Example
///
/// ```rust
/// use planform_core::calculations::derive;
/// use planform_core::aircraft::AircraftSpec;
///
/// let spec: AircraftSpec = serde_yaml::from_str(r#"
/// mass_properties: { MTOW_kg: 1000.0, wing_loading_kg_per_m2: 100.0 }
/// components:
///   wing:
///     aspect_ratio: 8.0
///     taper_ratio: 0.5
///     aileron: { start_eta: 0.6, end_eta: 0.95, aileron_chord_percentage: 0.25 }
///   fuselage: { length_m: 7.0, width_m: 1.1 }
///   horizontal_stabilizer:
///     span_m: 3.0
///     root_chord_m: 0.8
///     taper_ratio: 0.6
///     tail_arm_m: 4.5
///     elevator: { chord_percentage: 0.35, span_percentage: 0.9 }
///   vertical_stabilizer:
///     span_m: 1.4
///     root_chord_m: 1.0
///     taper_ratio: 0.6
///     tail_arm_m: 4.3
///     rudder: { chord_percentage: 0.4, span_percentage: 0.9 }
/// "#).unwrap();
///
/// let aircraft = derive(&spec).unwrap();
/// assert!((aircraft.components.wing.area_m2 - 10.0).abs() < 1e-12);
/// ```
pub fn derive(spec: &AircraftSpec) -> SizingResult<Aircraft> {
    let mut tracker = EquationTracker::new();
    derive_tracked(spec, &mut tracker)
}

/// Same as [`derive`], recording every equation applied into `tracker`.
pub fn derive_tracked(spec: &AircraftSpec, tracker: &mut EquationTracker) -> SizingResult<Aircraft> {
    let mass = require_section("aircraft", "mass_properties", spec.mass_properties.as_ref())?;
    let components = require_section("aircraft", "components", spec.components.as_ref())?;

    let wing_spec = require_section("components", "wing", components.wing.as_ref())?;
    let wing = wing::calculate(wing_spec, mass, tracker)?;

    let fuselage_spec = require_section("components", "fuselage", components.fuselage.as_ref())?;
    let fuselage = fuselage::calculate(fuselage_spec, tracker)?;

    let h_stab_spec = require_section(
        "components",
        "horizontal_stabilizer",
        components.horizontal_stabilizer.as_ref(),
    )?;
    let horizontal_stabilizer = horizontal_stabilizer::calculate(h_stab_spec, &wing, tracker)?;

    let v_stab_spec = require_section(
        "components",
        "vertical_stabilizer",
        components.vertical_stabilizer.as_ref(),
    )?;
    let vertical_stabilizer = vertical_stabilizer::calculate(v_stab_spec, &wing, tracker)?;

    info!(
        aircraft = spec.aircraft_name.as_deref().unwrap_or("unnamed"),
        wing_area_m2 = wing.area_m2,
        wing_span_m = wing.span_m,
        horizontal_volume = horizontal_stabilizer.volume_coefficient,
        vertical_volume = vertical_stabilizer.volume_coefficient,
        "Derived properties computed"
    );

    Ok(Aircraft {
        aircraft_name: spec.aircraft_name.clone(),
        mass_properties: mass.clone(),
        components: Components {
            wing,
            fuselage,
            horizontal_stabilizer,
            vertical_stabilizer,
            extra: components.extra.clone(),
        },
        extra: spec.extra.clone(),
    })
}

// ============================================================================
// Field access helpers shared by the component calculations
// ============================================================================

/// Read a required primary value, rejecting absent and non-finite entries.
pub(crate) fn require(component: &str, field: &str, value: Option<f64>) -> SizingResult<f64> {
    let value = value.ok_or_else(|| SizingError::missing_field(component, field))?;
    if !value.is_finite() {
        return Err(SizingError::invalid_value(
            component,
            field,
            value,
            "Value must be a finite number",
        ));
    }
    Ok(value)
}

/// Read a required nested section of the document.
pub(crate) fn require_section<'a, T>(component: &str, field: &str, section: Option<&'a T>) -> SizingResult<&'a T> {
    section.ok_or_else(|| SizingError::missing_field(component, field))
}

/// Accept a formula result only if it is finite.
///
/// `formula` is reported as the reason, e.g. "span = sqrt(area * aspect_ratio)".
pub(crate) fn checked(component: &str, field: &str, value: f64, formula: &str) -> SizingResult<f64> {
    if value.is_finite() {
        Ok(value)
    } else {
        debug!(component, field, value, formula, "Non-finite derived value");
        Err(SizingError::invalid_value(
            component,
            field,
            value,
            format!("{} is not finite (division by zero or square root of a negative)", formula),
        ))
    }
}

/// Copy unrecognized keys onto a derived record, dropping any stale copies
/// of the keys the derived record writes itself.
pub(crate) fn carry_extra(extra: &Mapping, derived_keys: &[&str]) -> Mapping {
    extra
        .iter()
        .filter(|(key, _)| !key.as_str().is_some_and(|k| derived_keys.contains(&k)))
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect()
}

/// Square-tipped derived wing for exercising the tail calculations in isolation.
#[cfg(test)]
pub(crate) fn reference_wing(area_m2: f64, span_m: f64, mac_m: f64) -> Wing {
    Wing {
        aspect_ratio: span_m * span_m / area_m2,
        taper_ratio: 1.0,
        leading_edge_mac_x_m: None,
        aileron: Aileron {
            start_eta: 0.6,
            end_eta: 0.95,
            aileron_chord_percentage: 0.25,
            extra: Mapping::new(),
            start_pos: 0.0,
            end_pos: 0.0,
            chord: 0.0,
            span_m: 0.35,
            area_m2: 0.0,
            area_ratio: 0.0,
        },
        aerodynamics: None,
        extra: Mapping::new(),
        area_m2,
        span_m,
        root_chord_m: mac_m,
        tip_chord_m: mac_m,
        mac_m,
        aerodynamic_center_local_x_mac: 0.25,
    }
}
