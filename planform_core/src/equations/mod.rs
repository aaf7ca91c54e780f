//! # Sizing Equations
//!
//! Every closed-form relation used by the derivation engine and the stability
//! evaluator lives here. Having equations in one place enables:
//! - Easy verification against textbook references
//! - Documentation of assumptions and conventions
//! - Consistent implementation across components
//!
//! ## Modules
//!
//! - [`planform`] - Surface geometry, control surfaces, tail volume coefficients
//! - [`stability`] - Finite-wing lift slope and wing pitching-moment terms
//! - [`registry`] - Equation metadata and usage tracking
//!
//! ## Conventions
//!
//! - **Units**: SI (m, m², kg); no unit conversion is performed
//! - **Fractions**: "percentage" inputs are fractions in 0..1
//! - **Positions**: x grows aft of the aircraft datum

pub mod planform;
pub mod registry;
pub mod stability;

// Re-export commonly used items
pub use planform::{
    aileron_pair_area,
    area_from_wing_loading,
    area_ratio,
    chord_from_area,
    eta_extent,
    fineness_ratio,
    fraction_of,
    half_span_station,
    horizontal_tail_volume,
    rectangular_area,
    span_from_aspect_ratio,
    tip_chord,
    trapezoidal_mac,
    vertical_tail_volume,
};

pub use stability::{
    finite_wing_lift_slope,
    mac_station,
    pitching_moment_slope,
    zero_lift_pitching_moment,
    QUARTER_CHORD,
};

pub use registry::{
    Equation,
    EquationCategory,
    EquationMetadata,
    EquationTracker,
    EquationUsage,
    Reference,
    Variable,
    ALL_EQUATIONS,
    generate_equations_markdown,
};
