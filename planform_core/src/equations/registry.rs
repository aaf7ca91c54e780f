//! # Equation Registry
//!
//! Central registry of every formula the derivation engine and the stability
//! evaluator apply. Each equation has metadata including its reference,
//! formula and variable definitions.
//!
//! ## Architecture
//!
//! The registry provides:
//! - Type-safe equation identification via the `Equation` enum
//! - Full metadata for audit trails and the generated reference document
//! - Usage tracking per component during a derivation run
//!
//! ## Usage
//!
//! ```rust
//! use planform_core::equations::registry::{Equation, EquationTracker};
//!
//! let mut tracker = EquationTracker::new();
//! tracker.record_for_component(Equation::TrapezoidalMac, "Wing MAC", "wing");
//!
//! let meta = Equation::TrapezoidalMac.metadata();
//! println!("Formula: {}", meta.formula_plain);
//! assert_eq!(tracker.unique_equations(), vec![Equation::TrapezoidalMac]);
//! ```

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

// ============================================================================
// References
// ============================================================================

/// Textbook source of an equation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum Reference {
    /// Raymer, Aircraft Design: A Conceptual Approach
    Raymer { topic: &'static str },
    /// Anderson, Fundamentals of Aerodynamics
    Anderson { topic: &'static str },
    /// Nelson, Flight Stability and Automatic Control
    Nelson { topic: &'static str },
    /// Plane geometry, no specific reference needed
    Geometry,
    /// Convention of this sizing model
    ModelConvention,
}

impl Reference {
    /// Format the reference for display
    pub fn citation(&self) -> String {
        match self {
            Reference::Raymer { topic } => format!("Raymer, Aircraft Design: A Conceptual Approach ({})", topic),
            Reference::Anderson { topic } => format!("Anderson, Fundamentals of Aerodynamics ({})", topic),
            Reference::Nelson { topic } => format!("Nelson, Flight Stability and Automatic Control ({})", topic),
            Reference::Geometry => "Plane Geometry".to_string(),
            Reference::ModelConvention => "Sizing Model Convention".to_string(),
        }
    }

}

// ============================================================================
// Equation Categories
// ============================================================================

/// Categories for organizing equations in the reference document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EquationCategory {
    /// Areas, spans, chords and MACs of lifting surfaces and the fuselage
    SurfaceGeometry,
    /// Aileron, elevator and rudder sizing
    ControlSurfaces,
    /// Tail volume coefficients
    TailSizing,
    /// Longitudinal static stability
    Stability,
}

impl EquationCategory {
    /// Display name for the category
    pub fn display_name(&self) -> &'static str {
        match self {
            EquationCategory::SurfaceGeometry => "Surface Geometry",
            EquationCategory::ControlSurfaces => "Control Surfaces",
            EquationCategory::TailSizing => "Tail Sizing",
            EquationCategory::Stability => "Longitudinal Stability",
        }
    }

    /// Sort order (lower = earlier), follows the derivation order
    pub fn sort_order(&self) -> u8 {
        match self {
            EquationCategory::SurfaceGeometry => 1,
            EquationCategory::ControlSurfaces => 2,
            EquationCategory::TailSizing => 3,
            EquationCategory::Stability => 4,
        }
    }
}

// ============================================================================
// Variable Definition
// ============================================================================

/// Definition of a variable used in an equation.
#[derive(Debug, Clone)]
pub struct Variable {
    /// Symbol (e.g., "S", "b", "λ")
    pub symbol: &'static str,
    /// Description
    pub description: &'static str,
    /// Units (e.g., "m", "m^2", "-")
    pub units: &'static str,
}

impl Variable {
    pub const fn new(symbol: &'static str, description: &'static str, units: &'static str) -> Self {
        Self { symbol, description, units }
    }
}

// ============================================================================
// Equation Metadata
// ============================================================================

/// Complete metadata for a sizing equation.
#[derive(Debug, Clone)]
pub struct EquationMetadata {
    /// Human-readable name
    pub name: &'static str,
    /// Brief description of what this equation calculates
    pub description: &'static str,
    /// The formula in plain text
    pub formula_plain: &'static str,
    /// Textbook reference
    pub reference: Reference,
    /// Variable definitions
    pub variables: Vec<Variable>,
    /// Assumptions or limitations
    pub assumptions: Vec<&'static str>,
    /// Category for grouping
    pub category: EquationCategory,
    /// Source module where the equation implementation lives
    pub source_module: &'static str,
    /// Function name implementing the equation
    pub source_function: &'static str,
}

// ============================================================================
// Equation Enum
// ============================================================================

/// All equations used by Planform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[non_exhaustive]
pub enum Equation {
    // -------------------------------------------------------------------------
    // Surface geometry
    // -------------------------------------------------------------------------
    /// S = W / (W/S)
    WingAreaFromLoading,
    /// b = sqrt(S AR)
    SpanFromAspectRatio,
    /// c_r = S / b
    RootChordFromArea,
    /// c_t = λ c_r
    TipChordFromTaper,
    /// c̄ = (2/3) c_r (1 + λ + λ²)/(1 + λ)
    TrapezoidalMac,
    /// S = b c_r
    RectangularSurfaceArea,
    /// c̄ = c_r
    RectangularMac,
    /// x_ac = 0.25 c̄
    QuarterChordAerodynamicCenter,
    /// f = l / d
    FinenessRatio,

    // -------------------------------------------------------------------------
    // Control surfaces
    // -------------------------------------------------------------------------
    /// y = (b/2) η
    HalfSpanStation,
    /// Δη = η_end − η_start
    AileronSpanExtent,
    /// c = c_ref p
    ChordFraction,
    /// b = b_ref p
    SpanFraction,
    /// S_a = 2 Δη c_a
    AileronPairArea,
    /// S_a / S_w
    ControlSurfaceAreaRatio,

    // -------------------------------------------------------------------------
    // Tail sizing
    // -------------------------------------------------------------------------
    /// V_H = S_H l_H / (S_w c̄_w)
    HorizontalTailVolume,
    /// V_V = S_V l_V / (S_w b_w)
    VerticalTailVolume,

    // -------------------------------------------------------------------------
    // Longitudinal stability
    // -------------------------------------------------------------------------
    /// C_Lα = a₀ / (1 + a₀/(π AR))
    FiniteWingLiftSlope,
    /// x = x_LE + f c̄
    MacStation,
    /// C_mα = C_Lα (x_cg − x_ac)/c̄
    PitchingMomentSlope,
    /// C_m0 = c_m0 + c_l0 (x_cg − x_ac)/c̄
    ZeroLiftPitchingMoment,
}

impl Equation {
    /// Get the full metadata for this equation
    pub fn metadata(&self) -> EquationMetadata {
        match self {
            Equation::WingAreaFromLoading => EquationMetadata {
                name: "Wing Area from Wing Loading",
                description: "Reference area sized so the maximum take-off mass meets the wing loading",
                formula_plain: "S = MTOW / (W/S)",
                reference: Reference::Raymer { topic: "Wing Loading" },
                variables: vec![
                    Variable::new("S", "Wing reference area", "m^2"),
                    Variable::new("MTOW", "Maximum take-off mass", "kg"),
                    Variable::new("W/S", "Wing loading", "kg/m^2"),
                ],
                assumptions: vec!["Wing loading expressed in mass units"],
                category: EquationCategory::SurfaceGeometry,
                source_module: "equations/planform.rs",
                source_function: "area_from_wing_loading",
            },

            Equation::SpanFromAspectRatio => EquationMetadata {
                name: "Span from Aspect Ratio",
                description: "Wing span from reference area and aspect ratio",
                formula_plain: "b = sqrt(S * AR)",
                reference: Reference::Raymer { topic: "Wing Geometry" },
                variables: vec![
                    Variable::new("b", "Wing span", "m"),
                    Variable::new("S", "Wing reference area", "m^2"),
                    Variable::new("AR", "Aspect ratio", "-"),
                ],
                assumptions: vec!["Aspect ratio defined as b^2 / S"],
                category: EquationCategory::SurfaceGeometry,
                source_module: "equations/planform.rs",
                source_function: "span_from_aspect_ratio",
            },

            Equation::RootChordFromArea => EquationMetadata {
                name: "Root Chord from Area",
                description: "Wing root chord taken as the mean geometric chord",
                formula_plain: "c_r = S / b",
                reference: Reference::ModelConvention,
                variables: vec![
                    Variable::new("c_r", "Root chord", "m"),
                    Variable::new("S", "Wing reference area", "m^2"),
                    Variable::new("b", "Wing span", "m"),
                ],
                assumptions: vec!["Root chord equals the mean geometric chord of the planform"],
                category: EquationCategory::SurfaceGeometry,
                source_module: "equations/planform.rs",
                source_function: "chord_from_area",
            },

            Equation::TipChordFromTaper => EquationMetadata {
                name: "Tip Chord from Taper Ratio",
                description: "Tip chord of a linearly tapered surface",
                formula_plain: "c_t = lambda * c_r",
                reference: Reference::Raymer { topic: "Wing Geometry" },
                variables: vec![
                    Variable::new("c_t", "Tip chord", "m"),
                    Variable::new("lambda", "Taper ratio", "-"),
                    Variable::new("c_r", "Root chord", "m"),
                ],
                assumptions: vec!["Linear chord distribution"],
                category: EquationCategory::SurfaceGeometry,
                source_module: "equations/planform.rs",
                source_function: "tip_chord",
            },

            Equation::TrapezoidalMac => EquationMetadata {
                name: "Mean Aerodynamic Chord (Trapezoid)",
                description: "Chord of the equivalent untapered surface for a linearly tapered trapezoid",
                formula_plain: "MAC = (2/3) * c_r * (1 + lambda + lambda^2) / (1 + lambda)",
                reference: Reference::Raymer { topic: "Wing Geometry" },
                variables: vec![
                    Variable::new("MAC", "Mean aerodynamic chord", "m"),
                    Variable::new("c_r", "Root chord", "m"),
                    Variable::new("lambda", "Taper ratio", "-"),
                ],
                assumptions: vec!["Straight leading and trailing edges", "0 < lambda <= 1"],
                category: EquationCategory::SurfaceGeometry,
                source_module: "equations/planform.rs",
                source_function: "trapezoidal_mac",
            },

            Equation::RectangularSurfaceArea => EquationMetadata {
                name: "Tail Surface Area",
                description: "Tail planform area from span and root chord",
                formula_plain: "S = b * c_r",
                reference: Reference::Geometry,
                variables: vec![
                    Variable::new("S", "Surface area", "m^2"),
                    Variable::new("b", "Surface span", "m"),
                    Variable::new("c_r", "Root chord", "m"),
                ],
                assumptions: vec!["Rectangular planform approximation, taper not applied to area"],
                category: EquationCategory::SurfaceGeometry,
                source_module: "equations/planform.rs",
                source_function: "rectangular_area",
            },

            Equation::RectangularMac => EquationMetadata {
                name: "Mean Aerodynamic Chord (Rectangular)",
                description: "Vertical stabilizer MAC taken as its root chord",
                formula_plain: "MAC = c_r",
                reference: Reference::ModelConvention,
                variables: vec![
                    Variable::new("MAC", "Mean aerodynamic chord", "m"),
                    Variable::new("c_r", "Root chord", "m"),
                ],
                assumptions: vec!["Rectangular planform approximation"],
                category: EquationCategory::SurfaceGeometry,
                source_module: "calculations/vertical_stabilizer.rs",
                source_function: "calculate",
            },

            Equation::QuarterChordAerodynamicCenter => EquationMetadata {
                name: "Quarter-Chord Aerodynamic Center",
                description: "Local aerodynamic center as a fraction of the MAC",
                formula_plain: "x_ac / MAC = 0.25",
                reference: Reference::Anderson { topic: "Airfoil Aerodynamic Center" },
                variables: vec![Variable::new("x_ac", "Aerodynamic center aft of the MAC leading edge", "m")],
                assumptions: vec!["Thin-airfoil theory, subsonic flow"],
                category: EquationCategory::SurfaceGeometry,
                source_module: "equations/stability.rs",
                source_function: "QUARTER_CHORD",
            },

            Equation::FinenessRatio => EquationMetadata {
                name: "Fuselage Fineness Ratio",
                description: "Slenderness of the fuselage",
                formula_plain: "f = l / d",
                reference: Reference::Raymer { topic: "Fuselage Geometry" },
                variables: vec![
                    Variable::new("f", "Fineness ratio", "-"),
                    Variable::new("l", "Fuselage length", "m"),
                    Variable::new("d", "Fuselage width", "m"),
                ],
                assumptions: vec!["Width used as the equivalent diameter"],
                category: EquationCategory::SurfaceGeometry,
                source_module: "equations/planform.rs",
                source_function: "fineness_ratio",
            },

            Equation::HalfSpanStation => EquationMetadata {
                name: "Half-Span Station",
                description: "Absolute spanwise position of a fractional half-span station",
                formula_plain: "y = (b/2) * eta",
                reference: Reference::Geometry,
                variables: vec![
                    Variable::new("y", "Spanwise position from the root", "m"),
                    Variable::new("b", "Wing span", "m"),
                    Variable::new("eta", "Half-span fraction", "-"),
                ],
                assumptions: vec![],
                category: EquationCategory::ControlSurfaces,
                source_module: "equations/planform.rs",
                source_function: "half_span_station",
            },

            Equation::AileronSpanExtent => EquationMetadata {
                name: "Aileron Span Extent",
                description: "Aileron extent as a difference of half-span fractions",
                formula_plain: "span_a = eta_end - eta_start",
                reference: Reference::ModelConvention,
                variables: vec![
                    Variable::new("eta_start", "Inboard half-span fraction", "-"),
                    Variable::new("eta_end", "Outboard half-span fraction", "-"),
                ],
                assumptions: vec!["Dimensionless: not multiplied by the half-span"],
                category: EquationCategory::ControlSurfaces,
                source_module: "equations/planform.rs",
                source_function: "eta_extent",
            },

            Equation::ChordFraction => EquationMetadata {
                name: "Control Surface Chord",
                description: "Control surface chord as a fraction of the parent reference chord",
                formula_plain: "c = c_ref * p_c",
                reference: Reference::Raymer { topic: "Control Surface Sizing" },
                variables: vec![
                    Variable::new("c", "Control surface chord", "m"),
                    Variable::new("c_ref", "Parent reference chord", "m"),
                    Variable::new("p_c", "Chord fraction", "-"),
                ],
                assumptions: vec!["Fractions are given as 0..1, not percent"],
                category: EquationCategory::ControlSurfaces,
                source_module: "equations/planform.rs",
                source_function: "fraction_of",
            },

            Equation::SpanFraction => EquationMetadata {
                name: "Control Surface Span",
                description: "Control surface span as a fraction of the parent span",
                formula_plain: "b = b_ref * p_b",
                reference: Reference::Raymer { topic: "Control Surface Sizing" },
                variables: vec![
                    Variable::new("b", "Control surface span", "m"),
                    Variable::new("b_ref", "Parent span", "m"),
                    Variable::new("p_b", "Span fraction", "-"),
                ],
                assumptions: vec!["Fractions are given as 0..1, not percent"],
                category: EquationCategory::ControlSurfaces,
                source_module: "equations/planform.rs",
                source_function: "fraction_of",
            },

            Equation::AileronPairArea => EquationMetadata {
                name: "Aileron Pair Area",
                description: "Total area of both ailerons",
                formula_plain: "S_a = 2 * span_a * c_a",
                reference: Reference::ModelConvention,
                variables: vec![
                    Variable::new("S_a", "Aileron pair area", "m^2"),
                    Variable::new("span_a", "Aileron span extent", "-"),
                    Variable::new("c_a", "Aileron chord", "m"),
                ],
                assumptions: vec!["Symmetric pair", "Uses the dimensionless span extent"],
                category: EquationCategory::ControlSurfaces,
                source_module: "equations/planform.rs",
                source_function: "aileron_pair_area",
            },

            Equation::ControlSurfaceAreaRatio => EquationMetadata {
                name: "Control Surface Area Ratio",
                description: "Control surface area relative to the wing reference area",
                formula_plain: "S_a / S_w",
                reference: Reference::Raymer { topic: "Control Surface Sizing" },
                variables: vec![
                    Variable::new("S_a", "Aileron pair area", "m^2"),
                    Variable::new("S_w", "Wing reference area", "m^2"),
                ],
                assumptions: vec![],
                category: EquationCategory::ControlSurfaces,
                source_module: "equations/planform.rs",
                source_function: "area_ratio",
            },

            Equation::HorizontalTailVolume => EquationMetadata {
                name: "Horizontal Tail Volume Coefficient",
                description: "Horizontal tail sizing parameter referenced to the wing MAC",
                formula_plain: "V_H = (S_H * l_H) / (S_w * MAC_w)",
                reference: Reference::Raymer { topic: "Tail Volume Coefficient" },
                variables: vec![
                    Variable::new("V_H", "Horizontal tail volume coefficient", "-"),
                    Variable::new("S_H", "Horizontal tail area", "m^2"),
                    Variable::new("l_H", "Horizontal tail arm", "m"),
                    Variable::new("S_w", "Wing reference area", "m^2"),
                    Variable::new("MAC_w", "Wing mean aerodynamic chord", "m"),
                ],
                assumptions: vec!["Tail arm measured between quarter-chord points"],
                category: EquationCategory::TailSizing,
                source_module: "equations/planform.rs",
                source_function: "horizontal_tail_volume",
            },

            Equation::VerticalTailVolume => EquationMetadata {
                name: "Vertical Tail Volume Coefficient",
                description: "Vertical tail sizing parameter referenced to the wing span",
                formula_plain: "V_V = (S_V * l_V) / (S_w * b_w)",
                reference: Reference::Raymer { topic: "Tail Volume Coefficient" },
                variables: vec![
                    Variable::new("V_V", "Vertical tail volume coefficient", "-"),
                    Variable::new("S_V", "Vertical tail area", "m^2"),
                    Variable::new("l_V", "Vertical tail arm", "m"),
                    Variable::new("S_w", "Wing reference area", "m^2"),
                    Variable::new("b_w", "Wing span", "m"),
                ],
                assumptions: vec!["Denominator uses the wing span, not the wing MAC"],
                category: EquationCategory::TailSizing,
                source_module: "equations/planform.rs",
                source_function: "vertical_tail_volume",
            },

            Equation::FiniteWingLiftSlope => EquationMetadata {
                name: "Finite Wing Lift-Curve Slope",
                description: "Three-dimensional lift-curve slope corrected for aspect ratio",
                formula_plain: "C_L_alpha = a0 / (1 + a0 / (pi * AR))",
                reference: Reference::Anderson { topic: "Finite Wings" },
                variables: vec![
                    Variable::new("C_L_alpha", "Wing lift-curve slope", "1/rad"),
                    Variable::new("a0", "Section lift-curve slope", "1/rad"),
                    Variable::new("AR", "Aspect ratio", "-"),
                ],
                assumptions: vec!["Elliptic lift distribution (span efficiency 1)", "Incompressible flow"],
                category: EquationCategory::Stability,
                source_module: "equations/stability.rs",
                source_function: "finite_wing_lift_slope",
            },

            Equation::MacStation => EquationMetadata {
                name: "MAC Station",
                description: "Absolute x position of a point given as a fraction of the MAC",
                formula_plain: "x = x_LE + f * MAC",
                reference: Reference::Nelson { topic: "Static Stability" },
                variables: vec![
                    Variable::new("x", "Absolute station", "m"),
                    Variable::new("x_LE", "MAC leading-edge position", "m"),
                    Variable::new("f", "Fraction of the MAC", "-"),
                ],
                assumptions: vec!["x measured aft from the aircraft datum"],
                category: EquationCategory::Stability,
                source_module: "equations/stability.rs",
                source_function: "mac_station",
            },

            Equation::PitchingMomentSlope => EquationMetadata {
                name: "Wing Pitching-Moment Slope",
                description: "Wing contribution to the pitching-moment slope about the cg",
                formula_plain: "C_m_alpha = C_L_alpha * (x_cg - x_ac) / MAC",
                reference: Reference::Nelson { topic: "Static Stability" },
                variables: vec![
                    Variable::new("C_m_alpha", "Pitching-moment slope", "1/rad"),
                    Variable::new("x_cg", "Center-of-gravity position", "m"),
                    Variable::new("x_ac", "Wing aerodynamic-center position", "m"),
                ],
                assumptions: vec!["Wing contribution only", "Small angles"],
                category: EquationCategory::Stability,
                source_module: "equations/stability.rs",
                source_function: "pitching_moment_slope",
            },

            Equation::ZeroLiftPitchingMoment => EquationMetadata {
                name: "Wing Zero-Lift Pitching Moment",
                description: "Wing pitching moment about the cg at zero angle of attack",
                formula_plain: "C_m0 = c_m_0 + c_l_0 * (x_cg - x_ac) / MAC",
                reference: Reference::Nelson { topic: "Static Stability" },
                variables: vec![
                    Variable::new("C_m0", "Zero-lift pitching moment about the cg", "-"),
                    Variable::new("c_m_0", "Section pitching moment about the aerodynamic center", "-"),
                    Variable::new("c_l_0", "Section lift coefficient at zero angle of attack", "-"),
                ],
                assumptions: vec!["Wing contribution only"],
                category: EquationCategory::Stability,
                source_module: "equations/stability.rs",
                source_function: "zero_lift_pitching_moment",
            },
        }
    }

    /// All categories that contain at least one equation, in sort order
    pub fn all_categories() -> Vec<EquationCategory> {
        let mut categories: Vec<EquationCategory> = ALL_EQUATIONS
            .iter()
            .map(|eq| eq.metadata().category)
            .collect::<HashSet<_>>()
            .into_iter()
            .collect();
        categories.sort_by_key(|c| c.sort_order());
        categories
    }

    /// All equations in a category, in registry order
    pub fn in_category(category: EquationCategory) -> Vec<Equation> {
        ALL_EQUATIONS
            .iter()
            .copied()
            .filter(|eq| eq.metadata().category == category)
            .collect()
    }
}

/// All equations in the registry (for iteration)
pub static ALL_EQUATIONS: &[Equation] = &[
    // Surface geometry
    Equation::WingAreaFromLoading,
    Equation::SpanFromAspectRatio,
    Equation::RootChordFromArea,
    Equation::TipChordFromTaper,
    Equation::TrapezoidalMac,
    Equation::RectangularSurfaceArea,
    Equation::RectangularMac,
    Equation::QuarterChordAerodynamicCenter,
    Equation::FinenessRatio,
    // Control surfaces
    Equation::HalfSpanStation,
    Equation::AileronSpanExtent,
    Equation::ChordFraction,
    Equation::SpanFraction,
    Equation::AileronPairArea,
    Equation::ControlSurfaceAreaRatio,
    // Tail sizing
    Equation::HorizontalTailVolume,
    Equation::VerticalTailVolume,
    // Stability
    Equation::FiniteWingLiftSlope,
    Equation::MacStation,
    Equation::PitchingMomentSlope,
    Equation::ZeroLiftPitchingMoment,
];

// ============================================================================
// Equation Usage Tracking
// ============================================================================

/// Record of an equation being applied during a derivation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EquationUsage {
    /// The equation that was used
    pub equation: Equation,
    /// What was computed (e.g., "Wing span")
    pub context: String,
    /// Document component the equation was applied to (e.g., "wing.aileron")
    pub component: String,
}

impl EquationUsage {
    /// Create usage record for a document component
    pub fn for_component(equation: Equation, context: impl Into<String>, component: impl Into<String>) -> Self {
        Self {
            equation,
            context: context.into(),
            component: component.into(),
        }
    }
}

/// Collector for equation usage during a derivation run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EquationTracker {
    usages: Vec<EquationUsage>,
}

impl EquationTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record equation usage for a specific component
    pub fn record_for_component(&mut self, equation: Equation, context: impl Into<String>, component: impl Into<String>) {
        self.usages.push(EquationUsage::for_component(equation, context, component));
    }

    /// Get all recorded usages
    pub fn usages(&self) -> &[EquationUsage] {
        &self.usages
    }

    /// Get unique equations used (deduplicated, first-use order)
    pub fn unique_equations(&self) -> Vec<Equation> {
        let mut seen = HashSet::new();
        self.usages
            .iter()
            .filter(|u| seen.insert(u.equation))
            .map(|u| u.equation)
            .collect()
    }

    /// Group usages by equation
    pub fn by_equation(&self) -> HashMap<Equation, Vec<&EquationUsage>> {
        let mut map: HashMap<Equation, Vec<&EquationUsage>> = HashMap::new();
        for usage in &self.usages {
            map.entry(usage.equation).or_default().push(usage);
        }
        map
    }

    /// Group unique equations by category
    pub fn by_category(&self) -> Vec<(EquationCategory, Vec<Equation>)> {
        let mut by_cat: HashMap<EquationCategory, Vec<Equation>> = HashMap::new();
        for eq in self.unique_equations() {
            by_cat.entry(eq.metadata().category).or_default().push(eq);
        }

        let mut result: Vec<_> = by_cat.into_iter().collect();
        result.sort_by_key(|(cat, _)| cat.sort_order());
        result
    }

    /// Render the equations applied in this run as a markdown appendix.
    ///
    /// Each equation is listed once with its formula, reference and the
    /// components it was applied to.
    pub fn generate_usage_markdown(&self) -> String {
        let mut output = String::from("# Equations Applied\n\n");

        let by_category = self.by_category();
        if by_category.is_empty() {
            output.push_str("_No equations recorded for this run._\n");
            return output;
        }

        let usage_by_eq = self.by_equation();

        for (category, equations) in by_category {
            output.push_str(&format!("## {}\n\n", category.display_name()));

            for equation in equations {
                let meta = equation.metadata();
                output.push_str(&format!("### {}\n\n", meta.name));
                output.push_str(&format!("`{}`\n\n", meta.formula_plain));
                output.push_str(&format!("*Reference:* {}\n\n", meta.reference.citation()));

                if let Some(usages) = usage_by_eq.get(&equation) {
                    let mut seen = HashSet::new();
                    let components: Vec<&str> = usages
                        .iter()
                        .map(|u| u.component.as_str())
                        .filter(|c| seen.insert(*c))
                        .collect();
                    if !components.is_empty() {
                        output.push_str(&format!("*Applied to:* {}\n\n", components.join(", ")));
                    }
                }
            }
        }

        output
    }
}

// ============================================================================
// Markdown Reference Generation
// ============================================================================

/// Generate the complete equations reference as markdown.
///
/// # Example
///
/// ```rust
/// use planform_core::equations::registry::generate_equations_markdown;
///
/// let markdown = generate_equations_markdown();
/// assert!(markdown.contains("Planform Equations Reference"));
/// assert!(markdown.contains("Tail Sizing"));
/// ```
pub fn generate_equations_markdown() -> String {
    let mut output = String::with_capacity(16_000);

    output.push_str(r#"# Planform Equations Reference

> **Auto-generated from source code. Do not edit manually.**
>
> Regenerate with: `cargo run --bin gen-equations`

This document lists all formulas used by the Planform derivation engine and
stability evaluator. Each equation includes its formula, reference, source
location and assumptions.

## Conventions

| Quantity | Convention |
|----------|------------|
| Lengths | Meters |
| Masses | Kilograms |
| Fractions and "percentage" inputs | 0..1, applied directly |
| x positions | Positive aft of the datum |
| C_m_alpha | Negative is statically stable |

---

"#);

    let categories = Equation::all_categories();

    for category in &categories {
        let equations = Equation::in_category(*category);
        if equations.is_empty() {
            continue;
        }

        output.push_str(&format!("## {}\n\n", category.display_name()));

        for equation in equations {
            let meta = equation.metadata();

            output.push_str(&format!("### {}\n\n", meta.name));
            output.push_str(&format!("{}\n\n", meta.description));
            output.push_str(&format!("**Formula:** `{}`\n\n", meta.formula_plain));

            if !meta.variables.is_empty() {
                output.push_str("**Variables:**\n\n");
                output.push_str("| Symbol | Description | Units |\n");
                output.push_str("|--------|-------------|-------|\n");
                for var in &meta.variables {
                    output.push_str(&format!("| {} | {} | {} |\n", var.symbol, var.description, var.units));
                }
                output.push('\n');
            }

            output.push_str(&format!("**Reference:** {}\n\n", meta.reference.citation()));
            output.push_str(&format!(
                "**Source:** [`{}`]({})\n\n",
                meta.source_function, meta.source_module
            ));

            if !meta.assumptions.is_empty() {
                output.push_str("**Assumptions:**\n");
                for assumption in &meta.assumptions {
                    output.push_str(&format!("- {}\n", assumption));
                }
                output.push('\n');
            }

            output.push_str("---\n\n");
        }
    }

    output.push_str(&format!(
        "## Statistics\n\n- **Total Equations:** {}\n- **Categories:** {}\n",
        ALL_EQUATIONS.len(),
        categories.len()
    ));

    output
}

// ============================================================================
// Tests
// ============================================================================
