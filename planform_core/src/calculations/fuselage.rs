//! # Fuselage
//!
//! The fuselage contributes a single derived quantity, its fineness ratio.

use serde::{Deserialize, Serialize};
use serde_yaml::Mapping;
use tracing::debug;

use super::{carry_extra, checked, require};
use crate::equations::planform::fineness_ratio;
use crate::equations::registry::{Equation, EquationTracker};
use crate::errors::SizingResult;

const COMPONENT: &str = "fuselage";

/// Primary fuselage parameters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FuselageSpec {
    /// Overall length (m)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length_m: Option<f64>,

    /// Maximum width (m)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width_m: Option<f64>,

    #[serde(flatten)]
    pub extra: Mapping,
}

/// Derived fuselage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fuselage {
    pub length_m: f64,
    pub width_m: f64,

    #[serde(flatten)]
    pub extra: Mapping,

    /// length / width
    pub fineness_ratio: f64,
}

/// Derive the fuselage fineness ratio.
pub fn calculate(spec: &FuselageSpec, tracker: &mut EquationTracker) -> SizingResult<Fuselage> {
    let length_m = require(COMPONENT, "length_m", spec.length_m)?;
    let width_m = require(COMPONENT, "width_m", spec.width_m)?;

    let fineness_ratio = checked(
        COMPONENT,
        "fineness_ratio",
        fineness_ratio(length_m, width_m),
        "fineness_ratio = length / width",
    )?;
    tracker.record_for_component(Equation::FinenessRatio, "Fuselage fineness ratio", COMPONENT);

    debug!(component = COMPONENT, fineness_ratio, "Fuselage derived");

    Ok(Fuselage {
        length_m,
        width_m,
        extra: carry_extra(&spec.extra, &["fineness_ratio"]),
        fineness_ratio,
    })
}
