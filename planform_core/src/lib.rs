//! # planform_core - Fixed-Wing Planform Sizing Engine
//!
//! `planform_core` turns a handful of primary design parameters (take-off
//! mass, wing loading, aspect and taper ratios, tail dimensions) into the full
//! planform geometry of a conventional fixed-wing aircraft, and evaluates the
//! wing contribution to longitudinal static stability.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: Pure functions from a document to a derived document
//! - **Document-First**: All types round-trip through YAML and JSON
//! - **Rich Errors**: Missing and invalid entries name their component and field
//! - **Traceable**: Every formula applied can be recorded and documented
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use planform_core::file_io::{load_document, save_document};
//! use std::path::Path;
//!
//! let document = load_document(Path::new("Aircraft.yaml"))?;
//! let aircraft = document.spec().derive()?;
//! let stability = aircraft.evaluate_stability()?;
//! println!("C_m_alpha = {:.4} /rad", stability.cm_alpha_per_rad);
//! save_document(&document.populated(&aircraft)?, Path::new("Aircraft.yaml"))?;
//! # Ok::<(), planform_core::SizingError>(())
//! ```
//!
//! ## Modules
//!
//! - [`aircraft`] - The aircraft document, primary and derived
//! - [`calculations`] - Derivation engine and stability evaluator
//! - [`equations`] - Formulas, equation registry and usage tracking
//! - [`errors`] - Structured error types
//! - [`file_io`] - YAML/JSON loading and atomic saves

pub mod aircraft;
pub mod calculations;
pub mod equations;
pub mod errors;
pub mod file_io;

// Re-export commonly used types at crate root for convenience
pub use aircraft::{Aircraft, AircraftSpec, MassProperties};
pub use calculations::{derive, derive_tracked, LongitudinalStability};
pub use errors::{SizingError, SizingResult};
pub use file_io::{load_document, save_document, AircraftDocument};
