//! # gauge_core - Deterministic Calculator Engine
//!
//! `gauge_core` powers a family of single-purpose calculators (life
//! expectancy, BMI, BMR/TDEE, ideal weight, fertility, retirement savings,
//! treatment cost estimates and more). Each one is the same small pipeline:
//! validate raw form input, estimate with a pure function over typed inputs
//! and formula tables, then present rounded, labelled strings.
//!
//! ## Design Philosophy
//!
//! - **Pure**: estimators are stateless functions; same input, same bits out
//! - **Total tables**: categorical inputs are enums matched exhaustively, and
//!   banded lookups always have an `otherwise` band
//! - **No partial results**: an invalid input set yields field errors only
//! - **JSON-First**: inputs, outputs and errors all serialize
//!
//! ## Quick Start
//!
//! ```rust
//! use gauge_core::calculators::CalculatorKind;
//! use gauge_core::engine::InputSet;
//! use gauge_core::settings::Settings;
//!
//! let input = InputSet::new()
//!     .with("father_height_cm", 180.0)
//!     .with("mother_height_cm", 165.0)
//!     .with("child_sex", "female");
//!
//! let report = CalculatorKind::ChildHeight.evaluate(&input, &Settings::default()).unwrap();
//! assert_eq!(report.presented.headline, "166.0 cm");
//! ```
//!
//! ## Modules
//!
//! - [`engine`] - Calculator trait, input sets, validation, formula tables, presentation
//! - [`calculators`] - Every calculator plus the id-based catalog
//! - [`formulas`] - Formula metadata and the generated reference document
//! - [`units`] - Type-safe unit wrappers and conversions
//! - [`settings`] - Display settings loaded from TOML
//! - [`errors`] - Structured error types

#[macro_use]
mod macros;

pub mod calculators;
pub mod engine;
pub mod errors;
pub mod formulas;
pub mod settings;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculators::{CalculatorKind, Report};
pub use engine::{Calculator, InputSet, InputValue, PresentedResult};
pub use errors::{CalcError, CalcResult, FieldError, FieldErrorKind};
pub use settings::{Settings, UnitSystem};
