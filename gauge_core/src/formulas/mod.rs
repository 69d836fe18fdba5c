//! # Formulas
//!
//! Metadata for every formula the calculators apply, and generation of the
//! `FORMULAS.md` reference document. The formula implementations live next
//! to the calculators that use them; this module only describes them.
//!
//! - [`registry`] - Formula metadata, categories, references, markdown generation

pub mod registry;

pub use registry::{
    generate_formulas_markdown, Formula, FormulaCategory, FormulaMetadata, Reference, Variable,
    ALL_FORMULAS,
};
