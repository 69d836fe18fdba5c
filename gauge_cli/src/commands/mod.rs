//! CLI command implementations.

pub(crate) mod defaults;
pub(crate) mod list;
pub(crate) mod run;
pub(crate) mod schema;
