//! Defaults command implementation.

use anyhow::{Context, Result};
use gauge_core::calculators::CalculatorKind;

/// Print the default input as JSON, ready to edit and pass to `run --input`.
pub(crate) fn show_defaults(id: &str) -> Result<()> {
    let kind = CalculatorKind::from_id(id)?;
    let defaults = kind
        .defaults()
        .with_context(|| format!("Failed to build default input for {}", kind))?;

    println!("{}", serde_json::to_string_pretty(&defaults)?);
    Ok(())
}
