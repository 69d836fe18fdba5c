//! Schema command implementation.
//!
//! Shows each field a calculator accepts (kind, bounds, options) and the
//! formulas behind its estimate.

use anyhow::Result;
use gauge_core::calculators::CalculatorKind;

use crate::display::describe_field;

pub(crate) fn show_schema(id: &str, json: bool) -> Result<()> {
    let kind = CalculatorKind::from_id(id)?;
    let info = kind.info();

    if json {
        println!("{}", serde_json::to_string_pretty(&info)?);
        return Ok(());
    }

    println!("{} ({})", info.title, info.id);
    println!("\nFields:");
    for field in info.fields {
        let required = if field.required { "" } else { " [optional]" };
        println!("  {:<24} {}{}", field.name, field.label, required);
        println!("  {:<24} {}", "", describe_field(field));
    }

    println!("\nFormulas:");
    for formula in kind.formulas() {
        let meta = formula.metadata();
        println!("  {} - {}", meta.name, meta.formula_plain);
        println!("    {}", meta.reference.citation());
    }

    Ok(())
}
