//! List command implementation.

use anyhow::Result;
use gauge_core::calculators::{CalculatorInfo, CalculatorKind};

/// List every calculator in the catalog.
pub(crate) fn list_calculators(json: bool) -> Result<()> {
    let catalog: Vec<CalculatorInfo> = CalculatorKind::ALL.iter().map(|kind| kind.info()).collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&catalog)?);
        return Ok(());
    }

    println!("{:<22} {:<42} {:>6}", "ID", "TITLE", "FIELDS");
    println!("{}", "-".repeat(72));

    for info in &catalog {
        println!("{:<22} {:<42} {:>6}", info.id, info.title, info.fields.len());
    }

    println!("\nTotal: {} calculators", catalog.len());
    Ok(())
}
