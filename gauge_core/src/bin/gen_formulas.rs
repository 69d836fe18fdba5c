//! Generate FORMULAS.md from the formula registry.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin gen-formulas
//! cargo run --bin gen-formulas -- path/to/FORMULAS.md
//! ```
//!
//! Without an argument the file is written to
//! `gauge_core/src/formulas/FORMULAS.md` (relative to the workspace root).

use std::env;
use std::fs;
use std::path::PathBuf;

use gauge_core::formulas::{generate_formulas_markdown, ALL_FORMULAS};

const DEFAULT_OUTPUT: &str = "gauge_core/src/formulas/FORMULAS.md";

fn main() {
    let output_path = env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));

    println!("Generating FORMULAS.md ({} formulas)...", ALL_FORMULAS.len());
    let markdown = generate_formulas_markdown();

    match fs::write(&output_path, &markdown) {
        Ok(()) => {
            println!("Wrote {} bytes to {}", markdown.len(), output_path.display());
        }
        Err(e) => {
            eprintln!("Error writing {}: {}", output_path.display(), e);
            std::process::exit(1);
        }
    }
}
