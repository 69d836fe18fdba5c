//! Terminal output for presented results and validation errors.

use gauge_core::engine::{FieldKind, FieldSpec, PresentedResult};
use gauge_core::errors::FieldError;

/// Print a presented result as a labelled panel.
pub(crate) fn print_report(presented: &PresentedResult) {
    println!("{}", presented.title);
    println!("  {}", presented.headline);

    if !presented.lines.is_empty() {
        println!();
        let width = presented.lines.iter().map(|line| line.label.len()).max().unwrap_or(0);
        for line in &presented.lines {
            println!("  {:<width$}  {}", line.label, line.value, width = width);
        }
    }

    if !presented.labels.is_empty() {
        println!();
        for (key, text) in &presented.labels {
            println!("  {}: {}", key, text);
        }
    }

    if let Some(comparison) = &presented.comparison {
        println!("\n  Change vs. baseline: {}", comparison.describe(1));
    }

    for note in &presented.notes {
        println!("\nNote: {}", note);
    }

    if !presented.formulas.is_empty() {
        println!("\nFormulas: {}", presented.formulas.join(", "));
    }
}

/// One line per failing field, to stderr.
pub(crate) fn print_field_errors(errors: &[FieldError]) {
    eprintln!("Invalid input:");
    for error in errors {
        eprintln!("  {:<24} {} ({})", error.field, error.message, error.kind);
    }
}

/// Short description of a field's kind and constraints.
pub(crate) fn describe_field(field: &FieldSpec) -> String {
    let unit = field.unit.map(|u| format!(" {}", u)).unwrap_or_default();
    match field.kind {
        FieldKind::Number { min, max } => format!("number {}..={}{}", min, max, unit),
        FieldKind::Integer { min, max } => format!("integer {}..={}{}", min, max, unit),
        FieldKind::Choice { options } => format!("one of: {}", options.join(", ")),
        FieldKind::ChoiceList { options, min_items } => {
            format!("at least {} of: {}", min_items, options.join(", "))
        }
        FieldKind::Flag => "true/false".to_string(),
        FieldKind::Date => "date (YYYY-MM-DD)".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_number_with_unit() {
        let field = FieldSpec::number("height_cm", "Height", 50.0, 250.0).with_unit("cm");
        assert_eq!(describe_field(&field), "number 50..=250 cm");
    }

    #[test]
    fn test_describe_choices() {
        let field = FieldSpec::choice("sex", "Sex", &["male", "female"]);
        assert_eq!(describe_field(&field), "one of: male, female");

        let list = FieldSpec::choice_list("conditions", "Conditions", &["none", "diabetes"], 1);
        assert_eq!(describe_field(&list), "at least 1 of: none, diabetes");
    }

    #[test]
    fn test_describe_flag_and_date() {
        assert_eq!(describe_field(&FieldSpec::flag("smoker", "Smoker")), "true/false");
        assert_eq!(describe_field(&FieldSpec::date("lmp", "Last period")), "date (YYYY-MM-DD)");
    }
}
