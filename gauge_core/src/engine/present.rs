//! Display formatting.
//!
//! The presenter turns an estimate into strings. It rounds for display and
//! attaches labels; it never changes the underlying numbers.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::settings::Settings;
use crate::units::{cm_to_inch, inch_to_ft_in, kg_to_lb, ml_to_fl_oz};

/// One labelled line of a result panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresentedLine {
    pub key: String,
    pub label: String,
    pub value: String,
}

/// Difference between an estimate and its baseline.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    pub baseline: f64,
    pub value: f64,
    pub absolute: f64,
    /// `None` when the baseline is zero
    pub percent: Option<f64>,
}

impl Comparison {
    pub fn between(baseline: f64, value: f64) -> Self {
        let absolute = value - baseline;
        let percent = if baseline != 0.0 {
            Some(absolute / baseline * 100.0)
        } else {
            None
        };
        Comparison {
            baseline,
            value,
            absolute,
            percent,
        }
    }

    /// e.g. `+4.1 (+5.4%)`
    pub fn describe(&self, decimals: usize) -> String {
        match self.percent {
            Some(pct) => format!("{} ({}%)", signed(self.absolute, decimals), signed(pct, 1)),
            None => signed(self.absolute, decimals),
        }
    }
}

/// Display-ready result for one render pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PresentedResult {
    pub calculator: String,
    pub title: String,
    /// The main figure, e.g. `80.2 years`
    pub headline: String,
    pub lines: Vec<PresentedLine>,
    /// Qualitative labels keyed by name, e.g. `category -> Normal`
    pub labels: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comparison: Option<Comparison>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub notes: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty", default)]
    pub formulas: Vec<String>,
}

impl PresentedResult {
    pub fn new(calculator: impl Into<String>, title: impl Into<String>, headline: impl Into<String>) -> Self {
        PresentedResult {
            calculator: calculator.into(),
            title: title.into(),
            headline: headline.into(),
            lines: Vec::new(),
            labels: BTreeMap::new(),
            comparison: None,
            notes: Vec::new(),
            formulas: Vec::new(),
        }
    }

    pub fn line(mut self, key: impl Into<String>, label: impl Into<String>, value: impl Into<String>) -> Self {
        self.lines.push(PresentedLine {
            key: key.into(),
            label: label.into(),
            value: value.into(),
        });
        self
    }

    pub fn label(mut self, key: impl Into<String>, text: impl Into<String>) -> Self {
        self.labels.insert(key.into(), text.into());
        self
    }

    pub fn compare(mut self, comparison: Comparison) -> Self {
        self.comparison = Some(comparison);
        self
    }

    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// Look up a line's value by key
    pub fn value_of(&self, key: &str) -> Option<&str> {
        self.lines.iter().find(|l| l.key == key).map(|l| l.value.as_str())
    }
}

// ============================================================================
// Number formatting
// ============================================================================

/// Fixed decimals, without a stray minus on values that round to zero.
pub fn fixed(value: f64, decimals: usize) -> String {
    let s = format!("{:.*}", decimals, value);
    strip_negative_zero(s)
}

/// Fixed decimals with an explicit sign, e.g. `+1.6`, `-10.0`, `0.0`.
pub fn signed(value: f64, decimals: usize) -> String {
    let s = fixed(value, decimals);
    if value > 0.0 && s.chars().any(|c| c.is_ascii_digit() && c != '0') {
        format!("+{}", s)
    } else {
        s
    }
}

/// Fixed decimals with thousands separators, e.g. `1,234,567.9`.
pub fn grouped(value: f64, decimals: usize) -> String {
    let s = fixed(value, decimals);
    let (sign, digits) = match s.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", s.as_str()),
    };
    let (int_part, frac_part) = match digits.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (digits, None),
    };

    let mut out = String::with_capacity(s.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    format!("{}{}", sign, out)
}

/// Whole-currency amount, e.g. `$12,500`.
pub fn currency(value: f64, symbol: &str) -> String {
    let s = grouped(value, 0);
    match s.strip_prefix('-') {
        Some(rest) => format!("-{}{}", symbol, rest),
        None => format!("{}{}", symbol, s),
    }
}

/// Currency range, e.g. `$300 - $450`.
pub fn currency_range(low: f64, high: f64, symbol: &str) -> String {
    format!("{} - {}", currency(low, symbol), currency(high, symbol))
}

/// Numeric range with unit, e.g. `160.5 - 177.5 cm`.
pub fn range(low: f64, high: f64, decimals: usize, unit: &str) -> String {
    format!("{} - {} {}", fixed(low, decimals), fixed(high, decimals), unit)
}

/// Percentage, e.g. `12.5%`.
pub fn percent(value: f64, decimals: usize) -> String {
    format!("{}%", fixed(value, decimals))
}

// ============================================================================
// Unit-aware formatting
// ============================================================================

/// Height in the configured unit system: `177.8 cm` or `5 ft 10 in`.
pub fn height(cm: f64, settings: &Settings) -> String {
    if settings.is_imperial() {
        let (feet, inches) = inch_to_ft_in(cm_to_inch(cm).round());
        format!("{} ft {} in", fixed(feet, 0), fixed(inches, 0))
    } else {
        format!("{} cm", fixed(cm, 1))
    }
}

/// Height range in the configured unit system.
pub fn height_range(low_cm: f64, high_cm: f64, settings: &Settings) -> String {
    if settings.is_imperial() {
        format!("{} - {}", height(low_cm, settings), height(high_cm, settings))
    } else {
        range(low_cm, high_cm, 1, "cm")
    }
}

/// Weight in the configured unit system: `72.5 kg` or `159.8 lb`.
pub fn weight(kg: f64, settings: &Settings) -> String {
    if settings.is_imperial() {
        format!("{} lb", fixed(kg_to_lb(kg), 1))
    } else {
        format!("{} kg", fixed(kg, 1))
    }
}

/// Weight range in the configured unit system.
pub fn weight_range(low_kg: f64, high_kg: f64, settings: &Settings) -> String {
    if settings.is_imperial() {
        range(kg_to_lb(low_kg), kg_to_lb(high_kg), 1, "lb")
    } else {
        range(low_kg, high_kg, 1, "kg")
    }
}

/// Fluid volume in the configured unit system: `2.9 L` or `98 fl oz`.
pub fn volume(ml: f64, settings: &Settings) -> String {
    if settings.is_imperial() {
        format!("{} fl oz", fixed(ml_to_fl_oz(ml), 0))
    } else {
        format!("{} L", fixed(ml / 1000.0, 1))
    }
}

fn strip_negative_zero(s: String) -> String {
    match s.strip_prefix('-') {
        Some(rest) if rest.chars().all(|c| c == '0' || c == '.') => rest.to_string(),
        _ => s,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::UnitSystem;

    #[test]
    fn test_fixed() {
        assert_eq!(fixed(80.2499, 1), "80.2");
        assert_eq!(fixed(1729.6, 0), "1730");
        assert_eq!(fixed(-0.04, 1), "0.0");
        assert_eq!(fixed(-10.0, 1), "-10.0");
    }

    #[test]
    fn test_signed() {
        assert_eq!(signed(1.6, 1), "+1.6");
        assert_eq!(signed(-10.0, 1), "-10.0");
        assert_eq!(signed(0.0, 1), "0.0");
        assert_eq!(signed(0.01, 1), "0.0");
    }

    #[test]
    fn test_grouped_and_currency() {
        assert_eq!(grouped(1234567.891, 1), "1,234,567.9");
        assert_eq!(grouped(999.0, 0), "999");
        assert_eq!(grouped(1000.0, 0), "1,000");
        assert_eq!(currency(12500.4, "$"), "$12,500");
        assert_eq!(currency(-2500.0, "$"), "-$2,500");
        assert_eq!(currency_range(300.0, 450.0, "€"), "€300 - €450");
    }

    #[test]
    fn test_comparison() {
        let cmp = Comparison::between(76.1, 80.2);
        assert_eq!(cmp.describe(1), "+4.1 (+5.4%)");

        let cmp = Comparison::between(0.0, 5.0);
        assert!(cmp.percent.is_none());
        assert_eq!(cmp.describe(1), "+5.0");
    }

    #[test]
    fn test_unit_aware_formatting() {
        let metric = Settings::default();
        let imperial = Settings::default().with_unit_system(UnitSystem::Imperial);

        assert_eq!(height(177.8, &metric), "177.8 cm");
        assert_eq!(height(177.8, &imperial), "5 ft 10 in");
        assert_eq!(weight(75.0, &metric), "75.0 kg");
        assert_eq!(weight(75.0, &imperial), "165.3 lb");
        assert_eq!(volume(2900.0, &metric), "2.9 L");
        assert_eq!(volume(2957.35, &imperial), "100 fl oz");
    }

    #[test]
    fn test_builder() {
        let presented = PresentedResult::new("bmi", "BMI", "24.7")
            .line("bmi", "BMI", "24.7")
            .label("category", "Normal")
            .note("Screening measure only");
        assert_eq!(presented.value_of("bmi"), Some("24.7"));
        assert_eq!(presented.labels["category"], "Normal");
        assert_eq!(presented.notes.len(), 1);
    }
}
