//! Formula-table building blocks.
//!
//! Categorical lookups are plain exhaustive `match`es on enums declared with
//! `choice_enum!`, so an enum value without a table entry cannot compile.
//! Continuous inputs go through a [`StepTable`]: ordered steps, each with an
//! explicit upper bound, and an `otherwise` value for everything above the
//! last step. Every real number therefore maps to exactly one value.
//!
//! ```rust
//! use gauge_core::engine::{Bound, StepTable};
//!
//! const BMI_DELTA: StepTable<f64> = StepTable::new(
//!     &[(Bound::Below(18.5), -2.0), (Bound::Below(25.0), 1.0)],
//!     0.0,
//! );
//!
//! assert_eq!(BMI_DELTA.lookup(18.4), -2.0);
//! assert_eq!(BMI_DELTA.lookup(18.5), 1.0);
//! assert_eq!(BMI_DELTA.lookup(25.0), 0.0);
//! ```

use serde::{Deserialize, Serialize};

/// Upper boundary of one step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bound {
    /// `x < limit` (half-open, the default for bands)
    Below(f64),
    /// `x <= limit`
    AtMost(f64),
}

impl Bound {
    pub fn contains(self, x: f64) -> bool {
        match self {
            Bound::Below(limit) => x < limit,
            Bound::AtMost(limit) => x <= limit,
        }
    }

    pub fn limit(self) -> f64 {
        match self {
            Bound::Below(limit) | Bound::AtMost(limit) => limit,
        }
    }
}

/// Banded lookup over a continuous input.
#[derive(Debug, Clone, Copy)]
pub struct StepTable<T: 'static> {
    steps: &'static [(Bound, T)],
    otherwise: T,
}

impl<T: Copy + 'static> StepTable<T> {
    pub const fn new(steps: &'static [(Bound, T)], otherwise: T) -> Self {
        StepTable { steps, otherwise }
    }

    /// Value of the first step whose bound contains `x`, else `otherwise`.
    pub fn lookup(&self, x: f64) -> T {
        self.steps
            .iter()
            .find(|(bound, _)| bound.contains(x))
            .map(|(_, value)| *value)
            .unwrap_or(self.otherwise)
    }

    pub fn steps(&self) -> &'static [(Bound, T)] {
        self.steps
    }

    /// All band values from lowest to highest band
    pub fn values(&self) -> impl Iterator<Item = T> + '_ {
        self.steps.iter().map(|(_, v)| *v).chain(std::iter::once(self.otherwise))
    }

    /// Bounds must increase strictly; a `Below(x)` may be followed by `AtMost(x)`.
    pub fn is_ordered(&self) -> bool {
        self.steps.windows(2).all(|pair| {
            let (a, b) = (pair[0].0, pair[1].0);
            a.limit() < b.limit() || (matches!(a, Bound::Below(_)) && matches!(b, Bound::AtMost(_)) && a.limit() == b.limit())
        })
    }
}

impl<T: Copy + PartialOrd + 'static> StepTable<T> {
    /// Band values never decrease as the input grows
    pub fn is_non_decreasing(&self) -> bool {
        let values: Vec<T> = self.values().collect();
        values.windows(2).all(|pair| pair[0] <= pair[1])
    }

    /// Band values never increase as the input grows
    pub fn is_non_increasing(&self) -> bool {
        let values: Vec<T> = self.values().collect();
        values.windows(2).all(|pair| pair[0] >= pair[1])
    }
}

/// A value produced by one named formula.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedEstimate {
    pub name: String,
    pub value: f64,
}

impl NamedEstimate {
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        NamedEstimate {
            name: name.into(),
            value,
        }
    }
}

/// Aggregate over the outputs of several formulas for the same quantity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Spread {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub count: usize,
}

impl Spread {
    /// Aggregate the given estimates. `None` when there are none.
    pub fn of(estimates: &[NamedEstimate]) -> Option<Self> {
        if estimates.is_empty() {
            return None;
        }
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut sum = 0.0;
        for estimate in estimates {
            min = min.min(estimate.value);
            max = max.max(estimate.value);
            sum += estimate.value;
        }
        Some(Spread {
            min,
            max,
            mean: sum / estimates.len() as f64,
            count: estimates.len(),
        })
    }

    pub fn width(&self) -> f64 {
        self.max - self.min
    }
}

/// A `[low, high]` amount, used for cost estimates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Range {
    pub low: f64,
    pub high: f64,
}

impl Range {
    pub const fn new(low: f64, high: f64) -> Self {
        Range { low, high }
    }

    pub const fn point(value: f64) -> Self {
        Range { low: value, high: value }
    }

    pub fn midpoint(&self) -> f64 {
        (self.low + self.high) / 2.0
    }

    pub fn scale(self, factor: f64) -> Self {
        Range::new(self.low * factor, self.high * factor)
    }

    /// Component-wise product (low × low, high × high)
    pub fn times(self, other: Range) -> Self {
        Range::new(self.low * other.low, self.high * other.high)
    }

    pub fn plus(self, other: Range) -> Self {
        Range::new(self.low + other.low, self.high + other.high)
    }
}

impl Default for Range {
    fn default() -> Self {
        Range::point(0.0)
    }
}
