//! # Unit Types
//!
//! Type-safe wrappers for the body-measurement and volume units the
//! calculators accept or display. These are plain f64 newtypes that serialize
//! as bare numbers.
//!
//! Calculators take metric inputs (cm, kg, ml). Imperial values exist for
//! formulas defined in inches (the ideal-body-weight family) and for display
//! when [`UnitSystem::Imperial`](crate::settings::UnitSystem) is selected.
//!
//! No rounding happens here; rounding belongs to the presenter.
//!
//! ## Example
//!
//! ```rust
//! use gauge_core::units::{Centimeters, Inches, cm_to_inch, inch_to_cm};
//!
//! let height = Centimeters(170.0);
//! let inches: Inches = height.into();
//! assert!((inches.0 - 66.929_133).abs() < 1e-5);
//! assert!((inch_to_cm(cm_to_inch(170.0)) - 170.0).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

/// Centimeters per inch (exact)
pub const CM_PER_INCH: f64 = 2.54;
/// Pounds per kilogram
pub const LB_PER_KG: f64 = 2.20462;
/// Milliliters per US fluid ounce
pub const ML_PER_FL_OZ: f64 = 29.5735;
/// Inches per foot
pub const INCHES_PER_FOOT: f64 = 12.0;

// ============================================================================
// Free conversion functions
// ============================================================================

/// Convert centimeters to inches
pub fn cm_to_inch(cm: f64) -> f64 {
    cm / CM_PER_INCH
}

/// Convert inches to centimeters
pub fn inch_to_cm(inches: f64) -> f64 {
    inches * CM_PER_INCH
}

/// Convert kilograms to pounds
pub fn kg_to_lb(kg: f64) -> f64 {
    kg * LB_PER_KG
}

/// Convert pounds to kilograms
pub fn lb_to_kg(lb: f64) -> f64 {
    lb / LB_PER_KG
}

/// Combine a feet + inches height into total inches
pub fn ft_in_to_inch(feet: f64, inches: f64) -> f64 {
    feet * INCHES_PER_FOOT + inches
}

/// Split total inches into whole feet and remaining inches.
///
/// Negative input is split the same way (feet rounds toward negative infinity).
pub fn inch_to_ft_in(total_inches: f64) -> (f64, f64) {
    let feet = (total_inches / INCHES_PER_FOOT).floor();
    (feet, total_inches - feet * INCHES_PER_FOOT)
}

/// Convert milliliters to US fluid ounces
pub fn ml_to_fl_oz(ml: f64) -> f64 {
    ml / ML_PER_FL_OZ
}

/// Convert US fluid ounces to milliliters
pub fn fl_oz_to_ml(fl_oz: f64) -> f64 {
    fl_oz * ML_PER_FL_OZ
}

// ============================================================================
// Length Units
// ============================================================================

/// Length in centimeters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Centimeters(pub f64);

/// Length in inches
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inches(pub f64);

impl From<Centimeters> for Inches {
    fn from(cm: Centimeters) -> Self {
        Inches(cm_to_inch(cm.0))
    }
}

impl From<Inches> for Centimeters {
    fn from(inches: Inches) -> Self {
        Centimeters(inch_to_cm(inches.0))
    }
}

impl Inches {
    /// Build from a feet + inches pair
    pub fn from_ft_in(feet: f64, inches: f64) -> Self {
        Inches(ft_in_to_inch(feet, inches))
    }

    /// Whole feet and remaining inches
    pub fn ft_in(self) -> (f64, f64) {
        inch_to_ft_in(self.0)
    }
}

// ============================================================================
// Mass Units
// ============================================================================

/// Mass in kilograms
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kilograms(pub f64);

/// Mass in pounds
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pounds(pub f64);

impl From<Kilograms> for Pounds {
    fn from(kg: Kilograms) -> Self {
        Pounds(kg_to_lb(kg.0))
    }
}

impl From<Pounds> for Kilograms {
    fn from(lb: Pounds) -> Self {
        Kilograms(lb_to_kg(lb.0))
    }
}

// ============================================================================
// Volume Units
// ============================================================================

/// Volume in milliliters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Milliliters(pub f64);

/// Volume in liters
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Liters(pub f64);

/// Volume in US fluid ounces
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FluidOunces(pub f64);

impl From<Milliliters> for Liters {
    fn from(ml: Milliliters) -> Self {
        Liters(ml.0 / 1000.0)
    }
}

impl From<Liters> for Milliliters {
    fn from(l: Liters) -> Self {
        Milliliters(l.0 * 1000.0)
    }
}

impl From<Milliliters> for FluidOunces {
    fn from(ml: Milliliters) -> Self {
        FluidOunces(ml_to_fl_oz(ml.0))
    }
}

impl From<FluidOunces> for Milliliters {
    fn from(oz: FluidOunces) -> Self {
        Milliliters(fl_oz_to_ml(oz.0))
    }
}

// ============================================================================
// Arithmetic Implementations (macro to reduce boilerplate)
// ============================================================================

macro_rules! impl_arithmetic {
    ($type:ty) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Div<f64> for $type {
            type Output = Self;
            fn div(self, rhs: f64) -> Self::Output {
                Self(self.0 / rhs)
            }
        }

        impl $type {
            /// Get the raw f64 value
            pub fn value(self) -> f64 {
                self.0
            }

            /// Create from raw f64 value
            pub fn new(value: f64) -> Self {
                Self(value)
            }
        }
    };
}

impl_arithmetic!(Centimeters);
impl_arithmetic!(Inches);
impl_arithmetic!(Kilograms);
impl_arithmetic!(Pounds);
impl_arithmetic!(Milliliters);
impl_arithmetic!(Liters);
impl_arithmetic!(FluidOunces);
