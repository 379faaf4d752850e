//! Unit conversion and normalization module
//!
//! Every calculator works on one canonical unit system internally
//! (centimeters, kilograms, mg/dL). Conversion happens at the boundary:
//! raw inputs are normalized with `to_canonical`, and values shown to the user
//! go back through `from_canonical`.
//!
//! # Design Principles
//!
//! 1. **Canonical Units**: formulas only ever see cm, kg and mg/dL
//! 2. **Type Safety**: units are explicit in types, not just f64
//! 3. **Never Throws**: conversion of a non-finite value yields `None`
//! 4. **Stable Display**: display values are rounded to a fixed precision

use serde::{Deserialize, Serialize};
use std::fmt;

/// Centimeters per inch (exact by definition)
pub const CM_PER_INCH: f64 = 2.54;

/// Pounds per kilogram
pub const LBS_PER_KG: f64 = 2.20462;

/// Kilograms per stone
pub const KG_PER_STONE: f64 = 6.35029;

/// mg/dL per mmol/L for glucose
pub const MGDL_PER_MMOLL: f64 = 18.015;

/// Decimal places shown by the calculator widgets
pub const DISPLAY_DECIMALS: u32 = 1;

/// Round to a fixed number of decimal places
pub fn round_to(value: f64, decimals: u32) -> f64 {
    let factor = 10f64.powi(decimals as i32);
    (value * factor).round() / factor
}

// ============================================================================
// Unit System
// ============================================================================

/// Unit system tag carried by every calculator input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum UnitSystem {
    #[default]
    Metric,
    Imperial,
}

impl UnitSystem {
    /// Length unit used for every length field under this system
    pub fn length_unit(&self) -> LengthUnit {
        match self {
            UnitSystem::Metric => LengthUnit::Cm,
            UnitSystem::Imperial => LengthUnit::Inches,
        }
    }

    /// Weight unit used for every mass field under this system
    pub fn weight_unit(&self) -> WeightUnit {
        match self {
            UnitSystem::Metric => WeightUnit::Kg,
            UnitSystem::Imperial => WeightUnit::Lbs,
        }
    }

    /// Normalize a length measured in this system to centimeters
    pub fn length_to_cm(&self, value: f64) -> f64 {
        self.length_unit().to_cm(value)
    }

    /// Normalize a mass measured in this system to kilograms
    pub fn weight_to_kg(&self, value: f64) -> f64 {
        self.weight_unit().to_kg(value)
    }
}

impl std::str::FromStr for UnitSystem {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "metric" | "si" => Ok(UnitSystem::Metric),
            "imperial" | "us" => Ok(UnitSystem::Imperial),
            _ => Err(format!("Unknown unit system: {}", s)),
        }
    }
}

// ============================================================================
// Weight Units
// ============================================================================

/// Weight unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum WeightUnit {
    #[default]
    Kg,
    Lbs,
    Stone,
}

impl WeightUnit {
    /// Convert from this unit to kilograms
    pub fn to_kg(&self, value: f64) -> f64 {
        match self {
            WeightUnit::Kg => value,
            WeightUnit::Lbs => value / LBS_PER_KG,
            WeightUnit::Stone => value * KG_PER_STONE,
        }
    }

    /// Convert from kilograms to this unit
    pub fn from_kg(&self, kg: f64) -> f64 {
        match self {
            WeightUnit::Kg => kg,
            WeightUnit::Lbs => kg * LBS_PER_KG,
            WeightUnit::Stone => kg / KG_PER_STONE,
        }
    }

    /// Get the unit abbreviation
    pub fn abbreviation(&self) -> &'static str {
        match self {
            WeightUnit::Kg => "kg",
            WeightUnit::Lbs => "lbs",
            WeightUnit::Stone => "st",
        }
    }
}

impl fmt::Display for WeightUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.abbreviation())
    }
}

impl std::str::FromStr for WeightUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "kg" | "kilogram" | "kilograms" => Ok(WeightUnit::Kg),
            "lbs" | "lb" | "pound" | "pounds" => Ok(WeightUnit::Lbs),
            "st" | "stone" | "stones" => Ok(WeightUnit::Stone),
            _ => Err(format!("Unknown weight unit: {}", s)),
        }
    }
}

// ============================================================================
// Length Units
// ============================================================================

/// Length unit for height, girths and wingspan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LengthUnit {
    #[default]
    Cm,
    Meters,
    Inches,
    FeetInches, // Special case: stored as total inches
}

impl LengthUnit {
    /// Convert from this unit to centimeters
    pub fn to_cm(&self, value: f64) -> f64 {
        match self {
            LengthUnit::Cm => value,
            LengthUnit::Meters => value * 100.0,
            LengthUnit::Inches | LengthUnit::FeetInches => value * CM_PER_INCH,
        }
    }

    /// Convert from centimeters to this unit
    pub fn from_cm(&self, cm: f64) -> f64 {
        match self {
            LengthUnit::Cm => cm,
            LengthUnit::Meters => cm / 100.0,
            LengthUnit::Inches | LengthUnit::FeetInches => cm / CM_PER_INCH,
        }
    }

    /// Get the unit abbreviation
    pub fn abbreviation(&self) -> &'static str {
        match self {
            LengthUnit::Cm => "cm",
            LengthUnit::Meters => "m",
            LengthUnit::Inches => "in",
            LengthUnit::FeetInches => "ft/in",
        }
    }
}

impl fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.abbreviation())
    }
}

impl std::str::FromStr for LengthUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cm" | "centimeter" | "centimeters" => Ok(LengthUnit::Cm),
            "m" | "meter" | "meters" => Ok(LengthUnit::Meters),
            "in" | "inch" | "inches" => Ok(LengthUnit::Inches),
            "ft" | "feet" | "ft/in" | "feet/inches" => Ok(LengthUnit::FeetInches),
            _ => Err(format!("Unknown length unit: {}", s)),
        }
    }
}

// ============================================================================
// Glucose Units
// ============================================================================

/// Blood glucose concentration unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum GlucoseUnit {
    #[default]
    MgDl,
    MmolL,
}

impl GlucoseUnit {
    /// Convert from this unit to mg/dL
    pub fn to_mgdl(&self, value: f64) -> f64 {
        match self {
            GlucoseUnit::MgDl => value,
            GlucoseUnit::MmolL => value * MGDL_PER_MMOLL,
        }
    }

    /// Convert from mg/dL to this unit
    pub fn from_mgdl(&self, mgdl: f64) -> f64 {
        match self {
            GlucoseUnit::MgDl => mgdl,
            GlucoseUnit::MmolL => mgdl / MGDL_PER_MMOLL,
        }
    }

    pub fn abbreviation(&self) -> &'static str {
        match self {
            GlucoseUnit::MgDl => "mg/dL",
            GlucoseUnit::MmolL => "mmol/L",
        }
    }
}

impl fmt::Display for GlucoseUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.abbreviation())
    }
}

// ============================================================================
// Generic conversion
// ============================================================================

/// Any unit a calculator field can be measured in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "dimension", content = "unit", rename_all = "lowercase")]
pub enum MeasurementUnit {
    Length(LengthUnit),
    Weight(WeightUnit),
    Glucose(GlucoseUnit),
}

impl MeasurementUnit {
    /// Convert a value in this unit to the canonical unit of its dimension
    pub fn to_canonical(&self, value: f64) -> f64 {
        match self {
            MeasurementUnit::Length(unit) => unit.to_cm(value),
            MeasurementUnit::Weight(unit) => unit.to_kg(value),
            MeasurementUnit::Glucose(unit) => unit.to_mgdl(value),
        }
    }

    /// Convert a canonical value of this dimension into this unit
    pub fn from_canonical(&self, value: f64) -> f64 {
        match self {
            MeasurementUnit::Length(unit) => unit.from_cm(value),
            MeasurementUnit::Weight(unit) => unit.from_kg(value),
            MeasurementUnit::Glucose(unit) => unit.from_mgdl(value),
        }
    }

    fn same_dimension(&self, other: &MeasurementUnit) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

/// Normalize a value to its canonical unit, or `None` if it is not a number
pub fn to_canonical(value: f64, unit: MeasurementUnit) -> Option<f64> {
    value.is_finite().then(|| unit.to_canonical(value))
}

/// Express a canonical value in `unit`, rounded for display
pub fn from_canonical(value: f64, unit: MeasurementUnit) -> Option<f64> {
    value
        .is_finite()
        .then(|| round_to(unit.from_canonical(value), DISPLAY_DECIMALS))
}

/// Convert between two units of the same dimension, unrounded
///
/// Returns `None` for non-finite values and for mismatched dimensions;
/// conversion never fails loudly.
pub fn convert(value: f64, from: MeasurementUnit, to: MeasurementUnit) -> Option<f64> {
    if !from.same_dimension(&to) {
        return None;
    }
    to_canonical(value, from).map(|canonical| to.from_canonical(canonical))
}

// ============================================================================
// Height Display Helper
// ============================================================================

/// Represents height in feet and inches for display
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeetInchesHeight {
    pub feet: i32,
    pub inches: f64,
}

impl FeetInchesHeight {
    /// Create from total inches
    pub fn from_total_inches(total_inches: f64) -> Self {
        let feet = (total_inches / 12.0).floor() as i32;
        let inches = total_inches % 12.0;
        Self { feet, inches }
    }

    /// Convert to total inches
    pub fn to_total_inches(&self) -> f64 {
        (self.feet as f64 * 12.0) + self.inches
    }

    /// Create from centimeters
    pub fn from_cm(cm: f64) -> Self {
        Self::from_total_inches(cm / CM_PER_INCH)
    }

    /// Convert to centimeters
    pub fn to_cm(&self) -> f64 {
        self.to_total_inches() * CM_PER_INCH
    }
}

impl fmt::Display for FeetInchesHeight {
    /// Rounded to the whole inch, carrying 12 inches into the next foot
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total = self.to_total_inches().round() as i64;
        write!(f, "{}'{}\"", total.div_euclid(12), total.rem_euclid(12))
    }
}
