//! Calculator inputs
//!
//! Each input carries a `unit_system` tag that fixes the unit of every
//! length and mass field (no mixed units within one input). `normalize`
//! returns a copy in canonical units (cm, kg, mg/dL) tagged `Metric`;
//! validation ranges are declared against those canonical units, so inputs
//! are always validated after normalizing (`prepare` does both).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::errors::CalcResult;
use crate::formulas::body::LbmFormula;
use crate::formulas::energy::{ActivityLevel, BmrMethod};
use crate::formulas::sleep::SleepMode;
use crate::formulas::BiologicalSex;
use crate::units::{GlucoseUnit, UnitSystem};
use crate::validation::{
    adult_age_rule, check, girth_rule, height_rule, pss_answers_rule, target_body_fat_rule, weight_rule,
};

/// Conversion to canonical units followed by validation
pub trait Normalize: Validate + Sized {
    /// Copy with every measurement in canonical units
    fn normalize(&self) -> Self;

    /// Normalize, then validate against the canonical ranges
    fn prepare(&self) -> CalcResult<Self> {
        let normalized = self.normalize();
        check(&normalized)?;
        Ok(normalized)
    }
}

fn cm(system: UnitSystem, value: f64) -> f64 {
    system.length_to_cm(value)
}

fn kg(system: UnitSystem, value: f64) -> f64 {
    system.weight_to_kg(value)
}

// ============================================================================
// Body composition
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct BmiInput {
    #[serde(default)]
    pub unit_system: UnitSystem,
    #[validate(custom(function = "weight_rule"))]
    pub weight: f64,
    #[validate(custom(function = "height_rule"))]
    pub height: f64,
    /// With `sex`, enables a body fat estimate
    #[serde(default)]
    #[validate(range(min = 2, max = 120))]
    pub age_years: Option<u32>,
    #[serde(default)]
    pub sex: Option<BiologicalSex>,
}

impl Normalize for BmiInput {
    fn normalize(&self) -> Self {
        Self {
            unit_system: UnitSystem::Metric,
            weight: kg(self.unit_system, self.weight),
            height: cm(self.unit_system, self.height),
            ..self.clone()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct AbsiInput {
    #[serde(default)]
    pub unit_system: UnitSystem,
    pub sex: BiologicalSex,
    #[validate(custom(function = "adult_age_rule"))]
    pub age_years: u32,
    #[validate(custom(function = "weight_rule"))]
    pub weight: f64,
    #[validate(custom(function = "height_rule"))]
    pub height: f64,
    #[validate(custom(function = "girth_rule"))]
    pub waist: f64,
    /// Adds the waist-to-hip ratio
    #[serde(default)]
    #[validate(range(min = 10.0, max = 300.0))]
    pub hip: Option<f64>,
}

impl Normalize for AbsiInput {
    fn normalize(&self) -> Self {
        let system = self.unit_system;
        Self {
            unit_system: UnitSystem::Metric,
            weight: kg(system, self.weight),
            height: cm(system, self.height),
            waist: cm(system, self.waist),
            hip: self.hip.map(|hip| cm(system, hip)),
            ..self.clone()
        }
    }
}

/// U.S. Navy circumference method
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct BodyFatInput {
    #[serde(default)]
    pub unit_system: UnitSystem,
    pub sex: BiologicalSex,
    #[serde(default)]
    #[validate(range(min = 2, max = 120))]
    pub age_years: Option<u32>,
    #[validate(custom(function = "weight_rule"))]
    pub weight: f64,
    #[validate(custom(function = "height_rule"))]
    pub height: f64,
    #[validate(custom(function = "girth_rule"))]
    pub neck: f64,
    #[validate(custom(function = "girth_rule"))]
    pub waist: f64,
    /// Required for women
    #[serde(default)]
    #[validate(range(min = 10.0, max = 300.0))]
    pub hip: Option<f64>,
    /// Goal for "weight at target body fat"; configured default when absent
    #[serde(default)]
    #[validate(custom(function = "target_body_fat_rule"))]
    pub target_percent: Option<f64>,
}

impl Normalize for BodyFatInput {
    fn normalize(&self) -> Self {
        let system = self.unit_system;
        Self {
            unit_system: UnitSystem::Metric,
            weight: kg(system, self.weight),
            height: cm(system, self.height),
            neck: cm(system, self.neck),
            waist: cm(system, self.waist),
            hip: self.hip.map(|hip| cm(system, hip)),
            ..self.clone()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct BodyShapeInput {
    #[serde(default)]
    pub unit_system: UnitSystem,
    #[validate(custom(function = "girth_rule"))]
    pub bust: f64,
    #[validate(custom(function = "girth_rule"))]
    pub waist: f64,
    #[validate(custom(function = "girth_rule"))]
    pub high_hip: f64,
    #[validate(custom(function = "girth_rule"))]
    pub hip: f64,
}

impl Normalize for BodyShapeInput {
    fn normalize(&self) -> Self {
        let system = self.unit_system;
        Self {
            unit_system: UnitSystem::Metric,
            bust: cm(system, self.bust),
            waist: cm(system, self.waist),
            high_hip: cm(system, self.high_hip),
            hip: cm(system, self.hip),
        }
    }
}

/// Relative fat mass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct RfmInput {
    #[serde(default)]
    pub unit_system: UnitSystem,
    pub sex: BiologicalSex,
    #[validate(custom(function = "height_rule"))]
    pub height: f64,
    #[validate(custom(function = "girth_rule"))]
    pub waist: f64,
}

impl Normalize for RfmInput {
    fn normalize(&self) -> Self {
        Self {
            unit_system: UnitSystem::Metric,
            height: cm(self.unit_system, self.height),
            waist: cm(self.unit_system, self.waist),
            ..self.clone()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct LeanBodyMassInput {
    #[serde(default)]
    pub unit_system: UnitSystem,
    pub sex: BiologicalSex,
    /// Below 15 the pediatric formula is used
    #[validate(range(min = 1, max = 120))]
    pub age_years: u32,
    #[validate(custom(function = "weight_rule"))]
    pub weight: f64,
    #[validate(custom(function = "height_rule"))]
    pub height: f64,
    /// Single formula; all applicable formulas when absent
    #[serde(default)]
    pub formula: Option<LbmFormula>,
}

impl Normalize for LeanBodyMassInput {
    fn normalize(&self) -> Self {
        Self {
            unit_system: UnitSystem::Metric,
            weight: kg(self.unit_system, self.weight),
            height: cm(self.unit_system, self.height),
            ..self.clone()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct IdealWeightInput {
    #[serde(default)]
    pub unit_system: UnitSystem,
    pub sex: BiologicalSex,
    #[validate(custom(function = "height_rule"))]
    pub height: f64,
}

impl Normalize for IdealWeightInput {
    fn normalize(&self) -> Self {
        Self {
            unit_system: UnitSystem::Metric,
            height: cm(self.unit_system, self.height),
            ..self.clone()
        }
    }
}

/// Wingspan for archery draw length
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct DrawLengthInput {
    #[serde(default)]
    pub unit_system: UnitSystem,
    #[validate(custom(function = "height_rule"))]
    pub wingspan: f64,
}

impl Normalize for DrawLengthInput {
    fn normalize(&self) -> Self {
        Self {
            unit_system: UnitSystem::Metric,
            wingspan: cm(self.unit_system, self.wingspan),
        }
    }
}

// ============================================================================
// Energy and strength
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct BmrInput {
    #[serde(default)]
    pub unit_system: UnitSystem,
    pub sex: BiologicalSex,
    #[validate(range(min = 15, max = 120))]
    pub age_years: u32,
    #[validate(custom(function = "weight_rule"))]
    pub weight: f64,
    #[validate(custom(function = "height_rule"))]
    pub height: f64,
    #[serde(default)]
    pub activity_level: ActivityLevel,
    #[serde(default)]
    pub method: BmrMethod,
    /// Required by Katch-McArdle
    #[serde(default)]
    #[validate(range(min = 2.0, max = 75.0))]
    pub body_fat_percent: Option<f64>,
}

impl Normalize for BmrInput {
    fn normalize(&self) -> Self {
        Self {
            unit_system: UnitSystem::Metric,
            weight: kg(self.unit_system, self.weight),
            height: cm(self.unit_system, self.height),
            ..self.clone()
        }
    }
}

/// Powerlifting total; both masses follow the unit system
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct WilksInput {
    #[serde(default)]
    pub unit_system: UnitSystem,
    pub sex: BiologicalSex,
    #[validate(custom(function = "weight_rule"))]
    pub bodyweight: f64,
    #[validate(range(min = 1.0, max = 1500.0))]
    pub total: f64,
}

impl Normalize for WilksInput {
    fn normalize(&self) -> Self {
        Self {
            unit_system: UnitSystem::Metric,
            bodyweight: kg(self.unit_system, self.bodyweight),
            total: kg(self.unit_system, self.total),
            ..self.clone()
        }
    }
}

// ============================================================================
// Glycemia
// ============================================================================

/// Either an A1c reading or an average glucose, converted to the other
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct A1cInput {
    #[serde(default)]
    #[validate(range(min = 3.0, max = 20.0))]
    pub a1c_percent: Option<f64>,
    /// Average glucose in `glucose_unit`
    #[serde(default)]
    #[validate(range(min = 20.0, max = 700.0))]
    pub average_glucose: Option<f64>,
    #[serde(default)]
    pub glucose_unit: GlucoseUnit,
}

impl Normalize for A1cInput {
    fn normalize(&self) -> Self {
        Self {
            average_glucose: self.average_glucose.map(|value| self.glucose_unit.to_mgdl(value)),
            glucose_unit: GlucoseUnit::MgDl,
            ..self.clone()
        }
    }
}

/// Fasting plasma glucose reading
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct GlucoseInput {
    #[validate(range(min = 20.0, max = 700.0))]
    pub value: f64,
    #[serde(default)]
    pub unit: GlucoseUnit,
}

impl Normalize for GlucoseInput {
    fn normalize(&self) -> Self {
        Self {
            value: self.unit.to_mgdl(self.value),
            unit: GlucoseUnit::MgDl,
        }
    }
}

// ============================================================================
// Sleep, stress and dates
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct SleepCycleInput {
    pub mode: SleepMode,
    /// Calendar day of `time`
    pub date: NaiveDate,
    /// Clock time, e.g. "07:30" or "7:30 PM"
    #[validate(length(min = 1))]
    pub time: String,
    /// Configured default when absent
    #[serde(default)]
    #[validate(range(max = 180))]
    pub latency_minutes: Option<u32>,
}

impl Normalize for SleepCycleInput {
    fn normalize(&self) -> Self {
        self.clone()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct SleepDebtInput {
    #[validate(range(min = 1.0, max = 16.0))]
    pub target_hours: f64,
    /// Hours slept on each recent night
    #[validate(length(min = 1, max = 31))]
    pub nights: Vec<f64>,
}

impl Normalize for SleepDebtInput {
    fn normalize(&self) -> Self {
        self.clone()
    }
}

/// PSS-10 answers in questionnaire order, 0 (never) to 4 (very often)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct PssInput {
    #[validate(length(equal = 10), custom(function = "pss_answers_rule"))]
    pub answers: Vec<u8>,
}

impl Normalize for PssInput {
    fn normalize(&self) -> Self {
        self.clone()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct AgeInput {
    pub birth_date: NaiveDate,
    /// "Today"; always supplied by the caller
    pub reference_date: NaiveDate,
}

impl Normalize for AgeInput {
    fn normalize(&self) -> Self {
        self.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::CalcError;

    #[test]
    fn test_imperial_bmi_normalizes_to_metric() {
        let input = BmiInput {
            unit_system: UnitSystem::Imperial,
            weight: 154.324,
            height: 70.0,
            age_years: None,
            sex: None,
        };
        let normalized = input.prepare().unwrap();
        assert_eq!(normalized.unit_system, UnitSystem::Metric);
        assert!((normalized.weight - 70.0).abs() < 0.01);
        assert!((normalized.height - 177.8).abs() < 1e-9);
        // Original untouched
        assert_eq!(input.unit_system, UnitSystem::Imperial);
    }

    #[test]
    fn test_metric_normalize_is_identity() {
        let input = RfmInput {
            unit_system: UnitSystem::Metric,
            sex: BiologicalSex::Female,
            height: 170.0,
            waist: 72.0,
        };
        assert_eq!(input.normalize(), input);
    }

    #[test]
    fn test_out_of_range_reports_field() {
        let input = BmiInput {
            unit_system: UnitSystem::Metric,
            weight: 70.0,
            height: 20.0,
            age_years: None,
            sex: None,
        };
        match input.prepare() {
            Err(CalcError::Validation(errors)) => {
                assert_eq!(errors.len(), 1);
                assert_eq!(errors[0].field, "height");
                assert_eq!(errors[0].message, "Height must be at least 50 cm");
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn test_ranges_apply_after_conversion() {
        // 1200 lbs is about 544 kg, above the 500 kg limit
        let mut input = WilksInput {
            unit_system: UnitSystem::Imperial,
            sex: BiologicalSex::Male,
            bodyweight: 400.0,
            total: 1500.0,
        };
        assert!(input.prepare().is_ok());
        input.bodyweight = 1200.0;
        assert!(input.prepare().is_err());
    }

    #[test]
    fn test_glucose_normalizes_mmol() {
        let input = GlucoseInput {
            value: 5.5,
            unit: GlucoseUnit::MmolL,
        };
        let normalized = input.prepare().unwrap();
        assert_eq!(normalized.unit, GlucoseUnit::MgDl);
        assert!((normalized.value - 99.08).abs() < 0.01);
    }

    #[test]
    fn test_pss_answers_validated() {
        assert!(PssInput { answers: vec![2; 10] }.prepare().is_ok());
        assert!(PssInput { answers: vec![2; 9] }.prepare().is_err());
        assert!(PssInput { answers: vec![5; 10] }.prepare().is_err());
    }

    #[test]
    fn test_adult_age_required_for_absi() {
        let input = AbsiInput {
            unit_system: UnitSystem::Metric,
            sex: BiologicalSex::Male,
            age_years: 16,
            weight: 70.0,
            height: 175.0,
            waist: 80.0,
            hip: None,
        };
        assert!(matches!(input.prepare(), Err(CalcError::Validation(_))));
    }

    #[test]
    fn test_deserialize_defaults_to_metric() {
        let input: BmiInput = serde_json::from_str(r#"{"weight": 70, "height": 175}"#).unwrap();
        assert_eq!(input.unit_system, UnitSystem::Metric);
        assert_eq!(input.age_years, None);
    }
}
