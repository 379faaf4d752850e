//! Glycemia calculators

use serde::Serialize;

use super::{CalculatorKind, Report};
use crate::classification::{classify_a1c, classify_fasting_glucose, A1cCategory, Category, GlucoseCategory, Metric};
use crate::errors::{CalcError, CalcResult};
use crate::formulas::glucose::{a1c_from_eag, eag_from_a1c};
use crate::formulas::Formula;
use crate::inputs::{A1cInput, GlucoseInput, Normalize};
use crate::results::{FormulaOutput, FormulaResult};
use crate::units::GlucoseUnit;

// ============================================================================
// HbA1c <-> estimated average glucose
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct A1cReport {
    pub a1c_percent: f64,
    pub eag_mgdl: f64,
    pub eag_mmoll: f64,
    pub category: A1cCategory,
}

/// Exactly one of A1c or average glucose must be given; the other is derived
pub fn compute_a1c(input: &A1cInput) -> CalcResult<A1cReport> {
    let input = input.prepare()?;
    let (a1c_percent, eag_mgdl) = match (input.a1c_percent, input.average_glucose) {
        (Some(a1c), None) => (a1c, eag_from_a1c(a1c)?),
        (None, Some(eag)) => (a1c_from_eag(eag)?, eag),
        (Some(_), Some(_)) => {
            return Err(CalcError::invalid("a1c_percent", "give either A1c or average glucose, not both"))
        }
        (None, None) => return Err(CalcError::invalid("a1c_percent", "A1c or average glucose is required")),
    };

    Ok(A1cReport {
        a1c_percent,
        eag_mgdl,
        eag_mmoll: GlucoseUnit::MmolL.from_mgdl(eag_mgdl),
        category: classify_a1c(a1c_percent)?,
    })
}

impl Report for A1cReport {
    fn formula_result(&self) -> FormulaResult {
        FormulaResult::new(CalculatorKind::A1c)
            .output(FormulaOutput::new("a1c", self.a1c_percent, Formula::Adag).unit("%"))
            .output(FormulaOutput::new("eag", self.eag_mgdl, Formula::Adag).unit("mg/dL"))
            .output(FormulaOutput::new("eag_mmol", self.eag_mmoll, Formula::Adag).unit("mmol/L"))
    }

    fn categories(&self) -> Vec<Category> {
        vec![Category::of(Metric::A1c, self.category)]
    }
}

// ============================================================================
// Fasting glucose
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GlucoseReport {
    pub mgdl: f64,
    pub mmoll: f64,
    pub category: GlucoseCategory,
}

pub fn compute_glucose(input: &GlucoseInput) -> CalcResult<GlucoseReport> {
    let input = input.prepare()?;
    Ok(GlucoseReport {
        mgdl: input.value,
        mmoll: GlucoseUnit::MmolL.from_mgdl(input.value),
        category: classify_fasting_glucose(input.value)?,
    })
}

impl Report for GlucoseReport {
    fn formula_result(&self) -> FormulaResult {
        FormulaResult::new(CalculatorKind::Glucose)
            .output(FormulaOutput::new("glucose", self.mgdl, Formula::FastingGlucose).unit("mg/dL").whole())
            .output(FormulaOutput::new("glucose_mmol", self.mmoll, Formula::FastingGlucose).unit("mmol/L"))
    }

    fn categories(&self) -> Vec<Category> {
        vec![Category::of(Metric::FastingGlucose, self.category)]
    }
}
