//! Calculator dispatch
//!
//! One entry point, `compute`, takes a tagged `CalculatorInput`, normalizes
//! and validates it, runs the formulas for that calculator kind and returns
//! a typed report. Reports expose a generic `FormulaResult` and their
//! `Category` list so the display layer treats every calculator alike.

mod body;
mod glucose;
mod lifestyle;
mod performance;

pub use body::{
    compute_absi, compute_bmi, compute_body_fat, compute_body_shape, compute_draw_length, compute_ideal_weight,
    compute_lean_body_mass, compute_rfm, AbsiReport, BmiReport, BodyFatEstimate, BodyFatReport, BodyShapeReport,
    DrawLengthReport, IdealWeightEstimate, IdealWeightReport, LeanBodyMassReport, LeanMassEstimate, RfmReport,
};
pub use glucose::{compute_a1c, compute_glucose, A1cReport, GlucoseReport};
pub use lifestyle::{
    compute_age, compute_pss, compute_sleep_cycle, compute_sleep_debt, AgeReport, PssReport, SleepCycleReport,
    SleepDebtReport,
};
pub use performance::{compute_bmr, compute_wilks, BmrReport, WilksReport};

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::classification::Category;
use crate::config::EngineConfig;
use crate::errors::{CalcError, CalcResult};
use crate::inputs::{
    A1cInput, AbsiInput, AgeInput, BmiInput, BmrInput, BodyFatInput, BodyShapeInput, DrawLengthInput, GlucoseInput,
    IdealWeightInput, LeanBodyMassInput, PssInput, RfmInput, SleepCycleInput, SleepDebtInput, WilksInput,
};
use crate::results::{aggregate, DisplayResult, FormulaResult};

/// Every calculator the engine offers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CalculatorKind {
    Bmi,
    Absi,
    BodyFat,
    BodyShape,
    Rfm,
    LeanBodyMass,
    IdealWeight,
    Bmr,
    Wilks,
    A1c,
    Glucose,
    SleepCycle,
    SleepDebt,
    Pss,
    DrawLength,
    Age,
}

impl CalculatorKind {
    pub const ALL: [CalculatorKind; 16] = [
        CalculatorKind::Bmi,
        CalculatorKind::Absi,
        CalculatorKind::BodyFat,
        CalculatorKind::BodyShape,
        CalculatorKind::Rfm,
        CalculatorKind::LeanBodyMass,
        CalculatorKind::IdealWeight,
        CalculatorKind::Bmr,
        CalculatorKind::Wilks,
        CalculatorKind::A1c,
        CalculatorKind::Glucose,
        CalculatorKind::SleepCycle,
        CalculatorKind::SleepDebt,
        CalculatorKind::Pss,
        CalculatorKind::DrawLength,
        CalculatorKind::Age,
    ];

    /// Identifier used in JSON and logs
    pub fn name(&self) -> &'static str {
        match self {
            CalculatorKind::Bmi => "bmi",
            CalculatorKind::Absi => "absi",
            CalculatorKind::BodyFat => "body_fat",
            CalculatorKind::BodyShape => "body_shape",
            CalculatorKind::Rfm => "rfm",
            CalculatorKind::LeanBodyMass => "lean_body_mass",
            CalculatorKind::IdealWeight => "ideal_weight",
            CalculatorKind::Bmr => "bmr",
            CalculatorKind::Wilks => "wilks",
            CalculatorKind::A1c => "a1c",
            CalculatorKind::Glucose => "glucose",
            CalculatorKind::SleepCycle => "sleep_cycle",
            CalculatorKind::SleepDebt => "sleep_debt",
            CalculatorKind::Pss => "pss",
            CalculatorKind::DrawLength => "draw_length",
            CalculatorKind::Age => "age",
        }
    }

    /// Human-readable title
    pub fn title(&self) -> &'static str {
        match self {
            CalculatorKind::Bmi => "Body Mass Index",
            CalculatorKind::Absi => "A Body Shape Index",
            CalculatorKind::BodyFat => "Body Fat (U.S. Navy)",
            CalculatorKind::BodyShape => "Body Shape",
            CalculatorKind::Rfm => "Relative Fat Mass",
            CalculatorKind::LeanBodyMass => "Lean Body Mass",
            CalculatorKind::IdealWeight => "Ideal Body Weight",
            CalculatorKind::Bmr => "BMR & Daily Calories",
            CalculatorKind::Wilks => "Wilks Score",
            CalculatorKind::A1c => "HbA1c & Average Glucose",
            CalculatorKind::Glucose => "Fasting Glucose",
            CalculatorKind::SleepCycle => "Sleep Cycles",
            CalculatorKind::SleepDebt => "Sleep Debt",
            CalculatorKind::Pss => "Perceived Stress Scale",
            CalculatorKind::DrawLength => "Archery Draw Length",
            CalculatorKind::Age => "Age & Birthday",
        }
    }
}

impl fmt::Display for CalculatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Input to one calculator, tagged by kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "calculator", rename_all = "snake_case")]
pub enum CalculatorInput {
    Bmi(BmiInput),
    Absi(AbsiInput),
    BodyFat(BodyFatInput),
    BodyShape(BodyShapeInput),
    Rfm(RfmInput),
    LeanBodyMass(LeanBodyMassInput),
    IdealWeight(IdealWeightInput),
    Bmr(BmrInput),
    Wilks(WilksInput),
    A1c(A1cInput),
    Glucose(GlucoseInput),
    SleepCycle(SleepCycleInput),
    SleepDebt(SleepDebtInput),
    Pss(PssInput),
    DrawLength(DrawLengthInput),
    Age(AgeInput),
}

impl CalculatorInput {
    pub fn kind(&self) -> CalculatorKind {
        match self {
            CalculatorInput::Bmi(_) => CalculatorKind::Bmi,
            CalculatorInput::Absi(_) => CalculatorKind::Absi,
            CalculatorInput::BodyFat(_) => CalculatorKind::BodyFat,
            CalculatorInput::BodyShape(_) => CalculatorKind::BodyShape,
            CalculatorInput::Rfm(_) => CalculatorKind::Rfm,
            CalculatorInput::LeanBodyMass(_) => CalculatorKind::LeanBodyMass,
            CalculatorInput::IdealWeight(_) => CalculatorKind::IdealWeight,
            CalculatorInput::Bmr(_) => CalculatorKind::Bmr,
            CalculatorInput::Wilks(_) => CalculatorKind::Wilks,
            CalculatorInput::A1c(_) => CalculatorKind::A1c,
            CalculatorInput::Glucose(_) => CalculatorKind::Glucose,
            CalculatorInput::SleepCycle(_) => CalculatorKind::SleepCycle,
            CalculatorInput::SleepDebt(_) => CalculatorKind::SleepDebt,
            CalculatorInput::Pss(_) => CalculatorKind::Pss,
            CalculatorInput::DrawLength(_) => CalculatorKind::DrawLength,
            CalculatorInput::Age(_) => CalculatorKind::Age,
        }
    }
}

/// What every typed report can produce
pub(crate) trait Report {
    fn formula_result(&self) -> FormulaResult;
    fn categories(&self) -> Vec<Category>;
}

/// Typed result of one calculator run
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "calculator", rename_all = "snake_case")]
pub enum CalculatorReport {
    Bmi(BmiReport),
    Absi(AbsiReport),
    BodyFat(BodyFatReport),
    BodyShape(BodyShapeReport),
    Rfm(RfmReport),
    LeanBodyMass(LeanBodyMassReport),
    IdealWeight(IdealWeightReport),
    Bmr(BmrReport),
    Wilks(WilksReport),
    A1c(A1cReport),
    Glucose(GlucoseReport),
    SleepCycle(SleepCycleReport),
    SleepDebt(SleepDebtReport),
    Pss(PssReport),
    DrawLength(DrawLengthReport),
    Age(AgeReport),
}

impl CalculatorReport {
    fn as_report(&self) -> &dyn Report {
        match self {
            CalculatorReport::Bmi(report) => report,
            CalculatorReport::Absi(report) => report,
            CalculatorReport::BodyFat(report) => report,
            CalculatorReport::BodyShape(report) => report,
            CalculatorReport::Rfm(report) => report,
            CalculatorReport::LeanBodyMass(report) => report,
            CalculatorReport::IdealWeight(report) => report,
            CalculatorReport::Bmr(report) => report,
            CalculatorReport::Wilks(report) => report,
            CalculatorReport::A1c(report) => report,
            CalculatorReport::Glucose(report) => report,
            CalculatorReport::SleepCycle(report) => report,
            CalculatorReport::SleepDebt(report) => report,
            CalculatorReport::Pss(report) => report,
            CalculatorReport::DrawLength(report) => report,
            CalculatorReport::Age(report) => report,
        }
    }

    pub fn kind(&self) -> CalculatorKind {
        self.formula_result().calculator
    }

    /// Named numeric outputs, each tagged with its formula
    pub fn formula_result(&self) -> FormulaResult {
        self.as_report().formula_result()
    }

    /// Classifications of the outputs, in display order
    pub fn categories(&self) -> Vec<Category> {
        self.as_report().categories()
    }

    /// Display form using `config`'s precision
    pub fn display(&self, config: &EngineConfig) -> DisplayResult {
        aggregate(&self.formula_result(), &self.categories(), config)
    }
}

/// Run one calculator
pub fn compute(input: &CalculatorInput, config: &EngineConfig) -> CalcResult<CalculatorReport> {
    let kind = input.kind();
    tracing::debug!(calculator = kind.name(), "computing");

    let report = match input {
        CalculatorInput::Bmi(input) => compute_bmi(input).map(CalculatorReport::Bmi),
        CalculatorInput::Absi(input) => compute_absi(input).map(CalculatorReport::Absi),
        CalculatorInput::BodyFat(input) => compute_body_fat(input, config).map(CalculatorReport::BodyFat),
        CalculatorInput::BodyShape(input) => compute_body_shape(input).map(CalculatorReport::BodyShape),
        CalculatorInput::Rfm(input) => compute_rfm(input).map(CalculatorReport::Rfm),
        CalculatorInput::LeanBodyMass(input) => compute_lean_body_mass(input).map(CalculatorReport::LeanBodyMass),
        CalculatorInput::IdealWeight(input) => compute_ideal_weight(input).map(CalculatorReport::IdealWeight),
        CalculatorInput::Bmr(input) => compute_bmr(input).map(CalculatorReport::Bmr),
        CalculatorInput::Wilks(input) => compute_wilks(input).map(CalculatorReport::Wilks),
        CalculatorInput::A1c(input) => compute_a1c(input).map(CalculatorReport::A1c),
        CalculatorInput::Glucose(input) => compute_glucose(input).map(CalculatorReport::Glucose),
        CalculatorInput::SleepCycle(input) => compute_sleep_cycle(input, config).map(CalculatorReport::SleepCycle),
        CalculatorInput::SleepDebt(input) => compute_sleep_debt(input, config).map(CalculatorReport::SleepDebt),
        CalculatorInput::Pss(input) => compute_pss(input).map(CalculatorReport::Pss),
        CalculatorInput::DrawLength(input) => compute_draw_length(input).map(CalculatorReport::DrawLength),
        CalculatorInput::Age(input) => compute_age(input).map(CalculatorReport::Age),
    };

    match &report {
        Err(err @ (CalcError::Domain { .. } | CalcError::ClassificationGap { .. })) => {
            tracing::warn!(calculator = kind.name(), code = err.code(), error = %err, "calculation failed");
        }
        Err(err) => {
            tracing::debug!(calculator = kind.name(), code = err.code(), "input rejected");
        }
        Ok(_) => {}
    }
    report
}

/// `compute` followed by `aggregate`
pub fn evaluate(input: &CalculatorInput, config: &EngineConfig) -> CalcResult<DisplayResult> {
    compute(input, config).map(|report| report.display(config))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::UnitSystem;

    #[test]
    fn test_kind_names_round_trip_through_serde() {
        for kind in CalculatorKind::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.name()));
        }
    }

    #[test]
    fn test_tagged_input_deserializes() {
        let input: CalculatorInput = serde_json::from_str(
            r#"{"calculator": "rfm", "unit_system": "metric", "sex": "female", "height": 170, "waist": 72}"#,
        )
        .unwrap();
        assert_eq!(input.kind(), CalculatorKind::Rfm);
        match input {
            CalculatorInput::Rfm(rfm) => {
                assert_eq!(rfm.unit_system, UnitSystem::Metric);
                assert_eq!(rfm.height, 170.0);
            }
            other => panic!("unexpected input {other:?}"),
        }
    }

    #[test]
    fn test_compute_dispatches_and_reports_kind() {
        let input = CalculatorInput::Pss(PssInput { answers: vec![2; 10] });
        let report = compute(&input, &EngineConfig::default()).unwrap();
        assert_eq!(report.kind(), CalculatorKind::Pss);
        assert_eq!(report.categories()[0].label, "Moderate Stress");
    }

    #[test]
    fn test_compute_surfaces_validation_errors() {
        let input = CalculatorInput::Pss(PssInput { answers: vec![2; 3] });
        let err = compute(&input, &EngineConfig::default()).unwrap_err();
        assert_eq!(err.code(), "VALIDATION_ERROR");
    }

    #[test]
    fn test_report_serializes_with_tag() {
        let input = CalculatorInput::Pss(PssInput { answers: vec![0; 10] });
        let report = compute(&input, &EngineConfig::default()).unwrap();
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["calculator"], "pss");
    }
}
