//! Body composition calculators

use serde::Serialize;

use super::{CalculatorKind, Report};
use crate::classification::{
    classify_absi_z, classify_bmi, classify_body_fat, classify_whr, classify_whtr, AbsiRisk, BmiCategory,
    BodyFatCategory, Category, Metric, WhrRisk, WhtrCategory,
};
use crate::config::EngineConfig;
use crate::errors::CalcResult;
use crate::formulas::body::{
    absi_z_score, body_shape, calculate_absi, calculate_bmi, deurenberg_body_fat, draw_length_in, fat_mass_kg,
    healthy_weight_range_kg, ideal_body_weight, lean_body_mass, lean_mass_kg, navy_body_fat, normal_percentile,
    relative_fat_mass, waist_to_height, waist_to_hip, weight_at_body_fat, BodyShape, IbwFormula, LbmFormula,
    IBW_BASE_HEIGHT_IN, LBM_ADULT_MIN_AGE,
};
use crate::formulas::Formula;
use crate::inputs::{
    AbsiInput, BmiInput, BodyFatInput, BodyShapeInput, DrawLengthInput, IdealWeightInput, LeanBodyMassInput,
    Normalize, RfmInput,
};
use crate::interpretation::{interpret_absi_bmi, interpret_body_fat_bmi, Interpretation};
use crate::results::{FormulaOutput, FormulaResult, ResultFlag};
use crate::units::{FeetInchesHeight, CM_PER_INCH};

// ============================================================================
// BMI
// ============================================================================

/// Body fat percentage with its category
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BodyFatEstimate {
    pub percent: f64,
    pub category: BodyFatCategory,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BmiReport {
    pub bmi: f64,
    pub category: BmiCategory,
    /// Weights giving BMI 18.5 and 25 at this height
    pub healthy_weight_kg: (f64, f64),
    /// Signed distance to the nearest edge of the healthy range, 0 inside it
    pub distance_from_healthy_kg: f64,
    /// Deurenberg estimate, when sex and age are known
    pub estimated_body_fat: Option<BodyFatEstimate>,
}

pub fn compute_bmi(input: &BmiInput) -> CalcResult<BmiReport> {
    let input = input.prepare()?;
    let bmi = calculate_bmi(input.weight, input.height)?;
    let (low, high) = healthy_weight_range_kg(input.height)?;

    let distance_from_healthy_kg = if input.weight < low {
        input.weight - low
    } else if input.weight > high {
        input.weight - high
    } else {
        0.0
    };

    let estimated_body_fat = match (input.sex, input.age_years) {
        (Some(sex), Some(age)) => {
            let percent = deurenberg_body_fat(bmi, age, sex)?;
            Some(BodyFatEstimate {
                percent,
                category: classify_body_fat(percent, sex)?,
            })
        }
        _ => None,
    };

    Ok(BmiReport {
        bmi,
        category: classify_bmi(bmi)?,
        healthy_weight_kg: (low, high),
        distance_from_healthy_kg,
        estimated_body_fat,
    })
}

impl Report for BmiReport {
    fn formula_result(&self) -> FormulaResult {
        let (low, high) = self.healthy_weight_kg;
        let result = FormulaResult::new(CalculatorKind::Bmi)
            .output(FormulaOutput::new("bmi", self.bmi, Formula::Bmi).unit("kg/m²"))
            .output(FormulaOutput::new("healthy_weight_min", low, Formula::Derived).unit("kg"))
            .output(FormulaOutput::new("healthy_weight_max", high, Formula::Derived).unit("kg"))
            .output(FormulaOutput::new("distance_from_healthy", self.distance_from_healthy_kg, Formula::Derived).unit("kg"));

        match self.estimated_body_fat {
            Some(estimate) => result.output(
                FormulaOutput::new("estimated_body_fat", estimate.percent, Formula::DeurenbergBodyFat).unit("%"),
            ),
            None => result,
        }
    }

    fn categories(&self) -> Vec<Category> {
        let mut categories = vec![Category::of(Metric::Bmi, self.category)];
        if let Some(estimate) = self.estimated_body_fat {
            categories.push(Category::of(Metric::BodyFat, estimate.category));
        }
        categories
    }
}

// ============================================================================
// ABSI
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AbsiReport {
    pub absi: f64,
    pub z_score: f64,
    /// Population percentile of the z-score, 0-100
    pub percentile: f64,
    pub risk: AbsiRisk,
    pub bmi: f64,
    pub bmi_category: BmiCategory,
    pub waist_to_height: f64,
    pub whtr_category: WhtrCategory,
    pub waist_to_hip: Option<f64>,
    pub whr_risk: Option<WhrRisk>,
    pub interpretation: Interpretation,
}

pub fn compute_absi(input: &AbsiInput) -> CalcResult<AbsiReport> {
    let input = input.prepare()?;
    let absi = calculate_absi(input.waist, input.weight, input.height)?;
    let z_score = absi_z_score(absi, input.sex, input.age_years)?;
    let risk = classify_absi_z(z_score)?;
    let bmi = calculate_bmi(input.weight, input.height)?;
    let bmi_category = classify_bmi(bmi)?;
    let whtr = waist_to_height(input.waist, input.height)?;

    let (waist_to_hip, whr_risk) = match input.hip {
        Some(hip) => {
            let ratio = waist_to_hip(input.waist, hip)?;
            (Some(ratio), Some(classify_whr(ratio, input.sex)?))
        }
        None => (None, None),
    };

    Ok(AbsiReport {
        absi,
        z_score,
        percentile: normal_percentile(z_score),
        risk,
        bmi,
        bmi_category,
        waist_to_height: whtr,
        whtr_category: classify_whtr(whtr)?,
        waist_to_hip,
        whr_risk,
        interpretation: interpret_absi_bmi(bmi_category, risk),
    })
}

impl Report for AbsiReport {
    fn formula_result(&self) -> FormulaResult {
        let result = FormulaResult::new(CalculatorKind::Absi)
            .output(FormulaOutput::new("absi", self.absi, Formula::Absi).decimals(4))
            .output(FormulaOutput::new("z_score", self.z_score, Formula::AbsiZScore).decimals(2))
            .output(FormulaOutput::new("percentile", self.percentile, Formula::AbsiZScore).unit("%"))
            .output(FormulaOutput::new("bmi", self.bmi, Formula::Bmi).unit("kg/m²"))
            .output(FormulaOutput::new("waist_to_height", self.waist_to_height, Formula::WaistToHeight).decimals(2));

        match self.waist_to_hip {
            Some(ratio) => result.output(FormulaOutput::new("waist_to_hip", ratio, Formula::WaistToHip).decimals(2)),
            None => result,
        }
    }

    fn categories(&self) -> Vec<Category> {
        let mut categories = vec![
            Category::of(Metric::AbsiZScore, self.risk),
            Category::of(Metric::Bmi, self.bmi_category),
            Category::of(Metric::WaistToHeight, self.whtr_category),
        ];
        if let Some(risk) = self.whr_risk {
            categories.push(Category::of(Metric::WaistToHip, risk));
        }
        categories
    }
}

// ============================================================================
// Body fat (U.S. Navy)
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BodyFatReport {
    pub body_fat_percent: f64,
    pub category: BodyFatCategory,
    pub fat_mass_kg: f64,
    pub lean_mass_kg: f64,
    pub target_percent: f64,
    /// Weight at which the current lean mass sits at `target_percent`
    pub weight_at_target_kg: f64,
    /// Negative when weight must be lost
    pub weight_change_to_target_kg: f64,
    pub bmi: f64,
    pub bmi_category: BmiCategory,
    /// Deurenberg estimate for comparison, when age is known
    pub bmi_estimate: Option<f64>,
    pub interpretation: Option<Interpretation>,
}

pub fn compute_body_fat(input: &BodyFatInput, config: &EngineConfig) -> CalcResult<BodyFatReport> {
    let input = input.prepare()?;
    let body_fat_percent = navy_body_fat(input.sex, input.height, input.neck, input.waist, input.hip)?;
    let category = classify_body_fat(body_fat_percent, input.sex)?;

    let lean = lean_mass_kg(input.weight, body_fat_percent);
    let target_percent = input
        .target_percent
        .unwrap_or_else(|| config.body_fat.target_percent(input.sex));
    let weight_at_target_kg = weight_at_body_fat(lean, target_percent)?;

    let bmi = calculate_bmi(input.weight, input.height)?;
    let bmi_category = classify_bmi(bmi)?;
    let bmi_estimate = input
        .age_years
        .map(|age| deurenberg_body_fat(bmi, age, input.sex))
        .transpose()?;

    Ok(BodyFatReport {
        body_fat_percent,
        category,
        fat_mass_kg: fat_mass_kg(input.weight, body_fat_percent),
        lean_mass_kg: lean,
        target_percent,
        weight_at_target_kg,
        weight_change_to_target_kg: weight_at_target_kg - input.weight,
        bmi,
        bmi_category,
        bmi_estimate,
        interpretation: interpret_body_fat_bmi(bmi_category, category),
    })
}

impl Report for BodyFatReport {
    fn formula_result(&self) -> FormulaResult {
        let result = FormulaResult::new(CalculatorKind::BodyFat)
            .output(FormulaOutput::new("body_fat", self.body_fat_percent, Formula::NavyBodyFat).unit("%"))
            .output(FormulaOutput::new("fat_mass", self.fat_mass_kg, Formula::Derived).unit("kg"))
            .output(FormulaOutput::new("lean_mass", self.lean_mass_kg, Formula::Derived).unit("kg"))
            .output(FormulaOutput::new("target_body_fat", self.target_percent, Formula::Derived).unit("%"))
            .output(FormulaOutput::new("weight_at_target", self.weight_at_target_kg, Formula::Derived).unit("kg"))
            .output(FormulaOutput::new("weight_change_to_target", self.weight_change_to_target_kg, Formula::Derived).unit("kg"))
            .output(FormulaOutput::new("bmi", self.bmi, Formula::Bmi).unit("kg/m²"));

        match self.bmi_estimate {
            Some(estimate) => result
                .output(FormulaOutput::new("bmi_body_fat", estimate, Formula::DeurenbergBodyFat).unit("%")),
            None => result,
        }
    }

    fn categories(&self) -> Vec<Category> {
        vec![
            Category::of(Metric::BodyFat, self.category),
            Category::of(Metric::Bmi, self.bmi_category),
        ]
    }
}

// ============================================================================
// Body shape
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BodyShapeReport {
    pub shape: BodyShape,
    pub waist_to_hip: f64,
}

pub fn compute_body_shape(input: &BodyShapeInput) -> CalcResult<BodyShapeReport> {
    let input = input.prepare()?;
    Ok(BodyShapeReport {
        shape: body_shape(input.bust, input.waist, input.high_hip, input.hip)?,
        waist_to_hip: waist_to_hip(input.waist, input.hip)?,
    })
}

impl Report for BodyShapeReport {
    fn formula_result(&self) -> FormulaResult {
        FormulaResult::new(CalculatorKind::BodyShape)
            .output(FormulaOutput::new("waist_to_hip", self.waist_to_hip, Formula::WaistToHip).decimals(2))
            .detail("shape", self.shape.description())
    }

    // Sex is not collected, so the ratio stays unclassified
    fn categories(&self) -> Vec<Category> {
        Vec::new()
    }
}

// ============================================================================
// Relative fat mass
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RfmReport {
    pub rfm: f64,
    pub category: BodyFatCategory,
}

pub fn compute_rfm(input: &RfmInput) -> CalcResult<RfmReport> {
    let input = input.prepare()?;
    let rfm = relative_fat_mass(input.sex, input.height, input.waist)?;
    Ok(RfmReport {
        rfm,
        category: classify_body_fat(rfm, input.sex)?,
    })
}

impl Report for RfmReport {
    fn formula_result(&self) -> FormulaResult {
        FormulaResult::new(CalculatorKind::Rfm)
            .output(FormulaOutput::new("rfm", self.rfm, Formula::RelativeFatMass).unit("%"))
    }

    fn categories(&self) -> Vec<Category> {
        vec![Category::of(Metric::BodyFat, self.category)]
    }
}

// ============================================================================
// Lean body mass
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LeanMassEstimate {
    pub formula: LbmFormula,
    pub lean_mass_kg: f64,
    /// Implied body fat percentage
    pub body_fat_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeanBodyMassReport {
    pub estimates: Vec<LeanMassEstimate>,
    /// Adult formulas applied below their fitted age
    pub lower_confidence: bool,
}

fn lbm_formula_tag(formula: LbmFormula) -> (&'static str, Formula) {
    match formula {
        LbmFormula::Boer => ("boer", Formula::BoerLbm),
        LbmFormula::James => ("james", Formula::JamesLbm),
        LbmFormula::Hume => ("hume", Formula::HumeLbm),
        LbmFormula::Peters => ("peters", Formula::PetersLbm),
    }
}

fn body_fat_output(formula: LbmFormula) -> &'static str {
    match formula {
        LbmFormula::Boer => "body_fat_boer",
        LbmFormula::James => "body_fat_james",
        LbmFormula::Hume => "body_fat_hume",
        LbmFormula::Peters => "body_fat_peters",
    }
}

/// Children get the pediatric estimate unless a formula is named. Any
/// estimate for a child is flagged lower confidence.
pub fn compute_lean_body_mass(input: &LeanBodyMassInput) -> CalcResult<LeanBodyMassReport> {
    let input = input.prepare()?;
    let child = input.age_years < LBM_ADULT_MIN_AGE;

    let formulas: Vec<LbmFormula> = match (input.formula, child) {
        (Some(formula), _) => vec![formula],
        (None, true) => vec![LbmFormula::Peters],
        (None, false) => LbmFormula::ADULT.to_vec(),
    };

    let estimates = formulas
        .into_iter()
        .map(|formula| {
            let lean = lean_body_mass(formula, input.sex, input.weight, input.height)?;
            Ok(LeanMassEstimate {
                formula,
                lean_mass_kg: lean,
                body_fat_percent: 100.0 * (1.0 - lean / input.weight),
            })
        })
        .collect::<CalcResult<Vec<_>>>()?;

    Ok(LeanBodyMassReport {
        estimates,
        lower_confidence: child,
    })
}

impl Report for LeanBodyMassReport {
    fn formula_result(&self) -> FormulaResult {
        let result = self
            .estimates
            .iter()
            .fold(FormulaResult::new(CalculatorKind::LeanBodyMass), |result, estimate| {
                let (name, formula) = lbm_formula_tag(estimate.formula);
                result
                    .output(FormulaOutput::new(name, estimate.lean_mass_kg, formula).unit("kg"))
                    .output(
                        FormulaOutput::new(body_fat_output(estimate.formula), estimate.body_fat_percent, formula)
                            .unit("%"),
                    )
            });

        if self.lower_confidence {
            result.flag(ResultFlag::LowerConfidence)
        } else {
            result
        }
    }

    fn categories(&self) -> Vec<Category> {
        Vec::new()
    }
}

// ============================================================================
// Ideal body weight
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IdealWeightEstimate {
    pub formula: IbwFormula,
    pub weight_kg: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IdealWeightReport {
    pub estimates: Vec<IdealWeightEstimate>,
    pub average_kg: f64,
    /// Weights giving BMI 18.5 and 25 at this height
    pub healthy_weight_kg: (f64, f64),
    pub height_cm: f64,
    /// Height was under 5 feet and counted as 5 feet
    pub height_clamped: bool,
}

fn ibw_formula_tag(formula: IbwFormula) -> (&'static str, Formula) {
    match formula {
        IbwFormula::Devine => ("devine", Formula::DevineIbw),
        IbwFormula::Robinson => ("robinson", Formula::RobinsonIbw),
        IbwFormula::Miller => ("miller", Formula::MillerIbw),
        IbwFormula::Hamwi => ("hamwi", Formula::HamwiIbw),
    }
}

pub fn compute_ideal_weight(input: &IdealWeightInput) -> CalcResult<IdealWeightReport> {
    let input = input.prepare()?;
    let estimates = IbwFormula::ALL
        .iter()
        .map(|&formula| {
            Ok(IdealWeightEstimate {
                formula,
                weight_kg: ideal_body_weight(formula, input.sex, input.height)?,
            })
        })
        .collect::<CalcResult<Vec<_>>>()?;

    let average_kg = estimates.iter().map(|estimate| estimate.weight_kg).sum::<f64>() / estimates.len() as f64;

    Ok(IdealWeightReport {
        estimates,
        average_kg,
        healthy_weight_kg: healthy_weight_range_kg(input.height)?,
        height_cm: input.height,
        height_clamped: input.height / CM_PER_INCH < IBW_BASE_HEIGHT_IN,
    })
}

impl Report for IdealWeightReport {
    fn formula_result(&self) -> FormulaResult {
        let (low, high) = self.healthy_weight_kg;
        let result = self
            .estimates
            .iter()
            .fold(FormulaResult::new(CalculatorKind::IdealWeight), |result, estimate| {
                let (name, formula) = ibw_formula_tag(estimate.formula);
                result.output(FormulaOutput::new(name, estimate.weight_kg, formula).unit("kg"))
            })
            .output(FormulaOutput::new("average", self.average_kg, Formula::Derived).unit("kg"))
            .output(FormulaOutput::new("healthy_weight_min", low, Formula::Derived).unit("kg"))
            .output(FormulaOutput::new("healthy_weight_max", high, Formula::Derived).unit("kg"))
            .detail("height", FeetInchesHeight::from_cm(self.height_cm).to_string());

        if self.height_clamped {
            result.flag(ResultFlag::InputClamped)
        } else {
            result
        }
    }

    fn categories(&self) -> Vec<Category> {
        Vec::new()
    }
}

// ============================================================================
// Archery draw length
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DrawLengthReport {
    pub wingspan_in: f64,
    pub draw_length_in: f64,
    pub draw_length_cm: f64,
}

pub fn compute_draw_length(input: &DrawLengthInput) -> CalcResult<DrawLengthReport> {
    let input = input.prepare()?;
    let draw = draw_length_in(input.wingspan)?;
    Ok(DrawLengthReport {
        wingspan_in: input.wingspan / CM_PER_INCH,
        draw_length_in: draw,
        draw_length_cm: draw * CM_PER_INCH,
    })
}

impl Report for DrawLengthReport {
    fn formula_result(&self) -> FormulaResult {
        FormulaResult::new(CalculatorKind::DrawLength)
            .output(FormulaOutput::new("draw_length", self.draw_length_in, Formula::DrawLength).unit("in"))
            .output(FormulaOutput::new("draw_length_cm", self.draw_length_cm, Formula::DrawLength).unit("cm"))
            .output(FormulaOutput::new("wingspan", self.wingspan_in, Formula::Derived).unit("in"))
    }

    fn categories(&self) -> Vec<Category> {
        Vec::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::CalcError;
    use crate::formulas::BiologicalSex;
    use crate::units::UnitSystem;

    fn bmi_input(weight: f64, height: f64) -> BmiInput {
        BmiInput {
            unit_system: UnitSystem::Metric,
            weight,
            height,
            age_years: None,
            sex: None,
        }
    }

    fn navy_male(weight: f64, height: f64, neck: f64, waist: f64) -> BodyFatInput {
        BodyFatInput {
            unit_system: UnitSystem::Metric,
            sex: BiologicalSex::Male,
            age_years: None,
            weight,
            height,
            neck,
            waist,
            hip: None,
            target_percent: None,
        }
    }

    // =========================================================================
    // BMI
    // =========================================================================

    #[test]
    fn test_bmi_report() {
        let report = compute_bmi(&bmi_input(70.0, 175.0)).unwrap();
        assert!((report.bmi - 22.86).abs() < 0.01);
        assert_eq!(report.category, BmiCategory::Normal);
        assert_eq!(report.distance_from_healthy_kg, 0.0);
        assert!(report.estimated_body_fat.is_none());
        assert_eq!(report.categories().len(), 1);
    }

    #[test]
    fn test_bmi_distance_above_range() {
        let report = compute_bmi(&bmi_input(90.0, 175.0)).unwrap();
        // Healthy max at 175 cm is 76.5625 kg
        assert!((report.distance_from_healthy_kg - 13.4375).abs() < 1e-9);
        assert_eq!(report.category, BmiCategory::Overweight);
    }

    #[test]
    fn test_bmi_with_sex_and_age_adds_body_fat() {
        let input = BmiInput {
            age_years: Some(30),
            sex: Some(BiologicalSex::Male),
            ..bmi_input(70.0, 175.0)
        };
        let report = compute_bmi(&input).unwrap();
        let estimate = report.estimated_body_fat.unwrap();
        // 1.2 × 22.857 + 0.23 × 30 - 10.8 - 5.4
        assert!((estimate.percent - 18.13).abs() < 0.01);
        assert_eq!(estimate.category, BodyFatCategory::Average);
        assert_eq!(report.formula_result().get("estimated_body_fat"), Some(estimate.percent));
    }

    #[test]
    fn test_bmi_imperial_matches_metric() {
        let imperial = BmiInput {
            unit_system: UnitSystem::Imperial,
            ..bmi_input(154.324, 70.0)
        };
        let metric = compute_bmi(&bmi_input(70.0, 177.8)).unwrap();
        let imperial = compute_bmi(&imperial).unwrap();
        assert!((imperial.bmi - metric.bmi).abs() < 0.01);
    }

    // =========================================================================
    // ABSI
    // =========================================================================

    fn absi_input(waist: f64) -> AbsiInput {
        AbsiInput {
            unit_system: UnitSystem::Metric,
            sex: BiologicalSex::Male,
            age_years: 40,
            weight: 70.0,
            height: 175.0,
            waist,
            hip: None,
        }
    }

    #[test]
    fn test_absi_normal_weight_large_waist() {
        let report = compute_absi(&absi_input(95.0)).unwrap();
        assert!((report.absi - 0.0892).abs() < 0.0005, "absi = {}", report.absi);
        assert_eq!(report.bmi_category, BmiCategory::Normal);
        assert!(matches!(report.risk, AbsiRisk::High | AbsiRisk::VeryHigh));
        assert!(report.interpretation.title.contains("despite normal weight"));
        assert!(report.percentile > 80.0);
    }

    #[test]
    fn test_absi_adds_waist_to_hip_when_given() {
        let input = AbsiInput {
            hip: Some(100.0),
            ..absi_input(80.0)
        };
        let report = compute_absi(&input).unwrap();
        assert_eq!(report.waist_to_hip, Some(0.8));
        assert_eq!(report.whr_risk, Some(WhrRisk::Low));
        assert_eq!(report.categories().len(), 4);
        assert!(report.formula_result().get("waist_to_hip").is_some());
    }

    #[test]
    fn test_absi_without_hip() {
        let report = compute_absi(&absi_input(80.0)).unwrap();
        assert_eq!(report.whr_risk, None);
        assert_eq!(report.categories().len(), 3);
        assert_eq!(report.whtr_category, WhtrCategory::Healthy);
    }

    // =========================================================================
    // Body fat
    // =========================================================================

    #[test]
    fn test_navy_report_derives_masses() {
        let report = compute_body_fat(&navy_male(80.0, 180.0, 38.0, 85.0), &EngineConfig::default()).unwrap();
        assert!((report.body_fat_percent - 16.11).abs() < 0.01);
        assert_eq!(report.category, BodyFatCategory::Fitness);
        assert!((report.fat_mass_kg + report.lean_mass_kg - 80.0).abs() < 1e-9);
        assert_eq!(report.target_percent, 15.0);
        assert!((report.weight_at_target_kg - 78.96).abs() < 0.01);
        assert!(report.weight_change_to_target_kg < 0.0);
        assert!(report.interpretation.is_none());
    }

    #[test]
    fn test_navy_target_from_input() {
        let input = BodyFatInput {
            target_percent: Some(20.0),
            ..navy_male(80.0, 180.0, 38.0, 85.0)
        };
        let report = compute_body_fat(&input, &EngineConfig::default()).unwrap();
        assert_eq!(report.target_percent, 20.0);
        assert!((report.weight_at_target_kg - report.lean_mass_kg / 0.8).abs() < 1e-9);
    }

    #[test]
    fn test_normal_weight_obesity_flagged() {
        // BMI 22.9 with ~29% body fat
        let report = compute_body_fat(&navy_male(70.0, 175.0, 35.0, 100.0), &EngineConfig::default()).unwrap();
        assert_eq!(report.bmi_category, BmiCategory::Normal);
        assert_eq!(report.category, BodyFatCategory::Obese);
        assert_eq!(report.interpretation.map(|note| note.title), Some("Normal-weight obesity"));
    }

    #[test]
    fn test_navy_waist_below_neck_is_domain_error() {
        let result = compute_body_fat(&navy_male(80.0, 180.0, 45.0, 40.0), &EngineConfig::default());
        assert!(matches!(result, Err(CalcError::Domain { .. })));
    }

    // =========================================================================
    // Other body calculators
    // =========================================================================

    #[test]
    fn test_rfm_report() {
        let input = RfmInput {
            unit_system: UnitSystem::Metric,
            sex: BiologicalSex::Female,
            height: 170.0,
            waist: 72.0,
        };
        let report = compute_rfm(&input).unwrap();
        assert!((report.rfm - 28.78).abs() < 0.01);
        assert_eq!(report.category, BodyFatCategory::Average);
        assert_eq!(report.categories()[0].metric, Metric::BodyFat);
    }

    #[test]
    fn test_body_shape_report_detail() {
        let input = BodyShapeInput {
            unit_system: UnitSystem::Imperial,
            bust: 36.0,
            waist: 26.0,
            high_hip: 33.0,
            hip: 36.0,
        };
        let report = compute_body_shape(&input).unwrap();
        assert_eq!(report.shape, BodyShape::Hourglass);
        assert_eq!(report.formula_result().details[0].value, "Hourglass");
    }

    fn lbm_input(age_years: u32, weight: f64, height: f64) -> LeanBodyMassInput {
        LeanBodyMassInput {
            unit_system: UnitSystem::Metric,
            sex: BiologicalSex::Male,
            age_years,
            weight,
            height,
            formula: None,
        }
    }

    #[test]
    fn test_lean_body_mass_adult_uses_all_adult_formulas() {
        let report = compute_lean_body_mass(&lbm_input(35, 80.0, 180.0)).unwrap();
        assert_eq!(report.estimates.len(), 3);
        assert!(!report.lower_confidence);
        let result = report.formula_result();
        assert!((result.get("boer").unwrap() - 61.42).abs() < 0.05);
        assert!(result.flags.is_empty());
    }

    #[test]
    fn test_lean_body_mass_child_uses_peters_and_flags() {
        let report = compute_lean_body_mass(&lbm_input(10, 30.0, 135.0)).unwrap();
        assert_eq!(report.estimates.len(), 1);
        assert_eq!(report.estimates[0].formula, LbmFormula::Peters);
        assert!((report.estimates[0].lean_mass_kg - 25.66).abs() < 0.01);
        assert!(report.lower_confidence);
        assert_eq!(report.formula_result().flags, vec![ResultFlag::LowerConfidence]);
    }

    #[test]
    fn test_lean_body_mass_named_formula() {
        let input = LeanBodyMassInput {
            formula: Some(LbmFormula::Hume),
            ..lbm_input(35, 80.0, 180.0)
        };
        let report = compute_lean_body_mass(&input).unwrap();
        assert_eq!(report.estimates.len(), 1);
        let result = report.formula_result();
        let lean = result.get("hume").unwrap();
        let body_fat = result.get("body_fat_hume").unwrap();
        assert!((body_fat - 100.0 * (1.0 - lean / 80.0)).abs() < 1e-9);
    }

    #[test]
    fn test_ideal_weight_report() {
        let input = IdealWeightInput {
            unit_system: UnitSystem::Metric,
            sex: BiologicalSex::Female,
            height: 170.0,
        };
        let report = compute_ideal_weight(&input).unwrap();
        assert_eq!(report.estimates.len(), 4);
        assert!((report.estimates[0].weight_kg - 61.44).abs() < 0.01);
        assert!((report.average_kg - 61.37).abs() < 0.01);
        assert!((report.healthy_weight_kg.0 - 53.465).abs() < 1e-9);
        assert!(!report.height_clamped);
        // 170 cm is 66.9 in
        assert_eq!(report.formula_result().details[0].value, "5'7\"");
    }

    #[test]
    fn test_ideal_weight_short_height_clamped() {
        let input = IdealWeightInput {
            unit_system: UnitSystem::Metric,
            sex: BiologicalSex::Female,
            height: 140.0,
        };
        let report = compute_ideal_weight(&input).unwrap();
        assert!(report.height_clamped);
        assert_eq!(report.formula_result().flags, vec![ResultFlag::InputClamped]);
    }

    #[test]
    fn test_draw_length_from_imperial_wingspan() {
        let input = DrawLengthInput {
            unit_system: UnitSystem::Imperial,
            wingspan: 70.0,
        };
        let report = compute_draw_length(&input).unwrap();
        assert!((report.draw_length_in - 28.0).abs() < 1e-9);
        assert!((report.draw_length_cm - 71.12).abs() < 1e-9);
    }
}
