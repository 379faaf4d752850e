//! Energy expenditure and strength calculators

use serde::Serialize;

use super::{CalculatorKind, Report};
use crate::classification::{classify_wilks, Category, Metric, WilksLevel};
use crate::errors::{CalcError, CalcResult};
use crate::formulas::body::lean_mass_kg;
use crate::formulas::energy::{
    bmr_harris_benedict, bmr_katch_mcardle, bmr_mifflin, bulk_calories, cut_calories, tdee, ActivityLevel,
    BmrMethod,
};
use crate::formulas::strength::{wilks_coefficient, wilks_score};
use crate::formulas::Formula;
use crate::inputs::{BmrInput, Normalize, WilksInput};
use crate::reference::wilks_coefficients;
use crate::results::{FormulaOutput, FormulaResult, ResultFlag};

// ============================================================================
// BMR & TDEE
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BmrReport {
    pub method: BmrMethod,
    pub activity_level: ActivityLevel,
    /// kcal/day at rest
    pub bmr: f64,
    /// kcal/day including activity
    pub tdee: f64,
    pub cut_calories: f64,
    pub bulk_calories: f64,
}

fn method_formula(method: BmrMethod) -> Formula {
    match method {
        BmrMethod::MifflinStJeor => Formula::MifflinStJeor,
        BmrMethod::HarrisBenedict => Formula::HarrisBenedict,
        BmrMethod::KatchMcArdle => Formula::KatchMcArdle,
    }
}

pub fn compute_bmr(input: &BmrInput) -> CalcResult<BmrReport> {
    let input = input.prepare()?;
    let bmr = match input.method {
        BmrMethod::MifflinStJeor => bmr_mifflin(input.weight, input.height, input.age_years, input.sex)?,
        BmrMethod::HarrisBenedict => bmr_harris_benedict(input.weight, input.height, input.age_years, input.sex)?,
        BmrMethod::KatchMcArdle => {
            let body_fat = input
                .body_fat_percent
                .ok_or_else(|| CalcError::invalid("body_fat_percent", "is required for Katch-McArdle"))?;
            bmr_katch_mcardle(lean_mass_kg(input.weight, body_fat))?
        }
    };
    let daily = tdee(bmr, input.activity_level);

    Ok(BmrReport {
        method: input.method,
        activity_level: input.activity_level,
        bmr,
        tdee: daily,
        cut_calories: cut_calories(daily),
        bulk_calories: bulk_calories(daily),
    })
}

impl Report for BmrReport {
    fn formula_result(&self) -> FormulaResult {
        FormulaResult::new(CalculatorKind::Bmr)
            .output(FormulaOutput::new("bmr", self.bmr, method_formula(self.method)).unit("kcal/day").whole())
            .output(FormulaOutput::new("tdee", self.tdee, Formula::ActivityMultiplier).unit("kcal/day").whole())
            .output(FormulaOutput::new("cut", self.cut_calories, Formula::Derived).unit("kcal/day").whole())
            .output(FormulaOutput::new("bulk", self.bulk_calories, Formula::Derived).unit("kcal/day").whole())
            .detail("activity_level", self.activity_level.description())
    }

    fn categories(&self) -> Vec<Category> {
        Vec::new()
    }
}

// ============================================================================
// Wilks
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WilksReport {
    pub score: f64,
    pub coefficient: f64,
    pub level: WilksLevel,
    /// Bodyweight was outside the fitted range and clamped to it
    pub bodyweight_clamped: bool,
}

pub fn compute_wilks(input: &WilksInput) -> CalcResult<WilksReport> {
    let input = input.prepare()?;
    let score = wilks_score(input.total, input.bodyweight, input.sex)?;
    let fitted = wilks_coefficients(input.sex);

    Ok(WilksReport {
        score,
        coefficient: wilks_coefficient(input.bodyweight, input.sex)?,
        level: classify_wilks(score, input.sex)?,
        bodyweight_clamped: !(fitted.min_bodyweight_kg..=fitted.max_bodyweight_kg).contains(&input.bodyweight),
    })
}

impl Report for WilksReport {
    fn formula_result(&self) -> FormulaResult {
        let result = FormulaResult::new(CalculatorKind::Wilks)
            .output(FormulaOutput::new("wilks", self.score, Formula::Wilks))
            .output(FormulaOutput::new("coefficient", self.coefficient, Formula::Wilks).decimals(4));

        if self.bodyweight_clamped {
            result.flag(ResultFlag::InputClamped)
        } else {
            result
        }
    }

    fn categories(&self) -> Vec<Category> {
        vec![Category::of(Metric::Wilks, self.level)]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formulas::BiologicalSex;
    use crate::units::UnitSystem;
    use proptest::prelude::*;

    fn bmr_input(sex: BiologicalSex, age_years: u32, weight: f64, height: f64) -> BmrInput {
        BmrInput {
            unit_system: UnitSystem::Metric,
            sex,
            age_years,
            weight,
            height,
            activity_level: ActivityLevel::Sedentary,
            method: BmrMethod::MifflinStJeor,
            body_fat_percent: None,
        }
    }

    #[test]
    fn test_mifflin_female_scenario() {
        let report = compute_bmr(&bmr_input(BiologicalSex::Female, 30, 65.0, 165.0)).unwrap();
        assert!((report.bmr - 1370.25).abs() < 1e-9);
        assert!((report.tdee - 1644.3).abs() < 1e-9);
        assert_eq!(report.formula_result().outputs[0].formula, Formula::MifflinStJeor);
    }

    #[test]
    fn test_harris_benedict_method() {
        let input = BmrInput {
            method: BmrMethod::HarrisBenedict,
            ..bmr_input(BiologicalSex::Male, 30, 80.0, 180.0)
        };
        let report = compute_bmr(&input).unwrap();
        assert!((report.bmr - 1853.632).abs() < 1e-6);
    }

    #[test]
    fn test_katch_mcardle_uses_lean_mass() {
        let input = BmrInput {
            method: BmrMethod::KatchMcArdle,
            body_fat_percent: Some(20.0),
            ..bmr_input(BiologicalSex::Male, 30, 80.0, 180.0)
        };
        let report = compute_bmr(&input).unwrap();
        // 370 + 21.6 × 64
        assert!((report.bmr - 1752.4).abs() < 1e-9);
        assert!((report.cut_calories - (report.tdee - 500.0)).abs() < 1e-9);
    }

    #[test]
    fn test_katch_mcardle_requires_body_fat() {
        let input = BmrInput {
            method: BmrMethod::KatchMcArdle,
            ..bmr_input(BiologicalSex::Male, 30, 80.0, 180.0)
        };
        assert!(matches!(
            compute_bmr(&input),
            Err(CalcError::InvalidInput { field: "body_fat_percent", .. })
        ));
    }

    #[test]
    fn test_cut_never_below_floor() {
        let report = compute_bmr(&bmr_input(BiologicalSex::Female, 80, 40.0, 150.0)).unwrap();
        assert_eq!(report.cut_calories, 1200.0);
    }

    fn wilks_input(unit_system: UnitSystem, bodyweight: f64, total: f64) -> WilksInput {
        WilksInput {
            unit_system,
            sex: BiologicalSex::Male,
            bodyweight,
            total,
        }
    }

    #[test]
    fn test_wilks_report() {
        let report = compute_wilks(&wilks_input(UnitSystem::Metric, 90.0, 500.0)).unwrap();
        assert!((report.score - 319.2).abs() < 0.1);
        assert_eq!(report.level, WilksLevel::Intermediate);
        assert!(!report.bodyweight_clamped);
        assert!(report.formula_result().flags.is_empty());
    }

    #[test]
    fn test_wilks_heavy_lifter_flagged() {
        let report = compute_wilks(&wilks_input(UnitSystem::Metric, 220.0, 600.0)).unwrap();
        assert!(report.bodyweight_clamped);
        assert_eq!(report.formula_result().flags, vec![ResultFlag::InputClamped]);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Property: Imperial inputs give the same score as their kg equivalents
        #[test]
        fn prop_wilks_unit_symmetry(bodyweight_kg in 50.0f64..150.0, total_kg in 100.0f64..900.0) {
            let lbs = UnitSystem::Imperial.weight_unit();
            let imperial = wilks_input(
                UnitSystem::Imperial,
                lbs.from_kg(bodyweight_kg),
                lbs.from_kg(total_kg),
            );
            let metric = wilks_input(UnitSystem::Metric, bodyweight_kg, total_kg);
            let from_imperial = compute_wilks(&imperial).unwrap().score;
            let from_metric = compute_wilks(&metric).unwrap().score;
            prop_assert!((from_imperial - from_metric).abs() < 0.01);
        }
    }
}
