//! Anthropometric formulas: mass index, body shape and body composition
//!
//! All lengths are centimeters and all masses kilograms. Formulas that are
//! published in meters or inches convert internally.

use serde::{Deserialize, Serialize};

use super::BiologicalSex;
use crate::errors::{ensure_finite, ensure_positive, CalcError, CalcResult};
use crate::reference;
use crate::units::CM_PER_INCH;

/// Height in inches at which the ideal-weight formulas start counting
pub const IBW_BASE_HEIGHT_IN: f64 = 60.0;

/// Wingspan-to-draw-length divisor used by archery shops
pub const DRAW_LENGTH_DIVISOR: f64 = 2.5;

// ============================================================================
// Mass and shape indices
// ============================================================================

/// Calculate BMI from weight and height
///
/// Formula: BMI = weight(kg) / height(m)²
pub fn calculate_bmi(weight_kg: f64, height_cm: f64) -> CalcResult<f64> {
    ensure_positive("weight_kg", weight_kg)?;
    ensure_positive("height_cm", height_cm)?;
    let height_m = height_cm / 100.0;
    ensure_finite("bmi", weight_kg / (height_m * height_m))
}

/// Calculate healthy weight range for a given height
///
/// Based on BMI 18.5-25 (normal range)
pub fn healthy_weight_range_kg(height_cm: f64) -> CalcResult<(f64, f64)> {
    ensure_positive("height_cm", height_cm)?;
    let height_m = height_cm / 100.0;
    let height_m_sq = height_m * height_m;
    Ok((18.5 * height_m_sq, 25.0 * height_m_sq))
}

/// A Body Shape Index
///
/// Formula: ABSI = waist(m) / (BMI^(2/3) × height(m)^(1/2))
pub fn calculate_absi(waist_cm: f64, weight_kg: f64, height_cm: f64) -> CalcResult<f64> {
    ensure_positive("waist_cm", waist_cm)?;
    let bmi = calculate_bmi(weight_kg, height_cm)?;
    let waist_m = waist_cm / 100.0;
    let height_m = height_cm / 100.0;
    ensure_finite("absi", waist_m / (bmi.powf(2.0 / 3.0) * height_m.sqrt()))
}

/// Standardize an ABSI value against the age- and sex-matched population
pub fn absi_z_score(absi: f64, sex: BiologicalSex, age_years: u32) -> CalcResult<f64> {
    ensure_positive("absi", absi)?;
    let reference = reference::absi_reference(sex, age_years);
    ensure_finite("absi_z", (absi - reference.mean) / reference.sd)
}

/// Percentile (0-100) of a standard normal z-score
pub fn normal_percentile(z: f64) -> f64 {
    50.0 * (1.0 + erf(z / std::f64::consts::SQRT_2))
}

/// Abramowitz-Stegun 7.1.26, absolute error below 1.5e-7
fn erf(x: f64) -> f64 {
    let sign = if x < 0.0 { -1.0 } else { 1.0 };
    let x = x.abs();
    let t = 1.0 / (1.0 + 0.3275911 * x);
    let poly = t
        * (0.254829592
            + t * (-0.284496736 + t * (1.421413741 + t * (-1.453152027 + t * 1.061405429))));
    sign * (1.0 - poly * (-x * x).exp())
}

/// Waist-to-height ratio
pub fn waist_to_height(waist_cm: f64, height_cm: f64) -> CalcResult<f64> {
    ensure_positive("waist_cm", waist_cm)?;
    ensure_positive("height_cm", height_cm)?;
    ensure_finite("whtr", waist_cm / height_cm)
}

/// Waist-to-hip ratio; both girths in the same unit
pub fn waist_to_hip(waist_cm: f64, hip_cm: f64) -> CalcResult<f64> {
    ensure_positive("waist_cm", waist_cm)?;
    ensure_positive("hip_cm", hip_cm)?;
    ensure_finite("whr", waist_cm / hip_cm)
}

// ============================================================================
// Body fat
// ============================================================================

/// U.S. Navy circumference body fat percentage
///
/// Men: 495 / (1.0324 - 0.19077 × log10(waist - neck) + 0.15456 × log10(height)) - 450
/// Women: 495 / (1.29579 - 0.35004 × log10(waist + hip - neck) + 0.221 × log10(height)) - 450
///
/// Women must supply a hip girth. The log argument must be positive and
/// the result must land in (0, 100); anything else is a domain error.
pub fn navy_body_fat(
    sex: BiologicalSex,
    height_cm: f64,
    neck_cm: f64,
    waist_cm: f64,
    hip_cm: Option<f64>,
) -> CalcResult<f64> {
    ensure_positive("height_cm", height_cm)?;
    ensure_positive("neck_cm", neck_cm)?;
    ensure_positive("waist_cm", waist_cm)?;

    let denominator = match sex {
        BiologicalSex::Male => {
            let girth = waist_cm - neck_cm;
            if girth <= 0.0 {
                return Err(CalcError::domain(
                    "U.S. Navy body fat",
                    "waist must be larger than neck",
                ));
            }
            1.0324 - 0.19077 * girth.log10() + 0.15456 * height_cm.log10()
        }
        BiologicalSex::Female => {
            let hip_cm = hip_cm.ok_or_else(|| CalcError::invalid("hip_cm", "is required for women"))?;
            ensure_positive("hip_cm", hip_cm)?;
            let girth = waist_cm + hip_cm - neck_cm;
            if girth <= 0.0 {
                return Err(CalcError::domain(
                    "U.S. Navy body fat",
                    "waist plus hip must be larger than neck",
                ));
            }
            1.29579 - 0.35004 * girth.log10() + 0.221 * height_cm.log10()
        }
    };

    if denominator <= 0.0 {
        return Err(CalcError::domain("U.S. Navy body fat", "density term is not positive"));
    }

    let body_fat = ensure_finite("navy_body_fat", 495.0 / denominator - 450.0)?;
    if body_fat <= 0.0 || body_fat >= 100.0 {
        return Err(CalcError::domain(
            "U.S. Navy body fat",
            format!("result {body_fat:.1}% is outside the physiological range"),
        ));
    }
    Ok(body_fat)
}

/// Estimate body fat percentage from BMI (rough estimate)
///
/// Formula: BF% = 1.20 × BMI + 0.23 × Age - 10.8 × sex - 5.4
/// where sex = 1 for male, 0 for female
pub fn deurenberg_body_fat(bmi: f64, age_years: u32, sex: BiologicalSex) -> CalcResult<f64> {
    ensure_positive("bmi", bmi)?;
    let sex_factor = match sex {
        BiologicalSex::Male => 1.0,
        BiologicalSex::Female => 0.0,
    };
    let bf = 1.20 * bmi + 0.23 * age_years as f64 - 10.8 * sex_factor - 5.4;
    Ok(bf.clamp(3.0, 60.0))
}

/// Relative fat mass
///
/// Men: 64 - 20 × (height / waist); Women: 76 - 20 × (height / waist)
pub fn relative_fat_mass(sex: BiologicalSex, height_cm: f64, waist_cm: f64) -> CalcResult<f64> {
    ensure_positive("height_cm", height_cm)?;
    ensure_positive("waist_cm", waist_cm)?;
    let intercept = match sex {
        BiologicalSex::Male => 64.0,
        BiologicalSex::Female => 76.0,
    };
    ensure_finite("rfm", intercept - 20.0 * (height_cm / waist_cm))
}

/// Fat mass in kg for a body weight and body fat percentage
pub fn fat_mass_kg(weight_kg: f64, body_fat_percent: f64) -> f64 {
    weight_kg * body_fat_percent / 100.0
}

/// Lean mass in kg for a body weight and body fat percentage
pub fn lean_mass_kg(weight_kg: f64, body_fat_percent: f64) -> f64 {
    weight_kg * (1.0 - body_fat_percent / 100.0)
}

/// Body weight at which the current lean mass would sit at `target_percent` body fat
pub fn weight_at_body_fat(lean_mass_kg: f64, target_percent: f64) -> CalcResult<f64> {
    ensure_positive("lean_mass_kg", lean_mass_kg)?;
    if !(0.0..100.0).contains(&target_percent) {
        return Err(CalcError::invalid("target_percent", "must be in [0, 100)"));
    }
    ensure_finite("weight_at_body_fat", lean_mass_kg / (1.0 - target_percent / 100.0))
}

// ============================================================================
// Lean body mass
// ============================================================================

/// Lean body mass estimation formulas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LbmFormula {
    Boer,
    James,
    Hume,
    /// Pediatric estimate
    Peters,
}

/// Youngest age the adult lean body mass formulas apply to
pub const LBM_ADULT_MIN_AGE: u32 = 15;

impl LbmFormula {
    /// Adult formulas, in display order
    pub const ADULT: [LbmFormula; 3] = [LbmFormula::Boer, LbmFormula::James, LbmFormula::Hume];
}

/// Lean body mass in kg
pub fn lean_body_mass(
    formula: LbmFormula,
    sex: BiologicalSex,
    weight_kg: f64,
    height_cm: f64,
) -> CalcResult<f64> {
    ensure_positive("weight_kg", weight_kg)?;
    ensure_positive("height_cm", height_cm)?;
    let (w, h) = (weight_kg, height_cm);

    let lbm = match (formula, sex) {
        (LbmFormula::Boer, BiologicalSex::Male) => 0.407 * w + 0.267 * h - 19.2,
        (LbmFormula::Boer, BiologicalSex::Female) => 0.252 * w + 0.473 * h - 48.3,
        (LbmFormula::James, BiologicalSex::Male) => 1.1 * w - 128.0 * (w / h).powi(2),
        (LbmFormula::James, BiologicalSex::Female) => 1.07 * w - 148.0 * (w / h).powi(2),
        (LbmFormula::Hume, BiologicalSex::Male) => 0.32810 * w + 0.33929 * h - 29.5336,
        (LbmFormula::Hume, BiologicalSex::Female) => 0.29569 * w + 0.41813 * h - 43.2933,
        (LbmFormula::Peters, _) => 3.8 * 0.0215 * w.powf(0.6469) * h.powf(0.7236),
    };

    let lbm = ensure_finite("lean_body_mass", lbm)?;
    if lbm <= 0.0 || lbm > weight_kg {
        return Err(CalcError::domain(
            "lean body mass",
            format!("{formula:?} estimate {lbm:.1} kg is outside (0, body weight]"),
        ));
    }
    Ok(lbm)
}

// ============================================================================
// Ideal body weight
// ============================================================================

/// Ideal body weight formulas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IbwFormula {
    Devine,
    Robinson,
    Miller,
    Hamwi,
}

impl IbwFormula {
    pub const ALL: [IbwFormula; 4] = [
        IbwFormula::Devine,
        IbwFormula::Robinson,
        IbwFormula::Miller,
        IbwFormula::Hamwi,
    ];

    /// (base kg at 5 ft, kg per inch above 5 ft)
    fn coefficients(&self, sex: BiologicalSex) -> (f64, f64) {
        match (self, sex) {
            (IbwFormula::Devine, BiologicalSex::Male) => (50.0, 2.3),
            (IbwFormula::Devine, BiologicalSex::Female) => (45.5, 2.3),
            (IbwFormula::Robinson, BiologicalSex::Male) => (52.0, 1.9),
            (IbwFormula::Robinson, BiologicalSex::Female) => (49.0, 1.7),
            (IbwFormula::Miller, BiologicalSex::Male) => (56.2, 1.41),
            (IbwFormula::Miller, BiologicalSex::Female) => (53.1, 1.36),
            (IbwFormula::Hamwi, BiologicalSex::Male) => (48.0, 2.7),
            (IbwFormula::Hamwi, BiologicalSex::Female) => (45.5, 2.2),
        }
    }
}

/// Inches of height above 5 feet, clamped at zero
pub fn inches_over_five_feet(height_cm: f64) -> f64 {
    (height_cm / CM_PER_INCH - IBW_BASE_HEIGHT_IN).max(0.0)
}

/// Ideal body weight in kg
///
/// Heights under 5 feet are clamped to 5 feet; the formulas were never
/// validated below it and extrapolating downward produces implausible values.
pub fn ideal_body_weight(formula: IbwFormula, sex: BiologicalSex, height_cm: f64) -> CalcResult<f64> {
    ensure_positive("height_cm", height_cm)?;
    let (base, per_inch) = formula.coefficients(sex);
    Ok(base + per_inch * inches_over_five_feet(height_cm))
}

// ============================================================================
// Archery
// ============================================================================

/// Draw length in inches from arm span
pub fn draw_length_in(wingspan_cm: f64) -> CalcResult<f64> {
    ensure_positive("wingspan_cm", wingspan_cm)?;
    Ok(wingspan_cm / CM_PER_INCH / DRAW_LENGTH_DIVISOR)
}

// ============================================================================
// Body shape
// ============================================================================

/// Figure type from bust, waist and hip girths
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyShape {
    Hourglass,
    BottomHourglass,
    TopHourglass,
    Spoon,
    Triangle,
    InvertedTriangle,
    Rectangle,
    Unclassified,
}

impl BodyShape {
    pub fn description(&self) -> &'static str {
        match self {
            BodyShape::Hourglass => "Hourglass",
            BodyShape::BottomHourglass => "Bottom Hourglass",
            BodyShape::TopHourglass => "Top Hourglass",
            BodyShape::Spoon => "Spoon",
            BodyShape::Triangle => "Triangle (Pear)",
            BodyShape::InvertedTriangle => "Inverted Triangle",
            BodyShape::Rectangle => "Rectangle",
            BodyShape::Unclassified => "Unclassified",
        }
    }
}

/// Classify a figure from girths in cm
///
/// Rules are stated in inches and checked in a fixed order; the first match
/// wins. Measurements that satisfy none of them are `Unclassified`.
pub fn body_shape(bust_cm: f64, waist_cm: f64, high_hip_cm: f64, hip_cm: f64) -> CalcResult<BodyShape> {
    ensure_positive("bust_cm", bust_cm)?;
    ensure_positive("waist_cm", waist_cm)?;
    ensure_positive("high_hip_cm", high_hip_cm)?;
    ensure_positive("hip_cm", hip_cm)?;

    let bust = bust_cm / CM_PER_INCH;
    let waist = waist_cm / CM_PER_INCH;
    let high_hip = high_hip_cm / CM_PER_INCH;
    let hips = hip_cm / CM_PER_INCH;

    let bust_minus_hips = bust - hips;
    let hips_minus_bust = hips - bust;
    let bust_minus_waist = bust - waist;
    let hips_minus_waist = hips - waist;
    let high_hip_ratio = high_hip / waist;

    let shape = if bust_minus_hips <= 1.0
        && hips_minus_bust < 3.6
        && (bust_minus_waist >= 9.0 || hips_minus_waist >= 10.0)
    {
        BodyShape::Hourglass
    } else if (3.6..10.0).contains(&hips_minus_bust) && hips_minus_waist >= 9.0 && high_hip_ratio < 1.193 {
        BodyShape::BottomHourglass
    } else if bust_minus_hips > 1.0 && bust_minus_hips < 10.0 && bust_minus_waist >= 9.0 {
        BodyShape::TopHourglass
    } else if hips_minus_bust > 2.0 && hips_minus_waist >= 7.0 && high_hip_ratio >= 1.193 {
        BodyShape::Spoon
    } else if hips_minus_bust >= 3.6 && hips_minus_waist < 9.0 {
        BodyShape::Triangle
    } else if bust_minus_hips >= 3.6 && bust_minus_waist < 9.0 {
        BodyShape::InvertedTriangle
    } else if hips_minus_bust < 3.6 && bust_minus_hips < 3.6 && bust_minus_waist < 9.0 && hips_minus_waist < 10.0 {
        BodyShape::Rectangle
    } else {
        BodyShape::Unclassified
    };
    Ok(shape)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rstest::rstest;

    fn inches(value: f64) -> f64 {
        value * CM_PER_INCH
    }

    // =========================================================================
    // BMI Tests
    // =========================================================================

    #[test]
    fn test_bmi_calculation() {
        // 70kg, 175cm -> BMI ~22.86
        let bmi = calculate_bmi(70.0, 175.0).unwrap();
        assert!((bmi - 22.86).abs() < 0.01);
    }

    #[test]
    fn test_bmi_rejects_zero_height() {
        assert!(matches!(
            calculate_bmi(70.0, 0.0),
            Err(CalcError::InvalidInput { field: "height_cm", .. })
        ));
        assert!(calculate_bmi(-1.0, 170.0).is_err());
    }

    #[test]
    fn test_healthy_weight_range() {
        // For 175cm, healthy range should be ~56.7-76.6 kg
        let (min, max) = healthy_weight_range_kg(175.0).unwrap();
        assert!((min - 56.66).abs() < 0.01);
        assert!((max - 76.56).abs() < 0.01);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Property: Heavier weight = higher BMI (same height)
        #[test]
        fn prop_bmi_strictly_increases_with_weight(
            weight in 20.0f64..300.0,
            delta in 0.01f64..50.0,
            height in 100.0f64..250.0
        ) {
            let lighter = calculate_bmi(weight, height).unwrap();
            let heavier = calculate_bmi(weight + delta, height).unwrap();
            prop_assert!(heavier > lighter);
        }

        /// Property: Taller height = lower BMI (same weight)
        #[test]
        fn prop_bmi_decreases_with_height(
            weight in 60.0f64..100.0,
            height1 in 150.0f64..170.0,
            height2 in 180.0f64..200.0
        ) {
            let bmi1 = calculate_bmi(weight, height1).unwrap();
            let bmi2 = calculate_bmi(weight, height2).unwrap();
            prop_assert!(bmi1 > bmi2);
        }
    }

    // =========================================================================
    // ABSI Tests
    // =========================================================================

    #[test]
    fn test_absi_typical_adult() {
        // 180 cm, 80 kg, waist 90 cm -> BMI 24.69, ABSI ~0.0791
        let absi = calculate_absi(90.0, 80.0, 180.0).unwrap();
        assert!((absi - 0.0791).abs() < 0.0005, "absi = {absi}");
    }

    #[test]
    fn test_absi_rejects_zero_waist() {
        assert!(calculate_absi(0.0, 80.0, 180.0).is_err());
    }

    #[test]
    fn test_normal_percentile() {
        assert!((normal_percentile(0.0) - 50.0).abs() < 1e-6);
        assert!((normal_percentile(1.645) - 95.0).abs() < 0.05);
        assert!((normal_percentile(-0.868) - 19.27).abs() < 0.05);
    }

    #[test]
    fn test_ratios() {
        assert!((waist_to_height(85.0, 170.0).unwrap() - 0.5).abs() < 1e-12);
        assert!((waist_to_hip(80.0, 100.0).unwrap() - 0.8).abs() < 1e-12);
        assert!(waist_to_hip(80.0, 0.0).is_err());
    }

    // =========================================================================
    // Body Fat Tests
    // =========================================================================

    #[test]
    fn test_navy_body_fat_male() {
        // 180 cm, neck 38, waist 85 -> ~16.1%
        let bf = navy_body_fat(BiologicalSex::Male, 180.0, 38.0, 85.0, None).unwrap();
        assert!((bf - 16.1).abs() < 0.1, "bf = {bf}");
    }

    #[test]
    fn test_navy_body_fat_female() {
        // 165 cm, neck 32, waist 70, hip 95 -> ~24.9%
        let bf = navy_body_fat(BiologicalSex::Female, 165.0, 32.0, 70.0, Some(95.0)).unwrap();
        assert!((bf - 24.86).abs() < 0.1, "bf = {bf}");
    }

    #[test]
    fn test_navy_waist_not_above_neck_is_domain_error() {
        let result = navy_body_fat(BiologicalSex::Male, 180.0, 40.0, 40.0, None);
        assert!(matches!(result, Err(CalcError::Domain { .. })));

        let result = navy_body_fat(BiologicalSex::Male, 180.0, 45.0, 40.0, None);
        assert!(matches!(result, Err(CalcError::Domain { .. })));
    }

    #[test]
    fn test_navy_female_requires_hip() {
        let result = navy_body_fat(BiologicalSex::Female, 165.0, 32.0, 70.0, None);
        assert!(matches!(result, Err(CalcError::InvalidInput { field: "hip_cm", .. })));
    }

    #[test]
    fn test_deurenberg_clamped() {
        let bf = deurenberg_body_fat(22.0, 30, BiologicalSex::Male).unwrap();
        assert!((bf - 17.1).abs() < 0.01);
        assert_eq!(deurenberg_body_fat(80.0, 90, BiologicalSex::Female).unwrap(), 60.0);
    }

    #[test]
    fn test_relative_fat_mass_female() {
        let rfm = relative_fat_mass(BiologicalSex::Female, 170.0, 72.0).unwrap();
        assert!((rfm - 28.78).abs() < 0.01);
    }

    #[test]
    fn test_weight_at_body_fat() {
        // 64 kg lean at 20% -> 80 kg
        let weight = weight_at_body_fat(64.0, 20.0).unwrap();
        assert!((weight - 80.0).abs() < 1e-9);
        assert!(weight_at_body_fat(64.0, 100.0).is_err());
    }

    #[test]
    fn test_fat_and_lean_mass_partition_weight() {
        let weight = 82.0;
        let total = fat_mass_kg(weight, 18.0) + lean_mass_kg(weight, 18.0);
        assert!((total - weight).abs() < 1e-9);
    }

    // =========================================================================
    // Lean Body Mass Tests
    // =========================================================================

    #[rstest]
    #[case(LbmFormula::Boer, BiologicalSex::Male, 61.42)]
    #[case(LbmFormula::James, BiologicalSex::Male, 62.72)]
    #[case(LbmFormula::Hume, BiologicalSex::Male, 57.79)]
    #[case(LbmFormula::Boer, BiologicalSex::Female, 57.0)]
    fn test_lean_body_mass(#[case] formula: LbmFormula, #[case] sex: BiologicalSex, #[case] expected: f64) {
        let lbm = lean_body_mass(formula, sex, 80.0, 180.0).unwrap();
        assert!((lbm - expected).abs() < 0.05, "{formula:?}: {lbm}");
    }

    #[test]
    fn test_peters_child_estimate() {
        // 30 kg, 135 cm child
        let lbm = lean_body_mass(LbmFormula::Peters, BiologicalSex::Male, 30.0, 135.0).unwrap();
        assert!(lbm > 20.0 && lbm < 30.0, "lbm = {lbm}");
    }

    #[test]
    fn test_james_rejects_extreme_mass() {
        // James collapses at very high weight for height
        let result = lean_body_mass(LbmFormula::James, BiologicalSex::Female, 200.0, 150.0);
        assert!(matches!(result, Err(CalcError::Domain { .. })));
    }

    // =========================================================================
    // Ideal Weight Tests
    // =========================================================================

    #[rstest]
    #[case(IbwFormula::Devine, BiologicalSex::Male, 77.6)]
    #[case(IbwFormula::Robinson, BiologicalSex::Male, 74.8)]
    #[case(IbwFormula::Miller, BiologicalSex::Male, 73.12)]
    #[case(IbwFormula::Hamwi, BiologicalSex::Male, 80.4)]
    #[case(IbwFormula::Devine, BiologicalSex::Female, 73.1)]
    #[case(IbwFormula::Robinson, BiologicalSex::Female, 69.4)]
    #[case(IbwFormula::Miller, BiologicalSex::Female, 69.42)]
    #[case(IbwFormula::Hamwi, BiologicalSex::Female, 71.9)]
    fn test_ideal_weight_at_six_feet(#[case] formula: IbwFormula, #[case] sex: BiologicalSex, #[case] expected: f64) {
        let ibw = ideal_body_weight(formula, sex, inches(72.0)).unwrap();
        assert!((ibw - expected).abs() < 1e-6, "{formula:?}: {ibw}");
    }

    #[test]
    fn test_ideal_weight_clamps_below_five_feet() {
        let short = ideal_body_weight(IbwFormula::Devine, BiologicalSex::Female, 140.0).unwrap();
        assert_eq!(short, 45.5);
        assert_eq!(inches_over_five_feet(inches(58.0)), 0.0);
    }

    // =========================================================================
    // Draw Length Tests
    // =========================================================================

    #[test]
    fn test_draw_length_from_wingspan() {
        let draw = draw_length_in(inches(70.0)).unwrap();
        assert!((draw - 28.0).abs() < 1e-9);
        assert!(draw_length_in(0.0).is_err());
    }

    // =========================================================================
    // Body Shape Tests
    // =========================================================================

    #[rstest]
    #[case(36.0, 26.0, 33.0, 36.0, BodyShape::Hourglass)]
    #[case(34.0, 26.0, 30.0, 39.0, BodyShape::BottomHourglass)]
    #[case(38.0, 28.0, 33.0, 35.0, BodyShape::TopHourglass)]
    #[case(34.0, 28.0, 35.0, 38.0, BodyShape::Spoon)]
    #[case(34.0, 32.0, 36.0, 40.0, BodyShape::Triangle)]
    #[case(40.0, 34.0, 36.0, 35.0, BodyShape::InvertedTriangle)]
    #[case(34.0, 30.0, 33.0, 35.0, BodyShape::Rectangle)]
    fn test_body_shape(
        #[case] bust: f64,
        #[case] waist: f64,
        #[case] high_hip: f64,
        #[case] hips: f64,
        #[case] expected: BodyShape,
    ) {
        let shape = body_shape(inches(bust), inches(waist), inches(high_hip), inches(hips)).unwrap();
        assert_eq!(shape, expected);
    }

    #[test]
    fn test_body_shape_rejects_zero() {
        assert!(body_shape(0.0, 70.0, 80.0, 90.0).is_err());
    }
}
