//! Cross-metric interpretation
//!
//! Guidance that depends on two classifications at once lives in small
//! decision tables indexed by the pair of category ordinals. Nothing here
//! recomputes a formula.

use serde::Serialize;

use crate::classification::{AbsiRisk, BmiCategory, BmiGroup, BodyFatCategory, Category, Color, Metric};

/// Joint guidance for a pair of classifications
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Interpretation {
    pub title: &'static str,
    pub guidance: &'static str,
    pub color: Color,
    /// Both metrics are above their healthy bands
    pub both_elevated: bool,
}

const fn note(title: &'static str, guidance: &'static str, color: Color, both_elevated: bool) -> Interpretation {
    Interpretation {
        title,
        guidance,
        color,
        both_elevated,
    }
}

fn group_index(group: BmiGroup) -> usize {
    match group {
        BmiGroup::Underweight => 0,
        BmiGroup::Normal => 1,
        BmiGroup::Overweight => 2,
        BmiGroup::Obese => 3,
    }
}

// ============================================================================
// ABSI risk x BMI group
// ============================================================================

/// Rows: BMI group (underweight, normal, overweight, obese).
/// Columns: ABSI risk (low, average, high, very high).
const ABSI_BY_BMI: [[Interpretation; 4]; 4] = [
    [
        note(
            "Low weight, low shape risk",
            "Weight is below the healthy range while waist size is small for your height. Focus on reaching a healthy weight.",
            Color::Yellow,
            false,
        ),
        note(
            "Low weight",
            "Weight is below the healthy range; waist-related risk is average.",
            Color::Yellow,
            false,
        ),
        note(
            "Low weight with central fat",
            "Weight is low, yet fat is concentrated around the waist. Both deserve attention.",
            Color::Orange,
            false,
        ),
        note(
            "Low weight with very high central fat",
            "Weight is low but waist-related risk is very high. Consider discussing this with a healthcare provider.",
            Color::Red,
            false,
        ),
    ],
    [
        note(
            "Healthy profile",
            "Weight and waist size are both in favorable ranges.",
            Color::Green,
            false,
        ),
        note(
            "Healthy weight, average shape risk",
            "Weight is healthy and waist-related risk is typical for your age and sex.",
            Color::Green,
            false,
        ),
        note(
            "High shape risk despite normal weight",
            "BMI is normal, but a large waist for your size points to visceral fat. Waist reduction matters more than weight here.",
            Color::Orange,
            false,
        ),
        note(
            "Very high shape risk despite normal weight",
            "BMI is normal, but waist-related risk is very high. BMI alone understates your risk.",
            Color::Red,
            false,
        ),
    ],
    [
        note(
            "Overweight with favorable fat distribution",
            "BMI is above the healthy range, but waist size is small for your build. BMI may overstate your risk.",
            Color::Yellow,
            false,
        ),
        note(
            "Overweight",
            "BMI is above the healthy range with average waist-related risk.",
            Color::Yellow,
            false,
        ),
        note(
            "Overweight with central fat",
            "Both BMI and waist-related risk are elevated. Reducing waist size should be the first goal.",
            Color::Orange,
            true,
        ),
        note(
            "Overweight with very high central fat",
            "Both BMI and waist-related risk are elevated, the latter very high.",
            Color::Red,
            true,
        ),
    ],
    [
        note(
            "Obese with favorable fat distribution",
            "BMI is in the obese range, though fat is not concentrated at the waist.",
            Color::Orange,
            false,
        ),
        note(
            "Obese",
            "BMI is in the obese range with average waist-related risk.",
            Color::Orange,
            false,
        ),
        note(
            "Obese with central fat",
            "Both BMI and waist-related risk are elevated.",
            Color::Red,
            true,
        ),
        note(
            "Obese with very high central fat",
            "Both BMI and waist-related risk are high. Consider discussing this with a healthcare provider.",
            Color::DarkRed,
            true,
        ),
    ],
];

pub fn interpret_absi_bmi(bmi: BmiCategory, absi: AbsiRisk) -> Interpretation {
    ABSI_BY_BMI[group_index(bmi.group())][absi as usize]
}

// ============================================================================
// Body fat x BMI group
// ============================================================================

const NORMAL_WEIGHT_OBESITY: Interpretation = note(
    "Normal-weight obesity",
    "BMI is normal, but body fat is in the obese range. Strength training and diet quality matter more than weight loss.",
    Color::Orange,
    false,
);

const LOW_WEIGHT_HIGH_FAT: Interpretation = note(
    "Low weight with high body fat",
    "Weight is below the healthy range while body fat is high, which suggests low muscle mass.",
    Color::Orange,
    false,
);

const MUSCULAR_OVERWEIGHT: Interpretation = note(
    "Muscular overweight",
    "BMI is high, but body fat is in the athletic or fitness range. The extra weight is likely muscle.",
    Color::Green,
    false,
);

const OVERFAT: Interpretation = note(
    "Excess body fat",
    "Both BMI and body fat are elevated.",
    Color::Red,
    true,
);

/// Rows: BMI group. Columns: body fat category (essential .. obese).
const BODY_FAT_BY_BMI: [[Option<Interpretation>; 5]; 4] = [
    [None, None, None, None, Some(LOW_WEIGHT_HIGH_FAT)],
    [None, None, None, None, Some(NORMAL_WEIGHT_OBESITY)],
    [None, Some(MUSCULAR_OVERWEIGHT), Some(MUSCULAR_OVERWEIGHT), None, Some(OVERFAT)],
    [None, Some(MUSCULAR_OVERWEIGHT), Some(MUSCULAR_OVERWEIGHT), None, Some(OVERFAT)],
];

/// `None` when BMI and body fat tell the same story
pub fn interpret_body_fat_bmi(bmi: BmiCategory, body_fat: BodyFatCategory) -> Option<Interpretation> {
    BODY_FAT_BY_BMI[group_index(bmi.group())][body_fat as usize]
}

// ============================================================================
// From classified categories
// ============================================================================

fn find(categories: &[Category], metric: impl Fn(Metric) -> bool) -> Option<u8> {
    categories
        .iter()
        .find(|category| metric(category.metric))
        .map(|category| category.ordinal)
}

/// Every joint interpretation the given categories support
pub fn joint_interpretations(categories: &[Category]) -> Vec<Interpretation> {
    let Some(bmi) = find(categories, |m| m == Metric::Bmi).and_then(BmiCategory::from_ordinal) else {
        return Vec::new();
    };

    let absi = find(categories, |m| matches!(m, Metric::Absi | Metric::AbsiZScore)).and_then(AbsiRisk::from_ordinal);
    let body_fat = find(categories, |m| m == Metric::BodyFat).and_then(BodyFatCategory::from_ordinal);

    absi.map(|risk| interpret_absi_bmi(bmi, risk))
        .into_iter()
        .chain(body_fat.and_then(|fat| interpret_body_fat_bmi(bmi, fat)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(BmiCategory::Normal, AbsiRisk::High, "High shape risk despite normal weight", false)]
    #[case(BmiCategory::Normal, AbsiRisk::VeryHigh, "Very high shape risk despite normal weight", false)]
    #[case(BmiCategory::Overweight, AbsiRisk::High, "Overweight with central fat", true)]
    #[case(BmiCategory::ObeseClass3, AbsiRisk::VeryHigh, "Obese with very high central fat", true)]
    #[case(BmiCategory::SeverelyUnderweight, AbsiRisk::Low, "Low weight, low shape risk", false)]
    fn test_absi_bmi_cells(
        #[case] bmi: BmiCategory,
        #[case] absi: AbsiRisk,
        #[case] title: &str,
        #[case] both_elevated: bool,
    ) {
        let interpretation = interpret_absi_bmi(bmi, absi);
        assert_eq!(interpretation.title, title);
        assert_eq!(interpretation.both_elevated, both_elevated);
    }

    #[test]
    fn test_absi_bmi_cells_are_distinct() {
        let mut titles: Vec<_> = ABSI_BY_BMI.iter().flatten().map(|cell| cell.title).collect();
        titles.sort_unstable();
        titles.dedup();
        assert_eq!(titles.len(), 16);
    }

    #[test]
    fn test_body_fat_flags() {
        assert_eq!(
            interpret_body_fat_bmi(BmiCategory::Normal, BodyFatCategory::Obese),
            Some(NORMAL_WEIGHT_OBESITY)
        );
        assert_eq!(
            interpret_body_fat_bmi(BmiCategory::Overweight, BodyFatCategory::Athletic),
            Some(MUSCULAR_OVERWEIGHT)
        );
        assert_eq!(
            interpret_body_fat_bmi(BmiCategory::Overweight, BodyFatCategory::Fitness),
            Some(MUSCULAR_OVERWEIGHT)
        );
        assert_eq!(interpret_body_fat_bmi(BmiCategory::Normal, BodyFatCategory::Fitness), None);
    }

    #[test]
    fn test_joint_interpretations_from_categories() {
        let categories = [
            Category::of(Metric::Bmi, BmiCategory::Normal),
            Category::of(Metric::AbsiZScore, AbsiRisk::VeryHigh),
            Category::of(Metric::BodyFat, BodyFatCategory::Obese),
        ];
        let notes = joint_interpretations(&categories);
        assert_eq!(notes.len(), 2);
        assert_eq!(notes[0].title, "Very high shape risk despite normal weight");
        assert_eq!(notes[1].title, "Normal-weight obesity");
    }

    #[test]
    fn test_joint_interpretations_need_bmi() {
        let categories = [Category::of(Metric::AbsiZScore, AbsiRisk::High)];
        assert!(joint_interpretations(&categories).is_empty());
    }
}
