//! Basal metabolic rate and daily energy expenditure
//!
//! Weights in kg, heights in cm, results in kcal/day.

use serde::{Deserialize, Serialize};

use super::BiologicalSex;
use crate::errors::{ensure_positive, CalcError, CalcResult};

/// Daily deficit/surplus applied for cut and bulk targets
pub const CALORIE_ADJUSTMENT: f64 = 500.0;

/// Lowest calorie target ever suggested for a cut
pub const MIN_CUT_CALORIES: f64 = 1200.0;

/// Activity level for TDEE calculation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ActivityLevel {
    /// Little or no exercise
    #[default]
    Sedentary,
    /// Light exercise 1-3 days/week
    #[serde(alias = "light")]
    LightlyActive,
    /// Moderate exercise 3-5 days/week
    #[serde(alias = "moderate")]
    ModeratelyActive,
    /// Hard exercise 6-7 days/week
    #[serde(alias = "active")]
    VeryActive,
    /// Very hard exercise, physical job
    #[serde(alias = "extra")]
    ExtraActive,
}

impl ActivityLevel {
    /// Get the activity multiplier for TDEE calculation
    pub fn multiplier(&self) -> f64 {
        match self {
            ActivityLevel::Sedentary => 1.2,
            ActivityLevel::LightlyActive => 1.375,
            ActivityLevel::ModeratelyActive => 1.55,
            ActivityLevel::VeryActive => 1.725,
            ActivityLevel::ExtraActive => 1.9,
        }
    }

    /// Get a human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            ActivityLevel::Sedentary => "Little or no exercise",
            ActivityLevel::LightlyActive => "Light exercise 1-3 days/week",
            ActivityLevel::ModeratelyActive => "Moderate exercise 3-5 days/week",
            ActivityLevel::VeryActive => "Hard exercise 6-7 days/week",
            ActivityLevel::ExtraActive => "Very hard exercise or physical job",
        }
    }
}

impl std::str::FromStr for ActivityLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sedentary" => Ok(ActivityLevel::Sedentary),
            "light" | "lightly_active" => Ok(ActivityLevel::LightlyActive),
            "moderate" | "moderately_active" => Ok(ActivityLevel::ModeratelyActive),
            "active" | "very_active" => Ok(ActivityLevel::VeryActive),
            "extra" | "extra_active" => Ok(ActivityLevel::ExtraActive),
            _ => Err(format!("Unknown activity level: {}", s)),
        }
    }
}

/// BMR calculation method
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BmrMethod {
    /// Mifflin-St Jeor (most accurate for most people)
    #[default]
    MifflinStJeor,
    /// Harris-Benedict (revised)
    HarrisBenedict,
    /// Katch-McArdle (requires body fat %)
    KatchMcArdle,
}

/// Calculate Basal Metabolic Rate using Mifflin-St Jeor equation
///
/// Men: BMR = 10 × weight(kg) + 6.25 × height(cm) - 5 × age(y) + 5
/// Women: BMR = 10 × weight(kg) + 6.25 × height(cm) - 5 × age(y) - 161
pub fn bmr_mifflin(weight_kg: f64, height_cm: f64, age_years: u32, sex: BiologicalSex) -> CalcResult<f64> {
    ensure_positive("weight_kg", weight_kg)?;
    ensure_positive("height_cm", height_cm)?;
    let base = 10.0 * weight_kg + 6.25 * height_cm - 5.0 * age_years as f64;
    let bmr = match sex {
        BiologicalSex::Male => base + 5.0,
        BiologicalSex::Female => base - 161.0,
    };
    positive_bmr(bmr)
}

/// Calculate BMR using Harris-Benedict equation (revised)
///
/// Men: BMR = 88.362 + 13.397 × weight(kg) + 4.799 × height(cm) - 5.677 × age(y)
/// Women: BMR = 447.593 + 9.247 × weight(kg) + 3.098 × height(cm) - 4.330 × age(y)
pub fn bmr_harris_benedict(weight_kg: f64, height_cm: f64, age_years: u32, sex: BiologicalSex) -> CalcResult<f64> {
    ensure_positive("weight_kg", weight_kg)?;
    ensure_positive("height_cm", height_cm)?;
    let age = age_years as f64;
    let bmr = match sex {
        BiologicalSex::Male => 88.362 + 13.397 * weight_kg + 4.799 * height_cm - 5.677 * age,
        BiologicalSex::Female => 447.593 + 9.247 * weight_kg + 3.098 * height_cm - 4.330 * age,
    };
    positive_bmr(bmr)
}

/// Calculate BMR using Katch-McArdle equation
///
/// BMR = 370 + 21.6 × LBM(kg)
pub fn bmr_katch_mcardle(lean_mass_kg: f64) -> CalcResult<f64> {
    ensure_positive("lean_mass_kg", lean_mass_kg)?;
    Ok(370.0 + 21.6 * lean_mass_kg)
}

fn positive_bmr(bmr: f64) -> CalcResult<f64> {
    if bmr.is_finite() && bmr > 0.0 {
        Ok(bmr)
    } else {
        Err(CalcError::domain("BMR", format!("estimate {bmr:.0} kcal is not positive")))
    }
}

/// Total Daily Energy Expenditure
///
/// TDEE = BMR × Activity Multiplier
pub fn tdee(bmr: f64, activity_level: ActivityLevel) -> f64 {
    bmr * activity_level.multiplier()
}

/// Calorie target for a 500 kcal/day cut, never below 1200
pub fn cut_calories(tdee: f64) -> f64 {
    (tdee - CALORIE_ADJUSTMENT).max(MIN_CUT_CALORIES)
}

/// Calorie target for a 500 kcal/day surplus
pub fn bulk_calories(tdee: f64) -> f64 {
    tdee + CALORIE_ADJUSTMENT
}
