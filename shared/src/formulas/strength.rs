//! Powerlifting scoring

use super::BiologicalSex;
use crate::errors::{ensure_finite, ensure_positive, CalcError, CalcResult};
use crate::reference::wilks_coefficients;

/// Wilks coefficient for a bodyweight in kg
///
/// Formula: 500 / (a + b·x + c·x² + d·x³ + e·x⁴ + f·x⁵)
///
/// Bodyweight is clamped to the range the polynomial was fitted over; past
/// it the polynomial turns over and rewards heavier lifters.
pub fn wilks_coefficient(bodyweight_kg: f64, sex: BiologicalSex) -> CalcResult<f64> {
    ensure_positive("bodyweight_kg", bodyweight_kg)?;
    let coefficients = wilks_coefficients(sex);
    let x = bodyweight_kg.clamp(coefficients.min_bodyweight_kg, coefficients.max_bodyweight_kg);

    // Horner's rule, highest degree first
    let denominator = coefficients
        .terms
        .iter()
        .rev()
        .fold(0.0, |acc, term| acc * x + term);

    if denominator <= 0.0 {
        return Err(CalcError::domain("Wilks", "polynomial is not positive"));
    }
    ensure_finite("wilks_coefficient", 500.0 / denominator)
}

/// Wilks score for a lifted total; both arguments in kg
pub fn wilks_score(total_kg: f64, bodyweight_kg: f64, sex: BiologicalSex) -> CalcResult<f64> {
    ensure_positive("total_kg", total_kg)?;
    Ok(total_kg * wilks_coefficient(bodyweight_kg, sex)?)
}
