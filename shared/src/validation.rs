//! Input validation functions
//!
//! The presentation layer owns validation, but it calls these helpers so the
//! rules live next to the formulas that depend on them. Range rules on the
//! input structs use the `validator` crate's derive macros; this module
//! turns its reports into user-facing messages.

use validator::{Validate, ValidationErrors};

use crate::errors::{CalcError, CalcResult};

/// Parse a raw form value
///
/// Empty, whitespace-only and non-numeric strings are treated as absent.
pub fn parse_numeric(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Validate weight value (in kg)
pub fn validate_weight(weight_kg: f64) -> Result<(), String> {
    if weight_kg.is_nan() || weight_kg.is_infinite() {
        return Err("Weight must be a valid number".to_string());
    }
    if weight_kg < 2.0 {
        return Err("Weight must be at least 2 kg".to_string());
    }
    if weight_kg > 500.0 {
        return Err("Weight must be at most 500 kg".to_string());
    }
    Ok(())
}

/// Validate height value (in cm)
/// Valid range: 50-300 cm (covers infants to tallest recorded humans)
pub fn validate_height_cm(height_cm: f64) -> Result<(), String> {
    if height_cm.is_nan() || height_cm.is_infinite() {
        return Err("Height must be a valid number".to_string());
    }
    if height_cm < 50.0 {
        return Err("Height must be at least 50 cm".to_string());
    }
    if height_cm > 300.0 {
        return Err("Height must be at most 300 cm".to_string());
    }
    Ok(())
}

/// Validate a body girth (neck, waist, hip, bust) in cm
pub fn validate_girth_cm(girth_cm: f64) -> Result<(), String> {
    if girth_cm.is_nan() || girth_cm.is_infinite() {
        return Err("Measurement must be a valid number".to_string());
    }
    if girth_cm < 10.0 {
        return Err("Measurement must be at least 10 cm".to_string());
    }
    if girth_cm > 300.0 {
        return Err("Measurement must be at most 300 cm".to_string());
    }
    Ok(())
}

/// Validate percentage value (0-100)
pub fn validate_percentage(value: f64) -> Result<(), String> {
    if value.is_nan() || value.is_infinite() {
        return Err("Percentage must be a valid number".to_string());
    }
    if !(0.0..=100.0).contains(&value) {
        return Err("Percentage must be between 0 and 100".to_string());
    }
    Ok(())
}

/// Validate a body-fat goal; 100% would leave no lean mass
pub fn validate_target_body_fat(value: f64) -> Result<(), String> {
    validate_percentage(value)?;
    if value >= 100.0 {
        return Err("Target body fat must be below 100".to_string());
    }
    Ok(())
}

/// Validate an adult age in years
pub fn validate_adult_age(age_years: u32) -> Result<(), String> {
    if age_years < 18 {
        return Err("Age must be at least 18".to_string());
    }
    if age_years > 120 {
        return Err("Age cannot exceed 120 years".to_string());
    }
    Ok(())
}

/// Validate a PSS-10 item answer
pub fn validate_pss_answer(answer: u8) -> Result<(), String> {
    if answer > 4 {
        return Err("Answers must be between 0 (never) and 4 (very often)".to_string());
    }
    Ok(())
}

// ============================================================================
// User-Friendly Field Labels
// ============================================================================

/// Map technical field names to user-friendly display labels
pub fn get_field_display_label(field_name: &str) -> &str {
    match field_name {
        "height" | "height_cm" => "Height",
        "weight" | "weight_kg" => "Weight",
        "bodyweight" => "Body Weight",
        "waist" | "waist_cm" => "Waist",
        "neck" | "neck_cm" => "Neck",
        "hip" | "hips" | "hip_cm" => "Hips",
        "high_hip" => "High Hip",
        "bust" => "Bust",
        "wingspan" => "Wingspan",
        "age" | "age_years" => "Age",
        "sex" => "Sex",
        "activity_level" => "Activity Level",
        "body_fat_percent" => "Body Fat %",
        "target_percent" => "Target Body Fat",
        "total" => "Lifted Total",
        "a1c" | "a1c_percent" => "HbA1c",
        "eag" | "glucose" => "Glucose",
        "latency_minutes" => "Time to Fall Asleep",
        "target_hours" => "Sleep Goal",
        "nights" => "Hours Slept",
        "answers" => "Answers",
        "birth_date" => "Date of Birth",
        "unit_system" => "Units",
        _ => field_name,
    }
}

/// Validation error with field context
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
    pub display_label: String,
}

impl ValidationError {
    pub fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
            display_label: get_field_display_label(field).to_string(),
        }
    }

    /// Format as user-friendly error message
    pub fn user_message(&self) -> String {
        format!("{}: {}", self.display_label, self.message)
    }
}

/// Flatten a `validator` report into field-level errors, sorted by field
pub fn collect_errors(errors: &ValidationErrors) -> Vec<ValidationError> {
    let mut collected: Vec<ValidationError> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, field_errors)| {
            field_errors.iter().map(move |e| {
                let message = e
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| describe_code(&e.code).to_string());
                ValidationError::new(field.as_ref(), &message)
            })
        })
        .collect();
    collected.sort_by(|a, b| a.field.cmp(&b.field));
    collected
}

fn describe_code(code: &str) -> &'static str {
    match code {
        "range" => "value is out of range",
        "length" => "wrong number of entries",
        "required" => "is required",
        _ => "is invalid",
    }
}

/// Run derive-based validation and map failures into the core error type
pub fn check<T: Validate>(input: &T) -> CalcResult<()> {
    input
        .validate()
        .map_err(|errors| CalcError::Validation(collect_errors(&errors)))
}

// ============================================================================
// Derive rules
// ============================================================================
//
// Adapters so `#[validate(custom(function = ...))]` attributes reuse the
// range checks above. The derive passes `Copy` fields by value.

fn as_rule(result: Result<(), String>) -> Result<(), validator::ValidationError> {
    result.map_err(|message| {
        let mut error = validator::ValidationError::new("range");
        error.message = Some(message.into());
        error
    })
}

pub fn weight_rule(weight_kg: f64) -> Result<(), validator::ValidationError> {
    as_rule(validate_weight(weight_kg))
}

pub fn height_rule(height_cm: f64) -> Result<(), validator::ValidationError> {
    as_rule(validate_height_cm(height_cm))
}

pub fn girth_rule(girth_cm: f64) -> Result<(), validator::ValidationError> {
    as_rule(validate_girth_cm(girth_cm))
}

pub fn target_body_fat_rule(value: f64) -> Result<(), validator::ValidationError> {
    as_rule(validate_target_body_fat(value))
}

pub fn adult_age_rule(age_years: u32) -> Result<(), validator::ValidationError> {
    as_rule(validate_adult_age(age_years))
}

pub fn pss_answers_rule(answers: &[u8]) -> Result<(), validator::ValidationError> {
    answers
        .iter()
        .try_for_each(|&answer| as_rule(validate_pss_answer(answer)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_parse_numeric() {
        assert_eq!(parse_numeric("70"), Some(70.0));
        assert_eq!(parse_numeric("  72.5 "), Some(72.5));
        assert_eq!(parse_numeric(""), None);
        assert_eq!(parse_numeric("   "), None);
        assert_eq!(parse_numeric("abc"), None);
        assert_eq!(parse_numeric("NaN"), None);
        assert_eq!(parse_numeric("inf"), None);
    }

    #[test]
    fn test_validate_weight() {
        assert!(validate_weight(70.0).is_ok());
        assert!(validate_weight(2.0).is_ok());
        assert!(validate_weight(500.0).is_ok());
        assert!(validate_weight(1.0).is_err());
        assert!(validate_weight(600.0).is_err());
        assert!(validate_weight(f64::NAN).is_err());
        assert!(validate_weight(f64::INFINITY).is_err());
    }

    #[test]
    fn test_validate_height_cm() {
        assert!(validate_height_cm(170.0).is_ok());
        assert!(validate_height_cm(50.0).is_ok());
        assert!(validate_height_cm(300.0).is_ok());
        assert!(validate_height_cm(49.9).is_err());
        assert!(validate_height_cm(300.1).is_err());
        assert!(validate_height_cm(-10.0).is_err());
        assert!(validate_height_cm(f64::NAN).is_err());
    }

    #[test]
    fn test_validate_girth_cm() {
        assert!(validate_girth_cm(80.0).is_ok());
        assert!(validate_girth_cm(5.0).is_err());
        assert!(validate_girth_cm(f64::NEG_INFINITY).is_err());
    }

    #[test]
    fn test_validate_percentage() {
        assert!(validate_percentage(0.0).is_ok());
        assert!(validate_percentage(100.0).is_ok());
        assert!(validate_percentage(-1.0).is_err());
        assert!(validate_percentage(101.0).is_err());
    }

    #[test]
    fn test_validate_target_body_fat() {
        assert!(validate_target_body_fat(0.0).is_ok());
        assert!(validate_target_body_fat(99.9).is_ok());
        assert!(validate_target_body_fat(100.0).is_err());
        assert!(validate_target_body_fat(-0.1).is_err());
        assert!(validate_target_body_fat(f64::NAN).is_err());
    }

    #[test]
    fn test_rules_take_values() {
        assert!(weight_rule(70.0).is_ok());
        assert!(height_rule(20.0).is_err());
        assert!(adult_age_rule(40).is_ok());
        assert_eq!(target_body_fat_rule(100.0).unwrap_err().code, "range");
    }

    #[test]
    fn test_validate_adult_age() {
        assert!(validate_adult_age(18).is_ok());
        assert!(validate_adult_age(17).is_err());
        assert!(validate_adult_age(121).is_err());
    }

    #[test]
    fn test_validate_pss_answer() {
        assert!(validate_pss_answer(0).is_ok());
        assert!(validate_pss_answer(4).is_ok());
        assert!(validate_pss_answer(5).is_err());
    }

    #[test]
    fn test_field_display_labels() {
        assert_eq!(get_field_display_label("waist_cm"), "Waist");
        assert_eq!(get_field_display_label("a1c_percent"), "HbA1c");
        assert_eq!(get_field_display_label("unknown_field"), "unknown_field");
    }

    #[test]
    fn test_validation_error() {
        let err = ValidationError::new("height_cm", "must be at least 50 cm");
        assert_eq!(err.field, "height_cm");
        assert_eq!(err.display_label, "Height");
        assert_eq!(err.user_message(), "Height: must be at least 50 cm");
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        #[test]
        fn prop_valid_height_range(height in 50.0f64..=300.0) {
            prop_assert!(validate_height_cm(height).is_ok());
        }

        #[test]
        fn prop_invalid_height_below_min(height in 0.0f64..50.0) {
            prop_assert!(validate_height_cm(height).is_err());
        }

        #[test]
        fn prop_parse_numeric_roundtrips_display(value in -1000.0f64..1000.0) {
            let text = format!("{:.1}", value);
            let parsed = parse_numeric(&text).unwrap();
            prop_assert!((parsed - value).abs() <= 0.05 + 1e-9);
        }
    }
}
