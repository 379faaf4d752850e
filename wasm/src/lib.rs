//! Health Calculators WASM Module
//!
//! Browser bindings for the calculation core. Every function takes and
//! returns JSON strings; failures come back as an `ErrorResponse` body
//! (`{"error": {"code", "message", "field"}}`) rather than a thrown value.

use serde::Serialize;
use serde_json::Value;
use wasm_bindgen::prelude::*;

use healthcalc_shared::{
    classify, compute, convert, convert_form_values, CalcError, CalcResult, CalculatorInput, CalculatorReport,
    Category, ClassificationContext, DisplayResult, EngineConfig, FormState, MeasurementUnit, Metric, UnitSystem,
};

/// Typed report plus its display form
#[derive(Serialize)]
struct Computed {
    report: CalculatorReport,
    display: DisplayResult,
}

fn parse<T: serde::de::DeserializeOwned>(field: &'static str, json: &str) -> CalcResult<T> {
    serde_json::from_str(json).map_err(|err| CalcError::invalid(field, err.to_string()))
}

fn to_json<T: Serialize>(value: &T) -> CalcResult<String> {
    serde_json::to_string(value).map_err(|err| CalcError::invalid("output", err.to_string()))
}

/// Serialize the success value or the error body
fn respond<T: Serialize>(result: CalcResult<T>) -> String {
    match result.and_then(|value| to_json(&value)) {
        Ok(json) => json,
        Err(err) => {
            tracing::debug!(code = err.code(), "returning error response");
            // ErrorResponse holds only strings, so this cannot fail
            serde_json::to_string(&err.to_response()).unwrap_or_default()
        }
    }
}

/// Defaults overridden by an optional TOML document
fn engine_config(toml: &str) -> CalcResult<EngineConfig> {
    if toml.trim().is_empty() {
        Ok(EngineConfig::default())
    } else {
        EngineConfig::from_toml_str(toml)
    }
}

/// Validate a TOML configuration and return the effective settings as JSON
#[wasm_bindgen]
pub fn load_config(toml: &str) -> String {
    respond(engine_config(toml))
}

/// Run one calculator
///
/// `input` is a tagged calculator input, e.g.
/// `{"calculator": "bmi", "unit_system": "imperial", "weight": 154, "height": 69}`.
/// `config_toml` may be empty for defaults.
#[wasm_bindgen]
pub fn compute_json(input: &str, config_toml: &str) -> String {
    respond(run_calculator(input, config_toml))
}

fn run_calculator(input: &str, config_toml: &str) -> CalcResult<Computed> {
    let config = engine_config(config_toml)?;
    let input: CalculatorInput = parse("input", input)?;
    let report = compute(&input, &config)?;
    let display = report.display(&config);
    Ok(Computed { report, display })
}

/// Convert a value between two units of the same dimension
///
/// Units are JSON, e.g. `{"dimension": "length", "unit": "inches"}`.
/// Returns `undefined` for mismatched dimensions or non-finite values.
#[wasm_bindgen]
pub fn convert_value(value: f64, from: &str, to: &str) -> Option<f64> {
    let from: MeasurementUnit = serde_json::from_str(from).ok()?;
    let to: MeasurementUnit = serde_json::from_str(to).ok()?;
    convert(value, from, to)
}

/// Rewrite a form's measurement fields in another unit system
#[wasm_bindgen]
pub fn convert_form_json(form: &str, to_system: &str) -> String {
    respond(convert_form(form, to_system))
}

fn convert_form(form: &str, to_system: &str) -> CalcResult<FormState> {
    let form: FormState = parse("form", form)?;
    let to: UnitSystem = serde_json::from_value(Value::String(to_system.trim().to_lowercase()))
        .map_err(|err| CalcError::invalid("unit_system", err.to_string()))?;
    Ok(convert_form_values(&form, to))
}

/// Classify a single value, e.g. `classify_json("bmi", 27.0, "{}")`
#[wasm_bindgen]
pub fn classify_json(metric: &str, value: f64, context: &str) -> String {
    respond(classify_value(metric, value, context))
}

fn classify_value(metric: &str, value: f64, context: &str) -> CalcResult<Category> {
    let metric: Metric = metric.parse().map_err(|err: String| CalcError::invalid("metric", err))?;
    let context: ClassificationContext = if context.trim().is_empty() {
        ClassificationContext::default()
    } else {
        parse("context", context)?
    };
    classify(metric, value, &context)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn json(raw: &str) -> Value {
        serde_json::from_str(raw).unwrap()
    }

    #[test]
    fn test_compute_bmi() {
        let out = json(&compute_json(
            r#"{"calculator": "bmi", "weight": 70, "height": 175}"#,
            "",
        ));
        assert_eq!(out["report"]["calculator"], "bmi");
        assert_eq!(out["display"]["values"][0]["text"], "22.9 kg/m²");
        assert_eq!(out["display"]["categories"][0]["label"], "Normal");
    }

    #[test]
    fn test_compute_respects_config() {
        let out = json(&compute_json(
            r#"{"calculator": "bmi", "weight": 70, "height": 175}"#,
            "display_decimals = 2",
        ));
        assert_eq!(out["display"]["values"][0]["text"], "22.86 kg/m²");
    }

    #[test]
    fn test_compute_validation_error_body() {
        let out = json(&compute_json(
            r#"{"calculator": "bmi", "weight": 70, "height": 20}"#,
            "",
        ));
        assert_eq!(out["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(out["error"]["field"], "height");
    }

    #[test]
    fn test_compute_malformed_input() {
        let out = json(&compute_json("not json", ""));
        assert_eq!(out["error"]["code"], "INVALID_INPUT");
        assert_eq!(out["error"]["field"], "input");
    }

    #[test]
    fn test_convert_value() {
        let inches = r#"{"dimension": "length", "unit": "inches"}"#;
        let cm = r#"{"dimension": "length", "unit": "cm"}"#;
        let kg = r#"{"dimension": "weight", "unit": "kg"}"#;
        let converted = convert_value(70.0, inches, cm).unwrap();
        assert!((converted - 177.8).abs() < 1e-9);
        assert_eq!(convert_value(70.0, inches, kg), None);
        assert_eq!(convert_value(70.0, "bogus", cm), None);
    }

    #[test]
    fn test_convert_form() {
        let form = r#"{"unit_system": "metric", "fields": {"height": {"kind": "length", "raw": "180"}}}"#;
        let out = json(&convert_form_json(form, "imperial"));
        assert_eq!(out["unit_system"], "imperial");
        assert_eq!(out["fields"]["height"]["raw"], "70.9");
    }

    #[test]
    fn test_classify() {
        let out = json(&classify_json("bmi", 25.0, ""));
        assert_eq!(out["label"], "Overweight");

        let out = json(&classify_json("whr", 0.9, r#"{"sex": "female"}"#));
        assert_eq!(out["metric"], "waist_to_hip");

        let out = json(&classify_json("whr", 0.9, "{}"));
        assert_eq!(out["error"]["field"], "sex");

        let out = json(&classify_json("height", 1.0, ""));
        assert_eq!(out["error"]["code"], "INVALID_INPUT");
    }

    #[test]
    fn test_load_config() {
        let out = json(&load_config("[sleep]\ndefault_latency_minutes = 20"));
        assert_eq!(out["sleep"]["default_latency_minutes"], 20);

        let out = json(&load_config("display_decimals = 9"));
        assert_eq!(out["error"]["code"], "CONFIG_ERROR");
    }
}
