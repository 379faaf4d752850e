//! Formula results and their display form
//!
//! Calculators report every numeric output as a named `FormulaOutput`
//! tagged with the formula that produced it. `aggregate` turns one result
//! plus its categories into the immutable object the presentation layer
//! renders.

use serde::Serialize;

use crate::calculators::CalculatorKind;
use crate::classification::{Category, Metric};
use crate::config::EngineConfig;
use crate::formulas::Formula;
use crate::interpretation::{joint_interpretations, Interpretation};
use crate::units::round_to;

/// Caveats attached to a result
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultFlag {
    /// Formula applied outside the population it was fitted on
    LowerConfidence,
    /// An input was clamped into the formula's fitted range
    InputClamped,
}

impl ResultFlag {
    pub fn description(&self) -> &'static str {
        match self {
            ResultFlag::LowerConfidence => "Estimate is less reliable for this age group",
            ResultFlag::InputClamped => "An input was outside the formula's fitted range and was clamped",
        }
    }
}

/// One named numeric output
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormulaOutput {
    pub name: &'static str,
    pub value: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<&'static str>,
    pub formula: Formula,
    /// Fixed precision; `None` uses the configured display precision
    #[serde(skip_serializing_if = "Option::is_none")]
    pub decimals: Option<u32>,
}

impl FormulaOutput {
    pub fn new(name: &'static str, value: f64, formula: Formula) -> Self {
        Self {
            name,
            value,
            unit: None,
            formula,
            decimals: None,
        }
    }

    pub fn unit(mut self, unit: &'static str) -> Self {
        self.unit = Some(unit);
        self
    }

    /// Fixed display precision, e.g. for small ratios
    pub fn decimals(mut self, decimals: u32) -> Self {
        self.decimals = Some(decimals);
        self
    }

    /// Counts and scores shown without decimals
    pub fn whole(self) -> Self {
        self.decimals(0)
    }
}

/// A non-numeric output such as a date or a shape name
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextOutput {
    pub name: &'static str,
    pub value: String,
}

impl TextOutput {
    pub fn new(name: &'static str, value: impl Into<String>) -> Self {
        Self {
            name,
            value: value.into(),
        }
    }
}

/// Every output of one calculator run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormulaResult {
    pub calculator: CalculatorKind,
    pub outputs: Vec<FormulaOutput>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<TextOutput>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub flags: Vec<ResultFlag>,
}

impl FormulaResult {
    pub fn new(calculator: CalculatorKind) -> Self {
        Self {
            calculator,
            outputs: Vec::new(),
            details: Vec::new(),
            flags: Vec::new(),
        }
    }

    pub fn output(mut self, output: FormulaOutput) -> Self {
        self.outputs.push(output);
        self
    }

    pub fn detail(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.details.push(TextOutput::new(name, value));
        self
    }

    pub fn flag(mut self, flag: ResultFlag) -> Self {
        if !self.flags.contains(&flag) {
            self.flags.push(flag);
        }
        self
    }

    /// Value of the named output
    pub fn get(&self, name: &str) -> Option<f64> {
        self.outputs
            .iter()
            .find(|output| output.name == name)
            .map(|output| output.value)
    }
}

// ============================================================================
// Display
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayValue {
    pub name: &'static str,
    /// Rounded value
    pub value: f64,
    /// Rounded value with its unit, e.g. "22.9 kg/m²"
    pub text: String,
    pub reference: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayCategory {
    pub metric: Metric,
    pub label: &'static str,
    pub color: &'static str,
    pub ordinal: u8,
}

impl From<&Category> for DisplayCategory {
    fn from(category: &Category) -> Self {
        Self {
            metric: category.metric,
            label: category.label,
            color: category.color.hex(),
            ordinal: category.ordinal,
        }
    }
}

/// Everything shown for one submission
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DisplayResult {
    pub calculator: CalculatorKind,
    pub values: Vec<DisplayValue>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<TextOutput>,
    pub categories: Vec<DisplayCategory>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub interpretations: Vec<Interpretation>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<&'static str>,
}

fn format_value(value: f64, decimals: u32, unit: Option<&str>) -> String {
    let number = format!("{:.*}", decimals as usize, value);
    match unit {
        Some(unit) if unit.starts_with('%') => format!("{number}{unit}"),
        Some(unit) => format!("{number} {unit}"),
        None => number,
    }
}

/// Assemble the display form of one result
pub fn aggregate(result: &FormulaResult, categories: &[Category], config: &EngineConfig) -> DisplayResult {
    let values = result
        .outputs
        .iter()
        .map(|output| {
            let decimals = output.decimals.unwrap_or(config.display_decimals);
            let value = round_to(output.value, decimals);
            DisplayValue {
                name: output.name,
                value,
                text: format_value(value, decimals, output.unit),
                reference: output.formula.reference(),
            }
        })
        .collect();

    DisplayResult {
        calculator: result.calculator,
        values,
        details: result.details.clone(),
        categories: categories.iter().map(DisplayCategory::from).collect(),
        interpretations: joint_interpretations(categories),
        notes: result.flags.iter().map(ResultFlag::description).collect(),
    }
}
