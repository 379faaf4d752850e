//! Form state unit toggling
//!
//! Calculator widgets keep their inputs as raw strings. When the user flips
//! between metric and imperial, every measurement field is rewritten in the
//! new unit system in one step; the old state is left untouched so a render
//! never observes a half-converted form.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::units::{round_to, UnitSystem, DISPLAY_DECIMALS};
use crate::validation::parse_numeric;

/// What a form field measures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    /// Height, girths, wingspan
    Length,
    /// Body weight, lifted totals
    Mass,
    /// Age, percentages, answers; never converted
    Other,
}

/// One raw form field as typed by the user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormField {
    pub kind: FieldKind,
    #[serde(default)]
    pub raw: String,
}

impl FormField {
    pub fn new(kind: FieldKind, raw: impl Into<String>) -> Self {
        Self {
            kind,
            raw: raw.into(),
        }
    }
}

/// Transient form state owned by a calculator widget
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormState {
    pub unit_system: UnitSystem,
    pub fields: BTreeMap<String, FormField>,
}

impl FormState {
    pub fn new(unit_system: UnitSystem) -> Self {
        Self {
            unit_system,
            fields: BTreeMap::new(),
        }
    }

    /// Builder-style field insertion
    pub fn with_field(mut self, name: &str, kind: FieldKind, raw: &str) -> Self {
        self.fields.insert(name.to_string(), FormField::new(kind, raw));
        self
    }

    /// Parsed numeric value of a field, if present and numeric
    pub fn numeric(&self, name: &str) -> Option<f64> {
        self.fields.get(name).and_then(|f| parse_numeric(&f.raw))
    }
}

/// Convert one raw field between unit systems
///
/// Empty and non-numeric values are returned unchanged.
fn convert_raw(raw: &str, kind: FieldKind, from: UnitSystem, to: UnitSystem) -> String {
    let Some(value) = parse_numeric(raw) else {
        return raw.to_string();
    };
    let converted = match kind {
        FieldKind::Length => to.length_unit().from_cm(from.length_to_cm(value)),
        FieldKind::Mass => to.weight_unit().from_kg(from.weight_to_kg(value)),
        FieldKind::Other => return raw.to_string(),
    };
    format_display(round_to(converted, DISPLAY_DECIMALS))
}

fn format_display(value: f64) -> String {
    let text = format!("{:.*}", DISPLAY_DECIMALS as usize, value);
    match text.strip_suffix(".0") {
        Some(whole) => whole.to_string(),
        None => text,
    }
}

/// Rewrite every measurement field of `state` in the `to` unit system
///
/// Returns a new state; the input is never mutated.
pub fn convert_form_values(state: &FormState, to: UnitSystem) -> FormState {
    if state.unit_system == to {
        return state.clone();
    }

    let fields = state
        .fields
        .iter()
        .map(|(name, field)| {
            let raw = convert_raw(&field.raw, field.kind, state.unit_system, to);
            (name.clone(), FormField::new(field.kind, raw))
        })
        .collect();

    tracing::debug!(from = ?state.unit_system, to = ?to, "converted form values");

    FormState {
        unit_system: to,
        fields,
    }
}
