//! Health Calculators Core
//!
//! Pure, synchronous calculation core behind the health calculators: unit
//! conversion, the formula library, band classification, cross-metric
//! interpretation and result aggregation. Nothing here holds state or
//! touches I/O beyond reading an optional configuration file.

pub mod calculators;
pub mod classification;
pub mod config;
pub mod errors;
pub mod form;
pub mod formulas;
pub mod inputs;
pub mod interpretation;
pub mod reference;
pub mod results;
pub mod units;
pub mod validation;

// Re-export commonly used items
pub use calculators::{compute, evaluate, CalculatorInput, CalculatorKind, CalculatorReport};
pub use classification::{classify, Category, ClassificationContext, Color, Metric};
pub use crate::config::EngineConfig;
pub use errors::{CalcError, CalcResult, ErrorDetail, ErrorResponse};
pub use form::{convert_form_values, FieldKind, FormField, FormState};
pub use formulas::{BiologicalSex, Formula};
pub use inputs::Normalize;
pub use interpretation::Interpretation;
pub use results::{aggregate, DisplayResult, FormulaOutput, FormulaResult, ResultFlag};
pub use units::{convert, from_canonical, to_canonical, GlucoseUnit, LengthUnit, MeasurementUnit, UnitSystem, WeightUnit};
pub use validation::ValidationError;
