//! HbA1c and estimated average glucose
//!
//! One linear relation from the ADAG study drives both directions:
//! eAG(mg/dL) = 28.7 × A1c(%) - 46.7

use crate::errors::{ensure_finite, CalcError, CalcResult};

const ADAG_SLOPE: f64 = 28.7;
const ADAG_INTERCEPT: f64 = 46.7;

/// Lowest A1c (%) for which the ADAG line gives a positive glucose
pub const MIN_A1C_PERCENT: f64 = ADAG_INTERCEPT / ADAG_SLOPE;

/// Estimated average glucose (mg/dL) from HbA1c (%)
pub fn eag_from_a1c(a1c_percent: f64) -> CalcResult<f64> {
    if !a1c_percent.is_finite() {
        return Err(CalcError::invalid("a1c_percent", "must be a valid number"));
    }
    if a1c_percent <= MIN_A1C_PERCENT {
        return Err(CalcError::domain(
            "ADAG eAG",
            format!("A1c must exceed {MIN_A1C_PERCENT:.2}%"),
        ));
    }
    ensure_finite("eag", ADAG_SLOPE * a1c_percent - ADAG_INTERCEPT)
}

/// HbA1c (%) from estimated average glucose (mg/dL)
pub fn a1c_from_eag(eag_mgdl: f64) -> CalcResult<f64> {
    if !eag_mgdl.is_finite() {
        return Err(CalcError::invalid("eag_mgdl", "must be a valid number"));
    }
    if eag_mgdl <= 0.0 {
        return Err(CalcError::domain("ADAG A1c", "glucose must be positive"));
    }
    ensure_finite("a1c", (eag_mgdl + ADAG_INTERCEPT) / ADAG_SLOPE)
}
