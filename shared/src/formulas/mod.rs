//! Formula library
//!
//! One pure function per published formula. Inputs are canonical units
//! (cm, kg, mg/dL, minutes); outputs are checked for finiteness, and any
//! input outside a formula's domain comes back as a `CalcError` instead of
//! NaN or infinity.

pub mod body;
pub mod dates;
pub mod energy;
pub mod glucose;
pub mod sleep;
pub mod strength;
pub mod stress;

use serde::{Deserialize, Serialize};
use std::fmt;

/// Biological sex for physiological formulas
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BiologicalSex {
    Male,
    Female,
}

impl std::str::FromStr for BiologicalSex {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "male" | "m" => Ok(BiologicalSex::Male),
            "female" | "f" => Ok(BiologicalSex::Female),
            _ => Err(format!("Unknown biological sex: {}", s)),
        }
    }
}

/// Identifies the formula (and variant) that produced a value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Formula {
    Bmi,
    Absi,
    AbsiZScore,
    WaistToHeight,
    WaistToHip,
    NavyBodyFat,
    DeurenbergBodyFat,
    RelativeFatMass,
    BoerLbm,
    JamesLbm,
    HumeLbm,
    PetersLbm,
    DevineIbw,
    RobinsonIbw,
    MillerIbw,
    HamwiIbw,
    MifflinStJeor,
    HarrisBenedict,
    KatchMcArdle,
    ActivityMultiplier,
    Wilks,
    Adag,
    FastingGlucose,
    SleepCycles,
    SleepDebt,
    Pss10,
    DrawLength,
    BodyShape,
    CalendarAge,
    /// Arithmetic on other outputs (fat mass, weight ranges, averages)
    Derived,
}

impl Formula {
    /// Short citation shown alongside results
    pub fn reference(&self) -> &'static str {
        match self {
            Formula::Bmi => "Quetelet index (WHO)",
            Formula::Absi | Formula::AbsiZScore => "Krakauer & Krakauer, 2012",
            Formula::WaistToHeight => "Ashwell & Hsieh, 2005",
            Formula::WaistToHip => "WHO expert consultation, 2008",
            Formula::NavyBodyFat => "Hodgdon & Beckett, 1984 (U.S. Navy)",
            Formula::DeurenbergBodyFat => "Deurenberg et al., 1991",
            Formula::RelativeFatMass => "Woolcott & Bergman, 2018",
            Formula::BoerLbm => "Boer, 1984",
            Formula::JamesLbm => "James, 1976",
            Formula::HumeLbm => "Hume, 1966",
            Formula::PetersLbm => "Peters et al., 2012",
            Formula::DevineIbw => "Devine, 1974",
            Formula::RobinsonIbw => "Robinson, 1983",
            Formula::MillerIbw => "Miller, 1983",
            Formula::HamwiIbw => "Hamwi, 1964",
            Formula::MifflinStJeor => "Mifflin-St Jeor, 1990",
            Formula::HarrisBenedict => "Harris-Benedict, revised 1984",
            Formula::KatchMcArdle => "Katch-McArdle",
            Formula::ActivityMultiplier => "Activity factor",
            Formula::Wilks => "Wilks, 1995",
            Formula::Adag => "ADAG study, Nathan et al., 2008",
            Formula::FastingGlucose => "ADA Standards of Care",
            Formula::SleepCycles => "90-minute sleep cycle",
            Formula::SleepDebt => "Cumulative sleep debt",
            Formula::Pss10 => "Cohen, 1983 (PSS-10)",
            Formula::DrawLength => "Wingspan / 2.5",
            Formula::BodyShape => "Girth ratio rules",
            Formula::CalendarAge => "Calendar arithmetic",
            Formula::Derived => "Derived",
        }
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.reference())
    }
}
