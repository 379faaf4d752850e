//! Engine configuration
//!
//! Configuration is layered:
//! 1. Default values (in code)
//! 2. An optional TOML document, either a file path (native hosts) or a
//!    string handed over by the browser
//!
//! There is no environment layer; the core reads nothing from the process.

use ::config::{Config, ConfigError, File, FileFormat};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::errors::CalcResult;
use crate::formulas::sleep::{CYCLE_MINUTES, DEFAULT_CYCLE_COUNTS, MAX_CYCLES, MAX_CYCLE_MINUTES};
use crate::formulas::BiologicalSex;
use crate::units::DISPLAY_DECIMALS;
use crate::validation::validate_target_body_fat;

/// Highest display precision accepted
pub const MAX_DISPLAY_DECIMALS: u32 = 4;

/// Engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Decimal places shown in display results
    pub display_decimals: u32,
    pub sleep: SleepConfig,
    pub sleep_debt: SleepDebtConfig,
    pub body_fat: BodyFatConfig,
}

/// Sleep cycle calculator settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SleepConfig {
    pub cycle_minutes: u32,
    /// Used when the input leaves the fall-asleep latency blank
    pub default_latency_minutes: u32,
    pub cycle_counts: Vec<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SleepDebtConfig {
    pub recovery_minutes_per_night: u32,
}

/// Default goal for "weight at target body fat"
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyFatConfig {
    pub target_percent_male: f64,
    pub target_percent_female: f64,
}

impl BodyFatConfig {
    pub fn target_percent(&self, sex: BiologicalSex) -> f64 {
        match sex {
            BiologicalSex::Male => self.target_percent_male,
            BiologicalSex::Female => self.target_percent_female,
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            display_decimals: DISPLAY_DECIMALS,
            sleep: SleepConfig {
                cycle_minutes: CYCLE_MINUTES,
                default_latency_minutes: 15,
                cycle_counts: DEFAULT_CYCLE_COUNTS.to_vec(),
            },
            sleep_debt: SleepDebtConfig {
                recovery_minutes_per_night: 60,
            },
            body_fat: BodyFatConfig {
                target_percent_male: 15.0,
                target_percent_female: 22.0,
            },
        }
    }
}

impl EngineConfig {
    /// Defaults overridden by a TOML document
    pub fn from_toml_str(toml: &str) -> CalcResult<Self> {
        Self::build(File::from_str(toml, FileFormat::Toml))
    }

    /// Defaults overridden by a TOML file, when one is given
    pub fn load(path: Option<&Path>) -> CalcResult<Self> {
        match path {
            Some(path) => Self::build(File::from(path).format(FileFormat::Toml)),
            None => {
                let config = Self::default();
                config.validate()?;
                Ok(config)
            }
        }
    }

    fn build<S>(source: S) -> CalcResult<Self>
    where
        S: ::config::Source + Send + Sync + 'static,
    {
        let config = Config::builder()
            // Start with defaults
            .add_source(Config::try_from(&EngineConfig::default())?)
            .add_source(source)
            .build()?;

        let engine: EngineConfig = config.try_deserialize()?;
        engine.validate()?;
        tracing::debug!(
            display_decimals = engine.display_decimals,
            cycle_minutes = engine.sleep.cycle_minutes,
            "engine configuration loaded"
        );
        Ok(engine)
    }

    /// Reject settings no calculator can work with
    pub fn validate(&self) -> CalcResult<()> {
        let reject = |message: String| -> CalcResult<()> { Err(ConfigError::Message(message).into()) };

        if self.display_decimals > MAX_DISPLAY_DECIMALS {
            return reject(format!(
                "display_decimals must be at most {MAX_DISPLAY_DECIMALS}, got {}",
                self.display_decimals
            ));
        }
        if !(1..=MAX_CYCLE_MINUTES).contains(&self.sleep.cycle_minutes) {
            return reject(format!(
                "sleep.cycle_minutes must be between 1 and {MAX_CYCLE_MINUTES}, got {}",
                self.sleep.cycle_minutes
            ));
        }
        if self.sleep.cycle_counts.is_empty() {
            return reject("sleep.cycle_counts must not be empty".to_string());
        }
        if let Some(count) = self.sleep.cycle_counts.iter().find(|count| !(1..=MAX_CYCLES).contains(*count)) {
            return reject(format!("sleep.cycle_counts entries must be between 1 and {MAX_CYCLES}, got {count}"));
        }
        if self.sleep_debt.recovery_minutes_per_night == 0 {
            return reject("sleep_debt.recovery_minutes_per_night must be positive".to_string());
        }
        for (name, target) in [
            ("body_fat.target_percent_male", self.body_fat.target_percent_male),
            ("body_fat.target_percent_female", self.body_fat.target_percent_female),
        ] {
            if let Err(message) = validate_target_body_fat(target) {
                return reject(format!("{name}: {message}, got {target}"));
            }
        }
        Ok(())
    }
}
