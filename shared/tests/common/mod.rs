//! Common test utilities for integration tests
//!
//! Installs a test-writer tracing subscriber once per binary and wraps the
//! engine entry points so each test reads as input -> display.

#![allow(dead_code)]

use std::sync::Once;

use healthcalc_shared::{compute, evaluate, CalcResult, CalculatorInput, CalculatorReport, DisplayResult, EngineConfig};
use tracing_subscriber::EnvFilter;

static TRACING: Once = Once::new();

/// Route `tracing` output to the test harness; `RUST_LOG` overrides the level
pub fn init_tracing() {
    TRACING.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("healthcalc_shared=debug"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}

/// Engine under test
pub struct TestEngine {
    pub config: EngineConfig,
}

impl TestEngine {
    /// Engine with default configuration
    pub fn new() -> Self {
        init_tracing();
        Self {
            config: EngineConfig::default(),
        }
    }

    /// Engine with a TOML configuration applied over the defaults
    pub fn with_toml(toml: &str) -> Self {
        init_tracing();
        Self {
            config: EngineConfig::from_toml_str(toml).expect("test configuration must be valid"),
        }
    }

    /// Deserialize a tagged JSON input
    pub fn input(json: &str) -> CalculatorInput {
        serde_json::from_str(json).expect("test input must deserialize")
    }

    pub fn compute(&self, json: &str) -> CalcResult<CalculatorReport> {
        compute(&Self::input(json), &self.config)
    }

    pub fn display(&self, json: &str) -> CalcResult<DisplayResult> {
        evaluate(&Self::input(json), &self.config)
    }
}

/// Display text of the named value
pub fn text<'a>(display: &'a DisplayResult, name: &str) -> &'a str {
    display
        .values
        .iter()
        .find(|value| value.name == name)
        .map(|value| value.text.as_str())
        .unwrap_or_else(|| panic!("no value named {name}"))
}
