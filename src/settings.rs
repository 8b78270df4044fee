//! # Scenario settings
//!
//! ## Purpose
//! One serializable configuration for a reduction-diagram run: temperature grid, reference
//! temperature, crossover solver and its tolerances, default phases of the species, the
//! H2O phase rule and the log level. Every field has a default, so a JSON file only needs
//! the fields that differ from the reference scenario.
//!
//! ## Configuration Format
//! ```json
//! {
//!   "t_min": 373.0,
//!   "t_max": 1473.0,
//!   "n_points": 100,
//!   "reference_temperature": 298.0,
//!   "initial_guess": 500.0,
//!   "solver": "secant",
//!   "solver_config": { "max_iter": 50, "x_tol": 1e-10, "f_tol": 1e-9, "step": 1.0 },
//!   "phase_defaults": { "Fe2O3": "solid", "Fe3O4": "solid", "FeO": "solid",
//!                       "Fe": "alpha", "H2O": "gas", "H2": "gas" },
//!   "water_phase": { "fixed": "gas" },
//!   "log_level": "info"
//! }
//! ```
//!
//! ## Usage
//! ```rust
//! use ReduThe::settings::ScenarioConfig;
//! let config = ScenarioConfig::default();
//! config.validate().unwrap();
//! let grid = config.temperature_grid();
//! assert_eq!(grid.len(), 100);
//! assert_eq!(grid[99], 1473.0);
//! ```
use crate::ChemEquilibrium::Reactions::WaterPhaseRule;
use crate::ChemEquilibrium::ReductionEquilibrium::ReductionEquilibrium;
use crate::Numerics::root_finding::{RootSolver, SolverConfig, SolverKind};
use crate::Thermodynamics::ShomateEvaluator::ShomateEvaluator;
use crate::Thermodynamics::Species::PhaseDefaults;
use log::{LevelFilter, info};
use nalgebra::DVector;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read or write config: {0}")]
    Io(#[from] std::io::Error),
    #[error("bad config json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Scenario of one run. `Default` is the reference scenario: 100 points on [373, 1473] K,
/// reference values at 298 K, secant from 500 K, H2O gas everywhere.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioConfig {
    pub t_min: f64,
    pub t_max: f64,
    pub n_points: usize,
    /// temperature of the reference value printout, K
    pub reference_temperature: f64,
    /// starting point of the crossover search, K
    pub initial_guess: f64,
    pub solver: SolverKind,
    pub solver_config: SolverConfig,
    pub phase_defaults: PhaseDefaults,
    pub water_phase: WaterPhaseRule,
    /// off, error, warn, info, debug or trace
    pub log_level: String,
}

impl Default for ScenarioConfig {
    fn default() -> Self {
        Self {
            t_min: 373.0,
            t_max: 1473.0,
            n_points: 100,
            reference_temperature: 298.0,
            initial_guess: 500.0,
            solver: SolverKind::Secant,
            solver_config: SolverConfig::default(),
            phase_defaults: PhaseDefaults::default(),
            water_phase: WaterPhaseRule::default(),
            log_level: "info".to_string(),
        }
    }
}

impl ScenarioConfig {
    /// Reads and validates a JSON scenario file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: ScenarioConfig = serde_json::from_str(&content)?;
        config.validate()?;
        info!("scenario loaded from {}", path.as_ref().display());
        Ok(config)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: String| Err(ConfigError::Invalid(msg));
        if !self.t_min.is_finite() || !self.t_max.is_finite() {
            return invalid(format!(
                "temperature grid bounds must be finite, got {} and {}",
                self.t_min, self.t_max
            ));
        }
        if self.t_min >= self.t_max {
            return invalid(format!(
                "t_min ({}) must be below t_max ({})",
                self.t_min, self.t_max
            ));
        }
        if self.n_points < 2 {
            return invalid(format!("n_points must be at least 2, got {}", self.n_points));
        }
        if !self.reference_temperature.is_finite() || self.reference_temperature <= 0.0 {
            return invalid(format!(
                "reference_temperature must be positive, got {}",
                self.reference_temperature
            ));
        }
        if !self.initial_guess.is_finite() || self.initial_guess <= 0.0 {
            return invalid(format!(
                "initial_guess must be positive, got {}",
                self.initial_guess
            ));
        }
        if let WaterPhaseRule::LiquidBelow(t) = self.water_phase {
            if !t.is_finite() {
                return invalid(format!("water phase switch temperature is {}", t));
            }
        }
        self.solver_config
            .validate()
            .map_err(|reason| ConfigError::Invalid(reason.to_string()))?;
        self.log_level_filter()?;
        Ok(())
    }

    /// `n_points` evenly spaced temperatures from `t_min` to exactly `t_max`
    pub fn temperature_grid(&self) -> DVector<f64> {
        let n = self.n_points;
        if n < 2 {
            return DVector::from_element(n, self.t_min);
        }
        let step = (self.t_max - self.t_min) / (n - 1) as f64;
        DVector::from_fn(n, |i, _| {
            if i == n - 1 {
                self.t_max
            } else {
                self.t_min + i as f64 * step
            }
        })
    }

    pub fn log_level_filter(&self) -> Result<LevelFilter, ConfigError> {
        LevelFilter::from_str(&self.log_level)
            .map_err(|_| ConfigError::Invalid(format!("unknown log level '{}'", self.log_level)))
    }

    pub fn evaluator(&self) -> ShomateEvaluator {
        ShomateEvaluator::new(self.phase_defaults)
    }

    pub fn equilibrium(&self) -> ReductionEquilibrium {
        ReductionEquilibrium::new(self.evaluator(), self.water_phase)
    }

    pub fn root_solver(&self) -> RootSolver {
        RootSolver::from_kind(self.solver, self.solver_config)
    }
}
