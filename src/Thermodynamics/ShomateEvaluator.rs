//! # Thermodynamic property evaluator
//!
//! ## Aim
//! Maps (species, temperature, phase) to Cp, H, S and G of the species using the static
//! Shomate table of [`crate::Thermodynamics::ShomateData`].
//!
//! ## Main Data Structures and Logic
//! - `ShomateEvaluator`: holds the explicit per-species default phases and does the lookups
//! - `Evaluation`: either G alone or all properties, following the `want_all` flag of the caller
//! - free functions `G_Fe2O3`, `G_Fe3O4`, `G_FeO`, `G_Fe`, `G_H2O`, `G_H2`: one entry point per species
//!
//! ## Behaviour at the range limits
//! A temperature (or phase) with no matching segment is an error, never an extrapolation:
//! the call returns `ThermoError::OutOfRange` with species, T and phase.
//!
//! ## Usage
//! ```rust
//! use ReduThe::Thermodynamics::ShomateEvaluator::ShomateEvaluator;
//! use ReduThe::Thermodynamics::Species::{Phase, PhaseDefaults, Species};
//! let evaluator = ShomateEvaluator::new(PhaseDefaults::default());
//! let g = evaluator.gibbs(Species::Fe2O3, 298.0, None).unwrap();
//! assert!((g + 851.55).abs() < 0.01);
//! let water = evaluator.properties(Species::H2O, 298.0, Some(Phase::Liquid)).unwrap();
//! assert!(water.gf < -300.0);
//! assert!(evaluator.gibbs(Species::H2O, 298.0, Some(Phase::Gas)).is_err());
//! ```
#![allow(non_snake_case)]
use crate::Thermodynamics::Shomate::{ThermoError, ThermoProperties, select_segment};
use crate::Thermodynamics::ShomateData::blocks_for;
use crate::Thermodynamics::Species::{Phase, PhaseDefaults, Species};
use log::debug;
use nalgebra::DVector;
use prettytable::{Cell, Row, Table};

/// result of one evaluation: G only, or (Cp, H, S, G)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Evaluation {
    Gibbs(f64),
    All(ThermoProperties),
}

impl Evaluation {
    pub fn gibbs(&self) -> f64 {
        match self {
            Evaluation::Gibbs(g) => *g,
            Evaluation::All(props) => props.gf,
        }
    }

    /// (H, S, G) when all properties were requested
    pub fn hsg(&self) -> Option<(f64, f64, f64)> {
        match self {
            Evaluation::Gibbs(_) => None,
            Evaluation::All(p) => Some((p.hf, p.sf, p.gf)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ShomateEvaluator {
    pub defaults: PhaseDefaults,
}

impl ShomateEvaluator {
    pub fn new(defaults: PhaseDefaults) -> Self {
        Self { defaults }
    }

    /// Cp, H, S and G of the species at T. `phase = None` uses the configured default phase.
    pub fn properties(
        &self,
        species: Species,
        T: f64,
        phase: Option<Phase>,
    ) -> Result<ThermoProperties, ThermoError> {
        let phase = self.defaults.resolve(species, phase);
        let segment = select_segment(species, blocks_for(species), T, phase)?;
        debug!(
            "{} ({}) at {} K: segment {}-{} K",
            species, phase, T, segment.t_min, segment.t_max
        );
        Ok(ThermoProperties::from_segment(T, segment))
    }

    /// standard Gibbs free energy, kJ/mol
    pub fn gibbs(&self, species: Species, T: f64, phase: Option<Phase>) -> Result<f64, ThermoError> {
        Ok(self.properties(species, T, phase)?.gf)
    }

    pub fn evaluate(
        &self,
        species: Species,
        T: f64,
        phase: Option<Phase>,
        want_all: bool,
    ) -> Result<Evaluation, ThermoError> {
        let props = self.properties(species, T, phase)?;
        if want_all {
            Ok(Evaluation::All(props))
        } else {
            Ok(Evaluation::Gibbs(props.gf))
        }
    }

    /// Same as [`Self::evaluate`] with the phase given by name. A name that is not a phase
    /// matches no segment and is reported as OutOfRange with the name as given.
    pub fn evaluate_named(
        &self,
        species: Species,
        T: f64,
        phase: Option<&str>,
        want_all: bool,
    ) -> Result<Evaluation, ThermoError> {
        let phase = match phase {
            Some(name) => Some(
                name.parse::<Phase>()
                    .map_err(|_| ThermoError::out_of_range(species, T, name))?,
            ),
            None => None,
        };
        self.evaluate(species, T, phase, want_all)
    }

    /// G over an array of temperatures; element i equals `gibbs(species, T[i], phase)`.
    /// The first out-of-range element aborts the whole evaluation.
    pub fn gibbs_vec(
        &self,
        species: Species,
        temperatures: &DVector<f64>,
        phase: Option<Phase>,
    ) -> Result<DVector<f64>, ThermoError> {
        let values = temperatures
            .iter()
            .map(|&T| self.gibbs(species, T, phase))
            .collect::<Result<Vec<f64>, ThermoError>>()?;
        Ok(DVector::from_vec(values))
    }

    pub fn properties_vec(
        &self,
        species: Species,
        temperatures: &[f64],
        phase: Option<Phase>,
    ) -> Result<Vec<ThermoProperties>, ThermoError> {
        temperatures
            .iter()
            .map(|&T| self.properties(species, T, phase))
            .collect()
    }

    /// Table of Cp, H, S, G and H-H298 of a species over temperatures, for diagnostics
    pub fn property_table(
        &self,
        species: Species,
        phase: Option<Phase>,
        temperatures: &[f64],
    ) -> Result<Table, ThermoError> {
        let phase = self.defaults.resolve(species, phase);
        let mut table = Table::new();
        table.add_row(Row::new(vec![
            Cell::new(&format!("{} ({})", species, phase)),
            Cell::new("Cp, J/mol/K"),
            Cell::new("H, kJ/mol"),
            Cell::new("S, J/mol/K"),
            Cell::new("G, kJ/mol"),
            Cell::new("H-H298, kJ/mol"),
        ]));
        for props in self.properties_vec(species, temperatures, Some(phase))? {
            let sensible = props
                .sensible_enthalpy()
                .map(|h| format!("{:.4}", h))
                .unwrap_or_else(|| "-".to_string());
            table.add_row(Row::new(vec![
                Cell::new(&format!("{}", props.temperature)),
                Cell::new(&format!("{:.4}", props.cp)),
                Cell::new(&format!("{:.4}", props.hf)),
                Cell::new(&format!("{:.4}", props.sf)),
                Cell::new(&format!("{:.4}", props.gf)),
                Cell::new(&sensible),
            ]));
        }
        Ok(table)
    }
}

/////////////////////////////////ONE FUNCTION PER SPECIES//////////////////////////////////////////
/// Fe2O3, solid only: 298-950-1050-2500 K
pub fn G_Fe2O3(
    T: f64,
    phase: Option<Phase>,
    defaults: &PhaseDefaults,
    want_all: bool,
) -> Result<Evaluation, ThermoError> {
    ShomateEvaluator::new(*defaults).evaluate(Species::Fe2O3, T, phase, want_all)
}

/// Fe3O4, solid only: 298-900-3000 K
pub fn G_Fe3O4(
    T: f64,
    phase: Option<Phase>,
    defaults: &PhaseDefaults,
    want_all: bool,
) -> Result<Evaluation, ThermoError> {
    ShomateEvaluator::new(*defaults).evaluate(Species::Fe3O4, T, phase, want_all)
}

/// FeO: solid 298-1650 K, liquid 1650-5000 K
pub fn G_FeO(
    T: f64,
    phase: Option<Phase>,
    defaults: &PhaseDefaults,
    want_all: bool,
) -> Result<Evaluation, ThermoError> {
    ShomateEvaluator::new(*defaults).evaluate(Species::FeO, T, phase, want_all)
}

/// Fe: alpha 298-1809 K (four sub-fits), delta 298-1809 K, liquid 1809-3133.345 K
pub fn G_Fe(
    T: f64,
    phase: Option<Phase>,
    defaults: &PhaseDefaults,
    want_all: bool,
) -> Result<Evaluation, ThermoError> {
    ShomateEvaluator::new(*defaults).evaluate(Species::Fe, T, phase, want_all)
}

/// H2O: gas 300-1700-6000 K, liquid 298-500 K
pub fn G_H2O(
    T: f64,
    phase: Option<Phase>,
    defaults: &PhaseDefaults,
    want_all: bool,
) -> Result<Evaluation, ThermoError> {
    ShomateEvaluator::new(*defaults).evaluate(Species::H2O, T, phase, want_all)
}

/// H2, gas only: 298-1000-2500-6000 K
pub fn G_H2(
    T: f64,
    phase: Option<Phase>,
    defaults: &PhaseDefaults,
    want_all: bool,
) -> Result<Evaluation, ThermoError> {
    ShomateEvaluator::new(*defaults).evaluate(Species::H2, T, phase, want_all)
}
