//! # Equilibrium diagram of the hydrogen reduction of iron oxides
//!
//! Collects everything a presentation layer needs on one temperature grid:
//! species Gibbs energies, dG and ln K of the four reduction steps, the crossover
//! temperature Tc and, per reaction, the part of the grid where it is displayed
//! (reaction 1 everywhere, reactions 2 and 3 at T >= Tc, reaction 4 at T < Tc).
//! The diagram is plain data: it serializes to JSON and prints as tables.
use crate::ChemEquilibrium::Reactions::{StabilityWindow, ln_K_from_delta_G};
use crate::ChemEquilibrium::ReductionEquilibrium::ReductionEquilibrium;
use crate::Numerics::root_finding::{RootSolver, SolverError};
use crate::Thermodynamics::Shomate::ThermoError;
use crate::Thermodynamics::Species::Species;
use log::info;
use nalgebra::DVector;
use prettytable::{Cell, Row, Table, row};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DiagramError {
    #[error(transparent)]
    Thermo(#[from] ThermoError),
    #[error("crossover temperature: {0}")]
    Solver(#[from] SolverError),
    #[error("temperature grid is empty")]
    EmptyGrid,
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("inconsistent diagram: {0}")]
    Inconsistent(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeciesCurve {
    pub species: Species,
    /// kJ/mol
    pub gibbs: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReactionCurve {
    pub name: String,
    pub equation: String,
    pub window: StabilityWindow,
    /// kJ/mol
    pub delta_G: Vec<f64>,
    pub ln_K: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReductionDiagram {
    pub temperatures: Vec<f64>,
    pub crossover_temperature: f64,
    pub crossover_iterations: usize,
    pub species: Vec<SpeciesCurve>,
    pub reactions: Vec<ReactionCurve>,
}

impl ReductionDiagram {
    /// Evaluates every curve on `temperatures` and solves for Tc from `initial_guess`.
    /// Any evaluator failure on the grid aborts the whole computation.
    pub fn compute(
        equilibrium: &ReductionEquilibrium,
        temperatures: &DVector<f64>,
        solver: &RootSolver,
        initial_guess: f64,
    ) -> Result<Self, DiagramError> {
        if temperatures.is_empty() {
            return Err(DiagramError::EmptyGrid);
        }
        info!(
            "diagram on {} points, {} - {} K",
            temperatures.len(),
            temperatures[0],
            temperatures[temperatures.len() - 1]
        );
        let species = equilibrium
            .species_gibbs_vec(temperatures)?
            .into_iter()
            .map(|(species, g)| SpeciesCurve {
                species,
                gibbs: g.as_slice().to_vec(),
            })
            .collect();

        let delta_G = equilibrium.delta_G_vec(temperatures)?;
        let reactions = equilibrium
            .reactions
            .iter()
            .zip(delta_G)
            .map(|(reaction, dG)| {
                let ln_K = dG.zip_map(temperatures, ln_K_from_delta_G);
                ReactionCurve {
                    name: reaction.name.clone(),
                    equation: reaction.equation.clone(),
                    window: reaction.window,
                    delta_G: dG.as_slice().to_vec(),
                    ln_K: ln_K.as_slice().to_vec(),
                }
            })
            .collect();

        let crossover = equilibrium.find_crossover(solver, initial_guess)?;
        Ok(Self {
            temperatures: temperatures.as_slice().to_vec(),
            crossover_temperature: crossover.x,
            crossover_iterations: crossover.iterations,
            species,
            reactions,
        })
    }

    pub fn species_curve(&self, species: Species) -> Option<&SpeciesCurve> {
        self.species.iter().find(|c| c.species == species)
    }

    pub fn reaction_curve(&self, name: &str) -> Option<&ReactionCurve> {
        self.reactions.iter().find(|c| c.name == name)
    }

    /// (T, -ln K) points of a reaction inside its stability window
    pub fn displayed(&self, curve: &ReactionCurve) -> Vec<(f64, f64)> {
        self.temperatures
            .iter()
            .zip(&curve.ln_K)
            .filter(|(T, _)| curve.window.contains(**T, self.crossover_temperature))
            .map(|(T, lnK)| (*T, -lnK))
            .collect()
    }

    ////////////////////////////////////OUTPUT/////////////////////////////////////////////////////
    pub fn species_table(&self) -> Table {
        let mut table = Table::new();
        let mut header = vec!["T, K".to_string()];
        header.extend(self.species.iter().map(|c| format!("G({}), kJ/mol", c.species)));
        table.add_row(Row::new(header.iter().map(|h| Cell::new(h)).collect()));
        for (i, T) in self.temperatures.iter().enumerate() {
            let mut line = vec![format!("{:.2}", T)];
            line.extend(self.species.iter().map(|c| match c.gibbs.get(i) {
                Some(g) => format!("{:.4}", g),
                None => String::new(),
            }));
            table.add_row(Row::new(line.iter().map(|v| Cell::new(v)).collect()));
        }
        table
    }

    /// -ln K per reaction; points outside the window of a reaction are left blank
    pub fn reaction_table(&self) -> Table {
        let mut table = Table::new();
        let mut header = vec!["T, K".to_string()];
        header.extend(self.reactions.iter().map(|c| format!("-lnK {}", c.name)));
        table.add_row(Row::new(header.iter().map(|h| Cell::new(h)).collect()));
        for (i, &T) in self.temperatures.iter().enumerate() {
            let mut line = vec![format!("{:.2}", T)];
            line.extend(self.reactions.iter().map(|c| {
                match c.ln_K.get(i) {
                    Some(lnK) if c.window.contains(T, self.crossover_temperature) => {
                        format!("{:.4}", -lnK)
                    }
                    _ => String::new(),
                }
            }));
            table.add_row(Row::new(line.iter().map(|v| Cell::new(v)).collect()));
        }
        table
    }

    pub fn summary_table(&self) -> Table {
        let mut table = Table::new();
        table.add_row(row!["Reaction", "Equation", "Shown"]);
        for c in &self.reactions {
            let shown = match c.window {
                StabilityWindow::Everywhere => "all T".to_string(),
                StabilityWindow::AtOrAboveCrossover => {
                    format!("T >= {:.2} K", self.crossover_temperature)
                }
                StabilityWindow::BelowCrossover => {
                    format!("T < {:.2} K", self.crossover_temperature)
                }
            };
            table.add_row(row![c.name, c.equation, shown]);
        }
        table
    }

    pub fn pretty_print(&self) {
        println!(
            "crossover temperature Tc = {:.4} K ({} iterations)",
            self.crossover_temperature, self.crossover_iterations
        );
        self.summary_table().printstd();
        self.species_table().printstd();
        self.reaction_table().printstd();
    }

    pub fn to_json(&self) -> Result<String, DiagramError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn save_json<P: AsRef<Path>>(&self, path: P) -> Result<(), DiagramError> {
        fs::write(path.as_ref(), self.to_json()?)?;
        info!("diagram written to {}", path.as_ref().display());
        Ok(())
    }

    /// Reads a diagram written by `save_json` and checks it with `check_consistency`.
    pub fn load_json<P: AsRef<Path>>(path: P) -> Result<Self, DiagramError> {
        let content = fs::read_to_string(path)?;
        let diagram: Self = serde_json::from_str(&content)?;
        diagram.check_consistency()?;
        Ok(diagram)
    }

    /// Every curve must have one value per temperature of the grid.
    pub fn check_consistency(&self) -> Result<(), DiagramError> {
        let n = self.temperatures.len();
        if n == 0 {
            return Err(DiagramError::EmptyGrid);
        }
        let mismatch = |curve: &str, field: &str, len: usize| {
            Err(DiagramError::Inconsistent(format!(
                "{} of {} has {} values, grid has {}",
                field, curve, len, n
            )))
        };
        for c in &self.species {
            if c.gibbs.len() != n {
                return mismatch(&c.species.to_string(), "gibbs", c.gibbs.len());
            }
        }
        for c in &self.reactions {
            if c.delta_G.len() != n {
                return mismatch(&c.name, "delta_G", c.delta_G.len());
            }
            if c.ln_K.len() != n {
                return mismatch(&c.name, "ln_K", c.ln_K.len());
            }
        }
        Ok(())
    }
}
