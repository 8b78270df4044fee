//! # Reaction free energies and equilibrium constants of the reduction steps
//!
//! Combines species Gibbs energies from the [`ShomateEvaluator`] into dG and ln K of the four
//! reduction reactions, for one temperature or a whole grid, and exposes the scalar function
//! f(T) = G(Fe) + G(Fe3O4) - 4 G(FeO) whose root is the wustite stability limit Tc.
//!
//! No range checks are done here: any OutOfRange from the evaluator is returned as is.
//!
//! ## Usage
//! ```rust
//! use ReduThe::ChemEquilibrium::ReductionEquilibrium::ReductionEquilibrium;
//! use ReduThe::Numerics::root_finding::{RootSolver, SolverConfig};
//! let eq = ReductionEquilibrium::standard();
//! let dG = eq.delta_G(900.0).unwrap();
//! assert_eq!(dG.len(), 4);
//! let tc = eq.find_crossover(&RootSolver::secant(SolverConfig::default()), 500.0).unwrap();
//! assert!(tc.x > 298.0 && tc.x < 1650.0);
//! ```
use crate::ChemEquilibrium::Reactions::{Reaction, WaterPhaseRule, ln_K_from_delta_G};
use crate::Numerics::root_finding::{RootSolution, RootSolver, ScalarRootFinder, SolverError};
use crate::Thermodynamics::Shomate::ThermoError;
use crate::Thermodynamics::ShomateEvaluator::ShomateEvaluator;
use crate::Thermodynamics::Species::{PhaseDefaults, Species};
use log::{debug, info};
use nalgebra::DVector;

#[derive(Debug, Clone, PartialEq)]
pub struct ReductionEquilibrium {
    pub evaluator: ShomateEvaluator,
    pub water_rule: WaterPhaseRule,
    /// reactions (1)-(4)
    pub reactions: Vec<Reaction>,
    /// 4FeO = Fe + Fe3O4
    pub crossover_reaction: Reaction,
}

impl ReductionEquilibrium {
    pub fn new(evaluator: ShomateEvaluator, water_rule: WaterPhaseRule) -> Self {
        Self {
            evaluator,
            water_rule,
            reactions: Reaction::builtin_reductions(),
            crossover_reaction: Reaction::wustite_decomposition(),
        }
    }

    /// standard default phases, H2O as gas at every temperature
    pub fn standard() -> Self {
        Self::new(
            ShomateEvaluator::new(PhaseDefaults::default()),
            WaterPhaseRule::default(),
        )
    }

    /// G of every species at T, in `Species::ALL` order. H2O follows the water rule.
    pub fn species_gibbs(&self, T: f64) -> Result<Vec<(Species, f64)>, ThermoError> {
        Species::ALL
            .iter()
            .map(|&sp| {
                let phase = match sp {
                    Species::H2O => Some(self.water_rule.phase_at(T)),
                    _ => None,
                };
                Ok((sp, self.evaluator.gibbs(sp, T, phase)?))
            })
            .collect()
    }

    /// dG of reactions (1)-(4) at T, kJ/mol
    pub fn delta_G(&self, T: f64) -> Result<Vec<f64>, ThermoError> {
        self.reactions
            .iter()
            .map(|r| r.delta_G(&self.evaluator, T, &self.water_rule))
            .collect()
    }

    /// ln K of reactions (1)-(4) at T
    pub fn ln_K(&self, T: f64) -> Result<Vec<f64>, ThermoError> {
        Ok(self
            .delta_G(T)?
            .into_iter()
            .map(|dG| ln_K_from_delta_G(dG, T))
            .collect())
    }

    /// dG of every reaction over a temperature grid, one vector per reaction
    pub fn delta_G_vec(&self, temperatures: &DVector<f64>) -> Result<Vec<DVector<f64>>, ThermoError> {
        self.reactions
            .iter()
            .map(|r| {
                let values = temperatures
                    .iter()
                    .map(|&T| r.delta_G(&self.evaluator, T, &self.water_rule))
                    .collect::<Result<Vec<f64>, ThermoError>>()?;
                Ok(DVector::from_vec(values))
            })
            .collect()
    }

    pub fn ln_K_vec(&self, temperatures: &DVector<f64>) -> Result<Vec<DVector<f64>>, ThermoError> {
        Ok(self
            .delta_G_vec(temperatures)?
            .into_iter()
            .map(|dG| dG.zip_map(temperatures, ln_K_from_delta_G))
            .collect())
    }

    /// G of every species over the grid, in `Species::ALL` order
    pub fn species_gibbs_vec(
        &self,
        temperatures: &DVector<f64>,
    ) -> Result<Vec<(Species, DVector<f64>)>, ThermoError> {
        Species::ALL
            .iter()
            .map(|&sp| {
                let values = temperatures
                    .iter()
                    .map(|&T| {
                        let phase = match sp {
                            Species::H2O => Some(self.water_rule.phase_at(T)),
                            _ => None,
                        };
                        self.evaluator.gibbs(sp, T, phase)
                    })
                    .collect::<Result<Vec<f64>, ThermoError>>()?;
                Ok((sp, DVector::from_vec(values)))
            })
            .collect()
    }

    /// f(T) = G(Fe) + G(Fe3O4) - 4 G(FeO), zero at the crossover temperature
    pub fn crossover_residual(&self, T: f64) -> Result<f64, ThermoError> {
        self.crossover_reaction
            .delta_G(&self.evaluator, T, &self.water_rule)
    }

    /// the crossover residual as a single-argument function for an external solver
    pub fn crossover_function(&self) -> impl Fn(f64) -> Result<f64, ThermoError> + '_ {
        move |T| self.crossover_residual(T)
    }

    /// Solves f(T) = 0 from `initial_guess`. Below the returned Tc FeO is unstable, so
    /// reactions (2) and (3) apply at T >= Tc and reaction (4) below it.
    pub fn find_crossover(
        &self,
        solver: &RootSolver,
        initial_guess: f64,
    ) -> Result<RootSolution, SolverError> {
        debug!("crossover search from {} K with {:?}", initial_guess, solver);
        let f = self.crossover_function();
        let solution = solver.solve(&f, initial_guess)?;
        info!(
            "crossover temperature of {}: {:.4} K ({} iterations)",
            self.crossover_reaction, solution.x, solution.iterations
        );
        Ok(solution)
    }
}
