use crate::ChemEquilibrium::Reactions::{Reaction, WaterPhaseRule};
use crate::ChemEquilibrium::ReductionDiagram::{DiagramError, ReductionDiagram};
use crate::Numerics::root_finding::{RootSolution, SolverError};
use crate::Thermodynamics::Shomate::ThermoError;
use crate::Thermodynamics::Species::{Phase, Species};
use crate::settings::ScenarioConfig;
use log::info;
use prettytable::{Table, row};
use std::path::Path;

/// G of the six species at the reference temperature; water is taken as liquid there
pub fn reference_values(config: &ScenarioConfig) -> Result<Vec<(Species, Phase, f64)>, ThermoError> {
    let evaluator = config.evaluator();
    let T = config.reference_temperature;
    Species::ALL
        .iter()
        .map(|&sp| {
            let phase = match sp {
                Species::H2O => Phase::Liquid,
                _ => evaluator.defaults.default_for(sp),
            };
            Ok((sp, phase, evaluator.gibbs(sp, T, Some(phase))?))
        })
        .collect()
}

/// dG of reaction 1 at the reference temperature with liquid water
pub fn reference_reaction(config: &ScenarioConfig) -> Result<f64, ThermoError> {
    Reaction::hematite_to_magnetite().delta_G(
        &config.evaluator(),
        config.reference_temperature,
        &WaterPhaseRule::Fixed(Phase::Liquid),
    )
}

pub fn reference_table(T: f64, values: &[(Species, Phase, f64)], dG_R1: f64) -> Table {
    let mut table = Table::new();
    table.add_row(row!["Species", "Phase", format!("G({} K), kJ/mol", T)]);
    for (sp, phase, g) in values {
        table.add_row(row![sp, phase, format!("{:.6}", g)]);
    }
    table.add_row(row!["dG R1", "H2O liquid", format!("{:.6}", dG_R1)]);
    table
}

pub fn crossover(config: &ScenarioConfig) -> Result<RootSolution, SolverError> {
    config
        .equilibrium()
        .find_crossover(&config.root_solver(), config.initial_guess)
}

pub fn diagram(
    config: &ScenarioConfig,
    json_out: Option<&Path>,
) -> Result<ReductionDiagram, DiagramError> {
    let diagram = ReductionDiagram::compute(
        &config.equilibrium(),
        &config.temperature_grid(),
        &config.root_solver(),
        config.initial_guess,
    )?;
    if let Some(path) = json_out {
        diagram.save_json(path)?;
    }
    Ok(diagram)
}

pub fn property_table(
    config: &ScenarioConfig,
    species: Species,
    phase: Option<Phase>,
) -> Result<Table, ThermoError> {
    let temperatures: Vec<f64> = config.temperature_grid().iter().copied().collect();
    config
        .evaluator()
        .property_table(species, phase, &temperatures)
}

pub fn reduction_examples(task: usize) {
    let config = ScenarioConfig::default();
    match task {
        0 => match reference_values(&config).and_then(|v| Ok((v, reference_reaction(&config)?))) {
            Ok((values, dG_R1)) => {
                info!("reference values at {} K", config.reference_temperature);
                reference_table(config.reference_temperature, &values, dG_R1).printstd();
            }
            Err(e) => eprintln!("Error: {}", e),
        },
        1 => match crossover(&config) {
            Ok(sol) => println!("Tc = {:.4} K after {} iterations", sol.x, sol.iterations),
            Err(e) => eprintln!("Error: {}", e),
        },
        2 => match diagram(&config, None) {
            Ok(d) => d.pretty_print(),
            Err(e) => eprintln!("Error: {}", e),
        },
        3 => {
            // FeO: solid up to 1650 K
            let config = ScenarioConfig {
                t_min: 300.0,
                t_max: 1600.0,
                n_points: 14,
                ..config
            };
            match property_table(&config, Species::FeO, None) {
                Ok(table) => table.printstd(),
                Err(e) => eprintln!("Error: {}", e),
            }
        }
        _ => println!("non existing example"),
    }
}
