use crate::ChemEquilibrium::ReductionDiagram::DiagramError;
use crate::Examples::reduction_examples::{
    crossover, diagram, property_table, reduction_examples, reference_reaction, reference_table,
    reference_values,
};
use crate::Numerics::root_finding::SolverError;
use crate::Thermodynamics::Shomate::ThermoError;
use crate::Thermodynamics::Species::{Phase, Species};
use crate::settings::{ConfigError, ScenarioConfig};
use log::LevelFilter;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const USAGE: &str = "usage: ReduThe [reference | diagram | crossover | table <species> [phase] | menu] \
[--config <file.json>] [--json <out.json>]";

#[derive(Debug, Error)]
pub enum CliError {
    #[error("{0}")]
    Usage(String),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Thermo(#[from] ThermoError),
    #[error(transparent)]
    Solver(#[from] SolverError),
    #[error(transparent)]
    Diagram(#[from] DiagramError),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Reference,
    Diagram,
    Crossover,
    Table {
        species: Species,
        phase: Option<Phase>,
    },
    Menu,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CliArgs {
    pub command: Command,
    pub config_path: Option<PathBuf>,
    pub json_out: Option<PathBuf>,
}

/// Parses arguments without the program name. No command opens the interactive menu.
pub fn parse_args(args: &[String]) -> Result<CliArgs, CliError> {
    let mut positional: Vec<&str> = Vec::new();
    let mut config_path = None;
    let mut json_out = None;
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" | "-c" => {
                let value = iter
                    .next()
                    .ok_or_else(|| CliError::Usage("--config needs a file name".to_string()))?;
                config_path = Some(PathBuf::from(value));
            }
            "--json" | "-j" => {
                let value = iter
                    .next()
                    .ok_or_else(|| CliError::Usage("--json needs a file name".to_string()))?;
                json_out = Some(PathBuf::from(value));
            }
            flag if flag.starts_with('-') => {
                return Err(CliError::Usage(format!("unknown option '{}'", flag)));
            }
            word => positional.push(word),
        }
    }

    let command = match positional.as_slice() {
        [] | ["menu"] => Command::Menu,
        ["reference"] => Command::Reference,
        ["diagram"] => Command::Diagram,
        ["crossover"] => Command::Crossover,
        ["table", rest @ ..] if !rest.is_empty() && rest.len() <= 2 => {
            let species = rest[0]
                .parse::<Species>()
                .map_err(|e| CliError::Usage(e.to_string()))?;
            let phase = match rest.get(1) {
                Some(p) => Some(p.parse::<Phase>().map_err(|e| CliError::Usage(e.to_string()))?),
                None => None,
            };
            Command::Table { species, phase }
        }
        ["table", ..] => return Err(CliError::Usage("table needs <species> [phase]".to_string())),
        other => return Err(CliError::Usage(format!("unknown command {:?}", other))),
    };
    Ok(CliArgs {
        command,
        config_path,
        json_out,
    })
}

pub fn load_config(path: Option<&Path>) -> Result<ScenarioConfig, CliError> {
    match path {
        Some(p) => Ok(ScenarioConfig::from_file(p)?),
        None => Ok(ScenarioConfig::default()),
    }
}

/// Log level used until the scenario is loaded
pub const STARTUP_LOG_LEVEL: LevelFilter = LevelFilter::Info;

/// Switches the global log level to the one of the scenario. The logger itself is started
/// at `Trace`, so only this level filters records.
pub fn apply_log_level(config: &ScenarioConfig) -> Result<LevelFilter, CliError> {
    let level = config.log_level_filter()?;
    log::set_max_level(level);
    Ok(level)
}

pub fn run_command(args: &CliArgs, config: &ScenarioConfig) -> Result<(), CliError> {
    match &args.command {
        Command::Reference => {
            let values = reference_values(config)?;
            let r1 = reference_reaction(config)?;
            reference_table(config.reference_temperature, &values, r1).printstd();
        }
        Command::Crossover => {
            let sol = crossover(config)?;
            println!(
                "\x1b[34mTc = {:.4} K\x1b[0m ({} iterations, f(Tc) = {:.3e} kJ/mol)",
                sol.x, sol.iterations, sol.fx
            );
        }
        Command::Diagram => {
            let d = diagram(config, args.json_out.as_deref())?;
            d.pretty_print();
        }
        Command::Table { species, phase } => {
            property_table(config, *species, *phase)?.printstd();
        }
        Command::Menu => run_interactive_menu(config),
    }
    Ok(())
}

/* colors
Blue (\x1b[34m) - header text
Yellow (\x1b[33m) - menu options
Cyan (\x1b[36m) - prompt
Reset (\x1b[0m) - back to normal after each colored section
*/
pub fn run_interactive_menu(config: &ScenarioConfig) {
    loop {
        show_main_menu();
        let Some(choice) = get_user_input() else {
            break;
        };
        let command = match choice.trim() {
            "1" => Command::Reference,
            "2" => Command::Crossover,
            "3" => Command::Diagram,
            "4" => match ask_species() {
                Some(species) => Command::Table {
                    species,
                    phase: None,
                },
                None => continue,
            },
            "5" => {
                reduction_examples(3);
                continue;
            }
            "0" => {
                println!("Goodbye!");
                break;
            }
            _ => {
                println!("Invalid choice. Please try again.");
                continue;
            }
        };
        let args = CliArgs {
            command,
            config_path: None,
            json_out: None,
        };
        if let Err(e) = run_command(&args, config) {
            eprintln!("\x1b[31mError: {}\x1b[0m", e);
        }
    }
}

fn show_main_menu() {
    println!(
        "\x1b[34m\n ReduThe: equilibrium of the hydrogen reduction of iron oxides\n \x1b[0m"
    );
    println!("\x1b[33m1. Reference Gibbs energies\x1b[0m");
    println!("\x1b[33m2. FeO crossover temperature\x1b[0m");
    println!("\x1b[33m3. Equilibrium diagram\x1b[0m");
    println!("\x1b[33m4. Property table of a species\x1b[0m");
    println!("\x1b[33m5. Example: FeO property table\x1b[0m");
    println!("\x1b[33m0. Exit\x1b[0m");
    print!("\x1b[36mEnter your choice: \x1b[0m");
    let _ = io::stdout().flush();
}

fn ask_species() -> Option<Species> {
    print!("\x1b[36mSpecies (Fe2O3, Fe3O4, FeO, Fe, H2O, H2): \x1b[0m");
    let _ = io::stdout().flush();
    let input = get_user_input()?;
    match input.trim().parse::<Species>() {
        Ok(species) => Some(species),
        Err(e) => {
            println!("{}", e);
            None
        }
    }
}

/// None at end of input
fn get_user_input() -> Option<String> {
    let mut input = String::new();
    match io::stdin().read_line(&mut input) {
        Ok(0) | Err(_) => None,
        Ok(_) => Some(input),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(parse_args(&args(&[])).unwrap().command, Command::Menu);
        assert_eq!(
            parse_args(&args(&["reference"])).unwrap().command,
            Command::Reference
        );
        let parsed = parse_args(&args(&["diagram", "--json", "out.json", "-c", "s.json"])).unwrap();
        assert_eq!(parsed.command, Command::Diagram);
        assert_eq!(parsed.json_out, Some(PathBuf::from("out.json")));
        assert_eq!(parsed.config_path, Some(PathBuf::from("s.json")));
        assert_eq!(
            parse_args(&args(&["table", "H2O", "liquid"])).unwrap().command,
            Command::Table {
                species: Species::H2O,
                phase: Some(Phase::Liquid)
            }
        );
        assert_eq!(
            parse_args(&args(&["table", "Fe"])).unwrap().command,
            Command::Table {
                species: Species::Fe,
                phase: None
            }
        );
    }

    #[test]
    fn test_parse_errors() {
        for bad in [
            vec!["plot"],
            vec!["table"],
            vec!["table", "CO"],
            vec!["table", "Fe", "plasma"],
            vec!["table", "Fe", "alpha", "extra"],
            vec!["diagram", "--json"],
            vec!["--verbose"],
        ] {
            assert!(
                matches!(parse_args(&args(&bad)), Err(CliError::Usage(_))),
                "{:?}",
                bad
            );
        }
    }

    #[test]
    fn test_run_commands_with_defaults() {
        let config = ScenarioConfig {
            n_points: 5,
            ..ScenarioConfig::default()
        };
        for command in [
            Command::Reference,
            Command::Crossover,
            Command::Diagram,
            Command::Table {
                species: Species::FeO,
                phase: None,
            },
        ] {
            let args = CliArgs {
                command,
                config_path: None,
                json_out: None,
            };
            run_command(&args, &config).unwrap();
        }
    }

    #[test]
    fn test_log_level_from_scenario() {
        let config = ScenarioConfig {
            log_level: "debug".to_string(),
            ..ScenarioConfig::default()
        };
        assert_eq!(apply_log_level(&config).unwrap(), LevelFilter::Debug);
        assert_eq!(log::max_level(), LevelFilter::Debug);

        let bad = ScenarioConfig {
            log_level: "loud".to_string(),
            ..ScenarioConfig::default()
        };
        assert!(matches!(apply_log_level(&bad), Err(CliError::Config(_))));
        assert_eq!(log::max_level(), LevelFilter::Debug);
        log::set_max_level(STARTUP_LOG_LEVEL);
    }

    #[test]
    fn test_table_out_of_range_is_reported() {
        let args = CliArgs {
            command: Command::Table {
                species: Species::FeO,
                phase: Some(Phase::Liquid),
            },
            config_path: None,
            json_out: None,
        };
        let err = run_command(&args, &ScenarioConfig::default()).unwrap_err();
        assert!(matches!(err, CliError::Thermo(ThermoError::OutOfRange { .. })));
    }
}
