use ReduThe::cli::cli_main::{
    CliError, STARTUP_LOG_LEVEL, USAGE, apply_log_level, load_config, parse_args, run_command,
};
use log::LevelFilter;
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};
use std::process::ExitCode;

fn run() -> Result<(), CliError> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let args = parse_args(&args)?;
    if let Err(e) = TermLogger::init(
        LevelFilter::Trace,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    ) {
        eprintln!("logger not initialized: {}", e);
    }
    log::set_max_level(STARTUP_LOG_LEVEL);
    let config = load_config(args.config_path.as_deref())?;
    apply_log_level(&config)?;
    run_command(&args, &config)
}

pub fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\x1b[31mError: {}\x1b[0m", e);
            if matches!(e, CliError::Usage(_)) {
                eprintln!("{}", USAGE);
            }
            ExitCode::FAILURE
        }
    }
}
