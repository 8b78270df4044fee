/// command line entry: argument parsing, interactive menu, command dispatch
pub mod cli_main;
