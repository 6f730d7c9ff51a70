use anyhow::Result;

use duelrank::cli::Command;
use duelrank::{
    handle_calibrate, handle_competitive, handle_completions, handle_import, handle_ingest,
    handle_performance, handle_trajectory, interpret,
};

fn main() {
    setup_logging();
    parse_and_execute().unwrap_or_else(|e| {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    });
}

fn setup_logging() {
    sensible_env_logger::init!();
}

fn parse_and_execute() -> Result<()> {
    let command = interpret();
    execute_command(&command)
}

fn execute_command(command: &Command) -> Result<()> {
    match command {
        Command::Import { dir } => handle_import(dir),
        Command::Ingest { refresh } => handle_ingest(*refresh),
        Command::Performance { player, weapon } => handle_performance(player, weapon.as_deref()),
        Command::Competitive { player } => handle_competitive(player),
        Command::Trajectory { player, table } => handle_trajectory(player, table.as_deref()),
        Command::Calibrate {
            exclude,
            table,
            max_iterations,
            output,
        } => handle_calibrate(exclude, table.as_deref(), *max_iterations, output.as_deref()),
        Command::Completions { shell } => handle_completions(*shell),
    }
}
