pub mod api;
pub mod cache;
pub mod cli;
pub mod config;
pub mod database;
pub mod domain;
pub mod errors;
pub mod http;
pub mod rate_limiter;
pub mod rating;
pub mod reference;
pub mod services;
pub mod stats;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::Shell;
use cli::Cli;
use log::info;
use std::path::Path;

use crate::cli::Command;
use crate::config::save_table;
use crate::config::settings::AppConfig;
use crate::services::report;
use crate::services::{AnalysisService, ImportService, ReferenceService};

pub fn interpret() -> Command {
    let cli = Cli::parse();
    cli.command
}

pub fn handle_import(dir: &Path) -> Result<()> {
    let config = AppConfig::new();
    let service = ImportService::new(&config)?;
    let progress = service.run(dir)?;
    report::print_import(&progress, service.stored_count()?);
    Ok(())
}

pub fn handle_ingest(refresh: bool) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let config = AppConfig::new();
        let mut service = ReferenceService::new(&config)?;
        service.run(refresh).await
    })
}

pub fn handle_performance(player: &str, weapon: Option<&str>) -> Result<()> {
    let service = AnalysisService::new(AppConfig::new())?;
    let games = service.performance(player, weapon)?;
    report::print_deathmatch_games(&games);
    Ok(())
}

pub fn handle_competitive(player: &str) -> Result<()> {
    let service = AnalysisService::new(AppConfig::new())?;
    let games = service.competitive(player)?;
    report::print_competitive_games(&games);
    Ok(())
}

pub fn handle_trajectory(player: &str, table: Option<&Path>) -> Result<()> {
    let service = AnalysisService::new(AppConfig::new())?;
    let trajectory = service.trajectory(player, table)?;
    report::print_trajectory(&trajectory);
    Ok(())
}

pub fn handle_calibrate(
    exclude: &[String],
    table: Option<&Path>,
    max_iterations: Option<usize>,
    output: Option<&Path>,
) -> Result<()> {
    let service = AnalysisService::new(AppConfig::new())?;
    let outcome = service.calibrate(exclude, table, max_iterations)?;
    report::print_calibration(&outcome);

    if let Some(path) = output {
        save_table(path, &outcome.table)?;
        info!("Saved calibrated table to {}", path.display());
    }
    Ok(())
}

pub fn handle_completions(shell: Shell) -> Result<()> {
    let mut command = Cli::command();
    let name = command.get_name().to_string();
    clap_complete::generate(shell, &mut command, name, &mut std::io::stdout());
    Ok(())
}
