use colored::Colorize;

use crate::domain::ImportProgress;
use crate::rating::{CalibrationOutcome, RatingTrajectory};
use crate::stats::{CompetitiveGame, DeathmatchGame};

pub fn print_import(progress: &ImportProgress, stored: usize) {
    println!(
        "{} {} new, {} already stored, {} failed ({} matches in store)",
        "Import:".bold(),
        progress.imported().to_string().green(),
        progress.skipped(),
        colorize_failures(progress.failed()),
        stored
    );
}

fn colorize_failures(failed: usize) -> String {
    if failed == 0 {
        failed.to_string()
    } else {
        failed.to_string().red().to_string()
    }
}

pub fn print_deathmatch_games(games: &[DeathmatchGame]) {
    if games.is_empty() {
        println!("{}", "No deathmatch games found".yellow());
        return;
    }

    for game in games {
        println!(
            "{} {} {} ({})",
            game.date.format("%Y-%m-%d %H:%M").to_string().dimmed(),
            game.map.bold(),
            game.agent,
            game.weapon.cyan()
        );
        println!("  {}/{} - {}", game.kills, game.deaths, game.kd);
        println!(
            "  {} ({:.2}) - performance {}",
            game.lobby_rank,
            game.avg_tier,
            game.performance.to_string().bold()
        );
        if let Some(average) = game.running_average {
            println!("  running average: {}", average.to_string().green());
        }
    }
}

pub fn print_competitive_games(games: &[CompetitiveGame]) {
    if games.is_empty() {
        println!("{}", "No competitive games found".yellow());
        return;
    }

    for game in games {
        let result = if game.result.starts_with("Win") {
            game.result.green()
        } else if game.result.starts_with("Loss") {
            game.result.red()
        } else {
            game.result.normal()
        };

        println!(
            "{} {} {} - {}",
            game.date.format("%Y-%m-%d %H:%M").to_string().dimmed(),
            game.map.bold(),
            game.agent,
            result
        );
        match &game.mmr {
            Some(mmr) => println!("  rank {} - lobby {}+{}", game.rank, mmr.name.cyan(), mmr.progress),
            None => println!("  rank {} - lobby unranked", game.rank),
        }
    }
}

pub fn print_trajectory(trajectory: &RatingTrajectory) {
    if trajectory.is_empty() {
        println!("{}", "No rated deathmatch games found".yellow());
        return;
    }

    for series in trajectory.weapons() {
        println!(
            "{} {} matches, current {:.2}",
            series.weapon.bold().cyan(),
            series.matches_played(),
            series.current()
        );
        let ratings: Vec<String> = series.ratings.iter().map(|r| format!("{:.2}", r)).collect();
        println!("  {}", ratings.join(" → "));
    }
}

pub fn print_calibration(outcome: &CalibrationOutcome) {
    let initial = outcome.score_history.first().copied().unwrap_or(outcome.report.total);
    let status = if outcome.capped {
        "stopped at iteration cap".yellow()
    } else {
        "converged".green()
    };

    println!(
        "{} {} after {} iterations, total bias {:.4} → {:.4}",
        "Calibration".bold(),
        status,
        outcome.iterations,
        initial,
        outcome.report.total
    );
    println!("{:>6} {:>10} {:>10}", "tier", "rating", "bias");
    for (tier, rating) in outcome.table.iter() {
        let bias = outcome.report.bias(tier);
        let bias_text = format!("{:>10.4}", bias);
        let bias_text = if bias.abs() > 0.0 { bias_text.yellow() } else { bias_text.normal() };
        println!("{:>6} {:>10.2} {}", tier, rating, bias_text);
    }
}
