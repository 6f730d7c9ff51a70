use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Duel-based skill ratings from deathmatch kill logs")]
pub struct Cli {
    /// Command
    #[clap(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
#[clap(rename_all = "lower_case")]
pub enum Command {
    /// Import raw match-details JSON files into the match store
    Import {
        /// Directory containing one match per `.json` file
        dir: PathBuf,
    },
    /// Download reference catalogs (weapons, tiers, maps, agents) into the cache
    Ingest {
        /// Re-download catalogs that are already cached
        #[arg(short, long)]
        refresh: bool,
    },
    /// Per-match performance scores for deathmatch games
    Performance {
        /// Player id (subject)
        #[arg(short, long)]
        player: String,
        /// Only games with this main weapon
        #[arg(short, long)]
        weapon: Option<String>,
    },
    /// Summary of competitive games
    Competitive {
        /// Player id (subject)
        #[arg(short, long)]
        player: String,
    },
    /// Rating trajectory per main weapon
    Trajectory {
        /// Player id (subject)
        #[arg(short, long)]
        player: String,
        /// Rating table JSON file (defaults to the seeded table)
        #[arg(short, long)]
        table: Option<PathBuf>,
    },
    /// Calibrate the tier rating table against the stored deathmatch corpus
    Calibrate {
        /// Player ids to leave out of the calibration
        #[arg(short, long, num_args = 1..)]
        exclude: Vec<String>,
        /// Starting rating table JSON file (defaults to the seeded table)
        #[arg(short, long)]
        table: Option<PathBuf>,
        /// Stop after this many accepted improvements
        #[arg(short, long = "max-iterations")]
        max_iterations: Option<usize>,
        /// Write the calibrated table to this file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print shell completions
    Completions {
        /// Target shell
        shell: Shell,
    },
}
