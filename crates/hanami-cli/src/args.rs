use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use hanami_core::filter::AnimeFilter;

#[derive(Debug, Parser)]
#[command(name = "hanami", version, about = "Discover anime and keep a watchlist")]
pub struct Cli {
    /// Config file to use instead of the platform default.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding the watchlist file.
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Keep the watchlist in memory only; nothing is written to disk.
    #[arg(long, global = true)]
    pub ephemeral: bool,

    /// Append logs to this file instead of stderr.
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Search the catalog. Without a query, lists the current season.
    Search {
        query: Vec<String>,
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Show full details for one anime.
    Show { id: u64 },
    /// Top upcoming titles.
    Upcoming,
    /// List the watchlist.
    #[command(alias = "list")]
    Watchlist,
    /// Add an anime to the watchlist.
    Add { id: u64 },
    /// Remove an anime from the watchlist.
    Remove { id: u64 },
    /// Add the anime if missing, remove it otherwise.
    Toggle { id: u64 },
    /// Remove everything from the watchlist.
    Clear {
        /// Skip the confirmation prompt.
        #[arg(short, long)]
        yes: bool,
    },
    /// Recommend titles from your most watched genre.
    Recommend {
        /// Add this anime first, then recommend again.
        #[arg(long, value_name = "ID")]
        add: Option<u64>,
    },
    /// Narrow the last search results without another request.
    Filter {
        #[command(flatten)]
        filter: FilterArgs,
    },
    /// Interactive session.
    Shell,
}

#[derive(Debug, Clone, Default, Args)]
pub struct FilterArgs {
    /// Genre name, e.g. "Action".
    #[arg(long)]
    pub genre: Option<String>,
    /// Part of the airing status, e.g. "airing".
    #[arg(long)]
    pub status: Option<String>,
    /// Media type: TV, Movie, OVA, ONA, Special.
    #[arg(long = "type", value_name = "TYPE")]
    pub media_type: Option<String>,
    #[arg(long, value_name = "SCORE")]
    pub min_score: Option<f64>,
}

impl From<FilterArgs> for AnimeFilter {
    fn from(args: FilterArgs) -> Self {
        Self {
            genre: args.genre,
            status: args.status,
            media_type: args.media_type,
            min_score: args.min_score,
        }
    }
}

/// One line typed into the interactive shell.
#[derive(Debug, Parser)]
#[command(name = "hanami", no_binary_name = true, disable_version_flag = true)]
pub struct ShellLine {
    #[command(subcommand)]
    pub command: Command,
}
