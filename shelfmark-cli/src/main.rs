//! shelfmark CLI
//!
//! Command-line interface for browsing the publication catalog and
//! maintaining reading-log notes in a markdown vault.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use shelfmark_core::{EraBucket, FilterState, FormatFilter, SortKey, VolumeBucket};
use shelfmark_notes::ReadingStatus;

mod commands;
mod config;
mod error;

#[derive(Parser)]
#[command(name = "shelfmark")]
#[command(about = "Track reading progress for manga and light novels", long_about = None)]
struct Cli {
    /// Vault directory holding reading-log notes (overrides config)
    #[arg(long, global = true)]
    vault: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Search the catalog
    Search {
        /// Free-text query (title keywords)
        query: Option<String>,

        /// Genre (e.g. Action, Romance)
        #[arg(long)]
        genre: Option<String>,

        /// Tag, canonical or bilingual display form (e.g. Isekai)
        #[arg(long)]
        tag: Option<String>,

        /// Publication format: any, manga, or novel
        #[arg(long, default_value = "any")]
        format: FormatFilter,

        /// Sort order: popularity, score, favourites, or updated
        #[arg(long, default_value = "popularity")]
        sort: SortKey,

        /// Only finished runs
        #[arg(long)]
        finished: bool,

        /// Volume-count bucket: any, 5, 10, 20, or more
        #[arg(long, default_value = "any")]
        volumes: VolumeBucket,

        /// Release era: any, or a decade like 1990s
        #[arg(long, default_value = "any")]
        era: EraBucket,

        /// Minimum number of results to fetch before printing
        #[arg(short, long, default_value_t = 50)]
        limit: u32,
    },

    /// Show full catalog details for one id
    Show {
        id: u64,
    },

    /// Create a reading-log note for a catalog id
    Add {
        id: u64,

        /// Skip downloading the cover image
        #[arg(long)]
        no_cover: bool,
    },

    /// Set a note's reading status
    Status {
        /// Catalog id or note path
        target: String,

        /// plan_to_read, reading, completed, on_hold, dropped, or none
        value: ReadingStatus,
    },

    /// Mark or unmark one volume as read
    Volume {
        /// Catalog id or note path
        target: String,

        /// Volume index (0-based)
        index: u32,

        /// Unmark instead of marking
        #[arg(long)]
        clear: bool,
    },

    /// Print the config file path
    ConfigPath,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp(None)
        .format_target(false)
        .init();

    let cli = Cli::parse();
    let config = config::Config::load(cli.vault);

    let result = match cli.command {
        Commands::Search {
            query,
            genre,
            tag,
            format,
            sort,
            finished,
            volumes,
            era,
            limit,
        } => {
            let filter = FilterState {
                sort,
                query,
                genre,
                tag,
                format,
                finished_only: finished,
                volumes,
                era,
            };
            commands::search::run_search(&config, filter, limit)
        }
        Commands::Show { id } => commands::show::run_show(&config, id),
        Commands::Add { id, no_cover } => commands::add::run_add(&config, id, no_cover),
        Commands::Status { target, value } => commands::log::run_status(&config, &target, value),
        Commands::Volume {
            target,
            index,
            clear,
        } => commands::log::run_volume(&config, &target, index, clear),
        Commands::ConfigPath => {
            match config::config_path() {
                Some(path) => println!("{}", path.display()),
                None => log::warn!("Could not determine config directory"),
            }
            Ok(())
        }
    };

    if let Err(e) = result {
        log::error!("{e}");
        std::process::exit(1);
    }
}
