//! CLI command implementations
//!
//! Each subcommand has its own module with:
//! - Args struct for command-line arguments
//! - run() function to execute the command

use clap::Subcommand;

pub mod config;
pub mod facets;
pub mod ranking;
pub mod related;
pub mod search;
pub mod show;

use crate::app::AppContext;
use crate::error::Result;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Filter, search and sort episodes
    Search(search::SearchArgs),

    /// Show one episode with its related episodes
    Show(show::ShowArgs),

    /// List episodes related to one episode
    Related(related::RelatedArgs),

    /// List the values available to each filter
    Facets(facets::FacetsArgs),

    /// Play-count ranking chart
    Ranking(ranking::RankingArgs),

    /// Print the effective configuration
    Config(config::ConfigArgs),
}

/// Dispatch a command to its handler
pub fn run(ctx: &AppContext, command: &Commands) -> Result<()> {
    match command {
        Commands::Search(args) => search::run(ctx, args),
        Commands::Show(args) => show::run(ctx, args),
        Commands::Related(args) => related::run(ctx, args),
        Commands::Facets(args) => facets::run(ctx, args),
        Commands::Ranking(args) => ranking::run(ctx, args),
        Commands::Config(args) => config::run(ctx, args),
    }
}
