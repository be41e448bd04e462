//! episcope related - Episodes that share attributes with one episode

use clap::Args;
use serde::Serialize;

use crate::app::AppContext;
use crate::cli::formatters::episodes::{RelatedEntry, render_related};
use crate::cli::output::{HumanLayout, emit_json, robot_ok};
use crate::error::Result;
use crate::related::RelatedScorer;

#[derive(Args, Debug)]
pub struct RelatedArgs {
    /// Episode id (or slug for records without one)
    pub id: String,

    /// Maximum number of related episodes (default from config)
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,
}

#[derive(Serialize)]
struct RelatedOutput<'a> {
    id: &'a str,
    count: usize,
    related: Vec<RelatedEntry<'a>>,
}

pub fn run(ctx: &AppContext, args: &RelatedArgs) -> Result<()> {
    let catalog = ctx.load_catalog()?;
    let focal = catalog.get(&args.id)?;
    let limit = args.limit.unwrap_or(ctx.config.related.limit);
    let items = RelatedScorer::new(ctx.config.related.weights).rank(focal, catalog.records(), limit);

    if ctx.is_robot() {
        let output = RelatedOutput {
            id: focal.key(),
            count: items.len(),
            related: items.iter().map(RelatedEntry::from).collect(),
        };
        return emit_json(&robot_ok(output));
    }

    if items.is_empty() {
        println!("No related episodes for {}", focal.key());
        return Ok(());
    }
    let mut layout = HumanLayout::new();
    render_related(&mut layout, &items);
    println!("{}", layout.build());
    Ok(())
}
