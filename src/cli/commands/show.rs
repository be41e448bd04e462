//! episcope show - Episode detail with related episodes

use clap::Args;
use serde::Serialize;

use crate::app::AppContext;
use crate::cli::formatters::episodes::{EpisodeEntry, RelatedEntry, render_detail, render_related};
use crate::cli::output::{HumanLayout, emit_json, robot_ok};
use crate::error::Result;
use crate::related::RelatedScorer;

#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Episode id (or slug for records without one)
    pub id: String,

    /// Number of related episodes to list (default from config)
    #[arg(long)]
    pub related: Option<usize>,
}

#[derive(Serialize)]
struct ShowOutput<'a> {
    episode: EpisodeEntry<'a>,
    related: Vec<RelatedEntry<'a>>,
}

pub fn run(ctx: &AppContext, args: &ShowArgs) -> Result<()> {
    let catalog = ctx.load_catalog()?;
    let record = catalog.get(&args.id)?;
    let limit = args.related.unwrap_or(ctx.config.related.limit);
    let related = RelatedScorer::new(ctx.config.related.weights).rank(record, catalog.records(), limit);

    if ctx.is_robot() {
        let output = ShowOutput {
            episode: EpisodeEntry::from(record),
            related: related.iter().map(RelatedEntry::from).collect(),
        };
        return emit_json(&robot_ok(output));
    }

    let mut layout = HumanLayout::new();
    render_detail(&mut layout, record);
    if !related.is_empty() {
        layout.blank();
        render_related(&mut layout, &related);
    }
    println!("{}", layout.build());
    Ok(())
}
