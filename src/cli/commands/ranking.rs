//! episcope ranking - Play-count chart linked back to dataset episodes

use clap::Args;
use console::style;
use serde::Serialize;

use crate::app::AppContext;
use crate::cli::output::{HumanLayout, emit_json, robot_ok};
use crate::error::Result;
use crate::ranking::{ChartEntry, ChartLink, TitleMatcher, chart};

const BAR_WIDTH: u32 = 30;

#[derive(Args, Debug)]
pub struct RankingArgs {
    /// Number of rows to chart (default from config)
    #[arg(long)]
    pub top: Option<usize>,
}

#[derive(Serialize)]
struct RankingOutput {
    rows: usize,
    entries: Vec<ChartEntry>,
}

pub fn run(ctx: &AppContext, args: &RankingArgs) -> Result<()> {
    let settings = &ctx.config.ranking;
    let rows = ctx.load_ranking()?;
    let catalog = ctx.load_catalog()?;
    let matcher = TitleMatcher::with_settings(catalog.records(), settings.match_settings());
    let entries = chart(
        &rows,
        &matcher,
        args.top.unwrap_or(settings.top),
        settings.min_bar_percent,
    );

    if ctx.is_robot() {
        return emit_json(&robot_ok(RankingOutput {
            rows: rows.len(),
            entries,
        }));
    }

    if entries.is_empty() {
        println!("No ranking data at {}", ctx.ranking_path().display());
        return Ok(());
    }

    let mut layout = HumanLayout::new();
    layout.section("Most played");
    for entry in &entries {
        layout.push_line(format!(
            "{:>3}. {} {}",
            entry.position,
            style(bar(entry.bar_percent)).cyan(),
            style(entry.plays).bold()
        ));
        let target = match &entry.link {
            ChartLink::Detail(id) => style(format!("episcope show {id}")).green().to_string(),
            ChartLink::External(uri) => style(uri).dim().to_string(),
        };
        layout.push_line(format!("     {}  {target}", entry.title));
    }
    println!("{}", layout.build());
    Ok(())
}

fn bar(percent: u32) -> String {
    let filled = (percent.min(100) * BAR_WIDTH).div_ceil(100) as usize;
    "#".repeat(filled)
}
