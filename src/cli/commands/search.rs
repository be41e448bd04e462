//! episcope search - Filter, search and sort episodes

use clap::Args;
use console::style;
use serde::Serialize;
use tracing::debug;

use crate::app::AppContext;
use crate::cli::formatters::episodes::{EpisodeEntry, render_card};
use crate::cli::output::{HumanLayout, emit_json, robot_ok};
use crate::error::Result;
use crate::highlight::{Highlighter, dedup_terms};
use crate::model::{ActiveFilter, FilterState, Record, SortKey};
use crate::search::{parse, query};

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Search query: words are ANDed, "quoted phrases" match exactly,
    /// a|b matches either, -word excludes
    #[arg(default_value = "", allow_hyphen_values = true)]
    pub query: String,

    /// Exact infection type
    #[arg(long)]
    pub infection: Option<String>,

    /// Exact journal name
    #[arg(long)]
    pub journal: Option<String>,

    /// Exact study design
    #[arg(long)]
    pub design: Option<String>,

    /// Episode lists this pathogen
    #[arg(long)]
    pub pathogen: Option<String>,

    /// Episode lists this topic
    #[arg(long)]
    pub topic: Option<String>,

    /// Episode lists this tag
    #[arg(long)]
    pub tag: Option<String>,

    /// Sort by: new, title, journal
    #[arg(long, short)]
    pub sort: Option<String>,

    /// Maximum number of episodes to show (0 = all)
    #[arg(long, short = 'n')]
    pub limit: Option<usize>,
}

impl SearchArgs {
    /// Filter state described by these arguments; unset flags stay unset.
    pub fn filter_state(&self, default_sort: SortKey) -> Result<FilterState> {
        let sort = match &self.sort {
            Some(raw) => raw.parse()?,
            None => default_sort,
        };
        let value = |opt: &Option<String>| opt.clone().unwrap_or_default();
        Ok(FilterState {
            query: self.query.clone(),
            infection: value(&self.infection),
            journal: value(&self.journal),
            study_design: value(&self.design),
            pathogen: value(&self.pathogen),
            topic: value(&self.topic),
            tag: value(&self.tag),
            sort,
        })
    }
}

#[derive(Serialize)]
struct SearchOutput<'a> {
    count: usize,
    shown: usize,
    sort: SortKey,
    filters: Vec<ActiveFilter>,
    highlight: Vec<String>,
    episodes: Vec<EpisodeEntry<'a>>,
}

pub fn run(ctx: &AppContext, args: &SearchArgs) -> Result<()> {
    let catalog = ctx.load_catalog()?;
    let state = args.filter_state(ctx.config.search.default_sort)?;
    let hits = query(catalog.records(), &state);
    let highlight = dedup_terms(&parse(&state.query).highlight);

    let limit = args.limit.unwrap_or(ctx.config.search.limit);
    let shown: &[&Record] = if limit == 0 || limit >= hits.len() {
        &hits
    } else {
        &hits[..limit]
    };
    debug!(target: "search", count = hits.len(), shown = shown.len(), "rendering results");

    if ctx.is_robot() {
        let output = SearchOutput {
            count: hits.len(),
            shown: shown.len(),
            sort: state.sort,
            filters: state.active_filters(),
            highlight,
            episodes: shown.iter().map(|record| EpisodeEntry::from(*record)).collect(),
        };
        return emit_json(&robot_ok(output));
    }

    let mut layout = HumanLayout::new();
    layout.push_line(style(format!("{} hits", hits.len())).bold().to_string());
    let filters = state.active_filters();
    if !filters.is_empty() {
        let chips: Vec<String> = filters
            .iter()
            .map(|filter| format!("{}: {}", filter.field.label(), filter.value))
            .collect();
        layout.push_line(style(chips.join("  ")).dim().to_string());
    }
    layout.blank();

    if hits.is_empty() {
        layout.push_line("No matching episodes");
    } else {
        let highlighter = Highlighter::new(&highlight);
        for record in shown {
            render_card(&mut layout, record, &highlighter);
            layout.blank();
        }
        if shown.len() < hits.len() {
            layout.push_line(
                style(format!("... {} more (use --limit 0 to show all)", hits.len() - shown.len()))
                    .dim()
                    .to_string(),
            );
        }
    }
    println!("{}", layout.build());
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;
    use crate::cli::{Cli, Commands};

    fn parse_search(args: &[&str]) -> SearchArgs {
        let cli = Cli::try_parse_from(args).unwrap();
        match cli.command {
            Commands::Search(args) => args,
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_filter_state_from_args() {
        let args = parse_search(&[
            "episcope", "search", "covid -influenza", "--journal", "Nature", "--sort", "title",
        ]);
        let state = args.filter_state(SortKey::New).unwrap();
        assert_eq!(state.query, "covid -influenza");
        assert_eq!(state.journal, "Nature");
        assert_eq!(state.infection, "");
        assert_eq!(state.sort, SortKey::Title);
    }

    #[test]
    fn test_leading_exclusion_is_a_query() {
        let args = parse_search(&["episcope", "search", "-influenza"]);
        assert_eq!(args.query, "-influenza");
    }

    #[test]
    fn test_default_sort_applies() {
        let args = parse_search(&["episcope", "search"]);
        let state = args.filter_state(SortKey::Journal).unwrap();
        assert_eq!(state.sort, SortKey::Journal);
        assert!(state.is_unconstrained());
    }

    #[test]
    fn test_bad_sort_is_an_error() {
        let args = parse_search(&["episcope", "search", "--sort", "popular"]);
        assert!(args.filter_state(SortKey::New).is_err());
    }
}
