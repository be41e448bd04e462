//! episcope facets - Values available to each filter

use clap::Args;

use crate::app::AppContext;
use crate::cli::output::{HumanLayout, emit_json, robot_ok};
use crate::error::Result;
use crate::facets::Facets;

#[derive(Args, Debug)]
pub struct FacetsArgs {}

pub fn run(ctx: &AppContext, _args: &FacetsArgs) -> Result<()> {
    let catalog = ctx.load_catalog()?;
    let facets = Facets::from_records(catalog.records());

    if ctx.is_robot() {
        return emit_json(&robot_ok(&facets));
    }

    let mut layout = HumanLayout::new();
    let sections = [
        ("Infection", &facets.infections),
        ("Journal", &facets.journals),
        ("Study design", &facets.study_designs),
        ("Pathogen", &facets.pathogens),
        ("Topic", &facets.topics),
        ("Tag", &facets.tags),
    ];
    for (index, (label, values)) in sections.into_iter().enumerate() {
        if index > 0 {
            layout.blank();
        }
        layout.section(&format!("{label} ({})", values.len()));
        for value in values {
            layout.bullet(value);
        }
    }
    println!("{}", layout.build());
    Ok(())
}
