//! episcope config - Print the effective configuration

use clap::Args;

use crate::app::AppContext;
use crate::cli::output::{emit_json, robot_ok};
use crate::error::Result;

#[derive(Args, Debug)]
pub struct ConfigArgs {}

pub fn run(ctx: &AppContext, _args: &ConfigArgs) -> Result<()> {
    if ctx.is_robot() {
        return emit_json(&robot_ok(&ctx.config));
    }
    print!("{}", ctx.config.to_toml()?);
    Ok(())
}
