use std::path::PathBuf;

use tracing::debug;

use crate::catalog::Catalog;
use crate::cli::output::OutputFormat;
use crate::config::Config;
use crate::error::Result;
use crate::ranking::{self, PlayRow};

pub struct AppContext {
    pub project_root: PathBuf,
    pub config: Config,
    pub output_format: OutputFormat,
    pub verbosity: u8,
}

impl AppContext {
    pub fn from_cli(cli: &crate::cli::Cli) -> Result<Self> {
        let project_root = std::env::current_dir()?;
        let mut config = Config::load(cli.config.as_deref(), &project_root)?;
        if let Some(path) = &cli.dataset {
            config.dataset.path.clone_from(path);
        }

        Ok(Self {
            project_root,
            config,
            output_format: cli.output_format(),
            verbosity: cli.verbose,
        })
    }

    /// Dataset path, resolved against the project root when relative.
    pub fn dataset_path(&self) -> PathBuf {
        self.project_root.join(&self.config.dataset.path)
    }

    pub fn ranking_path(&self) -> PathBuf {
        self.project_root.join(&self.config.dataset.ranking_path)
    }

    /// Load the episode dataset. Called once per invocation.
    pub fn load_catalog(&self) -> Result<Catalog> {
        let path = self.dataset_path();
        debug!(target: "app", path = %path.display(), "loading dataset");
        Catalog::load(path)
    }

    /// Load and order the play-count ranking.
    pub fn load_ranking(&self) -> Result<Vec<PlayRow>> {
        let mut rows = ranking::load_rows(self.ranking_path())?;
        ranking::order_rows(&mut rows);
        Ok(rows)
    }

    pub fn is_robot(&self) -> bool {
        self.output_format == OutputFormat::Json
    }
}
