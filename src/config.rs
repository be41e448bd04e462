use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{EpiError, Result};
use crate::model::SortKey;
use crate::ranking::{
    DEFAULT_CHART_SIZE, DEFAULT_MATCH_THRESHOLD, DEFAULT_MIN_BAR_PERCENT, DEFAULT_PREFIX_BONUS,
    DEFAULT_PREFIX_CHARS, MatchSettings,
};
use crate::related::{DEFAULT_RELATED_LIMIT, RelatedWeights};

/// Project-local config file name, looked up in the working directory.
pub const PROJECT_CONFIG_FILE: &str = "episcope.toml";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub dataset: DatasetConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub related: RelatedConfig,
    #[serde(default)]
    pub ranking: RankingConfig,
}

impl Config {
    /// Defaults, then either the explicit file or global + project files,
    /// then `EPISCOPE_*` environment overrides.
    pub fn load(explicit_path: Option<&Path>, project_root: &Path) -> Result<Self> {
        let mut config = Self::default();

        let explicit = explicit_path
            .map(PathBuf::from)
            .or_else(|| std::env::var("EPISCOPE_CONFIG").ok().map(PathBuf::from));

        if let Some(path) = explicit {
            let patch = Self::load_patch(&path)?
                .ok_or_else(|| EpiError::MissingConfig(path.display().to_string()))?;
            config.merge_patch(patch);
        } else {
            if let Some(global) = Self::load_global()? {
                config.merge_patch(global);
            }
            if let Some(project) = Self::load_patch(&project_root.join(PROJECT_CONFIG_FILE))? {
                config.merge_patch(project);
            }
        }

        config.apply_env_overrides()?;
        config.validate()?;

        Ok(config)
    }

    /// Parse a complete or partial config document over the defaults.
    pub fn from_toml(raw: &str) -> Result<Self> {
        let patch: ConfigPatch =
            toml::from_str(raw).map_err(|err| EpiError::Config(format!("parse config: {err}")))?;
        let mut config = Self::default();
        config.merge_patch(patch);
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|err| EpiError::Config(format!("serialize config: {err}")))
    }

    fn load_global() -> Result<Option<ConfigPatch>> {
        let Some(dir) = dirs::config_dir() else {
            return Ok(None);
        };
        Self::load_patch(&dir.join("episcope/config.toml"))
    }

    fn load_patch(path: &Path) -> Result<Option<ConfigPatch>> {
        if !path.exists() {
            return Ok(None);
        }

        let raw = std::fs::read_to_string(path)
            .map_err(|err| EpiError::Config(format!("read config {}: {err}", path.display())))?;
        let patch = toml::from_str(&raw)
            .map_err(|err| EpiError::Config(format!("parse config {}: {err}", path.display())))?;
        Ok(Some(patch))
    }

    fn merge_patch(&mut self, patch: ConfigPatch) {
        if let Some(patch) = patch.dataset {
            self.dataset.merge(patch);
        }
        if let Some(patch) = patch.search {
            self.search.merge(patch);
        }
        if let Some(patch) = patch.related {
            self.related.merge(patch);
        }
        if let Some(patch) = patch.ranking {
            self.ranking.merge(patch);
        }
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Some(value) = env_string("EPISCOPE_DATASET") {
            self.dataset.path = PathBuf::from(value);
        }
        if let Some(value) = env_string("EPISCOPE_RANKING_PATH") {
            self.dataset.ranking_path = PathBuf::from(value);
        }

        if let Some(value) = env_string("EPISCOPE_SEARCH_DEFAULT_SORT") {
            self.search.default_sort = value.parse()?;
        }
        if let Some(value) = env_usize("EPISCOPE_SEARCH_LIMIT")? {
            self.search.limit = value;
        }

        if let Some(value) = env_usize("EPISCOPE_RELATED_LIMIT")? {
            self.related.limit = value;
        }
        if let Some(value) = env_f64("EPISCOPE_RELATED_PATHOGEN_WEIGHT")? {
            self.related.weights.pathogen = value;
        }
        if let Some(value) = env_f64("EPISCOPE_RELATED_TOPIC_WEIGHT")? {
            self.related.weights.topic = value;
        }
        if let Some(value) = env_f64("EPISCOPE_RELATED_TAG_WEIGHT")? {
            self.related.weights.tag = value;
        }
        if let Some(value) = env_f64("EPISCOPE_RELATED_INFECTION_WEIGHT")? {
            self.related.weights.infection = value;
        }
        if let Some(value) = env_f64("EPISCOPE_RELATED_JOURNAL_WEIGHT")? {
            self.related.weights.journal = value;
        }
        if let Some(value) = env_f64("EPISCOPE_RELATED_RECENCY_SCALE")? {
            self.related.weights.recency_scale = value;
        }

        if let Some(value) = env_usize("EPISCOPE_RANKING_TOP")? {
            self.ranking.top = value;
        }
        if let Some(value) = env_f64("EPISCOPE_RANKING_MATCH_THRESHOLD")? {
            self.ranking.match_threshold = value;
        }

        Ok(())
    }

    fn validate(&self) -> Result<()> {
        let w = &self.related.weights;
        let weights = [
            ("pathogen_weight", w.pathogen),
            ("topic_weight", w.topic),
            ("tag_weight", w.tag),
            ("infection_weight", w.infection),
            ("journal_weight", w.journal),
            ("recency_scale", w.recency_scale),
        ];
        for (name, value) in weights {
            if !value.is_finite() || value < 0.0 {
                return Err(EpiError::Config(format!(
                    "related.{name} must be a non-negative number, got {value}"
                )));
            }
        }
        if !w.recency_offset_days.is_finite() || w.recency_offset_days <= 1.0 {
            return Err(EpiError::Config(format!(
                "related.recency_offset_days must be greater than 1, got {}",
                w.recency_offset_days
            )));
        }
        if self.ranking.min_bar_percent > 100 {
            return Err(EpiError::Config(format!(
                "ranking.min_bar_percent must be at most 100, got {}",
                self.ranking.min_bar_percent
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetConfig {
    /// Episode JSON array
    #[serde(default)]
    pub path: PathBuf,
    /// Play-count ranking JSON array
    #[serde(default)]
    pub ranking_path: PathBuf,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("data/episodes.json"),
            ranking_path: PathBuf::from("data/spotify.json"),
        }
    }
}

impl DatasetConfig {
    fn merge(&mut self, patch: DatasetPatch) {
        if let Some(value) = patch.path {
            self.path = value;
        }
        if let Some(value) = patch.ranking_path {
            self.ranking_path = value;
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchConfig {
    #[serde(default)]
    pub default_sort: SortKey,
    /// Maximum results printed; 0 prints all
    #[serde(default)]
    pub limit: usize,
}

impl SearchConfig {
    fn merge(&mut self, patch: SearchPatch) {
        if let Some(value) = patch.default_sort {
            self.default_sort = value;
        }
        if let Some(value) = patch.limit {
            self.limit = value;
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RelatedConfig {
    #[serde(default)]
    pub limit: usize,
    #[serde(flatten)]
    pub weights: RelatedWeights,
}

impl Default for RelatedConfig {
    fn default() -> Self {
        Self {
            limit: DEFAULT_RELATED_LIMIT,
            weights: RelatedWeights::default(),
        }
    }
}

impl RelatedConfig {
    fn merge(&mut self, patch: RelatedPatch) {
        if let Some(value) = patch.limit {
            self.limit = value;
        }
        if let Some(value) = patch.pathogen_weight {
            self.weights.pathogen = value;
        }
        if let Some(value) = patch.topic_weight {
            self.weights.topic = value;
        }
        if let Some(value) = patch.tag_weight {
            self.weights.tag = value;
        }
        if let Some(value) = patch.infection_weight {
            self.weights.infection = value;
        }
        if let Some(value) = patch.journal_weight {
            self.weights.journal = value;
        }
        if let Some(value) = patch.recency_scale {
            self.weights.recency_scale = value;
        }
        if let Some(value) = patch.recency_offset_days {
            self.weights.recency_offset_days = value;
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankingConfig {
    #[serde(default)]
    pub top: usize,
    #[serde(default)]
    pub min_bar_percent: u32,
    #[serde(default)]
    pub match_threshold: f64,
    #[serde(default)]
    pub prefix_bonus: f64,
    #[serde(default)]
    pub prefix_chars: usize,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            top: DEFAULT_CHART_SIZE,
            min_bar_percent: DEFAULT_MIN_BAR_PERCENT,
            match_threshold: DEFAULT_MATCH_THRESHOLD,
            prefix_bonus: DEFAULT_PREFIX_BONUS,
            prefix_chars: DEFAULT_PREFIX_CHARS,
        }
    }
}

impl RankingConfig {
    pub const fn match_settings(&self) -> MatchSettings {
        MatchSettings {
            threshold: self.match_threshold,
            prefix_bonus: self.prefix_bonus,
            prefix_chars: self.prefix_chars,
        }
    }

    fn merge(&mut self, patch: RankingPatch) {
        if let Some(value) = patch.top {
            self.top = value;
        }
        if let Some(value) = patch.min_bar_percent {
            self.min_bar_percent = value;
        }
        if let Some(value) = patch.match_threshold {
            self.match_threshold = value;
        }
        if let Some(value) = patch.prefix_bonus {
            self.prefix_bonus = value;
        }
        if let Some(value) = patch.prefix_chars {
            self.prefix_chars = value;
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
struct ConfigPatch {
    pub dataset: Option<DatasetPatch>,
    pub search: Option<SearchPatch>,
    pub related: Option<RelatedPatch>,
    pub ranking: Option<RankingPatch>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct DatasetPatch {
    pub path: Option<PathBuf>,
    pub ranking_path: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct SearchPatch {
    pub default_sort: Option<SortKey>,
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct RelatedPatch {
    pub limit: Option<usize>,
    pub pathogen_weight: Option<f64>,
    pub topic_weight: Option<f64>,
    pub tag_weight: Option<f64>,
    pub infection_weight: Option<f64>,
    pub journal_weight: Option<f64>,
    pub recency_scale: Option<f64>,
    pub recency_offset_days: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
struct RankingPatch {
    pub top: Option<usize>,
    pub min_bar_percent: Option<u32>,
    pub match_threshold: Option<f64>,
    pub prefix_bonus: Option<f64>,
    pub prefix_chars: Option<usize>,
}

fn env_string(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.trim().is_empty())
}

fn env_usize(key: &str) -> Result<Option<usize>> {
    match env_string(key) {
        Some(value) => value.trim().parse::<usize>().map(Some).map_err(|err| {
            EpiError::Config(format!("invalid {key} value {value}: {err}"))
        }),
        None => Ok(None),
    }
}

fn env_f64(key: &str) -> Result<Option<f64>> {
    match env_string(key) {
        Some(value) => value.trim().parse::<f64>().map(Some).map_err(|err| {
            EpiError::Config(format!("invalid {key} value {value}: {err}"))
        }),
        None => Ok(None),
    }
}
