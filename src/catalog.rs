//! The loaded episode dataset

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{EpiError, Result};
use crate::model::Record;

/// Immutable record set for one session.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    records: Vec<Record>,
    source: Option<PathBuf>,
}

impl Catalog {
    pub const fn new(records: Vec<Record>) -> Self {
        Self {
            records,
            source: None,
        }
    }

    /// Parse a JSON array of records.
    pub fn from_json(raw: &str) -> Result<Self> {
        let records: Vec<Record> = serde_json::from_str(raw)?;
        Ok(Self::new(records))
    }

    /// Read and parse the dataset file at `path`.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|err| EpiError::Dataset {
            path: path.to_path_buf(),
            message: format!("read failed: {err}"),
        })?;
        let records: Vec<Record> = serde_json::from_str(&raw).map_err(|err| EpiError::Dataset {
            path: path.to_path_buf(),
            message: format!("parse failed: {err}"),
        })?;

        let unkeyed = records.iter().filter(|r| r.key().is_empty()).count();
        if unkeyed > 0 {
            debug!(target: "catalog", unkeyed, "records without identifier");
        }
        info!(target: "catalog", path = %path.display(), records = records.len(), "dataset loaded");

        Ok(Self {
            records,
            source: Some(path.to_path_buf()),
        })
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn source(&self) -> Option<&Path> {
        self.source.as_deref()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Record whose identifier equals `key` exactly.
    pub fn find(&self, key: &str) -> Option<&Record> {
        if key.is_empty() {
            return None;
        }
        self.records.iter().find(|record| record.key() == key)
    }

    /// Like [`Catalog::find`], but a miss is an error.
    pub fn get(&self, key: &str) -> Result<&Record> {
        self.find(key)
            .ok_or_else(|| EpiError::NotFound(format!("episode {key}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::fixtures::{DatasetFixture, sample_episodes};

    #[test]
    fn test_from_json_tolerates_sparse_records() {
        let catalog = Catalog::from_json(r#"[{"id": 1}, {"id": "two", "tags": null}]"#).unwrap();
        assert_eq!(catalog.len(), 2);
        assert!(catalog.find("1").is_some());
        assert!(catalog.find("two").unwrap().tags.is_empty());
    }

    #[test]
    fn test_find_requires_exact_key() {
        let catalog = Catalog::new(sample_episodes());
        assert_eq!(catalog.find("ep-2").unwrap().journal, "Nature");
        assert!(catalog.find("ep").is_none());
        assert!(catalog.find("").is_none());
        assert!(matches!(catalog.get("missing"), Err(EpiError::NotFound(_))));
    }

    #[test]
    fn test_load_round_trips_fixture() {
        let fixture = DatasetFixture::new();
        let path = fixture.write_episodes(&sample_episodes());
        let catalog = Catalog::load(&path).unwrap();
        assert_eq!(catalog.len(), 5);
        assert_eq!(catalog.source(), Some(path.as_path()));
    }

    #[test]
    fn test_load_reports_path_on_bad_json() {
        let fixture = DatasetFixture::new();
        let path = fixture.create_file("data/episodes.json", "{not json");
        let err = Catalog::load(&path).unwrap_err();
        assert!(matches!(err, EpiError::Dataset { .. }));
        assert!(err.to_string().contains("episodes.json"));
    }

    #[test]
    fn test_load_missing_file() {
        let fixture = DatasetFixture::new();
        let err = Catalog::load(fixture.data_path.join("nope.json")).unwrap_err();
        assert!(matches!(err, EpiError::Dataset { .. }));
    }
}
