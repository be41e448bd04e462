use std::path::PathBuf;

use tempfile::TempDir;

use crate::model::Record;

/// Builder for episode records in tests.
#[derive(Debug, Clone, Default)]
pub struct EpisodeBuilder {
    record: Record,
}

impl EpisodeBuilder {
    #[must_use]
    pub fn new(id: &str) -> Self {
        Self {
            record: Record {
                id: id.to_string(),
                title: format!("Episode {id}"),
                ..Record::default()
            },
        }
    }

    #[must_use]
    pub fn title(mut self, title: &str) -> Self {
        self.record.title = title.to_string();
        self
    }

    #[must_use]
    pub fn summary(mut self, summary: &str) -> Self {
        self.record.summary = summary.to_string();
        self
    }

    #[must_use]
    pub fn published(mut self, pub_date: &str) -> Self {
        self.record.pub_date = pub_date.to_string();
        self
    }

    #[must_use]
    pub fn journal(mut self, journal: &str) -> Self {
        self.record.journal = journal.to_string();
        self
    }

    #[must_use]
    pub fn infection(mut self, infection: &str) -> Self {
        self.record.infection_type = infection.to_string();
        self
    }

    #[must_use]
    pub fn design(mut self, design: &str) -> Self {
        self.record.study_design = design.to_string();
        self
    }

    #[must_use]
    pub fn pathogens(mut self, values: &[&str]) -> Self {
        self.record.pathogens = values.iter().map(ToString::to_string).collect();
        self
    }

    #[must_use]
    pub fn topics(mut self, values: &[&str]) -> Self {
        self.record.topics = values.iter().map(ToString::to_string).collect();
        self
    }

    #[must_use]
    pub fn tags(mut self, values: &[&str]) -> Self {
        self.record.tags = values.iter().map(ToString::to_string).collect();
        self
    }

    #[must_use]
    pub fn url(mut self, url: &str) -> Self {
        self.record.url = url.to_string();
        self
    }

    #[must_use]
    pub fn build(self) -> Record {
        self.record
    }
}

/// Test fixture providing an isolated data directory.
pub struct DatasetFixture {
    pub temp_dir: TempDir,
    pub data_path: PathBuf,
}

impl Default for DatasetFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl DatasetFixture {
    #[must_use]
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let data_path = temp_dir.path().to_path_buf();

        println!("[FIXTURE] Created temp directory: {data_path:?}");

        Self {
            temp_dir,
            data_path,
        }
    }

    /// Write a file relative to the fixture root.
    #[must_use]
    pub fn create_file(&self, relative_path: &str, content: &str) -> PathBuf {
        let full_path = self.data_path.join(relative_path);
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        std::fs::write(&full_path, content).expect("Failed to write file");
        println!(
            "[FIXTURE] Created file: {:?} ({} bytes)",
            full_path,
            content.len()
        );
        full_path
    }

    /// Serialize records to `data/episodes.json`.
    #[must_use]
    pub fn write_episodes(&self, records: &[Record]) -> PathBuf {
        let json = serde_json::to_string_pretty(records).expect("Failed to serialize records");
        self.create_file("data/episodes.json", &json)
    }
}

impl Drop for DatasetFixture {
    fn drop(&mut self) {
        println!("[FIXTURE] Cleaning up temp directory: {:?}", self.data_path);
    }
}

/// Five episodes, two from Nature, covering every field the engine reads.
#[must_use]
pub fn sample_episodes() -> Vec<Record> {
    vec![
        EpisodeBuilder::new("ep-1")
            .title("Salmonella outbreak linked to backyard poultry")
            .published("2024-03-01")
            .journal("MMWR")
            .infection("Salmonella")
            .design("Surveillance")
            .pathogens(&["Salmonella"])
            .topics(&["Epidemiology"])
            .tags(&["One Health", "Outbreak"])
            .build(),
        EpisodeBuilder::new("ep-2")
            .title("Nirmatrelvir for acute respiratory COVID-19")
            .summary("A randomized trial of antivirals in outpatients.")
            .published("2024-01-01")
            .journal("Nature")
            .infection("COVID-19")
            .design("RCT")
            .pathogens(&["COVID-19"])
            .topics(&["Antivirals"])
            .build(),
        EpisodeBuilder::new("ep-3")
            .title("Influenza vaccination in older adults")
            .published("2023-06-01")
            .journal("NEJM")
            .infection("Influenza")
            .design("Review")
            .pathogens(&["Influenza"])
            .topics(&["Vaccines"])
            .tags(&["Older adults"])
            .build(),
        EpisodeBuilder::new("ep-4")
            .title("Salmonella Typhi and travel")
            .journal("Nature")
            .infection("Typhoid")
            .pathogens(&["Salmonella", "Salmonella Typhi"])
            .tags(&["Tropical medicine"])
            .build(),
        EpisodeBuilder::new("ep-5")
            .title("Hand hygiene audit")
            .published("2022-11-15")
            .journal("JHI")
            .infection("Other")
            .topics(&["Infection control"])
            .build(),
    ]
}
