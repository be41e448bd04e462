//! Integration-level unit tests grouped by module.

mod catalog_tests;
mod config_tests;
mod pipeline_tests;
mod ranking_tests;
mod related_tests;

pub use episcope::test_utils::manifest_path as fixture_path;
