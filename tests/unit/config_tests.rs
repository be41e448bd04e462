use std::fs;

use episcope::config::Config;
use episcope::model::SortKey;
use episcope::test_utils::{TestCase, run_table_tests};

use crate::fixture_path;

fn load_fixture(relative: &str) -> Config {
    let content = fs::read_to_string(fixture_path(relative)).expect("read fixture");
    Config::from_toml(&content).expect("parse config")
}

#[test]
fn config_search_and_related_from_fixture() -> Result<(), String> {
    let cases = vec![
        TestCase {
            name: "default",
            input: "tests/fixtures/configs/default.toml",
            expected: (SortKey::New, 0usize, 6usize, 3.0f64, 1.0f64, 0.5f64),
            should_panic: false,
        },
        TestCase {
            name: "custom",
            input: "tests/fixtures/configs/custom.toml",
            expected: (SortKey::Journal, 10usize, 3usize, 3.0f64, 0.0f64, 0.0f64),
            should_panic: false,
        },
        TestCase {
            name: "invalid_weight",
            input: "tests/fixtures/configs/invalid_weight.toml",
            expected: (SortKey::New, 0usize, 0usize, 0.0f64, 0.0f64, 0.0f64),
            should_panic: true,
        },
    ];

    run_table_tests(cases, |relative_path| {
        let config = load_fixture(relative_path);
        let weights = config.related.weights;
        (
            config.search.default_sort,
            config.search.limit,
            config.related.limit,
            weights.pathogen,
            weights.journal,
            weights.recency_scale,
        )
    })
}

#[test]
fn config_default_fixture_matches_builtin_defaults() {
    let from_file = load_fixture("tests/fixtures/configs/default.toml");
    let builtin = Config::default();
    assert_eq!(from_file.to_toml().unwrap(), builtin.to_toml().unwrap());
}

#[test]
fn config_effective_output_parses_back() {
    let config = load_fixture("tests/fixtures/configs/custom.toml");
    let rendered = config.to_toml().unwrap();
    let reparsed = Config::from_toml(&rendered).unwrap();
    assert_eq!(reparsed.search.default_sort, SortKey::Journal);
    assert_eq!(reparsed.related.limit, 3);
    assert_eq!(reparsed.related.weights, config.related.weights);
}

#[test]
fn config_explicit_missing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.toml");
    let err = Config::load(Some(missing.as_path()), dir.path()).unwrap_err();
    assert_eq!(err.code(), "config");
}

#[test]
fn config_explicit_file_is_loaded() {
    let dir = tempfile::tempdir().unwrap();
    let path = fixture_path("tests/fixtures/configs/custom.toml");
    let config = Config::load(Some(path.as_path()), dir.path()).unwrap();
    assert_eq!(config.search.limit, 10);
}
