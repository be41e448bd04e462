use episcope::catalog::Catalog;
use episcope::facets::Facets;
use episcope::test_utils::fixtures::DatasetFixture;

use crate::fixture_path;

#[test]
fn catalog_loads_mixed_fixture() {
    let catalog = Catalog::load(fixture_path("tests/fixtures/episodes.json")).unwrap();
    assert_eq!(catalog.len(), 5);

    let first = catalog.find("101").unwrap();
    assert_eq!(first.slug, "salmonella-backyard-poultry");
    assert_eq!(first.pubmed_url, "");
    assert!(first.published().is_some());

    let typhoid = catalog.find("104").unwrap();
    assert_eq!(typhoid.pathogens, vec!["Salmonella", "Salmonella Typhi"]);
    assert!(typhoid.topics.is_empty());
    assert_eq!(typhoid.sort_timestamp(), 0);
}

#[test]
fn catalog_unknown_id_is_not_found() {
    let catalog = Catalog::load(fixture_path("tests/fixtures/episodes.json")).unwrap();
    let err = catalog.get("999").unwrap_err();
    assert_eq!(err.code(), "not_found");
}

#[test]
fn catalog_parse_error_carries_path() {
    let fixture = DatasetFixture::new();
    let path = fixture.create_file("data/episodes.json", "{ not json");
    let err = Catalog::load(&path).unwrap_err();
    assert_eq!(err.code(), "dataset");
    assert!(err.to_string().contains("episodes.json"));
}

#[test]
fn facets_from_fixture() {
    let catalog = Catalog::load(fixture_path("tests/fixtures/episodes.json")).unwrap();
    let facets = Facets::from_records(catalog.records());
    assert_eq!(facets.journals, vec!["JHI", "MMWR", "Nature", "NEJM"]);
    assert_eq!(
        facets.pathogens,
        vec!["COVID-19", "Influenza", "Salmonella", "Salmonella Typhi"]
    );
    assert_eq!(facets.study_designs.len(), 4);
    assert!(facets.tags.contains(&"One Health".to_string()));
}
