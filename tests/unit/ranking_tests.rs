use episcope::catalog::Catalog;
use episcope::ranking::{ChartLink, TitleMatcher, chart, load_rows, order_rows};

use crate::fixture_path;

#[test]
fn ranking_chart_from_fixtures() {
    let catalog = Catalog::load(fixture_path("tests/fixtures/episodes.json")).unwrap();
    let mut rows = load_rows(fixture_path("tests/fixtures/spotify.json")).unwrap();
    order_rows(&mut rows);

    let plays: Vec<_> = rows.iter().map(|row| row.plays).collect();
    assert_eq!(plays, vec![900, 450, 120, 40]);

    let matcher = TitleMatcher::new(catalog.records());
    let entries = chart(&rows, &matcher, 20, 5);
    assert_eq!(entries.len(), 4);
    assert_eq!(entries[0].link, ChartLink::Detail("101".to_string()));
    assert_eq!(entries[1].link, ChartLink::Detail("102".to_string()));
    assert_eq!(entries[2].link, ChartLink::Detail("105".to_string()));
    assert_eq!(
        entries[3].link,
        ChartLink::External("spotify:episode:900".to_string())
    );

    let bars: Vec<_> = entries.iter().map(|entry| entry.bar_percent).collect();
    assert_eq!(bars, vec![100, 50, 13, 5]);
    assert_eq!(entries[3].position, 4);
}

#[test]
fn ranking_missing_file_is_empty() {
    let rows = load_rows(fixture_path("tests/fixtures/does-not-exist.json")).unwrap();
    assert!(rows.is_empty());
}
