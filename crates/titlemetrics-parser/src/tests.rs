use std::fs;
use std::path::PathBuf;

use crate::errors::LoadError;
use crate::model::ContentType;
use crate::parse_catalog;

fn fixture(path: &str) -> String {
    let base = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let full_path = base.join("tests/data").join(path);
    fs::read_to_string(&full_path)
        .unwrap_or_else(|err| panic!("failed to read fixture {}: {}", full_path.display(), err))
}

#[test]
fn parses_sample_catalog() {
    let content = fixture("catalog_sample.csv");
    let titles = parse_catalog(&content).expect("sample catalog parse failed");

    assert_eq!(titles.len(), 8);

    let first = &titles[0];
    assert_eq!(first.title.as_deref(), Some("Dick Johnson Is Dead"));
    assert_eq!(first.kind.as_deref(), Some("Movie"));
    assert_eq!(first.director.as_deref(), Some("Kirsten Johnson"));
    assert_eq!(first.cast, None);
    assert_eq!(first.date_added.as_deref(), Some("September 25, 2021"));
    assert_eq!(first.duration.as_deref(), Some("90 min"));
    assert_eq!(first.genres.as_deref(), Some("Documentaries"));
}

#[test]
fn empty_cells_load_as_none() {
    let content = fixture("catalog_sample.csv");
    let titles = parse_catalog(&content).expect("sample catalog parse failed");

    assert_eq!(titles[2].country, None);
    assert_eq!(titles[1].director, None);
    assert_eq!(titles[7].duration, None);
}

#[test]
fn source_order_is_preserved() {
    let content = fixture("catalog_sample.csv");
    let titles = parse_catalog(&content).expect("sample catalog parse failed");

    let names: Vec<&str> = titles
        .iter()
        .map(|t| t.title.as_deref().unwrap_or_default())
        .collect();
    assert_eq!(names[0], "Dick Johnson Is Dead");
    assert_eq!(names[4], "Louis C.K. 2017");
    assert_eq!(names[7], "The Starling");
}

#[test]
fn missing_column_is_fatal_and_named() {
    let content = "title,type,director,cast,country,date_added,release_year,duration,listed_in\n\
                   A,Movie,,,,,,90 min,Dramas\n";
    let err = parse_catalog(content).expect_err("parse should fail without rating column");
    match err {
        LoadError::MissingColumn { column } => assert_eq!(column, "rating"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn header_match_ignores_case_and_padding() {
    let content = "Title,Type,Director,Cast,Country, date_added ,release_year,Rating,Duration,Listed_In\n\
                   A,Movie,,,,,2020,PG,90 min,Dramas\n";
    let titles = parse_catalog(content).expect("case-insensitive headers should parse");
    assert_eq!(titles.len(), 1);
    assert_eq!(titles[0].release_year.as_deref(), Some("2020"));
}

#[test]
fn short_records_downgrade_to_missing_cells() {
    let content = "title,type,director,cast,country,date_added,release_year,rating,duration,listed_in\n\
                   A,Movie,Someone\n";
    let titles = parse_catalog(content).expect("short record should still parse");
    assert_eq!(titles[0].title.as_deref(), Some("A"));
    assert_eq!(titles[0].director.as_deref(), Some("Someone"));
    assert_eq!(titles[0].rating, None);
    assert_eq!(titles[0].duration, None);
}

#[test]
fn content_type_round_trips_known_values() {
    assert_eq!(ContentType::try_from("Movie"), Ok(ContentType::Movie));
    assert_eq!(ContentType::try_from("TV Show"), Ok(ContentType::TvShow));
    assert_eq!(ContentType::Movie.as_str(), "Movie");
    assert_eq!(ContentType::TvShow.as_str(), "TV Show");
    assert!(ContentType::try_from("Documentary").is_err());
}
