use std::path::Path;

use tracing::info;

use titlemetrics_parser::parse_catalog;

use crate::error::Result;
use crate::normalize::normalize;
use crate::report::{build_report, CatalogReport};

/// Load, normalize, and aggregate a catalog file in one pass.
///
/// The only fatal failures are I/O and schema problems; row-level parse
/// issues downgrade inside normalization and never surface here.
pub fn run_file(path: &Path) -> Result<CatalogReport> {
    let contents = std::fs::read_to_string(path)?;
    run_contents(&contents)
}

pub fn run_contents(contents: &str) -> Result<CatalogReport> {
    let raw = parse_catalog(contents)?;
    info!(rows = raw.len(), "catalog loaded");

    let titles = normalize(raw);
    let report = build_report(&titles);
    info!(sections = report.sections.len(), "report built");

    Ok(report)
}

#[cfg(test)]
mod tests {
    use titlemetrics_parser::LoadError;

    use crate::error::PipelineError;

    use super::*;

    #[test]
    fn schema_error_aborts_before_any_aggregation() {
        let content = "title,type\nA,Movie\n";
        let err = run_contents(content).expect_err("missing columns should be fatal");
        match err {
            PipelineError::Load(LoadError::MissingColumn { column }) => {
                assert_eq!(column, "director")
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn end_to_end_over_inline_catalog() {
        let content = "\
title,type,director,cast,country,date_added,release_year,rating,duration,listed_in
Movie A,Movie,,,\"US, CA\",\"September 25, 2021\",2020,PG,90 min,Dramas
Movie B,Movie,,,US,\"September 24, 2021\",2021,PG-13,120 min,\"Dramas, Comedies\"
Show A,TV Show,,,US,\"January 2, 2020\",2019,TV-MA,2 Seasons,Dramas
";
        let report = run_contents(content).expect("pipeline run failed");
        assert_eq!(report.sections.len(), 17);

        let top_countries = report
            .sections
            .iter()
            .find(|section| section.key == "top_countries")
            .expect("top_countries section missing");
        match &top_countries.data {
            crate::report::SectionData::Counts(rows) => {
                assert_eq!(rows[0].label, "US");
                assert_eq!(rows[0].count, 3);
                assert_eq!(rows[1].label, "CA");
                assert_eq!(rows[1].count, 1);
            }
            other => panic!("unexpected section shape: {other:?}"),
        }
    }
}
