use serde::Serialize;

use crate::metrics;
use crate::normalize::Title;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountRow {
    pub label: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValueRow {
    pub label: String,
    pub value: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupedCountRow {
    pub group: String,
    pub series: String,
    pub count: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HistogramBin {
    pub lower: f64,
    pub upper: f64,
    pub count: u64,
}

/// Table shape a rendering collaborator receives. Axis roles, colors, and
/// chart types are its concern, not ours.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "shape", content = "rows")]
pub enum SectionData {
    Counts(Vec<CountRow>),
    Histogram(Vec<HistogramBin>),
    Grouped(Vec<GroupedCountRow>),
    Values(Vec<ValueRow>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportSection {
    pub key: &'static str,
    pub title: &'static str,
    pub data: SectionData,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CatalogReport {
    pub sections: Vec<ReportSection>,
}

/// Run every metric over the normalized catalog, in dashboard order.
pub fn build_report(titles: &[Title]) -> CatalogReport {
    use SectionData::{Counts, Grouped, Histogram, Values};

    let top_countries = metrics::top_countries(titles);

    let sections = vec![
        ReportSection {
            key: "type_split",
            title: "Movies vs. TV Shows",
            data: Counts(metrics::type_split(titles)),
        },
        ReportSection {
            key: "top_genres",
            title: "Top 10 Genres",
            data: Counts(metrics::top_genres(titles)),
        },
        ReportSection {
            key: "release_years",
            title: "Release Trend Over Years",
            data: Histogram(metrics::release_year_histogram(titles)),
        },
        ReportSection {
            key: "top_countries",
            title: "Top 10 Countries Producing Content",
            data: Counts(top_countries.clone()),
        },
        ReportSection {
            key: "rating_distribution",
            title: "Content Ratings Distribution",
            data: Counts(metrics::rating_distribution(titles)),
        },
        ReportSection {
            key: "monthly_additions",
            title: "Monthly Additions Trend",
            data: Counts(metrics::monthly_additions(titles)),
        },
        ReportSection {
            key: "top_directors",
            title: "Top 10 Most Frequent Directors",
            data: Counts(metrics::top_directors(titles)),
        },
        ReportSection {
            key: "type_by_top_country",
            title: "Movies vs TV Shows in Top 10 Countries",
            data: Grouped(metrics::type_by_top_country(titles, &top_countries)),
        },
        ReportSection {
            key: "movie_durations",
            title: "Distribution of Movie Durations",
            data: Histogram(metrics::movie_duration_histogram(titles)),
        },
        ReportSection {
            key: "longest_movies",
            title: "Top 5 Longest Movies",
            data: Values(metrics::longest_movies(titles)),
        },
        ReportSection {
            key: "shortest_movies",
            title: "Top 5 Shortest Movies",
            data: Values(metrics::shortest_movies(titles)),
        },
        ReportSection {
            key: "season_counts",
            title: "Most Common Number of Seasons",
            data: Histogram(metrics::season_count_histogram(titles)),
        },
        ReportSection {
            key: "top_actors",
            title: "Top 10 Actors with Most Appearances",
            data: Counts(metrics::top_actors(titles)),
        },
        ReportSection {
            key: "tv_shows_by_country",
            title: "Top 10 Countries with Most TV Shows",
            data: Counts(metrics::tv_shows_by_country(titles)),
        },
        ReportSection {
            key: "movies_by_country",
            title: "Top 10 Countries with the Most Movies",
            data: Counts(metrics::movies_by_country(titles)),
        },
        ReportSection {
            key: "rating_by_type",
            title: "Content Ratings by Type",
            data: Grouped(metrics::rating_by_type(titles)),
        },
        ReportSection {
            key: "longest_tv_shows",
            title: "Top 10 Longest TV Shows",
            data: Values(metrics::longest_tv_shows(titles)),
        },
    ];

    CatalogReport { sections }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn report_has_every_section_in_dashboard_order() {
        let report = build_report(&[]);
        assert_eq!(report.sections.len(), 17);
        assert_eq!(report.sections[0].key, "type_split");
        assert_eq!(report.sections[16].key, "longest_tv_shows");

        let keys: HashSet<&str> = report.sections.iter().map(|s| s.key).collect();
        assert_eq!(keys.len(), report.sections.len());
    }

    #[test]
    fn empty_catalog_produces_empty_tables_not_errors() {
        let report = build_report(&[]);
        for section in &report.sections {
            match &section.data {
                SectionData::Counts(rows) => {
                    // Monthly additions still lists its 12 calendar rows.
                    if section.key == "monthly_additions" {
                        assert_eq!(rows.len(), 12);
                        assert!(rows.iter().all(|row| row.count == 0));
                    } else {
                        assert!(rows.is_empty());
                    }
                }
                SectionData::Histogram(bins) => assert!(bins.is_empty()),
                SectionData::Grouped(rows) => assert!(rows.is_empty()),
                SectionData::Values(rows) => assert!(rows.is_empty()),
            }
        }
    }
}
