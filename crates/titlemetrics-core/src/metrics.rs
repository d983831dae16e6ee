use std::collections::HashMap;

use titlemetrics_parser::ContentType;

use crate::normalize::{label_or_unknown, split_multi, Title, UNKNOWN_LABEL};
use crate::report::{CountRow, GroupedCountRow, HistogramBin, ValueRow};

pub const TOP_N: usize = 10;
pub const RELEASE_YEAR_BINS: usize = 15;
pub const MOVIE_DURATION_BINS: usize = 30;
pub const SEASON_COUNT_BINS: usize = 15;

pub const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Series labels for two-key metrics, in fixed render order.
const SERIES_ORDER: [&str; 3] = ["Movie", "TV Show", UNKNOWN_LABEL];

/// Counts labels while remembering first-encountered order, so ranking
/// ties resolve to source order deterministically.
#[derive(Debug, Default)]
pub struct StableCounter {
    order: Vec<String>,
    counts: HashMap<String, u64>,
}

impl StableCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, label: &str) {
        if let Some(count) = self.counts.get_mut(label) {
            *count += 1;
        } else {
            self.order.push(label.to_string());
            self.counts.insert(label.to_string(), 1);
        }
    }

    /// Rows in first-encountered order.
    pub fn rows(self) -> Vec<CountRow> {
        let StableCounter { order, counts } = self;
        order
            .into_iter()
            .map(|label| {
                let count = counts[&label];
                CountRow { label, count }
            })
            .collect()
    }

    /// Rows sorted by count descending; ties keep first-encountered order.
    pub fn ranked(self) -> Vec<CountRow> {
        let mut rows = self.rows();
        rows.sort_by(|a, b| b.count.cmp(&a.count));
        rows
    }

    fn top(self, limit: usize) -> Vec<CountRow> {
        let mut rows = self.ranked();
        rows.truncate(limit);
        rows
    }
}

pub fn type_split(titles: &[Title]) -> Vec<CountRow> {
    let mut counter = StableCounter::new();
    for title in titles {
        counter.add(kind_label(title.kind));
    }
    counter.ranked()
}

/// Full exploded genre aggregation, ranked, before any top-N cut.
pub fn genre_counts(titles: &[Title]) -> Vec<CountRow> {
    let mut counter = StableCounter::new();
    for title in titles {
        match title.genres.as_deref() {
            Some(genres) => {
                for genre in split_multi(genres) {
                    counter.add(genre);
                }
            }
            None => counter.add(UNKNOWN_LABEL),
        }
    }
    counter.ranked()
}

pub fn top_genres(titles: &[Title]) -> Vec<CountRow> {
    let mut rows = genre_counts(titles);
    rows.truncate(TOP_N);
    rows
}

/// Full exploded country aggregation, ranked. Missing country counts as
/// one "Unknown" occurrence.
pub fn country_counts(titles: &[Title]) -> Vec<CountRow> {
    let mut counter = StableCounter::new();
    for title in titles {
        for country in country_labels(title) {
            counter.add(country);
        }
    }
    counter.ranked()
}

pub fn top_countries(titles: &[Title]) -> Vec<CountRow> {
    let mut rows = country_counts(titles);
    rows.truncate(TOP_N);
    rows
}

pub fn rating_distribution(titles: &[Title]) -> Vec<CountRow> {
    let mut counter = StableCounter::new();
    for title in titles {
        counter.add(label_or_unknown(title.rating.as_deref()));
    }
    counter.ranked()
}

/// Additions per calendar month: always 12 rows in January-December order,
/// zero for months with no additions. Rows without a parseable date are
/// excluded, never coerced to an "Unknown" month.
pub fn monthly_additions(titles: &[Title]) -> Vec<CountRow> {
    use chrono::Datelike;

    let mut counts = [0u64; 12];
    for title in titles {
        if let Some(date) = title.date_added {
            counts[date.month0() as usize] += 1;
        }
    }

    MONTH_NAMES
        .iter()
        .zip(counts)
        .map(|(label, count)| CountRow {
            label: (*label).to_string(),
            count,
        })
        .collect()
}

/// Directors are counted as whole free-text values, missing excluded.
pub fn top_directors(titles: &[Title]) -> Vec<CountRow> {
    let mut counter = StableCounter::new();
    for title in titles {
        if let Some(director) = title.director.as_deref() {
            counter.add(director);
        }
    }
    counter.top(TOP_N)
}

pub fn top_actors(titles: &[Title]) -> Vec<CountRow> {
    let mut counter = StableCounter::new();
    for title in titles {
        let Some(cast) = title.cast.as_deref() else {
            continue;
        };
        for member in split_multi(cast) {
            counter.add(member);
        }
    }
    counter.top(TOP_N)
}

/// (country, type) counts restricted to the given top-country ranking.
/// Countries are exploded; groups come out in ranking order.
pub fn type_by_top_country(
    titles: &[Title],
    top_countries: &[CountRow],
) -> Vec<GroupedCountRow> {
    let rank: HashMap<&str, usize> = top_countries
        .iter()
        .enumerate()
        .map(|(idx, row)| (row.label.as_str(), idx))
        .collect();

    let mut counts: HashMap<(usize, usize), u64> = HashMap::new();
    for title in titles {
        let series = series_index(title.kind);
        for country in country_labels(title) {
            if let Some(&group) = rank.get(country) {
                *counts.entry((group, series)).or_insert(0) += 1;
            }
        }
    }

    let mut rows = Vec::new();
    for (group_idx, group) in top_countries.iter().enumerate() {
        for (series_idx, series) in SERIES_ORDER.iter().enumerate() {
            if let Some(&count) = counts.get(&(group_idx, series_idx)) {
                rows.push(GroupedCountRow {
                    group: group.label.clone(),
                    series: (*series).to_string(),
                    count,
                });
            }
        }
    }
    rows
}

/// (rating, type) counts over every row. Rating groups are ordered by
/// total count descending, ties stable.
pub fn rating_by_type(titles: &[Title]) -> Vec<GroupedCountRow> {
    let mut totals = StableCounter::new();
    let mut counts: HashMap<(String, usize), u64> = HashMap::new();
    for title in titles {
        let rating = label_or_unknown(title.rating.as_deref());
        totals.add(rating);
        *counts
            .entry((rating.to_string(), series_index(title.kind)))
            .or_insert(0) += 1;
    }

    let mut rows = Vec::new();
    for group in totals.ranked() {
        for (series_idx, series) in SERIES_ORDER.iter().enumerate() {
            if let Some(&count) = counts.get(&(group.label.clone(), series_idx)) {
                rows.push(GroupedCountRow {
                    group: group.label.clone(),
                    series: (*series).to_string(),
                    count,
                });
            }
        }
    }
    rows
}

pub fn release_year_histogram(titles: &[Title]) -> Vec<HistogramBin> {
    let years: Vec<f64> = titles
        .iter()
        .filter_map(|title| title.release_year)
        .map(f64::from)
        .collect();
    histogram(&years, RELEASE_YEAR_BINS)
}

pub fn movie_duration_histogram(titles: &[Title]) -> Vec<HistogramBin> {
    histogram(
        &duration_values(titles, ContentType::Movie),
        MOVIE_DURATION_BINS,
    )
}

pub fn season_count_histogram(titles: &[Title]) -> Vec<HistogramBin> {
    histogram(
        &duration_values(titles, ContentType::TvShow),
        SEASON_COUNT_BINS,
    )
}

pub fn longest_movies(titles: &[Title]) -> Vec<ValueRow> {
    ranked_durations(titles, ContentType::Movie, 5, Ranking::Largest)
}

pub fn shortest_movies(titles: &[Title]) -> Vec<ValueRow> {
    ranked_durations(titles, ContentType::Movie, 5, Ranking::Smallest)
}

pub fn longest_tv_shows(titles: &[Title]) -> Vec<ValueRow> {
    ranked_durations(titles, ContentType::TvShow, TOP_N, Ranking::Largest)
}

/// Unsplit country counts for one content type, missing excluded.
pub fn tv_shows_by_country(titles: &[Title]) -> Vec<CountRow> {
    country_counts_for(titles, ContentType::TvShow)
}

pub fn movies_by_country(titles: &[Title]) -> Vec<CountRow> {
    country_counts_for(titles, ContentType::Movie)
}

#[derive(Debug, Clone, Copy)]
enum Ranking {
    Largest,
    Smallest,
}

fn ranked_durations(
    titles: &[Title],
    kind: ContentType,
    limit: usize,
    ranking: Ranking,
) -> Vec<ValueRow> {
    let mut rows: Vec<ValueRow> = titles
        .iter()
        .filter(|title| title.kind == Some(kind))
        .filter_map(|title| {
            title.duration_value.map(|value| ValueRow {
                label: title.name.clone(),
                value,
            })
        })
        .collect();

    match ranking {
        Ranking::Largest => rows.sort_by(|a, b| b.value.cmp(&a.value)),
        Ranking::Smallest => rows.sort_by(|a, b| a.value.cmp(&b.value)),
    }
    rows.truncate(limit);
    rows
}

fn country_counts_for(titles: &[Title], kind: ContentType) -> Vec<CountRow> {
    let mut counter = StableCounter::new();
    for title in titles {
        if title.kind != Some(kind) {
            continue;
        }
        if let Some(country) = title.country.as_deref() {
            counter.add(country);
        }
    }
    counter.top(TOP_N)
}

fn duration_values(titles: &[Title], kind: ContentType) -> Vec<f64> {
    titles
        .iter()
        .filter(|title| title.kind == Some(kind))
        .filter_map(|title| title.duration_value)
        .map(f64::from)
        .collect()
}

fn country_labels(title: &Title) -> Vec<&str> {
    match title.country.as_deref() {
        Some(value) => split_multi(value).collect(),
        None => vec![UNKNOWN_LABEL],
    }
}

fn kind_label(kind: Option<ContentType>) -> &'static str {
    match kind {
        Some(kind) => kind.as_str(),
        None => UNKNOWN_LABEL,
    }
}

fn series_index(kind: Option<ContentType>) -> usize {
    match kind {
        Some(ContentType::Movie) => 0,
        Some(ContentType::TvShow) => 1,
        None => 2,
    }
}

/// Equal-width bins over [min, max]. A single distinct value collapses to
/// one bin holding everything.
pub fn histogram(values: &[f64], bins: usize) -> Vec<HistogramBin> {
    if values.is_empty() || bins == 0 {
        return Vec::new();
    }

    let min = values.iter().cloned().fold(f64::INFINITY, f64::min);
    let max = values.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

    if (max - min).abs() < f64::EPSILON {
        return vec![HistogramBin {
            lower: min,
            upper: max,
            count: values.len() as u64,
        }];
    }

    let width = (max - min) / bins as f64;
    let mut counts = vec![0u64; bins];
    for &value in values {
        let mut idx = ((value - min) / width) as usize;
        if idx >= bins {
            idx = bins - 1;
        }
        counts[idx] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(idx, count)| HistogramBin {
            lower: min + width * idx as f64,
            upper: min + width * (idx + 1) as f64,
            count,
        })
        .collect()
}
