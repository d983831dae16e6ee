use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use titlemetrics_parser::{ContentType, RawTitle};

/// Display label for missing categorical values. Applied at the
/// aggregation/labeling boundary only; the data model keeps `None`.
pub const UNKNOWN_LABEL: &str = "Unknown";

/// Rating cells that are actually duration strings in the source data.
const RATING_DENYLIST: [&str; 3] = ["74 min", "84 min", "66 min"];

/// Formats tried in order when parsing `date_added`.
const DATE_FORMATS: [&str; 2] = ["%B %d, %Y", "%Y-%m-%d"];

/// One normalized catalog record. Derived fields are pure functions of the
/// raw fields; `None` marks a value as missing and excludes it from the
/// aggregations that need it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Title {
    pub name: String,
    pub kind: Option<ContentType>,
    pub director: Option<String>,
    pub cast: Option<String>,
    pub country: Option<String>,
    pub rating: Option<String>,
    pub release_year: Option<i32>,
    pub date_added: Option<NaiveDate>,
    pub duration_raw: Option<String>,
    /// Minutes for movies, season count for TV shows.
    pub duration_value: Option<u32>,
    pub genres: Option<String>,
}

impl Title {
    /// Re-applies every per-field rule to this record. Normalization is
    /// idempotent, so the result always equals `self`.
    pub fn renormalize(&self) -> Title {
        Title {
            name: clean_label(&self.name),
            kind: self.kind,
            director: clean_field(self.director.as_deref()),
            cast: clean_field(self.cast.as_deref()),
            country: clean_field(self.country.as_deref()),
            rating: normalize_rating(clean_field(self.rating.as_deref())),
            release_year: self.release_year,
            date_added: self.date_added,
            duration_raw: clean_field(self.duration_raw.as_deref()),
            duration_value: self
                .duration_raw
                .as_deref()
                .and_then(first_integer_token),
            genres: clean_field(self.genres.as_deref()),
        }
    }
}

/// Normalize raw catalog rows in source order.
///
/// Never fails: unparseable dates, years, and duration tokens downgrade to
/// `None` per-row; the row still participates in every aggregation that
/// does not need the downgraded field.
pub fn normalize(raw: Vec<RawTitle>) -> Vec<Title> {
    let mut titles = Vec::with_capacity(raw.len());
    let mut date_downgrades = 0usize;
    let mut duration_downgrades = 0usize;

    for record in raw {
        let date_added = record.date_added.as_deref().and_then(parse_date_added);
        if record.date_added.is_some() && date_added.is_none() {
            date_downgrades += 1;
        }

        let duration_value = record.duration.as_deref().and_then(first_integer_token);
        if record.duration.is_some() && duration_value.is_none() {
            duration_downgrades += 1;
        }

        titles.push(Title {
            name: record
                .title
                .unwrap_or_else(|| UNKNOWN_LABEL.to_string()),
            kind: record
                .kind
                .as_deref()
                .and_then(|value| ContentType::try_from(value).ok()),
            director: record.director,
            cast: record.cast,
            country: record.country,
            rating: normalize_rating(record.rating),
            release_year: record
                .release_year
                .as_deref()
                .and_then(|value| value.trim().parse::<i32>().ok()),
            date_added,
            duration_raw: record.duration,
            duration_value,
            genres: record.genres,
        });
    }

    debug!(
        rows = titles.len(),
        date_downgrades, duration_downgrades, "catalog normalized"
    );

    titles
}

/// Split a multi-valued cell into its individual values.
pub fn split_multi(value: &str) -> impl Iterator<Item = &str> {
    value
        .split(", ")
        .map(str::trim)
        .filter(|item| !item.is_empty())
}

/// Label for a possibly-missing categorical value.
pub fn label_or_unknown(value: Option<&str>) -> &str {
    value.unwrap_or(UNKNOWN_LABEL)
}

fn normalize_rating(rating: Option<String>) -> Option<String> {
    rating.filter(|value| !RATING_DENYLIST.contains(&value.as_str()))
}

fn parse_date_added(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(trimmed, fmt).ok())
}

/// First run of ASCII digits in the text, e.g. "125 min" -> 125,
/// "2 Seasons" -> 2. No digits -> `None`.
fn first_integer_token(value: &str) -> Option<u32> {
    let start = value.find(|ch: char| ch.is_ascii_digit())?;
    let digits: String = value[start..]
        .chars()
        .take_while(|ch| ch.is_ascii_digit())
        .collect();
    digits.parse::<u32>().ok()
}

fn clean_field(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(|v| v.to_string())
}

fn clean_label(value: &str) -> String {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        UNKNOWN_LABEL.to_string()
    } else {
        trimmed.to_string()
    }
}
