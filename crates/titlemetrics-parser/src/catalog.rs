use csv::{ReaderBuilder, StringRecord};

use crate::errors::LoadError;
use crate::model::RawTitle;
use crate::schema::REQUIRED_COLUMNS;

/// Parse the catalog file contents into raw rows, preserving source order.
///
/// Source order is load-bearing: every downstream tie-break is
/// "first-encountered wins", so rows are never reordered here.
pub fn parse_catalog(content: &str) -> Result<Vec<RawTitle>, LoadError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers = reader.headers()?.clone();
    let columns = ColumnIndex::resolve(&headers)?;

    let mut titles = Vec::new();
    for record in reader.records() {
        let record = record?;
        titles.push(columns.raw_title(&record));
    }

    Ok(titles)
}

/// Resolved position of each required column in the header row.
struct ColumnIndex {
    title: usize,
    kind: usize,
    director: usize,
    cast: usize,
    country: usize,
    date_added: usize,
    release_year: usize,
    rating: usize,
    duration: usize,
    genres: usize,
}

impl ColumnIndex {
    fn resolve(headers: &StringRecord) -> Result<Self, LoadError> {
        for column in REQUIRED_COLUMNS {
            position(headers, column)?;
        }

        Ok(Self {
            title: position(headers, "title")?,
            kind: position(headers, "type")?,
            director: position(headers, "director")?,
            cast: position(headers, "cast")?,
            country: position(headers, "country")?,
            date_added: position(headers, "date_added")?,
            release_year: position(headers, "release_year")?,
            rating: position(headers, "rating")?,
            duration: position(headers, "duration")?,
            genres: position(headers, "listed_in")?,
        })
    }

    fn raw_title(&self, record: &StringRecord) -> RawTitle {
        RawTitle {
            title: clean_cell(record.get(self.title)),
            kind: clean_cell(record.get(self.kind)),
            director: clean_cell(record.get(self.director)),
            cast: clean_cell(record.get(self.cast)),
            country: clean_cell(record.get(self.country)),
            date_added: clean_cell(record.get(self.date_added)),
            release_year: clean_cell(record.get(self.release_year)),
            rating: clean_cell(record.get(self.rating)),
            duration: clean_cell(record.get(self.duration)),
            genres: clean_cell(record.get(self.genres)),
        }
    }
}

fn position(headers: &StringRecord, column: &'static str) -> Result<usize, LoadError> {
    headers
        .iter()
        .position(|header| header.trim().eq_ignore_ascii_case(column))
        .ok_or(LoadError::MissingColumn { column })
}

fn clean_cell(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(|v| v.to_string())
}
