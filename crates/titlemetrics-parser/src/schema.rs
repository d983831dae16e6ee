/// Columns the catalog must carry. Extra columns in the source file are
/// ignored; a missing entry from this list aborts the load.
pub const REQUIRED_COLUMNS: [&str; 10] = [
    "title",
    "type",
    "director",
    "cast",
    "country",
    "date_added",
    "release_year",
    "rating",
    "duration",
    "listed_in",
];
