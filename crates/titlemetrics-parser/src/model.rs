use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContentType {
    Movie,
    TvShow,
}

impl ContentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Movie => "Movie",
            ContentType::TvShow => "TV Show",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for ContentType {
    type Error = String;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim() {
            "Movie" => Ok(ContentType::Movie),
            "TV Show" => Ok(ContentType::TvShow),
            other => Err(format!("unknown content type '{other}'")),
        }
    }
}

/// One catalog row as loaded from the source file. Cells are trimmed and
/// empty cells become `None`; no further interpretation happens here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawTitle {
    pub title: Option<String>,
    pub kind: Option<String>,
    pub director: Option<String>,
    pub cast: Option<String>,
    pub country: Option<String>,
    pub date_added: Option<String>,
    pub release_year: Option<String>,
    pub rating: Option<String>,
    pub duration: Option<String>,
    pub genres: Option<String>,
}
