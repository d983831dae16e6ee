use thiserror::Error;

use titlemetrics_parser::LoadError;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("catalog load failed: {0}")]
    Load(#[from] LoadError),

    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Polars operation failed: {0}")]
    Polars(#[from] polars::error::PolarsError),

    #[error("JSON serialization/deserialization error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, PipelineError>;
