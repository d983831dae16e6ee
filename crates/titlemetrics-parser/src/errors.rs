use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("catalog CSV error: {source}")]
    Csv {
        #[from]
        source: csv::Error,
    },

    #[error("catalog is missing required column '{column}'")]
    MissingColumn { column: &'static str },
}
