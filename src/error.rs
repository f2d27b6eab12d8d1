use thiserror::Error;

/// Failure to read or parse the input table.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
}

#[derive(Debug, Error)]
pub enum AnalyzeError {
    #[error("data source unavailable: {0}")]
    SourceUnavailable(#[from] SourceError),
    /// `row` is the 1-based data row; row 0 means the header row.
    #[error("row {row} is missing required field `{field}`")]
    MissingField { row: usize, field: &'static str },
    /// A percentage or mean over this subgroup is undefined.
    #[error("no records in required subgroup `{0}`")]
    EmptyPopulation(&'static str),
}

impl From<std::io::Error> for AnalyzeError {
    fn from(err: std::io::Error) -> Self {
        AnalyzeError::SourceUnavailable(SourceError::Io(err))
    }
}

impl From<csv::Error> for AnalyzeError {
    fn from(err: csv::Error) -> Self {
        AnalyzeError::SourceUnavailable(SourceError::Csv(err))
    }
}
