use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReportError {
    #[error("failed to read input file {path}: {source}")]
    InputRead {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("invalid working-day calendar: {0}")]
    Calendar(String),

    #[error("incorrect report specified: '{0}'. Currently, we support reports for 'Payment Method' and 'Service Type'")]
    UnsupportedReportKind(String),

    #[error("failed to write report {path}: {source}")]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ReportError>;
