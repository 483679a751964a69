use std::path::PathBuf;

use thiserror::Error;

/// Errors surfaced by the aggregation and reporting pipeline.
///
/// Only [`SalesError::Io`] and [`SalesError::Csv`] are fatal to a run.
/// Per-row problems never show up here: they are logged and the row is
/// skipped.
#[derive(Debug, Error)]
pub enum SalesError {
    /// The sales file could not be opened or read.
    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file opened but could not be read as CSV.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// The requested report format is not supported.
    #[error("invalid report format {given:?}: expected \"text\" or \"json\"")]
    InvalidFormat { given: String },

    /// The report could not be written out.
    #[error("failed to write report: {0}")]
    Output(#[from] std::io::Error),

    /// The report could not be serialized to JSON.
    #[error("failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SalesError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_format_error_names_the_allowed_values() {
        let err = SalesError::InvalidFormat {
            given: "xml".into(),
        };
        assert_eq!(
            err.to_string(),
            "invalid report format \"xml\": expected \"text\" or \"json\""
        );
    }
}
