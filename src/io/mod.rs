pub mod csv;
pub mod json;

use thiserror::Error;

pub use self::csv::{write_telemetry, write_telemetry_file};
pub use self::json::{write_summary, write_summary_file, FlightSummary};

/// Errors raised while exporting a run.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] ::csv::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
