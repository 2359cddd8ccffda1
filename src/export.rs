//! Tabular export of a session log.
//!
//! Columns are `Time,Input,Eng1_Pred,Eng2_Pred,Status`. Rows are written most
//! recent first, times as local `HH:MM:SS`, and absent predictions as `-`.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use serde::Serialize;
use tracing::info;

use crate::catalog::PredictedValue;
use crate::error::ExportError;
use crate::log::{LogEntry, SessionLog};

/// Placeholder written for an engine that made no prediction.
pub const ABSENT: &str = "-";

/// Header row, in column order.
pub const HEADER: [&str; 5] = ["Time", "Input", "Eng1_Pred", "Eng2_Pred", "Status"];

#[derive(Debug, Serialize)]
struct ExportRow<'a> {
    #[serde(rename = "Time")]
    time: String,
    #[serde(rename = "Input")]
    input: &'a str,
    #[serde(rename = "Eng1_Pred")]
    tracker: &'a str,
    #[serde(rename = "Eng2_Pred")]
    structural: &'a str,
    #[serde(rename = "Status")]
    status: &'static str,
}

impl<'a> From<&'a LogEntry> for ExportRow<'a> {
    fn from(entry: &'a LogEntry) -> Self {
        Self {
            time: entry.clock_time(),
            input: entry.input.as_str(),
            tracker: entry.tracker.as_ref().map_or(ABSENT, PredictedValue::as_str),
            structural: entry.structural.as_ref().map_or(ABSENT, PredictedValue::as_str),
            status: entry.status.as_str(),
        }
    }
}

/// Writes `log` as CSV to `writer`. The header is written even for an empty
/// log.
///
/// # Errors
///
/// Returns `ExportError` if serialization or the underlying writer fails.
pub fn write_csv<W: Write>(log: &SessionLog, writer: W) -> Result<(), ExportError> {
    let mut out = csv::WriterBuilder::new().has_headers(false).from_writer(writer);
    out.write_record(HEADER)?;
    for entry in log.recent_first() {
        out.serialize(ExportRow::from(entry))?;
    }
    out.flush()?;
    Ok(())
}

/// Renders `log` as a CSV string.
///
/// # Errors
///
/// Returns `ExportError` if serialization fails.
pub fn to_csv_string(log: &SessionLog) -> Result<String, ExportError> {
    let mut buf = Vec::new();
    write_csv(log, &mut buf)?;
    String::from_utf8(buf)
        .map_err(|e| ExportError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}

/// Writes `log` as CSV to a file, replacing any existing file.
///
/// # Errors
///
/// Returns `ExportError::Io` if the file cannot be created.
pub fn export_to_path(log: &SessionLog, path: impl AsRef<Path>) -> Result<(), ExportError> {
    let path = path.as_ref();
    let file = File::create(path)?;
    write_csv(log, file)?;
    info!(path = %path.display(), rows = log.len(), "session log exported");
    Ok(())
}
