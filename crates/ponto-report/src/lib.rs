//! Report domain library for the Pontomais audit sync.
//!
//! Everything here is offline logic shared by the two pipeline stages:
//! computing the report period, discovering the downloaded export on disk,
//! loading it, and applying the cleaning rules before publication.

pub mod dates;
pub mod discover;
pub mod table;
pub mod xlsx;

pub use dates::ReportPeriod;
pub use discover::latest_report;
pub use table::ReportTable;
pub use xlsx::load_report;

/// Errors that can occur while discovering or loading a report.
#[derive(thiserror::Error, Debug)]
pub enum ReportError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("spreadsheet error: {0}")]
    Spreadsheet(#[from] calamine::Error),

    #[error("report shape error: {0}")]
    Shape(String),
}

/// Convenience result type.
pub type ReportResult<T> = Result<T, ReportError>;
