//! Error taxonomy for the sync pipelines.

use std::time::Duration;

/// All errors produced by the acquisition and publication pipelines.
#[derive(thiserror::Error, Debug)]
pub enum SyncError {
    /// Missing or malformed environment configuration. Raised before any
    /// browser or network work begins, never retried.
    #[error("configuration error: {0}")]
    Config(String),

    /// A UI element never became ready within its bound, or the click retry
    /// budget ran out. Terminal for the acquisition run.
    #[error("timed out after {1:?} waiting for {0}")]
    UiTimeout(String, Duration),

    /// A click landed on an overlay or a mid-layout node. Only the bounded
    /// retry helper observes this; it never escapes un-promoted.
    #[error("click obstructed on {0}")]
    ClickObstructed(String),

    /// Any other browser automation failure. Logged once at the top of the
    /// stage, session torn down, no retry.
    #[error("automation error: {0}")]
    Automation(String),

    /// Report discovery or parsing failure.
    #[error(transparent)]
    Report(#[from] ponto_report::ReportError),

    /// Sheets API failure while replacing the worksheet contents.
    #[error("publish error: {0}")]
    Publish(String),

    /// Sheets API failure while formatting. Non-fatal: the data is already
    /// published when this can occur.
    #[error("format error: {0}")]
    Format(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type.
pub type SyncResult<T> = Result<T, SyncError>;

impl SyncError {
    pub fn is_click_obstructed(&self) -> bool {
        matches!(self, SyncError::ClickObstructed(_))
    }

    /// Classify a CDP failure during a click.
    ///
    /// CDP reports an overlay-obstructed or mid-layout click as a node
    /// visibility / content-quads failure; those are the transient mode the
    /// bounded retry handles. Everything else is a plain automation error.
    pub fn from_click_failure(target: &str, err: chromiumoxide::error::CdpError) -> Self {
        let message = err.to_string();
        let lowered = message.to_lowercase();
        if lowered.contains("not visible") || lowered.contains("content quads") {
            SyncError::ClickObstructed(target.to_string())
        } else {
            SyncError::Automation(format!("click on {target}: {message}"))
        }
    }
}

impl From<chromiumoxide::error::CdpError> for SyncError {
    fn from(err: chromiumoxide::error::CdpError) -> Self {
        SyncError::Automation(err.to_string())
    }
}
