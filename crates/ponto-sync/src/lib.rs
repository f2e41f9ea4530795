//! Pontomais audit report automation.
//!
//! Two sequential stages, run as separate invocations of the same binary:
//!
//! - `acquire` drives a headless Chromium session through the portal UI and
//!   waits for the exported spreadsheet to land in the working directory.
//! - `publish` picks up the newest export, cleans it, and makes it the
//!   authoritative content of a Google Sheets worksheet.
//!
//! The stages share nothing in-process; the downloaded file is the handoff.

pub mod acquire;
pub mod browser;
pub mod config;
pub mod error;
pub mod portal;
pub mod publish;
pub mod sheets;

pub use config::{PortalConfig, SheetsConfig};
pub use error::{SyncError, SyncResult};
