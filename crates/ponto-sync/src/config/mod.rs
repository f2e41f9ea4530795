//! Environment configuration, resolved once at process start.
//!
//! Each stage builds its config struct before doing any work, so a missing
//! variable fails the run up front instead of mid-pipeline. Variable names
//! are kept from the original deployment.

use std::path::PathBuf;

use crate::{SyncError, SyncResult};

const PORTAL_USER: &str = "user";
const PORTAL_PASSWORD: &str = "password";
const SPREADSHEET_ID: &str = "SPREADSHEET_ID";
const SHEETS_CREDENTIALS: &str = "PONTOMAIS_CRED";
const REPORT_DIR: &str = "REPORT_DIR";

/// Credentials for the portal login form.
#[derive(Debug, Clone)]
pub struct PortalConfig {
    pub username: String,
    pub password: String,
}

impl PortalConfig {
    pub fn from_env() -> SyncResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> SyncResult<Self> {
        Ok(Self {
            username: require(&lookup, PORTAL_USER)?,
            password: require(&lookup, PORTAL_PASSWORD)?,
        })
    }
}

/// Destination spreadsheet plus where to look for the downloaded report.
#[derive(Debug, Clone)]
pub struct SheetsConfig {
    pub spreadsheet_id: String,
    /// JSON-encoded service account key.
    pub credentials_json: String,
    /// Directory scanned for the newest export.
    pub report_dir: PathBuf,
}

impl SheetsConfig {
    pub fn from_env() -> SyncResult<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> SyncResult<Self> {
        Ok(Self {
            spreadsheet_id: require(&lookup, SPREADSHEET_ID)?,
            credentials_json: require(&lookup, SHEETS_CREDENTIALS)?,
            report_dir: lookup(REPORT_DIR)
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(".")),
        })
    }
}

fn require(lookup: &impl Fn(&str) -> Option<String>, name: &str) -> SyncResult<String> {
    match lookup(name) {
        Some(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(SyncError::Config(format!(
            "environment variable {name} is not set"
        ))),
    }
}
