//! Minimal Google Sheets v4 REST client.
//!
//! Covers exactly what publication needs: resolve a worksheet's numeric id,
//! clear it, rewrite it from the top-left cell, and apply header formatting.

pub mod auth;

use std::time::Duration;

use serde_json::{json, Value};

use self::auth::ServiceAccountKey;
use crate::config::SheetsConfig;
use crate::{SyncError, SyncResult};

/// Live API endpoint; tests point the client at a mock server instead.
pub const SHEETS_API_BASE: &str = "https://sheets.googleapis.com";

const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

pub struct SheetsClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
    spreadsheet_id: String,
}

impl SheetsClient {
    /// Authenticate, directing API calls at `base_url` ([`SHEETS_API_BASE`]
    /// in production, a mock server in tests).
    pub async fn connect_with_base_url(
        config: &SheetsConfig,
        base_url: &str,
    ) -> SyncResult<Self> {
        let key = ServiceAccountKey::from_json(&config.credentials_json)?;
        let http = reqwest::Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .map_err(SyncError::Http)?;
        let token = auth::fetch_token(&http, &key).await?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
            spreadsheet_id: config.spreadsheet_id.clone(),
        })
    }

    fn url(&self, suffix: &str) -> String {
        format!(
            "{}/v4/spreadsheets/{}{}",
            self.base_url, self.spreadsheet_id, suffix
        )
    }

    /// Numeric sheetId of the worksheet named `title`, if it exists.
    pub async fn worksheet_id(&self, title: &str) -> SyncResult<Option<i64>> {
        let metadata: Value = self
            .http
            .get(self.url("?fields=sheets.properties"))
            .bearer_auth(&self.token)
            .send()
            .await?
            .error_for_status()
            .map_err(|e| SyncError::Publish(format!("spreadsheet metadata: {e}")))?
            .json()
            .await?;

        let id = metadata["sheets"]
            .as_array()
            .into_iter()
            .flatten()
            .filter_map(|sheet| sheet.get("properties"))
            .find(|props| props["title"].as_str() == Some(title))
            .and_then(|props| props["sheetId"].as_i64());
        Ok(id)
    }

    /// Clear all existing content in the worksheet.
    pub async fn clear(&self, title: &str) -> SyncResult<()> {
        self.http
            .post(self.url(&format!("/values/{title}:clear")))
            .bearer_auth(&self.token)
            .json(&json!({}))
            .send()
            .await?
            .error_for_status()
            .map_err(|e| SyncError::Publish(format!("worksheet clear: {e}")))?;
        Ok(())
    }

    /// Write the rows starting at the worksheet's top-left cell.
    pub async fn update(&self, title: &str, values: &[Vec<String>]) -> SyncResult<()> {
        self.http
            .put(self.url(&format!("/values/{title}!A1")))
            .query(&[("valueInputOption", "RAW")])
            .bearer_auth(&self.token)
            .json(&json!({
                "range": format!("{title}!A1"),
                "majorDimension": "ROWS",
                "values": values,
            }))
            .send()
            .await?
            .error_for_status()
            .map_err(|e| SyncError::Publish(format!("worksheet update: {e}")))?;
        Ok(())
    }

    /// Bold/center the header row and auto-resize the written columns.
    pub async fn format_header(&self, sheet_id: i64, num_columns: usize) -> SyncResult<()> {
        self.http
            .post(self.url(":batchUpdate"))
            .bearer_auth(&self.token)
            .json(&format_requests(sheet_id, num_columns))
            .send()
            .await?
            .error_for_status()
            .map_err(|e| SyncError::Format(format!("batch formatting: {e}")))?;
        Ok(())
    }
}

/// Batch formatting body: header bold/center plus column auto-resize.
pub fn format_requests(sheet_id: i64, num_columns: usize) -> Value {
    json!({
        "requests": [
            {
                "repeatCell": {
                    "range": {
                        "sheetId": sheet_id,
                        "startRowIndex": 0,
                        "endRowIndex": 1,
                    },
                    "cell": {
                        "userEnteredFormat": {
                            "horizontalAlignment": "CENTER",
                            "textFormat": { "bold": true },
                        }
                    },
                    "fields": "userEnteredFormat(textFormat,horizontalAlignment)",
                }
            },
            {
                "autoResizeDimensions": {
                    "dimensions": {
                        "sheetId": sheet_id,
                        "dimension": "COLUMNS",
                        "startIndex": 0,
                        "endIndex": num_columns,
                    }
                }
            }
        ]
    })
}
