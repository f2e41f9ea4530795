//! Publication pipeline: newest export, cleaned, into the destination
//! worksheet.
//!
//! State machine: Discover -> (none: stop) -> Parse -> (error: stop) ->
//! Clean -> Publish -> (failure: stop) -> Format -> done. Every early stop
//! is a logged return, not a crash; only missing configuration propagates.

use ponto_report::{discover, xlsx, ReportTable};

use crate::config::SheetsConfig;
use crate::sheets::{SheetsClient, SHEETS_API_BASE};
use crate::{SyncError, SyncResult};

/// Destination worksheet name.
pub const WORKSHEET: &str = "dados";

/// The export the publication stage looks for.
const PUBLISH_EXTENSIONS: &[&str] = &["xlsx"];

/// Run the publication stage against the live API.
pub async fn run(config: &SheetsConfig) -> SyncResult<()> {
    run_against(config, SHEETS_API_BASE).await
}

/// Run the publication stage; `base_url` is injectable so integration tests
/// can point at a mock server.
pub async fn run_against(config: &SheetsConfig, base_url: &str) -> SyncResult<()> {
    let path = match discover::latest_report(&config.report_dir, PUBLISH_EXTENSIONS) {
        Ok(Some(path)) => path,
        Ok(None) => {
            tracing::info!(
                "no report files in {}; nothing to publish",
                config.report_dir.display()
            );
            return Ok(());
        }
        Err(e) => {
            tracing::error!("report discovery failed: {e}");
            return Ok(());
        }
    };

    tracing::info!("processing file: {}", path.display());
    let table = match xlsx::load_report(&path) {
        Ok(table) => table.clean(),
        Err(e) => {
            tracing::error!("failed to load report file: {e}");
            return Ok(());
        }
    };

    let client = match SheetsClient::connect_with_base_url(config, base_url).await {
        Ok(client) => client,
        // Malformed credentials are a configuration problem, not a stage-local one.
        Err(e @ SyncError::Config(_)) => return Err(e),
        Err(e) => {
            tracing::error!("failed to authenticate to Google Sheets: {e}");
            return Ok(());
        }
    };

    let sheet_id = match publish_table(&client, &table).await {
        Ok(id) => id,
        Err(e) => {
            tracing::error!("failed to update Google Sheets: {e}");
            return Ok(());
        }
    };

    match sheet_id {
        Some(id) => {
            if let Err(e) = client.format_header(id, table.width()).await {
                tracing::warn!("failed to apply formatting: {e}");
            } else {
                tracing::info!("formatting applied");
            }
        }
        None => tracing::warn!("worksheet id could not be resolved; skipping formatting"),
    }

    Ok(())
}

/// Clear the worksheet and rewrite it from the cleaned table.
///
/// Returns the numeric sheet id so formatting can follow. No rollback: a
/// failure mid-way leaves the worksheet in whatever state the failed call
/// left it.
pub async fn publish_table(
    client: &SheetsClient,
    table: &ReportTable,
) -> SyncResult<Option<i64>> {
    let sheet_id = client.worksheet_id(WORKSHEET).await?;
    if sheet_id.is_none() {
        return Err(SyncError::Publish(format!(
            "worksheet {WORKSHEET:?} not found"
        )));
    }

    client.clear(WORKSHEET).await?;
    client.update(WORKSHEET, &table.to_values()).await?;
    tracing::info!(
        "uploaded {} rows x {} columns to {WORKSHEET:?}",
        table.rows.len() + 1,
        table.width()
    );
    Ok(sheet_id)
}
