//! Portal adapter: capability methods over the brittle selector layer.

pub mod actions;
pub mod selectors;

use std::time::{Duration, Instant};

use async_trait::async_trait;
use chromiumoxide::page::Page;
use ponto_report::ReportPeriod;

use self::actions::{Locator, POLL_INTERVAL, STEP_TIMEOUT};
use crate::{SyncError, SyncResult};

/// Stable contract for driving the HR portal.
///
/// Orchestration code only sees these capabilities; the selector strings and
/// settle pauses live behind them and are replaceable without touching the
/// pipeline.
#[async_trait]
pub trait Portal {
    /// Navigate to the login page and authenticate.
    async fn login(&self, username: &str, password: &str) -> SyncResult<()>;
    /// Open the reports section and select the audit report type.
    async fn open_audit_report(&self) -> SyncResult<()>;
    /// Include the optional report columns.
    async fn include_all_columns(&self) -> SyncResult<()>;
    /// Enter the date range into the report filter.
    async fn set_period(&self, period: &ReportPeriod) -> SyncResult<()>;
    /// Apply the configured filter.
    async fn apply_filter(&self) -> SyncResult<()>;
    /// Trigger the spreadsheet export.
    async fn trigger_export(&self) -> SyncResult<()>;
}

// Settle pauses observed against the live portal. The app re-renders after
// these actions without anything reliable to wait on.
const DASHBOARD_SETTLE: Duration = Duration::from_secs(5);
const DROPDOWN_SETTLE: Duration = Duration::from_secs(1);
const MODAL_SETTLE: Duration = Duration::from_secs(2);

/// The Pontomais web UI, driven over CDP.
pub struct PontoPortal<'a> {
    page: &'a Page,
}

impl<'a> PontoPortal<'a> {
    pub fn new(page: &'a Page) -> Self {
        Self { page }
    }

    async fn wait_for_document_ready(&self) -> SyncResult<()> {
        let deadline = Instant::now() + STEP_TIMEOUT;
        loop {
            let ready = self
                .page
                .evaluate("document.readyState === 'complete'")
                .await
                .ok()
                .and_then(|v| v.into_value::<bool>().ok())
                .unwrap_or(false);
            if ready {
                return Ok(());
            }
            if Instant::now() >= deadline {
                return Err(SyncError::UiTimeout(
                    "document.readyState".into(),
                    STEP_TIMEOUT,
                ));
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }
}

#[async_trait]
impl Portal for PontoPortal<'_> {
    async fn login(&self, username: &str, password: &str) -> SyncResult<()> {
        tracing::info!("accessing login page");
        self.page
            .goto(selectors::LOGIN_URL)
            .await
            .map_err(|e| SyncError::Automation(format!("navigation failed: {e}")))?;
        self.wait_for_document_ready().await?;

        tracing::info!("filling login credentials");
        actions::type_into(self.page, Locator::Css(selectors::USERNAME_INPUT), username).await?;
        actions::type_into(self.page, Locator::Css(selectors::PASSWORD_INPUT), password).await?;
        actions::click(self.page, Locator::Css(selectors::LOGIN_SUBMIT)).await?;

        tracing::info!("waiting for dashboard");
        tokio::time::sleep(DASHBOARD_SETTLE).await;
        Ok(())
    }

    async fn open_audit_report(&self) -> SyncResult<()> {
        tracing::info!("navigating to reports");
        actions::click(self.page, Locator::Css(selectors::REPORTS_MENU)).await?;

        tracing::info!("selecting report type {:?}", selectors::AUDIT_REPORT_NAME);
        actions::click(self.page, Locator::XPath(selectors::REPORT_TYPE_DROPDOWN)).await?;
        actions::type_into(
            self.page,
            Locator::XPath(selectors::REPORT_TYPE_SEARCH),
            selectors::AUDIT_REPORT_NAME,
        )
        .await?;
        tokio::time::sleep(DROPDOWN_SETTLE).await;
        actions::retry_click(self.page, Locator::XPath(selectors::REPORT_TYPE_OPTION)).await
    }

    async fn include_all_columns(&self) -> SyncResult<()> {
        tracing::info!("selecting report columns");
        actions::click(self.page, Locator::XPath(selectors::COLUMNS_BUTTON)).await?;
        actions::wait_for(
            self.page,
            Locator::XPath(selectors::COLUMNS_SELECT_ALL),
            STEP_TIMEOUT,
        )
        .await?;
        actions::click(self.page, Locator::XPath(selectors::COLUMNS_SELECT_ALL)).await?;
        actions::click(self.page, Locator::XPath(selectors::COLUMNS_CONFIRM)).await?;
        tokio::time::sleep(MODAL_SETTLE).await;
        Ok(())
    }

    async fn set_period(&self, period: &ReportPeriod) -> SyncResult<()> {
        tracing::info!("setting date range {period}");
        actions::fill(
            self.page,
            Locator::Css(selectors::DATE_RANGE_INPUT),
            &period.to_range_string(),
        )
        .await
    }

    async fn apply_filter(&self) -> SyncResult<()> {
        tracing::info!("applying filter");
        actions::click(self.page, Locator::Css(selectors::APPLY_FILTER)).await
    }

    async fn trigger_export(&self) -> SyncResult<()> {
        tracing::info!("triggering export");
        actions::retry_click(self.page, Locator::Css(selectors::EXPORT_BUTTON)).await
    }
}
