//! Acquisition pipeline: drive the portal and wait for the export on disk.

use std::path::PathBuf;
use std::time::Duration;

use ponto_report::{discover, ReportPeriod};

use crate::browser::BrowserSession;
use crate::config::PortalConfig;
use crate::portal::{PontoPortal, Portal};
use crate::{SyncError, SyncResult};

/// Fixed pause between triggering the export and scanning for the file.
const DOWNLOAD_SETTLE: Duration = Duration::from_secs(30);

/// Run the acquisition stage; returns the downloaded file on success.
///
/// The browser session and its profile directory are torn down on every
/// path before the pipeline outcome propagates.
pub async fn run(config: &PortalConfig) -> SyncResult<PathBuf> {
    let download_dir = std::env::current_dir()?;
    let period = ReportPeriod::current();
    tracing::info!("report period: {period}");

    let session = BrowserSession::launch(&download_dir).await?;
    let outcome = export_report(&PontoPortal::new(session.page()), config, &period).await;
    if outcome.is_ok() {
        // The browser owns the in-flight download; keep it alive while the
        // file materializes.
        tracing::info!("waiting {DOWNLOAD_SETTLE:?} for the download to settle");
        tokio::time::sleep(DOWNLOAD_SETTLE).await;
    }
    session.close().await;
    outcome?;

    match discover::latest_report(&download_dir, discover::REPORT_EXTENSIONS)? {
        Some(path) => {
            let size = std::fs::metadata(&path)?.len();
            tracing::info!("download complete: {} ({size} bytes)", path.display());
            Ok(path)
        }
        None => Err(SyncError::Automation(
            "no downloaded report found after export".into(),
        )),
    }
}

/// The ordered portal interaction sequence.
///
/// Generic over the portal so tests can record the call order without a
/// browser.
pub async fn export_report<P: Portal + ?Sized>(
    portal: &P,
    config: &PortalConfig,
    period: &ReportPeriod,
) -> SyncResult<()> {
    portal.login(&config.username, &config.password).await?;
    portal.open_audit_report().await?;
    portal.include_all_columns().await?;
    portal.set_period(period).await?;
    portal.apply_filter().await?;
    portal.trigger_export().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::Mutex;

    #[derive(Default)]
    struct MockPortal {
        calls: Mutex<Vec<&'static str>>,
        fail_on: Option<&'static str>,
    }

    impl MockPortal {
        fn record(&self, step: &'static str) -> SyncResult<()> {
            self.calls.lock().unwrap().push(step);
            if self.fail_on == Some(step) {
                return Err(SyncError::UiTimeout(step.into(), Duration::from_secs(10)));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl Portal for MockPortal {
        async fn login(&self, _: &str, _: &str) -> SyncResult<()> {
            self.record("login")
        }
        async fn open_audit_report(&self) -> SyncResult<()> {
            self.record("open_audit_report")
        }
        async fn include_all_columns(&self) -> SyncResult<()> {
            self.record("include_all_columns")
        }
        async fn set_period(&self, _: &ReportPeriod) -> SyncResult<()> {
            self.record("set_period")
        }
        async fn apply_filter(&self) -> SyncResult<()> {
            self.record("apply_filter")
        }
        async fn trigger_export(&self) -> SyncResult<()> {
            self.record("trigger_export")
        }
    }

    fn config() -> PortalConfig {
        PortalConfig {
            username: "alice".into(),
            password: "s3cret".into(),
        }
    }

    fn period() -> ReportPeriod {
        ReportPeriod::for_today(chrono_date(2024, 6, 12))
    }

    fn chrono_date(y: i32, m: u32, d: u32) -> chrono::NaiveDate {
        chrono::NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[tokio::test]
    async fn steps_run_in_order_exactly_once() {
        let portal = MockPortal::default();
        export_report(&portal, &config(), &period()).await.unwrap();

        assert_eq!(
            *portal.calls.lock().unwrap(),
            vec![
                "login",
                "open_audit_report",
                "include_all_columns",
                "set_period",
                "apply_filter",
                "trigger_export",
            ]
        );
    }

    #[tokio::test]
    async fn failing_step_aborts_the_sequence() {
        let portal = MockPortal {
            fail_on: Some("open_audit_report"),
            ..Default::default()
        };
        let err = export_report(&portal, &config(), &period())
            .await
            .unwrap_err();

        assert!(matches!(err, SyncError::UiTimeout(_, _)));
        assert_eq!(
            *portal.calls.lock().unwrap(),
            vec!["login", "open_audit_report"]
        );
    }
}
