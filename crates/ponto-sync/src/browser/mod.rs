//! Headless Chromium session with an ephemeral profile.

use std::path::{Path, PathBuf};

use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::browser::{
    SetDownloadBehaviorBehavior, SetDownloadBehaviorParams,
};
use chromiumoxide::page::Page;
use futures::StreamExt;
use tempfile::TempDir;
use tokio::task::JoinHandle;

use crate::{SyncError, SyncResult};

/// Find the Chromium binary.
pub fn find_chromium() -> Option<PathBuf> {
    // 1. Explicit override
    if let Ok(p) = std::env::var("PONTO_CHROMIUM_PATH") {
        let path = PathBuf::from(&p);
        if path.exists() {
            return Some(path);
        }
    }

    // 2. System PATH
    for name in ["google-chrome", "chromium", "chromium-browser"] {
        if let Ok(path) = which::which(name) {
            return Some(path);
        }
    }

    None
}

/// A launched browser together with its ephemeral profile directory.
///
/// The profile lives in a [`TempDir`], so it is removed on every exit path
/// including panic unwind. [`BrowserSession::close`] tears the browser down
/// first so the profile is no longer in use when the directory goes away.
pub struct BrowserSession {
    browser: Browser,
    handler_task: JoinHandle<()>,
    profile_dir: TempDir,
    page: Page,
}

impl BrowserSession {
    /// Launch headless Chromium with downloads directed at `download_dir`.
    pub async fn launch(download_dir: &Path) -> SyncResult<Self> {
        let chrome = find_chromium().ok_or_else(|| {
            SyncError::Config(
                "Chromium not found. Install google-chrome or set PONTO_CHROMIUM_PATH".into(),
            )
        })?;

        let profile_dir = tempfile::Builder::new()
            .prefix("chrome-profile-")
            .tempdir()?;
        tracing::debug!("ephemeral profile at {}", profile_dir.path().display());

        let config = BrowserConfig::builder()
            .chrome_executable(chrome)
            .user_data_dir(profile_dir.path())
            .arg("--headless=new")
            .arg("--no-sandbox")
            .arg("--disable-dev-shm-usage")
            .arg("--disable-blink-features=AutomationControlled")
            .window_size(1920, 1080)
            .build()
            .map_err(|e| SyncError::Automation(format!("browser config: {e}")))?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| SyncError::Automation(format!("failed to launch Chromium: {e}")))?;

        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                let _ = event;
            }
        });

        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| SyncError::Automation(format!("failed to open page: {e}")))?;

        // Route downloads into the working directory instead of the profile.
        let behavior = SetDownloadBehaviorParams::builder()
            .behavior(SetDownloadBehaviorBehavior::Allow)
            .download_path(download_dir.display().to_string())
            .build()
            .map_err(|e| SyncError::Automation(format!("download behavior: {e}")))?;
        page.execute(behavior)
            .await
            .map_err(|e| SyncError::Automation(format!("failed to set download dir: {e}")))?;

        Ok(Self {
            browser,
            handler_task,
            profile_dir,
            page,
        })
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    /// Tear the browser down and remove the profile directory.
    ///
    /// Runs on success and failure alike; teardown problems are logged, not
    /// raised, so they never mask the pipeline outcome.
    pub async fn close(mut self) {
        if let Err(e) = self.browser.close().await {
            tracing::warn!("browser close failed: {e}");
        }
        if let Err(e) = self.browser.wait().await {
            tracing::warn!("browser did not exit cleanly: {e}");
        }
        self.handler_task.abort();
        if let Err(e) = self.profile_dir.close() {
            tracing::warn!("failed to remove profile directory: {e}");
        }
    }
}
