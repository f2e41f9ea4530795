//! Wait-then-act helpers over a CDP page.
//!
//! Every portal interaction is "wait for the element, then act": poll for
//! the node up to a bound, then click or type. The only retried failure is
//! an obstructed click, and only through [`retry_on_obstruction`].

use std::fmt;
use std::future::Future;
use std::time::{Duration, Instant};

use chromiumoxide::element::Element;
use chromiumoxide::page::Page;

use crate::{SyncError, SyncResult};

/// Per-step bound for an element to become ready.
pub const STEP_TIMEOUT: Duration = Duration::from_secs(10);
/// Poll interval while waiting for an element.
pub const POLL_INTERVAL: Duration = Duration::from_millis(250);
/// Attempts for the obstructed-click retry.
pub const CLICK_RETRIES: u32 = 3;
/// Delay between obstructed-click attempts.
pub const CLICK_RETRY_DELAY: Duration = Duration::from_secs(1);

/// How an element is addressed.
#[derive(Debug, Clone, Copy)]
pub enum Locator {
    Css(&'static str),
    XPath(&'static str),
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locator::Css(sel) => write!(f, "css {sel}"),
            Locator::XPath(sel) => write!(f, "xpath {sel}"),
        }
    }
}

/// Wait until `locator` resolves to an element, bounded by `timeout`.
pub async fn wait_for(page: &Page, locator: Locator, timeout: Duration) -> SyncResult<Element> {
    let deadline = Instant::now() + timeout;
    loop {
        let found = match locator {
            Locator::Css(sel) => page.find_element(sel).await,
            Locator::XPath(sel) => page.find_xpath(sel).await,
        };
        if let Ok(element) = found {
            return Ok(element);
        }
        if Instant::now() >= deadline {
            return Err(SyncError::UiTimeout(locator.to_string(), timeout));
        }
        tokio::time::sleep(POLL_INTERVAL).await;
    }
}

/// Wait for `locator`, then click it once.
pub async fn click(page: &Page, locator: Locator) -> SyncResult<()> {
    let element = wait_for(page, locator, STEP_TIMEOUT).await?;
    element
        .click()
        .await
        .map_err(|e| SyncError::from_click_failure(&locator.to_string(), e))?;
    Ok(())
}

/// Wait for `locator`, focus it, and type `text`.
pub async fn type_into(page: &Page, locator: Locator, text: &str) -> SyncResult<()> {
    let element = wait_for(page, locator, STEP_TIMEOUT).await?;
    element
        .click()
        .await
        .map_err(|e| SyncError::from_click_failure(&locator.to_string(), e))?;
    element
        .type_str(text)
        .await
        .map_err(|e| SyncError::Automation(format!("typing into {locator}: {e}")))?;
    Ok(())
}

/// Like [`type_into`], but clears any existing value first.
pub async fn fill(page: &Page, locator: Locator, text: &str) -> SyncResult<()> {
    let element = wait_for(page, locator, STEP_TIMEOUT).await?;
    element
        .call_js_fn("function() { this.value = ''; }", false)
        .await
        .map_err(|e| SyncError::Automation(format!("clearing {locator}: {e}")))?;
    element
        .click()
        .await
        .map_err(|e| SyncError::from_click_failure(&locator.to_string(), e))?;
    element
        .type_str(text)
        .await
        .map_err(|e| SyncError::Automation(format!("typing into {locator}: {e}")))?;
    Ok(())
}

/// Click `locator` with the bounded obstruction retry.
pub async fn retry_click(page: &Page, locator: Locator) -> SyncResult<()> {
    retry_on_obstruction(&locator.to_string(), CLICK_RETRIES, CLICK_RETRY_DELAY, || {
        click(page, locator)
    })
    .await
}

/// Bounded retry for the obstructed-click failure mode only.
///
/// Any other error propagates from the attempt it occurred on. Exhausting
/// the budget promotes the condition to a terminal [`SyncError::UiTimeout`].
pub async fn retry_on_obstruction<T, F, Fut>(
    target: &str,
    retries: u32,
    delay: Duration,
    mut op: F,
) -> SyncResult<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = SyncResult<T>>,
{
    for attempt in 1..=retries {
        match op().await {
            Ok(value) => return Ok(value),
            Err(e) if e.is_click_obstructed() => {
                tracing::debug!("click on {target} obstructed (attempt {attempt}/{retries})");
                if attempt < retries {
                    tokio::time::sleep(delay).await;
                }
            }
            Err(e) => return Err(e),
        }
    }
    // Only the attempts before the last one sleep.
    Err(SyncError::UiTimeout(
        format!("{target} after {retries} click attempts"),
        delay * retries.saturating_sub(1),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[tokio::test]
    async fn retry_attempts_exactly_the_budget() {
        let attempts = Cell::new(0u32);
        let result: SyncResult<()> =
            retry_on_obstruction("export", 3, Duration::ZERO, || {
                attempts.set(attempts.get() + 1);
                async { Err(SyncError::ClickObstructed("export".into())) }
            })
            .await;

        assert_eq!(attempts.get(), 3);
        assert!(matches!(result, Err(SyncError::UiTimeout(_, _))));
    }

    #[tokio::test]
    async fn exhaustion_reports_the_slept_duration() {
        let result: SyncResult<()> =
            retry_on_obstruction("export", 3, Duration::from_millis(5), || async {
                Err(SyncError::ClickObstructed("export".into()))
            })
            .await;

        // Three attempts sleep twice between them.
        match result {
            Err(SyncError::UiTimeout(_, waited)) => {
                assert_eq!(waited, Duration::from_millis(10));
            }
            other => panic!("expected UiTimeout, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn other_errors_are_not_retried() {
        let attempts = Cell::new(0u32);
        let result: SyncResult<()> =
            retry_on_obstruction("export", 3, Duration::ZERO, || {
                attempts.set(attempts.get() + 1);
                async { Err(SyncError::Automation("session gone".into())) }
            })
            .await;

        assert_eq!(attempts.get(), 1);
        assert!(matches!(result, Err(SyncError::Automation(_))));
    }

    #[tokio::test]
    async fn success_after_obstruction_stops_retrying() {
        let attempts = Cell::new(0u32);
        let result = retry_on_obstruction("export", 3, Duration::ZERO, || {
            attempts.set(attempts.get() + 1);
            let n = attempts.get();
            async move {
                if n < 2 {
                    Err(SyncError::ClickObstructed("export".into()))
                } else {
                    Ok(n)
                }
            }
        })
        .await;

        assert_eq!(result.unwrap(), 2);
        assert_eq!(attempts.get(), 2);
    }
}
