use crate::drivers::{Driver, DriverError};
use crate::extract;
use std::time::Duration;
use thiserror::Error;

/// Why a bounded wait did not produce a matching document
#[derive(Debug, Error)]
pub enum WaitError {
    /// The selector never matched within the time budget
    ///
    /// A distinct variant so callers can branch to their fallback path
    /// instead of treating this like a driver failure.
    #[error("no element matched {selector:?} within {waited:?}")]
    Timeout { selector: String, waited: Duration },

    /// The configured selector is not valid CSS
    #[error("invalid selector {selector:?}: {reason}")]
    InvalidSelector { selector: String, reason: String },

    /// The driver failed while querying the document
    #[error(transparent)]
    Driver(#[from] DriverError),
}

/// Waits until a selector matches in the document, with a bounded timeout
///
/// The first query happens before any sleep, so an already-present element
/// resolves without a delay slice. On success the resolving document snapshot
/// is returned; callers extract their candidates from that snapshot rather
/// than re-querying a document that may have changed since.
///
/// The poll loop is a plain future raced against `tokio::time::timeout`, so
/// it resolves or times out exactly once and is dropped on both paths.
pub async fn wait_for_selector<D: Driver>(
    driver: &D,
    selector: &str,
    timeout: Duration,
    poll_interval: Duration,
) -> Result<String, WaitError> {
    let polling = async {
        loop {
            let source = driver.source().await?;
            match extract::selector_matches(&source, selector) {
                Ok(true) => return Ok(source),
                Ok(false) => {}
                Err(reason) => {
                    return Err(WaitError::InvalidSelector {
                        selector: selector.to_string(),
                        reason,
                    });
                }
            }
            tokio::time::sleep(poll_interval).await;
        }
    };

    match tokio::time::timeout(timeout, polling).await {
        Ok(result) => result,
        Err(_) => {
            ::log::warn!("Timed out after {:?} waiting for {:?}", timeout, selector);
            Err(WaitError::Timeout {
                selector: selector.to_string(),
                waited: timeout,
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use url::Url;

    /// Document-only driver: serves a fixed snapshot and counts queries
    struct SnapshotDriver {
        html: String,
        queries: Cell<usize>,
    }

    impl SnapshotDriver {
        fn new(html: &str) -> Self {
            Self {
                html: html.to_string(),
                queries: Cell::new(0),
            }
        }
    }

    impl Driver for SnapshotDriver {
        async fn current_url(&self) -> Result<Url, DriverError> {
            unreachable!("waiter never asks for the URL")
        }

        async fn source(&self) -> Result<String, DriverError> {
            self.queries.set(self.queries.get() + 1);
            Ok(self.html.clone())
        }

        async fn navigate(&mut self, _url: &Url) -> Result<(), DriverError> {
            unreachable!("waiter never navigates")
        }

        async fn fetch_image(&self, _url: &Url) -> Result<Vec<u8>, DriverError> {
            unreachable!("waiter never fetches images")
        }

        async fn replace_body(&mut self, _html: &str, _bg: &str) -> Result<(), DriverError> {
            unreachable!("waiter never rewrites the page")
        }
    }

    #[tokio::test]
    async fn test_present_element_resolves_on_first_query() {
        let driver = SnapshotDriver::new("<html><body><nav>1</nav></body></html>");
        let source = wait_for_selector(
            &driver,
            "nav",
            Duration::from_secs(5),
            Duration::from_millis(50),
        )
        .await
        .unwrap();
        assert!(source.contains("<nav>"));
        assert_eq!(driver.queries.get(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_absent_element_times_out() {
        let driver = SnapshotDriver::new("<html><body></body></html>");
        let result = wait_for_selector(
            &driver,
            "nav",
            Duration::from_millis(500),
            Duration::from_millis(100),
        )
        .await;
        match result {
            Err(WaitError::Timeout { selector, .. }) => assert_eq!(selector, "nav"),
            other => panic!("expected timeout, got {:?}", other.map(|_| "source")),
        }
        // The poll loop ran repeatedly before the deadline tore it down
        assert!(driver.queries.get() > 1);
    }

    #[tokio::test]
    async fn test_invalid_selector_fails_fast() {
        let driver = SnapshotDriver::new("<html><body></body></html>");
        let result = wait_for_selector(
            &driver,
            "a[[",
            Duration::from_secs(5),
            Duration::from_millis(50),
        )
        .await;
        assert!(matches!(result, Err(WaitError::InvalidSelector { .. })));
        assert_eq!(driver.queries.get(), 1);
    }
}
