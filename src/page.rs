//! The rendered-page interface consumed by the extraction pipeline.
//!
//! The pipeline never talks to a browser directly; it only sees this trait.
//! The production implementation lives in [`crate::browser`], and tests
//! drive the pipeline through scripted in-process implementations.

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Errors surfaced by a page implementation.
#[derive(Debug, Error)]
pub enum PageError {
    /// A bounded wait expired. Fatal for the page visit when raised from a
    /// page-global wait.
    #[error("timed out after {timeout:?} waiting for {what}")]
    Timeout { what: String, timeout: Duration },

    /// A selector matched nothing at interaction time.
    #[error("element not found: {0}")]
    ElementNotFound(String),

    /// Anything the underlying browser transport reports.
    #[error("browser protocol error: {0}")]
    Protocol(String),
}

/// One rendered product page.
///
/// All methods operate on the same single page resource; callers sequence
/// them (selection must precede the reads that depend on it).
#[async_trait]
pub trait ProductPage: Send + Sync {
    /// Navigates to the given URL and waits for the load to finish.
    async fn goto(&self, url: &str) -> Result<(), PageError>;

    /// Blocks until the named `window` global is defined, then returns its
    /// JSON value. Expiry of `timeout` yields [`PageError::Timeout`].
    async fn wait_for_global(
        &self,
        name: &str,
        timeout: Duration,
    ) -> Result<serde_json::Value, PageError>;

    /// Returns a snapshot of the current rendered DOM as HTML.
    async fn content(&self) -> Result<String, PageError>;

    /// Waits until the selector matches an element.
    async fn wait_for_selector(&self, selector: &str, timeout: Duration)
        -> Result<(), PageError>;

    /// Selects an option by value on a `<select>` control, firing the
    /// page's change handlers.
    async fn select_option(&self, selector: &str, value: &str) -> Result<(), PageError>;

    /// Fixed-delay wait for the page to settle after a mutation.
    async fn settle(&self, delay: Duration) {
        tokio::time::sleep(delay).await;
    }

    /// Captures a full-page screenshot as PNG bytes.
    async fn screenshot(&self) -> Result<Vec<u8>, PageError>;
}
