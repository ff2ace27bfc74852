pub mod web;

use thiserror::Error;
use url::Url;

/// Errors surfaced by a [`Driver`] backend
#[derive(Debug, Error)]
pub enum DriverError {
    /// Could not reach a WebDriver server
    #[error("failed to connect to a WebDriver server: {0}")]
    Connect(String),

    /// A WebDriver command failed
    #[error("webdriver command failed: {0}")]
    Command(#[from] fantoccini::error::CmdError),

    /// Fetching the raw image failed
    #[error("image fetch failed for {url}: {reason}")]
    ImageFetch { url: Url, reason: String },

    /// The browser reported a URL this crate cannot parse
    #[error("invalid current URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Capability contract between the routines and the host page
///
/// Bundles the three external collaborators (queryable document, navigation,
/// image loading) so the routines can run against a fake in tests.
#[allow(async_fn_in_trait)]
pub trait Driver {
    /// URL of the page the session is currently on
    async fn current_url(&self) -> Result<Url, DriverError>;

    /// Snapshot of the current document's markup
    async fn source(&self) -> Result<String, DriverError>;

    /// Navigate the session to a new URL, discarding the current document
    async fn navigate(&mut self, url: &Url) -> Result<(), DriverError>;

    /// Fetch the raw bytes of an image resource
    async fn fetch_image(&self, url: &Url) -> Result<Vec<u8>, DriverError>;

    /// Replace the document body with new markup and a background color
    async fn replace_body(&mut self, html: &str, background: &str) -> Result<(), DriverError>;
}
