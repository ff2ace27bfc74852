use super::{Driver, DriverError};
use fantoccini::{Client, ClientBuilder};
use url::Url;

/// Script used to atomically rewrite the visible page in the viewer state
const REPLACE_BODY_SCRIPT: &str = "document.body.innerHTML = arguments[0]; \
     document.body.style.backgroundColor = arguments[1];";

/// Fallback WebDriver endpoints tried when the configured one is unreachable
const FALLBACK_WEBDRIVER_URLS: [&str; 3] = [
    "http://localhost:9515", // ChromeDriver default
    "http://localhost:4444", // Selenium / geckodriver default
    "http://127.0.0.1:4444", // Same, with IP instead of localhost
];

/// A live browser session driven over WebDriver
///
/// Document snapshots and navigation go through fantoccini; the raw image
/// fetch bypasses the browser and goes straight over HTTP, since WebDriver
/// has no way to hand back response bytes.
pub struct WebSession {
    client: Client,
    http: reqwest::Client,
}

impl WebSession {
    /// Connect to a WebDriver server, trying fallbacks if the configured
    /// URL is unreachable
    pub async fn connect(webdriver_url: &str) -> Result<Self, DriverError> {
        match ClientBuilder::native().connect(webdriver_url).await {
            Ok(client) => {
                ::log::debug!("Connected to WebDriver at {}", webdriver_url);
                return Ok(Self::with_client(client));
            }
            Err(e) => {
                ::log::error!("Failed to connect to WebDriver at {}: {}", webdriver_url, e);
            }
        }

        for fallback in FALLBACK_WEBDRIVER_URLS.iter() {
            if *fallback == webdriver_url {
                continue;
            }
            ::log::info!("Trying fallback WebDriver URL: {}", fallback);
            if let Ok(client) = ClientBuilder::native().connect(fallback).await {
                ::log::debug!("Connected to fallback WebDriver at {}", fallback);
                return Ok(Self::with_client(client));
            }
        }

        ::log::error!("Make sure a WebDriver server is running (e.g. chromedriver)");
        Err(DriverError::Connect(format!(
            "no WebDriver server reachable at {} or any fallback",
            webdriver_url
        )))
    }

    fn with_client(client: Client) -> Self {
        Self {
            client,
            http: reqwest::Client::new(),
        }
    }

    /// Close the underlying browser session
    pub async fn close(self) -> Result<(), DriverError> {
        self.client.close().await?;
        Ok(())
    }
}

impl Driver for WebSession {
    async fn current_url(&self) -> Result<Url, DriverError> {
        Ok(self.client.current_url().await?)
    }

    async fn source(&self) -> Result<String, DriverError> {
        Ok(self.client.source().await?)
    }

    async fn navigate(&mut self, url: &Url) -> Result<(), DriverError> {
        ::log::info!("Navigating to: {}", url);
        self.client.goto(url.as_str()).await?;
        Ok(())
    }

    async fn fetch_image(&self, url: &Url) -> Result<Vec<u8>, DriverError> {
        let response = self
            .http
            .get(url.clone())
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| DriverError::ImageFetch {
                url: url.clone(),
                reason: e.to_string(),
            })?;

        let bytes = response.bytes().await.map_err(|e| DriverError::ImageFetch {
            url: url.clone(),
            reason: e.to_string(),
        })?;
        ::log::debug!("Fetched {} image bytes from {}", bytes.len(), url);
        Ok(bytes.to_vec())
    }

    async fn replace_body(&mut self, html: &str, background: &str) -> Result<(), DriverError> {
        self.client
            .execute(
                REPLACE_BODY_SCRIPT,
                vec![html.into(), background.into()],
            )
            .await?;
        Ok(())
    }
}
