use crate::drivers::{Driver, DriverError};
use std::collections::HashMap;
use url::Url;

/// In-memory [`Driver`] for routine tests
///
/// Serves canned document snapshots per URL, records navigations and body
/// rewrites, and answers image fetches from a byte map (anything not in the
/// map fails to load).
pub struct FakeDriver {
    url: Url,
    pages: HashMap<String, String>,
    images: HashMap<String, Vec<u8>>,
    pub navigations: Vec<Url>,
    pub body: Option<(String, String)>,
}

impl FakeDriver {
    pub fn new(url: &str) -> Self {
        Self {
            url: Url::parse(url).expect("test URL must parse"),
            pages: HashMap::new(),
            images: HashMap::new(),
            navigations: Vec::new(),
            body: None,
        }
    }

    pub fn with_page(mut self, url: &str, html: &str) -> Self {
        self.pages.insert(url.to_string(), html.to_string());
        self
    }

    pub fn with_image(mut self, url: &str, bytes: Vec<u8>) -> Self {
        self.images.insert(url.to_string(), bytes);
        self
    }
}

impl Driver for FakeDriver {
    async fn current_url(&self) -> Result<Url, DriverError> {
        Ok(self.url.clone())
    }

    async fn source(&self) -> Result<String, DriverError> {
        Ok(self
            .pages
            .get(self.url.as_str())
            .cloned()
            .unwrap_or_else(|| "<html><body></body></html>".to_string()))
    }

    async fn navigate(&mut self, url: &Url) -> Result<(), DriverError> {
        self.navigations.push(url.clone());
        self.url = url.clone();
        Ok(())
    }

    async fn fetch_image(&self, url: &Url) -> Result<Vec<u8>, DriverError> {
        self.images
            .get(url.as_str())
            .cloned()
            .ok_or_else(|| DriverError::ImageFetch {
                url: url.clone(),
                reason: "no such image".to_string(),
            })
    }

    async fn replace_body(&mut self, html: &str, background: &str) -> Result<(), DriverError> {
        self.body = Some((html.to_string(), background.to_string()));
        Ok(())
    }
}
