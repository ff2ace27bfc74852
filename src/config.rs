use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use std::time::Duration;

/// Configuration for the drifter agent
///
/// Selectors, URL markers and timeouts drifted between iterations of the
/// original automation, so every one of them is a config field rather than a
/// constant baked into a routine.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentConfig {
    /// URL for the WebDriver instance
    #[serde(default = "default_webdriver_url")]
    pub webdriver_url: String,

    /// Path segment identifying a bookmark collection page
    #[serde(default = "default_collection_segment")]
    pub collection_segment: String,

    /// Path prefix of an artwork detail page
    #[serde(default = "default_artwork_prefix")]
    pub artwork_prefix: String,

    /// Query parameter carrying the page index on paginated collections
    #[serde(default = "default_page_param")]
    pub page_param: String,

    /// Query parameter marking a viewer (intermediate) page
    #[serde(default = "default_viewer_param")]
    pub viewer_param: String,

    /// CSS selector for the pagination container
    #[serde(default = "default_pagination_selector")]
    pub pagination_selector: String,

    /// CSS selector for artwork links on a collection page
    #[serde(default = "default_artwork_link_selector")]
    pub artwork_link_selector: String,

    /// CSS selector for the link to the original/full-resolution image
    #[serde(default = "default_original_link_selector")]
    pub original_link_selector: String,

    /// Tag name marking a decorative (arrow/icon) pagination control
    #[serde(default = "default_icon_marker")]
    pub icon_marker: String,

    /// File extensions accepted as raster images (lowercase, no dot)
    #[serde(default = "default_image_extensions")]
    pub image_extensions: Vec<String>,

    /// Total time to wait for a selector before giving up, in milliseconds
    #[serde(default = "default_wait_timeout_ms")]
    pub wait_timeout_ms: u64,

    /// Delay between document re-queries while waiting, in milliseconds
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Maximum number of navigations one run may perform
    #[serde(default = "default_max_hops")]
    pub max_hops: usize,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            webdriver_url: default_webdriver_url(),
            collection_segment: default_collection_segment(),
            artwork_prefix: default_artwork_prefix(),
            page_param: default_page_param(),
            viewer_param: default_viewer_param(),
            pagination_selector: default_pagination_selector(),
            artwork_link_selector: default_artwork_link_selector(),
            original_link_selector: default_original_link_selector(),
            icon_marker: default_icon_marker(),
            image_extensions: default_image_extensions(),
            wait_timeout_ms: default_wait_timeout_ms(),
            poll_interval_ms: default_poll_interval_ms(),
            max_hops: default_max_hops(),
        }
    }
}

impl AgentConfig {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn Error>> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        let config: Self = serde_json::from_str(&contents)?;
        Ok(config)
    }

    /// Total wait budget for one selector
    pub fn wait_timeout(&self) -> Duration {
        Duration::from_millis(self.wait_timeout_ms)
    }

    /// Pause between document re-queries
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

/// Default value for webdriver_url
fn default_webdriver_url() -> String {
    "http://localhost:4444".to_string()
}

/// Default path segment for bookmark collections
fn default_collection_segment() -> String {
    "/bookmarks".to_string()
}

/// Default path prefix for artwork detail pages
fn default_artwork_prefix() -> String {
    "/artworks/".to_string()
}

/// Default page-index query parameter
fn default_page_param() -> String {
    "p".to_string()
}

/// Default viewer marker query parameter
fn default_viewer_param() -> String {
    "intermediate".to_string()
}

/// Default pagination container selector
fn default_pagination_selector() -> String {
    "nav".to_string()
}

/// Default artwork link selector
fn default_artwork_link_selector() -> String {
    r#"a[href^="/artworks/"]"#.to_string()
}

/// Default original-image link selector
fn default_original_link_selector() -> String {
    r#"a[href*="img-original"]"#.to_string()
}

/// Default decorative icon marker
fn default_icon_marker() -> String {
    "svg".to_string()
}

/// Default raster-image extensions
fn default_image_extensions() -> Vec<String> {
    ["jpg", "jpeg", "png", "gif", "webp"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

/// Default value for wait_timeout_ms
fn default_wait_timeout_ms() -> u64 {
    10_000
}

/// Default value for poll_interval_ms
fn default_poll_interval_ms() -> u64 {
    250
}

/// Default value for max_hops
fn default_max_hops() -> usize {
    8
}
