pub mod classify;
pub mod color;
pub mod config;
pub mod drivers;
pub mod extract;
pub mod links;
pub mod routines;
pub mod waiter;

// Re-export commonly used types for convenience
pub use classify::PageState;
pub use color::SampledColor;
pub use config::AgentConfig;
pub use routines::Outcome;

use crate::drivers::web::WebSession;
use crate::drivers::{Driver, DriverError};
use crate::links::LinkRules;
use rand::Rng;
use thiserror::Error;
use url::Url;

/// Errors that end a run before a terminal outcome is reached
#[derive(Debug, Error)]
pub enum DriftError {
    /// The start URL did not parse
    #[error("invalid start URL: {0}")]
    StartUrl(#[from] url::ParseError),

    /// A configured pattern did not compile
    #[error("invalid link pattern in configuration: {0}")]
    Rules(#[from] regex::Error),

    /// The browser session failed
    #[error(transparent)]
    Driver(#[from] DriverError),
}

/// What one run did before stopping
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Number of navigations performed
    pub hops: usize,
    /// The terminal outcome of the final page
    pub outcome: Outcome,
}

/// Main builder for a drift run over a gallery session
///
/// Attaches to a WebDriver-controlled browser, opens the start URL and
/// follows the classify-act-reload cycle until a terminal outcome or the
/// hop cap.
pub struct Drifter {
    start_url: String,
    config: AgentConfig,
}

impl Drifter {
    /// Create a new Drifter starting from the given gallery URL
    pub fn new(start_url: impl Into<String>) -> Self {
        Self {
            start_url: start_url.into(),
            config: AgentConfig::default(),
        }
    }

    /// Set the full configuration
    pub fn with_config(mut self, config: AgentConfig) -> Self {
        self.config = config;
        self
    }

    /// Load configuration from a JSON file
    pub fn with_config_file(
        self,
        path: impl AsRef<std::path::Path>,
    ) -> Result<Self, Box<dyn std::error::Error>> {
        let config = AgentConfig::from_file(path)?;
        Ok(self.with_config(config))
    }

    /// Set the WebDriver server URL
    pub fn with_webdriver_url(mut self, url: &str) -> Self {
        self.config.webdriver_url = url.to_string();
        self
    }

    /// Set the selector wait timeout in milliseconds
    pub fn with_wait_timeout(mut self, timeout_ms: u64) -> Self {
        self.config.wait_timeout_ms = timeout_ms;
        self
    }

    /// Set the maximum number of navigations for one run
    pub fn with_max_hops(mut self, max_hops: usize) -> Self {
        self.config.max_hops = max_hops;
        self
    }

    /// Run the drift cycle to its terminal outcome
    pub async fn run(self) -> Result<RunSummary, DriftError> {
        let rules = LinkRules::new(&self.config)?;
        let start = Url::parse(&self.start_url)?;

        let mut session = WebSession::connect(&self.config.webdriver_url).await?;
        let mut rng = rand::rng();

        let result = async {
            session.navigate(&start).await?;
            drive(&mut session, &mut rng, &self.config, &rules).await
        }
        .await;

        if let Err(e) = session.close().await {
            ::log::warn!("Failed to close browser session: {}", e);
        }

        result
    }
}

/// Follows the classify-act-reload cycle on an already-open session
///
/// Each navigation restarts the cycle on the new page, exactly as a page
/// reload restarts the original automation; every other outcome is terminal.
pub async fn drive<D: Driver, R: Rng>(
    driver: &mut D,
    rng: &mut R,
    config: &AgentConfig,
    rules: &LinkRules,
) -> Result<RunSummary, DriftError> {
    let mut hops = 0;

    loop {
        let url = driver.current_url().await?;
        let state = PageState::from_url(&url, config);
        ::log::info!("On {} ({:?}), hop {}", url, state, hops);

        match routines::run_state(driver, rng, state, config, rules).await? {
            Outcome::Navigated(target) => {
                hops += 1;
                if hops >= config.max_hops {
                    ::log::warn!("Reached hop cap of {}, stopping", config.max_hops);
                    return Ok(RunSummary {
                        hops,
                        outcome: Outcome::Navigated(target),
                    });
                }
            }
            outcome => return Ok(RunSummary { hops, outcome }),
        }
    }
}
