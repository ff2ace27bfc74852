use clap::Parser;
use gallery_drifter::AgentConfig;
use std::error::Error;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "gallery-drifter")]
#[command(about = "Random-walk automation for a gallery's bookmark collections")]
#[command(version)]
pub struct Args {
    /// Gallery URL to start from (collection, artwork or viewer page)
    pub start_url: String,

    /// WebDriver server URL
    #[arg(short, long)]
    pub webdriver_url: Option<String>,

    /// Path to a JSON configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Selector wait timeout in milliseconds
    #[arg(long)]
    pub wait_timeout: Option<u64>,

    /// Maximum number of navigations in one run
    #[arg(long)]
    pub max_hops: Option<usize>,
}

/// Builds the agent configuration from the config file plus CLI overrides
pub fn build_config(args: &Args) -> Result<AgentConfig, Box<dyn Error>> {
    let mut config = match &args.config {
        Some(path) => AgentConfig::from_file(path)?,
        None => AgentConfig::default(),
    };

    if let Some(url) = &args.webdriver_url {
        config.webdriver_url = url.clone();
    }
    if let Some(timeout) = args.wait_timeout {
        config.wait_timeout_ms = timeout;
    }
    if let Some(max_hops) = args.max_hops {
        config.max_hops = max_hops;
    }

    Ok(config)
}
