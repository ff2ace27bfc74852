use clap::Parser;
use gallery_drifter::{Drifter, Outcome};

mod args;
use args::{Args, build_config};

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::init();

    let args = Args::parse();

    let config = match build_config(&args) {
        Ok(config) => config,
        Err(e) => {
            ::log::error!("Failed to load configuration: {}", e);
            return;
        }
    };

    println!("Note: driving a browser requires a WebDriver server (e.g. chromedriver).");
    println!("Pass --webdriver-url if it is not listening on {}", config.webdriver_url);

    ::log::info!("Starting drift from: {}", args.start_url);
    let drifter = Drifter::new(&args.start_url).with_config(config);

    match drifter.run().await {
        Ok(summary) => {
            ::log::info!("Run finished after {} hop(s)", summary.hops);
            match summary.outcome {
                Outcome::Rendered(color) => {
                    ::log::info!("Viewer rendered against {}", color.css());
                }
                Outcome::RenderedError => {
                    ::log::warn!("Viewer rendered an image-load error");
                }
                Outcome::Navigated(url) => {
                    ::log::info!("Stopped at the hop cap on {}", url);
                }
                Outcome::Aborted => {
                    ::log::info!("Stopped without an action; see diagnostics above");
                }
            }
        }
        Err(e) => {
            ::log::error!("Drift run failed: {}", e);
        }
    }
}
