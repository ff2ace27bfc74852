pub mod browse;
pub mod render;
pub mod reveal;

#[cfg(test)]
mod tests;

use crate::classify::PageState;
use crate::color::SampledColor;
use crate::config::AgentConfig;
use crate::drivers::{Driver, DriverError};
use crate::links::LinkRules;
use rand::Rng;
use url::Url;

/// The single terminal action of one page load
///
/// Every routine produces exactly one of these; a routine never navigates
/// twice or rewrites the page after navigating.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Navigated to a new URL; the cycle restarts there
    Navigated(Url),
    /// Viewer render completed with the sampled background color
    Rendered(SampledColor),
    /// Viewer image failed to load; an error page was rendered instead
    RenderedError,
    /// Nothing actionable on this page; diagnostics were logged
    Aborted,
}

/// Dispatches the routine for a classified page state
pub async fn run_state<D: Driver, R: Rng>(
    driver: &mut D,
    rng: &mut R,
    state: PageState,
    config: &AgentConfig,
    rules: &LinkRules,
) -> Result<Outcome, DriverError> {
    match state {
        PageState::CollectionRoot | PageState::CollectionPage => {
            browse::run(driver, rng, state, config, rules).await
        }
        PageState::ArtworkDetail => reveal::run(driver, config, rules).await,
        PageState::ArtworkViewer => render::run(driver, rules).await,
        PageState::Unrecognized => {
            ::log::info!("Unrecognized gallery page, taking no action");
            Ok(Outcome::Aborted)
        }
    }
}

/// Picks one element uniformly at random
pub(crate) fn pick<'a, T, R: Rng>(rng: &mut R, items: &'a [T]) -> Option<&'a T> {
    if items.is_empty() {
        None
    } else {
        items.get(rng.random_range(0..items.len()))
    }
}
