use super::{Outcome, pick};
use crate::classify::PageState;
use crate::config::AgentConfig;
use crate::drivers::{Driver, DriverError};
use crate::extract;
use crate::links::LinkRules;
use crate::waiter::{self, WaitError};
use rand::Rng;
use url::Url;

/// Browse routine for bookmark collections
///
/// On the collection root this prefers a page drawn uniformly from all
/// numbered pagination controls, then selects a random artwork; pagination
/// that is absent, late, or already satisfied (the draw landed on the current
/// page) falls through to artwork selection so the routine never gets stuck.
pub async fn run<D: Driver, R: Rng>(
    driver: &mut D,
    rng: &mut R,
    state: PageState,
    config: &AgentConfig,
    rules: &LinkRules,
) -> Result<Outcome, DriverError> {
    let current = driver.current_url().await?;

    // A page index in the URL means a page was already chosen on a previous
    // load; only the artwork draw remains.
    if state == PageState::CollectionRoot {
        if let Some(target) = select_page(driver, rng, &current, config, rules).await? {
            driver.navigate(&target).await?;
            return Ok(Outcome::Navigated(target));
        }
    }

    select_artwork(driver, rng, &current, config, rules).await
}

/// Draws a random result page, if pagination offers one worth moving to
async fn select_page<D: Driver, R: Rng>(
    driver: &D,
    rng: &mut R,
    current: &Url,
    config: &AgentConfig,
    rules: &LinkRules,
) -> Result<Option<Url>, DriverError> {
    let source = match waiter::wait_for_selector(
        driver,
        &config.pagination_selector,
        config.wait_timeout(),
        config.poll_interval(),
    )
    .await
    {
        Ok(source) => source,
        Err(WaitError::Timeout { .. }) => {
            ::log::info!("Pagination never appeared, selecting from the current page");
            return Ok(None);
        }
        Err(WaitError::InvalidSelector { selector, reason }) => {
            ::log::error!("Bad pagination selector {:?}: {}", selector, reason);
            return Ok(None);
        }
        Err(WaitError::Driver(e)) => return Err(e),
    };

    let pages = extract::pagination_links(&source, current, config, rules);
    let Some(page) = pick(rng, &pages) else {
        ::log::info!("No numbered pagination controls, selecting from the current page");
        return Ok(None);
    };

    if &page.url == current {
        ::log::debug!("Random draw landed on the current page");
        return Ok(None);
    }

    ::log::info!(
        "Selected page {} out of {} candidates: {}",
        page.index,
        pages.len(),
        page.url
    );
    Ok(Some(page.url.clone()))
}

/// Draws a random artwork link from the current page and navigates to it
async fn select_artwork<D: Driver, R: Rng>(
    driver: &mut D,
    rng: &mut R,
    current: &Url,
    config: &AgentConfig,
    rules: &LinkRules,
) -> Result<Outcome, DriverError> {
    let source = match waiter::wait_for_selector(
        driver,
        &config.artwork_link_selector,
        config.wait_timeout(),
        config.poll_interval(),
    )
    .await
    {
        Ok(source) => source,
        Err(WaitError::Timeout { .. }) => {
            ::log::warn!("No artwork links appeared on this page");
            return Ok(Outcome::Aborted);
        }
        Err(WaitError::InvalidSelector { selector, reason }) => {
            ::log::error!("Bad artwork selector {:?}: {}", selector, reason);
            return Ok(Outcome::Aborted);
        }
        Err(WaitError::Driver(e)) => return Err(e),
    };

    let candidates = extract::all_hrefs(&source, &config.artwork_link_selector, current);
    let validated: Vec<Url> = candidates
        .iter()
        .filter(|url| rules.is_artwork_url(url))
        .cloned()
        .collect();

    let target = if let Some(target) = pick(rng, &validated) {
        ::log::info!(
            "Selected artwork {} out of {} validated candidates",
            target,
            validated.len()
        );
        target.clone()
    } else if let Some(first) = candidates.first() {
        // Exactly one arbitrary unvalidated candidate, never more
        ::log::warn!(
            "No candidate matched the artwork path shape, falling back to {}",
            first
        );
        first.clone()
    } else {
        ::log::error!("No artwork links found on this page");
        return Ok(Outcome::Aborted);
    };

    driver.navigate(&target).await?;
    Ok(Outcome::Navigated(target))
}
