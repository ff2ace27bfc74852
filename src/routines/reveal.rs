use super::Outcome;
use crate::config::AgentConfig;
use crate::drivers::{Driver, DriverError};
use crate::extract;
use crate::links::LinkRules;
use crate::waiter::{self, WaitError};

/// Reveal routine for artwork detail pages
///
/// Finds the link to the original/full-resolution image and redirects to it
/// with the viewer marker attached. A missing link or a non-image target
/// leaves the user on the detail page; navigating to something that is not a
/// raster image would strand the viewer state.
pub async fn run<D: Driver>(
    driver: &mut D,
    config: &AgentConfig,
    rules: &LinkRules,
) -> Result<Outcome, DriverError> {
    let current = driver.current_url().await?;

    let source = match waiter::wait_for_selector(
        driver,
        &config.original_link_selector,
        config.wait_timeout(),
        config.poll_interval(),
    )
    .await
    {
        Ok(source) => source,
        Err(WaitError::Timeout { .. }) => {
            ::log::warn!("No original-image link appeared on {}", current);
            return Ok(Outcome::Aborted);
        }
        Err(WaitError::InvalidSelector { selector, reason }) => {
            ::log::error!("Bad original-image selector {:?}: {}", selector, reason);
            return Ok(Outcome::Aborted);
        }
        Err(WaitError::Driver(e)) => return Err(e),
    };

    let Some(original) = extract::first_href(&source, &config.original_link_selector, &current)
    else {
        ::log::warn!("Original-image element matched but carried no usable href");
        return Ok(Outcome::Aborted);
    };

    if !rules.has_image_extension(&original) {
        ::log::warn!(
            "Original link {} has no recognized image extension, not redirecting",
            original
        );
        return Ok(Outcome::Aborted);
    }

    let target = rules.viewer_url(&original);
    ::log::info!("Original image: {}, viewer target: {}", original, target);
    driver.navigate(&target).await?;
    Ok(Outcome::Navigated(target))
}
