use super::Outcome;
use crate::color::{self, SampledColor};
use crate::drivers::{Driver, DriverError};
use crate::links::LinkRules;
use url::Url;

/// Fixed background behind the load-failure message
const ERROR_BACKGROUND: &str = "#1f1f1f";

/// Render routine for the viewer state
///
/// Terminal either way: a successful load replaces the page with a
/// full-bleed image on the sampled background, a failed load replaces it
/// with an error message. This is the only routine that produces
/// user-visible error UI.
pub async fn run<D: Driver>(driver: &mut D, rules: &LinkRules) -> Result<Outcome, DriverError> {
    let current = driver.current_url().await?;
    let image_url = rules.image_url(&current);

    let bytes = match driver.fetch_image(&image_url).await {
        Ok(bytes) => bytes,
        Err(DriverError::ImageFetch { url, reason }) => {
            ::log::error!("Image failed to load from {}: {}", url, reason);
            driver
                .replace_body(&error_markup(&url), ERROR_BACKGROUND)
                .await?;
            return Ok(Outcome::RenderedError);
        }
        Err(e) => return Err(e),
    };

    let background = color::sample_bytes(&bytes);
    ::log::info!("Sampled dominant color: {}", background.css());

    driver
        .replace_body(&viewer_markup(&image_url, background), &background.css())
        .await?;
    Ok(Outcome::Rendered(background))
}

/// Full-viewport image markup matching the sampled background
fn viewer_markup(image_url: &Url, background: SampledColor) -> String {
    format!(
        r#"<img src="{}" style="position: absolute; top: 0; left: 0; width: 100%; height: 100%; object-fit: contain; background: {};">"#,
        image_url,
        background.css()
    )
}

/// Markup for the image-load failure message
fn error_markup(image_url: &Url) -> String {
    format!(
        r#"<p style="color: #cccccc; font-family: sans-serif; text-align: center; margin-top: 45vh;">Failed to load image: {}</p>"#,
        image_url
    )
}
