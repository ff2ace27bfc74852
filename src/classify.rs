use crate::config::AgentConfig;
use url::Url;

/// The page states the agent recognizes
///
/// Derived once per load from the URL alone; immutable for the lifetime of
/// that load.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageState {
    /// Bookmark collection without a page-index parameter
    CollectionRoot,
    /// Bookmark collection with an explicit page index
    CollectionPage,
    /// A single artwork's detail page
    ArtworkDetail,
    /// An original-image URL carrying the viewer marker parameter
    ArtworkViewer,
    /// Anything else; the agent takes no action here
    Unrecognized,
}

impl PageState {
    /// Determines the page state from a URL, by first-match priority
    ///
    /// The viewer marker wins over everything else: the reveal routine
    /// attaches it to the original-image URL, whose path carries neither the
    /// artwork nor the collection segment.
    pub fn from_url(url: &Url, config: &AgentConfig) -> Self {
        if has_query_param(url, &config.viewer_param) {
            ::log::debug!("Classifying as ArtworkViewer: {}", url);
            PageState::ArtworkViewer
        } else if is_artwork_detail_path(url.path(), &config.artwork_prefix) {
            ::log::debug!("Classifying as ArtworkDetail: {}", url);
            PageState::ArtworkDetail
        } else if url.path().contains(&config.collection_segment) {
            if has_query_param(url, &config.page_param) {
                ::log::debug!("Classifying as CollectionPage: {}", url);
                PageState::CollectionPage
            } else {
                ::log::debug!("Classifying as CollectionRoot: {}", url);
                PageState::CollectionRoot
            }
        } else {
            ::log::debug!("Classifying as Unrecognized: {}", url);
            PageState::Unrecognized
        }
    }
}

/// Checks whether the query string contains the given parameter
fn has_query_param(url: &Url, param: &str) -> bool {
    url.query_pairs().any(|(key, _)| key == param)
}

/// Checks whether a path starts with the artwork prefix followed by digits
fn is_artwork_detail_path(path: &str, prefix: &str) -> bool {
    match path.strip_prefix(prefix) {
        Some(rest) => {
            let id: &str = rest.split('/').next().unwrap_or("");
            !id.is_empty() && id.bytes().all(|b| b.is_ascii_digit())
        }
        None => false,
    }
}
