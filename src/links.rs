use crate::config::AgentConfig;
use regex::Regex;
use url::Url;

/// Compiled URL rules shared by the routines
///
/// Patterns come from the configuration and are compiled once, so the
/// per-candidate checks inside selection loops are cheap.
#[derive(Debug)]
pub struct LinkRules {
    artwork_path: Regex,
    image_extension: Regex,
    viewer_param: String,
    page_param: String,
}

impl LinkRules {
    /// Compile the rules from a configuration
    pub fn new(config: &AgentConfig) -> Result<Self, regex::Error> {
        let artwork_path = Regex::new(&format!(
            "^{}[0-9]+$",
            regex::escape(&config.artwork_prefix)
        ))?;
        let image_extension = Regex::new(&format!(
            r"\.({})$",
            config
                .image_extensions
                .iter()
                .map(|e| regex::escape(e))
                .collect::<Vec<_>>()
                .join("|")
        ))?;

        Ok(Self {
            artwork_path,
            image_extension,
            viewer_param: config.viewer_param.clone(),
            page_param: config.page_param.clone(),
        })
    }

    /// Checks whether a URL has the strict artwork-detail path shape
    pub fn is_artwork_url(&self, url: &Url) -> bool {
        self.artwork_path.is_match(url.path())
    }

    /// Checks whether a URL's path ends in a recognized raster-image extension
    pub fn has_image_extension(&self, url: &Url) -> bool {
        self.image_extension.is_match(&url.path().to_ascii_lowercase())
    }

    /// Builds the viewer URL for an original-image URL
    ///
    /// The marker is appended through the query API, which picks `?` or `&`
    /// depending on whether a query string already exists.
    pub fn viewer_url(&self, original: &Url) -> Url {
        let mut target = original.clone();
        target
            .query_pairs_mut()
            .append_pair(&self.viewer_param, "true");
        target
    }

    /// Recovers the raw image URL from a viewer URL by dropping the query
    pub fn image_url(&self, viewer: &Url) -> Url {
        let mut target = viewer.clone();
        target.set_query(None);
        target
    }

    /// Builds the URL of a specific collection page
    ///
    /// Replaces any existing page parameter instead of appending a second one.
    pub fn page_url(&self, base: &Url, index: u32) -> Url {
        let mut target = base.clone();
        let kept: Vec<(String, String)> = base
            .query_pairs()
            .filter(|(key, _)| key != &self.page_param)
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        target.set_query(None);
        {
            let mut pairs = target.query_pairs_mut();
            for (key, value) in &kept {
                pairs.append_pair(key, value);
            }
            pairs.append_pair(&self.page_param, &index.to_string());
        }
        target
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rules() -> LinkRules {
        LinkRules::new(&AgentConfig::default()).unwrap()
    }

    #[test]
    fn test_artwork_url_shape() {
        let rules = rules();
        let strict = Url::parse("https://gallery.example/artworks/4521").unwrap();
        assert!(rules.is_artwork_url(&strict));

        let trailing = Url::parse("https://gallery.example/artworks/4521/extra").unwrap();
        assert!(!rules.is_artwork_url(&trailing));

        let non_numeric = Url::parse("https://gallery.example/artworks/new").unwrap();
        assert!(!rules.is_artwork_url(&non_numeric));

        let unrelated = Url::parse("https://gallery.example/users/1").unwrap();
        assert!(!rules.is_artwork_url(&unrelated));
    }

    #[test]
    fn test_image_extension() {
        let rules = rules();
        assert!(rules.has_image_extension(&Url::parse("https://x/img.png").unwrap()));
        assert!(rules.has_image_extension(&Url::parse("https://x/a/b/123_p0.JPG").unwrap()));
        assert!(!rules.has_image_extension(&Url::parse("https://x/img.mp4").unwrap()));
        assert!(!rules.has_image_extension(&Url::parse("https://x/artworks/123").unwrap()));
        // Extension must be on the path, not the query
        assert!(!rules.has_image_extension(&Url::parse("https://x/dl?file=a.png").unwrap()));
    }

    #[test]
    fn test_viewer_url_appending() {
        let rules = rules();

        let bare = Url::parse("https://x/img.png").unwrap();
        assert_eq!(
            rules.viewer_url(&bare).as_str(),
            "https://x/img.png?intermediate=true"
        );

        let with_query = Url::parse("https://x/img.png?dl=1").unwrap();
        assert_eq!(
            rules.viewer_url(&with_query).as_str(),
            "https://x/img.png?dl=1&intermediate=true"
        );
    }

    #[test]
    fn test_image_url_strips_query() {
        let rules = rules();
        let viewer = Url::parse("https://x/img.png?dl=1&intermediate=true").unwrap();
        assert_eq!(rules.image_url(&viewer).as_str(), "https://x/img.png");
    }

    #[test]
    fn test_page_url_sets_and_replaces_index() {
        let rules = rules();

        let root = Url::parse("https://gallery.example/users/1/bookmarks/artworks").unwrap();
        assert_eq!(
            rules.page_url(&root, 3).as_str(),
            "https://gallery.example/users/1/bookmarks/artworks?p=3"
        );

        // An existing index is replaced, other parameters survive
        let paged =
            Url::parse("https://gallery.example/users/1/bookmarks/artworks?rest=show&p=2").unwrap();
        assert_eq!(
            rules.page_url(&paged, 5).as_str(),
            "https://gallery.example/users/1/bookmarks/artworks?rest=show&p=5"
        );
    }
}
