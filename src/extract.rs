use crate::config::AgentConfig;
use crate::links::LinkRules;
use scraper::{Html, Selector};
use url::Url;

/// A pagination control pointing at one page of a collection
#[derive(Debug, Clone)]
pub struct PageLink {
    /// Page index shown on the control's label
    pub index: u32,
    /// Absolute URL of that page
    pub url: Url,
}

/// Checks whether a selector matches anything in a document snapshot
///
/// Selectors come from configuration, so a parse failure is reported to the
/// caller instead of panicking.
pub fn selector_matches(html: &str, selector: &str) -> Result<bool, String> {
    let compiled = Selector::parse(selector).map_err(|e| e.to_string())?;
    let doc = Html::parse_document(html);
    Ok(doc.select(&compiled).next().is_some())
}

/// Extracts the first matching element's href, resolved against the base URL
pub fn first_href(html: &str, selector: &str, base: &Url) -> Option<Url> {
    let compiled = match Selector::parse(selector) {
        Ok(s) => s,
        Err(e) => {
            ::log::error!("Invalid selector {:?}: {}", selector, e);
            return None;
        }
    };
    let doc = Html::parse_document(html);
    doc.select(&compiled)
        .filter_map(|e| e.value().attr("href"))
        .filter_map(|href| base.join(href).ok())
        .next()
}

/// Extracts all matching hrefs, resolved against the base URL
pub fn all_hrefs(html: &str, selector: &str, base: &Url) -> Vec<Url> {
    let compiled = match Selector::parse(selector) {
        Ok(s) => s,
        Err(e) => {
            ::log::error!("Invalid selector {:?}: {}", selector, e);
            return Vec::new();
        }
    };
    let doc = Html::parse_document(html);
    let links: Vec<Url> = doc
        .select(&compiled)
        .filter_map(|e| e.value().attr("href"))
        .filter_map(|href| base.join(href).ok())
        .collect();

    ::log::debug!("Found {} links for selector {:?}", links.len(), selector);
    links
}

/// Collects page links from the pagination container
///
/// Anchors and buttons qualify when they carry a numeric label and no
/// decorative icon (arrow controls). Buttons have no href of their own, so
/// their URL is synthesized from the base URL plus the page parameter.
/// Targets on a different host are dropped.
pub fn pagination_links(
    html: &str,
    base: &Url,
    config: &AgentConfig,
    rules: &LinkRules,
) -> Vec<PageLink> {
    let container = match Selector::parse(&config.pagination_selector) {
        Ok(s) => s,
        Err(e) => {
            ::log::error!(
                "Invalid pagination selector {:?}: {}",
                config.pagination_selector,
                e
            );
            return Vec::new();
        }
    };
    // Static selectors: these literals always parse
    let controls = Selector::parse("a, button").unwrap();
    let icon = match Selector::parse(&config.icon_marker) {
        Ok(s) => s,
        Err(e) => {
            ::log::error!("Invalid icon marker {:?}: {}", config.icon_marker, e);
            return Vec::new();
        }
    };

    let doc = Html::parse_document(html);
    let mut pages = Vec::new();

    for nav in doc.select(&container) {
        for control in nav.select(&controls) {
            // Arrow/icon controls carry no page number
            if control.select(&icon).next().is_some() {
                continue;
            }
            let label: String = control.text().collect::<String>().trim().to_string();
            let Ok(index) = label.parse::<u32>() else {
                continue;
            };
            if index == 0 {
                continue;
            }

            let url = match control.value().attr("href") {
                Some(href) => match base.join(href) {
                    Ok(resolved) => resolved,
                    Err(e) => {
                        ::log::debug!("Skipping unparseable page href {:?}: {}", href, e);
                        continue;
                    }
                },
                None => rules.page_url(base, index),
            };
            if url.host_str() != base.host_str() {
                ::log::debug!("Skipping cross-host page link: {}", url);
                continue;
            }

            pages.push(PageLink { index, url });
        }
    }

    ::log::debug!("Found {} pagination links", pages.len());
    pages
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://gallery.example/users/1/bookmarks/artworks").unwrap()
    }

    #[test]
    fn test_first_href_resolves_relative() {
        let html = r##"<html><body>
            <a href="/artworks/1">one</a>
            <a href="/artworks/2">two</a>
        </body></html>"##;
        let url = first_href(html, r#"a[href^="/artworks/"]"#, &base()).unwrap();
        assert_eq!(url.as_str(), "https://gallery.example/artworks/1");
    }

    #[test]
    fn test_all_hrefs_empty_when_absent() {
        let html = "<html><body><p>nothing here</p></body></html>";
        assert!(all_hrefs(html, r#"a[href^="/artworks/"]"#, &base()).is_empty());
    }

    #[test]
    fn test_pagination_anchors_and_buttons() {
        let config = AgentConfig::default();
        let rules = LinkRules::new(&config).unwrap();
        let html = r#"<html><body><nav>
            <a href="?p=1"><span>1</span></a>
            <a href="?p=2"><span>2</span></a>
            <button><span>3</span></button>
            <a href="?p=4"><span><svg></svg></span></a>
            <a href="?p=5"><span>next</span></a>
        </nav></body></html>"#;
        let pages = pagination_links(html, &base(), &config, &rules);

        let indexes: Vec<u32> = pages.iter().map(|p| p.index).collect();
        assert_eq!(indexes, vec![1, 2, 3]);

        // Anchors keep their href, buttons synthesize one
        assert_eq!(
            pages[0].url.as_str(),
            "https://gallery.example/users/1/bookmarks/artworks?p=1"
        );
        assert_eq!(
            pages[2].url.as_str(),
            "https://gallery.example/users/1/bookmarks/artworks?p=3"
        );
    }

    #[test]
    fn test_pagination_rejects_cross_host() {
        let config = AgentConfig::default();
        let rules = LinkRules::new(&config).unwrap();
        let html = r#"<html><body><nav>
            <a href="https://evil.example/?p=1"><span>1</span></a>
            <a href="?p=2"><span>2</span></a>
        </nav></body></html>"#;
        let pages = pagination_links(html, &base(), &config, &rules);
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].index, 2);
    }

    #[test]
    fn test_selector_matches() {
        let html = r#"<html><body><nav><a href="?p=1">1</a></nav></body></html>"#;
        assert!(selector_matches(html, "nav").unwrap());
        assert!(!selector_matches(html, "table").unwrap());
        assert!(selector_matches(html, "a[[").is_err());
    }
}
