/// Hardcoded card content for a handful of well-known sites.
///
/// The description always wins over fetched data; title and image are only
/// used when the metadata lookup fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SiteOverride {
    pub domain: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub image_url: &'static str,
}

const REDDIT: SiteOverride = SiteOverride {
    domain: "reddit.com",
    title: "Reddit",
    description: "A social news aggregation and discussion website.",
    image_url: "https://www.redditstatic.com/desktop2x/img/favicon/android-icon-192x192.png",
};

const AMAZON: SiteOverride = SiteOverride {
    domain: "amazon.com",
    title: "Amazon",
    description: "An online marketplace for books, electronics, and everyday goods.",
    image_url: "https://www.amazon.com/favicon.ico",
};

const SITE_OVERRIDES: &[SiteOverride] = &[REDDIT, AMAZON];

pub fn site_override(url: &str) -> Option<&'static SiteOverride> {
    SITE_OVERRIDES
        .iter()
        .find(|site| url.contains(site.domain))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_sites() {
        assert_eq!(site_override("https://reddit.com/r/test").map(|s| s.title), Some("Reddit"));
        assert_eq!(
            site_override("https://www.amazon.com/dp/B000").map(|s| s.title),
            Some("Amazon")
        );
        assert!(site_override("https://example.com").is_none());
    }

    #[test]
    fn test_reddit_checked_before_amazon() {
        let site = site_override("https://reddit.com/r/amazon.com").unwrap();
        assert_eq!(site.domain, "reddit.com");
    }
}
