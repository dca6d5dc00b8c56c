use crate::{
    site_override, MetadataFetcher, MetadataSource, PageMetadata, PreviewResult, PreviewStatus,
    ResolveError, ThemePolicy, NO_DESCRIPTION, NO_PREVIEW, NO_TITLE,
};
use futures::future::join_all;
use std::sync::Arc;
use tracing::{debug, instrument};

const TITLE_KEYS: &[&str] = &["og:title", "title"];
const IMAGE_KEYS: &[&str] = &["image", "logo", "og:image"];

/// Turns a URL into a [`PreviewResult`]. Lookup failures never escape: they
/// become a fallback result.
pub struct MetadataResolver<S = MetadataFetcher> {
    source: Arc<S>,
    theme: ThemePolicy,
}

impl<S> Clone for MetadataResolver<S> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            theme: self.theme.clone(),
        }
    }
}

impl MetadataResolver<MetadataFetcher> {
    pub fn with_default_fetcher() -> Result<Self, ResolveError> {
        Ok(Self::new(MetadataFetcher::new()?))
    }
}

impl<S: MetadataSource> MetadataResolver<S> {
    pub fn new(source: S) -> Self {
        Self {
            source: Arc::new(source),
            theme: ThemePolicy::default(),
        }
    }

    pub fn with_theme(mut self, theme: ThemePolicy) -> Self {
        self.theme = theme;
        self
    }

    pub fn theme(&self) -> &ThemePolicy {
        &self.theme
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    #[instrument(level = "debug", skip(self))]
    pub async fn resolve(&self, url: &str) -> PreviewResult {
        match self.source.fetch_metadata(url).await {
            Ok(metadata) => {
                debug!(url = %url, "Metadata lookup succeeded");
                self.map_metadata(url, &metadata)
            }
            Err(e) => {
                e.log(url);
                self.fallback(url)
            }
        }
    }

    pub async fn resolve_batch(&self, urls: &[&str]) -> Vec<PreviewResult> {
        join_all(urls.iter().map(|url| self.resolve(url))).await
    }

    pub fn map_metadata(&self, url: &str, metadata: &PageMetadata) -> PreviewResult {
        let title = metadata.first_of(TITLE_KEYS).unwrap_or(NO_TITLE);
        let description = match site_override(url) {
            Some(site) => site.description,
            None => metadata.field("description").unwrap_or(NO_DESCRIPTION),
        };
        let link = metadata.field("url").unwrap_or(url);

        PreviewResult {
            title: title.to_string(),
            description: description.to_string(),
            image_url: metadata.first_of(IMAGE_KEYS).map(String::from),
            link_url: Some(link.to_string()).filter(|link| !link.is_empty()),
            theme_color: self.theme.color_for(url).to_string(),
            status: PreviewStatus::Success,
        }
    }

    pub fn fallback(&self, url: &str) -> PreviewResult {
        let theme_color = self.theme.color_for(url).to_string();
        match site_override(url) {
            Some(site) => PreviewResult {
                title: site.title.to_string(),
                description: site.description.to_string(),
                image_url: Some(site.image_url.to_string()),
                link_url: Some(url.to_string()),
                theme_color,
                status: PreviewStatus::Fallback,
            },
            None => PreviewResult {
                title: NO_PREVIEW.to_string(),
                description: NO_DESCRIPTION.to_string(),
                image_url: None,
                link_url: None,
                theme_color,
                status: PreviewStatus::Fallback,
            },
        }
    }
}
