mod card;
mod element;
mod error;
mod fetcher;
mod logging;
mod overrides;
mod render;
mod resolver;
mod theme;
mod utils;

pub use card::{CardEffect, CardEvent, CardState};
pub use element::LinkPreviewCard;
pub use error::ResolveError;
pub use fetcher::{
    FetcherConfig, MetadataFetcher, MetadataSource, PageMetadata, DEFAULT_METADATA_ENDPOINT,
    DEFAULT_QUERY_PARAM,
};
#[cfg(feature = "logging")]
pub use logging::{setup_logging, LogConfig, LogLevelGuard};
pub use logging::{log_error_card, log_preview_card};
pub use overrides::{site_override, SiteOverride};
pub use render::{render_card, CardVariant};
pub use resolver::MetadataResolver;
pub use theme::{ThemePolicy, DEFAULT_THEME_COLOR};

pub const NO_TITLE: &str = "No Title Available";
pub const NO_DESCRIPTION: &str = "No Description Available";
pub const NO_PREVIEW: &str = "No Preview Available";

/// A single resolution attempt for one URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewRequest {
    pub url: String,
}

impl PreviewRequest {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum PreviewStatus {
    Loading,
    Success,
    Fallback,
}

/// What a card displays. Replaced wholesale on every resolution.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PreviewResult {
    pub title: String,
    pub description: String,
    pub image_url: Option<String>,
    pub link_url: Option<String>,
    pub theme_color: String,
    pub status: PreviewStatus,
}

impl PreviewResult {
    pub fn loading(theme_color: impl Into<String>) -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            image_url: None,
            link_url: None,
            theme_color: theme_color.into(),
            status: PreviewStatus::Loading,
        }
    }

    pub fn is_loading(&self) -> bool {
        self.status == PreviewStatus::Loading
    }

    /// Drops the image after the browser failed to load it. Returns whether anything changed.
    pub fn clear_image(&mut self) -> bool {
        self.image_url.take().is_some()
    }

    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            NO_TITLE
        } else {
            &self.title
        }
    }

    pub fn display_description(&self) -> &str {
        if self.description.is_empty() {
            NO_DESCRIPTION
        } else {
            &self.description
        }
    }
}
