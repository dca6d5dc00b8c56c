//! The preview card as an explicit state machine.
//!
//! Every input is a [`CardEvent`]; [`CardState::apply`] updates the state and
//! returns the side effects the host has to carry out. The state never performs
//! I/O itself, so property changes arriving between renders cannot re-enter a
//! resolution.

use crate::{PreviewRequest, PreviewResult, ThemePolicy};
use tracing::debug;

#[derive(Debug, Clone, PartialEq)]
pub enum CardEvent {
    /// The element was created, with whatever `href` it carried.
    Initialize(Option<String>),
    UrlChanged(String),
    ResolutionComplete {
        request: PreviewRequest,
        result: PreviewResult,
    },
    ImageLoadError,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CardEffect {
    Resolve(PreviewRequest),
    Render,
}

#[derive(Debug, Clone, Default)]
pub struct CardState {
    theme: ThemePolicy,
    requested: Option<PreviewRequest>,
    result: Option<PreviewResult>,
}

impl CardState {
    pub fn new(theme: ThemePolicy) -> Self {
        Self {
            theme,
            requested: None,
            result: None,
        }
    }

    /// URL of the most recent resolution request.
    pub fn href(&self) -> Option<&str> {
        self.requested.as_ref().map(|request| request.url.as_str())
    }

    /// `None` until the element has a non-empty `href`.
    pub fn result(&self) -> Option<&PreviewResult> {
        self.result.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.result.as_ref().is_some_and(PreviewResult::is_loading)
    }

    pub fn apply(&mut self, event: CardEvent) -> Vec<CardEffect> {
        match event {
            CardEvent::Initialize(href) => match href.filter(|url| !url.is_empty()) {
                Some(url) => self.request(url),
                None => {
                    debug!("Card initialized without href, skipping resolution");
                    Vec::new()
                }
            },
            CardEvent::UrlChanged(url) => {
                if url.is_empty() || self.href() == Some(url.as_str()) {
                    return Vec::new();
                }
                self.request(url)
            }
            CardEvent::ResolutionComplete { request, result } => {
                if self.requested.as_ref() != Some(&request) {
                    debug!(url = %request.url, "Discarding result of superseded request");
                    return Vec::new();
                }
                self.result = Some(result);
                vec![CardEffect::Render]
            }
            CardEvent::ImageLoadError => {
                if self.result.as_mut().is_some_and(PreviewResult::clear_image) {
                    vec![CardEffect::Render]
                } else {
                    Vec::new()
                }
            }
        }
    }

    fn request(&mut self, url: String) -> Vec<CardEffect> {
        let request = PreviewRequest::new(url);
        self.result = Some(PreviewResult::loading(self.theme.color_for(&request.url)));
        self.requested = Some(request.clone());
        vec![CardEffect::Resolve(request), CardEffect::Render]
    }
}
