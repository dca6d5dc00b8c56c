use crate::{
    render_card, CardEffect, CardEvent, CardState, CardVariant, MetadataResolver, MetadataSource,
    PreviewRequest, PreviewResult,
};
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tracing::{debug, warn};

type Completion = (PreviewRequest, PreviewResult);

/// A live preview card: drives a [`CardState`] and runs its resolutions on the
/// tokio runtime.
///
/// Requests are never aborted. A URL change while a lookup is in flight just
/// issues another one, and whichever result belongs to an older URL is dropped
/// when it arrives.
///
/// Lookups are spawned on the current tokio runtime. Outside a runtime no
/// lookup starts and the card stays in its loading state.
pub struct LinkPreviewCard<S> {
    state: CardState,
    resolver: MetadataResolver<S>,
    variant: CardVariant,
    html: String,
    pending: usize,
    completions_tx: mpsc::UnboundedSender<Completion>,
    completions_rx: mpsc::UnboundedReceiver<Completion>,
}

impl<S> LinkPreviewCard<S>
where
    S: MetadataSource + Send + Sync + 'static,
{
    pub fn new(resolver: MetadataResolver<S>, variant: CardVariant) -> Self {
        let (completions_tx, completions_rx) = mpsc::unbounded_channel();
        Self {
            state: CardState::new(resolver.theme().clone()),
            resolver,
            variant,
            html: String::new(),
            pending: 0,
            completions_tx,
            completions_rx,
        }
    }

    /// Called once when the element is attached, with its `href` attribute.
    pub fn connect(&mut self, href: Option<&str>) {
        self.dispatch(CardEvent::Initialize(href.map(String::from)));
    }

    pub fn set_href(&mut self, href: &str) {
        self.dispatch(CardEvent::UrlChanged(href.to_string()));
    }

    pub fn image_load_failed(&mut self) {
        self.dispatch(CardEvent::ImageLoadError);
    }

    pub fn state(&self) -> &CardState {
        &self.state
    }

    pub fn result(&self) -> Option<&PreviewResult> {
        self.state.result()
    }

    /// Markup from the last render.
    pub fn html(&self) -> &str {
        &self.html
    }

    /// Number of lookups still in flight, stale ones included.
    pub fn pending(&self) -> usize {
        self.pending
    }

    /// Waits for the next lookup to finish and feeds it to the card. Returns
    /// `false` once nothing is in flight.
    pub async fn next_update(&mut self) -> bool {
        if self.pending == 0 {
            return false;
        }
        match self.completions_rx.recv().await {
            Some((request, result)) => {
                self.pending -= 1;
                self.dispatch(CardEvent::ResolutionComplete { request, result });
                true
            }
            None => false,
        }
    }

    /// Drains every in-flight lookup.
    pub async fn settle(&mut self) -> Option<&PreviewResult> {
        while self.next_update().await {}
        self.state.result()
    }

    fn dispatch(&mut self, event: CardEvent) {
        for effect in self.state.apply(event) {
            match effect {
                CardEffect::Resolve(request) => self.spawn_resolution(request),
                CardEffect::Render => self.html = render_card(&self.state, self.variant),
            }
        }
    }

    fn spawn_resolution(&mut self, request: PreviewRequest) {
        let Ok(runtime) = Handle::try_current() else {
            warn!(url = %request.url, "No tokio runtime, skipping resolution");
            return;
        };
        debug!(url = %request.url, "Starting resolution");
        self.pending += 1;

        let resolver = self.resolver.clone();
        let tx = self.completions_tx.clone();
        runtime.spawn(async move {
            let result = resolver.resolve(&request.url).await;
            // the card may have been dropped meanwhile
            let _ = tx.send((request, result));
        });
    }
}
