use async_trait::async_trait;
use link_preview_card::{MetadataSource, PageMetadata, ResolveError};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

#[allow(dead_code)]
#[derive(Clone)]
pub enum Reply {
    Data(Vec<(&'static str, &'static str)>),
    NetworkError,
    HttpError(u16),
    Malformed,
}

/// Metadata source answering from a fixed table, optionally after a delay.
#[derive(Default)]
pub struct ScriptedSource {
    replies: HashMap<String, (Duration, Reply)>,
    calls: AtomicUsize,
}

#[allow(dead_code)]
impl ScriptedSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn reply(mut self, url: &str, reply: Reply) -> Self {
        self.replies.insert(url.to_string(), (Duration::ZERO, reply));
        self
    }

    pub fn delayed(mut self, url: &str, delay: Duration, reply: Reply) -> Self {
        self.replies.insert(url.to_string(), (delay, reply));
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MetadataSource for ScriptedSource {
    async fn fetch_metadata(&self, url: &str) -> Result<PageMetadata, ResolveError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let (delay, reply) = self
            .replies
            .get(url)
            .cloned()
            .unwrap_or((Duration::ZERO, Reply::NetworkError));

        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        match reply {
            Reply::Data(fields) => Ok(fields.into_iter().collect()),
            Reply::NetworkError => Err(ResolveError::Network("connection reset".into())),
            Reply::HttpError(status) => Err(ResolveError::Http {
                status,
                message: "scripted failure".into(),
            }),
            Reply::Malformed => PageMetadata::from_json("<!doctype html>"),
        }
    }
}
