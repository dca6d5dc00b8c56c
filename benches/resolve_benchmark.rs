use async_trait::async_trait;
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use link_preview_card::{
    render_card, CardEvent, CardState, CardVariant, MetadataResolver, MetadataSource,
    PageMetadata, PreviewRequest, ResolveError,
};
use std::time::Duration;
use tokio::runtime::Runtime;

const MOCK_RESPONSE: &str = r#"{
    "data": {
        "og:title": "Test Title",
        "title": "Test Page",
        "description": "Test Description",
        "image": "https://example.com/image.jpg",
        "url": "https://example.com/"
    }
}"#;

struct CannedSource;

#[async_trait]
impl MetadataSource for CannedSource {
    async fn fetch_metadata(&self, _url: &str) -> Result<PageMetadata, ResolveError> {
        PageMetadata::from_json(MOCK_RESPONSE)
    }
}

fn bench_resolution(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let resolver = MetadataResolver::new(CannedSource);

    let mut group = c.benchmark_group("link_preview_card");
    group
        .sample_size(50)
        .measurement_time(Duration::from_secs(5))
        .warm_up_time(Duration::from_secs(1));

    group.bench_function("parse_response", |b| {
        b.iter(|| black_box(PageMetadata::from_json(MOCK_RESPONSE).unwrap()))
    });

    group.bench_function("resolve", |b| {
        b.to_async(&rt)
            .iter(|| async { black_box(resolver.resolve("https://example.com").await) });
    });

    group.bench_function("fallback_reddit", |b| {
        b.iter(|| black_box(resolver.fallback("https://reddit.com/r/rust")))
    });

    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let resolver = MetadataResolver::new(CannedSource);
    let result = rt.block_on(resolver.resolve("https://example.com"));

    let mut state = CardState::default();
    state.apply(CardEvent::Initialize(Some("https://example.com".into())));
    state.apply(CardEvent::ResolutionComplete {
        request: PreviewRequest::new("https://example.com"),
        result,
    });

    c.bench_function("render_themed", |b| {
        b.iter(|| black_box(render_card(&state, CardVariant::Themed)))
    });
    c.bench_function("render_minimal", |b| {
        b.iter(|| black_box(render_card(&state, CardVariant::Minimal)))
    });
}

criterion_group!(benches, bench_resolution, bench_render);
criterion_main!(benches);
