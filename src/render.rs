use crate::{CardState, PreviewResult, PreviewStatus};
use html_escape::{encode_double_quoted_attribute, encode_text};
use std::fmt::Write as _;

const MINIMAL_STYLE: &str = ".card { border: 1px solid #ccc; padding: 10px; margin-top: 10px; } \
.loading { text-align: center; }";

const THEMED_STYLE: &str = ".card { border: 1px solid var(--card-accent); border-radius: 8px; \
padding: 12px; max-width: 400px; } \
.card h3 { color: var(--card-accent); margin: 0 0 8px; } \
.card img { max-width: 100%; border-radius: 4px; } \
.card a { color: var(--card-accent); } \
.loading { text-align: center; padding: 12px; }";

/// How much of the card to draw.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CardVariant {
    /// Title, description and link only; failures show a single notice.
    Minimal,
    /// Theme accent, image with an error hook, and a visit link.
    #[default]
    Themed,
}

/// Renders the card's current state as an HTML fragment. An element without
/// an `href` renders nothing.
pub fn render_card(state: &CardState, variant: CardVariant) -> String {
    let Some(result) = state.result() else {
        return String::new();
    };

    let mut html = String::new();
    match variant {
        CardVariant::Minimal => render_minimal(&mut html, result),
        CardVariant::Themed => render_themed(&mut html, result),
    }
    html
}

fn render_minimal(html: &mut String, result: &PreviewResult) {
    let _ = write!(html, "<style>{MINIMAL_STYLE}</style>");
    match result.status {
        PreviewStatus::Loading => html.push_str(r#"<div class="loading">Loading...</div>"#),
        PreviewStatus::Fallback => {
            html.push_str(r#"<div class="loading">No preview available.</div>"#)
        }
        PreviewStatus::Success => {
            let _ = write!(
                html,
                r#"<div class="card"><h3>{}</h3><p>{}</p>"#,
                encode_text(result.display_title()),
                encode_text(result.display_description()),
            );
            if let Some(link) = &result.link_url {
                let _ = write!(
                    html,
                    r#"<a href="{}">{}</a>"#,
                    encode_double_quoted_attribute(link),
                    encode_text(link),
                );
            }
            html.push_str("</div>");
        }
    }
}

fn render_themed(html: &mut String, result: &PreviewResult) {
    let accent = encode_double_quoted_attribute(&result.theme_color);
    let _ = write!(html, "<style>{THEMED_STYLE}</style>");

    if result.is_loading() {
        let _ = write!(
            html,
            r#"<div class="loading" style="--card-accent: {accent}">Loading...</div>"#
        );
        return;
    }

    let _ = write!(
        html,
        r#"<div class="card" style="--card-accent: {accent}">"#
    );
    if let Some(image) = &result.image_url {
        let _ = write!(
            html,
            r#"<img src="{}" alt="" data-on-error="image-load-error">"#,
            encode_double_quoted_attribute(image),
        );
    }
    let _ = write!(
        html,
        "<h3>{}</h3><p>{}</p>",
        encode_text(result.display_title()),
        encode_text(result.display_description()),
    );
    if let Some(link) = &result.link_url {
        let _ = write!(
            html,
            r#"<a href="{}" target="_blank" rel="noopener noreferrer">Visit site</a>"#,
            encode_double_quoted_attribute(link),
        );
    }
    html.push_str("</div>");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{CardEvent, PreviewRequest, NO_DESCRIPTION, NO_TITLE};

    fn resolved(result: PreviewResult) -> CardState {
        let mut state = CardState::default();
        state.apply(CardEvent::Initialize(Some("https://example.com".into())));
        state.apply(CardEvent::ResolutionComplete {
            request: PreviewRequest::new("https://example.com"),
            result,
        });
        state
    }

    fn result(status: PreviewStatus) -> PreviewResult {
        PreviewResult {
            title: String::new(),
            description: String::new(),
            image_url: Some("https://example.com/a.png".into()),
            link_url: Some("https://example.com/?a=1&b=2".into()),
            theme_color: "#333".into(),
            status,
        }
    }

    #[test]
    fn test_no_href_renders_nothing() {
        assert_eq!(render_card(&CardState::default(), CardVariant::Themed), "");
        assert_eq!(render_card(&CardState::default(), CardVariant::Minimal), "");
    }

    #[test]
    fn test_loading_shows_no_content() {
        let mut state = CardState::default();
        state.apply(CardEvent::Initialize(Some("https://example.com".into())));

        let html = render_card(&state, CardVariant::Themed);
        assert!(html.contains("Loading..."));
        assert!(!html.contains("<h3>"));
        assert!(!html.contains("<img"));
    }

    #[test]
    fn test_themed_defaults_and_escaping() {
        let mut r = result(PreviewStatus::Success);
        r.description = "<script>alert(1)</script>".into();
        let html = render_card(&resolved(r), CardVariant::Themed);

        assert!(html.contains(NO_TITLE));
        assert!(html.contains("&lt;script&gt;"));
        assert!(!html.contains("<script>"));
        assert!(html.contains(r#"href="https://example.com/?a=1&amp;b=2""#));
        assert!(html.contains(r#"<img src="https://example.com/a.png""#));
        assert!(html.contains("--card-accent: #333"));
    }

    #[test]
    fn test_minimal_variant() {
        let html = render_card(&resolved(result(PreviewStatus::Success)), CardVariant::Minimal);
        assert!(html.contains(NO_DESCRIPTION));
        assert!(!html.contains("<img"));

        let html = render_card(&resolved(result(PreviewStatus::Fallback)), CardVariant::Minimal);
        assert!(html.contains("No preview available."));
        assert!(!html.contains("<h3>"));
    }
}
