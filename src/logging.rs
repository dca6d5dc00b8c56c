use crate::utils::truncate_str;
use crate::PreviewResult;
use std::fmt::Display;
#[cfg(feature = "logging")]
use std::path::PathBuf;
use tracing::{error, info};
#[cfg(feature = "logging")]
use tracing::debug;
#[cfg(feature = "logging")]
use tracing_appender::rolling::{RollingFileAppender, Rotation};
#[cfg(feature = "logging")]
use tracing_subscriber::{
    fmt as subscriber_fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer,
};

#[cfg(feature = "logging")]
#[derive(Debug)]
pub struct LogConfig {
    pub log_dir: PathBuf,
    pub log_level: String,
    pub console_output: bool,
    pub file_output: bool,
}

#[cfg(feature = "logging")]
impl Default for LogConfig {
    fn default() -> Self {
        Self {
            log_dir: "logs".into(),
            log_level: "info".into(),
            console_output: true,
            file_output: false,
        }
    }
}

fn create_separator(width: usize, ch: char) -> String {
    std::iter::repeat(ch).take(width).collect()
}

/// Logs a resolved card as a boxed summary, one field per line.
pub fn log_preview_card(result: &PreviewResult, url: &str) {
    const CARD_WIDTH: usize = 80;
    const CONTENT_WIDTH: usize = CARD_WIDTH - 10;

    let horizontal_line = create_separator(CARD_WIDTH - 2, '═');

    info!(
        "\n╔{}╗\n\
         URL:    {}\n\
         Status: {:?}\n\
         Title:  {}\n\
         Desc:   {}\n\
         Image:  {}\n\
         Link:   {}\n\
         Theme:  {}\n\
         ╚{}╝",
        horizontal_line,
        truncate_str(url, CONTENT_WIDTH),
        result.status,
        truncate_str(result.display_title(), CONTENT_WIDTH),
        truncate_str(result.display_description(), CONTENT_WIDTH),
        truncate_str(result.image_url.as_deref().unwrap_or("N/A"), CONTENT_WIDTH),
        truncate_str(result.link_url.as_deref().unwrap_or("N/A"), CONTENT_WIDTH),
        result.theme_color,
        horizontal_line,
    );
}

pub fn log_error_card<E: Display + std::error::Error>(url: &str, error: &E) {
    const CARD_WIDTH: usize = 70;
    const CONTENT_WIDTH: usize = CARD_WIDTH - 10;

    let top_bottom = create_separator(CARD_WIDTH - 2, '═');
    let middle = create_separator(CARD_WIDTH - 2, '─');

    let mut error_details = error.to_string();
    if let Some(source) = error.source() {
        error_details = format!("{error_details} (caused by: {source})");
    }

    error!(
        "\n╔═{}═╗\n\
         ║ URL:   {:<width$} ║\n\
         ║{}║\n\
         ║ Error: {:<width$} ║\n\
         ╚═{}═╝",
        top_bottom,
        truncate_str(url, CONTENT_WIDTH),
        middle,
        truncate_str(&error_details, CONTENT_WIDTH),
        top_bottom,
        width = CONTENT_WIDTH
    );
}

/// Installs the global subscriber. `RUST_LOG` takes precedence over
/// `config.log_level`.
#[cfg(feature = "logging")]
pub fn setup_logging(config: LogConfig) -> std::io::Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let mut layers = Vec::new();

    if config.console_output {
        let console_layer = subscriber_fmt::layer()
            .with_target(true)
            .with_line_number(true)
            .with_file(true)
            .compact();
        layers.push(console_layer.boxed());
    }

    if config.file_output {
        std::fs::create_dir_all(&config.log_dir)?;

        let file_appender =
            RollingFileAppender::new(Rotation::DAILY, &config.log_dir, "link-preview-card.log");

        let file_layer = subscriber_fmt::layer()
            .with_ansi(false)
            .with_target(true)
            .with_line_number(true)
            .with_file(true)
            .with_writer(file_appender);

        layers.push(file_layer.boxed());
    }

    tracing_subscriber::registry()
        .with(env_filter)
        .with(layers)
        .try_init()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e))?;

    debug!("Logging system initialized with config: {:?}", config);
    Ok(())
}

/// Scoped subscriber that captures crate events at `level` through the test
/// writer. The previous default subscriber comes back on drop.
#[cfg(feature = "logging")]
pub struct LogLevelGuard {
    _guard: tracing::dispatcher::DefaultGuard,
}

#[cfg(feature = "logging")]
impl LogLevelGuard {
    pub fn set_level(level: &str) -> Self {
        let filter = EnvFilter::new(format!("link_preview_card={level}"));
        let subscriber = tracing_subscriber::registry().with(filter).with(
            subscriber_fmt::layer()
                .with_test_writer()
                .with_target(true)
                .compact(),
        );

        LogLevelGuard {
            _guard: tracing::subscriber::set_default(subscriber),
        }
    }
}
