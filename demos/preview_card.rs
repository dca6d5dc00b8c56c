use clap::{Arg, ArgAction, Command};
use colored::Colorize;
use link_preview_card::{
    log_error_card, log_preview_card, CardVariant, FetcherConfig, LinkPreviewCard, MetadataFetcher,
    MetadataResolver, PreviewStatus,
};
use std::error::Error;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let matches = Command::new("preview_card")
        .about("Resolve link preview cards through the metadata API")
        .arg(Arg::new("urls").required(true).num_args(1..))
        .arg(
            Arg::new("endpoint")
                .long("endpoint")
                .help("Metadata API endpoint (defaults to LINK_PREVIEW_ENDPOINT or the public API)"),
        )
        .arg(
            Arg::new("minimal")
                .long("minimal")
                .action(ArgAction::SetTrue)
                .help("Render the minimal card variant"),
        )
        .arg(
            Arg::new("html")
                .long("html")
                .action(ArgAction::SetTrue)
                .help("Print the rendered card markup"),
        )
        .get_matches();

    #[cfg(feature = "logging")]
    link_preview_card::setup_logging(link_preview_card::LogConfig::default())?;

    let mut config = FetcherConfig::from_env();
    if let Some(endpoint) = matches.get_one::<String>("endpoint") {
        config = config.with_endpoint(endpoint.as_str());
    }

    let fetcher = match MetadataFetcher::new_with_config(config) {
        Ok(fetcher) => fetcher,
        Err(e) => {
            log_error_card("<client setup>", &e);
            return Err(e.into());
        }
    };

    let variant = if matches.get_flag("minimal") {
        CardVariant::Minimal
    } else {
        CardVariant::Themed
    };

    println!("{}", "Link Preview Cards".bold().green());
    println!("{}", "==================".green());

    let resolver = MetadataResolver::new(fetcher);
    for url in matches.get_many::<String>("urls").into_iter().flatten() {
        let mut card = LinkPreviewCard::new(resolver.clone(), variant);
        card.connect(Some(url.as_str()));

        let Some(result) = card.settle().await.cloned() else {
            continue;
        };
        log_preview_card(&result, url);

        let status = match result.status {
            PreviewStatus::Success => "success".green(),
            PreviewStatus::Fallback => "fallback".yellow(),
            PreviewStatus::Loading => "loading".normal(),
        };

        println!("\n{} [{}]", url.bold().blue(), status);
        println!("{}: {}", "Title".bold(), result.display_title());
        println!("{}: {}", "Description".bold(), result.display_description());
        if let Some(image) = &result.image_url {
            println!("{}: {}", "Image".bold(), image);
        }
        if let Some(link) = &result.link_url {
            println!("{}: {}", "Link".bold(), link);
        }
        println!("{}: {}", "Theme".bold(), result.theme_color);

        if matches.get_flag("html") {
            println!("{}", card.html());
        }
    }

    Ok(())
}
