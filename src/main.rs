mod config;
mod downloader;
mod moderation;
mod services;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Settings;
use crate::downloader::{BulkDownloader, DownloaderConfig};
use crate::moderation::{
    BlipCaptionProvider, CaptionOptions, Captioner, ClassifierOptions, GroqChatProvider,
    ImageAugmentedClassifier, RetryPolicy, ReviewClassifier, ReviewRecord,
};
use crate::services::ModerationAgent;

#[derive(Parser, Debug)]
#[command(name = "revlens", version, about = "Moderation pipeline for location reviews")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Bulk-download review images from a CSV with a `urls` column
    Download {
        /// CSV file to read
        csv: PathBuf,
        /// Cap on the number of URLs taken
        #[arg(long)]
        limit: Option<usize>,
        /// Output directory override
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Classify every review in a CSV, printing one JSON record per line
    Classify {
        /// CSV file with category, rating, text and place_name columns
        csv: PathBuf,
    },
    /// Classify a single review together with an attached image
    ClassifyImage {
        /// Local image file
        image: PathBuf,
        /// Business category (place type)
        #[arg(long)]
        category: String,
        /// Review text
        #[arg(long)]
        text: String,
        /// Star rating
        #[arg(long)]
        rating: Option<f64>,
        /// Business name
        #[arg(long)]
        place_name: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let _guard = init_tracing();

    let settings = Settings::load().context("Failed to load settings")?;
    let cli = Cli::parse();

    match cli.command {
        Commands::Download { csv, limit, out } => run_download(&settings, &csv, limit, out).await,
        Commands::Classify { csv } => run_classify(&settings, &csv).await,
        Commands::ClassifyImage {
            image,
            category,
            text,
            rating,
            place_name,
        } => run_classify_image(&settings, &image, category, text, rating, place_name).await,
    }
}

/// Install the stdout + rolling-file subscriber
fn init_tracing() -> tracing_appender::non_blocking::WorkerGuard {
    let file_appender = tracing_appender::rolling::daily("logs", "revlens.log");
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_ansi(false)
                .with_writer(file_writer),
        )
        .init();

    guard
}

async fn run_download(
    settings: &Settings,
    csv: &PathBuf,
    limit: Option<usize>,
    out: Option<PathBuf>,
) -> anyhow::Result<()> {
    let limit = limit.unwrap_or(settings.download.url_limit);
    let urls = services::load_urls(csv, Some(limit))
        .with_context(|| format!("Failed to load URLs from {}", csv.display()))?;

    info!("Downloading {} images", urls.len());

    let config = DownloaderConfig {
        output_dir: out.unwrap_or_else(|| settings.download.output_dir.clone()),
        timeout: Duration::from_secs(settings.download.timeout_secs),
        max_workers: settings.download.max_workers,
    };

    let downloader = BulkDownloader::with_config(config);
    let outcomes = downloader.download_all(&urls).await?;

    let saved = outcomes.iter().filter(|o| o.is_saved()).count();
    println!("Downloaded {saved} images.");

    Ok(())
}

async fn run_classify(settings: &Settings, csv: &PathBuf) -> anyhow::Result<()> {
    let reviews = services::load_reviews(csv)
        .with_context(|| format!("Failed to load reviews from {}", csv.display()))?;

    let agent = ModerationAgent::new(build_classifier(settings)?);
    let results = agent.moderate_batch(&reviews).await;

    for result in &results {
        println!("{}", serde_json::to_string(result)?);
    }

    Ok(())
}

async fn run_classify_image(
    settings: &Settings,
    image: &PathBuf,
    category: String,
    text: String,
    rating: Option<f64>,
    place_name: Option<String>,
) -> anyhow::Result<()> {
    let mut review = ReviewRecord::new(category, text).with_rating(rating);
    if let Some(place_name) = place_name {
        review = review.with_place_name(place_name);
    }

    let captioner = Captioner::new(
        Arc::new(build_caption_provider(settings)),
        CaptionOptions {
            max_new_tokens: settings.caption.max_new_tokens,
            max_chars: settings.caption.max_chars,
        },
    );
    let augmented = ImageAugmentedClassifier::new(captioner, build_classifier(settings)?);

    let agent = ModerationAgent::new(build_classifier(settings)?).with_augmented(augmented);
    let result = agent.moderate_review_with_image(&review, image).await?;

    println!("{}", serde_json::to_string_pretty(&result)?);

    Ok(())
}

/// Build the text classifier from settings, reading credentials from the
/// environment
fn build_classifier(settings: &Settings) -> anyhow::Result<ReviewClassifier> {
    let provider = GroqChatProvider::from_env()?
        .with_model(settings.chat.model.clone())
        .with_max_tokens(settings.chat.max_tokens);

    let retry = RetryPolicy::new(settings.chat.max_retries)
        .with_base_delay(Duration::from_millis(settings.chat.retry_base_ms));

    let options = ClassifierOptions::default()
        .with_max_text_chars(settings.chat.max_text_chars)
        .with_retry(retry);

    Ok(ReviewClassifier::new(Arc::new(provider), options))
}

/// Build the captioning provider, picking up an optional `HF_API_TOKEN`
fn build_caption_provider(settings: &Settings) -> BlipCaptionProvider {
    let provider = BlipCaptionProvider::new(settings.caption.model.clone());
    match std::env::var("HF_API_TOKEN") {
        Ok(token) if !token.is_empty() => provider.with_api_token(token),
        _ => provider,
    }
}
