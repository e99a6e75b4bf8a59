use anyhow::Result;
use futures_util::{StreamExt, stream};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tracing::{info, warn};

/// Fallback extension when the URL suffix is missing or implausible
const DEFAULT_EXTENSION: &str = ".jpg";

/// Longest URL suffix (dot included) accepted as a file extension
const MAX_EXTENSION_LEN: usize = 5;

/// Downloader configuration
#[derive(Debug, Clone)]
pub struct DownloaderConfig {
    /// Directory the images are written under
    pub output_dir: PathBuf,
    /// Per-request timeout
    pub timeout: Duration,
    /// Upper bound on concurrent fetches (further capped by the
    /// available parallelism)
    pub max_workers: usize,
}

impl Default for DownloaderConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("image"),
            timeout: Duration::from_secs(10),
            max_workers: 8,
        }
    }
}

/// A single URL with its destination path
#[derive(Debug, Clone)]
pub struct DownloadTask {
    pub url: String,
    pub dest: PathBuf,
}

/// Per-task result: the skip-and-log policy as an explicit type
#[derive(Debug)]
pub enum DownloadOutcome {
    /// File written to the given path
    Saved(PathBuf),
    /// Fetch or write failed; the batch continues
    Failed { url: String, reason: String },
}

impl DownloadOutcome {
    pub fn is_saved(&self) -> bool {
        matches!(self, Self::Saved(_))
    }
}

/// Bulk image downloader with a bounded worker pool
pub struct BulkDownloader {
    client: reqwest::Client,
    config: DownloaderConfig,
}

impl BulkDownloader {
    /// Create a downloader with default settings
    pub fn new() -> Self {
        Self::with_config(DownloaderConfig::default())
    }

    /// Create a downloader with custom configuration
    pub fn with_config(config: DownloaderConfig) -> Self {
        let client = reqwest::Client::builder()
            .user_agent("revlens/0.1.0")
            .timeout(config.timeout)
            .build()
            .expect("Failed to build HTTP client");

        Self { client, config }
    }

    /// Assign each URL its deterministic destination path
    pub fn plan(&self, urls: &[String]) -> Vec<DownloadTask> {
        urls.iter()
            .enumerate()
            .map(|(index, url)| DownloadTask {
                url: url.clone(),
                dest: save_path(&self.config.output_dir, index, url),
            })
            .collect()
    }

    /// Download every URL, bounded by the worker pool
    ///
    /// Creates the output directory, fans the fetches out across
    /// min(`max_workers`, available parallelism) workers, and resolves once
    /// every task has settled. Outcomes preserve task order; per-item
    /// failures are logged and never abort the batch.
    pub async fn download_all(&self, urls: &[String]) -> Result<Vec<DownloadOutcome>> {
        tokio::fs::create_dir_all(&self.config.output_dir).await?;

        let tasks = self.plan(urls);
        let concurrency = self.config.max_workers.min(num_cpus::get()).max(1);

        let outcomes: Vec<DownloadOutcome> = stream::iter(tasks)
            .map(|task| self.fetch(task))
            .buffered(concurrency)
            .collect()
            .await;

        let saved = outcomes.iter().filter(|o| o.is_saved()).count();
        info!("Downloaded {} of {} images", saved, outcomes.len());

        Ok(outcomes)
    }

    /// Fetch one task, folding any failure into the outcome
    async fn fetch(&self, task: DownloadTask) -> DownloadOutcome {
        match self.fetch_to_disk(&task).await {
            Ok(path) => {
                info!("Downloaded: {}", task.url);
                DownloadOutcome::Saved(path)
            }
            Err(err) => {
                warn!("Failed: {} ({})", task.url, err);
                DownloadOutcome::Failed {
                    url: task.url,
                    reason: err.to_string(),
                }
            }
        }
    }

    /// Download a single image from a URL to its destination path
    async fn fetch_to_disk(&self, task: &DownloadTask) -> Result<PathBuf> {
        let response = self.client.get(&task.url).send().await?;
        if !response.status().is_success() {
            return Err(anyhow::anyhow!(
                "Failed to download image: {}",
                response.status()
            ));
        }

        let bytes = response.bytes().await?;

        if let Some(parent) = task.dest.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        let mut file = tokio::fs::File::create(&task.dest).await?;
        file.write_all(&bytes).await?;

        Ok(task.dest.clone())
    }
}

impl Default for BulkDownloader {
    fn default() -> Self {
        Self::new()
    }
}

/// Deterministic save path for the URL at the given index
pub fn save_path(output_dir: &Path, index: usize, url: &str) -> PathBuf {
    output_dir.join(format!("img_{index}{}", infer_extension(url)))
}

/// Extension sniffed from the URL suffix, `.jpg` when missing or implausible
///
/// The suffix counts with its dot; anything longer than 5 characters is
/// treated as not an extension. Query and fragment are ignored.
pub(crate) fn infer_extension(url: &str) -> String {
    let path = url
        .split(['?', '#'])
        .next()
        .unwrap_or(url);

    let ext = path
        .rsplit('/')
        .next()
        .and_then(|name| {
            let (stem, ext) = name.rsplit_once('.')?;
            if stem.is_empty() { None } else { Some(ext) }
        })
        .unwrap_or_default();

    if ext.is_empty() || ext.len() + 1 > MAX_EXTENSION_LEN {
        DEFAULT_EXTENSION.to_string()
    } else {
        format!(".{ext}")
    }
}
