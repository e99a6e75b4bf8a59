mod bulk;


pub use bulk::{BulkDownloader, DownloadOutcome, DownloadTask, DownloaderConfig};
