//! Asset downloader
//!
//! Streams discovered documents and images to the output directory. A
//! failed download is reported back as an outcome, never as a crawl-ending
//! error.

use crate::url::CrawlUrl;
use futures::StreamExt;
use reqwest::Client;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;

/// Result of one asset download
#[derive(Debug)]
pub enum DownloadOutcome {
    /// Asset was written to disk
    Saved {
        /// Where the file landed
        path: PathBuf,
    },

    /// Asset could not be saved
    Failed {
        /// What went wrong
        cause: String,
    },
}

/// Streams assets to files in a fixed output directory
pub struct Downloader {
    client: Client,
    output_dir: PathBuf,
}

impl Downloader {
    /// Creates a downloader, ensuring the output directory exists
    pub fn new(client: Client, output_dir: &Path) -> std::io::Result<Self> {
        std::fs::create_dir_all(output_dir)?;
        Ok(Self {
            client,
            output_dir: output_dir.to_path_buf(),
        })
    }

    /// Downloads one asset, streaming the body chunk-by-chunk to disk
    ///
    /// The destination filename is the URL's final path segment. Two assets
    /// with the same final segment overwrite each other; the store does not
    /// rename.
    pub async fn download(&self, url: &CrawlUrl) -> DownloadOutcome {
        let Some(file_name) = url.file_name() else {
            return DownloadOutcome::Failed {
                cause: "URL has no final path segment to name the file after".to_string(),
            };
        };
        let destination = self.output_dir.join(file_name);

        let response = match self.client.get(url.as_str()).send().await {
            Ok(r) => r,
            Err(e) => {
                return DownloadOutcome::Failed {
                    cause: e.to_string(),
                }
            }
        };

        if !response.status().is_success() {
            return DownloadOutcome::Failed {
                cause: format!("HTTP {}", response.status().as_u16()),
            };
        }

        match write_stream(response, &destination).await {
            Ok(()) => DownloadOutcome::Saved { path: destination },
            Err(cause) => {
                // Don't leave a truncated file behind.
                let _ = tokio::fs::remove_file(&destination).await;
                DownloadOutcome::Failed { cause }
            }
        }
    }
}

/// Writes a response body to a file without buffering it whole
async fn write_stream(response: reqwest::Response, destination: &Path) -> Result<(), String> {
    let mut file = tokio::fs::File::create(destination)
        .await
        .map_err(|e| format!("create {}: {}", destination.display(), e))?;

    let mut stream = response.bytes_stream();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| format!("read body: {}", e))?;
        file.write_all(&chunk)
            .await
            .map_err(|e| format!("write {}: {}", destination.display(), e))?;
    }

    file.flush()
        .await
        .map_err(|e| format!("flush {}: {}", destination.display(), e))
}
