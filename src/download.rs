//! Streaming PDF download.
//!
//! The response body is copied to disk chunk by chunk as the transport
//! yields it; the whole payload is never held in memory. On failure the
//! partially written file is left in place for inspection.

use futures_util::StreamExt;
use std::path::PathBuf;
use tokio::io::AsyncWriteExt;

use crate::config::FetchConfig;
use crate::error::FetchError;
use crate::models::{DownloadProgress, SaveTarget};
use crate::progress::ProgressObserver;
use crate::utils::HttpClient;

/// Download a PDF to the given target, reporting each chunk to `observer`.
///
/// Returns the canonicalized path of the written file. The destination
/// directory is created if absent; an existing file at the target path is
/// overwritten.
pub async fn download_pdf(
    client: &HttpClient,
    pdf_url: &str,
    target: &SaveTarget,
    observer: &dyn ProgressObserver,
    config: &FetchConfig,
) -> Result<PathBuf, FetchError> {
    tokio::fs::create_dir_all(&target.dir).await?;

    let response = client
        .get(pdf_url)
        .header("Accept", "application/pdf")
        .timeout(config.download_timeout())
        .send()
        .await
        .map_err(|e| FetchError::Network(format!("failed to request {}: {}", pdf_url, e)))?;

    if !response.status().is_success() {
        return Err(FetchError::Status(response.status()));
    }

    let total_bytes = response.content_length().unwrap_or(0);
    observer.on_start(total_bytes);

    let mut file = tokio::fs::File::create(&target.path).await?;
    let mut stream = response.bytes_stream();
    let mut bytes_downloaded: u64 = 0;

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(|e| {
            FetchError::Network(format!(
                "stream interrupted after {} bytes: {}",
                bytes_downloaded, e
            ))
        })?;

        file.write_all(&chunk).await?;
        bytes_downloaded += chunk.len() as u64;
        observer.on_chunk(DownloadProgress {
            bytes_downloaded,
            total_bytes,
        });
    }

    file.flush().await?;
    drop(file);

    observer.on_finish(DownloadProgress {
        bytes_downloaded,
        total_bytes,
    });

    tracing::debug!(
        path = %target.path.display(),
        bytes = bytes_downloaded,
        "download complete"
    );

    Ok(tokio::fs::canonicalize(&target.path).await?)
}
