//! Integration tests for arxiv-fetch
//!
//! These tests run the full pipeline against a local mock server: input
//! resolution, title scraping with its fallbacks, file naming, and the
//! streamed download.

use std::sync::Mutex;

use arxiv_fetch::config::{Endpoints, FetchConfig};
use arxiv_fetch::models::DownloadProgress;
use arxiv_fetch::progress::ProgressObserver;
use arxiv_fetch::{ArxivFetcher, FetchError};

const PAPER_ID: &str = "2505.14030";

const ABS_PAGE: &str = r#"<html>
<head><title>arXiv: A Survey of Quantum Things [quant-ph]</title></head>
<body>
<h1 class="title mathjax"><span class="descriptor">Title:</span>A Survey of Quantum Things</h1>
</body></html>"#;

const PDF_BYTES: &[u8] = b"%PDF-1.5\nfake paper body\n%%EOF";

fn test_config(server_url: &str) -> FetchConfig {
    FetchConfig {
        endpoints: Endpoints {
            abs_base: format!("{}/abs", server_url),
            pdf_base: format!("{}/pdf", server_url),
        },
        title_timeout_secs: 2,
        download_timeout_secs: 5,
        ..FetchConfig::default()
    }
}

/// Observer that records every byte count it sees.
#[derive(Default)]
struct RecordingProgress {
    started_with: Mutex<u64>,
    chunks: Mutex<Vec<u64>>,
    finished_at: Mutex<u64>,
}

impl ProgressObserver for RecordingProgress {
    fn on_start(&self, total_bytes: u64) {
        *self.started_with.lock().unwrap() = total_bytes;
    }

    fn on_chunk(&self, progress: DownloadProgress) {
        self.chunks.lock().unwrap().push(progress.bytes_downloaded);
    }

    fn on_finish(&self, progress: DownloadProgress) {
        *self.finished_at.lock().unwrap() = progress.bytes_downloaded;
    }
}

#[tokio::test]
async fn downloads_and_names_after_heading_title() {
    let mut server = mockito::Server::new_async().await;
    let _abs = server
        .mock("GET", "/abs/2505.14030")
        .with_status(200)
        .with_body(ABS_PAGE)
        .create_async()
        .await;
    let _pdf = server
        .mock("GET", "/pdf/2505.14030")
        .with_status(200)
        .with_body(PDF_BYTES)
        .create_async()
        .await;

    let dir = tempfile::tempdir().unwrap();
    let fetcher = ArxivFetcher::with_config(test_config(&server.url()));

    let path = fetcher.fetch(PAPER_ID, None, dir.path()).await.unwrap();

    assert_eq!(
        path.file_name().unwrap().to_str().unwrap(),
        "A Survey of Quantum Things.pdf"
    );
    assert_eq!(std::fs::read(&path).unwrap(), PDF_BYTES);
}

#[tokio::test]
async fn falls_back_to_paper_id_when_abstract_unavailable() {
    let mut server = mockito::Server::new_async().await;
    let _abs = server
        .mock("GET", "/abs/2505.14030")
        .with_status(500)
        .create_async()
        .await;
    let _pdf = server
        .mock("GET", "/pdf/2505.14030")
        .with_status(200)
        .with_body(PDF_BYTES)
        .create_async()
        .await;

    let dir = tempfile::tempdir().unwrap();
    let fetcher = ArxivFetcher::with_config(test_config(&server.url()));

    let path = fetcher.fetch(PAPER_ID, None, dir.path()).await.unwrap();

    // A failed title lookup degrades the name, not the outcome
    assert_eq!(
        path.file_name().unwrap().to_str().unwrap(),
        "arxiv_2505.14030.pdf"
    );
    assert_eq!(std::fs::read(&path).unwrap(), PDF_BYTES);
}

#[tokio::test]
async fn explicit_filename_override_wins() {
    let mut server = mockito::Server::new_async().await;
    let _abs = server
        .mock("GET", "/abs/2505.14030")
        .with_status(200)
        .with_body(ABS_PAGE)
        .create_async()
        .await;
    let _pdf = server
        .mock("GET", "/pdf/2505.14030")
        .with_status(200)
        .with_body(PDF_BYTES)
        .create_async()
        .await;

    let dir = tempfile::tempdir().unwrap();
    let fetcher = ArxivFetcher::with_config(test_config(&server.url()));

    let path = fetcher
        .fetch(PAPER_ID, Some("quantum_computing_survey"), dir.path())
        .await
        .unwrap();

    assert_eq!(
        path.file_name().unwrap().to_str().unwrap(),
        "quantum_computing_survey.pdf"
    );
}

#[tokio::test]
async fn accepts_pdf_shaped_reference() {
    let mut server = mockito::Server::new_async().await;
    let _abs = server
        .mock("GET", "/abs/2505.14030")
        .with_status(200)
        .with_body(ABS_PAGE)
        .create_async()
        .await;
    let _pdf = server
        .mock("GET", "/pdf/2505.14030")
        .with_status(200)
        .with_body(PDF_BYTES)
        .create_async()
        .await;

    let dir = tempfile::tempdir().unwrap();
    let fetcher = ArxivFetcher::with_config(test_config(&server.url()));

    // Trailing .pdf is stripped; the download address is rebuilt from the
    // template rather than trusted from the input
    let reference = format!("{}/pdf/{}.pdf", server.url(), PAPER_ID);
    let path = fetcher.fetch(&reference, None, dir.path()).await.unwrap();

    assert_eq!(std::fs::read(&path).unwrap(), PDF_BYTES);
}

#[tokio::test]
async fn accepts_abstract_url_reference() {
    let mut server = mockito::Server::new_async().await;
    let _abs = server
        .mock("GET", "/abs/2505.14030")
        .with_status(200)
        .with_body(ABS_PAGE)
        .create_async()
        .await;
    let _pdf = server
        .mock("GET", "/pdf/2505.14030")
        .with_status(200)
        .with_body(PDF_BYTES)
        .create_async()
        .await;

    let dir = tempfile::tempdir().unwrap();
    let fetcher = ArxivFetcher::with_config(test_config(&server.url()));

    let reference = format!("{}/abs/{}", server.url(), PAPER_ID);
    let path = fetcher.fetch(&reference, None, dir.path()).await.unwrap();

    assert_eq!(
        path.file_name().unwrap().to_str().unwrap(),
        "A Survey of Quantum Things.pdf"
    );
}

#[tokio::test]
async fn page_title_used_when_heading_missing() {
    let mut server = mockito::Server::new_async().await;
    let _abs = server
        .mock("GET", "/abs/2505.14030")
        .with_status(200)
        .with_body("<html><head><title>arXiv: Backup Name [cs.LG]</title></head></html>")
        .create_async()
        .await;
    let _pdf = server
        .mock("GET", "/pdf/2505.14030")
        .with_status(200)
        .with_body(PDF_BYTES)
        .create_async()
        .await;

    let dir = tempfile::tempdir().unwrap();
    let fetcher = ArxivFetcher::with_config(test_config(&server.url()));

    let path = fetcher.fetch(PAPER_ID, None, dir.path()).await.unwrap();

    assert_eq!(
        path.file_name().unwrap().to_str().unwrap(),
        "Backup Name.pdf"
    );
}

#[tokio::test]
async fn download_failure_is_an_error_not_a_panic() {
    let mut server = mockito::Server::new_async().await;
    let _abs = server
        .mock("GET", "/abs/2505.14030")
        .with_status(200)
        .with_body(ABS_PAGE)
        .create_async()
        .await;
    let _pdf = server
        .mock("GET", "/pdf/2505.14030")
        .with_status(404)
        .create_async()
        .await;

    let dir = tempfile::tempdir().unwrap();
    let fetcher = ArxivFetcher::with_config(test_config(&server.url()));

    let err = fetcher.fetch(PAPER_ID, None, dir.path()).await.unwrap_err();
    assert!(matches!(err, FetchError::Status(status) if status.as_u16() == 404));

    // The status is checked before the file is created
    assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[tokio::test]
async fn invalid_reference_fails_before_any_request() {
    let fetcher = ArxivFetcher::with_config(test_config("http://127.0.0.1:1"));

    let dir = tempfile::tempdir().unwrap();
    let err = fetcher.fetch("   ", None, dir.path()).await.unwrap_err();
    assert!(matches!(err, FetchError::InvalidReference(_)));
}

#[tokio::test]
async fn overwrites_existing_file_silently() {
    let mut server = mockito::Server::new_async().await;
    let _abs = server
        .mock("GET", "/abs/2505.14030")
        .with_status(500)
        .expect(2)
        .create_async()
        .await;
    let _pdf = server
        .mock("GET", "/pdf/2505.14030")
        .with_status(200)
        .with_body(PDF_BYTES)
        .expect(2)
        .create_async()
        .await;

    let dir = tempfile::tempdir().unwrap();
    let fetcher = ArxivFetcher::with_config(test_config(&server.url()));

    let first = fetcher.fetch(PAPER_ID, None, dir.path()).await.unwrap();
    let second = fetcher.fetch(PAPER_ID, None, dir.path()).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(std::fs::read(&second).unwrap(), PDF_BYTES);
}

#[tokio::test]
async fn observer_sees_monotonic_counts_and_final_size() {
    let mut server = mockito::Server::new_async().await;
    let _abs = server
        .mock("GET", "/abs/2505.14030")
        .with_status(200)
        .with_body(ABS_PAGE)
        .create_async()
        .await;
    let body: Vec<u8> = (0..=255u8).cycle().take(64 * 1024).collect();
    let _pdf = server
        .mock("GET", "/pdf/2505.14030")
        .with_status(200)
        .with_body(&body)
        .create_async()
        .await;

    let dir = tempfile::tempdir().unwrap();
    let fetcher = ArxivFetcher::with_config(test_config(&server.url()));
    let observer = RecordingProgress::default();

    let path = fetcher
        .fetch_with_observer(PAPER_ID, None, dir.path(), &observer)
        .await
        .unwrap();

    let written = std::fs::metadata(&path).unwrap().len();
    assert_eq!(written, body.len() as u64);

    assert_eq!(*observer.started_with.lock().unwrap(), body.len() as u64);
    assert_eq!(*observer.finished_at.lock().unwrap(), written);

    let chunks = observer.chunks.lock().unwrap();
    assert!(!chunks.is_empty());
    assert!(chunks.windows(2).all(|w| w[0] <= w[1]));
    assert_eq!(*chunks.last().unwrap(), written);
}

#[tokio::test]
async fn unreachable_pdf_host_is_a_network_error() {
    let mut server = mockito::Server::new_async().await;
    let _abs = server
        .mock("GET", "/abs/2505.14030")
        .with_status(500)
        .create_async()
        .await;

    let config = FetchConfig {
        endpoints: Endpoints {
            abs_base: format!("{}/abs", server.url()),
            // Nothing listens on port 1
            pdf_base: "http://127.0.0.1:1/pdf".to_string(),
        },
        title_timeout_secs: 2,
        download_timeout_secs: 2,
        ..FetchConfig::default()
    };

    let dir = tempfile::tempdir().unwrap();
    let fetcher = ArxivFetcher::with_config(config);

    let err = fetcher.fetch(PAPER_ID, None, dir.path()).await.unwrap_err();
    assert!(matches!(err, FetchError::Network(_)));
}
