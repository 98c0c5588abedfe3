//! Fetch pipeline: resolve, title lookup, naming, download.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::FetchConfig;
use crate::error::FetchError;
use crate::models::{PaperReference, SaveTarget, TitleResult};
use crate::progress::{ConsoleProgress, NullProgress, ProgressObserver};
use crate::utils::HttpClient;
use crate::{download, namer, resolver, title, ui};

/// Single-paper arXiv fetcher
///
/// Holds the shared HTTP client and configuration. The pipeline steps are
/// exposed individually (`resolve`, `fetch_title`, `download`) so callers
/// can report intermediate results; [`ArxivFetcher::fetch`] composes them.
#[derive(Debug, Clone)]
pub struct ArxivFetcher {
    client: Arc<HttpClient>,
    config: FetchConfig,
}

impl ArxivFetcher {
    /// Create a fetcher with default configuration
    pub fn new() -> Self {
        Self::with_config(FetchConfig::default())
    }

    /// Create a fetcher with a custom configuration (e.g. alternate base
    /// URLs or timeouts)
    pub fn with_config(config: FetchConfig) -> Self {
        let client = Arc::new(HttpClient::with_user_agent(&config.user_agent));
        Self { client, config }
    }

    /// Create with an existing HTTP client (for testing)
    pub fn with_client(client: Arc<HttpClient>, config: FetchConfig) -> Self {
        Self { client, config }
    }

    /// The active configuration
    pub fn config(&self) -> &FetchConfig {
        &self.config
    }

    /// Resolve a loose reference into a paper reference. Pure, no network.
    pub fn resolve(&self, reference: &str) -> Result<PaperReference, FetchError> {
        resolver::resolve(reference, &self.config.endpoints)
    }

    /// Look up the paper title from its abstract page. Never fails;
    /// degrades to `arxiv_<id>` on any scrape or transport problem.
    pub async fn fetch_title(&self, paper: &PaperReference) -> TitleResult {
        title::fetch_title(&self.client, &paper.abs_url, &self.config).await
    }

    /// Stream the PDF to the target, reporting progress to `observer`.
    pub async fn download(
        &self,
        paper: &PaperReference,
        target: &SaveTarget,
        observer: &dyn ProgressObserver,
    ) -> Result<PathBuf, FetchError> {
        tracing::info!(url = %paper.pdf_url, path = %target.path.display(), "downloading PDF");
        download::download_pdf(&self.client, &paper.pdf_url, target, observer, &self.config).await
    }

    /// Run the whole pipeline for a loose reference.
    ///
    /// Title failures only degrade the file name; the returned error can
    /// stem from reference resolution or from the download itself.
    pub async fn fetch(
        &self,
        reference: &str,
        filename: Option<&str>,
        save_dir: impl AsRef<Path>,
    ) -> Result<PathBuf, FetchError> {
        self.fetch_with_observer(reference, filename, save_dir, &NullProgress)
            .await
    }

    /// [`ArxivFetcher::fetch`] with a caller-supplied progress observer.
    pub async fn fetch_with_observer(
        &self,
        reference: &str,
        filename: Option<&str>,
        save_dir: impl AsRef<Path>,
        observer: &dyn ProgressObserver,
    ) -> Result<PathBuf, FetchError> {
        let paper = self.resolve(reference)?;

        let title = self.fetch_title(&paper).await;
        tracing::info!(title = %title.text, origin = %title.origin, "resolved title");

        let stem = namer::build_file_name(&title, filename, &paper.id);
        let target = SaveTarget::new(save_dir.as_ref(), stem);

        self.download(&paper, &target, observer).await
    }
}

impl Default for ArxivFetcher {
    fn default() -> Self {
        Self::new()
    }
}

/// Download one paper, printing progress and errors to the terminal.
///
/// This is the library's one-call surface: returns the saved path, or
/// `None` after printing the failure cause. It never panics on transport
/// or status errors.
pub async fn download_arxiv_paper(
    reference: &str,
    filename: Option<&str>,
    save_dir: &str,
) -> Option<PathBuf> {
    let fetcher = ArxivFetcher::new();
    let progress = ConsoleProgress::new(fetcher.config().progress_step_bytes);

    match fetcher
        .fetch_with_observer(reference, filename, save_dir, &progress)
        .await
    {
        Ok(path) => {
            ui::print_success(&format!("saved to {}", path.display()));
            Some(path)
        }
        Err(err) => {
            ui::print_error(&format!("download failed: {}", err));
            None
        }
    }
}
