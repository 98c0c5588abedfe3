//! # arxiv-fetch
//!
//! Fetch a single arXiv paper by ID or URL, name the file after its title,
//! and stream the PDF to disk with progress feedback.
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`models`]: Core data structures (PaperReference, TitleResult, etc.)
//! - [`resolver`]: Loose input to canonical ID and derived URLs
//! - [`title`]: Abstract-page scrape with ordered fallback strategies
//! - [`namer`]: File-system-safe name derivation
//! - [`download`]: Streaming byte copy with progress callbacks
//! - [`fetcher`]: Pipeline orchestration and the one-call entry point
//! - [`config`]: Configuration management
//!
//! ## Example
//!
//! ```rust,no_run
//! use arxiv_fetch::download_arxiv_paper;
//!
//! # #[tokio::main]
//! # async fn main() {
//! if let Some(path) = download_arxiv_paper("2505.14030", None, ".").await {
//!     println!("saved {}", path.display());
//! }
//! # }
//! ```

pub mod config;
pub mod download;
pub mod error;
pub mod fetcher;
pub mod models;
pub mod namer;
pub mod progress;
pub mod resolver;
pub mod title;
pub mod ui;
pub mod utils;

// Re-export commonly used types
pub use error::FetchError;
pub use fetcher::{download_arxiv_paper, ArxivFetcher};
pub use models::{DownloadOutcome, DownloadProgress, PaperReference, SaveTarget, TitleResult};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
