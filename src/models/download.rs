//! Models for title lookup and download operations.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Where a paper title came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TitleOrigin {
    /// Extracted from the abstract page's title heading
    Heading,
    /// Extracted from the HTML `<title>` element
    PageTitle,
    /// Synthesized from the paper ID after scraping failed
    PaperId,
}

impl TitleOrigin {
    /// Returns the display name of the origin
    pub fn name(&self) -> &'static str {
        match self {
            TitleOrigin::Heading => "heading",
            TitleOrigin::PageTitle => "page title",
            TitleOrigin::PaperId => "paper ID",
        }
    }
}

impl std::fmt::Display for TitleOrigin {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Outcome of a title lookup
///
/// A lookup always produces a usable value: when scraping fails the text
/// degrades to `arxiv_<id>` rather than aborting the operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TitleResult {
    /// Title text (or the synthesized placeholder)
    pub text: String,

    /// Which extraction tier produced the text
    pub origin: TitleOrigin,
}

impl TitleResult {
    /// Create a title result from a given tier
    pub fn new(text: impl Into<String>, origin: TitleOrigin) -> Self {
        Self {
            text: text.into(),
            origin,
        }
    }

    /// Create the placeholder result for a paper ID
    pub fn from_paper_id(id: &str) -> Self {
        Self {
            text: format!("arxiv_{}", id),
            origin: TitleOrigin::PaperId,
        }
    }

    /// Whether the text is a synthesized placeholder
    pub fn is_fallback(&self) -> bool {
        self.origin == TitleOrigin::PaperId
    }
}

/// Destination of a download on disk
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveTarget {
    /// Directory the file is written into (created if absent)
    pub dir: PathBuf,

    /// Sanitized file stem, without the `.pdf` extension
    pub file_name: String,

    /// Full destination path
    pub path: PathBuf,
}

impl SaveTarget {
    /// Build a target from a directory and a sanitized file stem
    pub fn new(dir: impl AsRef<Path>, file_name: impl Into<String>) -> Self {
        let dir = dir.as_ref().to_path_buf();
        let file_name = file_name.into();
        let path = dir.join(format!("{}.pdf", file_name));
        Self {
            dir,
            file_name,
            path,
        }
    }
}

/// Transient byte counters for an in-flight download
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DownloadProgress {
    /// Bytes written to disk so far
    pub bytes_downloaded: u64,

    /// Declared content length (0 = unknown)
    pub total_bytes: u64,
}

impl DownloadProgress {
    /// Running percentage, if the total is known
    pub fn percent(&self) -> Option<f64> {
        if self.total_bytes == 0 {
            return None;
        }
        Some(self.bytes_downloaded as f64 / self.total_bytes as f64 * 100.0)
    }
}

/// Result of a download operation, as reported to callers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadOutcome {
    /// Path where the file was saved
    pub path: String,

    /// Number of bytes downloaded
    pub bytes: u64,

    /// Whether the download was successful
    pub success: bool,

    /// Error message if failed
    pub error: Option<String>,
}

impl DownloadOutcome {
    /// Create a successful download outcome
    pub fn success(path: impl Into<String>, bytes: u64) -> Self {
        Self {
            path: path.into(),
            bytes,
            success: true,
            error: None,
        }
    }

    /// Create a failed download outcome
    pub fn error(error: impl Into<String>) -> Self {
        Self {
            path: String::new(),
            bytes: 0,
            success: false,
            error: Some(error.into()),
        }
    }
}
