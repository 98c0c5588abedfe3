//! Resolved paper reference model.

use serde::{Deserialize, Serialize};

/// A resolved arXiv paper: the canonical ID plus the two derived addresses.
///
/// Created once by the resolver and read-only afterwards. The `id` never
/// carries a path separator or a trailing `.pdf` suffix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaperReference {
    /// Canonical paper ID (e.g. "2505.14030")
    pub id: String,

    /// Abstract/landing page URL
    pub abs_url: String,

    /// Direct PDF URL (always template-built, never taken from input)
    pub pdf_url: String,
}

impl PaperReference {
    /// Create a new paper reference
    pub fn new(
        id: impl Into<String>,
        abs_url: impl Into<String>,
        pdf_url: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            abs_url: abs_url.into(),
            pdf_url: pdf_url.into(),
        }
    }
}

impl std::fmt::Display for PaperReference {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "arXiv:{}", self.id)
    }
}
