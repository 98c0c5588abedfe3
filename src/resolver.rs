//! Identifier resolution: raw input string to a canonical paper reference.
//!
//! Accepts a bare paper ID, an abstract-page URL, or a PDF URL (with or
//! without a trailing `.pdf`). Pure string transformation, no network.

use url::Url;

use crate::config::Endpoints;
use crate::error::FetchError;
use crate::models::PaperReference;

/// Path marker for direct PDF resources
const PDF_SEGMENT: &str = "/pdf/";
/// Path marker for abstract pages
const ABS_SEGMENT: &str = "/abs/";
/// Optional suffix on direct-file addresses
const PDF_SUFFIX: &str = ".pdf";

/// Resolve a loose reference into a [`PaperReference`].
///
/// Handles inputs like:
/// - "2505.14030"
/// - "https://arxiv.org/abs/2505.14030"
/// - "https://arxiv.org/pdf/2505.14030"
/// - "https://arxiv.org/pdf/2505.14030.pdf"
///
/// The PDF URL is always rebuilt from the template, even when the input was
/// already a PDF address; this normalizes around upstream URL-shape changes.
pub fn resolve(input: &str, endpoints: &Endpoints) -> Result<PaperReference, FetchError> {
    let input = input.trim();

    if input.contains(PDF_SEGMENT) || input.ends_with(PDF_SUFFIX) {
        let segment = trailing_segment(input);
        let id = segment.strip_suffix(PDF_SUFFIX).unwrap_or(&segment);
        if id.is_empty() {
            return Err(FetchError::InvalidReference(input.to_string()));
        }
        return Ok(PaperReference::new(
            id,
            endpoints.abs_url(id),
            endpoints.pdf_url(id),
        ));
    }

    if input.contains(ABS_SEGMENT) {
        let id = trailing_segment(input);
        if id.is_empty() {
            return Err(FetchError::InvalidReference(input.to_string()));
        }
        let pdf_url = endpoints.pdf_url(&id);
        return Ok(PaperReference::new(id, input, pdf_url));
    }

    // Bare ID, possibly wrapped in some other URL shape. Dot-containing
    // segments are kept whole; "2505.14030" is one ID, not a stem to split.
    let id = trailing_segment(input);
    if id.is_empty() {
        return Err(FetchError::InvalidReference(input.to_string()));
    }
    let abs_url = endpoints.abs_url(&id);
    let pdf_url = endpoints.pdf_url(&id);
    Ok(PaperReference::new(id, abs_url, pdf_url))
}

/// Last non-empty path segment of the input.
///
/// URL inputs are parsed so query strings and fragments drop off; anything
/// that does not parse as a URL falls back to a plain rightmost-slash split.
pub(crate) fn trailing_segment(input: &str) -> String {
    if let Ok(url) = Url::parse(input) {
        return url
            .path_segments()
            .and_then(|segments| segments.filter(|s| !s.is_empty()).next_back())
            .unwrap_or("")
            .to_string();
    }

    input.rsplit('/').next().unwrap_or(input).trim().to_string()
}
