//! File name derivation from a paper title.
//!
//! Two sanitization tiers: a strict one that maps characters illegal on
//! common file systems to underscores, and a lenient one that keeps only
//! word characters, spaces, and hyphens. Neither tier may produce an empty
//! name; the floor is `arxiv_<id>`.

use regex::Regex;
use thiserror::Error;

use crate::models::TitleResult;

/// Maximum length of a derived file stem, in characters
pub const MAX_NAME_LEN: usize = 100;
/// Length cap applied by the lenient tier
const LENIENT_MAX_LEN: usize = 50;

/// Characters illegal on common file systems, mapped to underscores
const ILLEGAL_CHARS: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// Why the strict tier refused an input outright
#[derive(Error, Debug, PartialEq)]
enum NameError {
    #[error("name is empty")]
    Empty,

    #[error("path traversal detected")]
    PathTraversal,

    #[error("contains null byte")]
    NullByte,
}

/// Derive a file stem (no extension) from a title lookup result.
///
/// A non-empty `override_name` is used verbatim; safety is then the
/// caller's responsibility.
pub fn build_file_name(title: &TitleResult, override_name: Option<&str>, id: &str) -> String {
    if let Some(name) = override_name {
        if !name.is_empty() {
            return name.to_string();
        }
    }

    let cleaned = match sanitize(&title.text) {
        Ok(name) => name,
        Err(err) => {
            tracing::debug!("strict sanitization refused title ({}), using lenient tier", err);
            lenient_clean(&title.text)
        }
    };

    if cleaned.is_empty() {
        format!("arxiv_{}", id)
    } else {
        cleaned
    }
}

/// Strict tier: refuse traversal attempts and null bytes, map illegal and
/// control characters to underscores, cap at [`MAX_NAME_LEN`] characters.
fn sanitize(raw: &str) -> Result<String, NameError> {
    let raw = raw.trim();

    if raw.is_empty() {
        return Err(NameError::Empty);
    }
    if raw.contains('\0') {
        return Err(NameError::NullByte);
    }
    if raw.contains("..") || raw.starts_with('/') || raw.starts_with('\\') {
        return Err(NameError::PathTraversal);
    }

    let mapped: String = raw
        .chars()
        .map(|ch| {
            if ILLEGAL_CHARS.contains(&ch) || ch.is_control() {
                '_'
            } else {
                ch
            }
        })
        .collect();

    Ok(truncate_chars(mapped.trim(), MAX_NAME_LEN))
}

/// Lenient tier: keep word characters, spaces, and hyphens only.
fn lenient_clean(raw: &str) -> String {
    let re = match Regex::new(r"[^\w\s-]") {
        Ok(re) => re,
        Err(_) => return String::new(),
    };

    let kept = re.replace_all(raw, "");
    truncate_chars(kept.trim(), LENIENT_MAX_LEN)
}

fn truncate_chars(s: &str, max: usize) -> String {
    s.chars().take(max).collect::<String>().trim_end().to_string()
}
