//! Title lookup against the abstract page.
//!
//! The upstream page markup is not guaranteed stable, so extraction runs an
//! ordered list of pure `&str -> Option<String>` strategies and degrades to a
//! placeholder built from the paper ID. The lookup never fails: a worse file
//! name beats an aborted download.

use regex::Regex;
use scraper::{Html, Selector};

use crate::config::FetchConfig;
use crate::error::FetchError;
use crate::models::{TitleOrigin, TitleResult};
use crate::resolver::trailing_segment;
use crate::utils::HttpClient;

/// Label prefix on the abstract page's heading element
const TITLE_LABEL: &str = "Title:";

type Extract = fn(&str) -> Option<String>;

/// Extraction strategies, first match wins
const STRATEGIES: &[(Extract, TitleOrigin)] = &[
    (extract_heading, TitleOrigin::Heading),
    (extract_page_title, TitleOrigin::PageTitle),
];

/// Fetch the title for an abstract page URL.
///
/// Always returns a usable value; transport failures and unrecognized markup
/// both degrade to `arxiv_<id>`.
pub async fn fetch_title(client: &HttpClient, abs_url: &str, config: &FetchConfig) -> TitleResult {
    match request_abstract(client, abs_url, config).await {
        Ok(html) => {
            for (extract, origin) in STRATEGIES {
                if let Some(text) = extract(&html) {
                    return TitleResult::new(text, *origin);
                }
            }
            tracing::warn!(url = abs_url, "no title pattern matched the abstract page");
            TitleResult::from_paper_id(&trailing_segment(abs_url))
        }
        Err(err) => {
            tracing::warn!(url = abs_url, "title lookup failed: {}", err);
            TitleResult::from_paper_id(&trailing_segment(abs_url))
        }
    }
}

async fn request_abstract(
    client: &HttpClient,
    abs_url: &str,
    config: &FetchConfig,
) -> Result<String, FetchError> {
    let response = client
        .get(abs_url)
        .header("Accept", "text/html")
        .timeout(config.title_timeout())
        .send()
        .await
        .map_err(|e| FetchError::TitleFetch(format!("failed to fetch abstract page: {}", e)))?;

    if !response.status().is_success() {
        return Err(FetchError::TitleFetch(format!(
            "abstract page returned status {}",
            response.status()
        )));
    }

    response
        .text()
        .await
        .map_err(|e| FetchError::TitleFetch(format!("failed to read abstract page: {}", e)))
}

/// Primary strategy: the heading element carrying the title marker class.
///
/// Text traversal strips any embedded markup; the leading "Title:" label is
/// dropped separately.
fn extract_heading(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let selector = Selector::parse("h1.title").ok()?;

    let text = document
        .select(&selector)
        .next()?
        .text()
        .collect::<String>();

    let text = text.trim();
    let text = text.strip_prefix(TITLE_LABEL).unwrap_or(text).trim();

    if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    }
}

/// Backup strategy: the page `<title>` template `arXiv: <title> [<category>]`.
fn extract_page_title(html: &str) -> Option<String> {
    let re = Regex::new(r"<title>arXiv:\s*(.*?)\s*\[.*?\]</title>").ok()?;
    let title = re.captures(html)?.get(1)?.as_str().trim();

    if title.is_empty() {
        None
    } else {
        Some(title.to_string())
    }
}
