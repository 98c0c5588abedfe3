//! Core data models for paper references and download operations.

mod download;
mod reference;

pub use download::{DownloadOutcome, DownloadProgress, SaveTarget, TitleOrigin, TitleResult};
pub use reference::PaperReference;
