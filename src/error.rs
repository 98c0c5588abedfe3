//! Error taxonomy for the fetch pipeline.

/// Errors that can occur while resolving, naming, or downloading a paper
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// The input could not be resolved to any paper ID
    #[error("could not resolve {0:?} to an arXiv ID")]
    InvalidReference(String),

    /// Network or transport error
    #[error("network error: {0}")]
    Network(String),

    /// The server answered with a non-success status
    #[error("server returned status {0}")]
    Status(reqwest::StatusCode),

    /// The abstract page could not be fetched (recovered locally, never
    /// surfaced past the title lookup)
    #[error("title fetch failed: {0}")]
    TitleFetch(String),

    /// IO error (file system)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        FetchError::Network(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_reference_message() {
        let err = FetchError::InvalidReference("".to_string());
        assert!(err.to_string().contains("arXiv ID"));
    }

    #[test]
    fn test_io_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let err: FetchError = io.into();
        assert!(matches!(err, FetchError::Io(_)));
    }
}
