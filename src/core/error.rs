use thiserror::Error;

use crate::core::session::SessionKey;
use crate::handshake::Step;

/// The primary error type for all fallible operations in this crate.
#[derive(Debug, Error)]
pub enum YfError {
    /// An error occurred during an HTTP request.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A provided URL could not be parsed.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// The server returned an unexpected or unsuccessful HTTP status code.
    #[error("Unexpected response status: {status} at {url}")]
    Status {
        /// The HTTP status code.
        status: u16,
        /// The URL that returned the error.
        url: String,
    },

    /// A token could not be recovered from an HTML body.
    #[error("scrape error: {0}")]
    Scrape(#[from] ScrapeError),

    /// A session parameter expected after a handshake step is still absent.
    #[error("{key} still missing after {step} step")]
    MissingToken {
        /// The step that should have produced the value.
        step: Step,
        /// The parameter that is absent or empty.
        key: SessionKey,
    },

    /// The data received was in an unexpected format.
    #[error("Data format unexpected or missing field: {0}")]
    Data(String),
}

/// Failure to locate a token between its literal markers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScrapeError {
    /// The opening marker does not occur in the body.
    #[error("marker for {token} not found: `{marker}`")]
    MarkerNotFound {
        /// Name of the token being extracted.
        token: &'static str,
        /// The literal opening marker that was searched for.
        marker: &'static str,
    },

    /// The opening marker was found but no closing marker follows it.
    #[error("value of {token} is not terminated")]
    Unterminated {
        /// Name of the token being extracted.
        token: &'static str,
    },
}
