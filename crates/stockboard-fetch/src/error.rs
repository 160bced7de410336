use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    /// The body was empty, not JSON, or matched none of the permitted shapes.
    #[error("malformed payload from {url}: {reason}")]
    MalformedPayload { url: String, reason: String },

    #[error("invalid API root \"{api_root}\": {reason}")]
    InvalidApiRoot { api_root: String, reason: String },
}
