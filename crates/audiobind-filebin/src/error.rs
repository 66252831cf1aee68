//! Resolution error types.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("{url} responded with status {status}")]
    Upstream { url: String, status: u16 },

    #[error("invalid response: {0}")]
    MalformedResponse(String),

    #[error("no wav files uploaded to {url}")]
    NoAudioAsset { url: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

impl ResolveError {
    /// Status code of an upstream failure.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Upstream { status, .. } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
