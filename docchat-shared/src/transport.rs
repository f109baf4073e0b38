//! The seam between the conversation lifecycle and whatever carries requests
//! to the backend (browser `fetch` in the web app, stubs in tests).

use async_trait::async_trait;
use thiserror::Error;

use crate::models::AskResponse;

/// Any failed round trip. The UI treats every variant the same way; the
/// variants exist so logs can say what went wrong.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransportError {
    #[error("request could not be sent: {0}")]
    Network(String),
    #[error("server responded with status {0}")]
    Status(u16),
    #[error("response did not match the expected shape: {0}")]
    InvalidResponse(String),
    #[error("request payload could not be prepared: {0}")]
    Payload(String),
}

impl TransportError {
    /// Classifies an HTTP status; `None` for 2xx.
    #[must_use]
    pub fn from_status(status: u16) -> Option<Self> {
        if (200..300).contains(&status) {
            None
        } else {
            Some(Self::Status(status))
        }
    }
}

/// A file picked by the user that can be sent to `/upload`.
pub trait UploadSource {
    /// Name shown in the conversation and sent as the multipart filename.
    fn file_name(&self) -> String;
}

/// Issues the two backend calls. One attempt per call: no retry, no timeout.
#[async_trait(?Send)]
pub trait ChatTransport {
    type File: UploadSource;

    /// `POST /ask` with `{ "prompt": prompt }`.
    async fn send_prompt(&self, prompt: &str) -> Result<AskResponse, TransportError>;

    /// `POST /upload` with the file as the `files` multipart part.
    async fn send_file(&self, file: Self::File) -> Result<(), TransportError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn success_statuses_are_not_errors() {
        assert_eq!(TransportError::from_status(200), None);
        assert_eq!(TransportError::from_status(204), None);
        assert_eq!(TransportError::from_status(299), None);
    }

    #[test]
    fn other_statuses_are_errors() {
        assert_eq!(
            TransportError::from_status(500),
            Some(TransportError::Status(500))
        );
        assert_eq!(
            TransportError::from_status(302),
            Some(TransportError::Status(302))
        );
        assert_eq!(
            TransportError::from_status(415),
            Some(TransportError::Status(415))
        );
    }

    #[test]
    fn display_mentions_status() {
        assert_eq!(
            TransportError::Status(503).to_string(),
            "server responded with status 503"
        );
    }
}
