use serde::{Deserialize, Serialize};

/// Body of `POST /ask`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AskRequest {
    pub prompt: String,
}

impl AskRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
        }
    }
}

/// Successful `POST /ask` response. Extra fields from the server are ignored,
/// a missing or non-string `answer` fails deserialization.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AskResponse {
    pub answer: String,
}

/// Successful `POST /upload` response: where each accepted file was stored.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UploadResponse {
    pub uploaded: Vec<String>,
}

/// Multipart field name carrying uploaded files.
pub const UPLOAD_FIELD: &str = "files";
