use crate::config::FrontendConfig;
use async_trait::async_trait;
use js_sys::Uint8Array;
use reqwest::Client;
use reqwest::multipart::{Form, Part};
use shared::models::{AskRequest, AskResponse, UPLOAD_FIELD};
use shared::transport::{ChatTransport, TransportError, UploadSource};
use std::cell::OnceCell;
use wasm_bindgen_futures::JsFuture;

const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

thread_local! {
    static SHARED_CLIENT: OnceCell<DocChatClient> = const { OnceCell::new() };
}

/// A file chosen in the browser's picker.
#[derive(Debug, Clone, PartialEq)]
pub struct PickedFile(web_sys::File);

impl From<web_sys::File> for PickedFile {
    fn from(file: web_sys::File) -> Self {
        Self(file)
    }
}

impl UploadSource for PickedFile {
    fn file_name(&self) -> String {
        self.0.name()
    }
}

/// HTTP client for the DocChat backend.
#[derive(Clone, Debug)]
pub struct DocChatClient {
    base_url: String,
    client: Client,
}

impl DocChatClient {
    /// Create a new API client with the provided base URL.
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
        }
    }

    /// Client for the configured backend, created once per page.
    pub fn shared() -> Self {
        SHARED_CLIENT.with(|cell| {
            cell.get_or_init(|| {
                let origin = web_sys::window()
                    .and_then(|window| window.location().origin().ok())
                    .unwrap_or_default();
                Self::new(&FrontendConfig::new().resolve_base_url(&origin))
            })
            .clone()
        })
    }

    fn api_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn read_file(file: &web_sys::File) -> Result<Vec<u8>, TransportError> {
        let buffer = JsFuture::from(file.array_buffer())
            .await
            .map_err(|err| TransportError::Payload(format!("{err:?}")))?;
        Ok(Uint8Array::new(&buffer).to_vec())
    }
}

fn log_failure(operation: &str, err: &TransportError) {
    web_sys::console::error_1(&format!("{operation} failed: {err}").into());
}

fn network(err: &reqwest::Error) -> TransportError {
    TransportError::Network(err.to_string())
}

#[async_trait(?Send)]
impl ChatTransport for DocChatClient {
    type File = PickedFile;

    async fn send_prompt(&self, prompt: &str) -> Result<AskResponse, TransportError> {
        let result = async {
            let response = self
                .client
                .post(self.api_url("ask"))
                .json(&AskRequest::new(prompt))
                .send()
                .await
                .map_err(|err| network(&err))?;

            if let Some(err) = TransportError::from_status(response.status().as_u16()) {
                return Err(err);
            }

            response
                .json::<AskResponse>()
                .await
                .map_err(|err| TransportError::InvalidResponse(err.to_string()))
        }
        .await;

        if let Err(err) = &result {
            log_failure("ask", err);
        }
        result
    }

    async fn send_file(&self, file: PickedFile) -> Result<(), TransportError> {
        let result = async {
            let PickedFile(file) = file;
            let bytes = Self::read_file(&file).await?;
            let content_type = match file.type_() {
                mime if mime.is_empty() => FALLBACK_CONTENT_TYPE.to_string(),
                mime => mime,
            };
            let part = Part::bytes(bytes)
                .file_name(file.name())
                .mime_str(&content_type)
                .map_err(|err| TransportError::Payload(err.to_string()))?;
            let form = Form::new().part(UPLOAD_FIELD, part);

            let response = self
                .client
                .post(self.api_url("upload"))
                .multipart(form)
                .send()
                .await
                .map_err(|err| network(&err))?;

            TransportError::from_status(response.status().as_u16()).map_or(Ok(()), Err)
        }
        .await;

        if let Err(err) = &result {
            log_failure("upload", err);
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_url_joins_paths() {
        let client = DocChatClient::new("http://localhost:8080/");
        assert_eq!(client.api_url("/ask"), "http://localhost:8080/ask");
        assert_eq!(client.api_url("upload"), "http://localhost:8080/upload");
    }
}
