//! Drives the ask and upload lifecycles: dispatch the start, await the
//! transport, dispatch the outcome.

use tracing::{debug, warn};

use crate::conversation::ConversationAction;
use crate::models::RequestId;
use crate::transport::{ChatTransport, UploadSource};

/// Owns the transport and the function that feeds actions into the store.
#[derive(Debug)]
pub struct Coordinator<T, D> {
    transport: T,
    dispatch: D,
}

impl<T, D> Coordinator<T, D>
where
    T: ChatTransport,
    D: Fn(ConversationAction),
{
    pub const fn new(transport: T, dispatch: D) -> Self {
        Self {
            transport,
            dispatch,
        }
    }

    pub const fn transport(&self) -> &T {
        &self.transport
    }

    /// Sends `text` to `/ask`. Blank text is ignored and `None` returned;
    /// otherwise the id of the request that was issued.
    pub async fn ask(&self, text: &str) -> Option<RequestId> {
        if text.trim().is_empty() {
            return None;
        }

        let request = RequestId::fresh();
        (self.dispatch)(ConversationAction::AskStarted {
            request,
            prompt: text.to_string(),
        });

        match self.transport.send_prompt(text).await {
            Ok(response) => {
                debug!(%request, "answer received");
                (self.dispatch)(ConversationAction::AskSucceeded {
                    request,
                    answer: response.answer,
                });
            }
            Err(err) => {
                warn!(%request, error = %err, "ask failed");
                (self.dispatch)(ConversationAction::AskFailed { request });
            }
        }

        Some(request)
    }

    /// Sends the chosen file to `/upload`. Without a file nothing happens.
    pub async fn upload(&self, file: Option<T::File>) -> Option<RequestId> {
        let file = file?;

        let request = RequestId::fresh();
        (self.dispatch)(ConversationAction::UploadStarted {
            request,
            file_name: file.file_name(),
        });

        match self.transport.send_file(file).await {
            Ok(()) => {
                debug!(%request, "upload accepted");
                (self.dispatch)(ConversationAction::UploadSucceeded { request });
            }
            Err(err) => {
                warn!(%request, error = %err, "upload failed");
                (self.dispatch)(ConversationAction::UploadFailed { request });
            }
        }

        Some(request)
    }
}
