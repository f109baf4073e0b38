//! # Conversation state
//!
//! The message list and error banner shown by the chat UI, updated only
//! through [`ConversationAction`]s. Every ask or upload moves through
//! `*Started` → (`*Succeeded` | `*Failed`), and each step is tagged with the
//! [`RequestId`] minted when the request began. Resolution touches only the
//! loading entry carrying that id, so overlapping requests settle correctly
//! no matter which response arrives first.

use tracing::debug;

use crate::models::{ChatMessage, RequestId};

/// Placeholder text while waiting for an answer.
pub const ASK_LOADING_TEXT: &str = "...";
/// Placeholder text while a file is being sent.
pub const UPLOAD_LOADING_TEXT: &str = "Uploading...";
/// System notice replacing the placeholder after a successful upload.
pub const UPLOAD_SUCCESS_TEXT: &str = "File uploaded successfully.";
/// Banner shown when `/ask` fails.
pub const ASK_FAILED_BANNER: &str = "Failed to get a response. Please try again.";
/// Banner shown when `/upload` fails.
pub const UPLOAD_FAILED_BANNER: &str = "File upload failed. Please try again.";

/// User entry recorded when an upload starts.
#[must_use]
pub fn upload_notice(file_name: &str) -> String {
    format!("Uploaded file: {file_name}")
}

/// Everything that can happen to the conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversationAction {
    AskStarted { request: RequestId, prompt: String },
    AskSucceeded { request: RequestId, answer: String },
    AskFailed { request: RequestId },
    UploadStarted { request: RequestId, file_name: String },
    UploadSucceeded { request: RequestId },
    UploadFailed { request: RequestId },
}

/// Messages plus the optional error banner.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversationState {
    messages: Vec<ChatMessage>,
    error: Option<String>,
}

impl ConversationState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Number of loading entries still waiting for a response.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.messages.iter().filter(|m| m.is_loading()).count()
    }

    /// Applies `action` and returns the updated state.
    #[must_use]
    pub fn reduce(mut self, action: ConversationAction) -> Self {
        self.apply(action);
        self
    }

    /// Applies `action` in place.
    pub fn apply(&mut self, action: ConversationAction) {
        match action {
            ConversationAction::AskStarted { request, prompt } => {
                if prompt.trim().is_empty() {
                    return;
                }
                self.begin(
                    ChatMessage::user(prompt),
                    ChatMessage::loading(request, ASK_LOADING_TEXT),
                );
            }
            ConversationAction::AskSucceeded { request, answer } => {
                self.resolve(request, ChatMessage::ai(answer));
            }
            ConversationAction::AskFailed { request } => {
                self.abandon(request, ASK_FAILED_BANNER);
            }
            ConversationAction::UploadStarted { request, file_name } => {
                self.begin(
                    ChatMessage::user(upload_notice(&file_name)),
                    ChatMessage::loading(request, UPLOAD_LOADING_TEXT),
                );
            }
            ConversationAction::UploadSucceeded { request } => {
                self.resolve(request, ChatMessage::system(UPLOAD_SUCCESS_TEXT));
            }
            ConversationAction::UploadFailed { request } => {
                self.abandon(request, UPLOAD_FAILED_BANNER);
            }
        }
    }

    fn begin(&mut self, entry: ChatMessage, placeholder: ChatMessage) {
        self.error = None;
        self.messages.push(entry);
        self.messages.push(placeholder);
    }

    fn resolve(&mut self, request: RequestId, replacement: ChatMessage) {
        match self
            .messages
            .iter_mut()
            .find(|message| message.is_pending_for(request))
        {
            Some(slot) => *slot = replacement,
            None => debug!(%request, "no loading entry left to resolve"),
        }
    }

    fn abandon(&mut self, request: RequestId, banner: &str) {
        self.messages
            .retain(|message| !message.is_pending_for(request));
        self.error = Some(banner.to_string());
    }
}
