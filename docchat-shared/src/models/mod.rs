pub mod chat;
pub mod completions;
pub mod message;

pub use chat::{AskRequest, AskResponse, UPLOAD_FIELD, UploadResponse};
pub use completions::{
    ChatChoice, ChatCompletionRequest, ChatCompletionResponse, CompletionMessage,
};
pub use message::{ChatMessage, MessageRole, RequestId};
