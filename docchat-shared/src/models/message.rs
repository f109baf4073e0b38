use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::sync::atomic::{AtomicU64, Ordering};

/// Who a chat entry belongs to.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MessageRole {
    /// Text the user typed or an upload they started.
    User,
    /// An answer returned by the assistant.
    Ai,
    /// Status notices such as a finished upload.
    System,
    /// Placeholder shown while a request is in flight.
    Loading,
}

impl MessageRole {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Ai => "ai",
            Self::System => "system",
            Self::Loading => "loading",
        }
    }

    /// User entries are the only ones drawn on the right-hand side.
    #[must_use]
    pub const fn is_user(self) -> bool {
        matches!(self, Self::User)
    }
}

impl Display for MessageRole {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

static NEXT_REQUEST_ID: AtomicU64 = AtomicU64::new(1);

/// Identifies one outbound ask or upload so its loading entry can be
/// resolved without touching entries created by other requests.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RequestId(pub u64);

impl RequestId {
    /// Mints an identifier that is unique for the lifetime of the process (or browser tab).
    #[must_use]
    pub fn fresh() -> Self {
        Self(NEXT_REQUEST_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl Display for RequestId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "req-{}", self.0)
    }
}

/// A single entry of the on-screen conversation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatMessage {
    /// Role deciding alignment and colour.
    pub role: MessageRole,

    /// Text shown verbatim.
    pub text: String,

    /// Set only on loading entries: the request that will resolve this entry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pending: Option<RequestId>,
}

impl ChatMessage {
    pub fn new(role: MessageRole, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
            pending: None,
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(MessageRole::User, text)
    }

    pub fn ai(text: impl Into<String>) -> Self {
        Self::new(MessageRole::Ai, text)
    }

    pub fn system(text: impl Into<String>) -> Self {
        Self::new(MessageRole::System, text)
    }

    /// Creates a placeholder owned by `request`.
    pub fn loading(request: RequestId, text: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Loading,
            text: text.into(),
            pending: Some(request),
        }
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.role == MessageRole::Loading
    }

    /// True when this is the loading entry created by `request`.
    #[must_use]
    pub fn is_pending_for(&self, request: RequestId) -> bool {
        self.is_loading() && self.pending == Some(request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_serializes_as_its_display_name() {
        for role in [
            MessageRole::User,
            MessageRole::Ai,
            MessageRole::System,
            MessageRole::Loading,
        ] {
            let json = serde_json::to_string(&role).unwrap();
            assert_eq!(json, format!("\"{role}\""));
        }
        assert!(serde_json::from_str::<MessageRole>("\"assistant\"").is_err());
    }

    #[test]
    fn only_user_role_is_user() {
        assert!(MessageRole::User.is_user());
        assert!(!MessageRole::Ai.is_user());
        assert!(!MessageRole::System.is_user());
        assert!(!MessageRole::Loading.is_user());
    }

    #[test]
    fn fresh_request_ids_are_distinct() {
        let first = RequestId::fresh();
        let second = RequestId::fresh();
        assert_ne!(first, second);
        assert!(second > first);
    }

    #[test]
    fn loading_entry_is_pending_only_for_its_request() {
        let owner = RequestId(7);
        let entry = ChatMessage::loading(owner, "...");
        assert!(entry.is_loading());
        assert!(entry.is_pending_for(owner));
        assert!(!entry.is_pending_for(RequestId(8)));
        assert!(!ChatMessage::user("hi").is_pending_for(owner));
    }

    #[test]
    fn plain_messages_omit_pending_when_serialized() {
        let json = serde_json::to_string(&ChatMessage::user("Hello")).unwrap();
        assert_eq!(json, r#"{"role":"user","text":"Hello"}"#);
    }
}
