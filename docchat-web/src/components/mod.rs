pub(crate) mod chat_window;
pub(crate) mod error_banner;
pub(crate) mod file_upload;
pub(crate) mod input_area;
pub(crate) mod message_bubble;

// Re-export components for convenience
pub use chat_window::ChatWindow;
pub use error_banner::ErrorBanner;
pub use file_upload::FileUpload;
pub use input_area::InputArea;
pub use message_bubble::MessageBubble;
