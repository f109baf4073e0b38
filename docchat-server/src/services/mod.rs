/// Assistant and upload services behind the HTTP handlers
pub mod assistant_service;
pub mod upload_service;

pub use assistant_service::{AssistantError, AssistantRuntime, AssistantService};
pub use upload_service::{UploadError, UploadService};
