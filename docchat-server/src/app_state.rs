use std::sync::Arc;

use shared::config::server::Config;

use crate::services::{AssistantRuntime, UploadService};

// Application state that will be shared across all routes
#[derive(Clone)]
pub struct AppState {
    pub(crate) config: Arc<Config>,
    pub(crate) assistant: Arc<dyn AssistantRuntime>,
    pub(crate) uploads: UploadService,
}

impl AppState {
    pub fn new(config: Arc<Config>, assistant: Arc<dyn AssistantRuntime>) -> Self {
        let uploads = UploadService::from_config(&config.uploads);
        Self {
            config,
            assistant,
            uploads,
        }
    }
}
