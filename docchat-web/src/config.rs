//! Frontend configuration module
//!
//! Compile-time settings baked into the wasm bundle.

/// Frontend configuration for backend URLs
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrontendConfig {
    /// Origin serving `/ask` and `/upload`. Empty means the page's own origin.
    pub api_base_url: String,
}

impl Default for FrontendConfig {
    fn default() -> Self {
        Self {
            api_base_url: option_env!("DOCCHAT_API_BASE_URL")
                .unwrap_or("")
                .trim_end_matches('/')
                .to_string(),
        }
    }
}

impl FrontendConfig {
    /// Create a new frontend configuration instance
    pub fn new() -> Self {
        Self::default()
    }

    /// Base URL for API calls, falling back to `origin` when none was configured.
    pub fn resolve_base_url(&self, origin: &str) -> String {
        if self.api_base_url.is_empty() {
            origin.trim_end_matches('/').to_string()
        } else {
            self.api_base_url.clone()
        }
    }
}
