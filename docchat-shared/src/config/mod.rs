//! # Configuration
//!
//! Service and LLM configuration. Only the server reads files and the
//! environment, so none of this is compiled for the browser.

#[cfg(not(target_arch = "wasm32"))]
pub mod llm;
#[cfg(not(target_arch = "wasm32"))]
pub mod server;

#[cfg(not(target_arch = "wasm32"))]
pub use llm::LlmConfig;
#[cfg(not(target_arch = "wasm32"))]
pub use server::{Config, ConfigError, LogFormat};
