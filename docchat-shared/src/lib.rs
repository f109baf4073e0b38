#![cfg_attr(not(test), forbid(unsafe_code))]
#![warn(clippy::pedantic)]
#![allow(clippy::multiple_crate_versions, clippy::missing_errors_doc)]

//! Types and logic shared by the DocChat web client and server: wire models,
//! the conversation state machine and the service configuration.

pub mod config;
pub mod controls;
pub mod conversation;
pub mod coordinator;
pub mod models;
pub mod transport;

pub use conversation::{ConversationAction, ConversationState};
pub use coordinator::Coordinator;
pub use transport::{ChatTransport, TransportError, UploadSource};
