//! Shared types for islet: conversation turns, the client/server wire
//! protocol, and error enums used across crates.

pub mod errors;
pub mod protocol;
pub mod types;

pub use errors::{ConfigError, StorageError};
pub use protocol::{ChatRequest, ChatResponse, RESET_MARKER};
pub use types::{Role, Turn};
