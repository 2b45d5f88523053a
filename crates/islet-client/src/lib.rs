//! Client-side session logic for islet.
//!
//! Owns the durable conversation history (one JSON file), the optimistic
//! submit/rollback flow, and the reset flow. The terminal frontend in
//! `main.rs` is a thin rendering layer over [`SessionClient`].

pub mod session;
pub mod store;
pub mod transport;

pub use session::{SessionClient, SessionError, DEFAULT_GREETING, SEND_FAILED_REPLY};
pub use store::HistoryStore;
pub use transport::{HttpTransport, Transport, TransportError};
