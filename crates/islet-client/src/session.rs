//! Session client: optimistic turn submission with rollback, and reset.
//!
//! One request is in flight at a time. The UI boundary is expected to
//! serialize calls by disabling input until a call settles, and the busy
//! flag enforces the same contract from the inside: a concurrent call is
//! rejected with [`SessionError::Busy`], never queued.

use std::sync::atomic::{AtomicBool, Ordering};

use islet_common::{ChatRequest, Turn, RESET_MARKER};
use tracing::{debug, warn};

use crate::store::HistoryStore;
use crate::transport::Transport;

/// Substituted assistant turn when the request to our own server fails.
/// The failed user turn is rolled back; this is the only trace left.
pub const SEND_FAILED_REPLY: &str = "网络有点问题，再发一次试试？";

/// Greeting used on first run and when a reset request itself fails.
pub const DEFAULT_GREETING: &str = "那个…早上好。今天天气好像有点凉，你…出门多穿件衣服了吗？";

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("a request is already in flight")]
    Busy,
}

/// Guard that clears the `busy` flag on drop, ensuring it is always released
/// even if the future is cancelled or an early return occurs.
struct BusyGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> BusyGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Result<Self, SessionError> {
        if flag
            .compare_exchange(false, true, Ordering::Acquire, Ordering::Relaxed)
            .is_err()
        {
            return Err(SessionError::Busy);
        }
        Ok(Self { flag })
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

/// Client-side conversation session backed by the durable history store.
pub struct SessionClient {
    history: Vec<Turn>,
    store: HistoryStore,
    busy: AtomicBool,
}

impl SessionClient {
    /// Open the session, loading whatever history the store has.
    pub fn new(store: HistoryStore) -> Self {
        let history = store.load();
        debug!(turns = history.len(), "loaded history");
        Self {
            history,
            store,
            busy: AtomicBool::new(false),
        }
    }

    /// The full ordered history, for rendering.
    pub fn history(&self) -> &[Turn] {
        &self.history
    }

    /// On a fresh session with no stored history, seed the default greeting
    /// as the opening assistant turn. Returns whether a turn was added.
    pub fn seed_greeting(&mut self) -> bool {
        if !self.history.is_empty() {
            return false;
        }
        self.history.push(Turn::assistant(DEFAULT_GREETING));
        self.persist();
        true
    }

    /// Submit one user message and append the assistant's reply.
    ///
    /// Empty (after trimming) input is a no-op returning `Ok(None)`.
    /// The user turn is appended optimistically before the network call; if
    /// the call fails it is rolled back and a fixed apology turn takes its
    /// place, so history grows by exactly one assistant turn either way and
    /// memory and store never diverge.
    pub async fn submit(
        &mut self,
        transport: &dyn Transport,
        text: &str,
    ) -> Result<Option<String>, SessionError> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(None);
        }
        let _guard = BusyGuard::acquire(&self.busy)?;

        // History snapshot from before this turn; the server appends the new
        // message itself, so sending it inside the history too would double it.
        let snapshot = self.history.clone();

        self.history.push(Turn::user(text));
        self.persist();

        let request = ChatRequest {
            message: text.to_string(),
            conversation_history: snapshot,
        };

        let reply = match transport.send(&request).await {
            Ok(response) => {
                self.history.push(Turn::assistant(&response.reply));
                response.reply
            }
            Err(e) => {
                warn!(error = %e, "send failed, rolling back user turn");
                self.history.pop();
                self.history.push(Turn::assistant(SEND_FAILED_REPLY));
                SEND_FAILED_REPLY.to_string()
            }
        };
        self.persist();

        Ok(Some(reply))
    }

    /// Discard the conversation and start over with a fresh greeting.
    ///
    /// Store and memory are cleared before the network call, so no outcome
    /// can leave pre-reset and post-reset turns mixed. The server is asked
    /// for a fresh in-persona greeting; if that fails the fixed default
    /// greeting stands in.
    pub async fn reset(&mut self, transport: &dyn Transport) -> Result<String, SessionError> {
        let _guard = BusyGuard::acquire(&self.busy)?;

        self.history.clear();
        self.store.clear();

        let request = ChatRequest {
            message: RESET_MARKER.to_string(),
            conversation_history: Vec::new(),
        };

        let greeting = match transport.send(&request).await {
            Ok(response) => response.reply,
            Err(e) => {
                warn!(error = %e, "reset request failed, using default greeting");
                DEFAULT_GREETING.to_string()
            }
        };

        self.history.push(Turn::assistant(&greeting));
        self.persist();

        Ok(greeting)
    }

    fn persist(&self) {
        if let Err(e) = self.store.save(&self.history) {
            warn!(error = %e, "failed to persist history, continuing in memory");
        }
    }
}
