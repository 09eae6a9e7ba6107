//! Two-step capture markers
//!
//! A bare `/admin_add` or `/admin_remove` parks the chat in a capture state;
//! the next routed text message from that chat supplies the missing numeric
//! argument. Markers never expire and live only as long as the dispatcher —
//! after a restart the administrator simply re-issues the command.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::Mutex;

/// Roster verb awaiting its identifier argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RosterVerb {
    Add,
    Remove,
}

/// Capture state for a chat.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capture {
    AwaitingAdminId(RosterVerb),
}

/// Keyed table from chat identifier to capture state.
#[derive(Clone, Default)]
pub struct CaptureTable {
    inner: Arc<Mutex<HashMap<i64, Capture>>>,
}

impl CaptureTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn set(&self, chat_id: i64, capture: Capture) {
        self.inner.lock().await.insert(chat_id, capture);
    }

    pub async fn get(&self, chat_id: i64) -> Option<Capture> {
        self.inner.lock().await.get(&chat_id).copied()
    }

    pub async fn clear(&self, chat_id: i64) -> Option<Capture> {
        self.inner.lock().await.remove(&chat_id)
    }
}
