//! Per-chat mutual exclusion
//!
//! Every operation that reads and then writes a participant's pending-request
//! flag, or a request's status, runs inside that chat's critical section.
//! Locks are created on first use and never dropped; the registry lives as
//! long as the dispatcher.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{Mutex, OwnedMutexGuard};

/// Registry of per-chat-identifier locks.
#[derive(Clone, Default)]
pub struct ChatLocks {
    locks: Arc<Mutex<HashMap<i64, Arc<Mutex<()>>>>>,
}

impl ChatLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire the lock for a chat identifier, creating it on first use.
    pub async fn acquire(&self, chat_id: i64) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.locks.lock().await;
            locks
                .entry(chat_id)
                .or_insert_with(|| Arc::new(Mutex::new(())))
                .clone()
        };
        lock.lock_owned().await
    }
}
