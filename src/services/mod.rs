//! Services module
//!
//! Business logic services: the administrator roster, the visit-request
//! lifecycle and notification fan-out.

pub mod lifecycle;
pub mod notification;
pub mod roster;

// Re-export commonly used services
pub use lifecycle::{LifecycleService, Resolution, ResolveOutcome};
pub use notification::NotificationService;
pub use roster::RosterService;

use std::sync::Arc;

use crate::state::ChatLocks;
use crate::store::LedgerStore;
use crate::transport::Transport;

/// Bundle of all services wired over a store and a transport.
#[derive(Clone)]
pub struct Services {
    pub roster: RosterService,
    pub lifecycle: LifecycleService,
    pub notifier: NotificationService,
}

impl Services {
    pub fn new(store: Arc<dyn LedgerStore>, transport: Arc<dyn Transport>) -> Self {
        let roster = RosterService::new(store.clone());
        let lifecycle = LifecycleService::new(store.clone(), ChatLocks::new());
        let notifier = NotificationService::new(transport, store, roster.clone());

        Self {
            roster,
            lifecycle,
            notifier,
        }
    }
}
