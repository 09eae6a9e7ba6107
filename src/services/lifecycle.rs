//! Visit request lifecycle
//!
//! Owns the request state machine: NoRequest → Pending → {Approved,
//! Rejected} → NoRequest. Creation and resolution run inside the originating
//! chat's critical section, so at most one pending request exists per chat
//! and a resolve/resolve race cannot credit points twice.

use std::sync::Arc;

use tracing::info;

use crate::models::{RequestStatus, VisitRequest};
use crate::state::ChatLocks;
use crate::store::LedgerStore;
use crate::utils::errors::{ClubPassError, Result};

/// Points credited for one approved visit.
const VISIT_BONUS_POINTS: i32 = 10;

/// Requested terminal outcome for a pending request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolveOutcome {
    Approve,
    Reject,
}

impl ResolveOutcome {
    fn status(self) -> RequestStatus {
        match self {
            ResolveOutcome::Approve => RequestStatus::Approved,
            ResolveOutcome::Reject => RequestStatus::Rejected,
        }
    }
}

/// Result of a resolution attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resolution {
    /// The request was pending and has now been resolved.
    Applied {
        chat_id: i64,
        outcome: ResolveOutcome,
    },
    /// The request had already reached a terminal state. Nothing was changed:
    /// side effects are never re-applied on a repeated resolution.
    AlreadyResolved,
}

#[derive(Clone)]
pub struct LifecycleService {
    store: Arc<dyn LedgerStore>,
    locks: ChatLocks,
}

impl LifecycleService {
    pub fn new(store: Arc<dyn LedgerStore>, locks: ChatLocks) -> Self {
        Self { store, locks }
    }

    /// Create a pending visit request for a participant.
    ///
    /// The pending flag is checked inside the chat's critical section and set
    /// before the section is left, so two concurrent requests from the same
    /// chat cannot both succeed.
    pub async fn create_request(
        &self,
        chat_id: i64,
        username: Option<&str>,
    ) -> Result<VisitRequest> {
        let _guard = self.locks.acquire(chat_id).await;

        let participant = self
            .store
            .get_participant(chat_id)
            .await?
            .ok_or(ClubPassError::ParticipantNotFound { chat_id })?;
        if participant.has_pending_request {
            return Err(ClubPassError::RequestAlreadyPending { chat_id });
        }

        let request_id = self.store.create_visit_request(chat_id, username).await?;
        self.store.set_pending_flag(chat_id, true).await?;

        let request = self
            .store
            .get_visit_request(request_id)
            .await?
            .ok_or(ClubPassError::RequestNotFound { request_id })?;
        info!(request_id = request_id, chat_id = chat_id, "Visit request created");
        Ok(request)
    }

    /// Resolve a pending request.
    ///
    /// On approval the originator is credited one game and ten bonus points
    /// and their pending flag is cleared; on rejection only the flag is
    /// cleared. Resolving an already-terminal request is a no-op reported as
    /// `Resolution::AlreadyResolved`.
    pub async fn resolve(
        &self,
        request_id: i64,
        admin_id: i64,
        outcome: ResolveOutcome,
    ) -> Result<Resolution> {
        let request = self
            .store
            .get_visit_request(request_id)
            .await?
            .ok_or(ClubPassError::RequestNotFound { request_id })?;

        let _guard = self.locks.acquire(request.chat_id).await;

        // Re-read under the chat lock: another resolution may have won the race.
        let request = self
            .store
            .get_visit_request(request_id)
            .await?
            .ok_or(ClubPassError::RequestNotFound { request_id })?;
        if request.status.is_terminal() {
            info!(
                request_id = request_id,
                status = ?request.status,
                "Request already resolved, skipping"
            );
            return Ok(Resolution::AlreadyResolved);
        }

        self.store
            .update_visit_request_status(request_id, outcome.status(), admin_id)
            .await?;
        if outcome == ResolveOutcome::Approve {
            self.store.increment_games(request.chat_id).await?;
            self.store
                .adjust_points(request.chat_id, VISIT_BONUS_POINTS)
                .await?;
        }
        self.store.set_pending_flag(request.chat_id, false).await?;

        info!(
            request_id = request_id,
            admin_id = admin_id,
            outcome = ?outcome,
            "Visit request resolved"
        );
        Ok(Resolution::Applied {
            chat_id: request.chat_id,
            outcome,
        })
    }

    /// Originating chat of a request, if the request exists.
    pub async fn lookup_originator(&self, request_id: i64) -> Result<Option<i64>> {
        Ok(self
            .store
            .get_visit_request(request_id)
            .await?
            .map(|request| request.chat_id))
    }
}
