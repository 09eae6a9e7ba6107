//! Notification fan-out
//!
//! Broadcasts new visit requests to every administrator on the roster and
//! reports resolutions back to the originating chat. Delivery to each
//! recipient is independent: one failure never blocks the others and never
//! propagates into the lifecycle change that triggered it.

use std::sync::Arc;

use tracing::{info, warn};

use crate::keyboards;
use crate::models::VisitRequest;
use crate::services::lifecycle::ResolveOutcome;
use crate::services::roster::RosterService;
use crate::store::LedgerStore;
use crate::texts;
use crate::transport::Transport;
use crate::utils::errors::Result;

#[derive(Clone)]
pub struct NotificationService {
    transport: Arc<dyn Transport>,
    store: Arc<dyn LedgerStore>,
    roster: RosterService,
}

impl NotificationService {
    pub fn new(
        transport: Arc<dyn Transport>,
        store: Arc<dyn LedgerStore>,
        roster: RosterService,
    ) -> Self {
        Self {
            transport,
            store,
            roster,
        }
    }

    /// Notify every current administrator about a new request, with the
    /// approve/reject controls keyed by the request id. The roster is read at
    /// fan-out time, not cached.
    pub async fn request_created(&self, request: &VisitRequest) -> Result<()> {
        let admins = self.roster.list_admins().await?;
        if admins.is_empty() {
            warn!(
                request_id = request.id,
                "No administrators on the roster to notify"
            );
            return Ok(());
        }

        let text = texts::request_notification(request);
        let mut delivered = 0usize;
        for admin in &admins {
            match self
                .transport
                .send_message(
                    admin.user_id,
                    &text,
                    Some(keyboards::approve_reject(request.id)),
                )
                .await
            {
                Ok(_) => delivered += 1,
                Err(e) => warn!(
                    admin_id = admin.user_id,
                    request_id = request.id,
                    error = %e,
                    "Failed to deliver request notification"
                ),
            }
        }

        info!(
            request_id = request.id,
            delivered = delivered,
            total = admins.len(),
            "Request notifications dispatched"
        );
        Ok(())
    }

    /// Tell the originator how their request was resolved. Approval includes
    /// the refreshed statistics.
    pub async fn request_resolved(&self, chat_id: i64, outcome: ResolveOutcome) -> Result<()> {
        match outcome {
            ResolveOutcome::Approve => {
                self.transport
                    .send_message(chat_id, &texts::request_approved_notice(), None)
                    .await?;
                if let Some(participant) = self.store.get_participant(chat_id).await? {
                    self.transport
                        .send_message(chat_id, &texts::stats_text(&participant), None)
                        .await?;
                }
            }
            ResolveOutcome::Reject => {
                self.transport
                    .send_message(chat_id, &texts::request_rejected_notice(), None)
                    .await?;
            }
        }
        Ok(())
    }
}
