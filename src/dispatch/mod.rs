//! Conversation dispatcher
//!
//! The per-chat state machine. Inbound text routes through, in order:
//! administrator command dispatch, two-step capture consumption, the terms
//! gate, the fixed user menu. Anything left over is ignored without a reply.
//! Button clicks arrive through a separate entry point keyed by the payload
//! alone.

pub mod command;

pub use command::{AdminCommand, CommandError};

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::keyboards;
use crate::models::Participant;
use crate::services::{Resolution, ResolveOutcome, Services};
use crate::state::{Capture, CaptureTable, RosterVerb};
use crate::store::LedgerStore;
use crate::texts;
use crate::transport::{InboundButtonEvent, InboundTextEvent, KeyboardSpec, Transport};
use crate::utils::errors::{ClubPassError, Result};
use crate::utils::logging::log_admin_action;

use command::parse_button_payload;

pub struct ConversationDispatcher {
    store: Arc<dyn LedgerStore>,
    transport: Arc<dyn Transport>,
    services: Services,
    captures: CaptureTable,
}

impl ConversationDispatcher {
    pub fn new(store: Arc<dyn LedgerStore>, transport: Arc<dyn Transport>) -> Self {
        let services = Services::new(store.clone(), transport.clone());
        Self {
            store,
            transport,
            services,
            captures: CaptureTable::new(),
        }
    }

    /// Entry point for inbound text messages.
    pub async fn handle_text(&self, event: InboundTextEvent) -> Result<()> {
        debug!(
            chat_id = event.chat_id,
            sender_id = event.sender_id,
            "Processing message"
        );

        // Administrator routing wins over everything, including the terms
        // gate and a pending capture.
        if self.services.roster.is_admin(event.sender_id).await? {
            match AdminCommand::parse(&event.text) {
                Some(Ok(cmd)) => return self.dispatch_admin_command(&event, cmd).await,
                Some(Err(err)) => {
                    self.send(event.chat_id, &err.user_message(), None).await;
                    return Ok(());
                }
                None => {}
            }
            if let Some(Capture::AwaitingAdminId(verb)) = self.captures.get(event.chat_id).await {
                return self.consume_captured_id(&event, verb).await;
            }
        }

        let participant = self.get_or_create_participant(&event).await?;

        if !participant.terms_accepted {
            return self.handle_terms_gate(&event, participant).await;
        }

        match event.text.as_str() {
            "/start" => {
                self.send(event.chat_id, &texts::welcome(), Some(keyboards::main_menu()))
                    .await;
            }
            texts::ADD_VISIT_LABEL => self.handle_visit_request(&event).await?,
            texts::MY_STATS_LABEL => {
                self.send(event.chat_id, &texts::stats_text(&participant), None)
                    .await;
            }
            texts::BONUS_LABEL => {
                self.send(event.chat_id, &texts::bonus_text(&participant), None)
                    .await;
            }
            _ => {
                // Unrecognized text gets no reply at all.
                debug!(chat_id = event.chat_id, "Unrecognized text ignored");
            }
        }
        Ok(())
    }

    /// Entry point for approve/reject button clicks.
    pub async fn handle_button(&self, event: InboundButtonEvent) -> Result<()> {
        let Some((outcome, request_id)) = parse_button_payload(&event.payload) else {
            warn!(
                payload = %event.payload,
                clicker_id = event.clicker_id,
                "Malformed button payload ignored"
            );
            return Ok(());
        };

        debug!(
            request_id = request_id,
            clicker_id = event.clicker_id,
            outcome = ?outcome,
            "Processing button click"
        );

        match self
            .services
            .lifecycle
            .resolve(request_id, event.clicker_id, outcome)
            .await
        {
            Ok(Resolution::Applied { chat_id, outcome }) => {
                if let Err(e) = self.services.notifier.request_resolved(chat_id, outcome).await {
                    error!(
                        request_id = request_id,
                        chat_id = chat_id,
                        error = %e,
                        "Failed to notify originator of resolution"
                    );
                }

                let ack = match outcome {
                    ResolveOutcome::Approve => texts::approve_ack(),
                    ResolveOutcome::Reject => texts::reject_ack(),
                };
                self.acknowledge(&event, &ack).await;

                // Strip the stale approve/reject controls from the clicked
                // message; an edit failure is not a resolution failure.
                let resolved_text = texts::resolved_admin_message(
                    request_id,
                    outcome == ResolveOutcome::Approve,
                );
                if let Err(e) = self
                    .transport
                    .edit_message(event.chat_id, event.message_id, &resolved_text)
                    .await
                {
                    warn!(
                        chat_id = event.chat_id,
                        message_id = event.message_id,
                        error = %e,
                        "Failed to edit resolved request message"
                    );
                }
            }
            Ok(Resolution::AlreadyResolved) => {
                self.acknowledge(&event, &texts::already_resolved_ack()).await;
            }
            Err(e) => {
                error!(request_id = request_id, error = %e, "Failed to resolve visit request");
                self.acknowledge(&event, &texts::resolve_failed_ack()).await;
            }
        }
        Ok(())
    }

    async fn dispatch_admin_command(
        &self,
        event: &InboundTextEvent,
        cmd: AdminCommand,
    ) -> Result<()> {
        info!(admin_id = event.sender_id, command = ?cmd, "Administrator command");

        match cmd {
            AdminCommand::List => {
                let admins = self.services.roster.list_admins().await?;
                self.send(event.chat_id, &texts::roster_list(&admins), None)
                    .await;
            }
            AdminCommand::AddAdmin(Some(id)) => {
                self.services.roster.add_admin(id, None, event.sender_id).await?;
                self.send(event.chat_id, &texts::admin_added(), None).await;
            }
            AdminCommand::AddAdmin(None) => {
                self.captures
                    .set(event.chat_id, Capture::AwaitingAdminId(RosterVerb::Add))
                    .await;
                self.send(event.chat_id, &texts::prompt_admin_add_id(), None)
                    .await;
            }
            AdminCommand::RemoveAdmin(Some(id)) => {
                self.services.roster.remove_admin(id).await?;
                self.send(event.chat_id, &texts::admin_removed(), None).await;
            }
            AdminCommand::RemoveAdmin(None) => {
                self.captures
                    .set(event.chat_id, Capture::AwaitingAdminId(RosterVerb::Remove))
                    .await;
                self.send(event.chat_id, &texts::prompt_admin_remove_id(), None)
                    .await;
            }
            AdminCommand::BonusAdd { chat_id, points } => {
                self.store.adjust_points(chat_id, points).await?;
                log_admin_action(event.sender_id, "bonus_add", Some(chat_id));
                self.send(event.chat_id, &texts::bonus_added(), None).await;
            }
            AdminCommand::BonusRemove { chat_id, points } => {
                self.store.adjust_points(chat_id, -points).await?;
                log_admin_action(event.sender_id, "bonus_remove", Some(chat_id));
                self.send(event.chat_id, &texts::bonus_removed(), None).await;
            }
            AdminCommand::Stats { chat_id } => {
                let reply = match self.store.get_participant(chat_id).await? {
                    Some(participant) => texts::stats_text(&participant),
                    None => texts::participant_not_found(),
                };
                self.send(event.chat_id, &reply, None).await;
            }
            AdminCommand::Help => {
                self.send(event.chat_id, &texts::admin_help(), None).await;
            }
        }
        Ok(())
    }

    /// Consume the next message from a chat holding a capture marker as the
    /// missing numeric argument of the parked roster verb.
    async fn consume_captured_id(&self, event: &InboundTextEvent, verb: RosterVerb) -> Result<()> {
        let Ok(target_id) = event.text.trim().parse::<i64>() else {
            // The marker stays in place: the capture is still waiting.
            self.send(event.chat_id, &texts::bad_captured_id(), None).await;
            return Ok(());
        };

        match verb {
            RosterVerb::Add => {
                self.services
                    .roster
                    .add_admin(target_id, None, event.sender_id)
                    .await?;
                self.send(event.chat_id, &texts::admin_added(), None).await;
            }
            RosterVerb::Remove => {
                self.services.roster.remove_admin(target_id).await?;
                self.send(event.chat_id, &texts::admin_removed(), None).await;
            }
        }
        self.captures.clear(event.chat_id).await;
        Ok(())
    }

    async fn handle_terms_gate(
        &self,
        event: &InboundTextEvent,
        participant: Participant,
    ) -> Result<()> {
        if event.text == texts::ACCEPT_TERMS_LABEL {
            let mut updated = participant;
            updated.terms_accepted = true;
            self.store.upsert_participant(&updated).await?;
            info!(chat_id = event.chat_id, "Participant accepted the terms");

            self.send(event.chat_id, &texts::terms_accepted(), None).await;
            self.send(event.chat_id, &texts::welcome(), Some(keyboards::main_menu()))
                .await;
        } else {
            // Any other text, /start included, re-prompts the terms.
            self.send(event.chat_id, &texts::terms_prompt(), Some(keyboards::terms()))
                .await;
        }
        Ok(())
    }

    async fn handle_visit_request(&self, event: &InboundTextEvent) -> Result<()> {
        match self
            .services
            .lifecycle
            .create_request(event.chat_id, event.sender_username.as_deref())
            .await
        {
            Ok(request) => {
                self.send(event.chat_id, &texts::request_submitted(), None).await;
                if let Err(e) = self.services.notifier.request_created(&request).await {
                    error!(
                        request_id = request.id,
                        error = %e,
                        "Failed to fan out request notification"
                    );
                }
            }
            Err(ClubPassError::RequestAlreadyPending { .. }) => {
                self.send(event.chat_id, &texts::request_already_pending(), None)
                    .await;
            }
            Err(e) => {
                error!(chat_id = event.chat_id, error = %e, "Failed to create visit request");
                self.send(event.chat_id, &texts::request_failed(), None).await;
            }
        }
        Ok(())
    }

    async fn get_or_create_participant(&self, event: &InboundTextEvent) -> Result<Participant> {
        if let Some(existing) = self.store.get_participant(event.chat_id).await? {
            return Ok(existing);
        }

        let participant = Participant::new(event.chat_id, event.sender_username.clone());
        self.store.upsert_participant(&participant).await?;
        info!(chat_id = event.chat_id, "New participant registered");
        Ok(participant)
    }

    /// Send a reply, logging delivery failures instead of propagating them.
    async fn send(&self, chat_id: i64, text: &str, keyboard: Option<KeyboardSpec>) {
        if let Err(e) = self.transport.send_message(chat_id, text, keyboard).await {
            warn!(chat_id = chat_id, error = %e, "Failed to send message");
        }
    }

    async fn acknowledge(&self, event: &InboundButtonEvent, text: &str) {
        if let Err(e) = self
            .transport
            .acknowledge_button(&event.callback_token, text)
            .await
        {
            warn!(
                callback_token = %event.callback_token,
                error = %e,
                "Failed to acknowledge button"
            );
        }
    }
}
