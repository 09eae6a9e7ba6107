//! Shared test fixtures: an in-memory ledger, a recording transport and a
//! fully wired dispatcher.

#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::atomic::{AtomicI32, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;

use ClubPass::dispatch::ConversationDispatcher;
use ClubPass::models::Admin;
use ClubPass::store::{LedgerStore, MemoryLedger};
use ClubPass::transport::{
    InboundButtonEvent, InboundTextEvent, KeyboardSpec, MessageRef, Transport,
};
use ClubPass::utils::errors::{ClubPassError, Result};
use ClubPass::texts;

/// A message recorded by the test transport.
#[derive(Debug, Clone)]
pub struct SentMessage {
    pub chat_id: i64,
    pub message_id: i32,
    pub text: String,
    pub keyboard: Option<KeyboardSpec>,
}

/// Transport double that records every outbound call and can be told to fail
/// deliveries to selected chats.
#[derive(Default)]
pub struct RecordingTransport {
    sent: Mutex<Vec<SentMessage>>,
    edits: Mutex<Vec<(i64, i32, String)>>,
    acks: Mutex<Vec<(String, String)>>,
    failing_chats: Mutex<HashSet<i64>>,
    next_message_id: AtomicI32,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent delivery to `chat_id` fail.
    pub fn fail_deliveries_to(&self, chat_id: i64) {
        self.failing_chats.lock().unwrap().insert(chat_id);
    }

    pub fn sent(&self) -> Vec<SentMessage> {
        self.sent.lock().unwrap().clone()
    }

    pub fn sent_to(&self, chat_id: i64) -> Vec<SentMessage> {
        self.sent()
            .into_iter()
            .filter(|m| m.chat_id == chat_id)
            .collect()
    }

    pub fn last_text_to(&self, chat_id: i64) -> Option<String> {
        self.sent_to(chat_id).last().map(|m| m.text.clone())
    }

    pub fn edits(&self) -> Vec<(i64, i32, String)> {
        self.edits.lock().unwrap().clone()
    }

    pub fn acks(&self) -> Vec<(String, String)> {
        self.acks.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn send_message(
        &self,
        chat_id: i64,
        text: &str,
        keyboard: Option<KeyboardSpec>,
    ) -> Result<MessageRef> {
        if self.failing_chats.lock().unwrap().contains(&chat_id) {
            return Err(ClubPassError::InvalidInput(format!(
                "simulated delivery failure to {chat_id}"
            )));
        }
        let message_id = self.next_message_id.fetch_add(1, Ordering::SeqCst) + 1;
        self.sent.lock().unwrap().push(SentMessage {
            chat_id,
            message_id,
            text: text.to_string(),
            keyboard,
        });
        Ok(MessageRef {
            chat_id,
            message_id,
        })
    }

    async fn edit_message(&self, chat_id: i64, message_id: i32, text: &str) -> Result<()> {
        self.edits
            .lock()
            .unwrap()
            .push((chat_id, message_id, text.to_string()));
        Ok(())
    }

    async fn acknowledge_button(&self, callback_token: &str, text: &str) -> Result<()> {
        self.acks
            .lock()
            .unwrap()
            .push((callback_token.to_string(), text.to_string()));
        Ok(())
    }
}

pub struct TestBot {
    pub dispatcher: ConversationDispatcher,
    pub store: Arc<MemoryLedger>,
    pub transport: Arc<RecordingTransport>,
}

pub fn test_bot() -> TestBot {
    let store = Arc::new(MemoryLedger::new());
    let transport = Arc::new(RecordingTransport::new());
    let dispatcher = ConversationDispatcher::new(store.clone(), transport.clone());
    TestBot {
        dispatcher,
        store,
        transport,
    }
}

pub async fn seed_admin(store: &MemoryLedger, user_id: i64) {
    store
        .upsert_admin(&Admin {
            user_id,
            username: Some(format!("admin{user_id}")),
            added_by: user_id,
            added_at: Utc::now(),
        })
        .await
        .unwrap();
}

/// Text event whose sender id equals the chat id, as in a private chat.
pub fn text_from(chat_id: i64, text: &str) -> InboundTextEvent {
    InboundTextEvent {
        chat_id,
        sender_id: chat_id,
        sender_username: Some(format!("member{chat_id}")),
        text: text.to_string(),
    }
}

pub fn click(chat_id: i64, message_id: i32, clicker_id: i64, payload: &str) -> InboundButtonEvent {
    InboundButtonEvent {
        chat_id,
        message_id,
        clicker_id,
        callback_token: format!("cb-{payload}"),
        payload: payload.to_string(),
    }
}

/// Run a chat through /start and terms acceptance.
pub async fn onboard(bot: &TestBot, chat_id: i64) {
    bot.dispatcher
        .handle_text(text_from(chat_id, "/start"))
        .await
        .unwrap();
    bot.dispatcher
        .handle_text(text_from(chat_id, texts::ACCEPT_TERMS_LABEL))
        .await
        .unwrap();
}
