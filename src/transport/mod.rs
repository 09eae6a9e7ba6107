//! Chat transport interface
//!
//! The dispatcher talks to the chat network exclusively through this module:
//! inbound events normalized from the transport, and the `Transport` trait
//! for outbound messages, edits and button acknowledgements. The
//! Telegram-backed implementation lives in `telegram`.

pub mod telegram;

pub use telegram::TelegramTransport;

use async_trait::async_trait;

use crate::utils::errors::Result;

/// Inbound text message.
#[derive(Debug, Clone)]
pub struct InboundTextEvent {
    pub chat_id: i64,
    pub sender_id: i64,
    pub sender_username: Option<String>,
    pub text: String,
}

/// Inbound inline-button click. The payload carries everything needed to
/// route it, so no chat-state lookup is involved.
#[derive(Debug, Clone)]
pub struct InboundButtonEvent {
    /// Chat the clicked message was posted in.
    pub chat_id: i64,
    /// The clicked message itself, for the stale-controls edit.
    pub message_id: i32,
    pub clicker_id: i64,
    /// Opaque token the transport expects back in the acknowledgement.
    pub callback_token: String,
    pub payload: String,
}

/// Transport-agnostic keyboard description.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyboardSpec {
    /// Persistent reply keyboard with text labels.
    Menu(Vec<Vec<String>>),
    /// One-time reply keyboard, hidden after first use.
    MenuOnce(Vec<Vec<String>>),
    /// Inline buttons attached to the message itself.
    Inline(Vec<Vec<InlineButton>>),
}

/// A single inline button: visible label plus the payload echoed back on
/// click.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineButton {
    pub label: String,
    pub payload: String,
}

impl InlineButton {
    pub fn new(label: impl Into<String>, payload: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            payload: payload.into(),
        }
    }
}

/// Reference to a message accepted by the transport.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageRef {
    pub chat_id: i64,
    pub message_id: i32,
}

/// Outbound side of the chat transport. Any call may fail; callers log
/// delivery failures and never retry automatically.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send_message(
        &self,
        chat_id: i64,
        text: &str,
        keyboard: Option<KeyboardSpec>,
    ) -> Result<MessageRef>;

    /// Replace a previously sent message's text. Editing drops any inline
    /// keyboard the message carried.
    async fn edit_message(&self, chat_id: i64, message_id: i32, text: &str) -> Result<()>;

    /// Answer a button click so the client stops showing a progress state.
    async fn acknowledge_button(&self, callback_token: &str, text: &str) -> Result<()>;
}
