//! Keyboard layouts
//!
//! The three keyboards the bot ever shows, built over the transport-agnostic
//! `KeyboardSpec`.

use crate::texts;
use crate::transport::{InlineButton, KeyboardSpec};

/// Main menu shown to members who accepted the terms.
pub fn main_menu() -> KeyboardSpec {
    KeyboardSpec::Menu(vec![
        vec![
            texts::ADD_VISIT_LABEL.to_string(),
            texts::MY_STATS_LABEL.to_string(),
        ],
        vec![texts::BONUS_LABEL.to_string()],
    ])
}

/// Single-button keyboard offered with the terms prompt.
pub fn terms() -> KeyboardSpec {
    KeyboardSpec::MenuOnce(vec![vec![texts::ACCEPT_TERMS_LABEL.to_string()]])
}

/// Approve/reject controls attached to an administrator notification,
/// keyed by request id.
pub fn approve_reject(request_id: i64) -> KeyboardSpec {
    KeyboardSpec::Inline(vec![vec![
        InlineButton::new("✅ Approve", format!("approve_{request_id}")),
        InlineButton::new("❌ Reject", format!("reject_{request_id}")),
    ]])
}
