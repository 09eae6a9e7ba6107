//! ClubPass Telegram Bot
//!
//! A Telegram bot for club visit tracking and loyalty points. Members accept
//! the terms, request credit for their club visits and collect bonus points;
//! administrators adjudicate the requests and manage the roster.

#![allow(non_snake_case)]

pub mod config;
pub mod database;
pub mod dispatch;
pub mod keyboards;
pub mod models;
pub mod services;
pub mod state;
pub mod store;
pub mod texts;
pub mod transport;
pub mod utils;

// Re-export commonly used types
pub use config::Settings;
pub use utils::errors::{ClubPassError, Result};

// Re-export main components for easy access
pub use database::DatabaseService;
pub use dispatch::ConversationDispatcher;
pub use store::{LedgerStore, MemoryLedger};
pub use transport::{TelegramTransport, Transport};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Get library information
pub fn info() -> String {
    format!("{} v{}", NAME, VERSION)
}
