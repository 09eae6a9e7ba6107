//! Error handling for ClubPass
//!
//! This module defines the main error type used throughout the application
//! and provides a unified error handling strategy.

use thiserror::Error;

/// Main error type for the ClubPass application
#[derive(Error, Debug)]
pub enum ClubPassError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Database migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    #[error("Telegram API error: {0}")]
    Telegram(#[from] teloxide::RequestError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Participant not found: {chat_id}")]
    ParticipantNotFound { chat_id: i64 },

    #[error("Visit request not found: {request_id}")]
    RequestNotFound { request_id: i64 },

    #[error("Participant {chat_id} already has a pending visit request")]
    RequestAlreadyPending { chat_id: i64 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<config::ConfigError> for ClubPassError {
    fn from(err: config::ConfigError) -> Self {
        ClubPassError::Config(err.to_string())
    }
}

/// Result type alias for ClubPass operations
pub type Result<T> = std::result::Result<T, ClubPassError>;
