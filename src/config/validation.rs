//! Configuration validation module
//!
//! Validation functions for application configuration to ensure all required
//! settings are properly configured before startup.

use crate::utils::errors::{ClubPassError, Result};

use super::Settings;

/// Validate all configuration settings
pub fn validate_settings(settings: &Settings) -> Result<()> {
    validate_bot_config(&settings.bot)?;
    validate_database_config(&settings.database)?;
    validate_logging_config(&settings.logging)?;

    Ok(())
}

/// Validate bot configuration
fn validate_bot_config(config: &super::BotConfig) -> Result<()> {
    if config.token.is_empty() {
        return Err(ClubPassError::Config("Bot token is required".to_string()));
    }

    Ok(())
}

/// Validate database configuration
fn validate_database_config(config: &super::DatabaseConfig) -> Result<()> {
    if config.url.is_empty() {
        return Err(ClubPassError::Config(
            "Database URL is required".to_string(),
        ));
    }

    if config.max_connections == 0 {
        return Err(ClubPassError::Config(
            "Max connections must be greater than 0".to_string(),
        ));
    }

    if config.min_connections > config.max_connections {
        return Err(ClubPassError::Config(
            "Min connections cannot be greater than max connections".to_string(),
        ));
    }

    Ok(())
}

/// Validate logging configuration
fn validate_logging_config(config: &super::LoggingConfig) -> Result<()> {
    if config.level.is_empty() {
        return Err(ClubPassError::Config(
            "Logging level is required".to_string(),
        ));
    }

    if config.dir.is_empty() {
        return Err(ClubPassError::Config(
            "Logging directory is required".to_string(),
        ));
    }

    Ok(())
}
