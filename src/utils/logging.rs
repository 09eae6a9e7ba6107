//! Logging configuration and setup
//!
//! This module provides logging initialization and structured logging
//! utilities for the ClubPass application.

use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::LoggingConfig;
use crate::utils::errors::Result;

/// Initialize logging based on configuration.
///
/// The returned guard must be held for the lifetime of the process, or the
/// non-blocking file writer stops flushing.
pub fn init_logging(config: &LoggingConfig) -> Result<WorkerGuard> {
    let file_appender = tracing_appender::rolling::daily(&config.dir, "clubpass.log");
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.level))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stdout))
        .with(tracing_subscriber::fmt::layer().with_writer(non_blocking))
        .init();

    info!("Logging initialized with level: {}", config.level);
    Ok(guard)
}

/// Log roster and ledger actions performed by administrators.
pub fn log_admin_action(admin_id: i64, action: &str, target: Option<i64>) {
    warn!(
        admin_id = admin_id,
        action = action,
        target = target,
        "Admin action performed"
    );
}
