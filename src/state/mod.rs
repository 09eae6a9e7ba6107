//! State management module
//!
//! Conversation-scoped state that is not part of the durable ledger: the
//! two-step capture markers and the per-chat lock registry.

pub mod capture;
pub mod locks;

pub use capture::{Capture, CaptureTable, RosterVerb};
pub use locks::ChatLocks;
