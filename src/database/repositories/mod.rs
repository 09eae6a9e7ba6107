//! Database repositories module
//!
//! One repository per row set, in the same shape: a pool handle and the
//! queries that touch that table.

pub mod admin;
pub mod participant;
pub mod visit_request;

pub use admin::AdminRepository;
pub use participant::ParticipantRepository;
pub use visit_request::VisitRequestRepository;
