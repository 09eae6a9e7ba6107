//! Reply texts and menu labels
//!
//! Every user- and admin-facing string lives here, so the dispatcher matches
//! on the exact labels the keyboards advertise.

use crate::models::{Admin, Participant, VisitRequest};

/// Reply-keyboard labels. Matching is exact-string.
pub const ACCEPT_TERMS_LABEL: &str = "✅ Accept the terms";
pub const ADD_VISIT_LABEL: &str = "🎟 Add a visit";
pub const MY_STATS_LABEL: &str = "⭐ My stats";
pub const BONUS_LABEL: &str = "🎁 Bonus points";

pub fn terms_prompt() -> String {
    "📝 Terms of use\n\n\
     1. The bot records your visits to the club\n\
     2. Your chat ID and visit statistics are stored in our database\n\
     3. You can stop using the bot at any time\n\
     4. The administration may change these rules\n\n\
     To use the bot, please accept the terms:"
        .to_string()
}

pub fn terms_accepted() -> String {
    "✅ Great! You have accepted the terms.\n\nAll bot features are now available!".to_string()
}

pub fn welcome() -> String {
    "🎯 Welcome to the club bot!\n\nChoose an action:".to_string()
}

pub fn stats_text(participant: &Participant) -> String {
    format!(
        "🎯 Your statistics:\n\n\
         🎟 Visits recorded: {}\n\
         ⭐ Bonus points: {}\n\
         📅 Member since: {}\n\n\
         💎 10 points = 1 free visit",
        participant.games_played,
        participant.bonus_points,
        participant.registered_at.format("%d.%m.%Y"),
    )
}

pub fn bonus_text(participant: &Participant) -> String {
    let free_visits = (participant.bonus_points / 10).max(0);
    format!(
        "🎁 Bonus program\n\n\
         ⭐ Your points: {}\n\
         🎟 Free visits available: {}\n\n\
         💎 Rules:\n\
         • 1 visit = 10 points\n\
         • 10 points = 1 free visit\n\
         • Points never expire",
        participant.bonus_points, free_visits,
    )
}

pub fn participant_not_found() -> String {
    "❌ Participant not found!".to_string()
}

pub fn request_submitted() -> String {
    "✅ Your visit request was sent to the administrators. Please wait for confirmation."
        .to_string()
}

pub fn request_already_pending() -> String {
    "⏳ You already have a visit request awaiting review.".to_string()
}

pub fn request_failed() -> String {
    "❌ Could not create the request. Please try again later.".to_string()
}

/// Message broadcast to every administrator when a request is created.
pub fn request_notification(request: &VisitRequest) -> String {
    format!(
        "🎟 New visit request\n\n\
         Request ID: {}\n\
         Member: @{}\n\
         Chat ID: {}\n\
         Submitted: {}\n\n\
         Approve this visit?",
        request.id,
        request.username.as_deref().unwrap_or("unknown"),
        request.chat_id,
        request.requested_at.format("%d.%m.%Y %H:%M"),
    )
}

pub fn request_approved_notice() -> String {
    "✅ Your visit was approved by an administrator! +10 bonus points".to_string()
}

pub fn request_rejected_notice() -> String {
    "❌ Your visit request was rejected by an administrator.".to_string()
}

pub fn approve_ack() -> String {
    "✅ Visit approved".to_string()
}

pub fn reject_ack() -> String {
    "❌ Visit rejected".to_string()
}

pub fn already_resolved_ack() -> String {
    "⚠️ This request was already handled".to_string()
}

pub fn resolve_failed_ack() -> String {
    "❌ Could not process the request".to_string()
}

/// Replacement text for the admin notification once the request is resolved.
pub fn resolved_admin_message(request_id: i64, approved: bool) -> String {
    if approved {
        format!("🎟 Request #{request_id} — approved ✅")
    } else {
        format!("🎟 Request #{request_id} — rejected ❌")
    }
}

pub fn roster_list(admins: &[Admin]) -> String {
    let mut message = String::from("👑 Administrators:\n\n");
    if admins.is_empty() {
        message.push_str("• (none)\n");
        return message;
    }
    for admin in admins {
        message.push_str(&format!(
            "• @{} (ID: {})\n",
            admin.username.as_deref().unwrap_or("unknown"),
            admin.user_id,
        ));
    }
    message
}

pub fn admin_added() -> String {
    "✅ Administrator added successfully!".to_string()
}

pub fn admin_removed() -> String {
    "✅ Administrator removed successfully!".to_string()
}

pub fn prompt_admin_add_id() -> String {
    "To add an administrator, send:\n/admin_add [user ID]\n\nOr just send the numeric ID now."
        .to_string()
}

pub fn prompt_admin_remove_id() -> String {
    "To remove an administrator, send:\n/admin_remove [user ID]\n\nOr just send the numeric ID now."
        .to_string()
}

pub fn bad_captured_id() -> String {
    "❌ Invalid ID format. Send the numeric user ID.".to_string()
}

pub fn bonus_added() -> String {
    "✅ Bonus points added!".to_string()
}

pub fn bonus_removed() -> String {
    "✅ Bonus points deducted!".to_string()
}

pub fn admin_help() -> String {
    "👑 Administrator commands:\n\n\
     /admin_list — list administrators\n\
     /admin_add [id] — add an administrator\n\
     /admin_remove [id] — remove an administrator\n\
     /bonus_add [id] [points] — add bonus points to a member\n\
     /bonus_remove [id] [points] — deduct bonus points from a member\n\
     /stats [id] — show a member's statistics\n\
     /admin_help — this message"
        .to_string()
}
