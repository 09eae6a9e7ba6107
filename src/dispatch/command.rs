//! Administrator command grammar
//!
//! Commands are parsed once at the boundary into tagged variants. Matching is
//! case-sensitive and space-delimited. Verbs under the reserved `/admin_` and
//! `/bonus_` prefixes that match no known command are rejected explicitly
//! instead of falling through.

use crate::services::ResolveOutcome;

/// A fully parsed administrator command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminCommand {
    /// `/admin_list`
    List,
    /// `/admin_add [id]` — the bare form starts a two-step capture.
    AddAdmin(Option<i64>),
    /// `/admin_remove [id]` — the bare form starts a two-step capture.
    RemoveAdmin(Option<i64>),
    /// `/bonus_add <chat_id> <points>`
    BonusAdd { chat_id: i64, points: i32 },
    /// `/bonus_remove <chat_id> <points>`
    BonusRemove { chat_id: i64, points: i32 },
    /// `/stats <chat_id>`
    Stats { chat_id: i64 },
    /// `/admin_help`
    Help,
}

/// Why a recognized command failed to parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    UnknownVerb(String),
    BadNumber { usage: &'static str },
    WrongArity { usage: &'static str },
}

impl CommandError {
    /// Corrective message shown to the sender.
    pub fn user_message(&self) -> String {
        match self {
            CommandError::UnknownVerb(verb) => {
                format!("❌ Unknown command: {verb}\nSend /admin_help for the list of commands.")
            }
            CommandError::BadNumber { usage } => {
                format!("❌ Invalid number format. Use: {usage}")
            }
            CommandError::WrongArity { usage } => {
                format!("❌ Wrong arguments. Use: {usage}")
            }
        }
    }
}

const USAGE_ADMIN_LIST: &str = "/admin_list";
const USAGE_ADMIN_HELP: &str = "/admin_help";
const USAGE_ADMIN_ADD: &str = "/admin_add [numeric user ID]";
const USAGE_ADMIN_REMOVE: &str = "/admin_remove [numeric user ID]";
const USAGE_BONUS_ADD: &str = "/bonus_add [chat ID] [points]";
const USAGE_BONUS_REMOVE: &str = "/bonus_remove [chat ID] [points]";
const USAGE_STATS: &str = "/stats [chat ID]";

impl AdminCommand {
    /// Parse `text` as an administrator command.
    ///
    /// Returns `None` when the text is not an administrator command at all,
    /// and `Some(Err(..))` when the verb is recognized (or reserved) but the
    /// arguments do not parse.
    pub fn parse(text: &str) -> Option<Result<AdminCommand, CommandError>> {
        let mut parts = text.split_whitespace();
        let verb = parts.next()?;
        let args: Vec<&str> = parts.collect();

        let parsed = match verb {
            "/admin_list" => require_no_args(&args, USAGE_ADMIN_LIST).map(|_| AdminCommand::List),
            "/admin_help" => require_no_args(&args, USAGE_ADMIN_HELP).map(|_| AdminCommand::Help),
            "/admin_add" => parse_optional_id(&args, USAGE_ADMIN_ADD).map(AdminCommand::AddAdmin),
            "/admin_remove" => {
                parse_optional_id(&args, USAGE_ADMIN_REMOVE).map(AdminCommand::RemoveAdmin)
            }
            "/bonus_add" => parse_id_and_points(&args, USAGE_BONUS_ADD)
                .map(|(chat_id, points)| AdminCommand::BonusAdd { chat_id, points }),
            "/bonus_remove" => parse_id_and_points(&args, USAGE_BONUS_REMOVE)
                .map(|(chat_id, points)| AdminCommand::BonusRemove { chat_id, points }),
            "/stats" => {
                parse_single_id(&args, USAGE_STATS).map(|chat_id| AdminCommand::Stats { chat_id })
            }
            _ if verb.starts_with("/admin_") || verb.starts_with("/bonus_") => {
                Err(CommandError::UnknownVerb(verb.to_string()))
            }
            _ => return None,
        };
        Some(parsed)
    }
}

fn require_no_args(args: &[&str], usage: &'static str) -> Result<(), CommandError> {
    if args.is_empty() {
        Ok(())
    } else {
        Err(CommandError::WrongArity { usage })
    }
}

fn parse_optional_id(args: &[&str], usage: &'static str) -> Result<Option<i64>, CommandError> {
    match args {
        [] => Ok(None),
        [id] => id
            .parse::<i64>()
            .map(Some)
            .map_err(|_| CommandError::BadNumber { usage }),
        _ => Err(CommandError::WrongArity { usage }),
    }
}

fn parse_single_id(args: &[&str], usage: &'static str) -> Result<i64, CommandError> {
    match args {
        [id] => id
            .parse::<i64>()
            .map_err(|_| CommandError::BadNumber { usage }),
        _ => Err(CommandError::WrongArity { usage }),
    }
}

fn parse_id_and_points(args: &[&str], usage: &'static str) -> Result<(i64, i32), CommandError> {
    match args {
        [id, points] => {
            let chat_id = id
                .parse::<i64>()
                .map_err(|_| CommandError::BadNumber { usage })?;
            let points = points
                .parse::<i32>()
                .map_err(|_| CommandError::BadNumber { usage })?;
            Ok((chat_id, points))
        }
        _ => Err(CommandError::WrongArity { usage }),
    }
}

/// Parse an approve/reject button payload into its outcome and request id.
pub fn parse_button_payload(payload: &str) -> Option<(ResolveOutcome, i64)> {
    let (outcome, rest) = if let Some(rest) = payload.strip_prefix("approve_") {
        (ResolveOutcome::Approve, rest)
    } else if let Some(rest) = payload.strip_prefix("reject_") {
        (ResolveOutcome::Reject, rest)
    } else {
        return None;
    };
    rest.parse::<i64>().ok().map(|id| (outcome, id))
}
