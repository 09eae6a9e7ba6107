//! ClubPass Telegram Bot
//!
//! Main application entry point

#![allow(non_snake_case)]

use std::sync::Arc;

use teloxide::dispatching::UpdateFilterExt;
use teloxide::prelude::*;
use teloxide::types::{CallbackQuery, Update};
use tracing::{error, info, warn};

use ClubPass::{
    config::Settings,
    database::{connection::create_pool, connection::run_migrations, DatabaseService},
    dispatch::ConversationDispatcher,
    store::LedgerStore,
    transport::{InboundButtonEvent, InboundTextEvent, TelegramTransport, Transport},
    utils::logging,
};

type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    // Load configuration
    let settings = Settings::new()?;
    settings.validate()?;

    // Initialize logging; the guard keeps the file writer alive.
    let _guard = logging::init_logging(&settings.logging)?;

    info!("Starting {}...", ClubPass::info());

    // Initialize database connection
    info!("Connecting to database...");
    let pool = create_pool(&settings.database).await?;
    run_migrations(&pool).await?;

    let store: Arc<dyn LedgerStore> = Arc::new(DatabaseService::new(pool));

    // Initialize bot and transport
    let bot = Bot::new(&settings.bot.token);
    let transport: Arc<dyn Transport> = Arc::new(TelegramTransport::new(bot.clone()));

    let dispatcher = Arc::new(ConversationDispatcher::new(store, transport));

    info!("Setting up bot handlers...");

    let handler = dptree::entry()
        .branch(Update::filter_message().endpoint(handle_message))
        .branch(Update::filter_callback_query().endpoint(handle_callback_query));

    info!("ClubPass bot is ready, starting polling...");

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![dispatcher])
        .default_handler(|update| async move {
            warn!("Unhandled update: {:?}", update);
        })
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    info!("ClubPass bot has been shut down.");

    Ok(())
}

/// Convert a Telegram message into a transport event and hand it to the
/// conversation dispatcher. No event outcome is fatal to the loop.
async fn handle_message(
    msg: Message,
    dispatcher: Arc<ConversationDispatcher>,
) -> HandlerResult {
    let Some(text) = msg.text() else {
        return Ok(());
    };
    let Some(from) = msg.from.as_ref() else {
        return Ok(());
    };

    let event = InboundTextEvent {
        chat_id: msg.chat.id.0,
        sender_id: from.id.0 as i64,
        sender_username: from.username.clone(),
        text: text.to_string(),
    };

    if let Err(e) = dispatcher.handle_text(event).await {
        error!(error = %e, "Error handling message");
    }

    Ok(())
}

/// Convert a callback query into a button event and hand it to the
/// conversation dispatcher.
async fn handle_callback_query(
    query: CallbackQuery,
    dispatcher: Arc<ConversationDispatcher>,
) -> HandlerResult {
    let Some(payload) = query.data.clone() else {
        return Ok(());
    };
    let Some(message) = query.message.as_ref() else {
        return Ok(());
    };

    let event = InboundButtonEvent {
        chat_id: message.chat().id.0,
        message_id: message.id().0,
        clicker_id: query.from.id.0 as i64,
        callback_token: query.id.clone(),
        payload,
    };

    if let Err(e) = dispatcher.handle_button(event).await {
        error!(error = %e, "Error handling callback query");
    }

    Ok(())
}
