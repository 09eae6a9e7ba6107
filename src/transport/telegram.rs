//! Telegram transport implementation

use async_trait::async_trait;
use teloxide::payloads::{AnswerCallbackQuerySetters, SendMessageSetters};
use teloxide::prelude::*;
use teloxide::types::{
    ChatId, InlineKeyboardButton, InlineKeyboardMarkup, KeyboardButton, KeyboardMarkup, MessageId,
    ReplyMarkup,
};

use crate::utils::errors::Result;

use super::{KeyboardSpec, MessageRef, Transport};

/// `Transport` implementation over a teloxide `Bot`.
#[derive(Clone)]
pub struct TelegramTransport {
    bot: Bot,
}

impl TelegramTransport {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }

    fn reply_markup(spec: KeyboardSpec) -> ReplyMarkup {
        match spec {
            KeyboardSpec::Menu(rows) => ReplyMarkup::Keyboard(Self::menu_markup(rows)),
            KeyboardSpec::MenuOnce(rows) => {
                ReplyMarkup::Keyboard(Self::menu_markup(rows).one_time_keyboard())
            }
            KeyboardSpec::Inline(rows) => {
                let rows = rows
                    .into_iter()
                    .map(|row| {
                        row.into_iter()
                            .map(|button| InlineKeyboardButton::callback(button.label, button.payload))
                            .collect::<Vec<_>>()
                    })
                    .collect::<Vec<_>>();
                ReplyMarkup::InlineKeyboard(InlineKeyboardMarkup::new(rows))
            }
        }
    }

    fn menu_markup(rows: Vec<Vec<String>>) -> KeyboardMarkup {
        let rows = rows
            .into_iter()
            .map(|row| row.into_iter().map(KeyboardButton::new).collect::<Vec<_>>())
            .collect::<Vec<_>>();
        KeyboardMarkup::new(rows).resize_keyboard()
    }
}

#[async_trait]
impl Transport for TelegramTransport {
    async fn send_message(
        &self,
        chat_id: i64,
        text: &str,
        keyboard: Option<KeyboardSpec>,
    ) -> Result<MessageRef> {
        let mut request = self.bot.send_message(ChatId(chat_id), text);
        if let Some(spec) = keyboard {
            request = request.reply_markup(Self::reply_markup(spec));
        }
        let sent = request.await?;
        Ok(MessageRef {
            chat_id,
            message_id: sent.id.0,
        })
    }

    async fn edit_message(&self, chat_id: i64, message_id: i32, text: &str) -> Result<()> {
        self.bot
            .edit_message_text(ChatId(chat_id), MessageId(message_id), text)
            .await?;
        Ok(())
    }

    async fn acknowledge_button(&self, callback_token: &str, text: &str) -> Result<()> {
        self.bot
            .answer_callback_query(callback_token.to_owned())
            .text(text.to_owned())
            .await?;
        Ok(())
    }
}
