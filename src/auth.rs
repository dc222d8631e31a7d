use std::sync::Arc;

use teloxide::dispatching::UpdateHandler;
use teloxide::prelude::*;

use crate::config::Config;
use crate::error::Error;
use crate::messages;
use crate::messenger::Messenger;

pub fn sender(update: &Update) -> Option<UserId> {
    update.from().map(|user| user.id)
}

/// Updates without a sender are never allowed through.
pub fn is_allowed(config: &Config, sender: Option<UserId>) -> bool {
    sender.is_some_and(|user| config.is_authorized(user))
}

/// Runs before every command. Returns `true` for updates that must not reach
/// any handler.
pub fn blocks(update: Update, config: Arc<Config>) -> bool {
    !is_allowed(&config, sender(&update))
}

/// Sends every blocked update to `rejected`; only the rest reach `commands`.
pub fn gate(
    rejected: UpdateHandler<Error>,
    commands: UpdateHandler<Error>,
) -> UpdateHandler<Error> {
    dptree::entry()
        .branch(dptree::filter(blocks).chain(rejected))
        .branch(commands)
}

/// Endpoint for blocked updates: tells the sender their id so they can hand
/// it to whoever runs the bot.
pub async fn reject_update(bot: Bot, update: Update) -> Result<(), Error> {
    let Some(user) = sender(&update) else {
        log::info!("Dropping update {:?} without sender", update.id);
        return Ok(());
    };

    log::info!("Rejected unauthorized user {}", user.0);

    let chat_id = update
        .chat()
        .map(|chat| chat.id)
        .unwrap_or_else(|| ChatId::from(user));
    reject(&bot, chat_id, user).await
}

pub async fn reject<M: Messenger>(
    messenger: &M,
    chat_id: ChatId,
    user: UserId,
) -> Result<(), Error> {
    messenger.send_text(chat_id, messages::user_id(user)).await
}
