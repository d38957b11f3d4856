use std::sync::Arc;

use teloxide::{dispatching::Dispatcher, dptree, prelude::*, types::BotCommand};

use jrrp_core::{config::Config, messaging::port::MessagingPort, service::JrrpService};

use crate::handlers;
use crate::TelegramMessenger;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<JrrpService>,
    pub messenger: Arc<dyn MessagingPort>,
}

/// Entries for Telegram's command menu.
pub fn bot_commands(command: &str) -> Vec<BotCommand> {
    vec![BotCommand::new(
        command,
        "Today's luck index + a random quote (add: submit | retract | help)",
    )]
}

pub async fn run_polling(cfg: Arc<Config>, service: Arc<JrrpService>) -> anyhow::Result<()> {
    let bot = Bot::new(cfg.telegram_bot_token.clone());

    // Basic startup info.
    match bot.get_me().await {
        Ok(me) => tracing::info!(username = %me.username(), "jrrp started"),
        Err(e) => tracing::warn!(error = %e, "get_me failed"),
    }
    tracing::info!(
        command = %cfg.command_name,
        remote = service.board().has_remote(),
        "serving commands"
    );

    // Best-effort: the bot works without the command menu.
    if let Err(e) = bot.set_my_commands(bot_commands(&cfg.command_name)).await {
        tracing::warn!(error = %e, "failed to register bot commands");
    }

    let messenger: Arc<dyn MessagingPort> = Arc::new(TelegramMessenger::new(bot.clone()));

    let state = Arc::new(AppState { service, messenger });

    let handler = dptree::entry().branch(Update::filter_message().endpoint(handlers::handle_message));

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![state])
        .build()
        .dispatch()
        .await;

    Ok(())
}
