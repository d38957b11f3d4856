//! Telegram update handlers.
//!
//! Each handler is a small adapter that:
//! - extracts the text and the sender from the Telegram update
//! - hands it to the `jrrp-core` service, which replies through the messenger

use std::sync::Arc;

use teloxide::{prelude::*, types::Message};

use crate::router::AppState;

mod commands;

pub async fn handle_message(msg: Message, state: Arc<AppState>) -> ResponseResult<()> {
    commands::handle_command(msg, state).await
}
