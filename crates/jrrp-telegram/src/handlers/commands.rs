use std::sync::Arc;

use teloxide::{prelude::*, types::Message};

use jrrp_core::{
    domain::{ChatId, Invoker, MessageId},
    messaging::types::IncomingText,
};

use crate::{router::AppState, PLATFORM};

pub(crate) fn incoming_text(
    chat_id: i64,
    message_id: i32,
    user_id: u64,
    username: Option<String>,
    text: &str,
) -> IncomingText {
    IncomingText {
        chat_id: ChatId(chat_id),
        message_id: MessageId(message_id),
        invoker: Invoker::new(PLATFORM, user_id.to_string()),
        username,
        text: text.to_string(),
    }
}

pub async fn handle_command(msg: Message, state: Arc<AppState>) -> ResponseResult<()> {
    let Some(user) = msg.from() else {
        return Ok(());
    };
    // Captions count too: a submission may arrive attached to a photo.
    let Some(text) = msg.text().or_else(|| msg.caption()) else {
        return Ok(());
    };

    let incoming = incoming_text(
        msg.chat.id.0,
        msg.id.0,
        user.id.0,
        user.username.clone(),
        text,
    );

    match state
        .service
        .handle(state.messenger.as_ref(), &incoming)
        .await
    {
        Ok(true) => tracing::debug!(
            chat_id = incoming.chat_id.0,
            user = ?incoming.username,
            "command answered"
        ),
        Ok(false) => {}
        Err(e) => tracing::warn!(chat_id = incoming.chat_id.0, error = %e, "failed to send reply"),
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invoker_is_scoped_to_telegram() {
        let incoming = incoming_text(-42, 7, 123456789, Some("alice".to_string()), "/jrrp");
        assert_eq!(incoming.invoker, Invoker::new("telegram", "123456789"));
        assert_eq!(incoming.chat_id, ChatId(-42));
        assert_eq!(incoming.message_id, MessageId(7));
        assert_eq!(incoming.text, "/jrrp");
    }
}
