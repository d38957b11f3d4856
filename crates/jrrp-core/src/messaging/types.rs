use crate::domain::{ChatId, Invoker, MessageId};

/// A chat message addressed to the bot, already stripped of transport details.
#[derive(Clone, Debug)]
pub struct IncomingText {
    pub chat_id: ChatId,
    pub message_id: MessageId,
    pub invoker: Invoker,
    pub username: Option<String>,
    pub text: String,
}

/// Capabilities / feature flags of a messenger implementation.
#[derive(Clone, Copy, Debug)]
pub struct MessagingCapabilities {
    pub supports_reply_quote: bool,
    pub max_message_len: usize,
}
