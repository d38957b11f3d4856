/// Chat id on the host platform (numeric).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ChatId(pub i64);

/// Message id on the host platform (numeric).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MessageId(pub i32);

/// A stable reference to a sent or received message.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MessageRef {
    pub chat_id: ChatId,
    pub message_id: MessageId,
}

/// Who invoked a command, as seen by the luck engine and the quote board.
///
/// `platform` keeps users of different hosts apart: the same numeric id on
/// two platforms must not share a daily score.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Invoker {
    pub platform: String,
    pub user_id: String,
}

impl Invoker {
    pub fn new(platform: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            platform: platform.into(),
            user_id: user_id.into(),
        }
    }
}
