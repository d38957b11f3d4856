//! Cross-messenger abstractions (Telegram today; other hosts later).

pub mod port;
pub mod types;
