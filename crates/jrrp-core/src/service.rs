use chrono::{Local, NaiveDate};

use crate::{
    commands::{parse_command, Action},
    domain::Invoker,
    formatting,
    luck::daily_luck,
    messaging::{port::MessagingPort, types::IncomingText},
    quotes::QuoteBoard,
    Error, Result,
};

fn local_today() -> NaiveDate {
    Local::now().date_naive()
}

/// The command plugin: turns an action into reply text.
///
/// Shared across handlers behind an `Arc`.
pub struct JrrpService {
    board: QuoteBoard,
    command: String,
    today: fn() -> NaiveDate,
}

impl JrrpService {
    pub fn new(board: QuoteBoard, command: impl Into<String>) -> Self {
        Self {
            board,
            command: command.into(),
            today: local_today,
        }
    }

    /// Override the calendar used for the daily seed.
    pub fn with_today(mut self, today: fn() -> NaiveDate) -> Self {
        self.today = today;
        self
    }

    pub fn board(&self) -> &QuoteBoard {
        &self.board
    }

    /// Parse `incoming`, compute the reply and send it quoting the original
    /// message. Returns `false` when the text was not a command for us.
    pub async fn handle(
        &self,
        messenger: &dyn MessagingPort,
        incoming: &IncomingText,
    ) -> Result<bool> {
        let Some(action) = parse_command(&incoming.text, &self.command) else {
            return Ok(false);
        };

        tracing::debug!(
            chat_id = incoming.chat_id.0,
            user = %incoming.invoker.user_id,
            ?action,
            "handling command"
        );

        let reply = self.reply(&incoming.invoker, action).await;
        let caps = messenger.capabilities();
        let reply = truncate_utf16(&reply, caps.max_message_len);
        let reply_to = caps.supports_reply_quote.then_some(incoming.message_id);

        messenger
            .send_text(incoming.chat_id, &reply, reply_to)
            .await?;
        Ok(true)
    }

    pub async fn reply(&self, invoker: &Invoker, action: Action) -> String {
        match action {
            Action::ShowLuck => self.show_luck(invoker).await,
            Action::Submit(raw) => match self.board.submit(&invoker.user_id, &raw).await {
                Ok(record) => formatting::submitted_reply(&record),
                Err(e) => {
                    log_failure("submit", &e);
                    e.user_message(&self.command)
                }
            },
            Action::Retract => match self.board.retract(&invoker.user_id).await {
                Ok(record) => formatting::retracted_reply(&record),
                Err(e) => {
                    log_failure("retract", &e);
                    e.user_message(&self.command)
                }
            },
            Action::Help => formatting::help_text(&self.command),
        }
    }

    pub async fn show_luck(&self, invoker: &Invoker) -> String {
        let luck = daily_luck(invoker, (self.today)());
        let quote = self.board.pick_display_quote().await;
        formatting::luck_reply(&self.command, &luck, &quote)
    }
}

fn log_failure(op: &str, e: &Error) {
    match e {
        Error::Storage(_) | Error::External(_) => {
            tracing::warn!(op, error = %e, "quote operation failed");
        }
        _ => tracing::debug!(op, error = %e, "quote operation rejected"),
    }
}

/// Cut `s` to at most `max` UTF-16 code units (how Telegram measures message
/// length), ending with `...` when shortened. Never splits a character.
fn truncate_utf16(s: &str, max: usize) -> String {
    if max == 0 || s.encode_utf16().count() <= max {
        return s.to_string();
    }
    let budget = max.saturating_sub(3);
    let mut used = 0;
    let mut out = String::new();
    for c in s.chars() {
        used += c.len_utf16();
        if used > budget {
            break;
        }
        out.push(c);
    }
    out.push_str("...");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{ChatId, MessageId, MessageRef};
    use crate::messaging::types::MessagingCapabilities;
    use crate::quotes::memory::InMemoryQuoteStore;
    use crate::random::testing::ScriptedRandom;
    use async_trait::async_trait;
    use std::sync::Arc;

    #[derive(Default)]
    struct FakeMessenger {
        sends: std::sync::Mutex<Vec<(ChatId, String, Option<MessageId>)>>,
    }

    #[async_trait]
    impl MessagingPort for FakeMessenger {
        fn capabilities(&self) -> MessagingCapabilities {
            MessagingCapabilities {
                supports_reply_quote: true,
                max_message_len: 4096,
            }
        }

        async fn send_text(
            &self,
            chat_id: ChatId,
            text: &str,
            reply_to: Option<MessageId>,
        ) -> Result<MessageRef> {
            self.sends
                .lock()
                .unwrap()
                .push((chat_id, text.to_string(), reply_to));
            Ok(MessageRef {
                chat_id,
                message_id: MessageId(1000),
            })
        }
    }

    fn fixed_day() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 18).unwrap()
    }

    fn service() -> JrrpService {
        let board = QuoteBoard::new(Arc::new(InMemoryQuoteStore::new()))
            .with_random(Box::new(ScriptedRandom::new(vec![0])));
        JrrpService::new(board, "jrrp").with_today(fixed_day)
    }

    fn incoming(user: &str, text: &str) -> IncomingText {
        IncomingText {
            chat_id: ChatId(-100),
            message_id: MessageId(7),
            invoker: Invoker::new("telegram", user),
            username: None,
            text: text.to_string(),
        }
    }

    #[tokio::test]
    async fn luck_reply_is_stable_for_the_day() {
        let svc = service();
        let me = Invoker::new("telegram", "42");
        let a = svc.show_luck(&me).await;
        let b = svc.show_luck(&me).await;
        assert_eq!(a, b);
        assert!(a.starts_with("=====『ill』====="));
        assert!(a.contains("* luck index : 31%"));
        assert!(a.contains("---[ from ? ]---"));
    }

    #[tokio::test]
    async fn handle_replies_quoting_the_command_message() {
        let svc = service();
        let messenger = FakeMessenger::default();

        let handled = svc
            .handle(&messenger, &incoming("42", "/jrrp help"))
            .await
            .unwrap();
        assert!(handled);

        let sends = messenger.sends.lock().unwrap();
        assert_eq!(sends.len(), 1);
        assert_eq!(sends[0].0, ChatId(-100));
        assert_eq!(sends[0].2, Some(MessageId(7)));
        assert!(sends[0].1.contains("/jrrp retract"));
    }

    #[tokio::test]
    async fn handle_ignores_unrelated_text() {
        let svc = service();
        let messenger = FakeMessenger::default();
        let handled = svc
            .handle(&messenger, &incoming("42", "good morning"))
            .await
            .unwrap();
        assert!(!handled);
        assert!(messenger.sends.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn submit_then_show_then_retract() {
        let svc = service();
        let me = Invoker::new("telegram", "42");

        let reply = svc
            .reply(
                &me,
                Action::Submit("\n!text\nless is more\n!source\nMies".to_string()),
            )
            .await;
        assert_eq!(reply, "Submitted:\n「less is more」\n    ——Mies");

        let luck = svc.show_luck(&me).await;
        assert!(luck.contains("「less is more」"));
        assert!(luck.contains("---[ from 42 ]---"));

        let reply = svc.reply(&me, Action::Retract).await;
        assert_eq!(reply, "Retracted:\n「less is more」\n    ——Mies");

        let reply = svc.reply(&me, Action::Retract).await;
        assert_eq!(reply, Error::NothingToRetract.user_message("jrrp"));
    }

    #[tokio::test]
    async fn bad_and_duplicate_submissions_reply_with_help_and_rejection() {
        let svc = service();
        let me = Invoker::new("telegram", "42");

        let reply = svc.reply(&me, Action::Submit(String::new())).await;
        assert!(reply.contains("!text"));
        assert!(reply.contains("/jrrp submit"));

        let raw = "!text\nsame\n!source\nx".to_string();
        svc.reply(&me, Action::Submit(raw.clone())).await;
        let reply = svc.reply(&me, Action::Submit(raw)).await;
        assert_eq!(reply, Error::DuplicateQuote.user_message("jrrp"));
    }

    #[test]
    fn truncation_is_char_safe() {
        assert_eq!(truncate_utf16("短文", 10), "短文");
        assert_eq!(truncate_utf16("一二三四五六", 5), "一二...");
    }

    #[test]
    fn truncation_counts_utf16_units() {
        // Each emoji is one char but two UTF-16 units.
        let four = "😀😀😀😀";
        assert_eq!(four.chars().count(), 4);
        assert_eq!(truncate_utf16(four, 8), four);
        assert_eq!(truncate_utf16(four, 7), "😀😀...");
        // A surrogate pair that would straddle the budget is dropped whole.
        assert_eq!(truncate_utf16("a😀😀😀", 5), "a...");

        let long = "😀".repeat(3000);
        let cut = truncate_utf16(&long, 4096);
        assert!(cut.encode_utf16().count() <= 4096);
        assert!(cut.ends_with("..."));
    }

    #[tokio::test]
    async fn oversized_reply_fits_the_messenger_limit() {
        let svc = service();
        let me = Invoker::new("telegram", "42");
        let text = "🍀".repeat(2100);
        let raw = format!("!text\n{text}\n!source\nclover");
        svc.reply(&me, Action::Submit(raw)).await;

        let messenger = FakeMessenger::default();
        svc.handle(&messenger, &incoming("42", "/jrrp")).await.unwrap();
        let sends = messenger.sends.lock().unwrap();
        assert!(sends[0].1.encode_utf16().count() <= 4096);
        assert!(sends[0].1.ends_with("..."));
    }
}
