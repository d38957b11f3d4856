//! Reply text for every command.

use crate::{
    luck::LuckResult,
    quotes::{DisplayQuote, QuoteOrigin, QuoteRecord},
};

/// How to submit, starting with the exact command line the bot accepts.
pub fn submission_format(command: &str) -> String {
    format!(
        "/{command} submit\n!text\nyour quote here, may span lines\n!source\nwhere it is from, e.g. author《work》"
    )
}

/// Shown in place of a quote when there is nothing to pick.
pub fn fallback_prompt(command: &str) -> String {
    format!("No quotes yet! Be the first to add one:\n/{command} submit")
}

const SEPARATOR: &str = "- - - - - - - - - - - - - - - -";

pub fn help_text(command: &str) -> String {
    format!(
        "jrrp: daily luck + quotes (just for fun)\n\
/{command} -> today's luck index + a random quote\n\
/{command} submit -> show how to submit a quote\n\
/{command} retract -> retract your latest submission\n\
/{command} help -> show this message"
    )
}

/// `「text」` with an indented attribution line (omitted when empty).
pub fn quote_block(text: &str, source: &str) -> String {
    if source.trim().is_empty() {
        return format!("「{text}」");
    }
    format!("「{text}」\n    ——{source}")
}

pub fn attribution(origin: &QuoteOrigin) -> &str {
    match origin {
        QuoteOrigin::Local { sender } if !sender.is_empty() => sender,
        QuoteOrigin::Remote { provider } => provider,
        _ => "?",
    }
}

pub fn luck_reply(command: &str, luck: &LuckResult, quote: &DisplayQuote) -> String {
    let body = match quote.origin {
        QuoteOrigin::Fallback => fallback_prompt(command),
        _ => quote_block(&quote.text, &quote.source),
    };

    [
        format!("=====『{}』=====", luck.tier.label()),
        format!("* luck index : {}%", luck.luck_index()),
        luck.tip.to_string(),
        SEPARATOR.to_string(),
        body,
        format!("---[ from {} ]---", attribution(&quote.origin)),
        format!("/{command} help"),
    ]
    .join("\n")
}

pub fn submitted_reply(record: &QuoteRecord) -> String {
    format!(
        "Submitted:\n{}",
        quote_block(&record.sentence, &record.source)
    )
}

pub fn retracted_reply(record: &QuoteRecord) -> String {
    format!(
        "Retracted:\n{}",
        quote_block(&record.sentence, &record.source)
    )
}
