//! Database schema definitions

/// The one table this bot owns. `fingerprint` is `UNIQUE` so concurrent
/// submissions of the same normalized text cannot both be inserted.
pub const CREATE_QUOTES_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS jrrp_quotes (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    sender TEXT NOT NULL,
    sentence TEXT NOT NULL,
    fingerprint TEXT NOT NULL UNIQUE,
    source TEXT NOT NULL,
    created_at INTEGER NOT NULL
)
"#;

pub const CREATE_SENDER_INDEX: &str = r#"
CREATE INDEX IF NOT EXISTS idx_jrrp_quotes_sender
ON jrrp_quotes (sender, created_at DESC)
"#;

pub fn all_schema_statements() -> &'static [&'static str] {
    &[CREATE_QUOTES_TABLE, CREATE_SENDER_INDEX]
}
