//! SQLite adapter for the quote table.

use std::{
    path::Path,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use rusqlite::{params, Connection, Row};

use jrrp_core::{
    errors::Error,
    ports::QuoteStore,
    quotes::types::{NewQuote, QueryOptions, QuoteFilter, QuoteRecord},
    Result,
};

pub mod schema;

const SELECT_COLUMNS: &str = "SELECT id, sender, sentence, fingerprint, source, created_at FROM jrrp_quotes";

/// SQLite-backed `QuoteStore`.
///
/// Every statement runs on tokio's blocking pool with the connection locked,
/// so a slow disk never stalls a runtime worker.
#[derive(Clone)]
pub struct SqliteQuoteStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteQuoteStore {
    /// Open a database file (creates if doesn't exist)
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path).map_err(map_err)?;
        Self::with_connection(conn)
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(map_err)?;
        Self::with_connection(conn)
    }

    fn with_connection(conn: Connection) -> Result<Self> {
        for stmt in schema::all_schema_statements() {
            conn.execute(stmt, []).map_err(map_err)?;
        }
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    async fn blocking<T, F>(&self, op: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T> + Send + 'static,
        T: Send + 'static,
    {
        let conn = Arc::clone(&self.conn);
        tokio::task::spawn_blocking(move || {
            let conn = conn
                .lock()
                .map_err(|_| Error::Storage("sqlite connection lock poisoned".to_string()))?;
            op(&conn)
        })
        .await
        .map_err(|e| Error::Storage(format!("sqlite task failed: {e}")))?
    }
}

fn query(
    conn: &Connection,
    filter: &QuoteFilter,
    options: QueryOptions,
) -> Result<Vec<QuoteRecord>> {
    let (clause, arg) = match filter {
        QuoteFilter::All => ("", None),
        QuoteFilter::Fingerprint(f) => (" WHERE fingerprint = ?1", Some(f.as_str())),
        QuoteFilter::Sender(s) => (" WHERE sender = ?1", Some(s.as_str())),
    };
    let order = if options.newest_first {
        " ORDER BY created_at DESC, id DESC"
    } else {
        " ORDER BY id ASC"
    };
    let limit = options
        .limit
        .map(|n| format!(" LIMIT {n}"))
        .unwrap_or_default();
    let sql = format!("{SELECT_COLUMNS}{clause}{order}{limit}");

    let mut stmt = conn.prepare(&sql).map_err(map_err)?;
    let rows = match arg {
        Some(a) => stmt.query_map([a], row_to_record),
        None => stmt.query_map([], row_to_record),
    }
    .map_err(map_err)?;

    rows.collect::<std::result::Result<Vec<_>, _>>()
        .map_err(map_err)
}

fn row_to_record(row: &Row<'_>) -> rusqlite::Result<QuoteRecord> {
    Ok(QuoteRecord {
        id: row.get(0)?,
        sender: row.get(1)?,
        sentence: row.get(2)?,
        fingerprint: row.get(3)?,
        source: row.get(4)?,
        created_at: row.get(5)?,
    })
}

fn map_err(e: rusqlite::Error) -> Error {
    if is_unique_violation(&e) {
        return Error::DuplicateQuote;
    }
    Error::Storage(format!("sqlite error: {e}"))
}

fn is_unique_violation(e: &rusqlite::Error) -> bool {
    matches!(
        e,
        rusqlite::Error::SqliteFailure(err, _)
            if err.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
    )
}

#[async_trait]
impl QuoteStore for SqliteQuoteStore {
    async fn find(&self, filter: QuoteFilter, options: QueryOptions) -> Result<Vec<QuoteRecord>> {
        self.blocking(move |conn| query(conn, &filter, options))
            .await
    }

    async fn create(&self, quote: NewQuote) -> Result<QuoteRecord> {
        self.blocking(move |conn| {
            conn.execute(
                r#"
                INSERT INTO jrrp_quotes (sender, sentence, fingerprint, source, created_at)
                VALUES (?1, ?2, ?3, ?4, ?5)
                "#,
                params![
                    quote.sender,
                    quote.sentence,
                    quote.fingerprint,
                    quote.source,
                    quote.created_at,
                ],
            )
            .map_err(map_err)?;
            Ok(quote.into_record(conn.last_insert_rowid()))
        })
        .await
    }

    async fn remove(&self, id: i64) -> Result<()> {
        let n = self
            .blocking(move |conn| {
                conn.execute("DELETE FROM jrrp_quotes WHERE id = ?1", [id])
                    .map_err(map_err)
            })
            .await?;
        if n == 0 {
            tracing::debug!(id, "delete matched no quote");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_quote(sender: &str, text: &str, created_at: i64) -> NewQuote {
        NewQuote {
            sender: sender.to_string(),
            sentence: text.to_string(),
            fingerprint: text.to_lowercase(),
            source: "src".to_string(),
            created_at,
        }
    }

    #[tokio::test]
    async fn create_and_find_round_trip_fields() {
        let store = SqliteQuoteStore::open_in_memory().unwrap();
        let rec = store.create(new_quote("u1", "Hello", 123)).await.unwrap();

        let got = store
            .find(
                QuoteFilter::Fingerprint("hello".to_string()),
                QueryOptions::first(),
            )
            .await
            .unwrap();
        assert_eq!(got, vec![rec]);
    }

    #[tokio::test]
    async fn unique_fingerprint_is_enforced() {
        let store = SqliteQuoteStore::open_in_memory().unwrap();
        store.create(new_quote("u1", "Same", 1)).await.unwrap();
        let err = store.create(new_quote("u2", "SAME", 2)).await.unwrap_err();
        assert!(matches!(err, Error::DuplicateQuote));

        let all = store
            .find(QuoteFilter::All, QueryOptions::default())
            .await
            .unwrap();
        assert_eq!(all.len(), 1);
    }

    #[tokio::test]
    async fn latest_by_sender_orders_by_time_then_id() {
        let store = SqliteQuoteStore::open_in_memory().unwrap();
        store.create(new_quote("u1", "a", 300)).await.unwrap();
        store.create(new_quote("u1", "b", 100)).await.unwrap();
        let c = store.create(new_quote("u1", "c", 300)).await.unwrap();
        store.create(new_quote("u2", "d", 999)).await.unwrap();

        let got = store
            .find(QuoteFilter::Sender("u1".to_string()), QueryOptions::latest())
            .await
            .unwrap();
        assert_eq!(got, vec![c]);
    }

    #[tokio::test]
    async fn remove_deletes_by_id_only() {
        let store = SqliteQuoteStore::open_in_memory().unwrap();
        let a = store.create(new_quote("u1", "a", 1)).await.unwrap();
        let b = store.create(new_quote("u1", "b", 2)).await.unwrap();

        store.remove(a.id).await.unwrap();
        store.remove(a.id).await.unwrap();

        let all = store
            .find(QuoteFilter::All, QueryOptions::default())
            .await
            .unwrap();
        assert_eq!(all, vec![b]);
    }

    #[tokio::test]
    async fn works_under_the_quote_board() {
        use jrrp_core::quotes::QuoteBoard;
        use std::sync::Arc;

        let board = QuoteBoard::new(Arc::new(SqliteQuoteStore::open_in_memory().unwrap()));
        board
            .submit("u1", "!text\nhello  world\n!source\nme")
            .await
            .unwrap();
        let err = board
            .submit("u2", "!text\nhello world\n\n!source\nyou")
            .await
            .unwrap_err();
        assert!(matches!(err, Error::DuplicateQuote));

        let removed = board.retract("u1").await.unwrap();
        assert_eq!(removed.sentence, "hello  world");
        assert!(matches!(
            board.retract("u1").await,
            Err(Error::NothingToRetract)
        ));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn concurrent_writes_share_one_connection() {
        let store = SqliteQuoteStore::open_in_memory().unwrap();
        let tasks: Vec<_> = (0..8)
            .map(|n| {
                let store = store.clone();
                tokio::spawn(async move {
                    store
                        .create(new_quote("u1", &format!("q{n}"), n))
                        .await
                        .unwrap()
                })
            })
            .collect();
        for t in tasks {
            t.await.unwrap();
        }

        let all = store
            .find(QuoteFilter::All, QueryOptions::default())
            .await
            .unwrap();
        assert_eq!(all.len(), 8);
    }
}
