use std::sync::Mutex;

use async_trait::async_trait;

use crate::{
    errors::Error,
    ports::QuoteStore,
    quotes::types::{NewQuote, QueryOptions, QuoteFilter, QuoteRecord},
    Result,
};

#[derive(Debug, Default)]
struct Table {
    next_id: i64,
    rows: Vec<QuoteRecord>,
}

/// Volatile `QuoteStore`, used by tests and when no database is configured.
#[derive(Debug, Default)]
pub struct InMemoryQuoteStore {
    table: Mutex<Table>,
}

impl InMemoryQuoteStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.table.lock().map(|t| t.rows.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Table>> {
        self.table
            .lock()
            .map_err(|_| Error::Storage("quote table lock poisoned".to_string()))
    }
}

#[async_trait]
impl QuoteStore for InMemoryQuoteStore {
    async fn find(&self, filter: QuoteFilter, options: QueryOptions) -> Result<Vec<QuoteRecord>> {
        let table = self.lock()?;
        let mut out: Vec<QuoteRecord> = table
            .rows
            .iter()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect();

        if options.newest_first {
            out.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        }
        if let Some(limit) = options.limit {
            out.truncate(limit);
        }
        Ok(out)
    }

    async fn create(&self, quote: NewQuote) -> Result<QuoteRecord> {
        let mut table = self.lock()?;
        if table.rows.iter().any(|r| r.fingerprint == quote.fingerprint) {
            return Err(Error::DuplicateQuote);
        }
        table.next_id += 1;
        let record = quote.into_record(table.next_id);
        table.rows.push(record.clone());
        Ok(record)
    }

    async fn remove(&self, id: i64) -> Result<()> {
        let mut table = self.lock()?;
        table.rows.retain(|r| r.id != id);
        Ok(())
    }
}
