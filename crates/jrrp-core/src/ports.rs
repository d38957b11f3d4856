use async_trait::async_trait;

use crate::{
    quotes::types::{NewQuote, QueryOptions, QuoteFilter, QuoteRecord, RemoteQuote},
    Result,
};

/// Hexagonal port for the quote table owned by the host database.
///
/// Implementations must reject a second record with an existing fingerprint
/// with `Error::DuplicateQuote`, so two racing submissions of the same text
/// cannot both land.
#[async_trait]
pub trait QuoteStore: Send + Sync {
    async fn find(&self, filter: QuoteFilter, options: QueryOptions) -> Result<Vec<QuoteRecord>>;
    async fn create(&self, quote: NewQuote) -> Result<QuoteRecord>;
    async fn remove(&self, id: i64) -> Result<()>;
}

/// Hexagonal port for an external quote service.
///
/// Any failure (transport, status, payload shape) is `Error::RemoteUnavailable`.
#[async_trait]
pub trait RemoteQuoteSource: Send + Sync {
    async fn fetch(&self) -> Result<RemoteQuote>;
}
