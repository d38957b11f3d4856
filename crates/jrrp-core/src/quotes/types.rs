/// A stored community quote.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct QuoteRecord {
    pub id: i64,
    pub sender: String,
    pub sentence: String,
    /// Normalized sentence; unique across the table.
    pub fingerprint: String,
    pub source: String,
    /// Epoch milliseconds.
    pub created_at: i64,
}

/// A quote about to be inserted (the store assigns `id`).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewQuote {
    pub sender: String,
    pub sentence: String,
    pub fingerprint: String,
    pub source: String,
    pub created_at: i64,
}

impl NewQuote {
    pub fn into_record(self, id: i64) -> QuoteRecord {
        QuoteRecord {
            id,
            sender: self.sender,
            sentence: self.sentence,
            fingerprint: self.fingerprint,
            source: self.source,
            created_at: self.created_at,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuoteFilter {
    All,
    Fingerprint(String),
    Sender(String),
}

impl QuoteFilter {
    pub fn matches(&self, record: &QuoteRecord) -> bool {
        match self {
            QuoteFilter::All => true,
            QuoteFilter::Fingerprint(f) => &record.fingerprint == f,
            QuoteFilter::Sender(s) => &record.sender == s,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct QueryOptions {
    pub limit: Option<usize>,
    /// `created_at` descending, ties by `id` descending.
    pub newest_first: bool,
}

impl QueryOptions {
    pub fn first() -> Self {
        Self {
            limit: Some(1),
            newest_first: false,
        }
    }

    pub fn latest() -> Self {
        Self {
            limit: Some(1),
            newest_first: true,
        }
    }
}

/// A quote fetched from the remote source.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RemoteQuote {
    pub text: String,
    pub source: String,
    /// Name of the service shown in the reply footer.
    pub provider: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum QuoteOrigin {
    Local { sender: String },
    Remote { provider: String },
    Fallback,
}

/// The quote that ends up in a luck reply.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DisplayQuote {
    pub text: String,
    pub source: String,
    pub origin: QuoteOrigin,
}

impl From<QuoteRecord> for DisplayQuote {
    fn from(r: QuoteRecord) -> Self {
        Self {
            text: r.sentence,
            source: r.source,
            origin: QuoteOrigin::Local { sender: r.sender },
        }
    }
}

impl From<RemoteQuote> for DisplayQuote {
    fn from(r: RemoteQuote) -> Self {
        Self {
            text: r.text,
            source: r.source,
            origin: QuoteOrigin::Remote {
                provider: r.provider,
            },
        }
    }
}
